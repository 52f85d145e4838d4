//! Geometric bond inference for structures that carry no explicit connectivity.
//!
//! Every unordered atom pair is tested against a fixed distance cutoff, which is O(n²) in
//! the atom count. Ligands hold tens of atoms, so the quadratic pass is cheaper than building
//! a spatial index; the outer loop still fans out across threads when the `parallel` feature
//! is enabled.

use crate::model::{atom::Atom, topology::Bond};
use crate::utils::parallel::*;

/// Distance in ångströms below which two atoms are considered bonded.
pub const MAX_BOND_DISTANCE: f64 = 1.8;

/// Infers bonds using [`MAX_BOND_DISTANCE`].
///
/// # Arguments
///
/// * `atoms` - Atoms to connect, in any order.
///
/// # Returns
///
/// Canonical bonds ordered by the position of their first atom in `atoms`.
pub fn infer_bonds(atoms: &[Atom]) -> Vec<Bond> {
    infer_bonds_within(atoms, MAX_BOND_DISTANCE)
}

/// Infers bonds between every atom pair strictly closer than `cutoff`.
pub fn infer_bonds_within(atoms: &[Atom], cutoff: f64) -> Vec<Bond> {
    let cutoff_sq = cutoff * cutoff;

    (0..atoms.len())
        .into_par_iter()
        .flat_map_iter(|i| {
            let anchor = &atoms[i];
            atoms[i + 1..]
                .iter()
                .filter(move |other| anchor.distance_squared(other) < cutoff_sq)
                .map(move |other| Bond::new(anchor.serial, other.serial))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{Point, RecordKind};
    use smol_str::SmolStr;

    fn atom(serial: u32, x: f64, y: f64, z: f64) -> Atom {
        Atom {
            record: RecordKind::Hetatm,
            serial,
            name: SmolStr::new("C"),
            element: SmolStr::new("C"),
            res_name: SmolStr::new("LIG"),
            chain_id: SmolStr::new("A"),
            res_seq: 1,
            pos: Point::new(x, y, z),
            occupancy: SmolStr::new("1.00"),
            temp_factor: SmolStr::new("0.00"),
        }
    }

    #[test]
    fn atoms_just_inside_cutoff_are_bonded() {
        let bonds = infer_bonds(&[atom(1, 0.0, 0.0, 0.0), atom(2, 1.79, 0.0, 0.0)]);

        assert_eq!(bonds, vec![Bond::new(1, 2)]);
    }

    #[test]
    fn atoms_just_outside_cutoff_are_not_bonded() {
        let bonds = infer_bonds(&[atom(1, 0.0, 0.0, 0.0), atom(2, 0.0, 1.81, 0.0)]);

        assert!(bonds.is_empty());
    }

    #[test]
    fn inferred_bonds_are_canonical() {
        let bonds = infer_bonds(&[atom(7, 0.0, 0.0, 0.0), atom(3, 0.0, 0.0, 1.5)]);

        assert_eq!(bonds.len(), 1);
        assert_eq!((bonds[0].atom1, bonds[0].atom2), (3, 7));
    }

    #[test]
    fn every_close_pair_is_reported_once() {
        let atoms = [
            atom(1, 0.0, 0.0, 0.0),
            atom(2, 1.0, 0.0, 0.0),
            atom(3, 0.5, 0.8, 0.0),
            atom(4, 10.0, 0.0, 0.0),
        ];

        let bonds = infer_bonds(&atoms);

        assert_eq!(
            bonds,
            vec![Bond::new(1, 2), Bond::new(1, 3), Bond::new(2, 3)]
        );
    }

    #[test]
    fn custom_cutoff_is_respected() {
        let atoms = [atom(1, 0.0, 0.0, 0.0), atom(2, 2.0, 0.0, 0.0)];

        assert!(infer_bonds_within(&atoms, 1.8).is_empty());
        assert_eq!(infer_bonds_within(&atoms, 2.1), vec![Bond::new(1, 2)]);
    }

    #[test]
    fn empty_and_single_atom_inputs_yield_no_bonds() {
        assert!(infer_bonds(&[]).is_empty());
        assert!(infer_bonds(&[atom(1, 0.0, 0.0, 0.0)]).is_empty());
    }
}
