//! Bonded connectivity for parsed ligands.
//!
//! Bonds are stored between atom serials in canonical ascending order so that explicit
//! `CONECT` records, `_chem_comp_bond` rows, and geometric inference all collapse onto the
//! same key regardless of the direction a connection was reported in.

use super::atom::Atom;
use std::collections::HashSet;
use std::fmt;

/// Undirected bond between two atom serials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bond {
    /// Lesser serial of the pair.
    pub atom1: u32,
    /// Greater serial of the pair.
    pub atom2: u32,
}

impl Bond {
    /// Creates a new bond while canonicalizing the endpoint ordering.
    ///
    /// # Arguments
    ///
    /// * `serial1` - Serial of one bonded atom.
    /// * `serial2` - Serial of the partner atom.
    ///
    /// # Returns
    ///
    /// A `Bond` whose serials satisfy `atom1 <= atom2`.
    pub fn new(serial1: u32, serial2: u32) -> Self {
        if serial1 <= serial2 {
            Self {
                atom1: serial1,
                atom2: serial2,
            }
        } else {
            Self {
                atom1: serial2,
                atom2: serial1,
            }
        }
    }

    /// Returns `true` when both endpoints reference the same atom.
    pub fn is_self_loop(&self) -> bool {
        self.atom1 == self.atom2
    }
}

/// Atom/bond graph for a single structure view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl Molecule {
    /// Builds a molecule, dropping self-loops and duplicate bonds while keeping first-seen order.
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        let mut seen = HashSet::with_capacity(bonds.len());
        let bonds = bonds
            .into_iter()
            .filter(|b| !b.is_self_loop() && seen.insert(*b))
            .collect();
        Self { atoms, bonds }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Looks up an atom by its serial number.
    pub fn atom_by_serial(&self, serial: u32) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.serial == serial)
    }

    /// Enumerates the serials bonded to `serial`.
    pub fn neighbors_of(&self, serial: u32) -> impl Iterator<Item = u32> + '_ {
        self.bonds.iter().filter_map(move |b| {
            if b.atom1 == serial {
                Some(b.atom2)
            } else if b.atom2 == serial {
                Some(b.atom1)
            } else {
                None
            }
        })
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Molecule {{ atoms: {}, bonds: {} }}",
            self.atom_count(),
            self.bond_count()
        )
    }
}
