//! Atom representations on both sides of the mmCIF → PDB pipeline.
//!
//! [`AtomRecord`] is the intermediate row decoded from an `_atom_site` loop and carries
//! everything the fixed-column writer needs, including the auxiliary occupancy and
//! temperature-factor tokens that are passed through untouched. [`Atom`] is the entry rebuilt
//! by the PDB reader for rendering and bond inference; it keeps the same fields so a
//! converted line parses back to the values it was written from.

use super::types::{Point, RecordKind};
use smol_str::SmolStr;
use std::fmt;

/// Atom row decoded from a columnar `_atom_site` block.
///
/// Coordinates are parsed and validated as finite numbers; occupancy and temperature factor
/// stay as source tokens so the writer reproduces them verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// `ATOM` or `HETATM` from `_atom_site.group_PDB`.
    pub group: RecordKind,
    /// Source-assigned serial number (`_atom_site.id`).
    pub serial: u32,
    /// Element symbol (`_atom_site.type_symbol`).
    pub element: SmolStr,
    /// Atom label such as `CA` or `O1'`.
    pub atom_name: SmolStr,
    /// Residue/component code such as `ATP`.
    pub res_name: SmolStr,
    /// Author chain identifier, `'A'` when the source leaves it blank.
    pub chain_id: char,
    /// Author residue sequence number.
    pub res_seq: i32,
    /// Cartesian coordinates in ångströms.
    pub pos: Point,
    /// Occupancy token, e.g. `1.00`.
    pub occupancy: SmolStr,
    /// Isotropic temperature factor token, e.g. `23.41`.
    pub temp_factor: SmolStr,
}

/// Atom reconstructed from a fixed-column PDB line.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Record tag the line started with.
    pub record: RecordKind,
    pub serial: u32,
    pub name: SmolStr,
    /// Upper-cased element symbol.
    pub element: SmolStr,
    pub res_name: SmolStr,
    /// Chain identifier; blank columns yield an empty string.
    pub chain_id: SmolStr,
    pub res_seq: i32,
    pub pos: Point,
    /// Occupancy token from columns 55-60, trimmed; empty when the line stops short.
    pub occupancy: SmolStr,
    /// Temperature-factor token from columns 61-66, trimmed.
    pub temp_factor: SmolStr,
}

impl Atom {
    /// Computes the squared Euclidean distance to another atom.
    ///
    /// # Arguments
    ///
    /// * `other` - Reference atom to measure against.
    ///
    /// # Returns
    ///
    /// The squared distance in Å².
    pub fn distance_squared(&self, other: &Atom) -> f64 {
        nalgebra::distance_squared(&self.pos, &other.pos)
    }

    /// Computes the Euclidean distance to another atom in ångströms.
    pub fn distance(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.pos, &other.pos)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Atom {{ serial: {}, name: \"{}\", element: {}, pos: [{:.3}, {:.3}, {:.3}] }}",
            self.serial, self.name, self.element, self.pos.x, self.pos.y, self.pos.z
        )
    }
}
