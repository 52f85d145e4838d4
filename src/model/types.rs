use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;

pub type Point = Point3<f64>;

/// Record family of a coordinate line, shared by mmCIF `group_PDB` and PDB record tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Polymer atom (`ATOM`).
    Atom,
    /// Hetero atom such as a ligand, ion, or water (`HETATM`).
    Hetatm,
}

impl RecordKind {
    /// Returns the record tag as it appears in both formats.
    pub fn tag(self) -> &'static str {
        match self {
            RecordKind::Atom => "ATOM",
            RecordKind::Hetatm => "HETATM",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRecordKindError;

impl fmt::Display for ParseRecordKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("record tag is neither ATOM nor HETATM")
    }
}

impl std::error::Error for ParseRecordKindError {}

impl FromStr for RecordKind {
    type Err = ParseRecordKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            t if t.eq_ignore_ascii_case("ATOM") => Ok(RecordKind::Atom),
            t if t.eq_ignore_ascii_case("HETATM") => Ok(RecordKind::Hetatm),
            _ => Err(ParseRecordKindError),
        }
    }
}
