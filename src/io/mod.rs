//! IO front-end for the ligand conversion pipeline.
//!
//! mmCIF text from the structure database is decoded into atom records, rendered as
//! fixed-column PDB text, and parsed back into an atom/bond graph by viewers. The format
//! modules stay private; this module re-exports their entry points.

mod convert;
mod error;
mod mmcif;
mod pdb;

pub use convert::{ConvertOptions, convert_mmcif_to_pdb};

pub use mmcif::reader::{
    AtomSiteColumns, LoopLayout, MmcifData, locate_atom_site, read as read_mmcif,
    read_str as read_mmcif_str,
};

pub use pdb::reader::{read as read_pdb, read_str as read_pdb_str};
pub use pdb::writer::{
    write_records as write_pdb_records, write_records_with_bonds as write_pdb_records_with_bonds,
};

pub use error::Error;
