//! Core data structures for ligand structures.
//!
//! This module defines the intermediate atom rows produced by the mmCIF reader, the atoms and
//! bonds rebuilt by the PDB reader, and the shared geometric types. They are consumed by the
//! converters in `io` and the geometric routines in `ops`.

pub mod atom;
pub mod topology;
pub mod types;
