//! # SwiftyProtein
//!
//! **SwiftyProtein** is the ligand pipeline behind a molecular viewer: it resolves a chemical component id to a deposited structure, downloads the ligand's mmCIF coordinates, rewrites them as fixed-column PDB text, and rebuilds an atom/bond graph on the client side for rendering.
//!
//! ## Features
//!
//! - **Header-driven mmCIF decoding** – `_atom_site` columns are resolved by name, so the converter is immune to the column order a given source file happens to declare.
//! - **Fixed-column PDB output** – Coordinate records land on the exact byte offsets downstream viewers slice, with optional `CONECT` connectivity and a single `END` sentinel.
//! - **Bond reconstruction** – Explicit `CONECT` records are honored verbatim; otherwise bonds are inferred from interatomic distances under a 1.8 Å cutoff.
//! - **Remote orchestration** – The `remote` module searches RCSB for the first entry containing a component and fetches its ligand-only coordinates.
//! - **HTTP endpoint** – The `server` module exposes the pipeline as `GET /api/v1/pdb/{ligand}` on top of `axum`.
//! - **Render helpers** – CPK colors and centers of mass for placing the camera and painting atoms.
//!
//! ## Quick Start
//!
//! ```
//! use swifty_protein::io::{ConvertOptions, convert_mmcif_to_pdb, read_pdb_str};
//!
//! let mmcif = "\
//! data_HOH
//! loop_
//! _atom_site.group_PDB
//! _atom_site.id
//! _atom_site.type_symbol
//! _atom_site.label_atom_id
//! _atom_site.label_comp_id
//! _atom_site.auth_seq_id
//! _atom_site.Cartn_x
//! _atom_site.Cartn_y
//! _atom_site.Cartn_z
//! HETATM 1 O O   HOH 1 0.000 0.000 0.000
//! HETATM 2 H H1  HOH 1 0.957 0.000 0.000
//! HETATM 3 H H2  HOH 1 -0.240 0.927 0.000
//! #
//! ";
//!
//! let pdb = convert_mmcif_to_pdb(mmcif, &ConvertOptions::default())?;
//! let molecule = read_pdb_str(&pdb)?;
//!
//! assert_eq!(molecule.atom_count(), 3);
//! assert_eq!(molecule.bond_count(), 3);
//! # Ok::<(), swifty_protein::io::Error>(())
//! ```

mod model;
mod utils;

pub mod io;
pub mod ops;

#[cfg(feature = "server")]
pub mod remote;
#[cfg(feature = "server")]
pub mod server;

pub use model::atom::{Atom, AtomRecord};
pub use model::topology::{Bond, Molecule};
pub use model::types::{ParseRecordKindError, Point, RecordKind};
