//! Geometric operations on parsed ligands.
//!
//! - [`infer_bonds`] reconstructs connectivity from interatomic distances when a structure
//!   arrives without explicit bond records.
//! - [`cpk_color`] and [`center_of_mass`] feed viewers that render the resulting graph.

mod bonds;
mod render;

pub use bonds::{MAX_BOND_DISTANCE, infer_bonds, infer_bonds_within};
pub use render::{DEFAULT_CPK_COLOR, center_of_mass, cpk_color};
