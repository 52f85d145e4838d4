//! Presentation helpers consumed by structure viewers.

use crate::model::{atom::Atom, types::Point};
use nalgebra::Vector3;

/// Colour returned for elements missing from the CPK table.
pub const DEFAULT_CPK_COLOR: &str = "#FF1493";

/// Returns the CPK (Corey–Pauling–Koltun) hex colour for an element symbol.
///
/// Lookup is case-insensitive; unknown symbols map to [`DEFAULT_CPK_COLOR`].
pub fn cpk_color(element: &str) -> &'static str {
    match element.trim().to_ascii_uppercase().as_str() {
        "H" => "#FFFFFF",
        "C" => "#909090",
        "N" => "#3050F8",
        "O" => "#FF0D0D",
        "F" => "#90E050",
        "CL" => "#1FF01F",
        "BR" => "#A62929",
        "I" => "#940094",
        "HE" => "#D9FFFF",
        "NE" => "#B3E3F5",
        "AR" => "#80D1E3",
        "XE" => "#429EB0",
        "KR" => "#5CB8D1",
        "P" => "#FF8000",
        "S" => "#FFFF30",
        "B" => "#FFB5B5",
        "LI" => "#CC80FF",
        "NA" => "#AB5CF2",
        "K" => "#8F40D4",
        "RB" => "#702EB0",
        "CS" => "#57178F",
        "FR" => "#420066",
        "BE" => "#C2FF00",
        "MG" => "#8AFF00",
        "CA" => "#3DFF00",
        "SR" => "#00FF00",
        "BA" => "#00D500",
        "RA" => "#007D00",
        "TI" => "#BFC2C7",
        "FE" => "#E06633",
        "ZN" => "#7D80B0",
        _ => DEFAULT_CPK_COLOR,
    }
}

/// Unweighted centroid of the atom positions; the origin for an empty slice.
pub fn center_of_mass(atoms: &[Atom]) -> Point {
    if atoms.is_empty() {
        return Point::origin();
    }

    let sum: Vector3<f64> = atoms.iter().map(|a| a.pos.coords).sum();
    Point::from(sum / atoms.len() as f64)
}
