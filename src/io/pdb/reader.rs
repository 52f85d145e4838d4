use crate::io::error::Error;
use crate::model::{
    atom::Atom,
    topology::{Bond, Molecule},
    types::{Point, RecordKind},
};
use crate::ops::infer_bonds;
use smol_str::SmolStr;
use std::io::BufRead;
use std::ops::Range;
use std::str::FromStr;

const FORMAT: &str = "PDB";
const CONECT_SLOT_WIDTH: usize = 5;

/// Parses fixed-column PDB text into an atom/bond graph.
///
/// Coordinate records are decoded at fixed offsets and `CONECT` records become canonical
/// bonds. When the text carries no connectivity at all, bonds are inferred from interatomic
/// distances once every atom has been read.
///
/// # Errors
///
/// Returns [`Error::Parse`] when a coordinate record has an unparseable serial, residue
/// sequence number, or coordinate; the whole document is rejected in that case.
pub fn read<R: BufRead>(reader: R) -> Result<Molecule, Error> {
    let mut atoms = Vec::new();
    let mut bonds = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(Error::from_io)?;
        let line_num = idx + 1;

        let tag = field(&line, 0..6).trim();
        if let Ok(record) = RecordKind::from_str(tag) {
            atoms.push(parse_atom_record(&line, record, line_num)?);
        } else if tag == "CONECT" {
            parse_conect_record(&line, &mut bonds);
        }
    }

    if bonds.is_empty() {
        bonds = infer_bonds(&atoms);
    }

    Ok(Molecule::new(atoms, bonds))
}

pub fn read_str(text: &str) -> Result<Molecule, Error> {
    read(text.as_bytes())
}

fn field(line: &str, range: Range<usize>) -> &str {
    let end = range.end.min(line.len());
    let start = range.start.min(end);
    line.get(start..end).unwrap_or("")
}

fn parse_atom_record(line: &str, record: RecordKind, line_num: usize) -> Result<Atom, Error> {
    let serial = field(line, 6..11)
        .trim()
        .parse::<u32>()
        .map_err(|_| Error::parse(FORMAT, line_num, "Invalid atom serial number"))?;
    let name = field(line, 12..16).trim();
    let res_name = field(line, 17..20).trim();
    let chain_id = field(line, 21..22).trim();
    let res_seq = field(line, 22..26)
        .trim()
        .parse::<i32>()
        .map_err(|_| Error::parse(FORMAT, line_num, "Invalid residue sequence number"))?;

    let x = parse_coordinate(field(line, 30..38), "X", line_num)?;
    let y = parse_coordinate(field(line, 38..46), "Y", line_num)?;
    let z = parse_coordinate(field(line, 46..54), "Z", line_num)?;

    let element = match field(line, 76..78).trim() {
        "" => name.get(0..1).unwrap_or(""),
        symbol => symbol,
    };

    Ok(Atom {
        record,
        serial,
        name: SmolStr::new(name),
        element: SmolStr::new(element.to_ascii_uppercase()),
        res_name: SmolStr::new(res_name),
        chain_id: SmolStr::new(chain_id),
        res_seq,
        pos: Point::new(x, y, z),
        occupancy: SmolStr::new(field(line, 54..60).trim()),
        temp_factor: SmolStr::new(field(line, 60..66).trim()),
    })
}

fn parse_coordinate(value: &str, axis: &str, line_num: usize) -> Result<f64, Error> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::parse(
            FORMAT,
            line_num,
            format!("Invalid {axis} coordinate"),
        )),
    }
}

/// Reads the base serial and every 5-column partner slot; blank or unparseable slots are
/// skipped, as is a record whose base serial cannot be read.
fn parse_conect_record(line: &str, bonds: &mut Vec<Bond>) {
    let Ok(base) = field(line, 6..11).trim().parse::<u32>() else {
        return;
    };

    let mut start = 11;
    while start < line.len() {
        let slot = field(line, start..start + CONECT_SLOT_WIDTH).trim();
        if let Ok(partner) = slot.parse::<u32>() {
            if partner != base {
                bonds.push(Bond::new(base, partner));
            }
        }
        start += CONECT_SLOT_WIDTH;
    }
}
