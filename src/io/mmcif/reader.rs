use crate::io::error::Error;
use crate::model::{
    atom::AtomRecord,
    topology::Bond,
    types::{Point, RecordKind},
};
use smol_str::SmolStr;
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, Read};
use std::str::FromStr;

const FORMAT: &str = "mmCIF";
const ATOM_SITE: &str = "_atom_site.";
const CHEM_COMP_BOND: &str = "_chem_comp_bond.";

const DEFAULT_CHAIN_ID: char = 'A';
const DEFAULT_OCCUPANCY: &str = "1.00";
const DEFAULT_TEMP_FACTOR: &str = "0.00";

/// Atom rows and explicit connectivity read from an mmCIF document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MmcifData {
    /// `_atom_site` rows in source order.
    pub records: Vec<AtomRecord>,
    /// Bonds resolved from `_chem_comp_bond`, keyed by atom serial.
    pub bonds: Vec<Bond>,
}

/// Declared headers of a loop and the index of its first data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopLayout {
    pub headers: Vec<String>,
    pub data_start: usize,
}

/// Column positions of the `_atom_site` fields used by the converter.
///
/// Built once per document from the declared header order and validated before any row is
/// decoded, so a missing field fails fast instead of surfacing deep inside the row loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomSiteColumns {
    group: usize,
    serial: usize,
    element: usize,
    atom_name: usize,
    res_name: usize,
    res_seq: usize,
    x: usize,
    y: usize,
    z: usize,
    chain: Option<usize>,
    occupancy: Option<usize>,
    temp_factor: Option<usize>,
}

impl AtomSiteColumns {
    pub fn from_headers(headers: &[String]) -> Result<Self, Error> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &'static str| find(name).ok_or_else(|| Error::missing_column(name));

        Ok(Self {
            group: require("_atom_site.group_PDB")?,
            serial: require("_atom_site.id")?,
            element: require("_atom_site.type_symbol")?,
            atom_name: find("_atom_site.label_atom_id")
                .or_else(|| find("_atom_site.auth_atom_id"))
                .ok_or_else(|| Error::missing_column("_atom_site.label_atom_id"))?,
            res_name: find("_atom_site.label_comp_id")
                .or_else(|| find("_atom_site.auth_comp_id"))
                .ok_or_else(|| Error::missing_column("_atom_site.label_comp_id"))?,
            res_seq: find("_atom_site.auth_seq_id")
                .or_else(|| find("_atom_site.label_seq_id"))
                .ok_or_else(|| Error::missing_column("_atom_site.auth_seq_id"))?,
            x: require("_atom_site.Cartn_x")?,
            y: require("_atom_site.Cartn_y")?,
            z: require("_atom_site.Cartn_z")?,
            chain: find("_atom_site.auth_asym_id").or_else(|| find("_atom_site.label_asym_id")),
            occupancy: find("_atom_site.occupancy"),
            temp_factor: find("_atom_site.B_iso_or_equiv"),
        })
    }

    fn max_index(&self) -> usize {
        [
            self.group,
            self.serial,
            self.element,
            self.atom_name,
            self.res_name,
            self.res_seq,
            self.x,
            self.y,
            self.z,
        ]
        .into_iter()
        .chain(self.chain)
        .chain(self.occupancy)
        .chain(self.temp_factor)
        .max()
        .unwrap_or(0)
    }
}

pub fn read<R: BufRead>(mut reader: R) -> Result<MmcifData, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(Error::from_io)?;
    read_str(&text)
}

pub fn read_str(text: &str) -> Result<MmcifData, Error> {
    let lines: Vec<&str> = text.lines().collect();

    let records = match locate_atom_site(&lines) {
        Ok(layout) => {
            let columns = AtomSiteColumns::from_headers(&layout.headers)?;
            decode_loop_rows(&lines, layout.data_start, &columns)?
        }
        Err(err @ Error::NoAtomData { .. }) => match read_single_atom_site(&lines)? {
            Some(record) => vec![record],
            None => return Err(err),
        },
        Err(other) => return Err(other),
    };

    let bonds = read_chem_comp_bonds(&lines, &records)?;

    Ok(MmcifData { records, bonds })
}

/// Collects the `_atom_site.` headers in declaration order and finds the first data line.
///
/// # Errors
///
/// Returns [`Error::NoAtomData`] when no `ATOM`/`HETATM` line follows the headers.
pub fn locate_atom_site(lines: &[&str]) -> Result<LoopLayout, Error> {
    let mut headers = Vec::new();

    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim();

        if line.starts_with(ATOM_SITE) {
            if let Some(name) = line.split_whitespace().next() {
                headers.push(name.to_string());
            }
            continue;
        }

        if !headers.is_empty() && starts_with_record_tag(line) {
            return Ok(LoopLayout {
                headers,
                data_start: i,
            });
        }
    }

    Err(Error::no_atom_data(FORMAT))
}

fn starts_with_record_tag(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|tag| RecordKind::from_str(tag).is_ok())
}

fn is_block_terminator(line: &str) -> bool {
    line.is_empty()
        || line == "#"
        || line.starts_with("loop_")
        || line.starts_with("data_")
        || line.starts_with('_')
}

fn decode_loop_rows(
    lines: &[&str],
    data_start: usize,
    columns: &AtomSiteColumns,
) -> Result<Vec<AtomRecord>, Error> {
    let mut records = Vec::new();

    for (offset, raw) in lines[data_start..].iter().enumerate() {
        let line = raw.trim();
        if is_block_terminator(line) {
            break;
        }

        let tokens = tokenize_mmcif_line(line);
        records.push(decode_row(&tokens, columns, data_start + offset + 1)?);
    }

    Ok(records)
}

/// Reads `_atom_site` written as key/value pairs, the form used for single-atom ligands.
fn read_single_atom_site(lines: &[&str]) -> Result<Option<AtomRecord>, Error> {
    let mut headers = Vec::new();
    let mut values = Vec::new();
    let mut first_line = 0;

    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if !line.starts_with(ATOM_SITE) {
            continue;
        }
        let mut tokens = tokenize_mmcif_line(line).into_iter();
        let (Some(name), Some(value)) = (tokens.next(), tokens.next()) else {
            return Ok(None);
        };
        if headers.is_empty() {
            first_line = i + 1;
        }
        headers.push(name);
        values.push(value);
    }

    if headers.is_empty() {
        return Ok(None);
    }

    let columns = AtomSiteColumns::from_headers(&headers)?;
    decode_row(&values, &columns, first_line).map(Some)
}

fn decode_row(
    tokens: &[String],
    columns: &AtomSiteColumns,
    line_num: usize,
) -> Result<AtomRecord, Error> {
    if tokens.len() <= columns.max_index() {
        return Err(Error::parse(
            FORMAT,
            line_num,
            "Atom record is shorter than declared _atom_site headers",
        ));
    }

    let group_str = tokens[columns.group].as_str();
    let group = RecordKind::from_str(group_str).map_err(|_| {
        Error::parse(
            FORMAT,
            line_num,
            format!("Unknown group_PDB value '{group_str}'"),
        )
    })?;

    let serial = parse_serial(&tokens[columns.serial], line_num)?;
    let element = required_value(&tokens[columns.element], "type_symbol", line_num)?;
    let atom_name = required_value(&tokens[columns.atom_name], "atom identifier", line_num)?;
    let res_name = required_value(&tokens[columns.res_name], "component identifier", line_num)?;
    let res_seq = parse_res_seq(&tokens[columns.res_seq], line_num)?;

    let x = parse_coordinate(&tokens[columns.x], "X", line_num)?;
    let y = parse_coordinate(&tokens[columns.y], "Y", line_num)?;
    let z = parse_coordinate(&tokens[columns.z], "Z", line_num)?;

    let chain_id = optional_value(tokens, columns.chain)
        .and_then(|chain| chain.chars().next())
        .unwrap_or(DEFAULT_CHAIN_ID);
    let occupancy = optional_value(tokens, columns.occupancy).unwrap_or(DEFAULT_OCCUPANCY);
    let temp_factor = optional_value(tokens, columns.temp_factor).unwrap_or(DEFAULT_TEMP_FACTOR);

    Ok(AtomRecord {
        group,
        serial,
        element: SmolStr::new(element),
        atom_name: SmolStr::new(atom_name),
        res_name: SmolStr::new(res_name),
        chain_id,
        res_seq,
        pos: Point::new(x, y, z),
        occupancy: SmolStr::new(occupancy),
        temp_factor: SmolStr::new(temp_factor),
    })
}

fn is_null(value: &str) -> bool {
    matches!(value, "." | "?")
}

fn required_value<'a>(value: &'a str, field: &str, line_num: usize) -> Result<&'a str, Error> {
    if is_null(value) || value.is_empty() {
        Err(Error::parse(
            FORMAT,
            line_num,
            format!("Missing value for {field}"),
        ))
    } else {
        Ok(value)
    }
}

fn optional_value(tokens: &[String], idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| tokens.get(i))
        .map(|s| s.as_str())
        .filter(|v| !is_null(v) && !v.is_empty())
}

fn parse_serial(value: &str, line_num: usize) -> Result<u32, Error> {
    match u32::from_str(value) {
        Ok(serial) if serial > 0 => Ok(serial),
        _ => Err(Error::parse(
            FORMAT,
            line_num,
            format!("Invalid atom serial '{value}'"),
        )),
    }
}

fn parse_res_seq(value: &str, line_num: usize) -> Result<i32, Error> {
    if is_null(value) {
        return Ok(1);
    }
    i32::from_str(value).map_err(|_| {
        Error::parse(
            FORMAT,
            line_num,
            format!("Invalid residue sequence number '{value}'"),
        )
    })
}

fn parse_coordinate(value: &str, axis: &str, line_num: usize) -> Result<f64, Error> {
    match f64::from_str(value) {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::parse(
            FORMAT,
            line_num,
            format!("Invalid {axis} coordinate '{value}'"),
        )),
    }
}

/// Splits a data line on whitespace, honoring single- and double-quoted values.
///
/// A quote only closes a value when followed by whitespace or the end of the line, so atom
/// names such as `"O5'"` survive intact.
fn tokenize_mmcif_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut current = String::new();
        if c == '\'' || c == '"' {
            chars.next();
            while let Some(ch) = chars.next() {
                if ch == c && chars.peek().is_none_or(|next| next.is_whitespace()) {
                    break;
                }
                current.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                current.push(ch);
                chars.next();
            }
        }
        tokens.push(current);
    }

    tokens
}

fn locate_loop(lines: &[&str], prefix: &str) -> Option<LoopLayout> {
    let mut headers = Vec::new();

    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.starts_with(prefix) {
            headers.push(line.split_whitespace().next()?.to_string());
        } else if !headers.is_empty() {
            return (!is_block_terminator(line)).then_some(LoopLayout {
                headers,
                data_start: i,
            });
        }
    }

    None
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ResKey {
    chain_id: char,
    res_seq: i32,
    res_name: SmolStr,
}

/// Resolves `_chem_comp_bond` atom-name pairs to serials within each residue instance.
///
/// Pairs naming atoms absent from the coordinates (commonly hydrogens) are skipped.
fn read_chem_comp_bonds(lines: &[&str], records: &[AtomRecord]) -> Result<Vec<Bond>, Error> {
    let Some(layout) = locate_loop(lines, CHEM_COMP_BOND) else {
        return Ok(Vec::new());
    };

    let find = |name: &str| layout.headers.iter().position(|h| h == name);
    let comp_idx = find("_chem_comp_bond.comp_id");
    let (Some(a1_idx), Some(a2_idx)) = (
        find("_chem_comp_bond.atom_id_1"),
        find("_chem_comp_bond.atom_id_2"),
    ) else {
        return Err(Error::inconsistent_data(
            FORMAT,
            "_chem_comp_bond loop lacks atom_id_1/atom_id_2 columns",
        ));
    };
    let max_idx = [Some(a1_idx), Some(a2_idx), comp_idx]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(0);

    let mut residue_order: Vec<ResKey> = Vec::new();
    let mut residues: HashMap<ResKey, HashMap<&str, u32>> = HashMap::new();
    for record in records {
        let key = ResKey {
            chain_id: record.chain_id,
            res_seq: record.res_seq,
            res_name: record.res_name.clone(),
        };
        let names = residues.entry(key.clone()).or_insert_with(|| {
            residue_order.push(key);
            HashMap::new()
        });
        names
            .entry(record.atom_name.as_str())
            .or_insert(record.serial);
    }

    let mut seen = HashSet::new();
    let mut bonds = Vec::new();

    for (offset, raw) in lines[layout.data_start..].iter().enumerate() {
        let line = raw.trim();
        if is_block_terminator(line) {
            break;
        }

        let tokens = tokenize_mmcif_line(line);
        if tokens.len() <= max_idx {
            return Err(Error::parse(
                FORMAT,
                layout.data_start + offset + 1,
                "Bond record is shorter than declared _chem_comp_bond headers",
            ));
        }

        let comp = comp_idx.map(|i| tokens[i].as_str());
        for key in &residue_order {
            if comp.is_some_and(|c| c != key.res_name) {
                continue;
            }
            let names = &residues[key];
            if let (Some(&s1), Some(&s2)) = (
                names.get(tokens[a1_idx].as_str()),
                names.get(tokens[a2_idx].as_str()),
            ) {
                let bond = Bond::new(s1, s2);
                if !bond.is_self_loop() && seen.insert(bond) {
                    bonds.push(bond);
                }
            }
        }
    }

    Ok(bonds)
}
