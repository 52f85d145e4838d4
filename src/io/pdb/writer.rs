use crate::io::error::Error;
use crate::model::{atom::AtomRecord, topology::Bond};
use std::collections::{BTreeMap, HashSet};
use std::io::Write;

const FORMAT: &str = "PDB";
const MAX_SERIAL: u32 = 99_999;
const MIN_RES_SEQ: i32 = -999;
const AUX_FIELD_WIDTH: usize = 6;
const CONECT_TARGETS_PER_LINE: usize = 4;

/// Writes one fixed-column coordinate line per record followed by the `END` sentinel.
pub fn write_records<W: Write>(writer: W, records: &[AtomRecord]) -> Result<(), Error> {
    let mut ctx = WriterContext::new(writer);

    ctx.write_atoms(records)?;

    ctx.write_end()?;

    Ok(())
}

/// Writes coordinate lines, `CONECT` records for `bonds`, and the `END` sentinel.
pub fn write_records_with_bonds<W: Write>(
    writer: W,
    records: &[AtomRecord],
    bonds: &[Bond],
) -> Result<(), Error> {
    let mut ctx = WriterContext::new(writer);

    ctx.write_atoms(records)?;

    ctx.write_connects(bonds)?;

    ctx.write_end()?;

    Ok(())
}

fn check_aux_width(field: &str, value: &str, serial: u32) -> Result<(), Error> {
    if value.chars().count() > AUX_FIELD_WIDTH {
        return Err(Error::inconsistent_data(
            FORMAT,
            format!("{field} '{value}' of atom {serial} does not fit the 6-column field"),
        ));
    }
    Ok(())
}

struct WriterContext<W> {
    writer: W,
    written_serials: HashSet<u32>,
}

impl<W: Write> WriterContext<W> {
    fn new(writer: W) -> Self {
        Self {
            writer,
            written_serials: HashSet::new(),
        }
    }

    fn write_atoms(&mut self, records: &[AtomRecord]) -> Result<(), Error> {
        for record in records {
            if record.serial > MAX_SERIAL {
                return Err(Error::inconsistent_data(
                    FORMAT,
                    format!(
                        "atom serial {} does not fit the 5-column serial field",
                        record.serial
                    ),
                ));
            }
            check_aux_width("occupancy", &record.occupancy, record.serial)?;
            check_aux_width("temperature factor", &record.temp_factor, record.serial)?;
            self.write_atom_record(record)?;
            self.written_serials.insert(record.serial);
        }
        Ok(())
    }

    fn write_atom_record(&mut self, record: &AtomRecord) -> Result<(), Error> {
        let res_seq = record.res_seq % 10000;
        if res_seq < MIN_RES_SEQ {
            return Err(Error::inconsistent_data(
                FORMAT,
                format!(
                    "residue sequence number {} of atom {} does not fit the 4-column field",
                    record.res_seq, record.serial
                ),
            ));
        }

        let atom_name = if record.atom_name.chars().count() >= 4 {
            record.atom_name.chars().take(4).collect::<String>()
        } else {
            format!(" {:<3}", record.atom_name.as_str())
        };

        let res_name: String = record.res_name.chars().take(3).collect();

        writeln!(
            self.writer,
            "{:<6}{:>5} {:<4} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6}{:>6}{:>12}",
            record.group.tag(),
            record.serial,
            atom_name,
            res_name,
            record.chain_id,
            res_seq,
            record.pos.x,
            record.pos.y,
            record.pos.z,
            record.occupancy.as_str(),
            record.temp_factor.as_str(),
            record.element.as_str()
        )
        .map_err(Error::from_io)
    }

    fn write_connects(&mut self, bonds: &[Bond]) -> Result<(), Error> {
        let mut adjacency: BTreeMap<u32, Vec<u32>> = BTreeMap::new();

        for bond in bonds {
            for serial in [bond.atom1, bond.atom2] {
                if !self.written_serials.contains(&serial) {
                    return Err(Error::inconsistent_data(
                        FORMAT,
                        format!("bond references atom serial {serial} that was not written"),
                    ));
                }
            }

            adjacency.entry(bond.atom1).or_default().push(bond.atom2);
            adjacency.entry(bond.atom2).or_default().push(bond.atom1);
        }

        for (src_serial, mut targets) in adjacency {
            targets.sort_unstable();
            targets.dedup();

            for chunk in targets.chunks(CONECT_TARGETS_PER_LINE) {
                write!(self.writer, "CONECT{:5}", src_serial).map_err(Error::from_io)?;
                for target in chunk {
                    write!(self.writer, "{:5}", target).map_err(Error::from_io)?;
                }
                writeln!(self.writer).map_err(Error::from_io)?;
            }
        }

        Ok(())
    }

    fn write_end(&mut self) -> Result<(), Error> {
        writeln!(self.writer, "END").map_err(Error::from_io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{Point, RecordKind};
    use smol_str::SmolStr;

    fn record(serial: u32, name: &str, element: &str, pos: (f64, f64, f64)) -> AtomRecord {
        AtomRecord {
            group: RecordKind::Hetatm,
            serial,
            element: SmolStr::new(element),
            atom_name: SmolStr::new(name),
            res_name: SmolStr::new("ATP"),
            chain_id: 'A',
            res_seq: 401,
            pos: Point::new(pos.0, pos.1, pos.2),
            occupancy: SmolStr::new("1.00"),
            temp_factor: SmolStr::new("30.25"),
        }
    }

    fn render(records: &[AtomRecord], bonds: Option<&[Bond]>) -> String {
        let mut buffer = Vec::new();
        match bonds {
            Some(bonds) => write_records_with_bonds(&mut buffer, records, bonds),
            None => write_records(&mut buffer, records),
        }
        .expect("writer should succeed");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    fn assert_conect_line(line: &str, source: u32, targets: &[u32]) {
        assert!(line.starts_with("CONECT"));
        assert_eq!(line[6..11].trim().parse::<u32>().unwrap(), source);
        let parsed: Vec<u32> = line[11..]
            .as_bytes()
            .chunks(5)
            .map(|slot| std::str::from_utf8(slot).unwrap().trim().parse().unwrap())
            .collect();
        assert_eq!(parsed, targets);
    }

    #[test]
    fn atom_line_places_fields_at_fixed_columns() {
        let output = render(&[record(2421, "PG", "P", (12.345, -6.789, 10.111))], None);
        let line = output.lines().next().expect("atom line");

        assert_eq!(line.len(), 78);
        assert_eq!(&line[0..6], "HETATM");
        assert_eq!(&line[6..11], " 2421");
        assert_eq!(&line[12..16], " PG ");
        assert_eq!(&line[17..20], "ATP");
        assert_eq!(&line[21..22], "A");
        assert_eq!(&line[22..26], " 401");
        assert_eq!(&line[30..38], "  12.345");
        assert_eq!(&line[38..46], "  -6.789");
        assert_eq!(&line[46..54], "  10.111");
        assert_eq!(&line[54..60], "  1.00");
        assert_eq!(&line[60..66], " 30.25");
        assert_eq!(&line[76..78], " P");
    }

    #[test]
    fn coordinates_always_render_three_decimals() {
        let output = render(&[record(1, "C1", "C", (1.0, -0.5, 123.45678))], None);
        let line = output.lines().next().expect("atom line");

        assert_eq!(&line[30..38], "   1.000");
        assert_eq!(&line[38..46], "  -0.500");
        assert_eq!(&line[46..54], " 123.457");
    }

    #[test]
    fn four_character_names_fill_the_name_field() {
        let output = render(&[record(3, "O1G1", "O", (0.0, 0.0, 0.0))], None);
        let line = output.lines().next().expect("atom line");

        assert_eq!(&line[12..16], "O1G1");
        assert_eq!(&line[17..20], "ATP");
    }

    #[test]
    fn output_ends_with_single_end_line() {
        let output = render(
            &[
                record(1, "C1", "C", (0.0, 0.0, 0.0)),
                record(2, "C2", "C", (1.5, 0.0, 0.0)),
            ],
            None,
        );
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines.last(), Some(&"END"));
        assert_eq!(lines.iter().filter(|l| **l == "END").count(), 1);
    }

    #[test]
    fn conect_records_list_sorted_partners_in_both_directions() {
        let records = vec![
            record(1, "C1", "C", (0.0, 0.0, 0.0)),
            record(2, "C2", "C", (1.5, 0.0, 0.0)),
            record(3, "O1", "O", (2.5, 0.0, 0.0)),
        ];
        let output = render(&records, Some(&[Bond::new(3, 2), Bond::new(1, 2)]));
        let conect: Vec<&str> = output
            .lines()
            .filter(|l| l.starts_with("CONECT"))
            .collect();

        assert_eq!(conect.len(), 3);
        assert_conect_line(conect[0], 1, &[2]);
        assert_conect_line(conect[1], 2, &[1, 3]);
        assert_conect_line(conect[2], 3, &[2]);
        assert_eq!(output.lines().last(), Some("END"));
    }

    #[test]
    fn conect_records_wrap_after_four_partners() {
        let records: Vec<_> = (1..=6)
            .map(|serial| record(serial, "C", "C", (serial as f64, 0.0, 0.0)))
            .collect();
        let bonds: Vec<_> = (2..=6).map(|serial| Bond::new(1, serial)).collect();
        let output = render(&records, Some(&bonds));
        let hub_lines: Vec<&str> = output
            .lines()
            .filter(|l| l.starts_with("CONECT    1"))
            .collect();

        assert_eq!(hub_lines.len(), 2);
        assert_conect_line(hub_lines[0], 1, &[2, 3, 4, 5]);
        assert_conect_line(hub_lines[1], 1, &[6]);
    }

    #[test]
    fn bond_to_unwritten_serial_is_inconsistent() {
        let mut buffer = Vec::new();
        let err = write_records_with_bonds(
            &mut buffer,
            &[record(1, "C1", "C", (0.0, 0.0, 0.0))],
            &[Bond::new(1, 9)],
        )
        .expect_err("serial 9 was never written");

        match err {
            Error::InconsistentData { details, .. } => {
                assert!(details.contains("atom serial 9"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_res_seq_within_four_columns_is_written() {
        let mut atom = record(1, "C1", "C", (0.0, 0.0, 0.0));
        atom.res_seq = -999;
        let output = render(&[atom], None);
        let line = output.lines().next().expect("atom line");

        assert_eq!(&line[22..26], "-999");
        assert_eq!(line.len(), 78);
    }

    #[test]
    fn res_seq_wider_than_four_columns_is_rejected() {
        let mut atom = record(1, "CL1", "CL", (1.0, 2.0, 3.0));
        atom.res_seq = -1234;
        let mut buffer = Vec::new();

        let err = write_records(&mut buffer, &[atom]).expect_err("-1234 needs five columns");
        match err {
            Error::InconsistentData { details, .. } => {
                assert!(details.contains("-1234"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn auxiliary_tokens_wider_than_six_columns_are_rejected() {
        let mut wide_b = record(1, "CL1", "CL", (1.0, 2.0, 3.0));
        wide_b.temp_factor = SmolStr::new("100.123");
        let mut wide_occ = record(2, "C1", "C", (0.0, 0.0, 0.0));
        wide_occ.occupancy = SmolStr::new("0.12345");

        for atom in [wide_b, wide_occ] {
            let mut buffer = Vec::new();
            let err = write_records(&mut buffer, &[atom]).expect_err("token overflows");
            assert!(matches!(err, Error::InconsistentData { .. }));
        }
    }

    #[test]
    fn six_character_tokens_keep_columns_aligned() {
        let mut atom = record(1, "C1", "C", (0.0, 0.0, 0.0));
        atom.temp_factor = SmolStr::new("100.12");
        let output = render(&[atom], None);
        let line = output.lines().next().expect("atom line");

        assert_eq!(&line[60..66], "100.12");
        assert_eq!(&line[76..78], " C");
    }

    #[test]
    fn oversized_serial_is_rejected() {
        let mut buffer = Vec::new();
        let err = write_records(&mut buffer, &[record(100_000, "C1", "C", (0.0, 0.0, 0.0))])
            .expect_err("serial does not fit");

        assert!(matches!(err, Error::InconsistentData { .. }));
    }
}
