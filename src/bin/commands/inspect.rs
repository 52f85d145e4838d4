use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};

use swifty_protein::Molecule;
use swifty_protein::io::read_pdb_str;
use swifty_protein::ops::{center_of_mass, cpk_color};

use crate::commands::run_with_spinner;

/// Report-only command that summarizes a PDB document.
#[derive(Debug, Default, Args)]
pub struct InspectArgs {
    /// Also list every bond.
    #[arg(long)]
    pub bonds: bool,
}

/// Parses PDB text and prints atom, bond, and geometry tables to stderr.
pub fn run(text: &str, args: &InspectArgs) -> Result<()> {
    let molecule = run_with_spinner("Parsing structure", || {
        read_pdb_str(text).context("Failed to parse PDB input")
    })?;

    print_tables(&molecule, args.bonds)
}

fn print_tables(molecule: &Molecule, list_bonds: bool) -> Result<()> {
    let mut stderr = io::stderr().lock();

    print_boxed_label(&mut stderr, "SwiftyProtein Ligand Report")?;
    writeln!(&mut stderr)?;

    let mut atom_table = Table::new();
    print_boxed_label(&mut stderr, "Atoms")?;
    atom_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    atom_table.set_titles(row![
        "Serial", "Name", "Element", "Residue", "Chain", "Seq", "X", "Y", "Z", "Color"
    ]);
    for atom in molecule.atoms() {
        atom_table.add_row(row![
            atom.serial,
            atom.name,
            atom.element,
            atom.res_name,
            atom.chain_id,
            atom.res_seq,
            format!("{:.3}", atom.pos.x),
            format!("{:.3}", atom.pos.y),
            format!("{:.3}", atom.pos.z),
            cpk_color(&atom.element)
        ]);
    }
    atom_table
        .print(&mut stderr)
        .context("Failed to render atom table")?;
    writeln!(&mut stderr)?;

    if list_bonds {
        let mut bond_table = Table::new();
        print_boxed_label(&mut stderr, "Bonds")?;
        bond_table.set_format(*format::consts::FORMAT_BOX_CHARS);
        bond_table.set_titles(row!["Atom 1", "Atom 2", "Length (Å)"]);
        for bond in molecule.bonds() {
            let length = match (
                molecule.atom_by_serial(bond.atom1),
                molecule.atom_by_serial(bond.atom2),
            ) {
                (Some(a), Some(b)) => format!("{:.3}", a.distance(b)),
                _ => "?".to_string(),
            };
            bond_table.add_row(row![bond.atom1, bond.atom2, length]);
        }
        bond_table
            .print(&mut stderr)
            .context("Failed to render bond table")?;
        writeln!(&mut stderr)?;
    }

    let center = center_of_mass(molecule.atoms());
    let mut summary_table = Table::new();
    print_boxed_label(&mut stderr, "Summary")?;
    summary_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    summary_table.set_titles(row!["Metric", "Value"]);
    summary_table.add_row(row!["Atoms", molecule.atom_count()]);
    summary_table.add_row(row!["Bonds", molecule.bond_count()]);
    summary_table.add_row(row![
        "Center of Mass (Å)",
        format!("{:.3}, {:.3}, {:.3}", center.x, center.y, center.z)
    ]);
    summary_table
        .print(&mut stderr)
        .context("Failed to render summary")?;

    Ok(())
}

fn print_boxed_label<W: Write>(writer: &mut W, title: &str) -> io::Result<()> {
    let inner = format!(" {title} ");
    let width = inner.chars().count();
    writeln!(writer, "╭{}╮", "─".repeat(width))?;
    writeln!(writer, "│{}│", inner)?;
    writeln!(writer, "╰{}╯", "─".repeat(width))?;
    Ok(())
}
