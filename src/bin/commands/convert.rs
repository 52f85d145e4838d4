use anyhow::{Context, Result};
use clap::Args;

use swifty_protein::io::{ConvertOptions, convert_mmcif_to_pdb};

use crate::commands::run_with_spinner;

/// Options for converting a local mmCIF document.
#[derive(Debug, Default, Args)]
pub struct ConvertArgs {
    /// Omit CONECT records even when the document declares bonds.
    #[arg(long)]
    pub no_conect: bool,
}

impl ConvertArgs {
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            include_conect: !self.no_conect,
        }
    }
}

/// Converts mmCIF text into PDB text.
pub fn run(mmcif: &str, args: &ConvertArgs) -> Result<String> {
    run_with_spinner("Converting mmCIF to PDB", || {
        convert_mmcif_to_pdb(mmcif, &args.options()).context("Failed to convert mmCIF input")
    })
}
