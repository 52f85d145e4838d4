use anyhow::{Context, Result};
use clap::Args;

use swifty_protein::remote::fetch_structure;

use crate::commands::convert::ConvertArgs;
use crate::commands::{RemoteArgs, run_with_spinner, runtime};

/// Options for downloading a single ligand.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Chemical component id, e.g. ATP or HEM.
    pub ligand: String,
    #[command(flatten)]
    pub remote: RemoteArgs,
    #[command(flatten)]
    pub convert: ConvertArgs,
}

/// Resolves the ligand on RCSB and returns its PDB text.
pub fn run(args: &FetchArgs) -> Result<String> {
    let client = args.remote.client()?;
    let options = args.convert.options();
    let rt = runtime()?;

    run_with_spinner(&format!("Fetching ligand {}", args.ligand), || {
        rt.block_on(fetch_structure(&client, &args.ligand, &options))
            .with_context(|| format!("Failed to fetch ligand {}", args.ligand))
    })
}
