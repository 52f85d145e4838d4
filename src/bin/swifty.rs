use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::IoParameters;
use commands::{convert, fetch, inspect, serve};

#[derive(Parser, Debug)]
#[command(
    name = "swifty",
    about = "Fetch ligand structures from RCSB, convert mmCIF to PDB, and serve them over HTTP.",
    version,
    author,
    arg_required_else_help = true
)]
struct Cli {
    /// Input file path. When omitted, stdin is used.
    #[arg(short, long, value_name = "FILE", global = true)]
    input: Option<PathBuf>,
    /// Output file path. When omitted, stdout is used.
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP ligand endpoint.
    Serve(serve::ServeArgs),
    /// Resolve a ligand on RCSB and write its PDB text.
    Fetch(fetch::FetchArgs),
    /// Convert an mmCIF document to PDB.
    Convert(convert::ConvertArgs),
    /// Parse PDB text and report atoms, bonds, and render hints.
    Inspect(inspect::InspectArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let io_params = IoParameters {
        input: cli.input.clone(),
        output: cli.output.clone(),
    };

    match cli.command {
        Command::Serve(args) => serve::run(&args)?,
        Command::Fetch(args) => {
            let pdb = fetch::run(&args)?;
            commands::save_output(&pdb, &io_params)?;
        }
        Command::Convert(args) => {
            commands::ensure_noninteractive_stdout("convert", &io_params)?;
            let text = commands::load_input(&io_params)?;
            let pdb = convert::run(&text, &args)?;
            commands::save_output(&pdb, &io_params)?;
        }
        Command::Inspect(args) => {
            let text = commands::load_input(&io_params)?;
            inspect::run(&text, &args)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_accepts_a_cache_ttl() {
        let cli = Cli::try_parse_from(["swifty", "serve", "--cache-ttl-secs", "60"])
            .expect("serve parses");

        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.cache_ttl_secs, 60);
                assert!(args.cache().is_enabled());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn fetch_rejects_the_cache_ttl_option() {
        let err = Cli::try_parse_from(["swifty", "fetch", "ATP", "--cache-ttl-secs", "60"])
            .expect_err("fetch never caches");

        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
