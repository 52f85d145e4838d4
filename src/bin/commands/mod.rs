use std::fs;
use std::io::{self as stdio, Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;

use swifty_protein::remote::{
    DEFAULT_MODELS_URL, DEFAULT_SEARCH_URL, RcsbClient, RcsbConfig,
};

pub mod convert;
pub mod fetch;
pub mod inspect;
pub mod serve;

/// Aggregated IO parameters shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct IoParameters {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Upstream endpoints and limits shared by the commands that talk to RCSB.
#[derive(Debug, Clone, Args)]
pub struct RemoteArgs {
    /// RCSB search API endpoint.
    #[arg(long, env = "RCSB_SEARCH_URL", default_value = DEFAULT_SEARCH_URL)]
    pub search_url: String,
    /// RCSB model server base URL.
    #[arg(long, env = "RCSB_MODELS_URL", default_value = DEFAULT_MODELS_URL)]
    pub models_url: String,
    /// Per-request timeout in seconds.
    #[arg(long, env = "SWIFTY_HTTP_TIMEOUT_SECS", default_value_t = 5)]
    pub timeout_secs: u64,
}

impl RemoteArgs {
    pub fn client(&self) -> Result<RcsbClient> {
        RcsbClient::new(RcsbConfig {
            search_url: self.search_url.clone(),
            models_url: self.models_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
        .context("Failed to build RCSB client")
    }
}

/// Reads the whole input document from the configured file or stdin.
pub fn load_input(params: &IoParameters) -> Result<String> {
    if let Some(path) = &params.input {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()));
    }

    let stdin = stdio::stdin();
    if stdin.is_terminal() {
        bail!(
            "No --input provided and stdin is a TTY. Provide -i/--input or pipe a structure into swifty."
        );
    }
    let mut text = String::new();
    stdin
        .lock()
        .read_to_string(&mut text)
        .context("Failed to read structure from stdin")?;
    Ok(text)
}

/// Writes `text` to the configured output file or stdout.
pub fn save_output(text: &str, params: &IoParameters) -> Result<()> {
    match &params.output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("Failed to write output file {}", path.display())),
        None => {
            let mut stdout = stdio::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")
        }
    }
}

/// Builds the multi-threaded runtime used by the networked commands.
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

/// Wraps long-running operations with a spinner rendered to stderr.
pub fn run_with_spinner<T, F>(message: &str, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    let result = work();

    match &result {
        Ok(_) => spinner.finish_with_message(format!("{} ✓", message)),
        Err(_) => spinner.abandon_with_message(format!("{} ✗", message)),
    }

    result
}

/// Returns true when stdout is a TTY and no explicit output file was supplied.
pub fn interactive_stdout_requested(params: &IoParameters) -> bool {
    params.output.is_none() && stdio::stdout().is_terminal()
}

/// Ensures commands do not dump structured output directly into an interactive terminal.
pub fn ensure_noninteractive_stdout(command: &str, params: &IoParameters) -> Result<()> {
    if interactive_stdout_requested(params) {
        bail!(
            "Refusing to stream {command} results to an interactive terminal. Use -o/--output or pipe the command into a file."
        );
    }
    Ok(())
}
