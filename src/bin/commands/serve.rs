use std::net::IpAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use swifty_protein::remote::StructureCache;
use swifty_protein::server::{AppState, DEFAULT_PORT, ServerConfig, serve};

use crate::commands::convert::ConvertArgs;
use crate::commands::{RemoteArgs, runtime};

/// Options for the HTTP ligand endpoint.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, env = "SWIFTY_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,
    /// TCP port to listen on.
    #[arg(short, long, env = "BACKEND_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Time-to-live of cached conversions in seconds; 0 disables the cache.
    #[arg(long, env = "SWIFTY_CACHE_TTL_SECS", default_value_t = 0)]
    pub cache_ttl_secs: u64,
    #[command(flatten)]
    pub remote: RemoteArgs,
    #[command(flatten)]
    pub convert: ConvertArgs,
}

impl ServeArgs {
    pub fn cache(&self) -> StructureCache {
        StructureCache::new(Duration::from_secs(self.cache_ttl_secs))
    }
}

/// Serves ligand lookups until interrupted.
pub fn run(args: &ServeArgs) -> Result<()> {
    let state = AppState::new(
        args.remote.client()?,
        args.cache(),
        args.convert.options(),
    );
    let config = ServerConfig {
        bind: args.bind,
        port: args.port,
    };

    if state.cache.is_enabled() {
        log::info!("Caching conversions for {}s", state.cache.ttl().as_secs());
    }

    runtime()?
        .block_on(serve(config, state))
        .with_context(|| format!("Server on {} failed", config.socket_addr()))
}
