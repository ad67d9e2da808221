#![forbid(unsafe_code)]

mod entry;
mod server;
mod support;

pub(crate) use server::McpServer;
pub(crate) use support::*;

use st_storage::ThinkingEngine;
use std::sync::Arc;

// Baseline protocol version; a client's declared version is echoed back instead when present.
const MCP_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "sequential-thinking";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn usage() -> &'static str {
    "st_mcp — sequential thinking MCP server (stdio)\n\n\
USAGE:\n\
  st_mcp [--log-level FILTER] [--quiet-thoughts]\n\
\n\
FLAGS:\n\
  --log-level FILTER  tracing filter for stderr logs (env: ST_MCP_LOG, RUST_LOG)\n\
  --quiet-thoughts    do not log accepted thoughts (env: DISABLE_THOUGHT_LOGGING=true)\n\
  -h, --help          Print this help and exit\n\
  -V, --version       Print version and exit\n"
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    if config.show_help {
        print!("{}", usage());
        return Ok(());
    }
    if config.show_version {
        println!("st_mcp {SERVER_VERSION}");
        return Ok(());
    }

    init_tracing(&config);
    tracing::info!(
        version = SERVER_VERSION,
        thought_logging = config.thought_logging,
        "sequential thinking server listening on stdio"
    );

    let engine = Arc::new(ThinkingEngine::new().with_thought_logging(config.thought_logging));
    let mut server = McpServer::new(Arc::clone(&engine));
    let result = entry::run_stdio(&mut server);

    match engine.snapshot() {
        Ok(snapshot) => tracing::info!(
            thoughts = snapshot.thought_count,
            branches = snapshot.branches.len(),
            "stdin closed"
        ),
        Err(err) => tracing::warn!(error = %err, "engine snapshot unavailable"),
    }
    if let Err(err) = &result {
        tracing::error!(error = %err, "stdio transport failed");
    }
    result
}
