//! Main entry point for the appeals webserver binary

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use orchestrator::{Orchestrator, SqliteStore};
use webserver::{WebServer, WebServerError, WebServerResult};

/// HTTP server for the appeals tracking system
#[derive(Parser)]
#[command(name = "webserver")]
#[command(about = "Serves the appeals lifecycle API over HTTP")]
pub struct Args {
    /// Port to listen on
    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// Path to the SQLite database file
    #[arg(long, default_value = "./appeals.db")]
    pub db_path: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    let args = Args::parse();

    shared::logging::init_tracing_with_level(Some(&args.log_level));
    shared::logging::log_startup("appeals webserver");

    let store = SqliteStore::open(&args.db_path).map_err(|e| {
        WebServerError::ServerStartup(format!(
            "Failed to open database {}: {e}",
            args.db_path.display()
        ))
    })?;
    tracing::info!(path = %args.db_path.display(), "appeals database ready");

    let orchestrator = Orchestrator::new(store);
    let bind_address = SocketAddr::from(([0, 0, 0, 0], args.port));

    WebServer::new(bind_address, orchestrator).run().await
}
