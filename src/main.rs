//! path-router binary.
//!
//! Serves the routes declared in a TOML file.
//!
//! ```text
//! path-router --config routes.toml
//!     → config (load & validate)
//!     → observability (logging, optional metrics exporter)
//!     → Router::from_config
//!     → HttpServer (until Ctrl+C)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use path_router::config::{load_config, RouterConfig};
use path_router::observability;
use path_router::{walk, HttpServer, PathSpec, Router, Shutdown};

#[derive(Parser, Debug)]
#[command(name = "path-router", version, about = "Hierarchical HTTP path router")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the registered routes and exit.
    #[arg(long)]
    print_routes: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    observability::logging::init(&config.observability)?;
    tracing::info!("path-router v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        observability::metrics::init_metrics(addr)?;
    }

    let router = Router::from_config(&config.routes)?
        .with_cache_capacity(config.routing.cache_capacity);
    let router = Arc::new(router);
    if router.is_empty() {
        tracing::warn!("No routes configured; every request will be answered with 404");
    }

    if cli.print_routes {
        walk(router.as_ref(), |full_path: &str, spec: &PathSpec| {
            let kind = if spec.has_handler() { "handler" } else { "directory" };
            println!("{full_path}\t{kind}");
            true
        })?;
        return Ok(());
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(shutdown.trigger_on_ctrl_c());

    HttpServer::new(router).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
