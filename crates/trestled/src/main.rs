//! trestled — the Trestle daemon.
//!
//! Single binary that loads a component topology and serves probes for
//! it:
//! - Component registry (in-memory, declared in a topology file)
//! - HTTP gateway with the health-check endpoint mounted
//!
//! # Usage
//!
//! ```text
//! trestled serve --port 8080 --topology /etc/trestle/topology.toml
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use trestle_gateway::RestEndpoint;
use trestle_health::HealthCheckEndpoint;
use trestle_registry::Topology;

#[derive(Parser)]
#[command(name = "trestled", about = "Trestle daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve probes for the component tree declared in a topology file.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Topology file declaring adapters, channels, and workflows.
        #[arg(long)]
        topology: PathBuf,

        /// Mount path for the health-check endpoint.
        #[arg(long, default_value = trestle_health::DEFAULT_MOUNT_PATH)]
        health_path: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,trestled=debug,trestle_health=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            topology,
            health_path,
        } => run_serve(port, topology, health_path).await,
    }
}

async fn run_serve(port: u16, topology_path: PathBuf, health_path: String) -> anyhow::Result<()> {
    info!("Trestle daemon starting");

    // ── Component registry ─────────────────────────────────────

    let topology = Topology::from_file(&topology_path)?;
    let registry = Arc::new(topology.build_registry());
    info!(
        path = ?topology_path,
        components = registry.len(),
        "component registry loaded"
    );

    // ── Probe endpoints ────────────────────────────────────────

    let health = HealthCheckEndpoint::new(registry).with_mount_path(health_path);
    info!(mount = health.mount_path(), "health-check endpoint mounted");

    let endpoints: Vec<Arc<dyn RestEndpoint>> = vec![Arc::new(health)];
    let router = trestle_gateway::build_router(endpoints);

    // ── Gateway ────────────────────────────────────────────────

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "gateway starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    let server = axum::serve(listener, router).with_graceful_shutdown(async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
    });

    server.await?;

    info!("Trestle daemon stopped");
    Ok(())
}
