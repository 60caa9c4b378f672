//! Path-prefix HTTP reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                    GATEWAY                       │
//!     Client Request   │  ┌─────────┐    ┌──────────┐    ┌────────────┐   │
//!     ─────────────────┼─▶│  axum   │───▶│ routing  │───▶│  forward   │───┼──▶ Backend
//!                      │  │listener │    │ (prefix) │    │ (reqwest)  │   │
//!     Client Response  │  └─────────┘    └──────────┘    └─────┬──────┘   │
//!     ◀────────────────┼───────────────── response.rs ◀────────┘          │
//!                      │                                                  │
//!                      │  config · lifecycle · observability · admin      │
//!                      └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use path_gateway::admin::{serve_admin, AdminState};
use path_gateway::health::HealthProber;
use path_gateway::lifecycle::{startup, Shutdown};
use path_gateway::observability::init_logging;
use path_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "path-gateway")]
#[command(about = "Path-prefix HTTP reverse proxy", long_about = None)]
struct Args {
    /// Gateway settings (TOML). Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route file (JSON), overriding `routes_file`.
    #[arg(short, long)]
    routes: Option<PathBuf>,

    /// Listen address, overriding `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = startup::load_settings(args.config.as_deref())?;
    if let Some(routes) = args.routes {
        config.routes_file = routes;
    }
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "path-gateway starting");

    let router = Arc::new(startup::build_router(&config)?);
    startup::log_route_table(&router);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes_file = %config.routes_file.display(),
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();

    if config.admin.enabled {
        let admin_listener = TcpListener::bind(&config.admin.bind_address).await?;
        let prober = HealthProber::new(Duration::from_secs(config.admin.health_timeout_secs))?;
        let state = AdminState {
            router: router.clone(),
            prober: Arc::new(prober),
        };
        let admin_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            if let Err(e) = serve_admin(admin_listener, state, admin_shutdown).await {
                tracing::error!(error = %e, "Admin API failed");
            }
        });
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(&config, router)?;

    shutdown.trigger_on_signal();

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
