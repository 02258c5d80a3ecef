//! Transactional shop server.
//!
//! Clients hold a persistent TCP connection and exchange JSON requests and
//! responses against a shared in-memory catalog, cart store and order store.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌────────────────────────────────────────────────────┐
//!                 │                    SHOP SERVER                     │
//!                 │                                                    │
//!   Client ───────┼─▶ net::listener ──▶ server::handler (task per conn)│
//!                 │                          │ frame                   │
//!                 │                          ▼                         │
//!                 │                   server::dispatch                 │
//!                 │                          │ Request                 │
//!                 │                          ▼                         │
//!                 │              engine::Shop (one Mutex)              │
//!                 │            ┌─────────┬──────────┬─────────┐        │
//!                 │            │ Catalog │ CartStore│OrderStore│       │
//!                 │            └─────────┴──────────┴─────────┘        │
//!   Client ◀──────┼──────────── Response envelope ◀───────┘            │
//!                 │                                                    │
//!                 │  config · observability · lifecycle · resilience   │
//!                 └────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use shop_server::config::{load_config, ShopConfig};
use shop_server::lifecycle::wait_for_signal;
use shop_server::net::Listener;
use shop_server::observability::{logging, metrics};
use shop_server::{Server, Shop};

#[derive(Parser)]
#[command(name = "shop-server", version, about = "Transactional shop server over TCP")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ShopConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!("shop-server v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        max_frame_bytes = config.limits.max_frame_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shop = Arc::new(Shop::new(config.catalog.seed()));
    tracing::info!(products = shop.products().len(), "Catalog seeded");

    let listener = Listener::bind(&config.listener).await?;

    Server::new(shop, &config).run(listener, wait_for_signal()).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
