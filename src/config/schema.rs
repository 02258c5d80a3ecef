//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::{Product, ProductId};

/// Root configuration for the shop server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ShopConfig {
    /// Listener configuration (bind address, connection limit).
    pub listener: ListenerConfig,

    /// Per-connection protocol limits.
    pub limits: LimitsConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Catalog seed.
    pub catalog: CatalogConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8888").
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8888".to_string(),
            max_connections: 1024,
        }
    }
}

/// Limits applied to each connection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest request a client may buffer before it is disconnected.
    pub max_frame_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_frame_bytes: 64 * 1024,
        }
    }
}

/// Shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// How long to wait for open connections to finish, in seconds.
    pub grace_period_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: 5,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Pretty (human) or JSON (machine) log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9100".to_string(),
        }
    }
}

/// Products loaded into the catalog at startup.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Seed products. Empty means the built-in demo catalog.
    pub products: Vec<Product>,
}

impl CatalogConfig {
    /// Products to seed the catalog with.
    pub fn seed(&self) -> Vec<Product> {
        if self.products.is_empty() {
            default_products()
        } else {
            self.products.clone()
        }
    }
}

/// The built-in demo catalog.
pub fn default_products() -> Vec<Product> {
    let product = |id: &str, name: &str, cents: i64, description: &str, stock: u32| Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Decimal::new(cents, 2),
        description: description.to_string(),
        stock,
    };

    vec![
        product("1", "Laptop", 99999, "High-performance laptop with SSD", 10),
        product("2", "Smartphone", 49999, "Latest smartphone model", 15),
        product("3", "Headphones", 8999, "Noise-cancelling headphones", 20),
        product("4", "Smartwatch", 19999, "Fitness tracking smartwatch", 8),
        product("5", "Tablet", 34999, "10-inch tablet with retina display", 12),
    ]
}
