//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ShopConfig (validated, immutable)
//!     → read once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the catalog is seeded from it once
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    default_products, CatalogConfig, LimitsConfig, ListenerConfig, LogFormat, ObservabilityConfig,
    ShopConfig, ShutdownConfig,
};
pub use validation::{validate_config, ValidationError};
