//! Configuration validation.
//!
//! Serde covers syntax; this covers semantics. All problems are collected
//! and returned together rather than stopping at the first.

use std::collections::HashSet;
use std::net::SocketAddr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::schema::ShopConfig;

/// Smallest frame limit that still fits a realistic request.
pub const MIN_FRAME_BYTES: usize = 64;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("listener.max_connections must be greater than zero")]
    MaxConnections,

    #[error("limits.max_frame_bytes must be at least {}", MIN_FRAME_BYTES)]
    MaxFrameBytes,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),

    #[error("catalog product #{0} has an empty id")]
    EmptyProductId(usize),

    #[error("catalog product '{0}' is defined more than once")]
    DuplicateProduct(String),

    #[error("catalog product '{0}' has an empty name")]
    EmptyProductName(String),

    #[error("catalog product '{0}' has a negative price")]
    NegativePrice(String),
}

/// Check a parsed configuration.
pub fn validate_config(config: &ShopConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::MaxConnections);
    }
    if config.limits.max_frame_bytes < MIN_FRAME_BYTES {
        errors.push(ValidationError::MaxFrameBytes);
    }
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    let mut seen = HashSet::new();
    for (index, product) in config.catalog.products.iter().enumerate() {
        let id = product.id.as_str();
        if id.is_empty() {
            errors.push(ValidationError::EmptyProductId(index));
            continue;
        }
        if !seen.insert(id) {
            errors.push(ValidationError::DuplicateProduct(id.to_string()));
        }
        if product.name.trim().is_empty() {
            errors.push(ValidationError::EmptyProductName(id.to_string()));
        }
        if product.price < Decimal::ZERO {
            errors.push(ValidationError::NegativePrice(id.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
