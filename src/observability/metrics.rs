//! Metrics collection and exposition.
//!
//! # Metrics
//! - `shop_requests_total` (counter): requests by action, status
//! - `shop_request_duration_seconds` (histogram): dispatch latency by action
//! - `shop_active_connections` (gauge): current connection count
//! - `shop_checkouts_total` (counter): checkouts by outcome
//! - `shop_units_sold_total` (counter): units sold by product
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);

    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics recorder"),
    }
}

/// Record one dispatched request.
pub fn record_request(action: &'static str, status: &'static str, start: Instant) {
    counter!("shop_requests_total", "action" => action, "status" => status).increment(1);
    histogram!("shop_request_duration_seconds", "action" => action)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_active_connections(count: u64) {
    gauge!("shop_active_connections").set(count as f64);
}

pub fn record_checkout(outcome: &'static str) {
    counter!("shop_checkouts_total", "outcome" => outcome).increment(1);
}

pub fn record_units_sold(product_id: &str, quantity: u32) {
    counter!("shop_units_sold_total", "product_id" => product_id.to_string())
        .increment(u64::from(quantity));
}
