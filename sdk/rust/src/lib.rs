//! Client for the shop server's JSON-over-TCP protocol.

pub mod client;

pub use client::{SdkError, ShopClient, ShopResponse};
