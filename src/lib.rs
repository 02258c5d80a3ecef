//! Transactional shop server library.

pub mod config;
pub mod engine;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod protocol;
pub mod resilience;
pub mod server;
pub mod store;

pub use config::schema::ShopConfig;
pub use engine::Shop;
pub use lifecycle::Shutdown;
pub use server::Server;
