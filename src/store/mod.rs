//! In-memory stores for catalog, carts and orders.
//!
//! # Data Flow
//! ```text
//! create_cart  → CartStore::create
//! add_to_cart  → CartStore::add_item (reads Catalog for the snapshot)
//! checkout     → Catalog::decrement_all → OrderStore::insert → CartStore::remove
//! ```
//!
//! # Design Decisions
//! - Stores are plain single-threaded structs; `engine::Shop` owns all
//!   three behind one mutex and is the only way to reach them at runtime
//! - Reads return cloned snapshots, never references into the store
//! - Nothing is persisted; orders accumulate until the process exits

pub mod cart;
pub mod catalog;
pub mod error;
pub mod order;
pub mod types;

pub use cart::CartStore;
pub use catalog::Catalog;
pub use error::{ShopError, ShopResult};
pub use order::OrderStore;
pub use types::{Cart, CartId, CartLine, Order, OrderId, OrderStatus, Product, ProductId};
