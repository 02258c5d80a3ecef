//! Domain records held by the stores.
//!
//! Everything here is plain data. Values handed to callers are clones
//! (snapshots); nothing outside the stores holds a reference into them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Define a string-backed identifier newtype.
///
/// Identifiers are opaque on the wire, so any string converts into one.
/// Ids the server allocates itself are UUID v4 strings (see `generate`).
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Allocate a fresh, globally unique identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

define_id!(ProductId);
define_id!(CartId);
define_id!(OrderId);

/// A sellable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price, serialized as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
    pub stock: u32,
}

/// One product line inside a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product record as of the last add for this line.
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot price times quantity.
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// An open shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub items: BTreeMap<ProductId, CartLine>,
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Create an empty cart stamped with the current time.
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            items: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Sum of `price * quantity` over every line.
    pub fn total(&self) -> Decimal {
        self.items.values().map(CartLine::subtotal).sum()
    }
}

/// Order lifecycle status. Orders are created completed and never transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Completed,
}

/// A finalized, immutable order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// The cart exactly as it was checked out.
    pub cart: Cart,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}
