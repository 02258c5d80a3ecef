//! Typed requests and their validation.
//!
//! Field presence and types are checked once, here. Everything past
//! [`decode`] works with a fully-typed [`Request`].

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::store::{CartId, ProductId};

/// Every action name the server understands.
pub const ACTIONS: [&str; 7] = [
    "get_products",
    "get_product",
    "create_cart",
    "add_to_cart",
    "get_cart",
    "checkout",
    "get_orders",
];

/// One client request, tagged by its `action` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    GetProducts,
    GetProduct {
        product_id: ProductId,
    },
    CreateCart,
    AddToCart {
        cart_id: CartId,
        product_id: ProductId,
        quantity: NonZeroU32,
    },
    GetCart {
        cart_id: CartId,
    },
    Checkout {
        cart_id: CartId,
    },
    GetOrders,
}

impl Request {
    /// Wire name of the action.
    pub fn action(&self) -> &'static str {
        match self {
            Request::GetProducts => "get_products",
            Request::GetProduct { .. } => "get_product",
            Request::CreateCart => "create_cart",
            Request::AddToCart { .. } => "add_to_cart",
            Request::GetCart { .. } => "get_cart",
            Request::Checkout { .. } => "checkout",
            Request::GetOrders => "get_orders",
        }
    }
}

/// Why a frame could not become a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Not a well-formed JSON document.
    #[error("Invalid JSON: {0}")]
    Malformed(String),

    /// Well-formed, but the action name is not one we serve.
    #[error("Invalid action")]
    InvalidAction(String),

    /// Wrong shape: not an object, missing `action`, or a missing or
    /// mistyped field for the action.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Validate a JSON document into a typed request.
pub fn decode(value: Value) -> Result<Request, RequestError> {
    let Some(fields) = value.as_object() else {
        return Err(RequestError::InvalidRequest(
            "request must be a JSON object".to_string(),
        ));
    };

    let action = match fields.get("action") {
        Some(Value::String(action)) => action,
        Some(_) => {
            return Err(RequestError::InvalidRequest(
                "field `action` must be a string".to_string(),
            ))
        }
        None => {
            return Err(RequestError::InvalidRequest(
                "missing field `action`".to_string(),
            ))
        }
    };

    if !ACTIONS.contains(&action.as_str()) {
        return Err(RequestError::InvalidAction(action.clone()));
    }

    serde_json::from_value(value).map_err(|e| RequestError::InvalidRequest(e.to_string()))
}
