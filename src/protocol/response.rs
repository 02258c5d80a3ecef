//! Response envelope.
//!
//! ```text
//! {"status": "success", "<payload key>": ...}
//! {"status": "error", "code": "not_found", "message": "Cart not found"}
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::protocol::request::RequestError;
use crate::store::{Cart, CartId, Order, OrderId, Product, ProductId, ShopError};

/// Machine-readable error category, sent next to the human message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InsufficientStock,
    InvalidRequest,
    InvalidAction,
}

/// Action-specific success body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Products { products: BTreeMap<ProductId, Product> },
    Product { product: Product },
    CartCreated { cart_id: CartId },
    Cart { cart: Cart },
    Order { order: Order },
    Orders { orders: BTreeMap<OrderId, Order> },
}

/// One reply, written back for every frame read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Success(Payload),
    Error { code: ErrorKind, message: String },
}

impl Response {
    pub fn error(code: ErrorKind, message: impl Into<String>) -> Self {
        Response::Error {
            code,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// Value of the `status` field.
    pub fn status(&self) -> &'static str {
        match self {
            Response::Success(_) => "success",
            Response::Error { .. } => "error",
        }
    }
}

impl From<Payload> for Response {
    fn from(payload: Payload) -> Self {
        Response::Success(payload)
    }
}

impl From<ShopError> for Response {
    fn from(err: ShopError) -> Self {
        let code = match err {
            ShopError::ProductNotFound(_) | ShopError::CartNotFound(_) => ErrorKind::NotFound,
            ShopError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
        };
        Response::error(code, err.to_string())
    }
}

impl From<RequestError> for Response {
    fn from(err: RequestError) -> Self {
        let code = match err {
            RequestError::InvalidAction(_) => ErrorKind::InvalidAction,
            RequestError::Malformed(_) | RequestError::InvalidRequest(_) => {
                ErrorKind::InvalidRequest
            }
        };
        Response::error(code, err.to_string())
    }
}
