//! Request dispatch.
//!
//! # Responsibilities
//! - Route each typed [`Request`] to one [`Shop`] operation
//! - Map the result into a [`Response`] envelope
//! - Turn undecodable frames into in-band error responses
//!
//! The dispatcher holds no state of its own and performs no cross-store
//! logic; that lives in the engine.

use std::sync::Arc;
use std::time::Instant;

use crate::engine::Shop;
use crate::observability::metrics;
use crate::protocol::{self, Frame, Payload, Request, RequestError, Response};

/// Action label used for requests that never decoded.
const UNDECODED: &str = "invalid";

#[derive(Debug, Clone)]
pub struct Dispatcher {
    shop: Arc<Shop>,
}

impl Dispatcher {
    pub fn new(shop: Arc<Shop>) -> Self {
        Self { shop }
    }

    /// Produce the response for one inbound frame.
    pub fn handle_frame(&self, frame: Frame) -> Response {
        let start = Instant::now();

        let request = match frame {
            Frame::Document(value) => protocol::decode(value),
            Frame::Rejected { reason } => Err(RequestError::Malformed(reason)),
        };

        match request {
            Ok(request) => self.dispatch(request),
            Err(err) => {
                tracing::debug!(error = %err, "Request rejected");
                let response = Response::from(err);
                metrics::record_request(UNDECODED, response.status(), start);
                response
            }
        }
    }

    /// Run one decoded request against the shop.
    pub fn dispatch(&self, request: Request) -> Response {
        let start = Instant::now();
        let action = request.action();

        let response: Response = match request {
            Request::GetProducts => Payload::Products {
                products: self.shop.products(),
            }
            .into(),
            Request::GetProduct { product_id } => match self.shop.product(&product_id) {
                Ok(product) => Payload::Product { product }.into(),
                Err(err) => err.into(),
            },
            Request::CreateCart => Payload::CartCreated {
                cart_id: self.shop.create_cart(),
            }
            .into(),
            Request::AddToCart {
                cart_id,
                product_id,
                quantity,
            } => match self.shop.add_to_cart(&cart_id, &product_id, quantity.get()) {
                Ok(cart) => Payload::Cart { cart }.into(),
                Err(err) => err.into(),
            },
            Request::GetCart { cart_id } => match self.shop.cart(&cart_id) {
                Ok(cart) => Payload::Cart { cart }.into(),
                Err(err) => err.into(),
            },
            Request::Checkout { cart_id } => match self.shop.checkout(&cart_id) {
                Ok(order) => Payload::Order { order }.into(),
                Err(err) => err.into(),
            },
            Request::GetOrders => Payload::Orders {
                orders: self.shop.orders(),
            }
            .into(),
        };

        tracing::debug!(action, status = response.status(), "Request dispatched");
        metrics::record_request(action, response.status(), start);

        response
    }
}
