//! Open carts keyed by id.

use std::collections::HashMap;

use crate::store::catalog::Catalog;
use crate::store::error::{ShopError, ShopResult};
use crate::store::types::{Cart, CartId, CartLine, ProductId};

#[derive(Debug, Clone, Default)]
pub struct CartStore {
    carts: HashMap<CartId, Cart>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new empty cart and return its id.
    pub fn create(&mut self) -> CartId {
        let id = CartId::generate();
        self.carts.insert(id.clone(), Cart::new(id.clone()));
        id
    }

    /// Add `qty` units of a catalog product to a cart.
    ///
    /// Stock is checked against the catalog as it is right now. Nothing is
    /// reserved, so other carts may claim the same units before checkout;
    /// checkout re-checks. An existing line accumulates quantity and takes
    /// a fresh product snapshot.
    pub fn add_item(
        &mut self,
        catalog: &Catalog,
        cart_id: &CartId,
        product_id: &ProductId,
        qty: u32,
    ) -> ShopResult<Cart> {
        let cart = self
            .carts
            .get_mut(cart_id)
            .ok_or_else(|| ShopError::CartNotFound(cart_id.clone()))?;

        let product = catalog.get(product_id)?;

        if product.stock < qty {
            return Err(ShopError::InsufficientStock {
                product_id: product_id.clone(),
                requested: u64::from(qty),
                available: product.stock,
            });
        }

        match cart.items.get_mut(product_id) {
            Some(line) => {
                let quantity =
                    line.quantity
                        .checked_add(qty)
                        .ok_or_else(|| ShopError::InsufficientStock {
                            product_id: product_id.clone(),
                            requested: u64::from(line.quantity) + u64::from(qty),
                            available: product.stock,
                        })?;
                line.quantity = quantity;
                line.product = product;
            }
            None => {
                cart.items.insert(
                    product_id.clone(),
                    CartLine {
                        product,
                        quantity: qty,
                    },
                );
            }
        }

        Ok(cart.clone())
    }

    pub fn get(&self, cart_id: &CartId) -> ShopResult<Cart> {
        self.carts
            .get(cart_id)
            .cloned()
            .ok_or_else(|| ShopError::CartNotFound(cart_id.clone()))
    }

    /// Drop a cart. Only checkout calls this.
    pub(crate) fn remove(&mut self, cart_id: &CartId) -> Option<Cart> {
        self.carts.remove(cart_id)
    }

    pub fn len(&self) -> usize {
        self.carts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }
}
