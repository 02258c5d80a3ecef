//! Transaction engine: the single synchronization boundary over all stores.
//!
//! # Data Flow
//! ```text
//! Dispatcher ──▶ Shop::<operation>
//!                   │ lock(Stores)           one critical section per call
//!                   ├─ Catalog
//!                   ├─ CartStore
//!                   └─ OrderStore
//!                   │ unlock
//! Dispatcher ◀── snapshot / ShopError
//! ```
//!
//! # Design Decisions
//! - One `std::sync::Mutex` guards catalog, carts and orders together. Store
//!   operations are synchronous and short, and the guard is never held
//!   across an `.await`
//! - Checkout re-validates every line against live stock and commits all
//!   decrements inside the same critical section, so concurrent checkouts
//!   cannot oversell
//! - A poisoned lock is recovered: every mutation validates fully before
//!   its first write, so a panic cannot leave half-applied state behind

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::observability::metrics;
use crate::store::{
    Cart, CartId, CartStore, Catalog, Order, OrderId, OrderStatus, OrderStore, Product, ProductId,
};

pub use crate::store::{ShopError, ShopResult};

#[derive(Debug, Default)]
struct Stores {
    catalog: Catalog,
    carts: CartStore,
    orders: OrderStore,
}

/// Shared shop state. Clone an `Arc<Shop>` into every connection handler.
#[derive(Debug, Default)]
pub struct Shop {
    stores: Mutex<Stores>,
}

impl Shop {
    /// Create a shop whose catalog is seeded with `products`.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            stores: Mutex::new(Stores {
                catalog: Catalog::new(products),
                carts: CartStore::new(),
                orders: OrderStore::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Stores> {
        self.stores.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn products(&self) -> BTreeMap<ProductId, Product> {
        self.lock().catalog.list()
    }

    pub fn product(&self, id: &ProductId) -> ShopResult<Product> {
        self.lock().catalog.get(id)
    }

    pub fn create_cart(&self) -> CartId {
        let cart_id = self.lock().carts.create();
        tracing::debug!(cart_id = %cart_id, "Cart created");
        cart_id
    }

    pub fn add_to_cart(&self, cart_id: &CartId, product_id: &ProductId, qty: u32) -> ShopResult<Cart> {
        let mut guard = self.lock();
        let stores = &mut *guard;
        stores.carts.add_item(&stores.catalog, cart_id, product_id, qty)
    }

    pub fn cart(&self, cart_id: &CartId) -> ShopResult<Cart> {
        self.lock().carts.get(cart_id)
    }

    pub fn orders(&self) -> BTreeMap<OrderId, Order> {
        self.lock().orders.list()
    }

    pub fn order(&self, id: &OrderId) -> Option<Order> {
        self.lock().orders.get(id)
    }

    /// Turn a cart into a completed order.
    ///
    /// All-or-nothing: on `InsufficientStock` the catalog, the cart and the
    /// order history are exactly as they were before the call.
    pub fn checkout(&self, cart_id: &CartId) -> ShopResult<Order> {
        let mut stores = self.lock();

        let cart = stores.carts.get(cart_id)?;
        let total = cart.total();

        let lines = cart
            .items
            .iter()
            .map(|(product_id, line)| (product_id, line.quantity));

        if let Err(err) = stores.catalog.decrement_all(lines) {
            tracing::warn!(cart_id = %cart_id, error = %err, "Checkout rejected");
            metrics::record_checkout("rejected");
            return Err(err);
        }

        for (product_id, line) in &cart.items {
            metrics::record_units_sold(product_id.as_str(), line.quantity);
        }

        let order = Order {
            id: OrderId::generate(),
            cart,
            total,
            status: OrderStatus::Completed,
            created_at: Utc::now(),
        };

        stores.carts.remove(cart_id);
        stores.orders.insert(order.clone());
        drop(stores);

        tracing::info!(
            order_id = %order.id,
            cart_id = %cart_id,
            total = %order.total,
            lines = order.cart.items.len(),
            "Checkout committed"
        );
        metrics::record_checkout("completed");

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use super::*;

    fn product(id: &str, price_cents: i64, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product {id}"),
            price: Decimal::new(price_cents, 2),
            description: String::new(),
            stock,
        }
    }

    fn stock_of(shop: &Shop, id: &str) -> u32 {
        shop.product(&ProductId::new(id)).unwrap().stock
    }

    #[test]
    fn laptop_scenario() {
        let shop = Shop::new([product("1", 99999, 10)]);
        let laptop = ProductId::new("1");
        let cart_id = shop.create_cart();

        let cart = shop.add_to_cart(&cart_id, &laptop, 3).unwrap();
        assert_eq!(cart.items[&laptop].quantity, 3);
        let cart = shop.add_to_cart(&cart_id, &laptop, 2).unwrap();
        assert_eq!(cart.items[&laptop].quantity, 5);

        let order = shop.checkout(&cart_id).unwrap();
        assert_eq!(order.total, Decimal::new(499995, 2));
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.cart.id, cart_id);
        assert_eq!(stock_of(&shop, "1"), 5);

        assert_eq!(shop.cart(&cart_id).unwrap_err(), ShopError::CartNotFound(cart_id.clone()));
        assert_eq!(shop.order(&order.id), Some(order.clone()));
        assert_eq!(shop.orders().len(), 1);
    }

    #[test]
    fn oversized_add_changes_nothing() {
        let shop = Shop::new([product("1", 99999, 5)]);
        let laptop = ProductId::new("1");
        let cart_id = shop.create_cart();
        shop.add_to_cart(&cart_id, &laptop, 2).unwrap();

        let err = shop.add_to_cart(&cart_id, &laptop, 999).unwrap_err();
        assert!(matches!(err, ShopError::InsufficientStock { .. }));
        assert_eq!(shop.cart(&cart_id).unwrap().items[&laptop].quantity, 2);
        assert_eq!(stock_of(&shop, "1"), 5);
    }

    #[test]
    fn failed_checkout_is_atomic() {
        let shop = Shop::new([product("1", 1000, 10), product("2", 500, 2)]);
        let cart_id = shop.create_cart();
        shop.add_to_cart(&cart_id, &ProductId::new("1"), 4).unwrap();
        shop.add_to_cart(&cart_id, &ProductId::new("2"), 2).unwrap();

        // Another cart drains product 2 first.
        let other = shop.create_cart();
        shop.add_to_cart(&other, &ProductId::new("2"), 1).unwrap();
        shop.checkout(&other).unwrap();

        let products_before = shop.products();
        let cart_before = shop.cart(&cart_id).unwrap();
        let orders_before = shop.orders();

        let err = shop.checkout(&cart_id).unwrap_err();
        assert!(matches!(
            err,
            ShopError::InsufficientStock { requested: 2, available: 1, .. }
        ));

        assert_eq!(shop.products(), products_before);
        assert_eq!(shop.cart(&cart_id).unwrap(), cart_before);
        assert_eq!(shop.orders(), orders_before);
    }

    #[test]
    fn checkout_unknown_cart_is_not_found() {
        let shop = Shop::new([product("1", 1000, 1)]);
        let err = shop.checkout(&CartId::new("missing")).unwrap_err();
        assert_eq!(err, ShopError::CartNotFound(CartId::new("missing")));
        assert!(shop.orders().is_empty());
    }

    #[test]
    fn checkout_twice_fails_second_time() {
        let shop = Shop::new([product("1", 1000, 10)]);
        let cart_id = shop.create_cart();
        shop.add_to_cart(&cart_id, &ProductId::new("1"), 1).unwrap();

        shop.checkout(&cart_id).unwrap();
        assert!(matches!(shop.checkout(&cart_id), Err(ShopError::CartNotFound(_))));
        assert_eq!(stock_of(&shop, "1"), 9);
    }

    #[test]
    fn empty_cart_checks_out_with_zero_total() {
        let shop = Shop::new([product("1", 1000, 10)]);
        let cart_id = shop.create_cart();

        let order = shop.checkout(&cart_id).unwrap();
        assert_eq!(order.total, Decimal::ZERO);
        assert!(order.cart.items.is_empty());
    }

    #[test]
    fn concurrent_checkouts_never_oversell() {
        let shop = Arc::new(Shop::new([product("1", 1000, 10)]));
        let laptop = ProductId::new("1");

        let carts: Vec<CartId> = (0..8)
            .map(|_| {
                let cart_id = shop.create_cart();
                shop.add_to_cart(&cart_id, &laptop, 3).unwrap();
                cart_id
            })
            .collect();

        let handles: Vec<_> = carts
            .into_iter()
            .map(|cart_id| {
                let shop = Arc::clone(&shop);
                std::thread::spawn(move || shop.checkout(&cart_id))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|r| matches!(r, Err(ShopError::InsufficientStock { .. })))
            .count();

        assert_eq!(succeeded, 3);
        assert_eq!(rejected, 5);
        assert_eq!(stock_of(&shop, "1"), 1);
    }
}
