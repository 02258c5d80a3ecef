//! Finalized orders. Append-only; kept in memory for the life of the process.

use std::collections::BTreeMap;

use crate::store::types::{Order, OrderId};

#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    orders: BTreeMap<OrderId, Order>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, order: Order) {
        self.orders.insert(order.id.clone(), order);
    }

    pub fn get(&self, id: &OrderId) -> Option<Order> {
        self.orders.get(id).cloned()
    }

    /// Snapshot of every order.
    pub fn list(&self) -> BTreeMap<OrderId, Order> {
        self.orders.clone()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
