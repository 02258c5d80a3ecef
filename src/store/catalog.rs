//! Product catalog and stock levels.
//!
//! Seeded once at startup. At runtime the only mutation is a stock
//! decrement performed by checkout.

use std::collections::BTreeMap;

use crate::store::error::{ShopError, ShopResult};
use crate::store::types::{Product, ProductId};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: BTreeMap<ProductId, Product>,
}

impl Catalog {
    /// Build a catalog from seed records. Later duplicates replace earlier ones.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products
            .into_iter()
            .map(|product| (product.id.clone(), product))
            .collect();

        Self { products }
    }

    /// Full snapshot of every product.
    pub fn list(&self) -> BTreeMap<ProductId, Product> {
        self.products.clone()
    }

    pub fn get(&self, id: &ProductId) -> ShopResult<Product> {
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| ShopError::ProductNotFound(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Remove `qty` units of one product, or fail without touching stock.
    pub fn decrement_stock(&mut self, id: &ProductId, qty: u32) -> ShopResult<()> {
        self.decrement_all([(id, qty)])
    }

    /// Remove stock for several products as one unit.
    ///
    /// Every line is checked against current stock before the first write,
    /// so either all decrements apply or none do. Repeated ids are summed.
    pub fn decrement_all<'a, I>(&mut self, lines: I) -> ShopResult<()>
    where
        I: IntoIterator<Item = (&'a ProductId, u32)>,
    {
        let mut wanted: BTreeMap<&ProductId, u64> = BTreeMap::new();
        for (id, qty) in lines {
            *wanted.entry(id).or_default() += u64::from(qty);
        }

        for (&id, &requested) in &wanted {
            let product = self
                .products
                .get(id)
                .ok_or_else(|| ShopError::ProductNotFound(id.clone()))?;

            if requested > u64::from(product.stock) {
                return Err(ShopError::InsufficientStock {
                    product_id: id.clone(),
                    requested,
                    available: product.stock,
                });
            }
        }

        for (id, requested) in wanted {
            if let Some(product) = self.products.get_mut(id) {
                // Bounded by the check above.
                product.stock -= requested as u32;
            }
        }

        Ok(())
    }
}
