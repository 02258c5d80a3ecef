//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use shop_sdk::ShopClient;
use shop_server::config::ShopConfig;
use shop_server::net::Listener;
use shop_server::store::{Product, ProductId};
use shop_server::{Server, Shop};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A server running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shop: Arc<Shop>,
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Start with the built-in demo catalog.
    pub async fn start() -> Self {
        Self::start_with(test_config()).await
    }

    pub async fn start_with(config: ShopConfig) -> Self {
        let listener = Listener::bind(&config.listener).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shop = Arc::new(Shop::new(config.catalog.seed()));
        let server = Server::new(Arc::clone(&shop), &config);

        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(server.run(listener, async move {
            let _ = stopped.await;
        }));

        Self {
            addr,
            shop,
            stop: Some(stop),
            task,
        }
    }

    pub async fn client(&self) -> ShopClient {
        ShopClient::connect(self.addr).await.unwrap()
    }

    /// Signal shutdown and wait for the server to finish draining.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        tokio::time::timeout(Duration::from_secs(5), &mut self.task)
            .await
            .expect("server did not stop in time")
            .unwrap();
    }
}

/// Defaults with an ephemeral bind address and a short grace period.
pub fn test_config() -> ShopConfig {
    let mut config = ShopConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.shutdown.grace_period_secs = 1;
    config
}

/// Config whose catalog is exactly `products`.
pub fn config_with_products(products: Vec<Product>) -> ShopConfig {
    let mut config = test_config();
    config.catalog.products = products;
    config
}

pub fn product(id: &str, price_cents: i64, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Decimal::new(price_cents, 2),
        description: String::new(),
        stock,
    }
}

pub fn stock_of(shop: &Shop, id: &str) -> u32 {
    shop.product(&ProductId::new(id)).unwrap().stock
}
