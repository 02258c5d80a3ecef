//! End-to-end shopping flows over a real TCP connection.

use shop_sdk::SdkError;

mod common;

use common::{config_with_products, product, stock_of, TestServer};

fn server_error(err: SdkError) -> (Option<String>, String) {
    match err {
        SdkError::Server { code, message } => (code, message),
        other => panic!("expected a server error, got {other:?}"),
    }
}

fn assert_amount(value: &serde_json::Value, expected: f64) {
    let actual = value.as_f64().expect("amount is a JSON number");
    assert!((actual - expected).abs() < 1e-6, "{actual} != {expected}");
}

#[tokio::test]
async fn laptop_purchase_scenario() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let laptop = client.get_product("1").await.unwrap();
    assert_eq!(laptop["stock"], 10);
    assert_amount(&laptop["price"], 999.99);

    let cart_id = client.create_cart().await.unwrap();

    let cart = client.add_to_cart(&cart_id, "1", 3).await.unwrap();
    assert_eq!(cart["items"]["1"]["quantity"], 3);

    let cart = client.add_to_cart(&cart_id, "1", 2).await.unwrap();
    assert_eq!(cart["items"].as_object().unwrap().len(), 1);
    assert_eq!(cart["items"]["1"]["quantity"], 5);

    let order = client.checkout(&cart_id).await.unwrap();
    assert_eq!(order["status"], "completed");
    assert_amount(&order["total"], 4999.95);
    assert_eq!(order["cart"]["id"], cart_id.as_str());
    assert!(order["created_at"].is_string());

    assert_eq!(client.get_product("1").await.unwrap()["stock"], 5);

    let (code, message) = server_error(client.get_cart(&cart_id).await.unwrap_err());
    assert_eq!(code.as_deref(), Some("not_found"));
    assert_eq!(message, "Cart not found");

    let orders = client.get_orders().await.unwrap();
    let order_id = order["id"].as_str().unwrap();
    assert_eq!(orders[order_id]["total"], order["total"]);

    server.shutdown().await;
}

#[tokio::test]
async fn oversized_add_leaves_cart_and_stock_alone() {
    let server = TestServer::start_with(config_with_products(vec![product("1", 99999, 5)])).await;
    let mut client = server.client().await;

    let cart_id = client.create_cart().await.unwrap();
    client.add_to_cart(&cart_id, "1", 2).await.unwrap();

    let (code, message) = server_error(client.add_to_cart(&cart_id, "1", 999).await.unwrap_err());
    assert_eq!(code.as_deref(), Some("insufficient_stock"));
    assert!(message.contains("Insufficient stock"), "{message}");

    let cart = client.get_cart(&cart_id).await.unwrap();
    assert_eq!(cart["items"]["1"]["quantity"], 2);
    assert_eq!(stock_of(&server.shop, "1"), 5);

    server.shutdown().await;
}

#[tokio::test]
async fn unknown_product_has_no_side_effects() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let before = client.get_products().await.unwrap();

    let (code, message) = server_error(client.get_product("nonexistent").await.unwrap_err());
    assert_eq!(code.as_deref(), Some("not_found"));
    assert_eq!(message, "Product not found");

    let cart_id = client.create_cart().await.unwrap();
    let (code, _) = server_error(
        client
            .add_to_cart(&cart_id, "nonexistent", 1)
            .await
            .unwrap_err(),
    );
    assert_eq!(code.as_deref(), Some("not_found"));

    assert_eq!(client.get_products().await.unwrap(), before);
    assert!(client.get_orders().await.unwrap().as_object().unwrap().is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn failed_checkout_is_all_or_nothing() {
    let server = TestServer::start_with(config_with_products(vec![
        product("a", 1000, 10),
        product("b", 2500, 2),
    ]))
    .await;
    let mut alice = server.client().await;
    let mut bob = server.client().await;

    let big = alice.create_cart().await.unwrap();
    alice.add_to_cart(&big, "a", 4).await.unwrap();
    alice.add_to_cart(&big, "b", 2).await.unwrap();

    let small = bob.create_cart().await.unwrap();
    bob.add_to_cart(&small, "b", 1).await.unwrap();
    bob.checkout(&small).await.unwrap();

    let (code, _) = server_error(alice.checkout(&big).await.unwrap_err());
    assert_eq!(code.as_deref(), Some("insufficient_stock"));

    assert_eq!(stock_of(&server.shop, "a"), 10);
    assert_eq!(stock_of(&server.shop, "b"), 1);

    let cart = alice.get_cart(&big).await.unwrap();
    assert_eq!(cart["items"]["a"]["quantity"], 4);
    assert_eq!(cart["items"]["b"]["quantity"], 2);
    assert_eq!(alice.get_orders().await.unwrap().as_object().unwrap().len(), 1);

    server.shutdown().await;
}

#[tokio::test]
async fn carts_are_shared_across_connections() {
    let server = TestServer::start().await;
    let mut first = server.client().await;
    let mut second = server.client().await;

    let cart_id = first.create_cart().await.unwrap();
    second.add_to_cart(&cart_id, "3", 4).await.unwrap();

    let cart = first.get_cart(&cart_id).await.unwrap();
    assert_eq!(cart["items"]["3"]["quantity"], 4);

    let order = first.checkout(&cart_id).await.unwrap();
    assert_amount(&order["total"], 359.96);

    let (code, _) = server_error(second.checkout(&cart_id).await.unwrap_err());
    assert_eq!(code.as_deref(), Some("not_found"));

    server.shutdown().await;
}

#[tokio::test]
async fn empty_cart_checks_out_to_zero_total() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let cart_id = client.create_cart().await.unwrap();
    let order = client.checkout(&cart_id).await.unwrap();

    assert_amount(&order["total"], 0.0);
    assert!(order["cart"]["items"].as_object().unwrap().is_empty());

    server.shutdown().await;
}
