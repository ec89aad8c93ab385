//! Checkout flows: order construction, confirmation, and failure recovery.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use agrolink_client::error::{CartError, ClientError};
use agrolink_client::forms::ShippingForm;
use agrolink_core::{OrderStatus, Price, ProductId};
use rust_decimal::dec;

use agrolink_integration_tests::{app_with_storage, fresh_app, shipping_form};

#[tokio::test]
async fn checkout_snapshots_cart_into_order() {
    let mut app = fresh_app();
    app.add_item(&ProductId::new("1")).unwrap();
    app.add_item(&ProductId::new("1")).unwrap();
    app.add_item(&ProductId::new("2")).unwrap();

    let (confirmation, _effects) = app.checkout(shipping_form()).await.unwrap();

    let orders = app.placed_orders();
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.id, confirmation.order_id);
    assert_eq!(order.total, Price::rupees(dec!(420)));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].quantity, 2);
    assert_eq!(order.shipping.location, "Kandy");

    assert!(app.cart().is_empty());
}

#[tokio::test]
async fn empty_cart_checkout_is_rejected() {
    let mut app = fresh_app();
    let err = app.checkout(shipping_form()).await.unwrap_err();
    assert!(matches!(err, ClientError::Cart(CartError::EmptyCart)));
    assert!(app.placed_orders().is_empty());
}

#[tokio::test]
async fn invalid_shipping_leaves_cart_untouched() {
    let mut app = fresh_app();
    app.add_item(&ProductId::new("3")).unwrap();

    let err = app.checkout(ShippingForm::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(app.cart().lines().len(), 1);
    assert!(app.placed_orders().is_empty());
}

#[tokio::test]
async fn placed_orders_survive_restart() {
    let mut app = fresh_app();
    app.add_item(&ProductId::new("2")).unwrap();
    app.checkout(shipping_form()).await.unwrap();

    let reopened = app_with_storage(app.storage().clone());
    let orders = reopened.placed_orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].total, Price::rupees(dec!(180)));
}

#[tokio::test]
async fn consecutive_orders_append() {
    let mut app = fresh_app();

    app.add_item(&ProductId::new("1")).unwrap();
    let (first, _) = app.checkout(shipping_form()).await.unwrap();

    app.add_item(&ProductId::new("3")).unwrap();
    let (second, _) = app.checkout(shipping_form()).await.unwrap();

    let orders = app.placed_orders();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, first.order_id);
    assert_eq!(orders[1].id, second.order_id);
}
