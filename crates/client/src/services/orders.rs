//! Order submission collaborator.
//!
//! Checkout hands a finalized [`Order`] to an [`OrderSink`]. The cart is
//! only cleared once the sink confirms; a failed submission leaves the
//! cart untouched so the user can retry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use agrolink_core::{OrderId, OrderStatus, Price};

use crate::cart::{Cart, CartLine};
use crate::config::ClientConfig;
use crate::forms::ShippingDetails;

/// Errors that can occur submitting an order.
#[derive(Debug, thiserror::Error)]
pub enum OrderSubmitError {
    /// Transport-level failure, including request timeout.
    #[error("order service unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint URL could not be constructed.
    #[error("invalid order endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// The sink refused the order.
    #[error("{message}")]
    Rejected {
        /// User-presentable reason from the sink.
        message: String,
    },
}

/// A finalized order record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Snapshot of the cart lines at checkout time.
    pub items: Vec<CartLine>,
    pub shipping: ShippingDetails,
    pub total: Price,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    /// Build an order from the current cart.
    ///
    /// Callers must have rejected an empty cart already; this only
    /// snapshots state.
    #[must_use]
    pub fn from_cart(cart: &Cart, shipping: ShippingDetails, created_at: DateTime<Utc>) -> Self {
        Self {
            id: OrderId::generate(),
            items: cart.lines().to_vec(),
            shipping,
            total: cart.totals().total_price,
            created_at,
            status: OrderStatus::Pending,
        }
    }
}

/// Confirmation returned by a sink that accepted an order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    #[serde(default)]
    pub message: String,
}

/// Accepts finalized orders for persistence/fulfillment.
pub trait OrderSink {
    /// Submit an order, returning a confirmation on acceptance.
    ///
    /// # Errors
    ///
    /// Returns `OrderSubmitError` if the order was not durably accepted.
    /// The caller must not clear the cart in that case.
    fn submit(
        &self,
        order: &Order,
    ) -> impl Future<Output = Result<OrderConfirmation, OrderSubmitError>> + Send;
}

/// Sink that accepts every order without talking to anyone.
///
/// Stand-in for a real backend: the app still records accepted orders in
/// its own durable storage, so locally placed orders survive restarts.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalOrderSink;

impl OrderSink for LocalOrderSink {
    async fn submit(&self, order: &Order) -> Result<OrderConfirmation, OrderSubmitError> {
        tracing::info!(order_id = %order.id, total = %order.total, "Accepting order locally");
        Ok(OrderConfirmation {
            order_id: order.id.clone(),
            message: "Order placed".to_owned(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OrderEnvelope {
    success: bool,
    #[serde(default)]
    message: String,
    order_id: Option<String>,
}

/// Sink that POSTs orders to the backend order endpoint.
#[derive(Debug, Clone)]
pub struct HttpOrderSink {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpOrderSink {
    /// Create a sink with the configured base URL and request timeout.
    ///
    /// # Errors
    ///
    /// Returns `OrderSubmitError::Http` if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, OrderSubmitError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }
}

impl OrderSink for HttpOrderSink {
    async fn submit(&self, order: &Order) -> Result<OrderConfirmation, OrderSubmitError> {
        let url = self.base_url.join("orders/create.php")?;

        tracing::debug!(order_id = %order.id, "Submitting order");
        let response = self.http.post(url).json(order).send().await?;
        let envelope: OrderEnvelope = response.json().await?;

        if !envelope.success {
            return Err(OrderSubmitError::Rejected {
                message: envelope.message,
            });
        }

        // The backend may assign its own order id; fall back to ours.
        let order_id = envelope
            .order_id
            .map_or_else(|| order.id.clone(), OrderId::new);

        Ok(OrderConfirmation {
            order_id,
            message: envelope.message,
        })
    }
}
