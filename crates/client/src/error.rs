//! Unified error handling.
//!
//! Every failure is local and recoverable: nothing here is fatal to the
//! host. Errors are the caller's success/failure signal; user-visible
//! notifications travel separately as [`crate::effect::Effect`]s and are
//! never the error channel.

use thiserror::Error;

use agrolink_core::{ProductId, Role};

use crate::forms::ValidationError;
use crate::services::auth::AuthServiceError;
use crate::services::orders::OrderSubmitError;
use crate::storage::StorageError;

/// Cart operation errors.
#[derive(Debug, Error)]
pub enum CartError {
    /// Checkout attempted with no line items; nothing was mutated.
    #[error("cart is empty")]
    EmptyCart,

    /// The referenced product is not in the catalog.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),
}

/// Access-control failures from `require_auth`.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No (or expired) cached user; the host should send the visitor to
    /// the login page.
    #[error("please login to access this page")]
    AuthRequired {
        /// Where the host should navigate.
        redirect: String,
    },

    /// The cached user's role is not allowed here; the host should send
    /// them to their own dashboard, not the login page.
    #[error("access denied")]
    AccessDenied {
        /// The user's actual role.
        role: Role,
        /// Where the host should navigate (the role's dashboard).
        redirect: String,
    },
}

/// Application-level error type for the marketplace client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A form failed validation; no mutation or request was made.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Access control failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Durable storage failed; state may not have been persisted.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The authentication service failed or rejected the request.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthServiceError),

    /// The order sink failed or rejected the order.
    #[error("Order error: {0}")]
    Order(#[from] OrderSubmitError),

    /// State serialization failed.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ClientError {
    /// User-presentable message for this error.
    ///
    /// Server-provided rejection messages pass through verbatim;
    /// infrastructure failures get a generic message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e
                .errors
                .first()
                .map_or_else(|| "Please check the form".to_owned(), |f| f.message.clone()),
            Self::Cart(CartError::EmptyCart) => "Your cart is empty".to_owned(),
            Self::Cart(CartError::ProductNotFound(_)) => "Product not found".to_owned(),
            Self::Session(e) => e.to_string(),
            Self::Auth(AuthServiceError::Rejected { message })
            | Self::Order(OrderSubmitError::Rejected { message }) => message.clone(),
            Self::Auth(_) | Self::Order(_) => {
                "Service unavailable, please try again".to_owned()
            }
            Self::Storage(_) | Self::Serde(_) => {
                "Could not save your changes, please try again".to_owned()
            }
        }
    }
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart_message() {
        let err = ClientError::from(CartError::EmptyCart);
        assert_eq!(err.user_message(), "Your cart is empty");
    }

    #[test]
    fn test_rejection_message_passes_through() {
        let err = ClientError::from(AuthServiceError::Rejected {
            message: "Invalid password".to_owned(),
        });
        assert_eq!(err.user_message(), "Invalid password");
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::AuthRequired {
            redirect: "/login".to_owned(),
        };
        assert_eq!(err.to_string(), "please login to access this page");
    }
}
