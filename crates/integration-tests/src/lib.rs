//! Integration test support for the AgroLink client.
//!
//! Provides a canned auth collaborator and app constructors so the test
//! files can exercise whole user flows (browse, cart, login, checkout)
//! without a network or a real backend.

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::Utc;

use agrolink_client::app::MarketplaceApp;
use agrolink_client::catalog::StaticCatalog;
use agrolink_client::forms::{LoginCredentials, LoginForm, RegistrationRequest, ShippingForm};
use agrolink_client::services::auth::{
    AuthProvider, AuthServiceError, AuthenticatedUser, RegistrationReceipt,
};
use agrolink_client::services::orders::LocalOrderSink;
use agrolink_client::session::SessionUser;
use agrolink_client::storage::MemoryStore;
use agrolink_core::UserId;

/// Canned auth collaborator.
///
/// Accepts any credentials and mirrors the requested role back, like the
/// demo backend does; set `reject_with` to exercise failure paths.
#[derive(Debug, Default)]
pub struct CannedAuth {
    /// When set, every call fails with this server message.
    pub reject_with: Option<String>,
}

impl AuthProvider for CannedAuth {
    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        if let Some(message) = &self.reject_with {
            return Err(AuthServiceError::Rejected {
                message: message.clone(),
            });
        }
        Ok(AuthenticatedUser {
            user: SessionUser {
                id: UserId::new(1),
                email: credentials.email.clone(),
                role: credentials.role,
                full_name: String::new(),
                logged_in_at: Utc::now(),
            },
            redirect_url: None,
            message: "Login successful!".to_owned(),
        })
    }

    async fn register(
        &self,
        _request: &RegistrationRequest,
    ) -> Result<RegistrationReceipt, AuthServiceError> {
        if let Some(message) = &self.reject_with {
            return Err(AuthServiceError::Rejected {
                message: message.clone(),
            });
        }
        Ok(RegistrationReceipt {
            user_id: UserId::new(2),
            message: "Registration successful! Please login to continue.".to_owned(),
        })
    }
}

/// The app wired with in-memory collaborators.
pub type TestApp = MarketplaceApp<MemoryStore, StaticCatalog, CannedAuth, LocalOrderSink>;

/// Fresh app with empty storage and the demo catalog.
#[must_use]
pub fn fresh_app() -> TestApp {
    app_with_storage(MemoryStore::new())
}

/// App rehydrating from the given storage.
#[must_use]
pub fn app_with_storage(storage: MemoryStore) -> TestApp {
    MarketplaceApp::new(
        storage,
        StaticCatalog::with_demo_products(),
        CannedAuth::default(),
        LocalOrderSink,
    )
}

/// A valid login form for the given role string.
#[must_use]
pub fn login_form(role: &str) -> LoginForm {
    LoginForm {
        email: format!("{role}@example.com"),
        password: "secret123".to_owned(),
        role: role.to_owned(),
    }
}

/// A valid shipping form.
#[must_use]
pub fn shipping_form() -> ShippingForm {
    ShippingForm {
        full_name: "Kumari Silva".to_owned(),
        phone: "0719876543".to_owned(),
        address: "12 Lake Road".to_owned(),
        location: "Kandy".to_owned(),
        note: String::new(),
    }
}
