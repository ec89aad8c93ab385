//! Session flows: login, role gating, logout, and rejection paths.

#![allow(clippy::unwrap_used)]

use agrolink_client::app::MarketplaceApp;
use agrolink_client::catalog::StaticCatalog;
use agrolink_client::effect::Effect;
use agrolink_client::error::{ClientError, SessionError};
use agrolink_client::services::orders::LocalOrderSink;
use agrolink_client::storage::MemoryStore;
use agrolink_core::{ProductId, Role};

use agrolink_integration_tests::{CannedAuth, TestApp, app_with_storage, fresh_app, login_form};

#[tokio::test]
async fn login_then_role_gated_pages() {
    let mut app = fresh_app();
    app.login(login_form("buyer")).await.unwrap();

    // Buyer dashboard admits buyers.
    assert!(app.require_auth(&[Role::Buyer]).is_ok());
    // Any-authenticated page admits them too.
    assert!(app.require_auth(&[]).is_ok());

    // Admin page denies, redirecting to the buyer dashboard.
    let err = app.require_auth(&[Role::Admin]).unwrap_err();
    assert!(matches!(
        err,
        SessionError::AccessDenied { role: Role::Buyer, ref redirect }
            if redirect == "/dashboard/buyer"
    ));
}

#[tokio::test]
async fn cached_session_survives_restart() {
    let mut app = fresh_app();
    app.login(login_form("farmer")).await.unwrap();

    let reopened = app_with_storage(app.storage().clone());
    let user = reopened.current_user().unwrap();
    assert_eq!(user.role, Role::Farmer);
}

#[tokio::test]
async fn logout_clears_cart_and_session_together() {
    let mut app = fresh_app();
    app.login(login_form("buyer")).await.unwrap();
    app.add_item(&ProductId::new("1")).unwrap();

    app.logout().unwrap();

    assert!(app.current_user().is_none());
    assert!(app.cart().is_empty());
    assert!(matches!(
        app.require_auth(&[]),
        Err(SessionError::AuthRequired { ref redirect }) if redirect == "/login"
    ));

    // Nothing left behind for the next visitor either.
    let reopened = app_with_storage(app.storage().clone());
    assert!(reopened.current_user().is_none());
    assert!(reopened.cart().is_empty());
}

#[tokio::test]
async fn rejected_login_surfaces_server_message() {
    let mut app: TestApp = MarketplaceApp::new(
        MemoryStore::new(),
        StaticCatalog::with_demo_products(),
        CannedAuth {
            reject_with: Some("Account is deactivated. Please contact support.".to_owned()),
        },
        LocalOrderSink,
    );

    let err = app.login(login_form("buyer")).await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "Account is deactivated. Please contact support."
    );
    assert!(app.current_user().is_none());
}

#[tokio::test]
async fn invalid_login_form_never_reaches_the_service() {
    let mut app = fresh_app();
    let mut form = login_form("buyer");
    form.email = String::new();

    let err = app.login(form).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn login_redirect_targets_role_dashboard() {
    for (role, dashboard) in [
        ("farmer", "/dashboard/farmer"),
        ("buyer", "/dashboard/buyer"),
        ("transporter", "/dashboard/transporter"),
    ] {
        let mut app = fresh_app();
        let effects = app.login(login_form(role)).await.unwrap();
        assert!(
            effects.iter().any(|e| matches!(
                e,
                Effect::Redirect { target, .. } if target == dashboard
            )),
            "expected redirect to {dashboard}"
        );
    }
}
