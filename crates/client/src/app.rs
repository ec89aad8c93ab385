//! The marketplace application state and its command handlers.
//!
//! [`MarketplaceApp`] owns the two durable state slices (cart, session
//! user) and every collaborator seam. Each handler validates its input,
//! mutates state, writes through to storage, and returns the side effects
//! the host should apply. Nothing here touches a UI.

use chrono::Utc;

use agrolink_core::{ProductId, Role};

use crate::cart::{AdjustOutcome, Cart, CartTotals, CartView};
use crate::catalog::ProductCatalog;
use crate::effect::{Effect, Notification};
use crate::error::{CartError, Result, SessionError};
use crate::forms::{LoginForm, RegisterForm, ShippingForm};
use crate::services::auth::AuthProvider;
use crate::services::orders::{Order, OrderConfirmation, OrderSink};
use crate::session::SessionUser;
use crate::storage::{KeyValueStore, keys};

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Path of the public landing page.
pub const LANDING_PATH: &str = "/";

/// The cart & session manager.
///
/// Generic over its collaborator seams so every handler is unit-testable
/// with in-memory substitutes.
pub struct MarketplaceApp<S, C, A, O>
where
    S: KeyValueStore,
    C: ProductCatalog,
    A: AuthProvider,
    O: OrderSink,
{
    storage: S,
    catalog: C,
    auth: A,
    orders: O,
    cart: Cart,
    user: Option<SessionUser>,
}

impl<S, C, A, O> MarketplaceApp<S, C, A, O>
where
    S: KeyValueStore,
    C: ProductCatalog,
    A: AuthProvider,
    O: OrderSink,
{
    /// Create the app, rehydrating cart and session user from storage.
    ///
    /// A failed or malformed read decays to the default state (empty cart,
    /// anonymous); only writes surface storage errors.
    pub fn new(storage: S, catalog: C, auth: A, orders: O) -> Self {
        let cart_snapshot = read_or_default(&storage, keys::CART);
        let user_snapshot = read_or_default(&storage, keys::CURRENT_USER);

        let cart = Cart::from_snapshot(cart_snapshot.as_deref());
        let user = SessionUser::from_snapshot(user_snapshot.as_deref());

        tracing::debug!(
            cart_lines = cart.lines().len(),
            has_user = user.is_some(),
            "Rehydrated client state"
        );

        Self {
            storage,
            catalog,
            auth,
            orders,
            cart,
            user,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current cart contents.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Aggregate cart totals; (0, Rs. 0.00) when empty.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Display-ready cart projection.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        self.cart.view()
    }

    /// The cached session user, unless absent or past the session window.
    #[must_use]
    pub fn current_user(&self) -> Option<&SessionUser> {
        let user = self.user.as_ref()?;
        if user.is_expired_at(Utc::now()) {
            tracing::debug!(user_id = %user.id, "Cached session expired");
            None
        } else {
            Some(user)
        }
    }

    /// The product catalog collaborator.
    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The durable store (for host-level inspection).
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Locally recorded orders, oldest first.
    #[must_use]
    pub fn placed_orders(&self) -> Vec<Order> {
        read_or_default(&self.storage, keys::ORDERS)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    // =========================================================================
    // Cart commands
    // =========================================================================

    /// Add one unit of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the id doesn't resolve in
    /// the catalog, or `StorageError` if the write-through fails.
    pub fn add_item(&mut self, product_id: &ProductId) -> Result<Vec<Effect>> {
        let product = self
            .catalog
            .lookup(product_id)
            .ok_or_else(|| CartError::ProductNotFound(product_id.clone()))?;

        self.cart.add(&product);
        self.persist_cart()?;

        tracing::debug!(product_id = %product_id, "Added to cart");
        Ok(vec![Effect::notify(Notification::success(
            "Product added to cart",
        ))])
    }

    /// Remove the line item for `product_id`.
    ///
    /// Removing an absent line is a silent no-op: the cart is already in
    /// the requested state, so there is nothing to persist or announce.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write-through fails.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<Vec<Effect>> {
        if !self.cart.remove(product_id) {
            return Ok(Vec::new());
        }
        self.persist_cart()?;

        Ok(vec![Effect::notify(Notification::success(
            "Product removed from cart",
        ))])
    }

    /// Change a line's quantity by `delta`; reaching zero removes it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write-through fails.
    pub fn adjust_quantity(&mut self, product_id: &ProductId, delta: i32) -> Result<Vec<Effect>> {
        match self.cart.adjust_quantity(product_id, delta) {
            AdjustOutcome::Missing => Ok(Vec::new()),
            AdjustOutcome::Updated | AdjustOutcome::Removed => {
                self.persist_cart()?;
                Ok(Vec::new())
            }
        }
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Place an order for the current cart.
    ///
    /// The order is handed to the order sink and the cart is cleared only
    /// once the sink confirms; on any failure the cart is left untouched
    /// so the user can retry. The host is expected to show its own
    /// progress indicator while awaiting this call.
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptyCart` when there is nothing to order,
    /// `ValidationError` for a bad shipping form (both before any state
    /// change), `OrderSubmitError` if the sink refuses or is unreachable,
    /// and `StorageError` if the post-confirmation write-through fails.
    pub async fn checkout(
        &mut self,
        form: ShippingForm,
    ) -> Result<(OrderConfirmation, Vec<Effect>)> {
        if self.cart.is_empty() {
            return Err(CartError::EmptyCart.into());
        }
        let shipping = form.validate()?;

        let order = Order::from_cart(&self.cart, shipping, Utc::now());
        tracing::info!(order_id = %order.id, total = %order.total, "Placing order");

        let confirmation = self.orders.submit(&order).await?;

        // Confirmed: record locally, then clear the cart.
        self.record_order(&order)?;
        self.cart.clear();
        self.persist_cart()?;

        let effects = vec![
            Effect::notify(Notification::success("Order placed successfully")),
            Effect::redirect(format!("/order-success?order={}", confirmation.order_id)),
        ];
        Ok((confirmation, effects))
    }

    fn record_order(&mut self, order: &Order) -> Result<()> {
        let mut orders = self.placed_orders();
        orders.push(order.clone());
        let raw = serde_json::to_string(&orders)?;
        self.storage.set(keys::ORDERS, &raw)?;
        Ok(())
    }

    // =========================================================================
    // Session commands
    // =========================================================================

    /// Authenticate against the external auth service and cache the
    /// returned identity.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a bad form (no request made),
    /// `AuthServiceError` if the service refuses or is unreachable, and
    /// `StorageError` if caching the identity fails.
    pub async fn login(&mut self, form: LoginForm) -> Result<Vec<Effect>> {
        let credentials = form.validate()?;
        let authed = self.auth.login(&credentials).await?;

        let snapshot = authed.user.to_snapshot()?;
        self.storage.set(keys::CURRENT_USER, &snapshot)?;

        let target = authed
            .redirect_url
            .unwrap_or_else(|| authed.user.role.dashboard_path().to_owned());
        let message = if authed.message.is_empty() {
            "Login successful! Redirecting...".to_owned()
        } else {
            authed.message
        };
        self.user = Some(authed.user);

        Ok(vec![
            Effect::notify(Notification::success(message)),
            Effect::redirect_after_grace(target),
        ])
    }

    /// Register a new account. Never logs the user in; on success they are
    /// sent to the login page.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a bad form (no request made) or
    /// `AuthServiceError` if the service refuses or is unreachable.
    pub async fn register(&mut self, form: RegisterForm) -> Result<Vec<Effect>> {
        let request = form.validate()?;
        let receipt = self.auth.register(&request).await?;

        tracing::info!(user_id = %receipt.user_id, "Registration accepted");
        let message = if receipt.message.is_empty() {
            "Registration successful! Please login to continue.".to_owned()
        } else {
            receipt.message
        };

        Ok(vec![
            Effect::notify(Notification::success(message)),
            Effect::redirect_after_grace(LOGIN_PATH),
        ])
    }

    /// Clear both state slices and return to the landing page.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if clearing the persisted state fails.
    pub fn logout(&mut self) -> Result<Vec<Effect>> {
        // Storage first: a failed removal must not leave memory logged out
        // while a restart would resurrect the session from disk.
        self.storage.remove(keys::CURRENT_USER)?;
        self.storage.remove(keys::CART)?;
        self.user = None;
        self.cart.clear();

        Ok(vec![
            Effect::notify(Notification::success("Logged out successfully")),
            Effect::redirect_after_grace(LANDING_PATH),
        ])
    }

    /// Gate a page behind authentication and (optionally) roles.
    ///
    /// An empty `allowed_roles` admits any authenticated user.
    ///
    /// # Errors
    ///
    /// `AuthRequired` (redirect: login page) when no valid session user is
    /// cached; `AccessDenied` (redirect: the user's own dashboard) when
    /// the role is not in a non-empty allowed set.
    pub fn require_auth(
        &self,
        allowed_roles: &[Role],
    ) -> std::result::Result<&SessionUser, SessionError> {
        let Some(user) = self.current_user() else {
            return Err(SessionError::AuthRequired {
                redirect: LOGIN_PATH.to_owned(),
            });
        };

        if !allowed_roles.is_empty() && !allowed_roles.contains(&user.role) {
            return Err(SessionError::AccessDenied {
                role: user.role,
                redirect: user.role.dashboard_path().to_owned(),
            });
        }

        Ok(user)
    }

    fn persist_cart(&mut self) -> Result<()> {
        let snapshot = self.cart.to_snapshot()?;
        self.storage.set(keys::CART, &snapshot)?;
        Ok(())
    }
}

fn read_or_default<S: KeyValueStore>(storage: &S, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Storage read failed; using default state");
            None
        }
    }
}
