//! Authentication service client.
//!
//! The client never authenticates anyone itself - it POSTs credentials to
//! the external auth endpoints and caches the identity a successful
//! response carries. The conventional envelope is
//! `{success, message, ...}` with HTTP 400 on rejection.
//!
//! Every request runs under the configured timeout; there is no hidden
//! unbounded wait.

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use agrolink_core::{Email, Role, UserId};

use crate::config::ClientConfig;
use crate::forms::{LoginCredentials, RegistrationRequest, expose_password};
use crate::session::SessionUser;

/// Errors that can occur talking to the authentication service.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Transport-level failure, including request timeout.
    #[error("auth service unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint URL could not be constructed.
    #[error("invalid auth endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// The service rejected the request (bad credentials, duplicate email,
    /// deactivated account, ...). Carries the server's message verbatim.
    #[error("{message}")]
    Rejected {
        /// User-presentable reason from the server.
        message: String,
    },

    /// The service reported success but the payload was unusable.
    #[error("auth service returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Identity returned by a successful login.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Cached session user (with `logged_in_at` stamped client-side).
    pub user: SessionUser,
    /// Server-suggested landing page, if any.
    pub redirect_url: Option<String>,
    /// Server's success message.
    pub message: String,
}

/// Receipt for a successful registration.
///
/// Registration never logs the user in; they are sent to the login page.
#[derive(Debug, Clone)]
pub struct RegistrationReceipt {
    pub user_id: UserId,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct LoginEnvelope {
    success: bool,
    #[serde(default)]
    message: String,
    user: Option<WireUser>,
    redirect_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: i32,
    email: String,
    role: String,
    #[serde(default)]
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct RegisterEnvelope {
    success: bool,
    #[serde(default)]
    message: String,
    user_id: Option<i32>,
}

/// Authentication collaborator.
///
/// The production implementation is [`AuthClient`]; tests substitute
/// stubs behind the same trait.
pub trait AuthProvider {
    /// Authenticate with validated credentials.
    fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> impl Future<Output = Result<AuthenticatedUser, AuthServiceError>> + Send;

    /// Create a new account.
    fn register(
        &self,
        request: &RegistrationRequest,
    ) -> impl Future<Output = Result<RegistrationReceipt, AuthServiceError>> + Send;
}

/// HTTP client for the authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AuthClient {
    /// Create a client with the configured base URL and request timeout.
    ///
    /// # Errors
    ///
    /// Returns `AuthServiceError::Http` if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, AuthServiceError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }
}

impl AuthProvider for AuthClient {
    /// POST credentials to the login endpoint.
    ///
    /// Fails with `Rejected` and the server's message when authentication
    /// is refused, `Http` on transport errors or timeout, and
    /// `InvalidResponse` when a success envelope is missing its user.
    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let url = self.base_url.join("auth/login.php")?;
        let body = json!({
            "email": credentials.email.as_str(),
            "password": expose_password(&credentials.password),
            "role": credentials.role.to_string(),
        });

        tracing::debug!(email = %credentials.email, role = %credentials.role, "Logging in");
        let response = self.http.post(url).json(&body).send().await?;
        let envelope: LoginEnvelope = response.json().await?;

        if !envelope.success {
            return Err(AuthServiceError::Rejected {
                message: envelope.message,
            });
        }

        let wire = envelope.user.ok_or_else(|| {
            AuthServiceError::InvalidResponse("success response without a user record".to_owned())
        })?;
        let user = session_user_from_wire(&wire)?;

        tracing::info!(user_id = %user.id, role = %user.role, "Login succeeded");
        Ok(AuthenticatedUser {
            user,
            redirect_url: envelope.redirect_url,
            message: envelope.message,
        })
    }

    /// POST a registration request.
    ///
    /// Fails with `Rejected` and the server's message (duplicate email,
    /// invalid fields) or `Http`/`InvalidResponse` as for login.
    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationReceipt, AuthServiceError> {
        let url = self.base_url.join("auth/register.php")?;
        let body = json!({
            "email": request.email.as_str(),
            "password": expose_password(&request.password),
            "confirm_password": expose_password(&request.password),
            "full_name": request.full_name,
            "role": request.role.to_string(),
            "phone": request.phone,
            "location": request.location,
            "business_name": request.business_name,
            "business_type": request.business_type,
            "address": request.address,
        });

        tracing::debug!(email = %request.email, role = %request.role, "Registering");
        let response = self.http.post(url).json(&body).send().await?;
        let envelope: RegisterEnvelope = response.json().await?;

        if !envelope.success {
            return Err(AuthServiceError::Rejected {
                message: envelope.message,
            });
        }

        let user_id = envelope.user_id.ok_or_else(|| {
            AuthServiceError::InvalidResponse("success response without a user id".to_owned())
        })?;

        Ok(RegistrationReceipt {
            user_id: UserId::new(user_id),
            message: envelope.message,
        })
    }
}

fn session_user_from_wire(wire: &WireUser) -> Result<SessionUser, AuthServiceError> {
    let email = Email::parse(&wire.email)
        .map_err(|e| AuthServiceError::InvalidResponse(format!("bad user email: {e}")))?;
    let role: Role = wire
        .role
        .parse()
        .map_err(|e| AuthServiceError::InvalidResponse(format!("bad user role: {e}")))?;

    Ok(SessionUser {
        id: UserId::new(wire.id),
        email,
        role,
        full_name: wire.full_name.clone(),
        logged_in_at: Utc::now(),
    })
}
