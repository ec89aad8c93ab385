//! Session user types.
//!
//! The client only caches the identity the authentication service returns;
//! the authoritative session lives server-side. The cached copy is cleared
//! on logout and treated as absent once the server-side session window has
//! elapsed.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use agrolink_core::{Email, Role, UserId};

/// How long a server-side session stays valid after login. A cached user
/// older than this is stale and forces re-authentication.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Cached copy of the authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: Email,
    pub role: Role,
    pub full_name: String,
    /// When the server accepted the login; drives client-side expiry.
    pub logged_in_at: DateTime<Utc>,
}

impl SessionUser {
    /// Whether the server-side session backing this cache has expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.logged_in_at > Duration::hours(SESSION_TTL_HOURS)
    }

    /// Name to greet the user with: the registered full name, or one
    /// derived from the email local part when registration didn't set one.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.full_name.trim().is_empty() {
            derive_name_from_email(&self.email)
        } else {
            self.full_name.clone()
        }
    }

    /// Rehydrate from a serialized snapshot; absent or malformed is `None`.
    #[must_use]
    pub fn from_snapshot(snapshot: Option<&str>) -> Option<Self> {
        let raw = snapshot?;
        match serde_json::from_str(raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed session user snapshot");
                None
            }
        }
    }

    /// Serialize for storage.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Turn an email local part into a presentable name:
/// `"kumari.silva@agrolink.lk"` becomes `"Kumari Silva"`.
#[must_use]
pub fn derive_name_from_email(email: &Email) -> String {
    email
        .local_part()
        .split(['.', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
