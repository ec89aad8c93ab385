//! Marketplace roles.

use serde::{Deserialize, Serialize};

/// Error parsing a [`Role`] from a string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);

/// A marketplace account role.
///
/// Each role has its own dashboard; the landing page for an authenticated
/// user is always their role's dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Sells produce listed in the catalog.
    Farmer,
    /// Buys produce; owns carts and orders.
    Buyer,
    /// Delivers orders between farmers and buyers.
    Transporter,
    /// Platform administration.
    Admin,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Self; 4] = [Self::Farmer, Self::Buyer, Self::Transporter, Self::Admin];

    /// Path of this role's dashboard page.
    #[must_use]
    pub const fn dashboard_path(self) -> &'static str {
        match self {
            Self::Farmer => "/dashboard/farmer",
            Self::Buyer => "/dashboard/buyer",
            Self::Transporter => "/dashboard/transporter",
            Self::Admin => "/dashboard/admin",
        }
    }

    /// Whether this role may be chosen during self-registration.
    ///
    /// Admin accounts are provisioned out of band, never self-registered.
    #[must_use]
    pub const fn self_registerable(self) -> bool {
        !matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Farmer => write!(f, "farmer"),
            Self::Buyer => write!(f, "buyer"),
            Self::Transporter => write!(f, "transporter"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "farmer" => Ok(Self::Farmer),
            "buyer" => Ok(Self::Buyer),
            "transporter" => Ok(Self::Transporter),
            "admin" => Ok(Self::Admin),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_round_trip_all_roles() {
        for role in Role::ALL {
            assert_eq!(Role::from_str(&role.to_string()).unwrap(), role);
        }
    }

    #[test]
    fn test_invalid_role() {
        assert!(Role::from_str("wholesaler").is_err());
    }

    #[test]
    fn test_dashboard_paths_are_distinct() {
        let paths: std::collections::HashSet<_> =
            Role::ALL.iter().map(|r| r.dashboard_path()).collect();
        assert_eq!(paths.len(), Role::ALL.len());
    }

    #[test]
    fn test_admin_not_self_registerable() {
        assert!(!Role::Admin.self_registerable());
        assert!(Role::Buyer.self_registerable());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Role::Transporter).unwrap();
        assert_eq!(json, "\"transporter\"");
    }
}
