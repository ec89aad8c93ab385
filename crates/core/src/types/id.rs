//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro for integer-keyed entities (server-assigned
//! database IDs) and `define_string_id!` for string-keyed entities (catalog
//! handles, client-generated order IDs).

use uuid::Uuid;

/// Macro to define a type-safe integer ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use agrolink_core::define_id;
/// define_id!(UserId);
/// define_id!(NotificationId);
///
/// let user_id = UserId::new(1);
/// let notification_id = NotificationId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: UserId = notification_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Macro to define a type-safe string ID wrapper.
///
/// Catalog product IDs and order IDs are opaque strings assigned by their
/// owning system, so they get a `String`-backed newtype instead of `i32`.
#[macro_export]
macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Server-assigned entity IDs
define_id!(UserId);
define_id!(NotificationId);

// String-keyed entity IDs
define_string_id!(ProductId);
define_string_id!(OrderId);

impl OrderId {
    /// Generate a fresh random order ID.
    ///
    /// Orders are created client-side before submission, so the ID must be
    /// collision-resistant without coordination.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_ids_round_trip() {
        let id = UserId::new(42);
        assert_eq!(id.as_i32(), 42);
        assert_eq!(UserId::from(42), id);
        assert_eq!(i32::from(id), 42);
    }

    #[test]
    fn test_string_ids_round_trip() {
        let id = ProductId::new("1");
        assert_eq!(id.as_str(), "1");
        assert_eq!(ProductId::from("1"), id);
        assert_eq!(String::from(id), "1");
    }

    #[test]
    fn test_order_id_generate_is_unique() {
        assert_ne!(OrderId::generate(), OrderId::generate());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&ProductId::new("2")).unwrap();
        assert_eq!(json, "\"2\"");
        let json = serde_json::to_string(&UserId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
