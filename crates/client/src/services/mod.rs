//! External service collaborators.
//!
//! - [`auth`] - HTTP client for the authentication endpoints
//! - [`orders`] - Order submission sinks

pub mod auth;
pub mod orders;
