//! AgroLink Core - Shared types library.
//!
//! This crate provides common types used across all AgroLink components:
//! - `client` - Cart & session manager consumed by the marketplace front end
//! - `integration-tests` - End-to-end flows over the client API
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, roles,
//!   and order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
