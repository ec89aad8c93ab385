//! AgroLink client library.
//!
//! The cart & session manager behind the AgroLink marketplace front end.
//! It owns two durable state slices - the shopping cart and the cached
//! session user - and exposes typed command handlers for every user action
//! (add to cart, adjust quantity, checkout, login, logout, ...).
//!
//! # Architecture
//!
//! - State lives in [`app::MarketplaceApp`], never in globals.
//! - Every mutation is written through to a [`storage::KeyValueStore`]
//!   immediately; rehydration happens once at startup.
//! - Handlers return [`effect::Effect`] descriptors (notifications,
//!   redirects) instead of touching any UI directly, so the state
//!   transitions are testable without a front end.
//! - External collaborators sit behind traits: the product catalog,
//!   the order sink, and the key-value store. The authentication service
//!   is an HTTP client with a mandatory request timeout.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod effect;
pub mod error;
pub mod forms;
pub mod services;
pub mod session;
pub mod storage;
