//! Bookshop Core - Shared types library.
//!
//! This crate provides common types used across all bookshop components:
//! - `storefront` - Cart store, catalog queries and storage backends
//! - `cli` - Command-line front end driving the cart and catalog
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for book IDs, prices and catalog sections

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
