//! Bookshop Storefront library.
//!
//! The cart store, the catalog query layer and the key-value storage they
//! persist into. Presentation (rendering, input handling) lives in front ends
//! that drive these types; see the `bookshop-cli` crate.
//!
//! # Modules
//!
//! - [`cart`] - Line items, the write-through [`CartStore`], checkout stub
//! - [`catalog`] - Book entries, filtering, sorting, view preference
//! - [`storage`] - The [`Storage`] slot trait with memory and file backends
//! - [`config`] - Environment-driven configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod storage;

pub use cart::{CartEvent, CartStore, CheckoutError, LineItem, NewLineItem, Receipt};
pub use catalog::{Book, Catalog, CatalogError, CatalogFilter, SortOrder, ViewMode};
pub use config::{ConfigError, StorefrontConfig};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
