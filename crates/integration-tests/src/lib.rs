//! Integration tests for the bookshop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bookshop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart behaviour through the public API, across reopen cycles
//! - `file_storage` - Cart and view preference persisted on disk
//! - `catalog` - Catalog loading, filtering and adding results to the cart
//!
//! This library holds shared fixtures.

#![cfg_attr(not(test), forbid(unsafe_code))]

use bookshop_core::Price;
use bookshop_storefront::NewLineItem;

/// A small catalog covering every section flag and several categories.
pub const SAMPLE_CATALOG: &str = r#"[
    {"id":"b1","title":"Dune","author":"Frank Herbert","price":"10.50","category":"Fiction","rating":5,"bestseller":true},
    {"id":"b2","title":"Cosmos","author":"Carl Sagan","price":8,"category":"Science","rating":4,"is_new":true},
    {"id":"b3","title":"Emma","author":"Jane Austen","price":"4.99","category":"Fiction","rating":3,"on_sale":true,"original_price":"7.99"},
    {"id":"b4","title":"SPQR","author":"Mary Beard","price":"15.25","category":"History","rating":4,"is_new":true,"on_sale":true,"original_price":"19.00"},
    {"id":"b5","title":"Atlas","author":"Various","price":"250","category":"Reference","rating":2}
]"#;

/// Cart input for a book with a generated title.
///
/// # Panics
///
/// Panics if `price` is not a valid price.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn book(id: &str, price: &str) -> NewLineItem {
    NewLineItem::new(id, format!("Book {id}"), "Test Author", Price::parse(price).unwrap())
}
