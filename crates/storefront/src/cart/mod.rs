//! Shopping cart.
//!
//! [`CartStore`] owns the line items, writes them through to a
//! [`Storage`](crate::storage::Storage) slot after every change and tells
//! subscribers what happened. Quantities are always at least 1 and totals are
//! computed with decimal arithmetic.

mod checkout;
mod events;
mod item;
mod store;

pub use checkout::{CheckoutError, Receipt};
pub use events::{CartEvent, Subscriber, SubscriptionId};
pub use item::{LineItem, NewLineItem, decode_items, encode_items};
pub use store::{CartStore, DEFAULT_CART_KEY};
