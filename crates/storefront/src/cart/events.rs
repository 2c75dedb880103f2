//! Change notifications emitted by the cart store.

use bookshop_core::BookId;

use super::{LineItem, Receipt};

/// What changed in the cart.
///
/// Subscribers receive one event per effective mutation, after the new state
/// has been written through to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A book was added, or its quantity bumped by one.
    Added {
        id: BookId,
        title: String,
        quantity: u32,
    },
    /// A line item was removed.
    Removed { id: BookId, title: String },
    /// A line item's quantity was set directly.
    QuantityChanged { id: BookId, quantity: u32 },
    /// Every line item was removed.
    Cleared,
    /// The cart was turned into an order and emptied.
    CheckedOut { receipt: Receipt },
}

impl CartEvent {
    /// Short human-readable notice for toasts and status lines.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Added { title, .. } => format!("{title} added to cart"),
            Self::Removed { .. } => "Item removed from cart".to_string(),
            Self::QuantityChanged { quantity, .. } => format!("Quantity updated to {quantity}"),
            Self::Cleared => "Cart cleared".to_string(),
            Self::CheckedOut { receipt } => format!(
                "Order placed! Thank you for your purchase. Order total: {}",
                receipt.total
            ),
        }
    }
}

/// Handle returned by [`CartStore::subscribe`](super::CartStore::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// A change subscriber: receives the event and the cart contents after it.
pub type Subscriber = Box<dyn FnMut(&CartEvent, &[LineItem])>;
