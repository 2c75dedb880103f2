//! Checkout stub.
//!
//! There is no payment processing: checking out snapshots the cart into a
//! [`Receipt`] and empties it.

use bookshop_core::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::LineItem;

/// Reasons a checkout can be refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,
}

/// Snapshot of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Locally generated order number.
    pub order_number: Uuid,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<LineItem>,
    /// Sum of line totals.
    pub total: Price,
    /// Sum of quantities.
    pub total_items: u32,
}

impl Receipt {
    /// Build a receipt for `lines`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there are no lines.
    pub fn for_lines(lines: &[LineItem]) -> Result<Self, CheckoutError> {
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(Self {
            order_number: Uuid::new_v4(),
            placed_at: Utc::now(),
            lines: lines.to_vec(),
            total: lines.iter().map(LineItem::line_total).sum(),
            total_items: lines
                .iter()
                .fold(0_u32, |acc, item| acc.saturating_add(item.quantity)),
        })
    }
}
