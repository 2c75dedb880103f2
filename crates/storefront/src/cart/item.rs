//! Cart line items and their persisted encoding.

use bookshop_core::{BookId, Price};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One distinct catalog entry in the cart, with its quantity.
///
/// `quantity` is never zero while the item is held by a
/// [`CartStore`](super::CartStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: u32,
}

impl LineItem {
    /// Price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// What the presentation layer hands to [`CartStore::add`](super::CartStore::add).
///
/// Same fields as [`LineItem`] minus the quantity, which the store owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLineItem {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub price: Price,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewLineItem {
    /// Build an item without an image.
    #[must_use]
    pub fn new(
        id: impl Into<BookId>,
        title: impl Into<String>,
        author: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            price,
            image: None,
        }
    }

    /// Attach an image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub(crate) fn into_line_item(self) -> LineItem {
        LineItem {
            id: self.id,
            title: self.title,
            author: self.author,
            price: self.price,
            image: self.image,
            quantity: 1,
        }
    }
}

/// Encode items as the JSON array stored in the cart slot.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_items(items: &[LineItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Decode the cart slot.
///
/// Entries with a zero quantity are dropped and repeated IDs are merged into
/// the first occurrence, so the result always satisfies the cart invariants
/// even if the stored data was edited by hand.
///
/// # Errors
///
/// Returns an error if the payload is not a JSON array of line items.
pub fn decode_items(payload: &str) -> Result<Vec<LineItem>, serde_json::Error> {
    let raw: Vec<LineItem> = serde_json::from_str(payload)?;
    let mut items: Vec<LineItem> = Vec::with_capacity(raw.len());

    for item in raw {
        if item.quantity == 0 {
            warn!(id = %item.id, "Dropping stored line item with zero quantity");
            continue;
        }
        if let Some(existing) = items.iter_mut().find(|i| i.id == item.id) {
            warn!(id = %item.id, "Merging duplicate stored line item");
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            items.push(item);
        }
    }

    Ok(items)
}
