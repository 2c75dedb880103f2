//! Cart commands.
//!
//! Each invocation opens the persisted cart, applies one change and prints the
//! result. Change notifications are reported through the store's subscriber
//! hook, the same way a page would show a toast.

use bookshop_core::Price;
use bookshop_storefront::{CartStore, Catalog, FileStorage, NewLineItem, StorefrontConfig};
use tracing::{info, warn};

use super::CommandError;
use crate::render;

/// Fields given on the command line for `cart add`.
#[derive(Debug, Default)]
pub struct ItemOverrides {
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

/// Build the item to add, preferring catalog data and applying overrides.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the price does not parse,
/// or the book is neither in the catalog nor fully described inline.
pub fn resolve_item(
    config: &StorefrontConfig,
    id: &str,
    overrides: ItemOverrides,
) -> Result<NewLineItem, CommandError> {
    let from_catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?
            .get(id)
            .map(bookshop_storefront::Book::to_line_item_input),
        None => None,
    };

    let price = overrides.price.as_deref().map(Price::parse).transpose()?;

    let mut item = match from_catalog {
        Some(item) => item,
        None => {
            if overrides.title.is_none() && overrides.author.is_none() && price.is_none() {
                return Err(CommandError::UnknownBook(id.to_string()));
            }
            NewLineItem::new(
                id,
                overrides.title.clone().ok_or(CommandError::MissingField("title"))?,
                overrides.author.clone().ok_or(CommandError::MissingField("author"))?,
                price.ok_or(CommandError::MissingField("price"))?,
            )
        }
    };

    if let Some(title) = overrides.title {
        item.title = title;
    }
    if let Some(author) = overrides.author {
        item.author = author;
    }
    if let Some(price) = price {
        item.price = price;
    }
    if let Some(image) = overrides.image {
        item.image = Some(image);
    }
    Ok(item)
}

/// The persisted cart plus display settings.
pub struct CartSession {
    store: CartStore<FileStorage>,
    currency: String,
}

impl CartSession {
    /// Open the cart from the configured data directory.
    pub fn open(config: &StorefrontConfig) -> Self {
        let mut store = CartStore::with_key(config.storage(), config.cart_key.clone());
        store.subscribe(|event, _items| info!("{}", event.message()));
        Self {
            store,
            currency: config.currency.clone(),
        }
    }

    pub fn show(&self) {
        render::cart(&self.store, &self.currency);
    }

    pub fn add(&mut self, item: NewLineItem) {
        self.store.add(item);
        self.show();
    }

    pub fn remove(&mut self, id: &str) {
        if self.store.get(id).is_none() {
            warn!(id, "Book is not in the cart");
        }
        self.store.remove(id);
        self.show();
    }

    pub fn set_quantity(&mut self, id: &str, quantity: i64) {
        if self.store.get(id).is_none() {
            warn!(id, "Book is not in the cart");
        }
        self.store.set_quantity(id, quantity);
        self.show();
    }

    /// Move a quantity up or down by `delta`, like the +/- buttons.
    pub fn step(&mut self, id: &str, delta: i64) {
        let Some(current) = self.store.get(id).map(|item| item.quantity) else {
            warn!(id, "Book is not in the cart");
            return;
        };
        self.store.set_quantity(id, i64::from(current) + delta);
        self.show();
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.show();
    }

    /// Place the order.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is empty.
    pub fn checkout(&mut self) -> Result<(), bookshop_storefront::CheckoutError> {
        let receipt = self.store.checkout()?;
        render::receipt(&receipt, &self.currency);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn config_with_catalog(catalog: Option<PathBuf>) -> StorefrontConfig {
        StorefrontConfig {
            catalog_path: catalog,
            ..StorefrontConfig::default()
        }
    }

    #[test]
    fn test_resolve_inline_item() {
        let item = resolve_item(
            &config_with_catalog(None),
            "b1",
            ItemOverrides {
                title: Some("Dune".to_string()),
                author: Some("Frank Herbert".to_string()),
                price: Some("10.50".to_string()),
                image: None,
            },
        )
        .unwrap();

        assert_eq!(item.id, "b1");
        assert_eq!(item.price.to_string(), "10.50");
    }

    #[test]
    fn test_resolve_unknown_without_fields() {
        let err = resolve_item(&config_with_catalog(None), "b1", ItemOverrides::default())
            .unwrap_err();
        assert!(matches!(err, CommandError::UnknownBook(_)));
    }

    #[test]
    fn test_resolve_partial_fields() {
        let err = resolve_item(
            &config_with_catalog(None),
            "b1",
            ItemOverrides {
                title: Some("Dune".to_string()),
                ..ItemOverrides::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, CommandError::MissingField("author")));
    }

    #[test]
    fn test_resolve_bad_price() {
        let err = resolve_item(
            &config_with_catalog(None),
            "b1",
            ItemOverrides {
                title: Some("Dune".to_string()),
                author: Some("Frank Herbert".to_string()),
                price: Some("cheap".to_string()),
                image: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, CommandError::Price(_)));
    }
}
