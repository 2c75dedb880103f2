//! The cart store.
//!
//! Owns the ordered list of line items and keeps the storage slot in sync
//! with it: every mutation is written through before subscribers are told.
//! None of the cart operations fail. Unreadable stored data is treated as an
//! empty cart and write failures are logged while the in-memory change stands.

use bookshop_core::Price;
use rust_decimal::Decimal;
use tracing::{debug, error, instrument, warn};

use super::events::{CartEvent, Subscriber, SubscriptionId};
use super::item::{decode_items, encode_items};
use super::{CheckoutError, LineItem, NewLineItem, Receipt};
use crate::storage::{Storage, StorageError};

/// Storage key the cart is persisted under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "bookCart";

/// Shopping cart with write-through persistence.
///
/// Construct one per process at the entry point and pass it by reference to
/// whatever drives the UI.
pub struct CartStore<S: Storage> {
    storage: S,
    key: String,
    items: Vec<LineItem>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: Storage> CartStore<S> {
    /// Open the cart stored under [`DEFAULT_CART_KEY`].
    pub fn open(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY)
    }

    /// Open the cart stored under `key`.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            items: Vec::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        };
        store.load();
        store
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Line items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line item by book ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities; 0 for an empty cart.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Exact sum of `price * quantity`.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of `price * quantity` rounded to two decimal places.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.total().rounded()
    }

    /// Sum of `price * quantity` formatted with two decimals, `"0.00"` when empty.
    #[must_use]
    pub fn total_price(&self) -> String {
        self.total().to_string()
    }

    /// Storage key this cart lives under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one copy of a book. Returns the resulting quantity.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub fn add(&mut self, item: NewLineItem) -> u32 {
        let (quantity, title, id) =
            if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
                existing.quantity = existing.quantity.saturating_add(1);
                (existing.quantity, existing.title.clone(), existing.id.clone())
            } else {
                let line = item.into_line_item();
                let snapshot = (line.quantity, line.title.clone(), line.id.clone());
                self.items.push(line);
                snapshot
            };

        debug!(quantity, "Added to cart");
        self.write_through();
        self.notify(&CartEvent::Added {
            id,
            title,
            quantity,
        });
        quantity
    }

    /// Remove a line item. Unknown IDs are ignored.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: &str) {
        let removed = self
            .items
            .iter()
            .position(|item| item.id == id)
            .map(|index| self.items.remove(index));

        self.write_through();

        if let Some(item) = removed {
            debug!("Removed from cart");
            self.notify(&CartEvent::Removed {
                id: item.id,
                title: item.title,
            });
        }
    }

    /// Set a line item's quantity.
    ///
    /// Anything below 1 removes the item and values above `u32::MAX`
    /// saturate. Unknown IDs leave the items unchanged but are still written
    /// through.
    #[instrument(skip(self))]
    pub fn set_quantity(&mut self, id: &str, quantity: i64) {
        if quantity < 1 {
            self.remove(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            debug!("Ignoring quantity change for item not in cart");
            self.write_through();
            return;
        };
        item.quantity = quantity;
        let id = item.id.clone();

        self.write_through();
        self.notify(&CartEvent::QuantityChanged { id, quantity });
    }

    /// Remove every line item.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.items.clear();
        self.write_through();
        self.notify(&CartEvent::Cleared);
    }

    /// Turn the cart into an order and empty it.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when there is nothing to order;
    /// the cart and its subscribers are left untouched.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<Receipt, CheckoutError> {
        let receipt = Receipt::for_lines(&self.items)?;

        self.items.clear();
        self.write_through();
        debug!(order_number = %receipt.order_number, total = %receipt.total, "Checked out");
        self.notify(&CartEvent::CheckedOut {
            receipt: receipt.clone(),
        });
        Ok(receipt)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Replace the in-memory cart with what storage holds.
    ///
    /// A missing slot, a read failure or a malformed payload all yield an
    /// empty cart.
    pub fn load(&mut self) {
        self.items = match self.storage.get(&self.key) {
            Ok(Some(payload)) => decode_items(&payload).unwrap_or_else(|e| {
                warn!(key = %self.key, error = %e, "Discarding malformed stored cart");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read stored cart");
                Vec::new()
            }
        };
    }

    /// Write the in-memory cart to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend rejects the write.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        let payload = encode_items(&self.items)
            .map_err(|e| StorageError::Unavailable(format!("failed to encode cart: {e}")))?;
        self.storage.set(&self.key, &payload)
    }

    fn write_through(&mut self) {
        if let Err(e) = self.persist() {
            error!(key = %self.key, error = %e, "Failed to save cart");
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a callback invoked after every effective mutation.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&CartEvent, &[LineItem]) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drop a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self, event: &CartEvent) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(event, &self.items);
        }
    }
}

impl<S: Storage> std::fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("items", &self.items)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::storage::MemoryStorage;

    fn book(id: &str, price: &str) -> NewLineItem {
        NewLineItem::new(id, format!("Book {id}"), "Author", Price::parse(price).unwrap())
    }

    /// Storage whose writes always fail.
    #[derive(Debug, Default)]
    struct ReadOnlyStorage {
        inner: MemoryStorage,
    }

    impl Storage for ReadOnlyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_scenario_totals() {
        let mut cart = CartStore::open(MemoryStorage::new());

        assert_eq!(cart.add(book("b1", "10.50")), 1);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_price(), "10.50");

        assert_eq!(cart.add(book("b1", "10.50")), 2);
        assert_eq!(cart.total_price(), "21.00");

        cart.set_quantity("b1", 5);
        assert_eq!(cart.total_price(), "52.50");

        cart.remove("b1");
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), "0.00");
    }

    #[test]
    fn test_repeated_add_counts_calls() {
        let mut cart = CartStore::open(MemoryStorage::new());
        for _ in 0..7 {
            cart.add(book("b1", "1"));
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("b1").unwrap().quantity, 7);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add(book("b2", "1"));
        cart.add(book("b1", "1"));
        cart.add(book("b2", "1"));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["b2", "b1"]);
    }

    #[test]
    fn test_set_quantity_below_one_removes() {
        for quantity in [0, -1, i64::MIN] {
            let mut cart = CartStore::open(MemoryStorage::new());
            cart.add(book("b1", "1"));
            cart.set_quantity("b1", quantity);
            assert!(cart.get("b1").is_none());
        }
    }

    #[test]
    fn test_set_quantity_on_missing_id_is_noop() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.set_quantity("ghost", 3);
        cart.remove("ghost");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_on_missing_id_still_writes_through() {
        let storage = MemoryStorage::with_entry(DEFAULT_CART_KEY, "{not json");
        let mut cart = CartStore::open(storage);

        cart.set_quantity("ghost", 3);
        assert_eq!(
            cart.storage().get(DEFAULT_CART_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_set_quantity_saturates_huge_values() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add(book("b1", "1000000000"));
        cart.add(book("b2", "0.01"));

        cart.set_quantity("b1", i64::MAX);
        cart.set_quantity("b2", i64::MAX);

        assert_eq!(cart.get("b1").unwrap().quantity, u32::MAX);
        assert_eq!(cart.total_items(), u32::MAX);
        assert_eq!(cart.total_price(), "4294967295042949672.95");
        assert_eq!(
            cart.total_amount(),
            Decimal::from_str_exact("4294967295042949672.95").unwrap()
        );
    }

    #[test]
    fn test_oversized_stored_price_loads_empty() {
        let storage = MemoryStorage::with_entry(
            DEFAULT_CART_KEY,
            r#"[{"id":"b1","title":"T","author":"A","price":"79228162514264337593543950335","quantity":2}]"#,
        );
        let cart = CartStore::open(storage);

        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), "0.00");
    }

    #[test]
    fn test_empty_totals() {
        let cart = CartStore::open(MemoryStorage::new());
        assert_eq!(cart.total_price(), "0.00");
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_every_mutation_is_written_through() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add(book("b1", "2.50"));
        cart.set_quantity("b1", 4);

        let reopened = CartStore::open(cart.storage().clone());
        assert_eq!(reopened.items(), cart.items());
        assert_eq!(reopened.total_price(), "10.00");
    }

    #[test]
    fn test_malformed_payload_loads_empty() {
        let storage = MemoryStorage::with_entry(DEFAULT_CART_KEY, "{not json");
        let cart = CartStore::open(storage);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_write_failure_keeps_in_memory_change() {
        let mut cart = CartStore::open(ReadOnlyStorage::default());

        assert_eq!(cart.add(book("b1", "3")), 1);
        assert_eq!(cart.total_items(), 1);
        assert!(cart.persist().is_err());
    }

    #[test]
    fn test_custom_key() {
        let mut cart = CartStore::with_key(MemoryStorage::new(), "guestCart");
        cart.add(book("b1", "1"));

        assert_eq!(cart.key(), "guestCart");
        assert!(cart.storage().get("guestCart").unwrap().is_some());
        assert!(cart.storage().get(DEFAULT_CART_KEY).unwrap().is_none());
    }

    #[test]
    fn test_subscribers_see_events_after_mutation() {
        let seen: Rc<RefCell<Vec<(CartEvent, u32)>>> = Rc::default();
        let mut cart = CartStore::open(MemoryStorage::new());

        let sink = Rc::clone(&seen);
        cart.subscribe(move |event, items| {
            let total: u32 = items.iter().map(|i| i.quantity).sum();
            sink.borrow_mut().push((event.clone(), total));
        });

        cart.add(book("b1", "1"));
        cart.set_quantity("b1", 3);
        cart.remove("missing");
        cart.remove("b1");
        cart.clear();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 4);
        assert!(matches!(seen[0], (CartEvent::Added { quantity: 1, .. }, 1)));
        assert!(matches!(seen[1], (CartEvent::QuantityChanged { quantity: 3, .. }, 3)));
        assert!(matches!(seen[2], (CartEvent::Removed { .. }, 0)));
        assert!(matches!(seen[3], (CartEvent::Cleared, 0)));
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut cart = CartStore::open(MemoryStorage::new());

        let sink = Rc::clone(&count);
        let id = cart.subscribe(move |_, _| *sink.borrow_mut() += 1);
        cart.add(book("b1", "1"));

        assert!(cart.unsubscribe(id));
        assert!(!cart.unsubscribe(id));
        cart.add(book("b1", "1"));

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_checkout_empties_cart() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add(book("b1", "10.50"));
        cart.add(book("b1", "10.50"));

        let receipt = cart.checkout().unwrap();

        assert_eq!(receipt.total.to_string(), "21.00");
        assert!(cart.is_empty());
        assert!(CartStore::open(cart.into_storage()).is_empty());
    }

    #[test]
    fn test_checkout_empty_cart_does_not_notify() {
        let count = Rc::new(RefCell::new(0));
        let mut cart = CartStore::open(MemoryStorage::new());
        let sink = Rc::clone(&count);
        cart.subscribe(move |_, _| *sink.borrow_mut() += 1);

        assert_eq!(cart.checkout(), Err(CheckoutError::EmptyCart));
        assert_eq!(*count.borrow(), 0);
    }
}
