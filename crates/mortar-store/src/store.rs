//! The observable cart store.
//!
//! `CartStore` is the single writer for one shopper's cart: mutations are
//! applied synchronously to the in-memory `Cart`, then persisted
//! fire-and-forget, then announced to subscribers. A mutation is complete
//! as soon as the in-memory state is updated; persistence failures degrade
//! the store to memory-only for the rest of the session and are only
//! logged.

use crate::storage::CartStorage;
use mortar_commerce::cart::{Cart, LineSeed};
use mortar_commerce::ids::ProductId;
use mortar_commerce::money::{Currency, Money};
use tracing::warn;

/// Callback invoked with the updated cart after every mutation.
pub type Subscriber = Box<dyn Fn(&Cart)>;

/// A persisted, observable shopping cart.
pub struct CartStore<S: CartStorage> {
    cart: Cart,
    storage: S,
    subscribers: Vec<Subscriber>,
}

impl<S: CartStorage> CartStore<S> {
    /// Open a store, rehydrating from the storage backend.
    ///
    /// Hydration is best-effort: a missing snapshot yields an empty cart,
    /// and a corrupt or unreadable one is logged and treated the same way.
    /// Opening never fails.
    pub fn open(currency: Currency, storage: S) -> Self {
        let cart = match storage.load() {
            Ok(Some(lines)) => Cart::from_lines(lines, currency),
            Ok(None) => Cart::new(currency),
            Err(err) => {
                warn!(error = %err, "discarding unreadable cart snapshot");
                Cart::new(currency)
            }
        };

        Self {
            cart,
            storage,
            subscribers: Vec::new(),
        }
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Derived subtotal; what the cart page and checkout read.
    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    /// Derived unit count; what the header badge reads.
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Register an observer called after every mutation.
    pub fn subscribe(&mut self, f: impl Fn(&Cart) + 'static) {
        self.subscribers.push(Box::new(f));
    }

    /// Add a product to the cart (merge-on-add, clamped).
    pub fn add(&mut self, seed: LineSeed, quantity: i64) {
        self.cart.add(seed, quantity);
        self.persist();
        self.notify();
    }

    /// Set a line's quantity; zero or less removes the line.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        self.cart.set_quantity(product_id, quantity);
        self.persist();
        self.notify();
    }

    /// Remove a line. Returns whether one was removed; removing an absent
    /// product still counts as a (no-op) mutation for persistence and
    /// notification purposes.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let removed = self.cart.remove(product_id);
        self.persist();
        self.notify();
        removed
    }

    /// Empty the cart and drop the persisted snapshot. Used after a
    /// successful order submission.
    pub fn clear(&mut self) {
        self.cart.clear();
        if let Err(err) = self.storage.clear() {
            warn!(error = %err, "failed to clear persisted cart");
        }
        self.notify();
    }

    fn persist(&self) {
        if let Err(err) = self.storage.save(&self.cart.lines) {
            warn!(error = %err, "failed to persist cart; continuing in memory");
        }
    }

    fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber(&self.cart);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, NullStorage};
    use mortar_commerce::money::Money;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn seed(id: &str, price_cents: i64, max: Option<i64>) -> LineSeed {
        LineSeed {
            product_id: ProductId::new(id),
            name: format!("Product {}", id),
            brand: None,
            image: None,
            slug: None,
            unit_price: Money::new(price_cents, Currency::USD),
            max_quantity: max,
        }
    }

    #[test]
    fn test_opens_empty_without_snapshot() {
        let store = CartStore::open(Currency::USD, MemoryStorage::new());
        assert!(store.is_empty());
        assert_eq!(store.item_count(), 0);
        assert_eq!(store.subtotal().amount_cents, 0);
    }

    #[test]
    fn test_mutations_are_persisted() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = CartStore::open(Currency::USD, Rc::clone(&storage));

        store.add(seed("p1", 450, Some(150)), 2);

        let persisted = storage.load().unwrap().unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].quantity, 2);
    }

    #[test]
    fn test_rehydrates_from_snapshot() {
        let storage = Rc::new(MemoryStorage::new());
        {
            let mut store = CartStore::open(Currency::USD, Rc::clone(&storage));
            store.add(seed("p1", 450, Some(150)), 2);
            store.add(seed("p2", 120, None), 10);
        }

        let store = CartStore::open(Currency::USD, Rc::clone(&storage));
        assert_eq!(store.item_count(), 12);
        assert_eq!(store.subtotal().amount_cents, 2 * 450 + 10 * 120);
    }

    #[test]
    fn test_corrupt_snapshot_yields_empty_cart() {
        let storage = MemoryStorage::with_raw("][ not json");
        let store = CartStore::open(Currency::USD, storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_failure_degrades_silently() {
        // NullStorage accepts writes and forgets them; the store keeps
        // working on in-memory state regardless of the backend.
        let mut store = CartStore::open(Currency::USD, NullStorage::new());
        store.add(seed("p1", 450, None), 3);
        assert_eq!(store.item_count(), 3);
    }

    #[test]
    fn test_subscriber_sees_every_mutation() {
        let observed: Rc<RefCell<Vec<(i64, i64)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&observed);

        let mut store = CartStore::open(Currency::USD, MemoryStorage::new());
        store.subscribe(move |cart| {
            sink.borrow_mut()
                .push((cart.item_count(), cart.subtotal().amount_cents));
        });

        store.add(seed("p1", 450, Some(150)), 2);
        store.set_quantity(&ProductId::new("p1"), 5);
        store.remove(&ProductId::new("p1"));
        store.clear();

        // Totals are already consistent at notification time.
        assert_eq!(
            *observed.borrow(),
            vec![(2, 900), (5, 2250), (0, 0), (0, 0)]
        );
    }

    #[test]
    fn test_clear_drops_snapshot() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = CartStore::open(Currency::USD, Rc::clone(&storage));

        store.add(seed("p1", 450, None), 2);
        assert!(storage.load().unwrap().is_some());

        store.clear();
        assert!(storage.load().unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_absent_reports_false() {
        let mut store = CartStore::open(Currency::USD, MemoryStorage::new());
        store.add(seed("p1", 450, None), 1);
        assert!(!store.remove(&ProductId::new("ghost")));
        assert_eq!(store.item_count(), 1);
    }
}
