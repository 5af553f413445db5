//! Persisted, observable cart state for Mortar storefronts.
//!
//! The store owns a `Cart` from `mortar-commerce` and adds the two things
//! a UI needs around it: persistence across sessions and change
//! notification. Persistence is a pluggable port (`CartStorage`) with
//! memory, file, and null backends, so the reducer logic can be exercised
//! against any medium.
//!
//! # Example
//!
//! ```
//! use mortar_commerce::prelude::*;
//! use mortar_store::{CartStore, MemoryStorage};
//!
//! let product = Product::new(
//!     "CEM-425",
//!     "Portland Cement 42.5 25kg",
//!     "portland-cement-425",
//!     Money::new(45000, Currency::USD),
//! )
//! .with_stock(150);
//!
//! let mut store = CartStore::open(Currency::USD, MemoryStorage::new());
//! store.subscribe(|cart| println!("{} items in cart", cart.item_count()));
//! store.add(product.to_line_seed(), 2);
//! assert_eq!(store.item_count(), 2);
//! ```

mod error;
mod storage;
mod store;

pub use error::StoreError;
pub use storage::{CartStorage, FileStorage, MemoryStorage, NullStorage, CART_KEY};
pub use store::{CartStore, Subscriber};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CartStorage, CartStore, FileStorage, MemoryStorage, NullStorage, StoreError};
}
