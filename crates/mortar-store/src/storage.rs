//! Cart persistence backends.
//!
//! The cart snapshot is a JSON array of `CartLine` objects (quantities
//! included, derived totals excluded) stored under a single `"cart"` key.
//! Backends only move bytes; hydration and invariant repair happen in the
//! store.

use crate::StoreError;
use mortar_commerce::cart::CartLine;
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

/// Key / file stem the cart snapshot is stored under.
pub const CART_KEY: &str = "cart";

/// Port for persisting the cart's line list.
///
/// `load` returns `Ok(None)` when no snapshot exists. A snapshot that
/// exists but cannot be parsed is an error; the store treats it the same
/// as no snapshot.
pub trait CartStorage {
    /// Load the persisted line list, if any.
    fn load(&self) -> Result<Option<Vec<CartLine>>, StoreError>;

    /// Persist the line list, replacing any previous snapshot.
    fn save(&self, lines: &[CartLine]) -> Result<(), StoreError>;

    /// Delete the snapshot.
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    snapshot: RefCell<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with a raw snapshot string (may be invalid JSON,
    /// for exercising the corrupt-snapshot path).
    pub fn with_raw(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: RefCell::new(Some(snapshot.into())),
        }
    }

    /// The raw stored snapshot, if any.
    pub fn raw(&self) -> Option<String> {
        self.snapshot.borrow().clone()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<CartLine>>, StoreError> {
        match self.snapshot.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StoreError> {
        let json = serde_json::to_string(lines)?;
        *self.snapshot.borrow_mut() = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.snapshot.borrow_mut() = None;
        Ok(())
    }
}

/// File-backed storage: one JSON file (`<dir>/cart.json`).
///
/// Writes go to a temp file first and are renamed into place so a crash
/// mid-write cannot leave a truncated snapshot.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at a directory. The directory is created on
    /// first save, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", CART_KEY))
    }

    fn tmp_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json.tmp", CART_KEY))
    }
}

impl CartStorage for FileStorage {
    fn load(&self) -> Result<Option<Vec<CartLine>>, StoreError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(lines)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, self.path())?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Storage that remembers nothing and never fails.
///
/// The degrade target when no persistence medium is available: the cart
/// behaves normally for the session and starts empty next time.
#[derive(Default)]
pub struct NullStorage;

impl NullStorage {
    pub fn new() -> Self {
        Self
    }
}

impl CartStorage for NullStorage {
    fn load(&self) -> Result<Option<Vec<CartLine>>, StoreError> {
        Ok(None)
    }

    fn save(&self, _lines: &[CartLine]) -> Result<(), StoreError> {
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// Allows sharing a backend between a store and the code inspecting it.
impl<S: CartStorage> CartStorage for std::rc::Rc<S> {
    fn load(&self) -> Result<Option<Vec<CartLine>>, StoreError> {
        (**self).load()
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StoreError> {
        (**self).save(lines)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortar_commerce::ids::ProductId;
    use mortar_commerce::money::{Currency, Money};

    fn line(id: &str, quantity: i64) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            name: format!("Product {}", id),
            brand: None,
            image: None,
            slug: None,
            unit_price: Money::new(450, Currency::USD),
            quantity,
            max_quantity: Some(150),
        }
    }

    #[test]
    fn test_memory_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_none());

        let lines = vec![line("p1", 2), line("p2", 5)];
        storage.save(&lines).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded, lines);
    }

    #[test]
    fn test_memory_clear() {
        let storage = MemoryStorage::new();
        storage.save(&[line("p1", 1)]).unwrap();
        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_memory_corrupt_snapshot_is_error() {
        let storage = MemoryStorage::with_raw("{not json");
        assert!(matches!(storage.load(), Err(StoreError::Serialize(_))));
    }

    #[test]
    fn test_snapshot_excludes_derived_totals() {
        let storage = MemoryStorage::new();
        storage.save(&[line("p1", 2)]).unwrap();
        let raw = storage.raw().unwrap();

        assert!(raw.contains("\"quantity\":2"));
        assert!(!raw.contains("total"));
        assert!(!raw.contains("count"));
    }

    #[test]
    fn test_null_storage_remembers_nothing() {
        let storage = NullStorage::new();
        storage.save(&[line("p1", 1)]).unwrap();
        assert!(storage.load().unwrap().is_none());
    }
}
