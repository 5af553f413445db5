//! Shared command context.

use crate::config::StorefrontConfig;
use crate::output::Output;
use anyhow::Result;
use mortar_commerce::money::Currency;
use mortar_store::{CartStore, FileStorage};
use std::path::PathBuf;

/// Everything a command needs: parsed storefront file, state location,
/// and the output handler.
pub struct Context {
    pub output: Output,
    pub storefront: StorefrontConfig,
    pub state_dir: PathBuf,
}

impl Context {
    pub fn new(output: Output, storefront: StorefrontConfig, state_dir: PathBuf) -> Self {
        Self {
            output,
            storefront,
            state_dir,
        }
    }

    pub fn currency(&self) -> Result<Currency> {
        self.storefront.currency()
    }

    /// Open the persisted cart for this state directory.
    pub fn open_store(&self) -> Result<CartStore<FileStorage>> {
        let currency = self.currency()?;
        Ok(CartStore::open(
            currency,
            FileStorage::new(self.state_dir.clone()),
        ))
    }
}
