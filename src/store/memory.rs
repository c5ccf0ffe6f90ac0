//! In-memory bag store
//!
//! Backs tests and ephemeral instances; nothing survives the process.

use std::sync::RwLock;

use uuid::Uuid;

use crate::model::{Bag, BagPatch, NewBag};

use super::errors::{StoreError, StoreResult};
use super::table::BagTable;
use super::BagStore;

/// Bag store held entirely in memory behind a read-write lock.
#[derive(Debug, Default)]
pub struct MemoryBagStore {
    table: RwLock<BagTable>,
}

impl MemoryBagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BagStore for MemoryBagStore {
    fn list(&self) -> StoreResult<Vec<Bag>> {
        let table = self
            .table
            .read()
            .map_err(|_| StoreError::Storage("bag table lock poisoned".to_string()))?;
        Ok(table.list())
    }

    fn create(&self, new: NewBag) -> StoreResult<Bag> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StoreError::Storage("bag table lock poisoned".to_string()))?;
        table.create(new)
    }

    fn update(&self, id: Uuid, patch: BagPatch) -> StoreResult<Bag> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StoreError::Storage("bag table lock poisoned".to_string()))?;
        table.apply_patch(id, patch)
    }

    fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StoreError::Storage("bag table lock poisoned".to_string()))?;
        table.remove(&id);
        Ok(())
    }
}
