//! Bag store
//!
//! Authoritative collection of bag records. Two backings behind one trait:
//! an in-memory table for tests and ephemeral instances, and a durable store
//! that journals every mutation and rebuilds by replay on open.
//!
//! Write-time invariants, enforced for both backings:
//! - `tagNumber` is unique; the check is atomic with insertion
//! - `tagNumber` cannot change after creation
//! - `updatedAt` strictly increases on every successful update

mod durable;
mod errors;
mod journal;
mod memory;
mod table;

pub use durable::DurableBagStore;
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryBagStore;

use uuid::Uuid;

use crate::model::{Bag, BagPatch, NewBag};

/// Collection operations over bag records.
pub trait BagStore: Send + Sync {
    /// All bags, ordered by `updatedAt` descending.
    fn list(&self) -> StoreResult<Vec<Bag>>;

    /// Validates, assigns id and timestamps, persists, returns the record.
    fn create(&self, new: NewBag) -> StoreResult<Bag>;

    /// Merges supplied keys into the record and re-stamps `updatedAt`.
    fn update(&self, id: Uuid, patch: BagPatch) -> StoreResult<Bag>;

    /// Removes the record; acknowledged even when the id does not exist.
    fn delete(&self, id: Uuid) -> StoreResult<()>;
}
