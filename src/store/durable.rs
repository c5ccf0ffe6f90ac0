//! Durable bag store
//!
//! The live table plus an append-only journal. Every mutation appends to the
//! journal inside the same critical section that alters the table, so the
//! acknowledged state never runs ahead of what is on disk: a failed append
//! unwinds the in-memory change and surfaces a storage error.

use std::path::Path;
use std::sync::Mutex;

use uuid::Uuid;

use crate::model::{Bag, BagPatch, NewBag};

use super::errors::{StoreError, StoreResult};
use super::journal::{Journal, JournalRecord};
use super::table::BagTable;
use super::BagStore;

struct DurableInner {
    table: BagTable,
    journal: Journal,
}

/// Bag store that journals every mutation and rebuilds by replay on open.
pub struct DurableBagStore {
    inner: Mutex<DurableInner>,
}

impl DurableBagStore {
    /// Opens the store at `data_dir`, replaying any existing journal.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let (journal, records) = Journal::open(data_dir)?;

        let mut table = BagTable::new();
        for record in records {
            match record {
                JournalRecord::Put(bag) => table.restore(bag),
                JournalRecord::Delete(id) => {
                    table.remove(&id);
                }
            }
        }

        Ok(Self {
            inner: Mutex::new(DurableInner { table, journal }),
        })
    }

    /// Number of live bags after replay.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.table.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, DurableInner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Storage("bag store lock poisoned".to_string()))
    }
}

impl BagStore for DurableBagStore {
    fn list(&self) -> StoreResult<Vec<Bag>> {
        Ok(self.lock()?.table.list())
    }

    fn create(&self, new: NewBag) -> StoreResult<Bag> {
        let mut inner = self.lock()?;
        let bag = inner.table.create(new)?;

        if let Err(e) = inner.journal.append(&JournalRecord::Put(bag.clone())) {
            inner.table.remove(&bag.id);
            return Err(e);
        }
        Ok(bag)
    }

    fn update(&self, id: Uuid, patch: BagPatch) -> StoreResult<Bag> {
        let mut inner = self.lock()?;
        let prev = inner.table.get(&id).cloned().ok_or(StoreError::NotFound(id))?;
        let bag = inner.table.apply_patch(id, patch)?;

        if let Err(e) = inner.journal.append(&JournalRecord::Put(bag.clone())) {
            inner.table.restore(prev);
            return Err(e);
        }
        Ok(bag)
    }

    fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut inner = self.lock()?;
        let Some(prev) = inner.table.remove(&id) else {
            // Absent ids are acknowledged without touching the journal.
            return Ok(());
        };

        if let Err(e) = inner.journal.append(&JournalRecord::Delete(id)) {
            inner.table.restore(prev);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn new_bag(tag: &str) -> NewBag {
        NewBag {
            tag_number: tag.to_string(),
            passenger_name: "J. Doe".to_string(),
            flight_number: "AA100".to_string(),
            ..NewBag::default()
        }
    }

    #[test]
    fn test_open_on_fresh_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = DurableBagStore::open(tmp.path()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_mutations_survive_reopen() {
        let tmp = TempDir::new().unwrap();

        let kept_id = {
            let store = DurableBagStore::open(tmp.path()).unwrap();
            let kept = store.create(new_bag("AA000001")).unwrap();
            let dropped = store.create(new_bag("AA000002")).unwrap();
            store.delete(dropped.id).unwrap();
            kept.id
        };

        let store = DurableBagStore::open(tmp.path()).unwrap();
        let bags = store.list().unwrap();
        assert_eq!(bags.len(), 1);
        assert_eq!(bags[0].id, kept_id);
    }

    #[test]
    fn test_latest_record_wins_on_replay() {
        let tmp = TempDir::new().unwrap();

        let id = {
            let store = DurableBagStore::open(tmp.path()).unwrap();
            let bag = store.create(new_bag("AA000001")).unwrap();
            store
                .update(
                    bag.id,
                    BagPatch {
                        gate: Some("C14".to_string()),
                        ..BagPatch::default()
                    },
                )
                .unwrap();
            bag.id
        };

        let store = DurableBagStore::open(tmp.path()).unwrap();
        let bags = store.list().unwrap();
        assert_eq!(bags.len(), 1);
        assert_eq!(bags[0].id, id);
        assert_eq!(bags[0].gate, "C14");
    }

    #[test]
    fn test_duplicate_tag_enforced_across_reopen() {
        let tmp = TempDir::new().unwrap();
        {
            let store = DurableBagStore::open(tmp.path()).unwrap();
            store.create(new_bag("AA000001")).unwrap();
        }

        let store = DurableBagStore::open(tmp.path()).unwrap();
        let err = store.create(new_bag("AA000001")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateTag(_)));
    }
}
