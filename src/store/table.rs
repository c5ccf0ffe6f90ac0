//! In-memory bag table with a unique tag index
//!
//! Both store backings keep their live state here: a primary map keyed by id
//! and a tag index kept in lockstep with it. All write-time invariants
//! (required fields, tag uniqueness, tag immutability, timestamp monotonicity)
//! are enforced at this layer.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::model::{Bag, BagPatch, NewBag};

use super::errors::{StoreError, StoreResult};

/// Primary map plus unique tag index.
#[derive(Debug, Default)]
pub(crate) struct BagTable {
    bags: HashMap<Uuid, Bag>,
    tags: HashMap<String, Uuid>,
}

impl BagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live bags.
    pub fn len(&self) -> usize {
        self.bags.len()
    }

    pub fn get(&self, id: &Uuid) -> Option<&Bag> {
        self.bags.get(id)
    }

    /// All bags, most recently touched first.
    pub fn list(&self) -> Vec<Bag> {
        let mut bags: Vec<Bag> = self.bags.values().cloned().collect();
        bags.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        bags
    }

    /// Validates and inserts a new bag, assigning id and timestamps.
    ///
    /// The uniqueness check and the insertion happen in the same call under
    /// the caller's write lock; no two creates with the same tag can both
    /// succeed.
    pub fn create(&mut self, new: NewBag) -> StoreResult<Bag> {
        if let Some(field) = new.missing_required() {
            return Err(StoreError::Validation(format!("{} is required", field)));
        }
        if self.tags.contains_key(&new.tag_number) {
            return Err(StoreError::DuplicateTag(new.tag_number));
        }

        let now = Utc::now();
        let bag = Bag {
            id: Uuid::new_v4(),
            tag_number: new.tag_number,
            passenger_name: new.passenger_name,
            flight_number: new.flight_number,
            gate: new.gate,
            belt: new.belt,
            destination: new.destination,
            status: new.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        self.tags.insert(bag.tag_number.clone(), bag.id);
        self.bags.insert(bag.id, bag.clone());
        Ok(bag)
    }

    /// Merges supplied keys into an existing bag and re-stamps `updated_at`.
    ///
    /// A patch carrying a tag number different from the stored one is
    /// rejected; the identical value is a no-op.
    pub fn apply_patch(&mut self, id: Uuid, patch: BagPatch) -> StoreResult<Bag> {
        let bag = self.bags.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if let Some(tag) = patch.tag_number {
            if tag != bag.tag_number {
                return Err(StoreError::Validation(
                    "tagNumber is immutable after creation".to_string(),
                ));
            }
        }

        if let Some(name) = patch.passenger_name {
            bag.passenger_name = name;
        }
        if let Some(flight) = patch.flight_number {
            bag.flight_number = flight;
        }
        if let Some(gate) = patch.gate {
            bag.gate = gate;
        }
        if let Some(belt) = patch.belt {
            bag.belt = belt;
        }
        if let Some(destination) = patch.destination {
            bag.destination = destination;
        }
        if let Some(status) = patch.status {
            bag.status = status;
        }

        bag.updated_at = next_stamp(bag.updated_at);
        Ok(bag.clone())
    }

    /// Removes a bag if present. Absent ids are a no-op.
    pub fn remove(&mut self, id: &Uuid) -> Option<Bag> {
        let bag = self.bags.remove(id)?;
        self.tags.remove(&bag.tag_number);
        Some(bag)
    }

    /// Reinstates a bag verbatim, timestamps included. Used by journal
    /// replay and by rollback after a failed append; latest record wins.
    pub fn restore(&mut self, bag: Bag) {
        if let Some(prev) = self.bags.get(&bag.id) {
            self.tags.remove(&prev.tag_number);
        }
        self.tags.insert(bag.tag_number.clone(), bag.id);
        self.bags.insert(bag.id, bag);
    }
}

/// Next `updated_at` stamp: strictly greater than the previous one even when
/// the wall clock has not advanced.
fn next_stamp(prev: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > prev {
        now
    } else {
        prev + Duration::microseconds(1)
    }
}
