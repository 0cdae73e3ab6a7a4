//! Per-event write buffer.
//!
//! Handlers read and stage through a `UnitOfWork` so that one event's writes
//! reach the store together, or not at all if any step fails first. Reads see
//! earlier staged writes of the same event (a self-trade touches one account twice).

use super::{Entity, EntityStore, Record, StoreError, Table};
use std::collections::HashMap;

pub struct UnitOfWork<'a, S: EntityStore + ?Sized> {
    store: &'a S,
    staged: Vec<Record>,
    index: HashMap<(Table, String), usize>,
}

impl<'a, S: EntityStore + ?Sized> UnitOfWork<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            staged: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn load<E: Entity>(&self, key: &str) -> Result<Option<E>, StoreError> {
        if let Some(&slot) = self.index.get(&(E::TABLE, key.to_string())) {
            return self.staged[slot].decode().map(Some);
        }
        match self.store.load(E::TABLE, key)? {
            Some(record) => record.decode().map(Some),
            None => Ok(None),
        }
    }

    /// Stages an upsert. A later stage of the same key replaces the earlier one in place.
    pub fn stage<E: Entity>(&mut self, entity: &E) -> Result<(), StoreError> {
        let record = Record::from_entity(entity)?;
        let slot_key = (record.table, record.key.clone());
        match self.index.get(&slot_key) {
            Some(&slot) => self.staged[slot] = record,
            None => {
                self.index.insert(slot_key, self.staged.len());
                self.staged.push(record);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.staged
    }
}
