//! In-process store adapter. Backs the demo binary and the tests.

use super::{Entity, EntityStore, Record, StoreError, Table};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    rows: HashMap<(Table, String), serde_json::Value>,
    commits: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typed read, for callers outside the engine.
    pub fn get<E: Entity>(&self, key: &str) -> Result<Option<E>, StoreError> {
        match self.load(E::TABLE, key)? {
            Some(record) => record.decode().map(Some),
            None => Ok(None),
        }
    }

    pub fn count(&self, table: Table) -> usize {
        self.rows.keys().filter(|(t, _)| *t == table).count()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of committed event batches.
    pub fn commits(&self) -> u64 {
        self.commits
    }
}

impl EntityStore for MemoryStore {
    fn load(&self, table: Table, key: &str) -> Result<Option<Record>, StoreError> {
        Ok(self.rows.get(&(table, key.to_string())).map(|body| Record {
            table,
            key: key.to_string(),
            body: body.clone(),
        }))
    }

    fn save(&mut self, record: Record) -> Result<(), StoreError> {
        self.rows.insert((record.table, record.key), record.body);
        Ok(())
    }

    // inserts cannot fail here, so the batch is applied whole
    fn commit(&mut self, records: Vec<Record>) -> Result<(), StoreError> {
        for record in records {
            self.rows.insert((record.table, record.key), record.body);
        }
        self.commits += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(table: Table, key: &str, value: u32) -> Record {
        Record {
            table,
            key: key.to_string(),
            body: json!({ "value": value }),
        }
    }

    #[test]
    fn save_is_upsert() {
        let mut store = MemoryStore::new();
        store.save(row(Table::Account, "a", 1)).unwrap();
        store.save(row(Table::Account, "a", 2)).unwrap();

        assert_eq!(store.count(Table::Account), 1);
        let loaded = store.load(Table::Account, "a").unwrap().unwrap();
        assert_eq!(loaded.body, json!({ "value": 2 }));
    }

    #[test]
    fn tables_are_separate_namespaces() {
        let mut store = MemoryStore::new();
        store.save(row(Table::Orderbook, "123", 1)).unwrap();
        store.save(row(Table::MarketData, "123", 2)).unwrap();

        assert_eq!(store.count(Table::Orderbook), 1);
        assert_eq!(store.count(Table::MarketData), 1);
        assert!(store.load(Table::Account, "123").unwrap().is_none());
    }

    #[test]
    fn commit_counts_batches() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        store
            .commit(vec![row(Table::Global, "", 1), row(Table::Account, "b", 3)])
            .unwrap();
        assert_eq!(store.commits(), 1);
        assert_eq!(store.count(Table::Global), 1);
    }
}
