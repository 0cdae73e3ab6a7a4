// 4.0: keyed-record store contract. every entity lives in a named table under a string key.
// the core only loads, computes next state, and hands records back to the adapter.

mod memory;
mod unit_of_work;

pub use memory::MemoryStore;
pub use unit_of_work::UnitOfWork;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Table {
    OrderFilledEvent,
    OrdersMatchedEvent,
    Orderbook,
    Global,
    OrdersMatchedGlobal,
    Account,
    Condition,
    MarketData,
}

impl Table {
    pub const ALL: [Table; 8] = [
        Table::OrderFilledEvent,
        Table::OrdersMatchedEvent,
        Table::Orderbook,
        Table::Global,
        Table::OrdersMatchedGlobal,
        Table::Account,
        Table::Condition,
        Table::MarketData,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::OrderFilledEvent => "OrderFilledEvent",
            Table::OrdersMatchedEvent => "OrdersMatchedEvent",
            Table::Orderbook => "Orderbook",
            Table::Global => "Global",
            Table::OrdersMatchedGlobal => "OrdersMatchedGlobal",
            Table::Account => "Account",
            Table::Condition => "Condition",
            Table::MarketData => "MarketData",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A persisted entity: one row of one table.
pub trait Entity: Serialize + DeserializeOwned {
    const TABLE: Table;

    fn id(&self) -> &str;
}

/// Untyped row as the adapter sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub table: Table,
    pub key: String,
    pub body: serde_json::Value,
}

impl Record {
    pub fn from_entity<E: Entity>(entity: &E) -> Result<Self, StoreError> {
        let body = serde_json::to_value(entity).map_err(|e| StoreError::Serialization {
            table: E::TABLE,
            key: entity.id().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            table: E::TABLE,
            key: entity.id().to_string(),
            body,
        })
    }

    pub fn decode<E: Entity>(&self) -> Result<E, StoreError> {
        serde_json::from_value(self.body.clone()).map_err(|e| StoreError::Corrupt {
            table: self.table,
            key: self.key.clone(),
            reason: e.to_string(),
        })
    }
}

/// Adapter over the external keyed-record store.
pub trait EntityStore {
    fn load(&self, table: Table, key: &str) -> Result<Option<Record>, StoreError>;

    /// Upsert.
    fn save(&mut self, record: Record) -> Result<(), StoreError>;

    /// Persists every write of one event. Adapters with transactions should
    /// override this so the batch lands all-or-nothing.
    fn commit(&mut self, records: Vec<Record>) -> Result<(), StoreError> {
        for record in records {
            self.save(record)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Failed to serialize {table} {key:?}: {reason}")]
    Serialization { table: Table, key: String, reason: String },

    #[error("Corrupt record {table} {key:?}: {reason}")]
    Corrupt { table: Table, key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Probe {
        id: String,
        value: u32,
    }

    impl Entity for Probe {
        const TABLE: Table = Table::Account;

        fn id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn record_round_trip() {
        let probe = Probe { id: "0xabc".to_string(), value: 7 };
        let record = Record::from_entity(&probe).unwrap();
        assert_eq!(record.table, Table::Account);
        assert_eq!(record.key, "0xabc");
        assert_eq!(record.decode::<Probe>().unwrap(), probe);
    }

    #[test]
    fn decoding_wrong_shape_is_corrupt() {
        let record = Record {
            table: Table::Account,
            key: "0xabc".to_string(),
            body: serde_json::json!({ "id": "0xabc", "value": "not a number" }),
        };
        let result = record.decode::<Probe>();
        assert!(matches!(result, Err(StoreError::Corrupt { table: Table::Account, .. })));
    }

    #[test]
    fn table_names() {
        assert_eq!(Table::OrdersMatchedGlobal.to_string(), "OrdersMatchedGlobal");
        assert_eq!(Table::ALL.len(), 8);
    }
}
