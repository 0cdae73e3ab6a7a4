// exchange-stats: trade statistics for a conditional-token exchange.
// consumes decoded on-chain events, writes derived aggregates through a keyed store.
// all computation is deterministic; the only I/O is the store adapter.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: Address, AssetId, Amount, BlockTimestamp, TradeSide
//   1.5  scale.rs: fixed-point collateral scaling, price and average math
//   2.x  classify.rs: buy/sell side and notional size of a fill
//   3.x  events.rs: decoded input events + ChainEvent dispatch enum
//   4.x  store/: entity tables, store adapter trait, in-memory store, unit of work
//   5.x  orderbook.rs: per-market running totals (TradeTally)
//   5.2  global.rs: exchange-wide singletons (Global, OrdersMatchedGlobal)
//   5.3  account.rs: per-address trading history
//   5.4  condition.rs: condition lifecycle + token market data
//   6.x  records.rs: immutable fill / match event rows
//   7.x  config.rs: collateral decimals, placeholder policy, env loading
//   8.x  engine/: the indexer: per-event handlers, outcomes, errors

pub mod account;
pub mod classify;
pub mod condition;
pub mod config;
pub mod engine;
pub mod events;
pub mod global;
pub mod orderbook;
pub mod records;
pub mod scale;
pub mod store;
pub mod types;

// re exports for convenience
pub use account::*;
pub use classify::*;
pub use condition::*;
pub use config::{ConfigError, IndexerConfig};
pub use engine::*;
pub use events::*;
pub use global::*;
pub use orderbook::*;
pub use records::*;
pub use scale::*;
pub use store::{Entity, EntityStore, MemoryStore, Record, StoreError, Table, UnitOfWork};
pub use types::*;
