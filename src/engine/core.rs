// 8.0 engine/core.rs: the indexer. owns the store adapter and applies one event at a time.

use super::results::{IndexerError, IndexerStats, Outcome};
use crate::config::IndexerConfig;
use crate::events::ChainEvent;
use crate::global::{Global, OrdersMatchedGlobal, GLOBAL_KEY};
use crate::scale::CollateralScale;
use crate::store::{EntityStore, Record, StoreError, UnitOfWork};
use tracing::{debug, error};

/** 8.1: main indexer struct. every handler takes &mut self, so events never interleave */
#[derive(Debug)]
pub struct Indexer<S: EntityStore> {
    pub(super) config: IndexerConfig,
    pub(super) scale: CollateralScale,
    pub(super) store: S,
    pub(super) stats: IndexerStats,
}

impl<S: EntityStore> Indexer<S> {
    pub fn new(config: IndexerConfig, store: S) -> Result<Self, IndexerError> {
        config.validate()?;
        let scale = config.collateral_scale()?;
        Ok(Self {
            config,
            scale,
            store,
            stats: IndexerStats::default(),
        })
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn stats(&self) -> &IndexerStats {
        &self.stats
    }

    /// Applies one event. On error nothing of this event has been written.
    pub fn handle(&mut self, event: &ChainEvent) -> Result<Outcome, IndexerError> {
        debug!(kind = event.kind(), tx = %event.meta().transaction_hash, "handling event");

        let result = match event {
            ChainEvent::OrderFilled(e) => self.handle_order_filled(e).map(Outcome::Fill),
            ChainEvent::OrdersMatched(e) => self.handle_orders_matched(e).map(Outcome::Match),
            ChainEvent::TokenRegistered(e) => self.handle_token_registered(e).map(Outcome::Token),
            ChainEvent::ConditionPreparation(e) => self.handle_condition_preparation(e).map(Outcome::Condition),
            ChainEvent::ConditionResolution(e) => self.handle_condition_resolution(e).map(Outcome::Condition),
        };

        if let Err(e) = &result {
            self.stats.failed += 1;
            error!(kind = event.kind(), tx = %event.meta().transaction_hash, error = %e, "event dropped");
        }
        result
    }

    /// Applies a batch in order, stopping at the first failure.
    pub fn handle_all<'e, I>(&mut self, events: I) -> Result<Vec<Outcome>, IndexerError>
    where
        I: IntoIterator<Item = &'e ChainEvent>,
    {
        events.into_iter().map(|event| self.handle(event)).collect()
    }

    pub(super) fn commit(&mut self, records: Vec<Record>) -> Result<usize, StoreError> {
        let writes = records.len();
        if writes > 0 {
            self.store.commit(records)?;
        }
        Ok(writes)
    }
}

// get-or-create for the two singletons
pub(super) fn load_global<S: EntityStore + ?Sized>(uow: &UnitOfWork<'_, S>) -> Result<Global, StoreError> {
    Ok(uow.load::<Global>(GLOBAL_KEY)?.unwrap_or_default())
}

pub(super) fn load_orders_matched_global<S: EntityStore + ?Sized>(
    uow: &UnitOfWork<'_, S>,
) -> Result<OrdersMatchedGlobal, StoreError> {
    Ok(uow.load::<OrdersMatchedGlobal>(GLOBAL_KEY)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn rejects_invalid_config() {
        let config = IndexerConfig {
            collateral_decimals: 30,
            ..IndexerConfig::default()
        };
        let result = Indexer::new(config, MemoryStore::new());
        assert!(matches!(result, Err(IndexerError::Config(_))));
    }

    #[test]
    fn empty_commit_skips_store() {
        let mut indexer = Indexer::new(IndexerConfig::default(), MemoryStore::new()).unwrap();
        assert_eq!(indexer.commit(Vec::new()).unwrap(), 0);
        assert_eq!(indexer.store().commits(), 0);
        assert_eq!(indexer.stats().handled(), 0);
    }
}
