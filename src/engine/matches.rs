//! Orders-matched batch handling.

use super::core::{load_orders_matched_global, Indexer};
use super::results::{IndexerError, MatchOutcome};
use crate::events::OrdersMatched;
use crate::records::OrdersMatchedRecord;
use crate::store::{EntityStore, UnitOfWork};
use tracing::debug;

impl<S: EntityStore> Indexer<S> {
    /// Records the batch and counts it as one trade on the orders-matched global.
    /// Volume is not added here; the individual fills of the batch carry it.
    pub fn handle_orders_matched(&mut self, event: &OrdersMatched) -> Result<MatchOutcome, IndexerError> {
        let mut uow = UnitOfWork::new(&self.store);

        let record = OrdersMatchedRecord::from_event(event);
        uow.stage(&record)?;

        let mut matched_global = load_orders_matched_global(&uow)?;
        matched_global.record_match()?;
        uow.stage(&matched_global)?;

        let records = uow.into_records();
        let writes = self.commit(records)?;
        self.stats.matches += 1;

        debug!(id = %record.id, trades = matched_global.tally.trades_quantity, "orders matched");

        Ok(MatchOutcome {
            event_id: record.id,
            writes,
        })
    }
}
