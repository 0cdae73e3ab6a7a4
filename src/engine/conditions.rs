//! Condition lifecycle: Prepared → Resolved, once per condition id.

use super::core::{load_global, Indexer};
use super::results::{ConditionOutcome, ConditionTransition, IndexerError};
use crate::condition::{Condition, ConditionStatus};
use crate::events::{ConditionPreparation, ConditionResolution};
use crate::store::{EntityStore, UnitOfWork};
use tracing::{info, warn};

impl<S: EntityStore> Indexer<S> {
    pub fn handle_condition_preparation(
        &mut self,
        event: &ConditionPreparation,
    ) -> Result<ConditionOutcome, IndexerError> {
        let mut uow = UnitOfWork::new(&self.store);

        // redelivered preparation must not count the condition twice
        if uow.load::<Condition>(event.condition_id.as_str())?.is_some() {
            self.stats.skipped += 1;
            return Ok(ConditionOutcome {
                condition_id: event.condition_id.clone(),
                transition: ConditionTransition::AlreadyPrepared,
            });
        }

        let condition = Condition::prepare(
            event.condition_id.clone(),
            event.oracle.clone(),
            event.question_id.clone(),
            event.outcome_slot_count,
            event.meta.timestamp,
            event.meta.block_number,
        );
        uow.stage(&condition)?;

        let mut global = load_global(&uow)?;
        global.condition_prepared();
        uow.stage(&global)?;

        let records = uow.into_records();
        self.commit(records)?;
        self.stats.conditions_prepared += 1;

        info!(
            condition = %event.condition_id,
            oracle = %event.oracle,
            outcomes = event.outcome_slot_count,
            open = global.num_open_conditions,
            "condition prepared"
        );
        Ok(ConditionOutcome {
            condition_id: event.condition_id.clone(),
            transition: ConditionTransition::Prepared,
        })
    }

    pub fn handle_condition_resolution(
        &mut self,
        event: &ConditionResolution,
    ) -> Result<ConditionOutcome, IndexerError> {
        let mut uow = UnitOfWork::new(&self.store);

        let Some(mut condition) = uow.load::<Condition>(event.condition_id.as_str())? else {
            warn!(condition = %event.condition_id, "resolution for unknown condition, skipping");
            self.stats.skipped += 1;
            return Ok(ConditionOutcome {
                condition_id: event.condition_id.clone(),
                transition: ConditionTransition::Skipped,
            });
        };

        let previous = condition.resolve(
            event.payout_numerators.clone(),
            event.meta.timestamp,
            event.meta.transaction_hash.clone(),
        )?;
        uow.stage(&condition)?;

        let transition = match previous {
            ConditionStatus::Prepared => {
                let mut global = load_global(&uow)?;
                global.condition_resolved();
                uow.stage(&global)?;
                ConditionTransition::Resolved
            }
            ConditionStatus::Resolved => {
                warn!(condition = %event.condition_id, "condition resolved again, overwriting payouts");
                ConditionTransition::Reresolved
            }
        };

        let records = uow.into_records();
        self.commit(records)?;
        self.stats.conditions_resolved += 1;

        info!(
            condition = %event.condition_id,
            payouts = ?event.payout_numerators,
            "condition resolved"
        );
        Ok(ConditionOutcome {
            condition_id: event.condition_id.clone(),
            transition,
        })
    }
}
