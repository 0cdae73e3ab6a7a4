//! Token registration: links both position tokens of a condition to it.

use super::core::Indexer;
use super::results::{IndexerError, TokenOutcome};
use crate::condition::{ConditionRef, MarketData};
use crate::events::TokenRegistered;
use crate::store::{EntityStore, UnitOfWork};
use tracing::{debug, warn};

impl<S: EntityStore> Indexer<S> {
    /// Creates market data for each token that has none. Existing rows are kept,
    /// except placeholders when `reconcile_placeholders` is on.
    pub fn handle_token_registered(&mut self, event: &TokenRegistered) -> Result<TokenOutcome, IndexerError> {
        let reconcile = self.config.reconcile_placeholders;
        let mut outcome = TokenOutcome {
            condition_id: event.condition_id.clone(),
            created: Vec::new(),
            reconciled: Vec::new(),
            unreconciled: Vec::new(),
        };

        let mut uow = UnitOfWork::new(&self.store);

        for token in [&event.token0, &event.token1] {
            match uow.load::<MarketData>(token.as_str())? {
                None => {
                    uow.stage(&MarketData::registered(token.clone(), event.condition_id.clone()))?;
                    outcome.created.push(token.clone());
                }
                Some(mut existing) if existing.is_placeholder() => {
                    if reconcile {
                        existing.condition = ConditionRef::Known(event.condition_id.clone());
                        uow.stage(&existing)?;
                        outcome.reconciled.push(token.clone());
                    } else {
                        warn!(
                            token = %token,
                            condition = %event.condition_id,
                            "registered token has placeholder market data, leaving it unreconciled"
                        );
                        outcome.unreconciled.push(token.clone());
                    }
                }
                Some(_) => {}
            }
        }

        let records = uow.into_records();
        self.commit(records)?;
        self.stats.tokens_registered += 1;

        debug!(
            condition = %event.condition_id,
            created = outcome.created.len(),
            reconciled = outcome.reconciled.len(),
            "token registered"
        );
        Ok(outcome)
    }
}
