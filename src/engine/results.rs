// 8.0.2: outcome types and errors for event handling.

use crate::config::ConfigError;
use crate::store::StoreError;
use crate::types::{Amount, AmountError, AssetId, ConditionId, TradeSide};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Fill(FillOutcome),
    Match(MatchOutcome),
    Token(TokenOutcome),
    Condition(ConditionOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillOutcome {
    pub event_id: String,
    pub token_id: AssetId,
    pub side: TradeSide,
    pub size: Amount,
    pub scaled_size: Decimal,
    pub price: Decimal,
    pub created_orderbook: bool,
    pub created_placeholder: bool,
    pub new_accounts: u32,
    pub writes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub event_id: String,
    pub writes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOutcome {
    pub condition_id: ConditionId,
    pub created: Vec<AssetId>,
    pub reconciled: Vec<AssetId>,
    /// placeholders left untouched because reconciliation is off
    pub unreconciled: Vec<AssetId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionTransition {
    Prepared,
    /// preparation for a condition that already exists: nothing written
    AlreadyPrepared,
    Resolved,
    /// resolution for an already resolved condition: fields overwritten, counters untouched
    Reresolved,
    /// resolution for a condition we never saw prepared: dropped
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionOutcome {
    pub condition_id: ConditionId,
    pub transition: ConditionTransition,
}

/// Running counters over everything the indexer has handled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexerStats {
    pub fills: u64,
    pub matches: u64,
    pub tokens_registered: u64,
    pub conditions_prepared: u64,
    pub conditions_resolved: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl IndexerStats {
    pub fn handled(&self) -> u64 {
        self.fills
            + self.matches
            + self.tokens_registered
            + self.conditions_prepared
            + self.conditions_resolved
            + self.skipped
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexerError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Amount error: {0}")]
    Amount(#[from] AmountError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
