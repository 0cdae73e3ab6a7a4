//! Conditions and the token → condition mapping.
//!
//! A condition is prepared once and resolved at most once. Resolution fields stay
//! `None` until then. `MarketData` links a position token to its condition; a fill
//! on a token nobody registered yet creates it with an `Unknown` condition.

use crate::store::{Entity, Table};
use crate::types::{Address, Amount, AmountError, AssetId, BlockNumber, BlockTimestamp, ConditionId, QuestionId, TxHash};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    Prepared,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub id: ConditionId,
    pub oracle: Address,
    pub question_id: QuestionId,
    pub outcome_slot_count: u32,
    pub prepared_at: BlockTimestamp,
    pub prepared_block: BlockNumber,
    pub resolution_timestamp: Option<BlockTimestamp>,
    pub payout_numerators: Option<Vec<Amount>>,
    pub payout_denominator: Option<Amount>,
    pub resolution_hash: Option<TxHash>,
}

impl Condition {
    pub fn prepare(
        id: ConditionId,
        oracle: Address,
        question_id: QuestionId,
        outcome_slot_count: u32,
        prepared_at: BlockTimestamp,
        prepared_block: BlockNumber,
    ) -> Self {
        Self {
            id,
            oracle,
            question_id,
            outcome_slot_count,
            prepared_at,
            prepared_block,
            resolution_timestamp: None,
            payout_numerators: None,
            payout_denominator: None,
            resolution_hash: None,
        }
    }

    pub fn status(&self) -> ConditionStatus {
        if self.resolution_timestamp.is_some() {
            ConditionStatus::Resolved
        } else {
            ConditionStatus::Prepared
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.status() == ConditionStatus::Resolved
    }

    /// Writes the resolution. Returns the status held before the call so the
    /// caller only moves the open/closed counters on the first resolution.
    pub fn resolve(
        &mut self,
        payout_numerators: Vec<Amount>,
        timestamp: BlockTimestamp,
        resolution_hash: TxHash,
    ) -> Result<ConditionStatus, AmountError> {
        let previous = self.status();
        let denominator = payout_numerators
            .iter()
            .try_fold(Amount::ZERO, |acc, n| acc.checked_add(*n))?;

        self.payout_numerators = Some(payout_numerators);
        self.payout_denominator = Some(denominator);
        self.resolution_timestamp = Some(timestamp);
        self.resolution_hash = Some(resolution_hash);
        Ok(previous)
    }
}

impl Entity for Condition {
    const TABLE: Table = Table::Condition;

    fn id(&self) -> &str {
        self.id.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionRef {
    Unknown,
    Known(ConditionId),
}

impl ConditionRef {
    pub fn is_unknown(&self) -> bool {
        matches!(self, ConditionRef::Unknown)
    }

    pub fn condition_id(&self) -> Option<&ConditionId> {
        match self {
            ConditionRef::Known(id) => Some(id),
            ConditionRef::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketData {
    pub id: AssetId,
    pub condition: ConditionRef,
    pub outcome_index: Option<u32>,
}

impl MarketData {
    pub fn registered(token_id: AssetId, condition_id: ConditionId) -> Self {
        Self {
            id: token_id,
            condition: ConditionRef::Known(condition_id),
            outcome_index: None,
        }
    }

    pub fn placeholder(token_id: AssetId) -> Self {
        Self {
            id: token_id,
            condition: ConditionRef::Unknown,
            outcome_index: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.condition.is_unknown()
    }
}

impl Entity for MarketData {
    const TABLE: Table = Table::MarketData;

    fn id(&self) -> &str {
        self.id.as_str()
    }
}
