// 3.0: decoded exchange and conditional-token events, as delivered by the log reader.
// block metadata arrives already parsed; the ChainEvent enum lists every kind we consume.

use crate::types::{Address, Amount, AssetId, BlockNumber, BlockTimestamp, ConditionId, OrderHash, QuestionId, TxHash};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMeta {
    pub timestamp: BlockTimestamp,
    pub block_number: BlockNumber,
    pub transaction_hash: TxHash,
}

impl BlockMeta {
    pub fn new(timestamp: BlockTimestamp, block_number: BlockNumber, transaction_hash: TxHash) -> Self {
        Self {
            timestamp,
            block_number,
            transaction_hash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilled {
    pub meta: BlockMeta,
    pub order_hash: OrderHash,
    pub maker: Address,
    pub taker: Address,
    pub maker_asset_id: AssetId,
    pub taker_asset_id: AssetId,
    pub maker_amount_filled: Amount,
    pub taker_amount_filled: Amount,
    pub fee: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersMatched {
    pub meta: BlockMeta,
    pub maker_asset_id: AssetId,
    pub taker_asset_id: AssetId,
    pub maker_amount_filled: Amount,
    pub taker_amount_filled: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRegistered {
    pub meta: BlockMeta,
    pub token0: AssetId,
    pub token1: AssetId,
    pub condition_id: ConditionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionPreparation {
    pub meta: BlockMeta,
    pub condition_id: ConditionId,
    pub oracle: Address,
    pub question_id: QuestionId,
    pub outcome_slot_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionResolution {
    pub meta: BlockMeta,
    pub condition_id: ConditionId,
    pub payout_numerators: Vec<Amount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainEvent {
    OrderFilled(OrderFilled),
    OrdersMatched(OrdersMatched),
    TokenRegistered(TokenRegistered),
    ConditionPreparation(ConditionPreparation),
    ConditionResolution(ConditionResolution),
}

impl ChainEvent {
    pub fn meta(&self) -> &BlockMeta {
        match self {
            ChainEvent::OrderFilled(e) => &e.meta,
            ChainEvent::OrdersMatched(e) => &e.meta,
            ChainEvent::TokenRegistered(e) => &e.meta,
            ChainEvent::ConditionPreparation(e) => &e.meta,
            ChainEvent::ConditionResolution(e) => &e.meta,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChainEvent::OrderFilled(_) => "order_filled",
            ChainEvent::OrdersMatched(_) => "orders_matched",
            ChainEvent::TokenRegistered(_) => "token_registered",
            ChainEvent::ConditionPreparation(_) => "condition_preparation",
            ChainEvent::ConditionResolution(_) => "condition_resolution",
        }
    }
}
