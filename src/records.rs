// 6.0: immutable event records. one row per raw fill / match, never updated.
// ids are deterministic, so a redelivered event maps onto the same row.

use crate::classify::{classify_side, fill_price};
use crate::events::{OrderFilled, OrdersMatched};
use crate::store::{Entity, Table};
use crate::types::{Address, Amount, AmountError, AssetId, BlockNumber, BlockTimestamp, OrderHash, TradeSide, TxHash};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub fn order_filled_id(transaction_hash: &TxHash, order_hash: &OrderHash) -> String {
    format!("{}_{}", transaction_hash, order_hash)
}

pub fn orders_matched_id(transaction_hash: &TxHash) -> String {
    transaction_hash.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilledRecord {
    pub id: String,
    pub transaction_hash: TxHash,
    pub timestamp: BlockTimestamp,
    pub block_number: BlockNumber,
    pub order_hash: OrderHash,
    pub maker: Address,
    pub taker: Address,
    pub maker_asset_id: AssetId,
    pub taker_asset_id: AssetId,
    pub maker_amount_filled: Amount,
    pub taker_amount_filled: Amount,
    pub fee: Amount,
    pub side: TradeSide,
    /// taker / maker, zero when the maker amount is zero
    pub price: Decimal,
}

impl OrderFilledRecord {
    pub fn from_event(event: &OrderFilled) -> Result<Self, AmountError> {
        Ok(Self {
            id: order_filled_id(&event.meta.transaction_hash, &event.order_hash),
            transaction_hash: event.meta.transaction_hash.clone(),
            timestamp: event.meta.timestamp,
            block_number: event.meta.block_number,
            order_hash: event.order_hash.clone(),
            maker: event.maker.clone(),
            taker: event.taker.clone(),
            maker_asset_id: event.maker_asset_id.clone(),
            taker_asset_id: event.taker_asset_id.clone(),
            maker_amount_filled: event.maker_amount_filled,
            taker_amount_filled: event.taker_amount_filled,
            fee: event.fee,
            side: classify_side(&event.maker_asset_id),
            price: fill_price(event.maker_amount_filled, event.taker_amount_filled)?,
        })
    }
}

impl Entity for OrderFilledRecord {
    const TABLE: Table = Table::OrderFilledEvent;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersMatchedRecord {
    pub id: String,
    pub timestamp: BlockTimestamp,
    pub block_number: BlockNumber,
    pub maker_asset_id: AssetId,
    pub taker_asset_id: AssetId,
    pub maker_amount_filled: Amount,
    pub taker_amount_filled: Amount,
}

impl OrdersMatchedRecord {
    pub fn from_event(event: &OrdersMatched) -> Self {
        Self {
            id: orders_matched_id(&event.meta.transaction_hash),
            timestamp: event.meta.timestamp,
            block_number: event.meta.block_number,
            maker_asset_id: event.maker_asset_id.clone(),
            taker_asset_id: event.taker_asset_id.clone(),
            maker_amount_filled: event.maker_amount_filled,
            taker_amount_filled: event.taker_amount_filled,
        }
    }
}

impl Entity for OrdersMatchedRecord {
    const TABLE: Table = Table::OrdersMatchedEvent;

    fn id(&self) -> &str {
        &self.id
    }
}
