// 2.0: side/size classification of a fill. total over every input: no error cases
// besides price arithmetic on amounts too large for a Decimal.

use crate::scale::price_ratio;
use crate::types::{Amount, AmountError, AssetId, TradeSide};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What a fill means for the market it touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedTrade {
    pub side: TradeSide,
    /// collateral notional in raw units
    pub size: Amount,
    /// the outcome token being traded: taker asset on a buy, maker asset on a sell
    pub token_id: AssetId,
}

// maker offering collateral (asset 0) is buying the outcome token
pub fn classify_side(maker_asset_id: &AssetId) -> TradeSide {
    if maker_asset_id.is_collateral() {
        TradeSide::Buy
    } else {
        TradeSide::Sell
    }
}

pub fn classify_size(side: TradeSide, maker_amount: Amount, taker_amount: Amount) -> Amount {
    match side {
        TradeSide::Buy => taker_amount,
        TradeSide::Sell => maker_amount,
    }
}

pub fn classify_fill(
    maker_asset_id: &AssetId,
    taker_asset_id: &AssetId,
    maker_amount: Amount,
    taker_amount: Amount,
) -> ClassifiedTrade {
    let side = classify_side(maker_asset_id);
    let token_id = match side {
        TradeSide::Buy => taker_asset_id.clone(),
        TradeSide::Sell => maker_asset_id.clone(),
    };
    ClassifiedTrade {
        side,
        size: classify_size(side, maker_amount, taker_amount),
        token_id,
    }
}

/// Fill price as recorded on the immutable event: taker / maker.
pub fn fill_price(maker_amount: Amount, taker_amount: Amount) -> Result<Decimal, AmountError> {
    price_ratio(maker_amount, taker_amount)
}
