// 5.0: per-market running statistics. not a live order queue: just what the fills added up to.
// TradeTally is shared with the orders-matched global, which mirrors this shape exchange-wide.

use crate::scale::{add_scaled, average, CollateralScale};
use crate::store::{Entity, Table};
use crate::types::{Amount, AmountError, AssetId, BlockTimestamp, TradeSide};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/** 5.1: counts and volumes, raw and scaled, split by side. all monotonically non-decreasing */
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TradeTally {
    pub trades_quantity: u64,
    pub buys_quantity: u64,
    pub sells_quantity: u64,
    pub collateral_volume: Amount,
    pub scaled_collateral_volume: Decimal,
    pub collateral_buy_volume: Amount,
    pub scaled_collateral_buy_volume: Decimal,
    pub collateral_sell_volume: Amount,
    pub scaled_collateral_sell_volume: Decimal,
    pub total_fees: Amount,
    pub average_trade_size: Decimal,
}

impl TradeTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_fill(
        &mut self,
        side: TradeSide,
        size: Amount,
        fee: Amount,
        scale: CollateralScale,
    ) -> Result<(), AmountError> {
        let scaled_size = scale.scale(size)?;

        self.collateral_volume = self.collateral_volume.checked_add(size)?;
        self.scaled_collateral_volume = add_scaled(self.scaled_collateral_volume, scaled_size, "scaled volume")?;

        match side {
            TradeSide::Buy => {
                self.collateral_buy_volume = self.collateral_buy_volume.checked_add(size)?;
                self.scaled_collateral_buy_volume =
                    add_scaled(self.scaled_collateral_buy_volume, scaled_size, "scaled buy volume")?;
                self.buys_quantity += 1;
            }
            TradeSide::Sell => {
                self.collateral_sell_volume = self.collateral_sell_volume.checked_add(size)?;
                self.scaled_collateral_sell_volume =
                    add_scaled(self.scaled_collateral_sell_volume, scaled_size, "scaled sell volume")?;
                self.sells_quantity += 1;
            }
        }

        self.total_fees = self.total_fees.checked_add(fee)?;
        self.trades_quantity += 1;
        self.recompute_average()
    }

    /// A trade with no volume attached: one more in the count, nothing else.
    pub fn record_bare_trade(&mut self) -> Result<(), AmountError> {
        self.trades_quantity += 1;
        self.recompute_average()
    }

    fn recompute_average(&mut self) -> Result<(), AmountError> {
        if self.trades_quantity > 0 {
            self.average_trade_size = average(self.scaled_collateral_volume, self.trades_quantity)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orderbook {
    pub id: AssetId,
    #[serde(flatten)]
    pub tally: TradeTally,
    /// floor(timestamp / 86400) of the latest fill
    pub last_active_day: u64,
}

impl Orderbook {
    pub fn new(token_id: AssetId) -> Self {
        Self {
            id: token_id,
            tally: TradeTally::new(),
            last_active_day: 0,
        }
    }

    pub fn record_fill(
        &mut self,
        side: TradeSide,
        size: Amount,
        fee: Amount,
        timestamp: BlockTimestamp,
        scale: CollateralScale,
    ) -> Result<(), AmountError> {
        self.tally.record_fill(side, size, fee, scale)?;
        self.last_active_day = timestamp.day_bucket();
        Ok(())
    }
}

impl Entity for Orderbook {
    const TABLE: Table = Table::Orderbook;

    fn id(&self) -> &str {
        self.id.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn book() -> Orderbook {
        Orderbook::new(AssetId::new("1234"))
    }

    #[test]
    fn fresh_orderbook_is_zeroed() {
        let ob = book();
        assert_eq!(ob.tally.trades_quantity, 0);
        assert_eq!(ob.tally.average_trade_size, Decimal::ZERO);
        assert_eq!(ob.last_active_day, 0);
    }

    #[test]
    fn buy_fill_updates_buy_side_only() {
        let mut ob = book();
        ob.record_fill(
            TradeSide::Buy,
            Amount::new(500_000),
            Amount::new(10_000),
            BlockTimestamp::from_secs(172_800),
            CollateralScale::USDC,
        )
        .unwrap();

        let t = &ob.tally;
        assert_eq!(t.trades_quantity, 1);
        assert_eq!(t.buys_quantity, 1);
        assert_eq!(t.sells_quantity, 0);
        assert_eq!(t.collateral_volume, Amount::new(500_000));
        assert_eq!(t.scaled_collateral_volume, dec!(0.5));
        assert_eq!(t.collateral_buy_volume, Amount::new(500_000));
        assert_eq!(t.scaled_collateral_buy_volume, dec!(0.5));
        assert!(t.collateral_sell_volume.is_zero());
        assert_eq!(t.total_fees, Amount::new(10_000));
        assert_eq!(t.average_trade_size, dec!(0.5));
        assert_eq!(ob.last_active_day, 2);
    }

    #[test]
    fn average_tracks_running_volume() {
        let mut ob = book();
        let ts = BlockTimestamp::from_secs(1);
        ob.record_fill(TradeSide::Buy, Amount::new(1_000_000), Amount::ZERO, ts, CollateralScale::USDC).unwrap();
        ob.record_fill(TradeSide::Sell, Amount::new(2_000_000), Amount::ZERO, ts, CollateralScale::USDC).unwrap();
        ob.record_fill(TradeSide::Sell, Amount::new(3_000_000), Amount::ZERO, ts, CollateralScale::USDC).unwrap();

        assert_eq!(ob.tally.trades_quantity, 3);
        assert_eq!(ob.tally.sells_quantity, 2);
        assert_eq!(ob.tally.scaled_collateral_volume, dec!(6));
        assert_eq!(ob.tally.scaled_collateral_sell_volume, dec!(5));
        assert_eq!(ob.tally.average_trade_size, dec!(2));
    }

    #[test]
    fn last_active_day_follows_latest_fill() {
        let mut ob = book();
        ob.record_fill(TradeSide::Buy, Amount::new(1), Amount::ZERO, BlockTimestamp::from_secs(86_400 * 10), CollateralScale::USDC)
            .unwrap();
        ob.record_fill(TradeSide::Buy, Amount::new(1), Amount::ZERO, BlockTimestamp::from_secs(86_400 * 12 + 5), CollateralScale::USDC)
            .unwrap();
        assert_eq!(ob.last_active_day, 12);
    }

    #[test]
    fn bare_trade_dilutes_average() {
        let mut tally = TradeTally::new();
        tally.record_fill(TradeSide::Buy, Amount::new(3_000_000), Amount::ZERO, CollateralScale::USDC).unwrap();
        tally.record_bare_trade().unwrap();

        assert_eq!(tally.trades_quantity, 2);
        assert_eq!(tally.buys_quantity, 1);
        assert_eq!(tally.average_trade_size, dec!(1.5));
    }

    #[test]
    fn orderbook_serializes_flat() {
        let ob = book();
        let value = serde_json::to_value(&ob).unwrap();
        assert_eq!(value["id"], "1234");
        assert_eq!(value["trades_quantity"], 0);
        assert_eq!(value["collateral_volume"], "0");

        let back: Orderbook = serde_json::from_value(value).unwrap();
        assert_eq!(back, ob);
    }
}
