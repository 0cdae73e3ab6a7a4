//! Exchange-wide singleton accumulators, both stored under the empty key.
//!
//! `Global` is the cumulative view fed by fills, first-seen accounts and markets,
//! and condition lifecycle events. `OrdersMatchedGlobal` mirrors the orderbook shape
//! and also counts raw orders-matched batches. The two are fed by different event
//! streams and are not expected to agree.

use crate::orderbook::TradeTally;
use crate::scale::{add_scaled, CollateralScale};
use crate::store::{Entity, Table};
use crate::types::{Amount, AmountError, TradeSide};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const GLOBAL_KEY: &str = "";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Global {
    pub id: String,
    pub trades_quantity: u64,
    pub collateral_volume: Amount,
    pub scaled_collateral_volume: Decimal,
    pub collateral_fees: Amount,
    pub scaled_collateral_fees: Decimal,
    pub unique_traders: u64,
    pub active_markets: u64,
    pub num_conditions: u64,
    pub num_open_conditions: u64,
    pub num_closed_conditions: u64,
}

impl Global {
    pub fn new() -> Self {
        Self {
            id: GLOBAL_KEY.to_string(),
            trades_quantity: 0,
            collateral_volume: Amount::ZERO,
            scaled_collateral_volume: Decimal::ZERO,
            collateral_fees: Amount::ZERO,
            scaled_collateral_fees: Decimal::ZERO,
            unique_traders: 0,
            active_markets: 0,
            num_conditions: 0,
            num_open_conditions: 0,
            num_closed_conditions: 0,
        }
    }

    pub fn record_fill(&mut self, size: Amount, fee: Amount, scale: CollateralScale) -> Result<(), AmountError> {
        self.collateral_volume = self.collateral_volume.checked_add(size)?;
        self.scaled_collateral_volume = add_scaled(self.scaled_collateral_volume, scale.scale(size)?, "global volume")?;
        self.collateral_fees = self.collateral_fees.checked_add(fee)?;
        self.scaled_collateral_fees = add_scaled(self.scaled_collateral_fees, scale.scale(fee)?, "global fees")?;
        self.trades_quantity += 1;
        Ok(())
    }

    pub fn note_new_trader(&mut self) {
        self.unique_traders += 1;
    }

    pub fn note_new_market(&mut self) {
        self.active_markets += 1;
    }

    pub fn condition_prepared(&mut self) {
        self.num_conditions += 1;
        self.num_open_conditions += 1;
    }

    pub fn condition_resolved(&mut self) {
        self.num_open_conditions = self.num_open_conditions.saturating_sub(1);
        self.num_closed_conditions += 1;
    }
}

impl Default for Global {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Global {
    const TABLE: Table = Table::Global;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersMatchedGlobal {
    pub id: String,
    #[serde(flatten)]
    pub tally: TradeTally,
}

impl OrdersMatchedGlobal {
    pub fn new() -> Self {
        Self {
            id: GLOBAL_KEY.to_string(),
            tally: TradeTally::new(),
        }
    }

    pub fn record_fill(
        &mut self,
        side: TradeSide,
        size: Amount,
        fee: Amount,
        scale: CollateralScale,
    ) -> Result<(), AmountError> {
        self.tally.record_fill(side, size, fee, scale)
    }

    // a matched batch counts as one trade; its volume already arrived through the fills
    pub fn record_match(&mut self) -> Result<(), AmountError> {
        self.tally.record_bare_trade()
    }
}

impl Default for OrdersMatchedGlobal {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for OrdersMatchedGlobal {
    const TABLE: Table = Table::OrdersMatchedGlobal;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn global_fill_accumulates_raw_and_scaled() {
        let mut global = Global::new();
        global.record_fill(Amount::new(500_000), Amount::new(10_000), CollateralScale::USDC).unwrap();
        global.record_fill(Amount::new(1_500_000), Amount::new(0), CollateralScale::USDC).unwrap();

        assert_eq!(global.id, "");
        assert_eq!(global.trades_quantity, 2);
        assert_eq!(global.collateral_volume, Amount::new(2_000_000));
        assert_eq!(global.scaled_collateral_volume, dec!(2));
        assert_eq!(global.collateral_fees, Amount::new(10_000));
        assert_eq!(global.scaled_collateral_fees, dec!(0.01));
    }

    #[test]
    fn condition_counters_stay_consistent() {
        let mut global = Global::new();
        global.condition_prepared();
        global.condition_prepared();
        global.condition_resolved();

        assert_eq!(global.num_conditions, 2);
        assert_eq!(global.num_open_conditions, 1);
        assert_eq!(global.num_closed_conditions, 1);
        assert!(global.num_open_conditions + global.num_closed_conditions <= global.num_conditions);
    }

    #[test]
    fn trader_and_market_counters() {
        let mut global = Global::default();
        global.note_new_trader();
        global.note_new_trader();
        global.note_new_market();
        assert_eq!(global.unique_traders, 2);
        assert_eq!(global.active_markets, 1);
    }

    #[test]
    fn matched_global_counts_batches_without_volume() {
        let mut omg = OrdersMatchedGlobal::new();
        omg.record_fill(TradeSide::Sell, Amount::new(2_000_000), Amount::new(5), CollateralScale::USDC).unwrap();
        omg.record_match().unwrap();

        assert_eq!(omg.tally.trades_quantity, 2);
        assert_eq!(omg.tally.sells_quantity, 1);
        assert_eq!(omg.tally.scaled_collateral_sell_volume, dec!(2));
        assert_eq!(omg.tally.average_trade_size, dec!(1));
        assert_eq!(omg.tally.total_fees, Amount::new(5));
    }
}
