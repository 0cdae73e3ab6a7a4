//! Per-address trading history.
//!
//! One account per address, created on the first trade touching it as maker or taker.
//! `first_trade` uses zero as the "no trade yet" sentinel.

use crate::store::{Entity, Table};
use crate::types::{Address, Amount, AmountError, BlockTimestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Address,
    pub trades_quantity: u64,
    pub total_volume: Amount,
    pub total_fees: Amount,
    pub first_trade: BlockTimestamp,
    pub last_trade: BlockTimestamp,
    pub is_active: bool,
}

/// Which leg of a fill the account was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Maker,
    Taker,
}

impl Account {
    pub fn new(id: Address) -> Self {
        Self {
            id,
            trades_quantity: 0,
            total_volume: Amount::ZERO,
            total_fees: Amount::ZERO,
            first_trade: BlockTimestamp::UNSET,
            last_trade: BlockTimestamp::UNSET,
            is_active: false,
        }
    }

    /// Applies one trade. Only the maker absorbs the protocol fee.
    pub fn record_trade(
        &mut self,
        role: Role,
        size: Amount,
        fee: Amount,
        timestamp: BlockTimestamp,
    ) -> Result<(), AmountError> {
        self.total_volume = self.total_volume.checked_add(size)?;
        if role == Role::Maker {
            self.total_fees = self.total_fees.checked_add(fee)?;
        }
        self.trades_quantity += 1;
        self.last_trade = timestamp;
        self.note_first_trade(timestamp);
        self.is_active = true;
        Ok(())
    }

    // earliest nonzero timestamp wins, so a late-delivered older trade still lands here
    fn note_first_trade(&mut self, timestamp: BlockTimestamp) {
        if timestamp.is_unset() {
            return;
        }
        if self.first_trade.is_unset() || timestamp < self.first_trade {
            self.first_trade = timestamp;
        }
    }

    pub fn has_traded(&self) -> bool {
        !self.first_trade.is_unset()
    }
}

impl Entity for Account {
    const TABLE: Table = Table::Account;

    fn id(&self) -> &str {
        self.id.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new(Address::new("0xMAKER"))
    }

    #[test]
    fn new_account_is_zeroed_and_inactive() {
        let acc = account();
        assert_eq!(acc.id.as_str(), "0xmaker");
        assert_eq!(acc.trades_quantity, 0);
        assert!(acc.total_volume.is_zero());
        assert!(acc.first_trade.is_unset());
        assert!(!acc.is_active);
        assert!(!acc.has_traded());
    }

    #[test]
    fn maker_pays_fee_taker_does_not() {
        let mut maker = account();
        let mut taker = Account::new(Address::new("0xtaker"));
        let ts = BlockTimestamp::from_secs(1_000);

        maker.record_trade(Role::Maker, Amount::new(500_000), Amount::new(10_000), ts).unwrap();
        taker.record_trade(Role::Taker, Amount::new(500_000), Amount::new(10_000), ts).unwrap();

        assert_eq!(maker.total_fees, Amount::new(10_000));
        assert!(taker.total_fees.is_zero());
        assert_eq!(maker.total_volume, taker.total_volume);
        assert!(maker.is_active && taker.is_active);
    }

    #[test]
    fn last_trade_overwritten_first_trade_kept() {
        let mut acc = account();
        acc.record_trade(Role::Taker, Amount::new(1), Amount::ZERO, BlockTimestamp::from_secs(100)).unwrap();
        acc.record_trade(Role::Taker, Amount::new(1), Amount::ZERO, BlockTimestamp::from_secs(300)).unwrap();

        assert_eq!(acc.first_trade, BlockTimestamp::from_secs(100));
        assert_eq!(acc.last_trade, BlockTimestamp::from_secs(300));
        assert_eq!(acc.trades_quantity, 2);
    }

    #[test]
    fn older_trade_delivered_late_moves_first_trade_back() {
        let mut acc = account();
        acc.record_trade(Role::Maker, Amount::new(1), Amount::ZERO, BlockTimestamp::from_secs(500)).unwrap();
        acc.record_trade(Role::Maker, Amount::new(1), Amount::ZERO, BlockTimestamp::from_secs(200)).unwrap();

        assert_eq!(acc.first_trade, BlockTimestamp::from_secs(200));
        assert_eq!(acc.last_trade, BlockTimestamp::from_secs(200));
    }

    #[test]
    fn zero_timestamp_never_sets_first_trade() {
        let mut acc = account();
        acc.record_trade(Role::Maker, Amount::new(1), Amount::ZERO, BlockTimestamp::UNSET).unwrap();
        assert!(acc.first_trade.is_unset());
        assert_eq!(acc.trades_quantity, 1);

        acc.record_trade(Role::Maker, Amount::new(1), Amount::ZERO, BlockTimestamp::from_secs(9)).unwrap();
        assert_eq!(acc.first_trade, BlockTimestamp::from_secs(9));
    }

    #[test]
    fn volume_overflow_is_an_error() {
        let mut acc = account();
        acc.total_volume = Amount::new(u128::MAX);
        let result = acc.record_trade(Role::Taker, Amount::new(1), Amount::ZERO, BlockTimestamp::from_secs(1));
        assert!(matches!(result, Err(AmountError::Overflow { .. })));
    }
}
