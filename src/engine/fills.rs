//! Order fill handling.
//!
//! classify → record event → orderbook → globals → maker and taker accounts,
//! all staged in one unit of work and committed together.

use super::core::{load_global, load_orders_matched_global, Indexer};
use super::results::{FillOutcome, IndexerError};
use crate::account::{Account, Role};
use crate::classify::classify_fill;
use crate::condition::MarketData;
use crate::events::OrderFilled;
use crate::orderbook::Orderbook;
use crate::records::OrderFilledRecord;
use crate::store::{EntityStore, UnitOfWork};
use crate::types::{Address, Amount, BlockTimestamp};
use tracing::{debug, warn};

impl<S: EntityStore> Indexer<S> {
    pub fn handle_order_filled(&mut self, event: &OrderFilled) -> Result<FillOutcome, IndexerError> {
        let scale = self.scale;
        let timestamp = event.meta.timestamp;
        let trade = classify_fill(
            &event.maker_asset_id,
            &event.taker_asset_id,
            event.maker_amount_filled,
            event.taker_amount_filled,
        );

        let mut uow = UnitOfWork::new(&self.store);

        let record = OrderFilledRecord::from_event(event)?;
        uow.stage(&record)?;

        let (mut orderbook, created_orderbook) = match uow.load::<Orderbook>(trade.token_id.as_str())? {
            Some(ob) => (ob, false),
            None => (Orderbook::new(trade.token_id.clone()), true),
        };
        let mut created_placeholder = false;
        if created_orderbook && uow.load::<MarketData>(trade.token_id.as_str())?.is_none() {
            warn!(token = %trade.token_id, "fill on unregistered token, creating placeholder market data");
            uow.stage(&MarketData::placeholder(trade.token_id.clone()))?;
            created_placeholder = true;
        }
        orderbook.record_fill(trade.side, trade.size, event.fee, timestamp, scale)?;
        uow.stage(&orderbook)?;

        let mut global = load_global(&uow)?;
        global.record_fill(trade.size, event.fee, scale)?;
        if created_orderbook {
            global.note_new_market();
        }

        let mut matched_global = load_orders_matched_global(&uow)?;
        matched_global.record_fill(trade.side, trade.size, event.fee, scale)?;
        uow.stage(&matched_global)?;

        let mut new_accounts = 0;
        for (address, role) in [(&event.maker, Role::Maker), (&event.taker, Role::Taker)] {
            if apply_to_account(&mut uow, address, role, trade.size, event.fee, timestamp)? {
                global.note_new_trader();
                new_accounts += 1;
            }
        }
        uow.stage(&global)?;

        let scaled_size = scale.scale(trade.size)?;
        let records = uow.into_records();
        let writes = self.commit(records)?;
        self.stats.fills += 1;

        debug!(
            id = %record.id,
            token = %trade.token_id,
            side = %trade.side,
            size = %trade.size,
            price = %record.price,
            "fill applied"
        );

        Ok(FillOutcome {
            event_id: record.id,
            token_id: trade.token_id,
            side: trade.side,
            size: trade.size,
            scaled_size,
            price: record.price,
            created_orderbook,
            created_placeholder,
            new_accounts,
            writes,
        })
    }
}

// returns true when the account did not exist before this fill
fn apply_to_account<S: EntityStore + ?Sized>(
    uow: &mut UnitOfWork<'_, S>,
    address: &Address,
    role: Role,
    size: Amount,
    fee: Amount,
    timestamp: BlockTimestamp,
) -> Result<bool, IndexerError> {
    let (mut account, created) = match uow.load::<Account>(address.as_str())? {
        Some(account) => (account, false),
        None => (Account::new(address.clone()), true),
    };
    account.record_trade(role, size, fee, timestamp)?;
    uow.stage(&account)?;
    Ok(created)
}
