//! Exchange statistics simulation.
//!
//! Feeds scripted exchange and condition events through an in-memory store and
//! prints the aggregates they produce.

use exchange_stats::*;
use tracing_subscriber::EnvFilter;

fn main() {
    let config = match IndexerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .init();

    println!("Exchange Statistics Simulation\n");

    scenario_1_single_fill(&config);
    scenario_2_market_activity(&config);
    scenario_3_condition_lifecycle(&config);

    println!("\nAll simulations completed successfully.");
}

const YES_TOKEN: &str = "52114319501245915516055106046884209969926127482827954674443846427813813222426";
const NO_TOKEN: &str = "71321045679252212594626385532706912750332728571942532289631379312455583992563";

fn meta(secs: u64, block: u64, tx: &str) -> BlockMeta {
    BlockMeta::new(BlockTimestamp::from_secs(secs), BlockNumber(block), TxHash::new(tx))
}

fn buy(tx: &str, secs: u64, maker: &str, taker: &str, token: &str, paid: u128, received: u128, fee: u128) -> ChainEvent {
    ChainEvent::OrderFilled(OrderFilled {
        meta: meta(secs, secs / 2, tx),
        order_hash: OrderHash::new(format!("{tx}-order")),
        maker: Address::new(maker),
        taker: Address::new(taker),
        maker_asset_id: AssetId::collateral(),
        taker_asset_id: AssetId::new(token),
        maker_amount_filled: Amount::new(paid),
        taker_amount_filled: Amount::new(received),
        fee: Amount::new(fee),
    })
}

fn sell(tx: &str, secs: u64, maker: &str, taker: &str, token: &str, given: u128, received: u128) -> ChainEvent {
    ChainEvent::OrderFilled(OrderFilled {
        meta: meta(secs, secs / 2, tx),
        order_hash: OrderHash::new(format!("{tx}-order")),
        maker: Address::new(maker),
        taker: Address::new(taker),
        maker_asset_id: AssetId::new(token),
        taker_asset_id: AssetId::collateral(),
        maker_amount_filled: Amount::new(given),
        taker_amount_filled: Amount::new(received),
        fee: Amount::ZERO,
    })
}

fn new_indexer(config: &IndexerConfig) -> Indexer<MemoryStore> {
    match Indexer::new(config.clone(), MemoryStore::new()) {
        Ok(indexer) => indexer,
        Err(e) => {
            eprintln!("failed to start indexer: {e}");
            std::process::exit(1);
        }
    }
}

fn run(indexer: &mut Indexer<MemoryStore>, events: &[ChainEvent]) {
    if let Err(e) = indexer.handle_all(events) {
        eprintln!("event processing failed: {e}");
        std::process::exit(1);
    }
}

fn print_orderbook(store: &MemoryStore, token: &str) {
    match store.get::<Orderbook>(token) {
        Ok(Some(ob)) => {
            let t = &ob.tally;
            println!("  Orderbook {}...", &token[..12]);
            println!("    trades: {} ({} buys, {} sells)", t.trades_quantity, t.buys_quantity, t.sells_quantity);
            println!(
                "    volume: ${} (buy ${}, sell ${})",
                t.scaled_collateral_volume, t.scaled_collateral_buy_volume, t.scaled_collateral_sell_volume
            );
            println!("    avg trade: ${}, fees: {} raw, last active day {}", t.average_trade_size, t.total_fees, ob.last_active_day);
        }
        Ok(None) => println!("  Orderbook {token}: none"),
        Err(e) => println!("  Orderbook {token}: {e}"),
    }
}

fn print_account(store: &MemoryStore, address: &str) {
    if let Ok(Some(acc)) = store.get::<Account>(address) {
        println!(
            "  {}: {} trades, volume {} raw, fees {} raw, first {} / last {}",
            acc.id, acc.trades_quantity, acc.total_volume, acc.total_fees, acc.first_trade, acc.last_trade
        );
    }
}

fn print_globals(store: &MemoryStore) {
    if let Ok(Some(global)) = store.get::<Global>(GLOBAL_KEY) {
        println!(
            "  Global: {} trades, ${} volume, ${} fees, {} traders, {} markets",
            global.trades_quantity,
            global.scaled_collateral_volume,
            global.scaled_collateral_fees,
            global.unique_traders,
            global.active_markets
        );
        println!(
            "  Conditions: {} total, {} open, {} closed",
            global.num_conditions, global.num_open_conditions, global.num_closed_conditions
        );
    }
    if let Ok(Some(matched)) = store.get::<OrdersMatchedGlobal>(GLOBAL_KEY) {
        println!(
            "  OrdersMatchedGlobal: {} trades, ${} volume, avg ${}",
            matched.tally.trades_quantity, matched.tally.scaled_collateral_volume, matched.tally.average_trade_size
        );
    }
}

/// One collateral-for-token fill.
fn scenario_1_single_fill(config: &IndexerConfig) {
    println!("Scenario 1: Single Buy Fill\n");

    let mut indexer = new_indexer(config);
    let fill = buy("0x01", 1_700_000_000, "0xa11ce", "0xb0b", YES_TOKEN, 1_000_000, 500_000, 10_000);

    match indexer.handle(&fill) {
        Ok(Outcome::Fill(outcome)) => {
            println!("  side {} size {} (${}) price {}", outcome.side, outcome.size, outcome.scaled_size, outcome.price);
            println!("  placeholder market data created: {}", outcome.created_placeholder);
            println!("  {} rows written\n", outcome.writes);
        }
        Ok(other) => println!("  unexpected outcome {other:?}"),
        Err(e) => println!("  fill failed: {e}"),
    }

    print_orderbook(indexer.store(), YES_TOKEN);
    print_account(indexer.store(), "0xa11ce");
    print_account(indexer.store(), "0xb0b");
    println!();
}

/// Registered market with buys, sells and a matched batch.
fn scenario_2_market_activity(config: &IndexerConfig) {
    println!("Scenario 2: Market Activity\n");

    let mut indexer = new_indexer(config);
    let condition = ConditionId::new("0xc0ffee");

    let events = vec![
        ChainEvent::TokenRegistered(TokenRegistered {
            meta: meta(1_700_000_000, 50_000_000, "0x10"),
            token0: AssetId::new(YES_TOKEN),
            token1: AssetId::new(NO_TOKEN),
            condition_id: condition,
        }),
        buy("0x11", 1_700_000_100, "0xa11ce", "0xb0b", YES_TOKEN, 600_000, 1_000_000, 5_000),
        buy("0x12", 1_700_003_600, "0xcarol", "0xb0b", YES_TOKEN, 1_300_000, 2_000_000, 0),
        sell("0x13", 1_700_090_000, "0xb0b", "0xdave", YES_TOKEN, 1_500_000, 1_050_000),
        sell("0x14", 1_700_090_500, "0xa11ce", "0xdave", NO_TOKEN, 4_000_000, 1_600_000),
        ChainEvent::OrdersMatched(OrdersMatched {
            meta: meta(1_700_090_500, 50_045_250, "0x14"),
            maker_asset_id: AssetId::new(NO_TOKEN),
            taker_asset_id: AssetId::collateral(),
            maker_amount_filled: Amount::new(4_000_000),
            taker_amount_filled: Amount::new(1_600_000),
        }),
    ];
    run(&mut indexer, &events);

    print_orderbook(indexer.store(), YES_TOKEN);
    print_orderbook(indexer.store(), NO_TOKEN);
    for who in ["0xa11ce", "0xb0b", "0xcarol", "0xdave"] {
        print_account(indexer.store(), who);
    }
    print_globals(indexer.store());

    let stats = indexer.stats();
    println!("\n  handled {} events ({} fills, {} matches)\n", stats.handled(), stats.fills, stats.matches);
}

/// Condition prepared, resolved, plus a resolution nobody prepared.
fn scenario_3_condition_lifecycle(config: &IndexerConfig) {
    println!("Scenario 3: Condition Lifecycle\n");

    let mut indexer = new_indexer(config);
    let events = vec![
        ChainEvent::ConditionPreparation(ConditionPreparation {
            meta: meta(1_700_000_000, 50_000_000, "0x20"),
            condition_id: ConditionId::new("0xabc"),
            oracle: Address::new("0x0rac1e"),
            question_id: QuestionId::new("0x9e"),
            outcome_slot_count: 2,
        }),
        ChainEvent::ConditionResolution(ConditionResolution {
            meta: meta(1_700_500_000, 50_250_000, "0x21"),
            condition_id: ConditionId::new("0xabc"),
            payout_numerators: vec![Amount::new(1), Amount::ZERO],
        }),
        ChainEvent::ConditionResolution(ConditionResolution {
            meta: meta(1_700_500_100, 50_250_050, "0x22"),
            condition_id: ConditionId::new("0xdead"),
            payout_numerators: vec![Amount::ZERO, Amount::new(1)],
        }),
    ];

    for event in &events {
        match indexer.handle(event) {
            Ok(Outcome::Condition(outcome)) => println!("  {} -> {:?}", outcome.condition_id, outcome.transition),
            Ok(other) => println!("  unexpected outcome {other:?}"),
            Err(e) => println!("  failed: {e}"),
        }
    }

    if let Ok(Some(condition)) = indexer.store().get::<Condition>("0xabc") {
        println!(
            "  0xabc status {:?}, payouts {:?}, resolved at {}",
            condition.status(),
            condition.payout_numerators.unwrap_or_default(),
            condition.resolution_timestamp.unwrap_or_default()
        );
    }
    print_globals(indexer.store());
}
