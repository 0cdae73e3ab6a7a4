// 8.0: event-handling engine. one handler per event kind, each composing the
// classifier, recorder and aggregators inside a single unit of work.
// single writer: events are applied strictly one after another.

mod conditions;
mod core;
mod fills;
mod matches;
mod results;
mod tokens;

pub use core::Indexer;
pub use results::{
    ConditionOutcome, ConditionTransition, FillOutcome, IndexerError, IndexerStats, MatchOutcome, Outcome,
    TokenOutcome,
};
