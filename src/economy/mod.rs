//! Coin economy: per-user balances, the daily reward, and the guess game.
//!
//! Every operation takes the record store as an explicit [`UserStore`]
//! argument and issues one `get` plus at most a few whole-record `save`s.
//! Time and randomness are passed in by the caller so tests can pin both.

pub mod constants;
pub mod daily;
pub mod errors;
pub mod guess;
pub mod ledger;
pub mod roll;
pub mod storage;
pub mod types;

pub use daily::{
    claim_daily, daily_state, time_until_reset, DailyOutcome, DailyReward, DailyState,
};
pub use errors::EconomyError;
pub use guess::{
    guess_economy, luck_and_plays, play_guess, record_guess_outcome, render_guess_table,
    GuessOutcome,
};
pub use ledger::{apply_delta, balance, parse_amount};
pub use roll::Roller;
pub use storage::{MemoryUserStore, SledUserStore, SledUserStoreBuilder, UserStore};
pub use types::{Coin, UserRecord, USER_SCHEMA_VERSION};
