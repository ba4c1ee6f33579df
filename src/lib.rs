//! # gamecoin - coin economy for chat-bot games
//!
//! gamecoin keeps a per-user coin balance and the games that move it:
//!
//! - **Balance ledger**: signed deltas, always persisted at two decimal places.
//! - **Daily reward**: one claim per UTC calendar day, 10 coins or a 500 coin
//!   jackpot when the player's lucky number comes up.
//! - **Guess the number**: entry costs priced off a closed-form curve, payouts
//!   from a fixed table, and a per-user luck statistic.
//! - **Text games**: emoji strings, mad-lib templates, and ballot tallies.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use gamecoin::economy::{self, SledUserStore};
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = SledUserStore::open("./data/users")?;
//!     let outcome = economy::claim_daily(&store, "1234", 42, Utc::now(), &mut rand::thread_rng())?;
//!     println!("{}", outcome);
//!     println!("{}", economy::render_guess_table());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`economy`] - ledger, daily reward, guess game, and the user record store
//! - [`games`] - text helpers that share no state with the economy
//! - [`config`] - TOML configuration for the CLI and embedding bots

pub mod config;
pub mod economy;
pub mod games;
