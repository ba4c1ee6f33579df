//! "Guess the number" pricing, rounds, and the per-user luck statistic.
//!
//! A round over range `n` wins with probability `1/n`. Entry cost follows
//!
//! ```text
//! cost(n) = payout[n]/n - (-k*(n - s)^2 + f)     for n > 2
//! cost(n) = 0                                    for n <= 2
//! ```
//!
//! with `k` = [`GUESS_DAMPENER`], `s` = [`GUESS_SWEET_SPOT`] and `f` = [`GUESS_FAVOR`].
//! The curve dips furthest under fair odds at the sweet spot and climbs back
//! toward (and past) fair odds at either end of the table.

use super::constants::{
    CURRENCY_SYMBOL, GUESS_DAMPENER, GUESS_FAVOR, GUESS_FREE_MAX_RANGE, GUESS_MAX_RANGE,
    GUESS_PAYOUTS, GUESS_SWEET_SPOT,
};
use super::errors::EconomyError;
use super::ledger;
use super::roll::Roller;
use super::storage::UserStore;
use super::types::Coin;

/// `(payout, cost)` for guessing 1-in-`n`. Valid for `n` in `0..=20`.
pub fn guess_economy(n: usize) -> Result<(u32, f64), EconomyError> {
    let payout = *GUESS_PAYOUTS.get(n).ok_or(EconomyError::GuessRange {
        n,
        max: GUESS_MAX_RANGE,
    })?;
    Ok((payout, entry_cost(n, payout)))
}

fn entry_cost(n: usize, payout: u32) -> f64 {
    if n <= GUESS_FREE_MAX_RANGE {
        return 0.00;
    }
    let offset = (n as i64 - GUESS_SWEET_SPOT) as f64;
    payout as f64 / n as f64 - (-GUESS_DAMPENER * (offset * offset) + GUESS_FAVOR)
}

/// Add one round to the user's guess statistics.
pub fn record_guess_outcome<S: UserStore>(
    store: &S,
    user_id: &str,
    n: usize,
    won: bool,
) -> Result<(), EconomyError> {
    if n == 0 {
        return Err(EconomyError::GuessRange {
            n,
            max: GUESS_MAX_RANGE,
        });
    }
    let mut user = store.get(user_id)?;
    user.guess_plays += 1;
    user.guess_expected += 1.0 / n as f64;
    if won {
        user.guess_wins += 1;
    }
    store.save(&user)?;
    log::debug!(
        "guess: {} n={} won={} luck={:.3} over {} plays",
        user_id,
        n,
        won,
        user.guess_luck(),
        user.guess_plays
    );
    Ok(())
}

/// `(luck, plays)` for a user; luck is recomputed from the stored totals.
pub fn luck_and_plays<S: UserStore>(store: &S, user_id: &str) -> Result<(f64, u32), EconomyError> {
    let user = store.get(user_id)?;
    Ok((user.guess_luck(), user.guess_plays))
}

/// Price list for `n = 2..=20`, one line per range.
pub fn render_guess_table() -> String {
    let mut lines = vec![
        " n  \u{b7}   cost   \u{b7}   payout".to_string(),
        "\u{b7}".repeat(25),
    ];
    for (n, &payout) in GUESS_PAYOUTS.iter().enumerate().skip(2) {
        let cost = entry_cost(n, payout);
        // en space keeps single digits aligned with two-digit rows
        let pad = if n < 10 { "\u{2002}" } else { "" };
        lines.push(format!(
            "{}{}  \u{b7}  {}{:>5.2}  \u{b7}  {}{:>6.2}",
            pad, n, CURRENCY_SYMBOL, cost, CURRENCY_SYMBOL, payout as f64
        ));
    }
    lines.join("\n")
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuessOutcome {
    pub n: usize,
    pub pick: u32,
    pub secret: u32,
    pub won: bool,
    pub cost: Coin,
    pub payout: Coin,
    pub balance: Coin,
}

impl GuessOutcome {
    pub fn message(&self) -> String {
        if self.won {
            format!(
                "You guessed {} and the number was {}. You win **{}**! Balance: {}",
                self.pick,
                self.secret,
                self.payout.with_symbol(),
                self.balance.with_symbol()
            )
        } else {
            format!(
                "You guessed {} but the number was {}. Balance: {}",
                self.pick,
                self.secret,
                self.balance.with_symbol()
            )
        }
    }
}

/// Play one round: charge the entry cost, draw `1..=n`, pay out on a match,
/// and record the result for the luck statistic.
pub fn play_guess<S: UserStore, R: Roller>(
    store: &S,
    user_id: &str,
    n: usize,
    pick: u32,
    roller: &mut R,
) -> Result<GuessOutcome, EconomyError> {
    if n == 0 || n > GUESS_MAX_RANGE {
        return Err(EconomyError::GuessRange {
            n,
            max: GUESS_MAX_RANGE,
        });
    }
    if pick == 0 || pick as usize > n {
        return Err(EconomyError::InvalidPick { pick, n });
    }

    let (payout, raw_cost) = guess_economy(n)?;
    let available = ledger::balance(store, user_id)?;
    if available.as_f64() < raw_cost {
        return Err(EconomyError::InsufficientFunds {
            needed: format!("{}{:.2}", CURRENCY_SYMBOL, raw_cost),
            available: available.with_symbol(),
        });
    }

    let mut balance = ledger::apply_delta(store, user_id, -raw_cost)?;
    let cost = Coin::from_cents(available.cents() - balance.cents());
    let secret = roller.roll(1..=n as u32);
    let won = secret == pick;
    let payout = Coin::from_whole(payout);
    if won {
        balance = ledger::apply_delta(store, user_id, payout.as_f64())?;
    }
    record_guess_outcome(store, user_id, n, won)?;

    log::info!(
        "guess: {} played n={} pick={} secret={} ({})",
        user_id,
        n,
        pick,
        secret,
        if won { "win" } else { "loss" }
    );

    Ok(GuessOutcome {
        n,
        pick,
        secret,
        won,
        cost,
        payout: if won { payout } else { Coin::ZERO },
        balance,
    })
}
