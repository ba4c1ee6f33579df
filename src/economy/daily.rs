//! Once-per-UTC-day reward with a lucky-number jackpot.
//!
//! A user is `Claimable` when their last claim fell on an earlier UTC calendar
//! date (or they never claimed), and `OnCooldown` for the rest of the UTC day
//! after a claim. Gating compares dates, not a rolling 24h window: a claim at
//! 23:59 and another at 00:01 are both allowed.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::fmt;

use super::constants::{DAILY_AWARD, DAILY_DRAW_MAX, DAILY_JACKPOT_AWARD, NO_LUCKY_NUMBER};
use super::errors::EconomyError;
use super::ledger;
use super::roll::Roller;
use super::storage::UserStore;
use super::types::Coin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyState {
    Claimable,
    OnCooldown,
}

/// Where a user stands for today's claim.
pub fn daily_state(last_claim: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DailyState {
    match last_claim {
        Some(last) if last.date_naive() == now.date_naive() => DailyState::OnCooldown,
        _ => DailyState::Claimable,
    }
}

/// Whole `(hours, minutes)` until the next UTC midnight, rounded up to the minute.
pub fn time_until_reset(now: DateTime<Utc>) -> (i64, i64) {
    let remaining = now
        .date_naive()
        .succ_opt()
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight) - now)
        .unwrap_or_else(Duration::zero);
    let total_minutes = (remaining.num_milliseconds().max(0) + 59_999) / 60_000;
    (total_minutes / 60, total_minutes % 60)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyOutcome {
    Claimed {
        award: Coin,
        jackpot: bool,
        /// Drawn number, revealed only on a miss when the user supplied a guess.
        winning_number: Option<u32>,
        balance: Coin,
    },
    Cooldown {
        hours: i64,
        minutes: i64,
    },
}

impl fmt::Display for DailyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DailyOutcome::Cooldown { hours, minutes } => write!(
                f,
                "Daily award resets at midnight UTC, {}h{}m from now.",
                hours, minutes
            ),
            DailyOutcome::Claimed {
                award,
                jackpot,
                winning_number,
                ..
            } => {
                if *jackpot {
                    write!(f, "**JACKPOT!** ")?;
                } else if let Some(n) = winning_number {
                    write!(
                        f,
                        "The winning number this time was **{}**, but no worries: ",
                        n
                    )?;
                }
                write!(
                    f,
                    "You have been awarded your daily **{}**!",
                    award.with_symbol()
                )
            }
        }
    }
}

/// Award amounts for the daily claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyReward {
    pub base_award: Coin,
    pub jackpot_award: Coin,
}

impl Default for DailyReward {
    fn default() -> Self {
        Self {
            base_award: Coin::from_whole(DAILY_AWARD),
            jackpot_award: Coin::from_whole(DAILY_JACKPOT_AWARD),
        }
    }
}

impl DailyReward {
    /// Claim today's reward for `user_id`.
    ///
    /// On cooldown nothing is written. On a claim the record is saved twice:
    /// once with the new claim time, then again by the ledger when the award
    /// is credited.
    ///
    /// The check-then-act here is not atomic. Two concurrent claims for the
    /// same user can both see `Claimable`; callers that need stronger
    /// guarantees must serialize per user around this call.
    pub fn claim<S: UserStore, R: Roller>(
        &self,
        store: &S,
        user_id: &str,
        lucky_number: u32,
        now: DateTime<Utc>,
        roller: &mut R,
    ) -> Result<DailyOutcome, EconomyError> {
        let mut user = store.get(user_id)?;

        if daily_state(user.daily, now) == DailyState::OnCooldown {
            let (hours, minutes) = time_until_reset(now);
            log::debug!("daily: {} on cooldown ({}h{}m left)", user_id, hours, minutes);
            return Ok(DailyOutcome::Cooldown { hours, minutes });
        }

        let drawn = roller.roll(1..=DAILY_DRAW_MAX);
        let jackpot = drawn == lucky_number;
        let (award, winning_number) = if jackpot {
            (self.jackpot_award, None)
        } else if lucky_number != NO_LUCKY_NUMBER {
            (self.base_award, Some(drawn))
        } else {
            (self.base_award, None)
        };

        user.daily = Some(now);
        store.save(&user)?;
        let balance = ledger::apply_delta(store, user_id, award.as_f64())?;

        log::info!(
            "daily: {} claimed {} (drawn {}, lucky {}, jackpot {})",
            user_id,
            award,
            drawn,
            lucky_number,
            jackpot
        );

        Ok(DailyOutcome::Claimed {
            award,
            jackpot,
            winning_number,
            balance,
        })
    }
}

/// Claim with the default award amounts.
pub fn claim_daily<S: UserStore, R: Roller>(
    store: &S,
    user_id: &str,
    lucky_number: u32,
    now: DateTime<Utc>,
    roller: &mut R,
) -> Result<DailyOutcome, EconomyError> {
    DailyReward::default().claim(store, user_id, lucky_number, now, roller)
}
