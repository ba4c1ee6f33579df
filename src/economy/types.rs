use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants::CURRENCY_SYMBOL;
use super::errors::EconomyError;

pub const USER_SCHEMA_VERSION: u8 = 1;

/// Coin balance held as hundredths, so a stored balance can never carry more
/// than two decimal places.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Coin {
    cents: i64,
}

impl Coin {
    pub const ZERO: Coin = Coin { cents: 0 };

    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub const fn from_whole(coins: u32) -> Self {
        Self {
            cents: coins as i64 * 100,
        }
    }

    /// Round an arbitrary real amount to the nearest hundredth.
    /// Exact half-cents round to the even neighbour.
    pub fn from_f64(amount: f64) -> Result<Self, EconomyError> {
        Ok(Self {
            cents: to_cents(amount)?,
        })
    }

    pub const fn cents(self) -> i64 {
        self.cents
    }

    pub fn as_f64(self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Add a real-valued delta, rounding the sum (not the delta) to two places.
    pub fn add_f64(self, delta: f64) -> Result<Self, EconomyError> {
        if !delta.is_finite() {
            return Err(EconomyError::InvalidAmount(delta.to_string()));
        }
        let cents = to_cents(self.as_f64() + delta).map_err(|_| {
            EconomyError::InvalidAmount(format!("{} overflows balance {}", delta, self))
        })?;
        Ok(Self { cents })
    }

    /// Amount with the currency glyph, e.g. `₢12.50`.
    pub fn with_symbol(self) -> String {
        format!("{}{}", CURRENCY_SYMBOL, self)
    }
}

fn to_cents(amount: f64) -> Result<i64, EconomyError> {
    if !amount.is_finite() {
        return Err(EconomyError::InvalidAmount(amount.to_string()));
    }
    let scaled = (amount * 100.0).round_ties_even();
    if scaled.abs() >= i64::MAX as f64 {
        return Err(EconomyError::InvalidAmount(amount.to_string()));
    }
    Ok(scaled as i64)
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Persistent economy state for one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub user_id: String,
    pub coin: Coin,
    /// Time of the last successful daily claim; `None` if never claimed.
    pub daily: Option<DateTime<Utc>>,
    pub guess_plays: u32,
    /// Running sum of `1/n` over every guess round played.
    pub guess_expected: f64,
    pub guess_wins: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub schema_version: u8,
}

impl UserRecord {
    /// Zeroed record for a user seen for the first time.
    pub fn new(user_id: &str) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.to_string(),
            coin: Coin::ZERO,
            daily: None,
            guess_plays: 0,
            guess_expected: 0.0,
            guess_wins: 0,
            created_at: now,
            updated_at: now,
            schema_version: USER_SCHEMA_VERSION,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Wins relative to the statistically expected win count; zero before any play.
    pub fn guess_luck(&self) -> f64 {
        if self.guess_expected == 0.0 {
            0.0
        } else {
            self.guess_wins as f64 / self.guess_expected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_rounds_to_hundredths() {
        assert_eq!(Coin::from_f64(1.234).unwrap().cents(), 123);
        assert_eq!(Coin::from_f64(1.235001).unwrap().cents(), 124);
        assert_eq!(Coin::from_f64(-0.856).unwrap().cents(), -86);
        assert_eq!(Coin::from_f64(0.125).unwrap().cents(), 12);
        assert_eq!(Coin::from_f64(0.625).unwrap().cents(), 62);
        assert_eq!(Coin::from_f64(-0.125).unwrap().cents(), -12);
        assert_eq!(Coin::from_whole(500).cents(), 50_000);
    }

    #[test]
    fn coin_rejects_non_finite() {
        assert!(matches!(
            Coin::from_f64(f64::NAN),
            Err(EconomyError::InvalidAmount(_))
        ));
        assert!(matches!(
            Coin::ZERO.add_f64(f64::INFINITY),
            Err(EconomyError::InvalidAmount(_))
        ));
    }

    #[test]
    fn coin_display_has_two_places() {
        assert_eq!(Coin::from_cents(1050).to_string(), "10.50");
        assert_eq!(Coin::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Coin::from_cents(7).with_symbol(), "\u{20A2}0.07");
    }

    #[test]
    fn luck_is_zero_before_any_play() {
        let record = UserRecord::new("u1");
        assert_eq!(record.guess_luck(), 0.0);
        assert_eq!(record.schema_version, USER_SCHEMA_VERSION);
        assert!(record.daily.is_none());
    }
}
