//! Balance ledger: signed coin deltas with two-place rounding.

use super::errors::EconomyError;
use super::storage::UserStore;
use super::types::Coin;

/// Coerce user-supplied text into an amount. Accepts an optional leading
/// currency glyph and surrounding whitespace.
pub fn parse_amount(input: &str) -> Result<f64, EconomyError> {
    let cleaned = input
        .trim()
        .trim_start_matches(super::constants::CURRENCY_SYMBOL)
        .trim();
    let value: f64 = cleaned
        .parse()
        .map_err(|_| EconomyError::InvalidAmount(input.to_string()))?;
    if !value.is_finite() {
        return Err(EconomyError::InvalidAmount(input.to_string()));
    }
    Ok(value)
}

/// Add `amount` (negative for costs) to the user's balance and persist.
///
/// The new balance is validated before the record is touched, so a bad
/// amount never results in a write. Returns the balance after the change.
pub fn apply_delta<S: UserStore>(
    store: &S,
    user_id: &str,
    amount: f64,
) -> Result<Coin, EconomyError> {
    let mut user = store.get(user_id)?;
    let before = user.coin;
    user.coin = before.add_f64(amount)?;
    store.save(&user)?;
    log::debug!(
        "ledger: {} {:+.2} ({} -> {})",
        user_id,
        amount,
        before,
        user.coin
    );
    Ok(user.coin)
}

/// Current balance. Read-only.
pub fn balance<S: UserStore>(store: &S, user_id: &str) -> Result<Coin, EconomyError> {
    Ok(store.get(user_id)?.coin)
}
