//! Named economy constants. Prices derived from these are compared against
//! values users have already seen, so changing any of them changes the game.

/// Currency glyph used in chat output (the cruzeiro sign).
pub const CURRENCY_SYMBOL: char = '\u{20A2}';

/// Base daily award in whole coins.
pub const DAILY_AWARD: u32 = 10;
/// Award when the daily draw matches the player's lucky number.
pub const DAILY_JACKPOT_AWARD: u32 = 500;
/// Daily draw is uniform over `1..=DAILY_DRAW_MAX`.
pub const DAILY_DRAW_MAX: u32 = 100;
/// Lucky number meaning "no guess supplied"; the drawn number is not revealed.
pub const NO_LUCKY_NUMBER: u32 = 0;

/// Largest guess range with a listed price.
pub const GUESS_MAX_RANGE: usize = 20;

/// Payout for correctly guessing 1-in-`n`, indexed by `n`.
pub const GUESS_PAYOUTS: [u32; GUESS_MAX_RANGE + 1] = [
    0, 7, 2, 4, 7, 11, 15, 20, 25, 30, 36, 42, 49, 56, 64, 72, 80, 95, 120, 150, 200,
];

/// Ranges at or below this are free to play.
pub const GUESS_FREE_MAX_RANGE: usize = 2;
/// Curvature of the cost penalty away from the sweet spot.
pub const GUESS_DAMPENER: f64 = 0.0095;
/// Range where the player gets the best price.
pub const GUESS_SWEET_SPOT: i64 = 8;
/// Discount under fair odds at the sweet spot.
pub const GUESS_FAVOR: f64 = 1.3;
