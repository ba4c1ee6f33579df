use thiserror::Error;

/// Errors that can arise from economy operations and the user record store.
#[derive(Debug, Error)]
pub enum EconomyError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around IO errors (store directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when deserializing a record with an unexpected schema version.
    #[error("schema mismatch for {entity}: expected {expected}, got {found}")]
    SchemaMismatch {
        entity: &'static str,
        expected: u8,
        found: u8,
    },

    /// Amount could not be coerced into a finite number of coins.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Guess range outside the priced table (or zero, which has no odds).
    #[error("guess range {n} is outside 1..={max}")]
    GuessRange { n: usize, max: usize },

    /// Player picked a number outside `1..=n`.
    #[error("pick {pick} is outside 1..={n}")]
    InvalidPick { pick: u32, n: usize },

    /// Balance too low to pay an entry cost.
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: String, available: String },
}
