// Configuration errors.
//
// Generation itself never fails with an error: a missing site is a `false`
// return and a refused entity is skipped. The only fallible surface is
// loading and validating an `EnclosureConfig`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A probability outside `[0, 1]` (or NaN).
    #[error("{field} must be a probability in [0, 1], got {value}")]
    InvalidChance { field: &'static str, value: f32 },

    /// A bound, radius, or count that must be positive.
    #[error("{field} must be at least {min}, got {value}")]
    InvalidBound {
        field: &'static str,
        min: i64,
        value: i64,
    },
}
