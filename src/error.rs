//! Construction errors.

use core::fmt;
use thiserror::Error;

/// One of the four capabilities a table cannot operate without.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StrategyPart {
    Hash,
    Equals,
    DestroyKey,
    DestroyValue,
}

impl fmt::Display for StrategyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrategyPart::Hash => "hash",
            StrategyPart::Equals => "equals",
            StrategyPart::DestroyKey => "destroy_key",
            StrategyPart::DestroyValue => "destroy_value",
        })
    }
}

/// Returned when a table is configured incompletely or inconsistently.
/// No table is created in that case.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    #[error("missing required strategy: {0}")]
    MissingStrategy(StrategyPart),

    #[error("initial capacity must be a non-zero power of two, got {0}")]
    InvalidCapacity(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_part() {
        let e = ConfigError::MissingStrategy(StrategyPart::DestroyValue);
        assert_eq!(e.to_string(), "missing required strategy: destroy_value");

        let e = ConfigError::InvalidCapacity(12);
        assert_eq!(
            e.to_string(),
            "initial capacity must be a non-zero power of two, got 12"
        );
    }
}
