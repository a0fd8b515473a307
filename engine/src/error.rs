use thiserror::Error;

use crate::dice::Modifier;

/// Failures while parsing dice notation. Rolling a parsed expression never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("syntax error at offset {offset} in '{input}': {reason}")]
    Syntax {
        input: String,
        offset: usize,
        reason: String,
    },
    #[error("invalid modifier {modifier} on {count} dice (must be between 1 and {count})")]
    InvalidModifier { modifier: Modifier, count: u32 },
    #[error("{what} {value} exceeds the maximum of {max}")]
    LimitExceeded {
        what: &'static str,
        value: u64,
        max: u64,
    },
}

/// Failures from ruleset lookups and character math.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("unsupported ruleset '{0}' (expected one of dnd2014, dnd2024, tov)")]
    UnsupportedVariant(String),
    #[error("class '{class}' is not available in {ruleset}")]
    UnsupportedClass { ruleset: String, class: String },
    #[error("species '{species}' is not available in {ruleset}")]
    UnsupportedSpecies { ruleset: String, species: String },
    #[error("subspecies '{subspecies}' is not available in {ruleset}")]
    UnsupportedSubspecies { ruleset: String, subspecies: String },
    #[error("background '{background}' is not available in {ruleset}")]
    UnsupportedBackground { ruleset: String, background: String },
    #[error("{what} {value} is outside {min}..={max}")]
    Range {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("a character needs at least one class level")]
    EmptyClassList,
}

/// Umbrella error for the facade in [`crate::api`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Dice(#[from] DiceError),
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error("failed to read character YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to read character JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown builtin character '{0}'")]
    UnknownBuiltin(String),
}

impl RulesError {
    pub(crate) fn range(what: &'static str, value: impl Into<i64>, min: i64, max: i64) -> Self {
        RulesError::Range {
            what,
            value: value.into(),
            min,
            max,
        }
    }
}
