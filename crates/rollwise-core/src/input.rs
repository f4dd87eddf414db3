//! Lenient parsing of typed-in target lists such as `"6, 7 8"`.

use thiserror::Error;

use crate::model::distance::{Distance, TargetSet};

/// Why a token was left out of the parsed target set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTargetFormat {
    #[error("'{0}' is not a whole number")]
    NotANumber(String),
    #[error("{0} cannot be rolled with two dice")]
    OutOfRange(i64),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTargets {
    pub targets: TargetSet,
    /// Tokens that were dropped, in input order. Informational only.
    pub dropped: Vec<InvalidTargetFormat>,
}

/// Splits on commas, semicolons and whitespace. Bad tokens never fail the
/// parse; they are skipped and listed in [`ParsedTargets::dropped`].
pub fn parse_targets(raw: &str) -> ParsedTargets {
    let mut parsed = ParsedTargets::default();
    for token in raw
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        match token.parse::<i64>() {
            Ok(value) => match Distance::try_from(value) {
                Ok(distance) => {
                    parsed.targets.insert(distance);
                }
                Err(_) => parsed.dropped.push(InvalidTargetFormat::OutOfRange(value)),
            },
            Err(_) => parsed
                .dropped
                .push(InvalidTargetFormat::NotANumber(token.to_string())),
        }
    }
    parsed
}
