use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stake multiplier offered by the game, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Multiplier {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "20")]
    Twenty,
    #[serde(rename = "50")]
    Fifty,
    #[serde(rename = "100")]
    Hundred,
    #[serde(rename = ">100")]
    AboveHundred,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown multiplier label '{0}'")]
pub struct UnknownMultiplier(pub String);

impl Multiplier {
    pub const ORDERED: [Multiplier; 8] = [
        Multiplier::One,
        Multiplier::Two,
        Multiplier::Five,
        Multiplier::Ten,
        Multiplier::Twenty,
        Multiplier::Fifty,
        Multiplier::Hundred,
        Multiplier::AboveHundred,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Multiplier::One => "1",
            Multiplier::Two => "2",
            Multiplier::Five => "5",
            Multiplier::Ten => "10",
            Multiplier::Twenty => "20",
            Multiplier::Fifty => "50",
            Multiplier::Hundred => "100",
            Multiplier::AboveHundred => ">100",
        }
    }

    /// Label as shown next to the dice button, e.g. `x20`.
    pub fn badge(self) -> String {
        format!("x{}", self.as_str())
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Multiplier {
    type Err = UnknownMultiplier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let label = trimmed
            .strip_prefix('x')
            .or_else(|| trimmed.strip_prefix('X'))
            .unwrap_or(trimmed);
        Multiplier::ORDERED
            .iter()
            .copied()
            .find(|m| m.as_str() == label)
            .ok_or_else(|| UnknownMultiplier(s.to_string()))
    }
}
