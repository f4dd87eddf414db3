use core::fmt;

use serde::Serialize;
use tracing::debug;

use super::bands::BandTable;
use crate::dice::ProbabilityTable;
use crate::model::distance::TargetSet;
use crate::model::multiplier::Multiplier;

/// Result of a landing-probability query.
///
/// An empty selection is reported as [`Recommendation::NoTarget`] rather than
/// a zero probability so a caller never mistakes "nothing asked" for "asked
/// about something that cannot happen".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendation {
    NoTarget {
        /// What the active bands say for a probability of zero.
        multiplier: Multiplier,
    },
    Targeted {
        probability: f64,
        multiplier: Multiplier,
    },
}

impl Recommendation {
    pub fn is_no_target(&self) -> bool {
        matches!(self, Recommendation::NoTarget { .. })
    }

    pub fn probability(&self) -> Option<f64> {
        match self {
            Recommendation::NoTarget { .. } => None,
            Recommendation::Targeted { probability, .. } => Some(*probability),
        }
    }

    pub fn multiplier(&self) -> Multiplier {
        match self {
            Recommendation::NoTarget { multiplier } | Recommendation::Targeted { multiplier, .. } => {
                *multiplier
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::NoTarget { .. } => f.write_str("no target selected"),
            Recommendation::Targeted {
                probability,
                multiplier,
            } => write!(
                f,
                "{} landing chance, suggested {}",
                format_percent(*probability),
                multiplier.badge()
            ),
        }
    }
}

/// Renders a probability as a percentage with two decimals, e.g. `44.44%`.
pub fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// Sums the landing chance over `targets` and classifies it with `bands`.
pub fn recommend_with(
    table: &ProbabilityTable,
    bands: &BandTable,
    targets: &TargetSet,
) -> Recommendation {
    if targets.is_empty() {
        return Recommendation::NoTarget {
            multiplier: bands.classify(0.0),
        };
    }

    let probability = table.cumulative(targets);
    let multiplier = bands.classify(probability);
    debug!(
        targets = %targets,
        probability,
        multiplier = multiplier.as_str(),
        "recommendation computed"
    );
    Recommendation::Targeted {
        probability,
        multiplier,
    }
}

/// [`recommend_with`] against the shared probability table.
pub fn recommend(bands: &BandTable, targets: &TargetSet) -> Recommendation {
    recommend_with(ProbabilityTable::shared(), bands, targets)
}
