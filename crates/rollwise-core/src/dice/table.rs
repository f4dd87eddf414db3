//! Exact sum distribution for two six-sided dice.

use crate::model::distance::{Distance, TargetSet};
use once_cell::sync::Lazy;

pub const FACES: u8 = 6;
pub const OUTCOMES: u8 = FACES * FACES;

static SHARED: Lazy<ProbabilityTable> = Lazy::new(ProbabilityTable::build);

/// Every ordered `(d1, d2)` pair, 36 in total.
pub fn outcomes() -> impl Iterator<Item = (u8, u8)> {
    (1..=FACES).flat_map(|d1| (1..=FACES).map(move |d2| (d1, d2)))
}

/// Number of outcomes per sum, indexed by [`Distance::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbabilityTable {
    counts: [u8; 11],
}

impl ProbabilityTable {
    pub fn build() -> Self {
        let mut counts = [0u8; 11];
        for (d1, d2) in outcomes() {
            if let Some(distance) = Distance::new(d1 + d2) {
                counts[distance.index()] += 1;
            }
        }
        Self { counts }
    }

    /// Process-wide table, built on first use.
    pub fn shared() -> &'static ProbabilityTable {
        &SHARED
    }

    pub fn count(&self, distance: Distance) -> u8 {
        self.counts[distance.index()]
    }

    pub fn probability(&self, distance: Distance) -> f64 {
        f64::from(self.count(distance)) / f64::from(OUTCOMES)
    }

    /// Probability for an arbitrary sum; impossible sums are 0.
    pub fn lookup(&self, sum: i64) -> f64 {
        Distance::try_from(sum)
            .map(|distance| self.probability(distance))
            .unwrap_or(0.0)
    }

    /// Outcomes that land on any of `targets`.
    pub fn hits(&self, targets: &TargetSet) -> u8 {
        targets.iter().map(|distance| self.count(distance)).sum()
    }

    /// Probability of landing on any of `targets`.
    ///
    /// Counts are summed before dividing so that sums which are exact
    /// fractions of 36 (e.g. 18/36) compare cleanly against band thresholds.
    pub fn cumulative(&self, targets: &TargetSet) -> f64 {
        f64::from(self.hits(targets)) / f64::from(OUTCOMES)
    }

    /// `(distance, probability)` for 2 through 12.
    pub fn entries(&self) -> impl Iterator<Item = (Distance, f64)> + '_ {
        Distance::ALL
            .iter()
            .map(move |&distance| (distance, self.probability(distance)))
    }
}
