//! Probability bands that map a landing chance onto a stake multiplier.
//!
//! A [`BandTable`] is plain data: an ordered list of `(min, label)` pairs with
//! strictly descending minimums, the last of which must be `0.0`. Lookups walk
//! the list from the top and return the first band whose minimum the
//! probability meets, so every input lands in exactly one band.

use crate::model::multiplier::Multiplier;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row of a band table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub label: Multiplier,
}

impl Band {
    pub const fn new(min: f64, label: Multiplier) -> Self {
        Self { min, label }
    }
}

/// Named band tables that have shipped over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Seven bands, everything under 20% collapses to `1`.
    #[default]
    Reference,
    /// Eight bands reaching down to a 5% cutoff for `2`.
    LegacyEightBand,
}

impl Preset {
    pub fn bands(self) -> &'static [Band] {
        match self {
            Preset::Reference => &REFERENCE_BANDS,
            Preset::LegacyEightBand => &LEGACY_EIGHT_BANDS,
        }
    }
}

const REFERENCE_BANDS: [Band; 7] = [
    Band::new(0.75, Multiplier::AboveHundred),
    Band::new(0.60, Multiplier::Hundred),
    Band::new(0.50, Multiplier::Fifty),
    Band::new(0.40, Multiplier::Twenty),
    Band::new(0.30, Multiplier::Ten),
    Band::new(0.20, Multiplier::Five),
    Band::new(0.0, Multiplier::One),
];

const LEGACY_EIGHT_BANDS: [Band; 8] = [
    Band::new(0.60, Multiplier::AboveHundred),
    Band::new(0.50, Multiplier::Hundred),
    Band::new(0.40, Multiplier::Fifty),
    Band::new(0.30, Multiplier::Twenty),
    Band::new(0.20, Multiplier::Ten),
    Band::new(0.10, Multiplier::Five),
    Band::new(0.05, Multiplier::Two),
    Band::new(0.0, Multiplier::One),
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BandTableError {
    #[error("band table must contain at least one band")]
    Empty,
    #[error("band {index}: minimum {min} is not a probability in [0, 1]")]
    OutOfRange { index: usize, min: f64 },
    #[error("band {index}: minimum {min} must be strictly below the previous minimum {previous}")]
    NotDescending { index: usize, min: f64, previous: f64 },
    #[error("lowest band minimum is {min}; it must be 0 so every probability is covered")]
    Uncovered { min: f64 },
}

#[derive(Debug, Error)]
pub enum PolicyLoadError {
    #[error("failed to parse band table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid band table: {0}")]
    Invalid(#[from] BandTableError),
}

/// Validated, ordered band table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Band>", into = "Vec<Band>")]
pub struct BandTable {
    bands: Vec<Band>,
}

impl BandTable {
    pub fn new(bands: Vec<Band>) -> Result<Self, BandTableError> {
        validate(&bands)?;
        Ok(Self { bands })
    }

    pub fn reference() -> Self {
        Self::from_preset(Preset::Reference)
    }

    pub fn legacy_eight_band() -> Self {
        Self::from_preset(Preset::LegacyEightBand)
    }

    pub fn from_preset(preset: Preset) -> Self {
        Self {
            bands: preset.bands().to_vec(),
        }
    }

    /// Parses a JSON array of `{"min": .., "label": ..}` objects.
    pub fn from_json(json: &str) -> Result<Self, PolicyLoadError> {
        let bands: Vec<Band> = serde_json::from_str(json)?;
        Ok(Self::new(bands)?)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.bands)
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Index of the band `probability` falls in. NaN and negative inputs
    /// land in the bottom band; anything above 1 lands in the top band.
    pub fn band_index(&self, probability: f64) -> usize {
        self.bands
            .iter()
            .position(|band| probability >= band.min)
            .unwrap_or(self.bands.len() - 1)
    }

    pub fn classify(&self, probability: f64) -> Multiplier {
        self.bands[self.band_index(probability)].label
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl TryFrom<Vec<Band>> for BandTable {
    type Error = BandTableError;

    fn try_from(bands: Vec<Band>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<BandTable> for Vec<Band> {
    fn from(table: BandTable) -> Self {
        table.bands
    }
}

impl From<Preset> for BandTable {
    fn from(preset: Preset) -> Self {
        Self::from_preset(preset)
    }
}

fn validate(bands: &[Band]) -> Result<(), BandTableError> {
    let Some(last) = bands.last() else {
        return Err(BandTableError::Empty);
    };

    for (index, band) in bands.iter().enumerate() {
        if !band.min.is_finite() || !(0.0..=1.0).contains(&band.min) {
            return Err(BandTableError::OutOfRange {
                index,
                min: band.min,
            });
        }
        if index > 0 {
            let previous = bands[index - 1].min;
            if band.min >= previous {
                return Err(BandTableError::NotDescending {
                    index,
                    min: band.min,
                    previous,
                });
            }
        }
    }

    if last.min != 0.0 {
        return Err(BandTableError::Uncovered { min: last.min });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> impl Iterator<Item = f64> {
        (0..=1000).map(|i| i as f64 / 1000.0)
    }

    #[test]
    fn presets_pass_validation() {
        for preset in [Preset::Reference, Preset::LegacyEightBand] {
            BandTable::new(preset.bands().to_vec()).expect("preset validates");
        }
        assert_eq!(BandTable::reference().len(), 7);
        assert_eq!(BandTable::legacy_eight_band().len(), 8);
    }

    #[test]
    fn reference_boundaries_are_inclusive() {
        let table = BandTable::reference();
        assert_eq!(table.classify(0.75), Multiplier::AboveHundred);
        assert_eq!(table.classify(0.7499), Multiplier::Hundred);
        assert_eq!(table.classify(0.60), Multiplier::Hundred);
        assert_eq!(table.classify(0.50), Multiplier::Fifty);
        assert_eq!(table.classify(0.40), Multiplier::Twenty);
        assert_eq!(table.classify(0.30), Multiplier::Ten);
        assert_eq!(table.classify(0.20), Multiplier::Five);
        assert_eq!(table.classify(0.1999), Multiplier::One);
        assert_eq!(table.classify(0.0), Multiplier::One);
    }

    #[test]
    fn legacy_table_has_two_band() {
        let table = BandTable::legacy_eight_band();
        assert_eq!(table.classify(0.06), Multiplier::Two);
        assert_eq!(table.classify(0.04), Multiplier::One);
        assert_eq!(table.classify(0.65), Multiplier::AboveHundred);
    }

    #[test]
    fn classify_is_total_and_deterministic() {
        for table in [BandTable::reference(), BandTable::legacy_eight_band()] {
            for p in sample_points() {
                let first = table.classify(p);
                assert_eq!(first, table.classify(p));
                let matching = table.bands().iter().filter(|b| p >= b.min).count();
                assert!(matching >= 1, "no band for {p}");
            }
        }
    }

    #[test]
    fn classify_is_monotonic() {
        for table in [BandTable::reference(), BandTable::legacy_eight_band()] {
            let points: Vec<f64> = sample_points().collect();
            for pair in points.windows(2) {
                let (low, high) = (pair[0], pair[1]);
                assert!(table.band_index(high) <= table.band_index(low));
                assert!(table.classify(high) >= table.classify(low));
            }
        }
    }

    #[test]
    fn odd_inputs_still_classify() {
        let table = BandTable::reference();
        assert_eq!(table.classify(f64::NAN), Multiplier::One);
        assert_eq!(table.classify(-0.5), Multiplier::One);
        assert_eq!(table.classify(1.5), Multiplier::AboveHundred);
    }

    #[test]
    fn rejects_malformed_tables() {
        assert_eq!(BandTable::new(vec![]), Err(BandTableError::Empty));

        let err = BandTable::new(vec![
            Band::new(0.3, Multiplier::Ten),
            Band::new(0.5, Multiplier::Fifty),
            Band::new(0.0, Multiplier::One),
        ])
        .unwrap_err();
        assert!(matches!(err, BandTableError::NotDescending { index: 1, .. }));

        let err = BandTable::new(vec![
            Band::new(0.5, Multiplier::Fifty),
            Band::new(0.1, Multiplier::Five),
        ])
        .unwrap_err();
        assert!(matches!(err, BandTableError::Uncovered { .. }));

        let err = BandTable::new(vec![
            Band::new(1.2, Multiplier::Fifty),
            Band::new(0.0, Multiplier::One),
        ])
        .unwrap_err();
        assert!(matches!(err, BandTableError::OutOfRange { index: 0, .. }));
    }

    #[test]
    fn single_band_table_is_valid() {
        let table = BandTable::new(vec![Band::new(0.0, Multiplier::Two)]).unwrap();
        assert_eq!(table.classify(0.9), Multiplier::Two);
    }

    #[test]
    fn loads_from_json_and_validates() {
        let json = r#"[
            {"min": 0.5, "label": "100"},
            {"min": 0.25, "label": "10"},
            {"min": 0.0, "label": "1"}
        ]"#;
        let table = BandTable::from_json(json).expect("valid json table");
        assert_eq!(table.classify(0.3), Multiplier::Ten);

        let broken = r#"[{"min": 0.5, "label": "100"}]"#;
        assert!(matches!(
            BandTable::from_json(broken),
            Err(PolicyLoadError::Invalid(BandTableError::Uncovered { .. }))
        ));
        assert!(matches!(
            BandTable::from_json("not json"),
            Err(PolicyLoadError::Parse(_))
        ));
    }

    #[test]
    fn json_roundtrip_preserves_reference() {
        let json = BandTable::reference().to_json().unwrap();
        assert_eq!(BandTable::from_json(&json).unwrap(), BandTable::reference());
    }
}
