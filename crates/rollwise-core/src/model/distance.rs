use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// A board distance reachable with one roll of two six-sided dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Distance(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("distance {0} is outside 2..=12")]
pub struct DistanceOutOfRange(pub i64);

impl Distance {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 12;

    pub const ALL: [Distance; 11] = [
        Distance(2),
        Distance(3),
        Distance(4),
        Distance(5),
        Distance(6),
        Distance(7),
        Distance(8),
        Distance(9),
        Distance(10),
        Distance(11),
        Distance(12),
    ];

    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Distance(value))
        } else {
            None
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Position of this distance inside [`Distance::ALL`].
    pub const fn index(self) -> usize {
        (self.0 - Self::MIN) as usize
    }
}

impl TryFrom<i64> for Distance {
    type Error = DistanceOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Distance::new)
            .ok_or(DistanceOutOfRange(value))
    }
}

impl From<Distance> for u8 {
    fn from(distance: Distance) -> Self {
        distance.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Distinct target distances for a single probability query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSet {
    distances: BTreeSet<Distance>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from raw integers, skipping anything outside 2..=12.
    pub fn from_raw<I>(values: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        values
            .into_iter()
            .filter_map(|value| Distance::try_from(value).ok())
            .collect()
    }

    pub fn insert(&mut self, distance: Distance) -> bool {
        self.distances.insert(distance)
    }

    pub fn remove(&mut self, distance: Distance) -> bool {
        self.distances.remove(&distance)
    }

    pub fn contains(&self, distance: Distance) -> bool {
        self.distances.contains(&distance)
    }

    pub fn clear(&mut self) {
        self.distances.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Distances in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Distance> + '_ {
        self.distances.iter().copied()
    }
}

impl FromIterator<Distance> for TargetSet {
    fn from_iter<T: IntoIterator<Item = Distance>>(iter: T) -> Self {
        Self {
            distances: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for TargetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for distance in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{distance}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Distance, DistanceOutOfRange, TargetSet};

    #[test]
    fn new_accepts_only_two_dice_sums() {
        assert_eq!(Distance::new(1), None);
        assert_eq!(Distance::new(13), None);
        assert_eq!(Distance::new(7).map(Distance::value), Some(7));
    }

    #[test]
    fn try_from_reports_offending_value() {
        assert_eq!(Distance::try_from(-3), Err(DistanceOutOfRange(-3)));
        assert_eq!(Distance::try_from(300), Err(DistanceOutOfRange(300)));
        assert!(Distance::try_from(12).is_ok());
    }

    #[test]
    fn all_is_ordered_and_indexed() {
        for (i, distance) in Distance::ALL.iter().enumerate() {
            assert_eq!(distance.index(), i);
        }
        assert_eq!(Distance::ALL[0].value(), Distance::MIN);
        assert_eq!(Distance::ALL[10].value(), Distance::MAX);
    }

    #[test]
    fn from_raw_dedups_and_skips_out_of_range() {
        let set = TargetSet::from_raw([8, 7, 6, 7, 0, 13, -1]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), "6, 7, 8");
    }

    #[test]
    fn serde_rejects_out_of_range_distance() {
        assert!(serde_json::from_str::<Distance>("14").is_err());
        let parsed: Distance = serde_json::from_str("9").unwrap();
        assert_eq!(parsed.value(), 9);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "9");
    }
}
