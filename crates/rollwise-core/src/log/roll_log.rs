use serde::Serialize;
use tracing::trace;

use super::record::LogRecord;

/// Append-only, insertion-ordered roll history for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollLog {
    records: Vec<LogRecord>,
}

/// Aggregate view over a non-empty log. Only [`RollLog::summary`] builds
/// one, so `hits <= total` and `total > 0` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogSummary {
    total: usize,
    hits: usize,
}

impl LogSummary {
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.total.saturating_sub(self.hits)
    }

    pub fn hit_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.hits as f64 / self.total as f64
    }
}

impl RollLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `record` at the end and returns its position.
    pub fn append(&mut self, record: LogRecord) -> usize {
        let index = self.records.len();
        trace!(
            index,
            roll = record.roll().value(),
            hit = record.hit(),
            multiplier = record.multiplier().as_str(),
            "roll logged"
        );
        self.records.push(record);
        index
    }

    /// Consuming form of [`RollLog::append`].
    pub fn appended(mut self, record: LogRecord) -> Self {
        self.append(record);
        self
    }

    /// Every record so far, in append order.
    pub fn snapshot(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `None` while nothing has been logged.
    pub fn summary(&self) -> Option<LogSummary> {
        if self.records.is_empty() {
            return None;
        }
        Some(LogSummary {
            total: self.records.len(),
            hits: self.records.iter().filter(|r| r.hit()).count(),
        })
    }
}

impl From<Vec<LogRecord>> for RollLog {
    fn from(records: Vec<LogRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a RollLog {
    type Item = &'a LogRecord;
    type IntoIter = std::slice::Iter<'a, LogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::distance::Distance;
    use crate::model::multiplier::Multiplier;

    fn record(roll: u8, hit: bool) -> LogRecord {
        LogRecord::new(Distance::new(roll).unwrap(), hit, Multiplier::Ten, "")
    }

    #[test]
    fn append_preserves_order() {
        let log = RollLog::new()
            .appended(record(6, true))
            .appended(record(9, false));
        let rolls: Vec<u8> = log.iter().map(|r| r.roll().value()).collect();
        assert_eq!(rolls, vec![6, 9]);
    }

    #[test]
    fn append_grows_by_one_and_keeps_prior_records() {
        let mut log = RollLog::new();
        assert_eq!(log.append(record(5, false)), 0);
        let before = log.snapshot().to_vec();
        assert_eq!(log.append(record(8, true)), 1);
        assert_eq!(log.len(), 2);
        assert_eq!(&log.snapshot()[..1], before.as_slice());
    }

    #[test]
    fn snapshot_keeps_duplicates() {
        let mut log = RollLog::new();
        for _ in 0..3 {
            log.append(record(7, true));
        }
        assert_eq!(log.snapshot().len(), 3);
    }

    #[test]
    fn empty_log_has_no_summary() {
        let log = RollLog::new();
        assert!(log.is_empty());
        assert_eq!(log.summary(), None);
    }

    #[test]
    fn summary_counts_hits() {
        let log = RollLog::from(vec![record(6, true), record(9, false), record(6, true)]);
        let summary = log.summary().unwrap();
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.hits(), 2);
        assert_eq!(summary.misses(), 1);
        assert!((summary.hit_rate() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn all_hit_log_has_no_misses() {
        let log = RollLog::from(vec![record(7, true), record(7, true)]);
        let summary = log.summary().unwrap();
        assert_eq!(summary.misses(), 0);
        assert_eq!(summary.hit_rate(), 1.0);
    }

    #[test]
    fn all_miss_log_has_zero_rate() {
        let log = RollLog::from(vec![record(2, false)]);
        let summary = log.summary().unwrap();
        assert_eq!(summary.hits(), 0);
        assert_eq!(summary.misses(), 1);
        assert_eq!(summary.hit_rate(), 0.0);
    }
}
