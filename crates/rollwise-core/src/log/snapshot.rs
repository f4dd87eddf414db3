use serde::{Deserialize, Serialize};

use super::record::LogRecord;
use super::roll_log::{LogSummary, RollLog};

/// In-memory JSON hand-off of a roll log to a display surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogSnapshot {
    pub records: Vec<LogRecord>,
    #[serde(default, skip_deserializing)]
    pub summary: Option<LogSummary>,
}

impl LogSnapshot {
    pub fn capture(log: &RollLog) -> Self {
        LogSnapshot {
            records: log.snapshot().to_vec(),
            summary: log.summary(),
        }
    }

    pub fn restore(self) -> RollLog {
        RollLog::from(self.records)
    }

    pub fn to_json(log: &RollLog) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(log))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
