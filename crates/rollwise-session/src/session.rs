//! Per-user session state held by a display surface between interactions.

use std::fs;
use std::path::Path;

use rollwise_core::log::{ExportError, export_csv};
use rollwise_core::policy::recommend;
use rollwise_core::{
    BandTable, Distance, InvalidTargetFormat, LogDraft, LogRecord, Recommendation, RollLog,
    TargetSet, parse_targets,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{SessionConfig, ValidationError};

/// Something the surface may want to react to after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Logged { index: usize },
    SelectionCleared,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to create export directory {path:?}: {source}")]
    CreateDir {
        #[source]
        source: std::io::Error,
        path: std::path::PathBuf,
    },
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Active band table, current selection and the roll log for one player.
#[derive(Debug, Clone)]
pub struct Session {
    bands: BandTable,
    targets: TargetSet,
    log: RollLog,
    clear_after_log: bool,
}

impl Session {
    pub fn new(bands: BandTable, targets: TargetSet, clear_after_log: bool) -> Self {
        Self {
            bands,
            targets,
            log: RollLog::new(),
            clear_after_log,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self, ValidationError> {
        Ok(Self::new(
            config.policy.band_table()?,
            config.selection.target_set(),
            config.selection.clear_after_log,
        ))
    }

    pub fn bands(&self) -> &BandTable {
        &self.bands
    }

    pub fn replace_bands(&mut self, bands: BandTable) {
        debug!(bands = bands.len(), "band table replaced");
        self.bands = bands;
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    pub fn select_targets(&mut self, targets: TargetSet) {
        self.targets = targets;
    }

    /// Replaces the selection from free text, returning the dropped tokens.
    pub fn select_from_text(&mut self, raw: &str) -> Vec<InvalidTargetFormat> {
        let parsed = parse_targets(raw);
        for issue in &parsed.dropped {
            warn!(%issue, "ignored target token");
        }
        self.targets = parsed.targets;
        parsed.dropped
    }

    pub fn recommendation(&self) -> Recommendation {
        recommend(&self.bands, &self.targets)
    }

    /// Starts a log entry for `roll` with hit and multiplier pre-filled from
    /// the current selection.
    pub fn draft(&self, roll: Distance) -> LogDraft {
        LogDraft::new(roll, &self.targets, self.recommendation().multiplier())
    }

    pub fn submit(&mut self, draft: LogDraft) -> Vec<SessionEvent> {
        let index = self.log.append(draft.finish());
        let mut events = vec![SessionEvent::Logged { index }];
        if self.clear_after_log && !self.targets.is_empty() {
            self.targets.clear();
            events.push(SessionEvent::SelectionCleared);
        }
        events
    }

    pub fn log(&self) -> &RollLog {
        &self.log
    }

    pub fn records(&self) -> &[LogRecord] {
        self.log.snapshot()
    }

    /// Writes the log as CSV, creating parent directories as needed.
    pub fn export_csv(&self, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SessionError::CreateDir {
                source,
                path: parent.to_path_buf(),
            })?;
        }
        export_csv(path, self.log.snapshot())?;
        info!(path = %path.display(), rows = self.log.len(), "roll log exported");
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(BandTable::reference(), TargetSet::new(), true)
    }
}
