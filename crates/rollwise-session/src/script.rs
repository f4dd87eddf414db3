//! Replays a YAML list of observed rolls through a [`Session`].
//!
//! ```yaml
//! entries:
//!   - targets: "6, 7, 8"
//!     roll: 6
//!     note: Chance
//!   - roll: 9
//!     hit: true
//!     multiplier: "5"
//! ```
//!
//! `targets` re-selects before drafting; omitted `hit` and `multiplier`
//! fall back to what the session pre-fills.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rollwise_core::{Distance, Multiplier, TileEvent};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::{Session, SessionEvent};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReplayScript {
    #[serde(default)]
    pub entries: Vec<ReplayEntry>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReplayEntry {
    #[serde(default)]
    pub targets: Option<String>,
    pub roll: Distance,
    #[serde(default)]
    pub hit: Option<bool>,
    #[serde(default)]
    pub multiplier: Option<Multiplier>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read replay script {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse replay script {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
}

/// Counts gathered while replaying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub logged: usize,
    pub dropped_tokens: usize,
    pub overridden_hits: usize,
    pub selections_cleared: usize,
}

impl ReplayScript {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ScriptError::Read {
            source,
            path: path.to_path_buf(),
        })?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|source| ScriptError::Parse {
            source,
            path: path.to_path_buf(),
        })
    }

    pub fn run(&self, session: &mut Session) -> ReplayReport {
        let mut report = ReplayReport::default();
        for entry in &self.entries {
            if let Some(raw) = &entry.targets {
                report.dropped_tokens += session.select_from_text(raw).len();
            }

            let mut draft = session.draft(entry.roll);
            if let Some(hit) = entry.hit {
                draft = draft.with_hit(hit);
            }
            if draft.hit_overridden() {
                report.overridden_hits += 1;
            }
            if let Some(multiplier) = entry.multiplier {
                draft = draft.with_multiplier(multiplier);
            }
            if let Some(note) = &entry.note {
                draft = match note.parse::<TileEvent>() {
                    Ok(tile) => draft.with_tile(tile),
                    Err(_) => draft.with_note(note.clone()),
                };
            }

            for event in session.submit(draft) {
                match event {
                    SessionEvent::Logged { .. } => report.logged += 1,
                    SessionEvent::SelectionCleared => report.selections_cleared += 1,
                }
            }
        }
        report
    }
}
