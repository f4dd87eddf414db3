use serde::{Deserialize, Serialize};

use crate::model::distance::{Distance, TargetSet};
use crate::model::multiplier::Multiplier;
use crate::model::note::TileEvent;

/// One observed roll as confirmed by the player. Fields are fixed once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    roll: Distance,
    hit: bool,
    multiplier: Multiplier,
    #[serde(default)]
    note: String,
}

impl LogRecord {
    pub fn new(roll: Distance, hit: bool, multiplier: Multiplier, note: impl Into<String>) -> Self {
        Self {
            roll,
            hit,
            multiplier,
            note: note.into(),
        }
    }

    pub fn roll(&self) -> Distance {
        self.roll
    }

    pub fn hit(&self) -> bool {
        self.hit
    }

    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    pub fn note(&self) -> &str {
        &self.note
    }
}

/// A record being prepared for the log.
///
/// `hit` starts out as "roll is one of the active targets" and can be
/// overridden before [`LogDraft::finish`]. The targets are only consulted
/// when the draft is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDraft {
    roll: Distance,
    detected_hit: bool,
    hit: bool,
    multiplier: Multiplier,
    note: String,
}

impl LogDraft {
    pub fn new(roll: Distance, targets: &TargetSet, multiplier: Multiplier) -> Self {
        let detected_hit = targets.contains(roll);
        Self {
            roll,
            detected_hit,
            hit: detected_hit,
            multiplier,
            note: String::new(),
        }
    }

    pub fn with_hit(mut self, hit: bool) -> Self {
        self.hit = hit;
        self
    }

    pub fn with_multiplier(mut self, multiplier: Multiplier) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_tile(self, tile: TileEvent) -> Self {
        self.with_note(tile.as_str())
    }

    pub fn roll(&self) -> Distance {
        self.roll
    }

    pub fn hit(&self) -> bool {
        self.hit
    }

    pub fn detected_hit(&self) -> bool {
        self.detected_hit
    }

    pub fn hit_overridden(&self) -> bool {
        self.hit != self.detected_hit
    }

    pub fn finish(self) -> LogRecord {
        LogRecord::new(self.roll, self.hit, self.multiplier, self.note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: u8) -> Distance {
        Distance::new(value).unwrap()
    }

    #[test]
    fn hit_defaults_to_target_membership() {
        let targets = TargetSet::from_raw([6, 7, 8]);
        assert!(LogDraft::new(d(7), &targets, Multiplier::Twenty).hit());
        assert!(!LogDraft::new(d(9), &targets, Multiplier::Twenty).hit());
    }

    #[test]
    fn override_wins_over_detection() {
        let targets = TargetSet::from_raw([6]);
        let draft = LogDraft::new(d(9), &targets, Multiplier::One).with_hit(true);
        assert!(!draft.detected_hit());
        assert!(draft.hit_overridden());
        let record = draft.finish();
        assert!(record.hit());
    }

    #[test]
    fn draft_keeps_detection_from_creation_time() {
        let mut targets = TargetSet::from_raw([6]);
        let draft = LogDraft::new(d(6), &targets, Multiplier::Five);
        targets.clear();
        assert!(draft.finish().hit());
    }

    #[test]
    fn tile_note_uses_display_name() {
        let record = LogDraft::new(d(4), &TargetSet::new(), Multiplier::Two)
            .with_tile(TileEvent::CommunityChest)
            .finish();
        assert_eq!(record.note(), "Community Chest");
        assert_eq!(record.multiplier(), Multiplier::Two);
        assert_eq!(record.roll().value(), 4);
    }
}
