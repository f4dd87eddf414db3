#![deny(warnings)]
//! Landing odds, stake suggestions and a roll log for two-dice board moves.
//!
//! The crate has no I/O of its own apart from [`log::export_csv`]; callers
//! own the [`log::RollLog`] and keep it for as long as their session lasts.

pub mod dice;
pub mod input;
pub mod log;
pub mod model;
pub mod policy;

pub use dice::ProbabilityTable;
pub use input::{InvalidTargetFormat, ParsedTargets, parse_targets};
pub use log::{LogDraft, LogRecord, LogSnapshot, LogSummary, RollLog};
pub use model::distance::{Distance, TargetSet};
pub use model::multiplier::Multiplier;
pub use model::note::{TileEvent, UnknownTileEvent};
pub use policy::{BandTable, Preset, Recommendation, recommend};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "rollwise"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "rollwise");
        assert!(!AppInfo::version().is_empty());
    }
}
