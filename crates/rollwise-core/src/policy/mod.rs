pub mod bands;
pub mod recommend;

pub use bands::{Band, BandTable, BandTableError, PolicyLoadError, Preset};
pub use recommend::{Recommendation, format_percent, recommend, recommend_with};
