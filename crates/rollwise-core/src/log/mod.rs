pub mod export;
pub mod record;
pub mod roll_log;
pub mod snapshot;

pub use export::{CSV_HEADER, ExportError, export_csv, to_csv_string, write_csv};
pub use record::{LogDraft, LogRecord};
pub use roll_log::{LogSummary, RollLog};
pub use snapshot::LogSnapshot;
