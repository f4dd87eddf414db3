//! CSV rendering of the roll log.
//!
//! Output is UTF-8 with a `Roll,Hit,Multiplier,Note` header and one row per
//! record in append order. Fields containing a comma, quote or line break are
//! quoted with embedded quotes doubled.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::record::LogRecord;

pub const CSV_HEADER: [&str; 4] = ["Roll", "Hit", "Multiplier", "Note"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write roll log CSV: {0}")]
    Write(#[from] std::io::Error),
    #[error("failed to create roll log CSV at {path:?}: {source}")]
    Create {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
}

pub fn write_csv<W: Write>(writer: &mut W, records: &[LogRecord]) -> Result<(), ExportError> {
    let mut row = String::new();
    push_row(&mut row, &CSV_HEADER);
    writer.write_all(row.as_bytes())?;
    for record in records {
        row.clear();
        push_record(&mut row, record);
        writer.write_all(row.as_bytes())?;
    }
    Ok(())
}

pub fn to_csv_string(records: &[LogRecord]) -> String {
    let mut out = String::new();
    push_row(&mut out, &CSV_HEADER);
    for record in records {
        push_record(&mut out, record);
    }
    out
}

/// Writes the CSV to `path`, replacing any existing file.
pub fn export_csv(path: impl AsRef<Path>, records: &[LogRecord]) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ExportError::Create {
        source,
        path: path.to_path_buf(),
    })?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, records)?;
    writer.flush()?;
    debug!(path = %path.display(), rows = records.len(), "roll log exported");
    Ok(())
}

fn push_record(out: &mut String, record: &LogRecord) {
    let roll = record.roll().to_string();
    let hit = if record.hit() { "true" } else { "false" };
    push_row(
        out,
        &[roll.as_str(), hit, record.multiplier().as_str(), record.note()],
    );
}

fn push_row(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push('\n');
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
