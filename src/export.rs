use std::path::Path;

use anyhow::Context;
use log::info;

use crate::records::ClassRecord;

pub const DEFAULT_OUTPUT: &str = "unsw_timetable.csv";

/// Writes the records as CSV, overwriting `path`.
///
/// Nothing is written, and `path` is left untouched, when there are no
/// records. Returns whether a file was written.
pub fn save_timetable_to_csv(records: &[ClassRecord], path: &Path) -> anyhow::Result<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("failed to write class {}", record.class_number))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;

    info!("Timetable data saved to {}", path.display());
    Ok(true)
}
