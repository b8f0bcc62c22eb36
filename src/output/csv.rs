//! CSV output formatter for scan results.
//!
//! One row per duplicate file: group index, shared hash, size, path.
//! Spreadsheet-friendly companion to the JSON output.

use std::io::Write;

use crate::duplicates::DuplicateGroup;

/// Write duplicate groups as CSV.
///
/// # Errors
///
/// Returns an error if a record cannot be written.
pub fn write_csv(groups: &[DuplicateGroup], w: &mut impl Write) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(w);
    writer.write_record(["group", "hash", "size", "path"])?;

    for (idx, group) in groups.iter().enumerate() {
        let hash = group.hash_hex();
        for file in &group.files {
            writer.write_record([
                (idx + 1).to_string(),
                hash.clone(),
                group.size.to_string(),
                file.path.to_string_lossy().into_owned(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}
