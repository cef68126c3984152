//! Result sink: writes accepted pages to the configured output file.
//!
//! Records are buffered in memory for the run and flushed as a single JSON
//! array at the end. A crash mid-run loses unflushed records; there is no
//! write-ahead log.

use riptide_types::{PageRecord, Result, RiptideError};
use std::path::Path;

pub fn write_records(path: impl AsRef<Path>, records: &[PageRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).map_err(|e| RiptideError::Sink(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_records_as_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let records = vec![PageRecord::new("https://example.com/", "Example", "hello")];

        write_records(&path, &records).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<PageRecord> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].url, "https://example.com/");
    }

    #[test]
    fn writes_empty_array_for_no_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        write_records(&path, &[]).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.trim(), "[]");
    }
}
