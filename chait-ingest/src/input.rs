//! Input file loading

use crate::error::{IngestError, IngestResult};
use crate::source::SourceRecord;
use serde_json::Value;
use std::path::Path;

/// Read a JSON array of provider records
///
/// The file must exist and hold a JSON array; anything else fails the run
/// before any record is processed.
pub fn load_source_records(path: &Path) -> IngestResult<Vec<SourceRecord>> {
    if !path.exists() {
        return Err(IngestError::FileNotFound(path.to_path_buf()));
    }

    let raw = std::fs::read_to_string(path).map_err(|source| IngestError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    parse_source_records(&raw).map_err(|err| match err {
        ParseFailure::Json(source) => IngestError::ParseInput {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::NotAnArray => IngestError::NotAnArray(path.to_path_buf()),
    })
}

enum ParseFailure {
    Json(serde_json::Error),
    NotAnArray,
}

fn parse_source_records(raw: &str) -> Result<Vec<SourceRecord>, ParseFailure> {
    match serde_json::from_str::<Value>(raw).map_err(ParseFailure::Json)? {
        Value::Array(items) => Ok(items.into_iter().map(SourceRecord::new).collect()),
        _ => Err(ParseFailure::NotAnArray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loads_array() {
        let file = write_temp(r#"[{"@id": "a"}, {"@id": "b"}, 3]"#);
        let records = load_source_records(file.path()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_missing_file() {
        let err = load_source_records(Path::new("/nonexistent/input.json")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound(_)));
        assert_eq!(err.to_string(), "File not found: /nonexistent/input.json");
    }

    #[test]
    fn test_invalid_json() {
        let file = write_temp("[{");
        assert!(matches!(
            load_source_records(file.path()),
            Err(IngestError::ParseInput { .. })
        ));
    }

    #[test]
    fn test_object_is_not_a_batch() {
        let file = write_temp(r#"{"@id": "a"}"#);
        assert!(matches!(
            load_source_records(file.path()),
            Err(IngestError::NotAnArray(_))
        ));
    }
}
