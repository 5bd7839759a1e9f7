//! Snapshot serializer and file writer
//!
//! Output is `serde_json`'s pretty printer: two-space indent, fields in
//! declaration order, integers rendered plainly. The same document always
//! produces the same bytes.

use std::fs;
use std::path::Path;
use tracing::info;

use crate::constants::download;
use crate::error::ExportError;
use crate::snapshot::ExportDocument;

/// Render a document as indented JSON
pub fn serialize(document: &ExportDocument) -> String {
    // Only string-keyed structs, enums and integers: the serializer has no failure path here
    serde_json::to_string_pretty(document).expect("export document is plain data")
}

/// Serialize `document` to `path`, replacing any existing file
///
/// Missing parent directories are created.
pub fn write_to_file(path: &Path, document: &ExportDocument) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
    }

    let json = serialize(document);
    fs::write(path, &json).map_err(|e| ExportError::io(path, e))?;

    info!(
        path = %path.display(),
        bytes = json.len(),
        exported_by = %document.exported_by(),
        "Wrote export snapshot"
    );
    Ok(())
}

/// Read a previously written snapshot and check its contract
pub fn read_from_file(path: &Path) -> Result<ExportDocument, ExportError> {
    let contents = fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
    let document: ExportDocument =
        serde_json::from_str(&contents).map_err(|source| ExportError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    document.verify()?;
    Ok(document)
}

/// `deliops-alldata-<YYYY-MM-DD>.json`, dated by the export day
pub fn download_filename(document: &ExportDocument) -> String {
    format!(
        "{}{}.{}",
        download::FILENAME_PREFIX,
        document.export_date().format(download::DATE_FORMAT),
        download::FILENAME_EXTENSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportConfig;
    use crate::fixture;
    use crate::snapshot::{build_snapshot, build_snapshot_at};
    use crate::state::AppState;
    use chrono::{TimeZone, Utc};

    fn populated_state() -> AppState {
        let mut state = fixture::mock_state();
        state.assignments.push(fixture::sample_assignment());
        state
    }

    #[test]
    fn test_round_trip_populated() {
        let doc = build_snapshot(&populated_state(), &ExportConfig::default());
        let parsed: ExportDocument = serde_json::from_str(&serialize(&doc)).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_round_trip_empty() {
        let doc = build_snapshot(&AppState::new(), &ExportConfig::default());
        let parsed: ExportDocument = serde_json::from_str(&serialize(&doc)).unwrap();
        assert_eq!(parsed, doc);
        assert!(parsed.drivers().is_empty());
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let doc = build_snapshot(&populated_state(), &ExportConfig::default());
        assert_eq!(serialize(&doc), serialize(&doc.clone()));
    }

    #[test]
    fn test_top_level_field_order() {
        let doc = build_snapshot(&AppState::new(), &ExportConfig::default());
        let json = serialize(&doc);

        let expected = [
            "\"version\"",
            "\"exportDate\"",
            "\"exportedBy\"",
            "\"currentUser\"",
            "\"userRole\"",
            "\"settings\"",
            "\"drivers\"",
            "\"vehicles\"",
            "\"assets\"",
            "\"simCards\"",
            "\"clients\"",
            "\"assignments\"",
            "\"auditLogs\"",
            "\"dataCounts\"",
        ];
        let positions: Vec<usize> = expected
            .iter()
            .map(|key| json.find(key).unwrap_or_else(|| panic!("{key} missing")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_state_serializes_to_valid_json() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let doc = build_snapshot_at(&AppState::new(), &ExportConfig::default(), at);
        let value: serde_json::Value = serde_json::from_str(&serialize(&doc)).unwrap();

        assert_eq!(value["exportDate"], "2024-01-15T10:30:00.000Z");
        assert_eq!(value["exportedBy"], "system");
        assert!(value["currentUser"].is_null());
        assert!(value["userRole"].is_null());
        assert_eq!(value["settings"]["theme"], "dark");
        assert_eq!(value["settings"]["notifications"]["sms"], false);
        assert_eq!(value["dataCounts"]["simCards"], 0);
        assert_eq!(value["dataCounts"]["auditLogs"], 0);
    }

    #[test]
    fn test_numbers_have_no_separators() {
        let doc = build_snapshot(&fixture::mock_state(), &ExportConfig::default());
        let json = serialize(&doc);
        assert!(json.contains("\"mileageKm\": 48210"));
        assert!(json.contains("\"valueAed\": 3200"));
    }

    #[test]
    fn test_uses_two_space_indent() {
        let doc = build_snapshot(&AppState::new(), &ExportConfig::default());
        assert!(serialize(&doc).starts_with("{\n  \"version\": \"1.0\""));
    }

    #[test]
    fn test_write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/alldata.json");
        let doc = build_snapshot(&fixture::mock_state(), &ExportConfig::default());

        write_to_file(&path, &doc).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), serialize(&doc));
        assert_eq!(read_from_file(&path).unwrap(), doc);
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alldata.json");
        fs::write(&path, "stale contents that are longer than nothing").unwrap();

        let doc = build_snapshot(&AppState::new(), &ExportConfig::default());
        write_to_file(&path, &doc).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), serialize(&doc));
    }

    #[test]
    fn test_write_to_unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // Parent "directory" is a regular file
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let doc = build_snapshot(&AppState::new(), &ExportConfig::default());
        let result = write_to_file(&blocker.join("alldata.json"), &doc);
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }

    #[test]
    fn test_read_rejects_tampered_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alldata.json");
        let doc = build_snapshot(&fixture::mock_state(), &ExportConfig::default());
        let tampered = serialize(&doc).replace("\"drivers\": 2", "\"drivers\": 5");
        fs::write(&path, tampered).unwrap();

        let result = read_from_file(&path);
        assert!(matches!(
            result,
            Err(ExportError::CountMismatch {
                collection: "drivers",
                recorded: 5,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_read_rejects_sub_millisecond_export_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alldata.json");
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
            + chrono::Duration::milliseconds(123);
        let doc = build_snapshot_at(&fixture::mock_state(), &ExportConfig::default(), at);
        let altered = serialize(&doc).replace(
            "\"exportDate\": \"2024-01-15T10:30:00.123Z\"",
            "\"exportDate\": \"2024-01-15T10:30:00.123456Z\"",
        );
        assert_ne!(altered, serialize(&doc));
        fs::write(&path, altered).unwrap();

        assert!(matches!(
            read_from_file(&path),
            Err(ExportError::Parse { .. })
        ));
    }

    #[test]
    fn test_read_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alldata.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(
            read_from_file(&path),
            Err(ExportError::Parse { .. })
        ));
    }

    #[test]
    fn test_download_filename_uses_export_day() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 23, 59, 59).unwrap();
        let doc = build_snapshot_at(&AppState::new(), &ExportConfig::default(), at);
        assert_eq!(download_filename(&doc), "deliops-alldata-2024-03-07.json");
    }
}
