//! Metric-file parsing for JSON and CSV documents.
//!
//! Both formats feed the shared record-to-[`DataPoint`] step, so a JSON
//! record and a CSV row with the same content produce identical results.

use std::path::Path;

use metrics_core::models::{field_text, DataPoint};
use metrics_core::{MetricsError, Result};
use tracing::debug;

/// Parse a JSON metrics file.
///
/// The document must be a top-level array of objects with at least `name`,
/// `date` and `value` keys; extra keys become metadata. Records are returned
/// in document order, and the first bad record aborts the parse.
pub fn parse_json_file(path: &Path) -> Result<Vec<DataPoint>> {
    let content = std::fs::read_to_string(path).map_err(|source| MetricsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&content)?;

    let mut points = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let object = record
            .as_object()
            .ok_or(MetricsError::InvalidRecord { index })?;
        let fields = object.iter().map(|(key, value)| (key.clone(), field_text(value)));
        points.push(DataPoint::from_fields(index, fields)?);
    }

    debug!("Parsed {} records from {}", points.len(), path.display());
    Ok(points)
}

/// Parse a CSV metrics file.
///
/// The first row is a header that must include `name`, `date` and `value`;
/// extra columns become string metadata. Rows are returned in file order.
pub fn parse_csv_file(path: &Path) -> Result<Vec<DataPoint>> {
    let content = std::fs::read_to_string(path).map_err(|source| MetricsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| MetricsError::CsvParse(e.to_string()))?
        .clone();

    let mut points = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|e| MetricsError::CsvParse(e.to_string()))?;
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(key, value)| (key.to_string(), value.to_string()));
        points.push(DataPoint::from_fields(index, fields)?);
    }

    debug!("Parsed {} rows from {}", points.len(), path.display());
    Ok(points)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    // ── parse_json_file ───────────────────────────────────────────────────────

    #[test]
    fn test_parse_json_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "metrics.json",
            r#"[
                {"name": "active_users", "date": "2023-01-01", "value": 10, "repo": "org/repo1"},
                {"name": "pull_request_count", "date": "2023-01-02", "value": "3.5"}
            ]"#,
        );

        let points = parse_json_file(&path).unwrap();
        assert_eq!(points.len(), 2);

        assert_eq!(points[0].name, "active_users");
        assert_eq!(points[0].date, date("2023-01-01"));
        assert_eq!(points[0].value, 10.0);
        assert_eq!(points[0].metadata.get("repo"), Some(&"org/repo1".to_string()));

        // Numeric strings parse the same as JSON numbers.
        assert_eq!(points[1].value, 3.5);
        assert!(points[1].metadata.is_empty());
    }

    #[test]
    fn test_parse_json_preserves_document_order() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "metrics.json",
            r#"[
                {"name": "b", "date": "2023-01-02", "value": 2},
                {"name": "a", "date": "2023-01-01", "value": 1}
            ]"#,
        );

        let points = parse_json_file(&path).unwrap();
        assert_eq!(points[0].name, "b");
        assert_eq!(points[1].name, "a");
    }

    #[test]
    fn test_parse_json_missing_value_identifies_record() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "metrics.json",
            r#"[
                {"name": "ok", "date": "2023-01-01", "value": 1},
                {"name": "broken", "date": "2023-01-02"}
            ]"#,
        );

        let err = parse_json_file(&path).unwrap_err();
        match err {
            MetricsError::MissingField { index, field } => {
                assert_eq!(index, 1);
                assert_eq!(field, "value");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_json_non_object_element() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "metrics.json", r#"[42]"#);

        let err = parse_json_file(&path).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidRecord { index: 0 }));
    }

    #[test]
    fn test_parse_json_empty_array() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "metrics.json", "[]");

        let points = parse_json_file(&path).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_parse_json_missing_file() {
        let err = parse_json_file(Path::new("/tmp/does-not-exist-metrics-abc.json")).unwrap_err();
        assert!(matches!(err, MetricsError::FileRead { .. }));
    }

    #[test]
    fn test_parse_json_malformed_document() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "metrics.json", "[{]");

        let err = parse_json_file(&path).unwrap_err();
        assert!(matches!(err, MetricsError::JsonParse(_)));
    }

    // ── parse_csv_file ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_csv_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "metrics.csv",
            "name,date,value,repo\nactive_users,2023-01-01,10,org/repo1\nactive_users,2023-01-02,7,org/repo2\n",
        );

        let points = parse_csv_file(&path).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].name, "active_users");
        assert_eq!(points[0].date, date("2023-01-01"));
        assert_eq!(points[0].value, 10.0);
        assert_eq!(points[0].metadata.get("repo"), Some(&"org/repo1".to_string()));
        assert_eq!(points[1].metadata.get("repo"), Some(&"org/repo2".to_string()));
    }

    #[test]
    fn test_parse_csv_and_json_agree() {
        let dir = TempDir::new().unwrap();
        let csv_path = write_file(
            &dir,
            "metrics.csv",
            "name,date,value,repo\nactive_users,2023-01-01,10,org/repo1\n",
        );
        let json_path = write_file(
            &dir,
            "metrics.json",
            r#"[{"name": "active_users", "date": "2023-01-01", "value": 10, "repo": "org/repo1"}]"#,
        );

        assert_eq!(
            parse_csv_file(&csv_path).unwrap(),
            parse_json_file(&json_path).unwrap()
        );
    }

    #[test]
    fn test_parse_csv_header_without_value_column() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "metrics.csv", "name,date\nactive_users,2023-01-01\n");

        let err = parse_csv_file(&path).unwrap_err();
        match err {
            MetricsError::MissingField { index, field } => {
                assert_eq!(index, 0);
                assert_eq!(field, "value");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_csv_non_numeric_value() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "metrics.csv",
            "name,date,value\nactive_users,2023-01-01,many\n",
        );

        let err = parse_csv_file(&path).unwrap_err();
        assert!(matches!(err, MetricsError::NonNumericValue { index: 0, .. }));
    }

    #[test]
    fn test_parse_csv_header_only() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "metrics.csv", "name,date,value\n");

        let points = parse_csv_file(&path).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_parse_csv_missing_file() {
        let err = parse_csv_file(Path::new("/tmp/does-not-exist-metrics-abc.csv")).unwrap_err();
        assert!(matches!(err, MetricsError::FileRead { .. }));
    }

    #[test]
    fn test_parse_csv_ragged_row() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "metrics.csv",
            "name,date,value\nactive_users,2023-01-01,1,extra,cells\n",
        );

        let err = parse_csv_file(&path).unwrap_err();
        assert!(matches!(err, MetricsError::CsvParse(_)));
    }
}
