//! JSON rendering for TOC entries and validation reports.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{TocEntry, ValidationReport};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert entries to a JSON array.
pub fn to_json(entries: &[TocEntry], format: JsonFormat) -> Result<String> {
    serialize(entries, format)
}

/// Convert a validation report to JSON.
pub fn report_to_json(report: &ValidationReport, format: JsonFormat) -> Result<String> {
    serialize(report, format)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::validate;

    #[test]
    fn test_to_json_pretty() {
        let entries = vec![TocEntry::detected("Methods", 34, 0, 0.8, "dot_leader")];
        let json = to_json(&entries, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"pageNumber\": 34"));
        assert!(json.contains("\"detection_method\": \"dot_leader\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let entries = vec![TocEntry::bookmark("Preface", None, 0)];
        let json = to_json(&entries, JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"[{"title":"Preface","pageNumber":null,"level":0}]"#);
    }

    #[test]
    fn test_report_to_json() {
        let entries = vec![
            TocEntry::detected("A", 5, 0, 0.9, "dot_leader"),
            TocEntry::detected("B", 3, 0, 0.9, "dot_leader"),
        ];
        let json = report_to_json(&validate(&entries, 0.7), JsonFormat::Compact).unwrap();
        assert!(json.contains(r#""type":"page_order""#));
        assert!(json.contains(r#""severity":"warning""#));
        assert!(json.contains(r#""valid":true"#));
    }
}
