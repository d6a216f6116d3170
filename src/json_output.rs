//! JSON output for scripting and service integration
//!
//! When --json is enabled, exactly one pretty-printed JSON document is written
//! to stdout; logs and progress go to stderr.

use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use crate::batch::BatchReport;
use crate::conversion::ConversionResult;

/// Result document of single-file mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SingleReport {
    pub success: bool,
    pub input: String,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SingleReport {
    pub fn from_result(result: &ConversionResult, requested_output: &Path) -> Self {
        match result {
            ConversionResult::Success { input, output } => Self {
                success: true,
                input: input.display().to_string(),
                output: output.display().to_string(),
                error: None,
            },
            ConversionResult::Failure { input, error } => Self {
                success: false,
                input: input.display().to_string(),
                output: requested_output.display().to_string(),
                error: Some(error.clone()),
            },
        }
    }
}

fn emit<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Emit a single-mode result as one JSON document
pub fn emit_single<W: Write>(out: &mut W, report: &SingleReport) -> io::Result<()> {
    emit(out, report)
}

/// Emit a batch report as one JSON document
pub fn emit_batch<W: Write>(out: &mut W, report: &BatchReport) -> io::Result<()> {
    emit(out, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_single_success_schema() {
        let result = ConversionResult::Success {
            input: PathBuf::from("in/a.jpg"),
            output: PathBuf::from("out/a.pdf"),
        };
        let report = SingleReport::from_result(&result, Path::new("out/a.pdf"));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"success": true, "input": "in/a.jpg", "output": "out/a.pdf"})
        );
    }

    #[test]
    fn test_single_failure_carries_error() {
        let result = ConversionResult::Failure {
            input: PathBuf::from("missing.jpg"),
            error: "input file not found: missing.jpg".to_string(),
        };
        let report = SingleReport::from_result(&result, Path::new("missing.pdf"));

        assert!(!report.success);
        assert_eq!(report.output, "missing.pdf");

        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("\"success\": false"));
        assert!(json.contains("\"error\": \"input file not found: missing.jpg\""));
    }

    #[test]
    fn test_emit_writes_one_document() {
        let mut out = Vec::new();
        emit_batch(&mut out, &BatchReport::new(0)).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, serde_json::json!({"success": [], "failed": [], "total": 0}));
    }

    #[test]
    fn test_non_ascii_paths_are_not_escaped() {
        let result = ConversionResult::Success {
            input: PathBuf::from("fotos/conversão.jpg"),
            output: PathBuf::from("pdf/conversão.pdf"),
        };
        let report = SingleReport::from_result(&result, Path::new("pdf/conversão.pdf"));
        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("conversão.jpg"));
    }
}
