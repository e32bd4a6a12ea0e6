//! Run report.

use std::fmt;

use serde::Serialize;
use tracing::{error, warn};

/// ProcessReport accumulates counters and diagnostics over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessReport {
    /// Manifest files found under the input directory.
    pub total_files: usize,
    /// Files that had at least one document rewritten.
    pub processed_files: usize,
    /// Documents that had at least one variable bound.
    pub successful_updates: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ProcessReport {
    pub fn new() -> Self {
        ProcessReport::default()
    }

    /// Records a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.warnings.push(message);
    }

    /// Records a non-fatal error.
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("{}", message);
        self.errors.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ProcessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Processing report =====")?;
        writeln!(f, "Total files: {}", self.total_files)?;
        writeln!(f, "Processed files: {}", self.processed_files)?;
        writeln!(f, "Updated resources: {}", self.successful_updates)?;

        if !self.warnings.is_empty() {
            writeln!(f, "\nWarnings:")?;
            for warning in &self.warnings {
                writeln!(f, "- {}", warning)?;
            }
        }

        if !self.errors.is_empty() {
            writeln!(f, "\nErrors:")?;
            for err in &self.errors {
                writeln!(f, "- {}", err)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display() {
        let mut report = ProcessReport::new();
        report.total_files = 3;
        report.processed_files = 1;
        report.successful_updates = 2;
        report.warn("w1");
        report.error("e1");

        assert_eq!(
            report.to_string(),
            "===== Processing report =====\n\
             Total files: 3\n\
             Processed files: 1\n\
             Updated resources: 2\n\
             \n\
             Warnings:\n\
             - w1\n\
             \n\
             Errors:\n\
             - e1\n"
        );
    }

    #[test]
    fn test_display_omits_empty_sections() {
        let report = ProcessReport::new();
        let text = report.to_string();
        assert!(!text.contains("Warnings"));
        assert!(!text.contains("Errors"));
        assert!(!report.has_errors());
    }

    #[test]
    fn test_json() {
        let mut report = ProcessReport::new();
        report.total_files = 1;
        report.warn("careful");
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["totalFiles"], 1);
        assert_eq!(json["successfulUpdates"], 0);
        assert_eq!(json["warnings"][0], "careful");
    }
}
