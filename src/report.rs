//! Run report artifact.
//!
//! A run report captures one verification run for later consumption by the
//! `diagnose` command or external automation. Derived data only: written
//! once, never mutated.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::verify::{Summary, Verdict};

/// One verification run's verdicts and summary, stamped with a run ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Unique run identifier.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Name of the spec that drove the run.
    pub spec_name: String,
    /// Per-target verdicts, in target order.
    pub verdicts: Vec<Verdict>,
    /// Aggregate counts.
    pub summary: Summary,
}

impl RunReport {
    /// Assembles a report for a finished run.
    #[must_use]
    pub fn new(
        started_at: DateTime<Utc>,
        spec_name: impl Into<String>,
        verdicts: Vec<Verdict>,
        summary: Summary,
    ) -> Self {
        Self { run_id: Uuid::new_v4(), started_at, spec_name: spec_name.into(), verdicts, summary }
    }

    /// Writes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize run report: {e}"))?;
        std::fs::write(path, json)
            .map_err(|e| format!("Failed to write run report {}: {e}", path.display()))
    }

    /// Loads a report written by [`RunReport::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read run report {}: {e}", path.display()))?;
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse run report {}: {e}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::RunReport;
    use crate::verify::{Summary, Verdict};
    use chrono::Utc;

    #[test]
    fn saves_and_loads_round_trip() {
        let dir = std::env::temp_dir().join("pdpguard_report_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.json");

        let verdicts = vec![Verdict::from_failures(
            "https://shop.example.com/products/a",
            vec!["MISSING:Price".into()],
            42,
            None,
        )];
        let summary = Summary::from_verdicts(&verdicts);
        let report = RunReport::new(Utc::now(), "PDP Guard", verdicts, summary);

        report.save(&path).unwrap();
        let loaded = RunReport::load(&path).unwrap();
        assert_eq!(report, loaded);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
