//! Top-line schema validation
//!
//! Every discovered extract is checked for the columns the canonical data
//! model cannot be built without. A file that fails validation is recorded
//! in the run report and left in the input directory; it never reaches
//! harmonization or the archive.

use crate::extract::Extract;
use serde::Serialize;

/// Columns every extract must carry to pass validation
pub const REQUIRED_COLUMNS: [&str; 5] = ["Store_ID", "Store_Name", "City", "Volume", "Value"];

/// Validation verdict for a single extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    Passed,
    Failed,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ValidationStatus::Passed => "PASSED",
            ValidationStatus::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check an extract against the required column set
///
/// Returns the missing column names (in required-column order) and the
/// resulting status.
pub fn validate_extract(extract: &Extract) -> (Vec<String>, ValidationStatus) {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !extract.has_column(col))
        .map(ToString::to_string)
        .collect();

    let status = if missing.is_empty() {
        ValidationStatus::Passed
    } else {
        ValidationStatus::Failed
    };

    (missing, status)
}

/// One row of the run's validation report
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    /// Extract file stem (name without `.csv`)
    #[serde(rename = "File")]
    pub file: String,

    /// Number of data rows in the extract
    #[serde(rename = "Rows")]
    pub rows: usize,

    /// Missing required columns joined with `", "`, or `"None"`
    #[serde(rename = "Missing_Cols")]
    pub missing_cols: String,

    /// Final verdict for the file
    #[serde(rename = "Status")]
    pub status: ValidationStatus,
}

impl ValidationOutcome {
    /// Build the outcome row for a parsed extract
    pub fn from_extract(stem: impl Into<String>, extract: &Extract) -> Self {
        let (missing, status) = validate_extract(extract);
        let missing_cols = if missing.is_empty() {
            "None".to_string()
        } else {
            missing.join(", ")
        };

        Self {
            file: stem.into(),
            rows: extract.row_count(),
            missing_cols,
            status,
        }
    }

    /// Build a FAILED outcome for a file that broke before or after column
    /// validation (unreadable content, malformed name)
    pub fn failed(stem: impl Into<String>, rows: usize) -> Self {
        Self {
            file: stem.into(),
            rows,
            missing_cols: "None".to_string(),
            status: ValidationStatus::Failed,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == ValidationStatus::Passed
    }
}
