//! Extract naming convention
//!
//! Extract file names encode their origin and reporting window:
//!
//! ```text
//! <country><source>..._<period_start>_<period_end>_<label>.csv
//! ATSOF_202401_202401_extract.csv
//! ```
//!
//! The first `_`-separated segment carries the two-letter country code
//! followed by the three-letter source system code. The second and third
//! segments are six-digit `YYYYMM` periods. Anything after that is a free
//! label. A name that does not follow the convention is rejected with a
//! [`MalformedIdentifier`](crate::error::EtlError::MalformedIdentifier)
//! error instead of deriving garbage metadata.

use crate::error::{EtlError, Result};

/// Origin metadata parsed from an extract file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractIdentity {
    /// Original file name, as found in the input directory
    pub file_name: String,

    /// File name without the `.csv` extension
    pub stem: String,

    /// Two-letter country code (e.g., "AT")
    pub country: String,

    /// Three-letter source system code (e.g., "SOF")
    pub source: String,

    /// Reporting period start, `YYYYMM`
    pub period_start: String,

    /// Reporting period end, `YYYYMM`
    pub period_end: String,
}

impl ExtractIdentity {
    /// Parse an extract file name into its identity
    pub fn parse(file_name: &str) -> Result<Self> {
        let Some(stem) = file_name.strip_suffix(".csv") else {
            return Err(EtlError::malformed_identifier(
                file_name,
                "missing '.csv' extension",
            ));
        };

        let segments: Vec<&str> = stem.split('_').collect();
        if segments.len() < 4 {
            return Err(EtlError::malformed_identifier(
                file_name,
                format!(
                    "expected at least 4 '_'-separated segments, found {}",
                    segments.len()
                ),
            ));
        }

        let origin = segments[0];
        if origin.len() < 5 || !origin.as_bytes()[..5].is_ascii() {
            return Err(EtlError::malformed_identifier(
                file_name,
                format!("origin segment '{origin}' must start with five ASCII characters"),
            ));
        }
        let country = &origin[..2];
        let source = &origin[2..5];

        for period in [segments[1], segments[2]] {
            if period.len() != 6 || !period.bytes().all(|b| b.is_ascii_digit()) {
                return Err(EtlError::malformed_identifier(
                    file_name,
                    format!("period segment '{period}' is not a six-digit YYYYMM value"),
                ));
            }
        }

        Ok(Self {
            file_name: file_name.to_string(),
            stem: stem.to_string(),
            country: country.to_string(),
            source: source.to_string(),
            period_start: segments[1].to_string(),
            period_end: segments[2].to_string(),
        })
    }

    /// Name of the harmonized artifact derived from this extract
    pub fn artifact_name(&self) -> String {
        format!("CDM_{}.csv", self.stem)
    }
}
