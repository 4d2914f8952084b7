//! Source dataset loading.
//!
//! The benchmark samples rows from the public "State of California 2019"
//! employee compensation export. The file is read once per run, either from
//! disk or over HTTP, and every row becomes an immutable [`SalaryRecord`].
//!
//! Only `Benefits` tolerates a missing value (`Not Provided` or an empty cell
//! reads as 0). `Notes` and `Status` are optional. Every other numeric column
//! must parse, and a single bad cell fails the whole load.

use std::fs::File;
use std::io::Read;

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// Location of the published salary dataset.
pub const DEFAULT_SOURCE: &str = "https://gist.githubusercontent.com/dbogatov/a192d00d72de02f188c5268ea1bbf25b/raw/b1e7ea9e058e7906e0045b29ad75a5f201bd4f57/state-of-california-2019.csv";

/// Marker the source uses for a missing benefits figure.
const NOT_PROVIDED: &str = "Not Provided";

/// One employee compensation row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "Employee Name")]
    pub full_name: String,
    #[serde(rename = "Job Title")]
    pub job_title: String,
    #[serde(rename = "Base Pay")]
    pub base_pay: f64,
    #[serde(rename = "Overtime Pay")]
    pub overtime_pay: f64,
    #[serde(rename = "Other Pay")]
    pub other_pay: f64,
    #[serde(rename = "Benefits", deserialize_with = "not_provided_as_zero")]
    pub benefits: f64,
    #[serde(rename = "Total Pay")]
    pub total_pay: f64,
    #[serde(rename = "Total Pay & Benefits")]
    pub total_pay_benefits: f64,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Notes")]
    pub notes: Option<String>,
    #[serde(rename = "Agency")]
    pub agency: String,
    #[serde(rename = "Status")]
    pub status: Option<String>,
}

fn not_provided_as_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() || raw == NOT_PROVIDED {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .map_err(|e| serde::de::Error::custom(format!("invalid benefits value {:?}: {}", raw, e)))
}

/// Load the dataset from a file path or an `http(s)://` URL.
pub fn load(location: &str) -> Result<Vec<SalaryRecord>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        tracing::info!(url = location, "downloading dataset");
        let response = reqwest::blocking::get(location)
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Dataset(format!("failed to fetch {}: {}", location, e)))?;
        read(response)
    } else {
        tracing::info!(path = location, "reading dataset");
        let file = File::open(location)?;
        read(file)
    }
}

/// Parse CSV rows (with a header line) from any reader.
pub fn read<R: Read>(reader: R) -> Result<Vec<SalaryRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.deserialize() {
        let record: SalaryRecord = result.map_err(|e| Error::Dataset(e.to_string()))?;
        records.push(record);
    }

    tracing::debug!(rows = records.len(), "dataset parsed");
    Ok(records)
}
