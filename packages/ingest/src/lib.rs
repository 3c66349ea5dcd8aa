#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV ingestion for city property-assessment data.
//!
//! Reads the published assessment CSV into a [`PropertyAssessments`]
//! collection, validating every row. The collection is built once at
//! startup; a malformed row, a duplicate account number, or an unreadable
//! file is a fatal [`IngestError`] carrying the offending line so the
//! caller can report it and exit.

pub mod progress;

use std::collections::HashSet;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use property_map_assessment::PropertyAssessments;
use property_map_assessment_models::{
    Address, AssessmentClassEntry, AssessmentClassSplit, Location, Neighborhood,
    PropertyAssessment,
};
use serde::Deserialize;
use thiserror::Error;

use crate::progress::ProgressCallback;

/// Well-known file name of the city's published assessment CSV.
pub const DEFAULT_CSV_FILE: &str = "Property_Assessment_Data_2024.csv";

/// Environment variable overriding the CSV location.
pub const CSV_PATH_ENV: &str = "PROPERTY_MAP_CSV";

/// Errors that can occur while loading assessment data.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The CSV file could not be opened.
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV itself was malformed (bad quoting, wrong field count, or
    /// missing expected headers).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row held a value that does not parse as its field requires.
    #[error("Invalid row at line {line}: {message}")]
    InvalidRow {
        /// 1-based line number within the CSV.
        line: u64,
        /// What was wrong with the row.
        message: String,
    },

    /// Two rows shared an account number.
    #[error("Duplicate account number {account_id} at line {line}")]
    DuplicateAccount {
        /// The repeated account number.
        account_id: u32,
        /// 1-based line number of the second occurrence.
        line: u64,
    },
}

/// One raw CSV row, keyed by the published column headers. All fields are
/// read as strings so blank cells can be told apart from parse failures.
#[derive(Debug, Deserialize)]
struct RawAssessmentRow {
    #[serde(rename = "Account Number")]
    account_number: String,
    #[serde(rename = "Suite")]
    suite: String,
    #[serde(rename = "House Number")]
    house_number: String,
    #[serde(rename = "Street Name")]
    street_name: String,
    #[serde(rename = "Garage")]
    garage: String,
    #[serde(rename = "Neighbourhood ID")]
    neighbourhood_id: String,
    #[serde(rename = "Neighbourhood")]
    neighbourhood: String,
    #[serde(rename = "Ward")]
    ward: String,
    #[serde(rename = "Assessed Value")]
    assessed_value: String,
    #[serde(rename = "Latitude")]
    latitude: String,
    #[serde(rename = "Longitude")]
    longitude: String,
    #[serde(rename = "Point Location")]
    point_location: String,
    #[serde(rename = "Assessment Class % 1")]
    class_percentage_1: String,
    #[serde(rename = "Assessment Class % 2")]
    class_percentage_2: String,
    #[serde(rename = "Assessment Class % 3")]
    class_percentage_3: String,
    #[serde(rename = "Assessment Class 1")]
    class_name_1: String,
    #[serde(rename = "Assessment Class 2")]
    class_name_2: String,
    #[serde(rename = "Assessment Class 3")]
    class_name_3: String,
}

/// Resolves the CSV path from, in order: an explicit override (CLI flag),
/// the `PROPERTY_MAP_CSV` environment variable, the well-known default
/// file name.
#[must_use]
pub fn resolve_csv_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var(CSV_PATH_ENV).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_FILE))
}

/// Loads the assessment collection from a CSV file, without progress
/// reporting.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any row fails
/// validation.
pub fn load_assessments(path: &Path) -> Result<PropertyAssessments, IngestError> {
    load_assessments_with_progress(path, &progress::NullProgress)
}

/// Loads the assessment collection from a CSV file, reporting byte-level
/// progress so multi-hundred-thousand-row loads show a live bar.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any row fails
/// validation.
pub fn load_assessments_with_progress(
    path: &Path,
    progress: &dyn ProgressCallback,
) -> Result<PropertyAssessments, IngestError> {
    log::info!("Loading assessments from {}", path.display());

    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    if let Ok(metadata) = file.metadata() {
        progress.set_total(metadata.len());
    }

    let assessments = read_assessments_with_progress(BufReader::new(file), progress)?;
    log::info!(
        "Loaded {} assessment records from {}",
        assessments.len(),
        path.display()
    );
    Ok(assessments)
}

/// Reads the assessment collection from any CSV byte stream, without
/// progress reporting.
///
/// # Errors
///
/// Returns an error if the CSV is malformed or any row fails validation.
pub fn read_assessments<R: Read>(reader: R) -> Result<PropertyAssessments, IngestError> {
    read_assessments_with_progress(reader, &progress::NullProgress)
}

/// Reads the assessment collection from any CSV byte stream, reporting
/// byte-level progress.
///
/// # Errors
///
/// Returns an error if the CSV is malformed or any row fails validation.
pub fn read_assessments_with_progress<R: Read>(
    reader: R,
    progress: &dyn ProgressCallback,
) -> Result<PropertyAssessments, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut properties: Vec<PropertyAssessment> = Vec::new();
    let mut seen_accounts: HashSet<u32> = HashSet::new();

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);
        let raw: RawAssessmentRow = record.deserialize(Some(&headers))?;
        let assessment = parse_row(&raw, line)?;

        if !seen_accounts.insert(assessment.account_id) {
            return Err(IngestError::DuplicateAccount {
                account_id: assessment.account_id,
                line,
            });
        }

        if let Some(position) = record.position() {
            progress.set_position(position.byte());
        }
        properties.push(assessment);
    }

    progress.finish(format!("Loaded {} records", properties.len()));
    Ok(PropertyAssessments::new(properties))
}

/// Converts one raw row into a validated record.
fn parse_row(raw: &RawAssessmentRow, line: u64) -> Result<PropertyAssessment, IngestError> {
    let account_id = required(line, "Account Number", &raw.account_number)?;
    let suite = optional(line, "Suite", &raw.suite)?;
    let house_number = optional(line, "House Number", &raw.house_number)?;
    let neighbourhood_id = required(line, "Neighbourhood ID", &raw.neighbourhood_id)?;
    let assessed_value = required(line, "Assessed Value", &raw.assessed_value)?;
    let lat = required(line, "Latitude", &raw.latitude)?;
    let lng = required(line, "Longitude", &raw.longitude)?;
    let has_garage = parse_garage(line, &raw.garage)?;

    let mut entries: Vec<AssessmentClassEntry> = Vec::with_capacity(3);
    for (name, percentage) in [
        (&raw.class_name_1, &raw.class_percentage_1),
        (&raw.class_name_2, &raw.class_percentage_2),
        (&raw.class_name_3, &raw.class_percentage_3),
    ] {
        if name.is_empty() {
            continue;
        }
        let percentage = if percentage.is_empty() {
            0
        } else {
            required(line, "Assessment Class %", percentage)?
        };
        entries.push(AssessmentClassEntry {
            name: name.clone(),
            percentage,
        });
    }

    Ok(PropertyAssessment {
        account_id,
        address: Address {
            suite,
            house_number,
            street_name: raw.street_name.clone(),
        },
        has_garage,
        neighborhood: Neighborhood {
            id: neighbourhood_id,
            name: raw.neighbourhood.clone(),
            ward: raw.ward.clone(),
        },
        assessed_value,
        location: Location {
            lat,
            lng,
            point_wkt: raw.point_location.clone(),
        },
        assessment_class: AssessmentClassSplit::new(entries),
    })
}

fn parse_garage(line: u64, value: &str) -> Result<bool, IngestError> {
    match value {
        "Y" => Ok(true),
        "N" => Ok(false),
        other => Err(IngestError::InvalidRow {
            line,
            message: format!("Garage must be Y or N, got {other:?}"),
        }),
    }
}

/// Parses a required field, mapping failures to [`IngestError::InvalidRow`].
fn required<T>(line: u64, field: &str, value: &str) -> Result<T, IngestError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|e| IngestError::InvalidRow {
        line,
        message: format!("{field} {value:?}: {e}"),
    })
}

/// Parses a field that may be blank; a blank cell is `None`.
fn optional<T>(line: u64, field: &str, value: &str) -> Result<Option<T>, IngestError>
where
    T: FromStr,
    T::Err: Display,
{
    if value.is_empty() {
        return Ok(None);
    }
    required(line, field, value).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Account Number,Suite,House Number,Street Name,Garage,Neighbourhood ID,Neighbourhood,Ward,Assessed Value,Latitude,Longitude,Point Location,Assessment Class % 1,Assessment Class % 2,Assessment Class % 3,Assessment Class 1,Assessment Class 2,Assessment Class 3";

    fn csv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out
    }

    #[test]
    fn reads_complete_rows() {
        let data = csv(&[
            "1000002,2015,8340,124 STREET NW,N,1070,DIMMADOME,Ward 1,500001,53.55591201,-113.4703111,POINT (-113.4703111 53.55591201),100,,,RESIDENTIAL,,",
            "2222222,,10240,JASPER AVENUE NW,Y,1071,DONSDALE,Ward 2,100055,53.55111201,-113.4093121,POINT (-113.4093121 53.55111201),75,25,,COMMERCIAL,RESIDENTIAL,",
        ]);

        let assessments = read_assessments(data.as_bytes()).unwrap();
        assert_eq!(assessments.len(), 2);

        let first = assessments.find_by_account_id(1_000_002).unwrap();
        assert_eq!(first.address.suite, Some(2015));
        assert_eq!(first.address.to_string(), "8340 124 STREET NW");
        assert!(!first.has_garage);
        assert_eq!(first.neighborhood.to_string(), "DIMMADOME (Ward 1)");
        assert_eq!(first.assessed_value, 500_001);
        assert_eq!(
            first.location.point_wkt,
            "POINT (-113.4703111 53.55591201)"
        );
        assert_eq!(first.assessment_class.to_string(), "[RESIDENTIAL 100%]");

        let second = assessments.find_by_account_id(2_222_222).unwrap();
        assert_eq!(second.address.suite, None);
        assert!(second.has_garage);
        assert_eq!(
            second.assessment_class.to_string(),
            "[COMMERCIAL 75%, RESIDENTIAL 25%]"
        );
    }

    #[test]
    fn blank_address_fields_become_none() {
        let data = csv(&[
            "3,,,,N,1,A,Ward 1,1000,53.5,-113.5,POINT (-113.5 53.5),100,,,RESIDENTIAL,,",
        ]);
        let assessments = read_assessments(data.as_bytes()).unwrap();
        let record = &assessments.properties()[0];
        assert_eq!(record.address.suite, None);
        assert_eq!(record.address.house_number, None);
        assert_eq!(record.address.to_string(), "N/A");
    }

    #[test]
    fn headers_only_yields_an_empty_collection() {
        let assessments = read_assessments(csv(&[]).as_bytes()).unwrap();
        assert!(assessments.is_empty());
    }

    #[test]
    fn rejects_bad_garage_flag() {
        let data = csv(&[
            "4,,,STREET,MAYBE,1,A,Ward 1,1000,53.5,-113.5,POINT (-113.5 53.5),100,,,RESIDENTIAL,,",
        ]);
        let err = read_assessments(data.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::InvalidRow { line: 2, .. }), "{err}");
    }

    #[test]
    fn rejects_non_numeric_assessed_value() {
        let data = csv(&[
            "5,,,STREET,N,1,A,Ward 1,lots,53.5,-113.5,POINT (-113.5 53.5),100,,,RESIDENTIAL,,",
        ]);
        let err = read_assessments(data.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::InvalidRow { .. }), "{err}");
    }

    #[test]
    fn rejects_duplicate_account_numbers() {
        let data = csv(&[
            "6,,,STREET,N,1,A,Ward 1,1000,53.5,-113.5,POINT (-113.5 53.5),100,,,RESIDENTIAL,,",
            "6,,,STREET,N,1,A,Ward 1,2000,53.5,-113.5,POINT (-113.5 53.5),100,,,RESIDENTIAL,,",
        ]);
        let err = read_assessments(data.as_bytes()).unwrap_err();
        assert!(
            matches!(
                err,
                IngestError::DuplicateAccount {
                    account_id: 6,
                    line: 3
                }
            ),
            "{err}"
        );
    }

    #[test]
    fn class_slot_with_blank_percentage_is_zero() {
        let data = csv(&[
            "7,,,STREET,N,1,A,Ward 1,1000,53.5,-113.5,POINT (-113.5 53.5),,,,FARMLAND,,",
        ]);
        let assessments = read_assessments(data.as_bytes()).unwrap();
        let split = &assessments.properties()[0].assessment_class;
        assert_eq!(split.entries().len(), 1);
        assert_eq!(split.entries()[0].percentage, 0);
        assert!(!split.is_complete());
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_assessments(Path::new("no_such_data.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Open { .. }), "{err}");
    }

    #[test]
    fn env_and_default_resolution() {
        assert_eq!(
            resolve_csv_path(Some(PathBuf::from("override.csv"))),
            PathBuf::from("override.csv")
        );
        // With no override and no env var set, the well-known name wins.
        if std::env::var(CSV_PATH_ENV).is_err() {
            assert_eq!(resolve_csv_path(None), PathBuf::from(DEFAULT_CSV_FILE));
        }
    }
}
