//! CSV format handling for driver records and per-person output
//!
//! This module centralizes all format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain records
//! - Summary CSV and text report serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{
    FineClassification, FineError, FineId, PersonId, PersonSummary, ReportRecord, Totals,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns:
/// `type, person, vehicle, fine, name, license, description, amount, class`.
/// Every column except `type` is optional; which ones are required depends on
/// the record type.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub person: Option<PersonId>,
    pub vehicle: Option<String>,
    pub fine: Option<u32>,
    pub name: Option<String>,
    pub license: Option<String>,
    pub description: Option<String>,
    pub amount: Option<String>,
    pub class: Option<String>,
}

/// Require a field
fn required<T>(value: Option<T>, record_type: &str, field: &str) -> Result<T, FineError> {
    value.ok_or_else(|| FineError::missing_field(record_type, field))
}

/// Require a text field, treating blank text as absent
fn required_text(value: Option<String>, record_type: &str, field: &str) -> Result<String, FineError> {
    let text = required(value, record_type, field)?;
    let text = text.trim();

    if text.is_empty() {
        return Err(FineError::missing_field(record_type, field));
    }

    Ok(text.to_string())
}

fn parse_amount(value: Option<String>, record_type: &str) -> Result<Decimal, FineError> {
    let amount = required_text(value, record_type, "amount")?;
    Decimal::from_str(&amount).map_err(|_| FineError::invalid_amount(&amount))
}

/// Convert a CsvRecord to a ReportRecord
///
/// This function:
/// - Parses the record type case-insensitively
/// - Checks that the fields required by the record type are present
/// - Parses amounts into `Decimal` and classifications into `FineClassification`
///
/// Amounts are not range-checked: zero and negative values are valid. An
/// absent description is an empty description.
///
/// # Errors
///
/// Returns `InvalidRecordType`, `MissingField`, `InvalidAmount` or
/// `InvalidClassification` describing the first problem found.
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<ReportRecord, FineError> {
    let record_type = csv_record.record_type.trim().to_lowercase();
    let kind = record_type.as_str();

    match kind {
        "person" => Ok(ReportRecord::Person {
            person: required(csv_record.person, kind, "person")?,
            name: required_text(csv_record.name, kind, "name")?,
            license: required_text(csv_record.license, kind, "license")?,
        }),
        "vehicle" => Ok(ReportRecord::Vehicle {
            person: required(csv_record.person, kind, "person")?,
            registration: required_text(csv_record.vehicle, kind, "vehicle")?,
        }),
        "violation" => {
            let person = required(csv_record.person, kind, "person")?;
            let registration = required_text(csv_record.vehicle, kind, "vehicle")?;
            let amount = parse_amount(csv_record.amount, kind)?;
            let classification =
                FineClassification::from_str(&required_text(csv_record.class, kind, "class")?)?;

            Ok(ReportRecord::Violation {
                person,
                registration,
                description: csv_record.description.unwrap_or_default().trim().to_string(),
                amount,
                classification,
            })
        }
        "amend" => Ok(ReportRecord::Amend {
            fine: FineId {
                person: required(csv_record.person, kind, "person")?,
                seq: required(csv_record.fine, kind, "fine")?,
            },
            amount: parse_amount(csv_record.amount, kind)?,
        }),
        "retire" => Ok(ReportRecord::Retire {
            person: required(csv_record.person, kind, "person")?,
            registration: required_text(csv_record.vehicle, kind, "vehicle")?,
        }),
        _ => Err(FineError::invalid_record_type(&csv_record.record_type)),
    }
}

/// Write per-person summaries in CSV format
///
/// Writes rows with columns: person, name, license, fines, total.
/// Rows are sorted by person ID for deterministic output and totals are
/// written with two decimal places.
pub fn write_summary_csv(
    summaries: &[PersonSummary],
    output: &mut dyn Write,
) -> Result<(), FineError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer.write_record(["person", "name", "license", "fines", "total"])?;

    let mut sorted: Vec<&PersonSummary> = summaries.iter().collect();
    sorted.sort_by_key(|summary| summary.person);

    for summary in sorted {
        writer.write_record(&[
            summary.person.to_string(),
            summary.name.clone(),
            summary.license.clone(),
            summary.fines.to_string(),
            format!("{:.2}", summary.total),
        ])?;
    }

    writer.flush()?;

    Ok(())
}

/// Write the end-of-run text report
///
/// Global totals first, then for each person (sorted by ID) their ledger
/// total followed by one policy line per fine.
pub fn write_report(
    totals: &Totals,
    summaries: &[PersonSummary],
    output: &mut dyn Write,
) -> Result<(), FineError> {
    writeln!(
        output,
        "Total number of violations recorded: {}",
        totals.violations
    )?;
    writeln!(output, "Total amount of fines issued: {:.2}", totals.fines)?;

    let mut sorted: Vec<&PersonSummary> = summaries.iter().collect();
    sorted.sort_by_key(|summary| summary.person);

    for summary in sorted {
        writeln!(output, "Total fines for {}: {:.2}", summary.name, summary.total)?;
        for line in &summary.report {
            writeln!(output, "{}", line)?;
        }
    }

    output.flush()?;

    Ok(())
}
