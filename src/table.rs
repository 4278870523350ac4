//! Summary table ingestion.
//!
//! Parses the aggregated patient table into [`PatientSummary`] rows.
//!
//! # Format
//!
//! ```text
//! patient_id,patient_name,entry_count,avg_hr,avg_sys,avg_dia,avg_temp,avg_spo2,status,first_timestamp
//! P001,Ada,5,88.50,121.00,79.25,36.90,97.10,NORMAL,2024-03-01T08:00:00
//! ```
//!
//! Fields are trimmed and blank lines ignored. A row that fails to parse is
//! rejected with a [`RowDiagnostic`]; the rest of the table still loads.

use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{Result, RowDiagnostic, RowError, TableError};
use crate::models::{PatientStatus, PatientSummary};

/// Expected header columns, in order.
pub const HEADER: [&str; 10] = [
    "patient_id",
    "patient_name",
    "entry_count",
    "avg_hr",
    "avg_sys",
    "avg_dia",
    "avg_temp",
    "avg_spo2",
    "status",
    "first_timestamp",
];

/// Parsed summary table: valid patients plus rejected-row diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTable {
    /// Valid rows, in input order.
    pub patients: Vec<PatientSummary>,
    /// One entry per rejected row.
    pub diagnostics: Vec<RowDiagnostic>,
}

impl SummaryTable {
    /// Parses a comma-separated summary table.
    ///
    /// # Errors
    /// Returns [`TableError`] only when the header is missing or does not
    /// match [`HEADER`]. Bad data rows are collected as diagnostics.
    ///
    /// # Example
    /// ```
    /// use u_triage::table::SummaryTable;
    ///
    /// let text = "patient_id,patient_name,entry_count,avg_hr,avg_sys,avg_dia,avg_temp,avg_spo2,status,first_timestamp\n\
    ///             P1,Ada,3,80.0,120.0,80.0,36.8,97.0,NORMAL,2024-01-01T08:00:00\n\
    ///             P2,Bob,0,80.0,120.0,80.0,36.8,97.0,NORMAL,2024-01-01T09:00:00\n";
    /// let table = SummaryTable::parse(text).unwrap();
    /// assert_eq!(table.patients.len(), 1);
    /// assert_eq!(table.diagnostics.len(), 1);
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, header) = lines.next().ok_or(TableError::MissingHeader)?;
        check_header(header)?;

        let mut table = SummaryTable::default();
        for (line_no, line) in lines {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            match parse_row(&fields) {
                Ok(patient) => table.patients.push(patient),
                Err(error) => {
                    let patient_id = fields
                        .first()
                        .filter(|id| !id.is_empty())
                        .map(|id| id.to_string());
                    warn!(line = line_no, patient = ?patient_id, %error, "rejected summary row");
                    table
                        .diagnostics
                        .push(RowDiagnostic::from_error(line_no, patient_id, &error));
                }
            }
        }

        debug!(
            patients = table.patients.len(),
            rejected = table.diagnostics.len(),
            "summary table loaded"
        );
        Ok(table)
    }

    /// Whether no valid patients were loaded.
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

impl FromStr for SummaryTable {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn check_header(line: &str) -> Result<()> {
    let columns: Vec<&str> = line.split(',').map(str::trim).collect();
    if columns == HEADER {
        Ok(())
    } else {
        Err(TableError::InvalidHeader {
            expected: HEADER.join(","),
            found: columns.join(","),
        })
    }
}

/// Parses one data row (already split and trimmed).
pub fn parse_row(fields: &[&str]) -> std::result::Result<PatientSummary, RowError> {
    if fields.len() != HEADER.len() {
        return Err(RowError::ColumnCount {
            expected: HEADER.len(),
            found: fields.len(),
        });
    }

    let id = required(fields[0], HEADER[0])?;
    let name = required(fields[1], HEADER[1])?;
    let record_count = parse_count(required(fields[2], HEADER[2])?)?;
    let avg_heart_rate = parse_decimal(fields[3], HEADER[3])?;
    let avg_systolic = parse_decimal(fields[4], HEADER[4])?;
    let avg_diastolic = parse_decimal(fields[5], HEADER[5])?;
    let avg_temp = parse_decimal(fields[6], HEADER[6])?;
    let avg_spo2 = parse_decimal(fields[7], HEADER[7])?;
    let status: PatientStatus = required(fields[8], HEADER[8])?.parse()?;
    let first_seen = required(fields[9], HEADER[9])?;

    Ok(PatientSummary {
        id: id.to_string(),
        name: name.to_string(),
        record_count,
        avg_heart_rate,
        avg_systolic,
        avg_diastolic,
        avg_temp,
        avg_spo2,
        status,
        first_seen: first_seen.to_string(),
    })
}

fn required<'a>(value: &'a str, field: &'static str) -> std::result::Result<&'a str, RowError> {
    if value.is_empty() {
        Err(RowError::MissingField { field })
    } else {
        Ok(value)
    }
}

fn parse_count(value: &str) -> std::result::Result<u32, RowError> {
    match value.parse::<u32>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(RowError::NonPositiveCount(value.to_string())),
    }
}

fn parse_decimal(value: &str, field: &'static str) -> std::result::Result<f64, RowError> {
    let value = required(value, field)?;
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RowError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticKind;

    const HEADER_LINE: &str =
        "patient_id,patient_name,entry_count,avg_hr,avg_sys,avg_dia,avg_temp,avg_spo2,status,first_timestamp";

    fn table(rows: &[&str]) -> String {
        let mut s = String::from(HEADER_LINE);
        for row in rows {
            s.push('\n');
            s.push_str(row);
        }
        s
    }

    #[test]
    fn test_parse_valid_rows() {
        let text = table(&[
            "P001,Ada Lovelace,5,88.50,121.00,79.25,36.90,97.10,NORMAL,2024-03-01T08:00:00",
            "P002,Alan Turing,12,135.2,150.0,90.0,37.4,93.0,WARNING,2024-03-01T07:30:00",
        ]);
        let t = SummaryTable::parse(&text).unwrap();
        assert_eq!(t.patients.len(), 2);
        assert!(t.diagnostics.is_empty());

        let p = &t.patients[1];
        assert_eq!(p.id, "P002");
        assert_eq!(p.name, "Alan Turing");
        assert_eq!(p.record_count, 12);
        assert!((p.avg_heart_rate - 135.2).abs() < 1e-10);
        assert_eq!(p.status, PatientStatus::Warning);
        assert_eq!(p.first_seen, "2024-03-01T07:30:00");
    }

    #[test]
    fn test_whitespace_and_blank_lines() {
        let text = format!(
            "\n{HEADER_LINE}\n\n  P1 , Ada , 3 , 80 , 120 , 80 , 36.8 , 97 , NORMAL , 2024-01-01T00:00:00  \n\n"
        );
        let t = SummaryTable::parse(&text).unwrap();
        assert_eq!(t.patients.len(), 1);
        assert_eq!(t.patients[0].name, "Ada");
        assert_eq!(t.patients[0].record_count, 3);
    }

    #[test]
    fn test_rejects_zero_and_negative_count() {
        let text = table(&[
            "P1,Ada,0,80,120,80,36.8,97,NORMAL,2024-01-01T00:00:00",
            "P2,Bob,-2,80,120,80,36.8,97,NORMAL,2024-01-01T00:00:00",
            "P3,Cy,2.5,80,120,80,36.8,97,NORMAL,2024-01-01T00:00:00",
            "P4,Di,4,80,120,80,36.8,97,NORMAL,2024-01-01T00:00:00",
        ]);
        let t = SummaryTable::parse(&text).unwrap();
        assert_eq!(t.patients.len(), 1);
        assert_eq!(t.patients[0].id, "P4");
        assert_eq!(t.diagnostics.len(), 3);
        assert!(t
            .diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::MalformedRow));
        assert_eq!(t.diagnostics[0].line, 2);
        assert_eq!(t.diagnostics[1].patient_id.as_deref(), Some("P2"));
    }

    #[test]
    fn test_rejects_non_numeric_vital() {
        let text = table(&["P1,Ada,3,fast,120,80,36.8,97,NORMAL,2024-01-01T00:00:00"]);
        let t = SummaryTable::parse(&text).unwrap();
        assert!(t.is_empty());
        assert!(t.diagnostics[0].message.contains("avg_hr"));
    }

    #[test]
    fn test_rejects_non_finite_vital() {
        let text = table(&["P1,Ada,3,80,120,80,36.8,NaN,NORMAL,2024-01-01T00:00:00"]);
        let t = SummaryTable::parse(&text).unwrap();
        assert!(t.is_empty());
        assert!(t.diagnostics[0].message.contains("avg_spo2"));
    }

    #[test]
    fn test_unknown_status_is_malformed() {
        let text = table(&["P1,Ada,3,80,120,80,36.8,97,CRITICAL,2024-01-01T00:00:00"]);
        let t = SummaryTable::parse(&text).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.diagnostics[0].kind, DiagnosticKind::MalformedRow);
        assert!(t.diagnostics[0].message.contains("CRITICAL"));
    }

    #[test]
    fn test_missing_field_and_column_count() {
        let text = table(&[
            "P1,,3,80,120,80,36.8,97,NORMAL,2024-01-01T00:00:00",
            "P2,Bob,3,80,120",
        ]);
        let t = SummaryTable::parse(&text).unwrap();
        assert!(t.is_empty());
        assert!(t.diagnostics[0].message.contains("patient_name"));
        assert!(t.diagnostics[1].message.contains("expected 10 fields, found 5"));
    }

    #[test]
    fn test_header_only_is_empty_input() {
        let t = SummaryTable::parse(HEADER_LINE).unwrap();
        assert!(t.is_empty());
        assert!(t.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(SummaryTable::parse("  \n\n"), Err(TableError::MissingHeader));
    }

    #[test]
    fn test_invalid_header() {
        let err = "id,name,count\nP1,Ada,3".parse::<SummaryTable>().unwrap_err();
        assert!(matches!(err, TableError::InvalidHeader { .. }));
    }
}
