//! Non-interactive reports: CSV and static HTML.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::document::MetricsDocument;
use crate::fmt;
use crate::rows::{DisplayRow, project_rows};
use crate::view::html;

/// Error types that can occur while writing a report.
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "I/O error: {}", e),
            ExportError::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(e) => Some(e),
            ExportError::Csv(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        ExportError::Csv(e)
    }
}

#[derive(Debug, Serialize)]
struct CsvRecord {
    #[serde(rename = "Valoper")]
    valoper: String,
    #[serde(rename = "Uptime")]
    uptime: String,
    #[serde(rename = "Total Slashes")]
    total_slashes: usize,
    #[serde(rename = "Tombstoned")]
    tombstoned: String,
    #[serde(rename = "Blocks Active")]
    blocks_active: u64,
    #[serde(rename = "Signed Blocks")]
    signed_blocks: u64,
    #[serde(rename = "Missed Blocks")]
    missed_blocks: u64,
    #[serde(rename = "Proposed Blocks")]
    proposed_blocks: u64,
    #[serde(rename = "Delegators")]
    delegators: u64,
    #[serde(rename = "Stake")]
    stake: String,
    #[serde(rename = "Self Stake")]
    self_stake: String,
}

/// Writes the CSV report: one line per validator, highest uptime first.
/// Ties keep document order.
pub fn csv_report<W: Write>(doc: &MetricsDocument, out: W) -> Result<(), ExportError> {
    let mut rows = project_rows(doc);
    rows.sort_by(|a, b| b.uptime.total_cmp(&a.uptime));

    let mut writer = csv::Writer::from_writer(out);
    for row in &rows {
        let record = &doc.validators[row.handle.0];
        writer.serialize(CsvRecord {
            valoper: row.valoper.clone(),
            uptime: fmt::format_uptime(row.uptime),
            total_slashes: row.jails,
            tombstoned: fmt::format_opt_bool(record.tombstoned),
            blocks_active: row.active,
            signed_blocks: row.signed,
            missed_blocks: row.missed,
            proposed_blocks: row.proposed,
            delegators: row.delegators,
            stake: fmt::format_opt_number(record.stake.or(record.tokens)),
            self_stake: fmt::format_opt_number(record.self_stake),
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv(doc: &MetricsDocument, path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    csv_report(doc, std::io::BufWriter::new(file))?;
    info!(path = %path.display(), validators = doc.validators.len(), "CSV report written");
    Ok(())
}

/// Writes the static HTML table.
pub fn write_html(rows: &[DisplayRow], title: &str, path: &Path) -> Result<(), ExportError> {
    std::fs::write(path, html::render_page(rows, title))?;
    info!(path = %path.display(), validators = rows.len(), "HTML table written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> MetricsDocument {
        MetricsDocument::from_slice(
            br#"{"validators":[
                {"valoper":"low","total_signed_blocks":1,"total_missed_blocks":1,
                 "tombstoned":false,"stake":"1500","self_stake":10.5},
                {"valoper":"high","total_signed_blocks":9,"total_missed_blocks":1,
                 "slashes":[{"height":1,"time":"t"},{"height":2,"time":"t"}],"tombstoned":true},
                {"valoper":"idle"}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn csv_sorted_by_uptime_desc() {
        let mut buf = Vec::new();
        csv_report(&doc(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Valoper,Uptime,Total Slashes,Tombstoned,Blocks Active,Signed Blocks,\
             Missed Blocks,Proposed Blocks,Delegators,Stake,Self Stake"
        );
        assert_eq!(lines[1], "high,90.00,2,true,10,9,1,0,0,,");
        assert_eq!(lines[2], "low,50.00,0,false,2,1,1,0,0,1500,10.5");
        assert_eq!(lines[3], "idle,0.00,0,,0,0,0,0,0,,");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let doc = doc();

        let csv_path = dir.path().join("validators.csv");
        write_csv(&doc, &csv_path).unwrap();
        assert!(std::fs::read_to_string(&csv_path).unwrap().starts_with("Valoper,"));

        let html_path = dir.path().join("validators.html");
        write_html(&project_rows(&doc), "Validators", &html_path).unwrap();
        assert!(std::fs::read_to_string(&html_path).unwrap().contains(">high<"));
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_csv(&doc(), &dir.path().join("missing/dir/out.csv")).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
