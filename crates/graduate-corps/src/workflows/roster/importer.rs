use std::io::Read;
use std::path::Path;

use super::domain::RawRow;

/// Decodes a roster CSV document into raw column-name → cell maps.
///
/// Physical byte decoding stops at this boundary; the ingestion coordinator
/// only ever sees raw maps, and XLSX exports are converted to CSV upstream.
pub struct RosterCsvImporter;

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster document: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
}

impl RosterCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RawRow>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut row = RawRow::new();
            for (header, value) in headers.iter().zip(record.iter()) {
                row.insert(header.to_string(), value.to_string());
            }
            rows.push(row);
        }

        Ok(rows)
    }
}
