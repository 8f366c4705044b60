//! CSV export

use super::{ensure_parent, ExportSink};
use crate::error::Result;
use crate::types::ConvertedRecord;
use std::path::{Path, PathBuf};

/// Writes one row per record, with a header row, to a file
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExportSink for CsvSink {
    fn name(&self) -> &str {
        "csv"
    }

    fn export(&mut self, records: &[ConvertedRecord]) -> Result<()> {
        ensure_parent(&self.path)?;
        let mut wtr = csv::Writer::from_path(&self.path)?;
        for record in records {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        log::info!("Data saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::records;
    use tempfile::tempdir;

    #[test]
    fn test_writes_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        let mut sink = CsvSink::new(&path);

        sink.export(&records()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "name,original_price,original_currency,rating,availability,converted_price,\
             target_currency,exchange_rate,conversion_timestamp"
        );
        assert!(lines[1].starts_with("A Light in the Attic,51.77,GBP,Three,In stock,10637.67,KES,205.4795,"));
    }

    #[test]
    fn test_rows_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        CsvSink::new(&path).export(&records()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let back: Vec<ConvertedRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(back, records());
    }
}
