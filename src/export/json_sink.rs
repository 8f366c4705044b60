//! JSON export

use super::{ensure_parent, ExportSink};
use crate::error::Result;
use crate::types::ConvertedRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes the records as a pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExportSink for JsonSink {
    fn name(&self) -> &str {
        "json"
    }

    fn export(&mut self, records: &[ConvertedRecord]) -> Result<()> {
        ensure_parent(&self.path)?;
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        log::info!("Data saved to {}", self.path.display());
        Ok(())
    }
}
