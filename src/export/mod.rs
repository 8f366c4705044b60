//! Export sinks: everything that consumes the converted record set
//!
//! Sinks only ever see a complete, non-empty result; the pipeline never
//! calls them on an empty or failed run.

pub mod chart;
pub mod csv_sink;
pub mod json_sink;
pub mod table;

pub use chart::ChartSink;
pub use csv_sink::CsvSink;
pub use json_sink::JsonSink;
pub use table::TableSink;

use crate::error::Result;
use crate::types::{ConvertedRecord, Timestamp};
use std::path::{Path, PathBuf};

/// File name stem shared by the CSV and JSON exports
pub const RECORDS_FILE_STEM: &str = "products_with_converted_prices";

/// File name stem of the saved chart
pub const CHART_FILE_STEM: &str = "price_comparison";

/// Trait for consumers of a finished record set
pub trait ExportSink {
    /// Short name used in logs and reports
    fn name(&self) -> &str;

    /// Write out `records`
    fn export(&mut self, records: &[ConvertedRecord]) -> Result<()>;
}

/// `<dir>/<stem>_<YYYYmmdd_HHMMSS>.<extension>`
pub fn timestamped_path(dir: &Path, stem: &str, extension: &str, at: Timestamp) -> PathBuf {
    dir.join(format!("{}_{}.{}", stem, at.format("%Y%m%d_%H%M%S"), extension))
}

/// Shorten `text` to `max` characters, marking the cut with `...`
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
