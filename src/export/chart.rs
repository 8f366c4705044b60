//! Original vs converted price comparison chart
//!
//! Paired horizontal bars per record, scaled against the largest value in
//! each series so both fit the same width.

use super::{ensure_parent, truncate, ExportSink};
use crate::error::Result;
use crate::types::ConvertedRecord;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const BAR_WIDTH: usize = 40;
const NAME_WIDTH: usize = 30;
const RULE_WIDTH: usize = 80;
const BAR_GLYPH: char = '█';

/// Writes a text bar chart, optionally saving a copy to disk
pub struct ChartSink<W: Write> {
    out: W,
    save_to: Option<PathBuf>,
}

impl ChartSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ChartSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, save_to: None }
    }

    /// Also write the chart to `path`
    pub fn save_to(mut self, path: impl AsRef<Path>) -> Self {
        self.save_to = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Number of glyphs for `value` on a scale where `max` fills [`BAR_WIDTH`]
fn bar_len(value: f64, max: f64) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    let len = (value / max * BAR_WIDTH as f64).round() as usize;
    len.clamp(1, BAR_WIDTH)
}

/// Render the chart as a string
pub fn render_chart(records: &[ConvertedRecord]) -> String {
    let max_original = records.iter().map(|r| r.original_price).fold(0.0, f64::max);
    let max_converted = records.iter().map(|r| r.converted_price).fold(0.0, f64::max);

    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "PRICE COMPARISON CHART".to_string(),
        rule.clone(),
    ];

    for (i, record) in records.iter().enumerate() {
        let original_bar: String =
            std::iter::repeat(BAR_GLYPH).take(bar_len(record.original_price, max_original)).collect();
        let converted_bar: String =
            std::iter::repeat(BAR_GLYPH).take(bar_len(record.converted_price, max_converted)).collect();

        lines.push(format!("{:2}. {}", i + 1, truncate(&record.name, NAME_WIDTH)));
        lines.push(format!(
            "    Original ({}):  {:>12.2} {}",
            record.original_currency, record.original_price, original_bar
        ));
        lines.push(format!(
            "    Converted ({}): {:>12.2} {}",
            record.target_currency, record.converted_price, converted_bar
        ));
        lines.push(String::new());
    }

    lines.push(rule);
    lines.join("\n") + "\n"
}

impl<W: Write> ExportSink for ChartSink<W> {
    fn name(&self) -> &str {
        "chart"
    }

    fn export(&mut self, records: &[ConvertedRecord]) -> Result<()> {
        let chart = render_chart(records);
        self.out.write_all(chart.as_bytes())?;
        self.out.flush()?;

        if let Some(path) = &self.save_to {
            ensure_parent(path)?;
            std::fs::write(path, &chart)?;
            log::info!("Price comparison chart saved as {}", path.display());
        }
        Ok(())
    }
}
