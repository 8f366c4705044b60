//! Terminal table of converted records

use super::{truncate, ExportSink};
use crate::error::Result;
use crate::types::ConvertedRecord;
use std::io::{self, Write};

const RULE_WIDTH: usize = 100;
const NAME_WIDTH: usize = 50;
const HEADERS: [&str; 5] = [
    "Product Name",
    "Original Price",
    "Converted Price",
    "Rating",
    "Availability",
];

/// Renders records as a fixed-width text table
pub struct TableSink<W: Write> {
    out: W,
}

impl TableSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Cells of one display row
fn row_cells(record: &ConvertedRecord) -> [String; 5] {
    [
        truncate(&record.name, NAME_WIDTH),
        format!("{} {}", record.original_price, record.original_currency),
        format!("{} {}", record.converted_price, record.target_currency),
        record.rating.clone(),
        record.availability.clone(),
    ]
}

/// Render the table as a string
pub fn render_table(records: &[ConvertedRecord]) -> String {
    let rows: Vec<[String; 5]> = records.iter().map(row_cells).collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" ")
    };

    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "PRODUCTS WITH CONVERTED PRICES".to_string(),
        rule.clone(),
        format_row(&HEADERS[..]),
    ];
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(format_row(&cells[..]));
    }
    lines.push(rule);
    lines.join("\n") + "\n"
}

impl<W: Write> ExportSink for TableSink<W> {
    fn name(&self) -> &str {
        "table"
    }

    fn export(&mut self, records: &[ConvertedRecord]) -> Result<()> {
        self.out.write_all(render_table(records).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::records;

    #[test]
    fn test_table_layout() {
        let mut sink = TableSink::new(Vec::new());
        sink.export(&records()).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();

        assert!(text.contains("PRODUCTS WITH CONVERTED PRICES"));
        assert!(text.contains("Product Name"));
        assert!(text.contains("51.77 GBP"));
        assert!(text.contains("10637.67 KES"));
        assert_eq!(text.lines().filter(|l| *l == "=".repeat(RULE_WIDTH)).count(), 3);
    }

    #[test]
    fn test_long_names_truncated() {
        let mut rows = records();
        rows[0].name = "x".repeat(80);
        let text = render_table(&rows);
        assert!(text.contains(&format!("{}...", "x".repeat(NAME_WIDTH))));
        assert!(!text.contains(&"x".repeat(NAME_WIDTH + 1)));
    }
}
