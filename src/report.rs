/*!
 * Reporting functionality for codemap and recolor
 *
 * Renders run statistics as console tables using the tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::utils::format_file_size;

/// Counters collected while writing a report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpStats {
    /// Directories listed in the tree
    pub directories: usize,
    /// Files dumped with their content
    pub files: usize,
    /// Files replaced by the binary placeholder
    pub binary: usize,
    /// Files replaced by a read-error placeholder
    pub unreadable: usize,
    /// Size of the report
    pub bytes_written: u64,
}

/// Counters collected while rewriting files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Matching files visited
    pub scanned: usize,
    /// Files whose content changed
    pub updated: usize,
    /// Files left as they were
    pub unchanged: usize,
    /// Files that could not be read or written
    pub failed: usize,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for run statistics
pub struct Reporter {
    format: ReportFormat,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    key: String,

    #[tabled(rename = "Value")]
    value: String,
}

impl SummaryRow {
    fn new(key: &str, value: impl ToString) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string for a codemap run
    pub fn generate_dump_report(&self, output_file: &str, duration: Duration, stats: &DumpStats) -> String {
        match self.format {
            ReportFormat::ConsoleTable => {
                let rows = vec![
                    SummaryRow::new("Output File", output_file),
                    SummaryRow::new("Process Time", format!("{:.4?}", duration)),
                    SummaryRow::new("Directories", self.format_number(stats.directories)),
                    SummaryRow::new("Files Dumped", self.format_number(stats.files)),
                    SummaryRow::new("Binary Skipped", self.format_number(stats.binary)),
                    SummaryRow::new("Read Errors", self.format_number(stats.unreadable)),
                    SummaryRow::new("Report Size", format_file_size(stats.bytes_written)),
                ];
                format!("MAPPING COMPLETE\n{}", self.table(rows))
            }
        }
    }

    /// Generate a report string for a recolor run
    pub fn generate_rewrite_report(&self, duration: Duration, stats: &RewriteStats) -> String {
        match self.format {
            ReportFormat::ConsoleTable => {
                let rows = vec![
                    SummaryRow::new("Process Time", format!("{:.4?}", duration)),
                    SummaryRow::new("Files Scanned", self.format_number(stats.scanned)),
                    SummaryRow::new("Files Updated", self.format_number(stats.updated)),
                    SummaryRow::new("Unchanged", self.format_number(stats.unchanged)),
                    SummaryRow::new("Failed", self.format_number(stats.failed)),
                ];
                format!("REWRITE COMPLETE\n{}", self.table(rows))
            }
        }
    }

    /// Print the codemap report to stdout
    pub fn print_dump_report(&self, output_file: &str, duration: Duration, stats: &DumpStats) {
        println!("\n{}", self.generate_dump_report(output_file, duration, stats));
    }

    /// Print the recolor report to stdout
    pub fn print_rewrite_report(&self, duration: Duration, stats: &RewriteStats) {
        println!("\n{}", self.generate_rewrite_report(duration, stats));
    }

    fn table(&self, rows: Vec<SummaryRow>) -> String {
        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}
