use enzymes::SiteTable;
use scan::{ScanConfig, ScanReport, Scanner};

pub mod complement;
pub mod enzymes;
pub mod error;
pub mod iupac_code;
pub mod report;
pub mod restriction_enzyme;
pub mod scan;
pub mod sequence_format;

/// Normalizes FASTA/FASTQ `text` and scans every selected record against `table`.
pub fn find_restriction_sites(text: &str, table: &SiteTable, config: &ScanConfig) -> ScanReport {
    let lines = sequence_format::normalize(text);
    Scanner::new(config, table).scan_lines(&lines)
}
