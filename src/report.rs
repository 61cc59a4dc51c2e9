use crate::scan::{ScanReport, SiteMatch};
use std::io::Write;

pub const NO_SITES_FOUND: &str = "No restriction sites found";
const SEPARATOR: &str = "---------------------";

/// The bottom strand written 3'-5' under the top strand.
fn bottom_strand(m: &SiteMatch) -> String {
    m.reverse_complement.chars().rev().collect()
}

fn write_match<W: Write>(out: &mut W, m: &SiteMatch) -> std::io::Result<()> {
    writeln!(out, "{SEPARATOR}\n")?;
    writeln!(out, "Sequence: {}", m.record_id)?;
    writeln!(out, "Enzyme: {}", m.enzyme)?;
    // End is reported one past the last base, as it always has been.
    writeln!(out, "Position: {}-{}\n", m.start + 1, m.end + 1)?;
    writeln!(out, "5'...{}...3'", m.forward)?;
    writeln!(out, "3'...{}...5'\n", bottom_strand(m))?;
    writeln!(out, "{SEPARATOR}")
}

pub fn write_text_report<W: Write>(out: &mut W, report: &ScanReport) -> std::io::Result<()> {
    if report.is_empty() {
        return writeln!(out, "{NO_SITES_FOUND}");
    }
    for m in &report.matches {
        write_match(out, m)?;
    }
    Ok(())
}

pub fn write_json_report<W: Write>(out: &mut W, report: &ScanReport) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}
