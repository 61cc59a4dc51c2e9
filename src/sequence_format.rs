//! FASTA/FASTQ normalization to single-line FASTA.
//!
//! The conversion works line by line and is deliberately lenient: lines that
//! do not look like nucleotide data are dropped instead of rejected.

use crate::iupac_code::is_nucleotide_line;
use log::debug;
use serde::Serialize;

pub const FASTA_MARKER: char = '>';
pub const FASTQ_MARKER: char = '@';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceFormat {
    Fasta,
    Fastq,
}

impl SequenceFormat {
    /// Decided by the first character of the first line alone.
    pub fn detect<S: AsRef<str>>(lines: &[S]) -> Self {
        match lines.first().and_then(|l| l.as_ref().chars().next()) {
            Some(FASTQ_MARKER) => SequenceFormat::Fastq,
            _ => SequenceFormat::Fasta,
        }
    }
}

/// One header and its (single-line) sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SequenceRecord {
    pub id: String,
    pub sequence: String,
}

pub fn is_header(line: &str) -> bool {
    line.starts_with(FASTA_MARKER)
}

/// Rewrites FASTQ lines as FASTA. A `@` line is kept (as `>`) only if the
/// line after it is pure nucleotide data; every other line is kept only if
/// it is pure itself. Separator and quality lines fall out that way.
pub fn fastq_to_fasta<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut ret = Vec::with_capacity(lines.len() / 2);
    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let is_last = i + 1 == lines.len();
        if let Some(rest) = line.strip_prefix(FASTQ_MARKER).filter(|_| !is_last) {
            if is_nucleotide_line(lines[i + 1].as_ref()) {
                ret.push(format!("{FASTA_MARKER}{rest}"));
            } else {
                debug!("Dropping FASTQ header line {}", i + 1);
            }
        } else if is_nucleotide_line(line) {
            ret.push(line.to_string());
        }
    }
    ret
}

/// Joins multi-line FASTA sequences so every header is followed by exactly
/// one sequence line. Text before the first header is discarded once a
/// header appears.
pub fn single_line_fasta<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut ret: Vec<String> = vec![];
    let mut seq = String::new();
    for line in lines {
        let line = line.as_ref();
        if is_header(line) {
            if !ret.is_empty() {
                ret.push(std::mem::take(&mut seq));
            }
            ret.push(line.to_string());
            seq.clear();
        } else {
            seq.push_str(line.trim_end_matches(['\n', '\r']));
        }
    }
    ret.push(seq);
    ret
}

/// Whole-buffer normalization of FASTA or FASTQ text.
pub fn normalize(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return vec![];
    }
    match SequenceFormat::detect(&lines) {
        SequenceFormat::Fastq => single_line_fasta(&fastq_to_fasta(&lines)),
        SequenceFormat::Fasta => single_line_fasta(&lines),
    }
}

/// Pairs normalized header/sequence lines into records.
pub fn records<S: AsRef<str>>(lines: &[S]) -> Vec<SequenceRecord> {
    let mut ret = vec![];
    let mut iter = lines.iter().map(|l| l.as_ref()).peekable();
    while let Some(line) = iter.next() {
        if let Some(id) = line.strip_prefix(FASTA_MARKER) {
            let sequence = match iter.peek() {
                Some(next) if !is_header(next) => iter.next().unwrap_or_default(),
                _ => "",
            };
            ret.push(SequenceRecord {
                id: id.to_string(),
                sequence: sequence.to_string(),
            });
        }
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(SequenceFormat::detect(&["@r1", "ACGT"]), SequenceFormat::Fastq);
        assert_eq!(SequenceFormat::detect(&[">s1", "ACGT"]), SequenceFormat::Fasta);
        assert_eq!(SequenceFormat::detect(&["ACGT"]), SequenceFormat::Fasta);
        assert_eq!(SequenceFormat::detect(&[""]), SequenceFormat::Fasta);
        let empty: [&str; 0] = [];
        assert_eq!(SequenceFormat::detect(&empty), SequenceFormat::Fasta);
    }

    #[test]
    fn test_single_line_fasta() {
        assert_eq!(
            single_line_fasta(&[">s1", "GAATT", "CAAGA", "ATTC"]),
            vec![">s1", "GAATTCAAGAATTC"]
        );
        assert_eq!(
            single_line_fasta(&[">s1", "AC", "GT", ">s2", "TT"]),
            vec![">s1", "ACGT", ">s2", "TT"]
        );
    }

    #[test]
    fn test_single_line_fasta_consecutive_headers() {
        assert_eq!(
            single_line_fasta(&[">s1", ">s2", "ACGT"]),
            vec![">s1", "", ">s2", "ACGT"]
        );
        assert_eq!(single_line_fasta(&[">s1"]), vec![">s1", ""]);
    }

    #[test]
    fn test_single_line_fasta_leading_text_is_dropped() {
        assert_eq!(
            single_line_fasta(&["junk", ">s1", "ACGT"]),
            vec![">s1", "ACGT"]
        );
    }

    #[test]
    fn test_fastq_to_fasta() {
        let fastq = [
            "@read1", "GAATTC", "+", "IIIIII", "@read2", "ACGNTT", "+read2", "II#III",
            "@read3", "acgt", "+", "@@@@",
        ];
        assert_eq!(
            fastq_to_fasta(&fastq),
            vec![">read1", "GAATTC", ">read3", "acgt"]
        );
    }

    #[test]
    fn test_fastq_header_on_last_line_is_dropped() {
        assert_eq!(
            fastq_to_fasta(&["@read1", "ACGT", "+", "IIII", "@read2"]),
            vec![">read1", "ACGT"]
        );
    }

    #[test]
    fn test_quality_line_starting_with_marker() {
        // The quality line "@III" is followed by a header, which is not pure.
        assert_eq!(
            fastq_to_fasta(&["@r1", "ACGT", "+", "@III", "@r2", "GGCC", "+", "IIII"]),
            vec![">r1", "ACGT", ">r2", "GGCC"]
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize(">s1\nGAATT\nCAAGA\nATTC\n"),
            vec![">s1", "GAATTCAAGAATTC"]
        );
        assert_eq!(
            normalize("@r1\nGAATTC\n+\nIIIIII\n@r2\nTTTT\n+\nIIII\n"),
            vec![">r1", "GAATTC", ">r2", "TTTT"]
        );
        assert_eq!(normalize(">s1\r\nACGT\r\nACGT\r\n"), vec![">s1", "ACGTACGT"]);
        assert!(normalize("").is_empty());
    }

    #[test]
    fn test_records() {
        let lines = normalize(">s1 first\nAC\nGT\n>s2\n>s3\nTT\n");
        assert_eq!(
            records(&lines),
            vec![
                SequenceRecord {
                    id: "s1 first".to_string(),
                    sequence: "ACGT".to_string()
                },
                SequenceRecord {
                    id: "s2".to_string(),
                    sequence: String::new()
                },
                SequenceRecord {
                    id: "s3".to_string(),
                    sequence: "TT".to_string()
                },
            ]
        );
    }
}
