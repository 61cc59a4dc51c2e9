use crate::{
    complement::complement,
    enzymes::SiteTable,
    restriction_enzyme::CompiledSite,
    sequence_format::{FASTA_MARKER, is_header},
};
use itertools::Itertools;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashSet;

const EXACT_KEYWORD: &str = "EXACT";
const ALL_ENZYMES: &str = "ALL";

/// Which headers get scanned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderFilter {
    /// Any keyword is a substring of the uppercased header line, marker included.
    Any(Vec<String>),
    /// The uppercased header text without its marker equals this exactly.
    Exact(Option<String>),
}

impl HeaderFilter {
    /// Parses a comma-separated keyword list; `exact,<name>` asks for an
    /// exact header match. Case insensitive.
    pub fn parse(keywords: &str) -> Self {
        let keywords: Vec<String> = keywords.to_uppercase().split(',').map(String::from).collect();
        if keywords[0] == EXACT_KEYWORD {
            let name = keywords.get(1).cloned();
            if name.is_none() {
                warn!("Header filter 'exact' without a name matches no header");
            }
            HeaderFilter::Exact(name)
        } else {
            HeaderFilter::Any(keywords)
        }
    }

    pub fn matches(&self, header_line: &str) -> bool {
        match self {
            HeaderFilter::Any(keywords) => {
                let upper = header_line.to_uppercase();
                keywords.iter().any(|k| upper.contains(k.as_str()))
            }
            HeaderFilter::Exact(Some(name)) => {
                header_line
                    .trim_matches(FASTA_MARKER)
                    .trim_end()
                    .to_uppercase()
                    == *name
            }
            HeaderFilter::Exact(None) => false,
        }
    }
}

impl Default for HeaderFilter {
    fn default() -> Self {
        HeaderFilter::Any(vec![FASTA_MARKER.to_string()])
    }
}

/// Which enzymes get searched for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EnzymeFilter {
    #[default]
    All,
    /// Enzymes whose uppercased name contains any of these.
    Names(Vec<String>),
}

impl EnzymeFilter {
    /// `all` or a comma-separated list of (partial) enzyme names. Case insensitive.
    pub fn parse(enzymes: &str) -> Self {
        let names: Vec<String> = enzymes.to_uppercase().split(',').map(String::from).collect();
        if names[0] == ALL_ENZYMES {
            EnzymeFilter::All
        } else {
            EnzymeFilter::Names(names)
        }
    }

    pub fn matches(&self, enzyme: &str) -> bool {
        match self {
            EnzymeFilter::All => true,
            EnzymeFilter::Names(names) => {
                let upper = enzyme.to_uppercase();
                names.iter().any(|n| upper.contains(n.as_str()))
            }
        }
    }
}

/// Settings for one run, fixed before scanning starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanConfig {
    pub header_filter: HeaderFilter,
    pub enzyme_filter: EnzymeFilter,
}

impl ScanConfig {
    pub fn new(keywords: &str, enzymes: &str) -> Self {
        Self {
            header_filter: HeaderFilter::parse(keywords),
            enzyme_filter: EnzymeFilter::parse(enzymes),
        }
    }
}

/// A site found in one record's sequence. Positions are zero-based and
/// `end` is exclusive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteMatch {
    pub record_id: String,
    pub enzyme: String,
    pub start: usize,
    pub end: usize,
    pub forward: String,
    pub reverse_complement: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanState {
    SeekingHeader,
    HaveHeader(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub matches: Vec<SiteMatch>,
    /// Matches dropped because their (start, enzyme, end) was already reported.
    pub suppressed: usize,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Scans normalized FASTA lines against a fixed set of sites.
pub struct Scanner<'a> {
    config: &'a ScanConfig,
    sites: Vec<CompiledSite>,
}

impl<'a> Scanner<'a> {
    /// Applies the enzyme filter and adds opposite-strand patterns before
    /// compiling `table`.
    pub fn new(config: &'a ScanConfig, table: &SiteTable) -> Self {
        let mut table = table.to_owned().with_complements();
        table.retain_enzymes(|name| config.enzyme_filter.matches(name));
        let sites = table.compile();
        info!("Scanning with {} site patterns", sites.len());
        Self { config, sites }
    }

    pub fn sites(&self) -> &[CompiledSite] {
        &self.sites
    }

    /// All matches in one sequence line, deduplicated by (start, enzyme, end).
    pub fn scan_sequence(&self, record_id: &str, sequence: &str, report: &mut ScanReport) {
        let mut seen: HashSet<(usize, &str, usize)> = HashSet::new();
        for site in &self.sites {
            for range in site.find_sites(sequence) {
                if !seen.insert((range.start, site.enzyme(), range.end)) {
                    report.suppressed += 1;
                    continue;
                }
                let forward = &sequence[range.clone()];
                report.matches.push(SiteMatch {
                    record_id: record_id.to_string(),
                    enzyme: site.enzyme().to_string(),
                    start: range.start,
                    end: range.end,
                    forward: forward.to_string(),
                    reverse_complement: complement(forward),
                });
            }
        }
    }

    /// Runs the header/sequence state machine over normalized lines. Only
    /// the first sequence line after a matching header is scanned.
    pub fn scan_lines<S: AsRef<str>>(&self, lines: &[S]) -> ScanReport {
        let mut report = ScanReport::default();
        let mut state = ScanState::SeekingHeader;
        for line in lines {
            let line = line.as_ref();
            state = if is_header(line) {
                if self.config.header_filter.matches(line) {
                    ScanState::HaveHeader(line[FASTA_MARKER.len_utf8()..].to_string())
                } else {
                    ScanState::SeekingHeader
                }
            } else {
                if let ScanState::HaveHeader(id) = &state {
                    self.scan_sequence(id, line, &mut report);
                }
                ScanState::SeekingHeader
            };
        }
        debug!(
            "Found {} sites in {} records, suppressed {} duplicates",
            report.matches.len(),
            report.matches.iter().map(|m| &m.record_id).unique().count(),
            report.suppressed
        );
        report
    }
}
