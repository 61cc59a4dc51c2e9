use log::warn;
use regex::Regex;
use std::ops::Range;

use crate::complement::{complement, is_palindromic};

/// A recognition pattern (IUPAC codes already expanded) and the enzyme
/// that cuts there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestrictionSite {
    pub pattern: String,
    pub enzyme: String,
    is_palindromic: bool,
}

impl RestrictionSite {
    pub fn new(pattern: impl Into<String>, enzyme: impl Into<String>) -> Self {
        let pattern = pattern.into();
        Self {
            is_palindromic: is_palindromic(&pattern),
            pattern,
            enzyme: enzyme.into(),
        }
    }

    pub fn is_palindromic(&self) -> bool {
        self.is_palindromic
    }

    /// The same enzyme recognising the opposite strand.
    pub fn complement_site(&self) -> Self {
        Self::new(complement(&self.pattern), self.enzyme.clone())
    }

    /// Compiles the pattern; empty or syntactically broken patterns
    /// (eg an unbalanced `[`) are skipped with a warning.
    pub fn compile(&self) -> Option<CompiledSite> {
        if self.pattern.is_empty() {
            warn!("Skipping empty recognition pattern for {}", self.enzyme);
            return None;
        }
        match Regex::new(&self.pattern) {
            Ok(regex) => Some(CompiledSite {
                enzyme: self.enzyme.clone(),
                regex,
            }),
            Err(e) => {
                warn!(
                    "Skipping unusable pattern '{}' for {}: {e}",
                    self.pattern, self.enzyme
                );
                None
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct CompiledSite {
    enzyme: String,
    regex: Regex,
}

impl CompiledSite {
    pub fn enzyme(&self) -> &str {
        &self.enzyme
    }

    /// Leftmost, non-overlapping matches in `sequence`, left to right.
    pub fn find_sites(&self, sequence: &str) -> Vec<Range<usize>> {
        self.regex
            .find_iter(sequence)
            .map(|m| m.range())
            .filter(|r| !r.is_empty())
            .collect()
    }
}
