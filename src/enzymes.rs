use crate::{
    error::{ResiteError, Result},
    iupac_code::tidy_pattern,
    restriction_enzyme::{CompiledSite, RestrictionSite},
};
use lazy_static::lazy_static;
use log::{debug, info, warn};
use std::{collections::HashSet, fs, io::Read, path::Path};

const RUNTIME_SITE_TABLE_PATH: &str = "data/resources/restriction_sites.tsv";
const BUILTIN_SITE_TABLE_TSV: &str = include_str!("../assets/restriction_sites.tsv");

lazy_static! {
    static ref BUILTIN_SITE_TABLE: SiteTable = SiteTable::from_tsv_text(BUILTIN_SITE_TABLE_TSV)
        .expect("bundled restriction site table must parse");
}

/// Ordered restriction sites as loaded from a tab-separated table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteTable {
    sites: Vec<RestrictionSite>,
}

impl SiteTable {
    pub fn new(sites: Vec<RestrictionSite>) -> Self {
        Self { sites }
    }

    /// Reads `pattern<TAB>enzyme[<TAB>...]` rows. Rows with fewer than two
    /// fields are dropped, unsupported pattern characters are removed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);
        let mut sites = vec![];
        for row in csv_reader.records() {
            let row = row?;
            if row.len() < 2 {
                debug!("Ignoring site table row {:?}", row.position());
                continue;
            }
            let pattern = tidy_pattern(&row[0]);
            sites.push(RestrictionSite::new(pattern, &row[1]));
        }
        Ok(Self { sites })
    }

    pub fn from_tsv_text(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ResiteError::io(path, e))?;
        let ret = Self::from_tsv_text(&text)?;
        info!("Loaded {} restriction sites from {}", ret.len(), path.display());
        Ok(ret)
    }

    /// The table compiled into the binary.
    pub fn builtin() -> Self {
        BUILTIN_SITE_TABLE.clone()
    }

    /// The runtime override table if one exists and is not empty,
    /// otherwise the built-in table.
    pub fn active() -> Result<Self> {
        Self::override_or_builtin(RUNTIME_SITE_TABLE_PATH)
    }

    /// Loads `path` if it exists. An override that exists but cannot be
    /// read or parsed is an error; an empty one falls back to the built-in table.
    pub fn override_or_builtin(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::builtin());
        }
        let custom = Self::from_path(path)?;
        if custom.is_empty() {
            warn!("{} has no usable rows, using the built-in table", path.display());
            return Ok(Self::builtin());
        }
        Ok(custom)
    }

    pub fn sites(&self) -> &[RestrictionSite] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Appends the reverse complement of every non-palindromic site whose
    /// complement pattern is not already in the table. Only entries present
    /// before the call are considered, both as sources and for the existence
    /// check. Returns the number of entries added.
    pub fn add_complements(&mut self) -> usize {
        let known: HashSet<String> = self.sites.iter().map(|s| s.pattern.clone()).collect();
        let added: Vec<RestrictionSite> = self
            .sites
            .iter()
            .filter(|site| !site.is_palindromic())
            .map(RestrictionSite::complement_site)
            .filter(|rc| !known.contains(&rc.pattern))
            .collect();
        let n = added.len();
        self.sites.extend(added);
        debug!("Added {n} complement sites");
        n
    }

    pub fn with_complements(mut self) -> Self {
        self.add_complements();
        self
    }

    /// Keeps only the sites whose enzyme passes `keep`.
    pub fn retain_enzymes<F: Fn(&str) -> bool>(&mut self, keep: F) {
        self.sites.retain(|site| keep(&site.enzyme));
    }

    /// Compiles every usable pattern, in table order.
    pub fn compile(&self) -> Vec<CompiledSite> {
        self.sites
            .iter()
            .filter_map(RestrictionSite::compile)
            .collect()
    }
}
