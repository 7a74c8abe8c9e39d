pub mod ignore;
pub mod provenance;
pub mod resolve;
pub mod schema;
pub mod show;

use crate::walk::{DiscoveryOptions, DEFAULT_EXCLUDED_DIRS};
use provenance::ProvenanceMap;
use std::path::PathBuf;

pub const DEFAULT_EXTENSION: &str = "py";
pub const DEFAULT_OUTPUT: &str = "dependency_graph.json";

/// Fully resolved configuration with no Option fields.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    // Operational
    pub extension: String,
    pub quiet: bool,
    pub output: PathBuf,

    // Targeting
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub respect_gitignore: bool,
    pub ignore_patterns: Vec<String>,

    // Provenance
    pub provenance: ProvenanceMap,
    pub loaded_files: Vec<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            quiet: false,
            output: PathBuf::from(DEFAULT_OUTPUT),
            include: Vec::new(),
            exclude: Vec::new(),
            exclude_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            respect_gitignore: false,
            ignore_patterns: Vec::new(),
            provenance: ProvenanceMap::default(),
            loaded_files: Vec::new(),
        }
    }
}

impl ResolvedConfig {
    /// Walk settings for graph building; `.modshiftignore` patterns join the
    /// exclude globs.
    pub fn discovery_options(&self) -> DiscoveryOptions {
        let mut exclude = self.exclude.clone();
        exclude.extend(self.ignore_patterns.iter().cloned());
        DiscoveryOptions {
            extension: self.extension.clone(),
            include: self.include.clone(),
            exclude,
            exclude_dirs: self.exclude_dirs.clone(),
            respect_gitignore: self.respect_gitignore,
        }
    }
}

/// Accept `py`, `.py` and ` py ` alike.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_string()
}

/// Split a comma-separated environment value into trimmed, non-empty items.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
