use crate::errors::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Directory names never descended into: VCS metadata, build output, caches
/// and virtual environments.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "__pycache__",
    "build",
    "dist",
    ".venv",
    "venv",
    "node_modules",
    ".mypy_cache",
    ".pytest_cache",
    ".tox",
    "target",
    "*.egg-info",
];

/// What to pick up while walking a tree.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Source extension without the dot
    pub extension: String,
    /// Glob patterns a root-relative path must match (empty = everything)
    pub include: Vec<String>,
    /// Glob patterns excluding root-relative paths
    pub exclude: Vec<String>,
    /// Directory names (globs allowed) that are skipped entirely
    pub exclude_dirs: Vec<String>,
    pub respect_gitignore: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            extension: "py".to_string(),
            include: Vec::new(),
            exclude: Vec::new(),
            exclude_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            respect_gitignore: false,
        }
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Discover source files under `root`.
///
/// - Skips excluded directory names without descending into them
/// - Applies include/exclude glob patterns to root-relative paths
/// - Returns sorted absolute paths for deterministic output
pub fn discover_files(root: &Path, options: &DiscoveryOptions) -> Result<Vec<PathBuf>> {
    let exclude_set = build_globset(&options.exclude)?;
    let include_set = if options.include.is_empty() {
        None
    } else {
        Some(build_globset(&options.include)?)
    };
    let dir_set = build_globset(&options.exclude_dirs)?;

    let walk_root = root.to_path_buf();
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(options.respect_gitignore)
        .git_global(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .ignore(false)
        .parents(false)
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            if !is_dir || entry.path() == walk_root {
                return true;
            }
            !dir_set.is_match(Path::new(entry.file_name()))
        })
        .build();

    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!("Skipping unreadable entry: {err}");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let ext_match = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext == options.extension);
        if !ext_match {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);

        if exclude_set.is_match(relative) {
            continue;
        }

        if let Some(ref include) = include_set {
            if !include.is_match(relative) {
                continue;
            }
        }

        files.push(path.to_path_buf());
    }

    files.sort();

    Ok(files)
}
