use crate::errors::{ModshiftError, Result};
use crate::graph::ir::{DependencyGraph, EdgeMap};
use crate::parse::common::{display_path, RawImport, SourceFile};
use crate::parse::ParseFrontend;
use crate::walk::{self, DiscoveryOptions};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A raw import together with every on-tree file it may refer to.
#[derive(Debug, Clone)]
pub struct ResolvedImport {
    pub raw: RawImport,
    pub targets: Vec<PathBuf>,
}

/// Counters gathered while building a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub files_parsed: usize,
    pub files_skipped: usize,
    pub raw_imports: usize,
    pub resolved_imports: usize,
    pub unresolved_imports: usize,
    /// Imports that resolved to more than one file
    pub ambiguous_imports: usize,
}

/// Accumulates forward edges file by file, then derives the graph.
pub struct GraphBuilder {
    forward: EdgeMap,
    sources: BTreeMap<String, SourceFile>,
    stats: BuildStats,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            forward: EdgeMap::new(),
            sources: BTreeMap::new(),
            stats: BuildStats::default(),
        }
    }

    /// Record one scanned file and its resolved imports as forward edges.
    pub fn add_file(&mut self, file: SourceFile, resolved: &[ResolvedImport]) {
        let key = display_path(&file.path);
        let edges = self.forward.entry(key.clone()).or_default();

        for import in resolved {
            edges.insert(import.raw.raw_path.clone());
            for target in &import.targets {
                edges.insert(display_path(target));
            }

            self.stats.raw_imports += 1;
            match import.targets.len() {
                0 => self.stats.unresolved_imports += 1,
                1 => self.stats.resolved_imports += 1,
                _ => {
                    self.stats.resolved_imports += 1;
                    self.stats.ambiguous_imports += 1;
                }
            }
        }

        self.stats.files_parsed += 1;
        self.sources.insert(key, file);
    }

    /// Record a file whose text could not be scanned; it keeps an empty
    /// import set.
    pub fn add_skipped(&mut self, path: PathBuf) {
        let key = display_path(&path);
        self.forward.entry(key.clone()).or_default();
        self.sources.insert(key, SourceFile::new(path, Vec::new()));
        self.stats.files_skipped += 1;
    }

    /// Consume the builder. The reverse map is derived here, after every
    /// forward edge is known.
    pub fn build(self) -> (DependencyGraph, BuildStats) {
        (DependencyGraph::new(self.forward, self.sources), self.stats)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of scanning a single file (collected from parallel workers).
enum FileScan {
    Parsed {
        file: SourceFile,
        resolved: Vec<ResolvedImport>,
    },
    Skipped(PathBuf),
}

fn scan_file(root: &Path, file_path: &Path, frontend: &dyn ParseFrontend) -> FileScan {
    let relative = file_path
        .strip_prefix(root)
        .unwrap_or(file_path)
        .to_path_buf();

    let imports = std::fs::read(file_path)
        .map_err(ModshiftError::from)
        .and_then(|source| frontend.extract_imports(&source, &relative));

    match imports {
        Ok(imports) => {
            let resolved = imports
                .iter()
                .map(|raw| ResolvedImport {
                    raw: raw.clone(),
                    targets: frontend.resolve(raw, &relative, root),
                })
                .collect();
            FileScan::Parsed {
                file: SourceFile::new(relative, imports),
                resolved,
            }
        }
        Err(e) => {
            tracing::warn!("Treating {} as import-free: {e}", relative.display());
            FileScan::Skipped(relative)
        }
    }
}

/// Walk `root`, scan every source file and assemble the dependency graph.
///
/// Files are scanned in parallel; edges are inserted sequentially in path
/// order, so the result does not depend on scheduling.
pub fn build_graph(
    root: &Path,
    frontend: &dyn ParseFrontend,
    options: &DiscoveryOptions,
    show_progress: bool,
) -> Result<(DependencyGraph, BuildStats)> {
    let files = walk::discover_files(root, options)?;
    if files.is_empty() {
        return Err(ModshiftError::NoFiles {
            path: root.to_path_buf(),
        });
    }
    tracing::debug!("Scanning {} files under {}", files.len(), root.display());

    let progress = if show_progress {
        let pb = indicatif::ProgressBar::new(files.len() as u64);
        if let Ok(style) = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    } else {
        None
    };

    let scans: Vec<FileScan> = files
        .par_iter()
        .map(|file_path| {
            let scan = scan_file(root, file_path, frontend);
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
            scan
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let mut builder = GraphBuilder::new();
    for scan in scans {
        match scan {
            FileScan::Parsed { file, resolved } => builder.add_file(file, &resolved),
            FileScan::Skipped(path) => builder.add_skipped(path),
        }
    }

    Ok(builder.build())
}
