pub mod check;
pub mod config;
pub mod map;
pub mod rename;

use crate::config::resolve::{resolve_config, CliOverrides};
use crate::config::ResolvedConfig;
use crate::errors::{ModshiftError, Result};
use crate::graph::builder::{build_graph, BuildStats};
use crate::graph::ir::DependencyGraph;
use crate::parse::python::PythonFrontend;
use crate::query::QueryService;
use clap::{Args, Parser, Subcommand};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "modshift",
    version,
    about = "Cross-file dependency analysis and safe module renames"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the dependency graph and write it as JSON
    Map(map::MapArgs),
    /// Show what a file imports and which files import it
    CheckFile(check::CheckFileArgs),
    /// Show which files a rename would touch, without changing anything
    CheckRename(check::CheckRenameArgs),
    /// Rename a file and rewrite every import of it (dry run unless --execute)
    Rename(rename::RenameArgs),
    /// Inspect resolved configuration
    Config(config::ConfigArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Map(args) => map::run(&args),
        Commands::CheckFile(args) => check::run_file(&args),
        Commands::CheckRename(args) => check::run_rename(&args),
        Commands::Rename(args) => rename::run(&args),
        Commands::Config(args) => config::run(&args),
    }
}

/// Flags shared by every command that scans the tree.
#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// Project root to scan
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Source file extension (default: py)
    #[arg(long)]
    pub ext: Option<String>,

    /// Exclude glob patterns, relative to the root
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Additional directory names to skip
    #[arg(long = "exclude-dir")]
    pub exclude_dir: Vec<String>,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,
}

impl ScanArgs {
    fn to_cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            extension: self.ext.clone(),
            quiet: self.quiet,
            exclude: self.exclude.clone(),
            exclude_dirs: self.exclude_dir.clone(),
            ..Default::default()
        }
    }

    /// Canonical root plus the configuration resolved from it.
    fn prepare(&self, overrides: CliOverrides) -> Result<(PathBuf, ResolvedConfig)> {
        let root = self
            .root
            .canonicalize()
            .map_err(|_| ModshiftError::NoFiles {
                path: self.root.clone(),
            })?;
        if !root.is_dir() {
            return Err(ModshiftError::NoFiles { path: root });
        }
        let config = resolve_config(&root, &overrides)?;
        Ok((root, config))
    }
}

/// Build a fresh graph for `root`. A tree without source files yields an
/// empty graph.
fn build_query(root: &Path, config: &ResolvedConfig) -> Result<(QueryService, BuildStats)> {
    let frontend = PythonFrontend::with_extension(config.extension.clone());
    let options = config.discovery_options();
    let (graph, stats) = match build_graph(root, &frontend, &options, !config.quiet) {
        Ok(built) => built,
        Err(ModshiftError::NoFiles { path }) => {
            tracing::warn!("No .{} files found in {}", config.extension, path.display());
            (DependencyGraph::default(), BuildStats::default())
        }
        Err(e) => return Err(e),
    };
    Ok((QueryService::new(graph, config.extension.clone()), stats))
}

/// Express a command-line path relative to `root`.
///
/// Relative paths are taken as root-relative; absolute paths must lie
/// inside the root. `.` and `..` components are folded lexically.
pub fn root_relative(root: &Path, given: &Path) -> Result<PathBuf> {
    let outside = || ModshiftError::OutsideRoot {
        path: given.to_path_buf(),
        root: root.to_path_buf(),
    };

    let relative = if given.is_absolute() {
        match given.strip_prefix(root) {
            Ok(rest) => rest.to_path_buf(),
            Err(_) => {
                let canonical = given.canonicalize().map_err(|_| outside())?;
                canonical
                    .strip_prefix(root)
                    .map_err(|_| outside())?
                    .to_path_buf()
            }
        }
    } else {
        given.to_path_buf()
    };

    let mut normalized = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(outside());
                }
            }
            Component::Normal(part) => normalized.push(part),
            Component::RootDir | Component::Prefix(_) => return Err(outside()),
        }
    }
    if normalized.as_os_str().is_empty() {
        return Err(outside());
    }
    Ok(normalized)
}
