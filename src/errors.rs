use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ModshiftError {
    #[error("No source files found in {path}")]
    #[diagnostic(code(modshift::no_files))]
    NoFiles { path: PathBuf },

    #[error("Parse error in {file}: {message}")]
    #[diagnostic(code(modshift::parse_error))]
    ParseError { file: PathBuf, message: String },

    #[error("Rename source does not exist: {path}")]
    #[diagnostic(
        code(modshift::missing_source),
        help("paths are relative to the scanned root")
    )]
    MissingSource { path: PathBuf },

    #[error("Rename destination already exists: {path}")]
    #[diagnostic(code(modshift::destination_conflict))]
    DestinationConflict { path: PathBuf },

    #[error("Could not rewrite imports in {file}: {message}")]
    #[diagnostic(code(modshift::rewrite_failure))]
    RewriteFailure { file: PathBuf, message: String },

    #[error("Rename finished with {failed} file(s) left unrewritten")]
    #[diagnostic(
        code(modshift::rename_incomplete),
        help("the file was moved; fix the listed importers by hand")
    )]
    RenameIncomplete { failed: usize },

    #[error("Path {path} is outside the scanned root {root}")]
    #[diagnostic(code(modshift::outside_root))]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(modshift::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(modshift::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(modshift::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(modshift::glob))]
    Glob(#[from] globset::Error),
}

pub type Result<T> = std::result::Result<T, ModshiftError>;
