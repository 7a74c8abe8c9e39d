pub mod common;
pub mod declaration;
pub mod extractor;
pub mod python;
pub mod resolver;

pub use common::{RawImport, SourceFile};

use crate::errors::Result;
use std::path::{Path, PathBuf};

/// Parser frontend trait, one per import syntax family.
pub trait ParseFrontend: Send + Sync {
    /// Source file extension handled by this frontend, without the dot.
    fn extension(&self) -> &str;

    /// Extract raw imports from a single file's source bytes.
    /// Fails only when the bytes cannot be read as text.
    fn extract_imports(&self, source: &[u8], file_path: &Path) -> Result<Vec<RawImport>>;

    /// Resolve a raw import, as written in `importer`, to root-relative
    /// on-tree files. An empty result means external or unresolvable.
    fn resolve(&self, raw: &RawImport, importer: &Path, project_root: &Path) -> Vec<PathBuf>;
}
