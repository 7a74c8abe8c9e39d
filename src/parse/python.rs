use crate::errors::{ModshiftError, Result};
use crate::parse::common::RawImport;
use crate::parse::{extractor, resolver, ParseFrontend};
use std::path::{Path, PathBuf};

/// Frontend for dotted-import languages (`import a.b`, `from .a import b`).
pub struct PythonFrontend {
    extension: String,
}

impl PythonFrontend {
    pub fn new() -> Self {
        Self::with_extension("py")
    }

    pub fn with_extension(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl Default for PythonFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseFrontend for PythonFrontend {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn extract_imports(&self, source: &[u8], file_path: &Path) -> Result<Vec<RawImport>> {
        let text = std::str::from_utf8(source).map_err(|e| ModshiftError::ParseError {
            file: file_path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(extractor::extract_imports(text))
    }

    fn resolve(&self, raw: &RawImport, importer: &Path, project_root: &Path) -> Vec<PathBuf> {
        resolver::resolve_import(raw, importer, project_root, &self.extension)
    }
}
