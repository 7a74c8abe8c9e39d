use std::path::{Component, Path, PathBuf};

/// Raw import extracted from a single source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImport {
    /// The module path as written in source, leading dots included
    pub raw_path: String,
    /// Line number of the import statement (1-indexed)
    pub line: usize,
    /// Leading-dot depth of a relative import; 0 for absolute imports
    pub level: usize,
    /// Classification of the declaration
    pub kind: ImportKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportKind {
    /// `import foo.bar`
    Plain,
    /// `import foo.bar as baz`
    Aliased { alias: String },
    /// `from foo.bar import x, y` / `from ..foo import x`
    FromImport { names: Vec<String> },
}

impl RawImport {
    /// The dotted module part, without any leading dots.
    pub fn module(&self) -> &str {
        &self.raw_path[self.level..]
    }

    /// The reference as a reader would quote it, alias included.
    pub fn describe(&self) -> String {
        match &self.kind {
            ImportKind::Aliased { alias } => format!("{} as {alias}", self.raw_path),
            ImportKind::Plain | ImportKind::FromImport { .. } => self.raw_path.clone(),
        }
    }

    pub fn is_relative(&self) -> bool {
        self.level > 0
    }

    /// Names brought in by a from-import; empty for the other kinds.
    pub fn names(&self) -> &[String] {
        match &self.kind {
            ImportKind::FromImport { names } => names,
            ImportKind::Plain | ImportKind::Aliased { .. } => &[],
        }
    }
}

/// A scanned file: its path relative to the root and everything it imports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub imports: Vec<RawImport>,
}

impl SourceFile {
    pub fn new(path: PathBuf, imports: Vec<RawImport>) -> Self {
        Self { path, imports }
    }

    /// Directory segments of the file, relative to the root.
    pub fn package_segments(&self) -> Vec<String> {
        self.path
            .parent()
            .map(path_segments)
            .unwrap_or_default()
    }
}

/// Render a root-relative path with `/` separators on every platform.
pub fn display_path(path: &Path) -> String {
    path_segments(path).join("/")
}

/// Normal components of a path as owned strings.
pub fn path_segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Dotted module name for a root-relative file path (`lib/b.py` -> `lib.b`).
pub fn module_name(path: &Path, extension: &str) -> String {
    let rendered = display_path(path);
    let suffix = format!(".{extension}");
    rendered
        .strip_suffix(&suffix)
        .unwrap_or(&rendered)
        .replace('/', ".")
}
