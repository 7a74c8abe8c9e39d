use crate::parse::common::{path_segments, RawImport};
use std::path::{Path, PathBuf};

/// Resolve an absolute dotted module path to on-tree files.
///
/// Tries every prefix of the dotted path, longest first, and keeps all that
/// exist under `root` (`a.b.c` may bind to both `a/b/c.py` and `a/b.py`).
/// Returned paths are relative to `root`.
pub fn resolve_dotted(dotted: &str, root: &Path, extension: &str) -> Vec<PathBuf> {
    let segments: Vec<&str> = dotted.split('.').filter(|s| !s.is_empty()).collect();
    resolve_segments(&[], &segments, root, extension)
}

/// Resolve a raw import as seen from `importer` (root-relative).
pub fn resolve_import(
    raw: &RawImport,
    importer: &Path,
    root: &Path,
    extension: &str,
) -> Vec<PathBuf> {
    if !raw.is_relative() {
        return resolve_dotted(raw.module(), root, extension);
    }

    // `from . import x` names no module to resolve
    if raw.module().is_empty() {
        tracing::debug!(
            "Skipping bare relative import {:?} in {}",
            raw.raw_path,
            importer.display()
        );
        return Vec::new();
    }

    let Some(base) = relative_anchor(importer, raw.level) else {
        tracing::debug!(
            "Relative import {:?} in {} climbs above the root",
            raw.raw_path,
            importer.display()
        );
        return Vec::new();
    };
    let segments: Vec<&str> = raw.module().split('.').collect();
    resolve_segments(&base, &segments, root, extension)
}

/// Package segments a relative import of depth `level` is anchored at.
///
/// Level 1 is the importer's own directory; each extra dot climbs one
/// directory. Returns `None` when the climb leaves the root.
pub fn relative_anchor(importer: &Path, level: usize) -> Option<Vec<String>> {
    let mut base = importer.parent().map(path_segments).unwrap_or_default();
    for _ in 1..level {
        base.pop()?;
    }
    Some(base)
}

fn resolve_segments(
    base: &[String],
    segments: &[&str],
    root: &Path,
    extension: &str,
) -> Vec<PathBuf> {
    let mut matches = Vec::new();
    for len in (1..=segments.len()).rev() {
        let mut candidate: PathBuf = base.iter().collect();
        for segment in &segments[..len - 1] {
            candidate.push(segment);
        }
        candidate.push(format!("{}.{extension}", segments[len - 1]));
        if root.join(&candidate).is_file() {
            matches.push(candidate);
        }
    }
    matches
}
