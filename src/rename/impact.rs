use crate::parse::common::{display_path, module_name, path_segments, RawImport, SourceFile};
use crate::parse::resolver::relative_anchor;
use crate::rename::rewriter::{names_module, replacement_for};
use std::collections::BTreeMap;
use std::path::Path;

/// Why an import was considered a reference to the renamed module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactReason {
    /// `import lib.b` / `from lib.b import x` / `import lib.b.attr`
    Absolute,
    /// `from .b import x`, with the target derived from the importer's directory
    Relative,
    /// `from lib import b` / `from . import b`: the module is an imported name
    Submodule,
    /// A relative import inside the moved file that reaches a different
    /// target once the file sits in its new directory
    MovedAnchor,
}

/// One import in an impacted file that refers to the old module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactedReference {
    pub line: usize,
    /// The module reference as written
    pub written: String,
    pub reason: ImpactReason,
    /// Old and new reference text for this importer; `None` when the
    /// reference cannot be rewritten mechanically
    pub rewrite: Option<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactedFile {
    pub path: String,
    pub references: Vec<ImpactedReference>,
}

impl ImpactedFile {
    /// Distinct (old, new) pairs to hand to the rewriter, in first-seen order.
    pub fn rewrites(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = Vec::new();
        for pair in self.references.iter().filter_map(|r| r.rewrite.as_ref()) {
            if !pairs.contains(pair) {
                pairs.push(pair.clone());
            }
        }
        pairs
    }

    /// Whether some reference has to be fixed by hand.
    pub fn needs_review(&self) -> bool {
        self.references.iter().any(|r| r.rewrite.is_none())
    }
}

/// Everything that has to change for `old_path` to become `new_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameImpact {
    pub old_path: String,
    pub new_path: String,
    pub old_module: String,
    pub new_module: String,
    /// Sorted by path, one entry per file
    pub impacted: Vec<ImpactedFile>,
}

impl RenameImpact {
    #[cfg(test)]
    pub fn impacted_paths(&self) -> Vec<&str> {
        self.impacted.iter().map(|f| f.path.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.impacted.is_empty()
    }
}

/// Find every file whose raw imports reference `old` (root-relative).
///
/// Raw imports are inspected rather than resolved edges so that references
/// the resolver could not bind are still caught. Relative references are
/// evaluated per importer, and their replacement text is derived from each
/// importer's own directory; for the moved file itself that is its new
/// directory. Relative imports of the moved file that would change meaning
/// after the move are listed for manual review.
pub fn calculate_impact<'a>(
    sources: impl IntoIterator<Item = &'a SourceFile>,
    old: &Path,
    new: &Path,
    extension: &str,
) -> RenameImpact {
    let old_module = module_name(old, extension);
    let new_module = module_name(new, extension);
    let old_segments: Vec<String> = old_module.split('.').map(str::to_string).collect();
    let new_segments: Vec<String> = new_module.split('.').map(str::to_string).collect();
    let old_display = display_path(old);

    let mut impacted: BTreeMap<String, Vec<ImpactedReference>> = BTreeMap::new();

    for source in sources {
        let is_moved = display_path(&source.path) == old_display;
        let importer_package = if is_moved {
            new.parent().map(path_segments).unwrap_or_default()
        } else {
            source.package_segments()
        };
        for raw in &source.imports {
            let reference = if raw.is_relative() {
                relative_reference(raw, &source.path, &importer_package, &old_segments, &new_segments)
                    .or_else(|| is_moved.then(|| moved_anchor(raw, old, new)).flatten())
            } else {
                absolute_reference(raw, &old_module, &new_module, &old_segments)
            };
            if let Some(reference) = reference {
                impacted
                    .entry(display_path(&source.path))
                    .or_default()
                    .push(reference);
            }
        }
    }

    tracing::debug!(
        "{} -> {}: {} impacted file(s)",
        old_module,
        new_module,
        impacted.len()
    );

    RenameImpact {
        old_path: display_path(old),
        new_path: display_path(new),
        old_module,
        new_module,
        impacted: impacted
            .into_iter()
            .map(|(path, references)| ImpactedFile { path, references })
            .collect(),
    }
}

fn absolute_reference(
    raw: &RawImport,
    old_module: &str,
    new_module: &str,
    old_segments: &[String],
) -> Option<ImpactedReference> {
    let module = raw.module();
    if names_module(module, old_module) {
        return Some(ImpactedReference {
            line: raw.line,
            written: raw.describe(),
            reason: ImpactReason::Absolute,
            rewrite: replacement_for(module, old_module, new_module)
                .map(|_| (old_module.to_string(), new_module.to_string())),
        });
    }

    let (last, parent) = old_segments.split_last()?;
    if !parent.is_empty() && module == parent.join(".") && raw.names().contains(last) {
        return Some(submodule(raw));
    }
    None
}

fn relative_reference(
    raw: &RawImport,
    importer: &Path,
    importer_package: &[String],
    old_segments: &[String],
    new_segments: &[String],
) -> Option<ImpactedReference> {
    let anchor = relative_anchor(importer, raw.level)?;
    let module_segments: Vec<String> = raw
        .module()
        .split('.')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let mut target = anchor.clone();
    target.extend(module_segments.iter().cloned());

    if !module_segments.is_empty() && target.starts_with(old_segments) {
        // The written module covers the old module only when the anchor is a
        // strict prefix of it; otherwise the dots alone already reach past it.
        let rewrite = (anchor.len() < old_segments.len()
            && old_segments.starts_with(&anchor))
        .then(|| {
            let covered = old_segments.len() - anchor.len();
            let old_text = format!(
                "{}{}",
                ".".repeat(raw.level),
                module_segments[..covered].join(".")
            );
            (old_text, relative_path_to(importer_package, new_segments))
        })
        .filter(|(old_text, new_text)| replacement_for(&raw.raw_path, old_text, new_text).is_some());
        return Some(ImpactedReference {
            line: raw.line,
            written: raw.describe(),
            reason: ImpactReason::Relative,
            rewrite,
        });
    }

    let (last, parent) = old_segments.split_last()?;
    if target.as_slice() == parent && raw.names().contains(last) {
        return Some(submodule(raw));
    }
    None
}

/// A relative import of the moved file whose anchor differs between `old`
/// and `new`.
fn moved_anchor(raw: &RawImport, old: &Path, new: &Path) -> Option<ImpactedReference> {
    let before = relative_anchor(old, raw.level);
    let after = relative_anchor(new, raw.level);
    (before != after).then(|| ImpactedReference {
        line: raw.line,
        written: raw.describe(),
        reason: ImpactReason::MovedAnchor,
        rewrite: None,
    })
}

fn submodule(raw: &RawImport) -> ImpactedReference {
    ImpactedReference {
        line: raw.line,
        written: raw.describe(),
        reason: ImpactReason::Submodule,
        rewrite: None,
    }
}

/// Relative reference from a file in `importer_package` to `target`.
///
/// One dot for the importer's own package plus one per directory climbed
/// out of it, followed by the target segments below the shared ancestor.
pub fn relative_path_to(importer_package: &[String], target: &[String]) -> String {
    let shared = importer_package
        .iter()
        .zip(target.iter().take(target.len().saturating_sub(1)))
        .take_while(|(a, b)| a == b)
        .count();
    let level = importer_package.len() - shared + 1;
    format!("{}{}", ".".repeat(level), target[shared..].join("."))
}
