use crate::errors::{ModshiftError, Result};
use crate::parse::declaration::scan_line;
use std::io::Write;
use std::path::Path;

/// `reference` is `module` itself or a dotted path below it.
pub(crate) fn names_module(reference: &str, module: &str) -> bool {
    reference
        .strip_prefix(module)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

/// Replacement text for a module reference, or `None` if it is left alone.
///
/// A reference is rewritten when it names `old` and the result no longer
/// does, so every rewrite is final:
/// - when `new` continues `old`, references already naming `new` are kept;
/// - when `old` continues `new`, a tail that would spell `old` again
///   (`a.b.b` for `a.b` -> `a`) is kept for manual review.
pub(crate) fn replacement_for(reference: &str, old: &str, new: &str) -> Option<String> {
    if !names_module(reference, old) {
        return None;
    }
    if names_module(new, old) {
        return (!names_module(reference, new)).then(|| format!("{new}{}", &reference[old.len()..]));
    }

    let replacement = format!("{new}{}", &reference[old.len()..]);
    (!names_module(&replacement, old)).then_some(replacement)
}

/// Rewrite one line, returning the new text and how many references changed.
fn rewrite_line(line: &str, old: &str, new: &str) -> (String, usize) {
    let mut spans: Vec<_> = scan_line(line)
        .iter()
        .flat_map(|decl| decl.module_spans())
        .collect();
    if spans.is_empty() {
        return (line.to_string(), 0);
    }
    spans.sort_by_key(|s| std::cmp::Reverse(s.start));

    let mut out = line.to_string();
    let mut changed = 0;
    for span in spans {
        if let Some(replacement) = replacement_for(&line[span.clone()], old, new) {
            out.replace_range(span, &replacement);
            changed += 1;
        }
    }
    (out, changed)
}

/// Substitute `new` for `old` in every import declaration of `text`.
///
/// Only module references inside `import` / `from ... import` declarations
/// are touched; comments, strings and line endings are preserved.
pub fn rewrite_source(text: &str, old: &str, new: &str) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut changed = 0;

    for chunk in text.split_inclusive('\n') {
        let body = chunk.trim_end_matches(['\n', '\r']);
        let ending = &chunk[body.len()..];
        let (line, n) = rewrite_line(body, old, new);
        out.push_str(&line);
        out.push_str(ending);
        changed += n;
    }

    (out, changed)
}

/// Apply each (old, new) pair to the file at `path` and persist the result.
///
/// The file is replaced atomically and only when something changed. Returns
/// the number of references rewritten.
pub fn rewrite_file(path: &Path, pairs: &[(String, String)]) -> Result<usize> {
    let bytes = std::fs::read(path)?;
    let original = String::from_utf8(bytes).map_err(|e| ModshiftError::ParseError {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut text = original.clone();
    let mut changed = 0;
    for (old, new) in pairs {
        let (next, n) = rewrite_source(&text, old, new);
        text = next;
        changed += n;
    }

    if text != original {
        persist_atomically(path, &text)?;
        tracing::debug!("Rewrote {} reference(s) in {}", changed, path.display());
    }
    Ok(changed)
}

/// Write `content` to a sibling temp file, then rename it over `path`.
fn persist_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
