use crate::parse::common::path_segments;
use std::path::Path;

const IGNORE_FILE: &str = ".modshiftignore";

/// Load the nearest `.modshiftignore` at or above `root`.
///
/// Lines follow gitignore conventions and come back as globs over
/// root-relative paths, ready for the walker's exclude set. A file found in
/// an ancestor is anchored there, so its patterns are rebased onto `root`.
pub fn load_modshiftignore(root: &Path) -> Vec<String> {
    for dir in root.ancestors() {
        let ignore_path = dir.join(IGNORE_FILE);
        if !ignore_path.is_file() {
            continue;
        }
        match std::fs::read_to_string(&ignore_path) {
            Ok(content) => {
                tracing::debug!("Loaded {}", ignore_path.display());
                let below = root.strip_prefix(dir).map(path_segments).unwrap_or_default();
                return parse_ignore_patterns(&content)
                    .into_iter()
                    .filter_map(|glob| rebase(&glob, &below))
                    .collect();
            }
            Err(e) => tracing::warn!("Could not read {}: {e}", ignore_path.display()),
        }
    }
    Vec::new()
}

/// Strip the leading segments of `glob` that lead from the ignore file's
/// directory down to the root. `None` when the glob cannot match below it.
fn rebase(glob: &str, below: &[String]) -> Option<String> {
    let mut parts: Vec<&str> = glob.split('/').collect();
    for segment in below {
        match parts.first() {
            Some(&"**") => break,
            Some(&first) if parts.len() > 1 && segment_matches(first, segment) => {
                parts.remove(0);
            }
            _ => {
                tracing::debug!("Ignore pattern {glob} does not apply below the root");
                return None;
            }
        }
    }
    Some(parts.join("/"))
}

fn segment_matches(pattern: &str, segment: &str) -> bool {
    globset::Glob::new(pattern)
        .map(|g| g.compile_matcher().is_match(segment))
        .unwrap_or(false)
}

fn parse_ignore_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(to_glob)
        .collect()
}

/// `dir/` covers everything below it, `/x` is anchored at the root and a
/// bare name matches at any depth.
fn to_glob(line: &str) -> String {
    let anchored = line.starts_with('/');
    let body = line.trim_start_matches('/');
    let (body, dir_only) = match body.strip_suffix('/') {
        Some(dir) => (dir, true),
        None => (body, false),
    };

    let mut glob = if anchored || body.contains('/') {
        body.to_string()
    } else {
        format!("**/{body}")
    };
    if dir_only {
        glob.push_str("/**");
    }
    glob
}
