//! Line-level recognition of import declarations.
//!
//! Both the extractor and the rewriter go through [`scan_line`], so the set of
//! shapes that produce graph edges is exactly the set of shapes a rename
//! rewrites. Spans are byte ranges into the scanned line.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static IMPORT_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*import\s+(?P<rest>.+)$").expect("IMPORT_DECL regex is invalid")
});

static FROM_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*from\s+(?P<module>\.+(?:[A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)?|[A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)\s+import\b(?P<rest>.*)$",
    )
    .expect("FROM_DECL regex is invalid")
});

static MODULE_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<module>[A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)(?:\s+as\s+(?P<alias>[A-Za-z_]\w*))?\s*$")
        .expect("MODULE_ITEM regex is invalid")
});

/// One module named by an `import` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedModule {
    pub span: Range<usize>,
    pub alias: Option<String>,
}

/// A recognized declaration on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// `import a.b`, `import a.b as c`, `import a, b as c`
    Import(Vec<ImportedModule>),
    /// `from a.b import x, y` including leading-dot relative forms
    From {
        module: Range<usize>,
        names: Vec<String>,
    },
}

impl Declaration {
    /// Byte ranges of every module reference in the declaration.
    pub fn module_spans(&self) -> Vec<Range<usize>> {
        match self {
            Declaration::Import(modules) => modules.iter().map(|m| m.span.clone()).collect(),
            Declaration::From { module, .. } => vec![module.clone()],
        }
    }
}

/// The line with any trailing `#` comment removed.
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Recognize the import declarations on `line`, ignoring trailing comments.
///
/// `;`-joined statements are scanned one by one, so `import a; a.run()` and
/// `from a import x; import b` both yield their imports.
pub fn scan_line(line: &str) -> Vec<Declaration> {
    let code = strip_comment(line);
    let mut declarations = Vec::new();
    let mut offset = 0;
    for statement in code.split(';') {
        declarations.extend(scan_statement(statement, offset));
        offset += statement.len() + 1;
    }
    declarations
}

/// One statement starting at byte `base` of its line.
fn scan_statement(code: &str, base: usize) -> Option<Declaration> {
    if let Some(caps) = FROM_DECL.captures(code) {
        let module = caps.name("module")?;
        let rest = caps.name("rest").map_or("", |m| m.as_str());
        return Some(Declaration::From {
            module: base + module.start()..base + module.end(),
            names: imported_names(rest),
        });
    }

    let caps = IMPORT_DECL.captures(code)?;
    let rest = caps.name("rest")?;
    let mut modules = Vec::new();
    let mut offset = base + rest.start();
    for piece in rest.as_str().split(',') {
        if let Some(item) = MODULE_ITEM.captures(piece) {
            if let Some(m) = item.name("module") {
                modules.push(ImportedModule {
                    span: offset + m.start()..offset + m.end(),
                    alias: item.name("alias").map(|a| a.as_str().to_string()),
                });
            }
        }
        offset += piece.len() + 1;
    }

    if modules.is_empty() {
        None
    } else {
        Some(Declaration::Import(modules))
    }
}

fn imported_names(rest: &str) -> Vec<String> {
    rest.split(',')
        .map(|n| n.trim_matches(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '\\')))
        .filter_map(|n| n.split_whitespace().next())
        .map(|n| n.to_string())
        .collect()
}
