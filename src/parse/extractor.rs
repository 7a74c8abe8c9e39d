use crate::parse::common::{ImportKind, RawImport};
use crate::parse::declaration::{scan_line, Declaration};

/// Extract every import declaration from `text`, in source order.
///
/// Never fails: text without recognizable import syntax yields an empty list.
pub fn extract_imports(text: &str) -> Vec<RawImport> {
    let mut imports = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        for decl in scan_line(line) {
            match decl {
                Declaration::Import(modules) => {
                    for module in modules {
                        let kind = match module.alias {
                            Some(alias) => ImportKind::Aliased { alias },
                            None => ImportKind::Plain,
                        };
                        imports.push(RawImport {
                            raw_path: line[module.span].to_string(),
                            line: idx + 1,
                            level: 0,
                            kind,
                        });
                    }
                }
                Declaration::From { module, names } => {
                    let raw_path = line[module].to_string();
                    let level = raw_path.chars().take_while(|&c| c == '.').count();
                    imports.push(RawImport {
                        raw_path,
                        line: idx + 1,
                        level,
                        kind: ImportKind::FromImport { names },
                    });
                }
            }
        }
    }

    imports
}
