use crate::errors::Result;
use crate::graph::ir::{DependencyGraph, GraphDocument};
use crate::parse::common::{display_path, module_name};
use std::path::Path;

/// Answers dependency questions against one graph value.
pub struct QueryService {
    graph: DependencyGraph,
    extension: String,
}

impl QueryService {
    pub fn new(graph: DependencyGraph, extension: impl Into<String>) -> Self {
        Self {
            graph,
            extension: extension.into(),
        }
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Raw import strings and resolved paths of `file`, sorted.
    /// An unknown file has no dependencies.
    pub fn dependencies_of(&self, file: &Path) -> Vec<String> {
        self.graph
            .forward()
            .get(&display_path(file))
            .map(|deps| deps.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Files with a forward edge naming `file`, sorted.
    ///
    /// An edge names the file when it is the file's path or dotted module,
    /// extends the dotted module (`lib.b.helper`), or is a segment-aligned
    /// tail of it (`b`, `.b` for `lib.b`).
    pub fn dependents_of(&self, file: &Path) -> Vec<String> {
        let path_key = display_path(file);
        let dotted = module_name(file, &self.extension);

        let mut dependents: Vec<String> = self
            .graph
            .reverse()
            .iter()
            .filter(|(edge, _)| edge_names_file(edge, &path_key, &dotted))
            .flat_map(|(_, files)| files.iter().cloned())
            .collect();
        dependents.sort();
        dependents.dedup();
        dependents
    }

    /// Write the graph as a pretty JSON document with sorted keys and values.
    pub fn save_graph(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(&self.graph.to_document())?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a graph previously written by [`QueryService::save_graph`].
    pub fn load_graph(path: &Path, extension: impl Into<String>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let doc: GraphDocument = serde_json::from_str(&content)?;
        Ok(Self::new(DependencyGraph::from_document(doc), extension))
    }
}

fn edge_names_file(edge: &str, path_key: &str, dotted: &str) -> bool {
    if edge == path_key || edge == dotted {
        return true;
    }
    if dotted.is_empty() {
        return false;
    }
    if edge
        .strip_prefix(dotted)
        .is_some_and(|rest| rest.starts_with('.'))
    {
        return true;
    }
    let tail = edge.trim_start_matches('.');
    !tail.is_empty()
        && (tail == dotted
            || dotted
                .strip_suffix(tail)
                .is_some_and(|head| head.ends_with('.')))
}
