use crate::parse::common::SourceFile;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// File path or module string -> sorted set of strings.
pub type EdgeMap = BTreeMap<String, BTreeSet<String>>;

/// The dependency graph.
///
/// `forward` maps each scanned file to the raw import strings it contains
/// plus the on-tree files those strings resolved to. `reverse` is always the
/// transpose of `forward`: [`DependencyGraph::new`] derives it in one pass
/// and neither map is mutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    forward: EdgeMap,
    reverse: EdgeMap,
    /// Scanned files with their typed imports, keyed by display path
    sources: BTreeMap<String, SourceFile>,
}

impl DependencyGraph {
    pub fn new(forward: EdgeMap, sources: BTreeMap<String, SourceFile>) -> Self {
        let reverse = transpose(&forward);
        Self {
            forward,
            reverse,
            sources,
        }
    }

    pub fn forward(&self) -> &EdgeMap {
        &self.forward
    }

    pub fn reverse(&self) -> &EdgeMap {
        &self.reverse
    }

    /// Scanned files in path order. Empty for a graph loaded from disk.
    pub fn sources(&self) -> impl Iterator<Item = &SourceFile> {
        self.sources.values()
    }

    #[cfg(test)]
    pub fn source(&self, path: &str) -> Option<&SourceFile> {
        self.sources.get(path)
    }

    pub fn file_count(&self) -> usize {
        self.forward.len()
    }

    pub fn edge_count(&self) -> usize {
        self.forward.values().map(BTreeSet::len).sum()
    }

    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            dependencies: flatten(&self.forward),
            reverse_dependencies: flatten(&self.reverse),
        }
    }

    /// Rebuild a graph from its serialized form.
    ///
    /// Only the forward map is trusted; the reverse map is recomputed and a
    /// stored reverse map that disagrees is reported.
    pub fn from_document(doc: GraphDocument) -> Self {
        let forward: EdgeMap = doc
            .dependencies
            .into_iter()
            .map(|(file, deps)| (file, deps.into_iter().collect()))
            .collect();
        let graph = Self::new(forward, BTreeMap::new());

        let stored: EdgeMap = doc
            .reverse_dependencies
            .into_iter()
            .map(|(key, files)| (key, files.into_iter().collect()))
            .collect();
        if stored != graph.reverse {
            tracing::warn!(
                "Stored reverse_dependencies do not match dependencies; using recomputed map"
            );
        }
        graph
    }
}

/// Serialized graph document: both maps with sorted keys and values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub dependencies: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub reverse_dependencies: BTreeMap<String, Vec<String>>,
}

/// Exact transpose of an edge map: `to -> {from}` for every `from -> to`.
pub fn transpose(forward: &EdgeMap) -> EdgeMap {
    let mut reverse = EdgeMap::new();
    for (from, targets) in forward {
        for to in targets {
            reverse.entry(to.clone()).or_default().insert(from.clone());
        }
    }
    reverse
}

fn flatten(map: &EdgeMap) -> BTreeMap<String, Vec<String>> {
    map.iter()
        .map(|(k, v)| (k.clone(), v.iter().cloned().collect()))
        .collect()
}
