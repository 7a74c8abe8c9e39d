use crate::errors::{ModshiftError, Result};
use crate::graph::builder::build_graph;
use crate::graph::ir::DependencyGraph;
use crate::parse::ParseFrontend;
use crate::rename::impact::{calculate_impact, RenameImpact};
use crate::rename::rewriter::rewrite_file;
use crate::walk::DiscoveryOptions;
use std::path::{Path, PathBuf};

/// Where a rename run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameState {
    Planning,
    /// Dry run finished; nothing was touched
    Reported,
    Moving,
    Rewriting,
    Done,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameMode {
    DryRun,
    Execute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenFile {
    pub path: String,
    pub references: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRewrite {
    pub path: String,
    pub message: String,
}

/// What a rename run did.
#[derive(Debug, Clone)]
pub struct RenameOutcome {
    pub mode: RenameMode,
    pub state: RenameState,
    pub impact: RenameImpact,
    pub moved: bool,
    pub rewritten: Vec<RewrittenFile>,
    pub failures: Vec<FailedRewrite>,
    /// Impacted files holding references that were not rewritten mechanically
    pub review: Vec<String>,
}

/// Sequences impact calculation, the physical move and the rewrites.
pub struct RenameOrchestrator<'a> {
    root: &'a Path,
    frontend: &'a dyn ParseFrontend,
    options: &'a DiscoveryOptions,
    show_progress: bool,
    state: RenameState,
}

impl<'a> RenameOrchestrator<'a> {
    pub fn new(root: &'a Path, frontend: &'a dyn ParseFrontend, options: &'a DiscoveryOptions) -> Self {
        Self {
            root,
            frontend,
            options,
            show_progress: false,
            state: RenameState::Planning,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    #[cfg(test)]
    pub fn state(&self) -> RenameState {
        self.state
    }

    fn transition(&mut self, next: RenameState) {
        tracing::debug!("rename: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Build a fresh graph and compute the impact of renaming `old` to `new`.
    ///
    /// Never fails because nothing references `old`; an empty tree simply
    /// yields an empty plan.
    pub fn plan(&mut self, old: &Path, new: &Path) -> Result<RenameImpact> {
        self.transition(RenameState::Planning);
        let graph = match build_graph(self.root, self.frontend, self.options, self.show_progress) {
            Ok((graph, _)) => graph,
            Err(ModshiftError::NoFiles { path }) => {
                tracing::debug!("No source files under {}; planning on an empty graph", path.display());
                DependencyGraph::default()
            }
            Err(e) => return Err(e),
        };
        Ok(calculate_impact(
            graph.sources(),
            old,
            new,
            self.frontend.extension(),
        ))
    }

    /// Run the rename. A dry run stops after planning.
    ///
    /// Errors from the move abort the run before any file is rewritten.
    /// Rewrite failures do not: they are collected in the outcome, whose
    /// state is then [`RenameState::Failed`].
    pub fn run(&mut self, old: &Path, new: &Path, mode: RenameMode) -> Result<RenameOutcome> {
        let impact = self.plan(old, new)?;
        let review: Vec<String> = impact
            .impacted
            .iter()
            .filter(|f| f.needs_review())
            .map(|f| f.path.clone())
            .collect();

        let mut outcome = RenameOutcome {
            mode,
            state: self.state,
            impact,
            moved: false,
            rewritten: Vec::new(),
            failures: Vec::new(),
            review,
        };

        if mode == RenameMode::DryRun {
            self.transition(RenameState::Reported);
            outcome.state = self.state;
            return Ok(outcome);
        }

        self.transition(RenameState::Moving);
        if let Err(e) = move_file(self.root, old, new) {
            self.transition(RenameState::Failed);
            return Err(e);
        }
        outcome.moved = true;

        self.transition(RenameState::Rewriting);
        let report = rewrite_impacted(self.root, &outcome.impact);
        outcome.rewritten = report.rewritten;
        outcome.failures = report.failures;

        if outcome.failures.is_empty() {
            self.transition(RenameState::Done);
        } else {
            self.transition(RenameState::Failed);
        }
        outcome.state = self.state;
        Ok(outcome)
    }
}

/// Per-file results of the rewriting phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub rewritten: Vec<RewrittenFile>,
    pub failures: Vec<FailedRewrite>,
}

/// Apply the planned rewrites to every impacted file under `root`.
///
/// Each file is rewritten independently; a failure is logged and recorded
/// and the remaining files still get rewritten. Must run after the move:
/// a file that imports itself is addressed at its new path.
pub fn rewrite_impacted(root: &Path, impact: &RenameImpact) -> RewriteReport {
    let mut report = RewriteReport::default();

    for file in &impact.impacted {
        let pairs = file.rewrites();
        if pairs.is_empty() {
            continue;
        }
        let target = if file.path == impact.old_path {
            root.join(&impact.new_path)
        } else {
            root.join(&file.path)
        };
        match rewrite_file(&target, &pairs) {
            Ok(references) => report.rewritten.push(RewrittenFile {
                path: file.path.clone(),
                references,
            }),
            Err(e) => {
                let failure = ModshiftError::RewriteFailure {
                    file: PathBuf::from(&file.path),
                    message: e.to_string(),
                };
                tracing::warn!("{failure}");
                report.failures.push(FailedRewrite {
                    path: file.path.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    report
}

/// Move `old` to `new` under `root`, creating destination directories.
///
/// Both preconditions are checked before anything on disk changes.
pub fn move_file(root: &Path, old: &Path, new: &Path) -> Result<()> {
    let source = root.join(old);
    let destination = root.join(new);

    if !source.is_file() {
        return Err(ModshiftError::MissingSource {
            path: old.to_path_buf(),
        });
    }
    if destination.exists() {
        return Err(ModshiftError::DestinationConflict {
            path: new.to_path_buf(),
        });
    }

    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if let Err(e) = std::fs::rename(&source, &destination) {
        tracing::debug!("rename failed ({e}); falling back to copy and remove");
        std::fs::copy(&source, &destination)?;
        std::fs::remove_file(&source)?;
    }
    tracing::debug!("Moved {} -> {}", source.display(), destination.display());
    Ok(())
}
