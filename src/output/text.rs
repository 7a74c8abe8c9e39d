use crate::errors::Result;
use crate::graph::builder::BuildStats;
use crate::graph::ir::DependencyGraph;
use crate::rename::impact::{ImpactReason, RenameImpact};
use crate::rename::orchestrator::{RenameMode, RenameOutcome, RenameState};
use std::io::Write;
use std::path::Path;

/// Write the `map` report: where the graph went and how the build went.
pub fn write_map_summary<W: Write>(
    writer: &mut W,
    output: &Path,
    graph: &DependencyGraph,
    stats: &BuildStats,
) -> Result<()> {
    writeln!(writer, "Dependency graph written to {}", output.display())?;
    writeln!(writer)?;
    writeln!(writer, "Files:      {}", graph.file_count())?;
    writeln!(writer, "Edges:      {}", graph.edge_count())?;
    writeln!(writer, "Parsed:     {} files", stats.files_parsed)?;
    writeln!(writer, "Skipped:    {} files", stats.files_skipped)?;
    writeln!(writer, "Imports:    {}", stats.raw_imports)?;
    writeln!(writer, "Resolved:   {}", stats.resolved_imports)?;
    writeln!(writer, "Unresolved: {}", stats.unresolved_imports)?;
    writeln!(writer, "Ambiguous:  {}", stats.ambiguous_imports)?;
    Ok(())
}

/// Write the `check-file` report.
pub fn write_file_report<W: Write>(
    writer: &mut W,
    file: &str,
    dependencies: &[String],
    dependents: &[String],
) -> Result<()> {
    writeln!(writer, "{file}")?;
    writeln!(writer)?;
    write_list(writer, "Depends on", dependencies)?;
    writeln!(writer)?;
    write_list(writer, "Depended on by", dependents)?;
    Ok(())
}

fn write_list<W: Write>(writer: &mut W, title: &str, items: &[String]) -> Result<()> {
    writeln!(writer, "{} ({}):", title, items.len())?;
    if items.is_empty() {
        writeln!(writer, "  (none)")?;
    }
    for item in items {
        writeln!(writer, "  {item}")?;
    }
    Ok(())
}

fn reason_label(reason: ImpactReason) -> &'static str {
    match reason {
        ImpactReason::Absolute => "absolute",
        ImpactReason::Relative => "relative",
        ImpactReason::Submodule => "submodule",
        ImpactReason::MovedAnchor => "moved file",
    }
}

/// Write the impact plan for renaming one file.
pub fn write_rename_plan<W: Write>(writer: &mut W, impact: &RenameImpact) -> Result<()> {
    writeln!(
        writer,
        "Rename {} -> {} ({} -> {})",
        impact.old_path, impact.new_path, impact.old_module, impact.new_module
    )?;
    writeln!(writer)?;

    if impact.is_empty() {
        writeln!(writer, "No files reference {}.", impact.old_module)?;
        return Ok(());
    }

    writeln!(writer, "Impacted files ({}):", impact.impacted.len())?;
    for file in &impact.impacted {
        writeln!(writer, "  {}", file.path)?;
        for reference in &file.references {
            match &reference.rewrite {
                Some((old, new)) => writeln!(
                    writer,
                    "    line {}: {} [{}] {} -> {}",
                    reference.line,
                    reference.written,
                    reason_label(reference.reason),
                    old,
                    new
                )?,
                None => writeln!(
                    writer,
                    "    line {}: {} [{}] needs manual review",
                    reference.line,
                    reference.written,
                    reason_label(reference.reason)
                )?,
            }
        }
    }
    Ok(())
}

/// Write the result of `rename`, dry run or not.
pub fn write_rename_summary<W: Write>(writer: &mut W, outcome: &RenameOutcome) -> Result<()> {
    write_rename_plan(writer, &outcome.impact)?;
    writeln!(writer)?;

    if outcome.mode == RenameMode::DryRun {
        writeln!(writer, "Dry run: no files were changed. Re-run with --execute to apply.")?;
    } else {
        if outcome.moved {
            writeln!(
                writer,
                "Moved {} -> {}",
                outcome.impact.old_path, outcome.impact.new_path
            )?;
        }
        let references: usize = outcome.rewritten.iter().map(|f| f.references).sum();
        writeln!(
            writer,
            "Rewrote {} reference(s) in {} file(s)",
            references,
            outcome.rewritten.len()
        )?;
        for file in &outcome.rewritten {
            writeln!(writer, "  {} ({})", file.path, file.references)?;
        }
        writeln!(writer, "Failures: {}", outcome.failures.len())?;
        for failure in &outcome.failures {
            writeln!(writer, "  {}: {}", failure.path, failure.message)?;
        }
    }

    if !outcome.review.is_empty() {
        writeln!(writer, "Needs manual review ({}):", outcome.review.len())?;
        for path in &outcome.review {
            writeln!(writer, "  {path}")?;
        }
    }

    let status = match outcome.state {
        RenameState::Reported => "reported",
        RenameState::Done => "done",
        RenameState::Failed => "failed",
        RenameState::Planning | RenameState::Moving | RenameState::Rewriting => "incomplete",
    };
    writeln!(writer, "Status: {status}")?;
    Ok(())
}
