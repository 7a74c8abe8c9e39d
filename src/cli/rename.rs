use crate::cli::{root_relative, ScanArgs};
use crate::errors::{ModshiftError, Result};
use crate::parse::python::PythonFrontend;
use crate::rename::orchestrator::{RenameMode, RenameOrchestrator, RenameState};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Current path of the file, relative to the root
    pub old: PathBuf,

    /// New path, relative to the root
    pub new: PathBuf,

    /// Move the file and rewrite imports (default is a dry run)
    #[arg(long)]
    pub execute: bool,

    #[command(flatten)]
    pub scan: ScanArgs,
}

pub fn run(args: &RenameArgs) -> Result<()> {
    let (root, config) = args.scan.prepare(args.scan.to_cli_overrides())?;
    let old = root_relative(&root, &args.old)?;
    let new = root_relative(&root, &args.new)?;

    let frontend = PythonFrontend::with_extension(config.extension.clone());
    let options = config.discovery_options();
    let mode = if args.execute {
        RenameMode::Execute
    } else {
        RenameMode::DryRun
    };

    let mut orchestrator =
        RenameOrchestrator::new(&root, &frontend, &options).with_progress(!config.quiet);
    let outcome = orchestrator.run(&old, &new, mode)?;

    let mut stdout = std::io::stdout();
    crate::output::text::write_rename_summary(&mut stdout, &outcome)?;

    if outcome.state == RenameState::Failed {
        return Err(ModshiftError::RenameIncomplete {
            failed: outcome.failures.len(),
        });
    }
    Ok(())
}
