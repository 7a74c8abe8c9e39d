use crate::cli::{build_query, root_relative, ScanArgs};
use crate::errors::Result;
use crate::parse::common::display_path;
use crate::query::QueryService;
use crate::rename::impact::calculate_impact;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckFileArgs {
    /// File to inspect, relative to the root
    pub path: PathBuf,

    /// Answer from a graph written by `map` instead of scanning the tree
    #[arg(long)]
    pub graph: Option<PathBuf>,

    #[command(flatten)]
    pub scan: ScanArgs,
}

#[derive(Debug, Args)]
pub struct CheckRenameArgs {
    /// Current path of the file, relative to the root
    pub old: PathBuf,

    /// Intended new path, relative to the root
    pub new: PathBuf,

    #[command(flatten)]
    pub scan: ScanArgs,
}

pub fn run_file(args: &CheckFileArgs) -> Result<()> {
    let (root, config) = args.scan.prepare(args.scan.to_cli_overrides())?;
    let file = root_relative(&root, &args.path)?;

    let query = match &args.graph {
        Some(saved) => QueryService::load_graph(saved, config.extension.clone())?,
        None => build_query(&root, &config)?.0,
    };

    let dependencies = query.dependencies_of(&file);
    let dependents = query.dependents_of(&file);

    let mut stdout = std::io::stdout();
    crate::output::text::write_file_report(
        &mut stdout,
        &display_path(&file),
        &dependencies,
        &dependents,
    )?;
    Ok(())
}

pub fn run_rename(args: &CheckRenameArgs) -> Result<()> {
    let (root, config) = args.scan.prepare(args.scan.to_cli_overrides())?;
    let old = root_relative(&root, &args.old)?;
    let new = root_relative(&root, &args.new)?;

    let (query, _) = build_query(&root, &config)?;
    let impact = calculate_impact(query.graph().sources(), &old, &new, &config.extension);

    let mut stdout = std::io::stdout();
    crate::output::text::write_rename_plan(&mut stdout, &impact)?;
    Ok(())
}
