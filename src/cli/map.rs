use crate::cli::{build_query, ScanArgs};
use crate::errors::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Where to write the graph (default: dependency_graph.json)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &MapArgs) -> Result<()> {
    let mut overrides = args.scan.to_cli_overrides();
    overrides.output = args.output.clone();
    let (root, config) = args.scan.prepare(overrides)?;

    let (query, stats) = build_query(&root, &config)?;
    query.save_graph(&config.output)?;
    tracing::debug!(
        "Wrote {} files and {} edges to {}",
        query.graph().file_count(),
        query.graph().edge_count(),
        config.output.display()
    );

    let mut stdout = std::io::stdout();
    crate::output::text::write_map_summary(&mut stdout, &config.output, query.graph(), &stats)?;
    Ok(())
}
