use crate::config::resolve::{resolve_config, CliOverrides};
use crate::errors::{ModshiftError, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show resolved configuration with provenance
    Show(ShowArgs),
}

/// `config show` accepts the graph commands' overrides so their effect can
/// be previewed.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Working directory (defaults to current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    #[arg(long)]
    pub ext: Option<String>,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub exclude: Vec<String>,

    #[arg(long = "exclude-dir")]
    pub exclude_dir: Vec<String>,

    #[arg(long)]
    pub quiet: bool,
}

impl ShowArgs {
    fn to_cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            extension: self.ext.clone(),
            quiet: self.quiet,
            output: self.output.clone(),
            exclude: self.exclude.clone(),
            exclude_dirs: self.exclude_dir.clone(),
        }
    }
}

pub fn run(args: &ConfigArgs) -> Result<()> {
    match &args.action {
        ConfigAction::Show(show) => {
            let working_dir = resolve_working_dir(&show.path)?;
            let config = resolve_config(&working_dir, &show.to_cli_overrides())?;
            let mut stdout = std::io::stdout();
            crate::config::show::render_show(&mut stdout, &config).map_err(ModshiftError::Io)?;
        }
    }
    Ok(())
}

fn resolve_working_dir(path: &Option<PathBuf>) -> Result<PathBuf> {
    let p = path.clone().unwrap_or_else(|| PathBuf::from("."));
    p.canonicalize()
        .map_err(|_| ModshiftError::Config(format!("Invalid path: {}", p.display())))
}
