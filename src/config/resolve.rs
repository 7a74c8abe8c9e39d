use crate::config::provenance::{ProvenanceMap, Setting, Source};
use crate::config::schema::FileConfig;
use crate::config::{normalize_extension, split_list, ResolvedConfig};
use crate::errors::{ModshiftError, Result};
use std::path::{Path, PathBuf};

/// CLI overrides extracted from command arguments.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub extension: Option<String>,
    pub quiet: bool,
    pub output: Option<PathBuf>,
    pub exclude: Vec<String>,
    pub exclude_dirs: Vec<String>,
}

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (~/.config/modshift/config.toml)
/// 3. Project config (nearest .modshift.toml walking up from working_dir)
/// 4. Environment variables
/// 5. CLI overrides
pub fn resolve_config(working_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    let mut prov = ProvenanceMap::default();
    let mut loaded_files = Vec::new();

    // 1. Start with built-in defaults
    let mut config = ResolvedConfig::default();

    // 2. User config
    if let Some(user_config_path) = find_user_config() {
        if user_config_path.exists() {
            let file_config = load_file_config(&user_config_path, "user")?;
            apply_file_config(
                &mut config,
                &file_config,
                Source::UserConfig(user_config_path.clone()),
                &mut prov,
            );
            loaded_files.push(user_config_path);
        }
    }

    // 3. Project config (walk up from working_dir)
    if let Some(project_config_path) = find_project_config(working_dir) {
        let file_config = load_file_config(&project_config_path, "project")?;
        apply_file_config(
            &mut config,
            &file_config,
            Source::ProjectConfig(project_config_path.clone()),
            &mut prov,
        );
        loaded_files.push(project_config_path);
    }

    // 4. Environment variables
    apply_env_vars(&mut config, &mut prov);

    // 5. CLI overrides
    apply_cli_overrides(&mut config, cli, &mut prov);

    config.ignore_patterns = crate::config::ignore::load_modshiftignore(working_dir);
    config.provenance = prov;
    config.loaded_files = loaded_files;

    tracing::debug!(
        "Resolved config: extension={}, {} exclude glob(s), {} config file(s)",
        config.extension,
        config.exclude.len() + config.ignore_patterns.len(),
        config.loaded_files.len()
    );

    Ok(config)
}

fn load_file_config(path: &Path, layer: &str) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|_| {
        ModshiftError::Config(format!(
            "Could not read {layer} config: {}",
            path.display()
        ))
    })?;
    FileConfig::from_toml(&content)
        .map_err(|e| ModshiftError::Config(format!("Invalid {layer} config: {e}")))
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("modshift").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(".modshift.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Extra directory names are appended to the built-in list, never replace it.
fn extend_exclude_dirs(config: &mut ResolvedConfig, extra: &[String]) {
    for dir in extra {
        if !config.exclude_dirs.contains(dir) {
            config.exclude_dirs.push(dir.clone());
        }
    }
}

fn apply_file_config(
    config: &mut ResolvedConfig,
    file: &FileConfig,
    source: Source,
    prov: &mut ProvenanceMap,
) {
    // Defaults
    if let Some(ref extension) = file.defaults.extension {
        config.extension = normalize_extension(extension);
        prov.record(Setting::Extension, source.clone());
    }
    if let Some(quiet) = file.defaults.quiet {
        config.quiet = quiet;
        prov.record(Setting::Quiet, source.clone());
    }
    if let Some(ref output) = file.defaults.output {
        config.output = PathBuf::from(output);
        prov.record(Setting::Output, source.clone());
    }

    // Targeting
    if !file.targeting.include.is_empty() {
        config.include = file.targeting.include.clone();
        prov.record(Setting::Include, source.clone());
    }
    if !file.targeting.exclude.is_empty() {
        config.exclude = file.targeting.exclude.clone();
        prov.record(Setting::Exclude, source.clone());
    }
    if !file.targeting.exclude_dirs.is_empty() {
        extend_exclude_dirs(config, &file.targeting.exclude_dirs);
        prov.record(Setting::ExcludeDirs, source.clone());
    }
    if let Some(respect_gitignore) = file.targeting.respect_gitignore {
        config.respect_gitignore = respect_gitignore;
        prov.record(Setting::RespectGitignore, source);
    }
}

fn apply_env_vars(config: &mut ResolvedConfig, prov: &mut ProvenanceMap) {
    if let Ok(val) = std::env::var("MODSHIFT_EXT") {
        config.extension = normalize_extension(&val);
        prov.record(Setting::Extension, Source::EnvVar("MODSHIFT_EXT"));
    }
    if let Ok(val) = std::env::var("MODSHIFT_QUIET") {
        config.quiet = val == "1" || val.eq_ignore_ascii_case("true");
        prov.record(Setting::Quiet, Source::EnvVar("MODSHIFT_QUIET"));
    }
    if let Ok(val) = std::env::var("MODSHIFT_OUTPUT") {
        config.output = PathBuf::from(val);
        prov.record(Setting::Output, Source::EnvVar("MODSHIFT_OUTPUT"));
    }
    if let Ok(val) = std::env::var("MODSHIFT_EXCLUDE") {
        config.exclude = split_list(&val);
        prov.record(Setting::Exclude, Source::EnvVar("MODSHIFT_EXCLUDE"));
    }
    if let Ok(val) = std::env::var("MODSHIFT_EXCLUDE_DIRS") {
        extend_exclude_dirs(config, &split_list(&val));
        prov.record(
            Setting::ExcludeDirs,
            Source::EnvVar("MODSHIFT_EXCLUDE_DIRS"),
        );
    }
}

fn apply_cli_overrides(config: &mut ResolvedConfig, cli: &CliOverrides, prov: &mut ProvenanceMap) {
    if let Some(ref extension) = cli.extension {
        config.extension = normalize_extension(extension);
        prov.record(Setting::Extension, Source::CliFlag("--ext"));
    }
    if cli.quiet {
        config.quiet = true;
        prov.record(Setting::Quiet, Source::CliFlag("--quiet"));
    }
    if let Some(ref output) = cli.output {
        config.output = output.clone();
        prov.record(Setting::Output, Source::CliFlag("--output"));
    }
    if !cli.exclude.is_empty() {
        config.exclude = cli.exclude.clone();
        prov.record(Setting::Exclude, Source::CliFlag("--exclude"));
    }
    if !cli.exclude_dirs.is_empty() {
        extend_exclude_dirs(config, &cli.exclude_dirs);
        prov.record(
            Setting::ExcludeDirs,
            Source::CliFlag("--exclude-dir"),
        );
    }
}
