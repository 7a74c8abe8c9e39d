use crate::config::provenance::Setting;
use crate::config::ResolvedConfig;
use std::io::Write;

const SECTIONS: [&str; 2] = ["defaults", "targeting"];

/// Render `config show` output.
pub fn render_show<W: Write>(w: &mut W, config: &ResolvedConfig) -> std::io::Result<()> {
    // Loaded files
    if config.loaded_files.is_empty() {
        writeln!(w, "Loaded config files: (none)")?;
    } else {
        writeln!(w, "Loaded config files:")?;
        for (i, path) in config.loaded_files.iter().enumerate() {
            writeln!(w, "  {}. {}", i + 1, path.display())?;
        }
    }
    if !config.ignore_patterns.is_empty() {
        writeln!(
            w,
            "Ignore patterns (.modshiftignore): {}",
            config.ignore_patterns.join(", ")
        )?;
    }
    writeln!(w)?;

    // Resolved settings
    let overridden = config.provenance.overridden();
    if overridden.is_empty() {
        writeln!(w, "Resolved settings (all defaults):")?;
    } else {
        let names: Vec<String> = overridden.iter().map(Setting::to_string).collect();
        writeln!(
            w,
            "Resolved settings ({} overridden: {}):",
            names.len(),
            names.join(", ")
        )?;
    }
    for section in SECTIONS {
        writeln!(w, "  [{}]", section)?;
        for (setting, source) in config.provenance.section(section) {
            writeln!(w, "    {}: {} <- {}", setting, value_of(config, setting), source)?;
        }
    }

    Ok(())
}

fn list(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}

fn value_of(config: &ResolvedConfig, setting: Setting) -> String {
    match setting {
        Setting::Extension => config.extension.clone(),
        Setting::Quiet => config.quiet.to_string(),
        Setting::Output => config.output.display().to_string(),
        Setting::Include => list(&config.include),
        Setting::Exclude => list(&config.exclude),
        Setting::ExcludeDirs => list(&config.exclude_dirs),
        Setting::RespectGitignore => config.respect_gitignore.to_string(),
    }
}
