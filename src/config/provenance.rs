use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Every setting `config show` reports, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Setting {
    Extension,
    Quiet,
    Output,
    Include,
    Exclude,
    ExcludeDirs,
    RespectGitignore,
}

impl Setting {
    pub const ALL: [Setting; 7] = [
        Setting::Extension,
        Setting::Quiet,
        Setting::Output,
        Setting::Include,
        Setting::Exclude,
        Setting::ExcludeDirs,
        Setting::RespectGitignore,
    ];

    /// TOML table the setting lives in.
    pub fn section(self) -> &'static str {
        match self {
            Setting::Extension | Setting::Quiet | Setting::Output => "defaults",
            Setting::Include
            | Setting::Exclude
            | Setting::ExcludeDirs
            | Setting::RespectGitignore => "targeting",
        }
    }

    /// Field name inside [`Setting::section`].
    pub fn field(self) -> &'static str {
        match self {
            Setting::Extension => "extension",
            Setting::Quiet => "quiet",
            Setting::Output => "output",
            Setting::Include => "include",
            Setting::Exclude => "exclude",
            Setting::ExcludeDirs => "exclude_dirs",
            Setting::RespectGitignore => "respect_gitignore",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.field())
    }
}

/// Layer a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Default,
    UserConfig(PathBuf),
    ProjectConfig(PathBuf),
    EnvVar(&'static str),
    CliFlag(&'static str),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Default => write!(f, "default"),
            Source::UserConfig(path) => write!(f, "user config ({})", path.display()),
            Source::ProjectConfig(path) => write!(f, "project config ({})", path.display()),
            Source::EnvVar(name) => write!(f, "env var ({name})"),
            Source::CliFlag(flag) => write!(f, "CLI flag ({flag})"),
        }
    }
}

/// The last layer to touch each setting. Starts with every setting at
/// [`Source::Default`]; later layers overwrite.
#[derive(Debug, Clone)]
pub struct ProvenanceMap {
    sources: BTreeMap<Setting, Source>,
}

impl Default for ProvenanceMap {
    fn default() -> Self {
        Self {
            sources: Setting::ALL.iter().map(|&s| (s, Source::Default)).collect(),
        }
    }
}

impl ProvenanceMap {
    pub fn record(&mut self, setting: Setting, source: Source) {
        self.sources.insert(setting, source);
    }

    #[cfg(test)]
    pub fn source_of(&self, setting: Setting) -> &Source {
        &self.sources[&setting]
    }

    /// Settings some layer above the built-in defaults has set.
    pub fn overridden(&self) -> Vec<Setting> {
        self.sources
            .iter()
            .filter(|(_, source)| **source != Source::Default)
            .map(|(&setting, _)| setting)
            .collect()
    }

    /// Settings of one TOML section with their sources, in display order.
    pub fn section(&self, section: &str) -> Vec<(Setting, &Source)> {
        self.sources
            .iter()
            .filter(|(setting, _)| setting.section() == section)
            .map(|(&setting, source)| (setting, source))
            .collect()
    }
}
