use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FormulaError, Result};
use crate::target::Target;

/// Placeholder replaced by the release version in `base_url`.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Per-target tarball suffix overrides (optional `[suffixes]` table).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macos_arm64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macos_x64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linux_arm64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linux_x64: Option<String>,
}

impl SuffixOverrides {
    fn get(&self, target: Target) -> Option<&str> {
        match target {
            Target::MacosArm64 => self.macos_arm64.as_deref(),
            Target::MacosX64 => self.macos_x64.as_deref(),
            Target::LinuxArm64 => self.linux_arm64.as_deref(),
            Target::LinuxX64 => self.linux_x64.as_deref(),
        }
    }
}

/// Formula boilerplate and output location, loaded from `~/.config/brewgen/config.toml`
/// or an explicit `--config` file. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulaSettings {
    /// Package name (`brew install <name>`).
    pub name: String,
    /// Ruby class name; derived from `name` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub desc: String,
    pub homepage: String,
    pub license: String,
    /// GitHub repository URL that hosts the release assets.
    pub repository: String,
    /// Download base URL template, e.g. `https://dl.example.com/v{version}`.
    /// Defaults to `<repository>/releases/download/v{version}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Tarball name prefix; defaults to `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
    /// Installed executable; defaults to `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,
    /// Formula path; defaults to `Formula/<name>.rb`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub suffixes: SuffixOverrides,
}

impl Default for FormulaSettings {
    fn default() -> Self {
        Self {
            name: "a3s".into(),
            class_name: None,
            desc: "Local development orchestration tool for the A3S monorepo".into(),
            homepage: "https://github.com/A3S-Lab/Dev".into(),
            license: "MIT".into(),
            repository: "https://github.com/A3S-Lab/Dev".into(),
            base_url: None,
            artifact: None,
            binary: None,
            output: None,
            suffixes: SuffixOverrides::default(),
        }
    }
}

impl FormulaSettings {
    pub fn class_name(&self) -> String {
        self.class_name
            .clone()
            .unwrap_or_else(|| class_name_for(&self.name))
    }

    pub fn artifact(&self) -> &str {
        self.artifact.as_deref().unwrap_or(&self.name)
    }

    pub fn binary(&self) -> &str {
        self.binary.as_deref().unwrap_or(&self.name)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| Path::new("Formula").join(format!("{}.rb", self.name)))
    }

    pub fn suffix(&self, target: Target) -> &str {
        self.suffixes
            .get(target)
            .unwrap_or_else(|| target.default_suffix())
    }

    /// Base URL for `version`, without a trailing slash.
    pub fn base_url(&self, version: &str) -> String {
        let base = match &self.base_url {
            Some(tpl) => tpl.replace(VERSION_PLACEHOLDER, version),
            None => format!(
                "{}/releases/download/v{}",
                self.repository.trim_end_matches('/'),
                version
            ),
        };
        base.trim_end_matches('/').to_string()
    }
}

/// Homebrew class name for a formula name: `a3s` -> `A3s`, `my-tool` -> `MyTool`.
pub fn class_name_for(name: &str) -> String {
    name.split(|c: char| c == '-' || c == '_' || c == '.')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Location of the per-user settings file, if one exists.
pub fn config_path() -> Option<PathBuf> {
    match xdg::BaseDirectories::with_prefix("brewgen") {
        Ok(dirs) => dirs.find_config_file("config.toml"),
        Err(e) => {
            tracing::debug!("no XDG base directories: {}", e);
            None
        }
    }
}

/// Load settings from `path`, or from the XDG config file when `path` is `None`.
/// An explicit path must exist; a missing XDG file means built-in defaults.
pub fn load(path: Option<&Path>) -> Result<FormulaSettings> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => {
                tracing::debug!("no config file, using built-in formula settings");
                return Ok(FormulaSettings::default());
            }
        },
    };
    let data = fs::read_to_string(&path).map_err(|e| FormulaError::Config {
        path: path.clone(),
        source: Box::new(e),
    })?;
    let settings: FormulaSettings = toml::from_str(&data).map_err(|e| FormulaError::Config {
        path: path.clone(),
        source: Box::new(e),
    })?;
    tracing::info!("loaded formula settings from {}", path.display());
    Ok(settings)
}
