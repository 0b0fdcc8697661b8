//! User configuration at ~/.config/recur/config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::format::{Item, StrftimeItems};
use config::{Config, Environment, File};
use recur_core::summary::{DEFAULT_DATE_FORMAT, DEFAULT_PREVIEW_COUNT};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

fn default_preview_count() -> usize {
    DEFAULT_PREVIEW_COUNT
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_color() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RecurConfig {
    /// How many upcoming dates `recur summary` lists.
    #[serde(default = "default_preview_count")]
    pub preview_count: usize,

    /// strftime format for human-readable dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_color")]
    pub color: bool,

    /// Directory searched for relative `--file` paths not found in the
    /// working directory. `~` is expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_dir: Option<PathBuf>,
}

impl Default for RecurConfig {
    fn default() -> Self {
        RecurConfig {
            preview_count: default_preview_count(),
            date_format: default_date_format(),
            color: default_color(),
            spec_dir: None,
        }
    }
}

impl RecurConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("recur");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user config, creating a commented-out template on first run.
    ///
    /// Falls back to defaults when there is no config directory at all.
    pub fn load() -> Result<Self> {
        let Ok(config_path) = Self::config_path() else {
            debug!("no config directory, using default settings");
            return Ok(Self::default());
        };

        if !config_path.exists() {
            if let Err(e) = Self::create_default_config(&config_path) {
                warn!(path = %config_path.display(), error = %e, "could not create default config");
            }
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit path. A missing file yields the defaults;
    /// `RECUR_*` environment variables override file values.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: RecurConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("RECUR").try_parsing(true))
            .build()
            .with_context(|| format!("Could not read config file {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let unsupported =
            StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error));
        if unsupported {
            bail!("date_format \"{}\" is not a valid strftime format", self.date_format);
        }
        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let contents = format!(
            "\
# recur configuration

# How many upcoming dates `recur summary` lists:
# preview_count = {}

# strftime format for human-readable dates:
# date_format = \"{}\"

# Colored output:
# color = true

# Where to look for spec files passed to --file:
# spec_dir = \"~/.config/recur/specs\"
",
            DEFAULT_PREVIEW_COUNT, DEFAULT_DATE_FORMAT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Could not create config directory")?;
        }

        std::fs::write(path, contents).context("Could not write config file")?;

        Ok(())
    }

    pub fn spec_dir(&self) -> Option<PathBuf> {
        self.spec_dir.as_ref().map(|dir| {
            PathBuf::from(shellexpand::tilde(&dir.to_string_lossy()).into_owned())
        })
    }

    /// Resolve a `--file` argument: `~` expanded, then the working directory,
    /// then `spec_dir`.
    pub fn resolve_spec_path(&self, path: &Path) -> PathBuf {
        let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
        if expanded.is_absolute() || expanded.exists() {
            return expanded;
        }

        match self.spec_dir() {
            Some(dir) if dir.join(&expanded).exists() => dir.join(expanded),
            _ => expanded,
        }
    }
}
