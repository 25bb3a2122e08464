use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_delimiter() -> char {
    ','
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Cash-flow file used when `--input` is not given.
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            input: None,
            currency_symbol: default_currency_symbol(),
            date_format: default_date_format(),
            delimiter: default_delimiter(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "cashflow", "cashflow")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.validate()?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Picks the input file: the command line wins over the config file.
    pub fn resolve_input(&self, cli_input: Option<&str>) -> Result<PathBuf> {
        cli_input
            .or(self.input.as_deref())
            .map(PathBuf::from)
            .ok_or_else(|| {
                anyhow!("No input file given. Pass --input or set `input` in the config file")
            })
    }

    fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            anyhow::bail!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            );
        }
        if self.date_format.trim().is_empty() {
            anyhow::bail!("date_format must not be empty");
        }
        Ok(())
    }
}
