use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");

/// Writes the example configuration to the default config location. When
/// `input` is given it replaces the example's input file.
pub fn setup(input: Option<&str>) -> Result<PathBuf> {
    let path = AppConfig::default_config_path()?;
    setup_at_path(&path, input)?;
    Ok(path)
}

/// Writes the example configuration to `path`, refusing to overwrite.
pub fn setup_at_path<P: AsRef<Path>>(path: P, input: Option<&str>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    let content = render_config(input)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}

fn render_config(input: Option<&str>) -> Result<String> {
    let Some(input) = input else {
        return Ok(EXAMPLE_CONFIG.to_string());
    };
    // A JSON string is a valid double-quoted YAML scalar.
    let quoted = serde_json::to_string(input).context("Failed to encode input path")?;
    let mut rendered: String = EXAMPLE_CONFIG
        .lines()
        .map(|line| {
            if line.starts_with("input:") {
                format!("input: {quoted}\n")
            } else {
                format!("{line}\n")
            }
        })
        .collect();
    if !EXAMPLE_CONFIG.ends_with('\n') {
        rendered.pop();
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_example_config_matches_defaults() -> Result<()> {
        let config: AppConfig = serde_yaml::from_str(EXAMPLE_CONFIG)
            .context("Failed to parse example config as YAML")?;

        assert_eq!(
            config,
            AppConfig {
                input: Some("fluxo_caixa.csv".to_string()),
                ..AppConfig::default()
            }
        );
        Ok(())
    }

    #[test]
    fn test_setup_writes_example_in_nested_dir() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.yaml");

        setup_at_path(&config_path, None)?;

        let content = fs::read_to_string(&config_path)?;
        assert_eq!(content, EXAMPLE_CONFIG);
        let loaded = AppConfig::load_from_path(&config_path)?;
        assert_eq!(loaded.input.as_deref(), Some("fluxo_caixa.csv"));
        Ok(())
    }

    #[test]
    fn test_setup_records_given_input() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");

        setup_at_path(&config_path, Some("/data/finanças \"2024\".csv"))?;

        let loaded = AppConfig::load_from_path(&config_path)?;
        assert_eq!(loaded.input.as_deref(), Some("/data/finanças \"2024\".csv"));
        assert_eq!(loaded.currency_symbol, "R$");
        let content = fs::read_to_string(&config_path)?;
        assert!(content.starts_with("# Example configuration file for cashflow"));
        Ok(())
    }

    #[test]
    fn test_setup_refuses_to_overwrite() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "currency_symbol: \"$\"\n")?;

        let err = setup_at_path(&config_path, Some("other.csv")).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&config_path)?, "currency_symbol: \"$\"\n");
        Ok(())
    }
}
