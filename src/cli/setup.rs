use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Commented template written by `lofarb setup`.
const CONFIG_TEMPLATE: &str = include_str!("../../docs/example_config.yaml");

/// Parses the template so a broken one is caught before it reaches the user's disk.
fn checked_template() -> Result<AppConfig> {
    serde_yaml::from_str(CONFIG_TEMPLATE).context("Bundled config template is not valid YAML")
}

/// Writes the config template to the default location.
pub fn setup(force: bool) -> Result<PathBuf> {
    let path = AppConfig::default_config_path()?;
    setup_at_path(&path, force)?;
    Ok(path)
}

/// Writes the config template to `path`.
///
/// An existing file is kept unless `force` is set.
pub fn setup_at_path<P: AsRef<Path>>(path: P, force: bool) -> Result<AppConfig> {
    let path = path.as_ref();
    let config = checked_template()?;

    if path.exists() {
        if !force {
            anyhow::bail!(
                "Configuration file already exists at {} (use --force to overwrite)",
                path.display()
            );
        }
        warn!("Overwriting configuration at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    info!(
        source = %config.source,
        "Created default configuration at {}",
        path.display()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_setup_writes_loadable_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.yaml");

        let written = setup_at_path(&config_path, false)?;

        let content = fs::read_to_string(&config_path)?;
        assert!(content.contains("# Example configuration file for lofarb"));

        let loaded = AppConfig::load_from_path(&config_path)?;
        assert_eq!(
            loaded.providers.happy_lof_base_url(),
            written.providers.happy_lof_base_url()
        );
        assert_eq!(loaded.source, written.source);
        Ok(())
    }

    #[test]
    fn test_setup_keeps_existing_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "show_paused: true\n")?;

        let err = setup_at_path(&config_path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&config_path)?, "show_paused: true\n");
        Ok(())
    }

    #[test]
    fn test_setup_force_overwrites() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "show_paused: true\n")?;

        setup_at_path(&config_path, true)?;
        assert!(!AppConfig::load_from_path(&config_path)?.show_paused);
        Ok(())
    }

    #[test]
    fn test_template_matches_defaults() -> Result<()> {
        let template = checked_template()?;
        let defaults = AppConfig::default();
        assert_eq!(
            template.providers.happy_lof_base_url(),
            defaults.providers.happy_lof_base_url()
        );
        assert_eq!(
            template.providers.jisilu_base_url(),
            defaults.providers.jisilu_base_url()
        );
        assert_eq!(template.source, defaults.source);
        assert_eq!(template.show_paused, defaults.show_paused);
        assert_eq!(template.history_days, defaults.history_days);
        Ok(())
    }
}
