use crate::core::source::SourceKind;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_HAPPY_LOF_BASE_URL: &str = "https://luoshui.top/happy-lof/api";
pub const DEFAULT_JISILU_BASE_URL: &str = "https://www.jisilu.cn";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HappyLofProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JisiluProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub happy_lof: Option<HappyLofProviderConfig>,
    pub jisilu: Option<JisiluProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            happy_lof: Some(HappyLofProviderConfig {
                base_url: DEFAULT_HAPPY_LOF_BASE_URL.to_string(),
            }),
            jisilu: Some(JisiluProviderConfig {
                base_url: DEFAULT_JISILU_BASE_URL.to_string(),
            }),
        }
    }
}

impl ProvidersConfig {
    pub fn happy_lof_base_url(&self) -> &str {
        self.happy_lof
            .as_ref()
            .map_or(DEFAULT_HAPPY_LOF_BASE_URL, |p| &p.base_url)
    }

    pub fn jisilu_base_url(&self) -> &str {
        self.jisilu
            .as_ref()
            .map_or(DEFAULT_JISILU_BASE_URL, |p| &p.base_url)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub providers: ProvidersConfig,
    /// Upstream used when the command line does not pick one
    pub source: SourceKind,
    pub show_paused: bool,
    pub history_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            source: SourceKind::default(),
            show_paused: false,
            history_days: 30,
        }
    }
}

impl AppConfig {
    /// Loads the default config file, or built-in defaults when it was never created.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("top", "luoshui", "lofarb")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  happy_lof:
    base_url: "http://example.com/api"
  jisilu:
    base_url: "http://example.com/jsl"
source: jisilu
show_paused: true
history_days: 7
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.providers.happy_lof_base_url(), "http://example.com/api");
        assert_eq!(config.providers.jisilu_base_url(), "http://example.com/jsl");
        assert_eq!(config.source, SourceKind::Jisilu);
        assert!(config.show_paused);
        assert_eq!(config.history_days, 7);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml_str = r#"
providers:
  happy_lof:
    base_url: "http://localhost:5003/api"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.providers.happy_lof_base_url(),
            "http://localhost:5003/api"
        );
        assert!(config.providers.jisilu.is_none());
        assert_eq!(config.providers.jisilu_base_url(), DEFAULT_JISILU_BASE_URL);
        assert_eq!(config.source, SourceKind::HappyLof);
        assert!(!config.show_paused);
        assert_eq!(config.history_days, 30);
    }

    #[test]
    fn test_invalid_source_is_rejected() {
        let yaml_str = "source: eastmoney\n";
        assert!(serde_yaml::from_str::<AppConfig>(yaml_str).is_err());
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("config.yaml");
        fs::write(&path, "show_paused: true\n")?;
        let config = AppConfig::load_from_path(&path)?;
        assert!(config.show_paused);

        let missing = AppConfig::load_from_path(dir.path().join("missing.yaml"));
        assert!(missing.unwrap_err().to_string().contains("Failed to read config file"));
        Ok(())
    }
}
