use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_RELAY_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FeedConfig {
    /// Where the daily fixing text is fetched from. Either the CNB feed
    /// itself or a relay in front of it.
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RelayConfig {
    #[serde(default = "default_relay_bind")]
    pub bind: String,
    /// Upstream feed the relay forwards to. Requests fail with 500 when unset.
    #[serde(default)]
    pub upstream_url: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        RelayConfig {
            bind: default_relay_bind(),
            upstream_url: None,
        }
    }
}

fn default_relay_bind() -> String {
    DEFAULT_RELAY_BIND.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub feed: FeedConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default = "default_currency")]
    pub default_currency: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("cz", "cnbrates", "cnbrates")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config = Self::from_yaml(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.feed.url.trim().is_empty() {
            bail!("feed.url is required");
        }
        if self
            .relay
            .upstream_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            bail!("relay.upstream_url must not be empty when set");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
feed:
  url: "https://example.com/daily.txt"
"#;

        let config = AppConfig::from_yaml(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.feed.url, "https://example.com/daily.txt");
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.relay.bind, DEFAULT_RELAY_BIND);
        assert!(config.relay.upstream_url.is_none());

        let yaml_str_with_relay = r#"
feed:
  url: "http://localhost:3000/api/cnb-rates"
relay:
  bind: "0.0.0.0:8080"
  upstream_url: "https://example.com/daily.txt"
default_currency: "EUR"
        "#;
        let config = AppConfig::from_yaml(yaml_str_with_relay).unwrap();
        assert_eq!(config.relay.bind, "0.0.0.0:8080");
        assert_eq!(
            config.relay.upstream_url.as_deref(),
            Some("https://example.com/daily.txt")
        );
        assert_eq!(config.default_currency, "EUR");
    }

    #[test]
    fn test_missing_feed_url_is_rejected() {
        assert!(AppConfig::from_yaml("default_currency: EUR").is_err());

        let err = AppConfig::from_yaml("feed:\n  url: \"  \"").unwrap_err();
        assert_eq!(err.to_string(), "feed.url is required");
    }

    #[test]
    fn test_empty_upstream_is_rejected() {
        let yaml = "feed:\n  url: http://a\nrelay:\n  upstream_url: \"\"";
        assert!(AppConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(file.path(), "feed:\n  url: http://example.com/feed.txt\n")?;

        let config = AppConfig::load_from_path(file.path())?;
        assert_eq!(config.feed.url, "http://example.com/feed.txt");

        let missing = AppConfig::load_from_path(file.path().with_extension("missing"));
        assert!(
            missing
                .unwrap_err()
                .to_string()
                .starts_with("Failed to read config file")
        );
        Ok(())
    }
}
