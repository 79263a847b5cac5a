use anyhow::{Context, Result};
use lh_xml::DEFAULT_CONSUMER;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Client configuration loaded from a JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Program that receives the finished document on its standard input
    pub consumer: String,
    /// Arguments placed before the unit filename
    pub consumer_args: Vec<String>,
    pub client_version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            consumer: DEFAULT_CONSUMER.to_string(),
            consumer_args: Vec::new(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Load client configuration from a JSON file
pub fn load_config(path: &Path) -> Result<ClientConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: ClientConfig = serde_json::from_str(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.consumer, "lh-pipe");
        assert!(config.consumer_args.is_empty());
        assert_eq!(config.client_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lighthouse.json");
        std::fs::write(&path, r#"{ "consumer": "tee", "consumer_args": ["-a"] }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.consumer, "tee");
        assert_eq!(config.consumer_args, vec!["-a".to_string()]);
        assert_eq!(config.client_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lighthouse.json");
        std::fs::write(&path, "{ consumer: ").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().starts_with("parsing config"));
    }
}
