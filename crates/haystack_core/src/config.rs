use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WP_BINARY: &str = "wp";
pub const DEFAULT_CONFIG_FILENAME: &str = "haystack.toml";

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct ToolConfig {
    #[serde(default)]
    pub wp: WpSection,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct WpSection {
    pub binary: Option<String>,
    pub url: Option<String>,
}

impl ToolConfig {
    /// Resolve the wp-cli binary: env HAYSTACK_WP_BIN > config > `wp` on PATH.
    pub fn wp_binary(&self) -> String {
        if let Ok(value) = env::var("HAYSTACK_WP_BIN") {
            let trimmed = value.trim().to_string();
            if !trimmed.is_empty() {
                return trimmed;
            }
        }
        self.wp
            .binary
            .clone()
            .unwrap_or_else(|| DEFAULT_WP_BINARY.to_string())
    }

    /// Resolve the ambient site URL: env HAYSTACK_URL > config > None.
    pub fn site_url(&self) -> Option<String> {
        if let Ok(value) = env::var("HAYSTACK_URL") {
            let trimmed = value.trim().to_string();
            if !trimmed.is_empty() {
                return Some(trimmed);
            }
        }
        self.wp.url.clone()
    }
}

/// Load and parse a ToolConfig from a TOML file. Returns defaults if the file
/// doesn't exist.
pub fn load_config(config_path: &Path) -> Result<ToolConfig> {
    if !config_path.exists() {
        return Ok(ToolConfig::default());
    }
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;
    let parsed: ToolConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;
    Ok(parsed)
}
