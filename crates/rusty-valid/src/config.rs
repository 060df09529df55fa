// File: src/config.rs
// Purpose: Validator configuration parsing from rusty-valid.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Registry and engine configuration
///
/// Optional. Rules are registered and overridden in code through
/// [`RuleRegistry::build`](crate::RuleRegistry::build) or its builder; this file
/// only adds aliases, disables names and toggles logging on top of that, and is
/// read only when the application calls [`ValidatorConfig::load`].
///
/// ```toml
/// disabled = ["digit"]
/// log_violations = false
///
/// [aliases]
/// exp = "rx"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Rule names removed from the registry (built-in or custom)
    #[serde(default)]
    pub disabled: Vec<String>,

    /// Extra names for existing rules: alias -> target rule name
    #[serde(default)]
    pub aliases: HashMap<String, String>,

    /// Emit a debug event whenever a validation pass ends with violations
    #[serde(default = "default_true")]
    pub log_violations: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            disabled: Vec::new(),
            aliases: HashMap::new(),
            log_violations: true,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./rusty-valid.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("rusty-valid.toml")
    }

    /// Parse configuration from TOML text; blank text yields the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ValidatorConfig = toml::from_str(content)?;
        Ok(config)
    }
}
