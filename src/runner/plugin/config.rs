//! Object extension configuration.
//!
//! Expected format:
//! ```toml
//! [object]
//! builtin_name = "object"
//! max_delegate_depth = 64
//! ```
//!
//! Every key is optional; a missing `[object]` table yields the defaults.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_BUILTIN_NAME: &str = "object";
pub const DEFAULT_MAX_DELEGATE_DEPTH: usize = 64;

/// Settings for the `object` builtin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObjectConfig {
    /// Global name the template builder is registered under.
    pub builtin_name: String,
    /// Deepest allowed nesting of instance delegates below any instance.
    pub max_delegate_depth: usize,
}

impl Default for ObjectConfig {
    fn default() -> Self {
        ObjectConfig {
            builtin_name: DEFAULT_BUILTIN_NAME.to_string(),
            max_delegate_depth: DEFAULT_MAX_DELEGATE_DEPTH,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    object: ObjectConfig,
}

impl ObjectConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, PluginError> {
        let content = fs::read_to_string(path).map_err(|e| {
            PluginError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, PluginError> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| PluginError::ConfigError(format!("invalid config: {}", e)))?;
        file.object.validate()
    }

    fn validate(self) -> Result<Self, PluginError> {
        if self.builtin_name.trim().is_empty() {
            return Err(PluginError::ConfigError(
                "object.builtin_name must not be empty".to_string(),
            ));
        }
        if self.max_delegate_depth == 0 {
            return Err(PluginError::ConfigError(
                "object.max_delegate_depth must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PluginError {
    /// Configuration could not be read or is invalid.
    ConfigError(String),
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginError::ConfigError(msg) => write!(f, "Plugin config error: {}", msg),
        }
    }
}

impl std::error::Error for PluginError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = ObjectConfig::parse(
            r#"
[object]
builtin_name = "klass"
max_delegate_depth = 8
"#,
        )
        .unwrap();
        assert_eq!(config.builtin_name, "klass");
        assert_eq!(config.max_delegate_depth, 8);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        assert_eq!(ObjectConfig::parse("").unwrap(), ObjectConfig::default());

        let config = ObjectConfig::parse("[object]\nmax_delegate_depth = 3\n").unwrap();
        assert_eq!(config.builtin_name, DEFAULT_BUILTIN_NAME);
        assert_eq!(config.max_delegate_depth, 3);
    }

    #[test]
    fn test_invalid_config() {
        for content in &[
            "[object]\nmax_delegate_depth = \"deep\"\n",
            "[object]\nbuiltin_name = \"\"\n",
            "[object]\nmax_delegate_depth = 0\n",
            "[object\n",
        ] {
            match ObjectConfig::parse(content) {
                Err(PluginError::ConfigError(_)) => {}
                other => panic!("expected ConfigError for {:?}, got {:?}", content, other),
            }
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = ObjectConfig::load(Path::new("/nonexistent/just-object.toml")).unwrap_err();
        assert!(err.to_string().starts_with("Plugin config error: failed to read"));
    }
}
