//! Configuration for the compiler

use serde::{Deserialize, Serialize};

use crate::design::annotations::DEFAULT_PREFIX;

/// Token the primary-key annotation value must contain
pub const DEFAULT_PRIMARY_KEY_MARKER: &str = "primary_key";

/// Configuration for field and model compilation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    /// Prefix of every recognized annotation key
    pub annotation_prefix: String,

    /// Token searched for in the primary-key annotation value
    pub primary_key_marker: String,

    /// Remove `Model` from aggregate names before normalizing them
    pub strip_model_suffix: bool,

    /// Additional words rendered fully uppercase in identifiers
    pub extra_initialisms: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            annotation_prefix: DEFAULT_PREFIX.to_string(),
            primary_key_marker: DEFAULT_PRIMARY_KEY_MARKER.to_string(),
            strip_model_suffix: true,
            extra_initialisms: Vec::new(),
        }
    }
}

impl CompilerConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> CompilerConfigBuilder {
        CompilerConfigBuilder::default()
    }

    /// Parse a configuration from YAML; missing keys keep their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

/// Builder for CompilerConfig
#[derive(Debug, Default)]
pub struct CompilerConfigBuilder {
    config: CompilerConfig,
}

impl CompilerConfigBuilder {
    /// Set the annotation key prefix
    pub fn annotation_prefix(mut self, prefix: &str) -> Self {
        self.config.annotation_prefix = prefix.to_string();
        self
    }

    /// Set the primary-key marker token
    pub fn primary_key_marker(mut self, marker: &str) -> Self {
        self.config.primary_key_marker = marker.to_string();
        self
    }

    /// Enable or disable stripping `Model` from aggregate names
    pub fn strip_model_suffix(mut self, strip: bool) -> Self {
        self.config.strip_model_suffix = strip;
        self
    }

    /// Add an initialism
    pub fn initialism(mut self, word: &str) -> Self {
        self.config.extra_initialisms.push(word.to_string());
        self
    }

    /// Build the configuration
    pub fn build(self) -> CompilerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompilerConfig::default();
        assert_eq!(config.annotation_prefix, "model:");
        assert_eq!(config.primary_key_marker, "primary_key");
        assert!(config.strip_model_suffix);
        assert!(config.extra_initialisms.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = CompilerConfig::builder()
            .annotation_prefix("gorma#")
            .primary_key_marker("pk")
            .strip_model_suffix(false)
            .initialism("sku")
            .build();

        assert_eq!(config.annotation_prefix, "gorma#");
        assert_eq!(config.primary_key_marker, "pk");
        assert!(!config.strip_model_suffix);
        assert_eq!(config.extra_initialisms, vec!["sku".to_string()]);
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = CompilerConfig::from_yaml_str("annotationPrefix: \"x-\"\n").unwrap();
        assert_eq!(config.annotation_prefix, "x-");
        assert_eq!(config.primary_key_marker, "primary_key");
        assert!(config.strip_model_suffix);
    }
}
