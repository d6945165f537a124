//! Compiler configuration
//!
//! Defaults reproduce the form the platform accepts; change them only when
//! targeting a platform that has relaxed its limits.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable limits for description rendering and scalar safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Maximum length of a tool description
    pub tool_description_limit: usize,
    /// Maximum length of an input property description
    pub property_description_limit: usize,
    /// Tool descriptions longer than this render as a literal block
    pub tool_description_block_threshold: usize,
    /// Property descriptions longer than this render as a literal block
    pub property_description_block_threshold: usize,
    /// Emit quoted scalars containing `"` or `\` verbatim instead of rejecting them
    pub allow_unsafe_scalars: bool,
}

impl CompilerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With tool description limit
    #[inline]
    #[must_use]
    pub fn with_tool_description_limit(mut self, limit: usize) -> Self {
        self.tool_description_limit = limit;
        self
    }

    /// With property description limit
    #[inline]
    #[must_use]
    pub fn with_property_description_limit(mut self, limit: usize) -> Self {
        self.property_description_limit = limit;
        self
    }

    /// With unsafe scalars allowed
    #[inline]
    #[must_use]
    pub fn with_unsafe_scalars(mut self, allow: bool) -> Self {
        self.allow_unsafe_scalars = allow;
        self
    }

    /// Parse from TOML text; missing keys keep their defaults
    ///
    /// # Errors
    /// Returns error if the TOML is invalid
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is invalid
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded compiler config");
        Ok(config)
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            tool_description_limit: 300,
            property_description_limit: 150,
            tool_description_block_threshold: 200,
            property_description_block_threshold: 80,
            allow_unsafe_scalars: false,
        }
    }
}
