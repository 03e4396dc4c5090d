//! Configuration types for ERD rendering.
//!
//! All types implement [`serde::Deserialize`] so the configuration can be
//! loaded from external sources such as a TOML file.
//!
//! # Example
//!
//! ```
//! # use erd::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().validate().is_ok());
//! ```

use serde::Deserialize;

use erd_core::style::Style;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: Style,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified style.
    pub fn new(style: Style) -> Self {
        Self { style }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &Style {
        &self.style
    }
}
