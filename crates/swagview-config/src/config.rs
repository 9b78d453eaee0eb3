//! Main configuration types.
//!
//! This module provides the top-level [`SwagviewConfig`] struct and its builder.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, LogFormat, LoggingConfig, RenderConfig, ResolverConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Maximum accepted indent width for example payloads.
pub const MAX_JSON_INDENT: usize = 16;

/// Complete swagview configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use swagview_config::SwagviewConfig;
///
/// let config = SwagviewConfig::default();
/// assert_eq!(config.render.json_indent, 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct SwagviewConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Example resolution configuration.
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// HTML page configuration.
    #[serde(default)]
    pub render: RenderConfig,
}

impl SwagviewConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> SwagviewConfigBuilder {
        SwagviewConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `resolver.max_depth` or `resolver.max_nodes` is zero
    /// - `resolver.ref_prefix` is empty
    /// - `render.json_indent` exceeds [`MAX_JSON_INDENT`]
    /// - `logging.level` is neither a known level nor a filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.max_depth == 0 {
            return Err(ConfigError::invalid_value(
                "resolver.max_depth",
                "must be at least 1",
            ));
        }

        if self.resolver.max_nodes == 0 {
            return Err(ConfigError::invalid_value(
                "resolver.max_nodes",
                "must be at least 1",
            ));
        }

        if self.resolver.ref_prefix.is_empty() {
            return Err(ConfigError::invalid_value(
                "resolver.ref_prefix",
                "must not be empty",
            ));
        }

        if self.render.json_indent > MAX_JSON_INDENT {
            return Err(ConfigError::invalid_value(
                "render.json_indent",
                format!("must be at most {MAX_JSON_INDENT}"),
            ));
        }

        // Filter directives like "swagview=debug,warn" are allowed; only bare
        // levels are checked here.
        let level = self.logging.level.to_lowercase();
        if !level.contains('=') && !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                format!("unknown log level: {}", self.logging.level),
            ));
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty, colored debug logs with source locations.
    ///
    /// # Example
    ///
    /// ```
    /// use swagview_config::SwagviewConfig;
    ///
    /// let config = SwagviewConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.ansi_enabled = true;
        config.logging.include_location = true;

        config
    }

    /// Create a production configuration preset.
    ///
    /// JSON logs at info level.
    ///
    /// # Example
    ///
    /// ```
    /// use swagview_config::{LogFormat, SwagviewConfig};
    ///
    /// let config = SwagviewConfig::production();
    /// assert_eq!(config.logging.format, LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config.logging.ansi_enabled = false;

        config
    }
}

/// Builder for [`SwagviewConfig`].
#[derive(Debug, Default)]
pub struct SwagviewConfigBuilder {
    logging: Option<LoggingConfig>,
    resolver: Option<ResolverConfig>,
    render: Option<RenderConfig>,
}

impl SwagviewConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Set the resolver configuration.
    #[must_use]
    pub fn resolver(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Set the render configuration.
    #[must_use]
    pub fn render(mut self, render: RenderConfig) -> Self {
        self.render = Some(render);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> SwagviewConfig {
        SwagviewConfig {
            logging: self.logging.unwrap_or_default(),
            resolver: self.resolver.unwrap_or_default(),
            render: self.render.unwrap_or_default(),
        }
    }
}
