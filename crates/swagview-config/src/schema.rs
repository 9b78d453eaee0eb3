//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use serde::{Deserialize, Serialize};
use swagview_docs::{
    ResolveOptions, DEFAULT_JSON_INDENT, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES, DEFINITIONS_PREFIX,
};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs.
    Json,
    /// Human-readable pretty format.
    #[default]
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in output.
    #[serde(default)]
    pub ansi_enabled: bool,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
            include_location: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Example resolution settings.
///
/// # Example
///
/// ```
/// use swagview_config::ResolverConfig;
///
/// let config = ResolverConfig::default();
/// assert_eq!(config.ref_prefix, "#/definitions/");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Maximum number of nested definitions expanded along one path.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum number of definitions expanded for one example.
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,

    /// Prefix stripped from `$ref` pointers to get the definition name.
    #[serde(default = "default_ref_prefix")]
    pub ref_prefix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_nodes: default_max_nodes(),
            ref_prefix: default_ref_prefix(),
        }
    }
}

impl ResolverConfig {
    /// Convert to the resolver's options.
    #[must_use]
    pub fn to_options(&self) -> ResolveOptions {
        ResolveOptions {
            max_depth: self.max_depth,
            max_nodes: self.max_nodes,
            ref_prefix: self.ref_prefix.clone(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_max_nodes() -> usize {
    DEFAULT_MAX_NODES
}

fn default_ref_prefix() -> String {
    DEFINITIONS_PREFIX.to_string()
}

/// HTML page settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Indent width of example payloads.
    #[serde(default = "default_json_indent")]
    pub json_indent: usize,

    /// Page title. Defaults to the document title.
    #[serde(default)]
    pub page_title: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            json_indent: default_json_indent(),
            page_title: None,
        }
    }
}

fn default_json_indent() -> usize {
    DEFAULT_JSON_INDENT
}
