//! Typed configuration for swagview.
//!
//! Supports:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Example
//!
//! ```no_run
//! use swagview_config::ConfigLoader;
//!
//! # fn main() -> Result<(), swagview_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("swagview.toml")?
//!     .with_env_prefix("SWAGVIEW")
//!     .load()?;
//!
//! println!("max depth: {}", config.resolver.max_depth);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [logging]
//! enabled = true
//! level = "info"
//! format = "pretty"
//!
//! [resolver]
//! max_depth = 32
//! max_nodes = 10000
//! ref_prefix = "#/definitions/"
//!
//! [render]
//! json_indent = 4
//! page_title = "Fight Analysis API"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden with `PREFIX__SECTION__KEY` variables:
//!
//! - `SWAGVIEW__LOGGING__LEVEL=debug`
//! - `SWAGVIEW__RESOLVER__MAX_DEPTH=8`
//! - `SWAGVIEW__RENDER__JSON_INDENT=2`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::*;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
