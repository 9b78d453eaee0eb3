//! Logging setup for swagview.
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`] and either
//! a JSON or a pretty formatting layer. Output goes to stderr so that stdout
//! stays free for generated pages and example payloads.
//!
//! # Example
//!
//! ```rust,ignore
//! use swagview_telemetry::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::info!(path = "api.swagger.json", "Loaded Swagger document");
//! ```
//!
//! [`EnvFilter`]: tracing_subscriber::EnvFilter

#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
