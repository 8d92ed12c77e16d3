//! Configuration provider for a native shell that hosts a web application.
//!
//! The configuration is compiled in, validated once at startup and shared
//! read-only for the rest of the process.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{load_configuration, AppConfiguration, ContentSource};
pub use error::{ConfigurationError, Result};
