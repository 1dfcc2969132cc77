//! Configuration management for the hourglass application.
//!
//! This crate handles loading, validating, and persisting the application
//! configuration: where the scheduler service keeps its files, which items
//! the force-start toggle acts on, and how logging is set up.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`service`]: Scheduler service state directory
//! - [`logging`]: Log filter and log file
//! - [`persistence`]: Config file reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! Configuration is loaded from multiple sources with the following priority
//! (highest to lowest):
//!
//! 1. Environment variables (`HOURGLASS_STATE_DIR`, `HOURGLASS_LOG`)
//! 2. Local config (`./hourglass.json5` or `./hourglass.json`)
//! 3. User config (`<config_dir>/hourglass/config.json5` or `config.json`)
//! 4. Built-in defaults
//!
//! # Format
//!
//! ```json5
//! {
//!   service: { state_dir: "/var/lib/hourglass" },
//!   selection: ["4f3c2a...", "9d81e0..."],
//!   logging: { filter: "hourglass=debug", file: "hourglass.log" },
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use hourglass_config::Config;
//!
//! # async fn example() -> hourglass_config::Result<()> {
//! let config = Config::load().await?;
//! let state_dir = config.service.resolve_state_dir()?;
//! println!("State lives in {}", state_dir.display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod service;

// Re-export primary types at crate root for convenience
pub use config::Config;
pub use error::{ConfigError, Result};
pub use logging::LoggingConfig;
pub use service::ServiceConfig;
