//! Common utilities shared across the hlídač crates.
//!
//! Kept deliberately small so every crate in the workspace can depend on it:
//! today it only carries the [`observability`] helpers that binaries and
//! integration tests use to install a `tracing` subscriber.
//!
//! ```rust
//! use hlidac_common::observability::{LogConfig, LogFormat};
//!
//! let cfg = LogConfig {
//!     format: LogFormat::Json,
//!     ..LogConfig::default()
//! };
//! assert_eq!(cfg.app_name, "hlidac");
//! assert_eq!(cfg.default_filter, "info");
//! ```

pub mod observability;

pub use observability::{LogConfig, LogFormat, init_logging};
