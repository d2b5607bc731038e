#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Environment-backed configuration for the orphan finder.
//!
//! Layout: `defaults.rs` (variable names and defaults), `model.rs` (typed settings),
//! `validate.rs` (value parsing), `loader.rs` (`AppConfig::from_env` / `from_lookup`).

pub mod defaults;
pub mod error;
mod loader;
pub mod model;
mod validate;

pub use error::{ConfigError, ConfigResult};
pub use model::{AppConfig, LoggingSettings, QbitSettings, ReportFormat, TorrentSelection};
