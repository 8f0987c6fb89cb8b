//! Core utilities shared by the Photoboost crates
//!
//! - **Error handling**: errors with codes, context and recovery suggestions
//! - **Configuration**: TOML file plus `PHOTOBOOST_*` environment overrides
//! - **Health checks**: pluggable checks folded into a single report
//!
//! # Example
//!
//! ```rust,no_run
//! use photoboost_core::{config::Config, health::{HealthChecker, WritableDirCheck}};
//!
//! let config = Config::load(None).expect("invalid configuration");
//! let report = HealthChecker::new()
//!     .add_check(WritableDirCheck::new("storage", &config.schema.storage.dir))
//!     .run();
//!
//! if !report.is_healthy() {
//!     eprintln!("storage directory is not writable");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod health;

pub use error::{Error, ErrorCode, Result, ResultExt};
