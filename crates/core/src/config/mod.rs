//! Configuration loading and schema definitions
//!
//! Settings come from an optional TOML file, then `PHOTOBOOST_*` environment
//! variables, then command-line flags applied by the binary.

mod loader;
mod schema;

pub use loader::{Config, CONFIG_CANDIDATES};
pub use schema::*;
