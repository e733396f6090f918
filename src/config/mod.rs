//! Configuration loading for swe-cli.
//!
//! - Schema and defaults in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use swe_cli::config::{parse_config, ScaffoldConfig};
//! use std::path::Path;
//!
//! let config = parse_config("template_name: my-layout", Path::new("config.yml")).unwrap();
//! assert_eq!(config.template_name, "my-layout");
//! assert_eq!(config.manifest_file, ScaffoldConfig::default().manifest_file);
//! ```
//!
//! # Configuration File Locations
//!
//! 1. `--config <path>` when given
//! 2. User config (`~/.swe-cli/config.yml`)
//! 3. Built-in defaults

pub mod loader;
pub mod schema;

pub use loader::{app_dir, find_user_config, load_config, load_config_file, parse_config};
pub use schema::{
    ScaffoldConfig, DEFAULT_TEMPLATE_MODULE, DEFAULT_TEMPLATE_NAME, MAX_CACHE_AGE_HOURS,
};
