//! Configuration loading and parsing for siteurl.
//!
//! This module handles:
//! - TOML config file parsing
//! - Directory cascade discovery
//! - Config merging
//! - Resolving merged settings into validated base URLs
//! - The `--init` config template

pub mod cascade;
pub mod parser;
pub mod settings;
pub mod template;
pub mod types;

pub use cascade::{
	CONFIG_FILE_NAME, discover_configs, load_merged_config, merge_configs, user_config_path,
};
pub use parser::{parse_config_file, parse_config_str};
pub use settings::Settings;
pub use template::generate_init_template;
pub use types::{
	Config, LoadedConfig, MergedConfig, RouteEntry, RouteWithSource, SettingsOverrides,
};
