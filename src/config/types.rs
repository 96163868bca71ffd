use crate::error::{Result, SiteUrlError};
use crate::routing::{Renderer, RouteRule};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Top-level configuration from a `.siteurl.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop directory cascade and jump directly to ~/.siteurl.toml.
	#[serde(default)]
	pub root: bool,

	/// If true, ignore every other config file, including ~/.siteurl.toml.
	#[serde(default)]
	pub no_external_lookup: bool,

	/// Environment variable name that, if truthy, skips ~/.siteurl.toml lookup.
	/// Useful for CI environments.
	#[serde(default)]
	pub root_config_lookup_disable_env_var: Option<String>,

	/// Base domains, API location, storage service location and cookie name.
	#[serde(flatten)]
	pub settings: SettingsOverrides,

	/// Registered routes, addressed by renderer and view name.
	#[serde(default)]
	pub routes: Vec<RouteEntry>,
}

/// Optional settings; unset keys fall through to less specific configs and
/// finally to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SettingsOverrides {
	/// Primary base domain for absolute web and API URLs.
	pub domain: Option<String>,

	/// Secondary base domain used when offloading is requested.
	pub offload_domain: Option<String>,

	/// Domain of the v2 REST API.
	pub api_domain: Option<String>,

	/// Path prefix appended to `api_domain`.
	pub api_prefix: Option<String>,

	/// Base URL of the file-storage service.
	pub waterbutler_url: Option<String>,

	/// Name of the session cookie forwarded to the storage service.
	pub cookie_name: Option<String>,
}

impl SettingsOverrides {
	/// Fill every unset key from `fallback`. Keys already set are kept.
	pub fn fill_from(&mut self, fallback: &SettingsOverrides) {
		fn fill(slot: &mut Option<String>, fallback: &Option<String>) {
			if slot.is_none() {
				slot.clone_from(fallback);
			}
		}

		fill(&mut self.domain, &fallback.domain);
		fill(&mut self.offload_domain, &fallback.offload_domain);
		fill(&mut self.api_domain, &fallback.api_domain);
		fill(&mut self.api_prefix, &fallback.api_prefix);
		fill(&mut self.waterbutler_url, &fallback.waterbutler_url);
		fill(&mut self.cookie_name, &fallback.cookie_name);
	}
}

/// A route registration: `rule` is served by `view` through `renderer`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteEntry {
	/// Which renderer tag qualifies the view name.
	pub renderer: Renderer,

	/// Logical view name.
	pub view: String,

	/// Path template, e.g. `/project/<pid>/files/<path:path>`.
	pub rule: String,
}

impl RouteEntry {
	/// Name the route is registered under, e.g. `JSONRenderer__project_view`.
	pub fn qualified_name(&self) -> String {
		self.renderer.qualify(&self.view)
	}
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Merged configuration from multiple config files in the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	/// Settings, most specific config first.
	pub settings: SettingsOverrides,

	/// All routes from all configs, in cascade order (first registration wins).
	pub routes: Vec<RouteWithSource>,

	/// Whether external lookup is disabled (from any config in cascade).
	pub no_external_lookup: bool,
}

/// A route with its source config path for debugging/display.
#[derive(Debug, Clone)]
pub struct RouteWithSource {
	/// The route itself.
	pub route: RouteEntry,

	/// The config file this route came from.
	pub source: PathBuf,
}

impl Config {
	/// Validate route templates and reject names registered twice in one file.
	pub fn validate(&self) -> Result<()> {
		let mut seen = HashSet::new();
		for route in &self.routes {
			RouteRule::parse(&route.rule)?;

			let name = route.qualified_name();
			if !seen.insert(name.clone()) {
				return Err(SiteUrlError::DuplicateRoute { name });
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fill_from_keeps_specific_values() {
		let mut specific = SettingsOverrides {
			domain: Some("https://osf.io/".to_string()),
			..Default::default()
		};
		let general = SettingsOverrides {
			domain: Some("http://localhost:5000/".to_string()),
			cookie_name: Some("osf_staging".to_string()),
			..Default::default()
		};

		specific.fill_from(&general);

		assert_eq!(specific.domain.as_deref(), Some("https://osf.io/"));
		assert_eq!(specific.cookie_name.as_deref(), Some("osf_staging"));
		assert!(specific.api_domain.is_none());
	}

	#[test]
	fn test_qualified_name() {
		let entry = RouteEntry {
			renderer: Renderer::Xml,
			view: "node_rss".to_string(),
			rule: "/project/<pid>/rss/".to_string(),
		};
		assert_eq!(entry.qualified_name(), "XMLRenderer__node_rss");
	}
}
