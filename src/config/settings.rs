use crate::config::types::MergedConfig;
use crate::error::{Result, SiteUrlError};
use url::Url;

pub const DEFAULT_DOMAIN: &str = "http://localhost:5000/";
pub const DEFAULT_OFFLOAD_DOMAIN: &str = "http://localhost:5001/";
pub const DEFAULT_API_DOMAIN: &str = "http://localhost:8000/";
pub const DEFAULT_API_PREFIX: &str = "v2/";
pub const DEFAULT_WATERBUTLER_URL: &str = "http://localhost:7777";
pub const DEFAULT_COOKIE_NAME: &str = "osf";

/// Validated, immutable process settings. Base URLs are parsed up front.
#[derive(Debug, Clone)]
pub struct Settings {
	pub domain: Url,
	pub offload_domain: Url,
	/// Kept as text: it is concatenated with `api_prefix` before parsing.
	pub api_domain: String,
	pub api_prefix: String,
	pub waterbutler_url: Url,
	pub cookie_name: String,
}

impl Settings {
	/// Resolve merged config values, falling back to the built-in defaults.
	pub fn resolve(config: &MergedConfig) -> Result<Self> {
		let overrides = &config.settings;

		let api_domain = overrides
			.api_domain
			.clone()
			.unwrap_or_else(|| DEFAULT_API_DOMAIN.to_string());
		let api_prefix = overrides
			.api_prefix
			.clone()
			.unwrap_or_else(|| DEFAULT_API_PREFIX.to_string());
		parse_url(&format!("{api_domain}{api_prefix}"))?;

		let settings = Settings {
			domain: parse_url(overrides.domain.as_deref().unwrap_or(DEFAULT_DOMAIN))?,
			offload_domain: parse_url(
				overrides
					.offload_domain
					.as_deref()
					.unwrap_or(DEFAULT_OFFLOAD_DOMAIN),
			)?,
			api_domain,
			api_prefix,
			waterbutler_url: parse_url(
				overrides
					.waterbutler_url
					.as_deref()
					.unwrap_or(DEFAULT_WATERBUTLER_URL),
			)?,
			cookie_name: overrides
				.cookie_name
				.clone()
				.unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string()),
		};

		tracing::debug!(?settings, "resolved settings");
		Ok(settings)
	}

	/// Built-in defaults, as used when no config file sets anything.
	pub fn defaults() -> Result<Self> {
		Self::resolve(&MergedConfig::default())
	}
}

pub(crate) fn parse_url(value: &str) -> Result<Url> {
	Url::parse(value).map_err(|source| SiteUrlError::InvalidUrl {
		value: value.to_string(),
		source,
	})
}
