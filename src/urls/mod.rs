//! URL builders for web routes, API routes, the v2 REST API and the
//! file-storage service.

pub mod api_v2;
pub mod query;
pub mod reverse;
pub mod waterbutler;

pub use api_v2::api_v2_url_with_base;
pub use query::QueryArgs;
pub use reverse::{ApiUrlOptions, WebUrlOptions};
pub use waterbutler::{HasGuid, SessionCookieSource, StorageAction};

use crate::config::{MergedConfig, Settings};
use crate::error::Result;
use crate::routing::RouteTable;
use crate::rules::GuidRewriter;

/// Settings, routing table and rewrite rules shared by every URL builder.
///
/// Immutable once built, so one instance can serve concurrent requests.
#[derive(Debug)]
pub struct SiteUrls {
	settings: Settings,
	routes: RouteTable,
	guid: GuidRewriter,
}

impl SiteUrls {
	pub fn new(settings: Settings, routes: RouteTable) -> Result<Self> {
		Ok(SiteUrls {
			settings,
			routes,
			guid: GuidRewriter::new()?,
		})
	}

	/// Resolve settings and routes from merged config.
	pub fn from_config(config: &MergedConfig) -> Result<Self> {
		Self::new(Settings::resolve(config)?, RouteTable::from_config(config)?)
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn routes(&self) -> &RouteTable {
		&self.routes
	}

	/// Rewrite a path into its GUID form.
	pub fn guid_url_for(&self, url: &str) -> String {
		self.guid.rewrite(url)
	}

	/// Build a v2 API URL under the configured API domain and prefix.
	pub fn api_v2_url(
		&self,
		path: &str,
		params: Option<&QueryArgs>,
		extra: &QueryArgs,
	) -> Result<String> {
		api_v2_url_with_base(
			&self.settings.api_domain,
			&self.settings.api_prefix,
			path,
			params,
			extra,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_api_v2_url_uses_configured_base() {
		let site = SiteUrls::new(Settings::defaults().unwrap(), RouteTable::new()).unwrap();
		let params = QueryArgs::new().with("filter[fullname]", "bob");

		let url = site
			.api_v2_url("/nodes/abcd3/contributors/", Some(&params), &QueryArgs::new())
			.unwrap();

		assert_eq!(
			url,
			"http://localhost:8000/v2/nodes/abcd3/contributors/?filter%5Bfullname%5D=bob"
		);
	}

	#[test]
	fn test_guid_url_for() {
		let site = SiteUrls::new(Settings::defaults().unwrap(), RouteTable::new()).unwrap();
		assert_eq!(site.guid_url_for("/profile/abcde"), "/abcde");
	}
}
