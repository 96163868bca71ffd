use crate::error::{Result, SiteUrlError};
use crate::routing::{Renderer, RouteArgs};
use crate::urls::SiteUrls;

/// Options for [`SiteUrls::api_url_for`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApiUrlOptions {
	/// Join the URL onto the configured domain.
	pub absolute: bool,
	/// With `absolute`, use the offload domain instead.
	pub offload: bool,
	/// Resolve the XML-rendered route instead of the JSON one.
	pub xml: bool,
}

impl ApiUrlOptions {
	pub fn absolute(mut self) -> Self {
		self.absolute = true;
		self
	}

	pub fn offload(mut self) -> Self {
		self.offload = true;
		self
	}

	pub fn xml(mut self) -> Self {
		self.xml = true;
		self
	}
}

/// Options for [`SiteUrls::web_url_for`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebUrlOptions {
	pub absolute: bool,
	pub offload: bool,
	/// Rewrite the path into its GUID form before any domain is applied.
	pub guid: bool,
}

impl WebUrlOptions {
	pub fn absolute(mut self) -> Self {
		self.absolute = true;
		self
	}

	pub fn offload(mut self) -> Self {
		self.offload = true;
		self
	}

	pub fn guid(mut self) -> Self {
		self.guid = true;
		self
	}
}

impl SiteUrls {
	/// Reverse lookup for API routes, rendered as JSON or XML.
	pub fn api_url_for(
		&self,
		view: &str,
		options: ApiUrlOptions,
		args: &RouteArgs,
	) -> Result<String> {
		let renderer = if options.xml {
			Renderer::Xml
		} else {
			Renderer::Json
		};
		let url = self.routes.url_for(&renderer.qualify(view), args)?;

		if options.absolute {
			return self.absolutize(&url, options.offload);
		}
		Ok(url)
	}

	/// Reverse lookup for web routes.
	pub fn web_url_for(
		&self,
		view: &str,
		options: WebUrlOptions,
		args: &RouteArgs,
	) -> Result<String> {
		let mut url = self.routes.url_for(&Renderer::Web.qualify(view), args)?;

		if options.guid {
			url = self.guid.rewrite(&url);
		}

		if options.absolute {
			return self.absolutize(&url, options.offload);
		}
		Ok(url)
	}

	/// Resolve `relative` against the primary or offload domain.
	fn absolutize(&self, relative: &str, offload: bool) -> Result<String> {
		let domain = if offload {
			&self.settings.offload_domain
		} else {
			&self.settings.domain
		};

		let url = domain
			.join(relative)
			.map_err(|source| SiteUrlError::InvalidUrl {
				value: relative.to_string(),
				source,
			})?;

		tracing::debug!(relative = %relative, url = %url, offload, "absolute url");
		Ok(url.into())
	}
}
