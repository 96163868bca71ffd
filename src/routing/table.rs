use crate::config::types::MergedConfig;
use crate::error::{Result, SiteUrlError};
use crate::routing::args::RouteArgs;
use crate::routing::rule::RouteRule;
use serde::Deserialize;
use std::collections::HashMap;

/// Renderer a view is registered with. Its tag qualifies the view name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Renderer {
	Json,
	Xml,
	Web,
}

impl Renderer {
	pub fn tag(self) -> &'static str {
		match self {
			Renderer::Json => "JSONRenderer",
			Renderer::Xml => "XMLRenderer",
			Renderer::Web => "OsfWebRenderer",
		}
	}

	/// Name a view is registered under for this renderer.
	pub fn qualify(self, view: &str) -> String {
		format!("{}__{}", self.tag(), view)
	}
}

/// Qualified view name to route template.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
	routes: HashMap<String, RouteRule>,
}

impl RouteTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build the table from merged config. The first registration of a
	/// qualified name wins; later ones are skipped.
	pub fn from_config(config: &MergedConfig) -> Result<Self> {
		let mut table = Self::new();

		for rws in &config.routes {
			let name = rws.route.qualified_name();
			if table.contains(&name) {
				tracing::debug!(
					name = %name,
					source = %rws.source.display(),
					"route already registered, skipping"
				);
				continue;
			}
			table.register(rws.route.renderer, &rws.route.view, &rws.route.rule)?;
		}

		Ok(table)
	}

	/// Register `rule` for `view` under `renderer`.
	pub fn register(&mut self, renderer: Renderer, view: &str, rule: &str) -> Result<()> {
		let name = renderer.qualify(view);
		if self.routes.contains_key(&name) {
			return Err(SiteUrlError::DuplicateRoute { name });
		}

		let rule = RouteRule::parse(rule)?;
		self.routes.insert(name, rule);
		Ok(())
	}

	pub fn contains(&self, qualified_name: &str) -> bool {
		self.routes.contains_key(qualified_name)
	}

	pub fn get(&self, qualified_name: &str) -> Option<&RouteRule> {
		self.routes.get(qualified_name)
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Reverse lookup: the relative URL for a qualified view name.
	pub fn url_for(&self, qualified_name: &str, args: &RouteArgs) -> Result<String> {
		let rule = self
			.routes
			.get(qualified_name)
			.ok_or_else(|| SiteUrlError::RouteNotFound {
				name: qualified_name.to_string(),
			})?;

		rule.build(qualified_name, args)
	}
}
