use crate::error::{Result, SiteUrlError};
use crate::routing::args::RouteArgs;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::collections::HashSet;
use url::form_urlencoded;

/// Characters escaped inside a `path` placeholder value. `/` is kept.
const PATH_VALUE: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'#')
	.add(b'%')
	.add(b'<')
	.add(b'>')
	.add(b'?')
	.add(b'`')
	.add(b'{')
	.add(b'}');

/// Characters escaped inside a single-segment placeholder value.
const SEGMENT_VALUE: &AsciiSet = &PATH_VALUE.add(b'/');

/// Value constraint attached to a placeholder, e.g. `<int:page>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
	/// One non-empty path segment (`<name>` or `<string:name>`).
	Segment,
	/// Non-empty, may span several segments (`<path:name>`).
	Path,
	/// Unsigned decimal integer (`<int:name>`).
	Int,
}

impl Converter {
	fn from_name(name: &str) -> Option<Self> {
		match name {
			"default" | "string" => Some(Converter::Segment),
			"path" => Some(Converter::Path),
			"int" => Some(Converter::Int),
			_ => None,
		}
	}

	fn accepts(self, value: &str) -> bool {
		match self {
			Converter::Segment | Converter::Path => !value.is_empty(),
			Converter::Int => !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()),
		}
	}

	fn encode(self, value: &str) -> String {
		match self {
			Converter::Path => utf8_percent_encode(value, PATH_VALUE).to_string(),
			Converter::Segment | Converter::Int => {
				utf8_percent_encode(value, SEGMENT_VALUE).to_string()
			}
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
	Literal(String),
	Placeholder { name: String, converter: Converter },
}

/// A parsed route template such as `/project/<pid>/node/<nid>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
	rule: String,
	parts: Vec<Part>,
}

impl RouteRule {
	/// Parse a template. Placeholders are `<name>` or `<converter:name>`.
	pub fn parse(rule: &str) -> Result<Self> {
		let invalid = |reason: &str| SiteUrlError::InvalidRouteRule {
			rule: rule.to_string(),
			reason: reason.to_string(),
		};

		if !rule.starts_with('/') {
			return Err(invalid("must start with '/'"));
		}

		let mut parts = Vec::new();
		let mut names = HashSet::new();
		let mut rest = rule;

		while let Some(open) = rest.find('<') {
			if open > 0 {
				parts.push(Part::Literal(rest[..open].to_string()));
			}

			let after_open = &rest[open + 1..];
			let close = after_open
				.find('>')
				.ok_or_else(|| invalid("unclosed placeholder"))?;
			let inner = &after_open[..close];

			let (converter, name) = match inner.split_once(':') {
				Some((converter, name)) => (
					Converter::from_name(converter.trim())
						.ok_or_else(|| invalid(&format!("unknown converter `{converter}`")))?,
					name.trim(),
				),
				None => (Converter::Segment, inner.trim()),
			};

			if name.is_empty()
				|| !name
					.chars()
					.all(|c| c.is_ascii_alphanumeric() || c == '_')
			{
				return Err(invalid(&format!("invalid placeholder name `{name}`")));
			}
			if !names.insert(name.to_string()) {
				return Err(invalid(&format!("placeholder `{name}` used twice")));
			}

			parts.push(Part::Placeholder {
				name: name.to_string(),
				converter,
			});
			rest = &after_open[close + 1..];
		}

		if !rest.is_empty() {
			parts.push(Part::Literal(rest.to_string()));
		}

		Ok(RouteRule {
			rule: rule.to_string(),
			parts,
		})
	}

	/// The template text this rule was parsed from.
	pub fn as_str(&self) -> &str {
		&self.rule
	}

	/// Placeholder names, in template order.
	pub fn placeholders(&self) -> impl Iterator<Item = &str> {
		self.parts.iter().filter_map(|part| match part {
			Part::Placeholder { name, .. } => Some(name.as_str()),
			Part::Literal(_) => None,
		})
	}

	/// Fill the template from `args`.
	///
	/// Each placeholder takes the keyword argument of the same name, otherwise
	/// the next positional argument. Keyword arguments the template does not
	/// name are appended as the query string.
	pub fn build(&self, route: &str, args: &RouteArgs) -> Result<String> {
		let mut positional = args.positional().iter();
		let mut consumed = HashSet::new();
		let mut url = String::with_capacity(self.rule.len());

		for part in &self.parts {
			match part {
				Part::Literal(text) => url.push_str(text),
				Part::Placeholder { name, converter } => {
					let value = match args.keyword(name) {
						Some(value) => {
							consumed.insert(name.as_str());
							value
						}
						None => positional.next().map(String::as_str).ok_or_else(|| {
							SiteUrlError::MissingRouteArgument {
								route: route.to_string(),
								argument: name.clone(),
							}
						})?,
					};

					if !converter.accepts(value) {
						return Err(SiteUrlError::InvalidRouteArgument {
							route: route.to_string(),
							argument: name.clone(),
							value: value.to_string(),
						});
					}
					url.push_str(&converter.encode(value));
				}
			}
		}

		let unused = positional.count();
		if unused > 0 {
			return Err(SiteUrlError::UnusedPositionalArguments {
				route: route.to_string(),
				count: unused,
			});
		}

		let mut query = form_urlencoded::Serializer::new(String::new());
		let mut has_query = false;
		for (key, value) in args.keywords() {
			if !consumed.contains(key.as_str()) {
				query.append_pair(key, value);
				has_query = true;
			}
		}
		if has_query {
			url.push('?');
			url.push_str(&query.finish());
		}

		Ok(url)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_literal_rule() {
		let rule = RouteRule::parse("/dashboard/").unwrap();
		assert_eq!(rule.as_str(), "/dashboard/");
		assert_eq!(rule.placeholders().count(), 0);
		assert_eq!(rule.build("dashboard", &RouteArgs::new()).unwrap(), "/dashboard/");
	}

	#[test]
	fn test_parse_placeholders_with_converters() {
		let rule = RouteRule::parse("/project/<pid>/files/<path:path>/<int:version>").unwrap();
		let names: Vec<_> = rule.placeholders().collect();
		assert_eq!(names, vec!["pid", "path", "version"]);
	}

	#[test]
	fn test_parse_rejects_bad_templates() {
		for bad in [
			"project/<pid>/",
			"/project/<pid/",
			"/project/<>/",
			"/project/<uuid:pid>/",
			"/project/<pid>/node/<pid>/",
			"/project/<p-id>/",
		] {
			assert!(
				matches!(
					RouteRule::parse(bad),
					Err(SiteUrlError::InvalidRouteRule { .. })
				),
				"{bad} should be rejected"
			);
		}
	}

	#[test]
	fn test_build_with_keywords() {
		let rule = RouteRule::parse("/project/<pid>/node/<nid>/").unwrap();
		let args = RouteArgs::new().kwarg("nid", "fghij").kwarg("pid", "abcde");
		assert_eq!(
			rule.build("view", &args).unwrap(),
			"/project/abcde/node/fghij/"
		);
	}

	#[test]
	fn test_build_with_positional_fills_remaining() {
		let rule = RouteRule::parse("/project/<pid>/node/<nid>/").unwrap();
		let args = RouteArgs::new().kwarg("pid", "abcde").arg("fghij");
		assert_eq!(
			rule.build("view", &args).unwrap(),
			"/project/abcde/node/fghij/"
		);
	}

	#[test]
	fn test_build_extra_keywords_become_query() {
		let rule = RouteRule::parse("/search/").unwrap();
		let args = RouteArgs::new()
			.kwarg("q", "open science")
			.kwarg("filter[tags]", "rust");
		assert_eq!(
			rule.build("search", &args).unwrap(),
			"/search/?q=open+science&filter%5Btags%5D=rust"
		);
	}

	#[test]
	fn test_build_encodes_values() {
		let rule = RouteRule::parse("/wiki/<wname>/files/<path:path>").unwrap();
		let args = RouteArgs::new()
			.kwarg("wname", "a/b c")
			.kwarg("path", "dir/sub dir/f?.txt");
		assert_eq!(
			rule.build("view", &args).unwrap(),
			"/wiki/a%2Fb%20c/files/dir/sub%20dir/f%3F.txt"
		);
	}

	#[test]
	fn test_build_missing_argument() {
		let rule = RouteRule::parse("/project/<pid>/").unwrap();
		match rule.build("project_view", &RouteArgs::new()).unwrap_err() {
			SiteUrlError::MissingRouteArgument { route, argument } => {
				assert_eq!(route, "project_view");
				assert_eq!(argument, "pid");
			}
			other => panic!("Expected MissingRouteArgument error, got {other:?}"),
		}
	}

	#[test]
	fn test_build_rejects_non_integer() {
		let rule = RouteRule::parse("/page/<int:num>/").unwrap();
		assert!(matches!(
			rule.build("page", &RouteArgs::new().arg("two")),
			Err(SiteUrlError::InvalidRouteArgument { .. })
		));
		assert_eq!(
			rule.build("page", &RouteArgs::new().arg("2")).unwrap(),
			"/page/2/"
		);
	}

	#[test]
	fn test_build_rejects_unused_positional() {
		let rule = RouteRule::parse("/project/<pid>/").unwrap();
		let args = RouteArgs::new().arg("abcde").arg("extra");
		assert!(matches!(
			rule.build("view", &args),
			Err(SiteUrlError::UnusedPositionalArguments { count: 1, .. })
		));
	}
}
