//! Read-only view of the incoming request.
//!
//! URL builders never reach for a global "current request"; callers hand
//! them a [`RequestContext`] built from whatever their HTTP layer provides.

use http::HeaderMap;
use http::header::{CONTENT_TYPE, COOKIE};
use std::collections::HashMap;
use url::form_urlencoded;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Content type, cookies and query arguments of the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
	pub content_type: Option<String>,
	pub cookies: HashMap<String, String>,
	/// Query string arguments in request order; repeated keys are kept.
	pub args: Vec<(String, String)>,
}

impl RequestContext {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a context from HTTP request headers and the raw query string.
	pub fn from_http(headers: &HeaderMap, query: Option<&str>) -> Self {
		let content_type = headers
			.get(CONTENT_TYPE)
			.and_then(|v| v.to_str().ok())
			.map(|v| v.to_string());

		let mut cookies = HashMap::new();
		for header in headers.get_all(COOKIE) {
			let Ok(header) = header.to_str() else {
				continue;
			};
			for (name, value) in parse_cookie_header(header) {
				cookies.entry(name).or_insert(value);
			}
		}

		let request = RequestContext {
			content_type,
			cookies,
			args: Vec::new(),
		};
		match query {
			Some(query) => request.with_query_string(query),
			None => request,
		}
	}

	/// Append the arguments of a raw query string, with or without leading `?`.
	pub fn with_query_string(mut self, query: &str) -> Self {
		self.args.extend(
			form_urlencoded::parse(query.trim_start_matches('?').as_bytes()).into_owned(),
		);
		self
	}

	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());
		self
	}

	pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.cookies.insert(name.into(), value.into());
		self
	}

	pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.args.push((name.into(), value.into()));
		self
	}

	pub fn cookie(&self, name: &str) -> Option<&str> {
		self.cookies.get(name).map(String::as_str)
	}

	/// First value of query argument `name`.
	pub fn arg(&self, name: &str) -> Option<&str> {
		self.args
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}
}

/// Split a `Cookie` header into name/value pairs. Malformed pairs are skipped.
fn parse_cookie_header(header: &str) -> impl Iterator<Item = (String, String)> + '_ {
	header.split(';').filter_map(|pair| {
		let (name, value) = pair.split_once('=')?;
		let name = name.trim();
		if name.is_empty() {
			return None;
		}
		let value = value.trim();
		let value = value
			.strip_prefix('"')
			.and_then(|v| v.strip_suffix('"'))
			.unwrap_or(value);
		Some((name.to_string(), value.to_string()))
	})
}

/// True when the request declares a JSON body. No content type means false.
pub fn is_json_request(request: &RequestContext) -> bool {
	request
		.content_type
		.as_deref()
		.is_some_and(|content_type| content_type.contains(JSON_MEDIA_TYPE))
}

#[cfg(test)]
mod tests {
	use super::*;
	use http::HeaderValue;

	#[test]
	fn test_is_json_request() {
		let json = RequestContext::new().with_content_type("application/json; charset=utf-8");
		let html = RequestContext::new().with_content_type("text/html");

		assert!(is_json_request(&json));
		assert!(!is_json_request(&html));
		assert!(!is_json_request(&RequestContext::new()));
	}

	#[test]
	fn test_from_http_reads_headers_and_query() {
		let mut headers = HeaderMap::new();
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		headers.append(COOKIE, HeaderValue::from_static("osf=abc123; theme=\"dark\""));
		headers.append(COOKIE, HeaderValue::from_static("osf=ignored; lang=en"));

		let request = RequestContext::from_http(&headers, Some("?view_only=key%201&page=2"));

		assert!(is_json_request(&request));
		assert_eq!(request.cookie("osf"), Some("abc123"));
		assert_eq!(request.cookie("theme"), Some("dark"));
		assert_eq!(request.cookie("lang"), Some("en"));
		assert_eq!(request.arg("view_only"), Some("key 1"));
		assert_eq!(request.arg("page"), Some("2"));
		assert_eq!(request.arg("missing"), None);
	}

	#[test]
	fn test_from_http_without_anything() {
		let request = RequestContext::from_http(&HeaderMap::new(), None);
		assert_eq!(request, RequestContext::default());
	}

	#[test]
	fn test_parse_cookie_header_skips_malformed() {
		let pairs: Vec<_> = parse_cookie_header("a=1; junk; =2; b = 3 ").collect();
		assert_eq!(
			pairs,
			vec![
				("a".to_string(), "1".to_string()),
				("b".to_string(), "3".to_string())
			]
		);
	}
}
