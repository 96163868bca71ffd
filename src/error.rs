use std::path::PathBuf;

/// Library-level structured errors for siteurl.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum SiteUrlError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid regex pattern in rule: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Invalid URL: {value}")]
	InvalidUrl {
		value: String,
		#[source]
		source: url::ParseError,
	},

	#[error("URL cannot carry path segments: {url}")]
	CannotBeABase { url: String },

	#[error("No route registered under {name}")]
	RouteNotFound { name: String },

	#[error("Route registered twice: {name}")]
	DuplicateRoute { name: String },

	#[error("Invalid route rule {rule}: {reason}")]
	InvalidRouteRule { rule: String, reason: String },

	#[error("Missing argument `{argument}` for route {route}")]
	MissingRouteArgument { route: String, argument: String },

	#[error("Invalid value {value:?} for argument `{argument}` of route {route}")]
	InvalidRouteArgument {
		route: String,
		argument: String,
		value: String,
	},

	#[error("{count} positional argument(s) left unused by route {route}")]
	UnusedPositionalArguments { route: String, count: usize },

	#[error("Unknown storage action: {action}")]
	UnknownStorageAction { action: String },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using SiteUrlError.
pub type Result<T> = std::result::Result<T, SiteUrlError>;
