use crate::config::settings::parse_url;
use crate::error::{Result, SiteUrlError};
use crate::urls::QueryArgs;
use percent_encoding::percent_decode_str;
use url::Url;

/// Placeholder origin used to parse a bare path.
const PATH_ONLY_BASE: &str = "http://path.invalid/";

/// Concatenate `base_route + base_prefix` with the segments of `path`, then
/// merge `params` and `extra` (in that order) into the query string.
///
/// Pure path and query arithmetic: nothing checks that the resulting route
/// exists. Segments are joined, not strings, so a prefix ending in `/` never
/// yields `//`.
pub fn api_v2_url_with_base(
	base_route: &str,
	base_prefix: &str,
	path: &str,
	params: Option<&QueryArgs>,
	extra: &QueryArgs,
) -> Result<String> {
	let base = format!("{base_route}{base_prefix}");
	let mut url = parse_url(&base)?;
	let segments = path_segments(path)?;

	url.path_segments_mut()
		.map_err(|_| SiteUrlError::CannotBeABase { url: base.clone() })?
		.pop_if_empty()
		.extend(segments);

	let mut query = QueryArgs::new();
	if let Some(params) = params {
		query.update(params);
	}
	query.update(extra);
	query.apply_to(&mut url);

	tracing::debug!(path = %path, url = %url, "api v2 url");
	Ok(url.into())
}

/// Decoded path segments of `path`; its query and fragment are ignored.
fn path_segments(path: &str) -> Result<Vec<String>> {
	let parsed = parse_url(PATH_ONLY_BASE)?
		.join(path)
		.map_err(|source| SiteUrlError::InvalidUrl {
			value: path.to_string(),
			source,
		})?;

	Ok(segments_of(&parsed))
}

fn segments_of(url: &Url) -> Vec<String> {
	url.path_segments()
		.map(|segments| {
			segments
				.map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
				.collect()
		})
		.unwrap_or_default()
}
