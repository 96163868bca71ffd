use crate::error::Result;
use crate::rules::substitution::Substitution;

/// Ordered GUID rewrite rules.
///
/// Each rule strips a prefix only when the next segment looks like an
/// object id (5+ ASCII alphanumerics). The id segment is captured and put
/// back, so it is never consumed.
const GUID_RULES: [(&str, &str); 3] = [
	// `/project/<pid>/node/<nid>...` -> `/<nid>...`
	(r"^/project/[a-zA-Z0-9]{5,}/node(/[a-zA-Z0-9]{5,})", "${1}"),
	// `/project/<pid>...` -> `/<pid>...`
	(r"^/project(/[a-zA-Z0-9]{5,})", "${1}"),
	// `/profile/<uid>...` -> `/<uid>...`
	(r"^/profile(/[a-zA-Z0-9]{5,})", "${1}"),
];

/// Rewrites nested project/node/profile paths into short GUID paths.
#[derive(Debug)]
pub struct GuidRewriter {
	rules: Vec<Substitution>,
}

impl GuidRewriter {
	pub fn new() -> Result<Self> {
		let rules = GUID_RULES
			.iter()
			.map(|(pattern, replacement)| Substitution::new(pattern, *replacement))
			.collect::<Result<Vec<_>>>()?;
		Ok(GuidRewriter { rules })
	}

	/// Apply every rule in order, each at most once, to the output of the
	/// previous one. Rules do not short-circuit: a node id that itself reads
	/// `project` or `profile` is stripped again by the later rules.
	pub fn rewrite(&self, url: &str) -> String {
		let rewritten = self
			.rules
			.iter()
			.fold(url.to_string(), |current, rule| rule.apply(&current));

		if rewritten != url {
			tracing::debug!(from = %url, to = %rewritten, "guid rewrite");
		}
		rewritten
	}
}
