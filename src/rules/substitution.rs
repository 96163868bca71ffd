use crate::error::{Result, SiteUrlError};
use regex::Regex;

/// A compiled pattern and its replacement, applied at most once per input.
#[derive(Debug)]
pub struct Substitution {
	/// The pattern to match.
	pub pattern: Regex,

	/// The replacement string. `${n}` refers to capture group `n`.
	pub replacement: String,
}

impl Substitution {
	/// Compile a substitution rule.
	pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
		Ok(Substitution {
			pattern: compile_regex(pattern)?,
			replacement: replacement.into(),
		})
	}

	/// Replace the leftmost match, if any.
	pub fn apply(&self, input: &str) -> String {
		self.pattern
			.replacen(input, 1, self.replacement.as_str())
			.into_owned()
	}

	pub fn is_match(&self, input: &str) -> bool {
		self.pattern.is_match(input)
	}
}

/// Compile a regex pattern string.
fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| SiteUrlError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}
