/// Arguments used to fill a route template.
///
/// Keyword arguments are matched to placeholders by name; positional ones
/// fill whatever placeholders remain, in template order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteArgs {
	positional: Vec<String>,
	keywords: Vec<(String, String)>,
}

impl RouteArgs {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a positional argument.
	pub fn arg(mut self, value: impl Into<String>) -> Self {
		self.positional.push(value.into());
		self
	}

	/// Set a keyword argument, replacing any earlier value for `name`.
	pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		let name = name.into();
		let value = value.into();
		match self.keywords.iter_mut().find(|(key, _)| *key == name) {
			Some(slot) => slot.1 = value,
			None => self.keywords.push((name, value)),
		}
		self
	}

	pub fn positional(&self) -> &[String] {
		&self.positional
	}

	pub fn keywords(&self) -> &[(String, String)] {
		&self.keywords
	}

	pub fn keyword(&self, name: &str) -> Option<&str> {
		self.keywords
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}
}
