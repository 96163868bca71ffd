use url::Url;

/// Ordered query parameters with last-write-wins updates.
///
/// Setting an existing key replaces its value where it first appeared and
/// drops any repeats, so the serialized order stays stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs(Vec<(String, String)>);

impl QueryArgs {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder form of [`QueryArgs::set`].
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.set(key, value);
		self
	}

	pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		let value = value.into();

		match self.0.iter().position(|(k, _)| *k == key) {
			Some(index) => {
				self.0[index].1 = value;
				let mut seen = false;
				self.0.retain(|(k, _)| {
					if *k != key {
						return true;
					}
					let keep = !seen;
					seen = true;
					keep
				});
			}
			None => self.0.push((key, value)),
		}
	}

	/// Set every pair of `other`, in order.
	pub fn update(&mut self, other: &QueryArgs) {
		for (key, value) in other.iter() {
			self.set(key, value);
		}
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Merge these args over the query `url` already carries and write the
	/// result back, percent-encoded. An empty result clears the query.
	pub(crate) fn apply_to(&self, url: &mut Url) {
		let mut merged: QueryArgs = url.query_pairs().into_owned().collect();
		merged.update(self);

		if merged.is_empty() {
			url.set_query(None);
		} else {
			url.query_pairs_mut().clear().extend_pairs(merged.iter());
		}
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryArgs {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut args = QueryArgs::new();
		for (key, value) in iter {
			args.set(key, value);
		}
		args
	}
}
