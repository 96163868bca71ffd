use crate::error::{Result, SiteUrlError};
use crate::request::RequestContext;
use crate::urls::{QueryArgs, SiteUrls};
use std::fmt;
use std::str::FromStr;

/// File operation understood by the storage service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageAction {
	Upload,
	Delete,
	Download,
	Metadata,
	CreateFolder,
}

impl StorageAction {
	pub const ALL: [StorageAction; 5] = [
		StorageAction::Upload,
		StorageAction::Delete,
		StorageAction::Download,
		StorageAction::Metadata,
		StorageAction::CreateFolder,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			StorageAction::Upload => "upload",
			StorageAction::Delete => "delete",
			StorageAction::Download => "download",
			StorageAction::Metadata => "metadata",
			StorageAction::CreateFolder => "create_folder",
		}
	}

	/// Path segment on the storage service serving this action.
	pub fn segment(self) -> &'static str {
		match self {
			StorageAction::Metadata => "data",
			StorageAction::Upload
			| StorageAction::Delete
			| StorageAction::Download
			| StorageAction::CreateFolder => "file",
		}
	}
}

impl FromStr for StorageAction {
	type Err = SiteUrlError;

	fn from_str(s: &str) -> Result<Self> {
		StorageAction::ALL
			.into_iter()
			.find(|action| action.as_str() == s)
			.ok_or_else(|| SiteUrlError::UnknownStorageAction {
				action: s.to_string(),
			})
	}
}

impl fmt::Display for StorageAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Anything addressed by a stable GUID, e.g. a project or component.
pub trait HasGuid {
	fn guid(&self) -> &str;
}

impl HasGuid for str {
	fn guid(&self) -> &str {
		self
	}
}

impl HasGuid for String {
	fn guid(&self) -> &str {
		self
	}
}

/// A user that can hand out a session cookie for the storage service.
pub trait SessionCookieSource {
	/// Return the user's session cookie, creating the session if needed.
	fn resolve_session_cookie(&self) -> String;
}

impl SiteUrls {
	/// Build a storage-service URL for `action` on `path` of `node`.
	///
	/// The session cookie comes from `user` when given, else from the request's
	/// configured cookie. A `view_only` request argument is forwarded. `query`
	/// is applied last and overrides any computed parameter.
	#[allow(clippy::too_many_arguments)]
	pub fn waterbutler_url_for<N: HasGuid + ?Sized>(
		&self,
		action: &str,
		provider: &str,
		path: &str,
		node: &N,
		user: Option<&dyn SessionCookieSource>,
		request: &RequestContext,
		query: &QueryArgs,
	) -> Result<String> {
		let action: StorageAction = action.parse()?;

		let mut url = self.settings.waterbutler_url.clone();
		url.path_segments_mut()
			.map_err(|_| SiteUrlError::CannotBeABase {
				url: self.settings.waterbutler_url.to_string(),
			})?
			.pop_if_empty()
			.push(action.segment());

		let mut args = QueryArgs::new()
			.with("path", path)
			.with("nid", node.guid())
			.with("provider", provider);

		if let Some(user) = user {
			args.set("cookie", user.resolve_session_cookie());
		} else if let Some(cookie) = request.cookie(&self.settings.cookie_name) {
			args.set("cookie", cookie);
		}

		if let Some(view_only) = request.arg("view_only") {
			args.set("view_only", view_only);
		}

		args.update(query);
		args.apply_to(&mut url);

		tracing::debug!(%action, provider = %provider, node = %node.guid(), "storage url");
		Ok(url.into())
	}
}
