/// Template written by `siteurl --init`.
pub fn generate_init_template() -> String {
	r#"# siteurl configuration
#
# Stop looking for .siteurl.toml files in parent directories.
root = true

# Base domains for absolute URLs. The offload domain is used on request.
domain = "http://localhost:5000/"
offload-domain = "http://localhost:5001/"

# v2 REST API location: api-domain + api-prefix.
api-domain = "http://localhost:8000/"
api-prefix = "v2/"

# File-storage service and the session cookie forwarded to it.
waterbutler-url = "http://localhost:7777"
cookie-name = "osf"

# Routes are looked up by renderer ("json", "xml" or "web") and view name.
# Placeholders: <name>, <string:name>, <path:name>, <int:name>.
[[routes]]
renderer = "web"
view = "project_view"
rule = "/project/<pid>/"

[[routes]]
renderer = "web"
view = "project_wiki_view"
rule = "/project/<pid>/node/<nid>/wiki/<wname>/"

[[routes]]
renderer = "json"
view = "project_files"
rule = "/api/v1/project/<pid>/files/<path:path>"
"#
	.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parser::parse_config_str;
	use std::path::PathBuf;

	#[test]
	fn test_template_is_valid_config() {
		let config =
			parse_config_str(&generate_init_template(), &PathBuf::from("template.toml")).unwrap();

		assert!(config.root);
		assert_eq!(config.routes.len(), 3);
		assert_eq!(config.settings.cookie_name.as_deref(), Some("osf"));
	}
}
