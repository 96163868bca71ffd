#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::Path;

const SITE_CONFIG: &str = r#"
root = true
domain = "https://osf.io/"
offload-domain = "https://files.osf.io/"
api-domain = "https://api.osf.io/"
api-prefix = "v2/"
waterbutler-url = "https://wb.osf.io"
cookie-name = "osf"

[[routes]]
renderer = "json"
view = "node_feed"
rule = "/api/v1/project/<pid>/feed/"

[[routes]]
renderer = "xml"
view = "node_feed"
rule = "/api/v1/project/<pid>/feed.xml"

[[routes]]
renderer = "web"
view = "project_wiki_view"
rule = "/project/<pid>/node/<nid>/wiki/<wname>/"
"#;

/// Command running in `dir`, with `HOME` pointed there so no user config leaks in.
fn siteurl_cmd(dir: &Path) -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("siteurl").unwrap();
	cmd.current_dir(dir).env("HOME", dir).env_remove("RUST_LOG");
	cmd
}

fn site_dir() -> tempfile::TempDir {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".siteurl.toml"), SITE_CONFIG).unwrap();
	temp_dir
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	let temp_dir = tempfile::tempdir().unwrap();
	siteurl_cmd(temp_dir.path())
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("Build web, API and storage service URLs"));
}

#[test]
fn test_no_args_shows_help() {
	let temp_dir = tempfile::tempdir().unwrap();
	siteurl_cmd(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// --init tests
// ============================================================================

#[test]
fn test_init_creates_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".siteurl.toml");

	siteurl_cmd(temp_dir.path())
		.arg("--init")
		.assert()
		.success()
		.stdout(predicate::str::contains("Created .siteurl.toml"));

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("root = true"));
	assert!(content.contains("[[routes]]"));
}

#[test]
fn test_init_fails_if_exists() {
	let temp_dir = site_dir();

	siteurl_cmd(temp_dir.path())
		.arg("--init")
		.assert()
		.failure()
		.stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_init_force_overwrites() {
	let temp_dir = site_dir();

	siteurl_cmd(temp_dir.path())
		.args(["--init", "--force"])
		.assert()
		.success();

	let content = fs::read_to_string(temp_dir.path().join(".siteurl.toml")).unwrap();
	assert!(content.contains("project_wiki_view"));
	assert!(!content.contains("node_feed"));
}

// ============================================================================
// Reverse lookup tests
// ============================================================================

#[test]
fn test_api_json_and_xml() {
	let temp_dir = site_dir();

	siteurl_cmd(temp_dir.path())
		.args(["api", "node_feed", "abcde"])
		.assert()
		.success()
		.stdout("/api/v1/project/abcde/feed/\n");

	siteurl_cmd(temp_dir.path())
		.args(["api", "node_feed", "--xml", "-k", "pid=abcde"])
		.assert()
		.success()
		.stdout("/api/v1/project/abcde/feed.xml\n");
}

#[test]
fn test_api_absolute_offload() {
	let temp_dir = site_dir();

	siteurl_cmd(temp_dir.path())
		.args(["api", "node_feed", "abcde", "--absolute", "--offload"])
		.assert()
		.success()
		.stdout("https://files.osf.io/api/v1/project/abcde/feed/\n");
}

#[test]
fn test_api_unknown_view() {
	let temp_dir = site_dir();

	siteurl_cmd(temp_dir.path())
		.args(["api", "project_wiki_view"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("JSONRenderer__project_wiki_view"));
}

#[test]
fn test_web_guid_absolute() {
	let temp_dir = site_dir();

	siteurl_cmd(temp_dir.path())
		.args([
			"web",
			"project_wiki_view",
			"-k",
			"pid=abcde",
			"-k",
			"nid=fghij",
			"-k",
			"wname=home",
			"--guid",
			"--absolute",
		])
		.assert()
		.success()
		.stdout("https://osf.io/fghij/wiki/home/\n");
}

#[test]
fn test_web_missing_argument() {
	let temp_dir = site_dir();

	siteurl_cmd(temp_dir.path())
		.args(["web", "project_wiki_view", "abcde"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Missing argument `nid`"));
}

// ============================================================================
// GUID, API v2, storage and content-type tests
// ============================================================================

#[test]
fn test_guid_rewrite() {
	let temp_dir = site_dir();

	siteurl_cmd(temp_dir.path())
		.args(["guid", "/project/abcde/wiki/home"])
		.assert()
		.success()
		.stdout("/abcde/wiki/home\n");
}

#[test]
fn test_v2_with_filter_param() {
	let temp_dir = site_dir();

	siteurl_cmd(temp_dir.path())
		.args([
			"v2",
			"/nodes/abcd3/contributors/",
			"-q",
			"filter[fullname]=bob",
		])
		.assert()
		.success()
		.stdout("https://api.osf.io/v2/nodes/abcd3/contributors/?filter%5Bfullname%5D=bob\n");
}

#[test]
fn test_v2_base_override() {
	let temp_dir = site_dir();

	siteurl_cmd(temp_dir.path())
		.args([
			"v2",
			"/users/me/",
			"--base-route",
			"http://localhost:8000/",
			"--base-prefix",
			"",
		])
		.assert()
		.success()
		.stdout("http://localhost:8000/users/me/\n");
}

#[test]
fn test_files_with_request_cookie_and_view_only() {
	let temp_dir = site_dir();

	siteurl_cmd(temp_dir.path())
		.args([
			"files",
			"upload",
			"osfstorage",
			"/abc",
			"--node",
			"abcde",
			"--cookie",
			"osf=sess1",
			"--query-string",
			"view_only=vo1",
		])
		.assert()
		.success()
		.stdout(
			"https://wb.osf.io/file?path=%2Fabc&nid=abcde&provider=osfstorage&cookie=sess1&view_only=vo1\n",
		);
}

#[test]
fn test_files_user_cookie_and_override() {
	let temp_dir = site_dir();

	siteurl_cmd(temp_dir.path())
		.args([
			"files",
			"metadata",
			"github",
			"/",
			"--node",
			"abcde",
			"--user-cookie",
			"usr",
			"--cookie",
			"osf=sess1",
			"-q",
			"provider=dropbox",
		])
		.assert()
		.success()
		.stdout("https://wb.osf.io/data?path=%2F&nid=abcde&provider=dropbox&cookie=usr\n");
}

#[test]
fn test_files_unknown_action() {
	let temp_dir = site_dir();

	siteurl_cmd(temp_dir.path())
		.args(["files", "rename", "osfstorage", "/abc", "--node", "abcde"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Unknown storage action: rename"));
}

#[test]
fn test_is_json() {
	let temp_dir = tempfile::tempdir().unwrap();

	siteurl_cmd(temp_dir.path())
		.args(["is-json", "--content-type", "application/json; charset=utf-8"])
		.assert()
		.success()
		.stdout("true\n");

	siteurl_cmd(temp_dir.path())
		.args(["is-json", "--content-type", "text/html"])
		.assert()
		.failure()
		.stdout("false\n");

	siteurl_cmd(temp_dir.path())
		.arg("is-json")
		.assert()
		.failure()
		.stdout("false\n");
}

// ============================================================================
// config subcommand tests
// ============================================================================

#[test]
fn test_defaults_without_config() {
	let temp_dir = tempfile::tempdir().unwrap();

	siteurl_cmd(temp_dir.path())
		.args(["v2", "/nodes/"])
		.assert()
		.success()
		.stdout("http://localhost:8000/v2/nodes/\n");
}

#[test]
fn test_config_validate_valid_config() {
	let temp_dir = site_dir();

	siteurl_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.success()
		.stdout(predicate::str::contains("All configuration files are valid"))
		.stdout(predicate::str::contains("(3 routes)"));
}

#[test]
fn test_config_validate_invalid_url() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".siteurl.toml"),
		"root = true\ndomain = \"not a url\"\n",
	)
	.unwrap();

	siteurl_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_config_show_displays_config() {
	let temp_dir = site_dir();

	siteurl_cmd(temp_dir.path())
		.args(["config", "show"])
		.assert()
		.success()
		.stdout(predicate::str::contains("# root: true"))
		.stdout(predicate::str::contains(
			"OsfWebRenderer__project_wiki_view -> /project/<pid>/node/<nid>/wiki/<wname>/",
		))
		.stdout(predicate::str::contains("cookie-name: osf"));
}

#[test]
fn test_nested_config_overrides_parent() {
	let temp_dir = site_dir();
	let nested = temp_dir.path().join("nested");
	fs::create_dir(&nested).unwrap();
	fs::write(
		nested.join(".siteurl.toml"),
		"domain = \"https://staging.osf.io/\"\n",
	)
	.unwrap();

	let mut cmd = assert_cmd::Command::cargo_bin("siteurl").unwrap();
	cmd.current_dir(&nested)
		.env("HOME", temp_dir.path())
		.args(["api", "node_feed", "abcde", "--absolute"])
		.assert()
		.success()
		.stdout("https://staging.osf.io/api/v1/project/abcde/feed/\n");
}
