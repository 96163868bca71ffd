use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use siteurl::config::{
	CONFIG_FILE_NAME, Settings, discover_configs, generate_init_template, load_merged_config,
	merge_configs, user_config_path,
};
use siteurl::routing::{RouteArgs, RouteTable};
use siteurl::urls::{
	ApiUrlOptions, QueryArgs, SessionCookieSource, SiteUrls, WebUrlOptions, api_v2_url_with_base,
};
use siteurl::{RequestContext, is_json_request};

#[derive(Parser)]
#[command(name = "siteurl")]
#[command(
	author,
	version,
	about = "Build web, API and storage service URLs from named routes"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Create a template .siteurl.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .siteurl.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Reverse lookup of an API route (JSON renderer, or XML with --xml)
	Api {
		/// View name the route is registered under
		view: String,

		#[command(flatten)]
		route: RouteArgsCli,

		/// Use the XML-rendered route
		#[arg(long)]
		xml: bool,

		#[command(flatten)]
		domain: DomainCli,
	},
	/// Reverse lookup of a web route
	Web {
		/// View name the route is registered under
		view: String,

		#[command(flatten)]
		route: RouteArgsCli,

		/// Rewrite the path into its GUID form
		#[arg(long)]
		guid: bool,

		#[command(flatten)]
		domain: DomainCli,
	},
	/// Build a v2 REST API URL
	V2 {
		/// Path below the API prefix, e.g. /nodes/abcd3/contributors/
		path: String,

		/// Query parameter (repeatable)
		#[arg(short = 'q', long = "query", value_name = "KEY=VALUE", value_parser = parse_key_val)]
		query: Vec<(String, String)>,

		/// Override the configured API domain
		#[arg(long)]
		base_route: Option<String>,

		/// Override the configured API prefix
		#[arg(long)]
		base_prefix: Option<String>,
	},
	/// Rewrite a path into its GUID form
	Guid {
		/// Path such as /project/abcde/node/fghij/wiki/home
		path: String,
	},
	/// Build a file-storage service URL
	Files {
		/// upload, delete, download, metadata or create_folder
		action: String,

		/// Storage provider, e.g. osfstorage
		provider: String,

		/// File or folder path
		path: String,

		/// GUID of the node owning the file
		#[arg(long)]
		node: String,

		/// Session cookie of the acting user
		#[arg(long)]
		user_cookie: Option<String>,

		/// Cookie sent with the current request (repeatable)
		#[arg(long = "cookie", value_name = "NAME=VALUE", value_parser = parse_key_val)]
		cookies: Vec<(String, String)>,

		/// Query string of the current request
		#[arg(long)]
		query_string: Option<String>,

		/// Extra query parameter (repeatable)
		#[arg(short = 'q', long = "query", value_name = "KEY=VALUE", value_parser = parse_key_val)]
		query: Vec<(String, String)>,
	},
	/// Exit successfully if the content type denotes a JSON request
	IsJson {
		/// Content-Type header of the request
		#[arg(long)]
		content_type: Option<String>,
	},
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display every config file and the effective settings
	Show,
	/// Check all config files for errors without building anything
	Validate,
}

#[derive(Args)]
struct RouteArgsCli {
	/// Positional route arguments
	args: Vec<String>,

	/// Keyword route argument (repeatable); unknown keys become query parameters
	#[arg(short = 'k', long = "kwarg", value_name = "KEY=VALUE", value_parser = parse_key_val)]
	kwargs: Vec<(String, String)>,
}

impl RouteArgsCli {
	fn to_route_args(&self) -> RouteArgs {
		let args = self
			.args
			.iter()
			.fold(RouteArgs::new(), |acc, value| acc.arg(value));
		self.kwargs
			.iter()
			.fold(args, |acc, (key, value)| acc.kwarg(key, value))
	}
}

#[derive(Args)]
struct DomainCli {
	/// Prefix the configured domain
	#[arg(long)]
	absolute: bool,

	/// Use the offload domain with --absolute
	#[arg(long)]
	offload: bool,
}

/// The acting user, identified only by an already issued session cookie.
struct CliUser(String);

impl SessionCookieSource for CliUser {
	fn resolve_session_cookie(&self) -> String {
		self.0.clone()
	}
}

fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
	let (key, value) = s
		.split_once('=')
		.ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
	Ok((key.to_string(), value.to_string()))
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
		)
		.with_writer(std::io::stderr)
		.init();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	if cli.init {
		return handle_init(cli.force);
	}

	let Some(command) = cli.command else {
		return Ok(ExitCode::SUCCESS);
	};

	match command {
		Commands::Api {
			view,
			route,
			xml,
			domain,
		} => {
			let options = ApiUrlOptions {
				absolute: domain.absolute,
				offload: domain.offload,
				xml,
			};
			let url = load_site()?
				.api_url_for(&view, options, &route.to_route_args())
				.with_context(|| format!("Failed to build API URL for {view}"))?;
			print_url(&url)
		}
		Commands::Web {
			view,
			route,
			guid,
			domain,
		} => {
			let options = WebUrlOptions {
				absolute: domain.absolute,
				offload: domain.offload,
				guid,
			};
			let url = load_site()?
				.web_url_for(&view, options, &route.to_route_args())
				.with_context(|| format!("Failed to build web URL for {view}"))?;
			print_url(&url)
		}
		Commands::V2 {
			path,
			query,
			base_route,
			base_prefix,
		} => handle_v2(&path, query, base_route, base_prefix),
		Commands::Guid { path } => print_url(&load_site()?.guid_url_for(&path)),
		Commands::Files {
			action,
			provider,
			path,
			node,
			user_cookie,
			cookies,
			query_string,
			query,
		} => {
			let mut request = cookies
				.into_iter()
				.fold(RequestContext::new(), |acc, (name, value)| {
					acc.with_cookie(name, value)
				});
			if let Some(qs) = query_string {
				request = request.with_query_string(&qs);
			}
			let user = user_cookie.map(CliUser);
			let query: QueryArgs = query.into_iter().collect();

			let url = load_site()?
				.waterbutler_url_for(
					&action,
					&provider,
					&path,
					node.as_str(),
					user.as_ref().map(|u| u as &dyn SessionCookieSource),
					&request,
					&query,
				)
				.with_context(|| format!("Failed to build storage URL for {action}"))?;
			print_url(&url)
		}
		Commands::IsJson { content_type } => {
			let request = match content_type {
				Some(ct) => RequestContext::new().with_content_type(ct),
				None => RequestContext::new(),
			};
			let json = is_json_request(&request);
			println!("{json}");
			Ok(if json {
				ExitCode::SUCCESS
			} else {
				ExitCode::FAILURE
			})
		}
		Commands::Config { action } => match action {
			ConfigAction::Show => handle_config_show(),
			ConfigAction::Validate => handle_config_validate(),
		},
	}
}

fn load_site() -> Result<SiteUrls> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let config = load_merged_config(&cwd).context("Failed to load configuration")?;
	SiteUrls::from_config(&config).context("Invalid configuration")
}

fn print_url(url: &str) -> Result<ExitCode> {
	println!("{url}");
	Ok(ExitCode::SUCCESS)
}

fn handle_v2(
	path: &str,
	query: Vec<(String, String)>,
	base_route: Option<String>,
	base_prefix: Option<String>,
) -> Result<ExitCode> {
	let site = load_site()?;
	let settings = site.settings();
	let params: QueryArgs = query.into_iter().collect();

	let url = api_v2_url_with_base(
		base_route.as_deref().unwrap_or(&settings.api_domain),
		base_prefix.as_deref().unwrap_or(&settings.api_prefix),
		path,
		Some(&params),
		&QueryArgs::new(),
	)
	.with_context(|| format!("Failed to build API v2 URL for {path}"))?;
	print_url(&url)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs = discover_configs(&cwd).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
	} else {
		println!("Configuration files (in cascade order):\n");
	}

	for loaded in &configs {
		let config = &loaded.config;
		println!("# Source: {}", loaded.path.display());
		println!("# root: {}", config.root);
		println!("# no-external-lookup: {}", config.no_external_lookup);
		if let Some(ref env_var) = config.root_config_lookup_disable_env_var {
			println!("# root-config-lookup-disable-env-var: {}", env_var);
		}
		let overrides = [
			("domain", &config.settings.domain),
			("offload-domain", &config.settings.offload_domain),
			("api-domain", &config.settings.api_domain),
			("api-prefix", &config.settings.api_prefix),
			("waterbutler-url", &config.settings.waterbutler_url),
			("cookie-name", &config.settings.cookie_name),
		];
		for (key, value) in overrides {
			if let Some(value) = value {
				println!("# {key}: {value}");
			}
		}
		println!("# routes: {}", config.routes.len());
		println!();

		for route in &config.routes {
			println!("  {} -> {}", route.qualified_name(), route.rule);
		}
		if !config.routes.is_empty() {
			println!();
		}
	}

	let settings = Settings::resolve(&merge_configs(&configs)).context("Invalid configuration")?;
	println!("Effective settings:");
	println!("  domain: {}", settings.domain);
	println!("  offload-domain: {}", settings.offload_domain);
	println!("  api-domain: {}", settings.api_domain);
	println!("  api-prefix: {}", settings.api_prefix);
	println!("  waterbutler-url: {}", settings.waterbutler_url);
	println!("  cookie-name: {}", settings.cookie_name);
	println!();

	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	let checked = discover_configs(&cwd).and_then(|configs| {
		let merged = merge_configs(&configs);
		Settings::resolve(&merged)?;
		RouteTable::from_config(&merged)?;
		Ok(configs)
	});

	match checked {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!(
						"  {} ({} routes)",
						loaded.path.display(),
						loaded.config.routes.len()
					);
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}
