//! Siteurl - URL construction helpers for the web app.
//!
//! This library provides:
//! - Reverse lookup of named web and API routes into relative or absolute URLs
//! - Rewriting of `/project/<pid>[/node/<nid>]` and `/profile/<uid>` paths into GUID paths
//! - Assembly of v2 REST API URLs and file-storage service URLs
//! - Configuration file parsing and cascade discovery
//!
//! # Example
//!
//! ```no_run
//! use siteurl::config::load_merged_config;
//! use siteurl::routing::RouteArgs;
//! use siteurl::urls::{SiteUrls, WebUrlOptions};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let config = load_merged_config(&cwd).unwrap();
//! let site = SiteUrls::from_config(&config).unwrap();
//!
//! let url = site
//!     .web_url_for(
//!         "project_view",
//!         WebUrlOptions::default().guid().absolute(),
//!         &RouteArgs::new().kwarg("pid", "abcde"),
//!     )
//!     .unwrap();
//! println!("{url}");
//! ```

pub mod config;
pub mod error;
pub mod request;
pub mod routing;
pub mod rules;
pub mod urls;

pub use error::{Result, SiteUrlError};
pub use request::{RequestContext, is_json_request};
pub use urls::SiteUrls;
