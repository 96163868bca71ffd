//! Routing table and reverse lookup.
//!
//! Routes are registered under a view name qualified by the renderer tag,
//! e.g. `JSONRenderer__project_view`, and are turned back into relative URLs
//! by filling their template placeholders.

pub mod args;
pub mod rule;
pub mod table;

pub use args::RouteArgs;
pub use rule::{Converter, RouteRule};
pub use table::{Renderer, RouteTable};
