//! Path rewrite rules for siteurl.
//!
//! This module handles:
//! - Compiled single-shot regex substitutions
//! - The ordered GUID rewrite rule set

pub mod guid;
pub mod substitution;

pub use guid::GuidRewriter;
pub use substitution::Substitution;
