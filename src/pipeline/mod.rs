//! Pipeline entry points for rewrite operations.
//!
//! - `absolutify`: one-shot rewrite of an HTML fragment
//! - `Absolutifier`: reusable rewriter bound to one base URI

pub mod rewrite;

pub use rewrite::{Absolutifier, RewriteStats, Rewritten, TagOutcome, absolutify};
