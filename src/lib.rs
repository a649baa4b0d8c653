// src/lib.rs

//! absolutify Library
//!
//! Rewrites relative `href`/`src` references in HTML fragments into absolute
//! ones against a base URL.
//!
//! ```
//! assert_eq!(
//!     absolutify::absolutify(r#"<img src="bar/baz.png">"#, "http://example.org/foo/"),
//!     r#"<img src="http://example.org/foo/bar/baz.png">"#
//! );
//! ```

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;

pub use pipeline::{Absolutifier, absolutify};
