//! Service layer for the rewrite stages.
//!
//! - `scanner`: split a document into literal text and tags
//! - `locator`: find the target attribute of a tag
//! - `resolver`: merge attribute values with the base URI

pub mod locator;
pub mod resolver;
pub mod scanner;

pub use locator::{locate, target_attribute};
pub use resolver::{Resolution, resolve};
pub use scanner::{Segments, TagScanner, element_name};
