// src/models/mod.rs

//! Domain models for the absolutify crate.
//!
//! This module contains the data structures used throughout the crate,
//! organized by their primary purpose.

mod config;
mod tag;
mod uri;

// Re-export all public types
pub use config::{Config, LoggingConfig, RewriteConfig};
pub use tag::{AttributeMatch, Quote, Segment};
pub use uri::{BaseUri, Reference};
