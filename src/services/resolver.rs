//! URI resolution service.
//!
//! Decides whether an attribute value needs the base URI and merges it if so.

use crate::error::{AppError, Result};
use crate::models::{BaseUri, Reference};

/// Outcome of resolving one attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The value was merged with the base
    Merged(String),
    /// The value is already absolute, or opaque (`mailto:...`)
    Unchanged,
}

/// Resolve an attribute value against the base URI.
///
/// - no scheme: merged with the base as-is
/// - scheme and authority: left alone
/// - scheme, no authority, rooted path (`http:/x?y#z`): path, query and
///   fragment are merged with the base, taking the base's scheme and host
/// - scheme, no authority, unrooted path: left alone
///
/// Merging follows RFC 3986 (5.2.2) over the raw reference text: only literal
/// `.` and `..` segments are removed and nothing is re-encoded. A value that is
/// not a URI reference is an error; so is a merge without a base.
pub fn resolve(value: &str, base: Option<&BaseUri>) -> Result<Resolution> {
    let reference = Reference::parse(value)?;

    if reference.has_scheme() && (reference.has_authority() || !reference.is_hierarchical()) {
        return Ok(Resolution::Unchanged);
    }
    merge(base, &reference)
}

fn merge(base: Option<&BaseUri>, reference: &Reference<'_>) -> Result<Resolution> {
    let base = base.ok_or(AppError::MissingBase)?;
    Ok(Resolution::Merged(base.merge(reference)))
}
