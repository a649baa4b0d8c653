// src/models/uri.rs

//! Base URI and URI reference types.

use std::fmt;

use url::{Position, Url};

use crate::error::{AppError, Result};
use crate::utils::url::{
    ReferenceParts, has_malformed_escape, illegal_char, is_valid_scheme, merge_paths,
    remove_dot_segments, split_reference,
};

/// The absolute URI that references are resolved against.
///
/// Parsed once per rewrite and read-only afterwards. Characters that are
/// not legal in a URI (such as `"`) are percent-encoded while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUri {
    url: Url,
}

impl BaseUri {
    /// Parse a base URI. It must be absolute and hierarchical.
    pub fn parse(base: &str) -> Result<Self> {
        let url = Url::parse(base)?;
        if url.cannot_be_a_base() {
            return Err(AppError::validation(format!(
                "'{base}' cannot be used as a base URL"
            )));
        }
        Ok(Self { url })
    }

    /// The underlying parsed URL.
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    /// Authority of the base (`user@host:port`), if it has one.
    pub fn authority(&self) -> Option<&str> {
        let after_scheme = &self.url.as_str()[self.url.scheme().len()..];
        after_scheme
            .starts_with("://")
            .then(|| &self.url[Position::BeforeUsername..Position::AfterPort])
    }

    /// Merge a reference into this base (RFC 3986, 5.2.2) and serialize it.
    ///
    /// The reference's scheme is ignored; the base scheme is always used.
    /// Only literal `.` and `..` segments are removed, and the reference's
    /// authority, path, query and fragment are copied verbatim. The base
    /// query and fragment are never carried over.
    pub fn merge(&self, reference: &Reference<'_>) -> String {
        let parts = &reference.parts;
        let (authority, path) = match parts.authority {
            Some(authority) => (Some(authority), remove_dot_segments(parts.path)),
            None if parts.path.is_empty() => (self.authority(), self.url.path().to_string()),
            None if parts.path.starts_with('/') => {
                (self.authority(), remove_dot_segments(parts.path))
            }
            None => {
                let merged = merge_paths(self.authority().is_some(), self.url.path(), parts.path);
                (self.authority(), remove_dot_segments(&merged))
            }
        };

        let mut out = String::with_capacity(self.url.as_str().len() + reference.raw.len());
        out.push_str(self.url.scheme());
        out.push(':');
        if let Some(authority) = authority {
            out.push_str("//");
            out.push_str(authority);
        }
        out.push_str(&path);
        if let Some(query) = parts.query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = parts.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }
}

impl fmt::Display for BaseUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// A syntactically valid URI reference, taken verbatim from an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    raw: &'a str,
    parts: ReferenceParts<'a>,
}

impl<'a> Reference<'a> {
    /// Parse a URI reference. Nothing is decoded or normalized.
    pub fn parse(raw: &'a str) -> Result<Self> {
        let parts =
            split_reference(raw).ok_or_else(|| AppError::reference(raw, "not a URI reference"))?;

        if let Some(scheme) = parts.scheme {
            if !is_valid_scheme(scheme) {
                return Err(AppError::reference(
                    raw,
                    format!("invalid scheme '{scheme}'"),
                ));
            }
        }
        if let Some(c) = parts.authority.and_then(|a| illegal_char(a, true)) {
            return Err(AppError::reference(raw, format!("illegal character {c:?}")));
        }
        for component in [Some(parts.path), parts.query, parts.fragment]
            .into_iter()
            .flatten()
        {
            if let Some(c) = illegal_char(component, false) {
                return Err(AppError::reference(raw, format!("illegal character {c:?}")));
            }
        }
        if parts.fragment.is_some_and(|f| f.contains('#')) {
            return Err(AppError::reference(raw, "more than one '#'"));
        }
        if has_malformed_escape(raw) {
            return Err(AppError::reference(raw, "malformed percent-encoding"));
        }

        Ok(Self { raw, parts })
    }

    /// The reference exactly as written.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    pub fn scheme(&self) -> Option<&'a str> {
        self.parts.scheme
    }

    pub fn has_scheme(&self) -> bool {
        self.parts.scheme.is_some()
    }

    /// Whether the reference carries an authority (`//host`), even an empty one.
    pub fn has_authority(&self) -> bool {
        self.parts.authority.is_some()
    }

    /// Whether the path is rooted (`/...`), as opposed to opaque (`mailto:x`).
    pub fn is_hierarchical(&self) -> bool {
        self.parts.path.starts_with('/')
    }
}
