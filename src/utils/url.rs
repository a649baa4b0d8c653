// src/utils/url.rs

//! URI reference syntax helpers.

use std::sync::LazyLock;

use regex::Regex;

/// Generic URI reference splitter (RFC 3986, Appendix B). Matches any input.
static REFERENCE_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
        .expect("reference splitter regex is valid")
});

static SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").expect("scheme regex is valid")
});

/// Raw components of a URI reference, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceParts<'a> {
    pub scheme: Option<&'a str>,
    pub authority: Option<&'a str>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

/// Split a URI reference into its components without validating them.
///
/// # Examples
/// ```
/// use absolutify::utils::url::split_reference;
///
/// let parts = split_reference("http:/bar/baz.png?muga#here").unwrap();
/// assert_eq!(parts.scheme, Some("http"));
/// assert_eq!(parts.authority, None);
/// assert_eq!(parts.path, "/bar/baz.png");
/// assert_eq!(parts.query, Some("muga"));
/// assert_eq!(parts.fragment, Some("here"));
/// ```
pub fn split_reference(reference: &str) -> Option<ReferenceParts<'_>> {
    let caps = REFERENCE_PARTS.captures(reference)?;
    Some(ReferenceParts {
        scheme: caps.get(1).map(|m| m.as_str()),
        authority: caps.get(2).map(|m| m.as_str()),
        path: caps.get(3).map_or("", |m| m.as_str()),
        query: caps.get(4).map(|m| m.as_str()),
        fragment: caps.get(5).map(|m| m.as_str()),
    })
}

/// Check a scheme name against `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
pub fn is_valid_scheme(scheme: &str) -> bool {
    SCHEME.is_match(scheme)
}

/// Find the first character that may not appear in a URI component.
///
/// Square brackets are only legal inside an authority (IP literals).
pub fn illegal_char(component: &str, allow_brackets: bool) -> Option<char> {
    component.chars().find(|&c| match c {
        'A'..='Z' | 'a'..='z' | '0'..='9' => false,
        '-' | '.' | '_' | '~' => false,
        ':' | '/' | '?' | '#' | '@' => false,
        '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=' | '%' => false,
        '[' | ']' => !allow_brackets,
        _ => true,
    })
}

/// Whether a `%` is not followed by two hex digits.
pub fn has_malformed_escape(component: &str) -> bool {
    let bytes = component.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}

/// Merge a relative path with the base path (RFC 3986, 5.2.3).
pub fn merge_paths(base_has_authority: bool, base_path: &str, reference_path: &str) -> String {
    if base_has_authority && base_path.is_empty() {
        return format!("/{reference_path}");
    }
    match base_path.rfind('/') {
        Some(idx) => format!("{}{}", &base_path[..=idx], reference_path),
        None => reference_path.to_string(),
    }
}

/// Remove literal `.` and `..` segments from a path (RFC 3986, 5.2.4).
///
/// Percent-encoded dots (`%2e`) are ordinary segment text.
///
/// # Examples
/// ```
/// use absolutify::utils::url::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/foo/hoge/../bar/./baz.png"), "/foo/bar/baz.png");
/// assert_eq!(remove_dot_segments("/foo/%2e%2e/x"), "/foo/%2e%2e/x");
/// ```
pub fn remove_dot_segments(path: &str) -> String {
    let mut input = path;
    let mut output = String::with_capacity(path.len());

    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("../") {
            input = rest;
        } else if let Some(rest) = input.strip_prefix("./") {
            input = rest;
        } else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/../") {
            input = &input[3..];
            pop_segment(&mut output);
        } else if input == "/.." {
            input = "/";
            pop_segment(&mut output);
        } else if input == "." || input == ".." {
            input = "";
        } else {
            let skip = usize::from(input.starts_with('/'));
            let end = input[skip..].find('/').map_or(input.len(), |i| i + skip);
            output.push_str(&input[..end]);
            input = &input[end..];
        }
    }
    output
}

fn pop_segment(output: &mut String) {
    let cut = output.rfind('/').unwrap_or(0);
    output.truncate(cut);
}
