//! Attribute locating service.
//!
//! Finds the URI-bearing attribute of a recognized element inside one tag.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{AttributeMatch, Quote};
use crate::services::scanner::element_name;

/// Elements whose references get rewritten, and the attribute holding them.
const TARGET_ATTRIBUTES: [(&str, &str); 2] = [("a", "href"), ("img", "src")];

/// Compiled `<name>\s*=\s*` matchers, one per target attribute.
static ATTRIBUTE_MATCHERS: LazyLock<HashMap<&'static str, Regex>> = LazyLock::new(|| {
    TARGET_ATTRIBUTES
        .iter()
        .map(|&(_, attribute)| {
            let pattern = format!(r"(?i){}\s*=\s*", regex::escape(attribute));
            let matcher = Regex::new(&pattern).expect("attribute regex is valid");
            (attribute, matcher)
        })
        .collect()
});

/// Target attribute for an element name, compared case-insensitively.
pub fn target_attribute(element: &str) -> Option<&'static str> {
    TARGET_ATTRIBUTES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(element))
        .map(|&(_, attribute)| attribute)
}

/// Locate the target attribute of a tag.
///
/// Returns `None` for elements outside the target table, tags without the
/// attribute, empty values and quoted values that never close.
pub fn locate(tag: &str) -> Option<AttributeMatch<'_>> {
    let element = element_name(tag)?;
    let attribute = target_attribute(&element)?;
    let matcher = ATTRIBUTE_MATCHERS.get(attribute)?;
    split_assignment(tag, matcher)
}

fn split_assignment<'t>(tag: &'t str, matcher: &Regex) -> Option<AttributeMatch<'t>> {
    // Right-most assignment wins when the name shows up more than once.
    let assignment = matcher.find_iter(tag).last()?;
    let body_end = tag.strip_suffix('>').map_or(tag.len(), str::len);
    let rest = tag.get(assignment.end()..body_end)?;
    let quote = rest.chars().next().map_or(Quote::None, Quote::from_char);

    let (value_start, value_end) = match quote.as_char() {
        Some(q) => {
            let start = assignment.end() + q.len_utf8();
            let len = tag[start..].find(q)?;
            (start, start + len)
        }
        None => {
            let len = rest.find(char::is_whitespace).unwrap_or_else(|| {
                rest.strip_suffix('/').map_or(rest.len(), str::len)
            });
            (assignment.end(), assignment.end() + len)
        }
    };

    if value_start == value_end {
        return None;
    }

    Some(AttributeMatch {
        prefix: &tag[..value_start],
        value: &tag[value_start..value_end],
        suffix: &tag[value_end..],
        quote,
    })
}
