//! Tag scanning service.
//!
//! Splits a document into literal text and tag candidates without parsing
//! HTML. A `>` inside a quoted attribute value ends the tag early; the grammar
//! is kept that simple on purpose.

use std::sync::LazyLock;

use regex::{Match, Matches, Regex};

use crate::models::Segment;

/// `<`, one non-whitespace character, anything but `>`, optional `/`, `>`.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\S[^>]*/?>").expect("tag regex is valid"));

/// Scanner producing [`Segment`]s in document order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagScanner;

impl TagScanner {
    pub fn new() -> Self {
        Self
    }

    /// Iterate over the segments of `text`. Each call starts from the beginning.
    pub fn segments<'t>(&self, text: &'t str) -> Segments<'t> {
        Segments {
            text,
            matches: TAG.find_iter(text),
            pos: 0,
            pending: None,
        }
    }
}

/// Lazy iterator over literal and tag segments.
///
/// Concatenating every yielded segment gives back the input exactly.
pub struct Segments<'t> {
    text: &'t str,
    matches: Matches<'static, 't>,
    pos: usize,
    pending: Option<Match<'t>>,
}

impl<'t> Iterator for Segments<'t> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(tag) = self.pending.take() {
            self.pos = tag.end();
            return Some(Segment::Tag(tag.as_str()));
        }

        match self.matches.next() {
            Some(tag) if tag.start() > self.pos => {
                let literal = &self.text[self.pos..tag.start()];
                self.pos = tag.start();
                self.pending = Some(tag);
                Some(Segment::Literal(literal))
            }
            Some(tag) => {
                self.pos = tag.end();
                Some(Segment::Tag(tag.as_str()))
            }
            None if self.pos < self.text.len() => {
                let literal = &self.text[self.pos..];
                self.pos = self.text.len();
                Some(Segment::Literal(literal))
            }
            None => None,
        }
    }
}

/// Element name of a tag, lowercased.
///
/// The name is the run of non-whitespace characters right after `<`, so
/// `<a>` gives `a>` and `</a>` gives `/a>`.
pub fn element_name(tag: &str) -> Option<String> {
    let rest = tag.strip_prefix('<')?;
    let name = rest.split(char::is_whitespace).next()?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_lowercase())
    }
}
