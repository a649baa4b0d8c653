// src/models/tag.rs

//! Pieces of a scanned document: segments and attribute matches.

/// One piece of a scanned document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside of any tag, passed through as-is
    Literal(&'a str),
    /// A tag candidate, from `<` through `>`
    Tag(&'a str),
}

impl<'a> Segment<'a> {
    /// The raw text of the segment.
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Literal(text) | Segment::Tag(text) => *text,
        }
    }
}

/// Quoting style of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Double,
    Single,
    None,
}

impl Quote {
    /// Classify the character that follows `=`.
    pub fn from_char(c: char) -> Self {
        match c {
            '"' => Quote::Double,
            '\'' => Quote::Single,
            _ => Quote::None,
        }
    }

    /// The quote character, if any.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Quote::Double => Some('"'),
            Quote::Single => Some('\''),
            Quote::None => None,
        }
    }
}

/// The target attribute of a tag, split around its value.
///
/// `prefix + value + suffix` is always the original tag text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeMatch<'a> {
    /// Tag text up to and including the opening quote
    pub prefix: &'a str,

    /// Raw attribute content
    pub value: &'a str,

    /// Closing quote (if any) and the rest of the tag
    pub suffix: &'a str,

    /// Quoting style of the value
    pub quote: Quote,
}

impl AttributeMatch<'_> {
    /// Reassemble the tag with a replacement value.
    pub fn rebuild(&self, value: &str) -> String {
        let mut tag = String::with_capacity(self.prefix.len() + value.len() + self.suffix.len());
        tag.push_str(self.prefix);
        tag.push_str(value);
        tag.push_str(self.suffix);
        tag
    }
}
