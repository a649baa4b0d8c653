// src/pipeline/rewrite.rs

//! Document rewrite pipeline: scan, locate, resolve, reassemble.

use serde::Serialize;

use crate::models::{BaseUri, Segment};
use crate::services::{Resolution, TagScanner, element_name, locate, resolve, target_attribute};

/// Counters collected during one rewrite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RewriteStats {
    /// Tag segments seen
    pub tags: usize,
    /// Tags whose target attribute was found
    pub attributes: usize,
    /// Attributes rewritten to an absolute reference
    pub rewritten: usize,
    /// Attributes left alone because they were already absolute or opaque
    pub unchanged: usize,
    /// Attributes that could not be resolved and were passed through
    pub unresolvable: usize,
}

/// A rewritten document with its statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub html: String,
    pub stats: RewriteStats,
}

/// What happened to a single tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    /// Element is not one whose references get rewritten
    Passthrough,
    /// Element is targeted but carries no usable attribute
    NoAttribute,
    /// Attribute value already absolute or opaque
    Unchanged,
    /// Attribute value could not be resolved; original kept
    Unresolvable,
    /// Tag text with the resolved attribute value
    Rewritten(String),
}

/// Rewrites relative references against one base URI.
///
/// The base is parsed once on construction. An unusable base is not an error:
/// every reference that would need it is passed through.
#[derive(Debug, Clone)]
pub struct Absolutifier {
    base: Option<BaseUri>,
    scanner: TagScanner,
}

impl Absolutifier {
    pub fn new(base_url: &str) -> Self {
        let base = BaseUri::parse(base_url)
            .inspect_err(|e| log::debug!("Unusable base URL '{}': {}", base_url, e))
            .ok();
        Self {
            base,
            scanner: TagScanner::new(),
        }
    }

    pub fn with_base(base: BaseUri) -> Self {
        Self {
            base: Some(base),
            scanner: TagScanner::new(),
        }
    }

    pub fn base(&self) -> Option<&BaseUri> {
        self.base.as_ref()
    }

    /// Rewrite every `<a href>` and `<img src>` in `html`.
    pub fn rewrite(&self, html: &str) -> Rewritten {
        let mut out = String::with_capacity(html.len());
        let mut stats = RewriteStats::default();

        for segment in self.scanner.segments(html) {
            let tag = match segment {
                Segment::Literal(text) => {
                    out.push_str(text);
                    continue;
                }
                Segment::Tag(tag) => tag,
            };

            stats.tags += 1;
            match self.rewrite_tag(tag) {
                TagOutcome::Rewritten(rewritten) => {
                    stats.attributes += 1;
                    stats.rewritten += 1;
                    out.push_str(&rewritten);
                    continue;
                }
                TagOutcome::Unchanged => {
                    stats.attributes += 1;
                    stats.unchanged += 1;
                }
                TagOutcome::Unresolvable => {
                    stats.attributes += 1;
                    stats.unresolvable += 1;
                }
                TagOutcome::Passthrough | TagOutcome::NoAttribute => {}
            }
            out.push_str(tag);
        }

        log::debug!(
            "Rewrote {} of {} attributes in {} tags",
            stats.rewritten,
            stats.attributes,
            stats.tags
        );
        Rewritten { html: out, stats }
    }

    /// Decide what to do with one tag.
    pub fn rewrite_tag(&self, tag: &str) -> TagOutcome {
        let Some(attribute) = locate(tag) else {
            let targeted = element_name(tag)
                .as_deref()
                .and_then(target_attribute)
                .is_some();
            return if targeted {
                TagOutcome::NoAttribute
            } else {
                TagOutcome::Passthrough
            };
        };

        match resolve(attribute.value, self.base.as_ref()) {
            Ok(Resolution::Merged(location)) => {
                TagOutcome::Rewritten(attribute.rebuild(&location))
            }
            Ok(Resolution::Unchanged) => TagOutcome::Unchanged,
            Err(e) => {
                log::debug!("Keeping '{}' as-is: {}", attribute.value, e);
                TagOutcome::Unresolvable
            }
        }
    }
}

/// Rewrite relative `href`/`src` references in `html` against `base_url`.
///
/// Never fails; anything that cannot be resolved is left as it was.
pub fn absolutify(html: &str, base_url: &str) -> String {
    Absolutifier::new(base_url).rewrite(html).html
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://example.org/foo/";

    #[test]
    fn test_simple_img() {
        assert_eq!(
            absolutify(r#"<img src="bar/baz.png">"#, BASE),
            r#"<img src="http://example.org/foo/bar/baz.png">"#
        );
        assert_eq!(
            absolutify("<img src='bar/baz.png'>", BASE),
            "<img src='http://example.org/foo/bar/baz.png'>"
        );
        assert_eq!(
            absolutify("<img src=bar/baz.png>", BASE),
            "<img src=http://example.org/foo/bar/baz.png>"
        );
    }

    #[test]
    fn test_simple_a() {
        assert_eq!(
            absolutify(r#"<a href="bar/baz.png">"#, BASE),
            r#"<a href="http://example.org/foo/bar/baz.png">"#
        );
        assert_eq!(
            absolutify("<a href='bar/baz.png'>", BASE),
            "<a href='http://example.org/foo/bar/baz.png'>"
        );
        assert_eq!(
            absolutify("<a href=bar/baz.png>", BASE),
            "<a href=http://example.org/foo/bar/baz.png>"
        );
    }

    #[test]
    fn test_parent() {
        assert_eq!(
            absolutify(r#"<img src="../bar/baz.png">"#, "http://example.org/foo/hoge/"),
            r#"<img src="http://example.org/foo/bar/baz.png">"#
        );
    }

    #[test]
    fn test_with_query_and_fragment() {
        assert_eq!(
            absolutify(r#"<img src="bar/baz.png?muga#here">"#, BASE),
            r#"<img src="http://example.org/foo/bar/baz.png?muga#here">"#
        );
    }

    #[test]
    fn test_scheme_without_host() {
        assert_eq!(
            absolutify(r#"<img src="http:/bar/baz.png?muga#here">"#, BASE),
            r#"<img src="http://example.org/bar/baz.png?muga#here">"#
        );
        assert_eq!(
            absolutify(r#"<img src="http:/bar/baz.png?muga">"#, BASE),
            r#"<img src="http://example.org/bar/baz.png?muga">"#
        );
        assert_eq!(
            absolutify(r#"<img src="http:/bar/baz.png#here">"#, BASE),
            r#"<img src="http://example.org/bar/baz.png#here">"#
        );
        assert_eq!(
            absolutify(r#"<img src="http:/foo/bar/baz.png">"#, BASE),
            r#"<img src="http://example.org/foo/bar/baz.png">"#
        );
    }

    #[test]
    fn test_other_attributes_kept() {
        assert_eq!(
            absolutify(
                r#"<img class="photo" src="bar/baz.png" alt="baz">"#,
                BASE
            ),
            r#"<img class="photo" src="http://example.org/foo/bar/baz.png" alt="baz">"#
        );
    }

    #[test]
    fn test_capitalized() {
        assert_eq!(
            absolutify(r#"<IMG SRC="bar/baz.png">"#, BASE),
            r#"<IMG SRC="http://example.org/foo/bar/baz.png">"#
        );
    }

    #[test]
    fn test_img_with_other_tags() {
        assert_eq!(
            absolutify(
                r#"<p><img class="right" src="bar/baz.png">hello world</p>"#,
                BASE
            ),
            r#"<p><img class="right" src="http://example.org/foo/bar/baz.png">hello world</p>"#
        );
    }

    #[test]
    fn test_new_line_inside_tag() {
        let html = "<a href=\"http://www.example.com/foo/\"><img class=\"left\"\nsrc=\"http://www.example.com/foo.png\"></a>\n";
        assert_eq!(absolutify(html, BASE), html);
    }

    #[test]
    fn test_white_space_around_equal_sign() {
        let absolute = r#"<img class = "left" src = "http://www.example.com/foo.png"></a>"#;
        assert_eq!(absolutify(absolute, BASE), absolute);
        assert_eq!(
            absolutify(r#"<img class = "left" src = "bar.png"></a>"#, BASE),
            r#"<img class = "left" src = "http://example.org/foo/bar.png"></a>"#
        );
    }

    #[test]
    fn test_without_attributes_to_be_replaced() {
        let html = r#"<a name="2009/07/19">foo</a>"#;
        assert_eq!(absolutify(html, BASE), html);
    }

    #[test]
    fn test_not_url() {
        let html = r#"<img src="this is not a valid path">"#;
        assert_eq!(absolutify(html, BASE), html);
    }

    #[test]
    fn test_opaque_scheme() {
        let html = r#"fuga<a href="foo:bar://baz">hoge</a>moga"#;
        assert_eq!(absolutify(html, BASE), html);
    }

    #[test]
    fn test_encode() {
        assert_eq!(
            absolutify(r#"<img src="bar/baz.png">"#, "http://example.org/f\"oo/"),
            r#"<img src="http://example.org/f%22oo/bar/baz.png">"#
        );
    }

    #[test]
    fn test_unparseable_base_passes_through() {
        let html = r#"<img src="bar/baz.png"><a href="http://example.com/">x</a>"#;
        assert_eq!(absolutify(html, "not a base"), html);
        assert_eq!(absolutify(html, ""), html);
    }

    #[test]
    fn test_other_elements_untouched() {
        let html = r#"<link href="style.css"><script src="app.js"></script><div data-src="x">"#;
        assert_eq!(absolutify(html, BASE), html);
    }

    #[test]
    fn test_slash_after_element_name_untouched() {
        let html = r#"<img/src="a.png"><a/href="b.html">b</a>"#;
        assert_eq!(absolutify(html, BASE), html);
    }

    #[test]
    fn test_encoded_dots_kept() {
        assert_eq!(
            absolutify(r#"<a href="%2e%2e/x">"#, BASE),
            r#"<a href="http://example.org/foo/%2e%2e/x">"#
        );
    }

    #[test]
    fn test_network_path_authority_kept() {
        assert_eq!(
            absolutify(r#"<a href="//Example.COM:80/x">"#, BASE),
            r#"<a href="http://Example.COM:80/x">"#
        );
    }

    #[test]
    fn test_apostrophe_in_query_kept() {
        assert_eq!(
            absolutify(r#"<a href="a?it's">"#, BASE),
            r#"<a href="http://example.org/foo/a?it's">"#
        );
    }

    #[test]
    fn test_second_pass_is_noop() {
        let html = r#"<p><a href="/">top</a> <img src='../p/1.jpg' alt=x> <a href=b.html>b</a></p>"#;
        let once = absolutify(html, BASE);
        assert_eq!(absolutify(&once, BASE), once);
        assert_ne!(once, html);
    }

    #[test]
    fn test_real_data_converges() {
        let base = "http://zunda.freeshell.org/d/";
        let relative = concat!(
            "<div class=\"weather\"><a href=\"http://weather.noaa.gov/weather/current/PHTO.html\">",
            "<span class=\"condition\">晴</span></a></div>\n",
            "<p><a href=\"/\">Free Software Foundation</a>から郵便が届いた。",
            "<a href=\"/blogs/membership/bootablemembership\">ブータブルな会員証</a></p>",
            "<div align=\"center\"><img class=\"photo\" src=\"../p/20090817_0.jpg\" alt=\"gNewSense\" width=\"256\" height=\"192\"></div>",
            "<p><a href=\"http:/docomomo/\">DocoMomo</a>は便利♪</p>",
        );
        let absolute = concat!(
            "<div class=\"weather\"><a href=\"http://weather.noaa.gov/weather/current/PHTO.html\">",
            "<span class=\"condition\">晴</span></a></div>\n",
            "<p><a href=\"http://zunda.freeshell.org/\">Free Software Foundation</a>から郵便が届いた。",
            "<a href=\"http://zunda.freeshell.org/blogs/membership/bootablemembership\">ブータブルな会員証</a></p>",
            "<div align=\"center\"><img class=\"photo\" src=\"http://zunda.freeshell.org/p/20090817_0.jpg\" alt=\"gNewSense\" width=\"256\" height=\"192\"></div>",
            "<p><a href=\"http://zunda.freeshell.org/docomomo/\">DocoMomo</a>は便利♪</p>",
        );
        assert_eq!(absolutify(relative, base), absolutify(absolute, base));
        assert_eq!(absolutify(absolute, base), absolute);
    }

    #[test]
    fn test_rewrite_stats() {
        let absolutifier = Absolutifier::new(BASE);
        let rewritten = absolutifier.rewrite(
            r#"<p><a href="a.html">a</a><a name="x"></a><img src="http://h/i.png"><img src="a b"></p>"#,
        );
        assert_eq!(
            rewritten.stats,
            RewriteStats {
                tags: 8,
                attributes: 3,
                rewritten: 1,
                unchanged: 1,
                unresolvable: 1,
            }
        );
    }

    #[test]
    fn test_rewrite_stats_json() {
        let stats = Absolutifier::new(BASE).rewrite("<a href=x>").stats;
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["tags"], 1);
        assert_eq!(json["rewritten"], 1);
        assert_eq!(json["unresolvable"], 0);
    }

    #[test]
    fn test_rewrite_tag_outcomes() {
        let absolutifier = Absolutifier::new(BASE);
        assert_eq!(absolutifier.rewrite_tag("<p>"), TagOutcome::Passthrough);
        assert_eq!(
            absolutifier.rewrite_tag("<a name=\"x\">"),
            TagOutcome::NoAttribute
        );
        assert_eq!(
            absolutifier.rewrite_tag("<a href=\"mailto:x@example.org\">"),
            TagOutcome::Unchanged
        );
        assert_eq!(
            absolutifier.rewrite_tag("<img src=\"%zz\">"),
            TagOutcome::Unresolvable
        );
        assert_eq!(
            absolutifier.rewrite_tag("<img src=\"x.png\">"),
            TagOutcome::Rewritten("<img src=\"http://example.org/foo/x.png\">".to_string())
        );
    }

    #[test]
    fn test_without_base_relative_is_unresolvable() {
        let absolutifier = Absolutifier::new("relative/only");
        assert!(absolutifier.base().is_none());
        assert_eq!(
            absolutifier.rewrite_tag("<img src=\"x.png\">"),
            TagOutcome::Unresolvable
        );
    }

    #[test]
    fn test_with_base() {
        let base = BaseUri::parse("https://example.net/a/b").unwrap();
        let absolutifier = Absolutifier::with_base(base);
        assert_eq!(
            absolutifier.rewrite("<a href=c>").html,
            "<a href=https://example.net/a/c>"
        );
    }
}
