//! Text cleanup for provider-supplied descriptions.
//!
//! BGG ships descriptions with HTML entities baked into the XML text and
//! ragged blank-line runs between paragraphs. Entities are substituted in a
//! single left-to-right pass over a fixed table, so already-unescaped
//! sequences survive: `&amp;lt;` becomes the literal `&lt;`, never `<`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Entity table, checked by prefix match at each `&`.
const ENTITIES: &[(&str, &str)] = &[
    ("&#10;", "\n"),
    ("&quot;", "\""),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&mdash;", "\u{2014}"),
    ("&ndash;", "\u{2013}"),
    ("&nbsp;", "\u{a0}"),
];

/// Greedy: one match swallows a whole run of blank-line whitespace.
static PARAGRAPH_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Unescape known entities, collapse blank-line runs to one blank line,
/// and trim surrounding whitespace.
pub fn sanitize_text(raw: &str) -> String {
    let mut unescaped = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find('&') {
        unescaped.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, replacement)) => {
                unescaped.push_str(replacement);
                rest = &rest[entity.len()..];
            }
            None => {
                unescaped.push('&');
                rest = &rest[1..];
            }
        }
    }
    unescaped.push_str(rest);

    PARAGRAPH_GAP
        .replace_all(&unescaped, "\n\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_unescape_and_blank_line_collapse() {
        let raw = "Foo &quot;Bar&quot; &amp; Baz&#10;&#10;   &#10;Qux";
        assert_eq!(sanitize_text(raw), "Foo \"Bar\" & Baz\n\nQux");
    }

    #[test]
    fn test_no_double_unescape() {
        // A description that literally talks about entities must keep them.
        assert_eq!(sanitize_text("use &amp;lt; for less-than"), "use &lt; for less-than");
        assert_eq!(sanitize_text("&amp;amp;"), "&amp;");
    }

    #[test]
    fn test_unknown_entity_passes_through() {
        assert_eq!(sanitize_text("AT&T &copy; 2024"), "AT&T &copy; 2024");
    }

    #[test]
    fn test_dashes_and_nbsp() {
        assert_eq!(
            sanitize_text("2&ndash;4 players&nbsp;&mdash; fast"),
            "2\u{2013}4 players\u{a0}\u{2014} fast"
        );
    }

    #[test]
    fn test_angle_brackets() {
        assert_eq!(sanitize_text("&lt;b&gt;bold&lt;/b&gt;"), "<b>bold</b>");
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(sanitize_text("  \n hello \n "), "hello");
    }

    #[test]
    fn test_single_newlines_preserved() {
        assert_eq!(sanitize_text("line one\nline two"), "line one\nline two");
    }

    #[test]
    fn test_long_blank_run_collapses_once() {
        assert_eq!(sanitize_text("a\n\n\n\n   \n\nb"), "a\n\nb");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_text(""), "");
        assert_eq!(sanitize_text("   "), "");
    }

    #[test]
    fn test_trailing_ampersand() {
        assert_eq!(sanitize_text("Dungeons &"), "Dungeons &");
    }
}
