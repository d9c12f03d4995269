//! Inline Emphasis
//!
//! `***x***` → bold italic, `**x**` → bold, `*x*` → italic. Matching is
//! leftmost and non-greedy; markers without a partner are left as literal
//! asterisks.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

struct Patterns {
    bold_italic: Regex,
    bold: Regex,
    italic: Regex,
}

static RE: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    bold_italic: Regex::new(r"\*\*\*(.+?)\*\*\*").unwrap(),
    bold: Regex::new(r"\*\*(.+?)\*\*").unwrap(),
    // No '*' inside: leftovers from an unbalanced bold run stay literal
    italic: Regex::new(r"\*([^*]+?)\*").unwrap(),
});

/// Apply emphasis substitution to a single span of text.
pub fn render_inline(text: &str) -> String {
    if !text.contains('*') {
        return text.to_string();
    }

    let text = RE.bold_italic.replace_all(text, "<strong><em>${1}</em></strong>");
    let text = RE.bold.replace_all(&text, "<strong>${1}</strong>");
    RE.italic.replace_all(&text, "<em>${1}</em>").into_owned()
}

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            render_inline("**bold** and *italic*"),
            "<strong>bold</strong> and <em>italic</em>"
        );
    }

    #[test]
    fn test_non_greedy_pairs() {
        assert_eq!(render_inline("*a* and *b*"), "<em>a</em> and <em>b</em>");
        assert_eq!(
            render_inline("**a** then **b**"),
            "<strong>a</strong> then <strong>b</strong>"
        );
    }

    #[test]
    fn test_triple_markers_nest_cleanly() {
        assert_eq!(render_inline("***both***"), "<strong><em>both</em></strong>");
    }

    #[test]
    fn test_italic_inside_bold() {
        assert_eq!(
            render_inline("**very *important* note**"),
            "<strong>very <em>important</em> note</strong>"
        );
    }

    #[test]
    fn test_unmatched_markers_stay_literal() {
        assert_eq!(render_inline("2 * 3 = 6"), "2 * 3 = 6");
        assert_eq!(render_inline("**open"), "**open");
        assert_eq!(render_inline("****"), "****");
        assert_eq!(render_inline("**a**b**"), "<strong>a</strong>b**");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(render_inline("no markers here"), "no markers here");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(escape_html(r#"say "hi" it's"#), "say &quot;hi&quot; it&#39;s");
        assert!(matches!(escape_html("plain"), Cow::Borrowed("plain")));
    }
}
