//! Line Classification
//!
//! Each newline-delimited line is classified into exactly one block kind by
//! checking a fixed set of prefixes in priority order. First match wins.

/// Classification of a single input line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Block<'a> {
    /// `# `, `## ` or `### ` heading with the text after the prefix
    Heading { level: u8, content: &'a str },

    /// `* ` or `- ` list item with the text after the two-character marker
    ListItem(&'a str),

    /// Empty or whitespace-only line
    Blank,

    /// Anything else; carries the whole line
    Paragraph(&'a str),
}

// Longest prefix first: "### x" must not be read as a level-1 heading.
const HEADING_PREFIXES: [(&str, u8); 3] = [("### ", 3), ("## ", 2), ("# ", 1)];

const LIST_MARKERS: [&str; 2] = ["* ", "- "];

/// Classify one line. Prefixes are matched exactly at the start of `line`;
/// leading whitespace is not skipped.
pub fn classify(line: &str) -> Block<'_> {
    for (prefix, level) in HEADING_PREFIXES {
        if let Some(content) = line.strip_prefix(prefix) {
            return Block::Heading { level, content };
        }
    }

    for marker in LIST_MARKERS {
        if let Some(content) = line.strip_prefix(marker) {
            return Block::ListItem(content);
        }
    }

    if line.trim().is_empty() {
        Block::Blank
    } else {
        Block::Paragraph(line)
    }
}

pub(crate) const fn heading_tag(level: u8) -> &'static str {
    match level {
        1 => "h1",
        2 => "h2",
        _ => "h3",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels() {
        assert_eq!(classify("# One"), Block::Heading { level: 1, content: "One" });
        assert_eq!(classify("## Two"), Block::Heading { level: 2, content: "Two" });
        assert_eq!(classify("### Three"), Block::Heading { level: 3, content: "Three" });
    }

    #[test]
    fn test_four_hashes_is_paragraph() {
        assert_eq!(classify("#### Four"), Block::Paragraph("#### Four"));
    }

    #[test]
    fn test_prefix_requires_space() {
        assert_eq!(classify("#tag"), Block::Paragraph("#tag"));
        assert_eq!(classify("-5 degrees"), Block::Paragraph("-5 degrees"));
        assert_eq!(classify("*emphasis*"), Block::Paragraph("*emphasis*"));
    }

    #[test]
    fn test_list_markers() {
        assert_eq!(classify("- dash"), Block::ListItem("dash"));
        assert_eq!(classify("* star"), Block::ListItem("star"));
        assert_eq!(classify("- "), Block::ListItem(""));
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(classify(""), Block::Blank);
        assert_eq!(classify("   \t "), Block::Blank);
    }

    #[test]
    fn test_leading_whitespace_is_not_skipped() {
        assert_eq!(classify("  - item"), Block::Paragraph("  - item"));
        assert_eq!(classify(" # title"), Block::Paragraph(" # title"));
    }

    #[test]
    fn test_heading_wins_over_list() {
        // "# - x" is a heading whose content happens to look like a list item
        assert_eq!(classify("# - x"), Block::Heading { level: 1, content: "- x" });
    }
}
