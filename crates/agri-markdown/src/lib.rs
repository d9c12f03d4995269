//! # agri-markdown
//!
//! Renders the small Markdown subset that AgriGuru's model replies use into an
//! HTML fragment for direct injection into the page.
//!
//! ## Supported Syntax
//!
//! ```text
//! # Heading 1          →  <h1>Heading 1</h1>
//! ## Heading 2         →  <h2>Heading 2</h2>
//! ### Heading 3        →  <h3>Heading 3</h3>
//! - item / * item      →  <ul><li>item</li>...</ul>   (one <ul> per run)
//! **bold**             →  <strong>bold</strong>
//! *italic*             →  <em>italic</em>
//! blank line           →  (nothing, closes an open list)
//! anything else        →  <p>...</p>
//! ```
//!
//! The renderer is a pure function: no state survives a call, and it never
//! fails. Malformed emphasis is left as literal text.
//!
//! ## Usage
//!
//! ```rust
//! let html = agri_markdown::render("## Diagnosis\n- **Early blight**\n- Leaf spots");
//! assert_eq!(
//!     html.as_str(),
//!     "<h2>Diagnosis</h2><ul><li><strong>Early blight</strong></li><li>Leaf spots</li></ul>"
//! );
//!
//! let safe = agri_markdown::Renderer::new().escape_html(true).render("1 < 2");
//! assert_eq!(safe.as_str(), "<p>1 &lt; 2</p>");
//! ```

mod block;
mod html;
mod inline;

pub use block::{Block, classify};
pub use html::TrustedHtml;
pub use inline::{escape_html, render_inline};

use block::heading_tag;

/// Render `text` with the default settings (no escaping, prefix-exact).
///
/// `None` and `""` both produce an empty fragment.
pub fn render<'a>(text: impl Into<Option<&'a str>>) -> TrustedHtml {
    Renderer::new().render(text)
}

/// Configurable renderer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Renderer {
    escape_html: bool,
    trim_leading_whitespace: bool,
}

impl Renderer {
    pub const fn new() -> Self {
        Self {
            escape_html: false,
            trim_leading_whitespace: false,
        }
    }

    /// Escape `&`, `<`, `>`, `"` and `'` in the source text before emphasis
    /// is applied. Off by default.
    #[must_use]
    pub const fn escape_html(mut self, enabled: bool) -> Self {
        self.escape_html = enabled;
        self
    }

    /// Skip leading whitespace before matching heading and list prefixes, so
    /// `"  - item"` becomes a list item. Off by default.
    #[must_use]
    pub const fn trim_leading_whitespace(mut self, enabled: bool) -> Self {
        self.trim_leading_whitespace = enabled;
        self
    }

    /// Render `text` into a trusted HTML fragment.
    pub fn render<'a>(&self, text: impl Into<Option<&'a str>>) -> TrustedHtml {
        let Some(text) = text.into().filter(|t| !t.is_empty()) else {
            return TrustedHtml::empty();
        };

        let mut out = String::with_capacity(text.len() + text.len() / 2);
        let mut in_list = false;

        for raw in text.split('\n') {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let line = if self.trim_leading_whitespace {
                line.trim_start()
            } else {
                line
            };

            let block = classify(line);

            if in_list && !matches!(block, Block::ListItem(_)) {
                out.push_str("</ul>");
                in_list = false;
            }

            match block {
                Block::Heading { level, content } => {
                    self.push_element(&mut out, heading_tag(level), content);
                }
                Block::ListItem(content) => {
                    if !in_list {
                        out.push_str("<ul>");
                        in_list = true;
                    }
                    self.push_element(&mut out, "li", content);
                }
                Block::Paragraph(content) => self.push_element(&mut out, "p", content),
                Block::Blank => {}
            }
        }

        if in_list {
            out.push_str("</ul>");
        }

        TrustedHtml::new(out)
    }

    fn push_element(&self, out: &mut String, tag: &str, content: &str) {
        let content = if self.escape_html {
            escape_html(content)
        } else {
            std::borrow::Cow::Borrowed(content)
        };

        out.push('<');
        out.push_str(tag);
        out.push('>');
        out.push_str(&render_inline(&content));
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}
