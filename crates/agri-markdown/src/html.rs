//! Trusted HTML Fragments

use serde::Serialize;

/// Markup produced by the renderer, intended for verbatim insertion into a
/// document (e.g. an `inner_html` binding).
///
/// Unless the renderer was configured with [`Renderer::escape_html`], literal
/// `<`, `>` and `&` from the source text pass through unescaped. Only feed it
/// text that comes from the user or a trusted service.
///
/// [`Renderer::escape_html`]: crate::Renderer::escape_html
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub(crate) const fn new(markup: String) -> Self {
        Self(markup)
    }

    /// The empty fragment
    pub const fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for TrustedHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TrustedHtml> for String {
    fn from(html: TrustedHtml) -> Self {
        html.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_string() {
        let html = TrustedHtml::new("<p>hi</p>".into());
        let json = serde_json::to_string(&html).unwrap();
        assert_eq!(json, r#""<p>hi</p>""#);
    }

    #[test]
    fn test_empty() {
        assert!(TrustedHtml::empty().is_empty());
        assert_eq!(TrustedHtml::default(), TrustedHtml::empty());
    }
}
