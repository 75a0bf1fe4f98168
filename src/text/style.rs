use std::path::Path;

/// Extension of the stylesheet sidecar next to a text layer's dictionary.
pub const STYLESHEET_EXTENSION: &str = "css";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "style", rename_all = "snake_case")]
/// Text handed to the renderer, with or without an inline stylesheet.
pub enum RenderableText {
    /// Unstyled text.
    Plain {
        /// Body text.
        text: String,
    },
    /// Text wrapped in a minimal HTML document carrying the stylesheet inline.
    Styled {
        /// Body text.
        text: String,
        /// Stylesheet contents, verbatim.
        stylesheet: String,
        /// `<html><head><style>..</style></head><body>..</body></html>`.
        markup: String,
    },
}

impl RenderableText {
    /// The body text, which is what gets measured.
    pub fn plain_text(&self) -> &str {
        match self {
            Self::Plain { text } | Self::Styled { text, .. } => text,
        }
    }

    pub fn is_styled(&self) -> bool {
        matches!(self, Self::Styled { .. })
    }
}

/// Wrap `text` with the stylesheet at `stylesheet`, if one can be read.
///
/// Any failure to read the stylesheet degrades to plain text without a diagnostic.
pub fn style(text: &str, stylesheet: Option<&Path>) -> RenderableText {
    let css = stylesheet.and_then(|path| match std::fs::read_to_string(path) {
        Ok(css) => Some(css),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "stylesheet unavailable, using plain text");
            None
        }
    });
    match css {
        Some(css) => RenderableText::Styled {
            markup: format!("<html><head><style>{css}</style></head><body>{text}</body></html>"),
            text: text.to_string(),
            stylesheet: css,
        },
        None => RenderableText::Plain {
            text: text.to_string(),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/style.rs"]
mod tests;
