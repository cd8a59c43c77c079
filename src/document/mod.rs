//! Read-only query interface over a parsed markup tree.
//!
//! Extractors are written against [`Document`] and [`Element`] only, so the
//! HTML backend can be swapped (or faked in tests) without touching them.

mod html;

pub use html::{HtmlDocument, HtmlElement};

use crate::extractor::ExtractError;

/// One element of a parsed document.
pub trait Element: Sized {
    /// Lower-case tag name.
    fn tag(&self) -> &str;

    fn attr(&self, name: &str) -> Option<&str>;

    /// Concatenated text of all descendant text nodes.
    fn text_content(&self) -> String;

    /// Descendants of this element matching a CSS selector, in document order.
    fn query(&self, selector: &str) -> Result<Vec<Self>, ExtractError>;

    fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Attribute value, trimmed, or `None` when absent or blank.
    fn attr_non_blank(&self, name: &str) -> Option<String> {
        self.attr(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Whether a whitespace-separated token attribute (such as `rel`)
    /// contains `token`, compared ASCII case-insensitively.
    fn has_token(&self, name: &str, token: &str) -> bool {
        self.attr(name).is_some_and(|value| {
            value
                .split_ascii_whitespace()
                .any(|t| t.eq_ignore_ascii_case(token))
        })
    }
}

/// A whole parsed document.
pub trait Document {
    type Element<'a>: Element
    where
        Self: 'a;

    /// Elements matching a CSS selector, in document order.
    fn query(&self, selector: &str) -> Result<Vec<Self::Element<'_>>, ExtractError>;

    /// The doctype declaration as markup, e.g. `<!DOCTYPE html>`.
    fn doctype(&self) -> Option<String>;

    /// The markup the document was parsed from.
    fn source(&self) -> &str;

    /// The first element matching `selector`, if any.
    fn first(&self, selector: &str) -> Result<Option<Self::Element<'_>>, ExtractError> {
        Ok(self.query(selector)?.into_iter().next())
    }

    fn count(&self, selector: &str) -> Result<usize, ExtractError> {
        Ok(self.query(selector)?.len())
    }
}
