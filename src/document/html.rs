use scraper::node::Doctype;
use scraper::{ElementRef, Html, Selector};

use crate::document::{Document, Element};
use crate::extractor::ExtractError;

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// [`Document`] backed by `scraper`'s html5ever tree.
pub struct HtmlDocument {
    source: String,
    html: Html,
}

impl HtmlDocument {
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let html = Html::parse_document(&source);
        Self { source, html }
    }
}

impl std::fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDocument")
            .field("bytes", &self.source.len())
            .finish()
    }
}

impl Document for HtmlDocument {
    type Element<'a>
        = HtmlElement<'a>
    where
        Self: 'a;

    fn query(&self, selector: &str) -> Result<Vec<HtmlElement<'_>>, ExtractError> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).map(HtmlElement).collect())
    }

    fn doctype(&self) -> Option<String> {
        self.html
            .tree
            .root()
            .children()
            .find_map(|node| node.value().as_doctype().map(render_doctype))
    }

    fn source(&self) -> &str {
        &self.source
    }
}

fn render_doctype(doctype: &Doctype) -> String {
    let mut rendered = format!("<!DOCTYPE {}", doctype.name());
    let public_id = doctype.public_id();
    let system_id = doctype.system_id();

    if !public_id.is_empty() {
        rendered.push_str(&format!(" PUBLIC \"{public_id}\""));
        if !system_id.is_empty() {
            rendered.push_str(&format!(" \"{system_id}\""));
        }
    } else if !system_id.is_empty() {
        rendered.push_str(&format!(" SYSTEM \"{system_id}\""));
    }

    rendered.push('>');
    rendered
}

#[derive(Debug, Clone, Copy)]
pub struct HtmlElement<'a>(ElementRef<'a>);

impl<'a> Element for HtmlElement<'a> {
    fn tag(&self) -> &str {
        self.0.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.0.value().attr(name)
    }

    fn text_content(&self) -> String {
        self.0.text().collect()
    }

    fn query(&self, selector: &str) -> Result<Vec<Self>, ExtractError> {
        let selector = parse_selector(selector)?;
        Ok(self.0.select(&selector).map(HtmlElement).collect())
    }
}
