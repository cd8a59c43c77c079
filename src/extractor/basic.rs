use crate::document::{Document, Element};
use crate::extractor::ExtractError;
use crate::extractor::model::{BasicMetadata, Hreflang};
use crate::fetcher::decode::CHARSET_REGEX;

pub fn extract<D: Document>(doc: &D) -> Result<BasicMetadata, ExtractError> {
    let title = doc
        .first("title")?
        .map(|el| el.text_content().trim().to_string())
        .filter(|title| !title.is_empty());

    let hreflang = doc
        .query("link[hreflang]")?
        .into_iter()
        .filter(|el| el.has_token("rel", "alternate"))
        .filter_map(|el| {
            Some(Hreflang {
                lang: el.attr_non_blank("hreflang")?,
                href: el.attr_non_blank("href"),
            })
        })
        .collect();

    Ok(BasicMetadata {
        title,
        description: meta_content(doc, "description")?,
        keywords: meta_content(doc, "keywords")?,
        author: meta_content(doc, "author")?,
        canonical: link_href(doc, "canonical")?,
        robots: meta_content(doc, "robots")?,
        viewport: meta_content(doc, "viewport")?,
        charset: charset(doc)?,
        language: doc
            .first("html")?
            .and_then(|el| el.attr_non_blank("lang")),
        hreflang,
    })
}

/// First `<meta name=...>` with the given name, whatever its content.
pub(crate) fn find_meta<'d, D: Document>(
    doc: &'d D,
    name: &str,
) -> Result<Option<D::Element<'d>>, ExtractError> {
    Ok(doc
        .query("meta[name]")?
        .into_iter()
        .find(|el| el.attr("name").is_some_and(|n| n.trim().eq_ignore_ascii_case(name))))
}

/// Content of the first `<meta name=...>` with the given name.
fn meta_content<D: Document>(doc: &D, name: &str) -> Result<Option<String>, ExtractError> {
    Ok(find_meta(doc, name)?.and_then(|el| el.attr_non_blank("content")))
}

/// First `<link>` whose rel contains `rel`.
pub(crate) fn find_link<'d, D: Document>(
    doc: &'d D,
    rel: &str,
) -> Result<Option<D::Element<'d>>, ExtractError> {
    Ok(doc
        .query("link[rel]")?
        .into_iter()
        .find(|el| el.has_token("rel", rel)))
}

fn link_href<D: Document>(doc: &D, rel: &str) -> Result<Option<String>, ExtractError> {
    Ok(find_link(doc, rel)?.and_then(|el| el.attr_non_blank("href")))
}

/// `<meta http-equiv="Content-Type">` elements, in document order.
pub(crate) fn content_type_metas<D: Document>(
    doc: &D,
) -> Result<Vec<D::Element<'_>>, ExtractError> {
    Ok(doc
        .query("meta[http-equiv]")?
        .into_iter()
        .filter(|el| {
            el.attr("http-equiv")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("content-type"))
        })
        .collect())
}

/// `<meta charset>` first, then the charset of a Content-Type http-equiv.
fn charset<D: Document>(doc: &D) -> Result<Option<String>, ExtractError> {
    if let Some(charset) = doc
        .query("meta[charset]")?
        .into_iter()
        .find_map(|el| el.attr_non_blank("charset"))
    {
        return Ok(Some(charset));
    }

    Ok(content_type_metas(doc)?.into_iter().find_map(|el| {
        let content = el.attr("content")?;
        let captures = CHARSET_REGEX.captures(content)?;
        Some(captures.get(1)?.as_str().to_string())
    }))
}
