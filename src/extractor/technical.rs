use crate::document::{Document, Element};
use crate::extractor::ExtractError;
use crate::extractor::basic::{content_type_metas, find_link, find_meta};
use crate::extractor::model::{HtmlVersion, TechnicalMetadata};

const FEED_TYPES: [&str; 2] = ["application/rss+xml", "application/atom+xml"];

pub fn extract<D: Document>(doc: &D) -> Result<TechnicalMetadata, ExtractError> {
    let links = doc.query("link[rel]")?;
    let has_rel = |rel: &str| links.iter().any(|el| el.has_token("rel", rel));

    let has_rss = doc.query("link[type]")?.iter().any(|el| {
        el.attr("type").is_some_and(|t| {
            FEED_TYPES
                .iter()
                .any(|feed| t.trim().eq_ignore_ascii_case(feed))
        })
    });

    let amp_root = doc
        .first("html")?
        .is_some_and(|root| root.has_attr("amp") || root.has_attr("⚡"));

    let has_mobile_alternate = links
        .iter()
        .any(|el| el.has_token("rel", "alternate") && el.has_attr("media"));

    let doctype = doc.doctype();
    let html_version = doctype
        .as_deref()
        .map(classify_doctype)
        .unwrap_or_default();

    // presence only: blank content still counts
    let has_charset = doc.count("meta[charset]")? > 0 || !content_type_metas(doc)?.is_empty();

    Ok(TechnicalMetadata {
        has_viewport: find_meta(doc, "viewport")?.is_some(),
        has_charset,
        has_canonical: find_link(doc, "canonical")?.is_some(),
        has_robots: find_meta(doc, "robots")?.is_some(),
        has_sitemap: has_rel("sitemap"),
        has_rss,
        has_amp: has_rel("amphtml") || amp_root,
        has_mobile_alternate,
        doctype,
        html_version,
    })
}

/// First match wins: HTML 4, then XHTML, then HTML5.
pub fn classify_doctype(doctype: &str) -> HtmlVersion {
    if doctype.contains("HTML 4") {
        HtmlVersion::Html4
    } else if doctype.contains("XHTML") {
        HtmlVersion::Xhtml
    } else if doctype.contains("HTML5") || doctype.trim().eq_ignore_ascii_case("<!DOCTYPE html>")
    {
        HtmlVersion::Html5
    } else {
        HtmlVersion::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;

    #[test]
    fn test_flags_on_full_head() {
        let doc = HtmlDocument::parse(
            r#"<!DOCTYPE html>
            <html amp>
            <head>
                <meta charset="utf-8">
                <meta name="viewport" content="width=device-width">
                <meta name="robots" content="noindex">
                <link rel="canonical" href="https://example.com/">
                <link rel="sitemap" type="application/xml" href="/sitemap.xml">
                <link rel="alternate" type="application/rss+xml" href="/feed.xml">
                <link rel="alternate" media="only screen and (max-width: 640px)" href="https://m.example.com/">
            </head>
            </html>"#,
        );

        let technical = extract(&doc).unwrap();
        assert!(technical.has_viewport);
        assert!(technical.has_charset);
        assert!(technical.has_canonical);
        assert!(technical.has_robots);
        assert!(technical.has_sitemap);
        assert!(technical.has_rss);
        assert!(technical.has_amp);
        assert!(technical.has_mobile_alternate);
        assert_eq!(technical.doctype.as_deref(), Some("<!DOCTYPE html>"));
        assert_eq!(technical.html_version, HtmlVersion::Html5);
    }

    #[test]
    fn test_flags_on_bare_page() {
        let doc = HtmlDocument::parse("<html><body><p>nothing</p></body></html>");

        let technical = extract(&doc).unwrap();
        assert_eq!(technical, TechnicalMetadata::default());
        assert_eq!(technical.html_version, HtmlVersion::Unknown);
    }

    #[test]
    fn test_flags_count_tags_with_blank_values() {
        let doc = HtmlDocument::parse(
            r#"<html><head>
                <meta http-equiv="Content-Type" content="text/html">
                <meta name="viewport" content="">
                <meta name="ROBOTS">
                <link rel="canonical">
            </head></html>"#,
        );

        let technical = extract(&doc).unwrap();
        assert!(technical.has_viewport);
        assert!(technical.has_charset);
        assert!(technical.has_canonical);
        assert!(technical.has_robots);
    }

    #[test]
    fn test_amphtml_link() {
        let doc = HtmlDocument::parse(
            r#"<html><head><link rel="amphtml" href="/amp/page"></head></html>"#,
        );

        assert!(extract(&doc).unwrap().has_amp);
    }

    #[test]
    fn test_html4_doctype_from_document() {
        let doc = HtmlDocument::parse(
            r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd"><html></html>"#,
        );

        assert_eq!(extract(&doc).unwrap().html_version, HtmlVersion::Html4);
    }

    #[test]
    fn test_classify_doctype_precedence() {
        assert_eq!(classify_doctype("<!DOCTYPE html>"), HtmlVersion::Html5);
        assert_eq!(classify_doctype("<!doctype HTML>"), HtmlVersion::Html5);
        assert_eq!(
            classify_doctype(r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN">"#),
            HtmlVersion::Html4
        );
        assert_eq!(
            classify_doctype(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 HTML5//EN">"#),
            HtmlVersion::Html4
        );
        assert_eq!(
            classify_doctype(
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#
            ),
            HtmlVersion::Xhtml
        );
        assert_eq!(classify_doctype("<!DOCTYPE HTML5-ish>"), HtmlVersion::Html5);
        assert_eq!(classify_doctype("<!DOCTYPE svg>"), HtmlVersion::Unknown);
    }
}
