use std::fs;

use serde_json::json;

use crate::config::ResourceCosts;
use crate::document::{Document, Element, HtmlDocument, HtmlElement};
use crate::extractor::model::{HtmlVersion, OgValue};
use crate::extractor::{Category, ExtractError, ExtractionPipeline};

fn fixture(name: &str) -> HtmlDocument {
    let html = fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture");
    HtmlDocument::parse(html)
}

fn pipeline() -> ExtractionPipeline {
    ExtractionPipeline::new(ResourceCosts::default())
}

#[test]
fn test_extract_article() {
    let doc = fixture("article.html");
    let report = pipeline().run("https://blog.example.com/post", &doc);
    let seo = &report.seo;

    assert!(report.failures.is_empty());
    assert_eq!(report.url, "https://blog.example.com/post");

    assert_eq!(
        seo.basic.title.as_deref(),
        Some("How to Build Better Software - Tech Blog")
    );
    assert_eq!(seo.basic.canonical.as_deref(), Some("https://blog.example.com/post"));
    assert_eq!(seo.basic.language.as_deref(), Some("en"));
    assert_eq!(seo.basic.hreflang.len(), 2);

    assert_eq!(
        seo.open_graph["site_name"],
        OgValue::Text("Tech Blog".to_string())
    );
    assert!(matches!(seo.open_graph["image"], OgValue::Nested(ref m) if m.len() == 2));
    assert_eq!(seo.twitter["card"], "summary_large_image");

    assert_eq!(seo.schema.json_ld.len(), 1);
    assert_eq!(seo.schema.json_ld[0]["@type"], json!("BlogPosting"));
    assert_eq!(seo.schema.microdata["Person"][0]["jobTitle"], "Engineer");

    assert!(seo.technical.has_rss);
    assert!(!seo.technical.has_amp);
    assert_eq!(seo.technical.html_version, HtmlVersion::Html5);

    assert_eq!(seo.links.counts.internal, 2);
    assert_eq!(seo.links.counts.external, 2);
    assert_eq!(seo.links.nofollow[0].url, "https://partner.example.org/deal");
    assert!(seo.links.nofollow[0].is_sponsored);

    assert_eq!(seo.headings.counts.h1, 1);
    assert_eq!(seo.headings.counts.h2, 2);
    assert_eq!(seo.headings.h1[0].id.as_deref(), Some("title"));

    assert_eq!(seo.images.counts.total, 2);
    assert_eq!(seo.images.counts.lazy_loaded, 1);

    assert_eq!(seo.performance.total_stylesheets, 2);
    assert_eq!(seo.performance.total_scripts, 1);
    assert_eq!(seo.performance.inline_scripts, 2);
    assert_eq!(seo.performance.inline_styles, 1);
    assert_eq!(seo.performance.total_links, 6);
    assert_eq!(seo.performance.total_headings, 3);
}

#[test]
fn test_links_and_headings_fixture() {
    let doc = fixture("links_and_headings.html");
    let report = pipeline().run("https://example.com/", &doc);
    let seo = &report.seo;

    assert_eq!(seo.links.internal.len(), 1);
    assert_eq!(seo.links.internal[0].text.as_deref(), Some("Docs"));
    assert_eq!(seo.links.external.len(), 1);
    assert_eq!(seo.links.nofollow.len(), 1);
    assert_eq!(seo.headings.h1.len(), 2);
    assert_eq!(seo.headings.counts.h1, 2);
    assert_eq!(seo.performance.total_headings, 3);
    assert!(seo.schema.json_ld.is_empty());
}

#[test]
fn test_report_json_shape() {
    let doc = HtmlDocument::parse("<html><body></body></html>");
    let report = pipeline().run("https://example.com/", &doc);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["url"], json!("https://example.com/"));
    assert!(json["timestamp"].is_string());

    let seo = json["seo"].as_object().unwrap();
    let keys: Vec<_> = seo.keys().map(String::as_str).collect();
    for category in Category::ALL {
        assert!(keys.contains(&category.as_str()), "missing {category}");
    }
    assert_eq!(seo.len(), 9);
    assert!(json.get("failures").is_none());

    assert_eq!(json["seo"]["basic"]["title"], json!(null));
    assert_eq!(json["seo"]["open_graph"], json!({}));
    assert_eq!(json["seo"]["schema"]["jsonLd"], json!([]));
    assert_eq!(json["seo"]["technical"]["htmlVersion"], json!("Unknown"));
    assert_eq!(json["seo"]["technical"]["hasRSS"], json!(false));
    assert_eq!(json["seo"]["images"]["counts"]["withoutAlt"], json!(0));
    assert!(json["seo"]["performance"]["estimatedPageWeight"]["totalEstimated"].is_u64());
}

#[test]
fn test_malformed_json_ld_leaves_other_sections_alone() {
    let clean = HtmlDocument::parse(r#"<html><head><title>T</title></head><body><h1>H</h1></body></html>"#);
    let broken = HtmlDocument::parse(
        r#"<html><head><title>T</title><script type="application/ld+json">{not json}</script></head><body><h1>H</h1></body></html>"#,
    );

    let clean_report = pipeline().run("https://example.com/", &clean);
    let broken_report = pipeline().run("https://example.com/", &broken);

    assert!(broken_report.failures.is_empty());
    assert!(broken_report.seo.schema.json_ld.is_empty());
    assert_eq!(broken_report.seo.basic, clean_report.seo.basic);
    assert_eq!(broken_report.seo.headings, clean_report.seo.headings);
    assert_eq!(broken_report.seo.links, clean_report.seo.links);
}

#[test]
fn test_runs_are_deterministic() {
    let doc = fixture("article.html");

    let first = pipeline().run("https://blog.example.com/post", &doc);
    let second = pipeline().run("https://blog.example.com/post", &doc);

    assert_eq!(
        serde_json::to_string(&first.seo).unwrap(),
        serde_json::to_string(&second.seo).unwrap()
    );
}

/// A backend where every query fails.
struct BrokenDocument;

enum NoElement {}

impl Element for NoElement {
    fn tag(&self) -> &str {
        match *self {}
    }

    fn attr(&self, _name: &str) -> Option<&str> {
        match *self {}
    }

    fn text_content(&self) -> String {
        match *self {}
    }

    fn query(&self, _selector: &str) -> Result<Vec<Self>, ExtractError> {
        match *self {}
    }
}

impl Document for BrokenDocument {
    type Element<'a>
        = NoElement
    where
        Self: 'a;

    fn query(&self, _selector: &str) -> Result<Vec<NoElement>, ExtractError> {
        Err(ExtractError::Backend("tree unavailable".to_string()))
    }

    fn doctype(&self) -> Option<String> {
        None
    }

    fn source(&self) -> &str {
        ""
    }
}

#[test]
fn test_every_extractor_failing_still_yields_report() {
    let report = pipeline().run("https://example.com/", &BrokenDocument);

    let failed: Vec<_> = report.failures.iter().map(|f| f.category).collect();
    assert_eq!(failed, Category::ALL.to_vec());
    assert!(report.failures[0].message.contains("tree unavailable"));

    assert_eq!(report.seo, Default::default());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["seo"].as_object().unwrap().len(), 9);
}

/// Delegates to a real document but fails one selector.
struct FailingOn {
    inner: HtmlDocument,
    selector: &'static str,
}

impl Document for FailingOn {
    type Element<'a>
        = HtmlElement<'a>
    where
        Self: 'a;

    fn query(&self, selector: &str) -> Result<Vec<HtmlElement<'_>>, ExtractError> {
        if selector == self.selector {
            return Err(ExtractError::Backend(format!("cannot query {selector}")));
        }
        self.inner.query(selector)
    }

    fn doctype(&self) -> Option<String> {
        self.inner.doctype()
    }

    fn source(&self) -> &str {
        self.inner.source()
    }
}

#[test]
fn test_single_failure_is_isolated() {
    let doc = FailingOn {
        inner: fixture("article.html"),
        selector: "img",
    };
    let report = pipeline().run("https://blog.example.com/post", &doc);

    // both the image inventory and the performance counts query `img`
    let failed: Vec<_> = report.failures.iter().map(|f| f.category).collect();
    assert_eq!(failed, vec![Category::Images, Category::Performance]);
    assert_eq!(report.seo.images, Default::default());
    assert_eq!(report.seo.performance, Default::default());

    assert_eq!(report.seo.headings.counts.h1, 1);
    assert_eq!(report.seo.links.counts.external, 2);
    assert_eq!(report.seo.schema.json_ld.len(), 1);
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_pipeline_never_panics(
            html in ".*",
            url in "https://[a-z]+\\.com/.*"
        ) {
            let doc = HtmlDocument::parse(html);
            let report = pipeline().run(&url, &doc);
            prop_assert!(report.failures.is_empty());
        }

        #[test]
        fn test_image_counts_match_buckets(
            alts in proptest::collection::vec(proptest::option::of("[a-z ]{0,8}"), 0..20)
        ) {
            let markup: String = alts
                .iter()
                .enumerate()
                .map(|(i, alt)| match alt {
                    Some(alt) => format!(r#"<img src="/{i}.png" alt="{alt}">"#),
                    None => format!(r#"<img src="/{i}.png">"#),
                })
                .collect();
            let doc = HtmlDocument::parse(markup);
            let images = pipeline().run("https://example.com/", &doc).seo.images;

            prop_assert_eq!(images.counts.total, alts.len());
            prop_assert_eq!(images.counts.with_alt, images.with_alt.len());
            prop_assert_eq!(images.counts.without_alt, images.without_alt.len());
            prop_assert_eq!(images.counts.total, images.with_alt.len() + images.without_alt.len());
        }
    }
}
