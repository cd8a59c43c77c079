use std::collections::HashSet;

use url::Url;

use crate::document::{Document, Element};
use crate::extractor::ExtractError;
use crate::extractor::model::{LinkCounts, LinkInventory, LinkRecord};

pub fn extract<D: Document>(doc: &D, page_url: &str) -> Result<LinkInventory, ExtractError> {
    let origin_host = Url::parse(page_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string));

    let mut internal = Vec::new();
    let mut external = Vec::new();
    let mut nofollow = Vec::new();

    for anchor in doc.query("a[href]")? {
        let Some(href) = anchor.attr("href").map(str::trim) else {
            continue;
        };
        if is_page_local(href) {
            continue;
        }

        let rel = anchor.attr_non_blank("rel");
        let rel_lower = rel.as_deref().map(str::to_ascii_lowercase).unwrap_or_default();
        let record = LinkRecord {
            url: href.to_string(),
            text: Some(anchor.text_content().trim().to_string()).filter(|t| !t.is_empty()),
            is_nofollow: rel_lower.contains("nofollow"),
            is_sponsored: rel_lower.contains("sponsored"),
            is_ugc: rel_lower.contains("ugc"),
            rel,
            title: anchor.attr_non_blank("title"),
        };

        if record.is_nofollow {
            nofollow.push(record.clone());
        }
        if is_internal(href, origin_host.as_deref()) {
            internal.push(record);
        } else {
            external.push(record);
        }
    }

    let internal = dedup_by_url(internal);
    let external = dedup_by_url(external);
    let nofollow = dedup_by_url(nofollow);

    Ok(LinkInventory {
        counts: LinkCounts {
            internal: internal.len(),
            external: external.len(),
            nofollow: nofollow.len(),
        },
        internal,
        external,
        nofollow,
    })
}

/// Fragment-only and script links are not navigations.
fn is_page_local(href: &str) -> bool {
    href.starts_with('#') || starts_with_ignore_case(href, "javascript:")
}

fn is_absolute(href: &str) -> bool {
    starts_with_ignore_case(href, "http://") || starts_with_ignore_case(href, "https://")
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Relative links are internal. Absolute links are internal only when their
/// host matches the page host; anything unparseable counts as external.
fn is_internal(href: &str, origin_host: Option<&str>) -> bool {
    if !is_absolute(href) {
        return true;
    }

    match (Url::parse(href), origin_host) {
        (Ok(url), Some(origin)) => url.host_str() == Some(origin),
        _ => false,
    }
}

/// Keeps the first record for each distinct url.
fn dedup_by_url(records: Vec<LinkRecord>) -> Vec<LinkRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.url.clone()))
        .collect()
}
