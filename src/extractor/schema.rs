//! Structured data: JSON-LD script blocks and microdata attributes.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::trace;

use crate::document::{Document, Element};
use crate::extractor::ExtractError;
use crate::extractor::model::StructuredData;

const JSON_LD_TYPE: &str = "application/ld+json";

/// A JSON-LD block that did not parse. Dropped without a warning.
#[derive(Debug)]
pub struct Ignored(pub serde_json::Error);

pub fn parse_json_ld(raw: &str) -> Result<Value, Ignored> {
    serde_json::from_str(raw.trim()).map_err(Ignored)
}

pub fn extract<D: Document>(doc: &D) -> Result<StructuredData, ExtractError> {
    let json_ld = doc
        .query("script[type]")?
        .into_iter()
        .filter(|el| {
            el.attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case(JSON_LD_TYPE))
        })
        .filter_map(|el| match parse_json_ld(&el.text_content()) {
            Ok(value) => Some(value),
            Err(Ignored(err)) => {
                trace!(error = %err, "dropping malformed JSON-LD block");
                None
            }
        })
        .collect();

    let mut microdata: BTreeMap<String, Vec<BTreeMap<String, String>>> = BTreeMap::new();

    for scope in doc.query("[itemscope][itemtype]")? {
        let Some(type_name) = scope.attr("itemtype").and_then(type_name) else {
            continue;
        };

        let mut record = BTreeMap::new();
        for prop in scope.query("[itemprop]")? {
            let Some(name) = prop.attr_non_blank("itemprop") else {
                continue;
            };
            let value = match prop.attr("content") {
                Some(content) => content.trim().to_string(),
                None => prop.text_content().trim().to_string(),
            };
            record.insert(name, value);
        }

        microdata.entry(type_name).or_default().push(record);
    }

    Ok(StructuredData { json_ld, microdata })
}

/// `https://schema.org/Product` -> `Product`.
fn type_name(itemtype: &str) -> Option<String> {
    // itemtype may list several types; the first one names the bucket
    let first = itemtype.split_ascii_whitespace().next()?;
    first
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
