//! Open Graph (`og:*`) meta tags.

use std::collections::BTreeMap;

use crate::document::{Document, Element};
use crate::extractor::ExtractError;
use crate::extractor::model::{OgValue, OpenGraph};

const PREFIX: &str = "og:";

pub fn extract<D: Document>(doc: &D) -> Result<OpenGraph, ExtractError> {
    let mut og = OpenGraph::new();

    for element in doc.query("meta[property]")? {
        let Some(key) = element
            .attr("property")
            .and_then(|p| p.trim().strip_prefix(PREFIX))
        else {
            continue;
        };
        let Some(content) = element.attr("content").filter(|c| !c.is_empty()) else {
            continue;
        };

        insert_value(&mut og, key, content);
    }

    Ok(og)
}

/// `image:width` becomes `{image: {width: ...}}`. A write at a parent key
/// replaces whatever shape was there before.
fn insert_value(og: &mut OpenGraph, key: &str, value: &str) {
    match key.split_once(':') {
        Some((parent, child)) => {
            let entry = og
                .entry(parent.to_string())
                .or_insert_with(|| OgValue::Nested(BTreeMap::new()));
            if !matches!(*entry, OgValue::Nested(_)) {
                *entry = OgValue::Nested(BTreeMap::new());
            }
            if let OgValue::Nested(nested) = entry {
                nested.insert(child.to_string(), value.to_string());
            }
        }
        None => {
            og.insert(key.to_string(), OgValue::Text(value.to_string()));
        }
    }
}
