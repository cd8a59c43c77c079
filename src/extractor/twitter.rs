//! Twitter Card (`twitter:*`) meta tags.

use crate::document::{Document, Element};
use crate::extractor::ExtractError;
use crate::extractor::model::TwitterCard;

const PREFIX: &str = "twitter:";

pub fn extract<D: Document>(doc: &D) -> Result<TwitterCard, ExtractError> {
    let mut card = TwitterCard::new();

    for element in doc.query("meta[name]")? {
        let Some(key) = element
            .attr("name")
            .and_then(|n| n.trim().strip_prefix(PREFIX))
        else {
            continue;
        };
        let Some(content) = element.attr("content").filter(|c| !c.is_empty()) else {
            continue;
        };

        // colons stay part of the key, e.g. `app:id:iphone`
        card.insert(key.to_string(), content.to_string());
    }

    Ok(card)
}
