use crate::document::{Document, Element};
use crate::extractor::ExtractError;
use crate::extractor::model::{HeadingCounts, HeadingInventory, HeadingRecord};

pub fn extract<D: Document>(doc: &D) -> Result<HeadingInventory, ExtractError> {
    let mut inventory = HeadingInventory::default();

    for level in 1..=6u8 {
        let records: Vec<HeadingRecord> = doc
            .query(&format!("h{level}"))?
            .into_iter()
            .filter_map(|el| {
                let text = el.text_content().trim().to_string();
                if text.is_empty() {
                    return None;
                }
                Some(HeadingRecord {
                    length: text.chars().count(),
                    id: el.attr_non_blank("id"),
                    text,
                })
            })
            .collect();

        if let Some(bucket) = inventory.level_mut(level) {
            *bucket = records;
        }
    }

    inventory.counts = HeadingCounts {
        h1: inventory.h1.len(),
        h2: inventory.h2.len(),
        h3: inventory.h3.len(),
        h4: inventory.h4.len(),
        h5: inventory.h5.len(),
        h6: inventory.h6.len(),
    };

    Ok(inventory)
}
