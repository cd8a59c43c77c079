use crate::document::{Document, Element};
use crate::extractor::ExtractError;
use crate::extractor::model::{ImageCounts, ImageInventory, ImageRecord};

pub fn extract<D: Document>(doc: &D) -> Result<ImageInventory, ExtractError> {
    let mut inventory = ImageInventory::default();

    for img in doc.query("img")? {
        let Some(src) = img.attr("src") else {
            continue;
        };

        let alt = img.attr("alt").map(str::to_string);
        let record = ImageRecord {
            src: src.to_string(),
            has_alt: alt.as_deref().is_some_and(|a| !a.is_empty()),
            alt,
            is_lazy: img.attr("loading") == Some("lazy"),
            srcset: img.attr_non_blank("srcset"),
            title: img.attr_non_blank("title"),
        };

        if record.is_lazy {
            inventory.lazy_loaded.push(record.clone());
        }
        if record.has_alt {
            inventory.with_alt.push(record);
        } else {
            inventory.without_alt.push(record);
        }
    }

    inventory.counts = ImageCounts {
        total: inventory.with_alt.len() + inventory.without_alt.len(),
        with_alt: inventory.with_alt.len(),
        without_alt: inventory.without_alt.len(),
        lazy_loaded: inventory.lazy_loaded.len(),
    };

    Ok(inventory)
}
