use crate::config::ResourceCosts;
use crate::document::{Document, Element};
use crate::extractor::ExtractError;
use crate::extractor::model::{PageWeight, PerformanceMetrics};

pub fn extract<D: Document>(
    doc: &D,
    costs: &ResourceCosts,
) -> Result<PerformanceMetrics, ExtractError> {
    let scripts = doc.query("script")?;
    let total_scripts = scripts.iter().filter(|el| el.has_attr("src")).count();
    let inline_scripts = scripts.len() - total_scripts;

    let total_stylesheets = doc
        .query("link[rel]")?
        .iter()
        .filter(|el| el.has_token("rel", "stylesheet"))
        .count();

    let total_images = doc.count("img")?;
    let html_size = doc.source().len();

    Ok(PerformanceMetrics {
        total_images,
        total_scripts,
        total_stylesheets,
        inline_scripts,
        inline_styles: doc.count("style")?,
        total_links: doc.count("a[href]")?,
        // every heading element, including empty ones
        total_headings: doc.count("h1, h2, h3, h4, h5, h6")?,
        html_size,
        estimated_page_weight: estimate_page_weight(
            html_size,
            total_stylesheets,
            total_scripts,
            total_images,
            costs,
        ),
    })
}

/// `stylesheets*css + scripts*js * images*img`, with the product binding
/// first. Saturates instead of overflowing.
pub fn estimate_page_weight(
    html_size: usize,
    stylesheets: usize,
    scripts: usize,
    images: usize,
    costs: &ResourceCosts,
) -> PageWeight {
    let html = html_size as u64;
    let stylesheet_bytes = (stylesheets as u64).saturating_mul(costs.stylesheet);
    let script_bytes = (scripts as u64).saturating_mul(costs.script);
    let image_bytes = (images as u64).saturating_mul(costs.image);

    let external = stylesheet_bytes.saturating_add(script_bytes.saturating_mul(image_bytes));

    PageWeight {
        html,
        estimated_external_resources: external,
        total_estimated: html.saturating_add(external),
    }
}
