pub mod basic;
pub mod errors;
pub mod headings;
pub mod images;
pub mod links;
pub mod model;
pub mod open_graph;
pub mod performance;
pub mod schema;
pub mod technical;
pub mod twitter;

#[cfg(test)]
mod tests;

pub use errors::ExtractError;
pub use model::{Category, ExtractorFailure, Report, SeoSections};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::ResourceCosts;
use crate::document::Document;

/// Runs the nine extractors over one document and aggregates a [`Report`].
#[derive(Debug, Clone, Default)]
pub struct ExtractionPipeline {
    costs: ResourceCosts,
}

impl ExtractionPipeline {
    pub fn new(costs: ResourceCosts) -> Self {
        Self { costs }
    }

    /// Extract every section from `doc`. `url` is recorded verbatim and its
    /// host decides which links are internal.
    ///
    /// Never fails: an extractor error leaves its section empty and is
    /// recorded in [`Report::failures`].
    pub fn run<D: Document>(&self, url: &str, doc: &D) -> Report {
        let mut failures = Vec::new();

        let seo = SeoSections {
            basic: isolate(Category::Basic, &mut failures, || basic::extract(doc)),
            open_graph: isolate(Category::OpenGraph, &mut failures, || {
                open_graph::extract(doc)
            }),
            twitter: isolate(Category::Twitter, &mut failures, || twitter::extract(doc)),
            schema: isolate(Category::Schema, &mut failures, || schema::extract(doc)),
            technical: isolate(Category::Technical, &mut failures, || {
                technical::extract(doc)
            }),
            links: isolate(Category::Links, &mut failures, || links::extract(doc, url)),
            headings: isolate(Category::Headings, &mut failures, || headings::extract(doc)),
            images: isolate(Category::Images, &mut failures, || images::extract(doc)),
            performance: isolate(Category::Performance, &mut failures, || {
                performance::extract(doc, &self.costs)
            }),
        };

        info!(
            url,
            failed = failures.len(),
            succeeded = Category::ALL.len() - failures.len(),
            "extraction finished"
        );

        Report {
            url: url.to_string(),
            timestamp: Utc::now(),
            seo,
            failures,
        }
    }
}

/// Run one extractor, swapping an error for the section's empty default.
fn isolate<T, F>(category: Category, failures: &mut Vec<ExtractorFailure>, extract: F) -> T
where
    T: Default,
    F: FnOnce() -> Result<T, ExtractError>,
{
    match extract() {
        Ok(section) => {
            debug!(%category, "section extracted");
            section
        }
        Err(error) => {
            warn!(%category, %error, "extractor failed, section left empty");
            failures.push(ExtractorFailure {
                category,
                message: error.to_string(),
            });
            T::default()
        }
    }
}
