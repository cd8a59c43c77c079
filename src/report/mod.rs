//! Rendering a finished [`Report`] for humans and machines.

mod summary;

pub use summary::render_summary;

use crate::extractor::Report;

/// Pretty-printed JSON document: `{url, timestamp, seo}`.
pub fn to_json_pretty(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
