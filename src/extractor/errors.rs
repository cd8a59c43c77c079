use thiserror::Error;

/// Failure raised while an extractor queries the document.
///
/// Extractor failures never abort a scan; the pipeline records them and keeps
/// an empty section for the affected category.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("document backend error: {0}")]
    Backend(String),
}
