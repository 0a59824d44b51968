//! Document export: the visit-history PDF.

pub mod layout;
pub mod pdf;

pub use pdf::{render_visit_history, VisitHistory};

/// Failure while producing an exported document.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

impl From<printpdf::Error> for ExportError {
    fn from(err: printpdf::Error) -> Self {
        ExportError::Pdf(err.to_string())
    }
}
