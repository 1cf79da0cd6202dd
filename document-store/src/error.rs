use crate::models::{AnnotationId, DocumentId};
use client_core::error::ApiError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Remote operation failed: {0}")]
    Remote(#[from] ApiError),

    #[error("No document is currently focused")]
    NoCurrentDocument,

    #[error("Document {0} is not in the current list")]
    DocumentNotFound(DocumentId),

    #[error("Annotation {0} does not belong to the document")]
    AnnotationNotFound(AnnotationId),
}

impl StoreError {
    /// Whether the failure came from the remote API rather than local state.
    pub fn is_remote(&self) -> bool {
        matches!(self, StoreError::Remote(_))
    }
}
