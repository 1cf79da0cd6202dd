//! Data-access interface consumed by the store.
//!
//! One method per remote entity action. Implementations must not retry.

use crate::models::{
    Annotation, AnnotationId, AnnotationPayload, Document, DocumentId, DocumentPatch,
    FeedbackRecord, Page, ProjectId, SearchOptions, UploadFile,
};
use async_trait::async_trait;
use client_core::error::ApiError;

#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn list_documents(
        &self,
        project_id: ProjectId,
        options: &SearchOptions,
    ) -> Result<Page<Document>, ApiError>;

    async fn list_feedback(
        &self,
        project_id: ProjectId,
        options: &SearchOptions,
    ) -> Result<Page<FeedbackRecord>, ApiError>;

    async fn upload_file(
        &self,
        project_id: ProjectId,
        format: &str,
        file: UploadFile,
    ) -> Result<(), ApiError>;

    /// Raw export payload in the requested format.
    async fn export_file(&self, project_id: ProjectId, format: &str) -> Result<Vec<u8>, ApiError>;

    /// Returns the updated document as the server sees it.
    async fn update_document(
        &self,
        project_id: ProjectId,
        patch: &DocumentPatch,
    ) -> Result<DocumentPatch, ApiError>;

    async fn delete_document(
        &self,
        project_id: ProjectId,
        document_id: DocumentId,
    ) -> Result<(), ApiError>;

    async fn add_annotation(
        &self,
        project_id: ProjectId,
        document_id: DocumentId,
        payload: &AnnotationPayload,
    ) -> Result<Annotation, ApiError>;

    async fn update_annotation(
        &self,
        project_id: ProjectId,
        document_id: DocumentId,
        annotation_id: AnnotationId,
        payload: &AnnotationPayload,
    ) -> Result<Annotation, ApiError>;

    async fn delete_annotation(
        &self,
        project_id: ProjectId,
        document_id: DocumentId,
        annotation_id: AnnotationId,
    ) -> Result<(), ApiError>;

    async fn approve_document(
        &self,
        project_id: ProjectId,
        document_id: DocumentId,
        approved: bool,
    ) -> Result<DocumentPatch, ApiError>;

    async fn submit_feedback(
        &self,
        project_id: ProjectId,
        document_id: DocumentId,
        text: &str,
    ) -> Result<FeedbackRecord, ApiError>;
}
