//! REST implementation of [`DocumentApi`] over reqwest.

use crate::config::ApiSettings;
use crate::models::{
    Annotation, AnnotationId, AnnotationPayload, Document, DocumentId, DocumentPatch,
    FeedbackRecord, FeedbackSubmission, Page, ProjectId, SearchOptions, UploadFile,
};
use crate::services::api::DocumentApi;
use async_trait::async_trait;
use client_core::error::{ensure_success, ApiError};
use client_core::observability::{TracedClientExt, TracedRequest};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;

pub struct HttpDocumentApi {
    client: Client,
    settings: ApiSettings,
}

impl HttpDocumentApi {
    pub fn new(settings: ApiSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn base_url(&self) -> &str {
        self.settings.base_url.trim_end_matches('/')
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn docs_url(&self, project_id: ProjectId) -> String {
        self.url(&format!("/projects/{}/docs", project_id))
    }

    fn doc_url(&self, project_id: ProjectId, document_id: DocumentId) -> String {
        format!("{}/{}", self.docs_url(project_id), document_id)
    }

    fn authorize(&self, request: TracedRequest) -> TracedRequest {
        match &self.settings.token {
            Some(token) => request.header(
                reqwest::header::AUTHORIZATION.as_str(),
                &format!("Token {}", token.expose_secret()),
            ),
            None => request,
        }
    }

    async fn send(&self, url: &str, request: TracedRequest) -> Result<reqwest::Response, ApiError> {
        let response = self.authorize(request).send().await.map_err(|e| {
            tracing::error!("Failed to send request to {}: {}", url, e);
            ApiError::transport(url, e)
        })?;

        ensure_success(url, response).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        url: &str,
        request: TracedRequest,
    ) -> Result<T, ApiError> {
        let response = self.send(url, request).await?;
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(url, e))?;

        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            source: e,
        })
    }

    async fn send_empty(&self, url: &str, request: TracedRequest) -> Result<(), ApiError> {
        self.send(url, request).await.map(|_| ())
    }
}

#[async_trait]
impl DocumentApi for HttpDocumentApi {
    async fn list_documents(
        &self,
        project_id: ProjectId,
        options: &SearchOptions,
    ) -> Result<Page<Document>, ApiError> {
        let url = self.docs_url(project_id);
        tracing::debug!(project_id = %project_id, offset = options.offset, limit = options.limit, "Listing documents");

        let request = self.client.traced_get(&url).query(&options.to_query_pairs());
        self.send_json(&url, request).await
    }

    async fn list_feedback(
        &self,
        project_id: ProjectId,
        options: &SearchOptions,
    ) -> Result<Page<FeedbackRecord>, ApiError> {
        let url = self.url(&format!("/projects/{}/feedback", project_id));
        tracing::debug!(project_id = %project_id, offset = options.offset, limit = options.limit, "Listing feedback");

        let request = self.client.traced_get(&url).query(&options.to_query_pairs());
        self.send_json(&url, request).await
    }

    async fn upload_file(
        &self,
        project_id: ProjectId,
        format: &str,
        file: UploadFile,
    ) -> Result<(), ApiError> {
        let url = format!("{}/upload", self.docs_url(project_id));
        tracing::info!(
            project_id = %project_id,
            file_name = %file.file_name,
            size = file.bytes.len(),
            format = %format,
            "Uploading file"
        );

        let part = Part::bytes(file.bytes).file_name(file.file_name);
        let form = Form::new()
            .part("file", part)
            .text("format", format.to_string());

        self.send_empty(&url, self.client.traced_post(&url).multipart(form))
            .await
    }

    async fn export_file(&self, project_id: ProjectId, format: &str) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}/download", self.docs_url(project_id));
        tracing::info!(project_id = %project_id, format = %format, "Exporting documents");

        let request = self.client.traced_get(&url).query(&[("q", format)]);
        let response = self.send(&url, request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(&url, e))?;

        Ok(bytes.to_vec())
    }

    async fn update_document(
        &self,
        project_id: ProjectId,
        patch: &DocumentPatch,
    ) -> Result<DocumentPatch, ApiError> {
        let url = self.doc_url(project_id, patch.id);
        self.send_json(&url, self.client.traced_patch(&url).json(patch))
            .await
    }

    async fn delete_document(
        &self,
        project_id: ProjectId,
        document_id: DocumentId,
    ) -> Result<(), ApiError> {
        let url = self.doc_url(project_id, document_id);
        self.send_empty(&url, self.client.traced_delete(&url)).await
    }

    async fn add_annotation(
        &self,
        project_id: ProjectId,
        document_id: DocumentId,
        payload: &AnnotationPayload,
    ) -> Result<Annotation, ApiError> {
        let url = format!("{}/annotations", self.doc_url(project_id, document_id));
        self.send_json(&url, self.client.traced_post(&url).json(payload))
            .await
    }

    async fn update_annotation(
        &self,
        project_id: ProjectId,
        document_id: DocumentId,
        annotation_id: AnnotationId,
        payload: &AnnotationPayload,
    ) -> Result<Annotation, ApiError> {
        let url = format!(
            "{}/annotations/{}",
            self.doc_url(project_id, document_id),
            annotation_id
        );
        self.send_json(&url, self.client.traced_patch(&url).json(payload))
            .await
    }

    async fn delete_annotation(
        &self,
        project_id: ProjectId,
        document_id: DocumentId,
        annotation_id: AnnotationId,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/annotations/{}",
            self.doc_url(project_id, document_id),
            annotation_id
        );
        self.send_empty(&url, self.client.traced_delete(&url)).await
    }

    async fn approve_document(
        &self,
        project_id: ProjectId,
        document_id: DocumentId,
        approved: bool,
    ) -> Result<DocumentPatch, ApiError> {
        let url = format!("{}/approve-labels", self.doc_url(project_id, document_id));
        let body = serde_json::json!({ "approved": approved });
        self.send_json(&url, self.client.traced_post(&url).json(&body))
            .await
    }

    async fn submit_feedback(
        &self,
        project_id: ProjectId,
        document_id: DocumentId,
        text: &str,
    ) -> Result<FeedbackRecord, ApiError> {
        let url = format!("{}/feedback", self.doc_url(project_id, document_id));
        let body = FeedbackSubmission {
            text,
            document: document_id,
        };
        self.send_json(&url, self.client.traced_post(&url).json(&body))
            .await
    }
}
