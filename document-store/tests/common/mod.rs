#![allow(dead_code)]

use async_trait::async_trait;
use client_core::error::ApiError;
use document_store::models::{
    Annotation, AnnotationId, AnnotationPayload, Document, DocumentId, DocumentPatch,
    FeedbackRecord, Page, ProjectId, SearchOptions, UploadFile,
};
use document_store::{DocumentApi, DocumentStore};
use reqwest::StatusCode;
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

pub const PROJECT: ProjectId = ProjectId(1);
pub const APPROVER: &str = "admin";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListDocuments(SearchOptions),
    ListFeedback(SearchOptions),
    Upload { format: String, file_name: String },
    Export(String),
    UpdateDocument(DocumentId),
    DeleteDocument(DocumentId),
    AddAnnotation(DocumentId),
    UpdateAnnotation(DocumentId, AnnotationId),
    DeleteAnnotation(DocumentId, AnnotationId),
    Approve(DocumentId, bool),
    SubmitFeedback(DocumentId, String),
}

/// In-memory stand-in for the labeling API.
pub struct FakeApi {
    documents: Mutex<Vec<Document>>,
    feedback: Mutex<Vec<FeedbackRecord>>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<&'static str>>,
    failing_deletes: Mutex<HashSet<DocumentId>>,
    delete_gate: Option<Arc<Semaphore>>,
    annotation_gate: Option<Arc<Semaphore>>,
    next_annotation_id: AtomicI64,
    export_body: Vec<u8>,
}

impl FakeApi {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents: Mutex::new(documents),
            feedback: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            failing_deletes: Mutex::new(HashSet::new()),
            delete_gate: None,
            annotation_gate: None,
            next_annotation_id: AtomicI64::new(100),
            export_body: b"[]".to_vec(),
        }
    }

    pub fn with_feedback(self, records: Vec<FeedbackRecord>) -> Self {
        *self.feedback.lock().unwrap() = records;
        self
    }

    pub fn with_export_body(mut self, body: &[u8]) -> Self {
        self.export_body = body.to_vec();
        self
    }

    /// Deletes block until the returned semaphore hands out a permit per delete.
    pub fn with_delete_gate(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.delete_gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    /// Annotation creates block until the returned semaphore hands out a permit.
    pub fn with_annotation_gate(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.annotation_gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn fail(&self, method: &'static str) {
        self.failing.lock().unwrap().insert(method);
    }

    pub fn fail_delete_of(&self, id: DocumentId) {
        self.failing_deletes.lock().unwrap().insert(id);
    }

    pub fn add_server_document(&self, document: Document) {
        self.documents.lock().unwrap().push(document);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, method: &'static str) -> Result<(), ApiError> {
        if self.failing.lock().unwrap().contains(method) {
            return Err(ApiError::status(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{} failed", method),
            ));
        }
        Ok(())
    }
}

pub fn documents(ids: &[i64]) -> Vec<Document> {
    ids.iter()
        .map(|id| Document::new(*id, format!("document {}", id)))
        .collect()
}

pub fn store_with(api: FakeApi) -> (DocumentStore<FakeApi>, Arc<FakeApi>) {
    let api = Arc::new(api);
    (DocumentStore::new(Arc::clone(&api)), api)
}

#[async_trait]
impl DocumentApi for FakeApi {
    async fn list_documents(
        &self,
        _project_id: ProjectId,
        options: &SearchOptions,
    ) -> Result<Page<Document>, ApiError> {
        self.record(Call::ListDocuments(options.clone()));
        self.check("list_documents")?;

        let documents = self.documents.lock().unwrap();
        let results = documents
            .iter()
            .skip(options.offset as usize)
            .take(options.limit as usize)
            .cloned()
            .collect();
        Ok(Page {
            count: documents.len() as u64,
            results,
        })
    }

    async fn list_feedback(
        &self,
        _project_id: ProjectId,
        options: &SearchOptions,
    ) -> Result<Page<FeedbackRecord>, ApiError> {
        self.record(Call::ListFeedback(options.clone()));
        self.check("list_feedback")?;

        let feedback = self.feedback.lock().unwrap();
        Ok(Page {
            count: feedback.len() as u64,
            results: feedback.clone(),
        })
    }

    async fn upload_file(
        &self,
        _project_id: ProjectId,
        format: &str,
        file: UploadFile,
    ) -> Result<(), ApiError> {
        self.record(Call::Upload {
            format: format.to_string(),
            file_name: file.file_name.clone(),
        });
        self.check("upload_file")?;

        let mut documents = self.documents.lock().unwrap();
        let id = documents.iter().map(|d| d.id.0).max().unwrap_or(0) + 1;
        documents.push(Document::new(id, String::from_utf8_lossy(&file.bytes)));
        Ok(())
    }

    async fn export_file(&self, _project_id: ProjectId, format: &str) -> Result<Vec<u8>, ApiError> {
        self.record(Call::Export(format.to_string()));
        self.check("export_file")?;
        Ok(self.export_body.clone())
    }

    async fn update_document(
        &self,
        _project_id: ProjectId,
        patch: &DocumentPatch,
    ) -> Result<DocumentPatch, ApiError> {
        self.record(Call::UpdateDocument(patch.id));
        self.check("update_document")?;
        Ok(patch.clone())
    }

    async fn delete_document(
        &self,
        _project_id: ProjectId,
        document_id: DocumentId,
    ) -> Result<(), ApiError> {
        self.record(Call::DeleteDocument(document_id));
        if let Some(gate) = &self.delete_gate {
            gate.acquire().await.expect("delete gate closed").forget();
        }
        self.check("delete_document")?;
        if self.failing_deletes.lock().unwrap().contains(&document_id) {
            return Err(ApiError::status(StatusCode::NOT_FOUND, "Not found."));
        }

        self.documents.lock().unwrap().retain(|d| d.id != document_id);
        Ok(())
    }

    async fn add_annotation(
        &self,
        _project_id: ProjectId,
        document_id: DocumentId,
        payload: &AnnotationPayload,
    ) -> Result<Annotation, ApiError> {
        self.record(Call::AddAnnotation(document_id));
        if let Some(gate) = &self.annotation_gate {
            gate.acquire().await.expect("annotation gate closed").forget();
        }
        self.check("add_annotation")?;

        let id = self.next_annotation_id.fetch_add(1, Ordering::SeqCst);
        Ok(Annotation {
            id: AnnotationId(id),
            fields: payload.0.clone(),
        })
    }

    async fn update_annotation(
        &self,
        _project_id: ProjectId,
        document_id: DocumentId,
        annotation_id: AnnotationId,
        payload: &AnnotationPayload,
    ) -> Result<Annotation, ApiError> {
        self.record(Call::UpdateAnnotation(document_id, annotation_id));
        self.check("update_annotation")?;
        Ok(Annotation {
            id: annotation_id,
            fields: payload.0.clone(),
        })
    }

    async fn delete_annotation(
        &self,
        _project_id: ProjectId,
        document_id: DocumentId,
        annotation_id: AnnotationId,
    ) -> Result<(), ApiError> {
        self.record(Call::DeleteAnnotation(document_id, annotation_id));
        self.check("delete_annotation")
    }

    async fn approve_document(
        &self,
        _project_id: ProjectId,
        document_id: DocumentId,
        approved: bool,
    ) -> Result<DocumentPatch, ApiError> {
        self.record(Call::Approve(document_id, approved));
        self.check("approve_document")?;

        let approver = approved.then(|| APPROVER.to_string());
        Ok(DocumentPatch::new(document_id).approver(approver))
    }

    async fn submit_feedback(
        &self,
        _project_id: ProjectId,
        document_id: DocumentId,
        text: &str,
    ) -> Result<FeedbackRecord, ApiError> {
        self.record(Call::SubmitFeedback(document_id, text.to_string()));
        self.check("submit_feedback")?;
        Ok(FeedbackRecord {
            id: 7,
            text: text.to_string(),
            document: document_id,
            username: Some(APPROVER.to_string()),
        })
    }
}
