//! Asynchronous store operations.
//!
//! Each operation marks the store as loading, calls the data-access interface,
//! commits the result and clears the loading flag. No state lock is held across
//! a remote call, so concurrent operations apply in completion order.

use super::mutation::Mutation;
use super::state::StoreState;
use crate::error::{Result, StoreError};
use crate::models::{
    Annotation, AnnotationId, AnnotationPayload, Document, DocumentId, DocumentPatch,
    ExportedFile, ProjectId, SearchOptions, UploadRequest,
};
use crate::services::api::DocumentApi;
use crate::services::metrics::record_operation;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{RwLock, RwLockReadGuard};
use tokio::task::{JoinError, JoinHandle};

/// The document store: shared state plus the API it synchronises with.
///
/// Clones share the same state and API handle.
pub struct DocumentStore<A: ?Sized> {
    api: Arc<A>,
    state: Arc<RwLock<StoreState>>,
}

impl<A: ?Sized> Clone for DocumentStore<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
        }
    }
}

/// Result of deleting one selected document.
#[derive(Debug)]
pub struct DeleteOutcome {
    pub document_id: DocumentId,
    pub result: Result<()>,
}

impl DeleteOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Handle on an in-flight bulk delete. Dropping it does not cancel the deletes.
pub struct DeleteBatch {
    document_ids: Vec<DocumentId>,
    handle: JoinHandle<Vec<DeleteOutcome>>,
}

impl DeleteBatch {
    pub fn document_ids(&self) -> &[DocumentId] {
        &self.document_ids
    }

    /// Wait for every delete to finish, in selection order.
    pub async fn settle(self) -> std::result::Result<Vec<DeleteOutcome>, JoinError> {
        self.handle.await
    }
}

impl<A> DocumentStore<A>
where
    A: DocumentApi + ?Sized + 'static,
{
    pub fn new(api: Arc<A>) -> Self {
        Self::with_state(api, StoreState::new())
    }

    pub fn with_state(api: Arc<A>, state: StoreState) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Read access to the state and its derived accessors.
    pub async fn state(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().await
    }

    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }

    pub async fn commit(&self, mutation: Mutation) -> Result<()> {
        self.state.write().await.commit(mutation)
    }

    pub async fn current_doc(&self) -> Option<Document> {
        self.state.read().await.current_doc().cloned()
    }

    pub async fn approved(&self) -> bool {
        self.state.read().await.approved()
    }

    pub async fn is_document_selected(&self) -> bool {
        self.state.read().await.is_document_selected()
    }

    /// Commit several transitions under one lock, stopping at the first failure.
    async fn apply(&self, mutations: Vec<Mutation>) -> Result<()> {
        let mut state = self.state.write().await;
        for mutation in mutations {
            state.commit(mutation)?;
        }
        Ok(())
    }

    async fn set_loading(&self, loading: bool) {
        self.state.write().await.set_loading(loading);
    }

    async fn begin(&self) -> Instant {
        self.set_loading(true).await;
        Instant::now()
    }

    async fn finish<T>(&self, operation: &'static str, started: Instant, result: Result<T>) -> Result<T> {
        self.set_loading(false).await;

        match &result {
            Ok(_) => {
                tracing::debug!(operation, elapsed_ms = started.elapsed().as_millis() as u64, "Store operation completed");
                record_operation(operation, "success", started.elapsed());
            }
            Err(e) => {
                tracing::error!(operation, error = %e, "Store operation failed");
                record_operation(operation, "failure", started.elapsed());
            }
        }

        result
    }

    async fn current_id(&self) -> Result<DocumentId> {
        self.state
            .read()
            .await
            .current_doc()
            .map(|d| d.id)
            .ok_or(StoreError::NoCurrentDocument)
    }

    /// Replace `items` with one page and record the server-side total.
    pub async fn fetch_documents(&self, project_id: ProjectId, options: &SearchOptions) -> Result<()> {
        let started = self.begin().await;

        let result = match self.api.list_documents(project_id, options).await {
            Ok(page) => {
                tracing::info!(
                    project_id = %project_id,
                    count = page.results.len(),
                    total = page.count,
                    "Fetched documents"
                );
                self.apply(vec![
                    Mutation::SetDocumentList(page.results),
                    Mutation::SetTotalItems(page.count),
                ])
                .await
            }
            Err(e) => Err(e.into()),
        };

        self.finish("fetch_documents", started, result).await
    }

    pub async fn fetch_feedback(&self, project_id: ProjectId, options: &SearchOptions) -> Result<()> {
        let started = self.begin().await;

        let result = match self.api.list_feedback(project_id, options).await {
            Ok(page) => {
                tracing::info!(
                    project_id = %project_id,
                    count = page.results.len(),
                    total = page.count,
                    "Fetched feedback"
                );
                self.apply(vec![
                    Mutation::SetDocumentFeedbackList(page.results),
                    Mutation::SetTotalFeedbackItems(page.count),
                ])
                .await
            }
            Err(e) => Err(e.into()),
        };

        self.finish("fetch_feedback", started, result).await
    }

    /// Upload a file, then refresh the list with the request's query.
    pub async fn upload_document(&self, request: UploadRequest) -> Result<()> {
        let started = self.begin().await;
        let UploadRequest {
            project_id,
            format,
            file,
            query,
        } = request;

        let result = match self.api.upload_file(project_id, &format, file).await {
            Ok(()) => self.fetch_documents(project_id, &query).await,
            Err(e) => Err(e.into()),
        };

        self.finish("upload_document", started, result).await
    }

    /// Download the project's documents; writing them out is up to the caller.
    pub async fn export_documents(&self, project_id: ProjectId, format: &str) -> Result<ExportedFile> {
        let started = self.begin().await;

        let result = self
            .api
            .export_file(project_id, format)
            .await
            .map(|bytes| ExportedFile::new(format, bytes))
            .map_err(StoreError::from);

        self.finish("export_documents", started, result).await
    }

    /// Send `patch` and merge the server's version of the document.
    pub async fn update_document(&self, project_id: ProjectId, patch: DocumentPatch) -> Result<()> {
        let started = self.begin().await;

        let result = match self.api.update_document(project_id, &patch).await {
            Ok(updated) => self.commit(Mutation::UpdateDocument(updated)).await,
            Err(e) => Err(e.into()),
        };

        self.finish("update_document", started, result).await
    }

    /// Delete every selected document.
    ///
    /// The selection is cleared before this returns; the deletes run
    /// concurrently and each success removes its document as soon as it lands.
    /// A failure is reported in its outcome and does not stop the others.
    pub async fn delete_selected(&self, project_id: ProjectId) -> DeleteBatch {
        let selected = {
            let mut state = self.state.write().await;
            state.set_loading(true);
            let selected: Vec<DocumentId> = state.selected().iter().map(|d| d.id).collect();
            state.reset_selected();
            selected
        };

        tracing::info!(project_id = %project_id, count = selected.len(), "Deleting selected documents");

        let store = self.clone();
        let document_ids = selected.clone();
        let handle = tokio::spawn(async move {
            let started = Instant::now();

            let deletes = selected.into_iter().map(|document_id| {
                let store = store.clone();
                async move {
                    let result = match store.api.delete_document(project_id, document_id).await {
                        Ok(()) => store.commit(Mutation::DeleteDocument(document_id)).await,
                        Err(e) => {
                            tracing::warn!(document_id = %document_id, error = %e, "Failed to delete document");
                            Err(StoreError::from(e))
                        }
                    };
                    DeleteOutcome {
                        document_id,
                        result,
                    }
                }
            });
            let outcomes = join_all(deletes).await;

            store.set_loading(false).await;
            let outcome = if outcomes.iter().all(DeleteOutcome::is_success) {
                "success"
            } else {
                "failure"
            };
            record_operation("delete_selected", outcome, started.elapsed());

            outcomes
        });

        DeleteBatch {
            document_ids,
            handle,
        }
    }

    /// Create an annotation on the focused document.
    pub async fn add_annotation(
        &self,
        project_id: ProjectId,
        payload: &AnnotationPayload,
    ) -> Result<Annotation> {
        let document_id = self.current_id().await?;
        let started = self.begin().await;

        let result = match self.api.add_annotation(project_id, document_id, payload).await {
            Ok(annotation) => self
                .state
                .write()
                .await
                .add_annotation_for(document_id, annotation.clone())
                .map(|()| annotation),
            Err(e) => Err(e.into()),
        };

        self.finish("add_annotation", started, result).await
    }

    pub async fn update_annotation(
        &self,
        project_id: ProjectId,
        annotation_id: AnnotationId,
        payload: &AnnotationPayload,
    ) -> Result<()> {
        let document_id = self.current_id().await?;
        let started = self.begin().await;

        let result = match self
            .api
            .update_annotation(project_id, document_id, annotation_id, payload)
            .await
        {
            Ok(annotation) => self
                .state
                .write()
                .await
                .update_annotation_for(document_id, annotation),
            Err(e) => Err(e.into()),
        };

        self.finish("update_annotation", started, result).await
    }

    pub async fn delete_annotation(&self, project_id: ProjectId, annotation_id: AnnotationId) -> Result<()> {
        let document_id = self.current_id().await?;
        let started = self.begin().await;

        let result = match self
            .api
            .delete_annotation(project_id, document_id, annotation_id)
            .await
        {
            Ok(()) => self
                .state
                .write()
                .await
                .delete_annotation_for(document_id, annotation_id),
            Err(e) => Err(e.into()),
        };

        self.finish("delete_annotation", started, result).await
    }

    /// Flip approval of the focused document; returns the approval that was requested.
    pub async fn toggle_approval(&self, project_id: ProjectId) -> Result<bool> {
        let (document_id, approved) = {
            let state = self.state.read().await;
            let document = state.current_doc().ok_or(StoreError::NoCurrentDocument)?;
            (document.id, !document.is_approved())
        };
        let started = self.begin().await;

        tracing::info!(project_id = %project_id, document_id = %document_id, approved, "Setting approval");

        let result = match self.api.approve_document(project_id, document_id, approved).await {
            Ok(updated) => self
                .commit(Mutation::UpdateDocument(updated))
                .await
                .map(|()| approved),
            Err(e) => Err(e.into()),
        };

        self.finish("toggle_approval", started, result).await
    }

    /// Attach feedback to the focused document.
    pub async fn submit_feedback(&self, project_id: ProjectId, text: &str) -> Result<()> {
        let document_id = self.current_id().await?;
        let started = self.begin().await;

        let result = match self.api.submit_feedback(project_id, document_id, text).await {
            Ok(record) => self.commit(Mutation::UpdateDocument(record.into_patch())).await,
            Err(e) => Err(e.into()),
        };

        self.finish("submit_feedback", started, result).await
    }
}
