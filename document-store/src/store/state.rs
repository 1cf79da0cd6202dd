//! In-memory snapshot of the current page of documents and the transitions over it.
//!
//! The focused ("current") document is tracked by id and resolved against
//! `items` on every read, so inserting or removing other documents never
//! changes which document is current.

use crate::error::{Result, StoreError};
use crate::models::{
    Annotation, AnnotationId, Document, DocumentId, DocumentPatch, Feedback, FeedbackRecord,
    SearchOptions, SearchOptionsPatch,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    items: Vec<Document>,
    feedback_items: Vec<FeedbackRecord>,
    selected: Vec<Document>,
    loading: bool,
    focus: Option<DocumentId>,
    total: u64,
    total_feedback: u64,
    search_options: SearchOptions,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    // Read accessors

    pub fn items(&self) -> &[Document] {
        &self.items
    }

    pub fn feedback_items(&self) -> &[FeedbackRecord] {
        &self.feedback_items
    }

    pub fn selected(&self) -> &[Document] {
        &self.selected
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_feedback(&self) -> u64 {
        self.total_feedback
    }

    pub fn search_options(&self) -> &SearchOptions {
        &self.search_options
    }

    pub fn is_document_selected(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn focused_id(&self) -> Option<DocumentId> {
        self.focus
    }

    /// Position of the focused document in `items`.
    pub fn current_index(&self) -> Option<usize> {
        let focus = self.focus?;
        self.items.iter().position(|d| d.id == focus)
    }

    pub fn current_doc(&self) -> Option<&Document> {
        self.current_index().map(|i| &self.items[i])
    }

    /// False when nothing is focused.
    pub fn approved(&self) -> bool {
        self.current_doc().is_some_and(Document::is_approved)
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.current_doc()
            .and_then(|d| d.document_feedback.as_ref())
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.items.iter().find(|d| d.id == id)
    }

    fn document_mut(&mut self, id: DocumentId) -> Result<&mut Document> {
        self.items
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(StoreError::DocumentNotFound(id))
    }

    fn current_id(&self) -> Result<DocumentId> {
        self.current_doc()
            .map(|d| d.id)
            .ok_or(StoreError::NoCurrentDocument)
    }

    // Focus

    /// Focus the document at `index`; an out-of-range index leaves nothing focused.
    pub fn set_current(&mut self, index: usize) {
        self.focus = self.items.get(index).map(|d| d.id);
    }

    pub fn focus(&mut self, id: DocumentId) {
        self.focus = Some(id);
    }

    // List transitions

    /// Replace the page wholesale. Focus falls back to the first item when the
    /// focused document is not on the new page.
    pub fn set_document_list(&mut self, items: Vec<Document>) {
        self.items = items;
        if self.current_index().is_none() {
            self.focus = self.items.first().map(|d| d.id);
        }
    }

    pub fn set_document_feedback_list(&mut self, items: Vec<FeedbackRecord>) {
        self.feedback_items = items;
    }

    pub fn set_total_items(&mut self, total: u64) {
        self.total = total;
    }

    pub fn set_total_feedback_items(&mut self, total: u64) {
        self.total_feedback = total;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn add_document(&mut self, document: Document) {
        if self.current_index().is_none() {
            self.focus = Some(document.id);
        }
        self.items.insert(0, document);
    }

    /// Remove every item with `id`, preserving the order of the rest.
    ///
    /// If it was focused, focus moves to the document that takes its place.
    pub fn delete_document(&mut self, id: DocumentId) {
        let position = self.items.iter().position(|d| d.id == id);
        self.items.retain(|d| d.id != id);

        if self.focus == Some(id) {
            self.focus = position
                .and_then(|p| self.items.get(p).or(self.items.last()))
                .map(|d| d.id);
        }
    }

    pub fn update_selected(&mut self, selected: Vec<Document>) {
        self.selected = selected;
    }

    pub fn reset_selected(&mut self) {
        self.selected.clear();
    }

    /// Merge `patch` into the item with the same id.
    pub fn update_document(&mut self, patch: DocumentPatch) -> Result<()> {
        self.document_mut(patch.id)?.apply(patch);
        Ok(())
    }

    /// Set the feedback text of `document`, creating the feedback record if absent.
    pub fn update_feedback(&mut self, document: DocumentId, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        let item = self.document_mut(document)?;
        match item.document_feedback.as_mut() {
            Some(feedback) => feedback.text = text,
            None => item.document_feedback = Some(Feedback::new(text)),
        }
        Ok(())
    }

    // Annotation transitions on the focused document

    pub fn add_annotation(&mut self, annotation: Annotation) -> Result<()> {
        let id = self.current_id()?;
        self.add_annotation_for(id, annotation)
    }

    pub fn delete_annotation(&mut self, annotation_id: AnnotationId) -> Result<()> {
        let id = self.current_id()?;
        self.delete_annotation_for(id, annotation_id)
    }

    pub fn update_annotation(&mut self, annotation: Annotation) -> Result<()> {
        let id = self.current_id()?;
        self.update_annotation_for(id, annotation)
    }

    // Annotation transitions on a given document

    /// Append `annotation`; an existing annotation with the same id is merged instead.
    pub fn add_annotation_for(&mut self, document: DocumentId, annotation: Annotation) -> Result<()> {
        let annotations = &mut self.document_mut(document)?.annotations;
        match annotations.iter_mut().find(|a| a.id == annotation.id) {
            Some(existing) => existing.merge(annotation),
            None => annotations.push(annotation),
        }
        Ok(())
    }

    pub fn delete_annotation_for(
        &mut self,
        document: DocumentId,
        annotation_id: AnnotationId,
    ) -> Result<()> {
        self.document_mut(document)?
            .annotations
            .retain(|a| a.id != annotation_id);
        Ok(())
    }

    pub fn update_annotation_for(
        &mut self,
        document: DocumentId,
        annotation: Annotation,
    ) -> Result<()> {
        let existing = self
            .document_mut(document)?
            .annotations
            .iter_mut()
            .find(|a| a.id == annotation.id)
            .ok_or(StoreError::AnnotationNotFound(annotation.id))?;
        existing.merge(annotation);
        Ok(())
    }

    // Search options

    pub fn update_search_options(&mut self, patch: SearchOptionsPatch) {
        self.search_options.apply(patch);
    }

    pub fn init_search_options(&mut self) {
        self.search_options = SearchOptions::default();
    }
}
