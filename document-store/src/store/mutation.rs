use super::state::StoreState;
use crate::error::Result;
use crate::models::{
    Annotation, AnnotationId, Document, DocumentId, DocumentPatch, FeedbackRecord,
    SearchOptionsPatch,
};

/// Every synchronous state transition the store accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetCurrent(usize),
    Focus(DocumentId),
    SetDocumentList(Vec<Document>),
    SetDocumentFeedbackList(Vec<FeedbackRecord>),
    AddDocument(Document),
    DeleteDocument(DocumentId),
    UpdateSelected(Vec<Document>),
    ResetSelected,
    UpdateDocument(DocumentPatch),
    UpdateFeedback { document: DocumentId, text: String },
    SetLoading(bool),
    SetTotalItems(u64),
    SetTotalFeedbackItems(u64),
    /// Applies to the focused document.
    AddAnnotation(Annotation),
    /// Applies to the focused document.
    DeleteAnnotation(AnnotationId),
    /// Applies to the focused document.
    UpdateAnnotation(Annotation),
    UpdateSearchOptions(SearchOptionsPatch),
    InitSearchOptions,
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetCurrent(_) => "set_current",
            Mutation::Focus(_) => "focus",
            Mutation::SetDocumentList(_) => "set_document_list",
            Mutation::SetDocumentFeedbackList(_) => "set_document_feedback_list",
            Mutation::AddDocument(_) => "add_document",
            Mutation::DeleteDocument(_) => "delete_document",
            Mutation::UpdateSelected(_) => "update_selected",
            Mutation::ResetSelected => "reset_selected",
            Mutation::UpdateDocument(_) => "update_document",
            Mutation::UpdateFeedback { .. } => "update_feedback",
            Mutation::SetLoading(_) => "set_loading",
            Mutation::SetTotalItems(_) => "set_total_items",
            Mutation::SetTotalFeedbackItems(_) => "set_total_feedback_items",
            Mutation::AddAnnotation(_) => "add_annotation",
            Mutation::DeleteAnnotation(_) => "delete_annotation",
            Mutation::UpdateAnnotation(_) => "update_annotation",
            Mutation::UpdateSearchOptions(_) => "update_search_options",
            Mutation::InitSearchOptions => "init_search_options",
        }
    }
}

impl StoreState {
    /// Apply one transition. On error the state is left as it was.
    pub fn commit(&mut self, mutation: Mutation) -> Result<()> {
        tracing::trace!(mutation = mutation.name(), "commit");

        match mutation {
            Mutation::SetCurrent(index) => self.set_current(index),
            Mutation::Focus(id) => self.focus(id),
            Mutation::SetDocumentList(items) => self.set_document_list(items),
            Mutation::SetDocumentFeedbackList(items) => self.set_document_feedback_list(items),
            Mutation::AddDocument(document) => self.add_document(document),
            Mutation::DeleteDocument(id) => self.delete_document(id),
            Mutation::UpdateSelected(selected) => self.update_selected(selected),
            Mutation::ResetSelected => self.reset_selected(),
            Mutation::UpdateDocument(patch) => return self.update_document(patch),
            Mutation::UpdateFeedback { document, text } => {
                return self.update_feedback(document, text);
            }
            Mutation::SetLoading(loading) => self.set_loading(loading),
            Mutation::SetTotalItems(total) => self.set_total_items(total),
            Mutation::SetTotalFeedbackItems(total) => self.set_total_feedback_items(total),
            Mutation::AddAnnotation(annotation) => return self.add_annotation(annotation),
            Mutation::DeleteAnnotation(id) => return self.delete_annotation(id),
            Mutation::UpdateAnnotation(annotation) => return self.update_annotation(annotation),
            Mutation::UpdateSearchOptions(patch) => self.update_search_options(patch),
            Mutation::InitSearchOptions => self.init_search_options(),
        }
        Ok(())
    }
}
