use super::{present, Annotation, DocumentId, Feedback};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A unit of content subject to annotation, approval, and feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub meta: Value,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Username of the approver; `None` means not approved.
    #[serde(default)]
    pub annotation_approver: Option<String>,
    #[serde(default)]
    pub document_feedback: Option<Feedback>,
    /// Content fields this client does not interpret (e.g. `created_at`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<DocumentId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            meta: Value::Null,
            annotations: Vec::new(),
            annotation_approver: None,
            document_feedback: None,
            extra: Map::new(),
        }
    }

    pub fn is_approved(&self) -> bool {
        self.annotation_approver.is_some()
    }

    pub fn annotation(&self, id: super::AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    /// Shallow-overwrite every field present in `patch`; absent fields are kept.
    pub fn apply(&mut self, patch: DocumentPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(meta) = patch.meta {
            self.meta = meta;
        }
        if let Some(annotations) = patch.annotations {
            self.annotations = annotations;
        }
        if let Some(approver) = patch.annotation_approver {
            self.annotation_approver = approver;
        }
        if let Some(feedback) = patch.document_feedback {
            self.document_feedback = feedback;
        }
        self.extra.extend(patch.extra);
    }
}

/// Fields to merge into an existing document, identified by `id`.
///
/// Nullable fields are tri-state: `None` leaves the field alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentPatch {
    pub id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub meta: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<Annotation>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub annotation_approver: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub document_feedback: Option<Option<Feedback>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocumentPatch {
    pub fn new(id: impl Into<DocumentId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn approver(mut self, approver: Option<String>) -> Self {
        self.annotation_approver = Some(approver);
        self
    }

    pub fn feedback(mut self, feedback: Option<Feedback>) -> Self {
        self.document_feedback = Some(feedback);
        self
    }
}

impl From<Document> for DocumentPatch {
    fn from(document: Document) -> Self {
        Self {
            id: document.id,
            text: Some(document.text),
            meta: Some(document.meta),
            annotations: Some(document.annotations),
            annotation_approver: Some(document.annotation_approver),
            document_feedback: Some(document.document_feedback),
            extra: document.extra,
        }
    }
}
