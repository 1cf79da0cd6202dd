use super::{DocumentId, DocumentPatch};
use serde::{Deserialize, Serialize};

/// Reviewer commentary as embedded in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub text: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub document: Option<DocumentId>,
}

impl Feedback {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            user: None,
            document: None,
        }
    }
}

/// Feedback as returned by the feedback endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: i64,
    pub text: String,
    pub document: DocumentId,
    #[serde(default)]
    pub username: Option<String>,
}

impl FeedbackRecord {
    /// Reshape into a patch that sets the owning document's embedded feedback.
    pub fn into_patch(self) -> DocumentPatch {
        let feedback = Feedback {
            text: self.text,
            user: self.username,
            document: Some(self.document),
        };
        DocumentPatch::new(self.document).feedback(Some(feedback))
    }
}

/// Body of a submit-feedback request.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackSubmission<'a> {
    pub text: &'a str,
    pub document: DocumentId,
}
