pub mod annotation;
pub mod document;
pub mod feedback;
pub mod search;
pub mod transfer;

pub use annotation::{Annotation, AnnotationPayload};
pub use document::{Document, DocumentPatch};
pub use feedback::{Feedback, FeedbackRecord, FeedbackSubmission};
pub use search::{Page, SearchOptions, SearchOptionsPatch};
pub use transfer::{ExportedFile, UploadFile, UploadRequest};

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// Server-side identifier of a project.
    ProjectId
);
define_id!(
    /// Server-side identifier of a document.
    DocumentId
);
define_id!(
    /// Server-side identifier of an annotation.
    AnnotationId
);

/// Deserialize a field that is present in the payload, keeping an explicit `null`.
///
/// Paired with `#[serde(default)]`: a missing key yields `None`, while `null`
/// yields `Some` of whatever `T` makes of it (`Some(None)` for `Option<Option<_>>`).
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
