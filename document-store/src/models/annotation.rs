use super::AnnotationId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A labeled span or attribute attached to a document.
///
/// Only the identifier is interpreted here; label, offsets and the rest are
/// opaque and kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Annotation {
    pub fn new(id: impl Into<AnnotationId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Overwrite the keys present in `other`, keeping the rest.
    pub fn merge(&mut self, other: Annotation) {
        self.fields.extend(other.fields);
    }
}

/// Body of an add/update annotation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationPayload(pub Map<String, Value>);

impl AnnotationPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}
