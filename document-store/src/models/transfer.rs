use super::{ProjectId, SearchOptions};

/// A file to import into a project.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub project_id: ProjectId,
    /// Import format understood by the server (`plain`, `csv`, `json`, `conll`...).
    pub format: String,
    pub file: UploadFile,
    /// Query used to refresh the document list once the upload succeeds.
    pub query: SearchOptions,
}

/// An export payload, ready to be written out by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub file_name: String,
    pub format: String,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    pub fn new(format: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("file.{}", format),
            format: format.to_string(),
            bytes,
        }
    }
}
