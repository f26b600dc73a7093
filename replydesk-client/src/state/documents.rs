use std::path::Path;

use super::Collection;
use crate::api::{DocumentUpload, DocumentsApi};

impl Collection<DocumentsApi> {
    /// Read a file from disk and upload it. The document kind comes from
    /// the file extension; unsupported files fail without a network call.
    pub async fn upload_path(&self, path: &Path, category_ids: Vec<String>) -> bool {
        match DocumentUpload::from_path(path, category_ids).await {
            Ok(upload) => self.create(&upload).await,
            Err(e) => {
                self.record_failure("upload", &e);
                false
            }
        }
    }
}
