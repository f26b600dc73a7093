use async_trait::async_trait;
use reqwest::Method;
use shared_types::{CompanyDocument, DocumentKind};
use std::path::Path;
use std::sync::Arc;

use super::{CreateEndpoint, DeleteEndpoint, ListEndpoint};
use crate::error::ApiError;
use crate::transport::{RequestBody, RequestOptions, Transport, Upload};

/// A file queued for `POST /documents/upload`
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
    pub category_ids: Vec<String>,
}

impl DocumentUpload {
    pub fn new(
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        category_ids: Vec<String>,
    ) -> Result<Self, ApiError> {
        let file_name = file_name.into();
        let kind = DocumentKind::from_filename(&file_name).ok_or_else(|| {
            ApiError::invalid_request(format!(
                "Unsupported document type: {} (expected pdf, doc, docx or txt)",
                file_name
            ))
        })?;

        Ok(Self {
            file_name,
            kind,
            bytes,
            category_ids,
        })
    }

    pub async fn from_path(path: &Path, category_ids: Vec<String>) -> Result<Self, ApiError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ApiError::invalid_request("Upload path has no file name"))?
            .to_string();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ApiError::invalid_request(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::new(file_name, bytes, category_ids)
    }

    fn into_upload(self) -> Upload {
        Upload {
            field_name: "file".to_string(),
            mime_type: self.kind.mime_type().to_string(),
            file_name: self.file_name,
            bytes: self.bytes,
            fields: vec![("categoryIds".to_string(), self.category_ids.join(","))],
        }
    }
}

#[derive(Clone, Debug)]
pub struct DocumentsApi {
    transport: Arc<Transport>,
}

impl DocumentsApi {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub async fn upload(&self, upload: DocumentUpload) -> Result<CompanyDocument, ApiError> {
        self.transport
            .send(
                Method::POST,
                "/documents/upload",
                RequestBody::Multipart(upload.into_upload()),
                RequestOptions::default(),
            )
            .await
    }
}

#[async_trait]
impl ListEndpoint for DocumentsApi {
    type Item = CompanyDocument;

    fn resource_name(&self) -> &'static str {
        "documents"
    }

    async fn list(&self, options: RequestOptions) -> Result<Vec<CompanyDocument>, ApiError> {
        self.transport
            .send(Method::GET, "/documents", RequestBody::Empty, options)
            .await
    }
}

#[async_trait]
impl CreateEndpoint for DocumentsApi {
    type Input = DocumentUpload;

    async fn create(&self, input: &DocumentUpload) -> Result<CompanyDocument, ApiError> {
        self.upload(input.clone()).await
    }
}

#[async_trait]
impl DeleteEndpoint for DocumentsApi {
    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.transport.delete(&format!("/documents/{}", id)).await
    }
}
