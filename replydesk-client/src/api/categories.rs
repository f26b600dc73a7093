use async_trait::async_trait;
use reqwest::Method;
use shared_types::{Category, CategoryPatch, NewCategory};
use std::sync::Arc;

use super::{CreateEndpoint, DeleteEndpoint, ListEndpoint, UpdateEndpoint};
use crate::error::ApiError;
use crate::transport::{RequestBody, RequestOptions, Transport};

#[derive(Clone, Debug)]
pub struct CategoriesApi {
    transport: Arc<Transport>,
}

impl CategoriesApi {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ListEndpoint for CategoriesApi {
    type Item = Category;

    fn resource_name(&self) -> &'static str {
        "categories"
    }

    async fn list(&self, options: RequestOptions) -> Result<Vec<Category>, ApiError> {
        self.transport
            .send(Method::GET, "/categories", RequestBody::Empty, options)
            .await
    }
}

#[async_trait]
impl CreateEndpoint for CategoriesApi {
    type Input = NewCategory;

    async fn create(&self, input: &NewCategory) -> Result<Category, ApiError> {
        self.transport.post("/categories", input).await
    }
}

#[async_trait]
impl UpdateEndpoint for CategoriesApi {
    type Patch = CategoryPatch;

    async fn update(&self, id: &str, patch: &CategoryPatch) -> Result<Category, ApiError> {
        self.transport
            .put(&format!("/categories/{}", id), patch)
            .await
    }
}

#[async_trait]
impl DeleteEndpoint for CategoriesApi {
    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.transport
            .delete(&format!("/categories/{}", id))
            .await
    }
}
