use shared_types::Entity;
use std::sync::Arc;
use tracing::{debug, warn};

use super::resource::{Resource, ResourceState};
use crate::api::{CreateEndpoint, DeleteEndpoint, ListEndpoint, UpdateEndpoint};
use crate::cancel::CancelToken;
use crate::error::ApiError;
use crate::transport::RequestOptions;

/// Client-side copy of one server collection.
///
/// `load` replaces the list wholesale, mutations patch it locally from the
/// server's answer. Failures are recorded on the resource and never reach
/// the caller as errors; every operation reports success as a `bool`.
pub struct Collection<A: ListEndpoint> {
    endpoint: Arc<A>,
    resource: Resource<Vec<A::Item>>,
}

impl<A: ListEndpoint> Clone for Collection<A> {
    fn clone(&self) -> Self {
        Self {
            endpoint: Arc::clone(&self.endpoint),
            resource: self.resource.clone(),
        }
    }
}

impl<A: ListEndpoint> Collection<A> {
    pub fn new(endpoint: A) -> Self {
        let resource = Resource::new(endpoint.resource_name());
        Self {
            endpoint: Arc::new(endpoint),
            resource,
        }
    }

    pub fn endpoint(&self) -> &A {
        &self.endpoint
    }

    pub fn resource(&self) -> &Resource<Vec<A::Item>> {
        &self.resource
    }

    pub fn state(&self) -> ResourceState<Vec<A::Item>> {
        self.resource.state()
    }

    /// Latest known items, empty before the first load
    pub fn items(&self) -> Vec<A::Item> {
        self.resource.data().unwrap_or_default()
    }

    pub fn get(&self, id: &str) -> Option<A::Item> {
        self.items().into_iter().find(|item| item.id() == id)
    }

    pub fn is_loading(&self) -> bool {
        self.resource.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.resource.error()
    }

    pub async fn load(&self) -> bool {
        self.load_with_options(RequestOptions::default()).await
    }

    /// Load unless `cancel` fires first. A cancelled load leaves the state
    /// as it was before the call.
    pub async fn load_cancellable(&self, cancel: CancelToken) -> bool {
        self.load_with_options(RequestOptions::default().with_cancel(cancel))
            .await
    }

    async fn load_with_options(&self, options: RequestOptions) -> bool {
        let endpoint = Arc::clone(&self.endpoint);
        let loaded = self
            .resource
            .load_with(
                move |options| {
                    let endpoint = Arc::clone(&endpoint);
                    async move { endpoint.list(options).await }
                },
                options,
            )
            .await;

        if loaded {
            debug!(
                "Loaded {} {}",
                self.items().len(),
                self.endpoint.resource_name()
            );
        }
        loaded
    }

    pub async fn retry(&self) -> bool {
        self.resource.retry().await
    }

    /// Record a failed mutation, keeping the current items
    pub(crate) fn record_failure(&self, action: &str, error: &ApiError) {
        warn!(
            "Failed to {} {}: {}",
            action,
            self.endpoint.resource_name(),
            error
        );
        self.resource.record_error(error.user_message());
    }

    /// Patch the entity with `id` in place. No-op if it is not loaded.
    pub(crate) fn edit_item(&self, id: &str, edit: impl FnOnce(&mut A::Item)) {
        self.resource.modify(|items| {
            if let Some(item) = items.iter_mut().find(|item| item.id() == id) {
                edit(item);
            }
        });
    }

    pub(crate) fn remove_local(&self, id: &str) {
        self.resource
            .modify(|items| items.retain(|item| item.id() != id));
    }
}

impl<A: CreateEndpoint> Collection<A> {
    /// Create on the server and append the entity it returns
    pub async fn create(&self, input: &A::Input) -> bool {
        match self.endpoint.create(input).await {
            Ok(item) => {
                debug!("Created {} {}", self.endpoint.resource_name(), item.id());
                self.resource.modify(|items| items.push(item));
                true
            }
            Err(e) => {
                self.record_failure("create", &e);
                false
            }
        }
    }
}

impl<A: UpdateEndpoint> Collection<A> {
    /// Update on the server and replace the local entity with the server's version
    pub async fn update(&self, id: &str, patch: &A::Patch) -> bool {
        match self.endpoint.update(id, patch).await {
            Ok(updated) => {
                self.edit_item(id, |item| *item = updated);
                true
            }
            Err(e) => {
                self.record_failure("update", &e);
                false
            }
        }
    }
}

impl<A: DeleteEndpoint> Collection<A> {
    pub async fn remove(&self, id: &str) -> bool {
        match self.endpoint.delete(id).await {
            Ok(()) => {
                self.remove_local(id);
                true
            }
            Err(e) => {
                self.record_failure("delete", &e);
                false
            }
        }
    }
}

impl<A: ListEndpoint> std::fmt::Debug for Collection<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("resource", &self.endpoint.resource_name())
            .field("loading", &self.is_loading())
            .finish()
    }
}
