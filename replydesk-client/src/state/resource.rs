use futures_util::future::BoxFuture;
use std::future::Future;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::error::ApiError;
use crate::transport::RequestOptions;

/// Lifecycle of one server-backed value.
///
/// `Loading` and `Failed` keep the last known value so screens can keep
/// showing it while a reload is in flight or after one failed.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    Idle,
    Loading { previous: Option<T> },
    Ready(T),
    Failed { message: String, previous: Option<T> },
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        ResourceState::Idle
    }
}

impl<T> ResourceState<T> {
    /// Latest known value, whatever the current phase
    pub fn data(&self) -> Option<&T> {
        match self {
            ResourceState::Idle => None,
            ResourceState::Loading { previous } | ResourceState::Failed { previous, .. } => {
                previous.as_ref()
            }
            ResourceState::Ready(value) => Some(value),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResourceState::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResourceState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    fn into_data(self) -> Option<T> {
        match self {
            ResourceState::Idle => None,
            ResourceState::Loading { previous } | ResourceState::Failed { previous, .. } => {
                previous
            }
            ResourceState::Ready(value) => Some(value),
        }
    }

    fn begin_loading(&mut self) {
        let previous = std::mem::take(self).into_data();
        *self = ResourceState::Loading { previous };
    }

    fn fail(&mut self, message: String) {
        let previous = std::mem::take(self).into_data();
        *self = ResourceState::Failed { message, previous };
    }
}

type Loader<T> = Arc<dyn Fn(RequestOptions) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

/// State plus the bookkeeping for overlapping loads
struct Slot<T> {
    state: ResourceState<T>,
    in_flight: usize,
    /// Error to show once the last in-flight load settles
    pending_error: Option<String>,
}

impl<T> Slot<T> {
    fn begin(&mut self) {
        if self.in_flight == 0 {
            self.pending_error = self.state.error().map(str::to_string);
            self.state.begin_loading();
        }
        self.in_flight += 1;
    }

    /// Put `value` in place as the latest data without ending a running load
    fn replace(&mut self, value: Option<T>) {
        let value = match value {
            Some(value) => Some(value),
            None => std::mem::take(&mut self.state).into_data(),
        };
        self.state = if self.in_flight > 0 {
            ResourceState::Loading { previous: value }
        } else {
            match (self.pending_error.take(), value) {
                (Some(message), previous) => ResourceState::Failed { message, previous },
                (None, Some(value)) => ResourceState::Ready(value),
                (None, None) => ResourceState::Idle,
            }
        };
    }

    fn settle(&mut self, value: Option<T>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.replace(value);
    }
}

/// Shared handle to a [`ResourceState`] plus the loader that last filled it.
///
/// Clones share state, so a background task can settle a load that a
/// screen is watching. Overlapping loads keep the resource `Loading` until
/// the last one settles.
pub struct Resource<T> {
    name: &'static str,
    slot: Arc<RwLock<Slot<T>>>,
    last_loader: Arc<Mutex<Option<Loader<T>>>>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            slot: Arc::clone(&self.slot),
            last_loader: Arc::clone(&self.last_loader),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Resource<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: Arc::new(RwLock::new(Slot {
                state: ResourceState::Idle,
                in_flight: 0,
                pending_error: None,
            })),
            last_loader: Arc::new(Mutex::new(None)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> ResourceState<T> {
        self.read().state.clone()
    }

    pub fn data(&self) -> Option<T> {
        self.read().state.data().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.read().state.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.read().state.error().map(str::to_string)
    }

    /// Run `future` as a load of this resource.
    ///
    /// Loading is set before the future is polled and cleared once this and
    /// every other load of the resource has settled. Success replaces the
    /// value and clears the error. Failure records the message and keeps the
    /// previous value. A cancelled load, or one whose `cancel` fires before
    /// the result is applied, changes nothing: edits made while it ran are
    /// kept and an earlier error comes back. Returns whether a value was
    /// applied.
    pub async fn track<F>(&self, cancel: Option<&CancelToken>, future: F) -> bool
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.write().begin();

        let result = future.await;
        let cancelled = cancel.map(CancelToken::is_cancelled).unwrap_or(false);

        let mut slot = self.write();
        match result {
            _ if cancelled => {
                debug!("Discarding cancelled {} load", self.name);
                slot.settle(None);
                false
            }
            Err(ApiError::Cancelled) => {
                debug!("{} load cancelled", self.name);
                slot.settle(None);
                false
            }
            Ok(value) => {
                slot.pending_error = None;
                slot.settle(Some(value));
                true
            }
            Err(e) => {
                warn!("Failed to load {}: {}", self.name, e);
                slot.pending_error = Some(e.user_message());
                slot.settle(None);
                false
            }
        }
    }

    /// Remember `loader` for [`Resource::retry`] and run it once with `options`
    pub async fn load_with<L, Fut>(&self, loader: L, options: RequestOptions) -> bool
    where
        L: Fn(RequestOptions) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let loader: Loader<T> = Arc::new(
            move |options| -> BoxFuture<'static, Result<T, ApiError>> { Box::pin(loader(options)) },
        );
        *self.loader_slot() = Some(Arc::clone(&loader));

        let cancel = options.cancel.clone();
        self.track(cancel.as_ref(), loader(options)).await
    }

    /// Re-run the last loader. False if nothing was ever loaded.
    pub async fn retry(&self) -> bool {
        let loader = self.loader_slot().clone();
        match loader {
            Some(loader) => self.track(None, loader(RequestOptions::default())).await,
            None => false,
        }
    }

    /// Replace the value outright (mutation results). A running load stays
    /// running. A recorded error is cleared.
    pub fn set(&self, value: T) {
        let mut slot = self.write();
        slot.pending_error = None;
        slot.replace(Some(value));
    }

    /// Record an error without touching the value. While a load is running
    /// the error is held until it settles.
    pub fn record_error(&self, message: impl Into<String>) {
        let mut slot = self.write();
        if slot.in_flight > 0 {
            slot.pending_error = Some(message.into());
        } else {
            slot.state.fail(message.into());
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Slot<T>> {
        self.slot.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Slot<T>> {
        self.slot.write().unwrap_or_else(|e| e.into_inner())
    }

    fn loader_slot(&self) -> std::sync::MutexGuard<'_, Option<Loader<T>>> {
        self.last_loader.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T: Clone + Default + Send + Sync + 'static> Resource<T> {
    /// Apply a local edit after a successful mutation.
    ///
    /// An in-flight load stays in flight and the edit lands on its previous
    /// value. A recorded error is cleared.
    pub fn modify(&self, edit: impl FnOnce(&mut T)) {
        let mut slot = self.write();
        let mut value = std::mem::take(&mut slot.state)
            .into_data()
            .unwrap_or_default();
        edit(&mut value);
        slot.pending_error = None;
        slot.replace(Some(value));
    }
}

impl<T> std::fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_then_failure_keeps_previous() {
        let resource: Resource<Vec<u32>> = Resource::new("numbers");

        assert!(resource.track(None, async { Ok(vec![1, 2]) }).await);
        assert_eq!(resource.state(), ResourceState::Ready(vec![1, 2]));

        let applied = resource
            .track(None, async { Err(ApiError::network("down")) })
            .await;
        assert!(!applied);
        assert!(!resource.is_loading());
        assert_eq!(resource.data(), Some(vec![1, 2]));
        assert_eq!(resource.error().as_deref(), Some("down"));
    }

    #[tokio::test]
    async fn test_loading_is_visible_while_pending() {
        let resource: Resource<u32> = Resource::new("value");
        resource.set(7);

        let observer = resource.clone();
        let applied = resource
            .track(None, async move {
                assert!(observer.is_loading());
                assert_eq!(observer.data(), Some(7));
                Ok(8)
            })
            .await;

        assert!(applied);
        assert!(!resource.is_loading());
        assert_eq!(resource.data(), Some(8));
    }

    #[tokio::test]
    async fn test_cancelled_load_restores_prior_state() {
        let resource: Resource<u32> = Resource::new("value");
        resource.record_error("earlier failure");

        let token = CancelToken::new();
        token.cancel();
        let applied = resource.track(Some(&token), async { Ok(99) }).await;

        assert!(!applied);
        assert_eq!(resource.data(), None);
        assert_eq!(resource.error().as_deref(), Some("earlier failure"));
    }

    #[tokio::test]
    async fn test_retry_reruns_last_loader() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let resource: Resource<u32> = Resource::new("counter");
        assert!(!resource.retry().await);

        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        resource
            .load_with(
                move |_options| {
                    let counter = Arc::clone(&counter);
                    async move { Ok(counter.fetch_add(1, Ordering::SeqCst) + 1) }
                },
                RequestOptions::default(),
            )
            .await;
        assert_eq!(resource.data(), Some(1));

        assert!(resource.retry().await);
        assert_eq!(resource.data(), Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_edit_during_cancelled_load_is_kept() {
        let resource: Resource<Vec<u32>> = Resource::new("numbers");
        resource.set(vec![1]);

        let token = CancelToken::new();
        let editor = resource.clone();
        let canceller = token.clone();
        let applied = resource
            .track(Some(&token), async move {
                editor.modify(|items| items.push(2));
                assert!(editor.is_loading());
                canceller.cancel();
                Err(ApiError::Cancelled)
            })
            .await;

        assert!(!applied);
        assert_eq!(resource.state(), ResourceState::Ready(vec![1, 2]));
    }

    #[tokio::test]
    async fn test_cancelled_load_keeps_overlapping_load_visible() {
        use futures_util::poll;
        use tokio::sync::oneshot;

        let resource: Resource<Vec<u32>> = Resource::new("numbers");
        let token = CancelToken::new();
        let (release_first, first_reply) = oneshot::channel::<Result<Vec<u32>, ApiError>>();
        let (release_second, second_reply) = oneshot::channel::<Result<Vec<u32>, ApiError>>();

        let mut first = Box::pin(resource.track(Some(&token), async move {
            first_reply.await.unwrap_or(Err(ApiError::Cancelled))
        }));
        assert!(poll!(&mut first).is_pending());
        let mut second = Box::pin(resource.track(None, async move {
            second_reply.await.unwrap_or(Err(ApiError::Cancelled))
        }));
        assert!(poll!(&mut second).is_pending());

        token.cancel();
        let _ = release_first.send(Err(ApiError::Cancelled));
        assert!(!first.await);
        assert!(resource.is_loading());

        let _ = release_second.send(Ok(vec![3]));
        assert!(second.await);
        assert_eq!(resource.state(), ResourceState::Ready(vec![3]));
    }

    #[tokio::test]
    async fn test_overlapping_failure_shows_after_last_load() {
        let resource: Resource<u32> = Resource::new("value");
        let inner = resource.clone();

        let applied = resource
            .track(None, async move {
                assert!(!inner.track(None, async { Err(ApiError::network("down")) }).await);
                assert!(inner.is_loading());
                assert!(inner.error().is_none());
                Err(ApiError::network("still down"))
            })
            .await;

        assert!(!applied);
        assert!(!resource.is_loading());
        assert_eq!(resource.error().as_deref(), Some("still down"));
    }

    #[tokio::test]
    async fn test_set_during_load_keeps_loading() {
        let resource: Resource<u32> = Resource::new("value");
        let writer = resource.clone();

        let applied = resource
            .track(None, async move {
                writer.set(5);
                assert!(writer.is_loading());
                assert_eq!(writer.data(), Some(5));
                Ok(6)
            })
            .await;

        assert!(applied);
        assert_eq!(resource.state(), ResourceState::Ready(6));
    }

    #[test]
    fn test_modify_clears_error() {
        let resource: Resource<Vec<u32>> = Resource::new("numbers");
        resource.set(vec![1]);
        resource.record_error("save failed");

        resource.modify(|items| items.push(2));
        assert_eq!(resource.state(), ResourceState::Ready(vec![1, 2]));
    }
}
