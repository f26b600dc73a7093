use shared_types::{ConnectionTest, ConnectionTestResult, MailboxConfig, MailboxPatch, MailboxSetup};
use tracing::{info, warn};

use super::resource::{Resource, ResourceState};
use crate::api::MailboxApi;
use crate::cancel::CancelToken;
use crate::error::ApiError;
use crate::transport::RequestOptions;

/// The single mailbox configuration. `None` until one is set up.
#[derive(Clone, Debug)]
pub struct MailboxContainer {
    api: MailboxApi,
    resource: Resource<Option<MailboxConfig>>,
}

impl MailboxContainer {
    pub fn new(api: MailboxApi) -> Self {
        Self {
            api,
            resource: Resource::new("mailbox"),
        }
    }

    pub fn resource(&self) -> &Resource<Option<MailboxConfig>> {
        &self.resource
    }

    pub fn state(&self) -> ResourceState<Option<MailboxConfig>> {
        self.resource.state()
    }

    pub fn config(&self) -> Option<MailboxConfig> {
        self.resource.data().flatten()
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

    pub async fn load_cancellable(&self, cancel: CancelToken) -> bool {
        self.load_with_options(RequestOptions::default().with_cancel(cancel))
            .await
    }

    async fn load_with_options(&self, options: RequestOptions) -> bool {
        let api = self.api.clone();
        self.resource
            .load_with(
                move |options| {
                    let api = api.clone();
                    async move { api.configuration(options).await }
                },
                options,
            )
            .await
    }

    pub async fn save(&self, patch: &MailboxPatch) -> bool {
        let result = self.api.update(patch).await;
        self.apply("update mailbox", result)
    }

    pub async fn configure(&self, setup: &MailboxSetup) -> bool {
        let result = self.api.configure(setup).await;
        if result.is_ok() {
            info!("Mailbox {} configured", setup.email);
        }
        self.apply("configure mailbox", result)
    }

    /// Check credentials without saving them. Transport failures come back
    /// as a failed result carrying the error message.
    pub async fn test_connection(&self, test: &ConnectionTest) -> ConnectionTestResult {
        match self.api.test_connection(test).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Connection test for {} failed: {}", test.email, e);
                ConnectionTestResult {
                    ok: false,
                    message: Some(e.user_message()),
                }
            }
        }
    }

    /// Start or stop the server-side monitor for the configured mailbox
    pub async fn set_monitoring(&self, monitoring: bool) -> bool {
        let Some(config) = self.config() else {
            self.resource.record_error("No mailbox configured");
            return false;
        };

        let result = if monitoring {
            self.api.start_monitoring(config.id).await
        } else {
            self.api.stop_monitoring(config.id).await
        };

        match result {
            Ok(()) => {
                info!(
                    "Monitoring {} for {}",
                    if monitoring { "started" } else { "stopped" },
                    config.email
                );
                self.resource.modify(|current| {
                    if let Some(config) = current {
                        config.monitoring = monitoring;
                    }
                });
                true
            }
            Err(e) => {
                warn!("Failed to change monitoring: {}", e);
                self.resource.record_error(e.user_message());
                false
            }
        }
    }

    pub async fn toggle_auto_reply(&self) -> bool {
        let Some(config) = self.config() else {
            self.resource.record_error("No mailbox configured");
            return false;
        };
        let result = self.api.toggle_auto_reply(config.id).await;
        self.apply("toggle auto-reply", result)
    }

    fn apply(&self, action: &str, result: Result<MailboxConfig, ApiError>) -> bool {
        match result {
            Ok(config) => {
                self.resource.set(Some(config));
                true
            }
            Err(e) => {
                warn!("Failed to {}: {}", action, e);
                self.resource.record_error(e.user_message());
                false
            }
        }
    }
}
