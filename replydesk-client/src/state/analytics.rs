use shared_types::DashboardStats;

use super::resource::Resource;
use crate::api::AnalyticsApi;
use crate::cancel::CancelToken;
use crate::transport::RequestOptions;

#[derive(Clone, Debug)]
pub struct AnalyticsContainer {
    api: AnalyticsApi,
    resource: Resource<DashboardStats>,
}

impl AnalyticsContainer {
    pub fn new(api: AnalyticsApi) -> Self {
        Self {
            api,
            resource: Resource::new("analytics"),
        }
    }

    pub fn resource(&self) -> &Resource<DashboardStats> {
        &self.resource
    }

    pub fn stats(&self) -> Option<DashboardStats> {
        self.resource.data()
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
                    async move { api.dashboard(options).await }
                },
                options,
            )
            .await
    }
}
