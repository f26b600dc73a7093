use std::sync::Arc;

use crate::api::AuthApi;
use crate::busy::BusyTracker;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::services::PageLoader;
use crate::session::{FileSessionPersistence, SessionStore};
use crate::state::{AuthSession, Workspace};
use crate::transport::Transport;

/// Everything a front end needs, wired over one transport and one session
pub struct ReplyDeskClient {
    config: ClientConfig,
    transport: Arc<Transport>,
    auth: Arc<AuthSession>,
    pages: PageLoader,
}

impl ReplyDeskClient {
    /// Build a client whose session persists to the configured file
    pub fn from_config(config: ClientConfig) -> Result<Self, ApiError> {
        let persistence = FileSessionPersistence::new(config.session_path());
        Self::with_session(config, Arc::new(SessionStore::new(persistence)))
    }

    pub fn with_session(config: ClientConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        tracing::debug!("Creating client for {}", config.api.base_url);

        let transport = Arc::new(Transport::from_config(&config, session.clone())?);
        let auth = AuthSession::new(AuthApi::new(Arc::clone(&transport)), session)
            .with_min_password_length(config.auth.min_password_length);
        let pages = PageLoader::new(Workspace::new(Arc::clone(&transport)));

        Ok(Self {
            config,
            transport,
            auth: Arc::new(auth),
            pages,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    pub fn auth(&self) -> &Arc<AuthSession> {
        &self.auth
    }

    pub fn workspace(&self) -> &Workspace {
        self.pages.workspace()
    }

    pub fn pages(&self) -> &PageLoader {
        &self.pages
    }

    pub fn busy(&self) -> &BusyTracker {
        self.transport.busy()
    }
}

impl std::fmt::Debug for ReplyDeskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplyDeskClient")
            .field("transport", &self.transport)
            .field("auth", &self.auth)
            .finish()
    }
}
