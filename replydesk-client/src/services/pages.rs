//! Page entry: which resources a screen needs and loading them in the
//! background when it opens.

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::state::{ResourceKind, Workspace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    Configuration,
    Upload,
    Mailbox,
    Logs,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Configuration,
        Page::Upload,
        Page::Mailbox,
        Page::Logs,
    ];

    /// Resources fetched when the page opens
    pub fn resources(&self) -> &'static [ResourceKind] {
        match self {
            Page::Dashboard => &[
                ResourceKind::Analytics,
                ResourceKind::Logs,
                ResourceKind::Mailbox,
            ],
            Page::Configuration => &[
                ResourceKind::Categories,
                ResourceKind::Mailbox,
                ResourceKind::Rules,
            ],
            Page::Upload => &[ResourceKind::Documents, ResourceKind::Categories],
            Page::Mailbox => &[ResourceKind::Emails, ResourceKind::Categories],
            Page::Logs => &[ResourceKind::Logs],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Configuration => "configuration",
            Page::Upload => "upload",
            Page::Mailbox => "mailbox",
            Page::Logs => "logs",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown page: {} (expected dashboard, configuration, upload, mailbox or logs)",
                    s
                )
            })
    }
}

/// Handle to the loads started by [`PageLoader::enter`].
///
/// Dropping it does not stop anything; the loads settle into the workspace
/// on their own.
pub struct PageLoad {
    page: Page,
    token: CancelToken,
    tasks: Vec<(ResourceKind, JoinHandle<bool>)>,
}

impl PageLoad {
    pub fn page(&self) -> Page {
        self.page
    }

    /// Abandon whatever has not settled yet
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for every load and report which ones applied a value
    pub async fn wait(self) -> Vec<(ResourceKind, bool)> {
        let (kinds, handles): (Vec<_>, Vec<_>) = self.tasks.into_iter().unzip();
        let results = futures_util::future::join_all(handles).await;

        kinds
            .into_iter()
            .zip(results)
            .map(|(kind, result)| match result {
                Ok(applied) => (kind, applied),
                Err(e) => {
                    warn!("Load task for {} failed: {}", kind, e);
                    (kind, false)
                }
            })
            .collect()
    }
}

/// Starts page loads and cancels the previous page's loads on navigation
pub struct PageLoader {
    workspace: Workspace,
    current: Mutex<Option<(Page, CancelToken)>>,
}

impl PageLoader {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            current: Mutex::new(None),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn current(&self) -> Option<Page> {
        self.slot().as_ref().map(|(page, _)| *page)
    }

    /// Open `page`: cancel the previous page's loads, then fetch every
    /// resource the page needs concurrently. Must be called inside a tokio
    /// runtime.
    pub fn enter(&self, page: Page) -> PageLoad {
        let token = CancelToken::new();
        if let Some((previous, old_token)) = self.slot().replace((page, token.clone())) {
            debug!("Leaving {} page", previous);
            old_token.cancel();
        }

        info!("Entering {} page", page);
        let tasks = page
            .resources()
            .iter()
            .map(|&kind| {
                let workspace = self.workspace.clone();
                let token = token.clone();
                let handle =
                    tokio::spawn(async move { workspace.load(kind, Some(token)).await });
                (kind, handle)
            })
            .collect();

        PageLoad { page, token, tasks }
    }

    /// Cancel the current page's loads so late responses are dropped
    pub fn leave(&self) {
        if let Some((page, token)) = self.slot().take() {
            debug!("Leaving {} page", page);
            token.cancel();
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<(Page, CancelToken)>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}
