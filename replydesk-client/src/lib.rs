//! Client library for the ReplyDesk auto-responder dashboard.
//!
//! [`Transport`] talks to the HTTP API and owns the bearer token, the busy
//! counter and the 401 refresh policy. The containers in [`state`] keep a
//! client-side copy of each server resource, [`AuthSession`] tracks who is
//! signed in, and [`PageLoader`] fetches what a screen needs when it opens.

pub mod api;
pub mod busy;
pub mod cancel;
pub mod client;
pub mod config;
pub mod error;
pub mod services;
pub mod session;
pub mod state;
pub mod transport;

pub use busy::{BusyGuard, BusyTracker};
pub use cancel::CancelToken;
pub use client::ReplyDeskClient;
pub use config::ClientConfig;
pub use error::{ApiError, NETWORK_ERROR_MESSAGE};
pub use services::{Page, PageLoad, PageLoader};
pub use session::{
    FileSessionPersistence, MemorySessionPersistence, SessionError, SessionPersistence,
    SessionStatus, SessionStore, StoredSession,
};
pub use state::{
    Access, AuthSession, AuthState, Collection, Resource, ResourceKind, ResourceState, Workspace,
};
pub use transport::{RequestBody, RequestOptions, Transport, Upload};
