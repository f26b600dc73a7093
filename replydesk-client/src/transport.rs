//! HTTP transport shared by every endpoint wrapper.
//!
//! Attaches the bearer token, drives the busy counter, unwraps the
//! `{ success, data, error }` envelope and owns the 401 policy: refresh
//! once, retry once, otherwise drop the session.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared_types::{ApiEnvelope, RefreshRequest, RefreshedToken};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::busy::BusyTracker;
use crate::cancel::CancelToken;
use crate::config::ClientConfig;
use crate::error::{ApiError, NETWORK_ERROR_MESSAGE};
use crate::session::SessionStore;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A file sent as `multipart/form-data`
#[derive(Debug, Clone)]
pub struct Upload {
    pub field_name: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    /// Extra text fields sent alongside the file
    pub fields: Vec<(String, String)>,
}

impl Upload {
    fn to_form(&self) -> Result<reqwest::multipart::Form, ApiError> {
        let part = reqwest::multipart::Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime_type)
            .map_err(|e| ApiError::invalid_request(format!("Invalid MIME type: {e}")))?;

        let mut form = reqwest::multipart::Form::new().part(self.field_name.clone(), part);
        for (name, value) in &self.fields {
            form = form.text(name.clone(), value.clone());
        }
        Ok(form)
    }
}

/// Request payload. Kept as data so the 401 retry can rebuild it.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Upload),
}

impl RequestBody {
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self, ApiError> {
        Ok(RequestBody::Json(serde_json::to_value(body)?))
    }
}

#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Attach the bearer token and apply the 401 policy
    pub authenticated: bool,
    /// Count this call in the busy indicator
    pub track_busy: bool,
    pub cancel: Option<CancelToken>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            authenticated: true,
            track_busy: true,
            cancel: None,
        }
    }
}

impl RequestOptions {
    /// No bearer token, no refresh (login, register)
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            ..Self::default()
        }
    }

    /// Does not touch the busy indicator
    pub fn quiet() -> Self {
        Self {
            track_busy: false,
            ..Self::default()
        }
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    busy: BusyTracker,
    /// Held while refreshing so concurrent 401s share one refresh
    refresh_lock: Mutex<()>,
}

impl Transport {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT, session)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Arc<SessionStore>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::invalid_request(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            busy: BusyTracker::new(),
            refresh_lock: Mutex::new(()),
        })
    }

    pub fn from_config(config: &ClientConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        Self::with_timeout(config.api.base_url.clone(), config.timeout(), session)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn busy(&self) -> &BusyTracker {
        &self.busy
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, RequestBody::Empty, RequestOptions::default())
            .await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(
            Method::POST,
            path,
            RequestBody::json(body)?,
            RequestOptions::default(),
        )
        .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(
            Method::PUT,
            path,
            RequestBody::json(body)?,
            RequestOptions::default(),
        )
        .await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(
            Method::PATCH,
            path,
            RequestBody::json(body)?,
            RequestOptions::default(),
        )
        .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::DELETE, path, RequestBody::Empty, RequestOptions::default())
            .await
    }

    /// Issue a call and unwrap the response envelope into `T`.
    /// A missing `data` field decodes as JSON `null` (fits `()` and `Option<_>`).
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let text = self.dispatch(method, path, body, options).await?;
        decode_envelope(&text)
    }

    /// Issue a call and return the raw body of a 2xx response (CSV exports)
    pub async fn send_text(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<String, ApiError> {
        self.dispatch(method, path, body, options).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<String, ApiError> {
        let _busy = options.track_busy.then(|| self.busy.begin());

        match &options.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!("{} {} cancelled", method, path);
                        Err(ApiError::Cancelled)
                    }
                    result = self.round_trip(&method, path, &body, options.authenticated) => result,
                }
            }
            None => {
                self.round_trip(&method, path, &body, options.authenticated)
                    .await
            }
        }
    }

    async fn round_trip(
        &self,
        method: &Method,
        path: &str,
        body: &RequestBody,
        authenticated: bool,
    ) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let token = if authenticated {
            self.session.access_token()
        } else {
            None
        };

        let response = self.execute(method, &url, body, token.as_deref()).await?;
        if !(authenticated && response.status() == StatusCode::UNAUTHORIZED) {
            return read_body(response).await;
        }

        warn!("{} {} returned 401, refreshing session", method, path);
        let Some(new_token) = self.refresh_after(token.as_deref()).await else {
            return Err(ApiError::unauthorized("Session expired"));
        };

        let retry = self.execute(method, &url, body, Some(&new_token)).await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            warn!("{} {} still unauthorized after refresh, signing out", method, path);
            self.session.clear();
            return Err(ApiError::unauthorized("Session expired"));
        }
        read_body(retry).await
    }

    async fn execute(
        &self,
        method: &Method,
        url: &str,
        body: &RequestBody,
        token: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self.http.request(method.clone(), url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(value),
            RequestBody::Multipart(upload) => request.multipart(upload.to_form()?),
        };

        debug!("{} {}", method, url);
        Ok(request.send().await?)
    }

    /// Obtain a fresh access token after `failed_token` was rejected.
    ///
    /// Only one refresh runs at a time. A caller that queued behind another
    /// refresh reuses its result instead of refreshing again. On failure the
    /// session is cleared and `None` returned.
    async fn refresh_after(&self, failed_token: Option<&str>) -> Option<String> {
        let _guard = self.refresh_lock.lock().await;

        if let Some(current) = self.session.access_token() {
            if Some(current.as_str()) != failed_token {
                debug!("Token already refreshed by a concurrent request");
                return Some(current);
            }
        }

        let Some(refresh_token) = self.session.refresh_token() else {
            warn!("No refresh token available, signing out");
            self.session.clear();
            return None;
        };

        match self.request_refresh(refresh_token).await {
            Ok(refreshed) => {
                let access_token = refreshed.access_token.clone();
                if self
                    .session
                    .update_tokens(refreshed.access_token, refreshed.refresh_token)
                {
                    debug!("Access token refreshed");
                    Some(access_token)
                } else {
                    None
                }
            }
            Err(e) => {
                warn!("Token refresh failed: {}", e);
                self.session.clear();
                None
            }
        }
    }

    async fn request_refresh(&self, refresh_token: String) -> Result<RefreshedToken, ApiError> {
        let url = format!("{}/auth/refresh", self.base_url);
        let body = RequestBody::json(&RefreshRequest { refresh_token })?;
        let response = self.execute(&Method::POST, &url, &body, None).await?;
        let text = read_body(response).await?;
        decode_envelope(&text)
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("busy", &self.busy)
            .finish()
    }
}

/// Read the body of a response, turning non-2xx into an error that carries
/// the server's message, or the generic network message when it sent none
async fn read_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        return Ok(text);
    }

    let message = serde_json::from_str::<ApiEnvelope<Value>>(&text)
        .ok()
        .and_then(|envelope| envelope.error)
        .map(|error| error.message)
        .unwrap_or_else(|| NETWORK_ERROR_MESSAGE.to_string());

    Err(ApiError::Http {
        status: status.as_u16(),
        message,
    })
}

fn decode_envelope<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    if text.trim().is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }

    let envelope: ApiEnvelope<Value> = serde_json::from_str(text)?;
    match envelope.into_result() {
        Ok(data) => Ok(serde_json::from_value(data.unwrap_or(Value::Null))?),
        Err(error) => Err(ApiError::Rejected {
            code: error.code,
            message: error.message,
            details: error.details,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success_data() {
        let values: Vec<u32> = decode_envelope(r#"{"success": true, "data": [1, 2, 3]}"#).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_missing_data_as_unit() {
        decode_envelope::<()>(r#"{"success": true}"#).unwrap();
        decode_envelope::<()>("").unwrap();
        let maybe: Option<u32> = decode_envelope(r#"{"success": true, "data": null}"#).unwrap();
        assert!(maybe.is_none());
    }

    #[test]
    fn test_decode_rejection() {
        let err = decode_envelope::<Vec<u32>>(
            r#"{"success": false, "error": {"code": "DUPLICATE", "message": "Category exists"}}"#,
        )
        .unwrap_err();
        match err {
            ApiError::Rejected { code, message, .. } => {
                assert_eq!(code, "DUPLICATE");
                assert_eq!(message, "Category exists");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_garbage_is_parse_error() {
        let err = decode_envelope::<Vec<u32>>("<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }

    #[test]
    fn test_default_options() {
        let options = RequestOptions::default();
        assert!(options.authenticated);
        assert!(options.track_busy);
        assert!(!RequestOptions::anonymous().authenticated);
        assert!(!RequestOptions::quiet().track_busy);
    }
}
