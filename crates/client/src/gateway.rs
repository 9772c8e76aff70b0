//! Shared HTTP gateway.
//!
//! One `reqwest::Client` behind every adapter. The gateway attaches
//! the bearer credential, unwraps the server's `{ "data": ... }`
//! response envelopes, and turns HTTP failures into [`ApiError`]. A
//! credential-level 401 invalidates the session after a short grace
//! delay so an in-flight page transition can finish rendering first;
//! business-rule 401s (the server reuses the code for a few domain
//! refusals) leave the session alone.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use maskadmin_console::session::SessionContext;

use crate::rejection::classify_rejection;
use maskadmin_console::services::ServiceError;

/// Delay between a credential-level 401 and the session teardown.
const INVALIDATION_GRACE: Duration = Duration::from_secs(5);

/// 401 detail phrases that mark a business-rule refusal rather than a
/// bad credential. These never tear the session down.
const BUSINESS_RULE_PHRASES: &[&str] = &["users already exist", "role", "permission"];

/// Supplies the current bearer token, if any.
pub type TokenProvider = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Deployment profile: where the per-connection catalog and constraint
/// routes live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentProfile {
    /// Routes served directly under the API root.
    Standard,
    /// Routes nested under `/single-server`.
    SingleServer,
}

impl DeploymentProfile {
    fn prefix(self) -> &'static str {
        match self {
            Self::Standard => "",
            Self::SingleServer => "/single-server",
        }
    }
}

/// Transport-level failure surface. Adapters convert this to
/// [`ServiceError`] via `From`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<ApiError> for ServiceError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Transport(msg) | ApiError::Decode(msg) => ServiceError::Transport(msg),
            ApiError::Status { status: 404, detail } => ServiceError::NotFound(detail),
            ApiError::Status { status: 401 | 403, detail } => ServiceError::Unauthorized(detail),
            ApiError::Status { status, detail } if (400..500).contains(&status) => {
                ServiceError::Rejected {
                    category: classify_rejection(&detail),
                    message: detail,
                }
            }
            ApiError::Status { detail, .. } => ServiceError::Transport(detail),
        }
    }
}

/// The shared gateway.
pub struct ApiGateway {
    client: reqwest::Client,
    base_url: String,
    profile: DeploymentProfile,
    token: TokenProvider,
    session: SessionContext,
}

impl ApiGateway {
    /// `base_url` is the API root without a trailing slash, e.g.
    /// `http://masking.internal:8000/api`.
    pub fn new(
        base_url: impl Into<String>,
        profile: DeploymentProfile,
        token: TokenProvider,
        session: SessionContext,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            profile,
            token,
            session,
        }
    }

    /// URL for a route that moves with the deployment profile.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.profile.prefix(), path)
    }

    /// URL for a route shared across profiles.
    pub fn shared_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        let request = self.client.get(&url);
        self.send(url, request).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: String,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.client.post(&url).json(body);
        self.send(url, request).await
    }

    /// POST with no body, for command endpoints.
    pub async fn post_empty<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        let request = self.client.post(&url);
        self.send(url, request).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: String,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.client.put(&url).json(body);
        self.send(url, request).await
    }

    /// DELETE, discarding any response body.
    pub async fn delete(&self, url: String) -> Result<(), ApiError> {
        let request = self.client.delete(&url);
        self.dispatch(url, request).await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: String,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.dispatch(url, request).await?;
        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        serde_json::from_value(unwrap_envelope(value)).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Attach the credential, issue the request, and turn any non-2xx
    /// answer into an error. Body handling is up to the caller.
    async fn dispatch(
        &self,
        url: String,
        mut request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        if let Some(token) = (self.token)() {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let detail = read_error_detail(response).await;
        tracing::warn!(%url, status = status.as_u16(), detail = %detail, "Request failed");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.handle_unauthorized(&detail);
        }

        Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        })
    }

    /// Tear the session down after the grace delay, unless the detail
    /// marks a business-rule refusal.
    fn handle_unauthorized(&self, detail: &str) {
        if is_business_rule_refusal(detail) {
            return;
        }
        let session = self.session.clone();
        tracing::warn!("Credential rejected, scheduling session invalidation");
        tokio::spawn(async move {
            tokio::time::sleep(INVALIDATION_GRACE).await;
            session.invalidate();
        });
    }
}

/// Unwrap `{ "data": ... }` envelopes, at most two levels deep. The
/// server wraps most payloads once and a few proxied ones twice.
pub(crate) fn unwrap_envelope(mut value: serde_json::Value) -> serde_json::Value {
    for _ in 0..2 {
        match value.as_object_mut() {
            Some(object) if object.contains_key("data") => {
                value = object.remove("data").unwrap_or(serde_json::Value::Null);
            }
            _ => break,
        }
    }
    value
}

/// Pull the most useful message out of an error response body.
async fn read_error_detail(response: reqwest::Response) -> String {
    let fallback = format!("HTTP {}", response.status().as_u16());
    let Ok(text) = response.text().await else {
        return fallback;
    };
    if text.is_empty() {
        return fallback;
    }
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(body) => ["detail", "error", "message"]
            .iter()
            .find_map(|key| body.get(key).and_then(|v| v.as_str()))
            .map(str::to_string)
            .unwrap_or(text),
        Err(_) => text,
    }
}

fn is_business_rule_refusal(detail: &str) -> bool {
    let lowered = detail.to_lowercase();
    BUSINESS_RULE_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
