//! FCM client — push delivery over the Firebase Cloud Messaging HTTP v1 API.
//!
//! One operation is consumed: `POST /v1/projects/{project}/messages:send`.
//! The typed [`PushMessage`] structs serialize to exactly the v1 JSON
//! envelope (camelCase keys), so handlers compose messages without touching
//! wire strings. Minting the OAuth bearer token is owned by the deployment
//! environment; this client just presents it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use super::{GatewayError, PushMessenger};

/// An FCM v1 message targeting a single device token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushMessage {
    /// Registration token of the target installation.
    pub token: String,
    pub notification: Notification,
    pub android: AndroidConfig,
    pub apns: ApnsConfig,
}

/// Title and body shown on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Android-specific delivery options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidConfig {
    pub priority: AndroidPriority,
    pub notification: AndroidNotification,
}

/// FCM's Android message priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AndroidPriority {
    Normal,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidNotification {
    pub sound: String,
    #[serde(rename = "channelId")]
    pub channel_id: String,
}

/// APNs-specific delivery options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApnsConfig {
    pub payload: ApnsPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApnsPayload {
    pub aps: Aps,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aps {
    pub sound: String,
}

/// FCM client configuration.
#[derive(Debug, Clone)]
pub struct FcmConfig {
    /// Firebase project id the messages are sent under.
    pub project_id: String,
    /// OAuth bearer token with the messaging scope.
    pub access_token: String,
    /// API base, overridable for tests and emulators.
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
}

impl FcmConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://fcm.googleapis.com";

    /// Config with the production base URL and a 30s timeout.
    pub fn new(project_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            access_token: access_token.into(),
            base_url: Url::parse(Self::DEFAULT_BASE_URL).expect("default FCM URL parses"),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the FCM v1 API.
pub struct FcmClient {
    http: Client,
    config: FcmConfig,
}

impl FcmClient {
    /// Build a client from configuration. Constructed once at startup.
    pub fn new(config: FcmConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> Result<Url, GatewayError> {
        let path = format!("/v1/projects/{}/messages:send", self.config.project_id);
        self.config
            .base_url
            .join(&path)
            .map_err(|e| GatewayError::Configuration(e.to_string()))
    }
}

/// Request envelope: the v1 API nests the message under a `message` key.
#[derive(Serialize)]
struct SendRequest<'a> {
    message: &'a PushMessage,
}

/// Successful send response. `name` is the fully-qualified message id
/// (`projects/*/messages/*`) and is what callers receive as `messageId`.
#[derive(Deserialize)]
struct SendResponse {
    name: String,
}

#[async_trait]
impl PushMessenger for FcmClient {
    #[instrument(skip(self, message))]
    async fn send(&self, message: PushMessage) -> Result<String, GatewayError> {
        let url = self.endpoint()?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.access_token)
            .json(&SendRequest { message: &message })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }

        let sent: SendResponse =
            serde_json::from_str(&body).map_err(|e| GatewayError::UnexpectedResponse {
                service: "fcm",
                detail: e.to_string(),
            })?;
        debug!(message_id = %sent.name, "push message accepted");
        Ok(sent.name)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ApiStatus,
}

/// The slice of google.rpc.Status this client reads.
#[derive(Deserialize)]
struct ApiStatus {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

fn error_from_body(status: u16, body: &str) -> GatewayError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => GatewayError::Api {
            status,
            code: parsed.error.status,
            message: parsed
                .error
                .message
                .unwrap_or_else(|| format!("FCM returned status {}", status)),
        },
        Err(_) => GatewayError::Api {
            status,
            code: None,
            message: format!("FCM returned status {}", status),
        },
    }
}
