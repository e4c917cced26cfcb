//! sendBookingNotification — push a booking update to one device.
//!
//! No authentication required: the caller supplies the target registration
//! token directly. Title and body are optional and fall back to fixed
//! defaults; the push payload pins the platform options the mobile app
//! expects (high-priority Android delivery on the `default_channel`
//! channel, default sound on both platforms).

use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::callable::{CallableError, Context};
use crate::clients::{
    AndroidConfig, AndroidNotification, AndroidPriority, ApnsConfig, ApnsPayload, Aps, Gateways,
    Notification, PushMessage, PushMessenger as _,
};

pub const NAME: &str = "sendBookingNotification";

/// Notification title when the caller sends none.
const DEFAULT_TITLE: &str = "Booking Update";
/// Notification body when the caller sends none.
const DEFAULT_BODY: &str = "You have a new booking notification.";
/// Channel the mobile app registers for booking pushes.
const ANDROID_CHANNEL_ID: &str = "default_channel";
/// Device default notification sound, both platforms.
const SOUND_DEFAULT: &str = "default";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Input {
    #[serde(default, rename = "fcmToken", deserialize_with = "lenient_string")]
    fcm_token: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    body: Option<String>,
}

/// Accept any JSON value where a string is expected: strings pass through,
/// everything else reads as absent so the field's default applies.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

pub async fn handle(ctx: Context<Gateways>) -> Result<Value, CallableError> {
    info!(data = %ctx.raw_input(), "received booking notification request");

    let input: Input = ctx.input()?;

    let token = input.fcm_token.as_deref().map(str::trim).unwrap_or("");
    if token.is_empty() {
        return Err(CallableError::InvalidArgument(
            "FCM token must be a non-empty string.".to_string(),
        ));
    }

    // A present-but-empty title stays empty; only absent or non-string
    // values take the default.
    let title = match &input.title {
        Some(t) => t.trim().to_string(),
        None => DEFAULT_TITLE.to_string(),
    };
    let body = match &input.body {
        Some(b) => b.trim().to_string(),
        None => DEFAULT_BODY.to_string(),
    };

    let message = PushMessage {
        token: token.to_string(),
        notification: Notification { title, body },
        android: AndroidConfig {
            priority: AndroidPriority::High,
            notification: AndroidNotification {
                sound: SOUND_DEFAULT.to_string(),
                channel_id: ANDROID_CHANNEL_ID.to_string(),
            },
        },
        apns: ApnsConfig {
            payload: ApnsPayload {
                aps: Aps {
                    sound: SOUND_DEFAULT.to_string(),
                },
            },
        },
    };

    match ctx.state().messaging.send(message).await {
        Ok(message_id) => {
            info!(%message_id, "notification sent");
            Ok(json!({ "success": true, "messageId": message_id }))
        }
        Err(e) => {
            error!(error = %e, "sending notification failed");
            Err(CallableError::Unknown {
                message: "Failed to send notification.".to_string(),
                source: Some(Box::new(e)),
            })
        }
    }
}
