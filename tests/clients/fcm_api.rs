//! FCM client wire tests.

use std::time::Duration;

use serde_json::json;
use tebooka_backend::clients::{
    AndroidConfig, AndroidNotification, AndroidPriority, ApnsConfig, ApnsPayload, Aps, FcmClient,
    FcmConfig, GatewayError, Notification, PushMessage, PushMessenger,
};
use url::Url;

use crate::support::start_stub;

fn client_for(base: &str) -> FcmClient {
    let mut config = FcmConfig::new("tebooka-prod", "ya29.test");
    config.base_url = Url::parse(base).unwrap();
    config.timeout = Duration::from_secs(2);
    FcmClient::new(config).unwrap()
}

fn message() -> PushMessage {
    PushMessage {
        token: "tok-1".to_string(),
        notification: Notification {
            title: "Booking Update".to_string(),
            body: "You have a new booking notification.".to_string(),
        },
        android: AndroidConfig {
            priority: AndroidPriority::High,
            notification: AndroidNotification {
                sound: "default".to_string(),
                channel_id: "default_channel".to_string(),
            },
        },
        apns: ApnsConfig {
            payload: ApnsPayload {
                aps: Aps {
                    sound: "default".to_string(),
                },
            },
        },
    }
}

#[tokio::test]
async fn sends_a_message_over_the_wire() {
    let stub = start_stub(200, r#"{"name":"projects/tebooka-prod/messages/0:1"}"#).await;
    let client = client_for(&stub.base);

    let message_id = client.send(message()).await.unwrap();
    assert_eq!(message_id, "projects/tebooka-prod/messages/0:1");

    let requests = stub.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);

    let req = &requests[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/v1/projects/tebooka-prod/messages:send");
    assert_eq!(req.authorization.as_deref(), Some("Bearer ya29.test"));
    assert_eq!(req.content_type.as_deref(), Some("application/json"));

    let sent: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(
        sent,
        json!({
            "message": {
                "token": "tok-1",
                "notification": {
                    "title": "Booking Update",
                    "body": "You have a new booking notification.",
                },
                "android": {
                    "priority": "high",
                    "notification": {
                        "sound": "default",
                        "channelId": "default_channel",
                    },
                },
                "apns": {
                    "payload": { "aps": { "sound": "default" } },
                },
            }
        })
    );
}

#[tokio::test]
async fn api_error_reads_the_rpc_status() {
    let stub = start_stub(
        404,
        r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#,
    )
    .await;
    let client = client_for(&stub.base);

    let err = client.send(message()).await.unwrap_err();
    match err {
        GatewayError::Api {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 404);
            assert_eq!(code.as_deref(), Some("NOT_FOUND"));
            assert_eq!(message, "Requested entity was not found.");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn undecodable_success_body_is_an_unexpected_response() {
    let stub = start_stub(200, r#"{}"#).await;
    let client = client_for(&stub.base);

    let err = client.send(message()).await.unwrap_err();
    assert!(matches!(
        err,
        GatewayError::UnexpectedResponse { service: "fcm", .. }
    ));
}
