//! Outbound gateways to the external SaaS APIs.
//!
//! Handlers never talk to Stripe or FCM directly — they go through the
//! [`PaymentIntents`] and [`PushMessenger`] ports, so tests can substitute
//! recording fakes and the wire details stay in one place per provider.
//! [`Gateways`] bundles the configured clients into the shared service
//! state built once at startup.

mod fcm;
mod stripe;

pub use fcm::{
    AndroidConfig, AndroidNotification, AndroidPriority, ApnsConfig, ApnsPayload, Aps, FcmClient,
    FcmConfig, Notification, PushMessage,
};
pub use stripe::{PaymentIntent, PaymentIntentParams, StripeClient, StripeConfig};

use async_trait::async_trait;
use thiserror::Error;

/// Failure talking to an upstream API.
///
/// `Display` is the verbatim upstream message where one exists — handlers
/// forward it to the caller unchanged for payment failures.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Client construction or endpoint assembly failed.
    #[error("gateway configuration error: {0}")]
    Configuration(String),
    /// The HTTP exchange itself failed (connect, timeout, TLS).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The upstream answered with an error payload.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
    /// The upstream answered 2xx with a body this client cannot use.
    #[error("unexpected response from {service}: {detail}")]
    UnexpectedResponse {
        service: &'static str,
        detail: String,
    },
}

/// Port to the payment processor's "create payment intent" operation.
#[async_trait]
pub trait PaymentIntents: Send + Sync {
    async fn create_payment_intent(
        &self,
        params: PaymentIntentParams,
    ) -> Result<PaymentIntent, GatewayError>;
}

/// Port to the push-messaging "send" operation. Returns the provider
/// message id.
#[async_trait]
pub trait PushMessenger: Send + Sync {
    async fn send(&self, message: PushMessage) -> Result<String, GatewayError>;
}

/// Boxed payment port, as stored in [`Gateways`].
pub type PaymentIntentsBox = Box<dyn PaymentIntents>;
/// Boxed push port, as stored in [`Gateways`].
pub type PushMessengerBox = Box<dyn PushMessenger>;

/// The process-wide external client handles.
///
/// Built exactly once in `main` and shared with every handler through the
/// service state; there is no reinitialization path.
pub struct Gateways {
    pub payments: PaymentIntentsBox,
    pub messaging: PushMessengerBox,
}

impl Gateways {
    pub fn new(payments: PaymentIntentsBox, messaging: PushMessengerBox) -> Self {
        Self {
            payments,
            messaging,
        }
    }
}
