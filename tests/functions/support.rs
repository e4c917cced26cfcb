//! Test doubles: recording gateway fakes with canned outcomes.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tebooka_backend::callable::Service;
use tebooka_backend::clients::{
    GatewayError, Gateways, PaymentIntent, PaymentIntentParams, PaymentIntents, PushMessage,
    PushMessenger,
};
use tebooka_backend::handlers;

enum Outcome {
    Succeed(&'static str),
    Fail(&'static str),
}

/// Payment port fake: records every call, then succeeds with a canned
/// client secret or fails with a canned upstream message.
pub struct RecordingPayments {
    calls: Arc<Mutex<Vec<PaymentIntentParams>>>,
    outcome: Outcome,
}

impl RecordingPayments {
    pub fn succeeding(client_secret: &'static str) -> Self {
        Self {
            calls: Arc::default(),
            outcome: Outcome::Succeed(client_secret),
        }
    }

    pub fn failing(message: &'static str) -> Self {
        Self {
            calls: Arc::default(),
            outcome: Outcome::Fail(message),
        }
    }

    /// Handle onto the recorded calls, kept by the test before the fake
    /// moves into the service.
    pub fn calls(&self) -> Arc<Mutex<Vec<PaymentIntentParams>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl PaymentIntents for RecordingPayments {
    async fn create_payment_intent(
        &self,
        params: PaymentIntentParams,
    ) -> Result<PaymentIntent, GatewayError> {
        self.calls.lock().unwrap().push(params);
        match self.outcome {
            Outcome::Succeed(secret) => Ok(PaymentIntent {
                id: "pi_123".to_string(),
                client_secret: secret.to_string(),
            }),
            Outcome::Fail(message) => Err(GatewayError::Api {
                status: 402,
                code: Some("card_declined".to_string()),
                message: message.to_string(),
            }),
        }
    }
}

/// Push port fake: records every message, then succeeds with a canned
/// message id or fails with a canned upstream message.
pub struct RecordingMessenger {
    sent: Arc<Mutex<Vec<PushMessage>>>,
    outcome: Outcome,
}

impl RecordingMessenger {
    pub fn succeeding(message_id: &'static str) -> Self {
        Self {
            sent: Arc::default(),
            outcome: Outcome::Succeed(message_id),
        }
    }

    pub fn failing(message: &'static str) -> Self {
        Self {
            sent: Arc::default(),
            outcome: Outcome::Fail(message),
        }
    }

    pub fn sent(&self) -> Arc<Mutex<Vec<PushMessage>>> {
        Arc::clone(&self.sent)
    }
}

#[async_trait]
impl PushMessenger for RecordingMessenger {
    async fn send(&self, message: PushMessage) -> Result<String, GatewayError> {
        self.sent.lock().unwrap().push(message);
        match self.outcome {
            Outcome::Succeed(id) => Ok(id.to_string()),
            Outcome::Fail(message) => Err(GatewayError::Api {
                status: 404,
                code: Some("UNREGISTERED".to_string()),
                message: message.to_string(),
            }),
        }
    }
}

/// The full handler registry over the given fakes.
pub fn service_with(
    payments: RecordingPayments,
    messenger: RecordingMessenger,
) -> Service<Gateways> {
    handlers::service(Gateways::new(Box::new(payments), Box::new(messenger)))
}
