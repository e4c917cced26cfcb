//! Stripe client — payment intent creation over the Stripe REST API.
//!
//! One operation is consumed: `POST /v1/payment_intents`. Stripe takes
//! form-encoded bodies (arrays use the `field[]` syntax) and authenticates
//! with the account's secret key as a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use super::{GatewayError, PaymentIntents};

/// Parameters for creating a payment intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentParams {
    /// Charge amount in minor currency units (cents).
    pub amount: u64,
    /// ISO currency code, e.g. `"usd"`.
    pub currency: String,
    /// Accepted payment method types, e.g. `["card"]`.
    pub payment_method_types: Vec<String>,
}

/// The slice of Stripe's payment-intent object this backend uses.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    /// Stripe's intent id (`pi_...`).
    pub id: String,
    /// Opaque secret the mobile client needs to confirm the payment.
    pub client_secret: String,
}

/// Stripe client configuration.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Account secret key (`sk_...`).
    pub secret_key: String,
    /// API base, overridable for tests and stripe-mock.
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
}

impl StripeConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.stripe.com";

    /// Config with the production base URL and a 30s timeout.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            base_url: Url::parse(Self::DEFAULT_BASE_URL).expect("default Stripe URL parses"),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the Stripe API.
pub struct StripeClient {
    http: Client,
    config: StripeConfig,
}

impl StripeClient {
    /// Build a client from configuration. Constructed once at startup.
    pub fn new(config: StripeConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> Result<Url, GatewayError> {
        self.config
            .base_url
            .join("/v1/payment_intents")
            .map_err(|e| GatewayError::Configuration(e.to_string()))
    }
}

#[async_trait]
impl PaymentIntents for StripeClient {
    #[instrument(skip(self, params), fields(amount = params.amount))]
    async fn create_payment_intent(
        &self,
        params: PaymentIntentParams,
    ) -> Result<PaymentIntent, GatewayError> {
        let url = self.endpoint()?;
        let form = form_fields(&params);

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.secret_key)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }

        let intent: PaymentIntent =
            serde_json::from_str(&body).map_err(|e| GatewayError::UnexpectedResponse {
                service: "stripe",
                detail: e.to_string(),
            })?;
        debug!(intent_id = %intent.id, "payment intent created");
        Ok(intent)
    }
}

/// Flatten params into Stripe's form encoding. Array fields repeat with a
/// `[]` suffix: `payment_method_types[]=card`.
fn form_fields(params: &PaymentIntentParams) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("amount", params.amount.to_string()),
        ("currency", params.currency.clone()),
    ];
    for method in &params.payment_method_types {
        fields.push(("payment_method_types[]", method.clone()));
    }
    fields
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ApiError,
}

/// The slice of Stripe's error object this client reads.
#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn error_from_body(status: u16, body: &str) -> GatewayError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => GatewayError::Api {
            status,
            code: parsed.error.code,
            message: parsed
                .error
                .message
                .unwrap_or_else(|| format!("Stripe returned status {}", status)),
        },
        Err(_) => GatewayError::Api {
            status,
            code: None,
            message: format!("Stripe returned status {}", status),
        },
    }
}
