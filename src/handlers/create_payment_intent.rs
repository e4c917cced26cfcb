//! createPaymentIntent — start a card payment for a booking.
//!
//! Authenticated callers submit an amount in minor currency units; the
//! handler creates a payment intent with the processor and hands back the
//! client secret the mobile SDK needs to confirm the charge.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use crate::callable::{CallableError, Context};
use crate::clients::{Gateways, PaymentIntentParams, PaymentIntents as _};

pub const NAME: &str = "createPaymentIntent";

/// Settlement currency for every booking.
const CURRENCY: &str = "usd";
/// Payment methods the mobile client offers.
const PAYMENT_METHOD_TYPES: &[&str] = &["card"];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Input {
    /// Charge amount in minor currency units (cents).
    amount: u64,
}

pub async fn handle(ctx: Context<Gateways>) -> Result<Value, CallableError> {
    ctx.require_auth()?;

    let input: Input = ctx.input()?;
    if input.amount == 0 {
        return Err(CallableError::InvalidArgument(
            "Amount must be a positive integer of minor currency units.".to_string(),
        ));
    }

    let params = PaymentIntentParams {
        amount: input.amount,
        currency: CURRENCY.to_string(),
        payment_method_types: PAYMENT_METHOD_TYPES
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    match ctx.state().payments.create_payment_intent(params).await {
        Ok(intent) => Ok(json!({ "clientSecret": intent.client_secret })),
        Err(e) => {
            error!(error = %e, "payment intent creation failed");
            Err(CallableError::Internal(e.to_string()))
        }
    }
}
