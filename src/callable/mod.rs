//! callable — the validated request/response contract behind every endpoint.
//!
//! Both backend functions are **callable handlers**: single-invocation
//! request/response functions registered by name on a `Service`. The service
//! owns the shared validation the handlers used to duplicate — payloads must
//! be JSON objects, unknown names fail with `not-found` — and every other
//! outcome is one of the fixed error kinds in [`CallableError`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use tebooka_backend::callable::{CallerAuth, Service};
//! use serde_json::json;
//!
//! let service = Arc::new(
//!     Service::new(gateways)
//!         .callable("createPaymentIntent", handlers::create_payment_intent::handle)
//! );
//!
//! // Direct dispatch
//! let result = service
//!     .dispatch("createPaymentIntent", json!({ "amount": 250 }), Some(CallerAuth::new("u1")))
//!     .await;
//!
//! // HTTP transport (requires "http" feature)
//! // callable::serve(service, "0.0.0.0:8080").await?;
//! ```
//!
//! ## Handler Convention
//!
//! Each handler file exports:
//!
//! ```ignore
//! // src/handlers/create_payment_intent.rs
//!
//! pub const NAME: &str = "createPaymentIntent";
//!
//! pub async fn handle(ctx: Context<Gateways>) -> Result<Value, CallableError> {
//!     ctx.require_auth()?;
//!     let input: Input = ctx.input()?;
//!     // ...
//! }
//! ```

mod auth;
mod context;
mod error;
mod service;

pub use auth::CallerAuth;
pub use context::Context;
pub use error::CallableError;
pub use service::Service;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

/// Register handler modules with a service using the convention pattern.
///
/// Each handler module must export:
/// - `NAME: &str` — the callable name
/// - `handle(ctx) -> Result<Value, CallableError>` — the async handler
///
/// # Example
/// ```ignore
/// let service = tebooka_backend::register_handlers!(
///     Service::new(gateways),
///     handlers::create_payment_intent,
///     handlers::send_booking_notification,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .callable(
                $($seg)::+::NAME,
                $($seg)::+::handle,
            )
        )+
    };
}
