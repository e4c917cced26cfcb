//! Context passed to callable handlers.
//!
//! Carries the raw request payload, the caller's identity (when present),
//! and the shared gateway state. Handlers access everything they need
//! through the context.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::auth::CallerAuth;
use super::error::CallableError;

/// The context passed to every callable handler.
///
/// Generic over `S`, the shared state type, so handlers can reach whatever
/// gateway bundle the service was configured with. The context owns its
/// data (the state behind an `Arc`), which keeps handler futures free of
/// borrows into the service.
///
/// ## Example
///
/// ```ignore
/// pub async fn handle(ctx: Context<Gateways>) -> Result<Value, CallableError> {
///     ctx.require_auth()?;
///     let input: Input = ctx.input()?;
///     // ...
/// }
/// ```
pub struct Context<S> {
    /// The callable name being handled.
    name: String,
    /// Raw JSON payload from the request.
    data: Value,
    /// Caller identity, absent for unauthenticated calls.
    auth: Option<CallerAuth>,
    /// Shared state handed to the service at construction.
    state: Arc<S>,
}

impl<S> Context<S> {
    pub(crate) fn new(name: String, data: Value, auth: Option<CallerAuth>, state: Arc<S>) -> Self {
        Self {
            name,
            data,
            auth,
            state,
        }
    }

    /// Deserialize the payload into a typed input struct.
    ///
    /// Input structs carry `#[serde(deny_unknown_fields)]`, so this is where
    /// unknown request shapes are rejected.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, CallableError> {
        serde_json::from_value(self.data.clone())
            .map_err(|e| CallableError::InvalidArgument(format!("invalid request payload: {}", e)))
    }

    /// The raw JSON payload.
    pub fn raw_input(&self) -> &Value {
        &self.data
    }

    /// The callable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The caller's identity, if the boundary attached one.
    pub fn auth(&self) -> Option<&CallerAuth> {
        self.auth.as_ref()
    }

    /// The caller's identity, or `unauthenticated` if absent.
    pub fn require_auth(&self) -> Result<&CallerAuth, CallableError> {
        self.auth
            .as_ref()
            .ok_or_else(|| CallableError::Unauthenticated("User must be authenticated.".to_string()))
    }

    /// The shared state.
    pub fn state(&self) -> &S {
        &self.state
    }
}
