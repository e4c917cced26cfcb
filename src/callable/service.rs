//! Service — callable handler registry and dispatch.
//!
//! `Service<S>` holds shared state and a set of named async handlers.
//! Each handler receives a `Context<S>` and resolves to
//! `Result<Value, CallableError>`.
//!
//! ## Example
//!
//! ```ignore
//! use tebooka_backend::callable::{CallerAuth, Service};
//! use serde_json::json;
//!
//! let service = Service::new(gateways)
//!     .callable("createPaymentIntent", |ctx| async move {
//!         ctx.require_auth()?;
//!         let input = ctx.input::<Input>()?;
//!         Ok(json!({ "clientSecret": "..." }))
//!     });
//!
//! let result = service
//!     .dispatch("createPaymentIntent", json!({ "amount": 250 }), Some(CallerAuth::new("u1")))
//!     .await;
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::auth::CallerAuth;
use super::context::Context;
use super::error::CallableError;

/// Boxed future resolved by a callable handler.
type CallableFuture = Pin<Box<dyn Future<Output = Result<Value, CallableError>> + Send>>;

/// A registered callable handler.
type CallableFn<S> = Box<dyn Fn(Context<S>) -> CallableFuture + Send + Sync>;

/// A service that routes named invocations to handler functions.
///
/// Generic over `S`, the shared state type. State is built once at startup
/// and handed to every handler through its `Context` — there is no other
/// cross-invocation state.
pub struct Service<S> {
    state: Arc<S>,
    callables: HashMap<String, CallableFn<S>>,
}

impl<S: Send + Sync + 'static> Service<S> {
    /// Create a new service with the given shared state.
    pub fn new(state: S) -> Self {
        Self {
            state: Arc::new(state),
            callables: HashMap::new(),
        }
    }

    /// Register a callable handler.
    ///
    /// Uses builder pattern — returns `self` for chaining. Accepts plain
    /// `async fn(Context<S>) -> Result<Value, CallableError>` items as well
    /// as closures returning a future.
    pub fn callable<F, Fut>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(Context<S>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, CallableError>> + Send + 'static,
    {
        self.callables
            .insert(name.to_string(), Box::new(move |ctx| Box::pin(handler(ctx))));
        self
    }

    /// Dispatch an invocation by name.
    ///
    /// Every payload must be a JSON object — the validation the strictest
    /// handler applied is enforced here for all of them. Unknown names fail
    /// with `NotFound`. Otherwise a `Context` is built and the handler
    /// awaited; whatever it returns goes back to the caller unmodified.
    pub async fn dispatch(
        &self,
        name: &str,
        data: Value,
        auth: Option<CallerAuth>,
    ) -> Result<Value, CallableError> {
        if !data.is_object() {
            return Err(CallableError::InvalidArgument(
                "Request data must be an object.".to_string(),
            ));
        }

        let handler = self
            .callables
            .get(name)
            .ok_or_else(|| CallableError::NotFound(name.to_string()))?;

        debug!(
            callable = name,
            authenticated = auth.is_some(),
            "dispatching callable"
        );

        let ctx = Context::new(name.to_string(), data, auth, Arc::clone(&self.state));
        handler(ctx).await
    }

    /// List registered callable names.
    pub fn callables(&self) -> Vec<&str> {
        self.callables.keys().map(|s| s.as_str()).collect()
    }

    /// Get a reference to the shared state.
    pub fn state(&self) -> &S {
        &self.state
    }
}
