pub mod callable;
pub mod clients;
pub mod config;
pub mod handlers;

pub use callable::{CallableError, CallerAuth, Context, Service};
pub use clients::{GatewayError, Gateways};
pub use config::{AppConfig, ConfigError};

// register_handlers! lives at the crate root via #[macro_export].
