//! Process configuration, resolved once at startup from the environment.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::clients::{FcmConfig, StripeConfig};

/// Configuration failure, reported before the server binds.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {detail}")]
    Invalid { name: &'static str, detail: String },
}

/// Everything the binary needs to run, resolved from environment variables.
///
/// | Variable | Required | Default |
/// |---|---|---|
/// | `STRIPE_SECRET_KEY` | yes | — |
/// | `STRIPE_API_BASE` | no | `https://api.stripe.com` |
/// | `STRIPE_TIMEOUT_SECS` | no | 30 |
/// | `FCM_PROJECT_ID` | yes | — |
/// | `FCM_ACCESS_TOKEN` | yes | — |
/// | `FCM_API_BASE` | no | `https://fcm.googleapis.com` |
/// | `FCM_TIMEOUT_SECS` | no | 30 |
/// | `HOST` | no | `0.0.0.0` |
/// | `PORT` | no | `8080` |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub stripe: StripeConfig,
    pub fcm: FcmConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Address the HTTP transport binds.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut stripe = StripeConfig::new(required(&lookup, "STRIPE_SECRET_KEY")?);
        if let Some(base) = lookup("STRIPE_API_BASE") {
            stripe.base_url = parse_url("STRIPE_API_BASE", &base)?;
        }
        if let Some(secs) = lookup("STRIPE_TIMEOUT_SECS") {
            stripe.timeout = Duration::from_secs(parse_num("STRIPE_TIMEOUT_SECS", &secs)?);
        }

        let mut fcm = FcmConfig::new(
            required(&lookup, "FCM_PROJECT_ID")?,
            required(&lookup, "FCM_ACCESS_TOKEN")?,
        );
        if let Some(base) = lookup("FCM_API_BASE") {
            fcm.base_url = parse_url("FCM_API_BASE", &base)?;
        }
        if let Some(secs) = lookup("FCM_TIMEOUT_SECS") {
            fcm.timeout = Duration::from_secs(parse_num("FCM_TIMEOUT_SECS", &secs)?);
        }

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(value) => parse_num("PORT", &value)?,
            None => 8080,
        };

        Ok(Self {
            stripe,
            fcm,
            host,
            port,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::Invalid {
        name,
        detail: e.to_string(),
    })
}

fn parse_num<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        detail: e.to_string(),
    })
}
