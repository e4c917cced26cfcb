//! Caller identity attached to an invocation by the hosting boundary.

use std::collections::HashMap;

/// Verified identity of the caller, forwarded by the invocation boundary.
///
/// Token verification happens outside this crate (the hosting platform or a
/// fronting gateway); by the time a request reaches a handler the identity is
/// either present and trusted, or absent. Handlers never inspect tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerAuth {
    uid: String,
    claims: HashMap<String, String>,
}

impl CallerAuth {
    /// Identity with a uid and no extra claims.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            claims: HashMap::new(),
        }
    }

    /// Identity with forwarded claims (roles, email, anything the gateway
    /// chose to pass through).
    pub fn with_claims(uid: impl Into<String>, claims: HashMap<String, String>) -> Self {
        Self {
            uid: uid.into(),
            claims,
        }
    }

    /// The authenticated user id.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// A forwarded claim by name.
    pub fn claim(&self, name: &str) -> Option<&str> {
        self.claims.get(name).map(|v| v.as_str())
    }

    /// All forwarded claims.
    pub fn claims(&self) -> &HashMap<String, String> {
        &self.claims
    }
}
