//! Bearer-token authentication
//!
//! The vendor API authenticates every request with an OAuth access token in
//! the `Authorization` header. The authenticator is constructed lazily from
//! config, once per tap instance (see `engine::TapEngine::authenticator`),
//! rather than through a global cache.

use reqwest::RequestBuilder;

/// Applies `Authorization: Bearer <token>` to outgoing requests
#[derive(Clone)]
pub struct BearerAuthenticator {
    token: String,
}

impl BearerAuthenticator {
    /// Create an authenticator for the given access token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.token)
    }

    /// The raw `Authorization` header value
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for BearerAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the token itself
        f.debug_struct("BearerAuthenticator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_value() {
        let auth = BearerAuthenticator::new("tok-123");
        assert_eq!(auth.header_value(), "Bearer tok-123");
    }

    #[test]
    fn test_debug_hides_token() {
        let auth = BearerAuthenticator::new("super-secret");
        let debug = format!("{auth:?}");
        assert!(!debug.contains("super-secret"));
    }
}
