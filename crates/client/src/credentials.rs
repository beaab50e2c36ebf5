//! Injected credentials for catalog API calls.
//!
//! The client never reaches into ambient state for a token; whatever supplies
//! credentials is passed in at construction. A missing token is not an error
//! at this layer - the backend enforces auth.

use secrecy::SecretString;

/// Supplies the bearer token attached to outgoing requests.
pub trait CredentialProvider: Send + Sync {
    /// The current bearer token, if any.
    fn bearer_token(&self) -> Option<SecretString>;
}

/// A fixed token known at construction time.
pub struct StaticToken(SecretString);

impl StaticToken {
    #[must_use]
    pub const fn new(token: SecretString) -> Self {
        Self(token)
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<SecretString> {
        Some(self.0.clone())
    }
}

/// Unauthenticated access.
pub struct NoToken;

impl CredentialProvider for NoToken {
    fn bearer_token(&self) -> Option<SecretString> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_static_token_yields_its_token() {
        let provider = StaticToken::new(SecretString::from("tok".to_string()));
        let token = provider.bearer_token().expect("token present");
        assert_eq!(token.expose_secret(), "tok");
    }

    #[test]
    fn test_no_token_yields_none() {
        assert!(NoToken.bearer_token().is_none());
    }
}
