use secrecy::{ExposeSecret, SecretString};

/// Credential context threaded into the API client at construction.
///
/// An anonymous session sends no `Authorization` header; whether that is
/// accepted is decided by the server.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<SecretString>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let token: String = token.into();
        if token.trim().is_empty() {
            return Self::anonymous();
        }
        Self {
            token: Some(SecretString::new(token)),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Raw bearer token, only for building the request header
    pub(crate) fn bearer_token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.expose_secret().as_str())
    }
}
