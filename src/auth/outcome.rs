//! Endpoints and classified submission results

use std::fmt;

/// Login failure text. Deliberately does not say which credential was wrong.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect Email or Password";
/// Fallback for server-side registration rejections without a message
pub const REJECTED_FALLBACK_MESSAGE: &str = "Oops something went wrong";
/// Fallback for server errors and unreachable servers
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";

/// Which authentication operation a form talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Login,
    Register,
}

/// A remote endpoint: the operation plus the path appended to the base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub kind: EndpointKind,
    pub path: String,
}

impl Endpoint {
    pub fn login() -> Self {
        Self {
            kind: EndpointKind::Login,
            path: "/auth/login".to_string(),
        }
    }

    pub fn register() -> Self {
        Self {
            kind: EndpointKind::Register,
            path: "/auth/signup".to_string(),
        }
    }

    /// Only the login endpoint hands out a session token
    pub fn issues_token(&self) -> bool {
        self.kind == EndpointKind::Login
    }

    /// Join with a base URL, tolerating a trailing slash on the base
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{base}{}", self.path)
        } else {
            format!("{base}/{}", self.path)
        }
    }

    /// Message shown when the server confirms success without one
    pub fn success_fallback(&self) -> &'static str {
        match self.kind {
            EndpointKind::Login => "Login successful",
            EndpointKind::Register => "Registration successful",
        }
    }
}

/// Why a submission failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidCredentials,
    ValidationRejectedByServer,
    ServerError,
    NetworkUnreachable,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidCredentials => "invalid credentials",
            Self::ValidationRejectedByServer => "rejected by server validation",
            Self::ServerError => "server error",
            Self::NetworkUnreachable => "network unreachable",
        };
        f.write_str(label)
    }
}

/// Result of one submission, after classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success {
        message: String,
        token: Option<String>,
    },
    Failure {
        kind: FailureKind,
        message: Option<String>,
    },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Text for the notification channel
    pub fn user_message(&self) -> String {
        match self {
            Self::Success { message, .. } => message.clone(),
            Self::Failure { kind, message } => {
                let server = message.as_deref().filter(|m| !m.trim().is_empty());
                match (kind, server) {
                    (FailureKind::InvalidCredentials, _) => INVALID_CREDENTIALS_MESSAGE.to_string(),
                    (FailureKind::ValidationRejectedByServer, Some(m)) => m.to_string(),
                    (FailureKind::ValidationRejectedByServer, None) => {
                        REJECTED_FALLBACK_MESSAGE.to_string()
                    }
                    (FailureKind::ServerError, Some(m)) => m.to_string(),
                    (FailureKind::ServerError, None) | (FailureKind::NetworkUnreachable, _) => {
                        SERVER_ERROR_MESSAGE.to_string()
                    }
                }
            }
        }
    }
}
