//! Submission coordinator
//!
//! Performs exactly one request per submission and classifies whatever
//! comes back into a [`SubmissionOutcome`]. Nothing here is retried:
//! signup is not idempotent and a blind retry could create two accounts.

use super::outcome::{Endpoint, EndpointKind, FailureKind, SubmissionOutcome};
use super::traits::{AuthTransport, RawResponse, TransportError};
use serde::Deserialize;
use std::sync::Arc;

/// Fields we read from any auth response body
#[derive(Debug, Default, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

impl ResponseBody {
    /// Lenient parse: anything that is not the expected JSON has no fields
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}

/// Sends validated payloads to the authentication service
#[derive(Clone)]
pub struct SubmissionCoordinator {
    transport: Arc<dyn AuthTransport>,
    base_url: String,
}

impl SubmissionCoordinator {
    pub fn new(transport: Arc<dyn AuthTransport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a payload that has already passed client-side validation.
    ///
    /// Never fails: transport errors come back as `Failure` outcomes.
    pub async fn submit(
        &self,
        endpoint: &Endpoint,
        payload: &serde_json::Value,
    ) -> SubmissionOutcome {
        let url = endpoint.url(&self.base_url);
        tracing::info!("Submitting to {url}");

        let result = self.transport.post_json(&url, payload).await;
        let outcome = classify(endpoint, result);

        if outcome.is_success() {
            tracing::info!("Submission to {url} succeeded");
        } else if let SubmissionOutcome::Failure { kind, message } = &outcome {
            match kind {
                FailureKind::ServerError | FailureKind::NetworkUnreachable => {
                    tracing::warn!("Submission to {url} failed: {kind} ({message:?})")
                }
                _ => tracing::info!("Submission to {url} rejected: {kind}"),
            }
        }

        outcome
    }
}

/// Map a raw transport result onto a domain outcome
pub fn classify(
    endpoint: &Endpoint,
    result: Result<RawResponse, TransportError>,
) -> SubmissionOutcome {
    let response = match result {
        Ok(response) => response,
        Err(TransportError::Unreachable(reason)) => {
            tracing::debug!("No response from server: {reason}");
            return SubmissionOutcome::Failure {
                kind: FailureKind::NetworkUnreachable,
                message: None,
            };
        }
        Err(TransportError::InvalidUrl(url)) => {
            tracing::error!("Refusing to submit to malformed URL {url}");
            return SubmissionOutcome::Failure {
                kind: FailureKind::ServerError,
                message: None,
            };
        }
    };

    let body = ResponseBody::parse(&response.body);
    let message = body.message.filter(|m| !m.trim().is_empty());

    match response.status {
        200..=299 => {
            if endpoint.issues_token() {
                match body.token.filter(|t| !t.is_empty()) {
                    Some(token) => SubmissionOutcome::Success {
                        message: message.unwrap_or_else(|| endpoint.success_fallback().to_string()),
                        token: Some(token),
                    },
                    None => {
                        tracing::warn!("Login response carried no token");
                        SubmissionOutcome::Failure {
                            kind: FailureKind::ServerError,
                            message: None,
                        }
                    }
                }
            } else {
                SubmissionOutcome::Success {
                    message: message.unwrap_or_else(|| endpoint.success_fallback().to_string()),
                    token: None,
                }
            }
        }
        401 | 422 => SubmissionOutcome::Failure {
            kind: match endpoint.kind {
                EndpointKind::Login => FailureKind::InvalidCredentials,
                EndpointKind::Register => FailureKind::ValidationRejectedByServer,
            },
            message,
        },
        // Login never echoes server text for unexpected statuses
        _ => SubmissionOutcome::Failure {
            kind: FailureKind::ServerError,
            message: match endpoint.kind {
                EndpointKind::Login => None,
                EndpointKind::Register => message,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::traits::MockAuthTransport;
    use crate::auth::outcome::SERVER_ERROR_MESSAGE;
    use mockall::predicate::{always, eq};
    use serde_json::json;

    fn ok(status: u16, body: &str) -> Result<RawResponse, TransportError> {
        Ok(RawResponse::new(status, body))
    }

    fn failure(kind: FailureKind, message: Option<&str>) -> SubmissionOutcome {
        SubmissionOutcome::Failure {
            kind,
            message: message.map(str::to_string),
        }
    }

    mod classify_login {
        use super::*;

        #[test]
        fn test_success_extracts_token() {
            let outcome = classify(&Endpoint::login(), ok(200, r#"{"token":"tok123"}"#));
            assert_eq!(
                outcome,
                SubmissionOutcome::Success {
                    message: "Login successful".to_string(),
                    token: Some("tok123".to_string()),
                }
            );
        }

        #[test]
        fn test_success_keeps_server_message() {
            let outcome = classify(
                &Endpoint::login(),
                ok(201, r#"{"token":"t","message":"Welcome back"}"#),
            );
            assert_eq!(outcome.user_message(), "Welcome back");
        }

        #[test]
        fn test_success_without_token_is_server_error() {
            let outcome = classify(&Endpoint::login(), ok(200, r#"{"message":"ok"}"#));
            assert_eq!(outcome, failure(FailureKind::ServerError, None));
        }

        #[test]
        fn test_401_and_422_are_invalid_credentials() {
            for status in [401, 422] {
                let outcome = classify(&Endpoint::login(), ok(status, r#"{"message":"nope"}"#));
                assert_eq!(
                    outcome,
                    failure(FailureKind::InvalidCredentials, Some("nope"))
                );
                assert_eq!(outcome.user_message(), "Incorrect Email or Password");
            }
        }

        #[test]
        fn test_other_statuses_are_server_errors() {
            for status in [400, 403, 404, 500, 503] {
                let outcome = classify(&Endpoint::login(), ok(status, ""));
                assert_eq!(outcome, failure(FailureKind::ServerError, None));
            }
        }

        #[test]
        fn test_500_hides_server_message() {
            let outcome = classify(
                &Endpoint::login(),
                ok(500, r#"{"message":"MongoError: E11000 at users.email"}"#),
            );
            assert_eq!(outcome, failure(FailureKind::ServerError, None));
            assert_eq!(outcome.user_message(), SERVER_ERROR_MESSAGE);
        }
    }

    mod classify_register {
        use super::*;

        #[test]
        fn test_success_has_no_token() {
            let outcome = classify(
                &Endpoint::register(),
                ok(200, r#"{"message":"Registered","token":"ignored"}"#),
            );
            assert_eq!(
                outcome,
                SubmissionOutcome::Success {
                    message: "Registered".to_string(),
                    token: None,
                }
            );
        }

        #[test]
        fn test_success_with_non_json_body_uses_fallback() {
            let outcome = classify(&Endpoint::register(), ok(200, "OK"));
            assert_eq!(outcome.user_message(), "Registration successful");
        }

        #[test]
        fn test_422_is_validation_rejection_with_message() {
            let outcome = classify(
                &Endpoint::register(),
                ok(422, r#"{"message":"Email already registered"}"#),
            );
            assert_eq!(
                outcome,
                failure(
                    FailureKind::ValidationRejectedByServer,
                    Some("Email already registered")
                )
            );
        }

        #[test]
        fn test_401_without_body_is_validation_rejection() {
            let outcome = classify(&Endpoint::register(), ok(401, ""));
            assert_eq!(
                outcome,
                failure(FailureKind::ValidationRejectedByServer, None)
            );
        }

        #[test]
        fn test_500_carries_server_message() {
            let outcome = classify(&Endpoint::register(), ok(500, r#"{"message":"db down"}"#));
            assert_eq!(outcome, failure(FailureKind::ServerError, Some("db down")));
        }
    }

    mod classify_transport {
        use super::*;

        #[test]
        fn test_unreachable_is_network_failure() {
            let outcome = classify(
                &Endpoint::login(),
                Err(TransportError::Unreachable("connection refused".to_string())),
            );
            assert_eq!(outcome, failure(FailureKind::NetworkUnreachable, None));
            assert_eq!(
                outcome.user_message(),
                "Server error. Please try again later."
            );
        }

        #[test]
        fn test_invalid_url_is_server_error() {
            let outcome = classify(
                &Endpoint::register(),
                Err(TransportError::InvalidUrl("::".to_string())),
            );
            assert_eq!(outcome, failure(FailureKind::ServerError, None));
        }
    }

    #[tokio::test]
    async fn test_submit_posts_once_to_joined_url() {
        let mut transport = MockAuthTransport::new();
        transport
            .expect_post_json()
            .with(
                eq("https://portal.test/auth/login"),
                eq(json!({"email": "a@b.com", "password": "secret1"})),
            )
            .times(1)
            .returning(|_, _| Ok(RawResponse::new(200, r#"{"token":"tok123"}"#)));

        let coordinator = SubmissionCoordinator::new(Arc::new(transport), "https://portal.test/");
        let outcome = coordinator
            .submit(
                &Endpoint::login(),
                &json!({"email": "a@b.com", "password": "secret1"}),
            )
            .await;

        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_submit_does_not_retry_transport_failure() {
        let mut transport = MockAuthTransport::new();
        transport
            .expect_post_json()
            .with(always(), always())
            .times(1)
            .returning(|_, _| Err(TransportError::Unreachable("timeout".to_string())));

        let coordinator = SubmissionCoordinator::new(Arc::new(transport), "https://portal.test");
        let outcome = coordinator.submit(&Endpoint::register(), &json!({})).await;

        assert_eq!(outcome, failure(FailureKind::NetworkUnreachable, None));
    }
}
