//! Submit lifecycle for one account form
//!
//! ```text
//! Idle ─submit─▶ Validating ─errors─▶ Idle
//!                    │
//!                    └─valid─▶ Submitting ─▶ Succeeded | Failed ─▶ Idle
//! ```
//!
//! The `Submitting` phase is the only thing standing between a second
//! submit intent and a second network call, so `begin_submit` must be the
//! single entry point into it.

use super::forms::{
    AccountForm, ErrorMap, Form, FormField, FormKind, FormSchema, FormValidator,
};
use crate::auth::{Endpoint, SubmissionOutcome};
use crate::notify::NotificationSink;
use crate::session::{SessionStore, SessionToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Where to go after a successful submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Post-login landing page
    Dashboard,
    /// Post-registration: sign in with the new account
    Login,
}

/// A validated request, ready to hand to the coordinator
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub endpoint: Endpoint,
    pub payload: serde_json::Value,
}

/// Why a submit intent did not produce a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A request for this form is already in flight
    InFlight,
    /// Client-side validation failed on this many fields
    Invalid(usize),
}

/// What a finished submission cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// `Succeeded` or `Failed`
    pub settled: SubmissionPhase,
    pub destination: Option<Destination>,
    /// Set when the token was accepted but could not be persisted
    pub session_error: Option<String>,
}

/// Holds one form's values, errors and submission phase
#[derive(Debug, Clone)]
pub struct FormStateController {
    form: AccountForm,
    validator: FormValidator,
    errors: ErrorMap,
    phase: SubmissionPhase,
}

impl FormStateController {
    pub fn new(schema: FormSchema) -> Self {
        let validator = FormValidator::new(schema.rules.clone());
        Self {
            form: AccountForm::new(schema),
            validator,
            errors: ErrorMap::new(),
            phase: SubmissionPhase::Idle,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.form.kind()
    }

    pub fn form(&self) -> &AccountForm {
        &self.form
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    #[cfg(test)]
    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    /// Field navigation is always allowed, value edits are not while a
    /// request is in flight.
    pub fn form_mut(&mut self) -> &mut AccountForm {
        &mut self.form
    }

    /// Apply an edit to the active field. Does not re-validate.
    pub fn edit_active(&mut self, edit: impl FnOnce(&mut FormField)) -> bool {
        if self.is_submitting() {
            return false;
        }
        match self.form.get_active_field_mut() {
            Some(field) => {
                edit(field);
                true
            }
            None => false,
        }
    }

    /// Set a field by name. Does not re-validate.
    #[cfg(test)]
    pub fn set_value(&mut self, field: &str, value: &str) -> bool {
        !self.is_submitting() && self.form.set_value(field, value)
    }

    /// Validate and, if clean, move to `Submitting`.
    ///
    /// On success the caller must send the returned request and feed the
    /// outcome back through [`complete`](Self::complete).
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitBlocked> {
        if self.is_submitting() {
            tracing::debug!("Ignoring submit for {:?}: already in flight", self.kind());
            return Err(SubmitBlocked::InFlight);
        }

        self.phase = SubmissionPhase::Validating;
        self.errors = self.validator.validate(&self.form.snapshot());

        if !self.errors.is_empty() {
            tracing::debug!(
                "{:?} form failed validation on {} field(s)",
                self.kind(),
                self.errors.len()
            );
            self.phase = SubmissionPhase::Idle;
            return Err(SubmitBlocked::Invalid(self.errors.len()));
        }

        self.phase = SubmissionPhase::Submitting;
        Ok(PendingSubmission {
            endpoint: self.form.schema.endpoint.clone(),
            payload: self.form.payload(),
        })
    }

    /// Apply a classified outcome and return to `Idle`.
    ///
    /// Success stores the token (if any), notifies, and names the next
    /// destination. Failure notifies and leaves the session untouched.
    pub fn complete(
        &mut self,
        outcome: SubmissionOutcome,
        session: &SessionStore,
        sink: &mut dyn NotificationSink,
    ) -> CycleReport {
        if !self.is_submitting() {
            tracing::warn!(
                "{:?} outcome arrived while {:?}, applying anyway",
                self.kind(),
                self.phase
            );
        }

        let message = outcome.user_message();
        let report = match outcome {
            SubmissionOutcome::Success { token, .. } => {
                self.phase = SubmissionPhase::Succeeded;

                let session_error = token.and_then(|token| {
                    session
                        .set(SessionToken::new(token))
                        .err()
                        .map(|e| {
                            tracing::warn!("Session token not persisted: {e}");
                            e.to_string()
                        })
                });
                sink.success(&message);

                let destination = match self.kind() {
                    FormKind::Login => Destination::Dashboard,
                    FormKind::Register => Destination::Login,
                };
                self.form.reset();

                CycleReport {
                    settled: SubmissionPhase::Succeeded,
                    destination: Some(destination),
                    session_error,
                }
            }
            SubmissionOutcome::Failure { kind, .. } => {
                self.phase = SubmissionPhase::Failed;
                tracing::debug!("{:?} submission failed: {kind}", self.kind());
                sink.failure(&message);

                CycleReport {
                    settled: SubmissionPhase::Failed,
                    destination: None,
                    session_error: None,
                }
            }
        };

        self.phase = SubmissionPhase::Idle;
        report
    }
}
