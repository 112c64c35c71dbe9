//! Application state and core logic

use crate::auth::{HttpTransport, SubmissionCoordinator, SubmissionOutcome};
use crate::config::PortalConfig;
use crate::notify::NotificationSink;
use crate::session::SessionStore;
use crate::state::{
    AppState, Destination, Form, FormButton, FormKind, FormSchema, FormStateController,
    SubmitBlocked, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Outcome of a spawned submission, tagged with the form that sent it
type SubmissionResult = (FormKind, SubmissionOutcome);

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    pub login: FormStateController,
    pub register: FormStateController,
    /// Shared session; the login success path is its only writer
    pub session: SessionStore,
    coordinator: SubmissionCoordinator,
    results_tx: mpsc::UnboundedSender<SubmissionResult>,
    results_rx: mpsc::UnboundedReceiver<SubmissionResult>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from user configuration
    pub fn new(config: &PortalConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.request_timeout())?;
        let server_url = config.server_url();
        tracing::info!("Using authentication service at {server_url}");
        let coordinator = SubmissionCoordinator::new(Arc::new(transport), server_url);

        let mut startup_error = None;
        let session = match config.session_path() {
            Some(path) => SessionStore::open(&path).unwrap_or_else(|e| {
                tracing::warn!("Starting without a stored session: {e}");
                startup_error = Some(format!("Could not restore session: {e}"));
                SessionStore::in_memory()
            }),
            None => SessionStore::in_memory(),
        };

        let mut app = Self::with_parts(coordinator, session);
        if let Some(message) = startup_error {
            app.state.push_error(message);
        }
        Ok(app)
    }

    /// Assemble an app from an existing coordinator and session
    pub fn with_parts(coordinator: SubmissionCoordinator, session: SessionStore) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let mut state = AppState::default();

        // A restored session skips the login form
        if session.is_authenticated() {
            state.replace_view(View::Dashboard);
        }

        Self {
            state,
            login: FormStateController::new(FormSchema::login()),
            register: FormStateController::new(FormSchema::register()),
            session,
            coordinator,
            results_tx,
            results_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether any form has a request in flight
    pub fn is_busy(&self) -> bool {
        self.login.is_submitting() || self.register.is_submitting()
    }

    /// Base URL submissions are sent to
    pub fn server_url(&self) -> &str {
        self.coordinator.base_url()
    }

    pub fn controller(&self, kind: FormKind) -> &FormStateController {
        match kind {
            FormKind::Login => &self.login,
            FormKind::Register => &self.register,
        }
    }

    fn controller_mut(&mut self, kind: FormKind) -> &mut FormStateController {
        match kind {
            FormKind::Login => &mut self.login,
            FormKind::Register => &mut self.register,
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Login => self.handle_form_key(FormKind::Login, key),
            View::Register => self.handle_form_key(FormKind::Register, key),
            View::Dashboard => self.handle_dashboard_key(key),
        }
        Ok(())
    }

    /// Keys shared by both account forms
    fn handle_form_key(&mut self, kind: FormKind, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let controller = self.controller_mut(kind);
        let on_buttons = controller.form().is_buttons_row_active();
        let on_choice = controller
            .form()
            .get_field(controller.form().active_field())
            .is_some_and(|f| f.is_choice());
        let selected_button = controller.form().selected_button;

        match key.code {
            KeyCode::Char('s') if ctrl => self.submit(kind),
            KeyCode::Tab | KeyCode::Down => controller.form_mut().next_field(),
            KeyCode::BackTab | KeyCode::Up => controller.form_mut().prev_field(),
            KeyCode::Esc => {
                if kind == FormKind::Register {
                    self.switch_form(kind);
                } else {
                    self.state.notifier.dismiss();
                }
            }
            // Buttons row
            KeyCode::Left | KeyCode::Right if on_buttons => {
                let form = controller.form_mut();
                form.selected_button = form.selected_button.toggle();
            }
            KeyCode::Enter if on_buttons => match selected_button {
                FormButton::Submit => self.submit(kind),
                FormButton::Link => self.switch_form(kind),
            },
            // Choice fields
            KeyCode::Right | KeyCode::Char(' ') if on_choice => {
                controller.edit_active(|f| f.next_option());
            }
            KeyCode::Left if on_choice => {
                controller.edit_active(|f| f.prev_option());
            }
            // Text input
            KeyCode::Enter => controller.form_mut().next_field(),
            KeyCode::Char(c) if !ctrl && !on_buttons => {
                controller.edit_active(|f| f.push_char(c));
            }
            KeyCode::Backspace if !on_buttons => {
                controller.edit_active(|f| f.pop_char());
            }
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('l') => self.logout(),
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Esc => self.state.notifier.dismiss(),
            _ => {}
        }
    }

    /// Follow the Sign Up / Back to Login link
    fn switch_form(&mut self, from: FormKind) {
        match from {
            FormKind::Login => self.state.navigate(View::Register),
            FormKind::Register => {
                if self.state.view_history.last() == Some(&View::Login) {
                    self.state.go_back();
                } else {
                    self.state.replace_view(View::Login);
                }
            }
        }
    }

    /// Validate a form and, if clean, send it in the background
    fn submit(&mut self, kind: FormKind) {
        let controller = self.controller_mut(kind);
        match controller.begin_submit() {
            Ok(pending) => {
                let coordinator = self.coordinator.clone();
                let results_tx = self.results_tx.clone();
                tokio::spawn(async move {
                    let outcome = coordinator
                        .submit(&pending.endpoint, &pending.payload)
                        .await;
                    // Receiver only goes away on shutdown
                    let _ = results_tx.send((kind, outcome));
                });
            }
            Err(SubmitBlocked::InFlight) => {}
            Err(SubmitBlocked::Invalid(_)) => {
                // Jump to the first field with an error
                let first_invalid = controller
                    .form()
                    .fields
                    .iter()
                    .position(|f| controller.error_for(f.name).is_some());
                if let Some(index) = first_invalid {
                    controller.form_mut().set_active_field(index);
                }
            }
        }
    }

    /// Apply any submission results that have arrived, without waiting
    pub fn poll_submissions(&mut self) {
        while let Ok((kind, outcome)) = self.results_rx.try_recv() {
            self.apply_outcome(kind, outcome);
        }
    }

    fn apply_outcome(&mut self, kind: FormKind, outcome: SubmissionOutcome) {
        let controller = match kind {
            FormKind::Login => &mut self.login,
            FormKind::Register => &mut self.register,
        };
        let report = controller.complete(outcome, &self.session, &mut self.state.notifier);
        tracing::debug!("{kind:?} submission settled as {:?}", report.settled);

        if let Some(message) = report.session_error {
            self.state
                .push_error(format!("Logged in, but the session could not be saved: {message}"));
        }

        match report.destination {
            Some(Destination::Dashboard) => self.state.replace_view(View::Dashboard),
            Some(Destination::Login) => self.state.replace_view(View::Login),
            None => {}
        }
    }

    /// Clear the session and return to the login form
    pub fn logout(&mut self) {
        match self.session.clear() {
            Ok(()) => self.state.notifier.success("Logged out"),
            Err(e) => {
                tracing::warn!("Failed to remove stored session: {e}");
                self.state
                    .push_error(format!("Logged out, but the stored session remains: {e}"));
            }
        }
        self.state.replace_view(View::Login);
    }

    /// Wait for the next submission result and apply it
    #[cfg(test)]
    async fn wait_for_submission(&mut self) -> bool {
        match self.results_rx.recv().await {
            Some((kind, outcome)) => {
                self.apply_outcome(kind, outcome);
                true
            }
            None => false,
        }
    }
}
