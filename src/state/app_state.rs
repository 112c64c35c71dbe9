//! Application state definitions

use crate::notify::StatusNotifier;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Register,
    /// Post-login landing page
    Dashboard,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Dashboard => "Dashboard",
        }
    }
}

/// Application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Transient submission results
    pub notifier: StatusNotifier,

    // Modal error dialog queue for local failures
    errors: VecDeque<String>,

    /// Frame counter driving the busy indicator
    pub tick: u64,
}

impl AppState {
    /// Navigate to a view, remembering where we came from
    pub fn navigate(&mut self, view: View) {
        if self.current_view != view {
            self.view_history.push(self.current_view);
            self.current_view = view;
        }
    }

    /// Navigate and forget history (after login/logout)
    pub fn replace_view(&mut self, view: View) {
        self.view_history.clear();
        self.current_view = view;
    }

    /// Go back to the previous view. The dashboard is never re-entered
    /// through history.
    pub fn go_back(&mut self) {
        while let Some(view) = self.view_history.pop() {
            if view != View::Dashboard {
                self.current_view = view;
                return;
            }
        }
    }

    pub fn push_error(&mut self, message: String) {
        tracing::debug!("Queued error dialog: {message}");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    pub fn advance_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}
