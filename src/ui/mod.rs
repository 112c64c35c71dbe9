//! UI module for rendering the TUI

mod components;
mod dashboard;
mod forms;
mod layout;

use crate::app::App;
use crate::state::{FormKind, View};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let screen = layout::create_layout(frame.area());

    layout::draw_header(frame, screen.header, app);
    layout::draw_notification(frame, screen.notification, app);

    let tick = app.state.tick;
    match app.state.current_view {
        View::Login => forms::draw_account_form(
            frame,
            screen.content,
            app.controller(FormKind::Login),
            tick,
        ),
        View::Register => forms::draw_account_form(
            frame,
            screen.content,
            app.controller(FormKind::Register),
            tick,
        ),
        View::Dashboard => dashboard::draw(frame, screen.content, app),
    }

    layout::draw_status_bar(frame, screen.status, app);

    // Error dialog overlay (modal)
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message, app.state.error_count());
    }
}
