//! Error dialog component

use super::base::{render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the front of the error queue as a modal overlay.
///
/// `queued` is the total number of errors waiting, including this one.
pub fn render_error_dialog(frame: &mut Frame, message: &str, queued: usize) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", key),
        Span::raw(" or "),
        Span::styled("Esc", key),
        Span::raw(" to dismiss"),
    ]);

    render_dialog(
        frame,
        DialogConfig {
            title: "Error",
            accent: Color::Red,
            message,
            badge: (queued > 1).then(|| format!("1 of {queued}")),
            hint: Some(hint),
            max_width: 60,
        },
    );
}
