//! Layout components (header, notification bar, status bar)

use crate::app::App;
use crate::notify::NotificationLevel;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner glyph for the given animation tick
pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
}

/// Areas of the main screen
pub struct ScreenLayout {
    pub header: Rect,
    pub notification: Rect,
    pub content: Rect,
    pub status: Rect,
}

/// Split the frame into header, notification line, content and status bar
pub fn create_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Notification
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    ScreenLayout {
        header: chunks[0],
        notification: chunks[1],
        content: chunks[2],
        status: chunks[3],
    }
}

/// Draw the application header
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let header = Line::from(vec![
        Span::styled(
            " Job Portal ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            app.state.current_view.title(),
            Style::default().fg(Color::Blue),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Draw the newest live notification, if any
pub fn draw_notification(frame: &mut Frame, area: Rect, app: &App) {
    let Some(notification) = app.state.notifier.current() else {
        return;
    };

    let (icon, color) = match notification.level {
        NotificationLevel::Success => ("✓", Color::Green),
        NotificationLevel::Failure => ("✗", Color::Red),
    };
    let line = Line::from(Span::styled(
        format!(" {icon} {}", notification.message),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Session status
    if app.session.is_authenticated() {
        spans.push(Span::styled(" ● ", Style::default().fg(Color::Green)));
    } else {
        spans.push(Span::styled(" ○ ", Style::default().fg(Color::Gray)));
    }

    if app.is_busy() {
        spans.push(Span::styled(
            format!("{} submitting  ", spinner_frame(app.state.tick)),
            Style::default().fg(Color::Yellow),
        ));
    }

    spans.push(Span::styled(
        view_hints(app.state.current_view),
        Style::default().fg(Color::Gray),
    ));

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        app.server_url(),
        Style::default().fg(Color::Blue),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current view
fn view_hints(view: View) -> &'static str {
    match view {
        View::Login => "Tab:next  ^S:login  Esc:dismiss",
        View::Register => "Tab:next  ^S:register  Esc:back to login",
        View::Dashboard => "l:logout  q:quit",
    }
}
