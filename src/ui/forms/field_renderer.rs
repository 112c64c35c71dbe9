//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: top border, value, bottom border
pub const FIELD_HEIGHT: u16 = 3;

/// Draw a form field. An inline error is shown in the bottom border.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
) {
    let border_style = match (is_active, error.is_some()) {
        (true, _) => Style::default().fg(Color::Cyan),
        (false, true) => Style::default().fg(Color::Red),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    let value_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let display_value = field.display_value();
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    // Choice fields are cycled, not typed into, so they get no cursor
    let cursor = if is_active && !field.is_choice() {
        "▌"
    } else {
        ""
    };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_str, value_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let mut title = vec![Span::raw(format!(" {}", field.label))];
    if field.mandatory {
        title.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    title.push(Span::raw(" "));

    let mut block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(message) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        )));
    }

    frame.render_widget(content.block(block), area);
}

/// Draw a line of dimmed help text
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)));
    frame.render_widget(help, area);
}
