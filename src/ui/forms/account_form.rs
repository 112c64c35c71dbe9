//! Login and register form rendering
//!
//! Both forms share this renderer; the schema decides the fields, title
//! and button labels.

use super::field_renderer::{draw_field, draw_help_text, FIELD_HEIGHT};
use crate::state::{Form, FormButton, FormStateController};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use crate::ui::layout::spinner_frame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Forms with more fields than this are laid out in two columns
const SINGLE_COLUMN_MAX_FIELDS: usize = 4;

/// Draw an account form with its buttons row
pub fn draw(frame: &mut Frame, area: Rect, controller: &FormStateController, tick: u64) {
    let form = controller.form();
    let schema = &form.schema;
    let on_buttons = form.is_buttons_row_active();

    let block = Block::default()
        .title(format!(" {} ", schema.title))
        .title_style(
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if on_buttons {
            Color::DarkGray
        } else {
            Color::Cyan
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = if form.fields.len() > SINGLE_COLUMN_MAX_FIELDS {
        2
    } else {
        1
    };
    let rows_per_column = form.fields.len().div_ceil(columns).max(1);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(rows_per_column as u16 * FIELD_HEIGHT), // Fields
            Constraint::Length(BUTTON_HEIGHT),                          // Buttons
            Constraint::Length(1),                                      // Help
            Constraint::Min(0),
        ])
        .horizontal_margin(1)
        .split(inner);

    let column_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
        .split(sections[0]);

    for (column, fields) in form.fields.chunks(rows_per_column).enumerate() {
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(FIELD_HEIGHT); fields.len()])
            .split(column_areas[column]);

        for (row, field) in fields.iter().enumerate() {
            let index = column * rows_per_column + row;
            draw_field(
                frame,
                row_areas[row],
                field,
                form.active_field() == index,
                controller.error_for(field.name),
            );
        }
    }

    draw_buttons(frame, sections[1], controller, tick);

    let invalid = controller.errors().len();
    let help = if controller.is_submitting() {
        "Waiting for the server…".to_string()
    } else if invalid > 0 {
        format!("{invalid} field(s) need attention  Ctrl+S:submit again")
    } else if on_buttons {
        "←/→:choose  Enter:press  Tab:fields".to_string()
    } else {
        "Tab:next  ←/→:change option  Ctrl+S:submit".to_string()
    };
    draw_help_text(frame, sections[2], &help);
}

fn draw_buttons(frame: &mut Frame, area: Rect, controller: &FormStateController, tick: u64) {
    let form = controller.form();
    let on_buttons = form.is_buttons_row_active();
    let submitting = controller.is_submitting();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22),
            Constraint::Length(2),
            Constraint::Length(20),
            Constraint::Min(0),
        ])
        .split(area);

    let submit_label = if submitting {
        format!("{} {}", spinner_frame(tick), form.schema.submit_label)
    } else {
        form.schema.submit_label.to_string()
    };

    render_action_button(
        frame,
        chunks[0],
        &submit_label,
        on_buttons && form.selected_button == FormButton::Submit,
        !submitting,
        Some(Color::Green),
    );

    render_action_button(
        frame,
        chunks[2],
        form.schema.link_label,
        on_buttons && form.selected_button == FormButton::Link,
        true,
        Some(Color::Blue),
    );
}
