//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Columns of padding between the border and the message
const PADDING: u16 = 4;

/// Configuration for rendering a modal dialog
pub struct DialogConfig<'a> {
    pub title: &'a str,
    /// Colors both the title and the border
    pub accent: Color,
    /// Message body; `\n` starts a new paragraph
    pub message: &'a str,
    /// Right-aligned note in the top border, e.g. a queue count
    pub badge: Option<String>,
    pub hint: Option<Line<'a>>,
    pub max_width: u16,
}

impl Default for DialogConfig<'_> {
    fn default() -> Self {
        Self {
            title: "Dialog",
            accent: Color::White,
            message: "",
            badge: None,
            hint: None,
            max_width: 60,
        }
    }
}

/// Render a dialog centered over the whole frame
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let text_width = config.max_width.saturating_sub(PADDING + 2).max(1) as usize;
    let lines = wrap_text(config.message, text_width);

    let widest = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .max(config.title.chars().count()) as u16;
    let width = (widest + PADDING + 2).min(config.max_width);
    // title + blank + message + optional (blank + hint) + borders
    let hint_rows = if config.hint.is_some() { 2 } else { 0 };
    let height = (lines.len() as u16 + 2 + hint_rows + 2).max(5);

    let area = centered(frame.area(), width, height);
    frame.render_widget(Clear, area);

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(lines.into_iter().map(Line::from));
    if let Some(hint) = config.hint {
        content.push(Line::from(""));
        content.push(hint);
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.accent))
        .style(Style::default().bg(Color::Black));
    if let Some(badge) = config.badge {
        block = block.title_top(Line::from(format!(" {badge} ")).right_aligned());
    }

    let dialog = Paragraph::new(content)
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(dialog, area);
}

/// Rect of the given size centered in `outer`, clipped to fit
fn centered(outer: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}

/// Greedy word wrap measured in chars. Words longer than the width are
/// split across lines.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(max_width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 { word.len() } else { word.len() + 1 };
            if current_len > 0 && current_len + needed > max_width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
        }

        lines.push(current);
    }

    lines
}
