use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, ViewMode};
use crate::ui::theme::{auth_color, flash_color};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    match app.view_mode {
        ViewMode::Tasks => {
            spans.push(hint("↑↓", "navigate"));
            spans.push(hint("n", "new task"));
            spans.push(hint("b", "boards"));
            spans.push(hint("d", "default list"));
            spans.push(hint("r", "refresh"));
            spans.push(hint("q", "quit"));
        }
        ViewMode::Boards | ViewMode::Lists => {
            spans.push(hint("↑↓", "navigate"));
            spans.push(hint("enter", "select"));
            spans.push(hint("esc", "back"));
            spans.push(hint("r", "reload"));
            spans.push(hint("q", "quit"));
        }
        ViewMode::CreateForm => {
            spans.push(hint("tab", "next field"));
            spans.push(hint("←→", "platform"));
            spans.push(hint("enter", "create"));
            spans.push(hint("esc", "cancel"));
        }
    }

    // Connection indicator
    spans.push(Span::raw("  "));
    let label = match app.authenticated {
        Some(true) => format!(" {} ", app.service_name()),
        Some(false) => format!(" {}: auth failed ", app.service_name()),
        None => format!(" {}: offline ", app.service_name()),
    };
    spans.push(Span::styled(
        label,
        Style::default()
            .fg(Color::Black)
            .bg(auth_color(app.authenticated)),
    ));

    // Flash message
    if let Some(flash) = &app.flash_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            flash.text.as_str(),
            Style::default().fg(flash_color(flash.kind)),
        ));
    }

    let line = Line::from(spans);
    let paragraph = Paragraph::new(line);
    f.render_widget(paragraph, area);
}

fn hint(key: &str, desc: &str) -> Span<'static> {
    Span::styled(
        format!(" {key}:{desc} "),
        Style::default().fg(Color::DarkGray),
    )
}
