use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::theme::priority_color;

fn field<'a>(label: &'a str, value: Span<'a>) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        value,
    ])
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Details ");

    let Some(task) = app.selected_task() else {
        f.render_widget(block, area);
        return;
    };

    let mut lines: Vec<Line> = vec![Line::raw(task.name.as_str())];

    if let Some(status) = task.status {
        lines.push(field("Status: ", Span::raw(status.display_name())));
    }

    if let Some(priority) = task.priority {
        let name = priority.display_name();
        lines.push(field(
            "Priority: ",
            Span::styled(name, Style::default().fg(priority_color(name))),
        ));
    }

    if let Some(assignee) = &task.assigned_to {
        lines.push(field("Assignee: ", Span::raw(assignee.as_str())));
    }

    if !task.tags.is_empty() {
        lines.push(field("Tags: ", Span::raw(task.tags.join(", "))));
    }

    if let Some(id) = &task.id {
        lines.push(field("Card: ", Span::raw(id.as_str())));
    }

    if let Some(url) = &task.url {
        lines.push(field(
            "URL: ",
            Span::styled(url.as_str(), Style::default().fg(Color::Blue)),
        ));
    }

    if let Some(desc) = task.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(Line::raw(""));
        for text in desc.lines().take(20) {
            lines.push(Line::raw(text));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
