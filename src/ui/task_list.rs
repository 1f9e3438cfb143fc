use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::app::App;
use crate::ui::theme::ACCENT;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let selected = i == app.selected_task;

            let marker = if selected {
                Span::styled("▸ ", Style::default().fg(Color::Cyan))
            } else {
                Span::raw("  ")
            };

            let short_id: String = task
                .id
                .as_deref()
                .unwrap_or("--------")
                .chars()
                .take(8)
                .collect();
            let id_span = Span::styled(format!("{short_id} "), Style::default().fg(ACCENT));

            // Truncate name to fit
            let max_name = area.width.saturating_sub(14) as usize;
            let name: String = task.name.chars().take(max_name).collect();
            let name_style = if selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![marker, id_span, Span::styled(name, name_style)]))
        })
        .collect();

    let title = if app.loading {
        format!(" {} (loading...) ", app.list_title())
    } else {
        format!(" {} ({}) ", app.list_title(), app.tasks.len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title),
    );

    f.render_widget(list, area);
}
