use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::app::App;

fn render_picker<'a>(
    f: &mut Frame,
    area: Rect,
    title: String,
    entries: impl Iterator<Item = (&'a str, &'a str)>,
    selected: usize,
) {
    let items: Vec<ListItem> = entries
        .enumerate()
        .map(|(i, (name, id))| {
            let style = if i == selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if i == selected { "▸ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker}{name}"), style),
                Span::styled(format!("  {id}"), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title),
    );
    f.render_widget(list, area);
}

pub fn render_boards(f: &mut Frame, area: Rect, app: &App) {
    let title = if app.loading {
        " Boards (loading...) ".to_string()
    } else if app.boards.is_empty() {
        " Boards (none found) ".to_string()
    } else {
        " Select a board ".to_string()
    };
    let entries = app.boards.iter().map(|b| (b.name.as_str(), b.id.as_str()));
    render_picker(f, area, title, entries, app.selected_board);
}

pub fn render_lists(f: &mut Frame, area: Rect, app: &App) {
    let board = app
        .current_board
        .as_ref()
        .map(|b| b.name.as_str())
        .unwrap_or("Board");
    let title = if app.lists.is_empty() {
        format!(" {board}: no open lists ")
    } else {
        format!(" {board}: select a list ")
    };
    let entries = app.lists.iter().map(|l| (l.name.as_str(), l.id.as_str()));
    render_picker(f, area, title, entries, app.selected_list);
}
