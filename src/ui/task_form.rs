use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, FormField};
use crate::model::form::Platform;
use crate::ui::theme::priority_color;

const LABEL_WIDTH: usize = 18;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;
    let mut lines: Vec<Line> = Vec::new();

    for field in FormField::ALL {
        let focused = field == form.focus;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let label = Span::styled(
            format!("{:<width$}", field.label(), width = LABEL_WIDTH),
            label_style,
        );

        let value = match field {
            FormField::Platform => {
                let spans: Vec<Span> = Platform::ALL
                    .iter()
                    .map(|p| {
                        if *p == form.platform {
                            Span::styled(
                                format!("[{p}] "),
                                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::styled(format!(" {p}  "), Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                let mut line = vec![label];
                line.extend(spans);
                lines.push(Line::from(line));
                continue;
            }
            FormField::Priority => Span::styled(
                form.priority.as_str(),
                Style::default().fg(priority_color(form.priority.trim())),
            ),
            other => Span::raw(form.value(other)),
        };
        lines.push(Line::from(vec![label, value]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Title is required (3-100 characters). Priority is added to the card description.",
        Style::default().fg(Color::DarkGray),
    ));

    let title = if app.loading {
        " New Task (saving...) "
    } else {
        " New Task "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(title);

    f.render_widget(Paragraph::new(lines).block(block), area);

    // Position cursor at the end of the focused text field
    if form.focus != FormField::Platform {
        let row = FormField::ALL
            .iter()
            .position(|field| *field == form.focus)
            .unwrap_or(0) as u16;
        let typed = form.value(form.focus).chars().count() as u16;
        let x = area.x + 1 + LABEL_WIDTH as u16 + typed;
        let y = area.y + 1 + row;
        if area.width > 2 && area.height > 2 {
            f.set_cursor_position((
                x.min(area.x + area.width - 2),
                y.min(area.y + area.height - 2),
            ));
        }
    }
}
