pub mod board_picker;
pub mod detail_panel;
pub mod footer;
pub mod task_form;
pub mod task_list;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, ViewMode};

pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // main content
            Constraint::Length(1), // footer
        ])
        .split(size);

    let main_area = vertical[0];
    let bottom_area = vertical[1];

    match app.view_mode {
        ViewMode::Tasks => {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(main_area);

            task_list::render(f, horizontal[0], app);
            detail_panel::render(f, horizontal[1], app);
        }
        ViewMode::Boards => board_picker::render_boards(f, main_area, app),
        ViewMode::Lists => board_picker::render_lists(f, main_area, app),
        ViewMode::CreateForm => task_form::render(f, main_area, app),
    }

    footer::render(f, bottom_area, app);
}
