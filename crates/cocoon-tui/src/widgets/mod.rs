mod header;
mod menu;
mod page_view;
mod status_bar;

pub use header::HeaderWidget;
pub use menu::MenuWidget;
pub use page_view::PageViewWidget;
pub use status_bar::StatusBarWidget;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::{App, STATUS_ROWS};

/// Draw one prepared frame: page, fixed header on top, status bar, menu
pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(STATUS_ROWS)])
        .split(size);

    let page_area = main_layout[0];
    PageViewWidget::render(frame, page_area, app);
    HeaderWidget::render(
        frame,
        Rect::new(page_area.x, page_area.y, page_area.width, 1),
        app,
    );
    StatusBarWidget::render(frame, main_layout[1], app);

    if app.menu_open {
        MenuWidget::render(frame, app);
    }
}
