use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

use crate::app::App;

pub struct PageViewWidget;

impl PageViewWidget {
    /// Page body scrolled to the current position
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let paragraph = Paragraph::new(app.page_lines())
            .style(Style::default().bg(app.theme.bg0).fg(app.theme.fg0))
            .scroll((app.scroll.current_scroll(), 0));
        frame.render_widget(paragraph, area);
    }
}
