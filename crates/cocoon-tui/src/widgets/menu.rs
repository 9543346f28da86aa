use cocoon_core::page;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

pub struct MenuWidget;

impl MenuWidget {
    /// Navigation menu popup, one row per nav link
    pub fn render(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let area = frame.area();

        let popup_width = 32u16.min(area.width.saturating_sub(4));
        let popup_height = (page::NAV_ITEMS.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Menu ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.red))
            .style(Style::default().bg(theme.bg1));
        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Links
                Constraint::Length(1), // Hint
            ])
            .split(inner_area);

        let links: Vec<Line> = page::NAV_ITEMS
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let selected = i == app.menu_selected;
                let style = if selected {
                    Style::default()
                        .fg(theme.fg0)
                        .bg(theme.red_dim)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg1)
                };
                let marker = if selected { "▸" } else { " " };
                Line::from(vec![
                    Span::styled(format!(" {} {} ", marker, i + 1), style.fg(theme.red_light)),
                    Span::styled(format!("{} ", item.label), style),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(links), chunks[0]);

        let hint = Paragraph::new(Line::from(vec![
            Span::styled("[", Style::default().fg(theme.grey1)),
            Span::styled("Enter", Style::default().fg(theme.red_light).add_modifier(Modifier::BOLD)),
            Span::styled("] go  [", Style::default().fg(theme.grey1)),
            Span::styled("Esc", Style::default().fg(theme.red_light).add_modifier(Modifier::BOLD)),
            Span::styled("] close", Style::default().fg(theme.grey1)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[1]);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 30);
        assert_eq!(centered_rect(32, 7, area), Rect::new(34, 11, 32, 7));
        // larger than the area: pinned to the origin
        assert_eq!(centered_rect(120, 7, area).x, 0);
    }
}
