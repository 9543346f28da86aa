use cocoon_core::page::{self, SectionKind};
use cocoon_core::style::HeaderStyle;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::page::text::display_width;

/// Below this width the nav links collapse into the menu button
const NAV_MIN_WIDTH: u16 = 60;

pub struct HeaderWidget;

impl HeaderWidget {
    /// Fixed one-row header: wordmark left, nav and apply button right.
    ///
    /// Transparent headers only draw their own text so the page shows
    /// through; frosted headers paint the whole row.
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let style = app.header_style();

        if style == HeaderStyle::Frosted {
            frame.render_widget(Clear, area);
            frame.render_widget(
                Paragraph::new("").style(Style::default().bg(theme.bg1)),
                area,
            );
        }

        let bg = match style {
            HeaderStyle::Frosted => Style::default().bg(theme.bg1),
            HeaderStyle::Transparent => Style::default(),
        };

        let logo = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                page::BRAND.0,
                bg.fg(theme.red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                page::BRAND.1,
                bg.fg(theme.fg0).add_modifier(Modifier::BOLD),
            ),
        ]);
        let logo_width = (display_width(page::BRAND.0) + display_width(page::BRAND.1) + 1) as u16;
        frame.render_widget(
            Paragraph::new(logo),
            Rect::new(area.x, area.y, logo_width.min(area.width), 1),
        );

        let right = Self::right_spans(app, bg, area.width);
        let width: u16 = right
            .iter()
            .map(|s| display_width(&s.content) as u16)
            .sum::<u16>()
            .min(area.width.saturating_sub(logo_width));
        let right_area = Rect::new(area.x + area.width - width, area.y, width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(right)).alignment(Alignment::Right),
            right_area,
        );
    }

    fn right_spans(app: &App, bg: Style, width: u16) -> Vec<Span<'static>> {
        let theme = &app.theme;
        let mut spans = Vec::new();

        if width >= NAV_MIN_WIDTH {
            let current = app.current_section();
            for (i, item) in page::NAV_ITEMS.iter().enumerate() {
                let active = current.is_some() && current == SectionKind::from_anchor(item.anchor);
                let fg = if active { theme.red_light } else { theme.fg1 };
                spans.push(Span::styled(format!("{}", i + 1), bg.fg(theme.grey1)));
                spans.push(Span::styled(format!(" {}  ", item.label), bg.fg(fg)));
            }
        } else {
            let fg = if app.menu_open { theme.red_light } else { theme.fg0 };
            spans.push(Span::styled("☰ ", bg.fg(fg)));
        }

        spans.push(Span::styled(
            format!(" {} ", page::APPLY_LABEL),
            Style::default()
                .fg(theme.fg0)
                .bg(theme.red)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(" ", bg));
        spans
    }
}
