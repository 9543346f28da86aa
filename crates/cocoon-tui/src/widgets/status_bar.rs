use cocoon_core::page::SectionKind;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::page::text::display_width;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let section = app.current_section().map(section_label).unwrap_or("-");
            format!(" COCOON | {} | {}%", section, scroll_percent(app))
        };

        let help_hint = " q:quit j/k:scroll Tab:section 1-3:nav m:menu ";
        let padding_len = (area.width as usize)
            .saturating_sub(display_width(&status_text) + display_width(help_hint));

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn section_label(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Hero => "Home",
        SectionKind::Achievements => "About",
        SectionKind::Global => "Global",
        SectionKind::Programs => "Program",
        SectionKind::Interview => "Interview",
        SectionKind::Cta => "Apply",
        SectionKind::Footer => "Contact",
    }
}

fn scroll_percent(app: &App) -> u16 {
    let max = app.max_scroll();
    if max == 0 {
        return 100;
    }
    (app.scroll.current_scroll() as u32 * 100 / max as u32) as u16
}
