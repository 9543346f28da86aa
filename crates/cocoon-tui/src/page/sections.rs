//! Section builders for the landing page

use cocoon_core::page::{
    self, Achievement, ImageSide, Program, RichLine, SectionKind, Testimonial,
};
use cocoon_core::style::{Offset, Transition};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::text::{display_width, pad_right, spaced, wrap};
use super::{pad, span, Block, LayoutContext, PageLayout, SectionBuilder, SectionView};
use crate::theme::Theme;

/// Rows a block travels while rising into place
const RISE: u16 = 2;
/// Columns a block travels while sliding in
const SLIDE: u16 = 6;
/// Program rows switch to a two-column layout at this content width
const TWO_COLUMN_MIN: u16 = 70;
const CARD_MAX: u16 = 72;

/// Lay out every section for `ctx`.
///
/// `counters` holds the current text of each achievement counter, in page
/// order; missing entries render as `0`.
pub fn build_page(ctx: LayoutContext, counters: &[String], theme: &Theme) -> PageLayout {
    let sections = SectionKind::ALL
        .into_iter()
        .map(|kind| build_section(kind, &ctx, counters, theme))
        .collect();
    PageLayout::new(ctx, sections)
}

fn build_section(
    kind: SectionKind,
    ctx: &LayoutContext,
    counters: &[String],
    theme: &Theme,
) -> SectionView {
    let b = Builder { ctx, theme };
    match kind {
        SectionKind::Hero => b.hero(),
        SectionKind::Achievements => b.achievements(counters),
        SectionKind::Global => b.global(),
        SectionKind::Programs => b.programs(),
        SectionKind::Interview => b.interview(),
        SectionKind::Cta => b.cta(),
        SectionKind::Footer => b.footer(),
    }
}

struct Builder<'a> {
    ctx: &'a LayoutContext,
    theme: &'a Theme,
}

impl Builder<'_> {
    fn hero(&self) -> SectionView {
        let t = self.theme;
        let mut s = SectionBuilder::new(SectionKind::Hero);

        let tagline = self.centered(vec![span(
            spaced(page::HERO_TAGLINE),
            Style::default().fg(t.red_light),
        )]);
        s.push(self.rise(vec![tagline], 0));
        s.spacer(1);

        let title = self.rich_lines(&page::HERO_TITLE, Style::default().fg(t.fg0).add_modifier(Modifier::BOLD));
        s.push(self.rise(title, 200));

        let body = page::HERO_BODY
            .iter()
            .flat_map(|line| self.paragraph(line, Style::default().fg(t.fg1)))
            .collect();
        s.push(self.rise(body, 400));
        s.spacer(1);

        s.push(self.rise(vec![self.button(page::HERO_BUTTON)], 600));
        s.spacer(2);

        let hint = vec![
            self.centered(vec![span(spaced(page::SCROLL_HINT), Style::default().fg(t.grey1))]),
            self.centered(vec![span("│", Style::default().fg(t.red))]),
        ];
        s.push(Block::new(hint, Offset::None, self.ctx.fade_in(800)));

        s.finish(self.ctx.viewport_height)
    }

    fn achievements(&self, counters: &[String]) -> SectionView {
        let t = self.theme;
        let mut s = SectionBuilder::new(SectionKind::Achievements);
        s.spacer(3);
        s.push(self.heading(&page::ACHIEVEMENTS_TITLE, &page::ACHIEVEMENTS_BODY));
        s.spacer(2);

        for (i, achievement) in page::ACHIEVEMENTS.iter().enumerate() {
            let value = counters
                .get(i)
                .cloned()
                .unwrap_or_else(|| "0".to_string());
            let card = self.achievement_card(achievement, value);
            let top = s.push(self.rise(card, 200 + 150 * i as u64));
            s.mark_counter(top + 1);
            s.spacer(1);
        }

        let rule = "─".repeat(self.ctx.column().min(40) as usize);
        s.push(Block::new(
            vec![self.centered(vec![span(rule, Style::default().fg(t.grey0))])],
            Offset::None,
            self.ctx.fade_in(800),
        ));
        s.spacer(3);
        s.finish(0)
    }

    fn achievement_card(&self, achievement: &Achievement, value: String) -> Vec<Line<'static>> {
        let t = self.theme;
        vec![
            self.centered(vec![span(achievement.label, Style::default().fg(t.grey2))]),
            self.centered(vec![span(
                value,
                Style::default().fg(t.red_light).add_modifier(Modifier::BOLD),
            )]),
        ]
    }

    fn global(&self) -> SectionView {
        let t = self.theme;
        let mut s = SectionBuilder::new(SectionKind::Global);
        s.spacer(3);

        let mut lines = self.rich_lines(&page::GLOBAL_TITLE, Style::default().fg(t.fg0).add_modifier(Modifier::BOLD));
        lines.push(Line::default());
        for body in page::GLOBAL_BODY {
            lines.extend(self.paragraph(body, Style::default().fg(t.fg1)));
        }
        s.push(Block::new(lines, Offset::Left(SLIDE), self.ctx.fade_in(0)));
        s.spacer(2);

        let card_width = page::GLOBAL_CITIES
            .iter()
            .map(|city| display_width(city))
            .max()
            .unwrap_or(0)
            + 4;
        let row_width = (card_width + 2) * page::GLOBAL_CITIES.len();

        if row_width <= self.ctx.column() as usize {
            // side by side: each card is its own column block, so stack rows
            // of the three cards and reveal them together with the first delay
            let mut rows = vec![Vec::new(), Vec::new(), Vec::new()];
            for city in page::GLOBAL_CITIES {
                for (row, text) in rows.iter_mut().zip(city_card(city, card_width)) {
                    if !row.is_empty() {
                        row.push(Span::raw("  "));
                    }
                    row.push(span(text, Style::default().fg(t.fg0)));
                }
            }
            let lines = rows.into_iter().map(|row| self.centered(row)).collect();
            s.push(self.rise(lines, 300));
        } else {
            for (i, city) in page::GLOBAL_CITIES.iter().enumerate() {
                let lines = city_card(city, card_width)
                    .into_iter()
                    .map(|text| self.centered(vec![span(text, Style::default().fg(t.fg0))]))
                    .collect();
                s.push(self.rise(lines, 300 + 150 * i as u64));
            }
        }

        s.spacer(1);
        let rule = "━".repeat(self.ctx.column().min(48) as usize);
        s.push(Block::new(
            vec![self.centered(vec![span(rule, Style::default().fg(t.red))])],
            Offset::Left(SLIDE),
            Transition::delayed(
                std::time::Duration::from_millis(1000),
                std::time::Duration::from_millis(800),
            ),
        ));
        s.spacer(3);
        s.finish(0)
    }

    fn programs(&self) -> SectionView {
        let t = self.theme;
        let mut s = SectionBuilder::new(SectionKind::Programs);
        s.spacer(3);
        let title = self.rich_lines(&page::PROGRAMS_TITLE, Style::default().fg(t.fg0).add_modifier(Modifier::BOLD));
        s.push(self.rise(title, 0));
        s.spacer(2);

        for (i, program) in page::PROGRAMS.iter().enumerate() {
            let offset = match program.image_side {
                ImageSide::Left => Offset::Left(SLIDE),
                ImageSide::Right => Offset::Right(SLIDE),
            };
            let lines = self.program_row(program);
            s.push(Block::new(lines, offset, self.ctx.fade_in(300 + 200 * i as u64)));
            s.spacer(2);
        }

        s.spacer(1);
        s.finish(0)
    }

    fn program_row(&self, program: &Program) -> Vec<Line<'static>> {
        let t = self.theme;
        let column = self.ctx.column();
        let two_column = column >= TWO_COLUMN_MIN;
        let image_width = if two_column { (column * 2 / 5) as usize } else { 0 };
        let gap = if two_column { 3 } else { 0 };
        let text_width = column as usize - image_width - gap;

        let mut text: Vec<Vec<Span<'static>>> = Vec::new();
        text.push(vec![span(
            program.title,
            Style::default().fg(t.fg0).add_modifier(Modifier::BOLD),
        )]);
        text.push(Vec::new());
        for line in wrap(program.desc, text_width) {
            text.push(vec![span(line, Style::default().fg(t.fg1))]);
        }
        text.push(Vec::new());
        for line in wrap(program.quote, text_width.saturating_sub(2)) {
            text.push(vec![
                span("▍ ", Style::default().fg(t.red)),
                span(line, Style::default().fg(t.grey2).add_modifier(Modifier::ITALIC)),
            ]);
        }

        let margin = self.ctx.margin() as usize;
        if !two_column {
            return text
                .into_iter()
                .map(|spans| {
                    let mut line = vec![pad(margin)];
                    line.extend(spans);
                    Line::from(line)
                })
                .collect();
        }

        let rows = text.len().max(6);
        let image = Style::default().fg(t.grey0).bg(t.bg2);
        (0..rows)
            .map(|row| {
                let spans = text.get(row).cloned().unwrap_or_default();
                let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
                let mut text_spans = spans;
                text_spans.push(Span::raw(" ".repeat(text_width.saturating_sub(used))));

                let block = span("░".repeat(image_width), image);
                let mut line = vec![pad(margin)];
                match program.image_side {
                    ImageSide::Left => {
                        line.push(block);
                        line.push(Span::raw(" ".repeat(gap)));
                        line.extend(text_spans);
                    }
                    ImageSide::Right => {
                        line.extend(text_spans);
                        line.push(Span::raw(" ".repeat(gap)));
                        line.push(block);
                    }
                }
                Line::from(line)
            })
            .collect()
    }

    fn interview(&self) -> SectionView {
        let t = self.theme;
        let mut s = SectionBuilder::new(SectionKind::Interview);
        s.spacer(3);
        let title = self.rich_lines(&page::INTERVIEW_TITLE, Style::default().fg(t.fg0).add_modifier(Modifier::BOLD));
        s.push(self.rise(title, 0));
        s.spacer(2);

        for (i, testimonial) in page::TESTIMONIALS.iter().enumerate() {
            let card = self.testimonial_card(testimonial);
            s.push(self.rise(card, 300 + 150 * i as u64));
            s.spacer(1);
        }

        s.spacer(2);
        s.finish(0)
    }

    fn testimonial_card(&self, testimonial: &Testimonial) -> Vec<Line<'static>> {
        let t = self.theme;
        let width = self.ctx.column().min(CARD_MAX) as usize;
        let inner = width.saturating_sub(4).max(1);
        let border = Style::default().fg(t.red_dim);

        let mut body: Vec<(String, Style)> = wrap(testimonial.text, inner)
            .into_iter()
            .map(|line| (line, Style::default().fg(t.fg1)))
            .collect();
        body.push((String::new(), Style::default()));
        body.push((
            testimonial.name.to_string(),
            Style::default().fg(t.fg0).add_modifier(Modifier::BOLD),
        ));
        body.push((testimonial.role.to_string(), Style::default().fg(t.grey2)));

        let horizontal = "─".repeat(width.saturating_sub(2));
        let mut lines = vec![self.centered(vec![span(format!("┌{}┐", horizontal), border)])];
        for (text, style) in body {
            lines.push(self.centered(vec![
                span("│ ", border),
                span(pad_right(&text, inner), style),
                span(" │", border),
            ]));
        }
        lines.push(self.centered(vec![span(format!("└{}┘", horizontal), border)]));
        lines
    }

    fn cta(&self) -> SectionView {
        let t = self.theme;
        let mut s = SectionBuilder::new(SectionKind::Cta);
        s.spacer(4);
        let mut lines = self.rich_lines(&page::CTA_TITLE, Style::default().fg(t.fg0).add_modifier(Modifier::BOLD));
        lines.push(Line::default());
        lines.extend(self.paragraph(page::CTA_BODY, Style::default().fg(t.fg1)));
        lines.push(Line::default());
        lines.push(self.button(page::CTA_BUTTON));
        s.push(Block::new(lines, Offset::None, self.ctx.fade_in(0)));
        s.spacer(4);
        s.finish(0)
    }

    fn footer(&self) -> SectionView {
        let t = self.theme;
        let mut s = SectionBuilder::new(SectionKind::Footer);
        let muted = Style::default().fg(t.grey2);

        let mut lines = vec![
            self.centered(vec![span("─".repeat(self.ctx.column() as usize), Style::default().fg(t.grey0))]),
            Line::default(),
            self.centered(vec![
                span(page::BRAND.0, Style::default().fg(t.red).add_modifier(Modifier::BOLD)),
                span(page::BRAND.1, Style::default().fg(t.fg0).add_modifier(Modifier::BOLD)),
            ]),
            Line::default(),
            self.centered(vec![span(page::CONTACT_EMAIL, muted)]),
        ];
        for line in page::ADDRESS {
            lines.push(self.centered(vec![span(line, muted)]));
        }
        lines.push(Line::default());
        lines.push(self.centered(vec![span(page::COPYRIGHT, Style::default().fg(t.grey1))]));
        s.push(Block::new(lines, Offset::None, self.ctx.fade_in(0)));
        s.spacer(1);
        s.finish(0)
    }

    /// Title plus body copy that enter together
    fn heading(&self, title: &[RichLine], body: &[&str]) -> Block {
        let t = self.theme;
        let mut lines = self.rich_lines(title, Style::default().fg(t.fg0).add_modifier(Modifier::BOLD));
        lines.push(Line::default());
        for line in body {
            lines.extend(self.paragraph(line, Style::default().fg(t.fg1)));
        }
        self.rise(lines, 0)
    }

    fn rise(&self, lines: Vec<Line<'static>>, delay_ms: u64) -> Block {
        Block::new(lines, Offset::Below(RISE), self.ctx.fade_in(delay_ms))
    }

    fn button(&self, label: &str) -> Line<'static> {
        let t = self.theme;
        self.centered(vec![span(
            format!("  {}  ", label),
            Style::default()
                .fg(t.fg0)
                .bg(t.red)
                .add_modifier(Modifier::BOLD),
        )])
    }

    fn rich_lines(&self, lines: &[RichLine], base: Style) -> Vec<Line<'static>> {
        lines
            .iter()
            .map(|segments| {
                let spans = segments
                    .iter()
                    .map(|segment| {
                        let style = if segment.accent {
                            base.fg(self.theme.red_light)
                        } else {
                            base
                        };
                        span(segment.text, style)
                    })
                    .collect();
                self.centered(spans)
            })
            .collect()
    }

    /// Centered, wrapped copy
    fn paragraph(&self, text: &str, style: Style) -> Vec<Line<'static>> {
        wrap(text, self.ctx.column() as usize)
            .into_iter()
            .map(|line| self.centered(vec![span(line, style)]))
            .collect()
    }

    fn centered(&self, spans: Vec<Span<'static>>) -> Line<'static> {
        let width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let column = self.ctx.column() as usize;
        let left = self.ctx.margin() as usize + column.saturating_sub(width) / 2;
        let mut line = Vec::with_capacity(spans.len() + 1);
        line.push(pad(left));
        line.extend(spans);
        Line::from(line)
    }
}

/// Three rows of a boxed city name
fn city_card(city: &str, width: usize) -> [String; 3] {
    let inner = width.saturating_sub(2);
    let name_width = display_width(city);
    let left = inner.saturating_sub(name_width) / 2;
    let right = inner.saturating_sub(name_width + left);
    [
        format!("┌{}┐", "─".repeat(inner)),
        format!("│{}{}{}│", " ".repeat(left), city, " ".repeat(right)),
        format!("└{}┘", "─".repeat(inner)),
    ]
}
