//! Landing page layout.
//!
//! The page is a column of sections. Each section is a stack of [`Block`]s,
//! and every block carries its own entrance offset and transition so the
//! staggered reveals of the cards can be drawn from the section's latch time
//! alone. Layout happens in page rows; the app scrolls over the result.

mod sections;
pub mod text;

use std::time::Duration;

use cocoon_core::page::SectionKind;
use cocoon_core::style::{Offset, RevealStyle, Transition};
use cocoon_core::RegionBounds;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::theme::Theme;

pub use sections::build_page;

/// Column budget for page content
pub const MAX_COLUMN: u16 = 100;

/// Entrance state of a section as of the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    /// Latch not set; drawn at the start style
    Hidden,
    /// Latched this long ago
    Since(Duration),
    /// Always shown in the final state
    Shown,
}

impl Reveal {
    fn style(self, offset: Offset, transition: Transition) -> RevealStyle {
        match self {
            Reveal::Hidden => RevealStyle::target(false, offset),
            Reveal::Since(since) => RevealStyle::at(offset, transition, Some(since)),
            Reveal::Shown => RevealStyle::SHOWN,
        }
    }
}

/// Terminal geometry the page is laid out for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutContext {
    pub width: u16,
    /// Rows available to the page below the header
    pub viewport_height: u16,
    /// Section entrance duration
    pub transition: Duration,
}

impl LayoutContext {
    pub fn new(width: u16, viewport_height: u16, transition: Duration) -> Self {
        Self {
            width,
            viewport_height,
            transition,
        }
    }

    /// Content column width
    pub fn column(&self) -> u16 {
        self.width.saturating_sub(4).min(MAX_COLUMN).max(1)
    }

    /// Left margin of the content column
    pub fn margin(&self) -> u16 {
        (self.width.saturating_sub(self.column())) / 2
    }

    pub(crate) fn fade_in(&self, delay_ms: u64) -> Transition {
        Transition::delayed(self.transition, Duration::from_millis(delay_ms))
    }
}

/// A group of lines that enters together
#[derive(Debug, Clone)]
pub struct Block {
    lines: Vec<Line<'static>>,
    offset: Offset,
    transition: Transition,
}

impl Block {
    pub fn new(lines: Vec<Line<'static>>, offset: Offset, transition: Transition) -> Self {
        Self {
            lines,
            offset,
            transition,
        }
    }

    /// Blank rows that never animate
    pub fn spacer(rows: u16) -> Self {
        Self::new(
            vec![Line::default(); rows as usize],
            Offset::None,
            Transition::new(Duration::ZERO),
        )
    }

    /// Rows occupied including the travel reserved for the entrance
    pub fn height(&self) -> u16 {
        self.lines.len() as u16 + self.offset.reserved_rows()
    }

    /// Row of the first content line when the block is at rest
    fn resting_top(&self) -> u16 {
        match self.offset {
            Offset::Above(n) => n,
            _ => 0,
        }
    }

    fn is_settled(&self, reveal: Reveal) -> bool {
        match reveal {
            Reveal::Since(since) => self.transition.is_finished(since),
            Reveal::Hidden | Reveal::Shown => true,
        }
    }

    fn render(&self, reveal: Reveal, theme: &Theme, out: &mut Vec<Line<'static>>) {
        let style = reveal.style(self.offset, self.transition);
        let reserved = self.offset.reserved_rows() as i32;
        let top = (self.resting_top() as i32 + style.dy).clamp(0, reserved) as usize;
        let bottom = reserved as usize - top;

        out.extend(std::iter::repeat(Line::default()).take(top));
        if style.is_hidden() {
            out.extend(std::iter::repeat(Line::default()).take(self.lines.len()));
        } else {
            for line in &self.lines {
                out.push(styled_line(line, style, theme));
            }
        }
        out.extend(std::iter::repeat(Line::default()).take(bottom));
    }
}

fn styled_line(line: &Line<'static>, style: RevealStyle, theme: &Theme) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = line.spans.clone();

    if style.dx > 0 {
        spans.insert(0, Span::raw(" ".repeat(style.dx as usize)));
    } else if style.dx < 0 {
        shift_left(&mut spans, (-style.dx) as usize);
    }

    if style.opacity < 1.0 {
        for span in spans.iter_mut() {
            let fg = span.style.fg.unwrap_or(theme.fg0);
            let mut faded = span.style.fg(theme.fade(fg, style.opacity));
            if let Some(bg) = span.style.bg {
                faded = faded.bg(theme.fade(bg, style.opacity));
            }
            span.style = faded;
        }
    }

    Line::from(spans).style(line.style)
}

/// Eat up to `cols` leading blank columns
fn shift_left(spans: &mut [Span<'static>], cols: usize) {
    if let Some(first) = spans.first_mut() {
        let blank = first.content.chars().take_while(|c| *c == ' ').count();
        let eat = blank.min(cols);
        if eat > 0 {
            first.content = first.content[eat..].to_string().into();
        }
    }
}

/// One laid-out section
#[derive(Debug, Clone)]
pub struct SectionView {
    pub kind: SectionKind,
    blocks: Vec<Block>,
    /// Rows of each counter value, relative to the section top
    counter_rows: Vec<u16>,
    top_pad: u16,
    bottom_pad: u16,
}

impl SectionView {
    pub fn height(&self) -> u16 {
        self.top_pad + self.blocks.iter().map(Block::height).sum::<u16>() + self.bottom_pad
    }

    pub fn counter_rows(&self) -> &[u16] {
        &self.counter_rows
    }

    /// Whether every block has finished its entrance
    pub fn is_settled(&self, reveal: Reveal) -> bool {
        self.blocks.iter().all(|block| block.is_settled(reveal))
    }

    pub fn render(&self, reveal: Reveal, theme: &Theme, out: &mut Vec<Line<'static>>) {
        out.extend(std::iter::repeat(Line::default()).take(self.top_pad as usize));
        for block in &self.blocks {
            block.render(reveal, theme, out);
        }
        out.extend(std::iter::repeat(Line::default()).take(self.bottom_pad as usize));
    }
}

/// Accumulates blocks for one section and tracks row positions
#[derive(Debug)]
pub(crate) struct SectionBuilder {
    kind: SectionKind,
    blocks: Vec<Block>,
    counter_rows: Vec<u16>,
    rows: u16,
}

impl SectionBuilder {
    pub(crate) fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            blocks: Vec::new(),
            counter_rows: Vec::new(),
            rows: 0,
        }
    }

    /// Append a block, returning the row its content rests at
    pub(crate) fn push(&mut self, block: Block) -> u16 {
        let top = self.rows + block.resting_top();
        self.rows += block.height();
        self.blocks.push(block);
        top
    }

    pub(crate) fn spacer(&mut self, rows: u16) {
        if rows > 0 {
            self.push(Block::spacer(rows));
        }
    }

    pub(crate) fn mark_counter(&mut self, row: u16) {
        self.counter_rows.push(row);
    }

    /// Finish, centering the content vertically within `min_height` rows
    pub(crate) fn finish(self, min_height: u16) -> SectionView {
        let extra = min_height.saturating_sub(self.rows);
        let top_pad = extra / 2;
        let counter_rows = self.counter_rows.iter().map(|row| row + top_pad).collect();
        SectionView {
            kind: self.kind,
            blocks: self.blocks,
            counter_rows,
            top_pad,
            bottom_pad: extra - top_pad,
        }
    }
}

/// The whole page laid out for one terminal size
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub context: LayoutContext,
    sections: Vec<SectionView>,
    tops: Vec<u16>,
    height: u16,
}

impl PageLayout {
    pub fn new(context: LayoutContext, sections: Vec<SectionView>) -> Self {
        let mut tops = Vec::with_capacity(sections.len());
        let mut row = 0u16;
        for section in &sections {
            tops.push(row);
            row = row.saturating_add(section.height());
        }
        Self {
            context,
            sections,
            tops,
            height: row,
        }
    }

    pub fn sections(&self) -> &[SectionView] {
        &self.sections
    }

    /// Total page rows
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Largest scroll offset that still fills the viewport
    pub fn max_scroll(&self) -> u16 {
        self.height.saturating_sub(self.context.viewport_height)
    }

    pub fn section_top(&self, kind: SectionKind) -> Option<u16> {
        self.sections
            .iter()
            .position(|s| s.kind == kind)
            .map(|i| self.tops[i])
    }

    /// Page-space bounds of section `index`
    pub fn section_bounds(&self, index: usize) -> Option<RegionBounds> {
        let section = self.sections.get(index)?;
        Some(RegionBounds::new(
            self.tops[index] as u32,
            section.height() as u32,
        ))
    }

    /// Page-space bounds of each counter value row, in page order
    pub fn counter_bounds(&self) -> Vec<RegionBounds> {
        self.sections
            .iter()
            .zip(&self.tops)
            .flat_map(|(section, top)| {
                section
                    .counter_rows()
                    .iter()
                    .map(move |row| RegionBounds::new((top + row) as u32, 1))
            })
            .collect()
    }

    /// Section tops, top to bottom
    pub fn tops(&self) -> &[u16] {
        &self.tops
    }

    /// Every page line, styled for the given per-section reveal state
    pub fn render(&self, reveals: &[Reveal], theme: &Theme) -> Vec<Line<'static>> {
        let mut out = Vec::with_capacity(self.height as usize);
        for (i, section) in self.sections.iter().enumerate() {
            let reveal = reveals.get(i).copied().unwrap_or(Reveal::Shown);
            section.render(reveal, theme, &mut out);
        }
        out
    }
}

/// Leading blank span that positions content within the page width
pub(crate) fn pad(cols: usize) -> Span<'static> {
    Span::raw(" ".repeat(cols))
}

/// Shorthand for a styled owned span
pub(crate) fn span(text: impl Into<String>, style: Style) -> Span<'static> {
    Span::styled(text.into(), style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn block(offset: Offset) -> Block {
        Block::new(
            vec![Line::from(vec![pad(6), Span::styled("hi", Style::default().fg(Color::Rgb(0xff, 0xff, 0xff)))])],
            offset,
            Transition::new(ms(800)),
        )
    }

    #[test]
    fn test_hidden_block_keeps_its_rows() {
        let theme = Theme::default();
        let mut out = Vec::new();
        block(Offset::Below(2)).render(Reveal::Hidden, &theme, &mut out);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|l| text_of(l).trim().is_empty()));
    }

    #[test]
    fn test_below_offset_rises_into_place() {
        let theme = Theme::default();
        let b = block(Offset::Below(2));

        let mut start = Vec::new();
        b.render(Reveal::Since(Duration::ZERO), &theme, &mut start);
        assert!(text_of(&start[0]).trim().is_empty());

        let mut done = Vec::new();
        b.render(Reveal::Shown, &theme, &mut done);
        assert_eq!(text_of(&done[0]).trim(), "hi");
        assert_eq!(done.len(), 3);
    }

    #[test]
    fn test_horizontal_offsets() {
        let theme = Theme::default();
        let mut out = Vec::new();
        // nothing is drawn at the instant of the latch
        block(Offset::Right(4)).render(Reveal::Since(Duration::ZERO), &theme, &mut out);
        assert!(text_of(&out[0]).trim().is_empty());

        let style = RevealStyle { opacity: 0.5, dx: -4, dy: 0 };
        let line = styled_line(&block(Offset::Left(4)).lines[0], style, &theme);
        assert_eq!(text_of(&line), "  hi");

        let style = RevealStyle { opacity: 0.5, dx: 3, dy: 0 };
        let line = styled_line(&block(Offset::Right(3)).lines[0], style, &theme);
        assert_eq!(text_of(&line), "         hi");
    }

    #[test]
    fn test_fade_applies_to_spans() {
        let theme = Theme::default();
        let style = RevealStyle { opacity: 0.0, dx: 0, dy: 0 };
        let line = styled_line(&block(Offset::None).lines[0], style, &theme);
        assert_eq!(line.spans[1].style.fg, Some(theme.bg0));
    }

    #[test]
    fn test_builder_centers_and_tracks_counters() {
        let mut builder = SectionBuilder::new(SectionKind::Achievements);
        builder.spacer(2);
        let row = builder.push(block(Offset::Below(2)));
        builder.mark_counter(row);
        let view = builder.finish(9);

        assert_eq!(view.height(), 9);
        // 5 content rows in 9: two rows of padding on top
        assert_eq!(view.counter_rows(), &[4]);
    }

    #[test]
    fn test_page_geometry() {
        let ctx = LayoutContext::new(80, 20, ms(800));
        let mut first = SectionBuilder::new(SectionKind::Hero);
        first.push(block(Offset::None));
        let mut second = SectionBuilder::new(SectionKind::Achievements);
        let row = second.push(block(Offset::Below(2)));
        second.mark_counter(row);

        let page = PageLayout::new(ctx, vec![first.finish(20), second.finish(0)]);
        assert_eq!(page.height(), 23);
        assert_eq!(page.max_scroll(), 3);
        assert_eq!(page.section_top(SectionKind::Achievements), Some(20));
        assert_eq!(page.section_bounds(1), Some(RegionBounds::new(20, 3)));
        assert_eq!(page.counter_bounds(), vec![RegionBounds::new(20, 1)]);
        assert_eq!(page.render(&[Reveal::Shown, Reveal::Hidden], &Theme::default()).len(), 23);
    }

    #[test]
    fn test_context_column() {
        let ctx = LayoutContext::new(200, 40, ms(800));
        assert_eq!(ctx.column(), MAX_COLUMN);
        assert_eq!(ctx.margin(), 50);
        let narrow = LayoutContext::new(40, 20, ms(800));
        assert_eq!(narrow.column(), 36);
        assert_eq!(narrow.margin(), 2);
    }
}
