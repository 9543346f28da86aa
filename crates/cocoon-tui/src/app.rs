use std::sync::Arc;
use std::time::{Duration, Instant};

use cocoon_core::page::{self, SectionKind};
use cocoon_core::style::HeaderStyle;
use cocoon_core::{
    AppConfig, CounterPhase, EasedCounter, FrameScheduler, Threshold, Viewport,
    ViewportObserver, VisibilityHandle,
};
use ratatui::layout::Size;
use ratatui::text::Line;
use tracing::{debug, info, warn};

use crate::page::{build_page, LayoutContext, PageLayout, Reveal};
use crate::scroll::{ScrollAnimator, Step};
use crate::theme::Theme;

/// Rows taken by the status bar at the bottom of the screen
pub const STATUS_ROWS: u16 = 1;

/// A section and its visibility latch
struct MountedSection {
    kind: SectionKind,
    handle: Option<VisibilityHandle>,
    /// Frame time at which the latch was first seen set
    revealed_at: Option<Instant>,
}

/// An achievement counter and the tracker on its own row
struct MountedCounter {
    counter: EasedCounter,
    handle: Option<VisibilityHandle>,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    observer: ViewportObserver,
    frames: FrameScheduler,
    /// Page scroll position and animation
    pub scroll: ScrollAnimator,
    sections: Vec<MountedSection>,
    counters: Vec<MountedCounter>,
    counter_threshold: Threshold,
    /// Layout for the last prepared frame
    layout: Option<PageLayout>,
    /// Time of the last prepared frame
    frame_time: Instant,
    unmounted: bool,
    /// Navigation menu popup
    pub menu_open: bool,
    pub menu_selected: usize,
    /// Status message
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let observer = if config.ui.intersection_observer {
            ViewportObserver::new()
        } else {
            ViewportObserver::unsupported()
        };

        let counter_threshold = Threshold::new(config.counter.threshold).unwrap_or_else(|err| {
            warn!("{}, using {}", err, Threshold::COUNTER);
            Threshold::COUNTER
        });
        let duration = Duration::from_millis(config.counter.duration_ms);
        let counters = page::ACHIEVEMENTS
            .iter()
            .map(|achievement| MountedCounter {
                counter: EasedCounter::new(achievement.value, achievement.suffix, duration),
                handle: None,
            })
            .collect();
        let sections = SectionKind::ALL
            .into_iter()
            .map(|kind| MountedSection {
                kind,
                handle: None,
                revealed_at: None,
            })
            .collect();

        Self {
            scroll: ScrollAnimator::new(config.ui.scroll.clone()),
            config,
            theme: Theme::default(),
            observer,
            frames: FrameScheduler::new(),
            sections,
            counters,
            counter_threshold,
            layout: None,
            frame_time: Instant::now(),
            unmounted: false,
            menu_open: false,
            menu_selected: 0,
            status_message: None,
            pending_key: None,
            should_quit: false,
        }
    }

    /// Advance everything to `now` for a screen of `size`.
    ///
    /// Lays out the page (attaching trackers on the first pass), moves the
    /// scroll animation, reports the viewport to the observer, starts
    /// counters whose rows became visible and runs due frame callbacks.
    pub fn prepare_frame(&mut self, now: Instant, size: Size) {
        self.frame_time = now;
        let ctx = LayoutContext::new(
            size.width,
            size.height.saturating_sub(STATUS_ROWS),
            Duration::from_millis(self.config.reveal.transition_ms),
        );

        let layout = self.layout_for(ctx);
        self.place(&layout);

        let scroll = self.scroll.update_at(now, layout.max_scroll());
        let viewport = Viewport::new(scroll as u32, ctx.viewport_height as u32);
        let latched = self.observer.notify(viewport);
        if latched > 0 {
            debug!(latched, scroll, "regions latched");
        }

        for section in self.sections.iter_mut() {
            let visible = section.handle.as_ref().is_some_and(VisibilityHandle::is_visible);
            if visible && section.revealed_at.is_none() {
                info!(section = ?section.kind, "section revealed");
                section.revealed_at = Some(now);
            }
        }

        for mounted in self.counters.iter_mut() {
            let visible = mounted.handle.as_ref().is_some_and(VisibilityHandle::is_visible);
            if visible {
                mounted.counter.start(&self.frames);
            }
        }

        let frame = self.frames.begin_frame(now);
        for mounted in self.counters.iter_mut() {
            mounted.counter.on_frame(&frame, &self.frames);
        }

        // Counter text may have changed
        self.layout = Some(self.layout_for(ctx));
    }

    fn layout_for(&self, ctx: LayoutContext) -> PageLayout {
        let separator = &self.config.counter.thousands_separator;
        let texts: Vec<String> = self
            .counters
            .iter()
            .map(|mounted| mounted.counter.formatted(separator))
            .collect();
        build_page(ctx, &texts, &self.theme)
    }

    /// Attach trackers on the first layout pass, refresh bounds afterwards
    fn place(&mut self, layout: &PageLayout) {
        if self.unmounted {
            return;
        }
        let mut attached = 0;

        for (i, section) in self.sections.iter_mut().enumerate() {
            let Some(threshold) = section.kind.threshold() else {
                continue;
            };
            let bounds = layout.section_bounds(i);
            if let Some(handle) = &section.handle {
                if let Some(bounds) = bounds {
                    handle.set_bounds(bounds);
                }
                continue;
            }
            section.handle = Some(self.observer.attach(bounds, threshold));
            attached += 1;
        }

        let counter_bounds = layout.counter_bounds();
        for (i, mounted) in self.counters.iter_mut().enumerate() {
            let bounds = counter_bounds.get(i).copied();
            if let Some(handle) = &mounted.handle {
                if let Some(bounds) = bounds {
                    handle.set_bounds(bounds);
                }
                continue;
            }
            mounted.handle = Some(self.observer.attach(bounds, self.counter_threshold));
            attached += 1;
        }

        if attached > 0 {
            info!(
                attached,
                supported = self.observer.is_supported(),
                height = layout.height(),
                "page mounted"
            );
        }
    }

    /// Release every observation and cancel running counters
    pub fn unmount(&mut self) {
        if self.unmounted {
            return;
        }
        self.unmounted = true;
        for mounted in self.counters.iter_mut() {
            mounted.counter.cancel();
            mounted.handle = None;
        }
        for section in self.sections.iter_mut() {
            section.handle = None;
        }
        debug!("page unmounted");
    }

    /// Per-section entrance state as of the last prepared frame
    pub fn reveals(&self) -> Vec<Reveal> {
        self.sections
            .iter()
            .map(|section| {
                if section.kind.threshold().is_none() || !self.observer.is_supported() {
                    return Reveal::Shown;
                }
                match section.revealed_at {
                    Some(at) => Reveal::Since(self.frame_time.saturating_duration_since(at)),
                    None => Reveal::Hidden,
                }
            })
            .collect()
    }

    /// Page lines for the last prepared frame
    pub fn page_lines(&self) -> Vec<Line<'static>> {
        match &self.layout {
            Some(layout) => layout.render(&self.reveals(), &self.theme),
            None => Vec::new(),
        }
    }

    pub fn layout(&self) -> Option<&PageLayout> {
        self.layout.as_ref()
    }

    pub fn header_style(&self) -> HeaderStyle {
        HeaderStyle::for_scroll(
            self.scroll.current_scroll() as u32,
            self.config.ui.header_solid_after as u32,
        )
    }

    /// Whether the next frame should come at the animation rate
    pub fn needs_fast_update(&self) -> bool {
        if self.scroll.needs_update() || self.frames.pending() > 0 {
            return true;
        }
        let Some(layout) = &self.layout else {
            return false;
        };
        layout
            .sections()
            .iter()
            .zip(self.reveals())
            .any(|(section, reveal)| !section.is_settled(reveal))
    }

    /// Displayed counter values, in page order
    pub fn counter_values(&self) -> Vec<u64> {
        self.counters.iter().map(|m| m.counter.value()).collect()
    }

    pub fn counter_phases(&self) -> Vec<CounterPhase> {
        self.counters.iter().map(|m| m.counter.phase()).collect()
    }

    pub fn is_revealed(&self, kind: SectionKind) -> bool {
        self.sections
            .iter()
            .any(|s| s.kind == kind && s.revealed_at.is_some())
    }

    /// Live observations still waiting for their region
    pub fn observation_count(&self) -> usize {
        self.observer.observation_count()
    }

    /// Section whose top is at or above the top of the screen
    pub fn current_section(&self) -> Option<SectionKind> {
        let layout = self.layout.as_ref()?;
        let scroll = self.scroll.current_scroll();
        layout
            .sections()
            .iter()
            .zip(layout.tops())
            .take_while(|(_, top)| **top <= scroll)
            .last()
            .map(|(section, _)| section.kind)
    }

    pub fn viewport_height(&self) -> u16 {
        self.layout
            .as_ref()
            .map(|l| l.context.viewport_height)
            .unwrap_or(0)
    }

    pub fn max_scroll(&self) -> u16 {
        self.layout.as_ref().map(PageLayout::max_scroll).unwrap_or(0)
    }

    /// Line, half-page or page scroll
    pub fn step(&mut self, step: Step, down: bool) {
        let (height, max) = (self.viewport_height(), self.max_scroll());
        self.scroll.step(step, down, height, max);
    }

    /// Mouse wheel
    pub fn scroll_by(&mut self, rows: i32) {
        let max = self.max_scroll();
        self.scroll.scroll_by(rows, max);
    }

    pub fn jump_to_top(&mut self) {
        let max = self.max_scroll();
        self.scroll.scroll_to(0, max);
    }

    pub fn jump_to_bottom(&mut self) {
        let max = self.max_scroll();
        self.scroll.scroll_to(max, max);
    }

    /// Scroll to the first section below the current target
    pub fn next_section(&mut self) {
        let Some(layout) = &self.layout else {
            return;
        };
        let target = self.scroll.target_scroll();
        let max = layout.max_scroll();
        if let Some(top) = layout.tops().iter().copied().find(|top| *top > target) {
            self.scroll.scroll_to(top, max);
        }
    }

    /// Scroll to the last section above the current target
    pub fn prev_section(&mut self) {
        let Some(layout) = &self.layout else {
            return;
        };
        let target = self.scroll.target_scroll();
        let max = layout.max_scroll();
        if let Some(top) = layout.tops().iter().copied().rev().find(|top| *top < target) {
            self.scroll.scroll_to(top, max);
        }
    }

    /// Follow nav link `index` (`#about`, `#interview`, `#program`)
    pub fn navigate(&mut self, index: usize) {
        let Some(item) = page::NAV_ITEMS.get(index) else {
            return;
        };
        self.menu_open = false;
        let Some(kind) = SectionKind::from_anchor(item.anchor) else {
            warn!(anchor = item.anchor, "nav link without a target section");
            return;
        };
        let Some(layout) = &self.layout else {
            return;
        };
        if let Some(top) = layout.section_top(kind) {
            let max = layout.max_scroll();
            debug!(anchor = item.anchor, top, "navigate");
            self.scroll.scroll_to(top, max);
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        if self.menu_open {
            self.menu_selected = 0;
        }
    }

    pub fn menu_down(&mut self) {
        self.menu_selected = (self.menu_selected + 1) % page::NAV_ITEMS.len();
    }

    pub fn menu_up(&mut self) {
        let len = page::NAV_ITEMS.len();
        self.menu_selected = (self.menu_selected + len - 1) % len;
    }

    pub fn menu_select(&mut self) {
        self.navigate(self.menu_selected);
    }

    /// The call-to-action buttons point at the contact address
    pub fn apply(&mut self) {
        self.set_status(format!("{}: {}", page::APPLY_LABEL, page::CONTACT_EMAIL));
    }

    /// Close the menu and clear transient state
    pub fn exit_mode(&mut self) {
        self.menu_open = false;
        self.clear_status();
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Clear the pending key
    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cocoon_core::ScrollConfig;

    const SIZE: Size = Size {
        width: 100,
        height: 25,
    };

    fn config(intersection_observer: bool) -> Arc<AppConfig> {
        let mut config = AppConfig::default();
        config.ui.intersection_observer = intersection_observer;
        config.ui.scroll = ScrollConfig {
            smooth_enabled: false,
            ..ScrollConfig::default()
        };
        Arc::new(config)
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_first_frame_mounts_and_reveals_hero() {
        let mut app = App::new(config(true));
        let t0 = Instant::now();
        app.prepare_frame(t0, SIZE);

        assert!(app.is_revealed(SectionKind::Hero));
        assert!(!app.is_revealed(SectionKind::Achievements));
        // four sections below the fold plus three counters
        assert_eq!(app.observation_count(), 7);
        assert_eq!(app.counter_values(), vec![0, 0, 0]);
        assert_eq!(app.reveals()[0], Reveal::Since(Duration::ZERO));
        assert_eq!(app.reveals()[1], Reveal::Hidden);
        assert_eq!(app.reveals()[5], Reveal::Shown);
    }

    #[test]
    fn test_scrolling_reveals_section_and_runs_counters() {
        let mut app = App::new(config(true));
        let t0 = Instant::now();
        app.prepare_frame(t0, SIZE);

        let top = app
            .layout()
            .and_then(|l| l.section_top(SectionKind::Achievements))
            .unwrap();
        app.scroll.set_scroll(top);
        app.prepare_frame(t0 + secs(1), SIZE);

        assert!(app.is_revealed(SectionKind::Achievements));
        assert!(app.counter_phases().iter().all(|p| *p == CounterPhase::Running));
        assert!(app.needs_fast_update());

        app.prepare_frame(t0 + secs(2), SIZE);
        let mid = app.counter_values();
        assert!(mid.iter().zip([5000, 40000, 35000]).all(|(v, t)| *v > 0 && *v < t));

        app.prepare_frame(t0 + secs(4), SIZE);
        assert_eq!(app.counter_values(), vec![5000, 40000, 35000]);
        assert!(app.counter_phases().iter().all(|p| *p == CounterPhase::Done));

        let lines: Vec<String> = app
            .page_lines()
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(lines.iter().any(|l| l.trim() == "40,000만원 +"));
    }

    #[test]
    fn test_latch_survives_scrolling_away() {
        let mut app = App::new(config(true));
        let t0 = Instant::now();
        app.prepare_frame(t0, SIZE);
        app.next_section();
        app.prepare_frame(t0 + secs(1), SIZE);
        assert!(app.is_revealed(SectionKind::Achievements));

        app.jump_to_top();
        app.prepare_frame(t0 + secs(2), SIZE);
        assert_eq!(app.scroll.current_scroll(), 0);
        assert!(app.is_revealed(SectionKind::Achievements));
        assert_eq!(app.reveals()[1], Reveal::Since(secs(1)));
    }

    #[test]
    fn test_unmount_cancels_counters() {
        let mut app = App::new(config(true));
        let t0 = Instant::now();
        app.prepare_frame(t0, SIZE);
        app.next_section();
        app.prepare_frame(t0 + secs(1), SIZE);
        let before = app.counter_values();

        app.unmount();
        assert_eq!(app.observation_count(), 0);
        assert!(app.counter_phases().iter().all(|p| *p == CounterPhase::Cancelled));

        app.prepare_frame(t0 + secs(5), SIZE);
        assert_eq!(app.counter_values(), before);
    }

    #[test]
    fn test_unsupported_observer_fails_open() {
        let mut app = App::new(config(false));
        let t0 = Instant::now();
        app.prepare_frame(t0, SIZE);

        assert_eq!(app.observation_count(), 0);
        assert!(app.reveals().iter().all(|r| *r == Reveal::Shown));
        assert!(app.counter_phases().iter().all(|p| *p == CounterPhase::Running));

        app.prepare_frame(t0 + secs(3), SIZE);
        assert_eq!(app.counter_values(), vec![5000, 40000, 35000]);
    }

    #[test]
    fn test_tall_sections_on_short_terminal() {
        // A section latches only if threshold * its height fits on screen
        let size = Size {
            width: 40,
            height: 10,
        };
        let mut app = App::new(config(true));
        let t0 = Instant::now();
        app.prepare_frame(t0, size);
        let max = app.max_scroll();
        for row in 0..=max {
            app.scroll.set_scroll(row);
            app.prepare_frame(t0 + Duration::from_millis(row as u64), size);
        }

        let layout = app.layout().cloned().unwrap();
        let viewport = app.viewport_height() as f64;
        let mut unreachable = 0;
        for (index, section) in layout.sections().iter().enumerate() {
            let Some(threshold) = section.kind.threshold() else {
                continue;
            };
            let bounds = layout.section_bounds(index).unwrap();
            let reachable = (viewport / bounds.height as f64).min(1.0) >= threshold.value();
            if !reachable {
                unreachable += 1;
            }
            assert_eq!(app.is_revealed(section.kind), reachable, "{:?}", section.kind);
        }
        assert!(unreachable > 0);
        assert!(app.is_revealed(SectionKind::Hero));
    }

    #[test]
    fn test_header_turns_frosted() {
        let mut app = App::new(config(true));
        let t0 = Instant::now();
        app.prepare_frame(t0, SIZE);
        assert_eq!(app.header_style(), HeaderStyle::Transparent);

        app.scroll.set_scroll(3);
        app.prepare_frame(t0, SIZE);
        assert_eq!(app.header_style(), HeaderStyle::Frosted);
    }

    #[test]
    fn test_navigation() {
        let mut app = App::new(config(true));
        app.prepare_frame(Instant::now(), SIZE);
        let layout = app.layout().cloned().unwrap();

        app.toggle_menu();
        assert!(app.menu_open);
        app.menu_down();
        app.menu_select();
        assert!(!app.menu_open);
        assert_eq!(
            Some(app.scroll.current_scroll()),
            layout.section_top(SectionKind::Interview)
        );

        app.navigate(2);
        assert_eq!(
            Some(app.scroll.current_scroll()),
            layout.section_top(SectionKind::Programs)
        );

        app.prev_section();
        assert_eq!(
            Some(app.scroll.current_scroll()),
            layout.section_top(SectionKind::Global)
        );

        // out of range is ignored
        app.navigate(9);
        assert_eq!(
            Some(app.scroll.current_scroll()),
            layout.section_top(SectionKind::Global)
        );
    }

    #[test]
    fn test_menu_wraps() {
        let mut app = App::new(config(true));
        app.toggle_menu();
        app.menu_up();
        assert_eq!(app.menu_selected, 2);
        app.menu_down();
        assert_eq!(app.menu_selected, 0);
    }
}
