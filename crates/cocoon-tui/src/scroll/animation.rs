//! Page scroll animation controller

use std::time::{Duration, Instant};

use cocoon_core::motion::{lerp_u16, progress_at};

use super::config::{ScrollConfig, ScrollConfigExt};
use super::EasingType;

/// Relative scroll distances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One row when smooth, `scroll_lines` rows otherwise
    Line,
    HalfPage,
    Page,
}

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: u16,
    to: u16,
    duration: Duration,
    easing: EasingType,
}

/// Scroll animation controller for the landing page
///
/// Queue moves with `scroll_by()` / `scroll_to()`, then call `update()` once
/// per frame to get the row that should sit at the top of the screen.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    /// Row currently at the top of the screen
    current_scroll: u16,
    /// Deltas queued since the last frame
    pending_delta: i32,
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether the next frame must run soon (animation or queued delta)
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    /// Final position once the current animation ends
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Jump without animating
    pub fn set_scroll(&mut self, scroll: u16) {
        self.animation = None;
        self.current_scroll = scroll;
        self.pending_delta = 0;
    }

    /// Animate to an absolute row (anchor links, top/bottom)
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16) {
        let target = target.min(max_scroll);
        self.pending_delta = 0;

        if !self.config.is_smooth() {
            self.set_scroll(target);
            return;
        }

        if self.current_scroll == target {
            self.animation = None;
            return;
        }

        self.begin(self.current_scroll, target, Instant::now());
    }

    /// Move by `delta` rows (positive = down). Deltas within a frame are batched.
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if !self.config.is_smooth() {
            let next = (self.current_scroll as i32 + delta).clamp(0, max_scroll as i32) as u16;
            self.set_scroll(next);
            return;
        }
        self.pending_delta += delta;
    }

    /// Move one `step` up or down
    pub fn step(&mut self, step: Step, down: bool, viewport_height: u16, max_scroll: u16) {
        let rows = match step {
            Step::Line if self.config.is_smooth() => 1,
            Step::Line => self.config.scroll_lines.max(1) as i32,
            Step::HalfPage => (viewport_height / 2).max(1) as i32,
            Step::Page => viewport_height.max(1) as i32,
        };
        self.scroll_by(if down { rows } else { -rows }, max_scroll);
    }

    /// Advance to the wall clock and return the current row
    pub fn update(&mut self, max_scroll: u16) -> u16 {
        self.update_at(Instant::now(), max_scroll)
    }

    /// Advance to `now` and return the current row
    pub fn update_at(&mut self, now: Instant, max_scroll: u16) -> u16 {
        if self.pending_delta != 0 {
            let target = (self.target_scroll() as i32 + self.pending_delta)
                .clamp(0, max_scroll as i32) as u16;
            self.pending_delta = 0;
            if target != self.current_scroll {
                self.begin(self.current_scroll, target, now);
            }
        }

        if let Some(anim) = &self.animation {
            let t = progress_at(anim.start, now, anim.duration);
            if t >= 1.0 {
                self.current_scroll = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let eased = anim.easing.apply(t);
                self.current_scroll = lerp_u16(anim.from, anim.to, eased).min(max_scroll);
            }
        } else {
            // The page can shrink under us (terminal resize)
            self.current_scroll = self.current_scroll.min(max_scroll);
        }

        self.current_scroll
    }

    fn begin(&mut self, from: u16, to: u16, start: Instant) {
        self.animation = Some(ActiveAnimation {
            start,
            from,
            to,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smooth(duration_ms: u64) -> ScrollConfig {
        ScrollConfig {
            smooth_enabled: true,
            animation_duration_ms: duration_ms,
            ..Default::default()
        }
    }

    #[test]
    fn test_instant_scroll_when_disabled() {
        let mut animator = ScrollAnimator::new(ScrollConfig {
            smooth_enabled: false,
            scroll_lines: 3,
            ..Default::default()
        });

        animator.scroll_to(100, 200);
        assert_eq!(animator.current_scroll(), 100);
        assert!(!animator.is_animating());

        animator.step(Step::Line, true, 20, 200);
        assert_eq!(animator.current_scroll(), 103);
        animator.step(Step::HalfPage, false, 20, 200);
        assert_eq!(animator.current_scroll(), 93);
        animator.step(Step::Page, true, 20, 200);
        assert_eq!(animator.current_scroll(), 113);
    }

    #[test]
    fn test_scroll_to_eases_and_lands() {
        let mut animator = ScrollAnimator::new(smooth(100));
        let t0 = Instant::now();
        animator.scroll_to(40, 200);
        assert!(animator.is_animating());
        assert_eq!(animator.target_scroll(), 40);

        // Force a known start time
        animator.begin(0, 40, t0);
        let mid = animator.update_at(t0 + Duration::from_millis(50), 200);
        // cubic ease-out at t=0.5 is 0.875
        assert_eq!(mid, 35);
        assert_eq!(animator.update_at(t0 + Duration::from_millis(100), 200), 40);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_scroll_by_batching() {
        let mut animator = ScrollAnimator::new(smooth(100));

        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        assert!(animator.needs_update());

        animator.update(200);
        assert_eq!(animator.target_scroll(), 30);
    }

    #[test]
    fn test_scroll_clamped_to_page() {
        let mut animator = ScrollAnimator::default();
        animator.set_scroll(50);
        animator.scroll_to(300, 100);
        animator.update(100);
        assert!(animator.target_scroll() <= 100);

        animator.set_scroll(80);
        assert_eq!(animator.update(60), 60);
    }
}
