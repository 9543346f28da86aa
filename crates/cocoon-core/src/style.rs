//! Declarative style mappings driven by visibility latches and scroll offset.

use std::time::Duration;

use crate::motion::easing::cubic_ease_out;

/// Where an element starts before its entrance, in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Offset {
    #[default]
    None,
    /// Starts this many rows below its resting place
    Below(u16),
    /// Starts this many rows above
    Above(u16),
    /// Starts this many columns to the left
    Left(u16),
    /// Starts this many columns to the right
    Right(u16),
}

impl Offset {
    pub fn dx(self) -> i32 {
        match self {
            Offset::Left(n) => -(n as i32),
            Offset::Right(n) => n as i32,
            _ => 0,
        }
    }

    pub fn dy(self) -> i32 {
        match self {
            Offset::Below(n) => n as i32,
            Offset::Above(n) => -(n as i32),
            _ => 0,
        }
    }

    /// Rows a layout must reserve so the element never overlaps its neighbours
    pub fn reserved_rows(self) -> u16 {
        match self {
            Offset::Below(n) | Offset::Above(n) => n,
            _ => 0,
        }
    }
}

/// Entrance timing: `transition: all <duration> ease-out <delay>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub duration: Duration,
    pub delay: Duration,
}

impl Transition {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(duration: Duration, delay: Duration) -> Self {
        Self { duration, delay }
    }

    /// Eased progress `since` the latch, in [0, 1]
    pub fn progress(&self, since: Duration) -> f64 {
        let Some(running) = since.checked_sub(self.delay) else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = (running.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        cubic_ease_out(t)
    }

    /// Whether the transition has finished `since` the latch
    pub fn is_finished(&self, since: Duration) -> bool {
        since >= self.delay + self.duration
    }
}

/// Visual parameters of an element with an entrance animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    /// 0.0 hidden, 1.0 fully shown
    pub opacity: f64,
    pub dx: i32,
    pub dy: i32,
}

impl RevealStyle {
    pub const SHOWN: RevealStyle = RevealStyle {
        opacity: 1.0,
        dx: 0,
        dy: 0,
    };

    /// Resting style for a latch value
    pub fn target(visible: bool, offset: Offset) -> Self {
        if visible {
            Self::SHOWN
        } else {
            Self {
                opacity: 0.0,
                dx: offset.dx(),
                dy: offset.dy(),
            }
        }
    }

    /// Style `since` the latch flipped (`None` while still hidden)
    pub fn at(offset: Offset, transition: Transition, since: Option<Duration>) -> Self {
        let Some(since) = since else {
            return Self::target(false, offset);
        };
        let t = transition.progress(since);
        let remaining = 1.0 - t;
        Self {
            opacity: t,
            dx: (offset.dx() as f64 * remaining).round() as i32,
            dy: (offset.dy() as f64 * remaining).round() as i32,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.opacity <= 0.0
    }
}

/// Fixed header background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// Page shows through
    Transparent,
    /// Opaque background with a bottom rule
    Frosted,
}

impl HeaderStyle {
    /// Frosted once the page has scrolled strictly past `solid_after` rows
    pub fn for_scroll(offset: u32, solid_after: u32) -> Self {
        if offset > solid_after {
            HeaderStyle::Frosted
        } else {
            HeaderStyle::Transparent
        }
    }
}
