//! Eased numeric counter.
//!
//! The counter counts from 0 to its target once, driven by display refresh
//! callbacks from a [`FrameScheduler`]. Each tick derives its value from the
//! wall-clock time since the first tick, shaped by a cubic ease-out curve:
//!
//! ```text
//! progress = min(elapsed / duration, 1)
//! value    = floor(target * (1 - (1 - progress)^3))
//! ```
//!
//! The counter reschedules itself until progress reaches 1, at which point
//! the value is exactly the target.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::format::format_counter;
use crate::frame::{Frame, FrameRequest, FrameScheduler};
use crate::motion::easing::cubic_ease_out;
use crate::motion::timing::progress_at;

/// Lifecycle of a counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPhase {
    /// Not started; shows 0
    Idle,
    /// Waiting for frame callbacks
    Running,
    /// Reached the target
    Done,
    /// Unmounted before reaching the target
    Cancelled,
}

/// Value shown `elapsed` after the first tick
pub fn sample(target: u64, duration: Duration, elapsed: Duration) -> u64 {
    let progress = if duration.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
    };
    let value = (target as f64 * cubic_ease_out(progress)).floor() as u64;
    value.min(target)
}

/// Count-up animation state for one on-screen number
#[derive(Debug)]
pub struct EasedCounter {
    target: u64,
    suffix: String,
    duration: Duration,
    value: u64,
    phase: CounterPhase,
    started_at: Option<Instant>,
    pending: Option<FrameRequest>,
}

impl EasedCounter {
    pub fn new(target: u64, suffix: impl Into<String>, duration: Duration) -> Self {
        Self {
            target,
            suffix: suffix.into(),
            duration,
            value: 0,
            phase: CounterPhase::Idle,
            started_at: None,
            pending: None,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Currently displayed value
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    pub fn has_started(&self) -> bool {
        self.phase != CounterPhase::Idle
    }

    /// Whether a frame callback is outstanding
    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin counting. Only the first call on an idle counter does anything.
    pub fn start(&mut self, frames: &FrameScheduler) -> bool {
        if self.phase != CounterPhase::Idle {
            return false;
        }
        debug!(end = self.target, duration_ms = self.duration.as_millis() as u64, "counter started");
        self.phase = CounterPhase::Running;
        self.pending = Some(frames.request_frame());
        true
    }

    /// Frame callback: advance if this counter's request is due
    pub fn on_frame(&mut self, frame: &Frame, frames: &FrameScheduler) {
        let Some(request) = self.pending.take() else {
            return;
        };
        if !frame.is_due(&request) {
            self.pending = Some(request);
            return;
        }
        drop(request);
        if self.phase != CounterPhase::Running {
            return;
        }

        let now = frame.now();
        let started_at = *self.started_at.get_or_insert(now);
        let progress = progress_at(started_at, now, self.duration);
        let elapsed = now.saturating_duration_since(started_at);

        self.value = sample(self.target, self.duration, elapsed).max(self.value);

        if progress < 1.0 {
            self.pending = Some(frames.request_frame());
        } else {
            self.value = self.target;
            self.phase = CounterPhase::Done;
            debug!(end = self.target, "counter finished");
        }
    }

    /// Unmount: drop any outstanding callback and freeze the value
    pub fn cancel(&mut self) {
        self.pending = None;
        if matches!(self.phase, CounterPhase::Idle | CounterPhase::Running) {
            debug!(end = self.target, value = self.value, "counter cancelled");
            self.phase = CounterPhase::Cancelled;
        }
    }

    /// Displayed text, e.g. `5,000만원 +`
    pub fn formatted(&self, separator: &str) -> String {
        format_counter(self.value, &self.suffix, separator)
    }
}

/// Values a counter shows when ticked every `interval`, ending with `target`
pub fn count_up(target: u64, duration: Duration, interval: Duration) -> CountUp {
    CountUp {
        target,
        duration,
        interval: interval.max(Duration::from_millis(1)),
        tick: 0,
        finished: false,
    }
}

/// Lazy counter sequence, see [`count_up`]
#[derive(Debug, Clone)]
pub struct CountUp {
    target: u64,
    duration: Duration,
    interval: Duration,
    tick: u32,
    finished: bool,
}

impl Iterator for CountUp {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.finished {
            return None;
        }
        let elapsed = self.interval.saturating_mul(self.tick);
        self.tick = self.tick.saturating_add(1);
        if elapsed >= self.duration {
            self.finished = true;
            return Some(self.target);
        }
        Some(sample(self.target, self.duration, elapsed))
    }
}
