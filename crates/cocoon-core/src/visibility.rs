//! One-way visibility latch for page regions.
//!
//! A region is a band of page rows. The host reports how much of a region
//! overlaps the viewport; once the reported fraction reaches the tracker's
//! threshold the tracker latches visible and stays that way for the rest of
//! the region's life.

use std::fmt;

use crate::{Error, Result};

/// Fraction of a region that must be on screen, in (0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// Hero section
    pub const HERO: Threshold = Threshold(0.1);
    /// Content sections
    pub const SECTION: Threshold = Threshold(0.2);
    /// Individual counters
    pub const COUNTER: Threshold = Threshold(0.3);

    pub fn new(value: f64) -> Result<Self> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidThreshold(value))
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rows occupied by a region, in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionBounds {
    pub top: u32,
    pub height: u32,
}

impl RegionBounds {
    pub fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

/// Rows currently on screen, in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub top: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

/// Fraction of `region` inside `viewport`
///
/// A zero-height region never intersects.
pub fn intersection_ratio(region: RegionBounds, viewport: Viewport) -> f64 {
    if region.height == 0 {
        return 0.0;
    }
    let top = region.top.max(viewport.top);
    let bottom = region.bottom().min(viewport.bottom());
    let overlap = bottom.saturating_sub(top);
    overlap as f64 / region.height as f64
}

/// Latch that flips to visible the first time a reported ratio meets the threshold
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityTracker {
    threshold: Threshold,
    visible: bool,
}

impl VisibilityTracker {
    pub fn new(threshold: Threshold) -> Self {
        Self {
            threshold,
            visible: false,
        }
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Feed one intersection report. Returns true only on the call that latches.
    pub fn observe(&mut self, ratio: f64) -> bool {
        if self.visible || ratio < self.threshold.value() {
            return false;
        }
        self.visible = true;
        true
    }

    /// Latch without a report (observation unavailable)
    pub fn force_visible(&mut self) {
        self.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_range() {
        assert!(Threshold::new(0.1).is_ok());
        assert!(Threshold::new(1.0).is_ok());
        assert!(matches!(Threshold::new(0.0), Err(Error::InvalidThreshold(_))));
        assert!(Threshold::new(-0.5).is_err());
        assert!(Threshold::new(1.01).is_err());
        assert!(Threshold::new(f64::NAN).is_err());
    }

    #[test]
    fn test_latches_at_threshold_and_stays() {
        // 0.25 does not reach 0.3, 0.35 does, a later 0.0 changes nothing
        let mut tracker = VisibilityTracker::new(Threshold::COUNTER);
        assert!(!tracker.observe(0.25));
        assert!(!tracker.is_visible());
        assert!(tracker.observe(0.35));
        assert!(tracker.is_visible());
        assert!(!tracker.observe(0.0));
        assert!(tracker.is_visible());
    }

    #[test]
    fn test_exact_threshold_latches() {
        for value in [0.1, 0.2, 0.3, 0.5, 1.0] {
            let mut tracker = VisibilityTracker::new(Threshold::new(value).unwrap());
            assert!(tracker.observe(value), "threshold {}", value);
            for later in [0.0, value / 2.0, 1.0] {
                tracker.observe(later);
                assert!(tracker.is_visible());
            }
        }
    }

    #[test]
    fn test_intersection_ratio() {
        let region = RegionBounds::new(10, 10);
        assert_eq!(intersection_ratio(region, Viewport::new(0, 10)), 0.0);
        assert_eq!(intersection_ratio(region, Viewport::new(0, 12)), 0.2);
        assert_eq!(intersection_ratio(region, Viewport::new(15, 40)), 0.5);
        assert_eq!(intersection_ratio(region, Viewport::new(0, 100)), 1.0);
        assert_eq!(intersection_ratio(region, Viewport::new(20, 10)), 0.0);
        assert_eq!(intersection_ratio(RegionBounds::new(3, 0), Viewport::new(0, 10)), 0.0);
    }

    #[test]
    fn test_region_taller_than_viewport() {
        let region = RegionBounds::new(0, 100);
        assert_eq!(intersection_ratio(region, Viewport::new(40, 20)), 0.2);
    }
}
