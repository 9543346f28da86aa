//! Viewport intersection observation with scoped release.
//!
//! [`ViewportObserver`] plays the part of the host's intersection observer:
//! regions attach to it and receive one report per [`ViewportObserver::notify`].
//! Every attachment returns a [`VisibilityHandle`]; dropping the handle
//! releases the observation, whether or not any report was ever delivered.
//!
//! Everything here is single-threaded. Each tracker is written only by its
//! own observation, so shared cells are enough.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::visibility::{intersection_ratio, RegionBounds, Threshold, Viewport, VisibilityTracker};

type SharedTracker = Rc<RefCell<VisibilityTracker>>;

struct Observation {
    bounds: RegionBounds,
    tracker: SharedTracker,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    observations: BTreeMap<u64, Observation>,
}

/// Host-side registry of region observations
#[derive(Clone)]
pub struct ViewportObserver {
    registry: Rc<RefCell<Registry>>,
    supported: bool,
}

impl Default for ViewportObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportObserver {
    /// Observer with intersection tracking available
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::default())),
            supported: true,
        }
    }

    /// Observer for a host without intersection tracking.
    /// Every attachment is reported visible at once.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Start observing a region
    ///
    /// A region that has not been laid out yet (`bounds == None`) gets an
    /// inert handle that never becomes visible; attach again once the region
    /// exists.
    pub fn attach(&self, bounds: Option<RegionBounds>, threshold: Threshold) -> VisibilityHandle {
        let mut tracker = VisibilityTracker::new(threshold);

        if !self.supported {
            tracker.force_visible();
            return VisibilityHandle::detached(tracker);
        }

        let Some(bounds) = bounds else {
            debug!("attach skipped: region not laid out");
            return VisibilityHandle::detached(tracker);
        };

        let tracker = Rc::new(RefCell::new(tracker));
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.observations.insert(
            id,
            Observation {
                bounds,
                tracker: Rc::clone(&tracker),
            },
        );
        debug!(id, threshold = %threshold, top = bounds.top, height = bounds.height, "observation attached");

        VisibilityHandle {
            tracker,
            guard: Some(ObservationGuard {
                id,
                registry: Rc::downgrade(&self.registry),
            }),
        }
    }

    /// Deliver one intersection report to every observation.
    ///
    /// Observations that latch are released; their flags are final.
    /// Returns how many latched during this call.
    pub fn notify(&self, viewport: Viewport) -> usize {
        let mut registry = self.registry.borrow_mut();
        let mut latched = Vec::new();

        for (id, observation) in registry.observations.iter() {
            let ratio = intersection_ratio(observation.bounds, viewport);
            if observation.tracker.borrow_mut().observe(ratio) {
                debug!(id, ratio, "region became visible");
                latched.push(*id);
            }
        }

        for id in &latched {
            registry.observations.remove(id);
        }
        latched.len()
    }

    /// Number of live observations
    pub fn observation_count(&self) -> usize {
        self.registry.borrow().observations.len()
    }
}

/// Releases one observation when dropped
struct ObservationGuard {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl ObservationGuard {
    fn with_observation(&self, f: impl FnOnce(&mut Observation)) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();
        if let Some(observation) = registry.observations.get_mut(&self.id) {
            f(observation);
        }
    }

    fn is_registered(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let registry = registry.borrow();
        registry.observations.contains_key(&self.id)
    }
}

impl Drop for ObservationGuard {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let removed = registry.borrow_mut().observations.remove(&self.id);
        if removed.is_some() {
            debug!(id = self.id, "observation released");
        }
    }
}

/// Live visibility flag for one attached region
pub struct VisibilityHandle {
    tracker: SharedTracker,
    guard: Option<ObservationGuard>,
}

impl VisibilityHandle {
    fn detached(tracker: VisibilityTracker) -> Self {
        Self {
            tracker: Rc::new(RefCell::new(tracker)),
            guard: None,
        }
    }

    /// Whether the region has ever met its threshold
    pub fn is_visible(&self) -> bool {
        self.tracker.borrow().is_visible()
    }

    /// Whether reports are still being delivered to this handle
    pub fn is_observing(&self) -> bool {
        self.guard.as_ref().is_some_and(ObservationGuard::is_registered)
    }

    /// Follow the region after a re-layout
    pub fn set_bounds(&self, bounds: RegionBounds) {
        if let Some(guard) = &self.guard {
            guard.with_observation(|observation| observation.bounds = bounds);
        }
    }

    /// Release the observation now
    pub fn dispose(self) {
        drop(self);
    }
}

impl std::fmt::Debug for VisibilityHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityHandle")
            .field("visible", &self.is_visible())
            .field("observing", &self.is_observing())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(top: u32, height: u32) -> Option<RegionBounds> {
        Some(RegionBounds::new(top, height))
    }

    #[test]
    fn test_latch_survives_leaving_viewport() {
        let observer = ViewportObserver::new();
        // 10-row region at row 100, threshold 0.3
        let handle = observer.attach(region(100, 10), Threshold::COUNTER);
        assert!(handle.is_observing());

        // 2 of 10 rows on screen
        observer.notify(Viewport::new(92, 10));
        assert!(!handle.is_visible());

        // 4 of 10 rows on screen
        assert_eq!(observer.notify(Viewport::new(94, 10)), 1);
        assert!(handle.is_visible());
        assert!(!handle.is_observing());

        observer.notify(Viewport::new(0, 10));
        assert!(handle.is_visible());
    }

    #[test]
    fn test_drop_releases_before_any_report() {
        let observer = ViewportObserver::new();
        let handle = observer.attach(region(0, 10), Threshold::SECTION);
        let other = observer.attach(region(50, 10), Threshold::SECTION);
        assert_eq!(observer.observation_count(), 2);

        drop(handle);
        assert_eq!(observer.observation_count(), 1);

        other.dispose();
        assert_eq!(observer.observation_count(), 0);
        assert_eq!(observer.notify(Viewport::new(0, 100)), 0);
    }

    #[test]
    fn test_unrealized_region_is_inert() {
        let observer = ViewportObserver::new();
        let handle = observer.attach(None, Threshold::HERO);
        assert_eq!(observer.observation_count(), 0);
        observer.notify(Viewport::new(0, 1000));
        assert!(!handle.is_visible());
        assert!(!handle.is_observing());
    }

    #[test]
    fn test_unsupported_fails_open() {
        let observer = ViewportObserver::unsupported();
        let handle = observer.attach(region(500, 10), Threshold::SECTION);
        assert!(handle.is_visible());
        assert_eq!(observer.observation_count(), 0);
    }

    #[test]
    fn test_set_bounds_follows_relayout() {
        let observer = ViewportObserver::new();
        let handle = observer.attach(region(100, 10), Threshold::SECTION);
        observer.notify(Viewport::new(0, 20));
        assert!(!handle.is_visible());

        handle.set_bounds(RegionBounds::new(5, 10));
        observer.notify(Viewport::new(0, 20));
        assert!(handle.is_visible());
    }

    #[test]
    fn test_handle_outlives_observer() {
        let handle = {
            let observer = ViewportObserver::new();
            observer.attach(region(0, 10), Threshold::SECTION)
        };
        assert!(!handle.is_observing());
        handle.set_bounds(RegionBounds::new(1, 1));
        drop(handle);
    }
}
