pub mod config;
pub mod counter;
pub mod error;
pub mod format;
pub mod frame;
pub mod motion;
pub mod observer;
pub mod page;
pub mod style;
pub mod visibility;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use counter::{CounterPhase, EasedCounter};
pub use error::{Error, Result};
pub use frame::{Frame, FrameRequest, FrameScheduler};
pub use observer::{ViewportObserver, VisibilityHandle};
pub use visibility::{RegionBounds, Threshold, Viewport, VisibilityTracker};
