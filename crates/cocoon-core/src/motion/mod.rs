//! Easing curves and time arithmetic shared by every animation.
//!
//! Both the page scroller and the eased counters derive their progress from
//! elapsed wall-clock time rather than from the number of frames received,
//! so a stalled draw loop only delays completion.

pub mod easing;
pub mod timing;

pub use easing::cubic_ease_out;
pub use timing::{lerp, lerp_u16, progress_at};
