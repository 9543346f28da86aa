//! Smooth page scrolling
//!
//! Scrolling eases toward its target with the curve from `[ui.scroll]`,
//! using the shared easing and timing atoms from `cocoon_core::motion`.
//!
//! # Usage
//!
//! ```ignore
//! use cocoon_tui::scroll::ScrollAnimator;
//!
//! let mut animator = ScrollAnimator::new(config.ui.scroll.clone());
//!
//! // Queue a scroll; deltas within one frame are batched
//! animator.scroll_by(10, max_scroll);
//!
//! // Once per frame
//! let scroll = animator.update(max_scroll);
//! ```

pub mod animation;
pub mod config;

pub use animation::{ScrollAnimator, Step};
pub use config::{ScrollConfig, ScrollConfigExt};
pub use cocoon_core::EasingType;
