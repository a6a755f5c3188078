//! Spindle Animation Support
//!
//! Easing functions and the fixed-duration tween the wheel engine uses for
//! snap/settle motion.
//!
//! # Features
//!
//! - **Easing**: the usual polynomial curves with an `apply(t)` interface
//! - **Tweens**: timestamp-driven sampling (no global clock), retargetable
//!   mid-flight without a position jump

pub mod easing;
pub mod tween;

pub use easing::Easing;
pub use tween::Tween;
