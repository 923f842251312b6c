//! Rota Animation System
//!
//! Easing curves and timed tweens used to drive scripted offset transitions.
//!
//! # Features
//!
//! - **Easing Curves**: Named curves plus arbitrary `cubic-bezier(...)` timing
//! - **CSS Timing Strings**: Curves render to and parse from their CSS form
//! - **Tweens**: Fixed-duration interpolation that can be sampled at any time,
//!   so an interrupted animation can report where it currently is

pub mod easing;
pub mod tween;
pub mod values;

pub use easing::{Easing, EasingParseError};
pub use tween::Tween;
pub use values::Interpolate;
