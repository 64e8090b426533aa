//! Glide Animation Primitives
//!
//! Frame-driven building blocks for widget animation. Nothing here owns a
//! clock: the host's per-frame callback passes elapsed milliseconds into
//! `tick`, which keeps every animation deterministic and cancellable by
//! simply dropping it.
//!
//! - **Easing**: standard easing curves
//! - **Tween**: interpolate one value over a duration
//! - **Timer**: single pending one-shot delay
//! - **Stepper**: 2D linear interpolation in discrete steps

pub mod easing;
pub mod stepper;
pub mod timer;
pub mod tween;

pub use easing::Easing;
pub use stepper::Stepper;
pub use timer::Timer;
pub use tween::Tween;
