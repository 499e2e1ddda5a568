//! Tweens: values that move through a sequence of eased steps over time.
//!
//! Nothing here reads a clock. Hosts pass the current time into
//! [`Animatable::tick()`] once per frame, which keeps animations
//! deterministic and easy to test.

mod animatable;
mod easing;

pub use animatable::Animatable;
pub use easing::EasingFunction;
