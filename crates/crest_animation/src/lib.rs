//! Crest Animation Engine
//!
//! Spring physics, eased tweens, and a frame-clock scheduler.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Tweens**: Fixed-duration animations with easing curves
//! - **Scheduler**: One cooperative frame clock ticking every live animation
//! - **Cells**: Cancellable single-value animation targets with an
//!   interrupt-then-replace discipline
//! - **Transitions**: Join several tracks and cancel them as a unit

pub mod cell;
pub mod easing;
pub mod scheduler;
pub mod spring;
pub mod tween;

pub use cell::{AnimatedCell, AnimationSpec, Transition};
pub use easing::Easing;
pub use scheduler::{AnimationScheduler, SchedulerHandle, SpringId, TrackId, TweenId};
pub use spring::{Spring, SpringConfig};
pub use tween::Tween;
