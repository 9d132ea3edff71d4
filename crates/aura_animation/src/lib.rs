//! Aura Animation System
//!
//! Spring physics, timed tweens, and the scheduler that drives settle
//! animations for gesture controllers.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Timed Tweens**: fixed-duration animations with easing curves
//! - **Interpolation**: range mapping with clamp/extend extrapolation
//! - **Interruptible**: a new target keeps the in-flight velocity
//! - **Generational handles**: a removed animation can never be observed again

pub mod animated;
pub mod easing;
pub mod interpolate;
pub mod scheduler;
pub mod spring;
pub mod tween;

pub use animated::AnimatedValue;
pub use easing::Easing;
pub use interpolate::{interpolate, Extrapolation};
pub use scheduler::{
    AnimationId, AnimationSample, AnimationScheduler, Motion, SharedScheduler, SpringId, TweenId,
};
pub use spring::{Spring, SpringConfig};
pub use tween::Tween;
