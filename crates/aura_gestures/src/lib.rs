//! Aura Gestures
//!
//! Drag-to-commit controllers for gesture-driven widgets.
//!
//! # Features
//!
//! - **SnapController**: one controller for every drag-to-commit widget,
//!   parameterised by a [`SnapPolicy`]
//! - **Policies**: threshold (swipe-to-confirm), snap points (bottom sheet),
//!   half-unit rating, bilateral pinch clamp, free position
//! - **Arbitration**: priority-ordered pan / tap / pinch recognizers with
//!   exclusive claiming
//!
//! # Example
//!
//! ```rust
//! use aura_gestures::{SnapController, SwipeOutcome, ThresholdPolicy};
//!
//! let mut swipe = SnapController::new(ThresholdPolicy::default());
//! swipe.begin(300.0, 0.0);
//! swipe.update(250.0);
//! let decision = swipe.end(250.0, 0.0).unwrap();
//! assert_eq!(decision.outcome, SwipeOutcome::Confirmed);
//! assert_eq!(decision.target, 300.0);
//! ```

pub mod controller;
pub mod policy;
pub mod recognizer;
pub mod session;
pub mod state;

pub use controller::{SettleEvent, SnapController};
pub use policy::{
    CommitDecision, FreePolicy, PinchConfig, PinchPolicy, RatingConfig, RatingPolicy, Release,
    SheetSnap, SnapPointsConfig, SnapPointsPolicy, SnapPolicy, SwipeOutcome, ThresholdConfig,
    ThresholdPolicy,
};
pub use recognizer::{GestureArbiter, Recognized, Recognizer, VelocityTracker};
pub use session::DragSession;
pub use state::{controller_events, ControllerState};
