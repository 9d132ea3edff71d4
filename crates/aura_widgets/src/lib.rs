//! Aura Widget Library
//!
//! Gesture-driven components that commit with a spring. Each widget owns one
//! `SnapController`, turns raw pointer samples into gestures through its own
//! arbiter, and exposes render-ready visuals.
//!
//! # Example
//!
//! ```rust
//! use aura_core::Event;
//! use aura_widgets::{SwipeButton, Widget, WidgetContext};
//!
//! let mut ctx = WidgetContext::new();
//! let mut button = SwipeButton::new(&mut ctx, "Slide to pay");
//! button.handle_event(&Event::resize(356.0, 56.0));
//!
//! button.handle_event(&Event::pointer_down(1, 20.0, 28.0).at(0));
//! button.handle_event(&Event::pointer_move(1, 290.0, 28.0).at(100));
//! button.handle_event(&Event::pointer_up(1, 290.0, 28.0).at(120));
//! assert!(button.is_confirmed());
//!
//! while ctx.advance(1.0 / 60.0) {
//!     button.tick();
//! }
//! button.tick();
//! assert!(button.is_completed());
//! ```

pub mod aura_island;
pub mod bottom_sheet;
pub mod context;
pub mod error;
pub mod image_comparer;
pub mod rating_swipe;
pub mod swipe_button;
pub mod widget;
pub mod zoomable_view;

pub use aura_island::{
    IslandCommand, IslandConfig, IslandHandle, IslandHost, IslandMode, IslandSize, IslandVisuals,
};
pub use bottom_sheet::{BottomSheet, BottomSheetConfig};
pub use context::WidgetContext;
pub use error::IslandError;
pub use image_comparer::{ImageComparer, ImageComparerConfig};
pub use rating_swipe::{RatingSwipe, RatingSwipeConfig};
pub use swipe_button::{SwipeButton, SwipeButtonConfig, SwipeVisuals};
pub use widget::{Widget, WidgetId};
pub use zoomable_view::ZoomableView;
