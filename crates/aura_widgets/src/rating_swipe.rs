//! Star rating set by swiping across the track or tapping a star

use aura_core::events::event_types::{DRAG, DRAG_END, DRAG_START, GESTURE_CANCEL, RESIZE, TAP};
use aura_core::events::{Event, EventData};
use aura_gestures::{GestureArbiter, RatingConfig, RatingPolicy, Recognizer, SnapController};
use serde::{Deserialize, Serialize};

use crate::context::WidgetContext;
use crate::widget::{Widget, WidgetId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSwipeConfig {
    pub rating: RatingConfig,
    pub initial_rating: f32,
    /// Track width used until the first layout arrives
    pub width: f32,
}

impl Default for RatingSwipeConfig {
    fn default() -> Self {
        Self {
            rating: RatingConfig::default(),
            initial_rating: 0.0,
            width: 300.0,
        }
    }
}

impl RatingSwipeConfig {
    pub fn max_rating(mut self, max_rating: u32) -> Self {
        self.rating = self.rating.with_max_rating(max_rating);
        self
    }

    pub fn initial_rating(mut self, rating: f32) -> Self {
        self.initial_rating = rating;
        self
    }
}

pub struct RatingSwipe {
    id: WidgetId,
    controller: SnapController<RatingPolicy>,
    arbiter: GestureArbiter,
    rating: f32,
    on_rating_change: Option<Box<dyn FnMut(f32) + Send>>,
}

impl RatingSwipe {
    pub fn new(ctx: &mut WidgetContext) -> Self {
        Self::with_config(ctx, RatingSwipeConfig::default())
    }

    pub fn with_config(ctx: &mut WidgetContext, config: RatingSwipeConfig) -> Self {
        let id = ctx.register_widget("rating_swipe");
        let policy = RatingPolicy::new(config.rating);
        let rating = config.initial_rating.clamp(0.0, policy.max_rating());
        let start = policy.position_for(rating, config.width);
        let controller = SnapController::with_scheduler(policy, ctx.scheduler())
            .with_extent(config.width)
            .with_value(start);
        Self {
            id,
            controller,
            // Pan first: a drag claims the touch before the tap can
            arbiter: GestureArbiter::new()
                .with(Recognizer::pan())
                .with(Recognizer::tap()),
            rating,
            on_rating_change: None,
        }
    }

    /// Called with the new rating at the end of each drag or tap
    pub fn on_rating_change<F: FnMut(f32) + Send + 'static>(mut self, callback: F) -> Self {
        self.on_rating_change = Some(Box::new(callback));
        self
    }

    pub fn set_layout(&mut self, width: f32) {
        if !width.is_finite() || width <= 0.0 || self.controller.is_dragging() {
            return;
        }
        self.controller.set_extent(width);
        let position = self.controller.policy().position_for(self.rating, width);
        self.controller.jump_to(position, None);
    }

    pub fn max_rating(&self) -> u32 {
        self.controller.policy().max_rating() as u32
    }

    /// The rating shown right now: live half units while dragging,
    /// otherwise the last committed rating
    pub fn rating(&self) -> f32 {
        if self.controller.is_dragging() {
            self.controller
                .policy()
                .live_rating(self.controller.value(), self.controller.extent())
        } else {
            self.rating
        }
    }

    /// Fully lit stars
    pub fn filled_stars(&self) -> u32 {
        self.rating().floor() as u32
    }

    /// Whether a half star follows the filled ones
    pub fn has_half_star(&self) -> bool {
        self.rating().fract() >= 0.5
    }

    /// Width of the highlight behind the stars
    pub fn fill_width(&self) -> f32 {
        self.controller.value()
    }

    pub fn controller(&self) -> &SnapController<RatingPolicy> {
        &self.controller
    }

    fn commit(&mut self, rating: f32) {
        self.rating = rating;
        tracing::debug!(rating, "rating committed");
        if let Some(ref mut callback) = self.on_rating_change {
            callback(rating);
        }
    }

    fn on_gesture(&mut self, event: &Event) {
        match (event.event_type, &event.data) {
            (
                DRAG_START,
                &EventData::Drag {
                    x, translation_x, ..
                },
            ) => {
                // The highlight follows the finger, not the old value
                let extent = self.controller.extent();
                if self.controller.begin(extent, x - translation_x) {
                    self.controller.update(translation_x);
                }
            }
            (DRAG, &EventData::Drag { translation_x, .. }) => {
                self.controller.update(translation_x)
            }
            (
                DRAG_END,
                &EventData::Drag {
                    translation_x,
                    velocity_x,
                    ..
                },
            ) => {
                if let Some(decision) = self.controller.end(translation_x, velocity_x) {
                    self.commit(decision.outcome);
                }
            }
            (TAP, &EventData::Tap { x, .. }) => {
                if let Some(decision) = self.controller.tap(x) {
                    self.commit(decision.outcome);
                }
            }
            (GESTURE_CANCEL, _) => {
                self.controller.cancel();
            }
            _ => {}
        }
    }
}

impl Widget for RatingSwipe {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn handle_event(&mut self, event: &Event) {
        if let (RESIZE, EventData::Resize { width, .. }) = (event.event_type, &event.data) {
            self.set_layout(*width);
            return;
        }
        for gesture in self.arbiter.handle(event) {
            self.on_gesture(&gesture);
        }
    }

    fn tick(&mut self) {
        self.controller.tick();
    }
}
