//! Pinch-to-zoom container

use aura_core::events::event_types::{GESTURE_CANCEL, PINCH, PINCH_END, PINCH_START};
use aura_core::events::{Event, EventData};
use aura_gestures::{GestureArbiter, PinchConfig, PinchPolicy, Recognizer, SnapController};

use crate::context::WidgetContext;
use crate::widget::{Widget, WidgetId};

pub struct ZoomableView {
    id: WidgetId,
    controller: SnapController<PinchPolicy>,
    arbiter: GestureArbiter,
    /// Pinch midpoint, for the transform origin
    focal: (f32, f32),
}

impl ZoomableView {
    pub fn new(ctx: &mut WidgetContext) -> Self {
        Self::with_config(ctx, PinchConfig::default())
    }

    pub fn with_config(ctx: &mut WidgetContext, config: PinchConfig) -> Self {
        let id = ctx.register_widget("zoomable_view");
        Self {
            id,
            controller: SnapController::with_scheduler(PinchPolicy::new(config), ctx.scheduler())
                .with_value(1.0),
            arbiter: GestureArbiter::new().with(Recognizer::pinch()),
            focal: (0.0, 0.0),
        }
    }

    /// Called with the resting scale once a pinch has settled
    pub fn on_zoom_end<F: FnMut(f32) + Send + 'static>(mut self, callback: F) -> Self {
        self.controller.on_commit(callback);
        self
    }

    /// Rendered scale (may leave the bounds while pinching)
    pub fn scale(&self) -> f32 {
        self.controller.value()
    }

    /// Scale the next pinch starts from
    pub fn saved_scale(&self) -> f32 {
        self.controller.committed().unwrap_or(1.0)
    }

    pub fn focal_point(&self) -> (f32, f32) {
        self.focal
    }

    pub fn controller(&self) -> &SnapController<PinchPolicy> {
        &self.controller
    }

    fn on_gesture(&mut self, event: &Event) {
        let EventData::Pinch {
            scale,
            focal_x,
            focal_y,
            velocity,
        } = event.data
        else {
            if event.event_type == GESTURE_CANCEL {
                self.controller.cancel();
            }
            return;
        };
        self.focal = (focal_x, focal_y);

        match event.event_type {
            PINCH_START => {
                if self.controller.begin(0.0, self.saved_scale()) {
                    self.controller.update(scale);
                }
            }
            PINCH => self.controller.update(scale),
            PINCH_END => {
                if let Some(decision) = self.controller.end(scale, velocity) {
                    tracing::debug!(scale = decision.outcome, "zoom settled");
                }
            }
            _ => {}
        }
    }
}

impl Widget for ZoomableView {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn handle_event(&mut self, event: &Event) {
        for gesture in self.arbiter.handle(event) {
            self.on_gesture(&gesture);
        }
    }

    fn tick(&mut self) {
        self.controller.tick();
    }
}
