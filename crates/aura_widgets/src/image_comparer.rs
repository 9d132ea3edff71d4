//! Before/after image comparison slider
//!
//! The divider follows the finger anywhere along the track. Side labels fade
//! out while the divider sits close to either edge.

use aura_animation::{AnimatedValue, Easing, Motion};
use aura_core::events::event_types::{DRAG, DRAG_END, DRAG_START, GESTURE_CANCEL, RESIZE};
use aura_core::events::{Event, EventData};
use aura_gestures::{FreePolicy, GestureArbiter, Recognizer, SnapController};
use serde::{Deserialize, Serialize};

use crate::context::WidgetContext;
use crate::widget::{Widget, WidgetId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageComparerConfig {
    /// Initial divider position as a fraction of the width
    pub initial_value: f32,
    /// Labels hide within this distance of either edge
    pub label_edge_margin: f32,
    pub label_fade_ms: u32,
}

impl Default for ImageComparerConfig {
    fn default() -> Self {
        Self {
            initial_value: 0.5,
            label_edge_margin: 40.0,
            label_fade_ms: 150,
        }
    }
}

pub struct ImageComparer {
    id: WidgetId,
    config: ImageComparerConfig,
    controller: SnapController<FreePolicy>,
    arbiter: GestureArbiter,
    label_opacity: AnimatedValue,
}

impl ImageComparer {
    pub fn new(ctx: &mut WidgetContext) -> Self {
        Self::with_config(ctx, ImageComparerConfig::default())
    }

    pub fn with_config(ctx: &mut WidgetContext, config: ImageComparerConfig) -> Self {
        let id = ctx.register_widget("image_comparer");
        Self {
            id,
            config,
            controller: SnapController::with_scheduler(FreePolicy, ctx.scheduler()),
            // The divider grabs on touch down
            arbiter: GestureArbiter::new().with(Recognizer::Pan { min_distance: 0.0 }),
            label_opacity: AnimatedValue::with_scheduler(1.0, ctx.scheduler()),
        }
    }

    /// Called with the divider position after each drag settles
    pub fn on_release<F: FnMut(f32) + Send + 'static>(mut self, callback: F) -> Self {
        self.controller.on_commit(callback);
        self
    }

    /// Only the first non-zero width positions the divider
    pub fn set_layout(&mut self, width: f32) {
        if self.controller.extent() > 0.0 || !width.is_finite() || width <= 0.0 {
            return;
        }
        self.controller.set_extent(width);
        let position = width * self.config.initial_value.clamp(0.0, 1.0);
        self.controller.jump_to(position, Some(position));
        self.update_labels();
    }

    pub fn width(&self) -> f32 {
        self.controller.extent()
    }

    /// Divider x, also the width of the "before" image
    pub fn position(&self) -> f32 {
        self.controller.value()
    }

    /// Divider position as a fraction of the width
    pub fn fraction(&self) -> f32 {
        let width = self.width();
        if width > 0.0 {
            self.position() / width
        } else {
            self.config.initial_value
        }
    }

    pub fn label_opacity(&self) -> f32 {
        self.label_opacity.get()
    }

    pub fn controller(&self) -> &SnapController<FreePolicy> {
        &self.controller
    }

    fn update_labels(&mut self) {
        let position = self.position();
        let margin = self.config.label_edge_margin;
        let near_edge = position < margin || position > self.width() - margin;
        let target = if near_edge { 0.0 } else { 1.0 };
        if self.label_opacity.target() != target {
            self.label_opacity.animate_to(
                target,
                Motion::Timing {
                    duration_ms: self.config.label_fade_ms,
                    easing: Easing::STANDARD,
                },
            );
        }
    }

    fn on_gesture(&mut self, event: &Event) {
        let EventData::Drag {
            x,
            translation_x,
            velocity_x,
            ..
        } = event.data
        else {
            if event.event_type == GESTURE_CANCEL {
                self.controller.cancel();
            }
            return;
        };

        match event.event_type {
            DRAG_START => {
                let extent = self.controller.extent();
                if self.controller.begin(extent, x - translation_x) {
                    self.controller.update(translation_x);
                }
            }
            DRAG => self.controller.update(translation_x),
            DRAG_END => {
                self.controller.end(translation_x, velocity_x);
            }
            _ => {}
        }
    }
}

impl Widget for ImageComparer {
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
        self.update_labels();
    }

    fn tick(&mut self) {
        self.controller.tick();
        self.label_opacity.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(ctx: &WidgetContext, comparer: &mut ImageComparer) {
        for _ in 0..30 {
            ctx.advance(1.0 / 60.0);
            comparer.tick();
        }
    }

    #[test]
    fn test_first_layout_places_divider() {
        let mut ctx = WidgetContext::new();
        let config = ImageComparerConfig {
            initial_value: 0.25,
            ..Default::default()
        };
        let mut comparer = ImageComparer::with_config(&mut ctx, config);
        assert_eq!(comparer.fraction(), 0.25);

        comparer.handle_event(&Event::resize(400.0, 300.0));
        assert_eq!(comparer.position(), 100.0);

        // Later layouts leave the divider alone
        comparer.handle_event(&Event::resize(800.0, 300.0));
        assert_eq!(comparer.width(), 400.0);
        assert_eq!(comparer.position(), 100.0);
    }

    #[test]
    fn test_divider_jumps_to_touch_and_clamps() {
        let mut ctx = WidgetContext::new();
        let mut comparer = ImageComparer::new(&mut ctx);
        comparer.handle_event(&Event::resize(400.0, 300.0));

        comparer.handle_event(&Event::pointer_down(1, 300.0, 150.0).at(0));
        assert_eq!(comparer.position(), 300.0);

        comparer.handle_event(&Event::pointer_move(1, 520.0, 150.0).at(16));
        assert_eq!(comparer.position(), 400.0);

        comparer.handle_event(&Event::pointer_move(1, 120.0, 150.0).at(32));
        comparer.handle_event(&Event::pointer_up(1, 120.0, 150.0).at(48));
        run(&ctx, &mut comparer);
        assert_eq!(comparer.position(), 120.0);
        assert_eq!(comparer.controller().committed(), Some(120.0));
    }

    #[test]
    fn test_labels_fade_near_edges() {
        let mut ctx = WidgetContext::new();
        let mut comparer = ImageComparer::new(&mut ctx);
        comparer.handle_event(&Event::resize(400.0, 300.0));
        assert_eq!(comparer.label_opacity(), 1.0);

        comparer.handle_event(&Event::pointer_down(1, 390.0, 150.0).at(0));
        run(&ctx, &mut comparer);
        assert_eq!(comparer.label_opacity(), 0.0);

        comparer.handle_event(&Event::pointer_move(1, 200.0, 150.0).at(600));
        run(&ctx, &mut comparer);
        assert_eq!(comparer.label_opacity(), 1.0);
    }
}
