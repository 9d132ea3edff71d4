//! Swipe-to-confirm button
//!
//! The thumb travels along a track of `width - height` and confirms when
//! released past the threshold (70% by default). `on_complete` fires once
//! the confirm animation has finished.

use aura_animation::{interpolate, Extrapolation};
use aura_core::events::event_types::{DRAG, DRAG_END, DRAG_START, GESTURE_CANCEL, RESIZE};
use aura_core::events::{Event, EventData};
use aura_gestures::{
    GestureArbiter, Recognizer, SettleEvent, SnapController, SwipeOutcome, ThresholdConfig,
    ThresholdPolicy,
};
use serde::{Deserialize, Serialize};

use crate::context::WidgetContext;
use crate::widget::{Widget, WidgetId};

pub const DEFAULT_HEIGHT: f32 = 56.0;

/// SwipeButton configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeButtonConfig {
    /// Label shown before confirming
    pub title: String,
    /// Label shown once confirmed
    pub completed_title: String,
    /// Track height; the thumb is a `height` square
    pub height: f32,
    pub disabled: bool,
    pub threshold: ThresholdConfig,
}

impl Default for SwipeButtonConfig {
    fn default() -> Self {
        Self {
            title: "Slide to Confirm".to_string(),
            completed_title: "Confirmed".to_string(),
            height: DEFAULT_HEIGHT,
            disabled: false,
            threshold: ThresholdConfig::default(),
        }
    }
}

impl SwipeButtonConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn completed_title(mut self, title: impl Into<String>) -> Self {
        self.completed_title = title.into();
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Render-ready values for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeVisuals {
    pub thumb_x: f32,
    /// Width of the fill behind the thumb
    pub active_width: f32,
    pub active_opacity: f32,
    pub label_opacity: f32,
    pub label_shift: f32,
}

pub struct SwipeButton {
    id: WidgetId,
    config: SwipeButtonConfig,
    controller: SnapController<ThresholdPolicy>,
    arbiter: GestureArbiter,
    layout_width: f32,
    completed: bool,
    on_complete: Option<Box<dyn FnMut() + Send>>,
}

impl SwipeButton {
    pub fn new(ctx: &mut WidgetContext, title: impl Into<String>) -> Self {
        Self::with_config(ctx, SwipeButtonConfig::new(title))
    }

    pub fn with_config(ctx: &mut WidgetContext, config: SwipeButtonConfig) -> Self {
        let id = ctx.register_widget("swipe_button");
        let policy = ThresholdPolicy::new(config.threshold);
        Self {
            id,
            controller: SnapController::with_scheduler(policy, ctx.scheduler()),
            arbiter: GestureArbiter::new().with(Recognizer::pan()),
            config,
            layout_width: 0.0,
            completed: false,
            on_complete: None,
        }
    }

    /// Set the completion callback
    pub fn on_complete<F: FnMut() + Send + 'static>(mut self, callback: F) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        if disabled {
            self.controller.cancel();
        }
    }

    /// Record the measured track width
    pub fn set_layout(&mut self, width: f32) {
        self.layout_width = width.max(0.0);
        self.controller.set_extent(self.max_translate());
    }

    /// Thumb travel: the track minus the thumb itself
    pub fn max_translate(&self) -> f32 {
        (self.layout_width - self.config.height).max(0.0)
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether the release confirmed, even if the thumb is still moving
    pub fn is_confirmed(&self) -> bool {
        self.controller.committed() == Some(SwipeOutcome::Confirmed)
    }

    pub fn label(&self) -> &str {
        if self.completed {
            &self.config.completed_title
        } else {
            &self.config.title
        }
    }

    pub fn controller(&self) -> &SnapController<ThresholdPolicy> {
        &self.controller
    }

    pub fn visuals(&self) -> SwipeVisuals {
        let offset = self.controller.value();
        let max = self.max_translate();
        SwipeVisuals {
            thumb_x: offset,
            active_width: offset + self.config.height,
            active_opacity: interpolate(offset, &[0.0, max], &[0.1, 1.0], Extrapolation::Clamp),
            label_opacity: interpolate(offset, &[0.0, max / 2.0], &[1.0, 0.0], Extrapolation::Clamp),
            label_shift: interpolate(offset, &[0.0, max], &[0.0, 20.0], Extrapolation::Clamp),
        }
    }

    fn on_gesture(&mut self, event: &Event) {
        let EventData::Drag {
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
                if self.config.disabled || self.completed {
                    return;
                }
                let base = self.controller.value();
                if self.controller.begin(self.max_translate(), base) {
                    self.controller.update(translation_x);
                }
            }
            DRAG => self.controller.update(translation_x),
            DRAG_END => {
                if let Some(decision) = self.controller.end(translation_x, velocity_x) {
                    tracing::debug!(outcome = ?decision.outcome, "swipe released");
                }
            }
            _ => {}
        }
    }
}

impl Widget for SwipeButton {
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
        if let Some(SettleEvent::Committed(SwipeOutcome::Confirmed)) = self.controller.tick() {
            self.completed = true;
            if let Some(ref mut callback) = self.on_complete {
                callback();
            }
        }
    }
}
