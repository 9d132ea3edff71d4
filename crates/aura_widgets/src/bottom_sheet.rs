//! Bottom sheet with multi-snap-point physics
//!
//! The sheet's position is its top edge, measured from the top of the
//! screen: `screen_height` is fully closed (off-screen) and smaller values
//! reveal more of the sheet.

use aura_animation::{Motion, SpringConfig};
use aura_core::events::event_types::{DRAG, DRAG_END, DRAG_START, GESTURE_CANCEL, RESIZE};
use aura_core::events::{Event, EventData};
use aura_gestures::{
    GestureArbiter, Recognizer, SheetSnap, SnapController, SnapPointsConfig, SnapPointsPolicy,
};
use serde::{Deserialize, Serialize};

use crate::context::WidgetContext;
use crate::widget::{Widget, WidgetId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BottomSheetConfig {
    pub snap: SnapPointsConfig,
    /// Snap point the sheet opens to on mount (clamped to the last point)
    pub initial_snap_index: usize,
    /// Duration of the opening animation on mount
    pub mount_duration_ms: u32,
}

impl Default for BottomSheetConfig {
    fn default() -> Self {
        Self {
            snap: SnapPointsConfig::default(),
            initial_snap_index: 0,
            mount_duration_ms: 300,
        }
    }
}

impl BottomSheetConfig {
    pub fn snap_points(mut self, points: &[f32]) -> Self {
        self.snap = self.snap.with_snap_points(points);
        self
    }

    pub fn initial_snap_index(mut self, index: usize) -> Self {
        self.initial_snap_index = index;
        self
    }

    pub fn spring(mut self, spring: SpringConfig) -> Self {
        self.snap = self.snap.with_spring(spring);
        self
    }
}

pub struct BottomSheet {
    id: WidgetId,
    config: BottomSheetConfig,
    controller: SnapController<SnapPointsPolicy>,
    arbiter: GestureArbiter,
    active: bool,
    /// `mount()` was called before the screen was measured
    mount_pending: bool,
}

impl BottomSheet {
    pub fn new(ctx: &mut WidgetContext) -> Self {
        Self::with_config(ctx, BottomSheetConfig::default())
    }

    pub fn with_config(ctx: &mut WidgetContext, config: BottomSheetConfig) -> Self {
        let id = ctx.register_widget("bottom_sheet");
        let policy = SnapPointsPolicy::new(config.snap.clone());
        Self {
            id,
            config,
            controller: SnapController::with_scheduler(policy, ctx.scheduler()),
            arbiter: GestureArbiter::new().with(Recognizer::pan()),
            active: false,
            mount_pending: false,
        }
    }

    /// Called whenever a snap settles, with the snap it settled on
    pub fn on_snap<F: FnMut(SheetSnap) + Send + 'static>(mut self, callback: F) -> Self {
        self.controller.on_commit(callback);
        self
    }

    pub fn screen_height(&self) -> f32 {
        self.controller.extent()
    }

    /// Top edge of the sheet
    pub fn translate_y(&self) -> f32 {
        self.controller.value()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_snap(&self) -> Option<SheetSnap> {
        self.controller.committed()
    }

    pub fn controller(&self) -> &SnapController<SnapPointsPolicy> {
        &self.controller
    }

    /// Record the measured screen height.
    ///
    /// A resting sheet keeps its snap; a mount requested before the first
    /// measurement runs now.
    pub fn set_layout(&mut self, screen_height: f32) {
        if !screen_height.is_finite() || screen_height <= 0.0 {
            return;
        }
        self.controller.set_extent(screen_height);

        if self.mount_pending {
            self.mount_pending = false;
            self.controller.jump_to(screen_height, None);
            self.mount();
            return;
        }
        if self.controller.is_dragging() || self.controller.is_settling() {
            return;
        }
        let snap = self.controller.committed().unwrap_or(SheetSnap::Closed);
        let position = self.controller.policy().position_of(snap, screen_height);
        self.controller.jump_to(position, None);
    }

    /// Open to the initial snap point with a timed animation
    pub fn mount(&mut self) {
        let extent = self.controller.extent();
        if extent <= 0.0 {
            self.mount_pending = true;
            return;
        }
        let last = self.controller.policy().point_count() - 1;
        let snap = SheetSnap::Point(self.config.initial_snap_index.min(last));
        let target = self.controller.policy().position_of(snap, extent);
        let motion = Motion::timing(self.config.mount_duration_ms);
        if self.controller.animate_to(target, Some(snap), motion) {
            self.active = true;
        }
    }

    /// Spring the top edge to `position` (clamped to the screen)
    pub fn scroll_to(&mut self, position: f32) -> bool {
        let extent = self.controller.extent();
        if extent <= 0.0 || !position.is_finite() {
            return false;
        }
        let position = position.clamp(0.0, extent);
        let spring = self.config.snap.spring;
        let moved = self.controller.animate_to(position, None, spring);
        if moved {
            self.active = position < extent;
        }
        moved
    }

    /// Spring to snap point `index` (clamped to the last point)
    pub fn snap_to(&mut self, index: usize) -> bool {
        let extent = self.controller.extent();
        if extent <= 0.0 {
            return false;
        }
        let last = self.controller.policy().point_count() - 1;
        let snap = SheetSnap::Point(index.min(last));
        let target = self.controller.policy().position_of(snap, extent);
        let spring = self.config.snap.spring;
        let moved = self.controller.animate_to(target, Some(snap), spring);
        if moved {
            self.active = true;
        }
        moved
    }

    pub fn close(&mut self) -> bool {
        let extent = self.controller.extent();
        if extent <= 0.0 {
            return false;
        }
        let spring = self.config.snap.spring;
        let moved = self
            .controller
            .animate_to(extent, Some(SheetSnap::Closed), spring);
        if moved {
            self.active = false;
        }
        moved
    }

    fn on_gesture(&mut self, event: &Event) {
        let EventData::Drag {
            translation_y,
            velocity_y,
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
                let base = self.controller.value();
                if self.controller.begin(self.controller.extent(), base) {
                    self.controller.update(translation_y);
                }
            }
            DRAG => self.controller.update(translation_y),
            DRAG_END => {
                if let Some(decision) = self.controller.end(translation_y, velocity_y) {
                    self.active = decision.outcome.is_open();
                }
            }
            _ => {}
        }
    }
}

impl Widget for BottomSheet {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn handle_event(&mut self, event: &Event) {
        if let (RESIZE, EventData::Resize { height, .. }) = (event.event_type, &event.data) {
            self.set_layout(*height);
            return;
        }
        for gesture in self.arbiter.handle(event) {
            self.on_gesture(&gesture);
        }
    }

    fn tick(&mut self) {
        if let Some(event) = self.controller.tick() {
            tracing::trace!(?event, "sheet settled");
        }
    }
}
