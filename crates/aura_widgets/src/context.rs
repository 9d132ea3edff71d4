//! Shared state for a tree of widgets

use aura_animation::{AnimationScheduler, SharedScheduler};
use slotmap::SlotMap;

use crate::widget::WidgetId;

/// Owns the animation scheduler and hands out widget ids
pub struct WidgetContext {
    scheduler: SharedScheduler,
    widgets: SlotMap<WidgetId, &'static str>,
}

impl WidgetContext {
    pub fn new() -> Self {
        Self::with_scheduler(AnimationScheduler::shared())
    }

    pub fn with_scheduler(scheduler: SharedScheduler) -> Self {
        Self {
            scheduler,
            widgets: SlotMap::with_key(),
        }
    }

    pub fn scheduler(&self) -> &SharedScheduler {
        &self.scheduler
    }

    /// Register a widget of `kind`, returning its id
    pub fn register_widget(&mut self, kind: &'static str) -> WidgetId {
        let id = self.widgets.insert(kind);
        tracing::trace!(?id, kind, "widget registered");
        id
    }

    pub fn unregister_widget(&mut self, id: WidgetId) -> bool {
        self.widgets.remove(id).is_some()
    }

    pub fn widget_kind(&self, id: WidgetId) -> Option<&'static str> {
        self.widgets.get(id).copied()
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Advance every animation by `dt` seconds. Returns whether any
    /// animation is still running.
    pub fn advance(&self, dt: f32) -> bool {
        let mut scheduler = self.scheduler.lock();
        scheduler.tick_dt(dt);
        scheduler.has_active_animations()
    }
}

impl Default for WidgetContext {
    fn default() -> Self {
        Self::new()
    }
}
