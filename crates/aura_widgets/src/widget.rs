//! Base widget trait and types

use aura_core::events::Event;
use slotmap::new_key_type;

new_key_type! {
    pub struct WidgetId;
}

/// Base trait for all widgets
pub trait Widget {
    /// Get the widget's unique ID
    fn id(&self) -> WidgetId;

    /// Handle a pointer sample, recognized gesture, or layout event
    fn handle_event(&mut self, event: &Event);

    /// Pull animation state for the frame and fire settle callbacks.
    ///
    /// Call after the scheduler has advanced.
    fn tick(&mut self);
}
