//! Controller interaction states

use aura_core::events::event_types::{DRAG_END, DRAG_START, GESTURE_CANCEL, TAP};
use aura_core::fsm::StateTransitions;
use aura_core::EventType;

/// Controller-internal events (beyond the shared gesture vocabulary)
pub mod controller_events {
    use aura_core::EventType;

    /// Settle animation reached a resting target
    pub const SETTLED: EventType = 100;
    /// Settle animation reached a terminal commit
    pub const SETTLED_TERMINAL: EventType = 101;
    /// Imperative animation requested by the embedding widget
    pub const ANIMATE: EventType = 102;
}

/// `Idle → Dragging → {Settling → Idle, Committed}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControllerState {
    /// No session; the last settled value is the base for the next one
    #[default]
    Idle,
    /// Live updates from motion samples
    Dragging,
    /// Animating toward a decided target; a new gesture pre-empts it
    Settling,
    /// Terminal commit. Absorbing: no further gestures.
    Committed,
}

impl ControllerState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, ControllerState::Dragging)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ControllerState::Committed)
    }
}

impl StateTransitions for ControllerState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use controller_events::*;
        use ControllerState::*;
        match (self, event) {
            (Idle | Settling | Dragging, DRAG_START) => Some(Dragging),
            (Dragging, DRAG_END) => Some(Settling),
            (Dragging, GESTURE_CANCEL) => Some(Settling),
            (Idle | Settling, TAP) => Some(Settling),
            (Idle | Settling, ANIMATE) => Some(Settling),
            (Settling, SETTLED) => Some(Idle),
            (Settling, SETTLED_TERMINAL) => Some(Committed),
            (Committed, _) => None,
            _ => None,
        }
    }
}
