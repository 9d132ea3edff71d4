//! Gesture event vocabulary
//!
//! Raw pointer samples come in from the host platform; recognizers turn them
//! into drag, tap and pinch events that widgets consume. Both share the same
//! `Event` envelope so a host with its own recognizers can skip ours and feed
//! recognized gestures directly.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    /// The platform took the pointer away (system gesture, palm rejection)
    pub const POINTER_CANCEL: EventType = 4;

    /// Pan recognizer crossed its activation distance
    pub const DRAG_START: EventType = 5;
    /// Pan movement sample (cumulative translation since start)
    pub const DRAG: EventType = 6;
    /// Pan released (carries release velocity)
    pub const DRAG_END: EventType = 7;
    /// Discrete tap
    pub const TAP: EventType = 8;

    pub const PINCH_START: EventType = 31;
    /// Pinch zoom gesture update
    pub const PINCH: EventType = 32;
    pub const PINCH_END: EventType = 33;

    /// A competing recognizer claimed the touch sequence
    pub const GESTURE_CANCEL: EventType = 34;

    /// Layout measured (width/height of the widget's container)
    pub const RESIZE: EventType = 40;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;

    /// Whether the event is a raw pointer sample rather than a recognized gesture
    pub const fn is_pointer(event_type: EventType) -> bool {
        matches!(
            event_type,
            POINTER_DOWN | POINTER_UP | POINTER_MOVE | POINTER_CANCEL
        )
    }
}

/// A UI event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub target: u64, // Widget ID
    pub data: EventData,
    /// Milliseconds on the host's monotonic clock
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        pointer_id: u32,
        x: f32,
        y: f32,
    },
    /// Pan sample. `x`/`y` are the pointer position in widget space,
    /// translations are cumulative since the pan started.
    Drag {
        x: f32,
        y: f32,
        translation_x: f32,
        translation_y: f32,
        velocity_x: f32,
        velocity_y: f32,
    },
    Tap {
        x: f32,
        y: f32,
    },
    /// Pinch sample. `scale` is cumulative since the pinch started (1.0 = no change).
    Pinch {
        scale: f32,
        focal_x: f32,
        focal_y: f32,
        velocity: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    None,
}

impl Event {
    /// Create an event with no target and a zero timestamp
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            target: 0,
            data,
            timestamp: 0,
        }
    }

    /// Set the timestamp (milliseconds)
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the target widget id
    pub fn to_target(mut self, target: u64) -> Self {
        self.target = target;
        self
    }

    pub fn pointer_down(pointer_id: u32, x: f32, y: f32) -> Self {
        Self::new(
            event_types::POINTER_DOWN,
            EventData::Pointer { pointer_id, x, y },
        )
    }

    pub fn pointer_move(pointer_id: u32, x: f32, y: f32) -> Self {
        Self::new(
            event_types::POINTER_MOVE,
            EventData::Pointer { pointer_id, x, y },
        )
    }

    pub fn pointer_up(pointer_id: u32, x: f32, y: f32) -> Self {
        Self::new(
            event_types::POINTER_UP,
            EventData::Pointer { pointer_id, x, y },
        )
    }

    pub fn pointer_cancel(pointer_id: u32) -> Self {
        Self::new(
            event_types::POINTER_CANCEL,
            EventData::Pointer {
                pointer_id,
                x: 0.0,
                y: 0.0,
            },
        )
    }

    /// Horizontal drag sample at pointer `x` with cumulative `translation_x`
    pub fn drag_x(event_type: EventType, x: f32, translation_x: f32, velocity_x: f32) -> Self {
        Self::new(
            event_type,
            EventData::Drag {
                x,
                y: 0.0,
                translation_x,
                translation_y: 0.0,
                velocity_x,
                velocity_y: 0.0,
            },
        )
    }

    /// Vertical drag sample at pointer `y` with cumulative `translation_y`
    pub fn drag_y(event_type: EventType, y: f32, translation_y: f32, velocity_y: f32) -> Self {
        Self::new(
            event_type,
            EventData::Drag {
                x: 0.0,
                y,
                translation_x: 0.0,
                translation_y,
                velocity_x: 0.0,
                velocity_y,
            },
        )
    }

    pub fn tap(x: f32, y: f32) -> Self {
        Self::new(event_types::TAP, EventData::Tap { x, y })
    }

    pub fn pinch(event_type: EventType, scale: f32) -> Self {
        Self::new(
            event_type,
            EventData::Pinch {
                scale,
                focal_x: 0.0,
                focal_y: 0.0,
                velocity: 0.0,
            },
        )
    }

    pub fn resize(width: f32, height: f32) -> Self {
        Self::new(event_types::RESIZE, EventData::Resize { width, height })
    }

    pub fn gesture_cancel() -> Self {
        Self::new(event_types::GESTURE_CANCEL, EventData::None)
    }

    /// Whether this is a raw pointer sample
    pub fn is_pointer(&self) -> bool {
        event_types::is_pointer(self.event_type)
    }
}
