//! State Machine Runtime
//!
//! Flat state machines for gesture interaction states. The state type is a
//! user enum that maps `(state, event)` pairs to transitions by implementing
//! [`StateTransitions`]; [`StateMachine`] wraps it and keeps the most recent
//! transitions for debugging and tests.
//!
//! ```ignore
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
//! enum Phase {
//!     #[default]
//!     Idle,
//!     Dragging,
//! }
//!
//! impl StateTransitions for Phase {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         use aura_core::events::event_types::*;
//!         match (self, event) {
//!             (Phase::Idle, DRAG_START) => Some(Phase::Dragging),
//!             (Phase::Dragging, DRAG_END) => Some(Phase::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use crate::events::EventType;

/// Transitions kept in [`StateMachine::history`]; older ones are dropped
pub const HISTORY_LIMIT: usize = 32;

/// Trait for state types that can handle event transitions
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Send + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// A state machine instance over a user-defined state type
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    history: VecDeque<(S, EventType, S)>,
}

impl<S: StateTransitions> StateMachine<S> {
    /// Create a new state machine in `initial_state`
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// The last [`HISTORY_LIMIT`] transitions, oldest first
    pub fn history(&self) -> &VecDeque<(S, EventType, S)> {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.current_state.on_event(event).is_some()
    }

    /// Send an event to the state machine, potentially triggering a transition.
    ///
    /// Returns the new state when a transition happened.
    pub fn send(&mut self, event: EventType) -> Option<S> {
        let current = self.current_state;
        let to_state = current.on_event(event)?;

        self.current_state = to_state;
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back((current, event, to_state));
        tracing::trace!(from = ?current, event, to = ?to_state, "fsm transition");

        Some(to_state)
    }

    /// Force the machine into `state` without recording a transition.
    ///
    /// Used when a controller resets (e.g. re-enabling a disabled widget).
    pub fn reset(&mut self, state: S) {
        self.current_state = state;
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: StateTransitions> Debug for StateMachine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current_state", &self.current_state)
            .field("history_len", &self.history.len())
            .finish()
    }
}
