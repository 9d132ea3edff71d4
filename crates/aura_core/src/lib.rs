//! Aura Core
//!
//! Foundational primitives shared by the Aura gesture and widget crates:
//!
//! - **Events**: pointer samples and recognized gestures (drag, tap, pinch)
//! - **State Machines**: enum-driven transitions with a bounded history
//! - **Errors**: configuration validation errors
//!
//! # Example
//!
//! ```rust
//! use aura_core::events::event_types::*;
//! use aura_core::fsm::{StateMachine, StateTransitions};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Toggle {
//!     Off,
//!     On,
//! }
//!
//! impl StateTransitions for Toggle {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Toggle::Off, TAP) => Some(Toggle::On),
//!             (Toggle::On, TAP) => Some(Toggle::Off),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut fsm = StateMachine::new(Toggle::Off);
//! fsm.send(TAP);
//! assert_eq!(fsm.current_state(), Toggle::On);
//! ```

pub mod error;
pub mod events;
pub mod fsm;

pub use error::{ConfigError, Result};
pub use events::{Event, EventData, EventType};
pub use fsm::{StateMachine, StateTransitions};
