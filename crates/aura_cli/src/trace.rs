//! Recorded pointer traces
//!
//! A trace is a JSON document listing raw pointer samples with millisecond
//! timestamps:
//!
//! ```json
//! {
//!   "events": [
//!     { "t": 0,   "type": "down", "pointer": 1, "x": 20.0, "y": 28.0 },
//!     { "t": 16,  "type": "move", "pointer": 1, "x": 60.0, "y": 28.0 },
//!     { "t": 120, "type": "up",   "pointer": 1, "x": 290.0, "y": 28.0 }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use aura_core::Event;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Trace {
    pub events: Vec<TraceEvent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TraceEvent {
    /// Milliseconds since the start of the recording
    pub t: u64,
    #[serde(flatten)]
    pub input: TraceInput,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceInput {
    Down { pointer: u32, x: f32, y: f32 },
    Move { pointer: u32, x: f32, y: f32 },
    Up { pointer: u32, x: f32, y: f32 },
    Cancel { pointer: u32 },
    Resize { width: f32, height: f32 },
}

impl TraceEvent {
    pub fn to_event(&self) -> Event {
        let event = match self.input {
            TraceInput::Down { pointer, x, y } => Event::pointer_down(pointer, x, y),
            TraceInput::Move { pointer, x, y } => Event::pointer_move(pointer, x, y),
            TraceInput::Up { pointer, x, y } => Event::pointer_up(pointer, x, y),
            TraceInput::Cancel { pointer } => Event::pointer_cancel(pointer),
            TraceInput::Resize { width, height } => Event::resize(width, height),
        };
        event.at(self.t)
    }
}

impl Trace {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse a trace, ordering samples by timestamp
    pub fn from_json(content: &str) -> Result<Self> {
        let mut trace: Trace = serde_json::from_str(content)?;
        // Stable, so samples sharing a timestamp keep their recorded order
        trace.events.sort_by_key(|e| e.t);
        Ok(trace)
    }

    /// Timestamp of the last sample
    pub fn duration_ms(&self) -> u64 {
        self.events.last().map_or(0, |e| e.t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_core::events::event_types::{POINTER_DOWN, POINTER_UP, RESIZE};

    #[test]
    fn test_parse_and_order() {
        let trace = Trace::from_json(
            r#"{"events": [
                {"t": 40, "type": "up", "pointer": 1, "x": 5.0, "y": 0.0},
                {"t": 0, "type": "down", "pointer": 1, "x": 0.0, "y": 0.0},
                {"t": 0, "type": "resize", "width": 300.0, "height": 50.0}
            ]}"#,
        )
        .unwrap();

        let types: Vec<_> = trace.events.iter().map(|e| e.to_event().event_type).collect();
        assert_eq!(types, vec![POINTER_DOWN, RESIZE, POINTER_UP]);
        assert_eq!(trace.duration_ms(), 40);
        assert_eq!(trace.events[2].to_event().timestamp, 40);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = Trace::from_json(r#"{"events": [{"t": 0, "type": "hover"}]}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_fixtures_parse() {
        for fixture in [
            include_str!("../fixtures/swipe_confirm.json"),
            include_str!("../fixtures/sheet_fling.json"),
            include_str!("../fixtures/pinch_zoom.json"),
        ] {
            let trace = Trace::from_json(fixture).unwrap();
            assert!(!trace.events.is_empty());
        }
    }
}
