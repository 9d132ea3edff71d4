//! Gesture recognition and arbitration
//!
//! A [`GestureArbiter`] turns raw pointer samples into recognized gesture
//! events (`DRAG_*`, `TAP`, `PINCH_*`). Recognizers are tried in the order
//! they were added; the first one whose activation criteria are met claims
//! the touch sequence and every other recognizer is ignored until all
//! pointers lift. A tap only activates on pointer-up, so it can never fire
//! after a pan or pinch has claimed the sequence.

use aura_core::events::event_types::{
    DRAG, DRAG_END, DRAG_START, PINCH, PINCH_END, PINCH_START, POINTER_CANCEL, POINTER_DOWN,
    POINTER_MOVE, POINTER_UP,
};
use aura_core::{Event, EventData, EventType};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Output of one pointer sample (rarely more than a start + update pair)
pub type Recognized = SmallVec<[Event; 2]>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recognizer {
    /// Single-pointer drag once the pointer travels `min_distance`.
    /// Zero activates on touch down.
    Pan { min_distance: f32 },
    /// Pointer lifted within `max_distance` of where it went down, no later
    /// than `max_duration_ms`
    Tap {
        max_distance: f32,
        max_duration_ms: u64,
    },
    /// Two pointers whose spread changed by at least `min_scale_delta`
    Pinch { min_scale_delta: f32 },
}

impl Recognizer {
    pub const fn pan() -> Self {
        Recognizer::Pan { min_distance: 10.0 }
    }

    pub const fn tap() -> Self {
        Recognizer::Tap {
            max_distance: 10.0,
            max_duration_ms: 500,
        }
    }

    pub const fn pinch() -> Self {
        Recognizer::Pinch {
            min_scale_delta: 0.05,
        }
    }
}

/// Exponential moving average of pointer speed
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityTracker {
    velocity_x: f32,
    velocity_y: f32,
    last: Option<(f32, f32, u64)>,
}

impl VelocityTracker {
    /// Smoothing factor
    const ALPHA: f32 = 0.3;

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Velocity in units/second
    pub fn velocity(&self) -> (f32, f32) {
        (self.velocity_x, self.velocity_y)
    }

    pub fn record(&mut self, x: f32, y: f32, timestamp_ms: u64) {
        if let Some((last_x, last_y, last_time)) = self.last {
            // Samples without a usable clock are assumed to be one 60 Hz frame apart
            let dt_seconds = if timestamp_ms > last_time {
                (timestamp_ms - last_time) as f32 / 1000.0
            } else {
                1.0 / 60.0
            };
            if dt_seconds < 0.5 {
                let instant_vx = (x - last_x) / dt_seconds;
                let instant_vy = (y - last_y) / dt_seconds;
                self.velocity_x = self.velocity_x * (1.0 - Self::ALPHA) + instant_vx * Self::ALPHA;
                self.velocity_y = self.velocity_y * (1.0 - Self::ALPHA) + instant_vy * Self::ALPHA;
            }
        }
        self.last = Some((x, y, timestamp_ms));
    }
}

#[derive(Debug, Clone, Copy)]
struct TrackedPointer {
    id: u32,
    x: f32,
    y: f32,
}

/// Bookkeeping for the touch sequence in progress
#[derive(Debug, Clone, Default)]
struct Sequence {
    pointers: SmallVec<[TrackedPointer; 2]>,
    /// First pointer's down position
    start: (f32, f32),
    down_at: u64,
    /// Largest distance the first pointer travelled from `start`
    max_travel: f32,
    max_pointers: usize,
    /// Spread between the first two pointers when the second went down
    pinch_spread: f32,
    /// Recognizer that claimed the sequence
    claimed: Option<usize>,
    /// Claimed gesture has ended but pointers are still down
    finished: bool,
}

impl Sequence {
    fn primary(&self) -> Option<TrackedPointer> {
        self.pointers.first().copied()
    }

    fn spread(&self) -> Option<f32> {
        match self.pointers.as_slice() {
            [a, b, ..] => Some(((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()),
            _ => None,
        }
    }

    fn pinch_scale(&self) -> Option<f32> {
        let spread = self.spread()?;
        (self.pinch_spread > 0.0).then(|| spread / self.pinch_spread)
    }

    fn focal(&self) -> (f32, f32) {
        match self.pointers.as_slice() {
            [a, b, ..] => ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0),
            [a] => (a.x, a.y),
            [] => self.start,
        }
    }
}

/// Priority-ordered exclusive composition of recognizers
#[derive(Debug, Clone, Default)]
pub struct GestureArbiter {
    recognizers: SmallVec<[Recognizer; 3]>,
    sequence: Sequence,
    velocity: VelocityTracker,
}

impl GestureArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a recognizer at the lowest priority so far
    pub fn with(mut self, recognizer: Recognizer) -> Self {
        self.recognizers.push(recognizer);
        self
    }

    pub fn recognizers(&self) -> &[Recognizer] {
        &self.recognizers
    }

    /// The recognizer that owns the current sequence, if any
    pub fn claimed(&self) -> Option<Recognizer> {
        self.sequence
            .claimed
            .and_then(|index| self.recognizers.get(index).copied())
    }

    /// Feed one event. Pointer samples produce zero or more recognized
    /// events; anything else is passed through untouched.
    pub fn handle(&mut self, event: &Event) -> Recognized {
        let mut out = Recognized::new();
        match (event.event_type, &event.data) {
            (POINTER_DOWN, &EventData::Pointer { pointer_id, x, y }) => {
                self.pointer_down(pointer_id, x, y, event.timestamp, &mut out)
            }
            (POINTER_MOVE, &EventData::Pointer { pointer_id, x, y }) => {
                self.pointer_move(pointer_id, x, y, event.timestamp, &mut out)
            }
            (POINTER_UP, &EventData::Pointer { pointer_id, x, y }) => {
                self.pointer_up(pointer_id, x, y, event.timestamp, &mut out)
            }
            (POINTER_CANCEL, _) => self.pointer_cancel(event.timestamp, &mut out),
            _ if event.is_pointer() => {
                tracing::debug!(event_type = event.event_type, "pointer event without pointer data");
            }
            _ => out.push(event.clone()),
        }
        for recognized in out.iter_mut() {
            recognized.target = event.target;
        }
        out
    }

    fn pointer_down(&mut self, id: u32, x: f32, y: f32, ts: u64, out: &mut Recognized) {
        if self.sequence.pointers.is_empty() {
            self.sequence = Sequence {
                start: (x, y),
                down_at: ts,
                ..Sequence::default()
            };
            self.velocity.reset();
            self.velocity.record(x, y, ts);
        }
        if self.sequence.pointers.iter().any(|p| p.id == id) {
            return;
        }
        self.sequence.pointers.push(TrackedPointer { id, x, y });
        self.sequence.max_pointers = self.sequence.max_pointers.max(self.sequence.pointers.len());

        if self.sequence.pointers.len() == 2 {
            self.sequence.pinch_spread = self.sequence.spread().unwrap_or(0.0);
        }

        if self.sequence.claimed.is_none() {
            self.try_activate(ts, out);
        }
    }

    fn pointer_move(&mut self, id: u32, x: f32, y: f32, ts: u64, out: &mut Recognized) {
        let Some(pointer) = self.sequence.pointers.iter_mut().find(|p| p.id == id) else {
            return;
        };
        pointer.x = x;
        pointer.y = y;

        let is_primary = self.sequence.primary().map(|p| p.id) == Some(id);
        if is_primary {
            let (sx, sy) = self.sequence.start;
            let travel = ((x - sx).powi(2) + (y - sy).powi(2)).sqrt();
            self.sequence.max_travel = self.sequence.max_travel.max(travel);
            self.velocity.record(x, y, ts);
        }

        if self.sequence.finished {
            return;
        }
        match self.claimed() {
            Some(Recognizer::Pan { .. }) if is_primary => out.push(self.drag_event(DRAG, ts)),
            Some(Recognizer::Pinch { .. }) => {
                if let Some(event) = self.pinch_event(PINCH, ts) {
                    out.push(event);
                }
            }
            Some(_) => {}
            None => self.try_activate(ts, out),
        }
    }

    fn pointer_up(&mut self, id: u32, x: f32, y: f32, ts: u64, out: &mut Recognized) {
        let Some(index) = self.sequence.pointers.iter().position(|p| p.id == id) else {
            return;
        };
        let was_primary = index == 0;
        self.sequence.pointers[index].x = x;
        self.sequence.pointers[index].y = y;
        if was_primary {
            self.velocity.record(x, y, ts);
        }

        if !self.sequence.finished {
            match self.claimed() {
                Some(Recognizer::Pan { .. }) if was_primary => {
                    out.push(self.drag_event(DRAG_END, ts));
                    self.sequence.finished = true;
                }
                Some(Recognizer::Pinch { .. }) if self.sequence.pointers.len() == 2 => {
                    if let Some(event) = self.pinch_event(PINCH_END, ts) {
                        out.push(event);
                    }
                    self.sequence.finished = true;
                }
                Some(_) => {}
                None if self.sequence.pointers.len() == 1 => self.try_tap(x, y, ts, out),
                None => {}
            }
        }

        self.sequence.pointers.remove(index);
        if self.sequence.pointers.is_empty() {
            self.sequence = Sequence::default();
        }
    }

    fn pointer_cancel(&mut self, ts: u64, out: &mut Recognized) {
        if self.sequence.claimed.is_some() && !self.sequence.finished {
            out.push(Event::gesture_cancel().at(ts));
        }
        self.sequence = Sequence::default();
        self.velocity.reset();
    }

    fn try_activate(&mut self, ts: u64, out: &mut Recognized) {
        let pointer_count = self.sequence.pointers.len();
        for (index, recognizer) in self.recognizers.iter().enumerate() {
            let activated = match *recognizer {
                Recognizer::Pan { min_distance } => {
                    pointer_count == 1 && self.sequence.max_travel >= min_distance.max(0.0)
                }
                Recognizer::Pinch { min_scale_delta } => self
                    .sequence
                    .pinch_scale()
                    .is_some_and(|scale| (scale - 1.0).abs() >= min_scale_delta),
                Recognizer::Tap { .. } => false,
            };
            if !activated {
                continue;
            }

            self.sequence.claimed = Some(index);
            tracing::trace!(?recognizer, "recognizer claimed touch sequence");
            match recognizer {
                Recognizer::Pan { .. } => {
                    out.push(self.drag_event(DRAG_START, ts));
                    if self.sequence.max_travel > 0.0 {
                        out.push(self.drag_event(DRAG, ts));
                    }
                }
                Recognizer::Pinch { .. } => {
                    if let Some(event) = self.pinch_event(PINCH_START, ts) {
                        out.push(event);
                    }
                }
                Recognizer::Tap { .. } => {}
            }
            return;
        }
    }

    fn try_tap(&mut self, x: f32, y: f32, ts: u64, out: &mut Recognized) {
        let duration = ts.saturating_sub(self.sequence.down_at);
        let tapped = self.recognizers.iter().position(|recognizer| match *recognizer {
            Recognizer::Tap {
                max_distance,
                max_duration_ms,
            } => {
                self.sequence.max_pointers == 1
                    && self.sequence.max_travel <= max_distance
                    && duration <= max_duration_ms
            }
            _ => false,
        });
        if let Some(index) = tapped {
            self.sequence.claimed = Some(index);
            self.sequence.finished = true;
            out.push(Event::tap(x, y).at(ts));
        }
    }

    fn drag_event(&self, event_type: EventType, ts: u64) -> Event {
        let (sx, sy) = self.sequence.start;
        let (x, y) = self.sequence.primary().map_or((sx, sy), |p| (p.x, p.y));
        let (velocity_x, velocity_y) = if event_type == DRAG_START {
            (0.0, 0.0)
        } else {
            self.velocity.velocity()
        };
        Event::new(
            event_type,
            EventData::Drag {
                x,
                y,
                translation_x: x - sx,
                translation_y: y - sy,
                velocity_x,
                velocity_y,
            },
        )
        .at(ts)
    }

    fn pinch_event(&self, event_type: EventType, ts: u64) -> Option<Event> {
        let scale = self.sequence.pinch_scale()?;
        let (focal_x, focal_y) = self.sequence.focal();
        Some(
            Event::new(
                event_type,
                EventData::Pinch {
                    scale,
                    focal_x,
                    focal_y,
                    velocity: 0.0,
                },
            )
            .at(ts),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_core::events::event_types::{GESTURE_CANCEL, TAP};

    fn types(events: &Recognized) -> Vec<u32> {
        events.iter().map(|e| e.event_type).collect()
    }

    fn rating_arbiter() -> GestureArbiter {
        GestureArbiter::new()
            .with(Recognizer::pan())
            .with(Recognizer::tap())
    }

    #[test]
    fn test_tap_within_limits() {
        let mut arbiter = rating_arbiter();
        assert!(arbiter.handle(&Event::pointer_down(1, 50.0, 10.0).at(0)).is_empty());
        arbiter.handle(&Event::pointer_move(1, 53.0, 11.0).at(40));
        let out = arbiter.handle(&Event::pointer_up(1, 53.0, 11.0).at(90));
        assert_eq!(types(&out), vec![TAP]);
        assert_eq!(out[0].data, EventData::Tap { x: 53.0, y: 11.0 });
    }

    #[test]
    fn test_tap_never_fires_after_pan() {
        let mut arbiter = rating_arbiter();
        arbiter.handle(&Event::pointer_down(1, 0.0, 0.0).at(0));
        let out = arbiter.handle(&Event::pointer_move(1, 30.0, 0.0).at(16));
        assert_eq!(types(&out), vec![DRAG_START, DRAG]);
        assert_eq!(arbiter.claimed(), Some(Recognizer::pan()));

        // Returning to the start point still ends the pan, not a tap
        arbiter.handle(&Event::pointer_move(1, 2.0, 0.0).at(32));
        let out = arbiter.handle(&Event::pointer_up(1, 2.0, 0.0).at(48));
        assert_eq!(types(&out), vec![DRAG_END]);
    }

    #[test]
    fn test_slow_press_is_not_a_tap() {
        let mut arbiter = rating_arbiter();
        arbiter.handle(&Event::pointer_down(1, 0.0, 0.0).at(0));
        let out = arbiter.handle(&Event::pointer_up(1, 0.0, 0.0).at(900));
        assert!(out.is_empty());
    }

    #[test]
    fn test_zero_distance_pan_claims_on_down() {
        let mut arbiter = GestureArbiter::new().with(Recognizer::Pan { min_distance: 0.0 });
        let out = arbiter.handle(&Event::pointer_down(1, 120.0, 40.0).at(0));
        assert_eq!(types(&out), vec![DRAG_START]);
        match out[0].data {
            EventData::Drag { x, translation_x, .. } => {
                assert_eq!(x, 120.0);
                assert_eq!(translation_x, 0.0);
            }
            ref other => panic!("unexpected data {other:?}"),
        }
    }

    #[test]
    fn test_pinch_scale_from_spread() {
        let mut arbiter = GestureArbiter::new().with(Recognizer::pinch());
        arbiter.handle(&Event::pointer_down(1, 100.0, 100.0).at(0));
        arbiter.handle(&Event::pointer_down(2, 200.0, 100.0).at(5));

        let out = arbiter.handle(&Event::pointer_move(2, 300.0, 100.0).at(20));
        assert_eq!(types(&out), vec![PINCH_START]);
        match out[0].data {
            EventData::Pinch { scale, focal_x, .. } => {
                assert!((scale - 2.0).abs() < 1e-5);
                assert_eq!(focal_x, 200.0);
            }
            ref other => panic!("unexpected data {other:?}"),
        }

        let out = arbiter.handle(&Event::pointer_up(1, 100.0, 100.0).at(40));
        assert_eq!(types(&out), vec![PINCH_END]);
        // Remaining pointer is ignored until it lifts
        assert!(arbiter.handle(&Event::pointer_move(2, 10.0, 10.0).at(50)).is_empty());
        assert!(arbiter.handle(&Event::pointer_up(2, 10.0, 10.0).at(60)).is_empty());
        assert_eq!(arbiter.claimed(), None);
    }

    #[test]
    fn test_cancel_only_after_claim() {
        let mut arbiter = rating_arbiter();
        arbiter.handle(&Event::pointer_down(1, 0.0, 0.0).at(0));
        assert!(arbiter.handle(&Event::pointer_cancel(1).at(5)).is_empty());

        arbiter.handle(&Event::pointer_down(1, 0.0, 0.0).at(10));
        arbiter.handle(&Event::pointer_move(1, 40.0, 0.0).at(26));
        let out = arbiter.handle(&Event::pointer_cancel(1).at(30));
        assert_eq!(types(&out), vec![GESTURE_CANCEL]);
    }

    #[test]
    fn test_release_velocity_is_smoothed() {
        let mut arbiter = GestureArbiter::new().with(Recognizer::pan());
        arbiter.handle(&Event::pointer_down(1, 0.0, 0.0).at(0));
        for i in 1..=10u64 {
            arbiter.handle(&Event::pointer_move(1, 0.0, i as f32 * 10.0).at(i * 10));
        }
        let out = arbiter.handle(&Event::pointer_up(1, 0.0, 100.0).at(110));
        match out[0].data {
            EventData::Drag {
                translation_y,
                velocity_y,
                ..
            } => {
                assert_eq!(translation_y, 100.0);
                // 10 units every 10 ms, decayed by the final stationary sample
                assert!(velocity_y > 500.0 && velocity_y < 1000.0);
            }
            ref other => panic!("unexpected data {other:?}"),
        }
    }

    #[test]
    fn test_non_pointer_events_pass_through() {
        let mut arbiter = rating_arbiter();
        let resize = Event::resize(300.0, 50.0);
        assert_eq!(arbiter.handle(&resize).as_slice(), &[resize]);
    }
}
