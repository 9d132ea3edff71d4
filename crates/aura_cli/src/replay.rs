//! Frame-stepped replay of a pointer trace through one widget
//!
//! The replay runs on a virtual clock: frame `n` sits at `n * 1000 / fps`
//! milliseconds, every trace sample at or before that time is delivered,
//! then the scheduler advances one frame and the widget ticks. Replay stops
//! once the trace is exhausted and the widget has come to rest.

use std::sync::mpsc::{self, Sender};

use anyhow::{bail, Result};
use aura_core::Event;
use aura_gestures::ControllerState;
use aura_widgets::{
    BottomSheet, ImageComparer, RatingSwipe, SwipeButton, Widget, WidgetContext, ZoomableView,
};
use clap::ValueEnum;
use serde::Serialize;

use crate::config::AuraConfig;
use crate::trace::Trace;

/// Longest the replay keeps stepping after the last sample
const SETTLE_LIMIT_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Swipe,
    Sheet,
    Rating,
    Zoom,
    Comparer,
}

/// One rendered frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSample {
    pub frame: u64,
    pub time_ms: u64,
    pub state: String,
    /// The controller's animated value (offset, top edge, fill or scale)
    pub value: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// A commit reported by the widget's callback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitRecord {
    pub frame: u64,
    pub time_ms: u64,
    pub outcome: String,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub widget: WidgetKind,
    pub fps: u32,
    pub frames: Vec<FrameSample>,
    pub commits: Vec<CommitRecord>,
    /// Stepping hit the time limit before the widget came to rest
    pub truncated: bool,
}

impl ReplayReport {
    pub fn final_frame(&self) -> Option<&FrameSample> {
        self.frames.last()
    }
}

enum ReplayWidget {
    Swipe(SwipeButton),
    Sheet(BottomSheet),
    Rating(RatingSwipe),
    Zoom(ZoomableView),
    Comparer(ImageComparer),
}

impl ReplayWidget {
    fn build(
        kind: WidgetKind,
        config: &AuraConfig,
        ctx: &mut WidgetContext,
        commits: Sender<String>,
    ) -> Self {
        let layout = config.layout;
        // A closed receiver only means the replay already finished
        match kind {
            WidgetKind::Swipe => {
                let mut button = SwipeButton::with_config(ctx, config.swipe.clone())
                    .on_complete(move || {
                        let _ = commits.send("confirmed".to_string());
                    });
                button.set_layout(layout.width);
                Self::Swipe(button)
            }
            WidgetKind::Sheet => {
                let mut sheet = BottomSheet::with_config(ctx, config.sheet.clone())
                    .on_snap(move |snap| {
                        let _ = commits.send(format!("{snap:?}"));
                    });
                sheet.set_layout(layout.height);
                sheet.mount();
                Self::Sheet(sheet)
            }
            WidgetKind::Rating => Self::Rating(
                RatingSwipe::with_config(ctx, config.rating).on_rating_change(move |rating| {
                    let _ = commits.send(format!("rating {rating}"));
                }),
            ),
            WidgetKind::Zoom => Self::Zoom(
                ZoomableView::with_config(ctx, config.zoom).on_zoom_end(move |scale| {
                    let _ = commits.send(format!("scale {scale}"));
                }),
            ),
            WidgetKind::Comparer => {
                let mut comparer = ImageComparer::with_config(ctx, config.comparer).on_release(
                    move |position| {
                        let _ = commits.send(format!("position {position:.1}"));
                    },
                );
                comparer.set_layout(layout.width);
                Self::Comparer(comparer)
            }
        }
    }

    fn widget(&mut self) -> &mut dyn Widget {
        match self {
            Self::Swipe(w) => w,
            Self::Sheet(w) => w,
            Self::Rating(w) => w,
            Self::Zoom(w) => w,
            Self::Comparer(w) => w,
        }
    }

    fn state(&self) -> ControllerState {
        match self {
            Self::Swipe(w) => w.controller().state(),
            Self::Sheet(w) => w.controller().state(),
            Self::Rating(w) => w.controller().state(),
            Self::Zoom(w) => w.controller().state(),
            Self::Comparer(w) => w.controller().state(),
        }
    }

    fn value(&self) -> f32 {
        match self {
            Self::Swipe(w) => w.controller().value(),
            Self::Sheet(w) => w.translate_y(),
            Self::Rating(w) => w.fill_width(),
            Self::Zoom(w) => w.scale(),
            Self::Comparer(w) => w.position(),
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            Self::Swipe(w) => Some(w.label().to_string()),
            Self::Sheet(w) => Some(if w.is_active() { "active" } else { "inactive" }.to_string()),
            Self::Rating(w) => Some(format!("{} stars", w.rating())),
            Self::Zoom(_) => None,
            Self::Comparer(w) => Some(format!("labels {:.2}", w.label_opacity())),
        }
    }

    fn sample(&self, frame: u64, time_ms: u64) -> FrameSample {
        FrameSample {
            frame,
            time_ms,
            state: format!("{:?}", self.state()),
            value: self.value(),
            detail: self.detail(),
        }
    }
}

pub fn run(kind: WidgetKind, config: &AuraConfig, trace: &Trace, fps: u32) -> Result<ReplayReport> {
    if fps == 0 {
        bail!("--fps must be at least 1");
    }
    let frame_ms = 1000.0 / f64::from(fps);
    let dt = 1.0 / fps as f32;
    let limit_ms = trace.duration_ms() + SETTLE_LIMIT_MS;

    let mut ctx = WidgetContext::new();
    let (sender, receiver) = mpsc::channel();
    let mut widget = ReplayWidget::build(kind, config, &mut ctx, sender);

    let mut pending = trace.events.iter().peekable();
    let mut frames = Vec::new();
    let mut commits = Vec::new();
    let mut truncated = false;

    for frame in 0u64.. {
        let now = (frame as f64 * frame_ms).round() as u64;
        while let Some(sample) = pending.next_if(|e| e.t <= now) {
            let event: Event = sample.to_event();
            tracing::trace!(frame, ?event, "deliver");
            widget.widget().handle_event(&event);
        }

        let animating = ctx.advance(dt);
        widget.widget().tick();
        for outcome in receiver.try_iter() {
            tracing::debug!(frame, %outcome, "commit");
            commits.push(CommitRecord {
                frame,
                time_ms: now,
                outcome,
            });
        }
        frames.push(widget.sample(frame, now));

        let busy = matches!(
            widget.state(),
            ControllerState::Dragging | ControllerState::Settling
        );
        if pending.peek().is_none() && !animating && !busy {
            break;
        }
        if now >= limit_ms {
            tracing::warn!(frame, "replay did not come to rest");
            truncated = true;
            break;
        }
    }

    Ok(ReplayReport {
        widget: kind,
        fps,
        frames,
        commits,
        truncated,
    })
}

/// Human-readable report: frames where something changed, then commits
pub fn render_text(report: &ReplayReport) -> String {
    let mut out = String::new();
    let mut previous: Option<&FrameSample> = None;
    for sample in &report.frames {
        let changed = previous.map_or(true, |p| {
            p.state != sample.state
                || (p.value - sample.value).abs() >= 0.5
                || p.detail != sample.detail
        });
        if changed {
            out.push_str(&format!(
                "{:>5} {:>6}ms  {:<10} {:>9.2}  {}\n",
                sample.frame,
                sample.time_ms,
                sample.state,
                sample.value,
                sample.detail.as_deref().unwrap_or("")
            ));
            previous = Some(sample);
        }
    }
    if let Some(last) = report.final_frame() {
        out.push_str(&format!(
            "final  {:>6}ms  {:<10} {:>9.2}\n",
            last.time_ms, last.state, last.value
        ));
    }
    for commit in &report.commits {
        out.push_str(&format!(
            "commit {:>5} {:>6}ms  {}\n",
            commit.frame, commit.time_ms, commit.outcome
        ));
    }
    if report.truncated {
        out.push_str("warning: stopped before the widget came to rest\n");
    }
    out
}
