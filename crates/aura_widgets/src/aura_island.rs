//! Floating status island
//!
//! Any number of producers hold a cloneable [`IslandHandle`] and post
//! commands into the host's mailbox. The host drains the mailbox once per
//! frame in [`IslandHost::pump`]; only the newest command is applied, so at
//! most one payload is ever visible.
//!
//! ```rust
//! use aura_widgets::{IslandConfig, IslandHost, IslandMode, WidgetContext};
//!
//! let mut ctx = WidgetContext::new();
//! let (mut host, handle) = IslandHost::mount(&mut ctx, IslandConfig::default());
//!
//! handle.show(IslandMode::Compact, "Uploading").unwrap();
//! host.pump();
//! assert_eq!(host.content(), Some("Uploading"));
//!
//! drop(host);
//! assert!(handle.hide().is_err());
//! ```

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use aura_animation::{AnimatedValue, Easing, Motion, SpringConfig};
use aura_core::events::event_types::{DRAG, DRAG_END, DRAG_START, GESTURE_CANCEL, RESIZE};
use aura_core::events::{Event, EventData};
use aura_gestures::{GestureArbiter, Recognizer};
use serde::{Deserialize, Serialize};

use crate::context::WidgetContext;
use crate::error::{IslandError, Result};
use crate::widget::{Widget, WidgetId};

/// Resting y while hidden, above the top of the screen
pub const HIDDEN_Y: f32 = -100.0;

/// Upward drag past this distance dismisses the island
pub const DISMISS_DISTANCE: f32 = 20.0;

const HIDE_DURATION_MS: u32 = 250;
const RESIZE_SPRING: SpringConfig = SpringConfig::new(350.0, 25.0, 1.0);
const ENTRY_SPRING: SpringConfig = SpringConfig::new(200.0, 30.0, 1.0);
const FOLLOW_SPRING: SpringConfig = SpringConfig::new(400.0, 20.0, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IslandMode {
    Minimal,
    Compact,
    Expanded,
    /// Hidden; showing in this mode is the same as `hide()`
    Silent,
}

/// Island shape for one mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IslandSize {
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
}

impl IslandMode {
    pub fn size(self, screen_width: f32) -> Option<IslandSize> {
        let (width, height, corner_radius) = match self {
            IslandMode::Minimal => (120.0, 36.0, 18.0),
            IslandMode::Compact => (200.0, 36.0, 18.0),
            IslandMode::Expanded => ((screen_width - 24.0).max(0.0), 160.0, 32.0),
            IslandMode::Silent => return None,
        };
        Some(IslandSize {
            width,
            height,
            corner_radius,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IslandCommand {
    Show { mode: IslandMode, content: String },
    Hide,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandConfig {
    pub screen_width: f32,
    /// Top safe-area inset
    pub safe_top: f32,
    /// Gap below the safe area while shown (2 on iOS, 10 on Android)
    pub rest_offset: f32,
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            screen_width: 390.0,
            safe_top: 47.0,
            rest_offset: 2.0,
        }
    }
}

impl IslandConfig {
    pub fn rest_y(&self) -> f32 {
        self.safe_top + self.rest_offset
    }
}

/// Producer side of the island mailbox
#[derive(Debug, Clone)]
pub struct IslandHandle {
    sender: Sender<IslandCommand>,
}

impl IslandHandle {
    pub fn show(&self, mode: IslandMode, content: impl Into<String>) -> Result<()> {
        self.send(IslandCommand::Show {
            mode,
            content: content.into(),
        })
    }

    pub fn hide(&self) -> Result<()> {
        self.send(IslandCommand::Hide)
    }

    pub fn send(&self, command: IslandCommand) -> Result<()> {
        self.sender
            .send(command)
            .map_err(|_| IslandError::HostUnmounted)
    }
}

/// Render-ready values for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IslandVisuals {
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub translate_y: f32,
}

pub struct IslandHost {
    id: WidgetId,
    config: IslandConfig,
    mailbox: Receiver<IslandCommand>,
    arbiter: GestureArbiter,
    mode: IslandMode,
    content: Option<String>,
    visible: bool,
    hiding: bool,
    width: AnimatedValue,
    height: AnimatedValue,
    corner_radius: AnimatedValue,
    translate_y: AnimatedValue,
}

impl IslandHost {
    /// Mount a host and hand back the first producer handle
    pub fn mount(ctx: &mut WidgetContext, config: IslandConfig) -> (Self, IslandHandle) {
        let (sender, mailbox) = mpsc::channel();
        let id = ctx.register_widget("aura_island");
        let scheduler = ctx.scheduler();
        let size = IslandMode::Minimal
            .size(config.screen_width)
            .unwrap_or(IslandSize {
                width: 0.0,
                height: 0.0,
                corner_radius: 0.0,
            });
        let host = Self {
            id,
            config,
            mailbox,
            arbiter: GestureArbiter::new().with(Recognizer::pan()),
            mode: IslandMode::Silent,
            content: None,
            visible: false,
            hiding: false,
            width: AnimatedValue::with_scheduler(size.width, scheduler),
            height: AnimatedValue::with_scheduler(size.height, scheduler),
            corner_radius: AnimatedValue::with_scheduler(size.corner_radius, scheduler),
            translate_y: AnimatedValue::with_scheduler(HIDDEN_Y, scheduler),
        };
        (host, IslandHandle { sender })
    }

    pub fn mode(&self) -> IslandMode {
        self.mode
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn visuals(&self) -> IslandVisuals {
        IslandVisuals {
            width: self.width.get(),
            height: self.height.get(),
            corner_radius: self.corner_radius.get(),
            translate_y: self.translate_y.get(),
        }
    }

    /// Apply the newest queued command, discarding older ones.
    ///
    /// Returns whether a command was applied.
    pub fn pump(&mut self) -> bool {
        let mut latest = None;
        let mut dropped = 0usize;
        loop {
            match self.mailbox.try_recv() {
                Ok(command) => {
                    if latest.replace(command).is_some() {
                        dropped += 1;
                    }
                }
                // The host holds no sender, so this only happens once every
                // handle is gone; commands already queued are still applied
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, "superseded island commands");
        }
        match latest {
            Some(command) => {
                self.apply(command);
                true
            }
            None => false,
        }
    }

    pub fn set_layout(&mut self, screen_width: f32) {
        if !screen_width.is_finite() || screen_width <= 0.0 {
            return;
        }
        self.config.screen_width = screen_width;
        if self.visible && self.mode == IslandMode::Expanded {
            self.resize_to(IslandMode::Expanded);
        }
    }

    fn apply(&mut self, command: IslandCommand) {
        match command {
            IslandCommand::Show {
                mode: IslandMode::Silent,
                ..
            }
            | IslandCommand::Hide => self.hide(),
            IslandCommand::Show { mode, content } => self.show(mode, content),
        }
    }

    fn show(&mut self, mode: IslandMode, content: String) {
        tracing::debug!(?mode, "island show");
        self.mode = mode;
        self.content = Some(content);
        self.resize_to(mode);
        if !self.visible || self.hiding {
            self.visible = true;
            self.hiding = false;
            self.translate_y
                .animate_to(self.config.rest_y(), ENTRY_SPRING);
        }
    }

    fn hide(&mut self) {
        if !self.visible || self.hiding {
            return;
        }
        tracing::debug!("island hide");
        self.hiding = true;
        self.translate_y.animate_to(
            HIDDEN_Y,
            Motion::Timing {
                duration_ms: HIDE_DURATION_MS,
                easing: Easing::EaseOutQuad,
            },
        );
    }

    fn resize_to(&mut self, mode: IslandMode) {
        if let Some(size) = mode.size(self.config.screen_width) {
            self.width.animate_to(size.width, RESIZE_SPRING);
            self.height.animate_to(size.height, RESIZE_SPRING);
            self.corner_radius
                .animate_to(size.corner_radius, RESIZE_SPRING);
        }
    }

    fn on_gesture(&mut self, event: &Event) {
        if !self.visible || self.hiding {
            return;
        }
        let translation_y = match event.data {
            EventData::Drag { translation_y, .. } => translation_y,
            _ => 0.0,
        };
        let rest = self.config.rest_y();

        match event.event_type {
            DRAG_START | DRAG => {
                // Only upward drags move the island
                if translation_y < 0.0 {
                    self.translate_y
                        .animate_to(rest + translation_y, FOLLOW_SPRING);
                }
            }
            DRAG_END if translation_y < -DISMISS_DISTANCE => self.hide(),
            DRAG_END | GESTURE_CANCEL => {
                self.translate_y.animate_to(rest, SpringConfig::default());
            }
            _ => {}
        }
    }
}

impl Widget for IslandHost {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn handle_event(&mut self, event: &Event) {
        if let (RESIZE, EventData::Resize { width, .. }) = (event.event_type, &event.data) {
            self.set_layout(*width);
            return;
        }
        for gesture in self.arbiter.handle(event) {
            self.on_gesture(&gesture);
        }
    }

    fn tick(&mut self) {
        self.pump();
        self.width.update();
        self.height.update();
        self.corner_radius.update();
        if self.translate_y.update() && self.hiding {
            self.hiding = false;
            self.visible = false;
            self.mode = IslandMode::Silent;
            self.content = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(ctx: &WidgetContext, host: &mut IslandHost, frames: usize) {
        for _ in 0..frames {
            ctx.advance(1.0 / 60.0);
            host.tick();
        }
    }

    fn config() -> IslandConfig {
        IslandConfig {
            screen_width: 400.0,
            safe_top: 50.0,
            rest_offset: 10.0,
        }
    }

    #[test]
    fn test_last_command_wins() {
        let mut ctx = WidgetContext::new();
        let (mut host, handle) = IslandHost::mount(&mut ctx, config());
        let other = handle.clone();

        handle.show(IslandMode::Compact, "first").unwrap();
        other.show(IslandMode::Minimal, "second").unwrap();
        handle.show(IslandMode::Expanded, "third").unwrap();
        assert!(host.pump());
        assert!(!host.pump());

        assert_eq!(host.content(), Some("third"));
        assert_eq!(host.mode(), IslandMode::Expanded);
        run(&ctx, &mut host, 180);

        let visuals = host.visuals();
        assert!((visuals.width - 376.0).abs() < 1e-2);
        assert!((visuals.height - 160.0).abs() < 1e-2);
        assert!((visuals.corner_radius - 32.0).abs() < 1e-2);
        assert!((visuals.translate_y - 60.0).abs() < 1e-2);
    }

    #[test]
    fn test_hide_after_show_in_same_frame() {
        let mut ctx = WidgetContext::new();
        let (mut host, handle) = IslandHost::mount(&mut ctx, config());
        handle.show(IslandMode::Compact, "ignored").unwrap();
        handle.hide().unwrap();
        host.pump();
        assert!(!host.is_visible());
        assert_eq!(host.content(), None);
        assert_eq!(host.visuals().translate_y, HIDDEN_Y);
    }

    #[test]
    fn test_hide_finishes_inactive() {
        let mut ctx = WidgetContext::new();
        let (mut host, handle) = IslandHost::mount(&mut ctx, config());
        handle.show(IslandMode::Minimal, "hi").unwrap();
        run(&ctx, &mut host, 120);
        assert!(host.is_visible());

        handle.show(IslandMode::Silent, "").unwrap();
        run(&ctx, &mut host, 5);
        assert!(host.is_visible());
        run(&ctx, &mut host, 30);
        assert!(!host.is_visible());
        assert_eq!(host.content(), None);
        assert_eq!(host.mode(), IslandMode::Silent);
        assert_eq!(host.visuals().translate_y, HIDDEN_Y);
    }

    #[test]
    fn test_drag_up_dismisses() {
        let mut ctx = WidgetContext::new();
        let (mut host, handle) = IslandHost::mount(&mut ctx, config());
        handle.show(IslandMode::Compact, "call").unwrap();
        run(&ctx, &mut host, 120);

        host.handle_event(&Event::drag_y(DRAG_START, 60.0, 0.0, 0.0));
        host.handle_event(&Event::drag_y(DRAG, 30.0, -30.0, -400.0));
        run(&ctx, &mut host, 60);
        assert!((host.visuals().translate_y - 30.0).abs() < 1e-2);

        host.handle_event(&Event::drag_y(DRAG_END, 30.0, -30.0, -400.0));
        run(&ctx, &mut host, 30);
        assert!(!host.is_visible());
    }

    #[test]
    fn test_short_drag_springs_back() {
        let mut ctx = WidgetContext::new();
        let (mut host, handle) = IslandHost::mount(&mut ctx, config());
        handle.show(IslandMode::Compact, "call").unwrap();
        run(&ctx, &mut host, 120);

        host.handle_event(&Event::drag_y(DRAG_START, 60.0, 0.0, 0.0));
        host.handle_event(&Event::drag_y(DRAG, 50.0, -10.0, 0.0));
        // Downward drags leave the island in place
        host.handle_event(&Event::drag_y(DRAG, 90.0, 30.0, 0.0));
        host.handle_event(&Event::drag_y(DRAG_END, 90.0, 30.0, 0.0));
        run(&ctx, &mut host, 240);
        assert!(host.is_visible());
        assert!((host.visuals().translate_y - 60.0).abs() < 1e-2);
    }

    #[test]
    fn test_send_after_unmount_fails() {
        let mut ctx = WidgetContext::new();
        let (host, handle) = IslandHost::mount(&mut ctx, config());
        drop(host);
        assert_eq!(
            handle.show(IslandMode::Minimal, "late"),
            Err(IslandError::HostUnmounted)
        );
        assert_eq!(handle.hide(), Err(IslandError::HostUnmounted));
    }
}
