#![forbid(unsafe_code)]

//! Pointer drag detection: separates clicks from drags.
//!
//! [`PointerDragDetector`] watches primary-button press → move → release
//! sequences and emits [`DragSignal`]s. A drag only starts once the pointer
//! has travelled at least [`DragGestureConfig::threshold`] pixels (manhattan
//! distance) from the press position; a release before that is a click.
//!
//! # Invariants
//!
//! 1. `Click` and `End` never both emit for the same press → release.
//! 2. A drag is well-formed: exactly one `Start`, zero or more `Move`, then
//!    exactly one of `End` or `Cancel`.
//! 3. After `reset()` the detector is idle and emits nothing until the next
//!    press.
//!
//! # Failure Modes
//!
//! - Pointer leaves the container mid-drag: `Cancel`.
//! - Focus loss mid-drag: `Cancel`.
//! - `KeyCommand::Cancel` mid-drag: `Cancel` (if `cancel_on_escape`).
//! - Release without a prior press: ignored.

use crate::event::{Event, KeyCommand, PointerButton, PointerEventKind};
use crate::geometry::Position;

/// Default activation distance in pixels.
pub const DEFAULT_DRAG_THRESHOLD: u32 = 3;

/// Thresholds for drag detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGestureConfig {
    /// Minimum manhattan distance (pixels) before a drag starts (default: 3).
    pub threshold: u32,
    /// Whether a keyboard cancel aborts a pointer drag (default: true).
    pub cancel_on_escape: bool,
}

impl Default for DragGestureConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DRAG_THRESHOLD,
            cancel_on_escape: true,
        }
    }
}

/// High-level drag signals produced by [`PointerDragDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSignal {
    /// Press and release without crossing the threshold.
    Click { pos: Position },
    /// The threshold was crossed; `origin` is the press position.
    Start { origin: Position, current: Position },
    /// Pointer moved during an active drag.
    Move {
        origin: Position,
        current: Position,
        delta: (i32, i32),
    },
    /// Button released during an active drag.
    End { origin: Position, end: Position },
    /// Active drag aborted.
    Cancel,
}

#[derive(Debug, Clone, Copy)]
struct DragTracker {
    origin: Position,
    last: Position,
    started: bool,
}

/// Stateful click/drag disambiguator.
#[derive(Debug, Clone, Default)]
pub struct PointerDragDetector {
    config: DragGestureConfig,
    tracker: Option<DragTracker>,
}

impl PointerDragDetector {
    /// Create a detector with the given configuration.
    #[must_use]
    pub fn new(config: DragGestureConfig) -> Self {
        Self {
            config,
            tracker: None,
        }
    }

    /// Process an event, returning any drag signals produced.
    ///
    /// A move that crosses the threshold yields both `Start` and `Move`.
    pub fn process(&mut self, event: &Event) -> Vec<DragSignal> {
        let mut out = Vec::with_capacity(2);
        match event {
            Event::Pointer(pointer) => match pointer.kind {
                PointerEventKind::Down(PointerButton::Primary) => {
                    // A second press without release restarts tracking.
                    if self.is_dragging() {
                        out.push(DragSignal::Cancel);
                    }
                    self.tracker = Some(DragTracker {
                        origin: pointer.position,
                        last: pointer.position,
                        started: false,
                    });
                }
                PointerEventKind::Move => self.on_move(pointer.position, &mut out),
                PointerEventKind::Up(PointerButton::Primary) => {
                    if let Some(tracker) = self.tracker.take() {
                        if tracker.started {
                            out.push(DragSignal::End {
                                origin: tracker.origin,
                                end: pointer.position,
                            });
                        } else {
                            out.push(DragSignal::Click {
                                pos: pointer.position,
                            });
                        }
                    }
                }
                PointerEventKind::Leave => self.abort(&mut out),
                _ => {}
            },
            Event::Key(KeyCommand::Cancel) if self.config.cancel_on_escape => {
                self.abort(&mut out);
            }
            Event::Focus(false) => self.abort(&mut out),
            _ => {}
        }
        out
    }

    /// Whether a drag has crossed the threshold and is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.tracker.is_some_and(|t| t.started)
    }

    /// Whether a press is being tracked (drag pending or active).
    #[inline]
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.tracker.is_some()
    }

    /// Reset to idle without emitting anything.
    pub fn reset(&mut self) {
        self.tracker = None;
    }

    /// Current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DragGestureConfig {
        &self.config
    }

    /// Replace the configuration. An in-flight press keeps tracking.
    pub fn set_config(&mut self, config: DragGestureConfig) {
        self.config = config;
    }

    fn on_move(&mut self, pos: Position, out: &mut Vec<DragSignal>) {
        let Some(ref mut tracker) = self.tracker else {
            return;
        };

        if !tracker.started && tracker.origin.manhattan_distance(pos) >= self.config.threshold {
            tracker.started = true;
            #[cfg(feature = "tracing")]
            crate::debug!(
                message = "gesture.drag_start",
                x = tracker.origin.x,
                y = tracker.origin.y,
                threshold = self.config.threshold
            );
            out.push(DragSignal::Start {
                origin: tracker.origin,
                current: pos,
            });
        }

        if tracker.started {
            out.push(DragSignal::Move {
                origin: tracker.origin,
                current: pos,
                delta: (
                    pos.x.saturating_sub(tracker.last.x),
                    pos.y.saturating_sub(tracker.last.y),
                ),
            });
        }

        tracker.last = pos;
    }

    fn abort(&mut self, out: &mut Vec<DragSignal>) {
        if let Some(tracker) = self.tracker.take()
            && tracker.started
        {
            #[cfg(feature = "tracing")]
            crate::debug!(message = "gesture.drag_cancel");
            out.push(DragSignal::Cancel);
        }
    }
}
