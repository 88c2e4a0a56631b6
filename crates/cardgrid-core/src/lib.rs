#![forbid(unsafe_code)]

//! Core: geometry, normalized input events, and drag-gesture detection.
//!
//! # Role in cardgrid
//! `cardgrid-core` is the input layer. It knows nothing about items, order,
//! or layout; it turns pointer and keyboard input into a small vocabulary of
//! drag signals that `cardgrid-board` maps onto its drag coordinator.
//!
//! # Primary responsibilities
//! - **Position**: pixel coordinates and the distance metric used for
//!   drag activation.
//! - **Event**: pointer and keyboard-command input.
//! - **Gesture**: [`gesture::PointerDragDetector`], which separates clicks
//!   from drags using a movement threshold.

pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
