#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! Callers translate whatever their windowing or browser layer delivers into
//! these types. All coordinates are container pixels (see
//! [`Position`](crate::geometry::Position)).

use crate::geometry::Position;

/// A normalized input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Pointer (mouse, pen, touch) input.
    Pointer(PointerEvent),
    /// A discrete keyboard command.
    Key(KeyCommand),
    /// The container was resized.
    Resize {
        /// Container width in pixels.
        width: u32,
        /// Viewport height in pixels.
        height: u32,
    },
    /// The container scrolled to a new offset (pixels from the top).
    Scroll(i64),
    /// Focus gained (`true`) or lost (`false`).
    Focus(bool),
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Pointer event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Button pressed.
    Down(PointerButton),
    /// Pointer moved (with or without a button held).
    Move,
    /// Button released.
    Up(PointerButton),
    /// Pointer left the container.
    Leave,
}

/// A pointer event at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Position,
}

impl PointerEvent {
    /// Create a pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Primary button press at `(x, y)`.
    #[must_use]
    pub const fn down(x: i32, y: i32) -> Self {
        Self::new(
            PointerEventKind::Down(PointerButton::Primary),
            Position::new(x, y),
        )
    }

    /// Pointer move to `(x, y)`.
    #[must_use]
    pub const fn moved(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Move, Position::new(x, y))
    }

    /// Primary button release at `(x, y)`.
    #[must_use]
    pub const fn up(x: i32, y: i32) -> Self {
        Self::new(
            PointerEventKind::Up(PointerButton::Primary),
            Position::new(x, y),
        )
    }
}

/// Grid navigation direction for keyboard moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Keyboard-driven drag commands.
///
/// `Pick` lifts the focused item, `Move` shifts the drop target one slot
/// (left/right) or one row (up/down), `Drop` commits and `Cancel` abandons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Pick,
    Move(Direction),
    Drop,
    Cancel,
}
