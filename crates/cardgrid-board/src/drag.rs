#![forbid(unsafe_code)]

//! Drag-reorder coordination.
//!
//! [`DragCoordinator`] is an explicit state machine between input handling
//! and the [`OrderManager`]:
//!
//! ```text
//! Idle --begin(id)--> Dragging --hover(over)--> Dragging
//! Dragging --drop()--> (Moved | Unchanged | Cancelled) --> Idle
//! Dragging --cancel()--> Idle
//! ```
//!
//! Hovering only records the drop target; the order is mutated once, on
//! drop. A drop that moves the card more than `scroll_compensation_rows`
//! rows asks the view to scroll to the card's new row.
//!
//! # Invariants
//!
//! 1. At most one drag is active; `begin` while dragging is refused.
//! 2. Pinned cards and the card in detail view never start a drag.
//! 3. `cancel` is idempotent.
//! 4. A drop whose target has left the collection is a cancellation.

use cardgrid_core::event::Direction;
use cardgrid_layout::GridLayout;

use crate::id::ItemId;
use crate::order::{MoveOutcome, OrderManager};

/// Default row distance beyond which a drop triggers scroll compensation.
pub const DEFAULT_SCROLL_COMPENSATION_ROWS: usize = 2;

/// How the drag was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Pointer,
    Keyboard,
}

/// Coordinator phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

/// In-flight drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    /// Card being dragged.
    pub active: ItemId,
    /// Current drop target, if any.
    pub over: Option<ItemId>,
    /// How the drag started.
    pub source: DragSource,
}

/// Result of [`DragCoordinator::drop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The card moved between display indices. `scroll_to` names the row to
    /// bring into view when the move crossed more than the compensation
    /// distance.
    Moved {
        from: usize,
        to: usize,
        scroll_to: Option<usize>,
    },
    /// The drop was valid but changed nothing (no target, same card, pinned
    /// target, or nothing was being dragged).
    Unchanged,
    /// The drag's card or target vanished; treated as a cancellation.
    Cancelled,
}

/// Single-gesture drag state machine.
#[derive(Debug, Clone)]
pub struct DragCoordinator {
    state: Option<DragState>,
    expanded: Option<ItemId>,
    scroll_compensation_rows: usize,
}

impl Default for DragCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_COMPENSATION_ROWS)
    }
}

impl DragCoordinator {
    /// Coordinator with the given scroll-compensation distance in rows.
    #[must_use]
    pub fn new(scroll_compensation_rows: usize) -> Self {
        Self {
            state: None,
            expanded: None,
            scroll_compensation_rows,
        }
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        if self.state.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    /// In-flight drag, if any.
    #[must_use]
    pub fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn active(&self) -> Option<&ItemId> {
        self.state.as_ref().map(|s| &s.active)
    }

    #[must_use]
    pub fn over(&self) -> Option<&ItemId> {
        self.state.as_ref().and_then(|s| s.over.as_ref())
    }

    /// Card currently in detail view.
    #[must_use]
    pub fn expanded(&self) -> Option<&ItemId> {
        self.expanded.as_ref()
    }

    /// Mark a card as expanded (or none). Expanding the dragged card cancels
    /// the drag.
    pub fn set_expanded(&mut self, expanded: Option<ItemId>) {
        if expanded.is_some() && self.active() == expanded.as_ref() {
            self.cancel();
        }
        self.expanded = expanded;
    }

    /// Whether `id` may start a drag.
    #[must_use]
    pub fn can_drag(&self, id: &ItemId, order: &OrderManager) -> bool {
        order.contains(id) && !order.is_pinned(id) && self.expanded.as_ref() != Some(id)
    }

    /// Start dragging `id`. Refused while another drag is active or when the
    /// card cannot be dragged.
    pub fn begin(&mut self, id: &ItemId, order: &OrderManager, source: DragSource) -> bool {
        if self.state.is_some() || !self.can_drag(id, order) {
            return false;
        }
        tracing::debug!(message = "drag.begin", id = %id, source = ?source);
        self.state = Some(DragState {
            active: id.clone(),
            over: None,
            source,
        });
        true
    }

    /// Record the current drop target. Returns whether it changed.
    pub fn hover(&mut self, over: Option<ItemId>) -> bool {
        match self.state.as_mut() {
            Some(state) if state.over != over => {
                state.over = over;
                true
            }
            _ => false,
        }
    }

    /// Shift the drop target one slot (left/right) or one row (up/down)
    /// through the unpinned region, starting from the current target or the
    /// dragged card.
    pub fn step_over(
        &mut self,
        direction: Direction,
        order: &OrderManager,
        layout: &GridLayout,
    ) -> bool {
        let Some(state) = self.state.as_ref() else {
            return false;
        };
        let anchor = state.over.as_ref().unwrap_or(&state.active);
        let Some(current) = order.position_of(anchor) else {
            return false;
        };
        let len = order.display_len();
        let first = order.pinned_display_len();
        if first >= len {
            return false;
        }
        let step = layout.columns() as usize;
        let target = match direction {
            Direction::Left => current.saturating_sub(1),
            Direction::Right => current.saturating_add(1),
            Direction::Up => current.saturating_sub(step),
            Direction::Down => current.saturating_add(step),
        }
        .clamp(first, len - 1);
        let next = order.id_at(target).cloned();
        self.hover(next)
    }

    /// Commit the drag.
    ///
    /// The order changes only if both cards are displayed, distinct, and
    /// unpinned. Always returns to idle.
    pub fn drop(&mut self, order: &mut OrderManager, layout: &GridLayout) -> DropOutcome {
        let Some(state) = self.state.take() else {
            return DropOutcome::Unchanged;
        };
        let outcome = self.resolve_drop(&state, order, layout);
        tracing::debug!(message = "drag.drop", id = %state.active, outcome = ?outcome);
        outcome
    }

    /// Abandon the drag. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        match self.state.take() {
            Some(state) => {
                tracing::debug!(message = "drag.cancel", id = %state.active);
                true
            }
            None => false,
        }
    }

    /// Cancel if the dragged card left the collection or became pinned.
    pub fn revalidate(&mut self, order: &OrderManager) -> bool {
        let stale = self
            .state
            .as_ref()
            .is_some_and(|s| !order.contains(&s.active) || order.is_pinned(&s.active));
        stale && self.cancel()
    }

    fn resolve_drop(
        &self,
        state: &DragState,
        order: &mut OrderManager,
        layout: &GridLayout,
    ) -> DropOutcome {
        if !order.contains(&state.active) {
            return DropOutcome::Cancelled;
        }
        let Some(over) = state.over.as_ref() else {
            return DropOutcome::Unchanged;
        };
        if !order.contains(over) {
            return DropOutcome::Cancelled;
        }
        if *over == state.active || order.is_pinned(over) || order.is_pinned(&state.active) {
            return DropOutcome::Unchanged;
        }
        let Some(from) = order.position_of(&state.active) else {
            return DropOutcome::Cancelled;
        };
        if order.move_unpinned(&state.active, over) == MoveOutcome::Unchanged {
            return DropOutcome::Unchanged;
        }
        let to = order.position_of(&state.active).unwrap_or(from);
        let (old_row, new_row) = (layout.row_of(from), layout.row_of(to));
        let scroll_to = (old_row.abs_diff(new_row) > self.scroll_compensation_rows).then_some(new_row);
        DropOutcome::Moved {
            from,
            to,
            scroll_to,
        }
    }
}
