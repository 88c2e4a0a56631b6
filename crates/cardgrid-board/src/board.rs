#![forbid(unsafe_code)]

//! Single-writer board store.
//!
//! [`Board`] owns every piece of mutable board state (order, drag, scroll,
//! layout) and accepts changes only through [`Board::update`]. Each message
//! is applied synchronously; order mutations are followed by a save to the
//! [`OrderStore`] whose outcome never affects the in-memory order.
//!
//! # Message flow
//!
//! ```text
//! Refresh / TogglePin / Move ──► OrderManager ──► display order ──► GridView
//! Input(Pointer) ──► PointerDragDetector ──► DragCoordinator ──► OrderManager
//! Input(Key)     ──► DragCoordinator (keyboard path)
//! Resize         ──► LayoutPolicy ──► GridView (full recompute, drag cancelled)
//! ```

use cardgrid_core::event::{Direction, Event, KeyCommand};
use cardgrid_core::gesture::{DragSignal, PointerDragDetector};
use cardgrid_layout::ScrollAlign;

use crate::config::BoardConfig;
use crate::drag::{DragCoordinator, DragSource, DropOutcome};
use crate::id::{ItemId, ItemSource};
use crate::order::{OrderManager, PinToggle};
use crate::persistence::{OrderStore, StorageError};
use crate::view::{GridView, VisibleItem};

/// Messages accepted by [`Board::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardMsg {
    /// A fresh collection from the item source.
    Refresh(Vec<ItemId>),
    /// Pin or unpin a card.
    TogglePin(ItemId),
    /// Move an unpinned card onto another's slot.
    Move { from: ItemId, to: ItemId },
    /// The scroll container moved.
    Scroll(i64),
    /// The container resized.
    Resize { width: u32, height: u32 },
    /// Start dragging a card.
    BeginDrag(ItemId),
    /// The drag is over a card (or nothing).
    Hover(Option<ItemId>),
    /// Commit the drag.
    Drop,
    /// Abandon the drag.
    Cancel,
    /// Card shown in detail view (not draggable).
    SetExpanded(Option<ItemId>),
    /// Keyboard focus, used by [`KeyCommand::Pick`].
    SetFocus(Option<ItemId>),
    /// Raw input, routed through gesture detection.
    Input(Event),
}

impl From<Event> for BoardMsg {
    fn from(event: Event) -> Self {
        Self::Input(event)
    }
}

/// What an update changed.
#[derive(Debug, Default)]
pub struct BoardUpdate {
    /// The display order changed.
    pub order_changed: bool,
    /// Row/column placement changed.
    pub layout_changed: bool,
    /// The scroll offset changed.
    pub scroll_changed: bool,
    /// A drag started, moved its target, or ended.
    pub drag_changed: bool,
    /// Result of a drop, if one happened.
    pub drop: Option<DropOutcome>,
    /// Save failure, if a save was attempted and failed.
    pub persist_error: Option<StorageError>,
}

impl BoardUpdate {
    /// Whether anything visible changed.
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.order_changed || self.layout_changed || self.scroll_changed || self.drag_changed
    }
}

/// Board state behind a single writer.
#[derive(Debug)]
pub struct Board<S: OrderStore> {
    config: BoardConfig,
    order: OrderManager,
    display: Vec<ItemId>,
    drag: DragCoordinator,
    gesture: PointerDragDetector,
    view: GridView,
    focus: Option<ItemId>,
    store: S,
}

impl<S: OrderStore> Board<S> {
    /// Open a board, restoring the saved order from `store`.
    ///
    /// A load failure is logged and the board starts with an empty order.
    pub fn open(config: BoardConfig, mut store: S) -> Self {
        let persisted = match store.load() {
            Ok(saved) => saved.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(message = "board.load_failed", error = %err);
                Default::default()
            }
        };
        let order = OrderManager::from_persisted(persisted, config.order);
        let layout = config.layout.derive_layout(0);
        Self {
            drag: DragCoordinator::new(config.drag.scroll_compensation_rows),
            gesture: PointerDragDetector::new(config.drag.gesture()),
            view: GridView::new(layout, config.layout.overscan),
            display: Vec::new(),
            focus: None,
            order,
            config,
            store,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn order(&self) -> &OrderManager {
        &self.order
    }

    #[must_use]
    pub fn drag(&self) -> &DragCoordinator {
        &self.drag
    }

    #[must_use]
    pub fn view(&self) -> &GridView {
        &self.view
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Pointer gesture tracker.
    #[must_use]
    pub fn gesture(&self) -> &PointerDragDetector {
        &self.gesture
    }

    #[must_use]
    pub fn focus(&self) -> Option<&ItemId> {
        self.focus.as_ref()
    }

    /// Current display order.
    #[must_use]
    pub fn display_order(&self) -> &[ItemId] {
        &self.display
    }

    /// Cards to draw for the current scroll position.
    #[must_use]
    pub fn visible_items(&self) -> Vec<VisibleItem> {
        self.view.visible_items(&self.display)
    }

    /// Full content height.
    #[must_use]
    pub fn total_height(&self) -> u64 {
        self.view.total_height()
    }

    /// Reconcile against an item source.
    pub fn refresh_from<Src: ItemSource + ?Sized>(&mut self, source: &Src) -> BoardUpdate {
        self.update(BoardMsg::Refresh(source.item_ids()))
    }

    /// Apply one message.
    pub fn update(&mut self, msg: BoardMsg) -> BoardUpdate {
        let mut out = BoardUpdate::default();
        match msg {
            BoardMsg::Refresh(ids) => {
                let report = self.order.reconcile(ids);
                if report.order_changed() {
                    self.persist(&mut out);
                }
                out.order_changed = self.sync_display();
                if self.drag.revalidate(&self.order) {
                    self.gesture.reset();
                    out.drag_changed = true;
                }
                if self.focus.as_ref().is_some_and(|f| !self.order.contains(f)) {
                    self.focus = None;
                }
            }
            BoardMsg::TogglePin(id) => {
                if self.order.toggle_pin(&id) != PinToggle::Unchanged {
                    self.persist(&mut out);
                    out.order_changed = self.sync_display();
                    if self.drag.revalidate(&self.order) {
                        self.gesture.reset();
                        out.drag_changed = true;
                    }
                }
            }
            BoardMsg::Move { from, to } => {
                if self.order.move_unpinned(&from, &to).is_moved() {
                    self.persist(&mut out);
                    out.order_changed = self.sync_display();
                }
            }
            BoardMsg::Scroll(offset) => {
                out.scroll_changed = self.view.set_scroll_offset(offset);
                tracing::trace!(
                    message = "board.scroll",
                    offset = self.view.scroll_offset(),
                    rows = ?self.view.window().rows()
                );
            }
            BoardMsg::Resize { width, height } => self.resize(width, height, &mut out),
            BoardMsg::BeginDrag(id) => {
                out.drag_changed = self.drag.begin(&id, &self.order, DragSource::Pointer);
            }
            BoardMsg::Hover(over) => out.drag_changed = self.drag.hover(over),
            BoardMsg::Drop => self.finish_drop(&mut out),
            BoardMsg::Cancel => {
                out.drag_changed = self.drag.cancel();
                self.gesture.reset();
            }
            BoardMsg::SetExpanded(id) => {
                let was_dragging = self.drag.is_dragging();
                self.drag.set_expanded(id);
                out.drag_changed = was_dragging != self.drag.is_dragging();
            }
            BoardMsg::SetFocus(id) => {
                self.focus = id.filter(|f| self.order.contains(f));
            }
            BoardMsg::Input(event) => self.handle_event(event, &mut out),
        }
        out
    }

    fn handle_event(&mut self, event: Event, out: &mut BoardUpdate) {
        match event {
            Event::Pointer(_) => self.handle_pointer(&event, out),
            Event::Key(command) => {
                for signal in self.gesture.process(&event) {
                    if signal == DragSignal::Cancel {
                        out.drag_changed |= self.drag.cancel();
                    }
                }
                self.handle_key(command, out);
            }
            Event::Resize { width, height } => self.resize(width, height, out),
            Event::Scroll(offset) => {
                out.scroll_changed = self.view.set_scroll_offset(offset);
            }
            Event::Focus(focused) => {
                self.gesture.process(&event);
                if !focused {
                    out.drag_changed |= self.drag.cancel();
                }
            }
        }
    }

    fn handle_pointer(&mut self, event: &Event, out: &mut BoardUpdate) {
        for signal in self.gesture.process(event) {
            match signal {
                DragSignal::Click { pos } => {
                    self.focus = self.view.hit_test(pos, &self.display).cloned();
                }
                DragSignal::Start { origin, .. } => {
                    if let Some(id) = self.view.hit_test(origin, &self.display).cloned() {
                        out.drag_changed |= self.drag.begin(&id, &self.order, DragSource::Pointer);
                    }
                }
                DragSignal::Move { current, .. } => {
                    let over = self.view.hit_test(current, &self.display).cloned();
                    out.drag_changed |= self.drag.hover(over);
                }
                DragSignal::End { end, .. } => {
                    let over = self.view.hit_test(end, &self.display).cloned();
                    self.drag.hover(over);
                    self.finish_drop(out);
                }
                DragSignal::Cancel => out.drag_changed |= self.drag.cancel(),
            }
        }
    }

    fn handle_key(&mut self, command: KeyCommand, out: &mut BoardUpdate) {
        match command {
            KeyCommand::Pick => {
                if let Some(id) = self.focus.clone() {
                    out.drag_changed |= self.drag.begin(&id, &self.order, DragSource::Keyboard);
                }
            }
            KeyCommand::Move(direction) if self.drag.is_dragging() => {
                out.drag_changed |= self.drag.step_over(direction, &self.order, self.view.layout());
            }
            KeyCommand::Move(direction) => self.move_focus(direction),
            KeyCommand::Drop => self.finish_drop(out),
            KeyCommand::Cancel => {
                // A pointer drag ignores Escape unless configured otherwise;
                // the gesture detector already made the same call.
                let pointer_drag = self
                    .drag
                    .state()
                    .is_some_and(|s| s.source == DragSource::Pointer);
                if !pointer_drag || self.config.drag.cancel_on_escape {
                    out.drag_changed |= self.drag.cancel();
                }
            }
        }
    }

    fn move_focus(&mut self, direction: Direction) {
        if self.display.is_empty() {
            return;
        }
        let step = self.view.layout().columns() as usize;
        let current = self
            .focus
            .as_ref()
            .and_then(|f| self.display.iter().position(|d| d == f));
        let next = match (current, direction) {
            (None, _) => 0,
            (Some(i), Direction::Left) => i.saturating_sub(1),
            (Some(i), Direction::Right) => i.saturating_add(1),
            (Some(i), Direction::Up) => i.saturating_sub(step),
            (Some(i), Direction::Down) => i.saturating_add(step),
        }
        .min(self.display.len() - 1);
        self.focus = Some(self.display[next].clone());
    }

    fn finish_drop(&mut self, out: &mut BoardUpdate) {
        let was_dragging = self.drag.is_dragging();
        let layout = *self.view.layout();
        let outcome = self.drag.drop(&mut self.order, &layout);
        out.drag_changed |= was_dragging;
        if let DropOutcome::Moved { scroll_to, .. } = outcome {
            self.persist(out);
            out.order_changed = self.sync_display();
            if let Some(row) = scroll_to {
                let before = self.view.scroll_offset();
                out.scroll_changed |= self.view.scroll_to_row(row, ScrollAlign::Center) != before;
            }
        }
        if was_dragging {
            out.drop = Some(outcome);
        }
    }

    fn resize(&mut self, width: u32, height: u32, out: &mut BoardUpdate) {
        let policy = &self.config.layout;
        let layout = policy.derive_layout(width);
        let container_height = policy.derive_container_height(height, &layout);
        let before = self.view.scroll_offset();
        out.layout_changed = self.view.set_layout(layout);
        self.view.set_viewport(width, container_height);
        out.scroll_changed |= self.view.scroll_offset() != before;
        if out.layout_changed {
            tracing::debug!(
                message = "board.layout",
                breakpoint = %layout.breakpoint,
                items_per_row = layout.items_per_row,
                item_height = layout.item_height,
                container_height
            );
            if self.drag.cancel() {
                out.drag_changed = true;
            }
            self.gesture.reset();
        }
    }

    fn sync_display(&mut self) -> bool {
        let display = self.order.display_order();
        let changed = display != self.display;
        self.display = display;
        self.view.set_item_count(self.display.len());
        changed
    }

    fn persist(&mut self, out: &mut BoardUpdate) {
        if let Err(err) = self.store.save(&self.order.snapshot()) {
            tracing::warn!(message = "board.persist_failed", error = %err);
            out.persist_error = Some(err);
        }
    }
}
