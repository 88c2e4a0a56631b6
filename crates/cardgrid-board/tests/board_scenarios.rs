//! End-to-end board scenarios: refresh, pinning, drag, persistence, resize.

use cardgrid_board::{
    Board, BoardConfig, BoardMsg, DropOutcome, FileStore, ItemId, MemoryStore, OrderStore,
    PersistedOrder,
};
use cardgrid_core::event::{Direction, Event, KeyCommand, PointerEvent};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

fn ids(keys: &[&str]) -> Vec<ItemId> {
    keys.iter().map(|k| ItemId::from(*k)).collect()
}

fn keys<S: OrderStore>(board: &Board<S>) -> Vec<String> {
    board
        .display_order()
        .iter()
        .map(|id| id.as_str().to_owned())
        .collect()
}

fn open<S: OrderStore>(store: S) -> Board<S> {
    let mut board = Board::open(BoardConfig::default(), store);
    board.update(BoardMsg::Resize {
        width: 1000,
        height: 760,
    });
    board
}

#[test]
fn pin_then_drag_scenario() {
    init_tracing();
    let mut board = open(MemoryStore::new());
    board.update(BoardMsg::Refresh(ids(&["A", "B", "C", "D", "E"])));
    board.update(BoardMsg::TogglePin(ItemId::from("C")));
    assert_eq!(keys(&board), ["C", "A", "B", "D", "E"]);

    board.update(BoardMsg::BeginDrag(ItemId::from("E")));
    board.update(BoardMsg::Hover(Some(ItemId::from("A"))));
    let update = board.update(BoardMsg::Drop);
    assert_eq!(
        update.drop,
        Some(DropOutcome::Moved {
            from: 4,
            to: 1,
            scroll_to: None
        })
    );
    assert_eq!(keys(&board), ["C", "E", "A", "B", "D"]);

    // Dropping onto the pinned card is refused.
    board.update(BoardMsg::BeginDrag(ItemId::from("D")));
    board.update(BoardMsg::Hover(Some(ItemId::from("C"))));
    assert_eq!(board.update(BoardMsg::Drop).drop, Some(DropOutcome::Unchanged));
    assert_eq!(keys(&board), ["C", "E", "A", "B", "D"]);
}

#[test]
fn file_store_survives_reopen() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("order.json");

    {
        let mut board = open(FileStore::new(&path));
        board.update(BoardMsg::Refresh(ids(&["A", "B", "C", "D"])));
        board.update(BoardMsg::TogglePin(ItemId::from("D")));
        board.update(BoardMsg::Move {
            from: ItemId::from("C"),
            to: ItemId::from("A"),
        });
        assert_eq!(keys(&board), ["D", "C", "A", "B"]);
    }

    let mut reopened = open(FileStore::new(&path));
    // New card arrives, B is gone.
    reopened.update(BoardMsg::Refresh(ids(&["A", "C", "D", "F"])));
    assert_eq!(keys(&reopened), ["D", "C", "A", "F"]);
}

#[test]
fn corrupt_file_starts_empty() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("order.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut board = open(FileStore::new(&path));
    board.update(BoardMsg::Refresh(ids(&["x", "y"])));
    assert_eq!(keys(&board), ["x", "y"]);

    // The next save replaces the corrupt file.
    let mut store = FileStore::new(&path);
    assert_eq!(
        store.load().unwrap(),
        Some(PersistedOrder {
            pinned: Vec::new(),
            unpinned: ids(&["x", "y"]),
        })
    );
}

#[test]
fn read_only_store_reports_but_keeps_order() {
    init_tracing();
    let mut store = MemoryStore::new();
    store.set_read_only(true);
    let mut board = open(store);

    let update = board.update(BoardMsg::Refresh(ids(&["A", "B"])));
    assert!(update.persist_error.is_some());
    let update = board.update(BoardMsg::TogglePin(ItemId::from("B")));
    assert!(update.persist_error.is_some());
    assert!(update.order_changed);
    assert_eq!(keys(&board), ["B", "A"]);
    assert_eq!(board.store().save_count(), 0);
}

#[test]
fn pointer_below_threshold_is_a_click() {
    init_tracing();
    let mut board = open(MemoryStore::new());
    board.update(BoardMsg::Refresh(ids(&["A", "B", "C"])));
    let input = |e| BoardMsg::Input(Event::Pointer(e));

    board.update(input(PointerEvent::down(10, 10)));
    board.update(input(PointerEvent::moved(11, 11)));
    assert!(!board.drag().is_dragging());
    let update = board.update(input(PointerEvent::up(11, 11)));
    assert!(update.drop.is_none());
    assert_eq!(board.focus(), Some(&ItemId::from("A")));
}

#[test]
fn pointer_leave_cancels_drag() {
    init_tracing();
    let mut board = open(MemoryStore::new());
    board.update(BoardMsg::Refresh(ids(&["A", "B", "C"])));
    let input = |e| BoardMsg::Input(Event::Pointer(e));

    board.update(input(PointerEvent::down(10, 10)));
    board.update(input(PointerEvent::moved(400, 10)));
    assert_eq!(board.drag().active(), Some(&ItemId::from("A")));
    assert_eq!(board.drag().over(), Some(&ItemId::from("B")));

    let leave = cardgrid_core::event::PointerEvent::new(
        cardgrid_core::event::PointerEventKind::Leave,
        cardgrid_core::geometry::Position::new(400, 10),
    );
    let update = board.update(input(leave));
    assert!(update.drag_changed);
    assert!(!board.drag().is_dragging());
    assert_eq!(keys(&board), ["A", "B", "C"]);
}

#[test]
fn pinned_card_cannot_be_dragged_by_pointer() {
    init_tracing();
    let mut board = open(MemoryStore::new());
    board.update(BoardMsg::Refresh(ids(&["A", "B"])));
    board.update(BoardMsg::TogglePin(ItemId::from("B")));
    // B is displayed first.
    let input = |e| BoardMsg::Input(Event::Pointer(e));
    board.update(input(PointerEvent::down(10, 10)));
    board.update(input(PointerEvent::moved(400, 10)));
    assert!(!board.drag().is_dragging());
}

#[test]
fn keyboard_row_step_in_wide_layout() {
    init_tracing();
    let mut board = open(MemoryStore::new());
    board.update(BoardMsg::Refresh(ids(&["A", "B", "C", "D", "E", "F"])));
    board.update(BoardMsg::SetFocus(Some(ItemId::from("A"))));
    let key = |c| BoardMsg::Input(Event::Key(c));

    board.update(key(KeyCommand::Pick));
    board.update(key(KeyCommand::Move(Direction::Down)));
    assert_eq!(board.drag().over(), Some(&ItemId::from("D")));
    board.update(key(KeyCommand::Drop));
    assert_eq!(keys(&board), ["B", "C", "D", "A", "E", "F"]);
}

#[test]
fn focus_loss_cancels_drag() {
    init_tracing();
    let mut board = open(MemoryStore::new());
    board.update(BoardMsg::Refresh(ids(&["A", "B"])));
    board.update(BoardMsg::BeginDrag(ItemId::from("A")));
    let update = board.update(BoardMsg::Input(Event::Focus(false)));
    assert!(update.drag_changed);
    assert!(!board.drag().is_dragging());
}

#[test]
fn resize_recomputes_window() {
    init_tracing();
    let collection: Vec<ItemId> = (0..300).map(|i| ItemId::new(format!("c{i}"))).collect();
    let mut board = open(MemoryStore::new());
    board.update(BoardMsg::Refresh(collection));
    let wide = board.visible_items().len();
    assert!(wide <= 3 * (3 + 2 + 1));

    let update = board.update(BoardMsg::Input(Event::Resize {
        width: 700,
        height: 760,
    }));
    assert!(update.layout_changed);
    assert_eq!(board.view().layout().items_per_row, 2);
    let medium = board.visible_items();
    assert_eq!(medium.first().map(|v| v.layout.column), Some(0));
    assert!(medium.iter().all(|v| v.layout.column < 2));
    assert_eq!(board.total_height(), 150 * 296);
}

#[test]
fn escape_respects_cancel_on_escape() {
    init_tracing();
    let mut config = BoardConfig::default();
    config.drag.cancel_on_escape = false;
    let mut board = Board::open(config, MemoryStore::new());
    board.update(BoardMsg::Resize {
        width: 1000,
        height: 760,
    });
    board.update(BoardMsg::Refresh(ids(&["A", "B", "C"])));
    let input = |e| BoardMsg::Input(Event::Pointer(e));

    board.update(input(PointerEvent::down(10, 10)));
    board.update(input(PointerEvent::moved(400, 10)));
    let escape = board.update(BoardMsg::Input(Event::Key(KeyCommand::Cancel)));
    assert!(!escape.drag_changed);
    assert!(board.drag().is_dragging());
    assert!(board.gesture().is_dragging());

    let update = board.update(input(PointerEvent::up(400, 10)));
    assert!(matches!(update.drop, Some(DropOutcome::Moved { .. })));
    assert_eq!(keys(&board), ["B", "A", "C"]);

    // Keyboard drags still cancel on Escape.
    board.update(BoardMsg::SetFocus(Some(ItemId::from("C"))));
    board.update(BoardMsg::Input(Event::Key(KeyCommand::Pick)));
    let escape = board.update(BoardMsg::Input(Event::Key(KeyCommand::Cancel)));
    assert!(escape.drag_changed);
    assert!(!board.drag().is_dragging());
}

#[test]
fn escape_cancels_pointer_drag_by_default() {
    init_tracing();
    let mut board = open(MemoryStore::new());
    board.update(BoardMsg::Refresh(ids(&["A", "B", "C"])));
    let input = |e| BoardMsg::Input(Event::Pointer(e));

    board.update(input(PointerEvent::down(10, 10)));
    board.update(input(PointerEvent::moved(400, 10)));
    let escape = board.update(BoardMsg::Input(Event::Key(KeyCommand::Cancel)));
    assert!(escape.drag_changed);
    assert!(!board.gesture().is_pressed());

    let update = board.update(input(PointerEvent::up(400, 10)));
    assert!(update.drop.is_none());
    assert_eq!(keys(&board), ["A", "B", "C"]);
}
