#![forbid(unsafe_code)]

//! Ordering, drag reordering, and the windowed grid view for cardgrid.
//!
//! - [`order`] - pinned-first display order over an external collection.
//! - [`drag`] - drag lifecycle and drop resolution against the order.
//! - [`view`] - binds the layout windower to a display order.
//! - [`persistence`] - load/save of the pinned and unpinned sequences.
//! - [`board`] - single-writer store combining all of the above.
//! - [`config`] - TOML/JSON board configuration.
//!
//! # Example
//!
//! ```
//! use cardgrid_board::{Board, BoardConfig, BoardMsg, ItemId, MemoryStore};
//!
//! let mut board = Board::open(BoardConfig::default(), MemoryStore::new());
//! board.update(BoardMsg::Resize { width: 1000, height: 760 });
//! board.update(BoardMsg::Refresh(vec![ItemId::from("a"), ItemId::from("b")]));
//! board.update(BoardMsg::TogglePin(ItemId::from("b")));
//! assert_eq!(board.display_order()[0].as_str(), "b");
//! ```

pub mod board;
pub mod config;
pub mod drag;
pub mod id;
pub mod order;
pub mod persistence;
pub mod view;

pub use board::{Board, BoardMsg, BoardUpdate};
pub use config::{BoardConfig, ConfigError, DragConfig};
pub use drag::{
    DEFAULT_SCROLL_COMPENSATION_ROWS, DragCoordinator, DragPhase, DragSource, DragState,
    DropOutcome,
};
pub use id::{ItemId, ItemSource, Keyed};
pub use order::{
    ArrivalPlacement, MoveOutcome, OrderManager, OrderPolicy, PinToggle, ReconcileReport,
    UnpinPlacement,
};
pub use persistence::{FileStore, MemoryStore, OrderStore, PersistedOrder, StorageError};
pub use view::{ContainerProps, ContentProps, GridView, VisibleItem};
