#![forbid(unsafe_code)]

//! cardgrid public facade crate.
//!
//! Re-exports the common types of the internal crates and a prelude for
//! day-to-day usage, plus a top-level [`Error`] covering storage and
//! configuration failures.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use cardgrid_core::event::{
    Direction, Event, KeyCommand, PointerButton, PointerEvent, PointerEventKind,
};
pub use cardgrid_core::geometry::Position;
pub use cardgrid_core::gesture::{DragGestureConfig, DragSignal, PointerDragDetector};

// --- Layout re-exports -----------------------------------------------------

pub use cardgrid_layout::{
    Breakpoint, Breakpoints, GridLayout, LayoutPolicy, Responsive, ScrollAlign, VirtualItem,
    Window, WindowParams, compute_visible, derive_container_height, derive_layout,
};

// --- Board re-exports ------------------------------------------------------

pub use cardgrid_board::{
    Board, BoardConfig, BoardMsg, BoardUpdate, ConfigError, DragConfig, DragCoordinator,
    DropOutcome, FileStore, GridView, ItemId, ItemSource, Keyed, MemoryStore, OrderManager,
    OrderPolicy, OrderStore, PersistedOrder, StorageError, VisibleItem,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for cardgrid apps.
#[derive(Debug)]
pub enum Error {
    /// Order storage failed.
    Storage(StorageError),
    /// Configuration could not be loaded or is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "storage: {err}"),
            Self::Config(err) => write!(f, "config: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for cardgrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load a board configuration and open a board over a JSON order file.
///
/// The order file need not exist yet.
pub fn open_file_board(
    config_path: impl AsRef<std::path::Path>,
    order_path: impl Into<std::path::PathBuf>,
) -> Result<Board<FileStore>> {
    let config = BoardConfig::load(config_path)?;
    Ok(Board::open(config, FileStore::new(order_path)))
}

pub mod prelude {
    pub use crate::{
        Board, BoardConfig, BoardMsg, Error, Event, ItemId, KeyCommand, OrderStore, PointerEvent,
        Result,
    };

    pub use crate::{board, core, layout};
}

pub use cardgrid_board as board;
pub use cardgrid_core as core;
pub use cardgrid_layout as layout;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn errors_convert_and_chain() {
        let err: Error = StorageError::Unavailable("offline".into()).into();
        assert!(err.to_string().starts_with("storage: "));
        assert!(err.source().is_some());

        let err: Error = ConfigError::Invalid("zero columns".into()).into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn open_file_board_reads_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("board.toml");
        std::fs::write(&config, "[drag]\nthreshold = 5\n").unwrap();

        let board = open_file_board(&config, dir.path().join("order.json")).unwrap();
        assert_eq!(board.config().drag.threshold, 5);
        assert!(board.display_order().is_empty());
    }

    #[test]
    fn open_file_board_rejects_unknown_format() {
        let err = open_file_board("board.yaml", "order.json").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn prelude_builds_a_board() {
        use crate::prelude::*;
        let mut board = Board::open(BoardConfig::default(), crate::MemoryStore::new());
        board.update(BoardMsg::Refresh(vec![ItemId::from("a")]));
        assert_eq!(board.display_order().len(), 1);
    }
}
