//! # View Models
//!
//! One view model per route. Each is built with its dependencies, issues
//! the REST calls its route needs, and returns the decorated state the
//! template binds to.

pub mod blocks;
pub mod boards;
pub mod records;

pub use blocks::{BlockState, BlockView, BlocksDayState, BlocksDayView};
pub use boards::{BoardState, BoardView, BoardsState, BoardsView, ListedBoard, NIL_BOARD_NAME};
pub use records::{
    AuthorView, AuthorsView, BlacklistState, BlacklistView, BulletinListState, BulletinListView,
    BulletinView, ListKind, StatusState,
};
