//! Board listing, single board and nil board views.

use std::sync::Arc;

use bb_core::error::Result;
use bb_core::models::Board;
use bb_core::traits::BulletinApi;
use serde::Serialize;

use crate::decorate::{decorate_bulletins, DecoratedBulletin, DecoratedSummary};
use crate::selection::BoardSelection;
use crate::status::StatusCache;

/// Display name given to the bucket of board-less bulletins.
pub const NIL_BOARD_NAME: &str = "The nil board.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedBoard {
    #[serde(flatten)]
    pub board: DecoratedSummary,
    /// Whether the listing's selection points at this board
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardsState {
    pub boards: Vec<ListedBoard>,
}

pub struct BoardsView {
    api: Arc<dyn BulletinApi>,
}

impl BoardsView {
    pub fn new(api: Arc<dyn BulletinApi>) -> Self {
        Self { api }
    }

    /// Lists every board, marking the one `selection` has open.
    pub async fn load(&self, selection: &BoardSelection) -> Result<BoardsState> {
        let summaries = self.api.list_boards().await?;
        let boards = summaries
            .into_iter()
            .map(|summary| {
                let open = selection.is_open(&summary.name);
                ListedBoard {
                    board: DecoratedSummary::listing(summary),
                    open,
                }
            })
            .collect();
        Ok(BoardsState { boards })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardState {
    pub summary: DecoratedSummary,
    pub bulletins: Vec<DecoratedBulletin>,
}

impl BoardState {
    pub fn decorate(board: Board, chain_height: Option<u64>) -> Self {
        Self {
            summary: DecoratedSummary::detailed(board.summary),
            bulletins: decorate_bulletins(board.bulletins, chain_height),
        }
    }
}

pub struct BoardView {
    api: Arc<dyn BulletinApi>,
    status: StatusCache,
}

impl BoardView {
    pub fn new(api: Arc<dyn BulletinApi>, status: StatusCache) -> Self {
        Self { api, status }
    }

    pub async fn load(&self, name: &str) -> Result<BoardState> {
        let board = self.api.get_board(name).await?;
        Ok(BoardState::decorate(board, self.status.block_height()))
    }

    /// Same decoration as a named board. The name is swapped for
    /// [`NIL_BOARD_NAME`] after `urlName` was derived, so links still
    /// point at the empty board name.
    pub async fn load_nil(&self) -> Result<BoardState> {
        let board = self.api.get_nil_board().await?;
        let mut state = BoardState::decorate(board, self.status.block_height());
        state.summary.summary.name = NIL_BOARD_NAME.to_string();
        Ok(state)
    }
}
