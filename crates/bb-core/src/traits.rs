//! # Core Traits (Ports)
//!
//! Any backend client must implement these traits to be used by the views.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AuthorSummary, BlacklistEntry, Block, BlockHead, Board, BoardSummary, Bulletin, Status};

/// Read-only contract of the bulletin-board REST API.
///
/// One method per backend resource. Implementations percent-encode every
/// identifier before it reaches a request path and never retry.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BulletinApi: Send + Sync {
    // Boards
    async fn list_boards(&self) -> Result<Vec<BoardSummary>>;
    async fn get_board(&self, name: &str) -> Result<Board>;
    /// Bulletins that were posted without a board.
    async fn get_nil_board(&self) -> Result<Board>;

    // Bulletins
    async fn get_bulletin(&self, txid: &str) -> Result<Bulletin>;
    /// Bulletins confirmed within the last few blocks.
    async fn get_recent(&self) -> Result<Vec<Bulletin>>;
    async fn get_unconfirmed(&self) -> Result<Vec<Bulletin>>;

    // Authors
    async fn get_author(&self, author: &str) -> Result<AuthorSummary>;
    async fn list_authors(&self) -> Result<Vec<AuthorSummary>>;

    // Blocks
    /// `day` is a `DD-MM-YYYY` segment.
    async fn get_blocks_for_day(&self, day: &str) -> Result<Vec<BlockHead>>;
    async fn get_block(&self, hash: &str) -> Result<Block>;

    // Meta
    async fn get_status(&self) -> Result<Status>;
    async fn get_blacklist(&self) -> Result<Vec<BlacklistEntry>>;
}
