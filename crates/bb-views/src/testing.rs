//! In-memory `BulletinApi` with per-call delays, for timing-sensitive tests
//! that a mockall expectation cannot express.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bb_core::error::{AppError, Result};
use bb_core::models::*;
use bb_core::traits::BulletinApi;

#[derive(Default)]
pub struct FakeApi {
    pub boards: HashMap<String, (Duration, Board)>,
    pub status_delay: Duration,
    pub status_calls: AtomicUsize,
    pub status_in_flight: AtomicUsize,
    pub max_status_in_flight: AtomicUsize,
}

impl FakeApi {
    pub fn with_board(mut self, name: &str, delay: Duration, bulletins: Vec<Bulletin>) -> Self {
        let board = Board {
            summary: BoardSummary {
                name: name.to_string(),
                ..Default::default()
            },
            bulletins,
            ..Default::default()
        };
        self.boards.insert(name.to_string(), (delay, board));
        self
    }

    pub fn with_status_delay(mut self, delay: Duration) -> Self {
        self.status_delay = delay;
        self
    }
}

fn missing(what: &str, id: &str) -> AppError {
    AppError::NotFound(what.to_string(), id.to_string())
}

#[async_trait]
impl BulletinApi for FakeApi {
    async fn list_boards(&self) -> Result<Vec<BoardSummary>> {
        Ok(self.boards.values().map(|(_, b)| b.summary.clone()).collect())
    }

    async fn get_board(&self, name: &str) -> Result<Board> {
        let (delay, board) = self.boards.get(name).ok_or_else(|| missing("board", name))?;
        tokio::time::sleep(*delay).await;
        Ok(board.clone())
    }

    async fn get_nil_board(&self) -> Result<Board> {
        Err(missing("board", ""))
    }

    async fn get_bulletin(&self, txid: &str) -> Result<Bulletin> {
        Err(missing("bulletin", txid))
    }

    async fn get_recent(&self) -> Result<Vec<Bulletin>> {
        Ok(Vec::new())
    }

    async fn get_unconfirmed(&self) -> Result<Vec<Bulletin>> {
        Ok(Vec::new())
    }

    async fn get_author(&self, author: &str) -> Result<AuthorSummary> {
        Err(missing("author", author))
    }

    async fn list_authors(&self) -> Result<Vec<AuthorSummary>> {
        Ok(Vec::new())
    }

    async fn get_blocks_for_day(&self, _day: &str) -> Result<Vec<BlockHead>> {
        Ok(Vec::new())
    }

    async fn get_block(&self, hash: &str) -> Result<Block> {
        Err(missing("block", hash))
    }

    async fn get_status(&self) -> Result<Status> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.status_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_status_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.status_delay).await;

        self.status_in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(Status::default())
    }

    async fn get_blacklist(&self) -> Result<Vec<BlacklistEntry>> {
        Ok(Vec::new())
    }
}
