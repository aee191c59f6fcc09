//! Day-of-blocks and single block views.

use std::sync::Arc;

use bb_core::error::Result;
use bb_core::format::{format_day_str, parse_day_str, DayParseError};
use bb_core::models::{Block, BlockHead};
use bb_core::traits::BulletinApi;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::decorate::{decorate_bulletins, DecoratedBulletin};
use crate::router::Route;
use crate::status::StatusCache;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlocksDayState {
    /// Midnight UTC of the day shown
    pub day: DateTime<Utc>,
    #[serde(rename = "dayStr")]
    pub day_str: String,
    pub blocks: Vec<BlockHead>,
}

impl BlocksDayState {
    pub fn previous_day(&self) -> Route {
        day_route(self.day - Duration::days(1))
    }

    pub fn next_day(&self) -> Route {
        day_route(self.day + Duration::days(1))
    }
}

fn day_route(day: DateTime<Utc>) -> Route {
    Route::BlocksDay(format_day_str(&day))
}

/// Route for the day `days` away from the `DD-MM-YYYY` segment `day_str`.
pub fn shift_day(day_str: &str, days: i64) -> std::result::Result<Route, DayParseError> {
    let day = parse_day_str(day_str)?;
    Ok(day_route(day + Duration::days(days)))
}

pub struct BlocksDayView {
    api: Arc<dyn BulletinApi>,
}

impl BlocksDayView {
    pub fn new(api: Arc<dyn BulletinApi>) -> Self {
        Self { api }
    }

    /// Rejects a malformed segment before any request is made.
    /// The backend is always asked with the canonical zero-padded form.
    pub async fn load(&self, day_str: &str) -> Result<BlocksDayState> {
        let day = parse_day_str(day_str)?;
        let canonical = format_day_str(&day);
        let blocks = self.api.get_blocks_for_day(&canonical).await?;
        Ok(BlocksDayState {
            day,
            day_str: canonical,
            blocks,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockState {
    /// Block without its bulletins, which move to `bulletins`
    pub block: Block,
    pub bulletins: Vec<DecoratedBulletin>,
}

impl BlockState {
    /// Flips the display order in place.
    pub fn reverse(&mut self) {
        self.bulletins.reverse();
    }
}

pub struct BlockView {
    api: Arc<dyn BulletinApi>,
    status: StatusCache,
}

impl BlockView {
    pub fn new(api: Arc<dyn BulletinApi>, status: StatusCache) -> Self {
        Self { api, status }
    }

    pub async fn load(&self, hash: &str) -> Result<BlockState> {
        let mut block = self.api.get_block(hash).await?;
        let bulletins = decorate_bulletins(std::mem::take(&mut block.bulletins), self.status.block_height());
        Ok(BlockState { block, bulletins })
    }
}
