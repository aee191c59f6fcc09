//! Views that publish backend records mostly as served: a single bulletin,
//! authors, the blacklist, recent/unconfirmed feeds and the status header.

use std::sync::Arc;

use bb_core::error::Result;
use bb_core::models::{AuthorSummary, BlacklistEntry, Bulletin, Status};
use bb_core::traits::BulletinApi;
use serde::Serialize;

use crate::decorate::{decorate_bulletins, DecoratedBulletin};
use crate::status::StatusCache;

pub struct BulletinView {
    api: Arc<dyn BulletinApi>,
}

impl BulletinView {
    pub fn new(api: Arc<dyn BulletinApi>) -> Self {
        Self { api }
    }

    pub async fn load(&self, txid: &str) -> Result<Bulletin> {
        self.api.get_bulletin(txid).await
    }
}

pub struct AuthorView {
    api: Arc<dyn BulletinApi>,
}

impl AuthorView {
    pub fn new(api: Arc<dyn BulletinApi>) -> Self {
        Self { api }
    }

    pub async fn load(&self, author: &str) -> Result<AuthorSummary> {
        self.api.get_author(author).await
    }
}

pub struct AuthorsView {
    api: Arc<dyn BulletinApi>,
}

impl AuthorsView {
    pub fn new(api: Arc<dyn BulletinApi>) -> Self {
        Self { api }
    }

    pub async fn load(&self) -> Result<Vec<AuthorSummary>> {
        self.api.list_authors().await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlacklistState {
    pub blacklist: Vec<BlacklistEntry>,
    /// Txid to highlight, taken from `/blacklist/:txid`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
}

impl BlacklistState {
    pub fn is_active(&self, entry: &BlacklistEntry) -> bool {
        self.active.as_deref() == Some(entry.txid.as_str())
    }
}

pub struct BlacklistView {
    api: Arc<dyn BulletinApi>,
}

impl BlacklistView {
    pub fn new(api: Arc<dyn BulletinApi>) -> Self {
        Self { api }
    }

    pub async fn load(&self, active: Option<&str>) -> Result<BlacklistState> {
        let blacklist = self.api.get_blacklist().await?;
        Ok(BlacklistState {
            blacklist,
            active: active.map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Recent,
    Unconfirmed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletinListState {
    pub kind: ListKind,
    pub bulletins: Vec<DecoratedBulletin>,
}

pub struct BulletinListView {
    api: Arc<dyn BulletinApi>,
    status: StatusCache,
}

impl BulletinListView {
    pub fn new(api: Arc<dyn BulletinApi>, status: StatusCache) -> Self {
        Self { api, status }
    }

    pub async fn load(&self, kind: ListKind) -> Result<BulletinListState> {
        let bulletins = match kind {
            ListKind::Recent => self.api.get_recent().await?,
            ListKind::Unconfirmed => self.api.get_unconfirmed().await?,
        };
        Ok(BulletinListState {
            kind,
            bulletins: decorate_bulletins(bulletins, self.status.block_height()),
        })
    }
}

/// Header state: the cached status, no request of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "chainHeight", skip_serializing_if = "Option::is_none")]
    pub chain_height: Option<u64>,
}

impl StatusState {
    pub fn from_cache(cache: &StatusCache) -> Self {
        let status = cache.snapshot().map(|s| (*s).clone());
        Self {
            chain_height: status.as_ref().and_then(Status::chain_height),
            status,
        }
    }
}
