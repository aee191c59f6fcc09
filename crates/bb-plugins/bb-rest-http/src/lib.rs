//! # bb-rest-http
//!
//! reqwest implementation of `BulletinApi`.
//! One GET per resource under `{base}/api`, no retries.

use std::time::Duration;

use async_trait::async_trait;
use bb_core::error::{AppError, Result};
use bb_core::models::{AuthorSummary, BlacklistEntry, Block, BlockHead, Board, BoardSummary, Bulletin, Status};
use bb_core::paths::encode_segment;
use bb_core::traits::BulletinApi;
use serde::de::DeserializeOwned;
use tracing::debug;

pub struct HttpBulletinApi {
    http: reqwest::Client,
    /// Backend origin without a trailing slash (e.g., "http://127.0.0.1:1054")
    base: String,
}

impl HttpBulletinApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("http client: {e}")))?;
        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds `/api/{resource}` or `/api/{resource}/{encoded id}`.
    fn api_path(resource: &str, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("/api/{resource}/{}", encode_segment(id)),
            None => format!("/api/{resource}"),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: &str, id: Option<&str>) -> Result<T> {
        let path = Self::api_path(resource, id);
        let url = format!("{}{}", self.base, path);
        debug!(%url, "GET");

        // 1. Transport
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        // 2. Status
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(resource.to_string(), path));
        }
        if !status.is_success() {
            return Err(AppError::Status { status: status.as_u16(), path });
        }

        // 3. Body
        let body = resp
            .bytes()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| AppError::Decode {
            path,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl BulletinApi for HttpBulletinApi {
    async fn list_boards(&self) -> Result<Vec<BoardSummary>> {
        self.fetch("boards", None).await
    }

    async fn get_board(&self, name: &str) -> Result<Board> {
        self.fetch("board", Some(name)).await
    }

    async fn get_nil_board(&self) -> Result<Board> {
        self.fetch("nilboard", None).await
    }

    async fn get_bulletin(&self, txid: &str) -> Result<Bulletin> {
        self.fetch("bulletin", Some(txid)).await
    }

    async fn get_recent(&self) -> Result<Vec<Bulletin>> {
        self.fetch("recent", None).await
    }

    async fn get_unconfirmed(&self) -> Result<Vec<Bulletin>> {
        self.fetch("unconfirmed", None).await
    }

    async fn get_author(&self, author: &str) -> Result<AuthorSummary> {
        self.fetch("author", Some(author)).await
    }

    async fn list_authors(&self) -> Result<Vec<AuthorSummary>> {
        self.fetch("authors", None).await
    }

    async fn get_blocks_for_day(&self, day: &str) -> Result<Vec<BlockHead>> {
        self.fetch("blocks", Some(day)).await
    }

    async fn get_block(&self, hash: &str) -> Result<Block> {
        self.fetch("block", Some(hash)).await
    }

    async fn get_status(&self) -> Result<Status> {
        self.fetch("status", None).await
    }

    async fn get_blacklist(&self) -> Result<Vec<BlacklistEntry>> {
        self.fetch("blacklist", None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_single_segments() {
        let path = HttpBulletinApi::api_path("board", Some("a b/c"));
        assert_eq!(path, "/api/board/a%20b%2Fc");

        let path = HttpBulletinApi::api_path("bulletin", Some("../status?x=1"));
        assert_eq!(path, "/api/bulletin/..%2Fstatus%3Fx%3D1");
    }

    #[test]
    fn collection_paths_have_no_id() {
        assert_eq!(HttpBulletinApi::api_path("boards", None), "/api/boards");
    }

    #[test]
    fn base_loses_trailing_slash() {
        let api = HttpBulletinApi::new("http://localhost:1054/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.base, "http://localhost:1054");
    }
}
