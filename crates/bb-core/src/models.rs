//! # Wire Models
//!
//! These structs mirror the JSON the bulletin-board backend serves.
//! Fields the explorer does not interpret are kept in `extra` so a payload
//! survives decoding untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Summary of a single board as listed by `/api/boards`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSummary {
    /// Board name exactly as posted. The nil board has an empty name.
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "numBltns", skip_serializing_if = "Option::is_none")]
    pub num_bulletins: Option<u64>,
    /// Epoch seconds of the block that started the board
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Epoch seconds of the latest post
    #[serde(default, rename = "lastActive", skip_serializing_if = "Option::is_none")]
    pub last_active: Option<i64>,
    #[serde(default, rename = "createdBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A board together with every bulletin posted to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub summary: BoardSummary,
    #[serde(default, rename = "bltns", alias = "bulletins")]
    pub bulletins: Vec<Bulletin>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The fundamental unit of the public record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bulletin {
    pub txid: String,
    /// Epoch seconds reported by the author
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    #[serde(default, rename = "msg", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Hash of the containing block, absent while unconfirmed
    #[serde(default, rename = "blk", skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(default, rename = "blkHeight", skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    #[serde(default, rename = "blkTimestamp", skip_serializing_if = "Option::is_none")]
    pub block_timestamp: Option<i64>,
    #[serde(default, rename = "bannedReason", skip_serializing_if = "Option::is_none")]
    pub banned_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Header fields of a block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockHead {
    #[serde(default)]
    pub hash: String,
    #[serde(default, rename = "prevHash", skip_serializing_if = "Option::is_none")]
    pub prev_hash: Option<String>,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub height: u64,
    #[serde(default, rename = "numBltns", skip_serializing_if = "Option::is_none")]
    pub num_bulletins: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A block and the bulletins it confirmed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<BlockHead>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, rename = "bltns", alias = "bulletins")]
    pub bulletins: Vec<Bulletin>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Block {
    /// The block hash, wherever the backend chose to put it.
    pub fn block_hash(&self) -> Option<&str> {
        self.hash
            .as_deref()
            .or_else(|| self.head.as_ref().map(|h| h.hash.as_str()))
    }
}

/// Backend status served by `/api/status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    #[serde(default, rename = "blockHeight", skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    #[serde(default, rename = "latestBlk", skip_serializing_if = "Option::is_none")]
    pub latest_block: Option<BlockHead>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Epoch seconds at which the backend process started
    #[serde(default, rename = "appStart", skip_serializing_if = "Option::is_none")]
    pub app_start: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Status {
    /// Height of the chain tip as last reported.
    /// An explicit `blockHeight` wins over the latest block header.
    pub fn chain_height(&self) -> Option<u64> {
        self.block_height
            .or_else(|| self.latest_block.as_ref().map(|b| b.height))
    }
}

/// Author summary. The explorer never looks inside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorSummary(pub Value);

/// A flagged transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlacklistEntry {
    pub txid: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
