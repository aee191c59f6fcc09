//! # Display Decorations
//!
//! Presentation-only annotations layered over wire models. These types
//! serialize for the view and are never deserialized or sent back to the
//! backend.

use bb_core::format::{epoch_date, nice_date, precise_date};
use bb_core::models::{BoardSummary, Bulletin};
use bb_core::paths::encode_segment;
use serde::{Serialize, Serializer};

const IMAGE_BASE: &str = "/static/images/";

/// Confirmation depth bucket that selects a bulletin's depth image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationBucket {
    /// Not in any block yet. Image key `"0"`.
    Unconfirmed,
    /// Depth 0..=3, stored as `depth + 1` (1..=4).
    Shallow(u8),
    /// Deeper than three blocks. Image key `"total"`.
    Total,
}

impl ConfirmationBucket {
    /// Buckets `chain_height - block_height`.
    ///
    /// A block height above the cached chain height (the cache lags the
    /// backend) counts as depth 0. With no chain height known yet every
    /// confirmed bulletin is treated as depth 0.
    pub fn classify(chain_height: Option<u64>, block_height: Option<u64>) -> Self {
        let Some(block_height) = block_height else {
            return Self::Unconfirmed;
        };
        let depth = chain_height.unwrap_or(block_height).saturating_sub(block_height);
        match depth {
            0..=3 => Self::Shallow(depth as u8 + 1),
            _ => Self::Total,
        }
    }

    pub fn image_key(&self) -> String {
        match self {
            Self::Unconfirmed => "0".to_string(),
            Self::Shallow(n) => n.to_string(),
            Self::Total => "total".to_string(),
        }
    }

    /// e.g. `/static/images/2conf.png`
    pub fn image_path(&self) -> String {
        format!("{IMAGE_BASE}{}conf.png", self.image_key())
    }
}

impl Serialize for ConfirmationBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.image_key())
    }
}

/// URL-safe form of a board name, usable as one path segment.
pub fn url_name(name: &str) -> String {
    encode_segment(name)
}

/// A board summary plus its display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecoratedSummary {
    #[serde(flatten)]
    pub summary: BoardSummary,
    #[serde(rename = "urlName")]
    pub url_name: String,
    #[serde(rename = "createdAtDisplay", skip_serializing_if = "Option::is_none")]
    pub created_at_display: Option<String>,
    #[serde(rename = "lastActiveDisplay", skip_serializing_if = "Option::is_none")]
    pub last_active_display: Option<String>,
}

impl DecoratedSummary {
    /// Listing rows only need the URL name.
    pub fn listing(summary: BoardSummary) -> Self {
        Self {
            url_name: url_name(&summary.name),
            summary,
            created_at_display: None,
            last_active_display: None,
        }
    }

    pub fn detailed(summary: BoardSummary) -> Self {
        let date = |ts: Option<i64>| ts.map(|s| nice_date(&epoch_date(s)));
        Self {
            url_name: url_name(&summary.name),
            created_at_display: date(summary.created_at),
            last_active_display: date(summary.last_active),
            summary,
        }
    }
}

/// A bulletin plus its display timestamp and confirmation bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecoratedBulletin {
    #[serde(flatten)]
    pub bulletin: Bulletin,
    #[serde(rename = "timestampDisplay")]
    pub timestamp_display: String,
    pub confirmation: ConfirmationBucket,
    #[serde(rename = "depthImg")]
    pub depth_img: String,
}

impl DecoratedBulletin {
    pub fn new(bulletin: Bulletin, chain_height: Option<u64>) -> Self {
        let confirmation = ConfirmationBucket::classify(chain_height, bulletin.block_height);
        Self {
            timestamp_display: precise_date(bulletin.timestamp),
            depth_img: confirmation.image_path(),
            confirmation,
            bulletin,
        }
    }

    /// Element id for this bulletin, e.g. `anchor("bltn-")`.
    pub fn anchor(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.bulletin.txid)
    }
}

pub fn decorate_bulletins(bulletins: Vec<Bulletin>, chain_height: Option<u64>) -> Vec<DecoratedBulletin> {
    bulletins
        .into_iter()
        .map(|b| DecoratedBulletin::new(b, chain_height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(height: Option<u64>) -> ConfirmationBucket {
        ConfirmationBucket::classify(Some(100), height)
    }

    #[test]
    fn buckets_follow_depth() {
        assert_eq!(at(None), ConfirmationBucket::Unconfirmed);
        assert_eq!(at(Some(100)), ConfirmationBucket::Shallow(1));
        assert_eq!(at(Some(97)), ConfirmationBucket::Shallow(4));
        assert_eq!(at(Some(96)), ConfirmationBucket::Total);
        assert_eq!(at(Some(90)), ConfirmationBucket::Total);
    }

    #[test]
    fn bucket_keys_and_images() {
        assert_eq!(at(None).image_key(), "0");
        assert_eq!(at(Some(100)).image_key(), "1");
        assert_eq!(at(Some(97)).image_key(), "4");
        assert_eq!(at(Some(90)).image_key(), "total");
        assert_eq!(at(Some(99)).image_path(), "/static/images/2conf.png");
    }

    #[test]
    fn lagging_cache_saturates_to_depth_zero() {
        assert_eq!(at(Some(105)), ConfirmationBucket::Shallow(1));
        assert_eq!(
            ConfirmationBucket::classify(None, Some(5)),
            ConfirmationBucket::Shallow(1)
        );
    }

    #[test]
    fn url_name_is_one_segment() {
        let name = url_name("a b/c?d");
        assert!(!name.contains(['/', ' ', '?']));
        assert_eq!(url_name("rust"), "rust");
    }

    #[test]
    fn detailed_summary_serializes_flat() {
        let summary = BoardSummary {
            name: "news & views".into(),
            created_at: Some(1_707_782_400),
            ..Default::default()
        };
        let value = serde_json::to_value(DecoratedSummary::detailed(summary)).unwrap();
        assert_eq!(value["name"], json!("news & views"));
        assert_eq!(value["urlName"], json!("news%20%26%20views"));
        assert_eq!(value["createdAtDisplay"], json!("Feb 13, 2024"));
        assert!(value.get("lastActiveDisplay").is_none());
    }

    #[test]
    fn decorated_bulletin_carries_display_fields() {
        let bltn = Bulletin {
            txid: "abc".into(),
            timestamp: 1_707_836_640,
            block_height: Some(98),
            ..Default::default()
        };
        let decorated = DecoratedBulletin::new(bltn, Some(100));
        assert_eq!(decorated.anchor("bltn-"), "bltn-abc");

        let value = serde_json::to_value(&decorated).unwrap();
        assert_eq!(value["txid"], json!("abc"));
        assert_eq!(value["timestampDisplay"], json!("13 Feb 2024, 15:04"));
        assert_eq!(value["confirmation"], json!("3"));
        assert_eq!(value["depthImg"], json!("/static/images/3conf.png"));
    }

    #[test]
    fn block_hash_without_height_is_unconfirmed() {
        let bltn: Bulletin = serde_json::from_value(json!({ "txid": "t", "blk": "00ab" })).unwrap();
        let decorated = DecoratedBulletin::new(bltn, Some(100));
        assert_eq!(decorated.confirmation, ConfirmationBucket::Unconfirmed);
        assert_eq!(decorated.depth_img, "/static/images/0conf.png");
    }
}
