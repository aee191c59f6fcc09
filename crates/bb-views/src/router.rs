//! # Router
//!
//! Maps client paths to routes. Anything unmatched redirects to `/`.

use std::fmt;

use bb_core::paths::{decode_segment, encode_segment};
use serde::{Serialize, Serializer};

/// Every navigable state of the explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Boards,
    /// `/board/:board*`, holds the decoded name (may contain `/`)
    Board(String),
    NilBoard,
    Bulletin(String),
    Author(String),
    Authors,
    /// `/blacklist` or `/blacklist/:txid`
    Blacklist(Option<String>),
    /// `/blocks/:day`, holds the raw `DD-MM-YYYY` segment
    BlocksDay(String),
    Block(String),
    Recent,
    Unconfirmed,
    Status,
}

impl Route {
    /// Resolves `path`, redirecting unmatched paths to [`Route::Home`].
    pub fn parse(path: &str) -> Self {
        Self::matches(path).unwrap_or(Self::Home)
    }

    /// Resolves `path` or returns `None` when no route matches.
    /// Query strings and fragments are ignored. One trailing slash is tolerated.
    pub fn matches(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.strip_prefix('/')?;
        let path = path.strip_suffix('/').unwrap_or(path);

        let (head, rest) = match path.split_once('/') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };

        // Single-segment parameter: non-empty and no further '/'
        let param = |rest: Option<&str>| -> Option<String> {
            rest.filter(|r| !r.is_empty() && !r.contains('/'))
                .map(|r| decode_segment(r).into_owned())
        };

        let route = match (head, rest) {
            ("", None) => Self::Home,
            ("boards", None) => Self::Boards,
            ("board", Some(rest)) if !rest.is_empty() => Self::Board(decode_segment(rest).into_owned()),
            ("nilboard", None) => Self::NilBoard,
            ("bulletin", rest) => Self::Bulletin(param(rest)?),
            ("author", rest) => Self::Author(param(rest)?),
            ("authors", None) => Self::Authors,
            ("blacklist", None) => Self::Blacklist(None),
            ("blacklist", rest) => Self::Blacklist(Some(param(rest)?)),
            ("blocks", rest) => Self::BlocksDay(param(rest)?),
            ("block", rest) => Self::Block(param(rest)?),
            ("recent", None) => Self::Recent,
            ("unconfirmed", None) => Self::Unconfirmed,
            ("status", None) => Self::Status,
            _ => return None,
        };
        Some(route)
    }

    /// Canonical path with every parameter percent-encoded.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Boards => "/boards".to_string(),
            Self::Board(name) => format!("/board/{}", encode_segment(name)),
            Self::NilBoard => "/nilboard".to_string(),
            Self::Bulletin(txid) => format!("/bulletin/{}", encode_segment(txid)),
            Self::Author(author) => format!("/author/{}", encode_segment(author)),
            Self::Authors => "/authors".to_string(),
            Self::Blacklist(None) => "/blacklist".to_string(),
            Self::Blacklist(Some(txid)) => format!("/blacklist/{}", encode_segment(txid)),
            Self::BlocksDay(day) => format!("/blocks/{}", encode_segment(day)),
            Self::Block(hash) => format!("/block/{}", encode_segment(hash)),
            Self::Recent => "/recent".to_string(),
            Self::Unconfirmed => "/unconfirmed".to_string(),
            Self::Status => "/status".to_string(),
        }
    }

    /// Template the front end renders this route with.
    pub fn template(&self) -> &'static str {
        match self {
            Self::Home | Self::Boards => "boards.html",
            Self::Board(_) | Self::NilBoard => "board.html",
            Self::Bulletin(_) => "bltn.html",
            Self::Author(_) => "author.html",
            Self::Authors => "authors.html",
            Self::Blacklist(_) => "blacklist.html",
            Self::BlocksDay(_) => "views/blocks/blocks.html",
            Self::Block(_) => "views/block/block.html",
            Self::Recent | Self::Unconfirmed => "bulletins.html",
            Self::Status => "status.html",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

/// Header helper: true when `current` lies under `prefix`.
pub fn is_active(current: &str, prefix: &str) -> bool {
    current.starts_with(prefix)
}
