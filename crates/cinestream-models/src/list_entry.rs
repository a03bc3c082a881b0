use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::media::{MediaItem, MediaKey};

/// A media item stored in a named list, stamped with the time it was added.
///
/// `added_at` is set once on insertion; re-adding the same item never refreshes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    #[serde(flatten)]
    pub item: MediaItem,
    pub added_at: DateTime<Utc>,
}

impl ListEntry {
    pub fn new(item: MediaItem, added_at: DateTime<Utc>) -> Self {
        Self { item, added_at }
    }

    pub fn key(&self) -> MediaKey {
        self.item.key()
    }
}

/// The two independent local lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListName {
    Watchlist,
    Favorites,
}

impl ListName {
    pub const ALL: [ListName; 2] = [ListName::Watchlist, ListName::Favorites];

    /// Key under which the list is persisted
    pub fn storage_key(&self) -> &'static str {
        match self {
            ListName::Watchlist => "watchlist",
            ListName::Favorites => "favorites",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ListName::Watchlist => "Watchlist",
            ListName::Favorites => "Favorites",
        }
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

impl FromStr for ListName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "watchlist" => Ok(ListName::Watchlist),
            "favorites" | "favourites" => Ok(ListName::Favorites),
            _ => Err(format!("Unknown list: {}. Use 'watchlist' or 'favorites'", s)),
        }
    }
}
