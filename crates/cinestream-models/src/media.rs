use serde::{Deserialize, Serialize};
use std::fmt;

/// Base URL for TMDB-hosted artwork. Poster paths are relative to a size segment.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// A movie or series as normalized from the metadata provider.
///
/// The provider's third kind ("person") never becomes a `MediaItem`; it is
/// dropped during normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
}

impl MediaItem {
    /// Minimal item with only the identifying fields set
    pub fn new(id: u64, kind: MediaKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            poster_path: None,
            overview: None,
            vote_average: 0.0,
            release_date: None,
            original_language: None,
        }
    }

    pub fn key(&self) -> MediaKey {
        MediaKey::new(self.id, self.kind)
    }

    /// Release year parsed from the leading `YYYY` of the release date
    pub fn year(&self) -> Option<u32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }

    /// Absolute poster URL for a TMDB size segment such as `w342`, `w500` or `original`
    pub fn poster_url(&self, size: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}/{}{}", IMAGE_BASE_URL, size, p))
    }
}

/// Discriminant between the two displayable provider kinds.
///
/// Serialized with the provider's wire tags (`movie`, `tv`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaKind {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv")]
    Series,
}

impl MediaKind {
    pub fn as_tag(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Movie => "Movie",
            MediaKind::Series => "TV Show",
        }
    }

    /// Parse a provider tag or user-supplied kind name.
    ///
    /// Returns `None` for anything that is not a movie or series, including `person`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "movie" => Some(MediaKind::Movie),
            "tv" | "series" | "show" => Some(MediaKind::Series),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Identity of an item inside a list. The same numeric id may exist
/// independently as a movie and as a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaKey {
    pub id: u64,
    pub kind: MediaKind,
}

impl MediaKey {
    pub fn new(id: u64, kind: MediaKind) -> Self {
        Self { id, kind }
    }
}

impl fmt::Display for MediaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_wire_tags() {
        assert_eq!(serde_json::to_string(&MediaKind::Movie).unwrap(), "\"movie\"");
        assert_eq!(serde_json::to_string(&MediaKind::Series).unwrap(), "\"tv\"");
        assert_eq!(MediaKind::from_tag("TV"), Some(MediaKind::Series));
        assert_eq!(MediaKind::from_tag("series"), Some(MediaKind::Series));
        assert_eq!(MediaKind::from_tag("person"), None);
    }

    #[test]
    fn test_media_item_serializes_kind_as_type() {
        let item = MediaItem::new(603, MediaKind::Movie, "The Matrix");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "movie");
        assert_eq!(json["voteAverage"], 0.0);
        assert!(json.get("posterPath").is_none());
    }

    #[test]
    fn test_year_and_poster_url() {
        let mut item = MediaItem::new(603, MediaKind::Movie, "The Matrix");
        assert_eq!(item.year(), None);
        assert_eq!(item.poster_url("w500"), None);

        item.release_date = Some("1999-03-31".to_string());
        item.poster_path = Some("/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg".to_string());
        assert_eq!(item.year(), Some(1999));
        assert_eq!(
            item.poster_url("w500").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg")
        );
    }

    #[test]
    fn test_key_distinguishes_kind() {
        let movie = MediaItem::new(603, MediaKind::Movie, "The Matrix");
        let series = MediaItem::new(603, MediaKind::Series, "Some Show");
        assert_ne!(movie.key(), series.key());
        assert_eq!(movie.key().to_string(), "movie:603");
    }
}
