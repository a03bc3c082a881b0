use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use cinestream_models::{ListEntry, ListName, MediaItem};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use crate::error::StoreError;

pub const CSV_HEADER: [&str; 5] = ["title", "type", "rating", "releaseDate", "addedAt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(format!("Invalid export format: {}. Use 'json' or 'csv'", s)),
        }
    }
}

/// Serialize list entries in the requested format
pub fn export_entries(entries: &[ListEntry], format: ExportFormat) -> Result<Vec<u8>, StoreError> {
    match format {
        ExportFormat::Json => entries_to_json(entries),
        ExportFormat::Csv => entries_to_csv(entries),
    }
}

/// The raw entry list, pretty-printed
pub fn entries_to_json(entries: &[ListEntry]) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec_pretty(entries)?)
}

/// Header row plus one row per entry. Quoting follows RFC 4180: fields with a
/// comma, quote or line break are quoted and inner quotes doubled.
pub fn entries_to_csv(entries: &[ListEntry]) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for entry in entries {
        let item = &entry.item;
        let rating = item.vote_average.to_string();
        let added_at = entry.added_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        writer.write_record([
            item.title.as_str(),
            item.kind.label(),
            rating.as_str(),
            item.release_date.as_deref().unwrap_or(""),
            added_at.as_str(),
        ])?;
    }

    writer.into_inner().map_err(|e| StoreError::Io(e.into_error()))
}

/// `cinestream-<list>-<YYYY-MM-DD>.<ext>`
pub fn export_file_name(list: ListName, format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "cinestream-{}-{}.{}",
        list.storage_key(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// `<title>-metadata.json` with characters that are not portable in file names replaced
pub fn metadata_file_name(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| {
            if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let stem = if stem.is_empty() { "Unknown" } else { stem.as_str() };
    format!("{}-metadata.json", stem)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemMetadataDocument<'a> {
    id: u64,
    title: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    rating: f64,
    overview: Option<&'a str>,
    release_date: Option<&'a str>,
    language: Option<&'a str>,
    downloaded_at: String,
    source: &'static str,
    note: &'static str,
}

/// Metadata-only document for a single item (no media content)
pub fn item_metadata_json(item: &MediaItem, now: DateTime<Utc>) -> Result<Vec<u8>, StoreError> {
    let document = ItemMetadataDocument {
        id: item.id,
        title: &item.title,
        kind: item.kind.as_tag(),
        rating: item.vote_average,
        overview: item.overview.as_deref(),
        release_date: item.release_date.as_deref(),
        language: item.original_language.as_deref(),
        downloaded_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        source: "CineStream",
        note: "This is metadata only. No copyrighted video content included.",
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}
