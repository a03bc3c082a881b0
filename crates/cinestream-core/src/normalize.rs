use cinestream_models::{MediaItem, MediaKind};
use cinestream_sources::{ProviderPage, RawRecord};
use tracing::debug;

/// Title given to records that carry neither `title` nor `name`
pub const UNKNOWN_TITLE: &str = "Unknown";

/// What a raw provider record turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Media(MediaKind),
    Person,
    Unknown,
}

/// Decide the kind of a raw record.
///
/// Priority: an explicit `media_type` tag, then the kind implied by the
/// endpoint the record came from, then the presence of `title` (movie) or
/// `name` (series). Tags other than movie/tv/person fall through.
pub fn classify(record: &RawRecord, endpoint_kind: Option<MediaKind>) -> Classification {
    if let Some(tag) = record.media_type.as_deref() {
        if tag.eq_ignore_ascii_case("person") {
            return Classification::Person;
        }
        if let Some(kind) = MediaKind::from_tag(tag) {
            return Classification::Media(kind);
        }
        debug!("Unrecognized media_type '{}' on record {:?}", tag, record.id);
    }

    if let Some(kind) = endpoint_kind {
        return Classification::Media(kind);
    }

    if non_empty(&record.title).is_some() {
        Classification::Media(MediaKind::Movie)
    } else if non_empty(&record.name).is_some() {
        Classification::Media(MediaKind::Series)
    } else {
        Classification::Unknown
    }
}

/// Turn one raw record into a `MediaItem`, or `None` if it is not displayable
pub fn normalize_record(record: &RawRecord, endpoint_kind: Option<MediaKind>) -> Option<MediaItem> {
    let kind = match classify(record, endpoint_kind) {
        Classification::Media(kind) => kind,
        Classification::Person => return None,
        Classification::Unknown => {
            debug!("Skipping record {:?}: kind could not be determined", record.id);
            return None;
        }
    };

    let Some(id) = record.id else {
        debug!("Skipping {} record without an id", kind);
        return None;
    };

    // Series are named, movies are titled; accept either as a fallback
    let (primary_title, secondary_title, primary_date, secondary_date) = match kind {
        MediaKind::Movie => (&record.title, &record.name, &record.release_date, &record.first_air_date),
        MediaKind::Series => (&record.name, &record.title, &record.first_air_date, &record.release_date),
    };

    let title = non_empty(primary_title)
        .or_else(|| non_empty(secondary_title))
        .unwrap_or(UNKNOWN_TITLE)
        .to_string();

    Some(MediaItem {
        id,
        kind,
        title,
        poster_path: non_empty(&record.poster_path).map(str::to_string),
        overview: non_empty(&record.overview).map(str::to_string),
        vote_average: record.vote_average.unwrap_or(0.0),
        release_date: non_empty(primary_date)
            .or_else(|| non_empty(secondary_date))
            .map(str::to_string),
        original_language: non_empty(&record.original_language).map(str::to_string),
    })
}

/// Normalize a page in provider order, dropping persons and undisplayable
/// records, then cap the result at `limit`.
pub fn normalize_page(page: &ProviderPage, endpoint_kind: Option<MediaKind>, limit: usize) -> Vec<MediaItem> {
    let items: Vec<MediaItem> = page
        .results
        .iter()
        .filter_map(|record| normalize_record(record, endpoint_kind))
        .take(limit)
        .collect();

    debug!(
        "Normalized {} of {} records (limit {})",
        items.len(),
        page.results.len(),
        limit
    );
    items
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64) -> RawRecord {
        RawRecord {
            id: Some(id),
            ..RawRecord::default()
        }
    }

    #[test]
    fn test_explicit_tag_wins_over_fields() {
        let mut r = record(1399);
        r.media_type = Some("tv".to_string());
        r.title = Some("Oddly titled series".to_string());
        assert_eq!(classify(&r, Some(MediaKind::Movie)), Classification::Media(MediaKind::Series));
    }

    #[test]
    fn test_endpoint_kind_used_without_tag() {
        let mut r = record(1399);
        r.title = Some("Has a title".to_string());
        assert_eq!(classify(&r, Some(MediaKind::Series)), Classification::Media(MediaKind::Series));
    }

    #[test]
    fn test_field_probe_and_unknown_tag_fall_through() {
        let mut movie = record(603);
        movie.title = Some("The Matrix".to_string());
        movie.media_type = Some("collection".to_string());
        assert_eq!(classify(&movie, None), Classification::Media(MediaKind::Movie));

        let mut series = record(1399);
        series.name = Some("Game of Thrones".to_string());
        assert_eq!(classify(&series, None), Classification::Media(MediaKind::Series));

        assert_eq!(classify(&record(1), None), Classification::Unknown);
    }

    #[test]
    fn test_person_is_dropped() {
        let mut person = record(6384);
        person.media_type = Some("person".to_string());
        person.name = Some("Keanu Reeves".to_string());
        assert_eq!(classify(&person, None), Classification::Person);
        assert!(normalize_record(&person, None).is_none());
    }

    #[test]
    fn test_series_fields_and_empty_dates() {
        let series = RawRecord {
            id: Some(1399),
            media_type: Some("tv".to_string()),
            name: Some("Game of Thrones".to_string()),
            first_air_date: Some("2011-04-17".to_string()),
            poster_path: Some("/got.jpg".to_string()),
            vote_average: Some(8.4),
            ..RawRecord::default()
        };
        let item = normalize_record(&series, None).unwrap();
        assert_eq!(item.kind, MediaKind::Series);
        assert_eq!(item.title, "Game of Thrones");
        assert_eq!(item.release_date.as_deref(), Some("2011-04-17"));
        assert_eq!(item.poster_path.as_deref(), Some("/got.jpg"));

        let movie = RawRecord {
            id: Some(1),
            title: Some("Untitled Project".to_string()),
            release_date: Some(String::new()),
            ..RawRecord::default()
        };
        let item = normalize_record(&movie, Some(MediaKind::Movie)).unwrap();
        assert_eq!(item.release_date, None);
        assert_eq!(item.vote_average, 0.0);
    }

    #[test]
    fn test_missing_title_and_missing_id() {
        let untitled = record(42);
        let item = normalize_record(&untitled, Some(MediaKind::Movie)).unwrap();
        assert_eq!(item.title, UNKNOWN_TITLE);

        let mut no_id = RawRecord::default();
        no_id.title = Some("Ghost".to_string());
        assert!(normalize_record(&no_id, Some(MediaKind::Movie)).is_none());
    }

    #[test]
    fn test_normalize_page_filters_then_caps() {
        let mut results = Vec::new();
        for id in 0..30u64 {
            let mut r = record(id);
            if id % 2 == 0 {
                r.media_type = Some("person".to_string());
                r.name = Some(format!("Person {}", id));
            } else {
                r.media_type = Some("movie".to_string());
                r.title = Some(format!("Movie {}", id));
            }
            results.push(r);
        }

        let items = normalize_page(&ProviderPage::new(results), None, 12);
        assert_eq!(items.len(), 12);
        assert!(items.iter().all(|i| i.kind == MediaKind::Movie));
        assert_eq!(items[0].id, 1);
        assert_eq!(items[11].id, 23);
    }
}
