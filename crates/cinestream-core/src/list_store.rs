use chrono::{DateTime, Utc};
use cinestream_models::{ListEntry, ListName, MediaItem, MediaKey, MediaKind};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use crate::error::StoreError;
use crate::export::{export_entries, ExportFormat};
use crate::storage::{FileStorage, KeyValueStorage};

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Watchlist and favorites, persisted as one JSON array per list.
///
/// Every mutation is a whole-list read-modify-write through `&mut self`, so two
/// updates can never interleave on the same store.
pub struct ListStore<S: KeyValueStorage> {
    storage: S,
    clock: Clock,
}

impl ListStore<FileStorage> {
    /// File-backed store rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileStorage::new(dir))
    }
}

impl<S: KeyValueStorage> ListStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            clock: Box::new(Utc::now),
        }
    }

    /// Replace the source of `added_at` timestamps
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current members in stored order.
    ///
    /// Never fails: a missing key is an empty list, and unreadable or corrupt
    /// content is logged and treated as empty until the next write replaces it.
    pub fn load(&self, list: ListName) -> Vec<ListEntry> {
        let key = list.storage_key();
        let content = match self.storage.get(key) {
            Ok(Some(content)) => content,
            Ok(None) => {
                debug!("List {} has never been written", key);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read list {}: {}. Treating as empty.", key, e);
                return Vec::new();
            }
        };

        let entries: Vec<ListEntry> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "List {} is corrupted: {}. Treating as empty; the next write will replace it.",
                    key, e
                );
                return Vec::new();
            }
        };

        // Hand-edited files may repeat an item; the first occurrence wins
        let mut seen = HashSet::new();
        entries.into_iter().filter(|e| seen.insert(e.key())).collect()
    }

    pub fn entries(&self, list: ListName) -> Vec<ListEntry> {
        self.load(list)
    }

    pub fn len(&self, list: ListName) -> usize {
        self.load(list).len()
    }

    pub fn is_empty(&self, list: ListName) -> bool {
        self.load(list).is_empty()
    }

    pub fn contains(&self, list: ListName, id: u64, kind: MediaKind) -> bool {
        let key = MediaKey::new(id, kind);
        self.load(list).iter().any(|e| e.key() == key)
    }

    /// Insert `item` unless an entry with the same `(id, kind)` exists.
    ///
    /// Returns `false` without writing when the item is already present; the
    /// existing entry keeps its original `added_at`.
    pub fn add(&mut self, list: ListName, item: &MediaItem) -> Result<bool, StoreError> {
        let mut entries = self.load(list);
        if entries.iter().any(|e| e.key() == item.key()) {
            debug!("{} already in {}", item.key(), list);
            return Ok(false);
        }

        entries.push(ListEntry::new(item.clone(), (self.clock)()));
        self.save(list, &entries)?;
        info!("Added '{}' ({}) to {}", item.title, item.key(), list);
        Ok(true)
    }

    /// Delete the entry for `(id, kind)`. Returns `false` without writing when absent.
    pub fn remove(&mut self, list: ListName, id: u64, kind: MediaKind) -> Result<bool, StoreError> {
        let key = MediaKey::new(id, kind);
        let mut entries = self.load(list);
        let before = entries.len();
        entries.retain(|e| e.key() != key);

        if entries.len() == before {
            debug!("{} not in {}, nothing to remove", key, list);
            return Ok(false);
        }

        self.save(list, &entries)?;
        info!("Removed {} from {}", key, list);
        Ok(true)
    }

    /// Remove if present, otherwise add. Returns the new membership state.
    pub fn toggle(&mut self, list: ListName, item: &MediaItem) -> Result<bool, StoreError> {
        let mut entries = self.load(list);
        let key = item.key();

        let now_member = match entries.iter().position(|e| e.key() == key) {
            Some(index) => {
                entries.remove(index);
                false
            }
            None => {
                entries.push(ListEntry::new(item.clone(), (self.clock)()));
                true
            }
        };

        self.save(list, &entries)?;
        info!(
            "Toggled '{}' ({}) {} {}",
            item.title,
            key,
            if now_member { "into" } else { "out of" },
            list
        );
        Ok(now_member)
    }

    /// Empty the list entirely
    pub fn clear(&mut self, list: ListName) -> Result<(), StoreError> {
        self.storage.remove(list.storage_key())?;
        info!("Cleared {}", list);
        Ok(())
    }

    pub fn export(&self, list: ListName, format: ExportFormat) -> Result<Vec<u8>, StoreError> {
        let entries = self.load(list);
        debug!("Exporting {} entries from {} as {}", entries.len(), list, format);
        export_entries(&entries, format)
    }

    fn save(&mut self, list: ListName, entries: &[ListEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string(entries)?;
        self.storage.set(list.storage_key(), &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    fn movie(id: u64, title: &str) -> MediaItem {
        MediaItem::new(id, MediaKind::Movie, title)
    }

    fn series(id: u64, title: &str) -> MediaItem {
        MediaItem::new(id, MediaKind::Series, title)
    }

    /// Store whose clock advances one minute per reading
    fn ticking_store() -> ListStore<MemoryStorage> {
        let start = Utc.with_ymd_and_hms(2025, 12, 29, 8, 0, 0).unwrap();
        let ticks = Arc::new(AtomicI64::new(0));
        ListStore::new(MemoryStorage::new()).with_clock(move || {
            start + Duration::minutes(ticks.fetch_add(1, Ordering::SeqCst))
        })
    }

    #[test]
    fn test_load_missing_list_is_empty() {
        let store = ListStore::new(MemoryStorage::new());
        assert!(store.load(ListName::Watchlist).is_empty());
        assert!(!store.contains(ListName::Favorites, 603, MediaKind::Movie));
    }

    #[test]
    fn test_add_is_idempotent_and_keeps_first_timestamp() {
        let mut store = ticking_store();
        let matrix = movie(603, "The Matrix");

        assert!(store.add(ListName::Watchlist, &matrix).unwrap());
        let first_added_at = store.load(ListName::Watchlist)[0].added_at;

        assert!(!store.add(ListName::Watchlist, &matrix).unwrap());
        let entries = store.load(ListName::Watchlist);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].added_at, first_added_at);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut store = ticking_store();
        store.add(ListName::Favorites, &movie(11, "Star Wars")).unwrap();
        let before = store.load(ListName::Favorites);

        let matrix = movie(603, "The Matrix");
        assert!(store.toggle(ListName::Favorites, &matrix).unwrap());
        assert!(store.contains(ListName::Favorites, 603, MediaKind::Movie));
        assert!(!store.toggle(ListName::Favorites, &matrix).unwrap());
        assert_eq!(store.load(ListName::Favorites), before);

        let star_wars = movie(11, "Star Wars");
        assert!(!store.toggle(ListName::Favorites, &star_wars).unwrap());
        assert!(store.toggle(ListName::Favorites, &star_wars).unwrap());
        assert!(store.contains(ListName::Favorites, 11, MediaKind::Movie));
    }

    #[test]
    fn test_same_id_different_kind_coexist() {
        let mut store = ticking_store();
        assert!(store.add(ListName::Watchlist, &movie(603, "The Matrix")).unwrap());
        assert!(store.add(ListName::Watchlist, &series(603, "Some Series")).unwrap());

        let entries = store.load(ListName::Watchlist);
        assert_eq!(entries.len(), 2);
        assert!(store.contains(ListName::Watchlist, 603, MediaKind::Movie));
        assert!(store.contains(ListName::Watchlist, 603, MediaKind::Series));

        assert!(store.remove(ListName::Watchlist, 603, MediaKind::Series).unwrap());
        assert!(store.contains(ListName::Watchlist, 603, MediaKind::Movie));
        assert!(!store.contains(ListName::Watchlist, 603, MediaKind::Series));
    }

    #[test]
    fn test_remove_non_member_is_noop() {
        let mut store = ticking_store();
        assert!(!store.remove(ListName::Watchlist, 603, MediaKind::Movie).unwrap());
        assert!(store.load(ListName::Watchlist).is_empty());
        assert!(store.storage().keys().is_empty());

        store.add(ListName::Watchlist, &movie(603, "The Matrix")).unwrap();
        let before = store.load(ListName::Watchlist);
        assert!(!store.remove(ListName::Watchlist, 604, MediaKind::Movie).unwrap());
        assert!(!store.remove(ListName::Watchlist, 603, MediaKind::Series).unwrap());
        assert_eq!(store.load(ListName::Watchlist), before);
    }

    #[test]
    fn test_lists_are_independent() {
        let mut store = ticking_store();
        let matrix = movie(603, "The Matrix");
        store.add(ListName::Watchlist, &matrix).unwrap();

        assert!(!store.contains(ListName::Favorites, 603, MediaKind::Movie));
        store.add(ListName::Favorites, &matrix).unwrap();
        store.clear(ListName::Watchlist).unwrap();

        assert!(store.is_empty(ListName::Watchlist));
        assert_eq!(store.len(ListName::Favorites), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = ticking_store();
        for (id, title) in [(3, "C"), (1, "A"), (2, "B")] {
            store.add(ListName::Watchlist, &movie(id, title)).unwrap();
        }
        let ids: Vec<u64> = store.entries(ListName::Watchlist).iter().map(|e| e.item.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(store.entries(ListName::Watchlist), store.load(ListName::Watchlist));
    }

    #[test]
    fn test_corrupt_storage_reads_empty_and_is_overwritten() {
        let mut storage = MemoryStorage::new();
        storage.set("watchlist", "{not json").unwrap();
        let mut store = ListStore::new(storage);

        assert!(store.load(ListName::Watchlist).is_empty());
        assert!(!store.contains(ListName::Watchlist, 603, MediaKind::Movie));

        assert!(store.add(ListName::Watchlist, &movie(603, "The Matrix")).unwrap());
        let entries = store.load(ListName::Watchlist);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].item.title, "The Matrix");
    }

    #[test]
    fn test_duplicate_entries_on_disk_are_collapsed() {
        let mut storage = MemoryStorage::new();
        let raw = r#"[
            {"id":603,"type":"movie","title":"The Matrix","voteAverage":8.2,"addedAt":"2025-01-01T00:00:00Z"},
            {"id":603,"type":"movie","title":"The Matrix (dup)","voteAverage":8.2,"addedAt":"2025-02-01T00:00:00Z"}
        ]"#;
        storage.set("watchlist", raw).unwrap();
        let store = ListStore::new(storage);

        let entries = store.load(ListName::Watchlist);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].item.title, "The Matrix");
    }

    #[test]
    fn test_file_backed_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = ListStore::open(dir.path());
            store.add(ListName::Favorites, &series(1399, "Game of Thrones")).unwrap();
        }

        let store = ListStore::open(dir.path());
        assert!(store.contains(ListName::Favorites, 1399, MediaKind::Series));
        assert!(dir.path().join("favorites.json").exists());
    }

    #[test]
    fn test_export_csv_round_trip_through_reader() {
        let mut store = ticking_store();
        let title = r#"Die Hard, "Unrated""#;
        store.add(ListName::Watchlist, &movie(562, title)).unwrap();

        let bytes = store.export(ListName::Watchlist, ExportFormat::Csv).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], title);
        assert_eq!(&row[4], "2025-12-29T08:00:00Z");
    }
}
