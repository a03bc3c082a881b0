//! Popular/search content surfaces and their request lifecycle.
//!
//! Both popular listings are requested together and merged only once both
//! have answered. Searches are numbered as they are issued; an answer is
//! applied only if no later search was issued in the meantime.

use cinestream_config::ContentConfig;
use cinestream_models::{MediaItem, MediaKind};
use cinestream_sources::{ContentProvider, ContentRequest};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use crate::normalize::normalize_page;


#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub popular_limit: usize,
    pub search_limit: usize,
    /// Shown in place of popular movies when that request fails
    pub fallback_movies: Vec<MediaItem>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&ContentConfig::default())
    }
}

impl From<&ContentConfig> for PipelineOptions {
    fn from(config: &ContentConfig) -> Self {
        Self {
            popular_limit: config.popular_limit,
            search_limit: config.search_limit,
            fallback_movies: default_fallback_movies(),
        }
    }
}

pub fn default_fallback_movies() -> Vec<MediaItem> {
    vec![MediaItem {
        id: 603,
        kind: MediaKind::Movie,
        title: "The Matrix".to_string(),
        poster_path: Some("/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg".to_string()),
        overview: Some("A computer programmer discovers reality is a simulation.".to_string()),
        vote_average: 8.2,
        release_date: Some("1999-03-31".to_string()),
        original_language: Some("en".to_string()),
    }]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Popular,
    Search,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Empty query: search mode left, nothing fetched
    Cleared,
    Results(Vec<MediaItem>),
    /// A later search was issued before this one answered; nothing applied
    Superseded,
}

/// Snapshot of everything a presentation layer renders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentView {
    pub mode: DisplayMode,
    pub popular_loading: bool,
    pub search_loading: bool,
    pub movies: Vec<MediaItem>,
    pub series: Vec<MediaItem>,
    pub query: Option<String>,
    pub search_results: Vec<MediaItem>,
}

#[derive(Debug)]
struct Surfaces {
    mode: DisplayMode,
    movies: Vec<MediaItem>,
    series: Vec<MediaItem>,
    query: Option<String>,
    search_results: Vec<MediaItem>,
}

impl Default for Surfaces {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Popular,
            movies: Vec::new(),
            series: Vec::new(),
            query: None,
            search_results: Vec::new(),
        }
    }
}

/// Keeps the popular loading flag raised while at least one fetch is running
struct PopularInFlight<'a>(&'a AtomicUsize);

impl<'a> PopularInFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PopularInFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Holds the search loading flag for one numbered search. Only the latest
/// search can lower it.
struct SearchInFlight<'a> {
    latest: &'a AtomicU64,
    seq: u64,
}

impl<'a> SearchInFlight<'a> {
    fn enter(latest: &'a AtomicU64, seq: u64) -> Self {
        latest.fetch_max(seq, Ordering::SeqCst);
        Self { latest, seq }
    }
}

impl Drop for SearchInFlight<'_> {
    fn drop(&mut self) {
        let _ = self
            .latest
            .compare_exchange(self.seq, 0, Ordering::SeqCst, Ordering::SeqCst);
    }
}

pub struct ContentPipeline {
    provider: Arc<dyn ContentProvider>,
    options: PipelineOptions,
    state: Mutex<Surfaces>,
    popular_in_flight: AtomicUsize,
    search_seq: AtomicU64,
    /// Sequence number of the search currently holding the loading flag, 0 when idle
    search_in_flight: AtomicU64,
}

impl ContentPipeline {
    pub fn new(provider: Arc<dyn ContentProvider>, options: PipelineOptions) -> Self {
        Self {
            provider,
            options,
            state: Mutex::new(Surfaces::default()),
            popular_in_flight: AtomicUsize::new(0),
            search_seq: AtomicU64::new(0),
            search_in_flight: AtomicU64::new(0),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Fetch popular movies and series concurrently and apply both together.
    ///
    /// A failed movie request shows the fallback movies; a failed series
    /// request keeps whatever series were loaded before.
    pub async fn fetch_popular(&self) -> (Vec<MediaItem>, Vec<MediaItem>) {
        let _loading = PopularInFlight::enter(&self.popular_in_flight);
        let movies_request = ContentRequest::PopularMovies;
        let series_request = ContentRequest::PopularSeries;

        debug!("Fetching popular content from {}", self.provider.provider_name());
        let (movies_result, series_result) = futures::join!(
            self.provider.fetch(&movies_request),
            self.provider.fetch(&series_request)
        );

        let limit = self.options.popular_limit;
        let mut state = self.state.lock().await;

        let movies = match movies_result {
            Ok(page) => normalize_page(&page, movies_request.default_kind(), limit),
            Err(e) => {
                warn!("Failed to fetch {}: {}. Showing fallback movies.", movies_request, e);
                self.options.fallback_movies.iter().take(limit).cloned().collect()
            }
        };

        let series = match series_result {
            Ok(page) => normalize_page(&page, series_request.default_kind(), limit),
            Err(e) => {
                warn!(
                    "Failed to fetch {}: {}. Keeping {} previously loaded series.",
                    series_request,
                    e,
                    state.series.len()
                );
                state.series.clone()
            }
        };

        state.movies = movies.clone();
        state.series = series.clone();
        info!("Loaded {} popular movies and {} popular series", movies.len(), series.len());

        (movies, series)
    }

    /// Run a search. The last search issued wins: answers to earlier searches
    /// are dropped without touching visible state.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            self.clear_search().await;
            return SearchOutcome::Cleared;
        }

        // Numbering under the state lock keeps issue order and query updates aligned
        let (seq, _loading) = {
            let mut state = self.state.lock().await;
            let seq = self.search_seq.fetch_add(1, Ordering::SeqCst) + 1;
            state.mode = DisplayMode::Search;
            state.query = Some(query.to_string());
            (seq, SearchInFlight::enter(&self.search_in_flight, seq))
        };

        let request = ContentRequest::Search(query.to_string());
        debug!("Issuing {} (#{})", request, seq);

        let items = match self.provider.fetch(&request).await {
            Ok(page) => normalize_page(&page, request.default_kind(), self.options.search_limit),
            Err(e) => {
                warn!("Failed to fetch {}: {}", request, e);
                Vec::new()
            }
        };

        let mut state = self.state.lock().await;
        if self.search_seq.load(Ordering::SeqCst) != seq {
            debug!("Discarding stale answer for {} (#{})", request, seq);
            return SearchOutcome::Superseded;
        }

        state.search_results = items.clone();
        info!("Search '{}' returned {} results", query, items.len());
        SearchOutcome::Results(items)
    }

    /// Leave search mode. Any search still in flight will be discarded when it answers.
    pub async fn clear_search(&self) {
        let mut state = self.state.lock().await;
        self.search_seq.fetch_add(1, Ordering::SeqCst);
        self.search_in_flight.store(0, Ordering::SeqCst);
        state.mode = DisplayMode::Popular;
        state.query = None;
        state.search_results.clear();
        debug!("Search cleared");
    }

    pub async fn view(&self) -> ContentView {
        let state = self.state.lock().await;
        ContentView {
            mode: state.mode,
            popular_loading: self.popular_in_flight.load(Ordering::SeqCst) > 0,
            search_loading: self.search_in_flight.load(Ordering::SeqCst) != 0,
            movies: state.movies.clone(),
            series: state.series.clone(),
            query: state.query.clone(),
            search_results: state.search_results.clone(),
        }
    }
}
