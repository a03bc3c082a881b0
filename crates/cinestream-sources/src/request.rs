use cinestream_models::MediaKind;
use std::fmt;

/// The three listings the provider exposes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRequest {
    PopularMovies,
    PopularSeries,
    Search(String),
}

impl ContentRequest {
    /// Query parameters of the proxy contract: `type=popular`, `type=tv` or `query=<term>`
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            ContentRequest::PopularMovies => vec![("type", "popular".to_string())],
            ContentRequest::PopularSeries => vec![("type", "tv".to_string())],
            ContentRequest::Search(term) => vec![("query", term.clone())],
        }
    }

    /// Kind implied by the endpoint itself. Multi-type search implies none.
    pub fn default_kind(&self) -> Option<MediaKind> {
        match self {
            ContentRequest::PopularMovies => Some(MediaKind::Movie),
            ContentRequest::PopularSeries => Some(MediaKind::Series),
            ContentRequest::Search(_) => None,
        }
    }
}

impl fmt::Display for ContentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentRequest::PopularMovies => f.write_str("popular movies"),
            ContentRequest::PopularSeries => f.write_str("popular series"),
            ContentRequest::Search(term) => write!(f, "search '{}'", term),
        }
    }
}
