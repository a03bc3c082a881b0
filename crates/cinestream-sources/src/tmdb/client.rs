//! TMDB v3 client for the popular listings and multi-type search.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use crate::error::SourceError;
use crate::http;
use crate::record::ProviderPage;
use crate::request::ContentRequest;
use crate::traits::ContentProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Result<Self, SourceError> {
        Self::with_options(api_key, DEFAULT_BASE_URL.to_string(), None)
    }

    pub fn with_options(api_key: String, base_url: String, timeout: Option<Duration>) -> Result<Self, SourceError> {
        if api_key.trim().is_empty() {
            return Err(SourceError::NotConfigured("TMDB API key is empty".to_string()));
        }
        Ok(Self {
            client: Arc::new(http::build_client(timeout)?),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Path and non-secret parameters for a request
    pub fn endpoint(request: &ContentRequest) -> (&'static str, Vec<(&'static str, String)>) {
        match request {
            ContentRequest::PopularMovies => ("/movie/popular", Vec::new()),
            ContentRequest::PopularSeries => ("/tv/popular", Vec::new()),
            ContentRequest::Search(term) => ("/search/multi", vec![("query", term.clone())]),
        }
    }
}

#[async_trait]
impl ContentProvider for TmdbClient {
    fn provider_name(&self) -> &str {
        "tmdb"
    }

    async fn fetch(&self, request: &ContentRequest) -> Result<ProviderPage, SourceError> {
        let (path, params) = Self::endpoint(request);
        let url = format!("{}{}", self.base_url, path);

        let mut all_params = vec![("api_key", self.api_key.clone())];
        all_params.extend(params.iter().cloned());

        let body = http::get_json(&self.client, &url, &all_params, &params).await?;
        let page = ProviderPage::from_json(body)?;
        info!("TMDB {} returned {} records", request, page.results.len());
        Ok(page)
    }
}
