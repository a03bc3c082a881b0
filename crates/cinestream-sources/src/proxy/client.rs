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

/// Client for a server-side proxy in front of TMDB.
///
/// The proxy takes `type=popular`, `type=tv` or `query=<term>` on a single
/// endpoint and answers non-2xx with `{ "error": "<message>" }`.
#[derive(Clone)]
pub struct ProxyClient {
    client: Arc<Client>,
    endpoint: String,
}

impl ProxyClient {
    pub fn new(endpoint: String, timeout: Option<Duration>) -> Result<Self, SourceError> {
        if endpoint.trim().is_empty() {
            return Err(SourceError::NotConfigured("proxy endpoint is empty".to_string()));
        }
        Ok(Self {
            client: Arc::new(http::build_client(timeout)?),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContentProvider for ProxyClient {
    fn provider_name(&self) -> &str {
        "proxy"
    }

    async fn fetch(&self, request: &ContentRequest) -> Result<ProviderPage, SourceError> {
        let params = request.query_pairs();
        let body = http::get_json(&self.client, &self.endpoint, &params, &params).await?;
        let page = ProviderPage::from_json(body)?;
        info!("Proxy {} returned {} records", request, page.results.len());
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer a single request with a canned response; the handle yields the request line
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            request.lines().next().unwrap_or_default().to_string()
        });
        (format!("http://{}/api/tmdb", addr), handle)
    }

    #[tokio::test]
    async fn test_popular_uses_type_parameter() {
        let (endpoint, server) = serve_once("200 OK", r#"{"results":[{"id":603,"title":"The Matrix"}]}"#).await;
        let client = ProxyClient::new(endpoint, None).unwrap();

        let page = client.fetch(&ContentRequest::PopularMovies).await.unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, Some(603));
        assert_eq!(server.await.unwrap(), "GET /api/tmdb?type=popular HTTP/1.1");
    }

    #[tokio::test]
    async fn test_search_encodes_query() {
        let (endpoint, server) = serve_once("200 OK", r#"{"results":[]}"#).await;
        let client = ProxyClient::new(endpoint, None).unwrap();

        let page = client.fetch(&ContentRequest::Search("blade runner".to_string())).await.unwrap();
        assert!(page.results.is_empty());
        assert_eq!(server.await.unwrap(), "GET /api/tmdb?query=blade+runner HTTP/1.1");
    }

    #[tokio::test]
    async fn test_error_body_becomes_provider_error() {
        let (endpoint, _server) =
            serve_once("500 Internal Server Error", r#"{"error":"Failed to fetch content"}"#).await;
        let client = ProxyClient::new(endpoint, None).unwrap();

        match client.fetch(&ContentRequest::PopularSeries).await {
            Err(SourceError::Provider { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to fetch content");
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_results_is_malformed() {
        let (endpoint, _server) = serve_once("200 OK", r#"{"page":1}"#).await;
        let client = ProxyClient::new(endpoint, None).unwrap();

        let err = client.fetch(&ContentRequest::PopularMovies).await.unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ProxyClient::new(format!("http://{}/api/tmdb", addr), None).unwrap();
        let err = client.fetch(&ContentRequest::PopularMovies).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_new_requires_endpoint() {
        assert!(ProxyClient::new(String::new(), None).is_err());
        let client = ProxyClient::new("http://localhost:3000/api/tmdb".to_string(), None).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:3000/api/tmdb");
        assert_eq!(client.provider_name(), "proxy");
    }
}
