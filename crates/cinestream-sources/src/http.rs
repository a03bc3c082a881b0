use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use crate::error::SourceError;

/// Build the shared HTTP client. No timeout unless one is configured.
pub fn build_client(timeout: Option<Duration>) -> Result<Client, SourceError> {
    let mut builder = Client::builder().user_agent(concat!("cinestream/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| SourceError::NotConfigured(format!("failed to build HTTP client: {}", e)))
}

/// GET a JSON document, mapping failures onto [`SourceError`].
///
/// `log_params` are the parameters safe to log; secrets such as API keys go
/// in `params` only.
pub async fn get_json(
    client: &Client,
    url: &str,
    params: &[(&str, String)],
    log_params: &[(&str, String)],
) -> Result<Value, SourceError> {
    debug!(url = %url, params = ?log_params, "Provider request");

    let response = client
        .get(url)
        .query(params)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| SourceError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status.canonical_reason().unwrap_or("Failed to fetch data").to_string()
        });
        return Err(SourceError::Provider { status: status.as_u16(), message });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| SourceError::Malformed(format!("parse JSON: {}", e)))
}

/// Human-readable message from a provider error body.
///
/// TMDB uses `status_message`; the proxy answers `{ "error": "..." }`.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["status_message", "error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}
