use async_trait::async_trait;
use crate::error::SourceError;
use crate::record::ProviderPage;
use crate::request::ContentRequest;

/// A read-only source of movie/series listings.
///
/// Implementations only fetch and decode; classifying and normalizing the
/// returned records is left to the caller.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    async fn fetch(&self, request: &ContentRequest) -> Result<ProviderPage, SourceError>;
}
