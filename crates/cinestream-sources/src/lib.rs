pub mod error;
pub mod factory;
pub mod http;
pub mod proxy;
pub mod record;
pub mod request;
pub mod tmdb;
pub mod traits;

pub use error::SourceError;
pub use factory::create_provider;
pub use proxy::ProxyClient;
pub use record::{ProviderPage, RawRecord};
pub use request::ContentRequest;
pub use tmdb::TmdbClient;
pub use traits::ContentProvider;
