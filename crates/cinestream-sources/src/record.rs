use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use crate::error::SourceError;

/// A single result record as the provider sends it.
///
/// Movies carry `title`/`release_date`, series carry `name`/`first_air_date`,
/// and multi-type search adds a `media_type` tag which may also be `person`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
}

/// One page of provider results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderPage {
    pub results: Vec<RawRecord>,
}

impl ProviderPage {
    pub fn new(results: Vec<RawRecord>) -> Self {
        Self { results }
    }

    /// Decode a provider response body.
    ///
    /// A body without a `results` array is malformed. Individual records that
    /// fail to decode are skipped so one bad record cannot empty the page.
    pub fn from_json(body: Value) -> Result<Self, SourceError> {
        let results = match body.get("results") {
            Some(Value::Array(results)) => results,
            Some(_) => return Err(SourceError::Malformed("'results' is not an array".to_string())),
            None => return Err(SourceError::Malformed("missing 'results'".to_string())),
        };

        let mut records = Vec::with_capacity(results.len());
        for (index, raw) in results.iter().enumerate() {
            match serde_json::from_value::<RawRecord>(raw.clone()) {
                Ok(record) => records.push(record),
                Err(e) => debug!("Skipping undecodable record at index {}: {}", index, e),
            }
        }

        Ok(Self { results: records })
    }
}
