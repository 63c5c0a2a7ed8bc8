pub mod meteora;

use async_trait::async_trait;
use thiserror::Error;

use crate::market::models::{PoolGroup, SourceTag};

/// Any failure while fetching or decoding one upstream response.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{source_name}: request failed: {error}")]
    Request {
        source_name: String,
        #[source]
        error: reqwest::Error,
    },

    #[error("{source_name}: upstream returned {status}: {body}")]
    Status {
        source_name: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{source_name}: malformed payload: {error}")]
    Decode {
        source_name: String,
        #[source]
        error: serde_json::Error,
    },
}

impl SourceError {
    /// Name of the source that failed.
    pub fn source_name(&self) -> &str {
        match self {
            Self::Request { source_name, .. }
            | Self::Status { source_name, .. }
            | Self::Decode { source_name, .. } => source_name,
        }
    }
}

/// Trait for all pool group sources.
/// Each configured endpoint is one source; they are processed uniformly.
#[async_trait]
pub trait PoolSource: Send + Sync {
    /// Fetch the pool groups matching a token address.
    async fn fetch_groups(&self, address: &str) -> Result<Vec<PoolGroup>, SourceError>;

    /// Provenance tag attached to pools found through this source.
    fn tag(&self) -> &SourceTag;

    /// Human-readable name of this source.
    fn name(&self) -> &str {
        &self.tag().name
    }
}
