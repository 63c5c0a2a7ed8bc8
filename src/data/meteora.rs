//! Meteora DLMM pair API source.
//!
//! Queries `all_by_groups` on one configured endpoint (app, edge, ...)
//! for the pool groups whose name or composition matches a token address.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::config::{HttpConfig, RankingConfig, SourceConfig};
use crate::data::{PoolSource, SourceError};
use crate::market::models::{GroupsResponse, PoolGroup, SourceTag};

/// Build the HTTP client shared by every source.
pub fn build_http_client(config: &HttpConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()
        .context("Failed to create HTTP client")
}

/// Query parameters sent with every `all_by_groups` request.
#[derive(Debug, Clone)]
pub struct GroupQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_key: String,
    pub order_by: String,
}

impl From<&RankingConfig> for GroupQuery {
    fn from(config: &RankingConfig) -> Self {
        Self {
            page: config.page,
            limit: config.limit,
            sort_key: config.sort_key.clone(),
            order_by: config.order_by.clone(),
        }
    }
}

pub struct MeteoraSource {
    http: reqwest::Client,
    endpoint: String,
    tag: SourceTag,
    query: GroupQuery,
}

impl MeteoraSource {
    pub fn new(http: reqwest::Client, source: &SourceConfig, query: GroupQuery) -> Self {
        let endpoint = format!("{}/all_by_groups", source.api_base.trim_end_matches('/'));
        Self {
            http,
            endpoint,
            tag: SourceTag {
                name: source.name.clone(),
                domain: source.domain.clone(),
            },
            query,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PoolSource for MeteoraSource {
    #[instrument(skip(self), fields(source = %self.tag.name))]
    async fn fetch_groups(&self, address: &str) -> Result<Vec<PoolGroup>, SourceError> {
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("page", self.query.page.to_string()),
                ("limit", self.query.limit.to_string()),
                ("unknown", "true".to_string()),
                ("search_term", address.to_string()),
                ("sort_key", self.query.sort_key.clone()),
                ("order_by", self.query.order_by.clone()),
            ])
            .send()
            .await
            .map_err(|error| SourceError::Request {
                source_name: self.tag.name.clone(),
                error,
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                source_name: self.tag.name.clone(),
                status,
                body,
            });
        }

        let body = resp.text().await.map_err(|error| SourceError::Request {
            source_name: self.tag.name.clone(),
            error,
        })?;

        let parsed: GroupsResponse =
            serde_json::from_str(&body).map_err(|error| SourceError::Decode {
                source_name: self.tag.name.clone(),
                error,
            })?;

        debug!(groups = parsed.groups.len(), "Pool groups fetched");
        Ok(parsed.groups)
    }

    fn tag(&self) -> &SourceTag {
        &self.tag
    }
}
