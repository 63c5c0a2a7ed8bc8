//! Pool discovery and ranking for a single token address.
//!
//! Fans out to every configured source at once, merges the batches and
//! ranks them. Upstream failures are absorbed here: the caller only ever
//! sees a ranking or nothing.

use futures::future::try_join_all;
use tracing::{debug, info, instrument, warn};

use crate::config::RankingConfig;
use crate::data::{PoolSource, SourceError};
use crate::market::address;
use crate::market::models::{Ranking, SourceBatch};
use crate::market::ranking::rank_pools;
use crate::market::report::format_ranking;

pub struct PoolScanner {
    sources: Vec<Box<dyn PoolSource>>,
    config: RankingConfig,
    reply_header: String,
}

impl PoolScanner {
    pub fn new(
        sources: Vec<Box<dyn PoolSource>>,
        config: RankingConfig,
        reply_header: impl Into<String>,
    ) -> Self {
        Self {
            sources,
            config,
            reply_header: reply_header.into(),
        }
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Fetch from all sources and rank. Any single source failure fails
    /// the whole operation; partial results are never ranked.
    #[instrument(skip(self))]
    pub async fn try_rank(&self, address: &str) -> Result<Ranking, SourceError> {
        let batches = try_join_all(self.sources.iter().map(|source| async move {
            let groups = source.fetch_groups(address).await?;
            debug!(source = source.name(), groups = groups.len(), "Source responded");
            Ok::<_, SourceError>(SourceBatch {
                source: source.tag().clone(),
                groups,
            })
        }))
        .await?;

        let candidates: usize = batches
            .iter()
            .flat_map(|b| &b.groups)
            .map(|g| g.pairs.len())
            .sum();

        let entries = rank_pools(&batches, &self.config);

        info!(
            address,
            candidates,
            results = entries.len(),
            "Pools ranked"
        );

        Ok(Ranking {
            address: address.to_string(),
            entries,
        })
    }

    /// Rank pools for an address; `None` on upstream failure or when
    /// nothing survives the filters.
    pub async fn rank(&self, address: &str) -> Option<Ranking> {
        match self.try_rank(address).await {
            Ok(ranking) if ranking.is_empty() => None,
            Ok(ranking) => Some(ranking),
            Err(e) => {
                warn!(
                    address,
                    source = e.source_name(),
                    error = %e,
                    "Pool ranking aborted"
                );
                None
            }
        }
    }

    /// Full text-in, reply-out path: recognize an address, rank, format.
    pub async fn respond(&self, text: &str) -> Option<String> {
        let address = address::recognize(text)?;
        debug!(address, "Token address recognized");

        let ranking = self.rank(address).await?;
        Some(format_ranking(&ranking, &self.reply_header))
    }
}
