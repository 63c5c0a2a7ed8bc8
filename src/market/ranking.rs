//! Fees/liquidity ranking of pools merged from several sources.
//!
//! Pure and deterministic given the fetched batches: marker filter, merge,
//! coefficient, best-per-address dedup, liquidity floor, sort, truncate.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::config::RankingConfig;
use crate::market::models::{PoolGroup, ScoredPool, SourceBatch, SourceTag};

/// Rank pools from all batches and return at most `top_n` entries,
/// highest coefficient first.
pub fn rank_pools(batches: &[SourceBatch], config: &RankingConfig) -> Vec<ScoredPool> {
    let retained: Vec<(&SourceTag, Vec<&PoolGroup>)> = batches
        .iter()
        .map(|batch| {
            let groups = batch
                .groups
                .iter()
                .filter(|g| g.name.contains(&config.quote_marker))
                .collect();
            (&batch.source, groups)
        })
        .collect();

    // Later sources take the tag for addresses they share with earlier ones
    let mut provenance: HashMap<&str, &SourceTag> = HashMap::new();
    for (source, groups) in &retained {
        for pool in groups.iter().flat_map(|g| &g.pairs) {
            provenance.insert(pool.address.as_str(), *source);
        }
    }

    let mut unique: Vec<ScoredPool> = Vec::new();
    let mut index_by_address: HashMap<&str, usize> = HashMap::new();

    for (source, groups) in &retained {
        for pool in groups.iter().flat_map(|g| &g.pairs) {
            let Some(coefficient) = coefficient(pool.fees_24h, pool.liquidity) else {
                continue;
            };

            match index_by_address.get(pool.address.as_str()) {
                Some(&idx) => {
                    if unique[idx].coefficient < coefficient {
                        unique[idx].pool = pool.clone();
                        unique[idx].coefficient = coefficient;
                    }
                }
                None => {
                    let tag = provenance.get(pool.address.as_str()).unwrap_or(source);
                    index_by_address.insert(pool.address.as_str(), unique.len());
                    unique.push(ScoredPool {
                        pool: pool.clone(),
                        coefficient,
                        source: (*tag).clone(),
                    });
                }
            }
        }
    }

    let mut ranked: Vec<ScoredPool> = unique
        .into_iter()
        .filter(|s| s.pool.liquidity >= config.min_liquidity)
        .collect();

    // Stable: equal coefficients keep first-seen order
    ranked.sort_by(|a, b| b.coefficient.cmp(&a.coefficient));
    ranked.truncate(config.top_n);
    ranked
}

/// `fees_24h / liquidity`, only for strictly positive inputs.
/// `None` when either side is non-positive or the division overflows.
pub fn coefficient(fees_24h: Decimal, liquidity: Decimal) -> Option<Decimal> {
    if liquidity <= Decimal::ZERO || fees_24h <= Decimal::ZERO {
        return None;
    }
    fees_24h.checked_div(liquidity)
}
