//! Telegram reply rendering for a pool ranking (HTML parse mode).

use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use teloxide::utils::html;

use crate::market::models::{Ranking, ScoredPool};

/// Render the full reply: header, blank line, one block per pool.
pub fn format_ranking(ranking: &Ranking, header: &str) -> String {
    let body = ranking
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format_entry(i + 1, entry))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{header}\n\n{body}")
}

fn format_entry(rank: usize, entry: &ScoredPool) -> String {
    let pool = &entry.pool;
    format!(
        "{rank}. {name}\n\
         💧 Liquidity: {liquidity}\n\
         💰 24h Fees: {fees}\n\
         🔢 Bin step: {bin_step}\n\
         📊 Coefficient: {coefficient}\n\
         🔗 Address: {link}\n",
        name = html::escape(&pool.name),
        liquidity = format_usd(pool.liquidity),
        fees = format_usd(pool.fees_24h),
        bin_step = pool.bin_step,
        coefficient = format_fixed(entry.coefficient, 2),
        link = pool_link(&entry.source.domain, &pool.address),
    )
}

/// `<a>` tag pointing at the pool page, labelled with a shortened address.
pub fn pool_link(domain: &str, address: &str) -> String {
    let short: String = address.chars().take(8).collect();
    format!(
        "<a href=\"https://{domain}/dlmm/{address}\">{domain}/dlmm/{short}...</a>",
        address = html::escape(address),
        short = html::escape(&short),
    )
}

/// `$0,0.00` style: two decimals, comma thousands separators.
pub fn format_usd(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let magnitude = rounded.abs();
    let whole = magnitude.trunc().to_u128().unwrap_or_default();
    let cents = (magnitude.fract() * Decimal::ONE_HUNDRED)
        .trunc()
        .to_u128()
        .unwrap_or_default();

    format!("{sign}${}.{cents:02}", whole.to_formatted_string(&Locale::en))
}

/// Round half away from zero and always print exactly `dp` decimals.
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}
