use rust_decimal::Decimal;
use serde::Deserialize;

/// A single DLMM pair as reported by the pair API.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Pool {
    pub address: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub liquidity: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub fees_24h: Decimal,
    #[serde(default)]
    pub bin_step: u32,
}

/// A named group of pairs sharing the same token composition.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolGroup {
    pub name: String,
    #[serde(default)]
    pub pairs: Vec<Pool>,
}

/// Body of `all_by_groups`.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupsResponse {
    #[serde(default)]
    pub groups: Vec<PoolGroup>,
}

/// Identity of the endpoint a pool was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTag {
    pub name: String,
    pub domain: String,
}

/// Groups fetched from one source, kept with their provenance.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub source: SourceTag,
    pub groups: Vec<PoolGroup>,
}

/// A pool with its fees/liquidity coefficient and provenance tag.
#[derive(Debug, Clone)]
pub struct ScoredPool {
    pub pool: Pool,
    pub coefficient: Decimal,
    pub source: SourceTag,
}

/// Top pools for one token address, best coefficient first.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub address: String,
    pub entries: Vec<ScoredPool>,
}

impl Ranking {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The pair API encodes `liquidity` as a string and `fees_24h` as a number.
/// Both are accepted in either form; `null` and numbers outside the
/// `Decimal` range read as zero, so the pair is filtered out on its own.
pub(crate) mod lenient_decimal {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDecimal {
        Text(String),
        Number(serde_json::Number),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match Option::<RawDecimal>::deserialize(deserializer)? {
            Some(raw) => raw,
            None => return Ok(Decimal::ZERO),
        };

        let text = match raw {
            RawDecimal::Text(s) => s,
            RawDecimal::Number(n) => n.to_string(),
        };

        parse(&text).ok_or_else(|| D::Error::custom(format!("invalid decimal: {text:?}")))
    }

    pub(crate) fn parse(text: &str) -> Option<Decimal> {
        let text = text.trim();
        if text.is_empty() {
            return Some(Decimal::ZERO);
        }
        match Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)) {
            Ok(value) => Some(value),
            // Well-formed but unrepresentable (e.g. 1e40)
            Err(_) if text.parse::<f64>().is_ok() => Some(Decimal::ZERO),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pool_accepts_string_and_number_decimals() {
        let json = r#"{
            "address": "PoolAddr111",
            "name": "BONK-SOL",
            "liquidity": "12345.678901234567",
            "fees_24h": 42.5,
            "bin_step": 80,
            "trade_volume_24h": 1000.0
        }"#;
        let pool: Pool = serde_json::from_str(json).unwrap();
        assert_eq!(pool.liquidity, dec!(12345.678901234567));
        assert_eq!(pool.fees_24h, dec!(42.5));
        assert_eq!(pool.bin_step, 80);
    }

    #[test]
    fn test_pool_null_and_missing_decimals_are_zero() {
        let json = r#"{"address": "a", "name": "X-SOL", "liquidity": null}"#;
        let pool: Pool = serde_json::from_str(json).unwrap();
        assert_eq!(pool.liquidity, Decimal::ZERO);
        assert_eq!(pool.fees_24h, Decimal::ZERO);
        assert_eq!(pool.bin_step, 0);
    }

    #[test]
    fn test_pool_rejects_garbage_decimal() {
        let json = r#"{"address": "a", "name": "X-SOL", "liquidity": "lots"}"#;
        assert!(serde_json::from_str::<Pool>(json).is_err());
    }

    #[test]
    fn test_out_of_range_decimal_reads_as_zero() {
        assert_eq!(lenient_decimal::parse("1e40"), Some(Decimal::ZERO));
        let json = r#"{"address": "a", "name": "X-SOL", "liquidity": "1e40", "fees_24h": 5}"#;
        let pool: Pool = serde_json::from_str(json).unwrap();
        assert_eq!(pool.liquidity, Decimal::ZERO);
        assert_eq!(pool.fees_24h, dec!(5));
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(lenient_decimal::parse("1.5e-5"), Some(dec!(0.000015)));
        assert_eq!(lenient_decimal::parse(" 7 "), Some(dec!(7)));
    }

    #[test]
    fn test_groups_response_shape() {
        let json = r#"{
            "groups": [
                {"name": "BONK-SOL", "pairs": [
                    {"address": "p1", "name": "BONK-SOL", "liquidity": "5000", "fees_24h": 100, "bin_step": 100}
                ]},
                {"name": "BONK-USDC", "pairs": []}
            ],
            "total": 2
        }"#;
        let resp: GroupsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.groups.len(), 2);
        assert_eq!(resp.groups[0].pairs[0].fees_24h, dec!(100));
    }
}
