//! Token address recognition.
//!
//! Solana addresses are 44-character Base58 strings. Messages are scanned
//! for the first such run; no checksum or on-chain existence check is made.

use std::sync::LazyLock;

use regex::Regex;

/// Base58 alphabet: digits 1-9, letters without `0`, `I`, `O` and `l`.
static TOKEN_ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[1-9A-HJ-NP-Za-km-z]{44}").expect("Invalid token address regex")
});

/// Extract the first address-shaped substring from free text.
pub fn recognize(text: &str) -> Option<&str> {
    TOKEN_ADDRESS_PATTERN.find(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "3N2pLFRZ2zcXxaFZX1hsrWsF9vKfLuWWcQz5qD9Yh1Zw";

    #[test]
    fn test_extracts_address_from_sentence() {
        let text = format!("check out {ADDR} and more");
        assert_eq!(recognize(&text), Some(ADDR));
    }

    #[test]
    fn test_plain_text_has_no_address() {
        assert_eq!(recognize("hello world"), None);
    }

    #[test]
    fn test_bare_address() {
        assert_eq!(recognize(ADDR), Some(ADDR));
    }

    #[test]
    fn test_first_of_several() {
        let second = "So11111111111111111111111111111111111111112a";
        let text = format!("{ADDR} vs {second}");
        assert_eq!(recognize(&text), Some(ADDR));
    }

    #[test]
    fn test_too_short() {
        assert_eq!(recognize(&ADDR[..43]), None);
    }

    #[test]
    fn test_excluded_characters_break_the_run() {
        // '0', 'O', 'I' and 'l' are not Base58
        for bad in ['0', 'O', 'I', 'l'] {
            let mut text = ADDR.to_string();
            text.replace_range(20..21, &bad.to_string());
            assert_eq!(recognize(&text), None, "char {bad:?} should not match");
        }
    }

    #[test]
    fn test_longer_run_yields_leading_44() {
        let text = format!("{ADDR}pump");
        assert_eq!(recognize(&text), Some(ADDR));
    }

    #[test]
    fn test_multibyte_neighbours() {
        let text = format!("🚀{ADDR}🚀");
        assert_eq!(recognize(&text), Some(ADDR));
    }
}
