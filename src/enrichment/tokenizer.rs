//! Numeric token recognition.
//!
//! Scans query text for numeric literals using named rules so each rule's
//! precedence and edge cases stay independently testable:
//!
//! - `HexLiteral`: `$` + 1-4 hex digits
//! - `BinaryLiteral`: `%` + 4-8 binary digits
//! - `DecimalLiteral`: bare 2-5 digit decimal
//! - `CommaValue`: 1-2 digit decimal directly after a comma (the value
//!   argument in `address,value` idioms)
//!
//! The `regex` crate has no lookaround, so word boundaries and comma
//! context are checked against the source text around each candidate.

// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use crate::models::{NumericBase, NumericToken};
use once_cell::sync::Lazy;
use regex::Regex;

/// Candidate numeric literals; boundary checks happen outside the regex.
static CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$[0-9A-Fa-f]{1,4}|%[01]{4,8}|[0-9]{1,5}")
        .expect("static regex: numeric candidates")
});

/// The tokenizer rule that produced an extracted number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRule {
    /// `$`-prefixed hex literal.
    HexLiteral,
    /// `%`-prefixed binary literal.
    BinaryLiteral,
    /// Bare 2-5 digit decimal.
    DecimalLiteral,
    /// 1-2 digit decimal immediately following a comma.
    CommaValue,
}

/// A numeric token together with its extraction context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedNumber {
    /// The parsed token.
    pub token: NumericToken,
    /// The rule that matched it.
    pub rule: TokenRule,
    /// Whether the token directly follows a comma.
    pub after_comma: bool,
}

impl ExtractedNumber {
    /// Whether this token qualifies for base-conversion enrichment.
    ///
    /// Marker-prefixed literals always qualify. A bare decimal reduced to
    /// at most one significant digit is prose noise unless it sits in
    /// comma-value position.
    #[must_use]
    pub fn is_enrichable(&self) -> bool {
        match self.rule {
            TokenRule::HexLiteral | TokenRule::BinaryLiteral => true,
            TokenRule::DecimalLiteral | TokenRule::CommaValue => {
                let significant = self.token.raw.trim_start_matches('0').len();
                significant >= 2 || self.after_comma
            },
        }
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// True when the nearest non-blank byte before `pos` is a comma.
fn follows_comma(text: &[u8], pos: usize) -> bool {
    text[..pos]
        .iter()
        .rev()
        .find(|b| **b != b' ' && **b != b'\t')
        .is_some_and(|b| *b == b',')
}

fn parse_candidate(raw: &str) -> Option<(u16, NumericBase)> {
    let (digits, radix, base) = if let Some(rest) = raw.strip_prefix('$') {
        (rest, 16, NumericBase::Hex)
    } else if let Some(rest) = raw.strip_prefix('%') {
        (rest, 2, NumericBase::Binary)
    } else {
        (raw, 10, NumericBase::Decimal)
    };

    // Address-like tokens must fit in 16 bits; 5-digit decimals can overflow.
    let value = u32::from_str_radix(digits, radix).ok()?;
    u16::try_from(value).ok().map(|v| (v, base))
}

/// Extracts all numeric tokens from a query string.
///
/// Candidates adjacent to a word character on either side are rejected, as
/// are bare single-digit decimals outside comma-value position and values
/// that do not fit in 16 bits. Duplicate values are dropped; the first
/// occurrence wins.
#[must_use]
pub fn extract_numbers(query: &str) -> Vec<ExtractedNumber> {
    let bytes = query.as_bytes();
    let mut seen = Vec::new();
    let mut results = Vec::new();

    for m in CANDIDATE.find_iter(query) {
        if m.start() > 0 && is_word_byte(bytes[m.start() - 1]) {
            continue;
        }
        if m.end() < bytes.len() && is_word_byte(bytes[m.end()]) {
            continue;
        }

        let raw = m.as_str();
        let Some((value, base)) = parse_candidate(raw) else {
            continue;
        };

        let after_comma = follows_comma(bytes, m.start());
        let rule = match base {
            NumericBase::Hex => TokenRule::HexLiteral,
            NumericBase::Binary => TokenRule::BinaryLiteral,
            NumericBase::Decimal => {
                if raw.len() == 1 && !after_comma {
                    // Lone digits are prose noise, not values.
                    continue;
                }
                if after_comma && raw.len() <= 2 {
                    TokenRule::CommaValue
                } else {
                    TokenRule::DecimalLiteral
                }
            },
        };

        if seen.contains(&value) {
            continue;
        }
        seen.push(value);

        results.push(ExtractedNumber {
            token: NumericToken::new(raw.to_string(), value, base),
            rule,
            after_comma,
        });
    }

    results
}

/// Extracts address-sized tokens as bare 4-digit uppercase hex strings.
///
/// Byte-sized values are immediates, not addresses, and are excluded; bare
/// decimals above 255 are reinterpreted as addresses. Sorted, deduplicated.
#[must_use]
pub fn extract_hex_addresses(query: &str) -> Vec<String> {
    let mut addresses: Vec<String> = extract_numbers(query)
        .iter()
        .filter(|n| n.is_enrichable())
        .filter_map(|n| n.token.address_tag())
        .collect();
    addresses.sort_unstable();
    addresses.dedup();
    addresses
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(query: &str) -> Vec<u16> {
        extract_numbers(query).iter().map(|n| n.token.value).collect()
    }

    #[test]
    fn test_hex_literal_rule() {
        let numbers = extract_numbers("set $D020 to white");
        assert_eq!(numbers.len(), 1);
        assert_eq!(numbers[0].rule, TokenRule::HexLiteral);
        assert_eq!(numbers[0].token.value, 0xD020);
        assert_eq!(numbers[0].token.raw, "$D020");
    }

    #[test]
    fn test_binary_literal_rule() {
        let numbers = extract_numbers("mask %00001111");
        assert_eq!(numbers.len(), 1);
        assert_eq!(numbers[0].rule, TokenRule::BinaryLiteral);
        assert_eq!(numbers[0].token.value, 15);
    }

    #[test]
    fn test_binary_requires_four_digits() {
        assert!(values("%101").is_empty());
    }

    #[test]
    fn test_decimal_literal_rule() {
        let numbers = extract_numbers("poke 53280");
        assert_eq!(numbers.len(), 1);
        assert_eq!(numbers[0].rule, TokenRule::DecimalLiteral);
        assert_eq!(numbers[0].token.value, 53280);
    }

    #[test]
    fn test_comma_value_rule() {
        let numbers = extract_numbers("53280, 13");
        assert_eq!(numbers.len(), 2);
        assert_eq!(numbers[1].rule, TokenRule::CommaValue);
        assert!(numbers[1].after_comma);
        assert_eq!(numbers[1].token.value, 13);
    }

    #[test]
    fn test_single_digit_needs_comma() {
        assert!(values("use 5 sprites").is_empty());

        let numbers = extract_numbers("$D020,7");
        assert_eq!(values("$D020,7"), vec![0xD020, 7]);
        assert!(numbers[1].is_enrichable());
    }

    #[test]
    fn test_leading_zeros_not_significant() {
        let numbers = extract_numbers("bank 07");
        assert_eq!(numbers.len(), 1);
        assert!(!numbers[0].is_enrichable());

        let numbers = extract_numbers("53280,07");
        assert!(numbers[1].is_enrichable());
    }

    #[test]
    fn test_word_boundary_rejects_embedded_digits() {
        assert!(values("LDA9").is_empty());
        assert!(values("v2x").is_empty());
    }

    #[test]
    fn test_sixteen_bit_cap() {
        assert!(values("99999").is_empty());
        assert_eq!(values("65535"), vec![0xFFFF]);
    }

    #[test]
    fn test_duplicate_values_dropped() {
        assert_eq!(values("$D020 53280"), vec![0xD020]);
    }

    #[test]
    fn test_extract_hex_addresses() {
        assert_eq!(extract_hex_addresses("LDA $D020,7"), vec!["D020"]);
        assert!(extract_hex_addresses("$20").is_empty());
        assert_eq!(extract_hex_addresses("53280, 13"), vec!["D020"]);
        assert_eq!(
            extract_hex_addresses("copy $D400 to $D000"),
            vec!["D000", "D400"]
        );
    }
}
