//! Multi-base number annotations and hex-address filter tags.

use super::{EnrichmentInput, EnrichmentPass, PassOutput};
use crate::models::{NumericBase, NumericToken};

/// Builds the annotation line for one numeric token.
///
/// Lists the alternate-base forms the source spelling doesn't already have:
/// hex gains decimal (and binary for byte values), binary gains decimal and
/// hex, decimal gains hex (and binary for byte values).
#[must_use]
pub fn enrich_number(token: &NumericToken) -> String {
    let mut alternates = Vec::with_capacity(2);

    match token.base {
        NumericBase::Hex => {
            alternates.push(token.decimal());
            if let Some(binary) = token.binary() {
                alternates.push(binary);
            }
        },
        NumericBase::Binary => {
            alternates.push(token.decimal());
            alternates.push(token.hex());
        },
        NumericBase::Decimal => {
            alternates.push(token.hex());
            if let Some(binary) = token.binary() {
                alternates.push(binary);
            }
        },
    }

    format!("{} = {}", token.raw, alternates.join(" / "))
}

/// Annotates enrichable numeric tokens with their alternate-base forms and
/// turns address-sized values into `$`-marked filter tags.
pub struct NumberPass;

impl EnrichmentPass for NumberPass {
    fn name(&self) -> &'static str {
        "numbers"
    }

    fn enrich(&self, input: &EnrichmentInput<'_>) -> PassOutput {
        let mut output = PassOutput::default();

        for number in input.numbers {
            if !number.is_enrichable() {
                continue;
            }

            output.annotations.push(enrich_number(&number.token));

            if let Some(tag) = number.token.address_tag() {
                output.filter_tags.push(format!("${tag}"));
            }
        }

        output
    }
}
