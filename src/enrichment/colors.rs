//! Color palette annotations and color-name tags.

// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use super::{EnrichmentInput, EnrichmentPass, PassOutput};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// VIC-II 4-bit palette, indexed by color value.
static PALETTE: [&str; 16] = [
    "Black",
    "White",
    "Red",
    "Cyan",
    "Purple",
    "Green",
    "Blue",
    "Yellow",
    "Orange",
    "Brown",
    "Light Red",
    "Dark Grey",
    "Grey",
    "Light Green",
    "Light Blue",
    "Light Grey",
];

/// Single-word color names usable as filter tags.
pub(crate) static COLOR_NAME_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "BLACK", "WHITE", "RED", "CYAN", "PURPLE", "GREEN", "BLUE", "YELLOW", "ORANGE", "BROWN",
        "GREY",
    ])
});

/// Address ranges where a 4-bit color index is meaningful.
static COLOR_ADDRESS_RANGES: &[(u16, u16)] = &[
    (0x0286, 0x0287), // current text color + color under cursor
    (0xD020, 0xD02E), // VIC-II: border, backgrounds, sprite colors
    (0xD800, 0xDBFF), // Color RAM
];

static MENTIONS_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bcolou?r").expect("static regex: color mention"));

static COLOR_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z]{3,}\b").expect("static regex: color words"));

fn is_color_address(value: u16) -> bool {
    COLOR_ADDRESS_RANGES
        .iter()
        .any(|(start, end)| value >= *start && value <= *end)
}

/// Annotates palette values and tags color-name words.
///
/// Value annotations are gated on a color-relevant context (the query
/// mentions color/colour or carries an address in a color register range)
/// so a bare "13" in unrelated text stays unannotated.
pub struct ColorPass;

impl EnrichmentPass for ColorPass {
    fn name(&self) -> &'static str {
        "colors"
    }

    fn enrich(&self, input: &EnrichmentInput<'_>) -> PassOutput {
        let mut output = PassOutput::default();

        let color_context = MENTIONS_COLOR.is_match(input.query)
            || input
                .numbers
                .iter()
                .any(|n| is_color_address(n.token.value));

        if color_context {
            for number in input.numbers {
                if let Some(name) = PALETTE.get(usize::from(number.token.value)) {
                    output
                        .annotations
                        .push(format!("{} = {name}", number.token.raw));
                }
            }
        }

        for word in COLOR_WORD.find_iter(input.query) {
            let upper = word.as_str().to_uppercase();
            if COLOR_NAME_TAGS.contains(upper.as_str()) {
                output.filter_tags.push(upper);
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::extract_numbers;

    fn run(query: &str) -> PassOutput {
        let numbers = extract_numbers(query);
        ColorPass.enrich(&EnrichmentInput {
            query,
            numbers: &numbers,
        })
    }

    #[test]
    fn test_color_value_in_register_context() {
        let output = run("53280, 13");
        assert_eq!(output.annotations, vec!["13 = Light Green"]);
    }

    #[test]
    fn test_color_value_with_color_mention() {
        let output = run("border colour 14, 53280");
        assert!(output.annotations.contains(&"14 = Light Blue".to_string()));
    }

    #[test]
    fn test_no_annotation_outside_color_context() {
        let output = run("load block 12 from disk");
        assert!(output.annotations.is_empty());
    }

    #[test]
    fn test_color_name_words_become_tags() {
        let output = run("make the border light blue");
        assert_eq!(output.filter_tags, vec!["BLUE"]);
    }

    #[test]
    fn test_short_words_not_scanned() {
        // Two-letter words never match the color vocabulary
        let output = run("do it");
        assert!(output.filter_tags.is_empty());
    }
}
