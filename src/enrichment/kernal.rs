//! KERNAL API label vocabulary.

// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use super::{EnrichmentInput, EnrichmentPass, PassOutput};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// KERNAL API entry point labels (jump table $FF81-$FFF3).
pub(crate) static KERNAL_LABELS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "ACPTR", "CHKIN", "CHKOUT", "CHRIN", "CHROUT", "CINT", "CIOUT", "CLALL", "CLOSE",
        "CLRCHN", "GETIN", "IOBASE", "IOINIT", "LISTEN", "LOAD", "MEMBOT", "MEMTOP", "OPEN",
        "PLOT", "RAMTAS", "RDTIM", "READST", "RESTOR", "SAVE", "SCNKEY", "SCREEN", "SECOND",
        "SETLFS", "SETMSG", "SETNAM", "SETTIM", "SETTMO", "STOP", "TALK", "TKSA", "TALKSA",
        "UDTIM", "UNLSN", "UNTLK", "UNTALK", "VECTOR",
    ])
});

static IDENTIFIER_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z][A-Za-z0-9_]{1,7}\b").expect("static regex: identifiers"));

/// Tags KERNAL API labels, case-insensitively.
pub struct KernalPass;

impl EnrichmentPass for KernalPass {
    fn name(&self) -> &'static str {
        "kernal"
    }

    fn enrich(&self, input: &EnrichmentInput<'_>) -> PassOutput {
        let mut output = PassOutput::default();

        for word in IDENTIFIER_WORD.find_iter(input.query) {
            let upper = word.as_str().to_uppercase();
            if KERNAL_LABELS.contains(upper.as_str()) {
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
        KernalPass.enrich(&EnrichmentInput {
            query,
            numbers: &numbers,
        })
    }

    #[test]
    fn test_labels_tagged_case_insensitively() {
        let output = run("print with chrout");
        assert_eq!(output.filter_tags, vec!["CHROUT"]);
    }

    #[test]
    fn test_word_boundary_matching() {
        // CHROUTX is not a label; the candidate must stand alone
        let output = run("CHROUTX");
        assert!(output.filter_tags.is_empty());
    }

    #[test]
    fn test_multiple_labels() {
        let output = run("SETLFS then SETNAM then LOAD");
        assert_eq!(output.filter_tags, vec!["SETLFS", "SETNAM", "LOAD"]);
    }
}
