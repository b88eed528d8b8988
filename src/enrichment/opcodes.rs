//! 6502 instruction mnemonic tags.

// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use super::{EnrichmentInput, EnrichmentPass, PassOutput};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// All official plus common undocumented 6502 mnemonics.
static OPCODES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        // Official
        "LDA", "STA", "LDX", "STX", "LDY", "STY", "ADC", "SBC", "AND", "ORA", "EOR", "INC",
        "DEC", "INX", "INY", "DEX", "DEY", "ASL", "LSR", "ROL", "ROR", "BIT", "CMP", "CPX",
        "CPY", "JMP", "JSR", "RTS", "RTI", "BRK", "NOP", "BCC", "BCS", "BEQ", "BNE", "BMI",
        "BPL", "BVC", "BVS", "CLC", "SEC", "CLD", "SED", "CLI", "SEI", "CLV", "PHA", "PLA",
        "PHP", "PLP", "TAX", "TXA", "TAY", "TYA", "TSX", "TXS",
        // Common undocumented
        "DCP", "DCM", "ISB", "ISC", "INS", "LAX", "SAX", "AXS", "SLO", "ASO", "RLA", "SRE",
        "LSE", "RRA", "ANC", "ALR", "ARR", "XAA", "ANE", "LAS", "TAS", "SHA", "SHX", "SHY",
    ])
});

/// Uppercase-only: lowercase "and"/"bit" in prose must not become tags.
static MNEMONIC_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{3}\b").expect("static regex: mnemonic words"));

/// Whether a word is a 6502 mnemonic, ignoring case.
#[must_use]
pub fn is_opcode(word: &str) -> bool {
    OPCODES.contains(word.to_uppercase().as_str())
}

/// Tags instruction mnemonics, but only when the query carries no
/// address-sized value, since address filtering takes priority and opcode
/// tags would waste filter slots.
pub struct OpcodePass;

impl EnrichmentPass for OpcodePass {
    fn name(&self) -> &'static str {
        "opcodes"
    }

    fn enrich(&self, input: &EnrichmentInput<'_>) -> PassOutput {
        let mut output = PassOutput::default();

        let has_addresses = input.numbers.iter().any(|n| n.token.value > 255);
        if has_addresses {
            return output;
        }

        for word in MNEMONIC_WORD.find_iter(input.query) {
            let word = word.as_str();
            if OPCODES.contains(word) && !output.filter_tags.contains(&word.to_string()) {
                output.filter_tags.push(word.to_string());
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
        OpcodePass.enrich(&EnrichmentInput {
            query,
            numbers: &numbers,
        })
    }

    #[test]
    fn test_mnemonics_become_tags() {
        let output = run("difference between LDA and LDX");
        assert_eq!(output.filter_tags, vec!["LDA", "LDX"]);
    }

    #[test]
    fn test_lowercase_prose_ignored() {
        let output = run("load and store values");
        assert!(output.filter_tags.is_empty());
    }

    #[test]
    fn test_suppressed_when_address_present() {
        let output = run("STA $D020");
        assert!(output.filter_tags.is_empty());
    }

    #[test]
    fn test_byte_values_do_not_suppress() {
        let output = run("LDA $20");
        assert_eq!(output.filter_tags, vec!["LDA"]);
    }

    #[test]
    fn test_is_opcode_ignores_case() {
        assert!(is_opcode("sta"));
        assert!(is_opcode("STA"));
        assert!(!is_opcode("FOO"));
    }
}
