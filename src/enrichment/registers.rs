//! Register mnemonic vocabulary.
//!
//! Symbolic names for the memory-mapped VIC-II, SID and CIA registers,
//! keyed by canonical address. The flat name set drives word matching in
//! query text; the address table is the source of truth.

// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use super::{EnrichmentInput, EnrichmentPass, PassOutput};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Canonical address to mnemonic, all C64 I/O registers.
static ADDRESS_TO_MNEMONIC: &[(u16, &str)] = &[
    // VIC-II ($D000-$D02E)
    (0xD000, "SP0X"), (0xD001, "SP0Y"), (0xD002, "SP1X"), (0xD003, "SP1Y"),
    (0xD004, "SP2X"), (0xD005, "SP2Y"), (0xD006, "SP3X"), (0xD007, "SP3Y"),
    (0xD008, "SP4X"), (0xD009, "SP4Y"), (0xD00A, "SP5X"), (0xD00B, "SP5Y"),
    (0xD00C, "SP6X"), (0xD00D, "SP6Y"), (0xD00E, "SP7X"), (0xD00F, "SP7Y"),
    (0xD010, "MSIGX"), (0xD011, "SCROLY"), (0xD012, "RASTER"), (0xD013, "LPENX"),
    (0xD014, "LPENY"), (0xD015, "SPENA"), (0xD016, "SCROLX"), (0xD017, "YXPAND"),
    (0xD018, "VMCSB"), (0xD019, "VICIRQ"), (0xD01A, "IRQMASK"), (0xD01B, "SPBGPR"),
    (0xD01C, "SPMC"), (0xD01D, "XXPAND"), (0xD01E, "SPSPCL"), (0xD01F, "SPBGCL"),
    (0xD020, "EXTCOL"), (0xD021, "BGCOL0"), (0xD022, "BGCOL1"), (0xD023, "BGCOL2"),
    (0xD024, "BGCOL3"), (0xD025, "SPMC0"), (0xD026, "SPMC1"), (0xD027, "SP0COL"),
    (0xD028, "SP1COL"), (0xD029, "SP2COL"), (0xD02A, "SP3COL"), (0xD02B, "SP4COL"),
    (0xD02C, "SP5COL"), (0xD02D, "SP6COL"), (0xD02E, "SP7COL"),
    // SID ($D400-$D41C)
    (0xD400, "FRELO1"), (0xD401, "FREHI1"), (0xD402, "PWLO1"), (0xD403, "PWHI1"),
    (0xD404, "VCREG1"), (0xD405, "ATDCY1"), (0xD406, "SUREL1"), (0xD407, "FRELO2"),
    (0xD408, "FREHI2"), (0xD409, "PWLO2"), (0xD40A, "PWHI2"), (0xD40B, "VCREG2"),
    (0xD40C, "ATDCY2"), (0xD40D, "SUREL2"), (0xD40E, "FRELO3"), (0xD40F, "FREHI3"),
    (0xD410, "PWLO3"), (0xD411, "PWHI3"), (0xD412, "VCREG3"), (0xD413, "ATDCY3"),
    (0xD414, "SUREL3"), (0xD415, "CUTLO"), (0xD416, "CUTHI"), (0xD417, "RESON"),
    (0xD418, "SIGVOL"), (0xD419, "POTX"), (0xD41A, "POTY"), (0xD41B, "RANDOM"),
    (0xD41C, "ENV3"),
    // CIA 1 ($DC00-$DC0F)
    (0xDC00, "CIAPRA"), (0xDC01, "CIAPRB"), (0xDC02, "CIDDRA"), (0xDC03, "CIDDRB"),
    (0xDC04, "TIMALO"), (0xDC05, "TIMAHI"), (0xDC06, "TIMBLO"), (0xDC07, "TIMBHI"),
    (0xDC08, "TODTEN"), (0xDC09, "TODSEC"), (0xDC0A, "TODMIN"), (0xDC0B, "TODHRS"),
    (0xDC0C, "CIASDR"), (0xDC0D, "CIAICR"), (0xDC0E, "CIACRA"), (0xDC0F, "CIACRB"),
    // CIA 2 ($DD00-$DD0F)
    (0xDD00, "CI2PRA"), (0xDD01, "CI2PRB"), (0xDD02, "C2DDRA"), (0xDD03, "C2DDRB"),
    (0xDD04, "TI2ALO"), (0xDD05, "TI2AHI"), (0xDD06, "TI2BLO"), (0xDD07, "TI2BHI"),
    (0xDD08, "TO2TEN"), (0xDD09, "TO2SEC"), (0xDD0A, "TO2MIN"), (0xDD0B, "TO2HRS"),
    (0xDD0C, "CI2SDR"), (0xDD0D, "CI2ICR"), (0xDD0E, "CI2CRA"), (0xDD0F, "CI2CRB"),
];

/// Flat mnemonic set for word matching.
pub(crate) static REGISTER_MNEMONICS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ADDRESS_TO_MNEMONIC.iter().map(|(_, name)| *name).collect());

static IDENTIFIER_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z][A-Za-z0-9_]{1,7}\b").expect("static regex: identifiers"));

/// Returns the register mnemonic for a canonical I/O address.
#[must_use]
pub fn mnemonic_for(address: u16) -> Option<&'static str> {
    ADDRESS_TO_MNEMONIC
        .iter()
        .find(|(addr, _)| *addr == address)
        .map(|(_, name)| *name)
}

/// Tags register mnemonic words, case-insensitively.
pub struct RegisterPass;

impl EnrichmentPass for RegisterPass {
    fn name(&self) -> &'static str {
        "registers"
    }

    fn enrich(&self, input: &EnrichmentInput<'_>) -> PassOutput {
        let mut output = PassOutput::default();

        for word in IDENTIFIER_WORD.find_iter(input.query) {
            let upper = word.as_str().to_uppercase();
            if REGISTER_MNEMONICS.contains(upper.as_str()) {
                output.filter_tags.push(upper);
            }
        }

        output
    }
}
