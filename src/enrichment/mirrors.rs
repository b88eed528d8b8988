//! I/O mirror address resolution.
//!
//! The VIC-II, SID and CIA register blocks repeat through their whole
//! address windows. A query naming a mirror address would miss documents
//! indexed under the canonical address, so mirrors annotate and tag their
//! canonical counterpart.

use super::{EnrichmentInput, EnrichmentPass, PassOutput};
use crate::models::to_hex;

struct MirrorRange {
    /// Start of the I/O window.
    region_start: u16,
    /// End of the I/O window (inclusive).
    region_end: u16,
    /// Number of real registers in the chip.
    register_count: u16,
    /// Mirroring period in bytes.
    period: u16,
    /// Chip name for annotations.
    chip: &'static str,
}

static MIRROR_RANGES: &[MirrorRange] = &[
    // VIC-II: 47 registers at $D000-$D02E, mirrored every 64 bytes through $D3FF
    MirrorRange { region_start: 0xD000, region_end: 0xD3FF, register_count: 47, period: 64, chip: "VIC-II" },
    // SID: 29 registers at $D400-$D41C, mirrored every 32 bytes through $D7FF
    MirrorRange { region_start: 0xD400, region_end: 0xD7FF, register_count: 29, period: 32, chip: "SID" },
    // CIA1: 16 registers at $DC00-$DC0F, mirrored every 16 bytes through $DCFF
    MirrorRange { region_start: 0xDC00, region_end: 0xDCFF, register_count: 16, period: 16, chip: "CIA1" },
    // CIA2: 16 registers at $DD00-$DD0F, mirrored every 16 bytes through $DDFF
    MirrorRange { region_start: 0xDD00, region_end: 0xDDFF, register_count: 16, period: 16, chip: "CIA2" },
];

/// Resolves a mirror address to its canonical register address.
///
/// Returns `None` when the address is outside every mirror window, falls on
/// an unused slot within the period, or already is the canonical address.
#[must_use]
pub fn resolve_mirror(address: u16) -> Option<(u16, &'static str)> {
    for range in MIRROR_RANGES {
        if address < range.region_start || address > range.region_end {
            continue;
        }

        let offset = (address - range.region_start) % range.period;
        if offset >= range.register_count {
            return None;
        }

        let canonical = range.region_start + offset;
        if canonical == address {
            return None;
        }
        return Some((canonical, range.chip));
    }

    None
}

/// Annotates mirror addresses with their canonical register and adds the
/// canonical address as a filter tag.
pub struct MirrorPass;

impl EnrichmentPass for MirrorPass {
    fn name(&self) -> &'static str {
        "mirrors"
    }

    fn enrich(&self, input: &EnrichmentInput<'_>) -> PassOutput {
        let mut output = PassOutput::default();

        for number in input.numbers {
            let Some((canonical, chip)) = resolve_mirror(number.token.value) else {
                continue;
            };

            let canonical_hex = to_hex(canonical);
            output.annotations.push(format!(
                "{} is mirror of {canonical_hex} ({chip})",
                number.token.hex()
            ));
            output.filter_tags.push(canonical_hex);
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::extract_numbers;

    #[test]
    fn test_canonical_addresses_resolve_to_none() {
        assert_eq!(resolve_mirror(0xD020), None);
        assert_eq!(resolve_mirror(0xD400), None);
        assert_eq!(resolve_mirror(0xDC0F), None);
    }

    #[test]
    fn test_vic_mirror_resolves() {
        // $D040 = $D000 + 64, offset 0 into the second VIC-II repeat
        assert_eq!(resolve_mirror(0xD040), Some((0xD000, "VIC-II")));
        assert_eq!(resolve_mirror(0xD060), Some((0xD020, "VIC-II")));
    }

    #[test]
    fn test_sid_mirror_resolves() {
        assert_eq!(resolve_mirror(0xD420), Some((0xD400, "SID")));
        assert_eq!(resolve_mirror(0xD7F8), Some((0xD418, "SID")));
    }

    #[test]
    fn test_unused_mirror_slot() {
        // Offset 47-63 of each VIC-II repeat maps to no register
        assert_eq!(resolve_mirror(0xD030), None);
        assert_eq!(resolve_mirror(0xD07F), None);
    }

    #[test]
    fn test_outside_mirror_windows() {
        assert_eq!(resolve_mirror(0x0400), None);
        assert_eq!(resolve_mirror(0xD800), None);
    }

    #[test]
    fn test_pass_annotates_and_tags() {
        let numbers = extract_numbers("STA $D060");
        let output = MirrorPass.enrich(&EnrichmentInput {
            query: "STA $D060",
            numbers: &numbers,
        });
        assert_eq!(output.annotations, vec!["$D060 is mirror of $D020 (VIC-II)"]);
        assert_eq!(output.filter_tags, vec!["$D020"]);
    }
}
