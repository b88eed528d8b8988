//! C64 memory map lookup.
//!
//! The table is declaration-ordered, most specific first: individual
//! registers and small register groups come before the chip block that
//! encloses them, and SID voices come before the SID block. Lookup stops
//! after two matches, so an address resolves to its precise register plus
//! the owning subsystem. Two non-nested ranges of equal specificity resolve
//! in table order; that order is curated priority, not an accident.

use super::{EnrichmentInput, EnrichmentPass, PassOutput};
use crate::models::to_hex;

/// A named, described sub-range of the address space.
#[derive(Debug, Clone, Copy)]
pub struct MemoryRegion {
    /// First address in the region.
    pub start: u16,
    /// Last address in the region (inclusive).
    pub end: u16,
    /// Region name.
    pub name: &'static str,
    /// Short description.
    pub description: &'static str,
}

/// How many region matches a single address may report.
const MAX_MATCHES: usize = 2;

/// The C64 memory map, narrow entries first.
static MEMORY_MAP: &[MemoryRegion] = &[
    // Registers and small groups
    MemoryRegion { start: 0x0000, end: 0x0001, name: "CPU Port", description: "6510 data direction and bank switching" },
    MemoryRegion { start: 0x0286, end: 0x0287, name: "Text Color", description: "current cursor text color" },
    MemoryRegion { start: 0x0314, end: 0x0315, name: "IRQ Vector", description: "hardware interrupt service routine pointer" },
    MemoryRegion { start: 0xD011, end: 0xD011, name: "VIC-II Control 1", description: "vertical scroll, screen height, raster bit 8" },
    MemoryRegion { start: 0xD012, end: 0xD012, name: "VIC-II Raster", description: "raster line read/compare" },
    MemoryRegion { start: 0xD015, end: 0xD015, name: "VIC-II Sprite Enable", description: "sprite display enable bits" },
    MemoryRegion { start: 0xD016, end: 0xD016, name: "VIC-II Control 2", description: "horizontal scroll, 38/40 columns, multicolor" },
    MemoryRegion { start: 0xD018, end: 0xD018, name: "VIC-II Memory Setup", description: "screen and character memory pointers" },
    MemoryRegion { start: 0xD019, end: 0xD01A, name: "VIC-II Interrupt", description: "interrupt latch and enable" },
    MemoryRegion { start: 0xD020, end: 0xD020, name: "VIC-II Border Color", description: "border color (16 colors, bits 0-3)" },
    MemoryRegion { start: 0xD021, end: 0xD024, name: "VIC-II Background Colors", description: "background color registers 0-3" },
    MemoryRegion { start: 0xD027, end: 0xD02E, name: "VIC-II Sprite Colors", description: "individual sprite color registers" },
    MemoryRegion { start: 0xD400, end: 0xD406, name: "SID Voice 1", description: "frequency, pulse width, waveform, ADSR" },
    MemoryRegion { start: 0xD407, end: 0xD40D, name: "SID Voice 2", description: "frequency, pulse width, waveform, ADSR" },
    MemoryRegion { start: 0xD40E, end: 0xD414, name: "SID Voice 3", description: "frequency, pulse width, waveform, ADSR" },
    MemoryRegion { start: 0xD415, end: 0xD418, name: "SID Filter", description: "cutoff, resonance, master volume" },
    MemoryRegion { start: 0xDC0D, end: 0xDC0D, name: "CIA 1 Interrupt Control", description: "interrupt control and status" },
    MemoryRegion { start: 0xDD0D, end: 0xDD0D, name: "CIA 2 Interrupt Control", description: "interrupt control and status" },
    // Broad regions
    MemoryRegion { start: 0x0000, end: 0x00FF, name: "Zero Page", description: "fast-access work area" },
    MemoryRegion { start: 0x0100, end: 0x01FF, name: "Stack", description: "6510 processor stack" },
    MemoryRegion { start: 0x0200, end: 0x03FF, name: "OS Work Area", description: "KERNAL and BASIC working storage" },
    MemoryRegion { start: 0x0400, end: 0x07FF, name: "Screen RAM", description: "default 40x25 text screen" },
    MemoryRegion { start: 0x0800, end: 0x9FFF, name: "BASIC Program Area", description: "BASIC program text and variables" },
    MemoryRegion { start: 0xA000, end: 0xBFFF, name: "BASIC ROM", description: "BASIC interpreter ROM" },
    MemoryRegion { start: 0xC000, end: 0xCFFF, name: "Upper RAM", description: "free RAM block" },
    MemoryRegion { start: 0xD000, end: 0xD3FF, name: "VIC-II", description: "Video Interface Controller" },
    MemoryRegion { start: 0xD400, end: 0xD7FF, name: "SID", description: "Sound Interface Device" },
    MemoryRegion { start: 0xD800, end: 0xDBFF, name: "Color RAM", description: "per-character color nybbles" },
    MemoryRegion { start: 0xDC00, end: 0xDCFF, name: "CIA 1", description: "keyboard, joystick, timers" },
    MemoryRegion { start: 0xDD00, end: 0xDDFF, name: "CIA 2", description: "serial bus, user port, VIC bank select" },
    MemoryRegion { start: 0xE000, end: 0xFFFF, name: "KERNAL ROM", description: "operating system ROM" },
];

/// Returns `"{name} ({description})"` for every region containing the
/// address, in table order, capped at two matches.
#[must_use]
pub fn lookup_address_region(address: u16) -> Vec<String> {
    let mut matches = Vec::with_capacity(MAX_MATCHES);

    for region in MEMORY_MAP {
        if address < region.start || address > region.end {
            continue;
        }
        matches.push(format!("{} ({})", region.name, region.description));
        if matches.len() == MAX_MATCHES {
            break;
        }
    }

    matches
}

/// Adds region hints for every enrichable address-sized token.
///
/// Hints are deduplicated across the whole query, so two addresses in the
/// same region report it once.
pub struct MemoryMapPass;

impl EnrichmentPass for MemoryMapPass {
    fn name(&self) -> &'static str {
        "memory_map"
    }

    fn enrich(&self, input: &EnrichmentInput<'_>) -> PassOutput {
        let mut output = PassOutput::default();
        let mut seen: Vec<String> = Vec::new();

        for number in input.numbers {
            if !number.is_enrichable() || number.token.value <= 255 {
                continue;
            }

            let hex = to_hex(number.token.value);
            for region in lookup_address_region(number.token.value) {
                if seen.contains(&region) {
                    continue;
                }
                output.region_hints.push(format!("{hex} → {region}"));
                seen.push(region);
            }
        }

        output
    }
}
