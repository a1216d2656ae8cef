//! Sound chip metadata keyed by the one-byte chip id stored in a module's
//! song info block.
//!
//! Ids the table does not define are not errors: [`lookup`] resolves them
//! to [`ChipDescriptor::RESERVED`], which reports zero channels, so callers
//! can sum channel counts over any chip list without special cases.

/// Display name and channel count for one chip id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipDescriptor {
    pub name: &'static str,
    pub channel_count: u8,
}

impl ChipDescriptor {
    /// Descriptor returned for ids absent from the table.
    pub const RESERVED: ChipDescriptor = ChipDescriptor::new("reserved", 0);

    /// Descriptor of id `0x00`, which marks an unused chip slot.
    pub const NONE: ChipDescriptor = ChipDescriptor::new("None", 0);

    const fn new(name: &'static str, channel_count: u8) -> Self {
        ChipDescriptor {
            name,
            channel_count,
        }
    }
}

/// Look up a chip id, falling back to [`ChipDescriptor::RESERVED`].
///
/// Total over all 256 ids; never fails.
pub fn lookup(chip_id: u8) -> ChipDescriptor {
    find(chip_id).unwrap_or(ChipDescriptor::RESERVED)
}

/// Look up a chip id, returning `None` for ids the table does not define.
pub fn find(chip_id: u8) -> Option<ChipDescriptor> {
    let (name, channels) = match chip_id {
        0x00 => return Some(ChipDescriptor::NONE),
        0x01 => ("YMU759", 17),
        0x02 => ("Genesis", 10),
        0x03 => ("SMS (SN76489)", 4),
        0x04 => ("Game Boy", 4),
        0x05 => ("PC Engine", 6),
        0x06 => ("NES", 5),
        0x07 => ("C64 (8580)", 3),
        0x08 => ("\"Arcade\" (YM2151+SegaPCM)", 13),
        0x09 => ("Neo Geo CD (YM2610)", 13),
        0x42 => ("Genesis extended", 13),
        0x43 => ("SMS (SN76489) + OPLL (YM2413)", 13),
        0x46 => ("NES + VRC7", 11),
        0x47 => ("C64 (6581)", 3),
        0x49 => ("Neo Geo CD extended", 16),
        0x80 => ("AY-3-8910", 3),
        0x81 => ("Amiga", 4),
        0x82 => ("YM2151", 8),
        0x83 => ("YM2612", 6),
        0x84 => ("TIA", 2),
        0x85 => ("VIC-20", 4),
        0x86 => ("PET", 1),
        0x87 => ("SNES", 8),
        0x88 => ("VRC6", 3),
        0x89 => ("OPLL (YM2413)", 9),
        0x8A => ("FDS", 1),
        0x8B => ("MMC5", 3),
        0x8C => ("Namco 163", 8),
        0x8D => ("OPN (YM2203)", 6),
        0x8E => ("PC-88 (YM2608)", 16),
        0x8F => ("OPL (YM3526)", 9),
        0x90 => ("OPL2 (YM3812)", 9),
        0x91 => ("OPL3 (YMF262)", 18),
        0x92 => ("MultiPCM", 28),
        0x93 => ("Intel 8253 (beeper)", 1),
        0x94 => ("POKEY", 4),
        0x95 => ("RF5C68", 8),
        0x96 => ("WonderSwan", 4),
        0x97 => ("Philips SAA1099", 6),
        0x98 => ("OPZ (YM2414)", 8),
        0x99 => ("Pokemon Mini", 1),
        0x9A => ("AY8930", 3),
        0x9B => ("SegaPCM", 16),
        0x9C => ("Virtual Boy", 6),
        0x9D => ("VRC7", 6),
        0x9E => ("YM2610B", 16),
        0x9F => ("ZX Spectrum (beeper)", 6),
        0xA0 => ("YM2612 extended", 9),
        0xA1 => ("Konami SCC", 5),
        0xA2 => ("OPL drums (YM3526)", 11),
        0xA3 => ("OPL2 drums (YM3812)", 11),
        0xA4 => ("OPL3 drums (YMF262)", 20),
        0xA5 => ("Neo Geo (YM2610)", 14),
        0xA6 => ("Neo Geo extended (YM2610)", 17),
        0xA7 => ("OPLL drums (YM2413)", 11),
        0xA8 => ("Atari Lynx", 4),
        0xA9 => ("SegaPCM (DefleMask compat.)", 5),
        0xAA => ("MSM6295", 4),
        0xAB => ("MSM6258", 1),
        0xAC => ("Commander X16 (VERA)", 17),
        0xAD => ("Bubble System WSG", 2),
        0xAE => ("OPL4 (YMF278B)", 42),
        0xAF => ("OPL4 drums (YMF278B)", 44),
        0xB0 => ("Sega/Allumer X1-010", 16),
        0xB1 => ("Ensoniq ES5506", 32),
        0xB2 => ("Yamaha Y8950", 10),
        0xB3 => ("Yamaha Y8950 drums", 12),
        0xB4 => ("Konami SCC+", 5),
        0xB5 => ("tilearrow Sound Unit", 8),
        0xB6 => ("OPN extended", 9),
        0xB7 => ("PC-98 extended", 19),
        0xB8 => ("YMZ280B", 8),
        0xB9 => ("Namco WSG", 3),
        0xBA => ("Namco 15xx", 8),
        0xBB => ("Namco CUS30", 8),
        0xBC => ("reserved", 8),
        0xBD => ("YM2612 extra features extended", 11),
        0xBE => ("YM2612 extra features", 7),
        0xBF => ("T6W28", 4),
        0xC0 => ("PCM DAC", 1),
        0xC1 => ("YM2612 CSM", 10),
        0xC2 => ("Neo Geo CSM (YM2610)", 18),
        0xC3 => ("OPN CSM", 10),
        0xC4 => ("PC-98 CSM", 20),
        0xC5 => ("YM2610B CSM", 20),
        0xDE => ("YM2610B extended", 10),
        0xE0 => ("QSound", 19),
        0xFD => ("Dummy System", 8),
        0xFE | 0xFF => ("reserved for development", 0),
        _ => return None,
    };
    Some(ChipDescriptor::new(name, channels))
}

/// Iterate every id the table defines, in ascending order, excluding `0x00`.
pub fn known_chips() -> impl Iterator<Item = (u8, ChipDescriptor)> {
    (0x01..=0xFFu8).filter_map(|id| find(id).map(|d| (id, d)))
}
