//! Furnace module decoding.
//!
//! This module exposes the header and song info types, the container
//! normalizer and the parser entry points. Decoding runs in three strictly
//! sequential stages over one in-memory buffer:
//!
//! 1. [`container::normalize`] inflates zlib-wrapped input.
//! 2. [`decode_header`] validates the signature and version.
//! 3. [`decode_song`] walks the song info block at the header's offset.
//!
//! [`FurModule`] runs all three.
pub mod container;
mod document;
mod header;
pub mod parser;
mod song;

pub use document::FurModule;
pub use header::{
    FUR_HEADER_SIZE, FUR_MAX_SUPPORTED_VERSION, FUR_SIGNATURE, FurHeader, FurHeaderField,
};
pub use parser::{decode_header, decode_song, decode_song_with_version};
pub use song::{
    CHIP_SLOTS, ChipSlot, CompatFlags, DEFAULT_VIRTUAL_TEMPO, ExtendedCompatFlags, FurSong,
    LEGACY_MASTER_VOLUME, Order, channel_count, count_active_chips,
};
