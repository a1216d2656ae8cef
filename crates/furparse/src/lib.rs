#![doc = include_str!("../README.md")]
//! furparse: decoder for Furnace chiptune tracker modules
//!
//! `furparse` reads the header and song info block of a `.fur` module into
//! plain Rust structures. It is read-only: there is no encoder, and no
//! part of the crate interprets what the decoded values mean for playback.
//!
//! Key features:
//! - Transparent zlib unwrapping: compressed and raw modules decode
//!   identically.
//! - Strict validation with one error enum, `FormatError`; no partial
//!   results and no panics on malformed input.
//! - A total chip metadata table: every one-byte chip id resolves to a
//!   name and channel count, with a "reserved" fallback.
//! - Decoding is separate from reporting. The crate only emits `tracing`
//!   events; rendering is left to the caller.
//!
//! Example: decoding a module from disk
//!
//! ```no_run
//! use furparse::FurModule;
//!
//! let file = std::fs::File::open("song.fur").expect("open");
//! let module = FurModule::from_reader(file).expect("decode");
//!
//! println!("version {}", module.header.version);
//! println!("{} by {}", module.song.song_name, module.song.song_author);
//! for slot in module.song.chip_slots() {
//!     println!(
//!         "{:02}: ${:02X} {} ({} channels)",
//!         slot.slot, slot.chip_id, slot.descriptor.name, slot.descriptor.channel_count
//!     );
//! }
//! ```
//!
//! Example: running the stages by hand
//!
//! ```no_run
//! use furparse::fur::{container, decode_header, decode_song_with_version};
//!
//! let raw: Vec<u8> = std::fs::read("song.fur").expect("read");
//! let bytes = container::normalize(&raw).expect("inflate");
//! let header = decode_header(&bytes).expect("header");
//! let song = decode_song_with_version(&bytes, header.song_info_offset, header.version)
//!     .expect("song");
//! assert_eq!(song.active_chip_count, song.chip_slots().count());
//! ```
mod binutil;
pub mod chip;
pub mod fur;

pub use binutil::FormatError;
pub use chip::{ChipDescriptor, lookup};
pub use fur::{FurHeader, FurModule, FurSong, decode_header, decode_song};
