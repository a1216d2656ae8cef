//! Furnace module header
//!
//! The header occupies the first 32 bytes of the (decompressed) module:
//!
//! | Offset | Width | Field                              |
//! |--------|-------|------------------------------------|
//! | 0x00   | 16    | signature `-Furnace module-`       |
//! | 0x10   | 2     | format version (u16 LE)            |
//! | 0x12   | 2     | reserved                           |
//! | 0x14   | 4     | song info block offset (u32 LE)    |
//! | 0x18   | 8     | reserved                           |
//!
//! `FurHeader` copies the fields out of the caller's buffer; it does not
//! borrow from it.
use std::borrow::Cow;

/// The 16-byte signature at offset 0. Not zero-terminated in the stream.
pub const FUR_SIGNATURE: &[u8; 16] = b"-Furnace module-";

/// Size of the fixed module header. Shorter buffers are rejected outright.
pub const FUR_HEADER_SIZE: usize = 0x20;

/// Highest format version this decoder understands.
pub const FUR_MAX_SUPPORTED_VERSION: u16 = 103;

/// Enum identifying header fields and their on-disk offsets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FurHeaderField {
    Signature,
    Version,
    Reserved12,
    SongInfoOffset,
    Reserved18,
}

impl FurHeaderField {
    pub const ALL: [FurHeaderField; 5] = [
        FurHeaderField::Signature,
        FurHeaderField::Version,
        FurHeaderField::Reserved12,
        FurHeaderField::SongInfoOffset,
        FurHeaderField::Reserved18,
    ];

    pub fn offset(self) -> usize {
        match self {
            FurHeaderField::Signature => 0x00,
            FurHeaderField::Version => 0x10,
            FurHeaderField::Reserved12 => 0x12,
            FurHeaderField::SongInfoOffset => 0x14,
            FurHeaderField::Reserved18 => 0x18,
        }
    }

    pub fn len(self) -> usize {
        match self {
            FurHeaderField::Signature => 16,
            FurHeaderField::Version => 2,
            FurHeaderField::Reserved12 => 2,
            FurHeaderField::SongInfoOffset => 4,
            FurHeaderField::Reserved18 => 8,
        }
    }

    /// Return true if this field occupies zero bytes (none in current format).
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Field name used in error reports.
    pub fn name(self) -> &'static str {
        match self {
            FurHeaderField::Signature => "header.signature",
            FurHeaderField::Version => "header.version",
            FurHeaderField::Reserved12 => "header.reserved_12",
            FurHeaderField::SongInfoOffset => "header.song_info_offset",
            FurHeaderField::Reserved18 => "header.reserved_18",
        }
    }
}

/// Decoded module header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FurHeader {
    pub signature: [u8; 16],
    pub version: u16,
    /// Absolute offset of the song info block within the decompressed buffer.
    pub song_info_offset: u32,
}

impl Default for FurHeader {
    fn default() -> Self {
        FurHeader {
            signature: *FUR_SIGNATURE,
            version: FUR_MAX_SUPPORTED_VERSION,
            song_info_offset: FUR_HEADER_SIZE as u32,
        }
    }
}

impl FurHeader {
    /// The signature as text, for display.
    pub fn signature_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.signature)
    }
}

/// Attempt to convert a raw module byte slice into a `FurHeader`.
///
/// The slice must already be decompressed; see
/// [`crate::fur::container::normalize`].
impl TryFrom<&[u8]> for FurHeader {
    type Error = crate::binutil::FormatError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        crate::fur::parser::parse_fur_header(bytes)
    }
}
