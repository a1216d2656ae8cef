//! Whole-module decoding.
//!
//! `FurModule` ties the three stages together: container normalization,
//! header validation and the song info walk at the header's offset, gated
//! on the header's version.
use std::io::Read;

use crate::binutil::FormatError;
use crate::fur::container;
use crate::fur::header::FurHeader;
use crate::fur::parser;
use crate::fur::song::FurSong;

/// A decoded module: its header and its song info block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FurModule {
    pub header: FurHeader,
    pub song: FurSong,
    /// Bytes consumed by the song walk, counted from `header.song_info_offset`.
    pub song_decoded_len: usize,
}

impl FurModule {
    /// Decode a module from raw or zlib-wrapped bytes.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, FormatError> {
        let bytes = container::normalize(raw)?;
        let header = parser::parse_fur_header(&bytes)?;
        let (song, song_decoded_len) =
            parser::parse_fur_song(&bytes, header.song_info_offset, header.version)?;
        Ok(FurModule {
            header,
            song,
            song_decoded_len,
        })
    }

    /// Read a whole byte source into memory and decode it.
    ///
    /// Read failures surface as `FormatError::IoFailure`.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, FormatError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        Self::from_bytes(&raw)
    }
}

/// Attempt to convert raw (or zlib-wrapped) module bytes into a `FurModule`.
impl TryFrom<&[u8]> for FurModule {
    type Error = FormatError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        FurModule::from_bytes(bytes)
    }
}
