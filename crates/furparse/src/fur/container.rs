//! Container normalization: transparent zlib unwrapping.
//!
//! Modules are stored either raw or wrapped in a zlib stream. The wrapper
//! is recognised from its first two bytes only: `0x78` followed by one of
//! the check bytes zlib writes for its common compression levels. Anything
//! else passes through untouched, including a lone leading `0x78`.
//!
//! Compressed input is inflated completely, in memory, before any
//! structural parsing; a stream that ends before its end-of-stream marker
//! is an error rather than a short buffer.
use std::borrow::Cow;

use flate2::{Decompress, FlushDecompress, Status};
use tracing::debug;

use crate::binutil::FormatError;

/// First byte of a zlib stream using a 32 KiB deflate window.
pub const ZLIB_MAGIC: u8 = 0x78;

/// Second bytes accepted after [`ZLIB_MAGIC`] (fastest, default and best levels).
pub const ZLIB_CHECK_BYTES: [u8; 3] = [0x01, 0x9C, 0xDA];

/// Ceiling on inflated output. Modules are far smaller; anything larger is
/// treated as corrupt.
pub const MAX_INFLATED_SIZE: usize = 256 * 1024 * 1024;

const INFLATE_CHUNK: usize = 0x4000;

/// Return true if `bytes` starts with a zlib header this decoder recognises.
pub fn is_zlib_compressed(bytes: &[u8]) -> bool {
    matches!(bytes, [ZLIB_MAGIC, check, ..] if ZLIB_CHECK_BYTES.contains(check))
}

/// Return the module bytes, inflating them first if they are zlib-wrapped.
///
/// Raw input is returned borrowed; compressed input yields an owned
/// buffer holding the whole inflated stream.
pub fn normalize(raw: &[u8]) -> Result<Cow<'_, [u8]>, FormatError> {
    if !is_zlib_compressed(raw) {
        return Ok(Cow::Borrowed(raw));
    }
    let inflated = inflate(raw)?;
    debug!(
        compressed = raw.len(),
        inflated = inflated.len(),
        "inflated zlib container"
    );
    Ok(Cow::Owned(inflated))
}

/// Inflate a complete zlib stream.
fn inflate(data: &[u8]) -> Result<Vec<u8>, FormatError> {
    let mut decoder = Decompress::new(true);
    let mut out: Vec<u8> =
        Vec::with_capacity(data.len().saturating_mul(4).clamp(INFLATE_CHUNK, MAX_INFLATED_SIZE));

    loop {
        if out.capacity() - out.len() < INFLATE_CHUNK {
            out.reserve(INFLATE_CHUNK);
        }
        let in_before = decoder.total_in();
        let out_before = decoder.total_out();
        let consumed = in_before as usize;

        let status = decoder
            .decompress_vec(&data[consumed..], &mut out, FlushDecompress::None)
            .map_err(|e| FormatError::DecompressionError(e.to_string()))?;

        if status == Status::StreamEnd {
            return Ok(out);
        }
        if out.len() > MAX_INFLATED_SIZE {
            return Err(FormatError::DecompressionError(format!(
                "inflated size exceeds {} bytes",
                MAX_INFLATED_SIZE
            )));
        }
        if decoder.total_in() == in_before && decoder.total_out() == out_before {
            return Err(FormatError::DecompressionError(format!(
                "zlib stream truncated after {} of {} input bytes",
                consumed,
                data.len()
            )));
        }
    }
}
