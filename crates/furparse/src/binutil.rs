//! Utilities used by the decoders: the error type, little-endian byte
//! readers and the forward-only cursor used for the song block walk.

/// Error type returned by every decoding step in this crate.
///
/// All variants are terminal for the current decode attempt; nothing in
/// the crate retries or returns partial results.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The byte source could not be read.
    #[error("failed to read module source: {0}")]
    IoFailure(#[from] std::io::Error),

    /// The input was sniffed as a zlib stream but could not be inflated
    /// to completion (malformed data, truncated stream, or oversize output).
    #[error("decompression error: {0}")]
    DecompressionError(String),

    /// The buffer is shorter than the fixed module header.
    ///
    /// - `needed` is the minimum header length.
    /// - `available` is the buffer length.
    #[error("buffer too short for module header: {available} bytes (needed {needed})")]
    TooShort { needed: usize, available: usize },

    /// A fixed-width field extends past the end of the buffer.
    ///
    /// - `field` names the logical field being read (for example
    ///   `"song.tick_rate_hz"`).
    /// - `offset` is the absolute position the read started at.
    /// - `needed` is the width of the field in bytes.
    /// - `available` is the number of bytes remaining from `offset`.
    #[error(
        "truncated field {field} at 0x{offset:X} (needed {needed} bytes, available {available})"
    )]
    TruncatedField {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The first 16 bytes are not the module signature.
    ///
    /// The contained array is the raw 16 bytes that were read.
    #[error("signature mismatch: found {0:02X?}")]
    SignatureMismatch([u8; 16]),

    /// The module declares a version newer than this decoder handles.
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u16),

    /// The song info offset cannot hold the fixed part of a song block.
    #[error("song info offset out of range: 0x{offset:X} (needed {needed} bytes, available {available})")]
    OffsetOutOfRange {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A zero-terminated string ran into the end of the buffer.
    #[error("unterminated string {field} starting at 0x{offset:X}")]
    UnterminatedString { field: &'static str, offset: usize },
}

/// Return a borrowed slice of length `len` starting at `off` from `bytes`.
///
/// Returns `Err(FormatError::TruncatedField)` tagged with `field` when the
/// requested range exceeds the available buffer. The bounds check never
/// overflows, whatever `off` and `len` are.
pub fn read_slice<'a>(
    bytes: &'a [u8],
    off: usize,
    len: usize,
    field: &'static str,
) -> Result<&'a [u8], FormatError> {
    match off.checked_add(len) {
        Some(end) if end <= bytes.len() => Ok(&bytes[off..end]),
        _ => Err(FormatError::TruncatedField {
            field,
            offset: off,
            needed: len,
            available: bytes.len().saturating_sub(off),
        }),
    }
}

/// Read a fixed-size byte array from `bytes` at `off`.
pub fn read_array_at<const N: usize>(
    bytes: &[u8],
    off: usize,
    field: &'static str,
) -> Result<[u8; N], FormatError> {
    let mut tmp = [0u8; N];
    tmp.copy_from_slice(read_slice(bytes, off, N, field)?);
    Ok(tmp)
}

/// Read a 16-bit little-endian unsigned integer from `bytes` at `off`.
pub fn read_u16_le_at(bytes: &[u8], off: usize, field: &'static str) -> Result<u16, FormatError> {
    read_array_at(bytes, off, field).map(u16::from_le_bytes)
}

/// Read a 32-bit little-endian unsigned integer from `bytes` at `off`.
pub fn read_u32_le_at(bytes: &[u8], off: usize, field: &'static str) -> Result<u32, FormatError> {
    read_array_at(bytes, off, field).map(u32::from_le_bytes)
}

/// Scan a zero-terminated string starting at `off`.
///
/// Returns the bytes before the terminator (the terminator itself is not
/// included) together with the number of bytes consumed, which is the
/// string length plus one. Fails with `UnterminatedString` when no zero
/// byte exists between `off` and the end of `bytes`.
pub fn read_cstr_at<'a>(
    bytes: &'a [u8],
    off: usize,
    field: &'static str,
) -> Result<(&'a [u8], usize), FormatError> {
    let tail = bytes
        .get(off..)
        .ok_or(FormatError::UnterminatedString { field, offset: off })?;
    let len = tail
        .iter()
        .position(|&b| b == 0)
        .ok_or(FormatError::UnterminatedString { field, offset: off })?;
    Ok((&tail[..len], len + 1))
}

/// Forward-only reader over a fully materialized buffer.
///
/// Every read advances the position by exactly the width of the value
/// read. Reads that would run past the buffer fail without moving the
/// cursor.
#[derive(Debug, Clone)]
pub(crate) struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(bytes: &'a [u8], pos: usize) -> Self {
        ByteCursor { bytes, pos }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    pub(crate) fn slice(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], FormatError> {
        let s = read_slice(self.bytes, self.pos, len, field)?;
        self.pos += len;
        Ok(s)
    }

    pub(crate) fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], FormatError> {
        let v = read_array_at::<N>(self.bytes, self.pos, field)?;
        self.pos += N;
        Ok(v)
    }

    pub(crate) fn u8(&mut self, field: &'static str) -> Result<u8, FormatError> {
        Ok(self.array::<1>(field)?[0])
    }

    pub(crate) fn u16_le(&mut self, field: &'static str) -> Result<u16, FormatError> {
        self.array(field).map(u16::from_le_bytes)
    }

    pub(crate) fn u32_le(&mut self, field: &'static str) -> Result<u32, FormatError> {
        self.array(field).map(u32::from_le_bytes)
    }

    pub(crate) fn f32_le(&mut self, field: &'static str) -> Result<f32, FormatError> {
        self.array(field).map(f32::from_le_bytes)
    }

    /// Read `N` bytes reinterpreted as two's-complement signed values.
    pub(crate) fn i8_array<const N: usize>(&mut self, field: &'static str) -> Result<[i8; N], FormatError> {
        Ok(self.array::<N>(field)?.map(|b| b as i8))
    }

    /// Read `N` consecutive little-endian `u32` values.
    pub(crate) fn u32_le_array<const N: usize>(
        &mut self,
        field: &'static str,
    ) -> Result<[u32; N], FormatError> {
        let raw = self.slice(N * 4, field)?;
        let mut out = [0u32; N];
        for (dst, chunk) in out.iter_mut().zip(raw.chunks_exact(4)) {
            *dst = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(out)
    }

    /// Read `count` little-endian `u32` values into a `Vec`.
    ///
    /// The remaining length is checked before anything is allocated, so a
    /// corrupt count cannot trigger a large allocation.
    pub(crate) fn u32_le_vec(&mut self, count: usize, field: &'static str) -> Result<Vec<u32>, FormatError> {
        let len = count.checked_mul(4).ok_or(FormatError::TruncatedField {
            field,
            offset: self.pos,
            needed: usize::MAX,
            available: self.remaining(),
        })?;
        let raw = self.slice(len, field)?;
        Ok(raw
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    /// Read a zero-terminated string, decoded as UTF-8 (lossily).
    ///
    /// The cursor advances past the terminator; the result excludes it.
    pub(crate) fn cstr(&mut self, field: &'static str) -> Result<String, FormatError> {
        let (raw, consumed) = read_cstr_at(self.bytes, self.pos, field)?;
        self.pos += consumed;
        Ok(String::from_utf8_lossy(raw).into_owned())
    }
}
