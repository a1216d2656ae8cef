//! Furnace module parser
//!
//! This module walks the decompressed module bytes into the crate's data
//! structures.
//!
//! Public entry points:
//! - `decode_header(bytes)`: validate the signature and version and read
//!   the song info offset.
//! - `decode_song(bytes, offset)`: walk the song info block at `offset`
//!   using the newest supported version's layout.
//! - `decode_song_with_version(bytes, offset, version)`: the same walk,
//!   gated on the version taken from the header.
//! - `parse_fur_song(bytes, offset, version)`: the walk itself; also
//!   returns how many bytes it consumed.
//!
//! The song walk is strictly forward: one field at a time, in on-disk
//! order, starting at the header-supplied offset. Its length depends on
//! the two string fields and on the chip list, so the declared block size
//! is never used to presize or bound reads.
//!
//! Notes:
//! - All multi-byte values are little-endian.
//! - The walk stops before subsong data; nothing after the virtual tempo
//!   pair is read.
use tracing::{debug, trace, warn};

use crate::binutil::{ByteCursor, FormatError, read_array_at, read_u16_le_at, read_u32_le_at};
use crate::fur::header::{
    FUR_HEADER_SIZE, FUR_MAX_SUPPORTED_VERSION, FUR_SIGNATURE, FurHeader, FurHeaderField,
};
use crate::fur::song::{
    CHIP_SLOTS, CompatFlags, DEFAULT_VIRTUAL_TEMPO, ExtendedCompatFlags, FurSong,
    LEGACY_MASTER_VOLUME, Order, channel_count, count_active_chips,
};

/// Size of the song block's fixed prefix: everything before the song name.
///
/// A song info offset must leave at least this many bytes in the buffer.
pub const SONG_FIXED_PREFIX_SIZE: usize = 0x100;

/// Expected block id of the song info block.
pub const SONG_BLOCK_ID: &[u8; 4] = b"INFO";

/// First version storing channel show/collapse flags, channel names and the song comment.
pub const CHANNEL_INFO_MIN_VERSION: u16 = 39;

/// First version storing the master volume.
pub const MASTER_VOLUME_MIN_VERSION: u16 = 59;

/// First version storing the virtual tempo pair.
pub const VIRTUAL_TEMPO_MIN_VERSION: u16 = 96;

/// Parse the module header located at the start of `bytes`.
///
/// Checks run in order: buffer length, signature, version. On success the
/// song info offset is returned as stored; it is validated later by the
/// song walk.
pub fn parse_fur_header(bytes: &[u8]) -> Result<FurHeader, FormatError> {
    if bytes.len() < FUR_HEADER_SIZE {
        return Err(FormatError::TooShort {
            needed: FUR_HEADER_SIZE,
            available: bytes.len(),
        });
    }

    let sig = FurHeaderField::Signature;
    let signature: [u8; 16] = read_array_at(bytes, sig.offset(), sig.name())?;
    if &signature != FUR_SIGNATURE {
        return Err(FormatError::SignatureMismatch(signature));
    }

    let ver = FurHeaderField::Version;
    let version = read_u16_le_at(bytes, ver.offset(), ver.name())?;
    let song = FurHeaderField::SongInfoOffset;
    let song_info_offset = read_u32_le_at(bytes, song.offset(), song.name())?;

    debug!(version, song_info_offset, "decoded module header");

    if version > FUR_MAX_SUPPORTED_VERSION {
        return Err(FormatError::UnsupportedVersion(version));
    }

    Ok(FurHeader {
        signature,
        version,
        song_info_offset,
    })
}

/// Decode the module header. See [`parse_fur_header`].
pub fn decode_header(bytes: &[u8]) -> Result<FurHeader, FormatError> {
    parse_fur_header(bytes)
}

/// Decode the song info block at `offset`, assuming the newest supported layout.
pub fn decode_song(bytes: &[u8], offset: u32) -> Result<FurSong, FormatError> {
    decode_song_with_version(bytes, offset, FUR_MAX_SUPPORTED_VERSION)
}

/// Decode the song info block at `offset` using the layout of `version`.
pub fn decode_song_with_version(
    bytes: &[u8],
    offset: u32,
    version: u16,
) -> Result<FurSong, FormatError> {
    parse_fur_song(bytes, offset, version).map(|(song, _)| song)
}

/// Walk the song info block at `offset`.
///
/// On success returns `(FurSong, consumed)`, where `consumed` is the number
/// of bytes read from `offset` onwards. Fails with:
/// - `OffsetOutOfRange` when `offset` leaves fewer than
///   [`SONG_FIXED_PREFIX_SIZE`] bytes in the buffer,
/// - `TruncatedField` when any later field runs past the buffer,
/// - `UnterminatedString` when a string has no terminator before the end.
pub fn parse_fur_song(
    bytes: &[u8],
    offset: u32,
    version: u16,
) -> Result<(FurSong, usize), FormatError> {
    let start = offset as usize;
    match start.checked_add(SONG_FIXED_PREFIX_SIZE) {
        Some(end) if end <= bytes.len() => {}
        _ => {
            return Err(FormatError::OffsetOutOfRange {
                offset: start,
                needed: SONG_FIXED_PREFIX_SIZE,
                available: bytes.len().saturating_sub(start),
            });
        }
    }

    let mut cur = ByteCursor::new(bytes, start);

    let block_id = cur.array::<4>("song.block_id")?;
    if &block_id != SONG_BLOCK_ID {
        warn!(
            block_id = %String::from_utf8_lossy(&block_id),
            offset = start,
            "unexpected song block id"
        );
    }
    let block_size = cur.u32_le("song.block_size")?;

    let time_base = cur.u8("song.time_base")?;
    let speed = cur.array::<2>("song.speed")?;
    let initial_arpeggio_time = cur.u8("song.initial_arpeggio_time")?;
    let tick_rate_hz = cur.f32_le("song.tick_rate_hz")?;

    let pattern_length = cur.u16_le("song.pattern_length")?;
    let orders_length = cur.u16_le("song.orders_length")?;
    let highlight = cur.array::<2>("song.highlight")?;

    let instrument_count = cur.u16_le("song.instrument_count")?;
    let wavetable_count = cur.u16_le("song.wavetable_count")?;
    let sample_count = cur.u16_le("song.sample_count")?;
    let pattern_count = cur.u32_le("song.pattern_count")?;

    let chips = cur.array::<CHIP_SLOTS>("song.chips")?;
    let active_chip_count = count_active_chips(&chips);
    let chip_volumes = cur.i8_array::<CHIP_SLOTS>("song.chip_volumes")?;
    let chip_panning = cur.i8_array::<CHIP_SLOTS>("song.chip_panning")?;
    let chip_params = cur.u32_le_array::<CHIP_SLOTS>("song.chip_params")?;
    trace!(pos = cur.position(), active_chip_count, "read fixed song prefix");

    let song_name = cur.cstr("song.song_name")?;
    let song_author = cur.cstr("song.song_author")?;

    let a4_tuning = cur.f32_le("song.a4_tuning")?;
    let compat = CompatFlags::from_bytes(cur.array::<{ CompatFlags::SIZE }>("song.compat_flags")?);

    let instrument_offsets = cur.u32_le_vec(instrument_count as usize, "song.instrument_offsets")?;
    let wavetable_offsets = cur.u32_le_vec(wavetable_count as usize, "song.wavetable_offsets")?;
    let sample_offsets = cur.u32_le_vec(sample_count as usize, "song.sample_offsets")?;
    let pattern_offsets = cur.u32_le_vec(pattern_count as usize, "song.pattern_offsets")?;
    trace!(pos = cur.position(), "read forward offset tables");

    let channels = channel_count(&chips);
    let orders = read_orders(&mut cur, channels, orders_length as usize)?;
    let effects_columns = cur.slice(channels, "song.effects_columns")?.to_vec();

    let (channel_show, channel_collapse, channel_names, channel_short_names, song_comment) =
        if version >= CHANNEL_INFO_MIN_VERSION {
            let show = cur.slice(channels, "song.channel_show")?.to_vec();
            let collapse = cur.slice(channels, "song.channel_collapse")?.to_vec();
            let names = read_strings(&mut cur, channels, "song.channel_names")?;
            let short_names = read_strings(&mut cur, channels, "song.channel_short_names")?;
            let comment = cur.cstr("song.song_comment")?;
            (show, collapse, names, short_names, comment)
        } else {
            Default::default()
        };

    let master_volume = if version >= MASTER_VOLUME_MIN_VERSION {
        cur.f32_le("song.master_volume")?
    } else {
        LEGACY_MASTER_VOLUME
    };

    let extended_compat = if version >= ExtendedCompatFlags::MIN_VERSION {
        Some(ExtendedCompatFlags::from_bytes(
            cur.array::<{ ExtendedCompatFlags::SIZE }>("song.extended_compat_flags")?,
        ))
    } else {
        None
    };

    let (virtual_tempo_numerator, virtual_tempo_denominator) =
        if version >= VIRTUAL_TEMPO_MIN_VERSION {
            (
                cur.u16_le("song.virtual_tempo_numerator")?,
                cur.u16_le("song.virtual_tempo_denominator")?,
            )
        } else {
            (DEFAULT_VIRTUAL_TEMPO, DEFAULT_VIRTUAL_TEMPO)
        };

    let consumed = cur.position() - start;
    debug!(
        offset = start,
        consumed,
        block_size,
        active_chip_count,
        channels,
        "decoded song info block"
    );

    let song = FurSong {
        block_id,
        block_size,
        time_base,
        speed,
        initial_arpeggio_time,
        tick_rate_hz,
        pattern_length,
        orders_length,
        highlight,
        instrument_count,
        wavetable_count,
        sample_count,
        pattern_count,
        chips,
        active_chip_count,
        chip_volumes,
        chip_panning,
        chip_params,
        song_name,
        song_author,
        a4_tuning,
        compat,
        instrument_offsets,
        wavetable_offsets,
        sample_offsets,
        pattern_offsets,
        orders,
        effects_columns,
        channel_show,
        channel_collapse,
        channel_names,
        channel_short_names,
        song_comment,
        master_volume,
        extended_compat,
        virtual_tempo_numerator,
        virtual_tempo_denominator,
    };

    Ok((song, consumed))
}

/// Read the order table: `orders_length` pattern ids per channel, channel-major.
fn read_orders(
    cur: &mut ByteCursor<'_>,
    channels: usize,
    orders_length: usize,
) -> Result<Vec<Order>, FormatError> {
    let field = "song.orders";
    let len = channels
        .checked_mul(orders_length)
        .ok_or(FormatError::TruncatedField {
            field,
            offset: cur.position(),
            needed: usize::MAX,
            available: cur.remaining(),
        })?;
    let raw = cur.slice(len, field)?;
    if orders_length == 0 {
        return Ok(vec![Order::default(); channels]);
    }
    Ok(raw
        .chunks_exact(orders_length)
        .map(|ids| Order {
            pattern_ids: ids.to_vec(),
        })
        .collect())
}

fn read_strings(
    cur: &mut ByteCursor<'_>,
    count: usize,
    field: &'static str,
) -> Result<Vec<String>, FormatError> {
    (0..count).map(|_| cur.cstr(field)).collect()
}
