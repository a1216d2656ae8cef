//! Byte-layout builder for test modules.
//!
//! Writes a header followed by a song info block, field by field, in the
//! same order the decoder reads them. Version-gated regions are emitted
//! only when `version` carries them.
#![allow(dead_code)]

use furparse::fur::{CHIP_SLOTS, channel_count};

pub const SIGNATURE: &[u8; 16] = b"-Furnace module-";
pub const HEADER_SIZE: usize = 32;

#[derive(Debug, Clone)]
pub struct SongSpec {
    pub version: u16,
    pub block_id: [u8; 4],
    pub time_base: u8,
    pub speed: [u8; 2],
    pub initial_arpeggio_time: u8,
    pub tick_rate_hz: f32,
    pub pattern_length: u16,
    pub orders_length: u16,
    pub highlight: [u8; 2],
    pub chips: [u8; CHIP_SLOTS],
    pub chip_volumes: [i8; CHIP_SLOTS],
    pub chip_panning: [i8; CHIP_SLOTS],
    pub chip_params: [u32; CHIP_SLOTS],
    pub song_name: Vec<u8>,
    pub song_author: Vec<u8>,
    pub a4_tuning: f32,
    pub compat: [u8; 20],
    pub instrument_offsets: Vec<u32>,
    pub wavetable_offsets: Vec<u32>,
    pub sample_offsets: Vec<u32>,
    pub pattern_offsets: Vec<u32>,
    pub comment: Vec<u8>,
    pub master_volume: f32,
    pub extended_compat: [u8; 28],
    pub virtual_tempo: (u16, u16),
    /// Bytes appended after the last decoded field (subsong data etc.).
    pub trailing: Vec<u8>,
}

impl Default for SongSpec {
    fn default() -> Self {
        let mut chips = [0u8; CHIP_SLOTS];
        chips[0] = 0x02;
        chips[1] = 0x83;
        let mut compat = [0u8; 20];
        for (i, b) in compat.iter_mut().enumerate() {
            *b = (i % 3) as u8;
        }
        let mut extended_compat = [0u8; 28];
        for (i, b) in extended_compat.iter_mut().enumerate() {
            *b = (i % 2) as u8;
        }
        SongSpec {
            version: 103,
            block_id: *b"INFO",
            time_base: 0,
            speed: [6, 3],
            initial_arpeggio_time: 1,
            tick_rate_hz: 60.0,
            pattern_length: 64,
            orders_length: 2,
            highlight: [4, 16],
            chips,
            chip_volumes: [64; CHIP_SLOTS],
            chip_panning: [0; CHIP_SLOTS],
            chip_params: [0; CHIP_SLOTS],
            song_name: b"Test Song".to_vec(),
            song_author: b"Tester".to_vec(),
            a4_tuning: 440.0,
            compat,
            instrument_offsets: vec![0x1000],
            wavetable_offsets: vec![],
            sample_offsets: vec![],
            pattern_offsets: vec![0x2000, 0x2100],
            comment: b"comment".to_vec(),
            master_volume: 1.0,
            extended_compat,
            virtual_tempo: (120, 100),
            trailing: vec![],
        }
    }
}

impl SongSpec {
    pub fn channels(&self) -> usize {
        channel_count(&self.chips)
    }

    /// Song block bytes through `song_author`'s terminator.
    pub fn prefix_through_strings(&self) -> Vec<u8> {
        let mut b = Vec::new();
        b.extend_from_slice(&self.block_id);
        b.extend_from_slice(&0u32.to_le_bytes());
        b.push(self.time_base);
        b.extend_from_slice(&self.speed);
        b.push(self.initial_arpeggio_time);
        b.extend_from_slice(&self.tick_rate_hz.to_le_bytes());
        b.extend_from_slice(&self.pattern_length.to_le_bytes());
        b.extend_from_slice(&self.orders_length.to_le_bytes());
        b.extend_from_slice(&self.highlight);
        b.extend_from_slice(&(self.instrument_offsets.len() as u16).to_le_bytes());
        b.extend_from_slice(&(self.wavetable_offsets.len() as u16).to_le_bytes());
        b.extend_from_slice(&(self.sample_offsets.len() as u16).to_le_bytes());
        b.extend_from_slice(&(self.pattern_offsets.len() as u32).to_le_bytes());
        b.extend_from_slice(&self.chips);
        b.extend(self.chip_volumes.iter().map(|&v| v as u8));
        b.extend(self.chip_panning.iter().map(|&v| v as u8));
        for p in &self.chip_params {
            b.extend_from_slice(&p.to_le_bytes());
        }
        b.extend_from_slice(&self.song_name);
        b.push(0);
        b.extend_from_slice(&self.song_author);
        b.push(0);
        b
    }

    /// Complete song info block, `block_size` filled in.
    pub fn song_block(&self) -> Vec<u8> {
        let channels = self.channels();
        let mut b = self.prefix_through_strings();
        b.extend_from_slice(&self.a4_tuning.to_le_bytes());
        b.extend_from_slice(&self.compat);
        for table in [
            &self.instrument_offsets,
            &self.wavetable_offsets,
            &self.sample_offsets,
            &self.pattern_offsets,
        ] {
            for off in table {
                b.extend_from_slice(&off.to_le_bytes());
            }
        }
        for ch in 0..channels {
            for row in 0..self.orders_length {
                b.push((ch as u8).wrapping_mul(16).wrapping_add(row as u8));
            }
        }
        b.extend(std::iter::repeat_n(1u8, channels));
        if self.version >= 39 {
            b.extend(std::iter::repeat_n(1u8, channels));
            b.extend(std::iter::repeat_n(0u8, channels));
            for ch in 0..channels {
                b.extend_from_slice(format!("Channel {}", ch + 1).as_bytes());
                b.push(0);
            }
            for ch in 0..channels {
                b.extend_from_slice(format!("C{}", ch + 1).as_bytes());
                b.push(0);
            }
            b.extend_from_slice(&self.comment);
            b.push(0);
        }
        if self.version >= 59 {
            b.extend_from_slice(&self.master_volume.to_le_bytes());
        }
        if self.version >= 70 {
            b.extend_from_slice(&self.extended_compat);
        }
        if self.version >= 96 {
            b.extend_from_slice(&self.virtual_tempo.0.to_le_bytes());
            b.extend_from_slice(&self.virtual_tempo.1.to_le_bytes());
        }
        b.extend_from_slice(&self.trailing);
        let block_size = (b.len() - 8) as u32;
        b[4..8].copy_from_slice(&block_size.to_le_bytes());
        b
    }
}

/// A 32-byte module header.
pub fn header_bytes(version: u16, song_info_offset: u32) -> Vec<u8> {
    let mut b = Vec::with_capacity(HEADER_SIZE);
    b.extend_from_slice(SIGNATURE);
    b.extend_from_slice(&version.to_le_bytes());
    b.extend_from_slice(&[0, 0]);
    b.extend_from_slice(&song_info_offset.to_le_bytes());
    b.extend_from_slice(&[0; 8]);
    b
}

/// A complete module: header, then the song block right after it.
pub fn module_bytes(spec: &SongSpec) -> Vec<u8> {
    let mut b = header_bytes(spec.version, HEADER_SIZE as u32);
    b.extend_from_slice(&spec.song_block());
    b
}

/// zlib-compress `data` at the default level.
pub fn zlib(data: &[u8]) -> Vec<u8> {
    use flate2::Compression;
    use flate2::write::ZlibEncoder;
    use std::io::Write;

    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).expect("zlib write");
    enc.finish().expect("zlib finish")
}
