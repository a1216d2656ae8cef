//! Song info block data model.
//!
//! `FurSong` holds every field the parser walks, in on-disk order. The
//! compatibility flags are opaque pass-through bytes: they are stored
//! exactly as read and never interpreted here.
use crate::chip::{self, ChipDescriptor};

/// Number of chip slots in a song info block.
pub const CHIP_SLOTS: usize = 32;

/// Virtual tempo reported for modules older than version 96.
pub const DEFAULT_VIRTUAL_TEMPO: u16 = 150;

/// Master volume reported for modules older than version 59.
pub const LEGACY_MASTER_VOLUME: f32 = 2.0;

/// Compatibility flags stored right after the A-4 tuning.
///
/// Each flag is one raw byte. Bytes whose flag postdates the module's
/// version are still present on disk and are stored as read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompatFlags {
    pub limit_slides: u8,
    pub linear_pitch: u8,
    pub loop_modality: u8,
    pub proper_noise_layout: u8,
    pub wave_duty_is_volume: u8,
    pub reset_macro_on_porta: u8,
    pub legacy_volume_slides: u8,
    pub compatible_arpeggio: u8,
    pub note_off_resets_slides: u8,
    pub target_resets_slides: u8,
    pub arpeggio_inhibits_portamento: u8,
    pub wack_algorithm_macro: u8,
    pub broken_shortcut_slides: u8,
    pub ignore_duplicate_slides: u8,
    pub stop_portamento_on_note_off: u8,
    pub continuous_vibrato: u8,
    pub broken_dac_mode: u8,
    pub one_tick_cut: u8,
    pub instrument_change_allowed_during_porta: u8,
    pub reset_note_base_on_arpeggio_stop: u8,
}

impl CompatFlags {
    /// On-disk size of the block.
    pub const SIZE: usize = 20;

    pub(crate) fn from_bytes(b: [u8; Self::SIZE]) -> Self {
        CompatFlags {
            limit_slides: b[0],
            linear_pitch: b[1],
            loop_modality: b[2],
            proper_noise_layout: b[3],
            wave_duty_is_volume: b[4],
            reset_macro_on_porta: b[5],
            legacy_volume_slides: b[6],
            compatible_arpeggio: b[7],
            note_off_resets_slides: b[8],
            target_resets_slides: b[9],
            arpeggio_inhibits_portamento: b[10],
            wack_algorithm_macro: b[11],
            broken_shortcut_slides: b[12],
            ignore_duplicate_slides: b[13],
            stop_portamento_on_note_off: b[14],
            continuous_vibrato: b[15],
            broken_dac_mode: b[16],
            one_tick_cut: b[17],
            instrument_change_allowed_during_porta: b[18],
            reset_note_base_on_arpeggio_stop: b[19],
        }
    }
}

/// Extended compatibility flags (version 70 and later).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtendedCompatFlags {
    pub broken_speed_selection: u8,
    pub no_slides_on_first_tick: u8,
    pub next_row_resets_arp_pos: u8,
    pub ignore_jump_at_end: u8,
    pub buggy_portamento_after_slide: u8,
    pub new_ins_affects_envelope: u8,
    pub ext_ch_state_is_shared: u8,
    pub ignore_dac_mode_change_outside_channel: u8,
    pub e1e2_priority_over_slide00: u8,
    pub new_sega_pcm: u8,
    pub fnum_block_pitch_slides: u8,
    pub sn_duty_macro_resets_phase: u8,
    pub pitch_macro_is_linear: u8,
    pub pitch_slide_speed_linear: u8,
    pub old_octave_boundary: u8,
    pub disable_opn2_dac_volume_control: u8,
    pub new_volume_scaling: u8,
    pub volume_macro_applies_after_end: u8,
    pub broken_out_vol: u8,
    pub e1e2_stop_on_same_note: u8,
    pub broken_porta_after_arp: u8,
    pub sn_periods_under_8_as_1: u8,
    pub cut_delay_policy: u8,
    pub jump_effect_treatment: u8,
    pub auto_system_name: u8,
    pub disable_sample_macro: u8,
    pub broken_out_vol_2: u8,
    pub old_arp_strategy: u8,
}

impl ExtendedCompatFlags {
    /// On-disk size of the block.
    pub const SIZE: usize = 28;

    /// First format version that carries the block.
    pub const MIN_VERSION: u16 = 70;

    pub(crate) fn from_bytes(b: [u8; Self::SIZE]) -> Self {
        ExtendedCompatFlags {
            broken_speed_selection: b[0],
            no_slides_on_first_tick: b[1],
            next_row_resets_arp_pos: b[2],
            ignore_jump_at_end: b[3],
            buggy_portamento_after_slide: b[4],
            new_ins_affects_envelope: b[5],
            ext_ch_state_is_shared: b[6],
            ignore_dac_mode_change_outside_channel: b[7],
            e1e2_priority_over_slide00: b[8],
            new_sega_pcm: b[9],
            fnum_block_pitch_slides: b[10],
            sn_duty_macro_resets_phase: b[11],
            pitch_macro_is_linear: b[12],
            pitch_slide_speed_linear: b[13],
            old_octave_boundary: b[14],
            disable_opn2_dac_volume_control: b[15],
            new_volume_scaling: b[16],
            volume_macro_applies_after_end: b[17],
            broken_out_vol: b[18],
            e1e2_stop_on_same_note: b[19],
            broken_porta_after_arp: b[20],
            sn_periods_under_8_as_1: b[21],
            cut_delay_policy: b[22],
            jump_effect_treatment: b[23],
            auto_system_name: b[24],
            disable_sample_macro: b[25],
            broken_out_vol_2: b[26],
            old_arp_strategy: b[27],
        }
    }
}

/// Pattern ids played by one channel, one per order row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Order {
    pub pattern_ids: Vec<u8>,
}

/// A non-empty chip slot together with its per-slot settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipSlot {
    /// Position in the 32-entry chip list.
    pub slot: usize,
    pub chip_id: u8,
    pub descriptor: ChipDescriptor,
    /// 64 is unity gain, 127 roughly 2.0x.
    pub volume: i8,
    /// -128 is full left, 127 full right.
    pub panning: i8,
    /// Chip-specific parameter word; not interpreted.
    pub params: u32,
}

/// Decoded song info block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FurSong {
    pub block_id: [u8; 4],
    /// Block length as declared in-stream. Not checked against the walk.
    pub block_size: u32,

    pub time_base: u8,
    pub speed: [u8; 2],
    pub initial_arpeggio_time: u8,
    pub tick_rate_hz: f32,

    pub pattern_length: u16,
    pub orders_length: u16,
    pub highlight: [u8; 2],

    pub instrument_count: u16,
    pub wavetable_count: u16,
    pub sample_count: u16,
    pub pattern_count: u32,

    /// Chip id per slot; `0x00` marks an unused slot. Slots may be sparse.
    pub chips: [u8; CHIP_SLOTS],
    /// Number of non-zero entries in `chips`, wherever they sit.
    pub active_chip_count: usize,
    pub chip_volumes: [i8; CHIP_SLOTS],
    pub chip_panning: [i8; CHIP_SLOTS],
    pub chip_params: [u32; CHIP_SLOTS],

    pub song_name: String,
    pub song_author: String,

    pub a4_tuning: f32,
    pub compat: CompatFlags,

    /// Absolute offsets of instrument blocks, one per instrument.
    pub instrument_offsets: Vec<u32>,
    /// Absolute offsets of wavetable blocks, one per wavetable.
    pub wavetable_offsets: Vec<u32>,
    /// Absolute offsets of sample blocks, one per sample.
    pub sample_offsets: Vec<u32>,
    /// Absolute offsets of pattern blocks, one per pattern.
    pub pattern_offsets: Vec<u32>,

    /// One order list per channel.
    pub orders: Vec<Order>,
    /// Effect column count per channel.
    pub effects_columns: Vec<u8>,
    pub channel_show: Vec<u8>,
    pub channel_collapse: Vec<u8>,
    pub channel_names: Vec<String>,
    pub channel_short_names: Vec<String>,
    pub song_comment: String,

    pub master_volume: f32,
    pub extended_compat: Option<ExtendedCompatFlags>,
    pub virtual_tempo_numerator: u16,
    pub virtual_tempo_denominator: u16,
}

impl FurSong {
    /// Block id as text, for display.
    pub fn block_id_str(&self) -> String {
        String::from_utf8_lossy(&self.block_id).into_owned()
    }

    /// Non-empty chip slots in slot order, with their table descriptors.
    pub fn chip_slots(&self) -> impl Iterator<Item = ChipSlot> + '_ {
        self.chips
            .iter()
            .enumerate()
            .filter(|&(_, &id)| id != 0)
            .map(|(slot, &chip_id)| ChipSlot {
                slot,
                chip_id,
                descriptor: chip::lookup(chip_id),
                volume: self.chip_volumes[slot],
                panning: self.chip_panning[slot],
                params: self.chip_params[slot],
            })
    }

    /// Total channel count across all active chips.
    pub fn channel_count(&self) -> usize {
        channel_count(&self.chips)
    }

    /// Offset of the first instrument block, if any.
    pub fn instrument_offset(&self) -> Option<u32> {
        self.instrument_offsets.first().copied()
    }

    /// Offset of the first wavetable block, if any.
    pub fn wavetable_offset(&self) -> Option<u32> {
        self.wavetable_offsets.first().copied()
    }

    /// Offset of the first sample block, if any.
    pub fn sample_offset(&self) -> Option<u32> {
        self.sample_offsets.first().copied()
    }

    /// Offset of the first pattern block, if any.
    pub fn pattern_offset(&self) -> Option<u32> {
        self.pattern_offsets.first().copied()
    }
}

/// Count non-zero chip ids. Every slot is inspected; a zero does not end the list.
pub fn count_active_chips(chips: &[u8; CHIP_SLOTS]) -> usize {
    chips.iter().filter(|&&id| id != 0).count()
}

/// Sum of channel counts for every non-zero chip id. Unknown ids add nothing.
pub fn channel_count(chips: &[u8; CHIP_SLOTS]) -> usize {
    chips
        .iter()
        .filter(|&&id| id != 0)
        .map(|&id| chip::lookup(id).channel_count as usize)
        .sum()
}
