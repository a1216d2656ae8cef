use std::fs::File;
use std::io::{Read, stdin};
use std::path::Path;

use anyhow::Context;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::NOTHING};
use furparse::FurModule;
use furparse::chip::known_chips;
use furparse::fur::FurSong;
use unicode_width::UnicodeWidthStr;

/// Pad a &str to a target display width (columns) using unicode-width to
/// account for fullwidth characters (e.g. Japanese song titles). This pads
/// with spaces on the right so strings appear left-aligned in terminal output.
fn pad_to_width(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Read module bytes from a path or stdin ('-') into a Vec<u8>.
///
/// The bytes are returned as read; zlib unwrapping happens in the decoder.
pub fn read_fur_as_vec(path: &Path) -> anyhow::Result<Vec<u8>> {
    let mut out = Vec::new();
    if path == Path::new("-") {
        stdin()
            .read_to_end(&mut out)
            .context("failed to read from stdin")?;
    } else {
        let mut f = File::open(path)
            .with_context(|| format!("failed to open input file: {}", path.display()))?;
        f.read_to_end(&mut out)
            .with_context(|| format!("failed to read input file: {}", path.display()))?;
    }
    tracing::debug!(path = %path.display(), len = out.len(), "read module source");
    Ok(out)
}

/// Decode `data`, printing the file name and error to stderr on failure.
fn decode_or_report(path: &Path, data: &[u8]) -> Option<FurModule> {
    match FurModule::from_bytes(data) {
        Ok(m) => Some(m),
        Err(e) => {
            let file_str = match path.canonicalize() {
                Ok(p) => p.to_string_lossy().into_owned(),
                Err(_) => path.to_string_lossy().into_owned(),
            };
            eprintln!("\"{}\": decode error: {}", file_str, e);
            None
        }
    }
}

fn format_offset(off: Option<u32>) -> String {
    match off {
        Some(o) => format!("0x{:08X}", o),
        None => "(none)".to_string(),
    }
}

/// Produce the key/value summary rows for a decoded module.
fn summarize_module(module: &FurModule) -> Vec<(String, String)> {
    let header = &module.header;
    let song: &FurSong = &module.song;

    let mut rows: Vec<(String, String)> = vec![
        ("signature".into(), header.signature_str().into_owned()),
        ("version".into(), header.version.to_string()),
        (
            "song_info_offset".into(),
            format!("0x{:08X}", header.song_info_offset),
        ),
        ("block_id".into(), song.block_id_str()),
        (
            "block_size".into(),
            format!(
                "{} (decoded {} bytes)",
                song.block_size, module.song_decoded_len
            ),
        ),
        ("song_name".into(), song.song_name.clone()),
        ("song_author".into(), song.song_author.clone()),
        (
            "timing".into(),
            format!(
                "TB {} speed {} / {}; init arp {}",
                song.time_base, song.speed[0], song.speed[1], song.initial_arpeggio_time
            ),
        ),
        ("tick_rate".into(), format!("{:.1} Hz", song.tick_rate_hz)),
        (
            "virtual_tempo".into(),
            format!(
                "{} / {}",
                song.virtual_tempo_numerator, song.virtual_tempo_denominator
            ),
        ),
        (
            "pattern_length".into(),
            song.pattern_length.to_string(),
        ),
        ("orders_length".into(), song.orders_length.to_string()),
        (
            "highlight".into(),
            format!("{} / {}", song.highlight[0], song.highlight[1]),
        ),
        ("a4_tuning".into(), format!("{:.3} Hz", song.a4_tuning)),
        ("master_volume".into(), format!("{:.3}", song.master_volume)),
        (
            "instruments".into(),
            format!(
                "{} (first at {})",
                song.instrument_count,
                format_offset(song.instrument_offset())
            ),
        ),
        (
            "wavetables".into(),
            format!(
                "{} (first at {})",
                song.wavetable_count,
                format_offset(song.wavetable_offset())
            ),
        ),
        (
            "samples".into(),
            format!(
                "{} (first at {})",
                song.sample_count,
                format_offset(song.sample_offset())
            ),
        ),
        (
            "patterns".into(),
            format!(
                "{} (first at {})",
                song.pattern_count,
                format_offset(song.pattern_offset())
            ),
        ),
    ];

    let chips_value = if song.active_chip_count == 0 {
        "(none)".to_string()
    } else {
        song.chip_slots()
            .map(|s| {
                format!(
                    "{:02}: ${:02X} {} ({} ch)",
                    s.slot, s.chip_id, s.descriptor.name, s.descriptor.channel_count
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    rows.push((
        format!("chips ({})", song.active_chip_count),
        chips_value,
    ));
    rows.push(("channels".into(), song.channel_count().to_string()));
    if !song.song_comment.is_empty() {
        rows.push(("comment".into(), song.song_comment.clone()));
    }
    rows
}

/// Print the header and song summary for a module.
///
/// Returns false if the module could not be decoded.
pub fn info(path: &Path, data: &[u8]) -> bool {
    let Some(module) = decode_or_report(path, data) else {
        return false;
    };
    let rows = summarize_module(&module);

    // Compute column widths using display width (unicode-aware)
    let mut col0 = UnicodeWidthStr::width("Field");
    let mut col1 = UnicodeWidthStr::width("Value");
    for (k, v) in &rows {
        col0 = col0.max(UnicodeWidthStr::width(k.as_str()));
        for line in v.split('\n') {
            col1 = col1.max(UnicodeWidthStr::width(line));
        }
    }

    println!(
        "{}  {}",
        pad_to_width("Field", col0),
        pad_to_width("Value", col1)
    );
    // Rows: expand multi-line values into per-line rows to keep alignment stable.
    for (k, v) in rows {
        for (i, line) in v.split('\n').enumerate() {
            let key = if i == 0 { k.as_str() } else { "" };
            println!("{}  {}", pad_to_width(key, col0), line);
        }
    }
    true
}

/// Print every non-empty chip slot of a module.
///
/// Returns false if the module could not be decoded.
pub fn chips(path: &Path, data: &[u8]) -> bool {
    let Some(module) = decode_or_report(path, data) else {
        return false;
    };

    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Slot"),
        Cell::new("Id"),
        Cell::new("Chip"),
        Cell::new("Channels"),
        Cell::new("Volume"),
        Cell::new("Panning"),
        Cell::new("Params"),
    ]);
    for s in module.song.chip_slots() {
        table.add_row(vec![
            Cell::new(format!("{:02}", s.slot)),
            Cell::new(format!("${:02X}", s.chip_id)),
            Cell::new(s.descriptor.name),
            Cell::new(s.descriptor.channel_count).set_alignment(CellAlignment::Right),
            Cell::new(format!("${:02X}", s.volume as u8)),
            Cell::new(s.panning).set_alignment(CellAlignment::Right),
            Cell::new(format!("${:08X}", s.params)),
        ]);
    }
    println!("{}", table);
    println!(
        "{} active chip(s), {} channel(s)",
        module.song.active_chip_count,
        module.song.channel_count()
    );
    true
}

/// Print the chip metadata table.
pub fn chip_table() {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Id"),
        Cell::new("Chip"),
        Cell::new("Channels"),
    ]);
    for (id, d) in known_chips() {
        table.add_row(vec![
            Cell::new(format!("${:02X}", id)),
            Cell::new(d.name),
            Cell::new(d.channel_count).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}
