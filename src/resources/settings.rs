//! Default parameter tables shared by the sheet renderers.

use serde::{Deserialize, Serialize};

// ── Limits ──────────────────────────────────────────────────────────
pub const MAX_FILENAME_LENGTH: usize = 127;
pub const MAX_NUM_FILES: usize = 15;
/// Keys a single harp may have; larger grids are rejected at construction.
pub const MAX_HARP_KEYS: usize = 1024;
/// Harps a single render call may draw.
pub const MAX_HARPS_PER_RENDER: usize = 10_000;

// ── Song defaults ───────────────────────────────────────────────────
pub const DEFAULT_BPM: u32 = 220;
pub const CHORD_DELAY_MS: u32 = 50; // notes closer than this form a chord
pub const PARSING_START_OCTAVE: i32 = 1;
pub const RENDERING_START_OCTAVE: i32 = 4;
pub const DEFAULT_KEY: &str = "C";
pub const DEFAULT_INSTRUMENT: &str = "harp";

// ── Pitch tables ────────────────────────────────────────────────────
/// MIDI note numbers of the fourth-octave note names, sharps and flats alike.
pub const MIDI_PITCHES: [(&str, u8); 17] = [
    ("C", 60),
    ("C#", 61),
    ("Db", 61),
    ("D", 62),
    ("D#", 63),
    ("Eb", 63),
    ("E", 64),
    ("F", 65),
    ("F#", 66),
    ("Gb", 66),
    ("G", 67),
    ("G#", 68),
    ("Ab", 68),
    ("A", 69),
    ("A#", 70),
    ("Bb", 70),
    ("B", 71),
];
/// Semitone offsets of the major scale degrees from the tonic.
pub const MIDI_SEMITONES: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

pub fn midi_pitch(name: &str) -> Option<u8> {
    MIDI_PITCHES
        .iter()
        .find(|(note, _)| *note == name)
        .map(|&(_, pitch)| pitch)
}

/// Song files that must be opened in binary mode.
pub const BINARY_EXTENSIONS: [&str; 2] = ["mid", "midi"];
/// Markdown rulers recognized in song text.
pub const MARKDOWN_RULERS: [&str; 2] = ["--", "__"];

pub fn is_binary_song_file(file_name: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            BINARY_EXTENSIONS
                .iter()
                .any(|binary| binary.eq_ignore_ascii_case(ext))
        })
}

/// Separators of the song text format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    pub icon: String,
    pub pause: String,
    pub quaver: String,
    pub jianpu_pause: String,
    pub jianpu_quaver: String,
    pub lyric: String,
    pub metadata: String,
    pub repeat: String,
    pub broken_harp: String,
    pub layer: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            icon: " ".into(),
            pause: ".".into(),
            quaver: "-".into(),
            jianpu_pause: "0".into(),
            jianpu_quaver: "^".into(),
            lyric: "#".into(),
            metadata: "#$".into(),
            repeat: "*".into(),
            broken_harp: "X".into(),
            layer: "==".into(),
        }
    }
}

/// Layout of PNG sheets (sizes in pixels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PngSettings {
    pub harp_font_size: u32,
    pub voice_font_size: u32,
    pub h1_font_size: u32,
    pub h2_font_size: u32,
    pub font_size: u32,
    pub png_compress: u8,
    pub png_dpi: (u32, u32),
    /// Animation frames per harp. On mobile this is the number of
    /// highlighted-root sprites shipped with the theme.
    pub max_quavers: usize,
    pub max_chord_size: usize,
    pub max_harps_line: usize,
    pub max_gp_notes_line: usize,
    pub row_names: Vec<String>,
    pub harp_aspect_ratio: f64,
    /// Horizontal and vertical padding relative to the harp's width and height
    pub harp_rel_spacings: (f64, f64),
}

impl Default for PngSettings {
    fn default() -> Self {
        Self {
            harp_font_size: 38,
            voice_font_size: 36,
            h1_font_size: 48,
            h2_font_size: 42,
            font_size: 36,
            png_compress: 6,
            png_dpi: (2 * 96, 2 * 96),
            max_quavers: 6,
            max_chord_size: 6,
            max_harps_line: 10,
            max_gp_notes_line: 20,
            row_names: vec!["A".into(), "B".into(), "C".into()],
            harp_aspect_ratio: 1.4553,
            harp_rel_spacings: (0.13, 0.1),
        }
    }
}

/// Layout of SVG sheets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgSettings {
    /// Text size in points
    pub font_size: f64,
    /// Viewport of the gamepad button symbols
    pub gp_note_size: (f64, f64),
    pub harp_aspect_ratio: f64,
    pub harp_rel_spacings: (f64, f64),
    pub max_harps_line: usize,
    pub max_gp_notes_line: usize,
}

impl Default for SvgSettings {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            gp_note_size: (100.0, 110.0),
            harp_aspect_ratio: 1.4553,
            harp_rel_spacings: (0.13, 0.1),
            max_harps_line: 10,
            max_gp_notes_line: 20,
        }
    }
}
