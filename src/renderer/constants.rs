//! Shared constants for the harp renderer (all in SVG user units).

// ── Page & margins ──────────────────────────────────────────────────
pub(super) const HARP_WIDTH: f64 = 200.0;
pub(super) const PAGE_MARGIN: f64 = 20.0;
pub(super) const HARP_GAP: f64 = 16.0; // space between neighbouring harps

// ── Harp frame ──────────────────────────────────────────────────────
pub(super) const HARP_STROKE_WIDTH: f64 = 1.0;
pub(super) const HARP_CORNER_RADIUS: f64 = 8.0;

// ── Keys ────────────────────────────────────────────────────────────
pub(super) const KEY_RADIUS_RATIO: f64 = 0.36; // of the smaller cell side
pub(super) const ROOT_RING_RATIO: f64 = 0.55; // inner ring of root keys
pub(super) const KEY_STROKE_WIDTH: f64 = 1.5;
pub(super) const KEYS_PER_OCTAVE: usize = 7; // every 7th key is a root

// ── Broken harp cross ───────────────────────────────────────────────
pub(super) const CROSS_STROKE_WIDTH: f64 = 3.0;
