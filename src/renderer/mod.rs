//! Harp diagram renderer — draws harps and their highlighted keys as SVG.
//!
//! Harps are laid out left to right, wrapping after
//! [`SvgSettings::max_harps_line`] harps. Each key is a `<g>` element carrying
//! its row-major index, its label and one `frame-<n>` class per highlighted
//! frame, so that stylesheets and scripts can animate the keys frame by frame.

mod constants;
mod svg_builder;

use thiserror::Error;

use crate::instrument::{key_label, Harp, Instrument, InstrumentError};
use crate::note::NoteError;
use crate::resources::{PngSettings, ResourceSet, SvgSettings, ThemeColors, MAX_HARPS_PER_RENDER};
use constants::*;
use svg_builder::SvgBuilder;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error(transparent)]
    Note(#[from] NoteError),
    #[error(transparent)]
    Instrument(#[from] InstrumentError),
    #[error("cannot render {count} harps at once, the limit is {max}", max = MAX_HARPS_PER_RENDER)]
    TooManyHarps { count: usize },
}

/// Everything the renderer reads from the theme.
struct Style<'a> {
    colors: ThemeColors,
    svg: SvgSettings,
    row_names: Vec<String>,
    css: Option<&'a str>,
    font_family: String,
}

impl<'a> Style<'a> {
    fn new(resources: Option<&'a ResourceSet>) -> Self {
        match resources {
            Some(res) => Style {
                colors: *res.colors(),
                svg: res.svg_settings().clone(),
                row_names: res.png_settings().row_names.clone(),
                css: res.css("svg"),
                font_family: font_family(&res.font().file_name),
            },
            None => Style {
                colors: ThemeColors::default(),
                svg: SvgSettings::default(),
                row_names: PngSettings::default().row_names,
                css: None,
                font_family: "sans-serif".to_string(),
            },
        }
    }
}

/// Font family name from a font file name ("NotoSans-Bold.ttf" → "NotoSans-Bold").
fn font_family(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
        .to_string()
}

/// Render a single harp.
pub fn render_harp_to_svg(harp: &Harp, resources: Option<&ResourceSet>) -> Result<String, RenderError> {
    render_harps_to_svg(std::slice::from_ref(harp), resources)
}

/// Render a sequence of harps (one song line after another).
///
/// Without a resource set the light theme colors and default settings are
/// used and no stylesheet is embedded.
pub fn render_harps_to_svg(harps: &[Harp], resources: Option<&ResourceSet>) -> Result<String, RenderError> {
    if harps.len() > MAX_HARPS_PER_RENDER {
        return Err(RenderError::TooManyHarps { count: harps.len() });
    }
    let style = Style::new(resources);

    let harp_height = HARP_WIDTH / style.svg.harp_aspect_ratio;
    let per_line = style.svg.max_harps_line.max(1);
    let columns = harps.len().clamp(1, per_line);
    let lines = harps.len().div_ceil(per_line).max(1);

    let width = 2.0 * PAGE_MARGIN + columns as f64 * HARP_WIDTH + (columns - 1) as f64 * HARP_GAP;
    let height = 2.0 * PAGE_MARGIN + lines as f64 * harp_height + (lines - 1) as f64 * HARP_GAP;

    let mut svg = SvgBuilder::new(width, height, &style.font_family);
    if let Some(css) = style.css {
        svg.style(css);
    }
    svg.rect(0.0, 0.0, width, height, 0.0, &style.colors.song_bkg.to_css(), "none", 0.0);

    for (harp_idx, harp) in harps.iter().enumerate() {
        let x = PAGE_MARGIN + (harp_idx % per_line) as f64 * (HARP_WIDTH + HARP_GAP);
        let y = PAGE_MARGIN + (harp_idx / per_line) as f64 * (harp_height + HARP_GAP);
        render_harp(&mut svg, harp, harp_idx, x, y, harp_height, &style)?;
    }

    log::debug!("rendered {} harps on {lines} lines", harps.len());
    Ok(svg.build())
}

fn render_harp(
    svg: &mut SvgBuilder,
    harp: &Harp,
    harp_idx: usize,
    x: f64,
    y: f64,
    height: f64,
    style: &Style<'_>,
) -> Result<(), RenderError> {
    let colors = &style.colors;
    let (rel_h, rel_v) = style.svg.harp_rel_spacings;

    let mut class = String::from("harp");
    if harp.is_silent() {
        class.push_str(" silent");
    }
    if harp.is_broken() {
        class.push_str(" broken");
    }
    svg.open_group(&format!("harp-{harp_idx}"), &class, &[]);

    svg.rect(
        x,
        y,
        HARP_WIDTH,
        height,
        HARP_CORNER_RADIUS,
        &colors.harp_color.to_css(),
        &colors.hr_color.to_css(),
        HARP_STROKE_WIDTH,
    );

    let pad_x = rel_h * HARP_WIDTH;
    let pad_y = rel_v * height;
    let notes = harp.notes()?;
    let cell_w = (HARP_WIDTH - 2.0 * pad_x) / harp.num_columns() as f64;
    let cell_h = (height - 2.0 * pad_y) / harp.num_rows() as f64;
    let radius = cell_w.min(cell_h) * KEY_RADIUS_RATIO;

    for note in &notes {
        let (Some(position), Some(index)) = (note.position(), note.index()) else {
            continue;
        };
        let frames = note.highlighted_frames()?;

        let mut key_class = String::from("key");
        let is_root = index % KEYS_PER_OCTAVE == 0;
        if is_root {
            key_class.push_str(" root");
        }
        if !frames.is_empty() {
            key_class.push_str(" highlighted");
            for frame in &frames {
                key_class.push_str(&format!(" frame-{frame}"));
            }
        }

        let label = key_label(position, &style.row_names);
        svg.open_group(
            &format!("harp-{harp_idx}-key-{index}"),
            &key_class,
            &[("data-index", index.to_string()), ("data-label", label.clone())],
        );

        let cx = x + pad_x + (position.column as f64 + 0.5) * cell_w;
        let cy = y + pad_y + (position.row as f64 + 0.5) * cell_h;
        let (fill, ink) = if frames.is_empty() {
            (colors.harp_color, colors.font_color)
        } else {
            (colors.font_color, colors.harp_color)
        };
        svg.circle(cx, cy, radius, &fill.to_css(), &colors.font_color.to_css(), KEY_STROKE_WIDTH);
        if is_root {
            svg.circle(cx, cy, radius * ROOT_RING_RATIO, "none", &ink.to_css(), KEY_STROKE_WIDTH);
        }
        svg.text(cx, cy, &label, style.svg.font_size, &ink.to_css());
        svg.close_group();
    }

    if harp.is_broken() {
        let stroke = colors.dimmed_font_color.to_css();
        svg.line(x, y, x + HARP_WIDTH, y + height, &stroke, CROSS_STROKE_WIDTH);
        svg.line(x + HARP_WIDTH, y, x, y + height, &stroke, CROSS_STROKE_WIDTH);
    }

    svg.close_group();
    Ok(())
}
