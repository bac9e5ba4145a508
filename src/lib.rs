//! skygrid — note placement on instrument grids and themed harp diagrams.
//!
//! A [`Note`] is bound to an [`Instrument`] and placed at an optional grid
//! [`Position`]; it derives a row-major index from that position and asks the
//! instrument which animation frames it highlights. The [`Harp`] is the
//! concrete instrument, and the renderer turns harps into SVG using a
//! [`ResourceSet`] loaded once per theme and platform.
//!
//! # Example
//! ```
//! use skygrid::{Harp, Note, Position};
//!
//! let harp = Harp::default();
//! harp.highlight(Position::new(0, 0), [0, 1]).unwrap();
//!
//! let mut note = Note::new(&harp, Some(Position::new(0, 0))).unwrap();
//! assert_eq!(note.index(), Some(0));
//! assert!(note.is_highlighted().unwrap());
//!
//! note.set_position(Position::new(2, 4)).unwrap();
//! assert_eq!(note.index(), Some(14));
//! ```

pub mod instrument;
pub mod model;
pub mod note;
pub mod renderer;
pub mod resources;

#[cfg(target_os = "android")]
pub mod android;

pub use instrument::{Harp, HarpSpec, Instrument, InstrumentError, KeyHighlight};
pub use model::{Position, PositionError};
pub use note::{Note, NoteError, NoteView, Validation};
pub use renderer::{render_harp_to_svg, render_harps_to_svg, RenderError};
pub use resources::{Platform, ResourceConfig, ResourceError, ResourceSet, Theme};

/// Any failure of the crate-level convenience API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error(transparent)]
    Note(#[from] NoteError),
    #[error(transparent)]
    Instrument(#[from] InstrumentError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Build a harp from its JSON description (see [`HarpSpec`]).
pub fn harp_from_json(json: &str) -> Result<Harp, Error> {
    Ok(serde_json::from_str(json)?)
}

/// Describe a harp as JSON.
pub fn harp_to_json(harp: &Harp) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(harp)?)
}

/// Snapshots of every key of a harp, in index order, as JSON.
/// Useful for passing note state across FFI boundaries.
pub fn harp_notes_to_json(harp: &Harp) -> Result<String, Error> {
    let views = harp
        .notes()?
        .iter()
        .map(Note::view)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::to_string(&views)?)
}

/// Parse a JSON harp list (a single harp object or an array of harps) and
/// render it to SVG.
pub fn render_harp_json_to_svg(json: &str, resources: Option<&ResourceSet>) -> Result<String, Error> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let harps: Vec<Harp> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(render_harps_to_svg(&harps, resources)?)
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Render harps described in JSON to SVG and return it as a C string.
/// Returns null on invalid input. The caller must free the returned string
/// with `skygrid_free_string`.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn skygrid_render_harp(json: *const c_char) -> *mut c_char {
    if json.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(json) };
    let json_str = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    match render_harp_json_to_svg(json_str, None) {
        Ok(svg) => CString::new(svg).unwrap_or_default().into_raw(),
        Err(e) => {
            log::error!("skygrid_render_harp: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Free a string previously returned by skygrid functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a skygrid function, or null.
#[no_mangle]
pub unsafe extern "C" fn skygrid_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
