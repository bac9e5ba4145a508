//! Instruments: grid geometry plus the highlight rules for each key.
//!
//! Every [`Note`] is bound to an [`Instrument`] and asks it two things: how
//! many columns its grid has (to linearize positions) and which frames a
//! position lights up. The [`Harp`] is the concrete instrument used by the
//! renderer: a rows x columns grid of keys whose highlight state is owned and
//! mutated by the harp itself.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Position;
use crate::note::{Note, NoteError};
use crate::resources::MAX_HARP_KEYS;

/// Rows of the standard Sky harp.
pub const SKY_HARP_ROWS: usize = 3;
/// Columns of the standard Sky harp.
pub const SKY_HARP_COLUMNS: usize = 5;

/// Geometry and highlight-rule provider that notes are bound to.
///
/// Implementations must keep `num_rows` and `num_columns` fixed for as long as
/// any note borrows the instrument. Highlight state may change, but only
/// through the instrument itself.
pub trait Instrument {
    /// Identifier of one visual/animation state (e.g. a keyframe).
    type Frame: Clone + fmt::Debug;
    /// Failure of the highlight lookup. Notes propagate it unchanged.
    type Error: std::error::Error;

    fn num_rows(&self) -> usize;

    fn num_columns(&self) -> usize;

    /// Ordered frames highlighted at `position`.
    ///
    /// Must return an empty sequence, never an error, for `None`.
    fn highlighted_frames(
        &self,
        position: Option<Position>,
    ) -> Result<Vec<Self::Frame>, Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstrumentError {
    #[error("a harp needs at least one row and one column, got {rows}x{columns}")]
    EmptyGrid { rows: usize, columns: usize },
    #[error("a {rows}x{columns} harp has more than {max} keys", max = MAX_HARP_KEYS)]
    TooLarge { rows: usize, columns: usize },
    #[error("position {position} lies outside the {rows}x{columns} harp")]
    OutOfGrid {
        position: Position,
        rows: usize,
        columns: usize,
    },
}

/// A grid of keys with per-key highlighted frames.
///
/// Geometry is fixed at construction. Highlight state lives behind interior
/// mutability so that notes already bound to the harp observe changes
/// immediately; this makes `Harp` `!Sync`, confining it to one thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "HarpSpec", into = "HarpSpec")]
pub struct Harp {
    rows: usize,
    columns: usize,
    highlights: RefCell<BTreeMap<Position, BTreeSet<u32>>>,
    silent: Cell<bool>,
    broken: Cell<bool>,
}

impl Harp {
    pub fn new(rows: usize, columns: usize) -> Result<Self, InstrumentError> {
        if rows == 0 || columns == 0 {
            return Err(InstrumentError::EmptyGrid { rows, columns });
        }
        if !matches!(rows.checked_mul(columns), Some(keys) if keys <= MAX_HARP_KEYS) {
            return Err(InstrumentError::TooLarge { rows, columns });
        }
        Ok(Self {
            rows,
            columns,
            highlights: RefCell::new(BTreeMap::new()),
            silent: Cell::new(false),
            broken: Cell::new(false),
        })
    }

    /// Total number of keys.
    pub fn num_keys(&self) -> usize {
        self.rows * self.columns
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.column < self.columns
    }

    fn check(&self, position: Position) -> Result<(), InstrumentError> {
        if self.contains(position) {
            Ok(())
        } else {
            Err(InstrumentError::OutOfGrid {
                position,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    /// Highlight the key at `position` on the given frames, replacing any
    /// frames it had. An empty frame set clears the key.
    pub fn highlight<F>(&self, position: Position, frames: F) -> Result<(), InstrumentError>
    where
        F: IntoIterator<Item = u32>,
    {
        self.check(position)?;
        let frames: BTreeSet<u32> = frames.into_iter().collect();
        let mut highlights = self.highlights.borrow_mut();
        if frames.is_empty() {
            highlights.remove(&position);
        } else {
            log::trace!("highlight {position} on frames {frames:?}");
            highlights.insert(position, frames);
        }
        Ok(())
    }

    pub fn clear_highlight(&self, position: Position) -> Result<(), InstrumentError> {
        self.check(position)?;
        self.highlights.borrow_mut().remove(&position);
        Ok(())
    }

    pub fn clear_highlights(&self) {
        self.highlights.borrow_mut().clear();
    }

    /// A silent harp (a rest) highlights nothing.
    pub fn set_silent(&self, silent: bool) {
        self.silent.set(silent);
    }

    pub fn is_silent(&self) -> bool {
        self.silent.get()
    }

    /// A broken harp (unreadable chord in the source) highlights nothing.
    pub fn set_broken(&self, broken: bool) {
        self.broken.set(broken);
    }

    pub fn is_broken(&self) -> bool {
        self.broken.get()
    }

    /// One placed note per key, in index order.
    pub fn notes(&self) -> Result<Vec<Note<'_, Self>>, NoteError> {
        (0..self.rows)
            .flat_map(|row| (0..self.columns).map(move |column| Position::new(row, column)))
            .map(|position| Note::new(self, Some(position)))
            .collect()
    }

    /// The note placed on the key at `position`, if the key exists.
    pub fn note_at(&self, position: Position) -> Option<Note<'_, Self>> {
        if !self.contains(position) {
            return None;
        }
        // Cannot fail: the key is on the grid and the grid has at most
        // MAX_HARP_KEYS keys, so the index neither overflows nor goes out of bounds.
        Note::new(self, Some(position)).ok()
    }
}

impl Default for Harp {
    fn default() -> Self {
        Self {
            rows: SKY_HARP_ROWS,
            columns: SKY_HARP_COLUMNS,
            highlights: RefCell::new(BTreeMap::new()),
            silent: Cell::new(false),
            broken: Cell::new(false),
        }
    }
}

impl Instrument for Harp {
    type Frame = u32;
    type Error = InstrumentError;

    fn num_rows(&self) -> usize {
        self.rows
    }

    fn num_columns(&self) -> usize {
        self.columns
    }

    fn highlighted_frames(&self, position: Option<Position>) -> Result<Vec<u32>, InstrumentError> {
        let Some(position) = position else {
            return Ok(Vec::new());
        };
        self.check(position)?;
        if self.is_silent() || self.is_broken() {
            return Ok(Vec::new());
        }
        Ok(self
            .highlights
            .borrow()
            .get(&position)
            .map(|frames| frames.iter().copied().collect())
            .unwrap_or_default())
    }
}

/// Human label of a key: row name followed by the 1-based column ("A1", "C5").
///
/// Rows without a name fall back to their 1-based number.
pub fn key_label(position: Position, row_names: &[String]) -> String {
    match row_names.get(position.row) {
        Some(name) => format!("{name}{}", position.column + 1),
        None => format!("{}-{}", position.row + 1, position.column + 1),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// JSON form
// ═══════════════════════════════════════════════════════════════════════

/// Serializable description of a harp and its highlighted keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarpSpec {
    pub rows: usize,
    pub columns: usize,
    #[serde(default)]
    pub silent: bool,
    #[serde(default)]
    pub broken: bool,
    #[serde(default)]
    pub highlights: Vec<KeyHighlight>,
}

/// Frames highlighted on one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyHighlight {
    pub row: usize,
    pub column: usize,
    pub frames: Vec<u32>,
}

impl TryFrom<HarpSpec> for Harp {
    type Error = InstrumentError;

    fn try_from(spec: HarpSpec) -> Result<Self, Self::Error> {
        let harp = Harp::new(spec.rows, spec.columns)?;
        harp.set_silent(spec.silent);
        harp.set_broken(spec.broken);
        for key in spec.highlights {
            harp.highlight(Position::new(key.row, key.column), key.frames)?;
        }
        Ok(harp)
    }
}

impl From<Harp> for HarpSpec {
    fn from(harp: Harp) -> Self {
        let highlights = harp
            .highlights
            .borrow()
            .iter()
            .map(|(position, frames)| KeyHighlight {
                row: position.row,
                column: position.column,
                frames: frames.iter().copied().collect(),
            })
            .collect();
        HarpSpec {
            rows: harp.rows,
            columns: harp.columns,
            silent: harp.is_silent(),
            broken: harp.is_broken(),
            highlights,
        }
    }
}
