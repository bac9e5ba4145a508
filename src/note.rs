//! Notes: a placement on an instrument grid and its highlight state.
//!
//! A [`Note`] borrows the instrument that defines its coordinate space, so the
//! instrument necessarily outlives every note bound to it. The position and
//! the derived row-major index are stored as one value: they are assigned
//! together or not at all.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::instrument::Instrument;
use crate::model::{Position, PositionError};

/// How a note checks positions against its instrument's grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validation {
    /// No bounds check: any position is linearized as given.
    #[default]
    Permissive,
    /// Rows and columns must lie inside the instrument's grid.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteError {
    #[error("instrument grid has no columns")]
    EmptyGrid,
    #[error("position {position} lies outside the {rows}x{columns} grid")]
    OutOfBounds {
        position: Position,
        rows: usize,
        columns: usize,
    },
    #[error("index of position {0} overflows")]
    IndexOverflow(Position),
    #[error("malformed position: {0}")]
    Malformed(#[from] PositionError),
}

/// One playable unit, optionally placed on its instrument's grid.
pub struct Note<'a, I: Instrument + ?Sized> {
    instrument: &'a I,
    placement: Option<(Position, usize)>,
    validation: Validation,
}

impl<'a, I: Instrument + ?Sized> Note<'a, I> {
    /// Bind a note to `instrument`, placed at `position` if given.
    ///
    /// Positions are not bounds-checked; see [`Note::with_validation`].
    pub fn new(instrument: &'a I, position: Option<Position>) -> Result<Self, NoteError> {
        Self::with_validation(instrument, position, Validation::Permissive)
    }

    pub fn with_validation(
        instrument: &'a I,
        position: Option<Position>,
        validation: Validation,
    ) -> Result<Self, NoteError> {
        if instrument.num_columns() == 0 {
            return Err(NoteError::EmptyGrid);
        }
        let mut note = Self {
            instrument,
            placement: None,
            validation,
        };
        if let Some(position) = position {
            note.set_position(position)?;
        }
        Ok(note)
    }

    pub fn instrument(&self) -> &'a I {
        self.instrument
    }

    pub fn validation(&self) -> Validation {
        self.validation
    }

    pub fn position(&self) -> Option<Position> {
        self.placement.map(|(position, _)| position)
    }

    /// Row-major index of the current position.
    pub fn index(&self) -> Option<usize> {
        self.placement.map(|(_, index)| index)
    }

    pub fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    /// Move the note to `position`. On error the note keeps its previous
    /// placement.
    pub fn set_position(&mut self, position: Position) -> Result<(), NoteError> {
        let index = self.locate(position)?;
        self.placement = Some((position, index));
        Ok(())
    }

    /// Place the note from untyped `[row, column]` data.
    pub fn set_raw_position(&mut self, values: &[i64]) -> Result<(), NoteError> {
        self.set_position(Position::try_from(values)?)
    }

    /// Return the note to the unplaced state.
    pub fn clear_position(&mut self) {
        self.placement = None;
    }

    fn locate(&self, position: Position) -> Result<usize, NoteError> {
        let columns = self.instrument.num_columns();
        if self.validation == Validation::Strict {
            let rows = self.instrument.num_rows();
            if position.row >= rows || position.column >= columns {
                return Err(NoteError::OutOfBounds {
                    position,
                    rows,
                    columns,
                });
            }
        }
        position
            .row
            .checked_mul(columns)
            .and_then(|start| start.checked_add(position.column))
            .ok_or(NoteError::IndexOverflow(position))
    }

    /// Frames the instrument highlights at this note's position.
    ///
    /// An unplaced note asks about `None`, which instruments answer with an
    /// empty sequence.
    pub fn highlighted_frames(&self) -> Result<Vec<I::Frame>, I::Error> {
        self.instrument.highlighted_frames(self.position())
    }

    pub fn is_highlighted(&self) -> Result<bool, I::Error> {
        Ok(!self.highlighted_frames()?.is_empty())
    }

    /// Serializable snapshot of the note's current state.
    pub fn view(&self) -> Result<NoteView<I::Frame>, I::Error> {
        let frames = self.highlighted_frames()?;
        Ok(NoteView {
            index: self.index(),
            position: self.position(),
            highlighted: !frames.is_empty(),
            frames,
        })
    }
}

impl<I: Instrument + ?Sized> Clone for Note<'_, I> {
    fn clone(&self) -> Self {
        Self {
            instrument: self.instrument,
            placement: self.placement,
            validation: self.validation,
        }
    }
}

impl<I: Instrument + ?Sized> fmt::Debug for Note<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("position", &self.position())
            .field("index", &self.index())
            .field("validation", &self.validation)
            .finish()
    }
}

impl<I: Instrument + ?Sized> fmt::Display for Note<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.placement {
            Some((position, index)) => write!(f, "<{index}, pos={position}")?,
            None => write!(f, "<None, pos=None")?,
        }
        match self.highlighted_frames() {
            Ok(frames) => write!(f, ", highlighted frames={frames:?}>"),
            Err(e) => write!(f, ", highlighted frames=<error: {e}>>"),
        }
    }
}

/// Snapshot of a note for JSON consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteView<F> {
    pub index: Option<usize>,
    pub position: Option<Position>,
    pub frames: Vec<F>,
    pub highlighted: bool,
}
