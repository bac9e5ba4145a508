//! Data model for locating keys on an instrument grid.
//!
//! A [`Position`] is the logical (row, column) of a key. It is supplied by the
//! caller, typically from parsed notation, and carries no knowledge of the
//! instrument it will be placed on.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A (row, column) location on an instrument's key grid.
///
/// Ordering is row-major: positions compare by row first, then by column,
/// which matches the order of their linear indices on any grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row, counted from the top (0-based)
    pub row: usize,
    /// Column, counted from the left (0-based)
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, column): (usize, usize)) -> Self {
        Self { row, column }
    }
}

/// Rejection of untyped position data at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("a position needs exactly 2 components (row, column), got {0}")]
    WrongArity(usize),
    #[error("{axis} must be non-negative, got {value}")]
    Negative { axis: &'static str, value: i64 },
}

fn component(axis: &'static str, value: i64) -> Result<usize, PositionError> {
    usize::try_from(value).map_err(|_| PositionError::Negative { axis, value })
}

impl TryFrom<(i64, i64)> for Position {
    type Error = PositionError;

    fn try_from((row, column): (i64, i64)) -> Result<Self, Self::Error> {
        Ok(Self {
            row: component("row", row)?,
            column: component("column", column)?,
        })
    }
}

impl TryFrom<&[i64]> for Position {
    type Error = PositionError;

    fn try_from(values: &[i64]) -> Result<Self, Self::Error> {
        match *values {
            [row, column] => Self::try_from((row, column)),
            _ => Err(PositionError::WrongArity(values.len())),
        }
    }
}
