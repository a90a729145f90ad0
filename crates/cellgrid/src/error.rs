//! Error handling for the cellgrid crate.

use std::{io, path::PathBuf, result};

use cellgrid_ids::ItemId;
use thiserror::Error;

use crate::item::CellAndSpan;

/// Errors raised when a caller hands the engine inconsistent input.
///
/// A search that finds no placement is not an error: it is reported through
/// [`crate::ItemConfiguration::is_solution`].
#[derive(Error, Debug)]
pub enum Error {
    /// A span or minimum span violates `span >= min_span >= 1` or exceeds the grid.
    #[error(
        "bad span {span_x}x{span_y} (min {min_span_x}x{min_span_y}) for a {count_x}x{count_y} grid"
    )]
    InvalidSpan {
        /// Requested horizontal span.
        span_x: i32,
        /// Requested vertical span.
        span_y: i32,
        /// Minimum horizontal span.
        min_span_x: i32,
        /// Minimum vertical span.
        min_span_y: i32,
        /// Grid width in cells.
        count_x: i32,
        /// Grid height in cells.
        count_y: i32,
    },

    /// An item rectangle does not fit inside the grid.
    #[error("item {id} at {cell:?} lies outside the {count_x}x{count_y} grid")]
    OutOfBounds {
        /// Offending item.
        id: ItemId,
        /// Rectangle that failed the bounds check.
        cell: CellAndSpan,
        /// Grid width in cells.
        count_x: i32,
        /// Grid height in cells.
        count_y: i32,
    },

    /// Two items would cover the same cell.
    #[error("item {id} overlaps item {other}")]
    Overlap {
        /// Item being placed.
        id: ItemId,
        /// Item already covering one of the cells.
        other: ItemId,
    },

    /// The dragged item's placement covers an item that was not displaced.
    #[error("placement blocked by item {0}")]
    Blocked(ItemId),

    /// The identifier is reserved for the virtual seam column.
    #[error("item id {0} is reserved")]
    ReservedId(ItemId),

    /// An item with this identifier is already on the grid.
    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),

    /// No item with this identifier is on the grid.
    #[error("unknown item {0}")]
    UnknownItem(ItemId),

    /// A text board could not be parsed.
    #[error("board error at row {row}, column {col}: {message}")]
    Board {
        /// 0-based row of the offending cell.
        row: usize,
        /// 0-based column of the offending cell.
        col: usize,
        /// Human-readable description.
        message: String,
    },

    /// A grid profile could not be parsed or failed validation.
    #[error("config error{}: {message}", path_suffix(.path))]
    Config {
        /// File the profile was read from, if any.
        path: Option<PathBuf>,
        /// Human-readable description.
        message: String,
    },

    /// Reading a profile or board from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Helper to build a configuration error without a path.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::Config {
            path: None,
            message: message.into(),
        }
    }

    /// Helper to build a board parse error.
    pub fn board<M: Into<String>>(row: usize, col: usize, message: M) -> Self {
        Self::Board {
            row,
            col,
            message: message.into(),
        }
    }
}

/// Render the optional file location of a configuration error.
fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" in {}", p.display()),
        None => String::new(),
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = result::Result<T, Error>;
