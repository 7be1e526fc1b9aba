//! Error types for record loading and playback.

use thiserror::Error;

/// Errors surfaced while loading inputs or driving playback.
///
/// The original visualizer performed no validation at all; here every
/// failure mode that would otherwise be an invalid array/attribute access
/// becomes a checked error.
#[derive(Debug, Error)]
pub enum VisError {
    /// Frame index past the end of the record
    #[error("frame index {index} out of bounds (record has {len} frames)")]
    FrameOutOfBounds { index: usize, len: usize },

    /// No visual handle registered for this robot index
    #[error("no visual handle for robot {0}")]
    UnknownRobot(usize),

    /// Number of visual handles does not match the record's robot count
    #[error("{visuals} visual handles for {robots} robots")]
    VisualCountMismatch { visuals: usize, robots: usize },

    /// Speed must be finite and non-negative; it scales transition
    /// durations and frame deadlines
    #[error("invalid speed {0}: must be finite and non-negative")]
    InvalidSpeed(f64),

    /// Record file violated the `{init, data}` contract
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Map rows have inconsistent lengths (or the map is empty)
    #[error("map is not rectangular: row {row} has {found} cells, expected {expected}")]
    NotRectangular {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// Cell lookup outside the map bounds
    #[error("position ({row}, {col}) outside the {rows}x{cols} map")]
    PositionOutOfMap {
        row: i32,
        col: i32,
        rows: usize,
        cols: usize,
    },

    /// I/O failure reading an input file or writing the page
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse failure in a record or map file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VisError {
    /// Creates a malformed-record error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }
}
