//! Playback record model.
//!
//! A record is the JSON document the simulator writes after a run:
//!
//! ```json
//! {
//!   "init": [[0, 1, 2, 3, false], ...],
//!   "data": [[[1, 1, 2, 3, false], ...], ...]
//! }
//! ```
//!
//! `init` holds one state per robot at time zero; `data` holds one frame
//! per time step, index-aligned with robot identity. Each state is a
//! 5-element array `[moveCost, row, col, orientation, hasMail]`.

use crate::error::VisError;
use crate::grid::Direction;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Wire form of a robot state: `[moveCost, row, col, orientation, hasMail]`.
type RawRobotState = (u32, i32, i32, u8, bool);

/// One robot's state at one time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRobotState", into = "RawRobotState")]
pub struct RobotState {
    /// Time units this step takes; zero means the robot does nothing
    /// this frame and playback must not touch it
    pub move_cost: u32,

    /// Target grid row
    pub row: i32,

    /// Target grid column
    pub col: i32,

    /// Target facing direction
    pub orientation: Direction,

    /// Whether the robot is carrying mail after this step
    pub has_mail: bool,
}

impl TryFrom<RawRobotState> for RobotState {
    type Error = VisError;

    fn try_from(raw: RawRobotState) -> Result<Self, VisError> {
        let (move_cost, row, col, orientation, has_mail) = raw;
        Ok(Self {
            move_cost,
            row,
            col,
            orientation: Direction::try_from(orientation)?,
            has_mail,
        })
    }
}

impl From<RobotState> for RawRobotState {
    fn from(state: RobotState) -> RawRobotState {
        (
            state.move_cost,
            state.row,
            state.col,
            state.orientation.index(),
            state.has_mail,
        )
    }
}

/// One time step: one state per robot, index-aligned with robot identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frame(pub Vec<RobotState>);

impl Frame {
    /// States in robot order.
    pub fn robots(&self) -> &[RobotState] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A complete playback record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Robot states at time zero (used to build the initial scene)
    pub init: Vec<RobotState>,

    /// One frame per time step
    pub data: Vec<Frame>,
}

impl Record {
    /// Loads and validates a record from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VisError> {
        let file = File::open(path)?;
        let record: Record = serde_json::from_reader(BufReader::new(file))?;
        record.validate()?;
        Ok(record)
    }

    /// Parses and validates a record from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, VisError> {
        let record: Record = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }

    /// Checks the structural invariants: at least one frame, and every
    /// frame holds exactly one state per robot in `init`.
    ///
    /// Orientation range is already enforced per-state by deserialization.
    pub fn validate(&self) -> Result<(), VisError> {
        if self.init.is_empty() {
            return Err(VisError::malformed("init holds no robots"));
        }
        if self.data.is_empty() {
            return Err(VisError::malformed("record holds no frames"));
        }
        let robots = self.init.len();
        for (index, frame) in self.data.iter().enumerate() {
            if frame.len() != robots {
                return Err(VisError::malformed(format!(
                    "frame {} has {} robots, expected {}",
                    index,
                    frame.len(),
                    robots
                )));
            }
        }
        Ok(())
    }

    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.data.len()
    }

    /// Number of robots.
    pub fn robot_count(&self) -> usize {
        self.init.len()
    }

    /// The frame at `index`, or a bounds error.
    pub fn frame(&self, index: usize) -> Result<&Frame, VisError> {
        self.data.get(index).ok_or(VisError::FrameOutOfBounds {
            index,
            len: self.data.len(),
        })
    }
}
