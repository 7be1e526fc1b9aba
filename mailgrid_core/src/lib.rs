//! MailGrid Core - Robot Playback Visualization
//!
//! This library turns the mail-sorting simulator's output into an animated
//! SVG scene:
//! 1. **Record model**: the `{init, data}` JSON document of per-robot
//!    `[moveCost, row, col, orientation, hasMail]` states
//! 2. **Playback driver**: shortest-arc rotation tracking over unbounded
//!    orientation counters, applied to visual handles
//! 3. **SVG scene**: the grid page the driver animates

pub mod config;
pub mod error;
pub mod grid;
pub mod playback;
pub mod record;
pub mod svg;

// Re-export key types for convenience
pub use config::GridConfig;
pub use error::VisError;
pub use grid::{CellSpec, Direction, GridMap, GridPosition};
pub use playback::{normalize_mod4, turn_delta, PlaybackState, RobotVisual};
pub use record::{Frame, Record, RobotState};
pub use svg::{SvgRobot, SvgScene};
