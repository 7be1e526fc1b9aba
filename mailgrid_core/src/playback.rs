//! Playback driver: replays record frames onto robot visuals.
//!
//! Each robot carries an unbounded orientation counter. Only the counter's
//! value mod 4 is compared against the record, but the raw counter is what
//! gets rendered (`rotate(-90 * counter)`), so a robot that keeps turning
//! the same way accumulates rotation monotonically instead of snapping
//! back at the 0/3 boundary.

use crate::config::GridConfig;
use crate::error::VisError;
use crate::record::Record;
use nalgebra::Point2;

/// A caller-owned visual handle for one robot.
///
/// The driver never creates or destroys visuals; it only mutates them.
/// Implementations must route `set_mail_transition` to the nested mail
/// sub-element so the mail indicator animates with the robot body.
pub trait RobotVisual {
    /// Sets the CSS-style transition duration on the robot body.
    fn set_transition(&mut self, seconds: f64);

    /// Sets the transition duration on the nested mail sub-element.
    fn set_mail_transition(&mut self, seconds: f64);

    /// Moves the robot to a pixel position with the given rotation.
    fn set_transform(&mut self, center: Point2<f64>, rotate_deg: f64);

    /// Shows or hides the mail indicator.
    fn set_mail(&mut self, carrying: bool);
}

/// Normalizes an unbounded counter into a facing index in [0,4).
pub fn normalize_mod4(value: i64) -> u8 {
    value.rem_euclid(4) as u8
}

/// The signed counter adjustment that rotates `current` to `target`
/// through the shortest arc: one of 0, +1, -1, +2.
///
/// Both arguments are normalized facings in [0,4). The +1/-1 cases are
/// mutually exclusive (targets at +1 and +3 differ), and +2 is used only
/// for an exact 180-degree turn.
pub fn turn_delta(current: u8, target: u8) -> i64 {
    match (target + 4 - current) % 4 {
        1 => 1,
        3 => -1,
        2 => 2,
        _ => 0,
    }
}

/// Owned playback state: the robot visuals plus their orientation counters.
#[derive(Debug)]
pub struct PlaybackState<V: RobotVisual> {
    visuals: Vec<V>,

    /// Unbounded by design; see the module docs
    counters: Vec<i64>,
}

impl<V: RobotVisual> PlaybackState<V> {
    /// Builds playback state from a record and one visual per robot.
    ///
    /// Counters are seeded from frame 0's orientation, raw (a seed of 3
    /// stays 3, it is not folded to -1).
    pub fn new(record: &Record, visuals: Vec<V>) -> Result<Self, VisError> {
        let frame0 = record.frame(0)?;
        if visuals.len() != frame0.len() {
            return Err(VisError::VisualCountMismatch {
                visuals: visuals.len(),
                robots: frame0.len(),
            });
        }
        let counters = frame0
            .robots()
            .iter()
            .map(|state| state.orientation.index() as i64)
            .collect();
        Ok(Self { visuals, counters })
    }

    /// Applies one frame of the record to the visuals.
    ///
    /// Robots whose move cost is zero this frame are skipped entirely:
    /// no position, rotation, mail, or transition update.
    pub fn advance(
        &mut self,
        record: &Record,
        frame_index: usize,
        config: &GridConfig,
    ) -> Result<(), VisError> {
        let frame = record.frame(frame_index)?;
        for (index, state) in frame.robots().iter().enumerate() {
            if state.move_cost == 0 {
                continue;
            }
            let visual = self
                .visuals
                .get_mut(index)
                .ok_or(VisError::UnknownRobot(index))?;

            let current = normalize_mod4(self.counters[index]);
            let target = state.orientation.index();
            self.counters[index] += turn_delta(current, target);

            let seconds = config.transition_secs(state.move_cost);
            visual.set_transition(seconds);
            visual.set_mail_transition(seconds);
            visual.set_transform(
                config.cell_center(state.row, state.col),
                (-90 * self.counters[index]) as f64,
            );
            visual.set_mail(state.has_mail);
        }
        Ok(())
    }

    /// Current orientation counters, one per robot.
    pub fn counters(&self) -> &[i64] {
        &self.counters
    }

    /// The visuals, for rendering the current scene state.
    pub fn visuals(&self) -> &[V] {
        &self.visuals
    }

    /// Consumes the state, returning the visuals.
    pub fn into_visuals(self) -> Vec<V> {
        self.visuals
    }
}
