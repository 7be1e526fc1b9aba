//! Grid geometry and animation timing constants.

use crate::error::VisError;
use nalgebra::Point2;

/// Pixel geometry and playback timing for a scene.
///
/// `move_step()` is the pixel distance between adjacent cell origins
/// (cell plus gutter); robots are positioned at cell centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Pixel size of a grid cell
    pub cell_size: f64,

    /// Pixel gap between adjacent cells
    pub cell_space: f64,

    /// Seconds of animation per unit of move cost; also the per-frame
    /// scheduling interval
    pub speed: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            cell_space: 3.0,
            speed: 0.5,
        }
    }
}

impl GridConfig {
    /// Checks that the timing values are usable.
    ///
    /// Speed feeds `Duration` arithmetic in the scheduler, so a negative,
    /// NaN or infinite value must be rejected here rather than panic there.
    pub fn validate(&self) -> Result<(), VisError> {
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(VisError::InvalidSpeed(self.speed));
        }
        Ok(())
    }

    /// Pixel step per grid unit.
    pub fn move_step(&self) -> f64 {
        self.cell_size + self.cell_space
    }

    /// Pixel center of the cell at (row, col).
    ///
    /// x follows columns, y follows rows; SVG y grows downward, matching
    /// the row ordering of the map.
    pub fn cell_center(&self, row: i32, col: i32) -> Point2<f64> {
        Point2::new(
            col as f64 * self.move_step() + self.cell_size / 2.0,
            row as f64 * self.move_step() + self.cell_size / 2.0,
        )
    }

    /// Transition duration in seconds for a step with the given move cost.
    pub fn transition_secs(&self, move_cost: u32) -> f64 {
        self.speed * move_cost as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_constants() {
        let cfg = GridConfig::default();
        assert_relative_eq!(cfg.move_step(), 33.0);
        assert_relative_eq!(cfg.transition_secs(2), 1.0);
    }

    #[test]
    fn test_validate_speed() {
        assert!(GridConfig::default().validate().is_ok());

        let zero = GridConfig {
            speed: 0.0,
            ..GridConfig::default()
        };
        assert!(zero.validate().is_ok());

        let negative = GridConfig {
            speed: -0.5,
            ..GridConfig::default()
        };
        assert!(matches!(
            negative.validate().unwrap_err(),
            VisError::InvalidSpeed(_)
        ));

        let nan = GridConfig {
            speed: f64::NAN,
            ..GridConfig::default()
        };
        assert!(nan.validate().is_err());

        let infinite = GridConfig {
            speed: f64::INFINITY,
            ..GridConfig::default()
        };
        assert!(infinite.validate().is_err());
    }

    #[test]
    fn test_cell_center_affine_map() {
        let cfg = GridConfig::default();
        let p = cfg.cell_center(0, 0);
        assert_relative_eq!(p.x, 15.0);
        assert_relative_eq!(p.y, 15.0);

        // x = col*MOVE + CELL_SIZE/2, y = row*MOVE + CELL_SIZE/2
        let p = cfg.cell_center(2, 5);
        assert_relative_eq!(p.x, 5.0 * 33.0 + 15.0);
        assert_relative_eq!(p.y, 2.0 * 33.0 + 15.0);
    }
}
