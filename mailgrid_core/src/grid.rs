//! Grid map model: directions, positions, cells.
//!
//! Maps are loaded from the simulator's JSON format: a rectangular `cells`
//! matrix plus a `span` value (the simulator's mail-generation interval,
//! kept for file fidelity but unused by rendering).

use crate::error::VisError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A robot facing direction on the grid.
///
/// The numeric values match the record encoding: rotation by
/// `-90 * value` degrees maps Up to the top of the SVG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Left = 1,
    Down = 2,
    Right = 3,
}

impl Direction {
    /// The direction's wire encoding in [0,4).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Number of 90-degree turns needed to rotate from `a` to `b`.
    pub fn turn_count(a: Direction, b: Direction) -> u8 {
        match (a.index() as i8 - b.index() as i8).abs() {
            0 => 0,
            1 => 1,
            2 => 2,
            3 => 1,
            _ => unreachable!("direction indices are in [0,4)"),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = VisError;

    fn try_from(value: u8) -> Result<Self, VisError> {
        match value {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Left),
            2 => Ok(Direction::Down),
            3 => Ok(Direction::Right),
            _ => Err(VisError::malformed(format!(
                "orientation {} not in [0,4)",
                value
            ))),
        }
    }
}

/// A cell position on the grid (row, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub row: i32,
    pub col: i32,
}

impl GridPosition {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// One cell of the map, as stored in the map JSON.
///
/// Cells default to free and unmarked; `inputId`/`outputId`/`chargeId`
/// tag the special stations of the sorting floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellSpec {
    /// Whether robots may occupy this cell; walls are `free = false`
    #[serde(default = "default_free")]
    pub free: bool,

    /// Mail input station id, if any
    #[serde(default)]
    pub input_id: Option<u32>,

    /// Mail output (destination) station id, if any
    #[serde(default)]
    pub output_id: Option<u32>,

    /// Charging station id, if any
    #[serde(default)]
    pub charge_id: Option<u32>,
}

fn default_free() -> bool {
    true
}

impl Default for CellSpec {
    fn default() -> Self {
        Self {
            free: true,
            input_id: None,
            output_id: None,
            charge_id: None,
        }
    }
}

/// On-disk map document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapFile {
    cells: Vec<Vec<CellSpec>>,
    #[serde(default)]
    span: f64,
}

/// A validated rectangular grid map.
#[derive(Debug, Clone)]
pub struct GridMap {
    cells: Vec<Vec<CellSpec>>,

    rows: usize,
    cols: usize,

    /// Simulator's mail-generation interval, carried from the map file
    pub span: f64,

    inputs: BTreeMap<u32, GridPosition>,
    outputs: BTreeMap<u32, GridPosition>,
    charges: BTreeMap<u32, GridPosition>,
}

impl GridMap {
    /// Builds a map from a cell matrix, validating that it is a non-empty
    /// rectangle and indexing the station cells.
    pub fn new(cells: Vec<Vec<CellSpec>>, span: f64) -> Result<Self, VisError> {
        let rows = cells.len();
        if rows == 0 {
            return Err(VisError::NotRectangular {
                row: 0,
                found: 0,
                expected: 1,
            });
        }
        let cols = cells[0].len();
        if cols == 0 {
            return Err(VisError::NotRectangular {
                row: 0,
                found: 0,
                expected: 1,
            });
        }

        let mut inputs = BTreeMap::new();
        let mut outputs = BTreeMap::new();
        let mut charges = BTreeMap::new();
        for (row, line) in cells.iter().enumerate() {
            if line.len() != cols {
                return Err(VisError::NotRectangular {
                    row,
                    found: line.len(),
                    expected: cols,
                });
            }
            for (col, cell) in line.iter().enumerate() {
                let pos = GridPosition::new(row as i32, col as i32);
                if let Some(id) = cell.input_id {
                    inputs.insert(id, pos);
                }
                if let Some(id) = cell.output_id {
                    outputs.insert(id, pos);
                }
                if let Some(id) = cell.charge_id {
                    charges.insert(id, pos);
                }
            }
        }

        Ok(Self {
            cells,
            rows,
            cols,
            span,
            inputs,
            outputs,
            charges,
        })
    }

    /// Loads a map from a JSON file (`{cells, span}`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VisError> {
        let file = File::open(path)?;
        let map_file: MapFile = serde_json::from_reader(BufReader::new(file))?;
        Self::new(map_file.cells, map_file.span)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the position lies within the map bounds.
    pub fn has(&self, pos: GridPosition) -> bool {
        pos.row >= 0
            && (pos.row as usize) < self.rows
            && pos.col >= 0
            && (pos.col as usize) < self.cols
    }

    /// The cell at the given position, or an out-of-map error.
    pub fn get(&self, pos: GridPosition) -> Result<&CellSpec, VisError> {
        if !self.has(pos) {
            return Err(VisError::PositionOutOfMap {
                row: pos.row,
                col: pos.col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(&self.cells[pos.row as usize][pos.col as usize])
    }

    /// Input station positions keyed by station id.
    pub fn inputs(&self) -> &BTreeMap<u32, GridPosition> {
        &self.inputs
    }

    /// Output station positions keyed by station id.
    pub fn outputs(&self) -> &BTreeMap<u32, GridPosition> {
        &self.outputs
    }

    /// Charging station positions keyed by station id.
    pub fn charges(&self) -> &BTreeMap<u32, GridPosition> {
        &self.charges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell() -> CellSpec {
        CellSpec::default()
    }

    #[test]
    fn test_direction_round_trip() {
        for value in 0u8..4 {
            let dir = Direction::try_from(value).unwrap();
            assert_eq!(dir.index(), value);
        }
        assert!(Direction::try_from(4).is_err());
    }

    #[test]
    fn test_turn_count() {
        assert_eq!(Direction::turn_count(Direction::Up, Direction::Up), 0);
        assert_eq!(Direction::turn_count(Direction::Up, Direction::Left), 1);
        assert_eq!(Direction::turn_count(Direction::Up, Direction::Down), 2);
        // wrap-around: Up vs Right is a single turn, not three
        assert_eq!(Direction::turn_count(Direction::Up, Direction::Right), 1);
        assert_eq!(Direction::turn_count(Direction::Right, Direction::Up), 1);
    }

    #[test]
    fn test_map_rejects_ragged_rows() {
        let cells = vec![vec![cell(), cell()], vec![cell()]];
        let err = GridMap::new(cells, 0.0).unwrap_err();
        assert!(matches!(
            err,
            VisError::NotRectangular {
                row: 1,
                found: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn test_map_rejects_empty() {
        assert!(GridMap::new(vec![], 0.0).is_err());
        assert!(GridMap::new(vec![vec![]], 0.0).is_err());
    }

    #[test]
    fn test_map_indexes_stations() {
        let mut input = cell();
        input.input_id = Some(7);
        let mut output = cell();
        output.output_id = Some(2);
        let map = GridMap::new(vec![vec![input, cell()], vec![cell(), output]], 10.0).unwrap();

        assert_eq!(map.rows(), 2);
        assert_eq!(map.cols(), 2);
        assert_eq!(map.inputs()[&7], GridPosition::new(0, 0));
        assert_eq!(map.outputs()[&2], GridPosition::new(1, 1));
        assert!(map.charges().is_empty());
    }

    #[test]
    fn test_map_bounds() {
        let map = GridMap::new(vec![vec![cell()]], 0.0).unwrap();
        assert!(map.has(GridPosition::new(0, 0)));
        assert!(!map.has(GridPosition::new(-1, 0)));
        assert!(!map.has(GridPosition::new(0, 1)));
        assert!(map.get(GridPosition::new(1, 0)).is_err());
    }

    #[test]
    fn test_cell_json_defaults() {
        let cell: CellSpec = serde_json::from_str("{}").unwrap();
        assert!(cell.free);
        assert!(cell.input_id.is_none());

        let cell: CellSpec = serde_json::from_str(r#"{"free": false}"#).unwrap();
        assert!(!cell.free);

        let cell: CellSpec = serde_json::from_str(r#"{"inputId": 3}"#).unwrap();
        assert_eq!(cell.input_id, Some(3));
    }
}
