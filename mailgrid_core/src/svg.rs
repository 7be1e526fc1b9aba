//! SVG scene rendering.
//!
//! Produces the self-contained HTML page the simulator's visualizer used
//! to emit: a grid of cell rects plus one `<g class="robot">` group per
//! robot. `SvgRobot` implements [`RobotVisual`], so the playback driver
//! mutates the same attributes that end up in the rendered page.

use crate::config::GridConfig;
use crate::grid::{GridMap, GridPosition};
use crate::playback::RobotVisual;
use crate::record::Record;
use nalgebra::Point2;
use std::fmt::Write as _;

/// An SVG robot group: body, mail indicator, and two wheel rects.
#[derive(Debug, Clone)]
pub struct SvgRobot {
    id: usize,
    transform: String,
    style: String,
    mail_style: String,
    mail: bool,
}

impl SvgRobot {
    /// Creates a robot group at a pixel position with an initial facing.
    pub fn new(id: usize, center: Point2<f64>, rotate_deg: f64, mail: bool) -> Self {
        let mut robot = Self {
            id,
            transform: String::new(),
            style: String::new(),
            mail_style: String::new(),
            mail,
        };
        robot.set_transform(center, rotate_deg);
        robot
    }

    /// The robot's stable integer id (`rN` in the document).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Whether the mail indicator is shown.
    pub fn mail(&self) -> bool {
        self.mail
    }

    /// The current transform attribute value.
    pub fn transform(&self) -> &str {
        &self.transform
    }

    fn render(&self, out: &mut String) {
        let _ = write!(
            out,
            r#"<g class="robot" id="r{}" transform="{}" mail="{}""#,
            self.id, self.transform, self.mail
        );
        if !self.style.is_empty() {
            let _ = write!(out, r#" style="{}""#, self.style);
        }
        out.push_str(">\n");
        out.push_str(r#"    <rect width="20" height="20" x="-10" y="-10" />"#);
        out.push('\n');
        let _ = write!(
            out,
            r#"    <rect class="mail" width="10" height="10" x="-5" y="-5""#
        );
        if !self.mail_style.is_empty() {
            let _ = write!(out, r#" style="{}""#, self.mail_style);
        }
        out.push_str(" />\n");
        out.push_str(r#"    <rect width="3" height="8" x="-14" y="2" />"#);
        out.push('\n');
        out.push_str(r#"    <rect width="3" height="8" x="11" y="2" />"#);
        out.push('\n');
        out.push_str("</g>\n");
    }
}

impl RobotVisual for SvgRobot {
    fn set_transition(&mut self, seconds: f64) {
        self.style = format!("transition: {}s", seconds);
    }

    fn set_mail_transition(&mut self, seconds: f64) {
        self.mail_style = format!("transition: {}s", seconds);
    }

    fn set_transform(&mut self, center: Point2<f64>, rotate_deg: f64) {
        self.transform = format!(
            "translate({},{}) rotate({})",
            center.x, center.y, rotate_deg
        );
    }

    fn set_mail(&mut self, carrying: bool) {
        self.mail = carrying;
    }
}

/// A renderable scene: grid extent, optional map background, geometry.
#[derive(Debug, Clone)]
pub struct SvgScene {
    map: Option<GridMap>,
    rows: usize,
    cols: usize,
    config: GridConfig,
}

impl SvgScene {
    /// Builds a scene over a loaded map.
    pub fn from_map(map: GridMap, config: GridConfig) -> Self {
        let rows = map.rows();
        let cols = map.cols();
        Self {
            map: Some(map),
            rows,
            cols,
            config,
        }
    }

    /// Builds a scene without a map, sized to cover every position the
    /// record visits.
    pub fn from_record(record: &Record, config: GridConfig) -> Self {
        let mut rows = 1;
        let mut cols = 1;
        let states = record
            .init
            .iter()
            .chain(record.data.iter().flat_map(|frame| frame.robots().iter()));
        for state in states {
            rows = rows.max(state.row.max(0) as usize + 1);
            cols = cols.max(state.col.max(0) as usize + 1);
        }
        Self {
            map: None,
            rows,
            cols,
            config,
        }
    }

    /// One robot group per record robot, placed at its initial state.
    pub fn spawn_robots(&self, record: &Record) -> Vec<SvgRobot> {
        record
            .init
            .iter()
            .enumerate()
            .map(|(id, state)| {
                SvgRobot::new(
                    id,
                    self.config.cell_center(state.row, state.col),
                    (-90 * state.orientation.index() as i64) as f64,
                    state.has_mail,
                )
            })
            .collect()
    }

    /// Grid extent as (rows, cols).
    pub fn extent(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn cell_class(&self, row: usize, col: usize) -> &'static str {
        let Some(map) = &self.map else {
            return "cell";
        };
        let pos = GridPosition::new(row as i32, col as i32);
        match map.get(pos) {
            Ok(cell) if !cell.free => "cell wall",
            Ok(cell) if cell.input_id.is_some() => "cell input",
            Ok(cell) if cell.output_id.is_some() => "cell output",
            _ => "cell",
        }
    }

    fn render_style(&self, out: &mut String) {
        let _ = write!(
            out,
            "<style>\n\
             rect.cell {{ width: {size}px; height: {size}px; }}\n\
             .cell {{ fill: rgb(160, 160, 160); }}\n\
             .wall {{ fill: red; }}\n\
             .input {{ fill: rgb(77, 207, 77); }}\n\
             .output {{ fill: rgb(255, 255, 110); }}\n\
             .robot {{ fill: blue; }}\n\
             .robot .mail {{ fill: red; opacity: 1; }}\n\
             .robot[mail=\"false\"] .mail {{ opacity: 0; }}\n\
             </style>\n",
            size = self.config.cell_size
        );
    }

    fn render_cells(&self, out: &mut String) {
        let step = self.config.move_step();
        out.push_str("<g>\n");
        for row in 0..self.rows {
            for col in 0..self.cols {
                let _ = writeln!(
                    out,
                    r#"<rect x="{}" y="{}" class="{}" />"#,
                    col as f64 * step,
                    row as f64 * step,
                    self.cell_class(row, col)
                );
            }
        }
        out.push_str("</g>\n");
    }

    /// Renders the complete HTML page for the given robot states.
    pub fn render_html(&self, robots: &[SvgRobot]) -> String {
        let step = self.config.move_step();
        let mut out = String::new();
        out.push_str("<head>\n");
        self.render_style(&mut out);
        out.push_str("</head>\n<body>\n");
        let _ = writeln!(
            out,
            r#"<svg width="{}px" height="{}px">"#,
            self.cols as f64 * step,
            self.rows as f64 * step
        );
        self.render_cells(&mut out);
        for robot in robots {
            robot.render(&mut out);
        }
        out.push_str("</svg>\n</body>\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellSpec;
    use crate::record::Record;

    const SAMPLE: &str = r#"{
        "init": [[0, 0, 0, 1, true], [0, 2, 3, 0, false]],
        "data": [[[0, 0, 0, 1, true], [0, 2, 3, 0, false]]]
    }"#;

    fn scene() -> (SvgScene, Record) {
        let record = Record::from_json(SAMPLE).unwrap();
        let scene = SvgScene::from_record(&record, GridConfig::default());
        (scene, record)
    }

    #[test]
    fn test_extent_from_record() {
        let (scene, _) = scene();
        assert_eq!(scene.extent(), (3, 4));
    }

    #[test]
    fn test_spawn_robots_initial_state() {
        let (scene, record) = scene();
        let robots = scene.spawn_robots(&record);
        assert_eq!(robots.len(), 2);
        assert_eq!(robots[0].id(), 0);
        assert!(robots[0].mail());
        assert_eq!(robots[0].transform(), "translate(15,15) rotate(-90)");
        assert!(!robots[1].mail());
    }

    #[test]
    fn test_visual_mutation_shows_in_render() {
        let (scene, record) = scene();
        let mut robots = scene.spawn_robots(&record);
        robots[0].set_transition(1.5);
        robots[0].set_mail_transition(1.5);
        robots[0].set_transform(Point2::new(48.0, 15.0), 90.0);
        robots[0].set_mail(false);

        let html = scene.render_html(&robots);
        assert!(html.contains(r#"id="r0""#));
        assert!(html.contains(r#"transform="translate(48,15) rotate(90)""#));
        assert!(html.contains(r#"style="transition: 1.5s""#));
        assert!(html.contains(r#"mail="false""#));
    }

    #[test]
    fn test_render_grid_and_style() {
        let (scene, record) = scene();
        let html = scene.render_html(&scene.spawn_robots(&record));
        assert!(html.contains(r#"<svg width="132px" height="99px">"#));
        assert!(html.contains(r#".robot[mail="false"] .mail { opacity: 0; }"#));
        // 3x4 grid of cells
        assert_eq!(html.matches(r#"class="cell""#).count(), 12);
    }

    #[test]
    fn test_map_cell_classes() {
        let wall = CellSpec {
            free: false,
            ..CellSpec::default()
        };
        let input = CellSpec {
            input_id: Some(0),
            ..CellSpec::default()
        };
        let charge = CellSpec {
            charge_id: Some(0),
            ..CellSpec::default()
        };
        let map = GridMap::new(vec![vec![wall, input, charge]], 0.0).unwrap();
        let scene = SvgScene::from_map(map, GridConfig::default());

        assert_eq!(scene.extent(), (1, 3));
        let html = scene.render_html(&[]);
        assert!(html.contains(r#"class="cell wall""#));
        assert!(html.contains(r#"class="cell input""#));
        // charge stations have no dedicated styling, they render as plain cells
        assert!(html.contains(r#"class="cell""#));
        assert!(!html.contains("charge"));
    }
}
