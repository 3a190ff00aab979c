//! Multidimensional line of sight: an angular fold of three-point polylines.
//!
//! Every line runs start → corner peak → end. The first phase of lines walks
//! down and to the left toward the fold; the second phase walks down and to
//! the right away from it. Vertical steps come from a fixed reference line
//! count so changing `line_count` only changes how far the stack reaches,
//! never its angle.

use serde::{Deserialize, Serialize};

use super::util;
use crate::color::{self, Color};
use crate::context::GlobalState;
use crate::error::BrandloomResult;
use crate::geometry::Point;
use crate::scene::{Group, Node, StrokeNode};

/// Share of the lines that belong to the first phase.
pub const FOLD_RATIO: f64 = 0.42;

/// Line count the vertical steps are calibrated against.
pub const REFERENCE_LINE_COUNT: u32 = 42;

// Horizontal lever of each point (start, peak, end) per unit of offset.
const PHASE1_LEVERS: [f64; 3] = [0.8, 0.55, 0.5];
const PHASE2_LEVERS: [f64; 3] = [0.47, 0.72, 0.76];

/// Index of the last first-phase line for `line_count` lines.
#[inline]
pub fn fold_index(line_count: u32) -> u32 {
    (line_count as f64 * FOLD_RATIO).floor() as u32
}

/// Parameters for [`generate_line_of_sight`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineOfSightParams {
    pub line_count: u32,
    pub gap_between_lines: f64,
    pub master_position_x: f64,
    pub master_position_y: f64,
    /// Uniform scale about the canvas center.
    pub master_position_z: f64,
    pub corner_position_x: f64,
    pub corner_position_y: f64,
    pub first_line_y: f64,
    pub fold_line_y: f64,
    pub last_line_y: f64,
    /// Phase one recession angle, degrees.
    pub left_angle: f64,
    /// Phase two advance angle, degrees.
    pub right_angle: f64,
    /// Multiplier on each endpoint's distance from the peak.
    pub line_extension: f64,
    pub stroke_width_min: f64,
    pub stroke_width_max: f64,
    pub use_gradient: bool,
    /// Gradient start; brand foreground when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_color_from: Option<Color>,
    /// Gradient end; brand background when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_color_to: Option<Color>,
}

impl Default for LineOfSightParams {
    fn default() -> Self {
        Self {
            line_count: 52,
            gap_between_lines: 12.0,
            master_position_x: 0.45,
            master_position_y: 0.55,
            master_position_z: 1.0,
            corner_position_x: 0.42,
            corner_position_y: 0.14,
            first_line_y: 0.40,
            fold_line_y: 0.52,
            last_line_y: 0.73,
            left_angle: 37.0,
            right_angle: 57.0,
            line_extension: 1.0,
            stroke_width_min: 0.5,
            stroke_width_max: 2.0,
            use_gradient: true,
            gradient_color_from: None,
            gradient_color_to: None,
        }
    }
}

impl LineOfSightParams {
    pub fn validate(&self) -> BrandloomResult<()> {
        util::non_negative("gapBetweenLines", self.gap_between_lines)?;
        for (name, value) in [
            ("masterPositionX", self.master_position_x),
            ("masterPositionY", self.master_position_y),
            ("cornerPositionX", self.corner_position_x),
            ("cornerPositionY", self.corner_position_y),
            ("firstLineY", self.first_line_y),
            ("foldLineY", self.fold_line_y),
            ("lastLineY", self.last_line_y),
        ] {
            util::unit_interval(name, value)?;
        }
        util::in_range("masterPositionZ", self.master_position_z, 0.01, 10.0)?;
        util::in_range("leftAngle", self.left_angle, -89.0, 89.0)?;
        util::in_range("rightAngle", self.right_angle, -89.0, 89.0)?;
        util::in_range("lineExtension", self.line_extension, 0.01, 10.0)?;
        util::non_negative("strokeWidthMin", self.stroke_width_min)?;
        util::non_negative("strokeWidthMax", self.stroke_width_max)?;
        Ok(())
    }
}

/// Vertical placement of every line.
///
/// Phase one steps from the first line toward the fold line, phase two from
/// the fold onward toward the last line. Both steps are measured against
/// [`REFERENCE_LINE_COUNT`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldLayout {
    pub fold_index: u32,
    pub first_y: f64,
    pub phase1_step: f64,
    pub phase2_step: f64,
}

impl FoldLayout {
    pub fn new(line_count: u32, first_y: f64, fold_y: f64, last_y: f64) -> Self {
        let reference_fold = fold_index(REFERENCE_LINE_COUNT);
        let reference_tail = REFERENCE_LINE_COUNT - reference_fold - 1;
        Self {
            fold_index: fold_index(line_count),
            first_y,
            phase1_step: (fold_y - first_y) / reference_fold as f64,
            phase2_step: (last_y - fold_y) / reference_tail as f64,
        }
    }

    /// Y of line `i` under the phase one formula.
    #[inline]
    pub fn phase1_y(&self, i: u32) -> f64 {
        self.first_y + i as f64 * self.phase1_step
    }

    /// Y of line `i` under the phase two formula, continuing from where
    /// phase one leaves the fold line.
    #[inline]
    pub fn phase2_y(&self, i: u32) -> f64 {
        self.phase1_y(self.fold_index) + (i as f64 - self.fold_index as f64) * self.phase2_step
    }

    #[inline]
    pub fn is_phase1(&self, i: u32) -> bool {
        i <= self.fold_index
    }

    pub fn y(&self, i: u32) -> f64 {
        if self.is_phase1(i) {
            self.phase1_y(i)
        } else {
            self.phase2_y(i)
        }
    }
}

/// Resolved geometry shared by every line of one render.
struct Frame {
    layout: FoldLayout,
    /// Start, peak and end x of the first line.
    bases: [f64; 3],
    peak_offset: f64,
    tan_left: f64,
    tan_right: f64,
    gap: f64,
    extension: f64,
}

impl Frame {
    fn new(params: &LineOfSightParams, globals: &GlobalState) -> Self {
        let canvas = &globals.canvas;
        let (width, padding) = (canvas.width, canvas.padding);
        let inner_width = canvas.inner_width();
        let inner_height = canvas.inner_height();

        let master_x = (params.master_position_x - 0.5) * inner_width;
        let master_y = (params.master_position_y - 0.5) * inner_height;
        let at_y = |fraction: f64| padding + fraction * inner_height;

        let corner_x = padding + params.corner_position_x * inner_width + master_x;

        Self {
            layout: FoldLayout::new(
                params.line_count,
                at_y(params.first_line_y) + master_y,
                at_y(params.fold_line_y) + master_y,
                at_y(params.last_line_y) + master_y,
            ),
            bases: [
                padding * 1.5 + master_x,
                corner_x,
                width - padding * 1.5 + master_x,
            ],
            peak_offset: at_y(params.corner_position_y) - at_y(params.first_line_y),
            tan_left: params.left_angle.to_radians().tan(),
            tan_right: params.right_angle.to_radians().tan(),
            gap: params.gap_between_lines,
            extension: params.line_extension,
        }
    }

    /// Start, peak and end of line `i` before extension.
    fn raw_line(&self, i: u32) -> [Point; 3] {
        let y = self.layout.y(i);
        let fold = self.layout.fold_index;
        let xs: [f64; 3] = if self.layout.is_phase1(i) {
            let offset = i as f64 * self.gap;
            std::array::from_fn(|k| self.bases[k] - offset * self.tan_left * PHASE1_LEVERS[k])
        } else {
            let fold_offset = fold as f64 * self.gap;
            let offset = (i - fold) as f64 * self.gap;
            std::array::from_fn(|k| {
                self.bases[k] - fold_offset * self.tan_left * PHASE1_LEVERS[k]
                    + offset * self.tan_right * PHASE2_LEVERS[k]
            })
        };
        [
            Point::new(xs[0], y),
            Point::new(xs[1], y + self.peak_offset),
            Point::new(xs[2], y),
        ]
    }

    /// Stretch the endpoints away from the peak along their own direction.
    fn extend(&self, [start, peak, end]: [Point; 3]) -> [Point; 3] {
        let e = self.extension;
        let stretch = |p: Point| Point::new(peak.x + (p.x - peak.x) * e, peak.y + (p.y - peak.y) * e);
        [stretch(start), peak, stretch(end)]
    }

    /// Rigid shift that keeps the first line's endpoint midpoint in place
    /// while the extension lever grows.
    fn stabilization_shift(&self) -> (f64, f64) {
        let e = self.extension;
        let factor = if e > 0.0 { (e - 1.0) / e } else { 0.0 };
        let [start, peak, end] = self.raw_line(0);
        let mid = start.midpoint(end);
        (
            -(mid.x - peak.x) * factor * e,
            -(mid.y - peak.y) * factor * e,
        )
    }
}

/// Final points of every line, in draw order.
pub fn line_points(params: &LineOfSightParams, globals: &GlobalState) -> Vec<[Point; 3]> {
    let frame = Frame::new(params, globals);
    let (shift_x, shift_y) = frame.stabilization_shift();
    let center = Point::new(globals.canvas.width / 2.0, globals.canvas.height / 2.0);
    let z = params.master_position_z;

    (0..params.line_count)
        .map(|i| {
            frame
                .extend(frame.raw_line(i))
                .map(|p| p.translate(shift_x, shift_y).scale_about(center, z))
        })
        .collect()
}

/// Generate the fold, one polyline per line.
pub fn generate_line_of_sight(params: &LineOfSightParams, globals: &GlobalState) -> Group {
    let n = params.line_count;
    if n == 0 {
        tracing::warn!("line of sight produced no lines");
        return Group::new();
    }

    let from = params.gradient_color_from.unwrap_or(globals.brand.foreground);
    let to = params.gradient_color_to.unwrap_or(globals.brand.background);
    let z = params.master_position_z;

    let lines: Vec<Node> = line_points(params, globals)
        .into_iter()
        .enumerate()
        .map(|(i, points)| {
            let progress = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
            let width = params.stroke_width_min + progress * (params.stroke_width_max - params.stroke_width_min);
            let stroke = if params.use_gradient {
                color::interpolate(from, to, progress)
            } else {
                globals.brand.foreground
            };
            Node::Polyline(StrokeNode::new(points.to_vec(), stroke, width * z))
        })
        .collect();

    tracing::debug!(lines = lines.len(), fold = fold_index(n), "line of sight laid out");
    Group::with_children(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globals() -> GlobalState {
        GlobalState::with_canvas(1000.0, 1000.0, 40.0)
    }

    #[test]
    fn reference_fold_index() {
        assert_eq!(fold_index(42), 17);
        assert_eq!(fold_index(52), 21);
        assert_eq!(fold_index(1), 0);
    }

    #[test]
    fn no_seam_at_the_fold() {
        let layout = FoldLayout::new(42, 100.0, 400.0, 900.0);
        assert_eq!(layout.fold_index, 17);
        let a = layout.phase1_y(17);
        let b = layout.phase2_y(17);
        assert!((a - b).abs() < 1e-9, "phase one {a} vs phase two {b}");
        assert!((a - 400.0).abs() < 1e-9, "fold line lands on foldLineY");
        assert!((layout.y(41) - 900.0).abs() < 1e-9, "last line lands on lastLineY");
        assert!(layout.is_phase1(17) && !layout.is_phase1(18));
    }

    #[test]
    fn line_count_does_not_change_the_steps() {
        let a = FoldLayout::new(42, 100.0, 400.0, 900.0);
        let b = FoldLayout::new(80, 100.0, 400.0, 900.0);
        assert_eq!(a.phase1_step, b.phase1_step);
        assert_eq!(a.phase2_step, b.phase2_step);
    }

    #[test]
    fn phases_move_in_opposite_directions() {
        let params = LineOfSightParams {
            line_count: 42,
            ..Default::default()
        };
        let lines = line_points(&params, &globals());
        // Phase one recedes left, phase two advances right.
        assert!(lines[5][1].x < lines[0][1].x);
        assert!(lines[30][1].x > lines[17][1].x);
    }

    #[test]
    fn extension_keeps_the_peak_and_the_slope() {
        let base = LineOfSightParams {
            line_count: 10,
            ..Default::default()
        };
        let longer = LineOfSightParams {
            line_extension: 1.8,
            ..base.clone()
        };
        let g = globals();
        let a = line_points(&base, &g);
        let b = line_points(&longer, &g);
        for (la, lb) in a.iter().zip(&b) {
            let slope = |l: &[Point; 3]| (l[0].y - l[1].y) / (l[0].x - l[1].x);
            assert!((slope(la) - slope(lb)).abs() < 1e-9);
            let len_a = la[0].distance(la[1]);
            let len_b = lb[0].distance(lb[1]);
            assert!((len_b / len_a - 1.8).abs() < 1e-9);
        }
    }

    #[test]
    fn stabilization_pins_the_first_line_midpoint() {
        let g = globals();
        let base = LineOfSightParams::default();
        let expected = {
            let l = &line_points(&base, &g)[0];
            l[0].midpoint(l[2])
        };
        for e in [0.5, 1.5, 2.0, 3.0] {
            let params = LineOfSightParams {
                line_extension: e,
                ..base.clone()
            };
            let l = &line_points(&params, &g)[0];
            let mid = l[0].midpoint(l[2]);
            assert!(
                mid.distance(expected) < 1e-9,
                "extension {e}: midpoint moved to {mid:?} from {expected:?}"
            );
        }
    }

    #[test]
    fn master_z_scales_about_the_center() {
        let g = globals();
        let base = LineOfSightParams::default();
        let zoomed = LineOfSightParams {
            master_position_z: 2.0,
            ..base.clone()
        };
        let center = Point::new(500.0, 500.0);
        let a = line_points(&base, &g);
        let b = line_points(&zoomed, &g);
        let p = a[3][1];
        let q = b[3][1];
        assert!((q.x - (center.x + (p.x - center.x) * 2.0)).abs() < 1e-9);
        assert!((q.y - (center.y + (p.y - center.y) * 2.0)).abs() < 1e-9);

        let group = generate_line_of_sight(&zoomed, &g);
        let Node::Polyline(first) = &group.children[0] else {
            panic!("expected polyline");
        };
        assert!((first.stroke_width - 1.0).abs() < 1e-12);
    }

    #[test]
    fn stroke_and_color_ramp_across_the_stack() {
        let g = globals();
        let params = LineOfSightParams::default();
        let group = generate_line_of_sight(&params, &g);
        assert_eq!(group.children.len(), 52);
        let strokes: Vec<&StrokeNode> = group
            .children
            .iter()
            .map(|n| match n {
                Node::Polyline(s) => s,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(strokes[0].stroke, g.brand.foreground);
        assert_eq!(strokes[51].stroke, g.brand.background);
        assert!((strokes[0].stroke_width - 0.5).abs() < 1e-12);
        assert!((strokes[51].stroke_width - 2.0).abs() < 1e-12);
        assert!(strokes.iter().all(|s| s.points.len() == 3));
    }

    #[test]
    fn solid_color_without_gradient() {
        let g = globals();
        let params = LineOfSightParams {
            use_gradient: false,
            ..Default::default()
        };
        let group = generate_line_of_sight(&params, &g);
        for node in &group.children {
            let Node::Polyline(s) = node else { panic!("expected polyline") };
            assert_eq!(s.stroke, g.brand.foreground);
        }
    }

    #[test]
    fn zero_lines_is_empty() {
        let params = LineOfSightParams {
            line_count: 0,
            ..Default::default()
        };
        assert!(generate_line_of_sight(&params, &globals()).is_empty());
    }
}
