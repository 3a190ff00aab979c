//! Diagonal contours: a fading stack of two-peak roofline paths.

use serde::{Deserialize, Serialize};

use super::util;
use crate::context::GlobalState;
use crate::error::BrandloomResult;
use crate::geometry::Point;
use crate::scene::{Group, Node, StrokeNode};

/// Lines never fade below this opacity.
const MIN_OPACITY: f64 = 0.1;

/// Parameters for [`generate_diagonal_contours`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagonalContoursParams {
    pub line_count: u32,
    pub gap_between_lines: f64,
    /// Slope of every segment, in degrees.
    pub slope_angle: f64,
    /// First peak as a fraction of the inner width.
    pub peak_position: f64,
    /// Second peak as a fraction of the inner width.
    pub peak_position2: f64,
    pub peak_height1: f64,
    pub peak_height2: f64,
    pub start_height: f64,
    pub end_height: f64,
    /// Horizontal shift per pixel of vertical offset.
    pub skew_factor: f64,
    /// 1 keeps the endpoints on the padding edges; larger values push them out.
    pub line_length: f64,
    pub opacity_step: f64,
}

impl Default for DiagonalContoursParams {
    fn default() -> Self {
        Self {
            line_count: 50,
            gap_between_lines: 40.0,
            slope_angle: 10.0,
            peak_position: 0.25,
            peak_position2: 0.70,
            peak_height1: 200.0,
            peak_height2: -100.0,
            start_height: 10.0,
            end_height: 200.0,
            skew_factor: 0.0,
            line_length: 1.0,
            opacity_step: 0.007,
        }
    }
}

impl DiagonalContoursParams {
    pub fn validate(&self) -> BrandloomResult<()> {
        util::non_negative("gapBetweenLines", self.gap_between_lines)?;
        util::in_range("slopeAngle", self.slope_angle, -89.0, 89.0)?;
        util::unit_interval("peakPosition", self.peak_position)?;
        util::unit_interval("peakPosition2", self.peak_position2)?;
        for (name, value) in [
            ("peakHeight1", self.peak_height1),
            ("peakHeight2", self.peak_height2),
            ("startHeight", self.start_height),
            ("endHeight", self.end_height),
            ("skewFactor", self.skew_factor),
        ] {
            util::finite(name, value)?;
        }
        util::non_negative("lineLength", self.line_length)?;
        util::non_negative("opacityStep", self.opacity_step)?;
        Ok(())
    }
}

/// The four points of contour line `i`: left edge, first peak, second peak,
/// right edge.
pub fn contour_points(params: &DiagonalContoursParams, globals: &GlobalState, i: u32) -> [Point; 4] {
    let canvas = &globals.canvas;
    let (width, padding) = (canvas.width, canvas.padding);
    let inner_width = width - 2.0 * padding;

    let peak_x1 = padding + params.peak_position * inner_width;
    let peak_x2 = padding + params.peak_position2 * inner_width;
    let rise = params.slope_angle.to_radians().tan();

    let offset = i as f64 * params.gap_between_lines;
    let skew = params.skew_factor * offset;
    let extension = (params.line_length - 1.0) * width / 2.0;

    let left_y = padding + offset + params.start_height;
    let peak1_y = left_y + (peak_x1 - padding) * rise + params.peak_height1;
    let peak2_y = peak1_y + (peak_x2 - peak_x1).abs() * rise + params.peak_height2;
    let right_y = peak2_y + (width - padding - peak_x2) * rise + params.end_height;

    [
        Point::new(padding + skew - extension, left_y),
        Point::new(peak_x1 + skew, peak1_y),
        Point::new(peak_x2 + skew, peak2_y),
        Point::new(width - padding + skew + extension, right_y),
    ]
}

/// Opacity of line `i`: a linear fade with a floor.
#[inline]
pub fn contour_opacity(params: &DiagonalContoursParams, i: u32) -> f64 {
    (1.0 - i as f64 * params.opacity_step).max(MIN_OPACITY)
}

/// Generate the contour stack, one path per line.
pub fn generate_diagonal_contours(params: &DiagonalContoursParams, globals: &GlobalState) -> Group {
    let lines: Vec<Node> = (0..params.line_count)
        .map(|i| {
            let stroke = StrokeNode::new(
                contour_points(params, globals, i).to_vec(),
                globals.brand.foreground,
                globals.line_weight,
            )
            .with_opacity(contour_opacity(params, i));
            Node::Path(stroke)
        })
        .collect();

    if lines.is_empty() {
        tracing::warn!("diagonal contours produced no lines");
    }
    Group::with_children(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat() -> DiagonalContoursParams {
        DiagonalContoursParams {
            line_count: 3,
            gap_between_lines: 10.0,
            slope_angle: 0.0,
            peak_position: 0.25,
            peak_position2: 0.75,
            peak_height1: 0.0,
            peak_height2: 0.0,
            start_height: 0.0,
            end_height: 0.0,
            skew_factor: 0.0,
            line_length: 1.0,
            opacity_step: 0.5,
        }
    }

    #[test]
    fn flat_lines_are_horizontal() {
        let globals = GlobalState::with_canvas(200.0, 200.0, 0.0);
        let pts = contour_points(&flat(), &globals, 2);
        assert!(pts.iter().all(|p| (p.y - 20.0).abs() < 1e-9));
        assert_eq!(pts[0].x, 0.0);
        assert_eq!(pts[1].x, 50.0);
        assert_eq!(pts[2].x, 150.0);
        assert_eq!(pts[3].x, 200.0);
    }

    #[test]
    fn slope_accumulates_along_the_line() {
        let params = DiagonalContoursParams {
            slope_angle: 45.0,
            ..flat()
        };
        let globals = GlobalState::with_canvas(200.0, 200.0, 0.0);
        let pts = contour_points(&params, &globals, 0);
        // tan(45°) = 1: y climbs one pixel per pixel of x.
        for p in pts {
            assert!((p.y - p.x).abs() < 1e-9, "{p:?}");
        }
    }

    #[test]
    fn line_length_extends_endpoints_symmetrically() {
        let params = DiagonalContoursParams {
            line_length: 1.5,
            ..flat()
        };
        let globals = GlobalState::with_canvas(200.0, 200.0, 0.0);
        let pts = contour_points(&params, &globals, 0);
        assert!((pts[0].x + 50.0).abs() < 1e-9);
        assert!((pts[3].x - 250.0).abs() < 1e-9);
        assert_eq!(pts[1].x, 50.0, "peaks do not move");
    }

    #[test]
    fn opacity_fades_to_a_floor() {
        let params = flat();
        assert_eq!(contour_opacity(&params, 0), 1.0);
        assert_eq!(contour_opacity(&params, 1), 0.5);
        assert_eq!(contour_opacity(&params, 2), MIN_OPACITY);
        assert_eq!(contour_opacity(&params, 40), MIN_OPACITY);
    }

    #[test]
    fn emits_one_path_per_line() {
        let globals = GlobalState::default();
        let group = generate_diagonal_contours(&DiagonalContoursParams::default(), &globals);
        assert_eq!(group.children.len(), 50);
        for node in &group.children {
            let Node::Path(stroke) = node else {
                panic!("expected path");
            };
            assert_eq!(stroke.points.len(), 4);
            assert_eq!(stroke.stroke, globals.brand.foreground);
            assert_eq!(stroke.stroke_width, globals.line_weight);
        }
    }

    #[test]
    fn skew_shifts_later_lines() {
        let params = DiagonalContoursParams {
            skew_factor: 0.5,
            ..flat()
        };
        let globals = GlobalState::with_canvas(200.0, 200.0, 0.0);
        let first = contour_points(&params, &globals, 0);
        let third = contour_points(&params, &globals, 2);
        assert!((third[1].x - first[1].x - 10.0).abs() < 1e-9);
    }
}
