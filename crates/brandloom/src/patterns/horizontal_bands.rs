//! Horizontal bands: a stack of full-width stripes with a vertical vignette.

use serde::{Deserialize, Serialize};

use super::util;
use crate::context::GlobalState;
use crate::error::BrandloomResult;
use crate::geometry::Rect;
use crate::rng::Mulberry32;
use crate::scene::{Group, Node, RectNode, Transform};

/// Parameters for [`generate_horizontal_bands`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HorizontalBandsParams {
    pub band_count: u32,
    pub band_thickness: f64,
    pub band_gap: f64,
    /// 0 keeps every band opaque; 1 fades the top and bottom bands out.
    pub vignette_depth: f64,
    /// Whole-pattern rotation in degrees about the canvas center.
    pub tilt_angle: f64,
    /// Seeded thickness jitter as a fraction of `band_thickness`.
    pub thickness_variation: f64,
    /// Seeded gap jitter as a fraction of `band_gap`.
    pub gap_variation: f64,
    /// Seeded vertical displacement in pixels.
    pub y_jitter: f64,
}

impl Default for HorizontalBandsParams {
    fn default() -> Self {
        Self {
            band_count: 40,
            band_thickness: 10.0,
            band_gap: 8.0,
            vignette_depth: 0.4,
            tilt_angle: 0.0,
            thickness_variation: 0.0,
            gap_variation: 0.0,
            y_jitter: 0.0,
        }
    }
}

impl HorizontalBandsParams {
    pub fn validate(&self) -> BrandloomResult<()> {
        util::non_negative("bandThickness", self.band_thickness)?;
        util::non_negative("bandGap", self.band_gap)?;
        util::unit_interval("vignetteDepth", self.vignette_depth)?;
        util::finite("tiltAngle", self.tilt_angle)?;
        util::non_negative("thicknessVariation", self.thickness_variation)?;
        util::non_negative("gapVariation", self.gap_variation)?;
        util::non_negative("yJitter", self.y_jitter)?;
        Ok(())
    }
}

/// Generate the band stack.
///
/// Bands are laid top-down from the padding edge until either `band_count`
/// bands exist or the next band would start past the bottom padding. The
/// random stream is drawn three times per band whether or not jitter is
/// enabled, so toggling one jitter field never reshuffles the others.
pub fn generate_horizontal_bands(params: &HorizontalBandsParams, globals: &GlobalState) -> Group {
    let mut rng = Mulberry32::new(globals.seed);
    let canvas = &globals.canvas;
    let (width, height, padding) = (canvas.width, canvas.height, canvas.padding);
    let half_height = height / 2.0;

    let thickness_spread = params.thickness_variation * params.band_thickness;
    let gap_spread = params.gap_variation * params.band_gap;

    let mut bands: Vec<Node> = Vec::new();
    let mut y = padding;
    let mut i = 0;
    while i < params.band_count && y < height - padding {
        let thickness = params.band_thickness + rng.next_f64() * thickness_spread - thickness_spread / 2.0;
        let gap = params.band_gap + rng.next_f64() * gap_spread - gap_spread / 2.0;
        let jitter_y = rng.next_signed() * params.y_jitter;

        let distance = if half_height > 0.0 {
            (y + thickness / 2.0 - half_height).abs() / half_height
        } else {
            0.0
        };
        let opacity = (1.0 - params.vignette_depth * distance).clamp(0.0, 1.0);

        let rect = Rect::new(
            padding,
            y + jitter_y,
            width - 2.0 * padding,
            globals.line_weight.max(thickness),
        );
        bands.push(RectNode::new(rect, globals.brand.foreground).with_opacity(opacity).into());

        y += thickness + gap;
        i += 1;
    }

    if bands.is_empty() {
        tracing::warn!(band_count = params.band_count, "horizontal bands produced no bands");
    }

    let group = Group::with_children(bands);
    if params.tilt_angle != 0.0 {
        group.with_transform(Transform::Rotate {
            degrees: params.tilt_angle,
            cx: width / 2.0,
            cy: height / 2.0,
        })
    } else {
        group
    }
}
