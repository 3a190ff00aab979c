//! Pattern generators and the dispatcher.
//!
//! Each generator maps a typed parameter record plus the shared
//! [`GlobalState`] to a scene group. Generators are independent of each
//! other; [`generate`] selects one by the parameter record's tag.

pub mod util;

mod color_field;
mod diagonal_contours;
mod horizontal_bands;
mod line_of_sight;
pub mod presets;
mod vertical_bars;

pub use color_field::{
    GlazeParams, TransformationalParams, generate_glaze, generate_transformational,
};
pub use diagonal_contours::{
    DiagonalContoursParams, contour_opacity, contour_points, generate_diagonal_contours,
};
pub use horizontal_bands::{HorizontalBandsParams, generate_horizontal_bands};
pub use line_of_sight::{
    FOLD_RATIO, FoldLayout, LineOfSightParams, REFERENCE_LINE_COUNT, fold_index,
    generate_line_of_sight, line_points,
};
pub use vertical_bars::{
    BarSpan, Direction, MAX_SPLITS, Mirror, SplitSlot, Splits, VerticalBarsParams,
    generate_vertical_bars, layout_run,
};

use serde::{Deserialize, Serialize};

use crate::context::GlobalState;
use crate::error::BrandloomResult;
use crate::scene::{Group, Scene};

/// Metadata describing a pattern for listings.
#[derive(Debug, Clone, Copy)]
pub struct PatternMetadata {
    /// Human readable name
    pub label: &'static str,
    /// Brief description of the pattern
    pub description: &'static str,
}

impl PatternMetadata {
    pub const fn new(label: &'static str, description: &'static str) -> Self {
        Self { label, description }
    }
}

/// Available pattern types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternTag {
    #[default]
    HorizontalBands,
    VerticalBars,
    DiagonalContours,
    #[serde(rename = "multidimensionalLoS")]
    MultidimensionalLoS,
    TransformationalColorBackground,
    Glaze,
    /// Reserved; renders nothing.
    Portal,
}

impl PatternTag {
    /// Get all available patterns.
    pub fn all() -> &'static [PatternTag] {
        &[
            PatternTag::HorizontalBands,
            PatternTag::VerticalBars,
            PatternTag::DiagonalContours,
            PatternTag::MultidimensionalLoS,
            PatternTag::TransformationalColorBackground,
            PatternTag::Glaze,
            PatternTag::Portal,
        ]
    }

    /// Get pattern name as string.
    pub fn name(&self) -> &'static str {
        match self {
            PatternTag::HorizontalBands => "horizontalBands",
            PatternTag::VerticalBars => "verticalBars",
            PatternTag::DiagonalContours => "diagonalContours",
            PatternTag::MultidimensionalLoS => "multidimensionalLoS",
            PatternTag::TransformationalColorBackground => "transformationalColorBackground",
            PatternTag::Glaze => "glaze",
            PatternTag::Portal => "portal",
        }
    }

    /// Check if pattern is a stub (not implemented).
    pub fn is_stub(&self) -> bool {
        matches!(self, PatternTag::Portal)
    }

    pub fn metadata(&self) -> PatternMetadata {
        match self {
            PatternTag::HorizontalBands => {
                PatternMetadata::new("Horizontal Bands", "Stacked stripes with a vertical vignette")
            }
            PatternTag::VerticalBars => {
                PatternMetadata::new("Vertical Bars", "Density ramp of bars with splits and mirroring")
            }
            PatternTag::DiagonalContours => {
                PatternMetadata::new("Diagonal Contours", "Fading stack of two-peak roofline paths")
            }
            PatternTag::MultidimensionalLoS => {
                PatternMetadata::new("Multidimensional LoS", "Angular fold of three-point polylines")
            }
            PatternTag::TransformationalColorBackground => {
                PatternMetadata::new("Transformational Color Background", "Opaque mesh gradient from color pins")
            }
            PatternTag::Glaze => {
                PatternMetadata::new("Glaze", "Translucent mesh gradient over a flat background")
            }
            PatternTag::Portal => PatternMetadata::new("Portal", "Reserved"),
        }
    }

    /// Parse pattern from string.
    pub fn from_name(name: &str) -> Option<PatternTag> {
        match name.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "horizontalbands" | "bands" => Some(PatternTag::HorizontalBands),
            "verticalbars" | "bars" => Some(PatternTag::VerticalBars),
            "diagonalcontours" | "contours" => Some(PatternTag::DiagonalContours),
            "multidimensionallos" | "lineofsight" | "los" => Some(PatternTag::MultidimensionalLoS),
            "transformationalcolorbackground" | "transformational" => {
                Some(PatternTag::TransformationalColorBackground)
            }
            "glaze" => Some(PatternTag::Glaze),
            "portal" => Some(PatternTag::Portal),
            _ => None,
        }
    }
}

impl std::fmt::Display for PatternTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Exactly one parameter record per pattern, tagged by pattern name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "camelCase")]
pub enum PatternParams {
    HorizontalBands(HorizontalBandsParams),
    VerticalBars(VerticalBarsParams),
    DiagonalContours(DiagonalContoursParams),
    #[serde(rename = "multidimensionalLoS")]
    MultidimensionalLoS(LineOfSightParams),
    TransformationalColorBackground(TransformationalParams),
    Glaze(GlazeParams),
    Portal,
}

impl Default for PatternParams {
    fn default() -> Self {
        PatternParams::defaults_for(PatternTag::default())
    }
}

impl PatternParams {
    /// The default-value table for a pattern.
    pub fn defaults_for(tag: PatternTag) -> Self {
        match tag {
            PatternTag::HorizontalBands => PatternParams::HorizontalBands(Default::default()),
            PatternTag::VerticalBars => PatternParams::VerticalBars(Default::default()),
            PatternTag::DiagonalContours => PatternParams::DiagonalContours(Default::default()),
            PatternTag::MultidimensionalLoS => PatternParams::MultidimensionalLoS(Default::default()),
            PatternTag::TransformationalColorBackground => {
                PatternParams::TransformationalColorBackground(Default::default())
            }
            PatternTag::Glaze => PatternParams::Glaze(Default::default()),
            PatternTag::Portal => PatternParams::Portal,
        }
    }

    pub fn tag(&self) -> PatternTag {
        match self {
            PatternParams::HorizontalBands(_) => PatternTag::HorizontalBands,
            PatternParams::VerticalBars(_) => PatternTag::VerticalBars,
            PatternParams::DiagonalContours(_) => PatternTag::DiagonalContours,
            PatternParams::MultidimensionalLoS(_) => PatternTag::MultidimensionalLoS,
            PatternParams::TransformationalColorBackground(_) => PatternTag::TransformationalColorBackground,
            PatternParams::Glaze(_) => PatternTag::Glaze,
            PatternParams::Portal => PatternTag::Portal,
        }
    }

    /// Reject out-of-range values instead of degrading gracefully.
    pub fn validate(&self) -> BrandloomResult<()> {
        match self {
            PatternParams::HorizontalBands(p) => p.validate(),
            PatternParams::VerticalBars(p) => p.validate(),
            PatternParams::DiagonalContours(p) => p.validate(),
            PatternParams::MultidimensionalLoS(p) => p.validate(),
            PatternParams::TransformationalColorBackground(p) => p.validate(),
            PatternParams::Glaze(p) => p.validate(),
            PatternParams::Portal => Ok(()),
        }
    }
}

/// Generate a scene.
///
/// Never fails: unusual numbers yield an empty or sparse scene (logged at
/// warn level) rather than an error. The scene background is the brand
/// background color.
pub fn generate(params: &PatternParams, globals: &GlobalState) -> Scene {
    let tag = params.tag();
    let _span = tracing::debug_span!("generate", pattern = tag.name(), seed = globals.seed).entered();

    if tag != globals.pattern {
        tracing::debug!(selected = %globals.pattern, "parameters override the selected pattern");
    }

    let root = match params {
        PatternParams::HorizontalBands(p) => generate_horizontal_bands(p, globals),
        PatternParams::VerticalBars(p) => generate_vertical_bars(p, globals),
        PatternParams::DiagonalContours(p) => generate_diagonal_contours(p, globals),
        PatternParams::MultidimensionalLoS(p) => generate_line_of_sight(p, globals),
        PatternParams::TransformationalColorBackground(p) => generate_transformational(p, globals),
        PatternParams::Glaze(p) => generate_glaze(p, globals),
        PatternParams::Portal => Group::new(),
    };

    let scene = Scene::new(globals.canvas.width, globals.canvas.height, root)
        .with_background(globals.brand.background)
        .with_title(tag.metadata().label);
    let stats = scene.stats();
    tracing::debug!(rects = stats.rects, strokes = stats.paths + stats.polylines, "generated");
    scene
}

/// Validate the canvas and parameters, then [`generate`].
pub fn generate_strict(params: &PatternParams, globals: &GlobalState) -> BrandloomResult<Scene> {
    globals.validate()?;
    params.validate()?;
    Ok(generate(params, globals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tags_round_trip_through_names() {
        for tag in PatternTag::all() {
            assert_eq!(PatternTag::from_name(tag.name()), Some(*tag));
            assert_eq!(PatternParams::defaults_for(*tag).tag(), *tag);
        }
        assert_eq!(PatternTag::from_name("line-of-sight"), Some(PatternTag::MultidimensionalLoS));
        assert_eq!(PatternTag::from_name("nope"), None);
        assert!(PatternTag::Portal.is_stub());
    }

    #[test]
    fn generation_is_deterministic() {
        let globals = GlobalState::with_canvas(400.0, 300.0, 12.0);
        for tag in PatternTag::all() {
            let params = PatternParams::defaults_for(*tag);
            let a = generate(&params, &globals);
            let b = generate(&params, &globals);
            assert_eq!(a, b, "{tag} should be deterministic");
        }
    }

    #[test]
    fn portal_renders_nothing() {
        let scene = generate(&PatternParams::Portal, &GlobalState::default());
        assert!(scene.root.is_empty());
        assert_eq!(scene.background, Some(GlobalState::default().brand.background));
    }

    #[test]
    fn scene_carries_canvas_and_title() {
        let globals = GlobalState::with_canvas(640.0, 480.0, 0.0);
        let scene = generate(&PatternParams::defaults_for(PatternTag::DiagonalContours), &globals);
        assert_eq!((scene.width, scene.height), (640.0, 480.0));
        assert_eq!(scene.title.as_deref(), Some("Diagonal Contours"));
        assert_eq!(scene.stats().paths, 50);
    }

    #[test]
    fn strict_generation_rejects_bad_input() {
        let globals = GlobalState::with_canvas(200.0, 200.0, 0.0);
        let bad = PatternParams::HorizontalBands(HorizontalBandsParams {
            band_thickness: -4.0,
            ..Default::default()
        });
        assert!(generate_strict(&bad, &globals).is_err());
        // The graceful path still renders.
        let _ = generate(&bad, &globals);

        let cramped = GlobalState::with_canvas(200.0, 200.0, 100.0);
        let ok = PatternParams::default();
        assert!(generate_strict(&ok, &cramped).is_err());
        assert!(generate_strict(&ok, &globals).is_ok());
    }

    #[test]
    fn params_deserialize_by_tag_with_defaults() {
        let json = r#"{"pattern": "verticalBars", "barCount": 3, "direction": "RTL"}"#;
        let params: PatternParams = serde_json::from_str(json).unwrap();
        let PatternParams::VerticalBars(p) = params else {
            panic!("expected vertical bars");
        };
        assert_eq!(p.bar_count, 3);
        assert_eq!(p.direction, Direction::RightToLeft);
        assert_eq!(p.gap_width, 30.0, "unspecified fields come from the default table");

        let yaml = "pattern: multidimensionalLoS\nlineCount: 42\ngradientColorFrom: '#FF0000'\n";
        let params: PatternParams = serde_yaml::from_str(yaml).unwrap();
        let PatternParams::MultidimensionalLoS(p) = params else {
            panic!("expected line of sight");
        };
        assert_eq!(p.line_count, 42);
        assert_eq!(p.gradient_color_from, Some(crate::color::Color::rgb(255, 0, 0)));
    }

    #[test]
    fn wrong_length_pin_arrays_are_rejected() {
        let yaml = r##"
pattern: glaze
pins:
  - { enabled: true, x: 0.0, y: 0.0, color: "#FFFFFF" }
  - { enabled: true, x: 1.0, y: 1.0, color: "#000000" }
"##;
        assert!(serde_yaml::from_str::<PatternParams>(yaml).is_err());
    }

    #[test]
    fn malformed_colors_are_rejected() {
        let json = r##"{"pattern": "glaze", "backgroundColor": "#12345"}"##;
        let err = serde_json::from_str::<PatternParams>(json).unwrap_err();
        assert!(err.to_string().contains("invalid color format"), "{err}");
    }
}
