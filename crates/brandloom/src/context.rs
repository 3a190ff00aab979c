//! Shared render context handed to every generator.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{BrandloomError, BrandloomResult};
use crate::palette;
use crate::patterns::PatternTag;

/// Named output sizes from the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DimensionPreset {
    #[default]
    Square1024,
    Square2000,
    Square3000,
    /// Width and height were set directly.
    Custom,
}

impl DimensionPreset {
    pub fn all() -> &'static [DimensionPreset] {
        &[
            DimensionPreset::Square1024,
            DimensionPreset::Square2000,
            DimensionPreset::Square3000,
        ]
    }

    /// Pixel size of the preset, `None` for [`DimensionPreset::Custom`].
    pub fn size(&self) -> Option<(f64, f64)> {
        match self {
            DimensionPreset::Square1024 => Some((1024.0, 1024.0)),
            DimensionPreset::Square2000 => Some((2000.0, 2000.0)),
            DimensionPreset::Square3000 => Some((3000.0, 3000.0)),
            DimensionPreset::Custom => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DimensionPreset::Square1024 => "1024×1024",
            DimensionPreset::Square2000 => "2000×2000",
            DimensionPreset::Square3000 => "3000×3000",
            DimensionPreset::Custom => "custom",
        }
    }
}

/// Pixel dimensions of the output surface plus a uniform inset.
///
/// When deserialized, a named preset supplies whichever of `width` and
/// `height` the document leaves out. Explicit sizes that disagree with the
/// preset turn it into [`DimensionPreset::Custom`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CanvasDocument")]
pub struct CanvasSpec {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub dimension_preset: DimensionPreset,
}

/// Wire form of [`CanvasSpec`]: every field optional.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CanvasDocument {
    width: Option<f64>,
    height: Option<f64>,
    #[serde(default)]
    padding: f64,
    dimension_preset: Option<DimensionPreset>,
}

impl From<CanvasDocument> for CanvasSpec {
    fn from(doc: CanvasDocument) -> Self {
        let preset = match (doc.dimension_preset, doc.width, doc.height) {
            (Some(preset), _, _) => preset,
            (None, None, None) => DimensionPreset::default(),
            (None, _, _) => DimensionPreset::Custom,
        };
        let (preset_width, preset_height) = preset.size().unwrap_or((1024.0, 1024.0));
        let width = doc.width.unwrap_or(preset_width);
        let height = doc.height.unwrap_or(preset_height);
        let dimension_preset = match preset.size() {
            Some(size) if size != (width, height) => DimensionPreset::Custom,
            _ => preset,
        };
        Self {
            width,
            height,
            padding: doc.padding,
            dimension_preset,
        }
    }
}

impl CanvasSpec {
    /// A custom-sized canvas.
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
            dimension_preset: DimensionPreset::Custom,
        }
    }

    /// A canvas sized by one of the named presets.
    pub fn from_preset(preset: DimensionPreset, padding: f64) -> Self {
        let (width, height) = preset.size().unwrap_or((1024.0, 1024.0));
        Self {
            width,
            height,
            padding,
            dimension_preset: preset,
        }
    }

    /// Width left after removing padding from both sides.
    #[inline]
    pub fn inner_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    /// Height left after removing padding from both sides.
    #[inline]
    pub fn inner_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    /// Check `padding < min(width, height) / 2` and that every size is finite.
    pub fn validate(&self) -> BrandloomResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(BrandloomError::invalid_parameter(format!(
                "canvas width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(BrandloomError::invalid_parameter(format!(
                "canvas height must be positive, got {}",
                self.height
            )));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(BrandloomError::invalid_parameter(format!(
                "canvas padding must be non-negative, got {}",
                self.padding
            )));
        }
        let limit = self.width.min(self.height) / 2.0;
        if self.padding >= limit {
            return Err(BrandloomError::invalid_parameter(format!(
                "canvas padding {} must be less than {limit}",
                self.padding
            )));
        }
        Ok(())
    }
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self::from_preset(DimensionPreset::Square1024, 0.0)
    }
}

/// The two-color palette used when a generator has no colors of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandPair {
    pub background: Color,
    pub foreground: Color,
}

impl BrandPair {
    pub const fn new(background: Color, foreground: Color) -> Self {
        Self {
            background,
            foreground,
        }
    }

    /// Exchange background and foreground.
    pub fn swap(&self) -> Self {
        Self::new(self.foreground, self.background)
    }
}

impl Default for BrandPair {
    fn default() -> Self {
        Self::new(palette::DARK_GREEN, palette::ACCENT_GREEN)
    }
}

/// Snapshot of the shared state every generator reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalState {
    pub canvas: CanvasSpec,
    pub brand: BrandPair,
    pub line_weight: f64,
    pub seed: u32,
    pub pattern: PatternTag,
}

impl Default for GlobalState {
    fn default() -> Self {
        Self {
            canvas: CanvasSpec::default(),
            brand: BrandPair::default(),
            line_weight: 2.0,
            seed: 42,
            pattern: PatternTag::HorizontalBands,
        }
    }
}

impl GlobalState {
    /// Convenience constructor used heavily by tests.
    pub fn with_canvas(width: f64, height: f64, padding: f64) -> Self {
        Self {
            canvas: CanvasSpec::new(width, height, padding),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> BrandloomResult<()> {
        self.canvas.validate()?;
        if !(self.line_weight.is_finite() && self.line_weight >= 0.0) {
            return Err(BrandloomError::invalid_parameter(format!(
                "line weight must be non-negative, got {}",
                self.line_weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_have_square_sizes() {
        for preset in DimensionPreset::all() {
            let canvas = CanvasSpec::from_preset(*preset, 0.0);
            assert_eq!(canvas.width, canvas.height);
            assert_eq!(canvas.dimension_preset, *preset);
        }
        assert_eq!(DimensionPreset::Custom.size(), None);
    }

    #[test]
    fn padding_must_stay_below_half_the_short_side() {
        assert!(CanvasSpec::new(200.0, 100.0, 49.0).validate().is_ok());
        assert!(CanvasSpec::new(200.0, 100.0, 50.0).validate().is_err());
        assert!(CanvasSpec::new(200.0, 100.0, -1.0).validate().is_err());
        assert!(CanvasSpec::new(0.0, 100.0, 0.0).validate().is_err());
    }

    #[test]
    fn inner_size_removes_padding_twice() {
        let canvas = CanvasSpec::new(300.0, 200.0, 20.0);
        assert_eq!(canvas.inner_width(), 260.0);
        assert_eq!(canvas.inner_height(), 160.0);
    }

    #[test]
    fn swap_exchanges_colors() {
        let pair = BrandPair::default();
        let swapped = pair.swap();
        assert_eq!(swapped.background, pair.foreground);
        assert_eq!(swapped.foreground, pair.background);
    }

    #[test]
    fn partial_documents_fill_from_defaults() {
        let state: GlobalState =
            serde_json::from_str(r##"{"canvas":{"width":500,"height":300},"seed":7}"##).unwrap();
        assert_eq!(state.canvas.width, 500.0);
        assert_eq!(state.canvas.padding, 0.0);
        assert_eq!(state.canvas.dimension_preset, DimensionPreset::Custom);
        assert_eq!(state.seed, 7);
        assert_eq!(state.line_weight, 2.0);
        assert_eq!(state.brand, BrandPair::default());
    }

    #[test]
    fn dimension_preset_supplies_missing_sizes() {
        let canvas: CanvasSpec = serde_json::from_str(r#"{"dimensionPreset":"square2000"}"#).unwrap();
        assert_eq!((canvas.width, canvas.height), (2000.0, 2000.0));
        assert_eq!(canvas.dimension_preset, DimensionPreset::Square2000);

        let canvas: CanvasSpec =
            serde_json::from_str(r#"{"dimensionPreset":"square3000","padding":40}"#).unwrap();
        assert_eq!(canvas, CanvasSpec::from_preset(DimensionPreset::Square3000, 40.0));

        let canvas: CanvasSpec = serde_json::from_str("{}").unwrap();
        assert_eq!(canvas, CanvasSpec::default());
    }

    #[test]
    fn explicit_size_overrides_a_disagreeing_preset() {
        let canvas: CanvasSpec =
            serde_json::from_str(r#"{"dimensionPreset":"square2000","width":640}"#).unwrap();
        assert_eq!((canvas.width, canvas.height), (640.0, 2000.0));
        assert_eq!(canvas.dimension_preset, DimensionPreset::Custom);

        let canvas: CanvasSpec =
            serde_json::from_str(r#"{"dimensionPreset":"square2000","width":2000,"height":2000}"#).unwrap();
        assert_eq!(canvas.dimension_preset, DimensionPreset::Square2000);
    }
}
