//! Mesh gradients: inverse distance weighted blending of color pins.
//!
//! The continuous field is sampled on a coarse grid of opaque tiles that
//! extends past the visible area, then blurred so the tiles melt into a
//! smooth gradient. A parallel greyscale grid carries per-pin opacity and
//! drives a luminance mask.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::Rect;
use crate::scene::{BlurFilter, ClipRect, Group, Mask, Node, RectNode};

/// Number of pins every mesh pattern carries.
pub const PIN_COUNT: usize = 5;

/// Fixed-length pin array. Disabled pins keep their slot.
pub type Pins = [ColorPin; PIN_COUNT];

/// Distance below which a query point counts as sitting on a pin.
const COINCIDENT_DISTANCE: f64 = 0.001;
/// Weight given to a coincident pin, large enough to dominate the blend.
const COINCIDENT_WEIGHT: f64 = 1_000_000.0;
/// Fraction of the visible size sampled beyond each edge.
pub const EDGE_EXTENSION: f64 = 0.15;
/// Extra pixels added to each tile so neighbours overlap.
const TILE_OVERLAP: f64 = 2.0;

/// A positioned, colored, optionally disabled control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPin {
    pub enabled: bool,
    pub x: f64,
    pub y: f64,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl ColorPin {
    pub const fn new(x: f64, y: f64, color: Color) -> Self {
        Self {
            enabled: true,
            x,
            y,
            color,
            opacity: None,
        }
    }

    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// The same pin mirrored through the center: `(1 - x, 1 - y)`.
    pub fn inverted(&self) -> Self {
        Self {
            x: 1.0 - self.x,
            y: 1.0 - self.y,
            ..*self
        }
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.opacity.unwrap_or(1.0)
    }
}

/// Invert every pin of an array, keeping slot order.
pub fn invert_pins(pins: &Pins) -> Pins {
    pins.map(|pin| pin.inverted())
}

/// Which generation of the mesh constants to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeshVariant {
    /// Transformational Color Background: sharper falloff, no alpha mask.
    Transformational,
    /// Glaze: softer falloff, aspect-corrected distance, opacity mask, dither.
    Glaze,
}

impl MeshVariant {
    /// IDW exponent for a blend strength in [0, 1].
    pub fn power(&self, blend_strength: f64) -> f64 {
        match self {
            MeshVariant::Transformational => 2.0 + blend_strength * 2.0,
            MeshVariant::Glaze => 1.5 + blend_strength * 2.0,
        }
    }

    /// Tiles per axis for a surface of the given size.
    pub fn grid_size(&self, width: f64, height: f64) -> usize {
        let short = width.min(height).max(0.0);
        let (divisor, lo, hi) = match self {
            MeshVariant::Transformational => (20.0, 100.0, 150.0),
            MeshVariant::Glaze => (15.0, 80.0, 120.0),
        };
        (short / divisor).floor().clamp(lo, hi) as usize
    }

    /// Gaussian standard deviation used to melt the tiles together.
    pub fn blur_amount(&self, width: f64, height: f64, grid: usize) -> f64 {
        let grid = grid.max(1) as f64;
        match self {
            MeshVariant::Transformational => (width / grid * 1.5).max(30.0),
            MeshVariant::Glaze => (width.min(height) / grid * 2.5).max(40.0),
        }
    }

    fn aspect_corrected(&self) -> bool {
        matches!(self, MeshVariant::Glaze)
    }
}

/// Color and opacity at one point of the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshSample {
    pub color: Color,
    pub alpha: f64,
}

impl MeshSample {
    pub const OPAQUE_WHITE: MeshSample = MeshSample {
        color: Color::WHITE,
        alpha: 1.0,
    };
}

/// A continuous color field defined by scattered pins.
#[derive(Debug, Clone, Copy)]
pub struct MeshField<'a> {
    pins: &'a [ColorPin],
    blend_strength: f64,
    variant: MeshVariant,
    aspect_ratio: f64,
}

impl<'a> MeshField<'a> {
    pub fn new(pins: &'a [ColorPin], blend_strength: f64, variant: MeshVariant) -> Self {
        Self {
            pins,
            blend_strength,
            variant,
            aspect_ratio: 1.0,
        }
    }

    /// Stretch x distances by `width / height` so falloff stays round on
    /// non-square surfaces. Only the glaze variant honours it.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            self.aspect_ratio = aspect_ratio;
        }
        self
    }

    pub fn enabled_count(&self) -> usize {
        self.pins.iter().filter(|p| p.enabled).count()
    }

    /// Blend the enabled pins at normalized coordinates `(x, y)`.
    ///
    /// Zero enabled pins give opaque white; a single pin is returned
    /// verbatim everywhere.
    pub fn color_at(&self, x: f64, y: f64) -> MeshSample {
        let mut enabled = self.pins.iter().filter(|p| p.enabled);
        let Some(first) = enabled.next() else {
            return MeshSample::OPAQUE_WHITE;
        };
        if self.enabled_count() == 1 {
            return MeshSample {
                color: first.color,
                alpha: first.alpha(),
            };
        }

        let aspect = if self.variant.aspect_corrected() {
            self.aspect_ratio
        } else {
            1.0
        };
        let power = self.variant.power(self.blend_strength);

        let weights: Vec<(f64, &ColorPin)> = self
            .pins
            .iter()
            .filter(|p| p.enabled)
            .map(|pin| {
                let dx = (x - pin.x) * aspect;
                let dy = y - pin.y;
                let d = (dx * dx + dy * dy).sqrt();
                let w = if d < COINCIDENT_DISTANCE {
                    COINCIDENT_WEIGHT
                } else {
                    1.0 / d.powf(power)
                };
                (w, pin)
            })
            .collect();
        let total: f64 = weights.iter().map(|(w, _)| w).sum();

        let mut rgb = [0.0; 3];
        let mut alpha = 0.0;
        for (w, pin) in &weights {
            let share = w / total;
            let c = pin.color.channels();
            rgb[0] += c[0] * share;
            rgb[1] += c[1] * share;
            rgb[2] += c[2] * share;
            alpha += pin.alpha() * share;
        }

        MeshSample {
            color: Color::from_channels(rgb),
            alpha,
        }
    }
}

/// One sampled tile of the extended grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTile {
    pub rect: Rect,
    pub sample: MeshSample,
}

/// Sample the field on a `grid × grid` lattice covering the surface plus
/// [`EDGE_EXTENSION`] on every side. Samples beyond the edge repeat the edge
/// color.
pub fn sample_grid(field: &MeshField<'_>, width: f64, height: f64, grid: usize) -> Vec<MeshTile> {
    if grid < 2 {
        return Vec::new();
    }
    let span = 1.0 + EDGE_EXTENSION * 2.0;
    let extended_width = width * span;
    let extended_height = height * span;
    let offset_x = -width * EDGE_EXTENSION;
    let offset_y = -height * EDGE_EXTENSION;
    let tile_width = extended_width / grid as f64 + TILE_OVERLAP;
    let tile_height = extended_height / grid as f64 + TILE_OVERLAP;
    let last = (grid - 1) as f64;

    let mut tiles = Vec::with_capacity(grid * grid);
    for row in 0..grid {
        let y = (row as f64 / last * span - EDGE_EXTENSION).clamp(0.0, 1.0);
        for col in 0..grid {
            let x = (col as f64 / last * span - EDGE_EXTENSION).clamp(0.0, 1.0);
            tiles.push(MeshTile {
                rect: Rect::new(
                    offset_x + col as f64 / grid as f64 * extended_width,
                    offset_y + row as f64 / grid as f64 * extended_height,
                    tile_width,
                    tile_height,
                ),
                sample: field.color_at(x, y),
            });
        }
    }
    tiles
}

/// Build the mesh gradient layer for a `width × height` surface at the
/// origin. Element ids are prefixed with `id_prefix` so several meshes can
/// share one document.
pub fn mesh_layer(
    width: f64,
    height: f64,
    pins: &[ColorPin],
    blend_strength: f64,
    variant: MeshVariant,
    id_prefix: &str,
) -> Group {
    if !(width > 0.0 && height > 0.0) {
        tracing::warn!(width, height, id_prefix, "mesh surface is empty");
        return Group::new();
    }

    let field = MeshField::new(pins, blend_strength, variant).with_aspect_ratio(width / height);
    let enabled = field.enabled_count();
    if enabled == 0 {
        tracing::warn!(id_prefix, "no enabled pins, mesh degenerates to white");
    }

    let bounds = Rect::new(0.0, 0.0, width, height);
    if variant == MeshVariant::Transformational && enabled <= 1 {
        let sample = field.color_at(0.5, 0.5);
        return Group::with_children(vec![RectNode::new(bounds, sample.color).into()]);
    }

    let grid = variant.grid_size(width, height);
    let blur = variant.blur_amount(width, height, grid);
    let tiles = sample_grid(&field, width, height, grid);
    tracing::debug!(id_prefix, grid, blur, tiles = tiles.len(), "sampled mesh grid");

    let color_tiles: Vec<Node> = tiles
        .iter()
        .map(|t| RectNode::new(t.rect, t.sample.color).into())
        .collect();
    let blurred_color = Group::with_children(color_tiles).with_filter(BlurFilter {
        id: format!("{id_prefix}-blur"),
        std_deviation: blur,
        noise_dither: variant == MeshVariant::Glaze,
    });

    let clip = ClipRect {
        id: format!("{id_prefix}-clip"),
        rect: bounds,
    };

    let visible = match variant {
        MeshVariant::Transformational => blurred_color,
        MeshVariant::Glaze => {
            // White = opaque, black = transparent.
            let alpha_tiles: Vec<Node> = tiles
                .iter()
                .map(|t| {
                    let level = (t.sample.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
                    RectNode::new(t.rect, Color::grey(level)).into()
                })
                .collect();
            let blurred_alpha = Group::with_children(alpha_tiles).with_filter(BlurFilter {
                id: format!("{id_prefix}-alpha-blur"),
                std_deviation: blur,
                noise_dither: true,
            });
            Group::with_children(vec![blurred_color.into()]).with_mask(Mask {
                id: format!("{id_prefix}-alpha-mask"),
                children: vec![blurred_alpha.into()],
            })
        }
    };

    Group::with_children(vec![visible.into()]).with_clip(clip)
}
