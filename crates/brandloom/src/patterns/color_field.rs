//! Mesh gradient backgrounds: Transformational Color Background and Glaze.
//!
//! Both are thin compositions over [`crate::mesh`]: an optional background
//! fill, an optional frame ring showing the mesh with inverted pins, and the
//! main mesh clipped clear of the frame.

use serde::{Deserialize, Serialize};

use super::presets;
use super::util;
use crate::color::Color;
use crate::context::GlobalState;
use crate::error::BrandloomResult;
use crate::geometry::Rect;
use crate::mesh::{self, ColorPin, MeshVariant, Pins};
use crate::scene::{ClipRect, Group, Mask, Node, RectNode, Transform};

/// Parameters for [`generate_transformational`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformationalParams {
    pub pins: Pins,
    /// 0 gives soft transitions, 1 sharp ones.
    pub blend_strength: f64,
    pub frame_enabled: bool,
    pub frame_thickness: f64,
}

impl Default for TransformationalParams {
    fn default() -> Self {
        presets::sage_horizon()
    }
}

impl TransformationalParams {
    pub fn validate(&self) -> BrandloomResult<()> {
        validate_mesh(&self.pins, self.blend_strength, self.frame_thickness)
    }
}

/// Parameters for [`generate_glaze`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlazeParams {
    pub pins: Pins,
    pub blend_strength: f64,
    pub frame_enabled: bool,
    pub frame_thickness: f64,
    /// Flat fill beneath the mesh, visible through partially opaque pins.
    pub background_color: Color,
}

impl Default for GlazeParams {
    fn default() -> Self {
        presets::glaze_preset_1()
    }
}

impl GlazeParams {
    pub fn validate(&self) -> BrandloomResult<()> {
        validate_mesh(&self.pins, self.blend_strength, self.frame_thickness)
    }
}

fn validate_mesh(pins: &[ColorPin], blend_strength: f64, frame_thickness: f64) -> BrandloomResult<()> {
    util::unit_interval("blendStrength", blend_strength)?;
    util::non_negative("frameThickness", frame_thickness)?;
    for (i, pin) in pins.iter().enumerate() {
        util::unit_interval(&format!("pins[{i}].x"), pin.x)?;
        util::unit_interval(&format!("pins[{i}].y"), pin.y)?;
        if let Some(opacity) = pin.opacity {
            util::unit_interval(&format!("pins[{i}].opacity"), opacity)?;
        }
    }
    Ok(())
}

/// Generate a Transformational Color Background.
pub fn generate_transformational(params: &TransformationalParams, globals: &GlobalState) -> Group {
    let layers = compose_mesh(
        &params.pins,
        params.blend_strength,
        params.frame_enabled.then_some(params.frame_thickness),
        MeshVariant::Transformational,
        globals,
    );
    Group::with_children(layers)
}

/// Generate a Glaze: a flat background under a translucent mesh.
pub fn generate_glaze(params: &GlazeParams, globals: &GlobalState) -> Group {
    let canvas = &globals.canvas;
    let background = RectNode::new(Rect::new(0.0, 0.0, canvas.width, canvas.height), params.background_color);

    let mut layers: Vec<Node> = vec![background.into()];
    layers.extend(compose_mesh(
        &params.pins,
        params.blend_strength,
        params.frame_enabled.then_some(params.frame_thickness),
        MeshVariant::Glaze,
        globals,
    ));
    Group::with_children(layers)
}

/// Frame ring (if any) followed by the main mesh, both inset by the canvas
/// padding.
fn compose_mesh(
    pins: &Pins,
    blend_strength: f64,
    frame_thickness: Option<f64>,
    variant: MeshVariant,
    globals: &GlobalState,
) -> Vec<Node> {
    let canvas = &globals.canvas;
    let (inner_width, inner_height) = (canvas.inner_width(), canvas.inner_height());
    let inset = Transform::Translate {
        x: canvas.padding,
        y: canvas.padding,
    };
    let surface = Rect::new(0.0, 0.0, inner_width, inner_height);

    let mut layers = Vec::with_capacity(2);
    let mut main = Group::new().with_transform(inset);

    if let Some(thickness) = frame_thickness {
        let interior = surface.inset(thickness);
        if interior.is_empty() {
            tracing::warn!(thickness, "frame covers the whole surface");
        }

        let inverted = mesh::invert_pins(pins);
        let frame_mesh = mesh::mesh_layer(inner_width, inner_height, &inverted, blend_strength, variant, "frame");
        let ring = Mask {
            id: "frame-mask".to_string(),
            children: vec![
                RectNode::new(surface, Color::WHITE).into(),
                RectNode::new(interior, Color::BLACK).into(),
            ],
        };
        layers.push(
            Group::with_children(vec![frame_mesh.into()])
                .with_transform(inset)
                .with_mask(ring)
                .into(),
        );

        let main_mesh = mesh::mesh_layer(inner_width, inner_height, pins, blend_strength, variant, "main");
        main.push(
            Group::with_children(vec![main_mesh.into()])
                .with_clip(ClipRect {
                    id: "main-frame-clip".to_string(),
                    rect: interior,
                })
                .into(),
        );
    } else {
        main.push(mesh::mesh_layer(inner_width, inner_height, pins, blend_strength, variant, "main").into());
    }

    layers.push(main.into());
    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{MeshField, invert_pins, sample_grid};
    use crate::scene::Scene;

    fn small() -> GlobalState {
        GlobalState::with_canvas(300.0, 200.0, 10.0)
    }

    #[test]
    fn glaze_starts_with_a_full_canvas_background() {
        let params = GlazeParams::default();
        let globals = small();
        let group = generate_glaze(&params, &globals);
        let Node::Rect(bg) = &group.children[0] else {
            panic!("expected background rect");
        };
        assert_eq!(bg.rect, Rect::new(0.0, 0.0, 300.0, 200.0));
        assert_eq!(bg.fill, params.background_color);
        assert_eq!(group.children.len(), 2, "background and main mesh");
    }

    #[test]
    fn main_mesh_is_inset_by_padding() {
        let globals = small();
        let group = generate_transformational(&TransformationalParams::default(), &globals);
        let Node::Group(main) = &group.children[0] else {
            panic!("expected main group");
        };
        assert_eq!(main.transform, Some(Transform::Translate { x: 10.0, y: 10.0 }));
        let Node::Group(layer) = &main.children[0] else {
            panic!("expected mesh layer");
        };
        assert_eq!(layer.clip.as_ref().map(|c| c.rect), Some(Rect::new(0.0, 0.0, 280.0, 180.0)));
    }

    #[test]
    fn frame_adds_a_masked_inverted_ring() {
        let params = GlazeParams {
            frame_enabled: true,
            frame_thickness: 20.0,
            ..Default::default()
        };
        let globals = small();
        let group = generate_glaze(&params, &globals);
        assert_eq!(group.children.len(), 3, "background, frame, main");

        let Node::Group(frame) = &group.children[1] else {
            panic!("expected frame group");
        };
        let mask = frame.mask.as_ref().expect("frame mask");
        let Node::Rect(hole) = &mask.children[1] else {
            panic!("expected mask cut-out");
        };
        assert_eq!(hole.fill, Color::BLACK);
        assert_eq!(hole.rect, Rect::new(20.0, 20.0, 240.0, 140.0));

        let Node::Group(main) = &group.children[2] else {
            panic!("expected main group");
        };
        let Node::Group(clipped) = &main.children[0] else {
            panic!("expected clipped main mesh");
        };
        assert_eq!(clipped.clip.as_ref().map(|c| c.rect), Some(hole.rect));
    }

    #[test]
    fn frame_mesh_samples_the_inverted_pins() {
        let params = GlazeParams {
            frame_enabled: true,
            frame_thickness: 20.0,
            ..Default::default()
        };
        let globals = small();
        let group = generate_glaze(&params, &globals);
        let (w, h) = (280.0, 180.0);
        let grid = MeshVariant::Glaze.grid_size(w, h);

        let tile_colors = |layer: &Node| -> Vec<Color> {
            let Node::Group(layer) = layer else {
                panic!("expected mesh group");
            };
            Scene::new(300.0, 200.0, layer.clone()).rects().iter().map(|r| r.fill).collect()
        };
        let expected = |pins: &Pins| -> Vec<Color> {
            let field = MeshField::new(pins, params.blend_strength, MeshVariant::Glaze).with_aspect_ratio(w / h);
            sample_grid(&field, w, h, grid).iter().map(|t| t.sample.color).collect()
        };

        let inverted = invert_pins(&params.pins);
        assert_eq!(inverted[0].x, 1.0 - params.pins[0].x);
        assert_eq!(inverted[0].y, 1.0 - params.pins[0].y);

        let frame = tile_colors(&group.children[1]);
        assert_eq!(frame.len(), grid * grid);
        assert_eq!(frame, expected(&inverted), "frame uses x' = 1-x, y' = 1-y");
        assert_ne!(frame, expected(&params.pins), "frame differs from the main mesh");

        let main = tile_colors(&group.children[2]);
        assert_eq!(main, expected(&params.pins));
    }

    #[test]
    fn transformational_single_pin_is_a_solid_fill() {
        let mut params = TransformationalParams::default();
        for (i, pin) in params.pins.iter_mut().enumerate() {
            pin.enabled = i == 2;
        }
        let globals = small();
        let scene = Scene::new(300.0, 200.0, generate_transformational(&params, &globals));
        let rects = scene.rects();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].fill, params.pins[2].color);
    }

    #[test]
    fn no_pins_degrades_to_white() {
        let mut params = GlazeParams::default();
        for pin in params.pins.iter_mut() {
            pin.enabled = false;
        }
        let globals = small();
        let scene = Scene::new(300.0, 200.0, generate_glaze(&params, &globals));
        assert!(scene.rects().iter().skip(1).all(|r| r.fill == Color::WHITE));
    }

    #[test]
    fn validation_checks_pins() {
        let mut params = GlazeParams::default();
        assert!(params.validate().is_ok());
        params.pins[3].x = 1.2;
        assert!(params.validate().is_err());

        let mut params = TransformationalParams::default();
        params.blend_strength = -0.1;
        assert!(params.validate().is_err());
    }
}
