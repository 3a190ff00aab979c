//! Curated mesh presets.
//!
//! A preset is nothing more than a named, fully filled parameter object.
//! Applying one replaces the current parameters wholesale.

use super::color_field::{GlazeParams, TransformationalParams};
use super::{PatternParams, PatternTag};
use crate::mesh::ColorPin;
use crate::palette::*;

/// A named parameter object.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset<P> {
    pub name: &'static str,
    pub params: P,
}

const fn pin(x: f64, y: f64, color: crate::color::Color) -> ColorPin {
    ColorPin::new(x, y, color)
}

fn transformational(pins: [ColorPin; 5]) -> TransformationalParams {
    TransformationalParams {
        pins,
        blend_strength: 0.1,
        frame_enabled: false,
        frame_thickness: 100.0,
    }
}

fn glaze(pins: [ColorPin; 5], background_color: crate::color::Color) -> GlazeParams {
    GlazeParams {
        pins,
        blend_strength: 0.5,
        frame_enabled: false,
        frame_thickness: 100.0,
        background_color,
    }
}

/// Default Transformational Color Background parameters.
pub fn sage_horizon() -> TransformationalParams {
    transformational([
        pin(0.1, 0.2, SAGE_TINT),
        pin(0.9, 0.3, CELADON),
        pin(0.5, 0.8, WHEAT_TINT),
        pin(0.2, 0.6, MIDNIGHT),
        pin(0.5, 0.5, ACCENT_GREEN).disabled(),
    ])
}

/// Default Glaze parameters.
pub fn glaze_preset_1() -> GlazeParams {
    glaze(
        [
            pin(0.0, 0.0, CBRE_GREEN).with_opacity(0.47),
            pin(1.0, 0.0, SAGE).with_opacity(1.0),
            pin(1.0, 1.0, CELADON_SHADE_3).with_opacity(0.77),
            pin(0.67, 1.0, ACCENT_GREEN_SHADE_2).with_opacity(0.45),
            pin(0.5, 0.5, DARK_GREEN_SHADE_1).with_opacity(1.0).disabled(),
        ],
        MIDNIGHT,
    )
}

pub fn transformational_presets() -> Vec<Preset<TransformationalParams>> {
    vec![
        Preset {
            name: "Sage Horizon",
            params: sage_horizon(),
        },
        Preset {
            name: "Midnight Bloom",
            params: transformational([
                pin(0.15, 0.15, ACCENT_GREEN),
                pin(0.85, 0.2, MIDNIGHT),
                pin(0.5, 0.9, SAGE),
                pin(0.8, 0.75, CELADON_TINT),
                pin(0.5, 0.5, WHITE).disabled(),
            ]),
        },
        Preset {
            name: "Wheat Fields",
            params: transformational([
                pin(0.2, 0.3, CELADON_TINT),
                pin(0.7, 0.25, SAGE),
                pin(0.4, 0.7, WHEAT_TINT),
                pin(0.85, 0.8, MIDNIGHT_TINT),
                pin(0.5, 0.5, WHITE).disabled(),
            ]),
        },
        Preset {
            name: "Celadon Dream",
            params: transformational([
                pin(0.25, 0.25, MIDNIGHT),
                pin(0.75, 0.35, CELADON),
                pin(0.5, 0.75, WHEAT_TINT),
                pin(0.15, 0.65, SAGE_TINT),
                pin(0.85, 0.85, CEMENT_TINT),
            ]),
        },
    ]
}

pub fn glaze_presets() -> Vec<Preset<GlazeParams>> {
    vec![
        Preset {
            name: "Preset 1",
            params: glaze_preset_1(),
        },
        Preset {
            name: "Preset 2",
            params: glaze(
                [
                    pin(0.0, 1.0, MIDNIGHT_SHADE_1).with_opacity(0.8),
                    pin(1.0, 0.0, CELADON_SHADE_1).with_opacity(0.79),
                    pin(0.0, 1.0, MIDNIGHT_SHADE_2).with_opacity(0.9),
                    pin(1.0, 1.0, WHEAT_TINT).with_opacity(0.59),
                    pin(0.5, 0.5, SAGE_TINT).with_opacity(0.18),
                ],
                CELADON_SHADE_1,
            ),
        },
        Preset {
            name: "Preset 3",
            params: glaze(
                [
                    pin(0.10, 0.0, WHITE).with_opacity(0.73),
                    pin(0.37, 1.0, ACCENT_GREEN).with_opacity(0.55),
                    pin(1.0, 0.10, MIDNIGHT_SHADE_1).with_opacity(0.74),
                    pin(1.0, 1.0, SAGE_SHADE_1).with_opacity(0.66),
                    pin(0.5, 0.5, CELADON_TINT).with_opacity(0.30),
                ],
                ACCENT_GREEN_SHADE_2,
            ),
        },
        Preset {
            name: "Preset 4",
            params: glaze(
                [
                    pin(0.0, 1.0, DARK_GREEN).with_opacity(0.55),
                    pin(1.0, 0.0, CELADON_SHADE_2).with_opacity(0.85),
                    pin(0.0, 0.72, DARK_GREEN).with_opacity(0.40),
                    pin(1.0, 1.0, SAGE_TINT).with_opacity(0.88),
                    pin(0.5, 0.5, CBRE_GREEN).with_opacity(0.5).disabled(),
                ],
                MIDNIGHT,
            ),
        },
    ]
}

/// Preset names offered for a pattern. Only the mesh patterns have presets.
pub fn preset_names(tag: PatternTag) -> Vec<&'static str> {
    match tag {
        PatternTag::TransformationalColorBackground => {
            transformational_presets().iter().map(|p| p.name).collect()
        }
        PatternTag::Glaze => glaze_presets().iter().map(|p| p.name).collect(),
        _ => Vec::new(),
    }
}

/// Look a preset up by pattern and name (case-insensitive).
pub fn find_preset(tag: PatternTag, name: &str) -> Option<PatternParams> {
    let matches = |candidate: &str| candidate.eq_ignore_ascii_case(name.trim());
    match tag {
        PatternTag::TransformationalColorBackground => transformational_presets()
            .into_iter()
            .find(|p| matches(p.name))
            .map(|p| PatternParams::TransformationalColorBackground(p.params)),
        PatternTag::Glaze => glaze_presets()
            .into_iter()
            .find(|p| matches(p.name))
            .map(|p| PatternParams::Glaze(p.params)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_validates() {
        for preset in transformational_presets() {
            assert!(preset.params.validate().is_ok(), "{} should validate", preset.name);
            assert!(preset.params.pins.iter().all(|p| p.opacity.is_none()));
        }
        for preset in glaze_presets() {
            assert!(preset.params.validate().is_ok(), "{} should validate", preset.name);
            assert!(preset.params.pins.iter().all(|p| p.opacity.is_some()));
        }
    }

    #[test]
    fn defaults_are_the_first_presets() {
        assert_eq!(TransformationalParams::default(), transformational_presets()[0].params);
        assert_eq!(GlazeParams::default(), glaze_presets()[0].params);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(
            preset_names(PatternTag::TransformationalColorBackground),
            vec!["Sage Horizon", "Midnight Bloom", "Wheat Fields", "Celadon Dream"]
        );
        assert!(matches!(
            find_preset(PatternTag::Glaze, "preset 3"),
            Some(PatternParams::Glaze(_))
        ));
        assert!(find_preset(PatternTag::Glaze, "Sage Horizon").is_none());
        assert!(find_preset(PatternTag::VerticalBars, "anything").is_none());
        assert!(preset_names(PatternTag::Portal).is_empty());
    }
}
