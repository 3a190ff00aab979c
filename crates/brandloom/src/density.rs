//! Density curves and the minimum visual seam clamp.
//!
//! A density curve maps progress along a bar sequence to a modulation scalar
//! in [0, 1]. The scalar shrinks gaps (and optionally bar widths) so bars
//! bunch up toward one end of the canvas.

use serde::{Deserialize, Serialize};

/// Gaps narrower than this are replaced by a small overlap.
pub const SEAM_THRESHOLD: f64 = 10.0;

/// Largest overlap the seam clamp ever produces, in pixels.
pub const MAX_SEAM_OVERLAP: f64 = 10.0;

/// How quickly density eats into the gap: at density 1/3 the gap is gone.
pub const GAP_DENSITY_GAIN: f64 = 3.0;

/// Shape of the density ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DensityCurve {
    /// No modulation at all: density is always zero.
    Linear,
    /// Quadratic ramp `t²`.
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Exponential ramp `(2^(10t) - 1) / 1023`.
    Exp,
}

impl DensityCurve {
    /// Every curve the evaluator understands.
    pub fn all() -> &'static [DensityCurve] {
        &[
            DensityCurve::Linear,
            DensityCurve::Ease,
            DensityCurve::EaseIn,
            DensityCurve::EaseOut,
            DensityCurve::EaseInOut,
            DensityCurve::Exp,
        ]
    }

    /// The subset exposed by the shipping control panel.
    pub fn shipped() -> &'static [DensityCurve] {
        &[DensityCurve::Linear, DensityCurve::Ease]
    }

    pub fn name(&self) -> &'static str {
        match self {
            DensityCurve::Linear => "linear",
            DensityCurve::Ease => "ease",
            DensityCurve::EaseIn => "easeIn",
            DensityCurve::EaseOut => "easeOut",
            DensityCurve::EaseInOut => "easeInOut",
            DensityCurve::Exp => "exp",
        }
    }

    pub fn from_name(name: &str) -> Option<DensityCurve> {
        match name.to_lowercase().as_str() {
            "linear" | "none" => Some(DensityCurve::Linear),
            "ease" => Some(DensityCurve::Ease),
            "easein" | "ease-in" => Some(DensityCurve::EaseIn),
            "easeout" | "ease-out" => Some(DensityCurve::EaseOut),
            "easeinout" | "ease-in-out" => Some(DensityCurve::EaseInOut),
            "exp" | "exponential" => Some(DensityCurve::Exp),
            _ => None,
        }
    }

    /// Unscaled ramp value for progress `p` in [0, 1].
    fn shape(&self, p: f64) -> f64 {
        match self {
            DensityCurve::Linear => 0.0,
            DensityCurve::Ease | DensityCurve::EaseIn => p * p,
            DensityCurve::EaseOut => 1.0 - (1.0 - p) * (1.0 - p),
            DensityCurve::EaseInOut => {
                if p < 0.5 {
                    2.0 * p * p
                } else {
                    1.0 - (-2.0 * p + 2.0).powi(2) / 2.0
                }
            }
            DensityCurve::Exp => (2f64.powf(10.0 * p) - 1.0) / 1023.0,
        }
    }
}

/// Evaluate a density curve.
///
/// `t` is normalized progress along the sequence, `intensity` a signed
/// percentage in [-100, 100]. A negative intensity mirrors the ramp so the
/// dense end moves to the start of the sequence. The result is clamped to
/// [0, 1].
pub fn evaluate(t: f64, curve: DensityCurve, intensity: f64) -> f64 {
    if !t.is_finite() || !intensity.is_finite() {
        return 0.0;
    }
    let t = t.clamp(0.0, 1.0);
    let progress = if intensity < 0.0 { 1.0 - t } else { t };
    (curve.shape(progress) * intensity.abs() / 100.0).clamp(0.0, 1.0)
}

/// Gap left between two bars at the given density: the minimum visual seam
/// clamp.
///
/// The nominal gap shrinks linearly with density. Once it falls under
/// [`SEAM_THRESHOLD`] the bars are pushed into a slight overlap of
/// `max(1, floor(density * 10))` pixels so no hairline seam shows through.
pub fn seam_gap(gap_width: f64, density: f64) -> f64 {
    let density = density.clamp(0.0, 1.0);
    let gap = gap_width * (1.0 - (density * GAP_DENSITY_GAIN).min(1.0));
    if gap < SEAM_THRESHOLD {
        -(density * 10.0).floor().max(1.0)
    } else {
        gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_disables_modulation() {
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert_eq!(evaluate(t, DensityCurve::Linear, 100.0), 0.0);
            assert_eq!(evaluate(t, DensityCurve::Linear, -100.0), 0.0);
        }
    }

    #[test]
    fn ease_is_quadratic_in_progress() {
        assert_eq!(evaluate(0.5, DensityCurve::Ease, 100.0), 0.25);
        assert_eq!(evaluate(1.0, DensityCurve::Ease, 50.0), 0.5);
        assert_eq!(evaluate(0.0, DensityCurve::Ease, 100.0), 0.0);
    }

    #[test]
    fn negative_intensity_mirrors_the_ramp() {
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let forward = evaluate(t, DensityCurve::Ease, 80.0);
            let mirrored = evaluate(1.0 - t, DensityCurve::Ease, -80.0);
            assert!((forward - mirrored).abs() < 1e-12);
        }
    }

    #[test]
    fn every_curve_stays_in_unit_range() {
        for curve in DensityCurve::all() {
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                for intensity in [-150.0, -100.0, -30.0, 0.0, 30.0, 100.0, 150.0] {
                    let d = evaluate(t, *curve, intensity);
                    assert!((0.0..=1.0).contains(&d), "{curve:?} t={t} i={intensity} -> {d}");
                }
            }
        }
    }

    #[test]
    fn curves_reach_full_density_at_the_end() {
        for curve in &DensityCurve::all()[1..] {
            let d = evaluate(1.0, *curve, 100.0);
            assert!((d - 1.0).abs() < 1e-12, "{curve:?} ends at {d}");
        }
    }

    #[test]
    fn names_round_trip() {
        for curve in DensityCurve::all() {
            assert_eq!(DensityCurve::from_name(curve.name()), Some(*curve));
        }
    }

    #[test]
    fn wide_gaps_shrink_linearly() {
        assert_eq!(seam_gap(30.0, 0.0), 30.0);
        assert!((seam_gap(30.0, 0.1) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn narrow_gaps_become_overlaps() {
        // 30 * (1 - 0.6) = 12 stays a gap, 30 * (1 - 0.75) = 7.5 turns into overlap.
        assert!(seam_gap(30.0, 0.2) > 0.0);
        assert_eq!(seam_gap(30.0, 0.25), -2.0);
        assert_eq!(seam_gap(30.0, 1.0), -10.0);
        assert_eq!(seam_gap(5.0, 0.0), -1.0);
    }

    #[test]
    fn overlap_never_exceeds_the_clamp() {
        for gap_width in [0.0, 3.0, 10.0, 30.0, 200.0] {
            for i in 0..=100 {
                let density = i as f64 / 100.0;
                let gap = seam_gap(gap_width, density);
                assert!(gap >= -MAX_SEAM_OVERLAP, "gap {gap} at density {density}");
            }
        }
    }
}
