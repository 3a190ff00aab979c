//! Vertical bars: a density ramp of parallel bars.
//!
//! Bars are laid along one axis in one of four directions. Gap and bar width
//! are each modulated by the density curve, so the bars bunch together
//! toward the far end of the run. The run can then be split into sub-groups,
//! mirrored, and framed by a padding matte.

use serde::{Deserialize, Serialize};

use super::util;
use crate::color::Color;
use crate::context::GlobalState;
use crate::density::{self, DensityCurve};
use crate::error::{BrandloomError, BrandloomResult};
use crate::geometry::Rect;
use crate::scene::{Group, Node, RectNode};

/// Most sub-groups a run can be split into.
pub const MAX_SPLITS: usize = 4;

/// Share of the bar width that full width-density removes.
const WIDTH_DENSITY_SHRINK: f64 = 0.75;

/// Direction the run advances in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Left to right.
    #[default]
    #[serde(rename = "LTR")]
    LeftToRight,
    #[serde(rename = "RTL")]
    RightToLeft,
    #[serde(rename = "TTB")]
    TopToBottom,
    #[serde(rename = "BTT")]
    BottomToTop,
}

impl Direction {
    /// True when bars stand upright and the run advances along x.
    pub fn is_horizontal_run(&self) -> bool {
        matches!(self, Direction::LeftToRight | Direction::RightToLeft)
    }

    fn is_reversed(&self) -> bool {
        matches!(self, Direction::RightToLeft | Direction::BottomToTop)
    }
}

/// Whole-pattern mirroring about the canvas midlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mirror {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

/// Per-split overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SplitSlot {
    /// Flip the split's bars end-for-end within the split.
    pub reverse: bool,
    /// Add a reflected copy of the split within the split's own extent.
    pub mirror: bool,
    /// Fill for this split; brand foreground when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Partition of the run into up to [`MAX_SPLITS`] sub-groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Splits {
    pub count: u8,
    pub slots: [SplitSlot; MAX_SPLITS],
}

impl Default for Splits {
    fn default() -> Self {
        Self {
            count: 1,
            slots: [SplitSlot::default(); MAX_SPLITS],
        }
    }
}

impl Splits {
    /// Split count clamped into `1..=MAX_SPLITS`.
    pub fn effective_count(&self) -> usize {
        (self.count as usize).clamp(1, MAX_SPLITS)
    }
}

/// Parameters for [`generate_vertical_bars`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerticalBarsParams {
    pub bar_count: u32,
    pub bar_width: f64,
    pub gap_width: f64,
    pub density_curve: DensityCurve,
    /// Signed percentage driving gap shrinkage.
    #[serde(alias = "curveIntensity")]
    pub gap_intensity: f64,
    /// Signed percentage driving bar width shrinkage.
    pub width_intensity: f64,
    pub direction: Direction,
    /// Dead zone inside the canvas padding before the first bar.
    pub edge_padding: f64,
    /// Stretch the last bar so the run ends exactly at the far edge.
    pub extend_last_bar: bool,
    pub mirror: Mirror,
    pub splits: Splits,
    /// Matte drawn over the canvas padding after the bars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_color: Option<Color>,
}

impl Default for VerticalBarsParams {
    fn default() -> Self {
        Self {
            bar_count: 24,
            bar_width: 50.0,
            gap_width: 30.0,
            density_curve: DensityCurve::Ease,
            gap_intensity: 50.0,
            width_intensity: 0.0,
            direction: Direction::LeftToRight,
            edge_padding: 0.0,
            extend_last_bar: true,
            mirror: Mirror::None,
            splits: Splits::default(),
            padding_color: None,
        }
    }
}

impl VerticalBarsParams {
    pub fn validate(&self) -> BrandloomResult<()> {
        util::non_negative("barWidth", self.bar_width)?;
        util::non_negative("gapWidth", self.gap_width)?;
        util::in_range("gapIntensity", self.gap_intensity, -100.0, 100.0)?;
        util::in_range("widthIntensity", self.width_intensity, -100.0, 100.0)?;
        util::non_negative("edgePadding", self.edge_padding)?;
        if !(1..=MAX_SPLITS).contains(&(self.splits.count as usize)) {
            return Err(BrandloomError::invalid_parameter(format!(
                "splits.count must be within 1..={MAX_SPLITS}, got {}",
                self.splits.count
            )));
        }
        Ok(())
    }
}

/// One bar measured along the run, from the run's start edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSpan {
    pub start: f64,
    pub length: f64,
}

impl BarSpan {
    #[inline]
    pub fn end(&self) -> f64 {
        self.start + self.length
    }
}

/// Lay the run out in one dimension.
///
/// `span` is the usable run length (canvas extent minus padding and edge
/// padding on both ends). Bars are emitted while the cursor is inside the
/// span; with `extend_last_bar` the final emitted bar is stretched or
/// trimmed so it ends exactly at `span`.
pub fn layout_run(params: &VerticalBarsParams, span: f64, line_weight: f64) -> Vec<BarSpan> {
    let n = params.bar_count;
    // The far edge ends the loop long before a huge `n`.
    let mut bars = Vec::with_capacity((n as usize).min(256));
    let mut cursor = 0.0;

    for i in 0..n {
        if cursor >= span {
            break;
        }
        let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.5 };
        let gap_density = density::evaluate(t, params.density_curve, params.gap_intensity);
        let width_density = density::evaluate(t, params.density_curve, params.width_intensity);

        let length = line_weight.max(params.bar_width * (1.0 - width_density * WIDTH_DENSITY_SHRINK));
        let gap = density::seam_gap(params.gap_width, gap_density);

        bars.push(BarSpan { start: cursor, length });
        let step = length + gap;
        if step <= 0.0 {
            // A run that stops advancing would never reach the far edge.
            break;
        }
        cursor += step;
    }

    if params.extend_last_bar {
        if let Some(last) = bars.last_mut() {
            last.length = span - last.start;
        }
        // Overlapping neighbours may still poke past the far edge.
        for bar in bars.iter_mut().filter(|b| b.end() > span) {
            bar.length = span - bar.start;
        }
    }
    bars
}

/// Slot index and bar index range of each non-empty split, in run order.
fn split_ranges(len: usize, count: usize) -> Vec<(usize, std::ops::Range<usize>)> {
    (0..count)
        .map(|k| (k, (k * len / count)..((k + 1) * len / count)))
        .filter(|(_, r)| !r.is_empty())
        .collect()
}

/// Reflect a span within `[lo, hi]`.
#[inline]
fn reflect_span(bar: BarSpan, lo: f64, hi: f64) -> BarSpan {
    BarSpan {
        start: lo + hi - bar.end(),
        length: bar.length,
    }
}

/// Generate the bars.
pub fn generate_vertical_bars(params: &VerticalBarsParams, globals: &GlobalState) -> Group {
    let canvas = &globals.canvas;
    let (width, height, padding) = (canvas.width, canvas.height, canvas.padding);
    let direction = params.direction;

    let (run_extent, cross_extent) = if direction.is_horizontal_run() {
        (width, height)
    } else {
        (height, width)
    };
    let run_lo = padding + params.edge_padding;
    let run_hi = run_extent - padding - params.edge_padding;
    let span = run_hi - run_lo;
    let cross_len = cross_extent - 2.0 * padding;

    let bars = layout_run(params, span, globals.line_weight);
    if bars.is_empty() {
        tracing::warn!(bar_count = params.bar_count, span, "vertical bars produced no bars");
    }

    // Map a run span onto the canvas.
    let to_rect = |bar: BarSpan| -> Rect {
        let along = if direction.is_reversed() {
            run_hi - bar.end()
        } else {
            run_lo + bar.start
        };
        if direction.is_horizontal_run() {
            Rect::new(along, padding, bar.length, cross_len)
        } else {
            Rect::new(padding, along, cross_len, bar.length)
        }
    };

    let split_count = params.splits.effective_count();
    let mut groups: Vec<Group> = Vec::with_capacity(split_count);
    for (k, range) in split_ranges(bars.len(), split_count) {
        let slot = params.splits.slots[k];
        let fill = slot.color.unwrap_or(globals.brand.foreground);
        let members = &bars[range];

        let lo = members.iter().map(|b| b.start).fold(f64::INFINITY, f64::min);
        let hi = members.iter().map(|b| b.end()).fold(f64::NEG_INFINITY, f64::max);

        let mut spans: Vec<BarSpan> = if slot.reverse {
            members.iter().map(|b| reflect_span(*b, lo, hi)).collect()
        } else {
            members.to_vec()
        };
        if slot.mirror {
            let reflected: Vec<BarSpan> = spans.iter().map(|b| reflect_span(*b, lo, hi)).collect();
            spans.extend(reflected);
        }

        let mut rects: Vec<Rect> = spans.into_iter().map(&to_rect).collect();
        mirror_rects(&mut rects, params.mirror, width, height);

        let children: Vec<Node> = rects.into_iter().map(|r| RectNode::new(r, fill).into()).collect();
        let group = Group::with_children(children);
        groups.push(if split_count > 1 {
            group.with_id(format!("split-{}", k + 1))
        } else {
            group
        });
    }

    let mut root = match groups.len() {
        1 => groups.remove(0),
        _ => Group::with_children(groups.into_iter().map(Node::from).collect()),
    };

    if let Some(matte) = params.padding_color {
        if padding > 0.0 {
            for rect in padding_matte(width, height, padding) {
                root.push(RectNode::new(rect, matte).into());
            }
        }
    }
    root
}

/// Append copies reflected about the canvas midlines.
fn mirror_rects(rects: &mut Vec<Rect>, mirror: Mirror, width: f64, height: f64) {
    let (cx, cy) = (width / 2.0, height / 2.0);
    let originals = rects.clone();
    match mirror {
        Mirror::None => {}
        Mirror::Horizontal => rects.extend(originals.iter().map(|r| r.reflect_x(cx))),
        Mirror::Vertical => rects.extend(originals.iter().map(|r| r.reflect_y(cy))),
        Mirror::Both => {
            rects.extend(originals.iter().map(|r| r.reflect_x(cx)));
            rects.extend(originals.iter().map(|r| r.reflect_y(cy)));
            rects.extend(originals.iter().map(|r| r.reflect_x(cx).reflect_y(cy)));
        }
    }
}

/// Top, bottom, left and right border bands covering the padding.
fn padding_matte(width: f64, height: f64, padding: f64) -> [Rect; 4] {
    [
        Rect::new(0.0, 0.0, width, padding),
        Rect::new(0.0, height - padding, width, padding),
        Rect::new(0.0, padding, padding, height - 2.0 * padding),
        Rect::new(width - padding, padding, padding, height - 2.0 * padding),
    ]
}
