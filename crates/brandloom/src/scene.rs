//! The immutable scene graph produced by every generator.
//!
//! Every primitive carries its own explicit color. There is no inherited
//! "current color": a group never styles its children, so a serialized node
//! renders the same wherever it ends up.

use serde::Serialize;

use crate::color::Color;
use crate::geometry::{Point, Rect};

/// A transform applied to a whole group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Transform {
    Translate { x: f64, y: f64 },
    /// Rotation in degrees about `(cx, cy)`, clockwise in screen space.
    Rotate { degrees: f64, cx: f64, cy: f64 },
}

impl Transform {
    /// Map a point through the transform.
    pub fn apply(&self, p: Point) -> Point {
        match *self {
            Transform::Translate { x, y } => p.translate(x, y),
            Transform::Rotate { degrees, cx, cy } => {
                let (sin, cos) = degrees.to_radians().sin_cos();
                let dx = p.x - cx;
                let dy = p.y - cy;
                Point::new(cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
            }
        }
    }
}

/// A filled rectangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectNode {
    pub rect: Rect,
    pub fill: Color,
    pub opacity: f64,
}

/// A stroked open path or polyline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeNode {
    pub points: Vec<Point>,
    pub stroke: Color,
    pub stroke_width: f64,
    pub opacity: f64,
}

/// Rectangular clip region, referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipRect {
    pub id: String,
    pub rect: Rect,
}

/// Luminance mask: white shows the masked content, black hides it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mask {
    pub id: String,
    pub children: Vec<Node>,
}

/// Gaussian blur, optionally with a faint noise overlay to break up banding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlurFilter {
    pub id: String,
    pub std_deviation: f64,
    pub noise_dither: bool,
}

/// A container node. Effects apply in SVG order: filter, clip, mask.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Group {
    pub id: Option<String>,
    pub transform: Option<Transform>,
    pub filter: Option<BlurFilter>,
    pub clip: Option<ClipRect>,
    pub mask: Option<Mask>,
    pub children: Vec<Node>,
}

/// A scene graph node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Node {
    Rect(RectNode),
    /// Moveto followed by linetos, emitted as `<path>`.
    Path(StrokeNode),
    /// Emitted as `<polyline>`.
    Polyline(StrokeNode),
    Group(Group),
}

/// Primitive counts, used to check output size and graceful degradation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SceneStats {
    pub rects: usize,
    pub paths: usize,
    pub polylines: usize,
    pub groups: usize,
    /// Rectangles living inside masks (not drawn directly).
    pub mask_rects: usize,
}

impl SceneStats {
    /// Directly drawn primitives.
    pub fn drawables(&self) -> usize {
        self.rects + self.paths + self.polylines
    }
}

/// A complete render: surface size, optional background and the content tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub title: Option<String>,
    pub background: Option<Color>,
    pub root: Group,
}

impl RectNode {
    pub fn new(rect: Rect, fill: Color) -> Self {
        Self {
            rect,
            fill,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

impl StrokeNode {
    pub fn new(points: Vec<Point>, stroke: Color, stroke_width: f64) -> Self {
        Self {
            points,
            stroke,
            stroke_width,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(children: Vec<Node>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_filter(mut self, filter: BlurFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_clip(mut self, clip: ClipRect) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn collect_stats(&self, stats: &mut SceneStats, in_mask: bool) {
        stats.groups += 1;
        if let Some(mask) = &self.mask {
            for child in &mask.children {
                child.collect_stats(stats, true);
            }
        }
        for child in &self.children {
            child.collect_stats(stats, in_mask);
        }
    }
}

impl Node {
    fn collect_stats(&self, stats: &mut SceneStats, in_mask: bool) {
        match self {
            Node::Rect(_) if in_mask => stats.mask_rects += 1,
            Node::Rect(_) => stats.rects += 1,
            Node::Path(_) if !in_mask => stats.paths += 1,
            Node::Polyline(_) if !in_mask => stats.polylines += 1,
            Node::Path(_) | Node::Polyline(_) => {}
            Node::Group(group) => group.collect_stats(stats, in_mask),
        }
    }
}

impl From<RectNode> for Node {
    fn from(rect: RectNode) -> Self {
        Node::Rect(rect)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

impl Scene {
    pub fn new(width: f64, height: f64, root: Group) -> Self {
        Self {
            width,
            height,
            title: None,
            background: None,
            root,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Count primitives in the content tree (the background is not counted).
    pub fn stats(&self) -> SceneStats {
        let mut stats = SceneStats::default();
        self.root.collect_stats(&mut stats, false);
        stats
    }

    /// Every directly drawn rectangle, depth first, skipping mask contents.
    pub fn rects(&self) -> Vec<&RectNode> {
        let mut out = Vec::new();
        walk(&self.root, &mut |node| {
            if let Node::Rect(r) = node {
                out.push(r);
            }
        });
        out
    }

    /// Every path and polyline, depth first, skipping mask contents.
    pub fn strokes(&self) -> Vec<&StrokeNode> {
        let mut out = Vec::new();
        walk(&self.root, &mut |node| match node {
            Node::Path(s) | Node::Polyline(s) => out.push(s),
            _ => {}
        });
        out
    }
}

fn walk<'a>(group: &'a Group, visit: &mut impl FnMut(&'a Node)) {
    for child in &group.children {
        visit(child);
        if let Node::Group(inner) = child {
            walk(inner, visit);
        }
    }
}
