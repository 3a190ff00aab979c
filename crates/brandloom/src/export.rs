//! Standalone SVG serialization and rasterization.
//!
//! The serializer writes every fill and stroke explicitly, so the document
//! renders the same outside the application. Rasterization re-serializes the
//! scene at the scaled size (keeping the original viewBox) and lets resvg
//! draw the vectors at full resolution instead of upsampling a bitmap.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use image::{ImageEncoder, RgbaImage};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{BrandloomError, BrandloomResult};
use crate::geometry::{Point, Rect};
use crate::scene::{BlurFilter, ClipRect, Group, Mask, Node, RectNode, Scene, StrokeNode, Transform};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const SVG_DOCTYPE: &str =
    r#"svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd""#;

/// Largest accepted export scale.
pub const MAX_SCALE: f64 = 16.0;

/// Serialize a scene into a standalone SVG document.
pub fn serialize(scene: &Scene) -> BrandloomResult<String> {
    serialize_at(scene, scene.width, scene.height)
}

/// Serialize with the outer `width`/`height` set to the given size while
/// the viewBox keeps the scene's own coordinates.
fn serialize_at(scene: &Scene, width: f64, height: f64) -> BrandloomResult<String> {
    let mut out = SvgWriter::new();
    out.document(scene, width, height)?;
    let svg = out.finish()?;
    tracing::debug!(bytes = svg.len(), "serialized scene");
    Ok(svg)
}

/// Render a scene to an RGBA bitmap at `scale`× its pixel size.
pub fn rasterize(scene: &Scene, scale: f64) -> BrandloomResult<RgbaImage> {
    if !(scale.is_finite() && scale > 0.0 && scale <= MAX_SCALE) {
        return Err(BrandloomError::export_failed(format!(
            "scale must be within (0, {MAX_SCALE}], got {scale}"
        )));
    }
    let width = (scene.width * scale).round();
    let height = (scene.height * scale).round();
    if !(width >= 1.0 && height >= 1.0 && width <= u32::MAX as f64 && height <= u32::MAX as f64) {
        return Err(BrandloomError::export_failed(format!(
            "cannot rasterize a {width}x{height} surface"
        )));
    }
    let (pixel_width, pixel_height) = (width as u32, height as u32);

    let svg = serialize_at(scene, width, height)?;
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default())
        .map_err(|e| BrandloomError::export_failed(format!("serialized scene did not parse: {e}")))?;

    let mut pixmap = tiny_skia::Pixmap::new(pixel_width, pixel_height).ok_or_else(|| {
        BrandloomError::export_failed(format!("could not allocate a {pixel_width}x{pixel_height} pixmap"))
    })?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    tracing::debug!(pixel_width, pixel_height, scale, "rasterized scene");
    RgbaImage::from_raw(pixel_width, pixel_height, rgba)
        .ok_or_else(|| BrandloomError::export_failed("pixel buffer size mismatch"))
}

/// Losslessly encode a bitmap as PNG.
pub fn encode_png(image: &RgbaImage) -> BrandloomResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut bytes)
        .write_image(image.as_raw(), image.width(), image.height(), image::ExtendedColorType::Rgba8)
        .map_err(|e| BrandloomError::export_failed(format!("png encoding failed: {e}")))?;
    Ok(bytes)
}

/// A single-shot rasterization running on a worker thread.
///
/// Jobs are independent; starting a second one does not affect the first.
pub struct RasterJob {
    rx: Receiver<BrandloomResult<RgbaImage>>,
}

impl RasterJob {
    pub fn spawn(scene: Scene, scale: f64) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The receiver may already be gone; nothing to report then.
            let _ = tx.send(rasterize(&scene, scale));
        });
        Self { rx }
    }

    /// Block until the bitmap is ready.
    pub fn wait(self) -> BrandloomResult<RgbaImage> {
        self.rx.recv().map_err(|_| worker_lost())?
    }

    /// Poll without blocking. `None` while the worker is still running.
    pub fn try_finish(&self) -> Option<BrandloomResult<RgbaImage>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(worker_lost())),
        }
    }
}

fn worker_lost() -> BrandloomError {
    BrandloomError::export_failed("raster worker exited without a result")
}

fn xml_error(e: impl std::fmt::Display) -> BrandloomError {
    BrandloomError::export_failed(format!("xml write failed: {e}"))
}

/// Format a coordinate: at most four decimals, no trailing zeros.
fn num(value: f64) -> BrandloomResult<String> {
    if !value.is_finite() {
        return Err(BrandloomError::export_failed(format!(
            "non-finite coordinate {value} in scene"
        )));
    }
    let s = format!("{value:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    Ok(if s == "-0" { "0".to_string() } else { s.to_string() })
}

fn points_attr(points: &[Point]) -> BrandloomResult<String> {
    let mut parts = Vec::with_capacity(points.len());
    for p in points {
        parts.push(format!("{},{}", num(p.x)?, num(p.y)?));
    }
    Ok(parts.join(" "))
}

fn path_data(points: &[Point]) -> BrandloomResult<String> {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        d.push_str(if i == 0 { "M " } else { "L " });
        d.push_str(&num(p.x)?);
        d.push(' ');
        d.push_str(&num(p.y)?);
    }
    Ok(d)
}

fn transform_attr(transform: &Transform) -> BrandloomResult<String> {
    Ok(match *transform {
        Transform::Translate { x, y } => format!("translate({} {})", num(x)?, num(y)?),
        Transform::Rotate { degrees, cx, cy } => {
            format!("rotate({} {} {})", num(degrees)?, num(cx)?, num(cy)?)
        }
    })
}

struct SvgWriter {
    writer: Writer<Vec<u8>>,
}

impl SvgWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn finish(self) -> BrandloomResult<String> {
        String::from_utf8(self.writer.into_inner()).map_err(xml_error)
    }

    fn event<'a>(&mut self, event: Event<'a>) -> BrandloomResult<()> {
        self.writer.write_event(event).map_err(xml_error)
    }

    fn start(&mut self, elem: BytesStart<'_>) -> BrandloomResult<()> {
        self.event(Event::Start(elem))
    }

    fn end(&mut self, name: &str) -> BrandloomResult<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, elem: BytesStart<'_>) -> BrandloomResult<()> {
        self.event(Event::Empty(elem))
    }

    fn document(&mut self, scene: &Scene, width: f64, height: f64) -> BrandloomResult<()> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.event(Event::DocType(BytesText::from_escaped(SVG_DOCTYPE)))?;

        let view_box = format!("0 0 {} {}", num(scene.width)?, num(scene.height)?);
        let mut svg = BytesStart::new("svg");
        svg.push_attribute(("xmlns", SVG_NS));
        svg.push_attribute(("width", num(width)?.as_str()));
        svg.push_attribute(("height", num(height)?.as_str()));
        svg.push_attribute(("viewBox", view_box.as_str()));
        self.start(svg)?;

        if let Some(title) = &scene.title {
            self.start(BytesStart::new("title"))?;
            self.event(Event::Text(BytesText::new(title)))?;
            self.end("title")?;
        }
        if let Some(background) = scene.background {
            self.rect(&RectNode::new(Rect::new(0.0, 0.0, scene.width, scene.height), background))?;
        }

        self.group(&scene.root)?;
        self.end("svg")
    }

    fn node(&mut self, node: &Node) -> BrandloomResult<()> {
        match node {
            Node::Rect(rect) => self.rect(rect),
            Node::Path(stroke) => self.stroke("path", stroke),
            Node::Polyline(stroke) => self.stroke("polyline", stroke),
            Node::Group(group) => self.group(group),
        }
    }

    fn rect(&mut self, node: &RectNode) -> BrandloomResult<()> {
        let r = node.rect;
        let fill = node.fill.to_hex();
        let mut elem = BytesStart::new("rect");
        elem.push_attribute(("x", num(r.x)?.as_str()));
        elem.push_attribute(("y", num(r.y)?.as_str()));
        elem.push_attribute(("width", num(r.width.max(0.0))?.as_str()));
        elem.push_attribute(("height", num(r.height.max(0.0))?.as_str()));
        elem.push_attribute(("fill", fill.as_str()));
        if node.opacity != 1.0 {
            elem.push_attribute(("opacity", num(node.opacity)?.as_str()));
        }
        self.empty(elem)
    }

    fn stroke(&mut self, tag: &str, node: &StrokeNode) -> BrandloomResult<()> {
        let stroke = node.stroke.to_hex();
        let mut elem = BytesStart::new(tag);
        if tag == "path" {
            elem.push_attribute(("d", path_data(&node.points)?.as_str()));
        } else {
            elem.push_attribute(("points", points_attr(&node.points)?.as_str()));
        }
        elem.push_attribute(("fill", "none"));
        elem.push_attribute(("stroke", stroke.as_str()));
        elem.push_attribute(("stroke-width", num(node.stroke_width)?.as_str()));
        elem.push_attribute(("stroke-linecap", "butt"));
        elem.push_attribute(("stroke-linejoin", "miter"));
        if node.opacity != 1.0 {
            elem.push_attribute(("opacity", num(node.opacity)?.as_str()));
        }
        self.empty(elem)
    }

    fn group(&mut self, group: &Group) -> BrandloomResult<()> {
        let has_defs = group.filter.is_some() || group.clip.is_some() || group.mask.is_some();
        if has_defs {
            self.start(BytesStart::new("defs"))?;
            if let Some(filter) = &group.filter {
                self.filter(filter)?;
            }
            if let Some(clip) = &group.clip {
                self.clip(clip)?;
            }
            if let Some(mask) = &group.mask {
                self.mask(mask)?;
            }
            self.end("defs")?;
        }

        let mut elem = BytesStart::new("g");
        if let Some(id) = &group.id {
            elem.push_attribute(("id", id.as_str()));
        }
        if let Some(transform) = &group.transform {
            elem.push_attribute(("transform", transform_attr(transform)?.as_str()));
        }
        if let Some(filter) = &group.filter {
            elem.push_attribute(("filter", format!("url(#{})", filter.id).as_str()));
        }
        if let Some(clip) = &group.clip {
            elem.push_attribute(("clip-path", format!("url(#{})", clip.id).as_str()));
        }
        if let Some(mask) = &group.mask {
            elem.push_attribute(("mask", format!("url(#{})", mask.id).as_str()));
        }

        if group.children.is_empty() {
            return self.empty(elem);
        }
        self.start(elem)?;
        for child in &group.children {
            self.node(child)?;
        }
        self.end("g")
    }

    fn filter(&mut self, filter: &BlurFilter) -> BrandloomResult<()> {
        let mut elem = BytesStart::new("filter");
        elem.push_attribute(("id", filter.id.as_str()));
        elem.push_attribute(("x", "-50%"));
        elem.push_attribute(("y", "-50%"));
        elem.push_attribute(("width", "200%"));
        elem.push_attribute(("height", "200%"));
        self.start(elem)?;

        let mut blur = BytesStart::new("feGaussianBlur");
        blur.push_attribute(("in", "SourceGraphic"));
        blur.push_attribute(("stdDeviation", num(filter.std_deviation)?.as_str()));
        blur.push_attribute(("result", "blurred"));
        self.empty(blur)?;

        if filter.noise_dither {
            self.empty(BytesStart::new("feTurbulence").with_attributes([
                ("type", "fractalNoise"),
                ("baseFrequency", "0.8"),
                ("numOctaves", "3"),
                ("stitchTiles", "stitch"),
                ("result", "noise"),
            ]))?;
            self.empty(BytesStart::new("feColorMatrix").with_attributes([
                ("type", "matrix"),
                ("values", "1 0 0 0 0  0 1 0 0 0  0 0 1 0 0  0 0 0 0.04 0"),
                ("in", "noise"),
                ("result", "weakNoise"),
            ]))?;
            self.empty(BytesStart::new("feComposite").with_attributes([
                ("operator", "in"),
                ("in", "weakNoise"),
                ("in2", "blurred"),
                ("result", "noiseOverlay"),
            ]))?;
            self.empty(BytesStart::new("feBlend").with_attributes([
                ("mode", "overlay"),
                ("in", "noiseOverlay"),
                ("in2", "blurred"),
            ]))?;
        }
        self.end("filter")
    }

    fn clip(&mut self, clip: &ClipRect) -> BrandloomResult<()> {
        let mut elem = BytesStart::new("clipPath");
        elem.push_attribute(("id", clip.id.as_str()));
        self.start(elem)?;
        let r = clip.rect;
        let mut rect = BytesStart::new("rect");
        rect.push_attribute(("x", num(r.x)?.as_str()));
        rect.push_attribute(("y", num(r.y)?.as_str()));
        rect.push_attribute(("width", num(r.width.max(0.0))?.as_str()));
        rect.push_attribute(("height", num(r.height.max(0.0))?.as_str()));
        self.empty(rect)?;
        self.end("clipPath")
    }

    fn mask(&mut self, mask: &Mask) -> BrandloomResult<()> {
        let mut elem = BytesStart::new("mask");
        elem.push_attribute(("id", mask.id.as_str()));
        self.start(elem)?;
        for child in &mask.children {
            self.node(child)?;
        }
        self.end("mask")
    }
}
