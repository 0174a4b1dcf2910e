//! Drawing items: styled vector shapes and positioned text.
//!
//! A [`Shape`] pairs a [`Path`] with stroke/fill style and keeps its
//! bounding frame cached; the frame is recomputed inside every mutation
//! that changes geometry so it can never be read stale. A [`Text`] derives
//! its bounding rectangle on demand from font metrics instead, since
//! attribute edits are common. [`Item`] is the tagged union the drawing
//! list stores.

use super::color::Color;
use super::font::FontDescriptor;
use super::path::Path;
use crate::util::{Point, Rect};

/// Stable identity of a drawing item.
///
/// Ids are allocated monotonically by the drawing list and never reused,
/// so a held id doubles as a generation tag: once the item is removed the
/// id permanently stops resolving.
pub type ItemId = u64;

// ============================================================================
// Shape
// ============================================================================

/// A stroked (and optionally filled) vector path with style attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    path: Path,
    stroke_color: Color,
    fill_color: Option<Color>,
    line_width: f64,
    dash_pattern: Option<Vec<f64>>,
    /// Cached bounding frame: tight path bounds inflated by half the
    /// line width. `None` only for an empty path.
    frame: Option<Rect>,
}

impl Shape {
    /// Creates a shape and computes its bounding frame.
    ///
    /// A non-positive line width is clamped to a hairline rather than
    /// rejected, matching how degenerate style values are handled
    /// elsewhere.
    pub fn new(
        path: Path,
        stroke_color: Color,
        fill_color: Option<Color>,
        line_width: f64,
        dash_pattern: Option<Vec<f64>>,
    ) -> Self {
        let mut shape = Self {
            path,
            stroke_color,
            fill_color,
            line_width: sanitize_line_width(line_width),
            dash_pattern: sanitize_dash_pattern(dash_pattern),
            frame: None,
        };
        shape.recompute_frame();
        shape
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn dash_pattern(&self) -> Option<&[f64]> {
        self.dash_pattern.as_deref()
    }

    /// Bounding frame: tight path bounds inflated by `line_width / 2` on
    /// every side. `None` for an empty path.
    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }

    /// Replaces the geometry and recomputes the frame.
    pub fn set_path(&mut self, path: Path) {
        self.path = path;
        self.recompute_frame();
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    pub fn set_fill_color(&mut self, color: Option<Color>) {
        self.fill_color = color;
    }

    /// Updates the line width and recomputes the frame (the frame covers
    /// the stroked extent, so width changes move it).
    pub fn set_line_width(&mut self, line_width: f64) {
        self.line_width = sanitize_line_width(line_width);
        self.recompute_frame();
    }

    pub fn set_dash_pattern(&mut self, pattern: Option<Vec<f64>>) {
        self.dash_pattern = sanitize_dash_pattern(pattern);
    }

    /// Moves the shape by the given delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.path.translate(dx, dy);
        self.recompute_frame();
    }

    /// Scales geometry by independent X/Y factors and the stroke width by
    /// the geometric-mean factor, keeping stroke thickness visually
    /// undistorted under non-uniform scaling.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        let k = (sx * sy).sqrt();
        self.path.scale(sx, sy);
        self.line_width *= k;
        if let Some(dash) = &mut self.dash_pattern {
            for d in dash.iter_mut() {
                *d *= k;
            }
        }
        self.recompute_frame();
    }

    fn recompute_frame(&mut self) {
        self.frame = self
            .path
            .bounds()
            .map(|b| b.inflated(self.line_width / 2.0));
    }
}

fn sanitize_line_width(line_width: f64) -> f64 {
    if line_width.is_finite() && line_width > 0.0 {
        line_width
    } else {
        log::warn!("Invalid line width {line_width}, falling back to 1.0");
        1.0
    }
}

fn sanitize_dash_pattern(pattern: Option<Vec<f64>>) -> Option<Vec<f64>> {
    let pattern = pattern?;
    if pattern.is_empty() || pattern.iter().any(|d| !d.is_finite() || *d <= 0.0) {
        log::warn!("Invalid dash pattern {pattern:?}, falling back to solid stroke");
        return None;
    }
    Some(pattern)
}

// ============================================================================
// Text
// ============================================================================

/// Typed attribute set for a text item.
///
/// Invalid values sanitize to defaults instead of failing: text always
/// renders with *some* legible attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAttributes {
    /// Font family/weight/style used for layout and rendering.
    pub font: FontDescriptor,
    /// Font size in points.
    pub size: f64,
    /// Fill color of the glyphs.
    pub color: Color,
}

/// Font size bounds accepted before falling back to the default.
const MIN_FONT_SIZE: f64 = 1.0;
const MAX_FONT_SIZE: f64 = 512.0;
const DEFAULT_FONT_SIZE: f64 = 24.0;

impl TextAttributes {
    /// Returns a copy with out-of-range values replaced by defaults.
    pub fn sanitized(mut self) -> Self {
        if !self.size.is_finite() || !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.size) {
            log::warn!(
                "Invalid font size {}, falling back to {DEFAULT_FONT_SIZE}",
                self.size
            );
            self.size = DEFAULT_FONT_SIZE;
        }
        self
    }
}

impl Default for TextAttributes {
    fn default() -> Self {
        Self {
            font: FontDescriptor::default(),
            size: DEFAULT_FONT_SIZE,
            color: super::color::BLACK,
        }
    }
}

/// A positioned text annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    text: String,
    /// Top-left corner of the laid-out text block.
    origin: Point,
    attributes: TextAttributes,
}

impl Text {
    pub fn new(text: impl Into<String>, origin: Point, attributes: TextAttributes) -> Self {
        Self {
            text: text.into(),
            origin,
            attributes: attributes.sanitized(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn attributes(&self) -> &TextAttributes {
        &self.attributes
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_color(&mut self, color: Color) {
        self.attributes.color = color;
    }

    pub fn set_size(&mut self, size: f64) {
        self.attributes.size = size;
        self.attributes = self.attributes.clone().sanitized();
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.origin.x += dx;
        self.origin.y += dy;
    }

    pub(crate) fn scale(&mut self, sx: f64, sy: f64) {
        self.origin.x *= sx;
        self.origin.y *= sy;
        self.attributes.size *= (sx * sy).sqrt();
    }

    /// Bounding rectangle of the laid-out text.
    ///
    /// Derived on demand from Pango font metrics (never cached, since
    /// attribute edits are common). Returns `None` for empty text or when
    /// no scratch surface can be created.
    pub fn bounding_rect(&self) -> Option<Rect> {
        if self.text.is_empty() {
            return None;
        }

        // A tiny scratch surface; only the layout metrics are needed.
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1).ok()?;
        let ctx = cairo::Context::new(&surface).ok()?;
        let layout = pangocairo::functions::create_layout(&ctx);

        let font_desc =
            pango::FontDescription::from_string(&self.attributes.font.to_pango_string(self.attributes.size));
        layout.set_font_description(Some(&font_desc));
        layout.set_text(&self.text);

        let (_ink_rect, logical_rect) = layout.extents();
        let scale = pango::SCALE as f64;

        let rect = Rect::new(
            self.origin.x + logical_rect.x() as f64 / scale,
            self.origin.y + logical_rect.y() as f64 / scale,
            logical_rect.width() as f64 / scale,
            logical_rect.height() as f64 / scale,
        );
        rect.is_valid().then_some(rect)
    }
}

// ============================================================================
// Item
// ============================================================================

/// The payload of a drawing item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Shape(Shape),
    Text(Text),
}

/// One entry of the drawing list: an identity plus its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    kind: ItemKind,
}

impl Item {
    pub(crate) fn new(id: ItemId, kind: ItemKind) -> Self {
        Self { id, kind }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ItemKind {
        &mut self.kind
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match &self.kind {
            ItemKind::Shape(shape) => Some(shape),
            ItemKind::Text(_) => None,
        }
    }

    pub fn as_shape_mut(&mut self) -> Option<&mut Shape> {
        match &mut self.kind {
            ItemKind::Shape(shape) => Some(shape),
            ItemKind::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match &self.kind {
            ItemKind::Text(text) => Some(text),
            ItemKind::Shape(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match &mut self.kind {
            ItemKind::Text(text) => Some(text),
            ItemKind::Shape(_) => None,
        }
    }

    /// Bounding frame of the payload (stroke-inclusive for shapes,
    /// metrics-derived for text).
    pub fn frame(&self) -> Option<Rect> {
        match &self.kind {
            ItemKind::Shape(shape) => shape.frame(),
            ItemKind::Text(text) => text.bounding_rect(),
        }
    }

    /// Moves the item by the given delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match &mut self.kind {
            ItemKind::Shape(shape) => shape.translate(dx, dy),
            ItemKind::Text(text) => text.translate(dx, dy),
        }
    }

    /// Scales the item between coordinate spaces (geometry by independent
    /// factors, stroke/font sizes by the geometric mean).
    pub(crate) fn scale(&mut self, sx: f64, sy: f64) {
        match &mut self.kind {
            ItemKind::Shape(shape) => shape.scale(sx, sy),
            ItemKind::Text(text) => text.scale(sx, sy),
        }
    }
}
