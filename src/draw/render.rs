//! Cairo-based compositing and raster export.
//!
//! The compositor draws a background image scaled to the output size and
//! then every drawing item in list order. Rendering never mutates the
//! document; export callers receive an owned `cairo::ImageSurface` they
//! can encode or hand off.

use std::io::Read;
use std::path::Path as FsPath;

use thiserror::Error;

use super::path::{Path, PathSeg};
use super::shape::{Item, ItemKind, Shape, Text};

/// Errors that can occur while compositing or exporting.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Native-size export was requested but no background image is set.
    #[error("no background image set")]
    NoBackground,

    /// The requested output size has a non-positive dimension.
    #[error("invalid output size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("png i/o error: {0}")]
    Png(#[from] cairo::IoError),
}

/// A background image decoded into a cairo surface.
#[derive(Clone)]
pub struct Background {
    surface: cairo::ImageSurface,
}

impl Background {
    /// Wraps an existing image surface.
    pub fn from_surface(surface: cairo::ImageSurface) -> Self {
        Self { surface }
    }

    /// Loads a PNG file from disk.
    pub fn from_png_path(path: impl AsRef<FsPath>) -> Result<Self, RenderError> {
        let mut file = std::fs::File::open(path.as_ref())
            .map_err(|err| RenderError::Png(cairo::IoError::Io(err)))?;
        Self::from_png_reader(&mut file)
    }

    /// Decodes a PNG stream.
    pub fn from_png_reader<R: Read>(reader: &mut R) -> Result<Self, RenderError> {
        let surface = cairo::ImageSurface::create_from_png(reader)?;
        Ok(Self { surface })
    }

    /// Native pixel width of the image.
    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    /// Native pixel height of the image.
    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }
}

impl std::fmt::Debug for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Background")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Composites the background and all items into a new raster surface.
///
/// The background (if any) is scaled to fill the output exactly; items are
/// drawn in list order (first = bottom layer) using their stored styles.
/// Item geometry is taken as-is: callers exporting at a different
/// resolution transform the items first.
pub fn compose(
    background: Option<&Background>,
    items: &[Item],
    width: i32,
    height: i32,
) -> Result<cairo::ImageSurface, RenderError> {
    if width <= 0 || height <= 0 {
        return Err(RenderError::InvalidSize { width, height });
    }

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
    let ctx = cairo::Context::new(&surface)?;

    if let Some(bg) = background {
        ctx.save()?;
        ctx.scale(
            width as f64 / bg.width() as f64,
            height as f64 / bg.height() as f64,
        );
        ctx.set_source_surface(bg.surface(), 0.0, 0.0)?;
        ctx.paint()?;
        ctx.restore()?;
    }

    render_items(&ctx, items);
    drop(ctx);
    Ok(surface)
}

/// Encodes a rendered surface as a PNG file.
pub fn write_png(surface: &cairo::ImageSurface, path: impl AsRef<FsPath>) -> Result<(), RenderError> {
    let mut file = std::fs::File::create(path.as_ref())
        .map_err(|err| RenderError::Png(cairo::IoError::Io(err)))?;
    surface.write_to_png(&mut file)?;
    Ok(())
}

/// Renders all items to a Cairo context in list order.
pub fn render_items(ctx: &cairo::Context, items: &[Item]) {
    for item in items {
        render_item(ctx, item);
    }
}

/// Renders a single drawing item.
pub fn render_item(ctx: &cairo::Context, item: &Item) {
    match item.kind() {
        ItemKind::Shape(shape) => render_shape(ctx, shape),
        ItemKind::Text(text) => render_text(ctx, text),
    }
}

/// Renders a styled shape: optional fill first, then the stroked outline.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape) {
    if shape.path().is_empty() {
        return;
    }

    ctx.save().ok();
    apply_path(ctx, shape.path());

    if let Some(fill) = shape.fill_color() {
        ctx.set_source_rgba(fill.r, fill.g, fill.b, fill.a);
        let _ = ctx.fill_preserve();
    }

    let stroke = shape.stroke_color();
    ctx.set_source_rgba(stroke.r, stroke.g, stroke.b, stroke.a);
    ctx.set_line_width(shape.line_width());
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
    match shape.dash_pattern() {
        Some(dash) => ctx.set_dash(dash, 0.0),
        None => ctx.set_dash(&[], 0.0),
    }
    let _ = ctx.stroke();
    ctx.restore().ok();
}

/// Replays a [`Path`] onto the Cairo context.
fn apply_path(ctx: &cairo::Context, path: &Path) {
    ctx.new_path();
    for sub in path.subpaths() {
        ctx.move_to(sub.start.x, sub.start.y);
        for seg in &sub.segs {
            match *seg {
                PathSeg::Line(p) => ctx.line_to(p.x, p.y),
                PathSeg::Curve { c1, c2, to } => {
                    ctx.curve_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y)
                }
            }
        }
        if sub.closed {
            ctx.close_path();
        }
    }
}

/// Renders a text item with Pango at its origin (top-left of the layout).
///
/// Pango handles newlines, so multi-line annotations lay out with proper
/// line spacing from the font metrics.
pub fn render_text(ctx: &cairo::Context, text: &Text) {
    if text.text().is_empty() {
        return;
    }

    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = pangocairo::functions::create_layout(ctx);
    let attrs = text.attributes();
    let font_desc =
        pango::FontDescription::from_string(&attrs.font.to_pango_string(attrs.size));
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text.text());

    let origin = text.origin();
    ctx.move_to(origin.x, origin.y);
    ctx.set_source_rgba(attrs.color.r, attrs.color.g, attrs.color.b, attrs.color.a);
    pangocairo::functions::show_layout(ctx, &layout);
    ctx.restore().ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};
    use crate::draw::geometry;
    use crate::draw::shape::TextAttributes;
    use crate::util::{Point, Rect};

    fn sample_items() -> Vec<Item> {
        let mut frame = crate::draw::Frame::new();
        frame.add_shape(Shape::new(
            geometry::rect_path(Rect::new(10.0, 10.0, 40.0, 30.0)),
            RED,
            Some(BLUE),
            2.0,
            Some(vec![4.0, 2.0]),
        ));
        frame.add_text(Text::new(
            "hello",
            Point::new(5.0, 60.0),
            TextAttributes::default(),
        ));
        frame.take_all()
    }

    #[test]
    fn compose_produces_the_requested_size() {
        let surface = compose(None, &sample_items(), 320, 240).unwrap();
        assert_eq!(surface.width(), 320);
        assert_eq!(surface.height(), 240);
    }

    #[test]
    fn compose_rejects_degenerate_sizes() {
        assert!(matches!(
            compose(None, &[], 0, 100),
            Err(RenderError::InvalidSize { .. })
        ));
    }

    #[test]
    fn background_round_trips_through_png() {
        let source = cairo::ImageSurface::create(cairo::Format::ARgb32, 64, 48).unwrap();
        let mut bytes = Vec::new();
        source.write_to_png(&mut bytes).unwrap();

        let bg = Background::from_png_reader(&mut bytes.as_slice()).unwrap();
        assert_eq!(bg.width(), 64);
        assert_eq!(bg.height(), 48);
    }

    #[test]
    fn compose_with_background_scales_it_to_the_output() {
        let source = cairo::ImageSurface::create(cairo::Format::ARgb32, 64, 48).unwrap();
        let bg = Background::from_surface(source);
        let surface = compose(Some(&bg), &[], 128, 96).unwrap();
        assert_eq!(surface.width(), 128);
        assert_eq!(surface.height(), 96);
    }

    #[test]
    fn write_png_creates_a_decodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let surface = compose(None, &sample_items(), 100, 80).unwrap();
        write_png(&surface, &path).unwrap();

        let restored = Background::from_png_path(&path).unwrap();
        assert_eq!(restored.width(), 100);
        assert_eq!(restored.height(), 80);
    }
}
