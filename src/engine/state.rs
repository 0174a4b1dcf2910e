//! Canvas engine: the pointer-driven drawing state machine.
//!
//! [`CanvasEngine`] is the single entry point callers interact with. It
//! consumes pointer events in canvas-local coordinates, holds the current
//! tool and style parameters, owns the drawing list and its history, and
//! answers selection/export queries. All mutation happens synchronously
//! inside one public call, so a single-threaded caller never observes a
//! partially-applied operation.

use crate::draw::frame::Frame;
use crate::draw::geometry;
use crate::draw::path::Path;
use crate::draw::render::{self, Background, RenderError};
use crate::draw::shape::{Item, ItemId, ItemKind, Shape, Text, TextAttributes};
use crate::draw::{Color, FontDescriptor, color};
use crate::util::{Point, Rect, Size};

use super::history::{History, HistoryEntry};
use super::hit_test;
use super::tool::Tool;
use super::transform;

/// Content given to freshly placed text items.
///
/// The hosting application replaces it through `update_selected_text`
/// once its text editor closes.
pub const TEXT_PLACEHOLDER: &str = "Text";

/// Single-slot callback invoked after every selection change.
///
/// The payload is the stable id of the newly selected item (`None` when
/// the selection was cleared); callers resolve it through
/// [`CanvasEngine::selected_item`].
pub type SelectionObserver = Box<dyn FnMut(Option<ItemId>)>;

/// Current drawing mode state machine.
///
/// Tracks whether the user is idle, constructing a new item, dragging a
/// selected item, or erasing. State transitions occur on pointer events.
#[derive(Debug)]
pub enum DrawingState {
    /// Not actively drawing - waiting for input
    Idle,
    /// Constructing a new item (pointer held down)
    Drawing {
        /// Tool the construction started with
        tool: Tool,
        /// Where the pointer was pressed
        anchor: Point,
        /// Latest pointer position
        current: Point,
        /// Accumulated points for freehand drawing
        points: Vec<Point>,
    },
    /// Dragging the selected item (selector tool)
    Editing {
        /// Id of the item being dragged
        id: ItemId,
        /// Last pointer position (for delta translation)
        last: Point,
        /// Snapshot taken at pointer-down, recorded on release
        before: Item,
        /// Whether the pointer actually moved
        moved: bool,
    },
    /// Removing items the pointer passes over (eraser tool)
    Erasing,
}

/// Style parameters applied to newly constructed items.
#[derive(Debug, Clone)]
pub struct StyleState {
    /// Stroke color for shapes and fill color for new text
    pub stroke_color: Color,
    /// Optional fill color for closed shapes
    pub fill_color: Option<Color>,
    /// Stroke width in logical units
    pub line_width: f64,
    /// Optional dash pattern (on/off run lengths)
    pub dash_pattern: Option<Vec<f64>>,
    /// Font size for new text items, in points
    pub font_size: f64,
    /// Font for new text items
    pub font: FontDescriptor,
    /// Arrowhead length in logical units
    pub arrow_length: f64,
    /// Arrowhead angle in degrees
    pub arrow_angle: f64,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            stroke_color: color::RED,
            fill_color: None,
            line_width: 3.0,
            dash_pattern: None,
            font_size: 32.0,
            font: FontDescriptor::default(),
            arrow_length: 20.0,
            arrow_angle: 30.0,
        }
    }
}

/// The annotation engine: drawing list, history, tool state, and export.
pub struct CanvasEngine {
    frame: Frame,
    history: History,
    state: DrawingState,
    tool: Tool,
    style: StyleState,
    canvas_size: Size,
    /// Display pixel density used by device-scaled capture.
    scale_factor: f64,
    background: Option<Background>,
    selection: Option<ItemId>,
    observer: Option<SelectionObserver>,
    needs_redraw: bool,
}

impl CanvasEngine {
    /// Creates an engine with default style for the given logical canvas
    /// size.
    pub fn new(canvas_size: Size) -> Self {
        Self::with_style(canvas_size, StyleState::default())
    }

    /// Creates an engine with explicit initial style parameters.
    pub fn with_style(canvas_size: Size, style: StyleState) -> Self {
        Self {
            frame: Frame::new(),
            history: History::new(),
            state: DrawingState::Idle,
            tool: Tool::Pen,
            style,
            canvas_size,
            scale_factor: 1.0,
            background: None,
            selection: None,
            observer: None,
            needs_redraw: true,
        }
    }

    // ------------------------------------------------------------------
    // Tool and style parameters
    // ------------------------------------------------------------------

    /// Switches the active tool, abandoning any in-progress construction.
    pub fn set_tool(&mut self, tool: Tool) {
        if !matches!(self.state, DrawingState::Idle) {
            self.pointer_cancel();
        }
        self.tool = tool;
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.style.stroke_color = color;
    }

    pub fn set_fill_color(&mut self, color: Option<Color>) {
        self.style.fill_color = color;
    }

    pub fn set_line_width(&mut self, line_width: f64) {
        self.style.line_width = line_width;
    }

    pub fn set_dash_pattern(&mut self, pattern: Option<Vec<f64>>) {
        self.style.dash_pattern = pattern;
    }

    pub fn set_font_size(&mut self, size: f64) {
        self.style.font_size = size;
    }

    pub fn set_font(&mut self, font: FontDescriptor) {
        self.style.font = font;
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    /// Sets the display pixel density used by device-scaled capture.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor.is_finite() && scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        } else {
            log::warn!("Ignoring invalid scale factor {scale_factor}");
        }
    }

    /// Sets the background image items are drawn over.
    pub fn set_background(&mut self, background: Background) {
        log::debug!(
            "Background set to {}x{}",
            background.width(),
            background.height()
        );
        self.background = Some(background);
        self.needs_redraw = true;
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    /// Registers the single selection observer, replacing any previous
    /// one. The observer fires after every operation that changes the
    /// selection.
    pub fn set_selection_observer(&mut self, observer: SelectionObserver) {
        self.observer = Some(observer);
    }

    // ------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------

    /// Processes a pointer-press at canvas coordinates.
    ///
    /// Selector: hit-test and select (or clear the selection) and begin a
    /// drag. Eraser: remove the topmost item under the point and keep
    /// erasing while the pointer stays down. Any other tool: anchor a new
    /// construction.
    pub fn pointer_down(&mut self, p: Point) {
        if !matches!(self.state, DrawingState::Idle) {
            // Stale state from a missed release; abandon it first
            self.pointer_cancel();
        }
        match self.tool {
            Tool::Selector => {
                let hit = hit_test::hit_test(self.frame.items(), p);
                self.set_selection(hit);
                if let Some(id) = hit
                    && let Some(item) = self.frame.get(id)
                {
                    self.state = DrawingState::Editing {
                        id,
                        last: p,
                        before: item.clone(),
                        moved: false,
                    };
                }
            }
            Tool::Eraser => {
                self.state = DrawingState::Erasing;
                self.erase_at(p);
            }
            tool => {
                self.state = DrawingState::Drawing {
                    tool,
                    anchor: p,
                    current: p,
                    points: vec![p],
                };
                self.needs_redraw = true;
            }
        }
    }

    /// Processes pointer motion while the pointer is down.
    pub fn pointer_move(&mut self, p: Point) {
        if matches!(self.state, DrawingState::Erasing) {
            self.erase_at(p);
            return;
        }
        match &mut self.state {
            DrawingState::Drawing {
                tool,
                current,
                points,
                ..
            } => {
                if *tool == Tool::Pen {
                    points.push(p);
                }
                *current = p;
                self.needs_redraw = true;
            }
            DrawingState::Editing {
                id, last, moved, ..
            } => {
                let dx = p.x - last.x;
                let dy = p.y - last.y;
                *last = p;
                if dx == 0.0 && dy == 0.0 {
                    return;
                }
                *moved = true;
                let id = *id;
                if let Some(item) = self.frame.get_mut(id) {
                    item.translate(dx, dy);
                }
                self.needs_redraw = true;
            }
            DrawingState::Idle | DrawingState::Erasing => {}
        }
    }

    /// Processes pointer release, finalizing the in-progress operation.
    pub fn pointer_up(&mut self, p: Point) {
        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Drawing {
                tool,
                anchor,
                points,
                ..
            } => {
                self.finish_construction(tool, anchor, p, points);
            }
            DrawingState::Editing {
                id, before, moved, ..
            } => {
                if moved && let Some(item) = self.frame.get(id) {
                    self.history.record(HistoryEntry::Mutate {
                        before,
                        after: item.clone(),
                    });
                }
                self.needs_redraw = true;
            }
            DrawingState::Erasing => {
                self.erase_at(p);
            }
            DrawingState::Idle => {}
        }
    }

    /// Abandons the in-progress operation without touching history.
    ///
    /// A cancelled drag-edit restores the item's pointer-down snapshot.
    pub fn pointer_cancel(&mut self) {
        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Drawing { tool, .. } => {
                log::debug!("Cancelled in-progress {} construction", tool.label());
                self.needs_redraw = true;
            }
            DrawingState::Editing { before, moved, .. } => {
                if moved {
                    self.frame.replace(before);
                }
                self.needs_redraw = true;
            }
            DrawingState::Idle | DrawingState::Erasing => {}
        }
    }

    /// Returns the in-progress item for live preview, if any.
    ///
    /// The provisional item is not part of the drawing list and never
    /// touches history; callers render it on top of `items()`.
    pub fn provisional_item(&self) -> Option<ItemKind> {
        let DrawingState::Drawing {
            tool,
            anchor,
            current,
            points,
        } = &self.state
        else {
            return None;
        };
        let path = self.construction_path(*tool, *anchor, *current, points);
        if path.is_empty() {
            return None;
        }
        Some(ItemKind::Shape(self.styled_shape(path)))
    }

    // ------------------------------------------------------------------
    // History operations
    // ------------------------------------------------------------------

    /// Undoes the most recent mutation. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let applied = self.history.undo(&mut self.frame);
        if applied {
            self.after_history_change();
        }
        applied
    }

    /// Reapplies the most recently undone mutation. Returns `false` when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let applied = self.history.redo(&mut self.frame);
        if applied {
            self.after_history_change();
        }
        applied
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Clears the drawing, keeping a recoverable snapshot (undo also
    /// restores it). Returns `false` for an already-empty drawing.
    pub fn clear_drawing(&mut self) -> bool {
        let cleared = self.history.clear_drawing(&mut self.frame);
        if cleared {
            self.after_history_change();
        }
        cleared
    }

    /// Restores the full pre-clear drawing and resets history entirely.
    /// Returns `false` when nothing was cleared since the last mutation.
    pub fn restore_all_drawing(&mut self) -> bool {
        let restored = self.history.restore_all(&mut self.frame);
        if restored {
            self.after_history_change();
        }
        restored
    }

    fn after_history_change(&mut self) {
        self.needs_redraw = true;
        if let Some(id) = self.selection
            && !self.frame.contains(id)
        {
            self.set_selection(None);
        }
    }

    // ------------------------------------------------------------------
    // Selection and per-item style edits
    // ------------------------------------------------------------------

    pub fn selection(&self) -> Option<ItemId> {
        self.selection
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.frame.get(self.selection?)
    }

    /// Recolors the selected item's stroke (shape) or glyphs (text).
    pub fn update_selected_stroke_color(&mut self, color: Color) -> bool {
        self.mutate_selected(|item| match item.kind_mut() {
            ItemKind::Shape(shape) => {
                shape.set_stroke_color(color);
                true
            }
            ItemKind::Text(text) => {
                text.set_color(color);
                true
            }
        })
    }

    /// Updates the selected shape's fill color; no-op for text.
    pub fn update_selected_fill_color(&mut self, color: Option<Color>) -> bool {
        self.mutate_selected(|item| match item.kind_mut() {
            ItemKind::Shape(shape) => {
                shape.set_fill_color(color);
                true
            }
            ItemKind::Text(_) => false,
        })
    }

    /// Updates the selected shape's line width; no-op for text.
    pub fn update_selected_line_width(&mut self, line_width: f64) -> bool {
        self.mutate_selected(|item| match item.kind_mut() {
            ItemKind::Shape(shape) => {
                shape.set_line_width(line_width);
                true
            }
            ItemKind::Text(_) => false,
        })
    }

    /// Updates the selected shape's dash pattern; no-op for text.
    pub fn update_selected_dash_pattern(&mut self, pattern: Option<Vec<f64>>) -> bool {
        self.mutate_selected(|item| match item.kind_mut() {
            ItemKind::Shape(shape) => {
                shape.set_dash_pattern(pattern);
                true
            }
            ItemKind::Text(_) => false,
        })
    }

    /// Replaces the selected text item's content; no-op for shapes.
    pub fn update_selected_text(&mut self, content: &str) -> bool {
        let content = content.to_string();
        self.mutate_selected(|item| match item.kind_mut() {
            ItemKind::Text(text) => {
                text.set_text(content);
                true
            }
            ItemKind::Shape(_) => false,
        })
    }

    /// Applies a style edit to the selection and records one mutate
    /// entry. Returns `false` when there is no selection, the edit does
    /// not apply to the item kind, or nothing actually changed.
    fn mutate_selected(&mut self, edit: impl FnOnce(&mut Item) -> bool) -> bool {
        let Some(id) = self.selection else {
            return false;
        };
        let Some(item) = self.frame.get_mut(id) else {
            return false;
        };
        let before = item.clone();
        if !edit(item) || *item == before {
            return false;
        }
        let after = item.clone();
        self.history.record(HistoryEntry::Mutate { before, after });
        self.needs_redraw = true;
        true
    }

    fn set_selection(&mut self, selection: Option<ItemId>) {
        if self.selection == selection {
            return;
        }
        self.selection = selection;
        self.needs_redraw = true;
        if let Some(observer) = &mut self.observer {
            observer(selection);
        }
    }

    // ------------------------------------------------------------------
    // Canvas geometry
    // ------------------------------------------------------------------

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Rescales the whole document from the current canvas size to
    /// `new_size`.
    ///
    /// Items embedded in history entries, the cleared buffer, and any
    /// in-progress pointer state are rescaled too, so undo/redo keep
    /// producing geometry in the current coordinate space. Degenerate
    /// sizes are a silent no-op.
    pub fn resize_canvas(&mut self, new_size: Size) {
        let old = self.canvas_size;
        if !transform::scale_items(self.frame.items_mut(), old, new_size) {
            return;
        }
        let sx = new_size.width / old.width;
        let sy = new_size.height / old.height;
        self.history.for_each_item_mut(|item| item.scale(sx, sy));

        let scale_point = |p: &mut Point| {
            p.x *= sx;
            p.y *= sy;
        };
        match &mut self.state {
            DrawingState::Drawing {
                anchor,
                current,
                points,
                ..
            } => {
                scale_point(anchor);
                scale_point(current);
                for p in points.iter_mut() {
                    scale_point(p);
                }
            }
            DrawingState::Editing { last, before, .. } => {
                scale_point(last);
                before.scale(sx, sy);
            }
            DrawingState::Idle | DrawingState::Erasing => {}
        }

        self.canvas_size = new_size;
        self.needs_redraw = true;
        log::debug!(
            "Canvas resized {}x{} -> {}x{}",
            old.width,
            old.height,
            new_size.width,
            new_size.height
        );
    }

    // ------------------------------------------------------------------
    // Queries and export
    // ------------------------------------------------------------------

    /// All committed items in z-order (first = bottom layer).
    pub fn items(&self) -> &[Item] {
        self.frame.items()
    }

    /// Whether the canvas changed since the flag was last taken.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Clears and returns the redraw flag.
    pub fn take_needs_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.needs_redraw, false)
    }

    /// Renders background plus items into a raster image.
    ///
    /// Device mode (`native_size == false`) renders at the canvas size
    /// times the display scale factor. Native mode renders at the
    /// background image's pixel size — geometry is transformed from the
    /// canvas space first, and the output dimensions are guaranteed to
    /// match the background exactly; without a background it fails with
    /// [`RenderError::NoBackground`].
    pub fn capture_image(&self, native_size: bool) -> Result<cairo::ImageSurface, RenderError> {
        if native_size {
            let bg = self.background.as_ref().ok_or(RenderError::NoBackground)?;
            let target = Size::new(f64::from(bg.width()), f64::from(bg.height()));
            let mut items = self.frame.items().to_vec();
            transform::scale_items(&mut items, self.canvas_size, target);
            render::compose(Some(bg), &items, bg.width(), bg.height())
        } else {
            let target = Size::new(
                self.canvas_size.width * self.scale_factor,
                self.canvas_size.height * self.scale_factor,
            );
            let mut items = self.frame.items().to_vec();
            if self.scale_factor != 1.0 {
                transform::scale_items(&mut items, self.canvas_size, target);
            }
            render::compose(
                self.background.as_ref(),
                &items,
                target.width.round() as i32,
                target.height.round() as i32,
            )
        }
    }

    // ------------------------------------------------------------------
    // Construction internals
    // ------------------------------------------------------------------

    fn finish_construction(&mut self, tool: Tool, anchor: Point, release: Point, points: Vec<Point>) {
        if tool == Tool::TextBox {
            let attributes = TextAttributes {
                font: self.style.font.clone(),
                size: self.style.font_size,
                color: self.style.stroke_color,
            };
            let id = self
                .frame
                .add_text(Text::new(TEXT_PLACEHOLDER, release, attributes));
            self.record_add(id);
            return;
        }

        let mut points = points;
        if points.last() != Some(&release) {
            points.push(release);
        }
        let path = self.construction_path(tool, anchor, release, &points);
        if path.is_empty() {
            log::debug!("Discarding degenerate {} construction", tool.label());
            self.needs_redraw = true;
            return;
        }
        let id = self.frame.add_shape(self.styled_shape(path));
        self.record_add(id);
    }

    fn record_add(&mut self, id: ItemId) {
        if let Some(item) = self.frame.get(id) {
            log::debug!("Committed item {id}");
            self.history.record(HistoryEntry::Add { item: item.clone() });
        }
        self.needs_redraw = true;
    }

    fn styled_shape(&self, path: Path) -> Shape {
        Shape::new(
            path,
            self.style.stroke_color,
            self.style.fill_color,
            self.style.line_width,
            self.style.dash_pattern.clone(),
        )
    }

    /// Builds the geometry for a construction tool from the drag state.
    fn construction_path(&self, tool: Tool, anchor: Point, current: Point, points: &[Point]) -> Path {
        let rect = Rect::from_points(anchor, current);
        match tool {
            Tool::Pen => geometry::freehand_path(points),
            Tool::Line => geometry::line_path(anchor, current),
            Tool::Arrow => geometry::arrow_path(
                anchor,
                current,
                self.style.arrow_length,
                self.style.arrow_angle,
            ),
            Tool::Rectangle => geometry::rect_path(rect),
            Tool::Oval => geometry::oval_path(rect),
            Tool::Circle => geometry::circle_path(rect),
            Tool::Triangle => geometry::triangle_path(rect),
            Tool::Pentagon => geometry::pentagon_path(rect),
            Tool::Trapezoid => geometry::trapezoid_path(rect),
            Tool::Diamond => geometry::diamond_path(rect),
            Tool::Star => geometry::star_path(rect),
            Tool::SineWave => geometry::sine_path(rect),
            Tool::CosineWave => geometry::cosine_path(rect),
            Tool::CoordinateSystem => geometry::axes_path(rect),
            Tool::Pyramid => geometry::pyramid_path(rect),
            Tool::Cone => geometry::cone_path(rect),
            Tool::Cylinder => geometry::cylinder_path(rect),
            Tool::Cube => geometry::cube_path(rect),
            Tool::TextBox | Tool::Selector | Tool::Eraser => Path::new(),
        }
    }

    fn erase_at(&mut self, p: Point) {
        if let Some(id) = hit_test::hit_test(self.frame.items(), p)
            && let Some((index, item)) = self.frame.remove(id)
        {
            log::debug!("Erased item {id} at z-index {index}");
            self.history.record(HistoryEntry::Remove { item, index });
            if self.selection == Some(id) {
                self.set_selection(None);
            }
            self.needs_redraw = true;
        }
    }
}
