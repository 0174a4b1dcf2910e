//! Headless annotation canvas engine.
//!
//! markboard maintains an ordered list of vector shapes and text items
//! drawn over an optional background image. Callers feed it pointer
//! events in canvas-local coordinates, set tool/style parameters, and ask
//! for undo/redo, selection, resize transforms, and raster export. The
//! engine owns no windows and reads no display state: the canvas size is
//! an explicit parameter, which keeps everything testable headless.

pub mod config;
pub mod draw;
pub mod engine;
pub mod util;

pub use config::Config;
pub use draw::{Background, Color, Frame, Item, ItemId, RenderError, Shape, Text};
pub use engine::{CanvasEngine, StyleState, Tool};
pub use util::{Point, Rect, Size};
