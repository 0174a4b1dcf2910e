//! Drawing tool selection.

/// Drawing tool selection.
///
/// The active tool determines what happens when the caller feeds pointer
/// events to the engine: construction tools create a new shape from the
/// drag, the text-box tool places a text item on release, and the
/// selector/eraser tools operate on existing items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Freehand drawing - polyline through the raw pointer path
    Pen,
    /// Straight line between press and release points
    Line,
    /// Straight line with an arrowhead at the release point
    Arrow,
    /// Places a text item at the release point
    TextBox,
    /// Rectangle outline from corner to corner
    Rectangle,
    /// Ellipse inscribed in the drag rectangle
    Oval,
    /// True circle (diameter = smaller drag extent)
    Circle,
    /// Isosceles triangle
    Triangle,
    /// Regular pentagon
    Pentagon,
    /// Trapezoid with an inset top edge
    Trapezoid,
    /// Diamond through the drag rectangle's edge midpoints
    Diamond,
    /// Five-pointed star
    Star,
    /// Sine wave across the drag rectangle
    SineWave,
    /// Cosine wave across the drag rectangle
    CosineWave,
    /// Perpendicular axes with arrowheads
    CoordinateSystem,
    /// Tetrahedron line art
    Pyramid,
    /// Cone line art
    Cone,
    /// Cylinder line art
    Cylinder,
    /// Cube wireframe
    Cube,
    /// Selects and drags existing items
    Selector,
    /// Removes items under the pointer
    Eraser,
}

impl Tool {
    /// Every tool, in palette order. Used by the demo CLI showcase.
    pub const ALL: [Tool; 21] = [
        Tool::Pen,
        Tool::Line,
        Tool::Arrow,
        Tool::TextBox,
        Tool::Rectangle,
        Tool::Oval,
        Tool::Circle,
        Tool::Triangle,
        Tool::Pentagon,
        Tool::Trapezoid,
        Tool::Diamond,
        Tool::Star,
        Tool::SineWave,
        Tool::CosineWave,
        Tool::CoordinateSystem,
        Tool::Pyramid,
        Tool::Cone,
        Tool::Cylinder,
        Tool::Cube,
        Tool::Selector,
        Tool::Eraser,
    ];

    /// True for tools that construct a new item from a pointer drag.
    pub fn creates_items(&self) -> bool {
        !matches!(self, Tool::Selector | Tool::Eraser)
    }

    /// Human-readable tool name for logs and the demo CLI.
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Line => "line",
            Tool::Arrow => "arrow",
            Tool::TextBox => "text-box",
            Tool::Rectangle => "rectangle",
            Tool::Oval => "oval",
            Tool::Circle => "circle",
            Tool::Triangle => "triangle",
            Tool::Pentagon => "pentagon",
            Tool::Trapezoid => "trapezoid",
            Tool::Diamond => "diamond",
            Tool::Star => "star",
            Tool::SineWave => "sine-wave",
            Tool::CosineWave => "cosine-wave",
            Tool::CoordinateSystem => "coordinate-system",
            Tool::Pyramid => "pyramid",
            Tool::Cone => "cone",
            Tool::Cylinder => "cylinder",
            Tool::Cube => "cube",
            Tool::Selector => "selector",
            Tool::Eraser => "eraser",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_operation_tools_skip_item_creation() {
        let constructors = Tool::ALL.iter().filter(|t| t.creates_items()).count();
        assert_eq!(constructors, 19);
        assert!(!Tool::Selector.creates_items());
        assert!(!Tool::Eraser.creates_items());
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<_> = Tool::ALL.iter().map(|t| t.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Tool::ALL.len());
    }
}
