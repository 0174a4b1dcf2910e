//! Point queries against the drawing list.
//!
//! Hit-testing scans the list from topmost (last) to bottommost (first)
//! and returns the first match, so overlapping items resolve to the one
//! drawn on top. Shapes match either by fill containment (when filled) or
//! by proximity to the stroked outline; text matches inside its derived
//! bounding rectangle.

use crate::draw::path::Path;
use crate::draw::shape::{Item, ItemId, ItemKind, Shape};
use crate::util::Point;

/// Extra pick radius around a stroked outline, in logical units.
///
/// Added on top of half the line width so hairline shapes stay clickable.
pub const HIT_TOLERANCE: f64 = 4.0;

/// Finds the topmost item containing the given point.
pub fn hit_test(items: &[Item], p: Point) -> Option<ItemId> {
    items.iter().rev().find_map(|item| {
        let hit = match item.kind() {
            ItemKind::Shape(shape) => shape_contains(shape, p),
            ItemKind::Text(text) => text
                .bounding_rect()
                .is_some_and(|rect| rect.contains(p)),
        };
        hit.then(|| item.id())
    })
}

/// Tests a single shape: fill region first (when filled), stroke
/// proximity otherwise.
fn shape_contains(shape: &Shape, p: Point) -> bool {
    if shape.path().is_empty() {
        return false;
    }
    // Cheap reject via the cached frame, padded by the pick radius
    if let Some(frame) = shape.frame() {
        if !frame.inflated(HIT_TOLERANCE).contains(p) {
            return false;
        }
    }

    if shape.fill_color().is_some() && point_in_fill(shape.path(), p) {
        return true;
    }
    stroke_distance(shape.path(), p) <= shape.line_width() / 2.0 + HIT_TOLERANCE
}

/// Even-odd containment test on the flattened path.
///
/// Open subpaths are treated as implicitly closed, matching how cairo
/// fills them at render time.
pub fn point_in_fill(path: &Path, p: Point) -> bool {
    let mut inside = false;
    for (points, _) in path.flattened() {
        if points.len() < 3 {
            continue;
        }
        let mut j = points.len() - 1;
        for i in 0..points.len() {
            let a = points[i];
            let b = points[j];
            if (a.y > p.y) != (b.y > p.y) {
                let cross_x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < cross_x {
                    inside = !inside;
                }
            }
            j = i;
        }
    }
    inside
}

/// Minimum distance from the point to any flattened stroke segment.
pub fn stroke_distance(path: &Path, p: Point) -> f64 {
    let mut min = f64::INFINITY;
    for (points, closed) in path.flattened() {
        if points.len() == 1 {
            min = min.min(p.distance(points[0]));
            continue;
        }
        for pair in points.windows(2) {
            min = min.min(segment_distance(pair[0], pair[1], p));
        }
        if closed && points.len() > 2 {
            min = min.min(segment_distance(points[points.len() - 1], points[0], p));
        }
    }
    min
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(a: Point, b: Point, p: Point) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * abx, a.y + t * aby))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};
    use crate::draw::geometry;
    use crate::draw::shape::Shape;
    use crate::draw::Frame;
    use crate::util::Rect;

    fn outline(rect: Rect) -> Shape {
        Shape::new(geometry::rect_path(rect), RED, None, 2.0, None)
    }

    fn filled(rect: Rect) -> Shape {
        Shape::new(geometry::rect_path(rect), RED, Some(BLUE), 2.0, None)
    }

    #[test]
    fn topmost_item_wins_for_overlapping_shapes() {
        let mut frame = Frame::new();
        let bottom = frame.add_shape(filled(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let top = frame.add_shape(filled(Rect::new(50.0, 50.0, 100.0, 100.0)));

        assert_eq!(
            hit_test(frame.items(), Point::new(75.0, 75.0)),
            Some(top)
        );
        assert_eq!(
            hit_test(frame.items(), Point::new(10.0, 10.0)),
            Some(bottom)
        );
    }

    #[test]
    fn unfilled_shapes_only_match_near_the_outline() {
        let mut frame = Frame::new();
        let id = frame.add_shape(outline(Rect::new(0.0, 0.0, 100.0, 100.0)));

        // Center of an unfilled rectangle is a miss
        assert_eq!(hit_test(frame.items(), Point::new(50.0, 50.0)), None);
        // On the edge is a hit
        assert_eq!(hit_test(frame.items(), Point::new(100.0, 50.0)), Some(id));
        // Within tolerance of the edge is a hit
        assert_eq!(hit_test(frame.items(), Point::new(104.5, 50.0)), Some(id));
        // Beyond tolerance is a miss
        assert_eq!(hit_test(frame.items(), Point::new(107.0, 50.0)), None);
    }

    #[test]
    fn filled_shapes_match_anywhere_inside() {
        let mut frame = Frame::new();
        let id = frame.add_shape(filled(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(hit_test(frame.items(), Point::new(50.0, 50.0)), Some(id));
    }

    #[test]
    fn fill_test_respects_concave_outlines() {
        let star = geometry::star_path(Rect::new(0.0, 0.0, 100.0, 100.0));
        // Center and top-spike interior are inside
        assert!(point_in_fill(&star, Point::new(50.0, 50.0)));
        assert!(point_in_fill(&star, Point::new(50.0, 5.0)));
        // The notch beside the top spike is outside
        assert!(!point_in_fill(&star, Point::new(30.0, 5.0)));
    }

    #[test]
    fn curved_outlines_hit_on_the_flattened_curve() {
        let mut frame = Frame::new();
        let id = frame.add_shape(Shape::new(
            geometry::oval_path(Rect::new(0.0, 0.0, 100.0, 60.0)),
            RED,
            None,
            2.0,
            None,
        ));
        // Rightmost point of the ellipse
        assert_eq!(hit_test(frame.items(), Point::new(100.0, 30.0)), Some(id));
        // Center of an unfilled ellipse misses
        assert_eq!(hit_test(frame.items(), Point::new(50.0, 30.0)), None);
    }

    #[test]
    fn empty_list_yields_no_selection() {
        assert_eq!(hit_test(&[], Point::new(0.0, 0.0)), None);
    }
}
