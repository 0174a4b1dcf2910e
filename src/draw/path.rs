//! Vector path model: subpaths of line and cubic-curve segments.
//!
//! A [`Path`] is the geometry half of every shape: an ordered list of
//! subpaths, each a start point followed by line/curve segments, open or
//! closed. All derived geometry (bounds, hit-testing) goes through one
//! deterministic flattening so that results are reproducible bit-for-bit
//! for identical inputs.

use crate::util::{Point, Rect};

/// Number of line segments a cubic curve flattens into.
///
/// Fixed (rather than adaptive) so that bounds and hit-tests are
/// deterministic for identical inputs.
pub const CURVE_FLATTEN_STEPS: usize = 16;

/// One segment of a subpath, relative to the previous end point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSeg {
    /// Straight line to the given point.
    Line(Point),
    /// Cubic Bézier curve with two control points.
    Curve { c1: Point, c2: Point, to: Point },
}

/// A contiguous run of segments starting at `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    pub start: Point,
    pub segs: Vec<PathSeg>,
    /// Closed subpaths connect the final point back to `start`.
    pub closed: bool,
}

/// An ordered sequence of subpaths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    subpaths: Vec<SubPath>,
}

impl Path {
    /// Creates an empty path (draws nothing, has no bounds).
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new subpath at the given point.
    pub fn move_to(&mut self, p: Point) {
        self.subpaths.push(SubPath {
            start: p,
            segs: Vec::new(),
            closed: false,
        });
    }

    /// Appends a line segment to the current subpath.
    ///
    /// Starts a new subpath at `p` if none is open yet, mirroring the
    /// implicit move-to of canvas APIs.
    pub fn line_to(&mut self, p: Point) {
        match self.subpaths.last_mut() {
            Some(sub) => sub.segs.push(PathSeg::Line(p)),
            None => self.move_to(p),
        }
    }

    /// Appends a cubic Bézier segment to the current subpath.
    pub fn curve_to(&mut self, c1: Point, c2: Point, to: Point) {
        if self.subpaths.is_empty() {
            self.move_to(c1);
        }
        if let Some(sub) = self.subpaths.last_mut() {
            sub.segs.push(PathSeg::Curve { c1, c2, to });
        }
    }

    /// Closes the current subpath.
    pub fn close(&mut self) {
        if let Some(sub) = self.subpaths.last_mut() {
            sub.closed = true;
        }
    }

    /// Builds an open polyline through the given points.
    pub fn polyline(points: &[Point]) -> Self {
        let mut path = Path::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
        }
        path
    }

    /// Builds a closed polygon through the given vertices.
    pub fn polygon(points: &[Point]) -> Self {
        let mut path = Self::polyline(points);
        path.close();
        path
    }

    /// Appends all subpaths of another path.
    pub fn extend(&mut self, other: Path) {
        self.subpaths.extend(other.subpaths);
    }

    pub fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    /// True when the path draws nothing (no subpath has any segment).
    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|s| s.segs.is_empty())
    }

    /// Total number of vertices across all subpaths (start points included,
    /// curve control points excluded).
    pub fn vertex_count(&self) -> usize {
        self.subpaths.iter().map(|s| 1 + s.segs.len()).sum()
    }

    /// Flattens every subpath to a polyline.
    ///
    /// Curves are sampled at [`CURVE_FLATTEN_STEPS`] fixed parameter steps.
    /// Returns one `(points, closed)` pair per subpath.
    pub fn flattened(&self) -> Vec<(Vec<Point>, bool)> {
        self.subpaths
            .iter()
            .map(|sub| {
                let mut points = Vec::with_capacity(1 + sub.segs.len());
                points.push(sub.start);
                let mut cursor = sub.start;
                for seg in &sub.segs {
                    match *seg {
                        PathSeg::Line(p) => {
                            points.push(p);
                            cursor = p;
                        }
                        PathSeg::Curve { c1, c2, to } => {
                            for step in 1..=CURVE_FLATTEN_STEPS {
                                let t = step as f64 / CURVE_FLATTEN_STEPS as f64;
                                points.push(cubic_point(cursor, c1, c2, to, t));
                            }
                            cursor = to;
                        }
                    }
                }
                (points, sub.closed)
            })
            .collect()
    }

    /// Tight bounding box of the flattened path.
    ///
    /// Returns `None` for an empty path.
    pub fn bounds(&self) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for (points, _) in self.flattened() {
            for p in points {
                min_x = min_x.min(p.x);
                min_y = min_y.min(p.y);
                max_x = max_x.max(p.x);
                max_y = max_y.max(p.y);
            }
        }
        Some(Rect::from_min_max(min_x, min_y, max_x, max_y))
    }

    /// Translates every point by the given delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.for_each_point(|p| {
            p.x += dx;
            p.y += dy;
        });
    }

    /// Scales every point by independent X/Y factors about the origin.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.for_each_point(|p| {
            p.x *= sx;
            p.y *= sy;
        });
    }

    fn for_each_point(&mut self, mut f: impl FnMut(&mut Point)) {
        for sub in &mut self.subpaths {
            f(&mut sub.start);
            for seg in &mut sub.segs {
                match seg {
                    PathSeg::Line(p) => f(p),
                    PathSeg::Curve { c1, c2, to } => {
                        f(c1);
                        f(c2);
                        f(to);
                    }
                }
            }
        }
    }
}

/// Evaluates a cubic Bézier at parameter `t`.
fn cubic_point(p0: Point, c1: Point, c2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    Point::new(
        b0 * p0.x + b1 * c1.x + b2 * c2.x + b3 * p3.x,
        b0 * p0.y + b1 * c1.y + b2 * c2.y + b3 * p3.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_has_no_bounds() {
        let path = Path::new();
        assert!(path.is_empty());
        assert!(path.bounds().is_none());
    }

    #[test]
    fn lone_move_to_is_still_empty() {
        let mut path = Path::new();
        path.move_to(Point::new(5.0, 5.0));
        assert!(path.is_empty());
    }

    #[test]
    fn polygon_bounds_are_tight() {
        let path = Path::polygon(&[
            Point::new(10.0, 10.0),
            Point::new(50.0, 10.0),
            Point::new(50.0, 40.0),
            Point::new(10.0, 40.0),
        ]);
        assert_eq!(path.bounds().unwrap(), Rect::new(10.0, 10.0, 40.0, 30.0));
        assert_eq!(path.vertex_count(), 4);
        assert!(path.subpaths()[0].closed);
    }

    #[test]
    fn curve_flattening_stays_inside_the_hull() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0));
        path.curve_to(
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        );
        let bounds = path.bounds().unwrap();
        assert!(bounds.max_y() <= 10.0);
        assert!(bounds.max_y() > 5.0);
        assert_eq!(bounds.min_y(), 0.0);
    }

    #[test]
    fn translate_then_scale_compose() {
        let mut path = Path::polyline(&[Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        path.translate(1.0, -2.0);
        path.scale(2.0, 3.0);
        let flat = path.flattened();
        assert_eq!(flat[0].0[0], Point::new(4.0, 0.0));
        assert_eq!(flat[0].0[1], Point::new(8.0, 6.0));
    }

    #[test]
    fn flattening_is_deterministic() {
        let mut a = Path::new();
        a.move_to(Point::new(0.0, 0.0));
        a.curve_to(
            Point::new(3.0, 7.0),
            Point::new(9.0, 7.0),
            Point::new(12.0, 0.0),
        );
        let b = a.clone();
        assert_eq!(a.flattened(), b.flattened());
    }
}
