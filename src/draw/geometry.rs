//! Parametric path constructions for the drawing tools.
//!
//! Every function here is pure and deterministic: given the same bounding
//! rectangle (or point sequence) it produces the same path, bit for bit.
//! All tuning constants are fixed at the top of the module so geometry is
//! reproducible across runs and machines.
//!
//! Degenerate input (a rectangle with zero width or height) yields an
//! empty path; callers discard empty construction results instead of
//! failing.

use crate::util::{self, Point, Rect};

use super::path::Path;

/// Magic constant for approximating a quarter circle with one cubic Bézier.
pub const KAPPA: f64 = 0.552_284_749_831;

/// Number of points on the star tool's star.
pub const STAR_POINTS: usize = 5;

/// Inner/outer radius ratio of the star tool.
pub const STAR_INNER_RATIO: f64 = 0.5;

/// Full sine/cosine periods spanned across the bounding rectangle width.
pub const WAVE_PERIODS: f64 = 2.0;

/// Horizontal spacing between wave samples, in logical units.
pub const WAVE_SAMPLE_SPACING: f64 = 2.0;

/// Lower bound on wave sample count so narrow rectangles stay smooth.
pub const WAVE_MIN_SAMPLES: usize = 8;

/// Fraction of the width the trapezoid's top edge is inset on each side.
pub const TRAPEZOID_TOP_INSET: f64 = 0.25;

/// Arrowhead length for the coordinate-system axes, in logical units.
pub const AXIS_ARROW_LENGTH: f64 = 12.0;

/// Arrowhead angle for the coordinate-system axes, in degrees.
pub const AXIS_ARROW_ANGLE: f64 = 28.0;

/// Cube depth offset as a fraction of the smaller rectangle extent.
pub const CUBE_DEPTH_RATIO: f64 = 0.25;

/// Cylinder cap minor radius as a fraction of the rectangle height.
pub const CYLINDER_CAP_RATIO: f64 = 0.15;

/// Cone base minor radius as a fraction of the rectangle height.
pub const CONE_BASE_RATIO: f64 = 0.12;

/// Pyramid back-vertex inset as a fraction of width (x) and height (y).
pub const PYRAMID_DEPTH_X: f64 = 0.22;
pub const PYRAMID_DEPTH_Y: f64 = 0.18;

// ============================================================================
// Basic Closed Figures
// ============================================================================

/// Axis-aligned rectangle outline.
pub fn rect_path(rect: Rect) -> Path {
    if rect.is_degenerate() {
        return Path::new();
    }
    Path::polygon(&[
        Point::new(rect.min_x(), rect.min_y()),
        Point::new(rect.max_x(), rect.min_y()),
        Point::new(rect.max_x(), rect.max_y()),
        Point::new(rect.min_x(), rect.max_y()),
    ])
}

/// Ellipse inscribed in the rectangle, built from four cubic arcs.
pub fn oval_path(rect: Rect) -> Path {
    if rect.is_degenerate() {
        return Path::new();
    }
    let c = rect.center();
    let rx = rect.width / 2.0;
    let ry = rect.height / 2.0;
    let kx = rx * KAPPA;
    let ky = ry * KAPPA;

    let mut path = Path::new();
    path.move_to(Point::new(c.x + rx, c.y));
    path.curve_to(
        Point::new(c.x + rx, c.y + ky),
        Point::new(c.x + kx, c.y + ry),
        Point::new(c.x, c.y + ry),
    );
    path.curve_to(
        Point::new(c.x - kx, c.y + ry),
        Point::new(c.x - rx, c.y + ky),
        Point::new(c.x - rx, c.y),
    );
    path.curve_to(
        Point::new(c.x - rx, c.y - ky),
        Point::new(c.x - kx, c.y - ry),
        Point::new(c.x, c.y - ry),
    );
    path.curve_to(
        Point::new(c.x + kx, c.y - ry),
        Point::new(c.x + rx, c.y - ky),
        Point::new(c.x + rx, c.y),
    );
    path.close();
    path
}

/// Circle centered on the rectangle's center.
///
/// The diameter is forced to `min(width, height)` so a skewed drag still
/// produces a true circle.
pub fn circle_path(rect: Rect) -> Path {
    if rect.is_degenerate() {
        return Path::new();
    }
    let d = rect.width.min(rect.height);
    let c = rect.center();
    oval_path(Rect::new(c.x - d / 2.0, c.y - d / 2.0, d, d))
}

/// Isosceles triangle: apex top-center, base along the bottom edge.
pub fn triangle_path(rect: Rect) -> Path {
    if rect.is_degenerate() {
        return Path::new();
    }
    Path::polygon(&[
        Point::new(rect.center().x, rect.min_y()),
        Point::new(rect.max_x(), rect.max_y()),
        Point::new(rect.min_x(), rect.max_y()),
    ])
}

/// Regular pentagon, first vertex pointing up, stretched to fill the rect.
pub fn pentagon_path(rect: Rect) -> Path {
    regular_polygon_path(rect, 5)
}

/// Trapezoid: full-width bottom edge, top edge inset by
/// [`TRAPEZOID_TOP_INSET`] of the width on each side.
pub fn trapezoid_path(rect: Rect) -> Path {
    if rect.is_degenerate() {
        return Path::new();
    }
    let inset = rect.width * TRAPEZOID_TOP_INSET;
    Path::polygon(&[
        Point::new(rect.min_x() + inset, rect.min_y()),
        Point::new(rect.max_x() - inset, rect.min_y()),
        Point::new(rect.max_x(), rect.max_y()),
        Point::new(rect.min_x(), rect.max_y()),
    ])
}

/// Diamond (rhombus) through the rectangle's edge midpoints.
pub fn diamond_path(rect: Rect) -> Path {
    if rect.is_degenerate() {
        return Path::new();
    }
    let c = rect.center();
    Path::polygon(&[
        Point::new(c.x, rect.min_y()),
        Point::new(rect.max_x(), c.y),
        Point::new(c.x, rect.max_y()),
        Point::new(rect.min_x(), c.y),
    ])
}

/// Five-pointed star, first outer vertex pointing up.
///
/// [`STAR_POINTS`] outer vertices alternate with inner vertices at
/// [`STAR_INNER_RATIO`] of the outer radius; the vertex set is then
/// stretched to fill the bounding rectangle exactly.
pub fn star_path(rect: Rect) -> Path {
    if rect.is_degenerate() {
        return Path::new();
    }
    let step = std::f64::consts::PI / STAR_POINTS as f64;
    let mut unit = Vec::with_capacity(STAR_POINTS * 2);
    for k in 0..STAR_POINTS * 2 {
        let radius = if k % 2 == 0 { 1.0 } else { STAR_INNER_RATIO };
        let angle = -std::f64::consts::FRAC_PI_2 + k as f64 * step;
        unit.push(Point::new(radius * angle.cos(), radius * angle.sin()));
    }
    fit_polygon_to_rect(&unit, rect)
}

/// Regular n-gon, first vertex pointing up, stretched to fill the rect.
fn regular_polygon_path(rect: Rect, sides: usize) -> Path {
    if rect.is_degenerate() || sides < 3 {
        return Path::new();
    }
    let step = std::f64::consts::TAU / sides as f64;
    let mut unit = Vec::with_capacity(sides);
    for k in 0..sides {
        let angle = -std::f64::consts::FRAC_PI_2 + k as f64 * step;
        unit.push(Point::new(angle.cos(), angle.sin()));
    }
    fit_polygon_to_rect(&unit, rect)
}

/// Maps a vertex set onto `rect` so its bounds fill the rect exactly.
fn fit_polygon_to_rect(unit: &[Point], rect: Rect) -> Path {
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in unit {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let span_x = max_x - min_x;
    let span_y = max_y - min_y;
    if span_x <= 0.0 || span_y <= 0.0 {
        return Path::new();
    }
    let vertices: Vec<Point> = unit
        .iter()
        .map(|p| {
            Point::new(
                rect.min_x() + (p.x - min_x) / span_x * rect.width,
                rect.min_y() + (p.y - min_y) / span_y * rect.height,
            )
        })
        .collect();
    Path::polygon(&vertices)
}

// ============================================================================
// Mathematical Figures
// ============================================================================

/// Sine wave sampled across the rectangle width.
pub fn sine_path(rect: Rect) -> Path {
    wave_path(rect, 0.0)
}

/// Cosine wave sampled across the rectangle width.
pub fn cosine_path(rect: Rect) -> Path {
    wave_path(rect, std::f64::consts::FRAC_PI_2)
}

/// Sampled wave polyline: [`WAVE_PERIODS`] periods, amplitude `height/2`,
/// one sample per [`WAVE_SAMPLE_SPACING`] x-units (at least
/// [`WAVE_MIN_SAMPLES`]).
fn wave_path(rect: Rect, phase: f64) -> Path {
    if rect.is_degenerate() {
        return Path::new();
    }
    let samples = ((rect.width / WAVE_SAMPLE_SPACING).ceil() as usize).max(WAVE_MIN_SAMPLES);
    let amplitude = rect.height / 2.0;
    let cy = rect.center().y;

    let mut points = Vec::with_capacity(samples + 1);
    for i in 0..=samples {
        let t = i as f64 / samples as f64;
        let x = rect.min_x() + t * rect.width;
        let y = cy - amplitude * (t * WAVE_PERIODS * std::f64::consts::TAU + phase).sin();
        points.push(Point::new(x, y));
    }
    Path::polyline(&points)
}

/// Two perpendicular axes centered in the rectangle, with arrowheads on
/// the +x (right) and +y (up) ends.
pub fn axes_path(rect: Rect) -> Path {
    if rect.is_degenerate() {
        return Path::new();
    }
    let c = rect.center();
    let x_tip = Point::new(rect.max_x(), c.y);
    let y_tip = Point::new(c.x, rect.min_y());

    let mut path = Path::new();
    // X axis
    path.move_to(Point::new(rect.min_x(), c.y));
    path.line_to(x_tip);
    append_arrowhead(&mut path, x_tip, Point::new(rect.min_x(), c.y));
    // Y axis (up is -y in canvas coordinates)
    path.move_to(Point::new(c.x, rect.max_y()));
    path.line_to(y_tip);
    append_arrowhead(&mut path, y_tip, Point::new(c.x, rect.max_y()));
    path
}

fn append_arrowhead(path: &mut Path, tip: Point, tail: Point) {
    let [left, right] = util::arrowhead_points(tip, tail, AXIS_ARROW_LENGTH, AXIS_ARROW_ANGLE);
    path.move_to(left);
    path.line_to(tip);
    path.line_to(right);
}

// ============================================================================
// Line-Art Solids
// ============================================================================

/// Tetrahedron line art: front base edge, raised back vertex, apex.
pub fn pyramid_path(rect: Rect) -> Path {
    if rect.is_degenerate() {
        return Path::new();
    }
    let apex = Point::new(rect.center().x, rect.min_y());
    let left = Point::new(rect.min_x(), rect.max_y());
    let right = Point::new(
        rect.max_x() - rect.width * PYRAMID_DEPTH_X,
        rect.max_y(),
    );
    let back = Point::new(
        rect.max_x(),
        rect.max_y() - rect.height * PYRAMID_DEPTH_Y,
    );

    let mut path = Path::polygon(&[left, right, back]);
    for base in [left, right, back] {
        path.move_to(apex);
        path.line_to(base);
    }
    path
}

/// Cone line art: elliptical base plus two slant edges to the apex.
pub fn cone_path(rect: Rect) -> Path {
    if rect.is_degenerate() {
        return Path::new();
    }
    let base_ry = rect.height * CONE_BASE_RATIO;
    let base_cy = rect.max_y() - base_ry;
    let apex = Point::new(rect.center().x, rect.min_y());

    let mut path = oval_path(Rect::new(
        rect.min_x(),
        base_cy - base_ry,
        rect.width,
        base_ry * 2.0,
    ));
    path.move_to(apex);
    path.line_to(Point::new(rect.min_x(), base_cy));
    path.move_to(apex);
    path.line_to(Point::new(rect.max_x(), base_cy));
    path
}

/// Cylinder line art: top and bottom ellipses joined by straight sides.
pub fn cylinder_path(rect: Rect) -> Path {
    if rect.is_degenerate() {
        return Path::new();
    }
    let cap_ry = rect.height * CYLINDER_CAP_RATIO;
    let top_cy = rect.min_y() + cap_ry;
    let bottom_cy = rect.max_y() - cap_ry;

    let mut path = oval_path(Rect::new(rect.min_x(), rect.min_y(), rect.width, cap_ry * 2.0));
    path.extend(oval_path(Rect::new(
        rect.min_x(),
        bottom_cy - cap_ry,
        rect.width,
        cap_ry * 2.0,
    )));
    path.move_to(Point::new(rect.min_x(), top_cy));
    path.line_to(Point::new(rect.min_x(), bottom_cy));
    path.move_to(Point::new(rect.max_x(), top_cy));
    path.line_to(Point::new(rect.max_x(), bottom_cy));
    path
}

/// Cube wireframe: front and back squares offset by the depth ratio,
/// joined at the corners.
pub fn cube_path(rect: Rect) -> Path {
    if rect.is_degenerate() {
        return Path::new();
    }
    let d = rect.width.min(rect.height) * CUBE_DEPTH_RATIO;
    let front = Rect::new(
        rect.min_x(),
        rect.min_y() + d,
        rect.width - d,
        rect.height - d,
    );
    let back = Rect::new(
        rect.min_x() + d,
        rect.min_y(),
        rect.width - d,
        rect.height - d,
    );

    let mut path = Path::polygon(&[
        Point::new(front.min_x(), front.min_y()),
        Point::new(front.max_x(), front.min_y()),
        Point::new(front.max_x(), front.max_y()),
        Point::new(front.min_x(), front.max_y()),
    ]);
    let back_pts = [
        Point::new(back.min_x(), back.min_y()),
        Point::new(back.max_x(), back.min_y()),
        Point::new(back.max_x(), back.max_y()),
        Point::new(back.min_x(), back.max_y()),
    ];
    path.move_to(back_pts[0]);
    for p in &back_pts[1..] {
        path.line_to(*p);
    }
    path.close();

    let front_pts = [
        Point::new(front.min_x(), front.min_y()),
        Point::new(front.max_x(), front.min_y()),
        Point::new(front.max_x(), front.max_y()),
        Point::new(front.min_x(), front.max_y()),
    ];
    for (f, b) in front_pts.iter().zip(back_pts.iter()) {
        path.move_to(*f);
        path.line_to(*b);
    }
    path
}

// ============================================================================
// Point-Driven Constructions
// ============================================================================

/// Freehand polyline through the raw pointer points, no smoothing.
pub fn freehand_path(points: &[Point]) -> Path {
    if points.len() < 2 {
        return Path::new();
    }
    Path::polyline(points)
}

/// Straight segment between two endpoints.
pub fn line_path(a: Point, b: Point) -> Path {
    if a.distance(b) < f64::EPSILON {
        return Path::new();
    }
    Path::polyline(&[a, b])
}

/// Straight segment plus a V-shaped arrowhead at the terminal point `b`.
pub fn arrow_path(a: Point, b: Point, head_length: f64, head_angle: f64) -> Path {
    let mut path = line_path(a, b);
    if path.is_empty() {
        return path;
    }
    let [left, right] = util::arrowhead_points(b, a, head_length, head_angle);
    path.move_to(left);
    path.line_to(b);
    path.line_to(right);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 100.0,
    };

    #[test]
    fn degenerate_rects_yield_empty_paths() {
        let flat = Rect::new(10.0, 10.0, 0.0, 50.0);
        let builders: [fn(Rect) -> Path; 15] = [
            rect_path, oval_path, circle_path, triangle_path, pentagon_path, trapezoid_path,
            diamond_path, star_path, sine_path, cosine_path, axes_path, pyramid_path, cone_path,
            cylinder_path, cube_path,
        ];
        for build in builders {
            assert!(build(flat).is_empty());
        }
    }

    #[test]
    fn star_has_ten_vertices_and_fills_the_rect() {
        let path = star_path(RECT);
        assert_eq!(path.vertex_count(), 10);
        assert!(path.subpaths()[0].closed);
        let bounds = path.bounds().unwrap();
        assert!((bounds.min_x() - 0.0).abs() < 1e-9);
        assert!((bounds.max_x() - 100.0).abs() < 1e-9);
        assert!((bounds.min_y() - 0.0).abs() < 1e-9);
        assert!((bounds.max_y() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn circle_forces_min_dimension() {
        let path = circle_path(Rect::new(0.0, 0.0, 100.0, 40.0));
        let bounds = path.bounds().unwrap();
        // Flattened curve bounds stay within the true circle square
        assert!(bounds.width <= 40.0 + 1e-9);
        assert!(bounds.width > 39.0);
        assert!((bounds.center().x - 50.0).abs() < 1e-9);
        assert!((bounds.center().y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn pentagon_first_vertex_points_up() {
        let path = pentagon_path(RECT);
        let first = path.subpaths()[0].start;
        assert!((first.y - 0.0).abs() < 1e-9);
        assert!((first.x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn trapezoid_top_edge_is_inset() {
        let path = trapezoid_path(RECT);
        let flat = &path.flattened()[0].0;
        assert_eq!(flat[0], Point::new(25.0, 0.0));
        assert_eq!(flat[1], Point::new(75.0, 0.0));
        assert_eq!(flat[2], Point::new(100.0, 100.0));
    }

    #[test]
    fn sine_wave_spans_two_periods_at_half_height_amplitude() {
        let path = sine_path(RECT);
        let flat = &path.flattened()[0].0;
        // Endpoints sit on the midline after 2 full periods
        assert!((flat.first().unwrap().y - 50.0).abs() < 1e-9);
        assert!((flat.last().unwrap().y - 50.0).abs() < 1e-9);
        let min_y = flat.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = flat.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        assert!(min_y >= -1e-9 && min_y < 1.0);
        assert!(max_y <= 100.0 + 1e-9 && max_y > 99.0);
        // 100 units wide / 2-unit spacing = 50 samples + endpoint
        assert_eq!(flat.len(), 51);
    }

    #[test]
    fn cosine_wave_starts_at_the_crest() {
        let path = cosine_path(RECT);
        let first = path.flattened()[0].0[0];
        assert!((first.y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn axes_carry_two_arrowheads() {
        let path = axes_path(RECT);
        // 2 axis segments + 2 arrowhead V's
        assert_eq!(path.subpaths().len(), 4);
    }

    #[test]
    fn cube_is_two_squares_and_four_connectors() {
        let path = cube_path(RECT);
        assert_eq!(path.subpaths().len(), 6);
        assert_eq!(path.bounds().unwrap(), RECT);
    }

    #[test]
    fn pyramid_draws_base_and_three_apex_edges() {
        let path = pyramid_path(RECT);
        assert_eq!(path.subpaths().len(), 4);
    }

    #[test]
    fn freehand_needs_at_least_two_points() {
        assert!(freehand_path(&[Point::new(1.0, 1.0)]).is_empty());
        let path = freehand_path(&[Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
        assert_eq!(path.vertex_count(), 2);
    }

    #[test]
    fn arrow_appends_a_v_head_at_the_terminal_point() {
        let path = arrow_path(Point::new(0.0, 0.0), Point::new(50.0, 0.0), 16.0, 30.0);
        assert_eq!(path.subpaths().len(), 2);
        let head = &path.flattened()[1].0;
        assert_eq!(head.len(), 3);
        assert_eq!(head[1], Point::new(50.0, 0.0));
    }

    #[test]
    fn zero_length_line_is_empty() {
        let p = Point::new(5.0, 5.0);
        assert!(line_path(p, p).is_empty());
        assert!(arrow_path(p, p, 16.0, 30.0).is_empty());
    }
}
