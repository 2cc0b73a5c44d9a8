use super::tolerance::{safe_div, EPS_LEN, NOMINAL_WIDTH};
use crate::model::Vec2;
use std::f64::consts::{PI, TAU};

/// Circle in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Circle {
    pub fn center(&self) -> Vec2 { Vec2::new(self.x, self.y) }
    pub fn is_finite(&self) -> bool { self.x.is_finite() && self.y.is_finite() && self.radius.is_finite() }
    pub fn point_at(&self, angle: f64) -> Vec2 {
        Vec2::new(self.x + self.radius * angle.cos(), self.y + self.radius * angle.sin())
    }
}

#[allow(clippy::too_many_arguments)]
pub fn det(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64, g: f64, h: f64, i: f64) -> f64 {
    a * e * i + b * f * g + c * d * h - a * f * h - b * d * i - c * e * g
}

/// Circle through three points, by Cramer's rule on the general circle equation.
/// Collinear input gives a non-finite centre and radius; callers check `is_finite`.
pub fn circle_from_three_points(p1: Vec2, p2: Vec2, p3: Vec2) -> Circle {
    let (x1, y1, x2, y2, x3, y3) = (p1.x, p1.y, p2.x, p2.y, p3.x, p3.y);
    let s1 = x1 * x1 + y1 * y1;
    let s2 = x2 * x2 + y2 * y2;
    let s3 = x3 * x3 + y3 * y3;
    let a = det(x1, y1, 1.0, x2, y2, 1.0, x3, y3, 1.0);
    let bx = -det(s1, y1, 1.0, s2, y2, 1.0, s3, y3, 1.0);
    let by = det(s1, x1, 1.0, s2, x2, 1.0, s3, x3, 1.0);
    let c = -det(s1, x1, y1, s2, x2, y2, s3, x3, y3);
    Circle {
        x: -bx / (2.0 * a),
        y: -by / (2.0 * a),
        radius: (bx * bx + by * by - 4.0 * a * c).sqrt() / (2.0 * a.abs()),
    }
}

/// Angle between two vectors, in [0, 2π). Rotated by half a turn so that a
/// vector pointing along `v2` maps to π; the node-side dispatch relies on this.
pub fn calculate_angle(v1: Vec2, v2: Vec2) -> f64 {
    (v2.y.atan2(v2.x) - v1.y.atan2(v1.x) + PI).rem_euclid(TAU)
}

/// Both roots of `ax² + bx + c`; NaN when the discriminant is negative.
pub fn quadratic_formula(a: f64, b: f64, c: f64) -> [f64; 2] {
    let root = (b * b - 4.0 * a * c).sqrt();
    [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)]
}

/// Whether `inner` lies within `outer`; corners may be given in any order.
pub fn is_rect_inside_rect(outer: [Vec2; 2], inner: [Vec2; 2]) -> bool {
    let (min_x, max_x) = (outer[0].x.min(outer[1].x), outer[0].x.max(outer[1].x));
    let (min_y, max_y) = (outer[0].y.min(outer[1].y), outer[0].y.max(outer[1].y));
    inner.iter().all(|p| p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y)
}

pub fn is_point_inside_rect(rect: [Vec2; 2], p: Vec2) -> bool { is_rect_inside_rect(rect, [p, p]) }

/// Projection of `p` onto segment `a`→`b`: fraction along the segment and signed
/// perpendicular distance. None for a zero-length segment.
pub fn seg_projection(p: Vec2, a: Vec2, b: Vec2) -> Option<(f64, f64)> {
    let dx = b.x - a.x; let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len <= EPS_LEN { return None; }
    let percent = (dx * (p.x - a.x) + dy * (p.y - a.y)) / (len * len);
    let distance = (dx * (p.y - a.y) - dy * (p.x - a.x)) / len;
    Some((percent, distance))
}

/// Three vertices of the arrow head whose tip is at (x, y) pointing along `angle`.
pub fn arrow_head(x: f64, y: f64, angle: f64) -> [Vec2; 3] {
    let dx = angle.cos();
    let dy = angle.sin();
    [
        Vec2::new(x, y),
        Vec2::new(x - 8.0 * dx + 5.0 * dy, y - 8.0 * dy - 5.0 * dx),
        Vec2::new(x - 8.0 * dx - 5.0 * dy, y - 8.0 * dy + 5.0 * dx),
    ]
}

/// Maps client coordinates on a displayed canvas of `rect_width` px into the
/// nominal-width drawing space.
pub fn to_canvas_coords(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64, rect_width: f64) -> Vec2 {
    let scale = safe_div(NOMINAL_WIDTH, rect_width, 1.0);
    Vec2::new((client_x - rect_left) * scale, (client_y - rect_top) * scale)
}
