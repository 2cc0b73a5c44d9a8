use crate::geometry::math::{calculate_angle, quadratic_formula, Circle};
use crate::geometry::tolerance::{EPS_LEN, HIT_TARGET_PADDING};
use crate::model::{Node, PetriNodeType, Vec2};

impl Node {
    pub fn new(x: f64, y: f64) -> Node {
        Node {
            x,
            y,
            label: String::new(),
            color: None,
            highlighted: false,
            is_initial: false,
            is_final: false,
            petri_type: PetriNodeType::None,
            tokens: 0,
            locked: false,
            has_moved: false,
            mouse_offset: Vec2::default(),
        }
    }

    pub fn pos(&self) -> Vec2 { Vec2::new(self.x, self.y) }

    /// Petri transitions are drawn as squares, everything else as circles.
    pub fn is_square(&self) -> bool { self.petri_type == PetriNodeType::Transition }

    pub fn set_mouse_start(&mut self, x: f64, y: f64) {
        self.mouse_offset = Vec2::new(self.x - x, self.y - y);
    }

    pub fn set_anchor_point(&mut self, x: f64, y: f64) {
        self.x = x + self.mouse_offset.x;
        self.y = y + self.mouse_offset.y;
    }

    pub fn contains_point(&self, x: f64, y: f64, radius: f64, use_padding: bool) -> bool {
        let r = if use_padding { radius + HIT_TARGET_PADDING } else { radius };
        let dx = x - self.x;
        let dy = y - self.y;
        if self.is_square() {
            dx.abs() <= r && dy.abs() <= r
        } else {
            dx * dx + dy * dy <= r * r
        }
    }

    /// Point on the node boundary in the direction of (x, y).
    pub fn closest_point_on_node(&self, x: f64, y: f64, radius: f64) -> Vec2 {
        let d = Vec2::new(x - self.x, y - self.y);
        let len = d.len();
        if len <= EPS_LEN {
            return Vec2::new(self.x + radius, self.y);
        }
        if !self.is_square() {
            return Vec2::new(self.x + d.x * radius / len, self.y + d.y * radius / len);
        }
        let angle = calculate_angle(d, Vec2::new(1.0, 0.0)).to_degrees();
        let slope = d.y / d.x;
        if !(45.0..315.0).contains(&angle) {
            let sx = self.x - radius;
            Vec2::new(sx, self.y + slope * (sx - self.x))
        } else if angle < 135.0 {
            let sy = self.y + radius;
            let sx = if slope.is_infinite() { self.x } else { self.x + (sy - self.y) / slope };
            Vec2::new(sx, sy)
        } else if angle < 225.0 {
            let sx = self.x + radius;
            Vec2::new(sx, self.y + slope * (sx - self.x))
        } else {
            let sy = self.y - radius;
            let sx = if slope.is_infinite() { self.x } else { self.x + (sy - self.y) / slope };
            Vec2::new(sx, sy)
        }
    }

    /// Crossings of `circle` with the four sides of this node's square.
    pub fn intersections_with_circle(&self, circle: &Circle, radius: f64) -> Vec<Vec2> {
        let (left, right) = (self.x - radius, self.x + radius);
        let (top, bottom) = (self.y - radius, self.y + radius);
        let mut out = Vec::new();
        // Top and bottom sides
        for side_y in [top, bottom] {
            let dy = side_y - circle.y;
            let roots = quadratic_formula(1.0, -2.0 * circle.x, circle.x * circle.x + dy * dy - circle.radius * circle.radius);
            out.extend(roots.into_iter().filter(|x| *x >= left && *x <= right).map(|x| Vec2::new(x, side_y)));
        }
        // Left and right sides
        for side_x in [left, right] {
            let dx = side_x - circle.x;
            let roots = quadratic_formula(1.0, -2.0 * circle.y, circle.y * circle.y + dx * dx - circle.radius * circle.radius);
            out.extend(roots.into_iter().filter(|y| *y >= top && *y <= bottom).map(|y| Vec2::new(side_x, y)));
        }
        out
    }

    /// Distance from the centre to the square-side crossing of `circle` nearest
    /// to `near`. None when the circle misses the square.
    pub fn square_arc_distance(&self, circle: &Circle, radius: f64, near: Vec2) -> Option<f64> {
        self.intersections_with_circle(circle, radius)
            .into_iter()
            .min_by(|p, q| p.dist(near).total_cmp(&q.dist(near)))
            .map(|p| p.dist(self.pos()))
    }
}
