use crate::geometry::arc::{angle_within_arc, arc_label_angle, calculate_link_info, ArcPath, LinkInfo};
use crate::geometry::math::{calculate_angle, circle_from_three_points, seg_projection, Circle};
use crate::geometry::tolerance::{EPS_LEN, HIT_TARGET_PADDING, SELF_LINK_SNAP_ANGLE, SNAP_TO_PADDING};
use crate::model::{EdgeKind, Link, Node, NodeId, SelfLink, StartLink, TemporaryLink, Vec2};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Node storage the link geometry resolves its endpoints against.
pub trait NodeLookup {
    fn node(&self, id: NodeId) -> Option<&Node>;
}

impl NodeLookup for [Option<Node>] {
    fn node(&self, id: NodeId) -> Option<&Node> { self.get(id as usize).and_then(Option::as_ref) }
}

impl NodeLookup for Vec<Option<Node>> {
    fn node(&self, id: NodeId) -> Option<&Node> { self.as_slice().node(id) }
}

/// Where and at which angle a link's label is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelAnchor {
    pub pos: Vec2,
    pub angle: Option<f64>,
}

fn straight_contains(start: Vec2, end: Vec2, p: Vec2) -> bool {
    match seg_projection(p, start, end) {
        Some((percent, distance)) => percent > 0.0 && percent < 1.0 && distance.abs() < HIT_TARGET_PADDING,
        None => false,
    }
}

fn info_contains(info: &LinkInfo, p: Vec2) -> bool {
    match &info.arc {
        Some(arc) => {
            let d = p - arc.circle.center();
            if (d.len() - arc.circle.radius).abs() >= HIT_TARGET_PADDING { return false; }
            angle_within_arc(d.angle(), arc.start_angle, arc.end_angle, arc.is_reversed)
        }
        None => straight_contains(info.start, info.end, p),
    }
}

impl Link {
    pub fn new(a: NodeId, b: NodeId) -> Link {
        Link { a, b, parallel_part: 0.5, perpendicular_part: 0.0, line_angle_adjust: 0.0 }
    }

    pub fn is_straight(&self) -> bool { self.perpendicular_part == 0.0 }

    pub fn anchor_point(&self, na: &Node, nb: &Node) -> Vec2 {
        let d = nb.pos() - na.pos();
        let scale = d.len();
        if scale <= EPS_LEN { return na.pos(); }
        Vec2::new(
            na.x + d.x * self.parallel_part - d.y * self.perpendicular_part / scale,
            na.y + d.y * self.parallel_part + d.x * self.perpendicular_part / scale,
        )
    }

    /// Re-expresses a dragged anchor relative to the baseline. Returns true when
    /// the link snapped straight.
    pub fn set_anchor_point(&mut self, na: &Node, nb: &Node, x: f64, y: f64) -> bool {
        let d = nb.pos() - na.pos();
        let scale = d.len();
        if scale <= EPS_LEN { return false; }
        let rel = Vec2::new(x, y) - na.pos();
        self.parallel_part = d.dot(rel) / (scale * scale);
        self.perpendicular_part = d.cross(rel) / scale;
        if self.parallel_part > 0.0 && self.parallel_part < 1.0 && self.perpendicular_part.abs() < SNAP_TO_PADDING {
            self.line_angle_adjust = if self.perpendicular_part < 0.0 { PI } else { 0.0 };
            self.perpendicular_part = 0.0;
            return true;
        }
        false
    }

    pub fn link_info(&self, na: &Node, nb: &Node, radius: f64) -> LinkInfo {
        let straight = || {
            let mid = (na.pos() + nb.pos()) * 0.5;
            LinkInfo::straight(na.closest_point_on_node(mid.x, mid.y, radius), nb.closest_point_on_node(mid.x, mid.y, radius))
        };
        if self.is_straight() || na.pos().dist(nb.pos()) <= EPS_LEN {
            return straight();
        }
        let circle = circle_from_three_points(na.pos(), nb.pos(), self.anchor_point(na, nb));
        if !circle.is_finite() || circle.radius <= EPS_LEN {
            return straight();
        }
        let is_reversed = self.perpendicular_part > 0.0;
        let reverse_scale = if is_reversed { 1.0 } else { -1.0 };
        let mut ends = calculate_link_info(na.pos(), nb.pos(), &circle, reverse_scale, radius);
        if na.is_square() {
            if let Some(d) = na.square_arc_distance(&circle, radius, ends.start) {
                let adj = calculate_link_info(na.pos(), nb.pos(), &circle, reverse_scale, d);
                ends.start = adj.start;
                ends.start_angle = adj.start_angle;
            }
        }
        if nb.is_square() {
            if let Some(d) = nb.square_arc_distance(&circle, radius, ends.end) {
                let adj = calculate_link_info(na.pos(), nb.pos(), &circle, reverse_scale, d);
                ends.end = adj.end;
                ends.end_angle = adj.end_angle;
            }
        }
        LinkInfo {
            start: ends.start,
            end: ends.end,
            arc: Some(ArcPath { circle, start_angle: ends.start_angle, end_angle: ends.end_angle, reverse_scale, is_reversed }),
        }
    }
}

impl SelfLink {
    pub fn new(node: NodeId) -> SelfLink { SelfLink { node, anchor_angle: 0.0, mouse_offset_angle: 0.0 } }

    pub fn set_mouse_start(&mut self, node: &Node, x: f64, y: f64) {
        self.mouse_offset_angle = self.anchor_angle - (y - node.y).atan2(x - node.x);
    }

    /// Moves the loop towards (x, y); snaps to right angles and keeps the
    /// anchor in (-π, π].
    pub fn set_anchor_point(&mut self, node: &Node, x: f64, y: f64) {
        let mut angle = (y - node.y).atan2(x - node.x) + self.mouse_offset_angle;
        let snap = (angle / FRAC_PI_2).round() * FRAC_PI_2;
        if (angle - snap).abs() < SELF_LINK_SNAP_ANGLE { angle = snap; }
        while angle <= -PI { angle += TAU; }
        while angle > PI { angle -= TAU; }
        self.anchor_angle = angle;
    }

    pub fn circle(&self, node: &Node, radius: f64) -> Circle {
        Circle {
            x: node.x + 1.5 * radius * self.anchor_angle.cos(),
            y: node.y + 1.5 * radius * self.anchor_angle.sin(),
            radius: 0.75 * radius,
        }
    }

    pub fn link_info(&self, node: &Node, radius: f64) -> LinkInfo {
        let circle = self.circle(node, radius);
        let start_angle = self.anchor_angle - PI * 0.8;
        let end_angle = self.anchor_angle + PI * 0.8;
        LinkInfo {
            start: circle.point_at(start_angle),
            end: circle.point_at(end_angle),
            arc: Some(ArcPath { circle, start_angle, end_angle, reverse_scale: 1.0, is_reversed: false }),
        }
    }

    pub fn contains_point(&self, node: &Node, radius: f64, x: f64, y: f64) -> bool {
        let c = self.circle(node, radius);
        (Vec2::new(x, y).dist(c.center()) - c.radius).abs() < HIT_TARGET_PADDING
    }
}

impl StartLink {
    pub fn new(node: NodeId) -> StartLink { StartLink { node, delta_x: 0.0, delta_y: 0.0 } }

    /// Places the arrow tail at (x, y); each axis snaps onto the node's centre line.
    pub fn set_anchor_point(&mut self, node: &Node, x: f64, y: f64) {
        self.delta_x = x - node.x;
        self.delta_y = y - node.y;
        if self.delta_x.abs() < SNAP_TO_PADDING { self.delta_x = 0.0; }
        if self.delta_y.abs() < SNAP_TO_PADDING { self.delta_y = 0.0; }
    }

    pub fn link_info(&self, node: &Node, radius: f64) -> LinkInfo {
        let start = Vec2::new(node.x + self.delta_x, node.y + self.delta_y);
        LinkInfo::straight(start, node.closest_point_on_node(start.x, start.y, radius))
    }
}

impl TemporaryLink {
    pub fn new(from: Vec2, to: Vec2) -> TemporaryLink { TemporaryLink { from, to } }
    pub fn link_info(&self) -> LinkInfo { LinkInfo::straight(self.from, self.to) }
    pub fn arrow(&self) -> (Vec2, f64) { (self.to, (self.to - self.from).angle()) }
}

/// Angle at which a link meets a node, measured the way `calculate_angle` does.
fn incident_angle(node: &Node, point: Vec2) -> f64 {
    calculate_angle(node.pos() - point, Vec2::new(1.0, 0.0))
}

impl EdgeKind {
    /// Source and target node; a start link has no source.
    pub fn node_ids(&self) -> (Option<NodeId>, NodeId) {
        match self {
            EdgeKind::Link(l) => (Some(l.a), l.b),
            EdgeKind::SelfLink(s) => (Some(s.node), s.node),
            EdgeKind::StartLink(s) => (None, s.node),
        }
    }

    pub fn touches(&self, id: NodeId) -> bool {
        let (from, to) = self.node_ids();
        from == Some(id) || to == id
    }

    pub fn link_info<N: NodeLookup + ?Sized>(&self, nodes: &N, radius: f64) -> Option<LinkInfo> {
        match self {
            EdgeKind::Link(l) => Some(l.link_info(nodes.node(l.a)?, nodes.node(l.b)?, radius)),
            EdgeKind::SelfLink(s) => Some(s.link_info(nodes.node(s.node)?, radius)),
            EdgeKind::StartLink(s) => Some(s.link_info(nodes.node(s.node)?, radius)),
        }
    }

    pub fn contains_point<N: NodeLookup + ?Sized>(&self, nodes: &N, radius: f64, x: f64, y: f64) -> bool {
        match self {
            EdgeKind::SelfLink(s) => nodes.node(s.node).is_some_and(|n| s.contains_point(n, radius, x, y)),
            _ => self.link_info(nodes, radius).is_some_and(|info| info_contains(&info, Vec2::new(x, y))),
        }
    }

    pub fn set_mouse_start<N: NodeLookup + ?Sized>(&mut self, nodes: &N, x: f64, y: f64) {
        if let EdgeKind::SelfLink(s) = self {
            if let Some(n) = nodes.node(s.node) { s.set_mouse_start(n, x, y); }
        }
    }

    /// Drags the link's shape. True only when a regular link snapped straight.
    pub fn set_anchor_point<N: NodeLookup + ?Sized>(&mut self, nodes: &N, x: f64, y: f64) -> bool {
        match self {
            EdgeKind::Link(l) => match (nodes.node(l.a), nodes.node(l.b)) {
                (Some(na), Some(nb)) => l.set_anchor_point(na, nb, x, y),
                _ => false,
            },
            EdgeKind::SelfLink(s) => {
                if let Some(n) = nodes.node(s.node) { s.set_anchor_point(n, x, y); }
                false
            }
            EdgeKind::StartLink(s) => {
                if let Some(n) = nodes.node(s.node) { s.set_anchor_point(n, x, y); }
                false
            }
        }
    }

    /// Angles at which this link meets `id`; a loop meets its node twice.
    pub fn incident_angles<N: NodeLookup + ?Sized>(&self, id: NodeId, nodes: &N, radius: f64) -> Vec<f64> {
        let (Some(node), Some(info)) = (nodes.node(id), self.link_info(nodes, radius)) else { return Vec::new() };
        match self {
            EdgeKind::Link(l) if l.a == id => vec![incident_angle(node, info.start)],
            EdgeKind::Link(l) if l.b == id => vec![incident_angle(node, info.end)],
            EdgeKind::SelfLink(s) if s.node == id => vec![incident_angle(node, info.start), incident_angle(node, info.end)],
            EdgeKind::StartLink(s) if s.node == id => vec![incident_angle(node, info.start)],
            _ => Vec::new(),
        }
    }

    /// Tip and direction of the arrow head at the target end.
    pub fn arrow<N: NodeLookup + ?Sized>(&self, nodes: &N, radius: f64) -> Option<(Vec2, f64)> {
        let info = self.link_info(nodes, radius)?;
        let angle = match (self, &info.arc) {
            (EdgeKind::SelfLink(_), Some(arc)) => arc.end_angle + PI * 0.4,
            (EdgeKind::StartLink(s), _) => (-s.delta_y).atan2(-s.delta_x),
            (_, Some(arc)) => arc.end_angle - arc.reverse_scale * FRAC_PI_2,
            (_, None) => (info.end - info.start).angle(),
        };
        Some((info.end, angle))
    }

    /// Label position; start links carry no label.
    pub fn label_anchor<N: NodeLookup + ?Sized>(&self, nodes: &N, radius: f64) -> Option<LabelAnchor> {
        match self {
            EdgeKind::Link(l) => {
                let info = self.link_info(nodes, radius)?;
                Some(match &info.arc {
                    Some(arc) => {
                        let angle = arc_label_angle(arc);
                        LabelAnchor { pos: arc.circle.point_at(angle), angle: Some(angle) }
                    }
                    None => LabelAnchor {
                        pos: (info.start + info.end) * 0.5,
                        angle: Some((info.end.x - info.start.x).atan2(info.start.y - info.end.y) + l.line_angle_adjust),
                    },
                })
            }
            EdgeKind::SelfLink(s) => {
                let c = s.circle(nodes.node(s.node)?, radius);
                Some(LabelAnchor { pos: c.point_at(s.anchor_angle), angle: Some(s.anchor_angle) })
            }
            EdgeKind::StartLink(_) => None,
        }
    }
}
