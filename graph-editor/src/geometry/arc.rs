// Arc geometry for bowed links: endpoints on node boundaries, angular ranges, sampling

use super::math::Circle;
use crate::model::Vec2;
use std::f64::consts::{PI, TAU};

/// Endpoints of a link and, for curved links, the arc drawn between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkInfo {
    pub start: Vec2,
    pub end: Vec2,
    pub arc: Option<ArcPath>,
}

impl LinkInfo {
    pub fn straight(start: Vec2, end: Vec2) -> Self { LinkInfo { start, end, arc: None } }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcPath {
    pub circle: Circle,
    pub start_angle: f64,
    pub end_angle: f64,
    pub reverse_scale: f64, // +1 or -1
    pub is_reversed: bool,  // drawn anticlockwise
}

/// Angles and points where an arc leaves and enters its nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcEnds {
    pub start_angle: f64,
    pub end_angle: f64,
    pub start: Vec2,
    pub end: Vec2,
}

/// Moves the arc ends `distance` along the circle away from the node centres `a`
/// and `b`; `reverse_scale` selects the direction of travel.
pub fn calculate_link_info(a: Vec2, b: Vec2, circle: &Circle, reverse_scale: f64, distance: f64) -> ArcEnds {
    let r_ratio = reverse_scale * distance / circle.radius;
    let start_angle = (a.y - circle.y).atan2(a.x - circle.x) - r_ratio;
    let end_angle = (b.y - circle.y).atan2(b.x - circle.x) + r_ratio;
    ArcEnds {
        start_angle,
        end_angle,
        start: circle.point_at(start_angle),
        end: circle.point_at(end_angle),
    }
}

/// Whether `angle` falls inside the swept range of an arc.
pub fn angle_within_arc(angle: f64, start: f64, end: f64, is_reversed: bool) -> bool {
    let (start, mut end) = if is_reversed { (end, start) } else { (start, end) };
    if end < start { end += TAU; }
    let mut angle = angle;
    if angle < start { angle += TAU; } else if angle > end { angle -= TAU; }
    angle > start && angle < end
}

/// `steps + 1` points along the arc in drawing order, endpoints included.
pub fn sample_arc(arc: &ArcPath, steps: usize) -> Vec<Vec2> {
    let from = arc.start_angle;
    let mut to = arc.end_angle;
    if arc.is_reversed {
        while to > from { to -= TAU; }
    } else {
        while to < from { to += TAU; }
    }
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| arc.circle.point_at(from + (to - from) * i as f64 / steps as f64))
        .collect()
}

/// Angle at which a curved link's label sits on its circle.
pub fn arc_label_angle(arc: &ArcPath) -> f64 {
    let mut end = arc.end_angle;
    if end < arc.start_angle { end += TAU; }
    let flip = if arc.is_reversed { PI } else { 0.0 };
    (arc.start_angle + end) / 2.0 + flip
}
