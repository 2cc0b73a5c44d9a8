use crate::geometry::arc::sample_arc;
use crate::geometry::math::{is_point_inside_rect, is_rect_inside_rect};
use crate::model::{EdgeKind, ObjectRef, Vec2};
use crate::Graph;

/// Samples per arc when testing rectangle containment.
pub const ARC_SAMPLES: usize = 100;

/// Object under (x, y). Nodes win over links; among nodes the nearest centre wins.
pub fn pick_impl(g: &Graph, x: f64, y: f64, use_node_padding: bool) -> Option<ObjectRef> {
    let r = g.node_radius;
    // Nodes first
    let mut best_node: Option<(u32, f64)> = None;
    for (i, n) in g.nodes.iter().enumerate() {
        if let Some(n) = n {
            if !n.contains_point(x, y, r, use_node_padding) { continue; }
            let d2 = (n.x - x).powi(2) + (n.y - y).powi(2);
            if best_node.map_or(true, |(_, bd)| d2 < bd) { best_node = Some((i as u32, d2)); }
        }
    }
    if let Some((id, _)) = best_node { return Some(ObjectRef::Node(id)); }
    // Links, latest on top
    for (i, e) in g.links.iter().enumerate().rev() {
        if let Some(e) = e {
            if e.kind.contains_point(&g.nodes, r, x, y) { return Some(ObjectRef::Edge(i as u32)); }
        }
    }
    None
}

/// Unlocked objects lying entirely inside `rect`.
pub fn objects_in_rect_impl(g: &Graph, rect: [Vec2; 2]) -> Vec<ObjectRef> {
    let r = g.node_radius;
    let mut out = Vec::new();
    for (i, n) in g.nodes.iter().enumerate() {
        let Some(n) = n else { continue };
        if n.locked { continue; }
        let bounds = [Vec2::new(n.x - r, n.y - r), Vec2::new(n.x + r, n.y + r)];
        if is_rect_inside_rect(rect, bounds) { out.push(ObjectRef::Node(i as u32)); }
    }
    for (i, e) in g.links.iter().enumerate() {
        let Some(e) = e else { continue };
        if e.locked { continue; }
        let Some(info) = e.kind.link_info(&g.nodes, r) else { continue };
        let inside = match (&e.kind, &info.arc) {
            (EdgeKind::StartLink(_), _) | (_, None) => is_rect_inside_rect(rect, [info.start, info.end]),
            (_, Some(arc)) => sample_arc(arc, ARC_SAMPLES).into_iter().all(|p| is_point_inside_rect(rect, p)),
        };
        if inside { out.push(ObjectRef::Edge(i as u32)); }
    }
    out
}
