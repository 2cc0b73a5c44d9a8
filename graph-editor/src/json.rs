use crate::config::TemplateParams;
use crate::error::{GraphError, Result};
use crate::geometry::limits;
use crate::model::{Color, Edge, EdgeKind, GraphType, Link, Node, PetriNodeType, SelfLink, StartLink};
use crate::Graph;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DOCUMENT_VERSION: i64 = 1;

pub fn to_json_impl(g: &Graph, p: &TemplateParams) -> Value {
    #[derive(Serialize)]
    struct VertexSer<'a> {
        label: &'a str,
        position: [f64; 2],
        locked: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        highlighted: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        initial: Option<bool>,
        #[serde(rename = "final", skip_serializing_if = "Option::is_none")]
        is_final: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        petri_type: Option<PetriNodeType>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tokens: Option<u32>,
    }
    #[derive(Serialize)]
    #[serde(untagged)]
    enum BendSer {
        #[serde(rename_all = "camelCase")]
        Link { parallel_part: f64, perpendicular_part: f64, line_angle_adjust: f64 },
        #[serde(rename_all = "camelCase")]
        SelfLink { anchor_angle: f64 },
        #[serde(rename_all = "camelCase")]
        StartLink { delta_x: f64, delta_y: f64 },
    }
    #[derive(Serialize)]
    struct EdgeSer<'a> {
        from: i64,
        to: i64,
        bend: BendSer,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<&'a str>,
        locked: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        highlighted: Option<bool>,
    }
    #[derive(Serialize)]
    struct Doc<'a> {
        #[serde(rename = "_version")]
        version: i64,
        vertices: Vec<VertexSer<'a>>,
        edges: Vec<EdgeSer<'a>>,
    }

    // Live nodes are written densely; `index[id]` is the position in the document
    let mut index = vec![-1i64; g.nodes.len()];
    let mut vertices = Vec::with_capacity(g.nodes.len());
    for (id, n) in g.nodes() {
        index[id as usize] = vertices.len() as i64;
        let is_fsm = p.graph_type == GraphType::Fsm;
        let is_petri = p.graph_type == GraphType::Petri;
        vertices.push(VertexSer {
            label: &n.label,
            position: [n.x, n.y],
            locked: n.locked || p.save_locked,
            color: if p.vertex_colors.is_some() { n.color.map(Color::code) } else { None },
            highlighted: p.highlight_vertices.then_some(n.highlighted),
            initial: is_fsm.then_some(n.is_initial),
            is_final: is_fsm.then_some(n.is_final),
            petri_type: is_petri.then_some(n.petri_type),
            tokens: (is_petri && n.petri_type == PetriNodeType::Place).then_some(n.tokens),
        });
    }
    let at = |id: u32| index.get(id as usize).copied().unwrap_or(-1);
    let mut edges = Vec::new();
    for (_, e) in g.links() {
        let (from, to, bend) = match e.kind {
            EdgeKind::Link(l) => (at(l.a), at(l.b), BendSer::Link {
                parallel_part: l.parallel_part,
                perpendicular_part: l.perpendicular_part,
                line_angle_adjust: l.line_angle_adjust,
            }),
            EdgeKind::SelfLink(s) => (at(s.node), at(s.node), BendSer::SelfLink { anchor_angle: s.anchor_angle }),
            EdgeKind::StartLink(s) => (-1, at(s.node), BendSer::StartLink { delta_x: s.delta_x, delta_y: s.delta_y }),
        };
        edges.push(EdgeSer {
            from,
            to,
            bend,
            label: (!matches!(e.kind, EdgeKind::StartLink(_))).then_some(e.label.as_str()),
            locked: e.locked || p.save_locked,
            color: if p.edge_colors.is_some() { e.color.map(Color::code) } else { None },
            highlighted: p.highlight_edges.then_some(e.highlighted),
        });
    }
    serde_json::to_value(Doc { version: DOCUMENT_VERSION, vertices, edges }).unwrap_or(Value::Null)
}

#[derive(Deserialize)]
struct VertexDe {
    #[serde(default)]
    label: Value,
    position: Vec<f64>,
    #[serde(default)]
    locked: bool,
    color: Option<String>,
    highlighted: Option<bool>,
    initial: Option<bool>,
    #[serde(rename = "final")]
    is_final: Option<bool>,
    petri_type: Option<String>,
    tokens: Option<f64>,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BendDe {
    parallel_part: Option<f64>,
    perpendicular_part: Option<f64>,
    line_angle_adjust: Option<f64>,
    anchor_angle: Option<f64>,
    delta_x: Option<f64>,
    delta_y: Option<f64>,
}

#[derive(Deserialize)]
struct EdgeDe {
    from: i64,
    to: i64,
    #[serde(default)]
    bend: Option<BendDe>,
    #[serde(default)]
    label: Value,
    #[serde(default)]
    locked: bool,
    color: Option<String>,
    highlighted: Option<bool>,
}

fn label_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn finite(x: Option<f64>, default: f64) -> Option<f64> {
    match x {
        None => Some(default),
        Some(v) if v.is_finite() => Some(v),
        Some(_) => None,
    }
}

/// Replaces the contents of `g` with the document `v`. Everything is validated
/// into staging vectors first so a failure leaves `g` untouched.
pub fn from_json_impl(g: &mut Graph, v: Value, p: &TemplateParams) -> Result<()> {
    let version = v.get("_version").and_then(Value::as_i64);
    if version != Some(DOCUMENT_VERSION) {
        return Err(GraphError::UnsupportedVersion(version));
    }
    let vertices = v.get("vertices").and_then(Value::as_array).ok_or(GraphError::MissingList("vertices"))?;
    let edges = v.get("edges").and_then(Value::as_array).ok_or(GraphError::MissingList("edges"))?;
    if vertices.len() > limits::MAX_NODES {
        return Err(GraphError::LimitExceeded { what: "vertices", max: limits::MAX_NODES });
    }
    if edges.len() > limits::MAX_EDGES {
        return Err(GraphError::LimitExceeded { what: "edges", max: limits::MAX_EDGES });
    }
    let is_fsm = p.graph_type == GraphType::Fsm;
    let is_petri = p.graph_type == GraphType::Petri;
    let range = p.tokens_range;

    // Vertices
    let mut nodes: Vec<Option<Node>> = Vec::with_capacity(vertices.len());
    for (index, raw) in vertices.iter().enumerate() {
        let bad = |reason: String| GraphError::InvalidVertex { index, reason };
        let vd: VertexDe = serde_json::from_value(raw.clone()).map_err(|e| bad(e.to_string()))?;
        let &[x, y] = vd.position.as_slice() else { return Err(bad("position must hold two numbers".into())) };
        if !limits::in_coord_bounds(x) || !limits::in_coord_bounds(y) {
            return Err(bad("position out of bounds".into()));
        }
        let label = label_text(&vd.label).ok_or_else(|| bad("label must be text".into()))?;
        if label.chars().count() > limits::MAX_LABEL_CHARS {
            return Err(bad("label too long".into()));
        }
        let mut n = Node::new(x, y);
        n.label = label;
        n.locked = vd.locked && !p.ignore_locked;
        if p.vertex_colors.is_some() {
            n.color = vd.color.as_deref().and_then(Color::from_code);
        }
        if p.highlight_vertices {
            n.highlighted = vd.highlighted.unwrap_or(false);
        }
        if is_fsm {
            n.is_initial = vd.initial.unwrap_or(false);
            n.is_final = vd.is_final.unwrap_or(false);
        }
        if is_petri {
            n.petri_type = match vd.petri_type.as_deref() {
                Some("place") => PetriNodeType::Place,
                Some("transition") => PetriNodeType::Transition,
                _ => PetriNodeType::None,
            };
            if n.petri_type == PetriNodeType::Place {
                let t = vd.tokens.filter(|t| t.is_finite()).unwrap_or(0.0);
                let clamped = t.max(range.min as f64).min(range.max as f64).floor();
                if clamped != t { warn!("vertex {}: token count {} clamped to {}", index, t, clamped); }
                n.tokens = clamped as u32;
            }
        }
        nodes.push(Some(n));
    }

    // Edges reference vertices by position
    let count = nodes.len() as i64;
    let mut links: Vec<Option<Edge>> = Vec::with_capacity(edges.len());
    for (index, raw) in edges.iter().enumerate() {
        let bad = |reason: &str| GraphError::InvalidEdge { index, reason: reason.to_string() };
        let ed: EdgeDe = serde_json::from_value(raw.clone()).map_err(|e| bad(&e.to_string()))?;
        for end in [ed.from, ed.to] {
            if end < -1 || end >= count || (end == -1 && end == ed.to) {
                return Err(GraphError::InvalidIndex { edge: index, index: end });
            }
        }
        let bend = ed.bend.unwrap_or_default();
        let kind = if ed.from == -1 {
            let node = ed.to as u32;
            if links.iter().flatten().any(|e| matches!(e.kind, EdgeKind::StartLink(s) if s.node == node)) {
                warn!("edge {}: extra start link for vertex {} ignored", index, node);
                continue;
            }
            EdgeKind::StartLink(StartLink {
                node,
                delta_x: finite(bend.delta_x, 0.0).ok_or_else(|| bad("deltaX must be finite"))?,
                delta_y: finite(bend.delta_y, 0.0).ok_or_else(|| bad("deltaY must be finite"))?,
            })
        } else if ed.from == ed.to {
            let mut s = SelfLink::new(ed.from as u32);
            s.anchor_angle = finite(bend.anchor_angle, 0.0).ok_or_else(|| bad("anchorAngle must be finite"))?;
            EdgeKind::SelfLink(s)
        } else {
            EdgeKind::Link(Link {
                a: ed.from as u32,
                b: ed.to as u32,
                parallel_part: finite(bend.parallel_part, 0.5).ok_or_else(|| bad("parallelPart must be finite"))?,
                perpendicular_part: finite(bend.perpendicular_part, 0.0).ok_or_else(|| bad("perpendicularPart must be finite"))?,
                line_angle_adjust: finite(bend.line_angle_adjust, 0.0).ok_or_else(|| bad("lineAngleAdjust must be finite"))?,
            })
        };
        let mut e = Edge::new(kind);
        if !matches!(kind, EdgeKind::StartLink(_)) {
            e.label = label_text(&ed.label).ok_or_else(|| bad("label must be text"))?;
        }
        e.locked = ed.locked && !p.ignore_locked;
        if p.edge_colors.is_some() {
            e.color = ed.color.as_deref().and_then(Color::from_code);
        }
        if p.highlight_edges {
            e.highlighted = ed.highlighted.unwrap_or(false);
        }
        if let EdgeKind::StartLink(s) = kind {
            if let Some(Some(n)) = nodes.get_mut(s.node as usize) { n.is_initial = true; }
        }
        links.push(Some(e));
    }

    g.nodes = nodes;
    g.links = links;
    Ok(())
}
