pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod toolbar;
pub mod geometry {
    pub mod arc;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod elements {
    pub mod link;
    pub mod node;
}
pub mod algorithms {
    pub mod picking;
    pub mod start_link;
    pub mod text_layout;
}
pub mod interaction {
    pub mod editor;
    pub mod events;
    pub mod keyboard;
    pub mod pointer;
    pub mod rules;
}
pub mod render {
    pub mod canvas;
    pub mod scene;
}
mod json;

pub use config::{EditKind, TemplateParams};
pub use error::GraphError;
pub use interaction::editor::Editor;

use algorithms::text_layout::Sides;
use error::Result;
use geometry::arc::LinkInfo;
use geometry::tolerance::DEFAULT_NODE_RADIUS;
use log::debug;
use model::{Edge, EdgeKind, LinkId, Node, NodeId, ObjectRef, Vec2};
use serde_json::Value;
use std::collections::VecDeque;

#[derive(Clone, Debug)]
pub struct Graph {
    pub(crate) nodes: Vec<Option<Node>>, // id is index
    pub(crate) links: Vec<Option<Edge>>, // id is index
    pub(crate) node_radius: f64,
}

impl Default for Graph {
    fn default() -> Self { Graph::new() }
}

impl elements::link::NodeLookup for Graph {
    fn node(&self, id: NodeId) -> Option<&Node> { Graph::node(self, id) }
}

impl Edge {
    pub fn new(kind: EdgeKind) -> Edge {
        Edge { kind, label: String::new(), color: None, highlighted: false, locked: false, has_moved: false }
    }
}

impl Graph {
    pub fn new() -> Self { Graph::with_node_radius(DEFAULT_NODE_RADIUS) }

    pub fn with_node_radius(node_radius: f64) -> Self {
        Graph { nodes: Vec::new(), links: Vec::new(), node_radius }
    }

    pub fn node_radius(&self) -> f64 { self.node_radius }

    // Nodes
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len() as u32;
        self.nodes.push(Some(node));
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> { self.nodes.get(id as usize).and_then(Option::as_ref) }
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> { self.nodes.get_mut(id as usize).and_then(Option::as_mut) }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| n.as_ref().map(|n| (i as u32, n)))
    }

    pub fn node_count(&self) -> usize { self.nodes.iter().filter(|n| n.is_some()).count() }

    /// Removes the node and every link touching it.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() { return false; }
        let touching: Vec<LinkId> = self.links().filter(|(_, e)| e.kind.touches(id)).map(|(i, _)| i).collect();
        for lid in touching { self.remove_link(lid); }
        self.nodes[id as usize] = None;
        debug!("removed node {}", id);
        true
    }

    /// Clears nodes together with links so no reference can dangle.
    pub fn clear_nodes(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }

    // Links
    /// Adds a link after checking its endpoints. A node keeps at most one start link.
    pub fn add_link(&mut self, edge: Edge) -> Result<LinkId> {
        match &edge.kind {
            EdgeKind::Link(l) => {
                if l.a == l.b { return Err(GraphError::SelfLinkEdge); }
                for id in [l.a, l.b] {
                    if self.node(id).is_none() { return Err(GraphError::MissingNode(id)); }
                }
            }
            EdgeKind::SelfLink(s) => {
                if self.node(s.node).is_none() { return Err(GraphError::MissingNode(s.node)); }
            }
            EdgeKind::StartLink(s) => {
                if self.node(s.node).is_none() { return Err(GraphError::MissingNode(s.node)); }
                if self.has_start_link(s.node) { return Err(GraphError::DuplicateStartLink(s.node)); }
            }
        }
        let id = self.links.len() as u32;
        self.links.push(Some(edge));
        Ok(id)
    }

    pub fn link(&self, id: LinkId) -> Option<&Edge> { self.links.get(id as usize).and_then(Option::as_ref) }
    pub fn link_mut(&mut self, id: LinkId) -> Option<&mut Edge> { self.links.get_mut(id as usize).and_then(Option::as_mut) }

    pub fn links(&self) -> impl Iterator<Item = (LinkId, &Edge)> + '_ {
        self.links.iter().enumerate().filter_map(|(i, e)| e.as_ref().map(|e| (i as u32, e)))
    }

    pub fn link_count(&self) -> usize { self.links.iter().filter(|e| e.is_some()).count() }

    /// Removes a link; removing a start link also clears its node's initial flag.
    pub fn remove_link(&mut self, id: LinkId) -> bool {
        let Some(edge) = self.links.get_mut(id as usize).and_then(Option::take) else { return false };
        if let EdgeKind::StartLink(s) = edge.kind {
            if let Some(n) = self.node_mut(s.node) { n.is_initial = false; }
        }
        true
    }

    pub fn clear_links(&mut self) { self.links.clear(); }

    pub fn contains(&self, obj: ObjectRef) -> bool {
        match obj {
            ObjectRef::Node(id) => self.node(id).is_some(),
            ObjectRef::Edge(id) => self.link(id).is_some(),
        }
    }

    pub fn is_locked(&self, obj: ObjectRef) -> bool {
        match obj {
            ObjectRef::Node(id) => self.node(id).is_some_and(|n| n.locked),
            ObjectRef::Edge(id) => self.link(id).is_some_and(|e| e.locked),
        }
    }

    pub fn label_of(&self, obj: ObjectRef) -> Option<&str> {
        match obj {
            ObjectRef::Node(id) => self.node(id).map(|n| n.label.as_str()),
            ObjectRef::Edge(id) => self.link(id).map(|e| e.label.as_str()),
        }
    }

    pub fn label_mut(&mut self, obj: ObjectRef) -> Option<&mut String> {
        match obj {
            ObjectRef::Node(id) => self.node_mut(id).map(|n| &mut n.label),
            ObjectRef::Edge(id) => self.link_mut(id).map(|e| &mut e.label),
        }
    }

    pub fn set_has_moved(&mut self, obj: ObjectRef, moved: bool) {
        match obj {
            ObjectRef::Node(id) => if let Some(n) = self.node_mut(id) { n.has_moved = moved; },
            ObjectRef::Edge(id) => if let Some(e) = self.link_mut(id) { e.has_moved = moved; },
        }
    }

    pub fn has_moved(&self, obj: ObjectRef) -> bool {
        match obj {
            ObjectRef::Node(id) => self.node(id).is_some_and(|n| n.has_moved),
            ObjectRef::Edge(id) => self.link(id).is_some_and(|e| e.has_moved),
        }
    }

    // Link geometry
    pub fn link_info(&self, id: LinkId) -> Option<LinkInfo> {
        self.link(id)?.kind.link_info(&self.nodes, self.node_radius)
    }

    pub fn set_link_mouse_start(&mut self, id: LinkId, x: f64, y: f64) {
        if let Some(Some(e)) = self.links.get_mut(id as usize) {
            e.kind.set_mouse_start(&self.nodes, x, y);
        }
    }

    /// Drags a link's shape; true when a regular link snapped straight.
    pub fn set_link_anchor(&mut self, id: LinkId, x: f64, y: f64) -> bool {
        match self.links.get_mut(id as usize) {
            Some(Some(e)) => e.kind.set_anchor_point(&self.nodes, x, y),
            _ => false,
        }
    }

    // Queries
    pub fn object_at(&self, x: f64, y: f64, use_node_padding: bool) -> Option<ObjectRef> {
        algorithms::picking::pick_impl(self, x, y, use_node_padding)
    }

    pub fn node_at(&self, x: f64, y: f64, use_padding: bool) -> Option<NodeId> {
        match self.object_at(x, y, use_padding) {
            Some(ObjectRef::Node(id)) => Some(id),
            _ => None,
        }
    }

    pub fn objects_in_rectangle(&self, rect: [Vec2; 2]) -> Vec<ObjectRef> {
        algorithms::picking::objects_in_rect_impl(self, rect)
    }

    /// Nodes joined to `id` by a regular link.
    pub fn neighbours(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for (_, e) in self.links() {
            if let EdgeKind::Link(l) = e.kind {
                let other = if l.a == id { l.b } else if l.b == id { l.a } else { continue };
                if other != id && !out.contains(&other) { out.push(other); }
            }
        }
        out
    }

    /// Nodes reachable from `id` over regular links, `id` first.
    pub fn connected_component(&self, id: NodeId) -> Vec<NodeId> {
        if self.node(id).is_none() { return Vec::new(); }
        let mut seen = vec![id];
        let mut queue = VecDeque::from([id]);
        while let Some(n) = queue.pop_front() {
            for m in self.neighbours(n) {
                if !seen.contains(&m) {
                    seen.push(m);
                    queue.push_back(m);
                }
            }
        }
        seen
    }

    pub fn start_link_of(&self, id: NodeId) -> Option<LinkId> {
        self.links().find(|(_, e)| matches!(e.kind, EdgeKind::StartLink(s) if s.node == id)).map(|(i, _)| i)
    }

    pub fn has_start_link(&self, id: NodeId) -> bool { self.start_link_of(id).is_some() }

    /// Angles at which links other than the start link meet `id`.
    pub fn incident_angles(&self, id: NodeId) -> Vec<f64> {
        self.links()
            .filter(|(_, e)| !matches!(e.kind, EdgeKind::StartLink(_)))
            .flat_map(|(_, e)| e.kind.incident_angles(id, &self.nodes, self.node_radius))
            .collect()
    }

    /// Sides of `id` touched by any link, start links included.
    pub fn link_intersection_sides(&self, id: NodeId) -> Sides {
        Sides::from_angles(self.links().flat_map(|(_, e)| e.kind.incident_angles(id, &self.nodes, self.node_radius)))
    }

    /// Largest bend among links already joining `a` and `b`, measured in the
    /// frame of `a`→`b`. None when the pair is not yet linked.
    pub fn next_parallel_offset(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.links()
            .filter_map(|(_, e)| match e.kind {
                EdgeKind::Link(l) if l.a == a && l.b == b => Some(l.perpendicular_part),
                EdgeKind::Link(l) if l.a == b && l.b == a => Some(-l.perpendicular_part),
                _ => None,
            })
            .reduce(f64::max)
    }

    // JSON
    pub fn to_json_value(&self, params: &TemplateParams) -> Value { json::to_json_impl(self, params) }

    pub fn to_json_string(&self, params: &TemplateParams) -> Result<String> {
        Ok(serde_json::to_string(&self.to_json_value(params))?)
    }

    /// Replaces the graph with the document in `text`. On error the graph is
    /// left untouched.
    pub fn load_str(&mut self, text: &str, params: &TemplateParams) -> Result<()> {
        if text.trim().is_empty() {
            self.clear_nodes();
            return Ok(());
        }
        let v: Value = serde_json::from_str(text)?;
        json::from_json_impl(self, v, params)
    }
}
