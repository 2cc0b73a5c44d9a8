// Structural rules a new link must satisfy for each graph type

use crate::model::{EdgeKind, GraphType, NodeId, PetriNodeType};
use crate::Graph;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkRejection {
    /// Place to place or transition to transition.
    PetriSameKind(PetriNodeType),
    DuplicateUndirected,
    DuplicateDirected,
    DuplicateSelfLoop,
    /// Loops are never drawn in undirected graphs or Petri nets.
    SelfLoopNotAllowed(GraphType),
}

impl fmt::Display for LinkRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkRejection::PetriSameKind(t) => {
                let kind = match t {
                    PetriNodeType::Place => "place",
                    PetriNodeType::Transition => "transition",
                    PetriNodeType::None => "node",
                };
                write!(f, "An edge between two {}s of a Petri net is not permitted.", kind)
            }
            LinkRejection::DuplicateUndirected => f.write_str("Two edges between two nodes is not permitted."),
            LinkRejection::DuplicateDirected => f.write_str("Two edges from one node to another is not permitted."),
            LinkRejection::DuplicateSelfLoop => f.write_str("Two self-loops for a node is not permitted."),
            LinkRejection::SelfLoopNotAllowed(GraphType::Petri) => {
                f.write_str("An edge from a node of a Petri net to itself is not permitted.")
            }
            LinkRejection::SelfLoopNotAllowed(_) => f.write_str("A self-loop is not permitted in this graph."),
        }
    }
}

fn petri_type(g: &Graph, id: NodeId) -> PetriNodeType {
    g.node(id).map_or(PetriNodeType::None, |n| n.petri_type)
}

/// Checks a link about to be committed against the links already in `g`.
pub fn check_new_link(g: &Graph, graph_type: GraphType, kind: &EdgeKind) -> Result<(), LinkRejection> {
    match (graph_type, kind) {
        (GraphType::Petri, EdgeKind::Link(l)) => {
            let t = petri_type(g, l.a);
            if t == petri_type(g, l.b) { return Err(LinkRejection::PetriSameKind(t)); }
        }
        (GraphType::Petri | GraphType::Undirected, EdgeKind::SelfLink(_)) => {
            return Err(LinkRejection::SelfLoopNotAllowed(graph_type));
        }
        (GraphType::Undirected, EdgeKind::Link(l)) => {
            let dup = g.links().any(|(_, e)| matches!(e.kind,
                EdgeKind::Link(o) if (o.a == l.a && o.b == l.b) || (o.a == l.b && o.b == l.a)));
            if dup { return Err(LinkRejection::DuplicateUndirected); }
        }
        (GraphType::Directed, EdgeKind::Link(l)) => {
            let dup = g.links().any(|(_, e)| matches!(e.kind, EdgeKind::Link(o) if o.a == l.a && o.b == l.b));
            if dup { return Err(LinkRejection::DuplicateDirected); }
        }
        (GraphType::Directed, EdgeKind::SelfLink(s)) => {
            let dup = g.links().any(|(_, e)| matches!(e.kind, EdgeKind::SelfLink(o) if o.node == s.node));
            if dup { return Err(LinkRejection::DuplicateSelfLoop); }
        }
        _ => {}
    }
    Ok(())
}
