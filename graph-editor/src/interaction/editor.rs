//! Editor controller: owns the graph, the selection and the undo history, and
//! turns input events into edits. Handlers live in `pointer` and `keyboard`.

use super::events::Effect;
use super::rules::check_new_link;
use crate::algorithms::start_link::start_link_position;
use crate::config::{EditKind, LabelRules, TemplateParams};
use crate::error::GraphError;
use crate::geometry::tolerance::DUPLICATE_LINK_OFFSET;
use crate::history::History;
use crate::toolbar::LabelKind;
use crate::model::{
    Edge, EdgeKind, GraphType, Link, LinkId, Node, NodeId, ObjectRef, PetriNodeType, SelfLink, StartLink,
    TemporaryLink, UiMode, Vec2,
};
use crate::Graph;
use log::{debug, info, warn};

/// Link being drawn in ADD mode, not yet part of the graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PendingLink {
    Link(Link),
    SelfLink(SelfLink),
    Temporary(TemporaryLink),
    /// Pointer is back over the start node where no loop may be drawn.
    Suppressed(NodeId),
}

pub struct Editor {
    pub(crate) graph: Graph,
    pub(crate) params: TemplateParams,
    pub(crate) labels: LabelRules,
    pub(crate) read_only: bool,
    pub(crate) mode: UiMode,
    pub(crate) temp_move_active: bool,
    pub(crate) petri_node_type: PetriNodeType,
    pub(crate) selection: Vec<ObjectRef>,
    pub(crate) dragged: Vec<ObjectRef>,
    pub(crate) clicked: Option<ObjectRef>,
    pub(crate) selection_rect: Option<[Vec2; 2]>,
    pub(crate) current_link: Option<PendingLink>,
    pub(crate) mouse: Option<Vec2>,
    pub(crate) history: History,
    pub(crate) text: String,                // host text slot
    pub(crate) failure: Option<GraphError>, // sticky once a load fails
    pub(crate) label_dirty: bool,
    pub(crate) label_initial: Option<(ObjectRef, String)>, // label before typing started
    pub(crate) ants_offset: f64,
    pub(crate) effects: Vec<Effect>,
}

impl Editor {
    /// Loads `text` (blank for a new graph). A document that cannot be loaded
    /// leaves the editor failed and inert.
    pub fn new(text: &str, params: TemplateParams, read_only: bool) -> Editor {
        let mut graph = Graph::with_node_radius(params.node_radius());
        let failure = graph.load_str(text, &params).err();
        if let Some(e) = &failure {
            warn!("graph document rejected: {}", e);
        }
        let petri_node_type = if params.graph_type == GraphType::Petri { PetriNodeType::Place } else { PetriNodeType::None };
        Editor {
            graph,
            labels: LabelRules::from_params(&params),
            params,
            read_only,
            mode: UiMode::default(),
            temp_move_active: false,
            petri_node_type,
            selection: Vec::new(),
            dragged: Vec::new(),
            clicked: None,
            selection_rect: None,
            current_link: None,
            mouse: None,
            history: History::new(text.to_string()),
            text: text.to_string(),
            failure,
            label_dirty: false,
            label_initial: None,
            ants_offset: 0.0,
            effects: Vec::new(),
        }
    }

    pub fn from_config_json(text: &str, config: &str, read_only: bool) -> Result<Editor, GraphError> {
        Ok(Editor::new(text, TemplateParams::from_json(config)?, read_only))
    }

    pub fn graph(&self) -> &Graph { &self.graph }
    pub fn params(&self) -> &TemplateParams { &self.params }
    pub fn graph_type(&self) -> GraphType { self.params.graph_type }
    pub fn mode(&self) -> UiMode { self.mode }
    pub fn temp_move_active(&self) -> bool { self.temp_move_active }
    pub fn petri_node_type(&self) -> PetriNodeType { self.petri_node_type }
    pub fn selection(&self) -> &[ObjectRef] { &self.selection }
    pub fn selection_rect(&self) -> Option<[Vec2; 2]> { self.selection_rect }
    pub fn current_link(&self) -> Option<&PendingLink> { self.current_link.as_ref() }
    pub fn mouse_position(&self) -> Option<Vec2> { self.mouse }
    pub fn history(&self) -> &History { &self.history }
    pub fn is_read_only(&self) -> bool { self.read_only }
    pub fn ants_offset(&self) -> f64 { self.ants_offset }

    pub fn failure(&self) -> Option<&GraphError> { self.failure.as_ref() }
    pub fn failed(&self) -> bool { self.failure.is_some() }
    pub fn fail_message_key(&self) -> Option<&'static str> { self.failure.as_ref().map(GraphError::message_key) }

    /// Input is ignored while read-only or after a failed load.
    pub fn allow_events(&self) -> bool { !self.read_only && self.failure.is_none() }

    pub fn allow_edits(&self, kind: EditKind) -> bool { !self.read_only && self.params.allows(kind) }

    pub fn is_selected(&self, obj: ObjectRef) -> bool { self.selection.contains(&obj) }

    pub fn take_effects(&mut self) -> Vec<Effect> { std::mem::take(&mut self.effects) }

    pub fn text(&self) -> &str { &self.text }

    /// Writes the graph into the text slot. A blank slot stays blank until the
    /// graph has a node.
    pub fn save(&mut self) {
        if self.failure.is_some() { return; }
        if self.text.trim().is_empty() && self.graph.node_count() == 0 { return; }
        match self.graph.to_json_string(&self.params) {
            Ok(s) => self.text = s,
            Err(e) => warn!("graph could not be serialised: {}", e),
        }
    }

    pub fn serialize(&mut self) -> &str {
        self.save();
        &self.text
    }

    /// Records the current graph as one undoable step.
    pub(crate) fn on_graph_change(&mut self) {
        self.save();
        self.history.push(self.text.clone());
        self.label_dirty = false;
        self.effects.push(Effect::GraphChanged);
    }

    pub fn can_undo(&self) -> bool { self.allow_events() && self.history.can_undo() }
    pub fn can_redo(&self) -> bool { self.allow_events() && self.history.can_redo() }

    pub fn undo(&mut self) -> bool {
        if !self.allow_events() { return false; }
        self.commit_label_edit();
        let Some(snapshot) = self.history.undo().map(str::to_string) else { return false };
        info!("undo to step {}", self.history.pointer());
        self.restore_snapshot(snapshot);
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.allow_events() { return false; }
        self.commit_label_edit();
        let Some(snapshot) = self.history.redo().map(str::to_string) else { return false };
        info!("redo to step {}", self.history.pointer());
        self.restore_snapshot(snapshot);
        true
    }

    fn restore_snapshot(&mut self, snapshot: String) {
        let mut graph = Graph::with_node_radius(self.params.node_radius());
        match graph.load_str(&snapshot, &self.params) {
            Ok(()) => {
                self.graph = graph;
                self.text = snapshot;
            }
            Err(e) => {
                warn!("history snapshot rejected: {}", e);
                self.failure = Some(e);
            }
        }
        self.reset_gesture();
        self.selection.clear();
        self.effects.push(Effect::SelectionChanged);
    }

    pub(crate) fn reset_gesture(&mut self) {
        self.dragged.clear();
        self.clicked = None;
        self.current_link = None;
        self.selection_rect = None;
    }

    pub fn set_mode(&mut self, mode: UiMode) {
        self.commit_label_edit();
        self.mode = mode;
        self.temp_move_active = false;
        self.reset_gesture();
        if mode == UiMode::Add {
            self.set_selection(Vec::new());
            if self.params.graph_type == GraphType::Petri { self.petri_node_type = PetriNodeType::Place; }
        }
        self.effects.push(Effect::ModeChanged { mode });
    }

    pub fn set_petri_node_type(&mut self, t: PetriNodeType) {
        if self.params.graph_type == GraphType::Petri && t != PetriNodeType::None {
            self.petri_node_type = t;
        }
    }

    pub(crate) fn enable_temporary_move_mode(&mut self) {
        if self.allow_edits(EditKind::EditVertex) || self.allow_edits(EditKind::EditEdge) {
            self.mode = UiMode::Move;
            self.temp_move_active = true;
            self.current_link = None;
            self.effects.push(Effect::ModeChanged { mode: UiMode::Move });
        }
    }

    pub(crate) fn disable_temporary_move_mode(&mut self) {
        self.mode = UiMode::Add;
        self.temp_move_active = false;
        self.effects.push(Effect::ModeChanged { mode: UiMode::Add });
    }

    /// Replaces the selection; references to missing objects are dropped.
    pub fn set_selection(&mut self, objs: Vec<ObjectRef>) {
        let mut sel: Vec<ObjectRef> = Vec::with_capacity(objs.len());
        for o in objs {
            if self.graph.contains(o) && !sel.contains(&o) { sel.push(o); }
        }
        if sel != self.selection {
            self.commit_label_edit();
            self.selection = sel;
            self.effects.push(Effect::SelectionChanged);
        }
    }

    pub fn clear_selection(&mut self) { self.set_selection(Vec::new()); }

    /// Whether the selection may be deleted: nothing locked and the edit
    /// permission for each kind present.
    pub fn can_delete_selection(&self) -> bool {
        if !self.allow_events() || self.selection.is_empty() { return false; }
        if self.selection.iter().any(|o| self.graph.is_locked(*o)) { return false; }
        let has_nodes = self.selection.iter().any(|o| o.is_node());
        let has_edges = self.selection.iter().any(|o| o.is_edge());
        (!has_nodes || self.allow_edits(EditKind::EditVertex)) && (!has_edges || self.allow_edits(EditKind::EditEdge))
    }

    /// Deletes the selection; nodes take their links with them.
    pub fn delete_selected(&mut self) -> bool {
        self.commit_label_edit();
        if !self.can_delete_selection() {
            if !self.selection.is_empty() { warn!("deletion of the selection is not permitted"); }
            return false;
        }
        for obj in std::mem::take(&mut self.selection) {
            match obj {
                ObjectRef::Edge(id) => { self.graph.remove_link(id); }
                ObjectRef::Node(id) => { self.graph.remove_node(id); }
            }
        }
        debug!("deleted selection");
        self.reset_gesture();
        self.on_graph_change();
        self.effects.push(Effect::SelectionChanged);
        true
    }

    /// Marks an FSM node initial and places its start arrow where there is room.
    pub fn set_initial_fsm_vertex(&mut self, id: NodeId) {
        if self.params.graph_type != GraphType::Fsm { return; }
        if let Some(lid) = self.graph.start_link_of(id) { self.graph.remove_link(lid); }
        let angles = self.graph.incident_angles(id);
        let radius = self.graph.node_radius;
        let Some(node) = self.graph.node_mut(id) else { return };
        node.is_initial = true;
        let pos = start_link_position(node.pos(), &angles, radius);
        let mut link = StartLink::new(id);
        link.set_anchor_point(node, pos.x, pos.y);
        if let Err(e) = self.graph.add_link(Edge::new(EdgeKind::StartLink(link))) {
            warn!("start link for node {} not added: {}", id, e);
        }
    }

    pub fn remove_initial_fsm_vertex(&mut self, id: NodeId) {
        if let Some(lid) = self.graph.start_link_of(id) { self.graph.remove_link(lid); }
        if let Some(n) = self.graph.node_mut(id) { n.is_initial = false; }
    }

    /// Re-places every start arrow after the links around its node changed.
    pub(crate) fn refresh_start_links(&mut self) {
        if self.params.graph_type != GraphType::Fsm { return; }
        let radius = self.graph.node_radius;
        let starts: Vec<(LinkId, NodeId)> = self.graph.links()
            .filter_map(|(lid, e)| match e.kind { EdgeKind::StartLink(s) => Some((lid, s.node)), _ => None })
            .collect();
        for (lid, nid) in starts {
            let angles = self.graph.incident_angles(nid);
            let Some(node) = self.graph.node(nid).cloned() else { continue };
            let pos = start_link_position(node.pos(), &angles, radius);
            if let Some(Edge { kind: EdgeKind::StartLink(s), .. }) = self.graph.link_mut(lid) {
                s.set_anchor_point(&node, pos.x, pos.y);
            }
        }
    }

    pub(crate) fn create_node_at(&mut self, p: Vec2) -> Option<NodeId> {
        if !self.allow_edits(EditKind::EditVertex) { return None; }
        let mut n = Node::new(p.x, p.y);
        n.color = self.params.first_vertex_color();
        if self.params.graph_type == GraphType::Petri {
            n.petri_type = match self.petri_node_type {
                PetriNodeType::None => PetriNodeType::Place,
                t => t,
            };
        }
        let id = self.graph.add_node(n);
        debug!("created node {} at ({}, {})", id, p.x, p.y);
        if self.params.graph_type == GraphType::Fsm && self.graph.node_count() == 1 {
            self.set_initial_fsm_vertex(id);
        }
        self.set_selection(vec![ObjectRef::Node(id)]);
        self.on_graph_change();
        Some(id)
    }

    /// Commits a drawn link if the graph type allows it, fanning it out from
    /// links already joining the same nodes.
    pub(crate) fn commit_link(&mut self, pending: PendingLink) {
        let mut kind = match pending {
            PendingLink::Link(l) => EdgeKind::Link(l),
            PendingLink::SelfLink(s) => EdgeKind::SelfLink(s),
            PendingLink::Temporary(_) | PendingLink::Suppressed(_) => return,
        };
        if let Err(rejection) = check_new_link(&self.graph, self.params.graph_type, &kind) {
            self.alert(rejection.to_string());
            return;
        }
        if let EdgeKind::Link(l) = &mut kind {
            if let Some(max) = self.graph.next_parallel_offset(l.a, l.b) {
                l.perpendicular_part = max + DUPLICATE_LINK_OFFSET;
            }
        }
        let mut edge = Edge::new(kind);
        edge.color = self.params.first_edge_color();
        match self.graph.add_link(edge) {
            Ok(id) => {
                debug!("committed link {}", id);
                self.set_selection(vec![ObjectRef::Edge(id)]);
                self.refresh_start_links();
                self.on_graph_change();
            }
            Err(e) => warn!("link not added: {}", e),
        }
    }

    /// Rejects the gesture in progress with a message for the user.
    pub(crate) fn alert(&mut self, message: String) {
        warn!("edit rejected: {}", message);
        self.current_link = None;
        self.clicked = None;
        self.effects.push(Effect::Alert { message });
    }

    /// Records pending label typing as one history step. A text label that
    /// fails its pattern is rolled back to the label it had before typing.
    pub fn commit_label_edit(&mut self) {
        let started = self.label_initial.take();
        if !self.label_dirty { return; }
        self.label_dirty = false;
        let Some((obj, initial)) = started else { return };
        let current = self.graph.label_of(obj).unwrap_or_default().to_string();
        let checked = self.label_kind(obj) == Some(LabelKind::Text);
        if checked && !self.labels.is_valid(&current, obj.is_node()) {
            let restored = if self.labels.is_valid(&initial, obj.is_node()) { initial } else { String::new() };
            if let Some(label) = self.graph.label_mut(obj) { *label = restored.clone(); }
            self.alert("The entered label does not match the regex.".to_string());
            self.effects.push(Effect::LabelInput { value: restored });
            return;
        }
        if current != initial { self.on_graph_change(); }
    }

    /// Advances the selection rectangle's dash animation. True when a redraw is due.
    pub fn tick(&mut self) -> bool {
        if self.selection_rect.is_none() { return false; }
        self.ants_offset = (self.ants_offset - 1.0) % 10.0;
        true
    }
}
