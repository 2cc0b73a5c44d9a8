//! Pointer handlers: selection, dragging, rubber-band and link drawing.

use super::editor::{Editor, PendingLink};
use super::events::PointerEvent;
use super::rules::LinkRejection;
use crate::config::EditKind;
use crate::geometry::tolerance::SNAP_TO_PADDING;
use crate::model::{EdgeKind, GraphType, Link, NodeId, ObjectRef, SelfLink, TemporaryLink, UiMode, Vec2};

impl Editor {
    pub fn pointer_down(&mut self, ev: &PointerEvent) {
        if !self.allow_events() { return; }
        self.commit_label_edit();
        let p = ev.pos();
        self.mouse = Some(p);
        self.clicked = self.graph.object_at(p.x, p.y, true);
        if ev.button != 0 { return; }

        if self.mode == UiMode::Move || self.clicked.is_some() {
            self.select_objects(ev.shift, p);
            self.init_dragging(p);
        } else if self.current_link.is_none() {
            self.create_node_at(p);
        }
    }

    pub fn pointer_move(&mut self, ev: &PointerEvent) {
        if !self.allow_events() { return; }
        let p = ev.pos();
        self.mouse = Some(p);
        match self.mode {
            UiMode::Add => {
                self.provisional_link(p);
            }
            UiMode::Move => {
                self.move_objects(p);
                if self.clicked.is_none() {
                    if let Some(rect) = &mut self.selection_rect { rect[1] = p; }
                }
            }
        }
    }

    pub fn pointer_up(&mut self, ev: &PointerEvent) {
        if !self.allow_events() { return; }
        if !ev.ctrl && self.temp_move_active { self.disable_temporary_move_mode(); }

        if let Some(pending) = self.current_link.take() {
            self.finish_link(pending, ev.pos());
            self.clicked = None;
        } else if let Some(rect) = self.selection_rect.take() {
            self.select_within_rect(rect, ev.shift);
        } else {
            self.release_drag(ev.shift);
            self.clicked = None;
        }
        for obj in std::mem::take(&mut self.dragged) {
            self.graph.set_has_moved(obj, false);
        }
    }

    pub fn pointer_enter(&mut self, ev: &PointerEvent) {
        if !self.allow_events() { return; }
        if !ev.ctrl && self.temp_move_active { self.disable_temporary_move_mode(); }
        self.mouse = Some(ev.pos());
    }

    /// Leaving the canvas ends the gesture as if the button were released.
    pub fn pointer_leave(&mut self, ev: &PointerEvent) {
        if !self.allow_events() { return; }
        self.mouse = None;
        self.current_link = None;
        self.pointer_up(ev);
    }

    fn select_objects(&mut self, shift: bool, p: Vec2) {
        match (shift, self.clicked) {
            (true, Some(c)) => {
                let mut sel = self.selection.clone();
                if let Some(i) = sel.iter().position(|o| *o == c) { sel.remove(i); } else { sel.push(c); }
                self.set_selection(sel);
            }
            (true, None) => {}
            (false, c) => {
                if !c.is_some_and(|c| self.selection.contains(&c)) {
                    self.set_selection(c.into_iter().collect());
                }
            }
        }
        if self.clicked.is_none() {
            self.selection_rect = Some([p, p]);
        }
    }

    fn init_dragging(&mut self, p: Vec2) {
        let blocked = match self.clicked {
            Some(ObjectRef::Node(_)) => self.params.locknodes,
            Some(ObjectRef::Edge(id)) => {
                self.params.lockedges && self.graph.link(id).is_some_and(|e| matches!(e.kind, EdgeKind::Link(_)))
            }
            None => false,
        };
        self.dragged.clear();
        if blocked { return; }

        self.dragged = self.selection.clone();
        if let Some(c) = self.clicked {
            if !self.dragged.contains(&c) { self.dragged.push(c); }
        }
        for obj in self.dragged.clone() {
            match obj {
                ObjectRef::Node(id) => {
                    if let Some(n) = self.graph.node_mut(id) { n.set_mouse_start(p.x, p.y); }
                }
                ObjectRef::Edge(id) => self.graph.set_link_mouse_start(id, p.x, p.y),
            }
        }
    }

    fn provisional_link(&mut self, p: Vec2) {
        let Some(ObjectRef::Node(from)) = self.clicked else { return };
        if !self.allow_edits(EditKind::EditEdge) { return; }
        let target = self.graph.node_at(p.x, p.y, true);
        let strict = self.graph.object_at(p.x, p.y, false);
        let radius = self.graph.node_radius;
        let Some(from_node) = self.graph.node(from) else { return };
        let loops_allowed = matches!(self.params.graph_type, GraphType::Directed | GraphType::Fsm);

        self.current_link = Some(match target {
            Some(t) if t == from && loops_allowed => {
                let mut s = SelfLink::new(from);
                s.set_anchor_point(from_node, p.x, p.y);
                PendingLink::SelfLink(s)
            }
            Some(t) if t != from => PendingLink::Link(Link::new(from, t)),
            _ if strict.is_none() => {
                PendingLink::Temporary(TemporaryLink::new(from_node.closest_point_on_node(p.x, p.y, radius), p))
            }
            _ => PendingLink::Suppressed(from),
        });
    }

    fn finish_link(&mut self, pending: PendingLink, p: Vec2) {
        match pending {
            PendingLink::Link(_) | PendingLink::SelfLink(_) => {
                if self.allow_edits(EditKind::EditEdge) { self.commit_link(pending); }
            }
            PendingLink::Suppressed(n) => {
                let gt = self.params.graph_type;
                let over_start = self.graph.node_at(p.x, p.y, true) == Some(n);
                if over_start && matches!(gt, GraphType::Undirected | GraphType::Petri) {
                    self.alert(LinkRejection::SelfLoopNotAllowed(gt).to_string());
                }
            }
            PendingLink::Temporary(_) => {}
        }
    }

    /// Moves the dragged group. Nodes snap to stationary nodes on the axes
    /// along which the group is already aligned.
    fn move_objects(&mut self, p: Vec2) {
        let Some(clicked) = self.clicked else { return };
        if self.dragged.is_empty() || !self.allow_edits(EditKind::Move) { return; }

        match clicked {
            ObjectRef::Node(_) => {
                let dragged_nodes: Vec<NodeId> = self.dragged.iter()
                    .filter_map(|o| match o { ObjectRef::Node(id) => Some(*id), _ => None })
                    .collect();
                let positions: Vec<Vec2> = dragged_nodes.iter().filter_map(|id| self.graph.node(*id)).map(|n| n.pos()).collect();
                let aligned_x = positions.windows(2).all(|w| w[0].x == w[1].x);
                let aligned_y = positions.windows(2).all(|w| w[0].y == w[1].y);
                let stationary: Vec<Vec2> = self.graph.nodes()
                    .filter(|(id, _)| !dragged_nodes.contains(id))
                    .map(|(_, n)| n.pos())
                    .collect();
                for id in dragged_nodes {
                    let Some(n) = self.graph.node_mut(id) else { continue };
                    if n.locked { continue; }
                    n.set_anchor_point(p.x, p.y);
                    for s in &stationary {
                        if aligned_x && (n.x - s.x).abs() < SNAP_TO_PADDING { n.x = s.x; }
                        if aligned_y && (n.y - s.y).abs() < SNAP_TO_PADDING { n.y = s.y; }
                    }
                    n.has_moved = true;
                }
                self.refresh_start_links();
            }
            ObjectRef::Edge(id) => {
                if !self.dragged.contains(&clicked) || self.graph.is_locked(clicked) { return; }
                let snapped = self.graph.set_link_anchor(id, p.x, p.y);
                self.graph.set_has_moved(clicked, true);
                if !snapped {
                    self.dragged = vec![clicked];
                    self.set_selection(vec![clicked]);
                }
            }
        }
    }

    fn select_within_rect(&mut self, rect: [Vec2; 2], shift: bool) {
        let inside = self.graph.objects_in_rectangle(rect);
        if !shift {
            self.set_selection(inside);
            return;
        }
        let all_selected = inside.iter().all(|o| self.selection.contains(o));
        let sel = if all_selected {
            self.selection.iter().copied().filter(|o| !inside.contains(o)).collect()
        } else {
            let mut sel = self.selection.clone();
            sel.extend(inside);
            sel
        };
        self.set_selection(sel);
    }

    fn release_drag(&mut self, shift: bool) {
        let Some(clicked) = self.clicked else { return };
        let moved = self.dragged.iter().any(|o| self.graph.has_moved(*o));
        if moved {
            self.on_graph_change();
        } else if !shift {
            self.set_selection(vec![clicked]);
        }
    }
}
