//! Which property editors the host toolbar offers for the current selection,
//! and the edits they perform.

use crate::config::{EditKind, TokenRange};
use crate::interaction::editor::Editor;
use crate::model::{Color, EdgeKind, GraphType, ObjectRef, PetriNodeType};
use log::debug;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
    Checked,
    Unchecked,
    Mixed,
}

impl CheckState {
    pub fn from_counts(set: usize, total: usize) -> CheckState {
        if set == 0 {
            CheckState::Unchecked
        } else if set >= total {
            CheckState::Checked
        } else {
            CheckState::Mixed
        }
    }
}

/// How a label is edited: free text, or a Petri edge weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    Text,
    Number,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelEditor {
    Text { value: String, valid: bool },
    /// A weight of zero shows as an empty field.
    Number { value: String, min: u32, max: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TokenField {
    /// None when the selected places disagree.
    pub value: Option<u32>,
    pub min: u32,
    pub max: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ToolbarState {
    pub colors: Option<Vec<Color>>,
    pub label: Option<LabelEditor>,
    pub highlight: Option<CheckState>,
    pub fsm_initial: Option<CheckState>,
    pub fsm_final: Option<CheckState>,
    pub tokens: Option<TokenField>,
    pub delete_enabled: bool,
    pub undo_enabled: bool,
    pub redo_enabled: bool,
    /// Place/transition buttons for new Petri nodes.
    pub petri_node_types: bool,
}

/// Token count from a number field: blank or below range gives the minimum.
pub fn clamp_tokens(input: &str, range: &TokenRange) -> u32 {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= f64::from(range.min) => {
            if v > f64::from(range.max) { range.max } else { v.trunc() as u32 }
        }
        _ => range.min,
    }
}

/// Petri edge weight from a number field. A weight at the minimum is written
/// as an empty label when the minimum is zero.
pub fn clamp_link_weight(input: &str, range: &TokenRange) -> String {
    let floor = || if range.min == 0 { String::new() } else { range.min.to_string() };
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > f64::from(range.min) => {
            if v > f64::from(range.max) { range.max.to_string() } else { (v.trunc() as u32).to_string() }
        }
        _ => floor(),
    }
}

impl Editor {
    pub fn toolbar_state(&self) -> ToolbarState {
        let mut state = ToolbarState {
            delete_enabled: self.can_delete_selection(),
            undo_enabled: self.can_undo(),
            redo_enabled: self.can_redo(),
            petri_node_types: self.allow_events()
                && self.params.graph_type == GraphType::Petri
                && self.mode == crate::model::UiMode::Add
                && self.allow_edits(EditKind::EditVertex),
            ..Default::default()
        };
        if !self.properties_editable() { return state; }
        state.colors = self.offered_colors();
        state.label = self.label_editor();
        state.highlight = self.highlight_state();
        (state.fsm_initial, state.fsm_final) = self.fsm_states().unzip();
        state.tokens = self.token_field();
        state
    }

    /// The selection exists, the editor accepts input and nothing selected is locked.
    fn properties_editable(&self) -> bool {
        self.allow_events()
            && !self.selection.is_empty()
            && !self.selection.iter().any(|o| self.graph.is_locked(*o))
    }

    /// Start links carry no label; Petri arcs carry a numeric weight.
    pub(crate) fn label_kind(&self, obj: ObjectRef) -> Option<LabelKind> {
        match obj {
            ObjectRef::Node(id) => self.graph.node(id).map(|_| LabelKind::Text),
            ObjectRef::Edge(id) => match self.graph.link(id)?.kind {
                EdgeKind::StartLink(_) => None,
                EdgeKind::Link(_) if self.params.graph_type == GraphType::Petri => Some(LabelKind::Number),
                _ => Some(LabelKind::Text),
            },
        }
    }

    /// The single selected object whose label may be typed.
    pub(crate) fn label_target(&self) -> Option<(ObjectRef, LabelKind)> {
        if !self.properties_editable() { return None; }
        let &[obj] = self.selection.as_slice() else { return None };
        let permission = if obj.is_node() { EditKind::VertexLabels } else { EditKind::EdgeLabels };
        if !self.allow_edits(permission) { return None; }
        Some((obj, self.label_kind(obj)?))
    }

    fn label_editor(&self) -> Option<LabelEditor> {
        let (obj, kind) = self.label_target()?;
        let value = self.graph.label_of(obj)?.to_string();
        Some(match kind {
            LabelKind::Text => LabelEditor::Text { valid: self.labels.is_valid(&value, obj.is_node()), value },
            LabelKind::Number => {
                let shown = match value.trim().parse::<f64>() {
                    Ok(v) if v != 0.0 => value,
                    _ => String::new(),
                };
                LabelEditor::Number { value: shown, min: self.params.tokens_range.min, max: self.params.tokens_range.max }
            }
        })
    }

    fn offered_colors(&self) -> Option<Vec<Color>> {
        let only_nodes = self.selection.iter().all(|o| o.is_node());
        let only_edges = self.selection.iter().all(|o| o.is_edge());
        let p = &self.params;
        if p.same_palettes() && self.allow_edits(EditKind::VertexColors) && self.allow_edits(EditKind::EdgeColors) {
            p.vertex_colors.clone()
        } else if only_nodes && self.allow_edits(EditKind::VertexColors) {
            p.vertex_colors.clone()
        } else if only_edges && self.allow_edits(EditKind::EdgeColors) {
            p.edge_colors.clone()
        } else {
            None
        }
    }

    fn highlight_state(&self) -> Option<CheckState> {
        let p = &self.params;
        let has_nodes = self.selection.iter().any(|o| o.is_node());
        let has_edges = self.selection.iter().any(|o| o.is_edge());
        if (has_nodes && !p.highlight_vertices) || (has_edges && !p.highlight_edges) { return None; }
        let set = self.selection.iter().filter(|o| self.is_highlighted(**o)).count();
        Some(CheckState::from_counts(set, self.selection.len()))
    }

    fn is_highlighted(&self, obj: ObjectRef) -> bool {
        match obj {
            ObjectRef::Node(id) => self.graph.node(id).is_some_and(|n| n.highlighted),
            ObjectRef::Edge(id) => self.graph.link(id).is_some_and(|e| e.highlighted),
        }
    }

    fn selected_nodes(&self) -> Vec<crate::model::NodeId> {
        self.selection.iter().filter_map(|o| match o { ObjectRef::Node(id) => Some(*id), _ => None }).collect()
    }

    /// (initial, final) checkbox states.
    fn fsm_states(&self) -> Option<(CheckState, CheckState)> {
        if self.params.graph_type != GraphType::Fsm || !self.allow_edits(EditKind::FsmFlags) { return None; }
        let nodes = self.selected_nodes();
        if nodes.is_empty() { return None; }
        let initial = nodes.iter().filter(|id| self.graph.has_start_link(**id)).count();
        let fin = nodes.iter().filter(|id| self.graph.node(**id).is_some_and(|n| n.is_final)).count();
        Some((CheckState::from_counts(initial, nodes.len()), CheckState::from_counts(fin, nodes.len())))
    }

    fn token_field(&self) -> Option<TokenField> {
        if self.params.graph_type != GraphType::Petri || !self.allow_edits(EditKind::PetriMarking) { return None; }
        let mut places = Vec::new();
        for id in self.selected_nodes() {
            match self.graph.node(id).map(|n| (n.petri_type, n.tokens)) {
                Some((PetriNodeType::Place, tokens)) => places.push(tokens),
                Some((PetriNodeType::Transition, _)) => return None,
                _ => {}
            }
        }
        let first = *places.first()?;
        let value = places.iter().all(|t| *t == first).then_some(first);
        Some(TokenField { value, min: self.params.tokens_range.min, max: self.params.tokens_range.max })
    }

    /// Sets the label of the single editable object as typed in the toolbar.
    /// The change is recorded by `commit_label_edit`.
    pub fn set_label(&mut self, value: &str) -> bool {
        let Some((obj, kind)) = self.label_target() else { return false };
        let value = match kind {
            LabelKind::Text => value.to_string(),
            LabelKind::Number => clamp_link_weight(value, &self.params.tokens_range),
        };
        self.apply_label(obj, value);
        true
    }

    pub fn set_color(&mut self, color: Color) -> bool {
        self.commit_label_edit();
        if !self.properties_editable() { return false; }
        if !self.offered_colors().is_some_and(|c| c.contains(&color)) { return false; }
        for obj in self.selection.clone() {
            match obj {
                ObjectRef::Node(id) => if let Some(n) = self.graph.node_mut(id) { n.color = Some(color); },
                ObjectRef::Edge(id) => if let Some(e) = self.graph.link_mut(id) { e.color = Some(color); },
            }
        }
        debug!("coloured {} objects {}", self.selection.len(), color.name());
        self.on_graph_change();
        true
    }

    /// Highlights every selected object unless all already are.
    pub fn toggle_highlight(&mut self) -> bool {
        self.commit_label_edit();
        if !self.properties_editable() { return false; }
        let Some(state) = self.highlight_state() else { return false };
        let on = state != CheckState::Checked;
        for obj in self.selection.clone() {
            match obj {
                ObjectRef::Node(id) => if let Some(n) = self.graph.node_mut(id) { n.highlighted = on; },
                ObjectRef::Edge(id) => if let Some(e) = self.graph.link_mut(id) { e.highlighted = on; },
            }
        }
        self.on_graph_change();
        true
    }

    pub fn toggle_fsm_initial(&mut self) -> bool {
        self.commit_label_edit();
        if !self.properties_editable() { return false; }
        let Some((initial, _)) = self.fsm_states() else { return false };
        for id in self.selected_nodes() {
            if initial == CheckState::Checked {
                self.remove_initial_fsm_vertex(id);
            } else {
                self.set_initial_fsm_vertex(id);
            }
        }
        self.on_graph_change();
        true
    }

    pub fn toggle_fsm_final(&mut self) -> bool {
        self.commit_label_edit();
        if !self.properties_editable() { return false; }
        let Some((_, fin)) = self.fsm_states() else { return false };
        let on = fin != CheckState::Checked;
        for id in self.selected_nodes() {
            if let Some(n) = self.graph.node_mut(id) { n.is_final = on; }
        }
        self.on_graph_change();
        true
    }

    /// Sets the token count of every selected place from a number field.
    pub fn set_tokens(&mut self, input: &str) -> bool {
        self.commit_label_edit();
        if !self.properties_editable() || self.token_field().is_none() { return false; }
        let tokens = clamp_tokens(input, &self.params.tokens_range);
        for id in self.selected_nodes() {
            if let Some(n) = self.graph.node_mut(id) {
                if n.petri_type == PetriNodeType::Place { n.tokens = tokens; }
            }
        }
        self.on_graph_change();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_input_clamps_to_range() {
        let r = TokenRange { min: 0, max: 100 };
        assert_eq!(clamp_tokens("", &r), 0);
        assert_eq!(clamp_tokens("-3", &r), 0);
        assert_eq!(clamp_tokens("42", &r), 42);
        assert_eq!(clamp_tokens("250", &r), 100);
        assert_eq!(clamp_tokens("abc", &r), 0);
    }

    #[test]
    fn link_weight_minimum_shows_blank() {
        let r = TokenRange { min: 0, max: 100 };
        assert_eq!(clamp_link_weight("0", &r), "");
        assert_eq!(clamp_link_weight("7", &r), "7");
        assert_eq!(clamp_link_weight("1000", &r), "100");
        let r = TokenRange { min: 1, max: 9 };
        assert_eq!(clamp_link_weight("", &r), "1");
    }

    #[test]
    fn check_state_counts() {
        assert_eq!(CheckState::from_counts(0, 3), CheckState::Unchecked);
        assert_eq!(CheckState::from_counts(2, 3), CheckState::Mixed);
        assert_eq!(CheckState::from_counts(3, 3), CheckState::Checked);
    }
}
