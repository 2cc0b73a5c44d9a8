//! Keyboard handlers: deletion, deselection, temporary move mode and typing
//! straight into the label of the selected object.

use super::editor::Editor;
use super::events::{Effect, Key, KeyEvent};
use crate::geometry::limits::MAX_LABEL_CHARS;
use crate::model::{ObjectRef, UiMode};
use crate::toolbar::LabelKind;

impl Editor {
    /// Returns true when the host should suppress the browser default.
    pub fn key_down(&mut self, ev: &KeyEvent) -> bool {
        if !self.allow_events() { return false; }
        match &ev.key {
            Key::Delete => { self.delete_selected(); }
            Key::Escape => {
                self.commit_label_edit();
                self.clear_selection();
            }
            Key::Control => {
                if self.mode != UiMode::Move { self.enable_temporary_move_mode(); }
            }
            _ => {}
        }
        if !ev.ctrl {
            match &ev.key {
                Key::Text(t) => self.type_into_label(Some(t)),
                Key::Backspace => self.type_into_label(None),
                _ => {}
            }
        }
        ev.key == Key::Backspace
    }

    pub fn key_up(&mut self, ev: &KeyEvent) {
        if !self.allow_events() { return; }
        if ev.key == Key::Control && self.mode != UiMode::Add && self.temp_move_active {
            self.disable_temporary_move_mode();
        }
    }

    /// Appends `input` to the editable label, or drops its last character.
    fn type_into_label(&mut self, input: Option<&str>) {
        let Some((obj, kind)) = self.label_target() else { return };
        let Some(mut value) = self.graph.label_of(obj).map(str::to_string) else { return };
        match (kind, input) {
            (_, None) => { value.pop(); }
            (LabelKind::Text, Some(t)) => value.push_str(t),
            (LabelKind::Number, Some(t)) => {
                if !t.chars().all(|c| c.is_ascii_digit()) { return; }
                value.push_str(t);
                let max = self.params.tokens_range.max;
                if value.parse::<u64>().map_or(true, |v| v > u64::from(max)) {
                    value = max.to_string();
                }
            }
        }
        if value.chars().count() > MAX_LABEL_CHARS { return; }
        self.apply_label(obj, value);
    }

    /// Writes a label without recording history; the edit is committed later
    /// as a single step.
    pub(crate) fn apply_label(&mut self, obj: ObjectRef, value: String) {
        if self.label_initial.as_ref().map(|(o, _)| *o) != Some(obj) {
            self.commit_label_edit();
            let before = self.graph.label_of(obj).unwrap_or_default().to_string();
            self.label_initial = Some((obj, before));
        }
        let Some(label) = self.graph.label_mut(obj) else { return };
        if *label == value { return; }
        *label = value.clone();
        self.label_dirty = true;
        self.effects.push(Effect::LabelInput { value });
    }
}
