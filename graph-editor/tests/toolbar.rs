use graph_editor::interaction::events::{Effect, PointerEvent};
use graph_editor::model::{Color, GraphType, ObjectRef, PetriNodeType, UiMode};
use graph_editor::toolbar::{CheckState, LabelEditor, TokenField};
use graph_editor::{Editor, TemplateParams};

fn click(ed: &mut Editor, x: f64, y: f64) {
    let ev = PointerEvent::at(x, y);
    ed.pointer_down(&ev);
    ed.pointer_up(&ev);
}

fn with_nodes(config: &str, points: &[(f64, f64)]) -> Editor {
    let mut ed = Editor::from_config_json("", config, false).unwrap();
    ed.set_mode(UiMode::Add);
    for &(x, y) in points {
        click(&mut ed, x, y);
    }
    ed
}

#[test]
fn empty_selection_offers_only_history_buttons() {
    let mut ed = with_nodes("{}", &[(100.0, 100.0)]);
    ed.clear_selection();
    let state = ed.toolbar_state();
    assert!(state.undo_enabled);
    assert!(!state.redo_enabled);
    assert!(!state.delete_enabled);
    assert!(state.label.is_none());
    assert!(state.colors.is_none());
}

#[test]
fn text_label_editor_reports_validity() {
    let mut ed = with_nodes(r#"{"vertex_label_regex": "^q"}"#, &[(100.0, 100.0)]);
    assert_eq!(ed.toolbar_state().label, Some(LabelEditor::Text { value: String::new(), valid: false }));
    assert!(ed.set_label("q1"));
    assert_eq!(ed.toolbar_state().label, Some(LabelEditor::Text { value: "q1".into(), valid: true }));
    ed.commit_label_edit();
    assert_eq!(ed.graph().node(0).unwrap().label, "q1");
}

fn alerts(ed: &mut Editor) -> Vec<String> {
    ed.take_effects()
        .into_iter()
        .filter_map(|e| match e {
            Effect::Alert { message } => Some(message),
            _ => None,
        })
        .collect()
}

#[test]
fn property_edit_validates_pending_label() {
    let mut ed = with_nodes(r#"{"vertex_label_regex": "^[0-9]*$", "highlight_vertices": true}"#, &[(100.0, 100.0)]);
    ed.take_effects();
    assert!(ed.set_label("x"));
    assert!(ed.toggle_highlight());
    ed.commit_label_edit();
    let node = ed.graph().node(0).unwrap();
    assert_eq!(node.label, "");
    assert!(node.highlighted);
    assert!(!ed.serialize().contains("\"label\":\"x\""));
    assert_eq!(alerts(&mut ed), vec!["The entered label does not match the regex.".to_string()]);
}

#[test]
fn delete_validates_pending_label() {
    let mut ed = with_nodes(r#"{"vertex_label_regex": "^[0-9]*$"}"#, &[(100.0, 100.0), (300.0, 100.0)]);
    ed.take_effects();
    assert!(ed.set_label("x"));
    assert!(ed.delete_selected());
    assert_eq!(alerts(&mut ed), vec!["The entered label does not match the regex.".to_string()]);
    assert!(ed.undo());
    assert_eq!(ed.graph().node(1).unwrap().label, "");
}

#[test]
fn palette_colours_apply_to_selection() {
    let mut ed = with_nodes(r#"{"vertex_colors": ["red", "blue"]}"#, &[(100.0, 100.0)]);
    assert_eq!(ed.graph().node(0).unwrap().color, Some(Color::Red));
    assert_eq!(ed.toolbar_state().colors, Some(vec![Color::Red, Color::Blue]));
    let steps = ed.history().len();
    assert!(ed.set_color(Color::Blue));
    assert_eq!(ed.graph().node(0).unwrap().color, Some(Color::Blue));
    assert_eq!(ed.history().len(), steps + 1);
    assert!(!ed.set_color(Color::Green));
}

#[test]
fn highlight_toggles_all_or_nothing() {
    let mut ed = with_nodes(r#"{"highlight_vertices": true}"#, &[(100.0, 100.0), (300.0, 100.0)]);
    ed.set_selection(vec![ObjectRef::Node(0)]);
    assert!(ed.toggle_highlight());
    ed.set_selection(vec![ObjectRef::Node(0), ObjectRef::Node(1)]);
    assert_eq!(ed.toolbar_state().highlight, Some(CheckState::Mixed));
    assert!(ed.toggle_highlight());
    assert_eq!(ed.toolbar_state().highlight, Some(CheckState::Checked));
    assert!(ed.serialize().contains("\"highlighted\":true"));
    assert!(ed.toggle_highlight());
    assert!(!ed.graph().node(1).unwrap().highlighted);
}

#[test]
fn highlight_hidden_without_permission_for_edges() {
    let mut ed = with_nodes(r#"{"highlight_vertices": true}"#, &[(100.0, 100.0), (300.0, 100.0)]);
    ed.pointer_down(&PointerEvent::at(100.0, 100.0));
    ed.pointer_move(&PointerEvent::at(300.0, 100.0));
    ed.pointer_up(&PointerEvent::at(300.0, 100.0));
    assert_eq!(ed.selection(), &[ObjectRef::Edge(0)]);
    assert_eq!(ed.toolbar_state().highlight, None);
    assert!(!ed.toggle_highlight());
}

#[test]
fn fsm_flags_follow_the_selection() {
    let mut ed = with_nodes(r#"{"type": "fsm"}"#, &[(200.0, 200.0), (400.0, 200.0)]);
    ed.set_selection(vec![ObjectRef::Node(0), ObjectRef::Node(1)]);
    let state = ed.toolbar_state();
    assert_eq!(state.fsm_initial, Some(CheckState::Mixed));
    assert_eq!(state.fsm_final, Some(CheckState::Unchecked));

    assert!(ed.toggle_fsm_initial());
    assert_eq!(ed.graph().link_count(), 2);
    assert!(ed.graph().has_start_link(1));
    assert_eq!(ed.toolbar_state().fsm_initial, Some(CheckState::Checked));

    assert!(ed.toggle_fsm_initial());
    assert_eq!(ed.graph().link_count(), 0);
    assert!(!ed.graph().node(0).unwrap().is_initial);

    assert!(ed.toggle_fsm_final());
    assert!(ed.graph().node(0).unwrap().is_final && ed.graph().node(1).unwrap().is_final);
}

#[test]
fn token_field_for_places_only() {
    let mut ed = with_nodes(r#"{"type": "petri"}"#, &[(100.0, 100.0)]);
    ed.set_petri_node_type(PetriNodeType::Transition);
    click(&mut ed, 300.0, 100.0);

    ed.set_selection(vec![ObjectRef::Node(0)]);
    assert_eq!(ed.toolbar_state().tokens, Some(TokenField { value: Some(0), min: 0, max: 100 }));
    assert!(ed.set_tokens("250"));
    assert_eq!(ed.graph().node(0).unwrap().tokens, 100);

    ed.set_selection(vec![ObjectRef::Node(0), ObjectRef::Node(1)]);
    assert_eq!(ed.toolbar_state().tokens, None);
    assert!(!ed.set_tokens("3"));
}

#[test]
fn petri_arc_weight_is_a_number_field() {
    let mut ed = with_nodes(r#"{"type": "petri"}"#, &[(100.0, 100.0)]);
    ed.set_petri_node_type(PetriNodeType::Transition);
    click(&mut ed, 300.0, 100.0);
    ed.pointer_down(&PointerEvent::at(100.0, 100.0));
    ed.pointer_move(&PointerEvent::at(300.0, 100.0));
    ed.pointer_up(&PointerEvent::at(300.0, 100.0));
    assert_eq!(ed.toolbar_state().label, Some(LabelEditor::Number { value: String::new(), min: 0, max: 100 }));
    assert!(ed.set_label("7"));
    assert_eq!(ed.graph().link(0).unwrap().label, "7");
    assert!(ed.set_label("0"));
    assert_eq!(ed.graph().link(0).unwrap().label, "");
}

#[test]
fn petri_type_buttons_only_in_add_mode() {
    let mut ed = with_nodes(r#"{"type": "petri"}"#, &[]);
    assert!(ed.toolbar_state().petri_node_types);
    ed.set_mode(UiMode::Move);
    assert!(!ed.toolbar_state().petri_node_types);
}

#[test]
fn locked_selection_disables_property_editors() {
    let doc = r#"{"_version":1,"vertices":[{"label":"a","position":[100,100],"locked":true}],"edges":[]}"#;
    let params = TemplateParams::from_json(r#"{"vertex_colors": ["red"]}"#).unwrap();
    let mut ed = Editor::new(doc, params, false);
    ed.set_selection(vec![ObjectRef::Node(0)]);
    let state = ed.toolbar_state();
    assert!(state.label.is_none());
    assert!(state.colors.is_none());
    assert!(!state.delete_enabled);
    assert!(!ed.set_color(Color::Red));
}
