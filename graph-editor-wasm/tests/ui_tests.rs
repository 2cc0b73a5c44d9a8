#![cfg(target_arch = "wasm32")]

use graph_editor_wasm::GraphUi;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_ok(v: &JsValue) -> bool { Reflect::get(v, &JsValue::from_str("ok")).ok().and_then(|x| x.as_bool()).unwrap_or(false) }
fn is_err_code(v: &JsValue, code: &str) -> bool {
    if is_ok(v) { return false; }
    if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
        if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) { return c.as_string().map_or(false, |s| s == code); }
    }
    false
}

fn click(ui: &mut GraphUi, x: f64, y: f64) {
    ui.pointer_down(x, y, 0, false, false);
    ui.pointer_up(x, y, false, false);
}

#[wasm_bindgen_test]
fn clicks_without_canvas_use_raw_coordinates() {
    let mut ui = GraphUi::new("", r#"{"type":"directed"}"#, false).unwrap();
    assert!(is_ok(&ui.set_mode("add")));
    click(&mut ui, 100.0, 100.0);
    click(&mut ui, 300.0, 100.0);
    ui.pointer_down(100.0, 100.0, 0, false, false);
    ui.pointer_move(300.0, 100.0, false, false);
    ui.pointer_up(300.0, 100.0, false, false);
    let text = ui.serialize();
    assert!(text.contains("\"position\":[100.0,100.0]"));
    assert_eq!(ui.editor().graph().link_count(), 1);
    assert!(ui.can_undo());
    assert!(ui.undo());
    assert_eq!(ui.editor().graph().link_count(), 0);
}

#[wasm_bindgen_test]
fn unknown_names_are_typed_errors() {
    let mut ui = GraphUi::new("", "{}", false).unwrap();
    assert!(is_err_code(&ui.set_mode("draw"), "invalid_value"));
    assert!(is_err_code(&ui.set_color("teal"), "invalid_value"));
    assert!(is_err_code(&ui.set_petri_node_type("arc"), "invalid_value"));
    assert_eq!(ui.mode(), "move");
}

#[wasm_bindgen_test]
fn refused_toolbar_action_reports_not_permitted() {
    let mut ui = GraphUi::new("", "{}", false).unwrap();
    assert!(is_err_code(&ui.toggle_highlight(), "not_permitted"));
    assert!(is_err_code(&ui.delete_selected(), "not_permitted"));
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    assert!(GraphUi::new("", "{\"type\": 3}", false).is_err());
}

#[wasm_bindgen_test]
fn broken_document_reports_message_key() {
    let mut ui = GraphUi::new("{\"_version\":1}", "{}", false).unwrap();
    assert!(ui.failed());
    assert_eq!(ui.fail_message_key().as_deref(), Some("graph_ui_invalidserialisation"));
    assert_eq!(ui.serialize(), "{\"_version\":1}");
}

#[wasm_bindgen_test]
fn effects_and_toolbar_state_cross_the_boundary() {
    let mut ui = GraphUi::new("", "{}", false).unwrap();
    ui.set_mode("add");
    click(&mut ui, 100.0, 100.0);
    let effects = ui.take_effects();
    assert!(is_ok(&effects));
    let state = ui.toolbar_state();
    let value = Reflect::get(&state, &JsValue::from_str("value")).unwrap();
    let undo = Reflect::get(&value, &JsValue::from_str("undo_enabled")).unwrap();
    assert_eq!(undo.as_bool(), Some(true));
    assert!(!ui.key_down("a", false, false));
    assert_eq!(ui.editor().graph().node(0).unwrap().label, "a");
}
