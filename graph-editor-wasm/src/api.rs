use crate::canvas::WebCanvas;
use crate::error;
use crate::GraphUi;
use graph_editor::geometry::math::to_canvas_coords;
use graph_editor::interaction::events::{Key, KeyEvent, PointerEvent};
use graph_editor::model::{Color, PetriNodeType, UiMode};
use graph_editor::render::scene;
use graph_editor::{Editor, TemplateParams};
use log::{info, warn, Level};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Routes `log` records to the browser console and installs the panic hook.
#[wasm_bindgen]
pub fn init_logging() {
    let _ = console_log::init_with_level(Level::Debug);
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    info!("graph editor logging initialised");
}

#[wasm_bindgen]
impl GraphUi {
    /// `text` is the host text slot (blank for a new graph), `config` the
    /// template parameters as JSON.
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str, config: &str, read_only: bool) -> Result<GraphUi, JsValue> {
        let params = TemplateParams::from_json(config).map_err(|e| error::invalid_config(e.to_string()))?;
        Ok(GraphUi::rs_new(Editor::new(text, params, read_only)))
    }

    pub fn attach_canvas(&mut self, canvas: HtmlCanvasElement) -> JsValue {
        let ctx = match canvas.get_context("2d") {
            Ok(Some(obj)) => obj.dyn_into::<CanvasRenderingContext2d>().ok(),
            _ => None,
        };
        let Some(ctx) = ctx else { return error::no_context() };
        self.ctx = Some(ctx);
        self.canvas = Some(canvas);
        self.draw();
        error::success(JsValue::TRUE)
    }

    pub fn draw(&self) {
        let (Some(canvas), Some(ctx)) = (&self.canvas, &self.ctx) else { return };
        scene::draw(&self.inner, &mut WebCanvas(ctx), canvas.width() as f64, canvas.height() as f64);
    }

    // Status
    pub fn failed(&self) -> bool { self.inner.failed() }
    pub fn fail_message_key(&self) -> Option<String> { self.inner.fail_message_key().map(str::to_string) }
    pub fn serialize(&mut self) -> String { self.inner.serialize().to_string() }
    pub fn mode(&self) -> String { mode_name(self.inner.mode()).to_string() }
    pub fn selection(&self) -> JsValue { error::to_js(self.inner.selection()) }
    pub fn toolbar_state(&self) -> JsValue { error::to_js(&self.inner.toolbar_state()) }

    /// Alerts, label mirrors and change notices since the last call.
    pub fn take_effects(&mut self) -> JsValue {
        let effects = self.inner.take_effects();
        error::to_js(&effects)
    }

    // Pointer input, in client coordinates
    pub fn pointer_down(&mut self, client_x: f64, client_y: f64, button: i16, shift: bool, ctrl: bool) {
        let ev = self.pointer_event(client_x, client_y, button, shift, ctrl);
        self.inner.pointer_down(&ev);
        self.draw();
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64, shift: bool, ctrl: bool) {
        let ev = self.pointer_event(client_x, client_y, 0, shift, ctrl);
        self.inner.pointer_move(&ev);
        self.draw();
    }

    pub fn pointer_up(&mut self, client_x: f64, client_y: f64, shift: bool, ctrl: bool) {
        let ev = self.pointer_event(client_x, client_y, 0, shift, ctrl);
        self.inner.pointer_up(&ev);
        self.draw();
    }

    pub fn pointer_enter(&mut self, client_x: f64, client_y: f64, ctrl: bool) {
        let ev = self.pointer_event(client_x, client_y, 0, false, ctrl);
        self.inner.pointer_enter(&ev);
        self.draw();
    }

    pub fn pointer_leave(&mut self, client_x: f64, client_y: f64, ctrl: bool) {
        let ev = self.pointer_event(client_x, client_y, 0, false, ctrl);
        self.inner.pointer_leave(&ev);
        self.draw();
    }

    // Keyboard input, `key` as in `KeyboardEvent.key`
    /// True when the host should prevent the browser default.
    pub fn key_down(&mut self, key: &str, ctrl: bool, shift: bool) -> bool {
        let handled = self.inner.key_down(&KeyEvent { key: Key::from_dom(key), ctrl, shift });
        self.draw();
        handled
    }

    pub fn key_up(&mut self, key: &str, ctrl: bool, shift: bool) {
        self.inner.key_up(&KeyEvent { key: Key::from_dom(key), ctrl, shift });
        self.draw();
    }

    /// Advances the selection animation; redraws when it is running.
    pub fn tick(&mut self) -> bool {
        let running = self.inner.tick();
        if running { self.draw(); }
        running
    }

    // Toolbar
    pub fn set_mode(&mut self, mode: &str) -> JsValue {
        let mode = match mode {
            "add" => UiMode::Add,
            "move" => UiMode::Move,
            other => return error::invalid_value("mode", other),
        };
        self.inner.set_mode(mode);
        self.draw();
        error::success(JsValue::TRUE)
    }

    pub fn set_petri_node_type(&mut self, kind: &str) -> JsValue {
        let kind = match kind {
            "place" => PetriNodeType::Place,
            "transition" => PetriNodeType::Transition,
            other => return error::invalid_value("petri_node_type", other),
        };
        self.inner.set_petri_node_type(kind);
        self.draw();
        error::success(JsValue::TRUE)
    }

    pub fn set_label(&mut self, value: &str) -> bool {
        let done = self.inner.set_label(value);
        self.draw();
        done
    }

    pub fn commit_label_edit(&mut self) {
        self.inner.commit_label_edit();
        self.draw();
    }

    pub fn set_color(&mut self, name: &str) -> JsValue {
        let Some(color) = Color::from_name(name) else { return error::invalid_value("color", name) };
        self.applied("set_color", |ed| ed.set_color(color))
    }

    pub fn toggle_highlight(&mut self) -> JsValue { self.applied("toggle_highlight", Editor::toggle_highlight) }
    pub fn toggle_fsm_initial(&mut self) -> JsValue { self.applied("toggle_fsm_initial", Editor::toggle_fsm_initial) }
    pub fn toggle_fsm_final(&mut self) -> JsValue { self.applied("toggle_fsm_final", Editor::toggle_fsm_final) }

    pub fn set_tokens(&mut self, input: &str) -> JsValue {
        self.applied("set_tokens", |ed| ed.set_tokens(input))
    }

    pub fn delete_selected(&mut self) -> JsValue { self.applied("delete_selected", Editor::delete_selected) }

    pub fn clear_selection(&mut self) {
        self.inner.clear_selection();
        self.draw();
    }

    pub fn can_undo(&self) -> bool { self.inner.can_undo() }
    pub fn can_redo(&self) -> bool { self.inner.can_redo() }

    pub fn undo(&mut self) -> bool {
        let done = self.inner.undo();
        self.draw();
        done
    }

    pub fn redo(&mut self) -> bool {
        let done = self.inner.redo();
        self.draw();
        done
    }
}

impl GraphUi {
    fn pointer_event(&self, client_x: f64, client_y: f64, button: i16, shift: bool, ctrl: bool) -> PointerEvent {
        let p = match &self.canvas {
            Some(canvas) => {
                let r = canvas.get_bounding_client_rect();
                to_canvas_coords(client_x, client_y, r.left(), r.top(), r.width())
            }
            None => graph_editor::model::Vec2::new(client_x, client_y),
        };
        PointerEvent { x: p.x, y: p.y, button, shift, ctrl }
    }

    fn applied(&mut self, action: &str, f: impl FnOnce(&mut Editor) -> bool) -> JsValue {
        let done = f(&mut self.inner);
        self.draw();
        if done {
            error::success(JsValue::TRUE)
        } else {
            warn!("{} refused", action);
            error::not_permitted(action)
        }
    }
}

fn mode_name(mode: UiMode) -> &'static str {
    match mode {
        UiMode::Add => "add",
        UiMode::Move => "move",
    }
}
