use graph_editor::Editor;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
mod api;
mod canvas;
mod error;

/// Graph editor bound to a text slot and, once attached, a canvas element.
#[wasm_bindgen]
pub struct GraphUi {
    pub(crate) inner: Editor,
    pub(crate) canvas: Option<HtmlCanvasElement>,
    pub(crate) ctx: Option<CanvasRenderingContext2d>,
}

impl GraphUi {
    pub fn rs_new(inner: Editor) -> GraphUi { GraphUi { inner, canvas: None, ctx: None } }
    pub fn editor(&self) -> &Editor { &self.inner }
}
