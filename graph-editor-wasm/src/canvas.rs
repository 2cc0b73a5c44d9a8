use graph_editor::render::canvas::Canvas;
use js_sys::Array;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// `Canvas` over a browser 2d context. Drawing calls that can throw are
/// best effort.
pub struct WebCanvas<'a>(pub &'a CanvasRenderingContext2d);

impl Canvas for WebCanvas<'_> {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) { self.0.clear_rect(x, y, w, h); }
    fn save(&mut self) { self.0.save(); }
    fn restore(&mut self) { self.0.restore(); }
    fn scale(&mut self, x: f64, y: f64) { let _ = self.0.scale(x, y); }
    fn set_font(&mut self, font: &str) { self.0.set_font(font); }
    fn set_stroke_style(&mut self, style: &str) { self.0.set_stroke_style_str(style); }
    fn set_fill_style(&mut self, style: &str) { self.0.set_fill_style_str(style); }
    fn set_line_width(&mut self, width: f64) { self.0.set_line_width(width); }

    fn set_line_dash(&mut self, segments: &[f64]) {
        let arr: Array = segments.iter().map(|s| JsValue::from_f64(*s)).collect();
        let _ = self.0.set_line_dash(&arr);
    }

    fn set_line_dash_offset(&mut self, offset: f64) { self.0.set_line_dash_offset(offset); }

    fn set_shadow(&mut self, color: &str, blur: f64) {
        self.0.set_shadow_color(color);
        self.0.set_shadow_blur(blur);
    }

    fn set_global_alpha(&mut self, alpha: f64) { self.0.set_global_alpha(alpha); }
    fn begin_path(&mut self) { self.0.begin_path(); }
    fn move_to(&mut self, x: f64, y: f64) { self.0.move_to(x, y); }
    fn line_to(&mut self, x: f64, y: f64) { self.0.line_to(x, y); }
    fn close_path(&mut self) { self.0.close_path(); }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64, anticlockwise: bool) {
        let _ = self.0.arc_with_anticlockwise(x, y, radius, start, end, anticlockwise);
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) { self.0.rect(x, y, w, h); }
    fn stroke(&mut self) { self.0.stroke(); }
    fn fill(&mut self) { self.0.fill(); }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) { self.0.fill_rect(x, y, w, h); }
    fn fill_text(&mut self, text: &str, x: f64, y: f64) { let _ = self.0.fill_text(text, x, y); }

    fn measure_text(&mut self, text: &str) -> f64 {
        self.0.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
    }
}
