//! Immediate-mode 2D drawing surface, shaped after `CanvasRenderingContext2D`.
//! The wasm crate implements it over the browser context; tests record calls.

pub trait Canvas {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn save(&mut self);
    fn restore(&mut self);
    fn scale(&mut self, x: f64, y: f64);
    fn set_font(&mut self, font: &str);
    fn set_stroke_style(&mut self, style: &str);
    fn set_fill_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_dash(&mut self, segments: &[f64]);
    fn set_line_dash_offset(&mut self, offset: f64);
    /// A blur of zero turns the shadow off.
    fn set_shadow(&mut self, color: &str, blur: f64);
    fn set_global_alpha(&mut self, alpha: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64, anticlockwise: bool);
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke(&mut self);
    fn fill(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    /// Width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> f64;
}
