use graph_editor::interaction::events::PointerEvent;
use graph_editor::model::{GraphType, UiMode};
use graph_editor::render::canvas::Canvas;
use graph_editor::render::scene::draw;
use graph_editor::{Editor, TemplateParams};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    ClearRect,
    Save,
    Restore,
    Scale(f64),
    Font(String),
    Stroke(String),
    FillStyle(String),
    LineDash(Vec<f64>),
    Arc { r: f64 },
    Rect,
    ClosePath,
    FillRect,
    Text(String),
    Other,
}

#[derive(Default)]
struct RecordingCanvas {
    calls: Vec<Call>,
}

impl RecordingCanvas {
    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear_rect(&mut self, _: f64, _: f64, _: f64, _: f64) { self.calls.push(Call::ClearRect); }
    fn save(&mut self) { self.calls.push(Call::Save); }
    fn restore(&mut self) { self.calls.push(Call::Restore); }
    fn scale(&mut self, x: f64, _: f64) { self.calls.push(Call::Scale(x)); }
    fn set_font(&mut self, font: &str) { self.calls.push(Call::Font(font.to_string())); }
    fn set_stroke_style(&mut self, style: &str) { self.calls.push(Call::Stroke(style.to_string())); }
    fn set_fill_style(&mut self, style: &str) { self.calls.push(Call::FillStyle(style.to_string())); }
    fn set_line_width(&mut self, _: f64) { self.calls.push(Call::Other); }
    fn set_line_dash(&mut self, segments: &[f64]) { self.calls.push(Call::LineDash(segments.to_vec())); }
    fn set_line_dash_offset(&mut self, _: f64) { self.calls.push(Call::Other); }
    fn set_shadow(&mut self, _: &str, _: f64) { self.calls.push(Call::Other); }
    fn set_global_alpha(&mut self, _: f64) { self.calls.push(Call::Other); }
    fn begin_path(&mut self) { self.calls.push(Call::Other); }
    fn move_to(&mut self, _: f64, _: f64) { self.calls.push(Call::Other); }
    fn line_to(&mut self, _: f64, _: f64) { self.calls.push(Call::Other); }
    fn close_path(&mut self) { self.calls.push(Call::ClosePath); }
    fn arc(&mut self, _: f64, _: f64, r: f64, _: f64, _: f64, _: bool) { self.calls.push(Call::Arc { r }); }
    fn rect(&mut self, _: f64, _: f64, _: f64, _: f64) { self.calls.push(Call::Rect); }
    fn stroke(&mut self) { self.calls.push(Call::Other); }
    fn fill(&mut self) { self.calls.push(Call::Other); }
    fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64) { self.calls.push(Call::FillRect); }
    fn fill_text(&mut self, text: &str, _: f64, _: f64) { self.calls.push(Call::Text(text.to_string())); }
    fn measure_text(&mut self, text: &str) -> f64 { 10.0 * text.chars().count() as f64 }
}

fn click(ed: &mut Editor, x: f64, y: f64) {
    let ev = PointerEvent::at(x, y);
    ed.pointer_down(&ev);
    ed.pointer_up(&ev);
}

#[test]
fn failed_editor_only_clears() {
    let ed = Editor::new("not a graph", TemplateParams::default(), false);
    let mut c = RecordingCanvas::default();
    draw(&ed, &mut c, 900.0, 600.0);
    assert_eq!(c.calls, vec![Call::ClearRect]);
}

#[test]
fn drawing_scales_to_element_width() {
    let ed = Editor::new("", TemplateParams::default(), false);
    let mut c = RecordingCanvas::default();
    draw(&ed, &mut c, 450.0, 300.0);
    assert_eq!(c.calls[..3], [Call::ClearRect, Call::Save, Call::Scale(0.5)]);
    assert_eq!(c.calls[3], Call::Font("20px \"Segoe UI\"".to_string()));
    assert_eq!(c.calls.last(), Some(&Call::Restore));
}

#[test]
fn directed_graph_draws_nodes_arrows_and_labels() {
    let doc = r#"{"_version":1,"vertices":[
        {"label":"a","position":[100,100],"locked":false},
        {"label":"","position":[300,100],"locked":false}],
        "edges":[{"from":0,"to":1,"bend":{"parallelPart":0.5,"perpendicularPart":0,"lineAngleAdjust":0},"label":"w","locked":false}]}"#;
    let ed = Editor::new(doc, TemplateParams::new(GraphType::Directed), false);
    let mut c = RecordingCanvas::default();
    draw(&ed, &mut c, 900.0, 600.0);
    assert_eq!(c.count(|k| *k == Call::Arc { r: 26.0 }), 2);
    assert_eq!(c.count(|k| *k == Call::ClosePath), 1);
    assert!(c.calls.contains(&Call::Text("a".into())));
    assert!(c.calls.contains(&Call::Text("w".into())));
    assert!(c.calls.contains(&Call::Stroke("#444444".into())));
    assert!(c.calls.contains(&Call::FillStyle("white".into())));
}

#[test]
fn undirected_links_have_no_arrow_head() {
    let doc = r#"{"_version":1,"vertices":[{"position":[100,100]},{"position":[300,100]}],"edges":[{"from":0,"to":1}]}"#;
    let ed = Editor::new(doc, TemplateParams::default(), false);
    let mut c = RecordingCanvas::default();
    draw(&ed, &mut c, 900.0, 600.0);
    assert_eq!(c.count(|k| *k == Call::ClosePath), 0);
}

#[test]
fn accepting_state_has_inner_ring_and_petri_transition_is_square() {
    let doc = r#"{"_version":1,"vertices":[{"position":[100,100],"final":true}],"edges":[]}"#;
    let ed = Editor::new(doc, TemplateParams::new(GraphType::Fsm), false);
    let mut c = RecordingCanvas::default();
    draw(&ed, &mut c, 900.0, 600.0);
    assert_eq!(c.count(|k| *k == Call::Arc { r: 20.0 }), 1);

    let doc = r#"{"_version":1,"vertices":[{"position":[100,100],"petri_type":"transition"},
        {"position":[300,100],"petri_type":"place","tokens":3}],"edges":[]}"#;
    let ed = Editor::new(doc, TemplateParams::new(GraphType::Petri), false);
    let mut c = RecordingCanvas::default();
    draw(&ed, &mut c, 900.0, 600.0);
    assert_eq!(c.count(|k| *k == Call::Rect), 1);
    assert!(c.calls.contains(&Call::Text("3".into())));
}

#[test]
fn rubber_band_is_dashed_then_reset() {
    let mut ed = Editor::new("", TemplateParams::default(), false);
    ed.set_mode(UiMode::Move);
    ed.pointer_down(&PointerEvent::at(10.0, 10.0));
    ed.pointer_move(&PointerEvent::at(200.0, 120.0));
    let mut c = RecordingCanvas::default();
    draw(&ed, &mut c, 900.0, 600.0);
    let dashes: Vec<&Call> = c.calls.iter().filter(|k| matches!(k, Call::LineDash(_))).collect();
    assert_eq!(dashes, vec![&Call::LineDash(vec![5.0, 5.0]), &Call::LineDash(vec![])]);
    assert_eq!(c.count(|k| *k == Call::FillRect), 1);
}

#[test]
fn hover_preview_in_add_mode() {
    let mut ed = Editor::new("", TemplateParams::default(), false);
    ed.set_mode(UiMode::Add);
    ed.pointer_move(&PointerEvent::at(400.0, 300.0));
    let mut c = RecordingCanvas::default();
    draw(&ed, &mut c, 900.0, 600.0);
    assert_eq!(c.count(|k| *k == Call::Arc { r: 26.0 }), 1);

    click(&mut ed, 400.0, 300.0);
    let mut c = RecordingCanvas::default();
    draw(&ed, &mut c, 900.0, 600.0);
    assert_eq!(c.count(|k| *k == Call::Arc { r: 26.0 }), 1);
}
