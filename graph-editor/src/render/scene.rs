//! Draws the editor state onto a `Canvas`.

use super::canvas::Canvas;
use crate::algorithms::text_layout::{convert_latex_shortcuts, place_text, TextOwner};
use crate::config::EditKind;
use crate::geometry::arc::LinkInfo;
use crate::geometry::math::arrow_head;
use crate::geometry::tolerance::{FINAL_RING_INSET, NOMINAL_WIDTH};
use crate::interaction::editor::{Editor, PendingLink};
use crate::model::{Color, Edge, EdgeKind, GraphType, LinkId, Node, NodeId, ObjectRef, PetriNodeType, UiMode, Vec2};
use std::f64::consts::TAU;

const INK: &str = "black";
const PAPER: &str = "white";
const SELECTED_SHADOW: &str = "#1f78b4";
const LOCKED_SHADOW: &str = "#999999";
const HOVER_SHADOW: &str = "rgba(150,150,150,0.5)";
const HIGHLIGHT_WIDTH: f64 = 15.0;
const RECT_FILL: &str = "rgba(160,209,255,0.5)";
const RECT_STROKE: &str = "rgba(0,0,0,0.75)";

/// Repaints the whole canvas of `width` x `height` device pixels. A failed
/// editor leaves it blank.
pub fn draw<C: Canvas + ?Sized>(editor: &Editor, c: &mut C, width: f64, height: f64) {
    c.clear_rect(0.0, 0.0, width, height);
    if editor.failed() { return; }
    c.save();
    let s = width / NOMINAL_WIDTH;
    c.scale(s, s);
    let scene = Scene {
        editor,
        radius: editor.graph().node_radius(),
        font_size: editor.params().font_size(),
    };
    c.set_font(&format!("{}px \"Segoe UI\"", scene.font_size));

    scene.draw_hover_preview(c);
    let hovered = scene.hovered_node();
    for (id, node) in editor.graph().nodes() {
        scene.draw_node(c, id, node, hovered == Some(id));
    }
    for (id, edge) in editor.graph().links() {
        scene.draw_edge(c, id, edge);
    }
    if let Some(pending) = editor.current_link() {
        scene.draw_pending(c, pending);
    }
    if let Some(rect) = editor.selection_rect() {
        draw_selection_rect(c, rect, editor.ants_offset());
    }
    c.restore();
}

struct Scene<'a> {
    editor: &'a Editor,
    radius: f64,
    font_size: f64,
}

impl Scene<'_> {
    fn has_arrows(&self) -> bool { self.editor.graph_type().has_arrows() }

    fn add_mode_with_vertices(&self) -> bool {
        self.editor.mode() == UiMode::Add && self.editor.allow_edits(EditKind::EditVertex)
    }

    /// Node under the pointer in ADD mode; it gets a soft shadow.
    fn hovered_node(&self) -> Option<NodeId> {
        if !self.add_mode_with_vertices() { return None; }
        let m = self.editor.mouse_position()?;
        self.editor.graph().node_at(m.x, m.y, true)
    }

    fn shadow_for<C: Canvas + ?Sized>(&self, c: &mut C, obj: ObjectRef, locked: bool) {
        if self.editor.is_selected(obj) {
            c.set_shadow(SELECTED_SHADOW, 15.0);
        } else if locked {
            c.set_shadow(LOCKED_SHADOW, 15.0);
        }
    }

    /// Ghost of the node a click would create.
    fn draw_hover_preview<C: Canvas + ?Sized>(&self, c: &mut C) {
        if !self.add_mode_with_vertices() || self.editor.current_link().is_some() { return; }
        let Some(m) = self.editor.mouse_position() else { return };
        if self.editor.graph().object_at(m.x, m.y, true).is_some() { return; }
        let mut ghost = Node::new(m.x, m.y);
        if self.editor.graph_type() == GraphType::Petri && self.editor.petri_node_type() == PetriNodeType::Transition {
            ghost.petri_type = PetriNodeType::Transition;
        }
        c.set_global_alpha(0.5);
        c.set_shadow(HOVER_SHADOW, 10.0);
        c.set_line_width(1.0);
        c.set_stroke_style(INK);
        node_path(c, &ghost, self.radius);
        c.stroke();
        c.set_shadow(HOVER_SHADOW, 0.0);
        c.set_global_alpha(1.0);
    }

    fn draw_node<C: Canvas + ?Sized>(&self, c: &mut C, id: NodeId, node: &Node, hovered: bool) {
        let r = self.radius;
        c.set_line_width(1.0);
        if hovered { c.set_shadow(HOVER_SHADOW, 10.0); }
        self.shadow_for(c, ObjectRef::Node(id), node.locked);

        if node.highlighted {
            c.set_stroke_style(Color::Red.code());
            c.set_line_width(HIGHLIGHT_WIDTH);
            node_path(c, node, r);
            c.stroke();
            c.set_line_width(1.0);
        }

        node_path(c, node, r);
        c.set_fill_style(node.color.map_or(PAPER, Color::code));
        c.fill();
        c.set_stroke_style(INK);
        c.stroke();
        c.set_shadow(INK, 0.0);

        if !node.label.is_empty() {
            let owner = TextOwner::Node {
                is_place: node.petri_type == PetriNodeType::Place,
                dark_fill: node.color.is_some_and(Color::is_dark),
                sides: self.editor.graph().link_intersection_sides(id),
            };
            self.draw_text(c, owner, &node.label, node.pos(), None);
        }
        if node.petri_type == PetriNodeType::Place && node.tokens > 0 {
            self.draw_text(c, TextOwner::Plain, &node.tokens.to_string(), node.pos(), None);
        }
        if node.is_final {
            c.begin_path();
            c.arc(node.x, node.y, r - FINAL_RING_INSET, 0.0, TAU, false);
            c.set_stroke_style(INK);
            c.stroke();
        }
    }

    fn draw_edge<C: Canvas + ?Sized>(&self, c: &mut C, id: LinkId, edge: &Edge) {
        let g = self.editor.graph();
        let Some(info) = g.link_info(id) else { return };
        c.set_line_width(1.0);
        self.shadow_for(c, ObjectRef::Edge(id), edge.locked);

        if edge.highlighted {
            c.set_stroke_style(Color::Red.code());
            c.set_line_width(HIGHLIGHT_WIDTH);
            c.begin_path();
            trace_link(c, &info);
            c.stroke();
            c.set_line_width(1.0);
        }

        let ink = edge.color.unwrap_or(Color::Black).code();
        c.set_stroke_style(ink);
        c.set_fill_style(ink);
        c.begin_path();
        trace_link(c, &info);
        c.stroke();
        if self.has_arrows() {
            if let Some((tip, angle)) = edge.kind.arrow(g, self.radius) {
                draw_arrow(c, tip, angle);
            }
        }
        c.set_shadow(INK, 0.0);

        if !edge.label.is_empty() {
            if let Some(anchor) = edge.kind.label_anchor(g, self.radius) {
                self.draw_text(c, TextOwner::Link, &edge.label, anchor.pos, anchor.angle);
            }
        }
    }

    fn draw_pending<C: Canvas + ?Sized>(&self, c: &mut C, pending: &PendingLink) {
        let g = self.editor.graph();
        let (info, arrow) = match pending {
            PendingLink::Link(l) => {
                let kind = EdgeKind::Link(*l);
                (kind.link_info(g, self.radius), kind.arrow(g, self.radius))
            }
            PendingLink::SelfLink(s) => {
                let kind = EdgeKind::SelfLink(*s);
                (kind.link_info(g, self.radius), kind.arrow(g, self.radius))
            }
            PendingLink::Temporary(t) => (Some(t.link_info()), Some(t.arrow())),
            PendingLink::Suppressed(_) => return,
        };
        let Some(info) = info else { return };
        c.set_line_width(1.0);
        c.set_stroke_style(INK);
        c.set_fill_style(INK);
        c.begin_path();
        trace_link(c, &info);
        c.stroke();
        if self.has_arrows() {
            if let Some((tip, angle)) = arrow { draw_arrow(c, tip, angle); }
        }
    }

    fn draw_text<C: Canvas + ?Sized>(&self, c: &mut C, owner: TextOwner, raw: &str, at: Vec2, angle: Option<f64>) {
        let text = convert_latex_shortcuts(raw);
        let width = c.measure_text(&text);
        let placed = place_text(owner, width, at.x, at.y, angle, self.radius);
        c.set_fill_style(if placed.light { PAPER } else { INK });
        c.fill_text(&text, placed.x.round(), placed.y.round() + (self.font_size / 3.0).round());
    }
}

fn node_path<C: Canvas + ?Sized>(c: &mut C, node: &Node, r: f64) {
    c.begin_path();
    if node.is_square() {
        c.rect(node.x - r, node.y - r, 2.0 * r, 2.0 * r);
    } else {
        c.arc(node.x, node.y, r, 0.0, TAU, false);
    }
}

fn trace_link<C: Canvas + ?Sized>(c: &mut C, info: &LinkInfo) {
    match &info.arc {
        Some(a) => c.arc(a.circle.x, a.circle.y, a.circle.radius, a.start_angle, a.end_angle, a.is_reversed),
        None => {
            c.move_to(info.start.x, info.start.y);
            c.line_to(info.end.x, info.end.y);
        }
    }
}

fn draw_arrow<C: Canvas + ?Sized>(c: &mut C, tip: Vec2, angle: f64) {
    let [p0, p1, p2] = arrow_head(tip.x, tip.y, angle);
    c.begin_path();
    c.move_to(p0.x, p0.y);
    c.line_to(p1.x, p1.y);
    c.line_to(p2.x, p2.y);
    c.close_path();
    c.fill();
}

/// Marching-ants rubber band.
fn draw_selection_rect<C: Canvas + ?Sized>(c: &mut C, rect: [Vec2; 2], offset: f64) {
    let [a, b] = rect;
    let (x, y, w, h) = (a.x + 0.5, a.y + 0.5, b.x - a.x, b.y - a.y);
    c.begin_path();
    c.set_line_dash(&[5.0, 5.0]);
    c.set_line_dash_offset(offset);
    c.set_stroke_style(RECT_STROKE);
    c.rect(x, y, w, h);
    c.set_fill_style(RECT_FILL);
    c.fill_rect(x, y, w, h);
    c.stroke();
    c.set_line_dash(&[]);
}
