use graph_editor::algorithms::text_layout::{place_text, Sides, TextOwner};
use graph_editor::model::{Edge, EdgeKind, Link, Node, ObjectRef, SelfLink, Vec2};
use graph_editor::Graph;
use std::f64::consts::{FRAC_PI_2, PI};

fn pair() -> Graph {
    let mut g = Graph::new();
    g.add_node(Node::new(100.0, 100.0));
    g.add_node(Node::new(300.0, 100.0));
    g
}

#[test]
fn bent_anchor_is_reproduced() {
    let (a, b) = (Node::new(100.0, 100.0), Node::new(300.0, 100.0));
    let mut l = Link::new(0, 1);
    assert!(!l.set_anchor_point(&a, &b, 150.0, 60.0));
    let p = l.anchor_point(&a, &b);
    assert!((p.x - 150.0).abs() < 1e-9 && (p.y - 60.0).abs() < 1e-9);
}

#[test]
fn straight_snap_is_idempotent() {
    let (a, b) = (Node::new(0.0, 0.0), Node::new(200.0, 0.0));
    let mut l = Link::new(0, 1);
    assert!(l.set_anchor_point(&a, &b, 80.0, -4.0));
    let first = l;
    assert!(l.set_anchor_point(&a, &b, 80.0, -4.0));
    assert_eq!(l, first);
    assert_eq!(l.perpendicular_part, 0.0);
    assert_eq!(l.line_angle_adjust, PI);
}

#[test]
fn anchor_beyond_the_ends_does_not_snap() {
    let (a, b) = (Node::new(0.0, 0.0), Node::new(200.0, 0.0));
    let mut l = Link::new(0, 1);
    assert!(!l.set_anchor_point(&a, &b, 260.0, 2.0));
    assert!(l.parallel_part > 1.0);
}

#[test]
fn self_loop_snaps_to_right_angles() {
    let n = Node::new(0.0, 0.0);
    let mut s = SelfLink::new(0);
    let a = FRAC_PI_2 + 0.05;
    s.set_anchor_point(&n, a.cos() * 50.0, a.sin() * 50.0);
    assert_eq!(s.anchor_angle, FRAC_PI_2);
    let a = FRAC_PI_2 + 0.3;
    s.set_anchor_point(&n, a.cos() * 50.0, a.sin() * 50.0);
    assert!((s.anchor_angle - a).abs() < 1e-12);
    s.set_anchor_point(&n, -50.0, 0.0);
    assert_eq!(s.anchor_angle, PI);
}

#[test]
fn nodes_are_picked_before_links() {
    let mut g = pair();
    g.add_link(Edge::new(EdgeKind::Link(Link::new(0, 1)))).unwrap();
    assert_eq!(g.object_at(200.0, 102.0, true), Some(ObjectRef::Edge(0)));
    assert_eq!(g.object_at(128.0, 100.0, true), Some(ObjectRef::Node(0)));
    assert_eq!(g.object_at(128.0, 100.0, false), Some(ObjectRef::Edge(0)));
    assert_eq!(g.object_at(200.0, 150.0, true), None);
}

#[test]
fn nearest_of_overlapping_nodes_wins() {
    let mut g = Graph::new();
    g.add_node(Node::new(0.0, 0.0));
    g.add_node(Node::new(30.0, 0.0));
    assert_eq!(g.node_at(20.0, 0.0, true), Some(1));
    assert_eq!(g.node_at(10.0, 0.0, true), Some(0));
}

#[test]
fn rectangle_skips_locked_and_partial_objects() {
    let mut g = pair();
    g.node_mut(1).unwrap().locked = true;
    g.add_node(Node::new(200.0, 100.0));
    let rect = [Vec2::new(0.0, 0.0), Vec2::new(400.0, 200.0)];
    assert_eq!(g.objects_in_rectangle(rect), vec![ObjectRef::Node(0), ObjectRef::Node(2)]);
    let tight = [Vec2::new(80.0, 80.0), Vec2::new(400.0, 200.0)];
    assert_eq!(g.objects_in_rectangle(tight), vec![ObjectRef::Node(2)]);
}

#[test]
fn curved_link_needs_its_whole_arc_inside() {
    let mut g = pair();
    let mut l = Link::new(0, 1);
    l.perpendicular_part = 60.0;
    g.add_link(Edge::new(EdgeKind::Link(l))).unwrap();
    let info = g.link_info(0).unwrap();
    assert!(info.arc.is_some());
    let narrow = [Vec2::new(0.0, 0.0), Vec2::new(400.0, 150.0)];
    assert!(!g.objects_in_rectangle(narrow).contains(&ObjectRef::Edge(0)));
    let wide = [Vec2::new(0.0, 0.0), Vec2::new(400.0, 400.0)];
    assert!(g.objects_in_rectangle(wide).contains(&ObjectRef::Edge(0)));
}

#[test]
fn parallel_offsets_are_measured_from_the_new_direction() {
    let mut g = pair();
    assert_eq!(g.next_parallel_offset(0, 1), None);
    let mut l = Link::new(0, 1);
    l.perpendicular_part = 16.0;
    g.add_link(Edge::new(EdgeKind::Link(l))).unwrap();
    assert_eq!(g.next_parallel_offset(0, 1), Some(16.0));
    assert_eq!(g.next_parallel_offset(1, 0), Some(-16.0));
}

#[test]
fn wide_place_label_goes_below() {
    let owner = TextOwner::Node { is_place: true, dark_fill: false, sides: Sides::default() };
    let t = place_text(owner, 20.0, 100.0, 100.0, None, 26.0);
    assert_eq!((t.x, t.y), (90.0, 138.0));
    let owner = TextOwner::Node { is_place: false, dark_fill: true, sides: Sides::default() };
    let t = place_text(owner, 20.0, 100.0, 100.0, None, 26.0);
    assert_eq!((t.x, t.y, t.light), (90.0, 100.0, true));
}

#[test]
fn hit_padding_bounds_for_both_shapes() {
    let circle = Node::new(0.0, 0.0);
    let mut square = Node::new(0.0, 0.0);
    square.petri_type = graph_editor::model::PetriNodeType::Transition;
    for n in [&circle, &square] {
        assert!(n.contains_point(0.0, 0.0, 26.0, false));
        assert!(n.contains_point(31.0, 0.0, 26.0, true));
        assert!(!n.contains_point(33.0, 0.0, 26.0, true));
        assert!(!n.contains_point(27.0, 0.0, 26.0, false));
    }
}
