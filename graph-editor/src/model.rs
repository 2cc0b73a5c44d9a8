use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

pub type NodeId = u32;
pub type LinkId = u32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self { Vec2 { x, y } }
    pub fn len(self) -> f64 { (self.x * self.x + self.y * self.y).sqrt() }
    pub fn dot(self, o: Vec2) -> f64 { self.x * o.x + self.y * o.y }
    pub fn cross(self, o: Vec2) -> f64 { self.x * o.y - self.y * o.x }
    pub fn dist(self, o: Vec2) -> f64 { (self - o).len() }
    pub fn angle(self) -> f64 { self.y.atan2(self.x) }
}

impl Add for Vec2 { type Output = Vec2; fn add(self, o: Vec2) -> Vec2 { Vec2::new(self.x + o.x, self.y + o.y) } }
impl Sub for Vec2 { type Output = Vec2; fn sub(self, o: Vec2) -> Vec2 { Vec2::new(self.x - o.x, self.y - o.y) } }
impl Mul<f64> for Vec2 { type Output = Vec2; fn mul(self, k: f64) -> Vec2 { Vec2::new(self.x * k, self.y * k) } }

/// Fixed palette shared by nodes and links.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Purple,
    White,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Black, Color::Red, Color::Blue, Color::Green,
        Color::Yellow, Color::Orange, Color::Purple, Color::White,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Color::Black => "#444444",
            Color::Red => "#fb9a99",
            Color::Blue => "#a6cee3",
            Color::Green => "#b2df8a",
            Color::Yellow => "#ffff99",
            Color::Orange => "#fdbf6f",
            Color::Purple => "#cab2d6",
            Color::White => "#ffffff",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Purple => "purple",
            Color::White => "white",
        }
    }

    /// Fill colours dark enough to need light text.
    pub fn is_dark(self) -> bool { matches!(self, Color::Black) }

    pub fn from_code(code: &str) -> Option<Color> {
        Color::ALL.into_iter().find(|c| c.code().eq_ignore_ascii_case(code))
    }

    pub fn from_name(name: &str) -> Option<Color> {
        Color::ALL.into_iter().find(|c| c.name() == name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    #[default]
    Undirected,
    Directed,
    Fsm,
    Petri,
}

impl GraphType {
    pub fn has_arrows(self) -> bool { !matches!(self, GraphType::Undirected) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetriNodeType {
    #[default]
    None,
    Place,
    Transition,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiMode {
    /// Clicking empty space creates nodes, dragging from a node creates links.
    Add,
    /// Clicking selects, dragging moves or draws a selection rectangle.
    #[default]
    Move,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub color: Option<Color>,
    pub highlighted: bool,
    pub is_initial: bool,
    pub is_final: bool,
    pub petri_type: PetriNodeType,
    pub tokens: u32,
    pub locked: bool,
    pub has_moved: bool,
    pub(crate) mouse_offset: Vec2, // node position minus pointer at drag start
}

/// Link between two distinct nodes, bowed through an anchor described relative
/// to the baseline `a`→`b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: NodeId,
    pub b: NodeId,
    pub parallel_part: f64,      // fraction along the baseline
    pub perpendicular_part: f64, // signed px off the baseline, 0 = straight
    pub line_angle_adjust: f64,  // 0 or π, label side of a straight link
}

/// Loop from a node back to itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelfLink {
    pub node: NodeId,
    pub anchor_angle: f64,
    pub(crate) mouse_offset_angle: f64,
}

/// Arrow pointing into an FSM initial state from outside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StartLink {
    pub node: NodeId,
    pub delta_x: f64,
    pub delta_y: f64,
}

/// Preview line drawn while dragging a link over empty space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemporaryLink {
    pub from: Vec2,
    pub to: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeKind {
    Link(Link),
    SelfLink(SelfLink),
    StartLink(StartLink),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub kind: EdgeKind,
    pub label: String,
    pub color: Option<Color>,
    pub highlighted: bool,
    pub locked: bool,
    pub has_moved: bool,
}

/// Reference to a selectable object of the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ObjectRef {
    Node(NodeId),
    Edge(LinkId),
}

impl ObjectRef {
    pub fn is_node(self) -> bool { matches!(self, ObjectRef::Node(_)) }
    pub fn is_edge(self) -> bool { matches!(self, ObjectRef::Edge(_)) }
}
