//! Label placement around nodes and links.
//!
//! Text widths come from the drawing surface (`Canvas::measure_text`); this
//! module only decides where the measured text goes.

use crate::geometry::tolerance::{TEXT_NODE_HORIZONTAL_PADDING, TEXT_NODE_VERTICAL_PADDING};
use serde::Serialize;

const GREEK_LETTER_NAMES: [&str; 24] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa", "Lambda",
    "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "Sigma", "Tau", "Upsilon", "Phi", "Chi", "Psi", "Omega",
];

/// Sides of a node where at least one link touches it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Sides {
    pub right: bool,
    pub top: bool,
    pub left: bool,
    pub bottom: bool,
}

impl Sides {
    pub fn all(&self) -> bool { self.right && self.top && self.left && self.bottom }

    /// Buckets an incident angle (0 = right, counter-clockwise on screen) into
    /// 90° sides centred on the axes.
    pub fn mark(&mut self, angle: f64) {
        let deg = angle.to_degrees().rem_euclid(360.0);
        if !(45.0..315.0).contains(&deg) {
            self.right = true;
        } else if deg < 135.0 {
            self.top = true;
        } else if deg < 225.0 {
            self.left = true;
        } else {
            self.bottom = true;
        }
    }

    pub fn from_angles(angles: impl IntoIterator<Item = f64>) -> Sides {
        let mut s = Sides::default();
        for a in angles { s.mark(a); }
        s
    }
}

/// What a piece of text belongs to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextOwner {
    Node { is_place: bool, dark_fill: bool, sides: Sides },
    Link,
    /// Free text such as a token count.
    Plain,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedText {
    pub x: f64,
    pub y: f64,
    /// Draw in white for contrast with a dark fill.
    pub light: bool,
}

/// Left baseline position for text of measured `width` anchored at (x, y).
pub fn place_text(owner: TextOwner, width: f64, x: f64, y: f64, angle: Option<f64>, radius: f64) -> PlacedText {
    let (mut x, mut y) = (x, y);
    let mut light = false;
    let fits = width <= 2.0 * radius - TEXT_NODE_HORIZONTAL_PADDING;
    let inside = match owner {
        TextOwner::Link => true,
        TextOwner::Node { is_place, .. } => fits && !is_place,
        TextOwner::Plain => fits,
    };
    if inside {
        x -= width / 2.0;
        if let TextOwner::Node { dark_fill, .. } = owner { light = dark_fill; }
    } else if let TextOwner::Node { sides, .. } = owner {
        // First free side of bottom, right, top, left; bottom when surrounded
        if !sides.bottom || sides.all() {
            x -= width / 2.0;
            y += radius + TEXT_NODE_VERTICAL_PADDING;
        } else if !sides.right {
            x += radius + TEXT_NODE_HORIZONTAL_PADDING;
        } else if !sides.top {
            x -= width / 2.0;
            y -= radius + TEXT_NODE_VERTICAL_PADDING;
        } else {
            x -= width + radius + TEXT_NODE_HORIZONTAL_PADDING;
        }
    }
    if let Some(angle) = angle.filter(|a| *a != 0.0) {
        let cos = angle.cos();
        let sin = angle.sin();
        let corner_x = (width / 2.0) * if cos > 0.0 { 1.0 } else { -1.0 };
        let corner_y = 10.0 * if sin > 0.0 { 1.0 } else { -1.0 };
        let slide = sin * sin.abs().powi(40) * corner_x - cos * cos.abs().powi(10) * corner_y;
        x += corner_x - sin * slide;
        y += corner_y + cos * slide;
    }
    PlacedText { x, y, light }
}

/// Expands `\alpha`-style Greek letters and `_0`..`_9`, `_a` subscripts.
pub fn convert_latex_shortcuts(text: &str) -> String {
    let mut out = text.to_string();
    for (i, name) in GREEK_LETTER_NAMES.iter().enumerate() {
        // The capital range skips the unused final-sigma code point
        let skip = u32::from(i > 16);
        let upper = char::from_u32(913 + i as u32 + skip);
        let lower = char::from_u32(945 + i as u32 + skip);
        if let (Some(upper), Some(lower)) = (upper, lower) {
            out = out.replace(&format!("\\{}", name), &upper.to_string());
            out = out.replace(&format!("\\{}", name.to_lowercase()), &lower.to_string());
        }
    }
    for d in 0..10u32 {
        if let Some(sub) = char::from_u32(8320 + d) {
            out = out.replace(&format!("_{}", d), &sub.to_string());
        }
    }
    out.replace("_a", "\u{2090}")
}
