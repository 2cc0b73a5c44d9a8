// Interaction tolerances and drawing constants shared by hit-testing, snapping and layout

pub const HIT_TARGET_PADDING: f64 = 6.0;       // extra pick distance around nodes and links (px)
pub const SNAP_TO_PADDING: f64 = 6.0;          // axis snap and straight-link snap distance (px)
pub const DUPLICATE_LINK_OFFSET: f64 = 16.0;   // perpendicular step between parallel links (px)
pub const SELF_LINK_SNAP_ANGLE: f64 = 0.1;     // self-loop snaps to a right angle within this (rad)

pub const DEFAULT_NODE_RADIUS: f64 = 26.0;
pub const DEFAULT_FONT_SIZE: f64 = 20.0;
pub const FINAL_RING_INSET: f64 = 6.0;         // inner ring of accepting states
pub const TEXT_NODE_HORIZONTAL_PADDING: f64 = 4.0;
pub const TEXT_NODE_VERTICAL_PADDING: f64 = 12.0;

// FSM start marker
pub const INITIAL_FSM_NODE_LINK_LENGTH: f64 = 25.0;
pub const START_LINK_CLEARANCE: f64 = 50.0;

// Canvas coordinates are expressed against this width and scaled to the element
pub const NOMINAL_WIDTH: f64 = 900.0;

pub const EPS_LEN: f64 = 1e-9;                 // zero-length vector threshold
pub const EPS_DENOM: f64 = 1e-12;              // determinant guard

#[inline]
pub fn safe_div(num: f64, den: f64, fallback: f64) -> f64 {
    if den.abs() <= EPS_DENOM { fallback } else { num / den }
}
