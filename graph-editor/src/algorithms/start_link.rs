//! Placement of the FSM start arrow around an initial state.
//!
//! Angles here follow `calculate_angle` on the node: 0 points right and angles
//! grow counter-clockwise on screen, so `y` is subtracted when converting back.

use crate::geometry::tolerance::{INITIAL_FSM_NODE_LINK_LENGTH, START_LINK_CLEARANCE};
use crate::model::Vec2;
use std::f64::consts::{PI, TAU};

/// Preferred direction of the start arrow.
pub const TOP_LEFT: f64 = 0.75 * PI;
/// Candidates per gap between incident links; must be even.
pub const DIVISIONS: usize = 8;
/// Candidates closer than this share of a turn to an incident link are dropped.
pub const MIN_PROXIMITY: f64 = 0.05;

/// Evenly spread angles around `opposite` covering `range`.
pub fn spread_angles(opposite: f64, range: f64, divisions: usize) -> Vec<f64> {
    let half = (divisions / 2) as i64 - 1;
    (-half..=half)
        .map(|i| (opposite + (i as f64 / divisions as f64) * range).rem_euclid(TAU))
        .collect()
}

/// Candidates for every gap between consecutive sorted incident angles.
pub fn gap_candidates(sorted: &[f64], divisions: usize) -> Vec<f64> {
    let mut out = Vec::new();
    for (i, start) in sorted.iter().enumerate() {
        let end = match sorted.get(i + 1) {
            Some(e) => *e,
            None => sorted[0] + TAU,
        };
        out.extend(spread_angles((start + end) / 2.0, (start - end).abs(), divisions));
    }
    out
}

pub fn filter_out_close_angles(candidates: &[f64], fixed: &[f64], proximity: f64) -> Vec<f64> {
    candidates.iter().copied()
        .filter(|c| fixed.iter().all(|f| (f - c).abs() >= proximity * TAU))
        .collect()
}

/// Candidate whose nearest incident angle is farthest away.
pub fn max_min_proximity(candidates: &[f64], fixed: &[f64]) -> Option<f64> {
    let mut best = *candidates.first()?;
    let mut space = 0.0;
    for c in candidates {
        let nearest = fixed.iter().map(|f| (f - c).abs()).fold(f64::MAX, f64::min);
        if nearest > space {
            space = nearest;
            best = *c;
        }
    }
    Some(best)
}

/// Direction for the start arrow given the angles of the node's other links.
pub fn start_link_angle(incident: &[f64]) -> Option<f64> {
    if incident.is_empty() { return None; }
    let mut sorted = incident.to_vec();
    sorted.sort_by(f64::total_cmp);
    let candidates = gap_candidates(&sorted, DIVISIONS);
    let free = filter_out_close_angles(&candidates, &sorted, MIN_PROXIMITY);
    if free.is_empty() {
        max_min_proximity(&candidates, &sorted)
    } else {
        free.into_iter().min_by(|a, b| (TOP_LEFT - a).abs().total_cmp(&(TOP_LEFT - b).abs()))
    }
}

/// Tail position of the start arrow for a node at `node`.
pub fn start_link_position(node: Vec2, incident: &[f64], radius: f64) -> Vec2 {
    match start_link_angle(incident) {
        None => {
            let off = radius + INITIAL_FSM_NODE_LINK_LENGTH;
            Vec2::new(node.x - off, node.y - off)
        }
        Some(angle) => {
            let r = radius + START_LINK_CLEARANCE;
            Vec2::new(node.x + r * angle.cos(), node.y - r * angle.sin())
        }
    }
}
