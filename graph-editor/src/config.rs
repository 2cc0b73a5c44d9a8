// Template configuration supplied by the host; every field may be absent

use crate::error::GraphError;
use crate::geometry::tolerance::{DEFAULT_FONT_SIZE, DEFAULT_NODE_RADIUS};
use crate::model::{Color, GraphType};
use log::warn;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// Edit permissions a template can grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    Move,
    EditVertex,
    EditEdge,
    VertexLabels,
    EdgeLabels,
    VertexColors,
    EdgeColors,
    FsmFlags,
    PetriMarking,
}

impl EditKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EditKind::Move => "move",
            EditKind::EditVertex => "edit_vertex",
            EditKind::EditEdge => "edit_edge",
            EditKind::VertexLabels => "vertex_labels",
            EditKind::EdgeLabels => "edge_labels",
            EditKind::VertexColors => "vertex_colors",
            EditKind::EdgeColors => "edge_colors",
            EditKind::FsmFlags => "fsm_flags",
            EditKind::PetriMarking => "petri_marking",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRange {
    pub min: u32,
    pub max: u32,
}

impl Default for TokenRange {
    fn default() -> Self { TokenRange { min: 0, max: 100 } }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TemplateParams {
    #[serde(rename = "type")]
    pub graph_type: GraphType,
    /// Absent: everything allowed. Unknown names are ignored.
    pub allow_edits: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_palette")]
    pub vertex_colors: Option<Vec<Color>>,
    #[serde(deserialize_with = "lenient_palette")]
    pub edge_colors: Option<Vec<Color>>,
    pub highlight_vertices: bool,
    pub highlight_edges: bool,
    pub noderadius: Option<f64>,
    pub fontsize: Option<f64>,
    pub locknodes: bool,
    pub lockedges: bool,
    pub ignore_locked: bool,
    pub save_locked: bool,
    pub vertex_label_regex: Option<String>,
    pub edge_label_regex: Option<String>,
    pub tokens_range: TokenRange,
}

fn lenient_palette<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<Color>>, D::Error> {
    let names: Option<Vec<String>> = Option::deserialize(d)?;
    Ok(names.map(|names| {
        names.iter().filter_map(|n| {
            let c = Color::from_name(n);
            if c.is_none() { warn!("ignoring unknown palette colour '{}'", n); }
            c
        }).collect()
    }))
}

impl TemplateParams {
    pub fn new(graph_type: GraphType) -> Self { TemplateParams { graph_type, ..Default::default() } }

    pub fn from_json(text: &str) -> Result<Self, GraphError> {
        if text.trim().is_empty() { return Ok(TemplateParams::default()); }
        serde_json::from_str(text).map_err(|e| GraphError::Config(e.to_string()))
    }

    /// Permission granted by the template alone; the editor also applies read-only.
    pub fn allows(&self, kind: EditKind) -> bool {
        match &self.allow_edits {
            None => true,
            Some(list) => list.iter().any(|k| k == kind.as_str()),
        }
    }

    pub fn node_radius(&self) -> f64 {
        self.noderadius.filter(|r| r.is_finite() && *r > 0.0).unwrap_or(DEFAULT_NODE_RADIUS)
    }

    pub fn font_size(&self) -> f64 {
        self.fontsize.filter(|f| f.is_finite() && *f > 0.0).unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn first_vertex_color(&self) -> Option<Color> { self.vertex_colors.as_ref()?.first().copied() }
    pub fn first_edge_color(&self) -> Option<Color> { self.edge_colors.as_ref()?.first().copied() }

    /// Both palettes exist and offer the same colours.
    pub fn same_palettes(&self) -> bool {
        match (&self.vertex_colors, &self.edge_colors) {
            (Some(v), Some(e)) => v.iter().all(|c| e.contains(c)) && e.iter().all(|c| v.contains(c)),
            _ => false,
        }
    }
}

/// Compiled label patterns. Patterns search anywhere in the label.
#[derive(Clone, Debug, Default)]
pub struct LabelRules {
    vertex: Option<Regex>,
    edge: Option<Regex>,
}

fn compile(pattern: Option<&str>, what: &str) -> Option<Regex> {
    let pattern = pattern?;
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("ignoring invalid {} label pattern '{}': {}", what, pattern, e);
            None
        }
    }
}

impl LabelRules {
    pub fn from_params(params: &TemplateParams) -> Self {
        LabelRules {
            vertex: compile(params.vertex_label_regex.as_deref(), "vertex"),
            edge: compile(params.edge_label_regex.as_deref(), "edge"),
        }
    }

    pub fn is_valid(&self, label: &str, is_node: bool) -> bool {
        let re = if is_node { &self.vertex } else { &self.edge };
        re.as_ref().map_or(true, |re| re.is_match(label))
    }
}
