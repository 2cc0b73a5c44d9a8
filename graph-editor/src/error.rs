use crate::model::NodeId;
use thiserror::Error;

/// Message key shown by the host when a document cannot be loaded.
pub const INVALID_SERIALISATION_KEY: &str = "graph_ui_invalidserialisation";

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("malformed graph document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported graph document version {0:?}")]
    UnsupportedVersion(Option<i64>),
    #[error("graph document has no {0} list")]
    MissingList(&'static str),
    #[error("edge {edge} references missing vertex {index}")]
    InvalidIndex { edge: usize, index: i64 },
    #[error("vertex {index}: {reason}")]
    InvalidVertex { index: usize, reason: String },
    #[error("edge {index}: {reason}")]
    InvalidEdge { index: usize, reason: String },
    #[error("too many {what} (max {max})")]
    LimitExceeded { what: &'static str, max: usize },
    #[error("node {0} does not exist")]
    MissingNode(NodeId),
    #[error("a link must join two distinct nodes")]
    SelfLinkEdge,
    #[error("node {0} already has a start link")]
    DuplicateStartLink(NodeId),
    #[error("invalid template configuration: {0}")]
    Config(String),
}

impl GraphError {
    /// Key of the user-facing message for this failure.
    pub fn message_key(&self) -> &'static str { INVALID_SERIALISATION_KEY }
}

pub type Result<T> = std::result::Result<T, GraphError>;
