pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Malformed(#[from] MalformedTreeError),

    #[error(transparent)]
    Toggle(#[from] ToggleError),

    #[error("Invalid mindmap config: {message}")]
    Config { message: String },

    #[error("Tree JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Structural problems found while turning a source tree into a graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedTreeError {
    #[error("node `{node_id}` references a non-existent parent `{parent_id}`")]
    DanglingParent { node_id: String, parent_id: String },

    #[error("cycle detected through node `{node_id}`")]
    Cycle { node_id: String },

    #[error("duplicate node id `{node_id}`")]
    DuplicateId { node_id: String },

    #[error("tree has no root node")]
    MissingRoot,

    #[error("tree has more than one root (`{first}` and `{second}`)")]
    MultipleRoots { first: String, second: String },

    #[error("node `{node_id}` is nested {depth} levels deep; details are the deepest level")]
    TooDeep { node_id: String, depth: usize },

    #[error("node id must not be empty (parent `{parent_id}`)")]
    EmptyId { parent_id: String },
}

impl MalformedTreeError {
    /// Whether the offending node is the root itself (the whole tree is unusable).
    pub fn implicates_root(&self) -> bool {
        matches!(
            self,
            Self::MissingRoot | Self::MultipleRoots { .. } | Self::Cycle { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleError {
    #[error("toggle targets unknown node `{node_id}`")]
    UnknownNode { node_id: String },

    #[error("node `{node_id}` ({kind}) cannot be collapsed")]
    NotToggleable { node_id: String, kind: &'static str },
}

/// A node whose parent cannot be resolved when positions are computed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot place node `{node_id}`: parent `{parent_id}` is not in the graph")]
pub struct LayoutSkipError {
    pub node_id: String,
    pub parent_id: String,
}
