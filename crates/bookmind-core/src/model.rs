use crate::geom::Position;
use serde::{Deserialize, Serialize};

/// Number of branch colors; `branch_index` cycles through `1..=BRANCH_COLOR_COUNT`.
pub const BRANCH_COLOR_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Center,
    Branch,
    Topic,
    Detail,
    File,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Center => "center",
            NodeKind::Branch => "branch",
            NodeKind::Topic => "topic",
            NodeKind::Detail => "detail",
            NodeKind::File => "file",
        }
    }

    /// Kinds that own a collapsed/expanded state.
    pub fn is_toggleable(self) -> bool {
        match self {
            NodeKind::Center | NodeKind::Branch | NodeKind::Topic => true,
            NodeKind::Detail | NodeKind::File => false,
        }
    }

    /// Depth below the center node.
    pub fn depth(self) -> usize {
        match self {
            NodeKind::Center => 0,
            NodeKind::Branch => 1,
            NodeKind::Topic => 2,
            NodeKind::Detail | NodeKind::File => 3,
        }
    }

    /// Edge styling for the structural edge that ends at a node of this kind.
    pub fn incoming_edge_kind(self) -> Option<EdgeKind> {
        match self {
            NodeKind::Center => None,
            NodeKind::Branch => Some(EdgeKind::Branch),
            NodeKind::Topic => Some(EdgeKind::Topic),
            NodeKind::Detail | NodeKind::File => Some(EdgeKind::Detail),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of a detail node's content; also its vertical rank next to the topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StructureType {
    Url,
    Title,
    Summary,
    Other,
}

impl StructureType {
    pub fn as_str(self) -> &'static str {
        match self {
            StructureType::Url => "url",
            StructureType::Title => "title",
            StructureType::Summary => "summary",
            StructureType::Other => "other",
        }
    }

    /// `0` sits highest.
    pub fn rank(self) -> usize {
        match self {
            StructureType::Url => 0,
            StructureType::Title => 1,
            StructureType::Summary => 2,
            StructureType::Other => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    Branch,
    Topic,
    Detail,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Branch => "branch",
            EdgeKind::Topic => "topic",
            EdgeKind::Detail => "detail",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub label: String,
    /// `1..=6` for everything under a branch, `0` for the center.
    pub branch_index: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_type: Option<StructureType>,
    /// Link target of `url` details, already sanitized for navigation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub collapsed: bool,
}

impl Node {
    pub fn toggleable(&self) -> bool {
        self.kind.is_toggleable()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub branch_index: u8,
    #[serde(default)]
    pub hidden: bool,
}

pub fn edge_id(source: &str, target: &str) -> String {
    format!("e-{source}-{target}")
}

/// Color slot for the `position`-th (0-based) branch.
pub fn branch_index_for(position: usize) -> u8 {
    (position % BRANCH_COLOR_COUNT) as u8 + 1
}
