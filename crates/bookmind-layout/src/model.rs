//! Positioned snapshot handed to a renderer.

use bookmind_core::config::TruncateConfig;
use bookmind_core::graph::Graph;
use bookmind_core::model::{EdgeKind, NodeKind, StructureType};
use bookmind_core::theme::{BranchColors, branch_colors, palette_color};
use bookmind_core::{Edge, Node, Position, display_label};
use serde::{Deserialize, Serialize};

use crate::text::TextMeasurer;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    /// Label shortened for display, when it differs from `label`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    pub position: Position,
    pub branch_index: u8,
    pub hidden: bool,
    pub collapsed: bool,
    /// Whether a click on this node should produce a toggle command.
    pub toggleable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_type: Option<StructureType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub width: f64,
    pub height: f64,
    pub colors: BranchColors,
}

impl LayoutNode {
    fn from_node(node: &Node, truncate: &TruncateConfig, measurer: &dyn TextMeasurer) -> Self {
        let shown = display_label(node, truncate);
        let metrics = measurer.measure(&shown);
        let display_label = (shown != node.label).then_some(shown);
        Self {
            id: node.id.clone(),
            kind: node.kind,
            label: node.label.clone(),
            display_label,
            position: node.position,
            branch_index: node.branch_index,
            hidden: node.hidden,
            collapsed: node.collapsed,
            toggleable: node.toggleable(),
            structure_type: node.structure_type,
            url: node.url.clone(),
            width: metrics.width,
            height: metrics.height,
            colors: branch_colors(node.branch_index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub branch_index: u8,
    pub hidden: bool,
    /// Line color: the palette color of the branch the edge belongs to.
    pub color: String,
}

impl From<&Edge> for LayoutEdge {
    fn from(edge: &Edge) -> Self {
        Self {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
            kind: edge.kind,
            branch_index: edge.branch_index,
            hidden: edge.hidden,
            color: palette_color(edge.branch_index).to_string(),
        }
    }
}

/// Every node and edge with its current position and visibility. Hidden entries are included so
/// a renderer can animate them out; `bounds` only covers visible nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindmapLayout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
}

impl MindmapLayout {
    pub fn from_graph(graph: &Graph, truncate: &TruncateConfig, measurer: &dyn TextMeasurer) -> Self {
        let nodes: Vec<LayoutNode> = graph
            .nodes()
            .map(|n| LayoutNode::from_node(n, truncate, measurer))
            .collect();
        let edges = graph.edges().map(LayoutEdge::from).collect();

        // Node boxes are centered on their position.
        let bounds = Bounds::from_points(nodes.iter().filter(|n| !n.hidden).flat_map(|n| {
            let hw = n.width / 2.0;
            let hh = n.height / 2.0;
            let Position { x, y } = n.position;
            [(x - hw, y - hh), (x + hw, y + hh)]
        }));

        Self {
            nodes,
            edges,
            bounds,
        }
    }

    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&LayoutEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn visible_nodes(&self) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.iter().filter(|n| !n.hidden)
    }

    pub fn to_json(&self, pretty: bool) -> crate::Result<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }
}
