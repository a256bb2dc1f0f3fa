//! Collapse/expand state machine.
//!
//! Every toggle-able node (`center`, `branch`, `topic`) is either expanded or collapsed; all start
//! expanded. The renderer never flips flags itself: it sends a [`ToggleCommand`] and this
//! controller updates `collapsed` on the node and `hidden` on the affected descendants and
//! edges. Toggling is reversible indefinitely.

use crate::config::CascadePolicy;
use crate::error::ToggleError;
use crate::graph::{Graph, NodeIdx};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleCommand {
    pub node_id: String,
}

impl ToggleCommand {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOutcome {
    pub node_id: String,
    /// State after the toggle.
    pub collapsed: bool,
    /// Nodes whose `hidden` flag flipped, in pre-order.
    pub changed: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityController {
    policy: CascadePolicy,
}

impl VisibilityController {
    pub fn new(policy: CascadePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CascadePolicy {
        self.policy
    }

    /// Back to the initial state: everything expanded and visible.
    pub fn reset(&self, graph: &mut Graph) {
        for idx in 0..graph.node_count() {
            graph.set_collapsed(idx, false);
            graph.set_hidden(idx, false);
        }
        for idx in 0..graph.node_count() {
            graph.sync_edges_of(idx);
        }
    }

    pub fn apply(
        &self,
        graph: &mut Graph,
        command: &ToggleCommand,
    ) -> Result<ToggleOutcome, ToggleError> {
        self.toggle(graph, &command.node_id)
    }

    /// Flips `node_id` between expanded and collapsed and cascades `hidden` per the policy.
    pub fn toggle(&self, graph: &mut Graph, node_id: &str) -> Result<ToggleOutcome, ToggleError> {
        let idx = self.resolve(graph, node_id)?;
        let collapsed = !graph.node_at(idx).collapsed;
        graph.set_collapsed(idx, collapsed);

        let changed = match self.policy {
            CascadePolicy::Transitive => refresh_below(graph, idx),
            CascadePolicy::DirectChildren => cascade_direct(graph, idx, collapsed),
        };
        tracing::debug!(
            node = node_id,
            collapsed,
            changed = changed.len(),
            "toggled mind-map node"
        );
        Ok(ToggleOutcome {
            node_id: node_id.to_string(),
            collapsed,
            changed: changed
                .into_iter()
                .map(|i| graph.node_at(i).id.clone())
                .collect(),
        })
    }

    /// Brings `node_id` into the requested state; a no-op when it is already there.
    pub fn set_collapsed(
        &self,
        graph: &mut Graph,
        node_id: &str,
        collapsed: bool,
    ) -> Result<ToggleOutcome, ToggleError> {
        let idx = self.resolve(graph, node_id)?;
        if graph.node_at(idx).collapsed == collapsed {
            return Ok(ToggleOutcome {
                node_id: node_id.to_string(),
                collapsed,
                changed: Vec::new(),
            });
        }
        self.toggle(graph, node_id)
    }

    /// Collapses every toggle-able node except the center, leaving only the branches visible.
    pub fn collapse_all(&self, graph: &mut Graph) {
        let center = graph.center_idx();
        for idx in 0..graph.node_count() {
            let node = graph.node_at(idx);
            let collapse = idx != center && node.toggleable();
            graph.set_collapsed(idx, collapse);
        }
        self.recompute_all(graph);
    }

    pub fn expand_all(&self, graph: &mut Graph) {
        self.reset(graph);
    }

    /// Recomputes every `hidden` flag from the collapse flags alone.
    ///
    /// Under [`CascadePolicy::DirectChildren`] a node is hidden when its parent is collapsed;
    /// under [`CascadePolicy::Transitive`] when any ancestor is.
    pub fn recompute_all(&self, graph: &mut Graph) {
        for idx in 0..graph.node_count() {
            let hidden = match self.policy {
                CascadePolicy::Transitive => ancestor_collapsed(graph, idx),
                CascadePolicy::DirectChildren => graph
                    .parent_of(idx)
                    .is_some_and(|p| graph.node_at(p).collapsed),
            };
            graph.set_hidden(idx, hidden);
        }
        for idx in 0..graph.node_count() {
            graph.sync_edges_of(idx);
        }
    }

    fn resolve(&self, graph: &Graph, node_id: &str) -> Result<NodeIdx, ToggleError> {
        let Some(idx) = graph.index_of(node_id) else {
            let err = ToggleError::UnknownNode {
                node_id: node_id.to_string(),
            };
            tracing::warn!(error = %err, "ignoring toggle");
            return Err(err);
        };
        let kind = graph.node_at(idx).kind;
        if !kind.is_toggleable() {
            let err = ToggleError::NotToggleable {
                node_id: node_id.to_string(),
                kind: kind.as_str(),
            };
            tracing::warn!(error = %err, "ignoring toggle");
            return Err(err);
        }
        Ok(idx)
    }
}

fn ancestor_collapsed(graph: &Graph, idx: NodeIdx) -> bool {
    graph.ancestors(idx).any(|a| graph.node_at(a).collapsed)
}

/// Re-derives `hidden` for everything below `idx` as the OR of ancestor collapse flags.
fn refresh_below(graph: &mut Graph, idx: NodeIdx) -> Vec<NodeIdx> {
    let base = graph.node_at(idx).collapsed || ancestor_collapsed(graph, idx);
    let mut changed = Vec::new();
    let mut stack: Vec<(NodeIdx, bool)> = graph
        .children_of(idx)
        .iter()
        .rev()
        .map(|&c| (c, base))
        .collect();
    while let Some((n, hidden)) = stack.pop() {
        if graph.set_hidden(n, hidden) {
            changed.push(n);
        }
        graph.sync_edges_of(n);
        let below = hidden || graph.node_at(n).collapsed;
        stack.extend(graph.children_of(n).iter().rev().map(|&c| (c, below)));
    }
    changed
}

/// One-level cascade: the direct children follow the new state. On expand, children that are
/// themselves collapsed get their own children re-hidden so closed subtrees stay closed.
fn cascade_direct(graph: &mut Graph, idx: NodeIdx, collapsed: bool) -> Vec<NodeIdx> {
    let mut changed = Vec::new();
    let children = graph.children_of(idx).to_vec();
    for &c in &children {
        if graph.set_hidden(c, collapsed) {
            changed.push(c);
        }
        graph.sync_edges_of(c);
    }
    if collapsed {
        return changed;
    }
    for &c in &children {
        if !graph.node_at(c).collapsed {
            continue;
        }
        let grandchildren = graph.children_of(c).to_vec();
        for g in grandchildren {
            if graph.set_hidden(g, true) {
                changed.push(g);
            }
            graph.sync_edges_of(g);
        }
    }
    changed
}

pub fn is_collapsed(graph: &Graph, node_id: &str) -> bool {
    graph.node(node_id).is_some_and(|n| n.collapsed)
}

pub fn collapsed_ids(graph: &Graph) -> BTreeSet<String> {
    graph
        .nodes()
        .filter(|n| n.collapsed)
        .map(|n| n.id.clone())
        .collect()
}

pub fn visible_node_ids(graph: &Graph) -> BTreeSet<String> {
    graph
        .nodes()
        .filter(|n| !n.hidden)
        .map(|n| n.id.clone())
        .collect()
}

pub fn hidden_node_ids(graph: &Graph) -> BTreeSet<String> {
    graph
        .nodes()
        .filter(|n| n.hidden)
        .map(|n| n.id.clone())
        .collect()
}

pub fn hidden_edge_ids(graph: &Graph) -> BTreeSet<String> {
    graph
        .edges()
        .filter(|e| e.hidden)
        .map(|e| e.id.clone())
        .collect()
}

/// Whether every node is hidden exactly when an ancestor is collapsed, and every edge exactly
/// when an endpoint is hidden.
pub fn is_transitively_consistent(graph: &Graph) -> bool {
    let nodes_ok =
        (0..graph.node_count()).all(|i| graph.node_at(i).hidden == ancestor_collapsed(graph, i));
    let edges_ok = graph.edges().all(|e| {
        let endpoint_hidden = [e.source.as_str(), e.target.as_str()]
            .into_iter()
            .filter_map(|id| graph.node(id))
            .any(|n| n.hidden);
        e.hidden == endpoint_hidden
    });
    nodes_ok && edges_ok
}
