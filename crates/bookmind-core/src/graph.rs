//! Arena-backed mind-map graph and the tree → graph builder.

use crate::error::MalformedTreeError;
use crate::geom::Position;
use crate::model::{Edge, Node, NodeKind, StructureType, branch_index_for, edge_id};
use crate::source::{DetailFields, FlatTree, NestedTree, SourceEntry, SourceNode, TreeSource};
use crate::utils::{looks_like_url, sanitize_url};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

pub const DEFAULT_CENTER_ID: &str = "center";
pub const DEFAULT_CENTER_LABEL: &str = "Bookmarks";

/// Dense index of a node inside a [`Graph`]; stable for the lifetime of the graph.
pub type NodeIdx = usize;
pub type EdgeIdx = usize;

/// Nodes and edges of one loaded tree, indexed by id and by position.
///
/// Structural fields (`kind`, `parent_id`, `branch_index`) are fixed at construction. Positions
/// are written by the layout engine, `hidden`/`collapsed` by the visibility controller.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: IndexMap<String, Node>,
    edges: IndexMap<String, Edge>,
    parent: Vec<Option<NodeIdx>>,
    children: Vec<Vec<NodeIdx>>,
    incoming: Vec<Option<EdgeIdx>>,
    outgoing: Vec<Vec<EdgeIdx>>,
    center: NodeIdx,
}

impl Graph {
    /// A graph holding only the center node.
    pub fn center_only(id: impl Into<String>, label: impl Into<String>) -> Self {
        let center = Node {
            id: id.into(),
            kind: NodeKind::Center,
            parent_id: None,
            label: label.into(),
            branch_index: 0,
            structure_type: None,
            url: None,
            position: Position::ORIGIN,
            hidden: false,
            collapsed: false,
        };
        let mut nodes = IndexMap::new();
        nodes.insert(center.id.clone(), center);
        Self {
            nodes,
            edges: IndexMap::new(),
            parent: vec![None],
            children: vec![Vec::new()],
            incoming: vec![None],
            outgoing: vec![Vec::new()],
            center: 0,
        }
    }

    /// Assembles a graph from already-built parts (e.g. a snapshot handed back by a renderer).
    ///
    /// Ids must be unique, exactly one center must exist and parent links must not form a cycle.
    /// Parent references are *not* required to resolve: nodes with a dangling `parent_id` are
    /// kept but have no parent index, which the layout engine reports as skipped. Edges whose
    /// endpoints are unknown are dropped.
    pub fn assemble(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, MalformedTreeError> {
        let mut node_map: IndexMap<String, Node> = IndexMap::with_capacity(nodes.len());
        let mut center: Option<NodeIdx> = None;
        for node in nodes {
            if node.kind == NodeKind::Center {
                if let Some(prev) = center {
                    return Err(MalformedTreeError::MultipleRoots {
                        first: node_map[prev].id.clone(),
                        second: node.id,
                    });
                }
                center = Some(node_map.len());
            }
            if node_map.contains_key(&node.id) {
                return Err(MalformedTreeError::DuplicateId { node_id: node.id });
            }
            node_map.insert(node.id.clone(), node);
        }
        let center = center.ok_or(MalformedTreeError::MissingRoot)?;

        let n = node_map.len();
        let mut parent = vec![None; n];
        let mut children = vec![Vec::new(); n];
        for (idx, node) in node_map.values().enumerate() {
            let Some(parent_id) = node.parent_id.as_deref() else {
                continue;
            };
            if let Some(p) = node_map.get_index_of(parent_id) {
                parent[idx] = Some(p);
                children[p].push(idx);
            }
        }
        if let Some(on_cycle) = first_parent_cycle(&parent) {
            return Err(MalformedTreeError::Cycle {
                node_id: node_map[on_cycle].id.clone(),
            });
        }

        let mut graph = Self {
            nodes: node_map,
            edges: IndexMap::with_capacity(edges.len()),
            parent,
            children,
            incoming: vec![None; n],
            outgoing: vec![Vec::new(); n],
            center,
        };
        for edge in edges {
            let (Some(s), Some(t)) = (
                graph.nodes.get_index_of(&edge.source),
                graph.nodes.get_index_of(&edge.target),
            ) else {
                tracing::warn!(edge = %edge.id, "dropping edge with unknown endpoint");
                continue;
            };
            graph.push_edge(s, t, edge);
        }
        Ok(graph)
    }

    fn push_node(&mut self, node: Node, parent: Option<NodeIdx>) -> NodeIdx {
        let idx = self.nodes.len();
        self.nodes.insert(node.id.clone(), node);
        self.parent.push(parent);
        self.children.push(Vec::new());
        self.incoming.push(None);
        self.outgoing.push(Vec::new());
        if let Some(p) = parent {
            self.children[p].push(idx);
        }
        idx
    }

    fn push_edge(&mut self, source: NodeIdx, target: NodeIdx, edge: Edge) -> EdgeIdx {
        let idx = self.edges.len();
        self.edges.insert(edge.id.clone(), edge);
        self.outgoing[source].push(idx);
        self.incoming[target] = Some(idx);
        idx
    }

    pub fn center(&self) -> &Node {
        &self.nodes[self.center]
    }

    pub fn center_idx(&self) -> NodeIdx {
        self.center
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIdx> {
        self.nodes.get_index_of(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_at(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx]
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn edge_at(&self, idx: EdgeIdx) -> &Edge {
        &self.edges[idx]
    }

    /// Nodes in build order (center first, then a pre-order walk of the tree).
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node_map(&self) -> &IndexMap<String, Node> {
        &self.nodes
    }

    pub fn edge_map(&self) -> &IndexMap<String, Edge> {
        &self.edges
    }

    pub fn parent_of(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.parent[idx]
    }

    pub fn children_of(&self, idx: NodeIdx) -> &[NodeIdx] {
        &self.children[idx]
    }

    pub fn incoming_edge(&self, idx: NodeIdx) -> Option<EdgeIdx> {
        self.incoming[idx]
    }

    pub fn outgoing_edges(&self, idx: NodeIdx) -> &[EdgeIdx] {
        &self.outgoing[idx]
    }

    /// Strict ancestors of `idx`, nearest first.
    pub fn ancestors(&self, idx: NodeIdx) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: self.parent[idx],
        }
    }

    /// `idx` and everything below it, in pre-order.
    pub fn subtree(&self, idx: NodeIdx) -> Vec<NodeIdx> {
        let mut out = Vec::new();
        let mut stack = vec![idx];
        let mut seen: FxHashSet<NodeIdx> = FxHashSet::default();
        while let Some(cur) = stack.pop() {
            if !seen.insert(cur) {
                continue;
            }
            out.push(cur);
            stack.extend(self.children[cur].iter().rev().copied());
        }
        out
    }

    pub fn set_position(&mut self, idx: NodeIdx, position: Position) {
        self.nodes[idx].position = position;
    }

    pub(crate) fn set_collapsed(&mut self, idx: NodeIdx, collapsed: bool) {
        self.nodes[idx].collapsed = collapsed;
    }

    /// Returns whether the flag changed.
    pub(crate) fn set_hidden(&mut self, idx: NodeIdx, hidden: bool) -> bool {
        let node = &mut self.nodes[idx];
        let changed = node.hidden != hidden;
        node.hidden = hidden;
        changed
    }

    /// Re-derives `hidden` of every edge touching `idx` from its endpoints.
    pub(crate) fn sync_edges_of(&mut self, idx: NodeIdx) {
        let touching = self.incoming[idx]
            .into_iter()
            .chain(self.outgoing_edges(idx).iter().copied())
            .collect::<Vec<_>>();
        for e in touching {
            let (s, t) = {
                let edge = &self.edges[e];
                (
                    self.nodes.get_index_of(&edge.source),
                    self.nodes.get_index_of(&edge.target),
                )
            };
            let hidden = [s, t]
                .into_iter()
                .flatten()
                .any(|n| self.nodes[n].hidden);
            self.edges[e].hidden = hidden;
        }
    }
}

pub struct Ancestors<'a> {
    graph: &'a Graph,
    next: Option<NodeIdx>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeIdx;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next?;
        self.next = self.graph.parent[cur];
        Some(cur)
    }
}

/// A node on the first parent-link cycle found, if any.
fn first_parent_cycle(parent: &[Option<NodeIdx>]) -> Option<NodeIdx> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        OnPath,
        Done,
    }
    let mut mark = vec![Mark::Unvisited; parent.len()];
    for start in 0..parent.len() {
        let mut path = Vec::new();
        let mut cur = Some(start);
        while let Some(i) = cur {
            match mark[i] {
                Mark::Done => break,
                Mark::OnPath => return Some(i),
                Mark::Unvisited => {
                    mark[i] = Mark::OnPath;
                    path.push(i);
                    cur = parent[i];
                }
            }
        }
        for i in path {
            mark[i] = Mark::Done;
        }
    }
    None
}

/// Result of [`build_graph_or_center`]: always a usable graph, plus what went wrong if anything.
#[derive(Debug, Clone)]
pub struct GraphBuild {
    pub graph: Graph,
    pub diagnostic: Option<MalformedTreeError>,
}

/// One node of the tree after normalization, before validation.
#[derive(Debug, Clone)]
struct Record {
    id: String,
    parent: Option<String>,
    label: String,
    kind_hint: RecordShape,
}

#[derive(Debug, Clone)]
enum RecordShape {
    /// Kind follows from depth.
    Structural,
    Detail {
        structure: StructureType,
        url: Option<String>,
    },
    File,
}

fn classify_free_text(text: &str) -> StructureType {
    if looks_like_url(text) {
        StructureType::Url
    } else {
        StructureType::Summary
    }
}

fn detail_shape(structure: StructureType, raw: &str) -> RecordShape {
    RecordShape::Detail {
        structure,
        url: (structure == StructureType::Url).then(|| sanitize_url(raw)),
    }
}

/// Hands out generated ids that never clash with caller-supplied ones or with each other.
///
/// Caller ids are reserved up front; a generated id that is already taken gets a `-2`, `-3`, ...
/// suffix. Duplicates among caller ids are left for validation to report.
#[derive(Debug, Default)]
struct IdAllocator {
    taken: FxHashSet<String>,
}

impl IdAllocator {
    fn for_nested(tree: &NestedTree) -> Self {
        let mut ids = Self::default();
        ids.reserve_node(&tree.root);
        ids
    }

    fn reserve_node(&mut self, node: &SourceNode) {
        if let Some(id) = &node.id {
            self.taken.insert(id.clone());
        }
        for child in &node.children {
            if let SourceEntry::Node(child) = child {
                self.reserve_node(child);
            }
        }
    }

    fn generate(&mut self, base: String) -> String {
        if self.taken.insert(base.clone()) {
            return base;
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{base}-{n}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Splits a bookmarked item's fields into one detail record per field.
fn detail_records(
    ids: &mut IdAllocator,
    base_id: &str,
    explicit_id: Option<&str>,
    parent: &str,
    fields: &DetailFields,
    out: &mut Vec<Record>,
) {
    let mut parts: Vec<(&'static str, String, RecordShape)> = Vec::new();
    if let Some(url) = &fields.url {
        let structure = if looks_like_url(url) {
            StructureType::Url
        } else {
            StructureType::Other
        };
        parts.push(("url", url.trim().to_string(), detail_shape(structure, url)));
    }
    if let Some(title) = &fields.title {
        parts.push(("title", title.clone(), detail_shape(StructureType::Title, title)));
    }
    if let Some(summary) = &fields.summary {
        parts.push((
            "summary",
            summary.clone(),
            detail_shape(StructureType::Summary, summary),
        ));
    }
    if let Some(text) = &fields.text {
        let structure = classify_free_text(text);
        parts.push(("text", text.trim().to_string(), detail_shape(structure, text)));
    }
    if let Some(file) = &fields.file {
        parts.push(("file", file.clone(), RecordShape::File));
    }

    for (i, (suffix, label, shape)) in parts.into_iter().enumerate() {
        let id = match (explicit_id, i) {
            (Some(id), 0) => id.to_string(),
            (Some(id), _) => ids.generate(format!("{id}-{suffix}")),
            (None, _) => ids.generate(format!("{base_id}-{suffix}")),
        };
        out.push(Record {
            id,
            parent: Some(parent.to_string()),
            label,
            kind_hint: shape,
        });
    }
}

fn structural_label(node: &SourceNode) -> String {
    node.label
        .clone()
        .or_else(|| node.fields.title.clone())
        .or_else(|| node.fields.url.clone())
        .unwrap_or_default()
}

fn flatten_nested(tree: &NestedTree) -> Vec<Record> {
    let mut ids = IdAllocator::for_nested(tree);
    let mut out = Vec::new();
    let root_id = match &tree.root.id {
        Some(id) => id.clone(),
        None => ids.generate(DEFAULT_CENTER_ID.to_string()),
    };
    out.push(Record {
        id: root_id.clone(),
        parent: None,
        label: tree
            .root
            .label
            .clone()
            .unwrap_or_else(|| DEFAULT_CENTER_LABEL.to_string()),
        kind_hint: RecordShape::Structural,
    });
    flatten_children(&mut ids, &tree.root.children, &root_id, "", 1, &mut out);
    out
}

fn flatten_children(
    ids: &mut IdAllocator,
    entries: &[SourceEntry],
    parent_id: &str,
    path: &str,
    depth: usize,
    out: &mut Vec<Record>,
) {
    let prefix = match depth {
        1 => "b",
        2 => "t",
        _ => "d",
    };
    for (i, entry) in entries.iter().enumerate() {
        let base = if path.is_empty() {
            format!("{prefix}{}", i + 1)
        } else {
            format!("{path}-{prefix}{}", i + 1)
        };
        match (entry, depth) {
            (SourceEntry::Text(text), 1 | 2) => out.push(Record {
                id: ids.generate(base),
                parent: Some(parent_id.to_string()),
                label: text.clone(),
                kind_hint: RecordShape::Structural,
            }),
            (SourceEntry::Node(node), 1 | 2) => {
                let id = match &node.id {
                    Some(id) => id.clone(),
                    None => ids.generate(base),
                };
                out.push(Record {
                    id: id.clone(),
                    parent: Some(parent_id.to_string()),
                    label: structural_label(node),
                    kind_hint: RecordShape::Structural,
                });
                if depth == 2 {
                    detail_records(ids, &id, None, &id, &node.fields, out);
                }
                flatten_children(ids, &node.children, &id, &id, depth + 1, out);
            }
            (SourceEntry::Text(text), _) => out.push(Record {
                id: ids.generate(base),
                parent: Some(parent_id.to_string()),
                label: text.trim().to_string(),
                kind_hint: detail_shape(classify_free_text(text), text),
            }),
            (SourceEntry::Node(node), _) => {
                let before = out.len();
                if node.fields.is_empty() {
                    out.push(Record {
                        id: match &node.id {
                            Some(id) => id.clone(),
                            None => ids.generate(base.clone()),
                        },
                        parent: Some(parent_id.to_string()),
                        label: node.label.clone().unwrap_or_default(),
                        kind_hint: RecordShape::Detail {
                            structure: StructureType::Other,
                            url: None,
                        },
                    });
                } else {
                    detail_records(ids, &base, node.id.as_deref(), parent_id, &node.fields, out);
                }
                let first_id = out[before].id.clone();
                // Anything nested below a detail is out of range; keep it so validation reports it.
                flatten_children(ids, &node.children, &first_id, &base, depth + 1, out);
            }
        }
    }
}

fn flatten_flat(tree: &FlatTree) -> Vec<Record> {
    tree.nodes
        .iter()
        .map(|n| {
            let f = &n.fields;
            let shape = if let Some(url) = &f.url {
                let structure = if looks_like_url(url) {
                    StructureType::Url
                } else {
                    StructureType::Other
                };
                detail_shape(structure, url)
            } else if let Some(title) = &f.title {
                detail_shape(StructureType::Title, title)
            } else if let Some(summary) = &f.summary {
                detail_shape(StructureType::Summary, summary)
            } else if let Some(text) = &f.text {
                detail_shape(classify_free_text(text), text)
            } else if f.file.is_some() {
                RecordShape::File
            } else {
                RecordShape::Detail {
                    structure: StructureType::Other,
                    url: None,
                }
            };
            let label = n
                .label
                .clone()
                .or_else(|| f.url.clone())
                .or_else(|| f.title.clone())
                .or_else(|| f.summary.clone())
                .or_else(|| f.text.clone())
                .or_else(|| f.file.clone())
                .unwrap_or_default();
            Record {
                id: n.id.clone(),
                parent: n.parent.clone(),
                label,
                kind_hint: shape,
            }
        })
        .collect()
}

/// Builds the mind-map graph for `tree`.
///
/// Nodes are emitted center first, then in pre-order; every non-center node gets exactly one
/// incoming edge from its parent. Kinds follow from depth: branches at 1, topics at 2, details
/// (or files) at 3.
pub fn build_graph(tree: &TreeSource) -> Result<Graph, MalformedTreeError> {
    let records = match tree {
        TreeSource::Nested(tree) => flatten_nested(tree),
        TreeSource::Flat(tree) => flatten_flat(tree),
    };
    build_from_records(records)
}

/// Like [`build_graph`], but never fails: a malformed tree yields a center-only graph and the
/// error is returned alongside as a diagnostic.
pub fn build_graph_or_center(tree: &TreeSource) -> GraphBuild {
    match build_graph(tree) {
        Ok(graph) => GraphBuild {
            graph,
            diagnostic: None,
        },
        Err(err) => {
            tracing::warn!(error = %err, "malformed mind-map tree; falling back to center only");
            let (id, label) = root_identity(tree);
            GraphBuild {
                graph: Graph::center_only(id, label),
                diagnostic: Some(err),
            }
        }
    }
}

fn root_identity(tree: &TreeSource) -> (String, String) {
    let default = || {
        (
            DEFAULT_CENTER_ID.to_string(),
            DEFAULT_CENTER_LABEL.to_string(),
        )
    };
    match tree {
        TreeSource::Nested(tree) => (
            tree.root
                .id
                .clone()
                .unwrap_or_else(|| DEFAULT_CENTER_ID.to_string()),
            tree.root
                .label
                .clone()
                .unwrap_or_else(|| DEFAULT_CENTER_LABEL.to_string()),
        ),
        TreeSource::Flat(tree) => {
            let mut roots = tree.nodes.iter().filter(|n| n.parent.is_none());
            match (roots.next(), roots.next()) {
                (Some(root), None) if !root.id.is_empty() => (
                    root.id.clone(),
                    root.label
                        .clone()
                        .unwrap_or_else(|| DEFAULT_CENTER_LABEL.to_string()),
                ),
                _ => default(),
            }
        }
    }
}

fn build_from_records(records: Vec<Record>) -> Result<Graph, MalformedTreeError> {
    let mut by_id: FxHashMap<&str, usize> = FxHashMap::default();
    let mut root: Option<usize> = None;
    for (i, r) in records.iter().enumerate() {
        if r.id.is_empty() {
            return Err(MalformedTreeError::EmptyId {
                parent_id: r.parent.clone().unwrap_or_default(),
            });
        }
        if by_id.insert(r.id.as_str(), i).is_some() {
            return Err(MalformedTreeError::DuplicateId {
                node_id: r.id.clone(),
            });
        }
        if r.parent.is_none() {
            if let Some(prev) = root {
                return Err(MalformedTreeError::MultipleRoots {
                    first: records[prev].id.clone(),
                    second: r.id.clone(),
                });
            }
            root = Some(i);
        }
    }
    let root = root.ok_or(MalformedTreeError::MissingRoot)?;

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    for (i, r) in records.iter().enumerate() {
        let Some(parent_id) = r.parent.as_deref() else {
            continue;
        };
        let Some(&p) = by_id.get(parent_id) else {
            return Err(MalformedTreeError::DanglingParent {
                node_id: r.id.clone(),
                parent_id: parent_id.to_string(),
            });
        };
        children[p].push(i);
    }

    // Visited-set DFS from the root; whatever it cannot reach hangs off a cycle.
    let mut visited = vec![false; records.len()];
    let mut order: Vec<(usize, usize)> = Vec::with_capacity(records.len());
    let mut stack = vec![(root, 0usize)];
    while let Some((i, depth)) = stack.pop() {
        if visited[i] {
            return Err(MalformedTreeError::Cycle {
                node_id: records[i].id.clone(),
            });
        }
        visited[i] = true;
        if depth > NodeKind::Detail.depth() {
            return Err(MalformedTreeError::TooDeep {
                node_id: records[i].id.clone(),
                depth,
            });
        }
        order.push((i, depth));
        stack.extend(children[i].iter().rev().map(|&c| (c, depth + 1)));
    }
    if let Some(unreached) = visited.iter().position(|v| !v) {
        return Err(MalformedTreeError::Cycle {
            node_id: cycle_member(&records, &by_id, unreached),
        });
    }

    let mut graph = Graph::center_only(
        records[root].id.clone(),
        records[root].label.clone(),
    );
    let mut graph_idx = vec![0usize; records.len()];
    let mut branch_of = vec![0u8; records.len()];
    let mut branch_position = 0usize;

    for &(i, depth) in order.iter().skip(1) {
        let r = &records[i];
        let Some(p) = r.parent.as_deref().and_then(|p| by_id.get(p).copied()) else {
            continue;
        };
        let (kind, structure_type, url) = match (depth, &r.kind_hint) {
            (1, _) => (NodeKind::Branch, None, None),
            (2, _) => (NodeKind::Topic, None, None),
            (_, RecordShape::File) => (NodeKind::File, Some(StructureType::Other), None),
            (_, RecordShape::Detail { structure, url }) => {
                (NodeKind::Detail, Some(*structure), url.clone())
            }
            (_, RecordShape::Structural) => (NodeKind::Detail, Some(StructureType::Other), None),
        };
        let branch_index = if kind == NodeKind::Branch {
            let b = branch_index_for(branch_position);
            branch_position += 1;
            b
        } else {
            branch_of[p]
        };
        branch_of[i] = branch_index;

        let parent_idx = graph_idx[p];
        let node = Node {
            id: r.id.clone(),
            kind,
            parent_id: Some(records[p].id.clone()),
            label: r.label.clone(),
            branch_index,
            structure_type,
            url,
            position: Position::ORIGIN,
            hidden: false,
            collapsed: false,
        };
        let idx = graph.push_node(node, Some(parent_idx));
        graph_idx[i] = idx;

        let Some(edge_kind) = kind.incoming_edge_kind() else {
            continue;
        };
        let source = records[p].id.clone();
        let edge = Edge {
            id: edge_id(&source, &r.id),
            source,
            target: r.id.clone(),
            kind: edge_kind,
            branch_index,
            hidden: false,
        };
        graph.push_edge(parent_idx, idx, edge);
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built mind-map graph"
    );
    Ok(graph)
}

/// Follows parent links from `start` until a node repeats; that node lies on the cycle.
fn cycle_member(records: &[Record], by_id: &FxHashMap<&str, usize>, start: usize) -> String {
    let mut seen: FxHashSet<usize> = FxHashSet::default();
    let mut cur = start;
    loop {
        if !seen.insert(cur) {
            return records[cur].id.clone();
        }
        match records[cur].parent.as_deref().and_then(|p| by_id.get(p)) {
            Some(&p) => cur = p,
            None => return records[start].id.clone(),
        }
    }
}

#[cfg(test)]
mod tests;
