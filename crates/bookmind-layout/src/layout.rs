//! Radial mind-map layout.
//!
//! Branches sit on a ring around the center node at preferred angles; topics are stacked
//! vertically beside their branch, on the branch's side of the diagram; details extend further
//! out beside their topic, ordered by structure type. Only visible nodes are placed. Hidden
//! nodes keep whatever position they had, so collapsing and re-expanding a subtree puts it back
//! exactly where it was.
//!
//! The computation is a pure function of the graph structure, the `hidden` flags, the config
//! and the text measurer: running it twice yields bit-identical positions.

use crate::text::TextMeasurer;
use bookmind_core::geom::{self, Angle};
use bookmind_core::graph::{Graph, NodeIdx};
use bookmind_core::{LayoutSkipError, MindmapConfig, Position, StructureType, display_label};
use indexmap::IndexMap;
use std::f64::consts::{FRAC_PI_4, PI, TAU};

const BRANCH_ANGLES_1: [f64; 1] = [0.0];
const BRANCH_ANGLES_2: [f64; 2] = [0.0, PI];
const BRANCH_ANGLES_3: [f64; 3] = [0.0, TAU / 3.0, 2.0 * TAU / 3.0];
// Diagonals: nothing on the vertical axis, where labels would collide with the center.
const BRANCH_ANGLES_4: [f64; 4] = [FRAC_PI_4, 3.0 * FRAC_PI_4, 5.0 * FRAC_PI_4, 7.0 * FRAC_PI_4];
// 0°, 72°, 144°, 216°, 288°: the nearest slots to the vertical axis are 18° away from it.
const BRANCH_ANGLES_5: [f64; 5] = [
    0.0,
    TAU / 5.0,
    2.0 * TAU / 5.0,
    3.0 * TAU / 5.0,
    4.0 * TAU / 5.0,
];
const BRANCH_ANGLES_6: [f64; 6] = [
    0.0,
    PI / 3.0,
    2.0 * PI / 3.0,
    PI,
    4.0 * PI / 3.0,
    5.0 * PI / 3.0,
];

/// Preferred branch angles (radians) for 1..=6 visible branches.
pub const PREFERRED_BRANCH_ANGLES: [&[f64]; 6] = [
    &BRANCH_ANGLES_1,
    &BRANCH_ANGLES_2,
    &BRANCH_ANGLES_3,
    &BRANCH_ANGLES_4,
    &BRANCH_ANGLES_5,
    &BRANCH_ANGLES_6,
];

/// Angles for `count` branches: the preferred table up to six, uniform `2π·i/count` beyond.
pub fn branch_angles(count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1..=6 => PREFERRED_BRANCH_ANGLES[count - 1].to_vec(),
        n => (0..n).map(|i| TAU * i as f64 / n as f64).collect(),
    }
}

/// What a layout pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutReport {
    /// Number of nodes that received a fresh position.
    pub placed: usize,
    /// Nodes left at their last known position because their parent could not be resolved.
    pub skipped: Vec<LayoutSkipError>,
}

/// Which side of the center a branch's subtree grows towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Right,
    Left,
}

impl Side {
    fn of(x: f64) -> Self {
        if x >= 0.0 { Side::Right } else { Side::Left }
    }

    fn sign(self) -> f64 {
        match self {
            Side::Right => 1.0,
            Side::Left => -1.0,
        }
    }
}

struct Placer<'a> {
    graph: &'a Graph,
    config: &'a MindmapConfig,
    measurer: &'a dyn TextMeasurer,
    out: Vec<Option<Position>>,
}

impl Placer<'_> {
    /// Width of the label as it will be painted (after truncation).
    fn width(&self, idx: NodeIdx) -> f64 {
        let shown = display_label(self.graph.node_at(idx), &self.config.truncate);
        self.measurer.measure(&shown).width
    }

    /// Distance from a node to the ring of its children: at least the configured distance,
    /// and never less than half the node's label plus the margin.
    fn ring_distance(&self, idx: NodeIdx, configured: f64) -> f64 {
        configured.max(self.width(idx) / 2.0 + self.config.label.margin)
    }

    fn visible_children(&self, idx: NodeIdx) -> Vec<NodeIdx> {
        self.graph
            .children_of(idx)
            .iter()
            .copied()
            .filter(|&c| !self.graph.node_at(c).hidden)
            .collect()
    }

    fn place(&mut self, idx: NodeIdx, pos: Position) {
        self.out[idx] = Some(pos);
    }

    fn place_center(&mut self) {
        let center = self.graph.center_idx();
        self.place(center, Position::ORIGIN);

        let branches = self.visible_children(center);
        let radius = self.ring_distance(center, self.config.branch_radius);
        let angles = branch_angles(branches.len());
        for (&branch, &angle) in branches.iter().zip(angles.iter()) {
            let p = geom::polar(Angle::radians(angle), radius);
            let pos = Position::from(p);
            self.place(branch, pos);
            self.place_topics(branch, pos);
        }
    }

    /// Vertical extent `(above, below)` that a topic's visible details occupy around it.
    fn detail_extent(&self, topic: NodeIdx) -> (f64, f64) {
        let offsets = self.detail_offsets(topic);
        let above = offsets.iter().map(|(_, dy)| -dy).fold(0.0_f64, f64::max);
        let below = offsets.iter().map(|(_, dy)| *dy).fold(0.0_f64, f64::max);
        (above, below)
    }

    fn place_topics(&mut self, branch: NodeIdx, branch_pos: Position) {
        let topics = self.visible_children(branch);
        if topics.is_empty() {
            return;
        }
        let side = Side::of(branch_pos.x);
        let dx = side.sign() * self.ring_distance(branch, self.config.topic_distance);
        let spacing = self.config.topic_spacing;

        // Stack topic bands top to bottom. Without details every step is `topic_spacing`, which
        // makes the offsets `(i - (n - 1) / 2) * topic_spacing`; details widen the step so that
        // neighbouring detail columns never overlap.
        let extents: Vec<(f64, f64)> = topics.iter().map(|&t| self.detail_extent(t)).collect();
        let mut ys = Vec::with_capacity(topics.len());
        let mut y = 0.0;
        for i in 0..topics.len() {
            if i > 0 {
                let needed = extents[i - 1].1 + extents[i].0 + self.config.detail_spacing;
                let has_details = extents[i - 1] != (0.0, 0.0) || extents[i] != (0.0, 0.0);
                y += if has_details { spacing.max(needed) } else { spacing };
            }
            ys.push(y);
        }
        let shift = (ys[0] + ys[ys.len() - 1]) / 2.0;

        for (&topic, &ty) in topics.iter().zip(ys.iter()) {
            let pos = Position::from(branch_pos.to_point() + geom::vector(dx, ty - shift));
            self.place(topic, pos);
            self.place_details(topic, pos, side);
        }
    }

    /// Visible details of `topic` with their vertical offsets, in placement order.
    ///
    /// Each structure type owns a slot: url at `-spacing`, title at `0`, summary at `+spacing`,
    /// other at `+2·spacing`. Several details of the same type continue downwards one spacing
    /// apart, pushing later slots down if needed.
    fn detail_offsets(&self, topic: NodeIdx) -> Vec<(NodeIdx, f64)> {
        let mut details = self.visible_children(topic);
        // Stable: insertion order breaks ties within a rank.
        details.sort_by_key(|&d| detail_rank(self.graph.node_at(d).structure_type));

        let spacing = self.config.detail_spacing;
        let mut out = Vec::with_capacity(details.len());
        let mut prev: Option<f64> = None;
        for d in details {
            let rank = detail_rank(self.graph.node_at(d).structure_type);
            let slot = (rank as f64 - 1.0) * spacing;
            let dy = match prev {
                Some(p) => slot.max(p + spacing),
                None => slot,
            };
            prev = Some(dy);
            out.push((d, dy));
        }
        out
    }

    fn place_details(&mut self, topic: NodeIdx, topic_pos: Position, side: Side) {
        let offsets = self.detail_offsets(topic);
        if offsets.is_empty() {
            return;
        }
        let dx = side.sign() * self.ring_distance(topic, self.config.detail_distance);
        for (detail, dy) in offsets {
            let pos = topic_pos.to_point() + geom::vector(dx, dy);
            self.place(detail, Position::from(pos));
        }
    }
}

fn detail_rank(structure: Option<StructureType>) -> usize {
    structure.unwrap_or(StructureType::Other).rank()
}

/// Non-center nodes whose parent is not in the graph. Such nodes only appear in graphs put
/// together with [`Graph::assemble`]; a validated build never produces them.
pub fn unplaceable_nodes(graph: &Graph) -> Vec<LayoutSkipError> {
    let center = graph.center_idx();
    (0..graph.node_count())
        .filter(|&i| i != center && graph.parent_of(i).is_none())
        .map(|i| {
            let node = graph.node_at(i);
            LayoutSkipError {
                node_id: node.id.clone(),
                parent_id: node.parent_id.clone().unwrap_or_default(),
            }
        })
        .collect()
}

/// Computes fresh positions for every visible node reachable from the center.
///
/// Returns the new positions keyed by node id, in graph order. Nodes absent from the map (hidden
/// ones, and anything not reachable from the center) keep their previous position.
pub fn compute_positions(
    graph: &Graph,
    config: &MindmapConfig,
    measurer: &dyn TextMeasurer,
) -> IndexMap<String, Position> {
    let mut placer = Placer {
        graph,
        config,
        measurer,
        out: vec![None; graph.node_count()],
    };
    placer.place_center();

    placer
        .out
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.map(|p| (graph.node_at(i).id.clone(), p)))
        .collect()
}

/// Lays out `graph` in place. Structural fields and visibility flags are never touched.
pub fn layout(
    graph: &mut Graph,
    config: &MindmapConfig,
    measurer: &dyn TextMeasurer,
) -> LayoutReport {
    let positions = compute_positions(graph, config, measurer);
    let skipped = unplaceable_nodes(graph);
    for err in &skipped {
        tracing::warn!(error = %err, "leaving node at its last known position");
    }
    for (id, pos) in &positions {
        if let Some(idx) = graph.index_of(id) {
            graph.set_position(idx, *pos);
        }
    }
    tracing::debug!(
        placed = positions.len(),
        skipped = skipped.len(),
        "mind-map layout pass"
    );
    LayoutReport {
        placed: positions.len(),
        skipped,
    }
}
