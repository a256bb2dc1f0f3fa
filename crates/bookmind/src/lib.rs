#![forbid(unsafe_code)]

//! `bookmind` turns a "category → topic → detail" bookmark tree into a radial, collapsible
//! mind map. It is headless: it computes nodes, edges, positions and visibility, and leaves
//! painting to the host UI.
//!
//! # Features
//!
//! - `layout`: enable radial layout and the [`layout::MindmapSession`] orchestrator

pub use bookmind_core::*;

#[cfg(feature = "layout")]
pub mod layout {
    pub use bookmind_layout::layout::{LayoutReport, branch_angles, compute_positions};
    pub use bookmind_layout::model::{Bounds, LayoutEdge, LayoutNode, MindmapLayout};
    pub use bookmind_layout::text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics};
    pub use bookmind_layout::{Error as LayoutError, MindmapSession, layout::layout};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Tree(#[from] bookmind_core::Error),
        #[error(transparent)]
        Layout(#[from] LayoutError),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Builds, lays out and snapshots `tree` in one go, everything expanded.
    ///
    /// A malformed tree still yields a snapshot (center only); use [`MindmapSession`] directly
    /// when the structural diagnostic matters.
    pub fn layout_tree(
        tree: &bookmind_core::TreeSource,
        config: bookmind_core::MindmapConfig,
    ) -> MindmapLayout {
        let mut session = MindmapSession::new(config);
        session.load(tree);
        session.snapshot()
    }

    /// Like [`layout_tree`], parsing the tree from JSON first.
    pub fn layout_json(text: &str, config: bookmind_core::MindmapConfig) -> Result<MindmapLayout> {
        let tree = bookmind_core::TreeSource::from_json_str(text)?;
        Ok(layout_tree(&tree, config))
    }
}
