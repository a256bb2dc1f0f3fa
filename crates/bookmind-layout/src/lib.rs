#![forbid(unsafe_code)]

//! Headless layout for bookmark mind maps.
//!
//! [`layout::layout`] assigns radial positions to the visible part of a
//! [`bookmind_core::Graph`]; [`MindmapSession`] ties graph, collapse state and layout together
//! and hands out [`MindmapLayout`] snapshots for a renderer.

pub mod layout;
pub mod model;
pub mod session;
pub mod text;

pub use layout::{LayoutReport, branch_angles, compute_positions, unplaceable_nodes};
pub use model::{Bounds, LayoutEdge, LayoutNode, MindmapLayout};
pub use session::MindmapSession;
pub use text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics};

use bookmind_core::ToggleError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] bookmind_core::Error),
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ToggleError> for Error {
    fn from(err: ToggleError) -> Self {
        Self::Core(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
