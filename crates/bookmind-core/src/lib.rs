#![forbid(unsafe_code)]

//! Mind-map graph model for bookmark collections (headless).
//!
//! This crate turns a "category → topic → detail" tree into an id-indexed node/edge graph and
//! owns the collapse/expand state machine over it. Positions are computed by
//! `bookmind-layout`; painting is left to the host UI.
//!
//! Design goals:
//! - deterministic, testable outputs (no randomness, no I/O)
//! - never panic on user input: malformed trees degrade to a center-only graph

pub mod config;
pub mod error;
pub mod geom;
pub mod graph;
pub mod model;
pub mod source;
pub mod theme;
pub mod truncate;
pub mod utils;
pub mod visibility;

pub use config::{CascadePolicy, MindmapConfig};
pub use error::{Error, LayoutSkipError, MalformedTreeError, Result, ToggleError};
pub use geom::Position;
pub use graph::{Graph, GraphBuild, NodeIdx, build_graph, build_graph_or_center};
pub use model::{Edge, EdgeKind, Node, NodeKind, StructureType};
pub use source::TreeSource;
pub use truncate::{display_label, truncate_label, truncate_url};
pub use visibility::{ToggleCommand, ToggleOutcome, VisibilityController};
