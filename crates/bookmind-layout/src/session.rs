//! Owns one mind map: the graph, its collapse state, the config and the text measurer.
//!
//! Every mutation goes through the session and ends with a layout pass, so the graph a
//! renderer sees through [`MindmapSession::snapshot`] is always positioned for its current
//! visibility.

use crate::layout::{LayoutReport, layout};
use crate::model::MindmapLayout;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use crate::Result;
use bookmind_core::graph::{DEFAULT_CENTER_ID, DEFAULT_CENTER_LABEL};
use bookmind_core::{
    Graph, GraphBuild, MalformedTreeError, MindmapConfig, ToggleCommand, ToggleOutcome,
    TreeSource, VisibilityController, build_graph_or_center,
};
use std::sync::Arc;

pub struct MindmapSession {
    config: MindmapConfig,
    controller: VisibilityController,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    graph: Graph,
    diagnostic: Option<MalformedTreeError>,
    last_report: LayoutReport,
}

impl std::fmt::Debug for MindmapSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MindmapSession")
            .field("config", &self.config)
            .field("nodes", &self.graph.node_count())
            .field("diagnostic", &self.diagnostic)
            .finish_non_exhaustive()
    }
}

impl Default for MindmapSession {
    fn default() -> Self {
        Self::new(MindmapConfig::default())
    }
}

impl MindmapSession {
    /// A session holding only a default center node. The text measurer follows `config.label`.
    pub fn new(config: MindmapConfig) -> Self {
        let measurer = Arc::new(DeterministicTextMeasurer::from_config(&config.label));
        let mut session = Self {
            controller: VisibilityController::new(config.cascade),
            config,
            measurer,
            graph: Graph::center_only(DEFAULT_CENTER_ID, DEFAULT_CENTER_LABEL),
            diagnostic: None,
            last_report: LayoutReport::default(),
        };
        session.relayout();
        session
    }

    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.measurer = measurer;
        self.relayout();
        self
    }

    /// Replaces the whole graph with one built from `tree`.
    ///
    /// Collapse state starts over (everything expanded). A malformed tree leaves a center-only
    /// graph; the structural error is kept and returned.
    pub fn load(&mut self, tree: &TreeSource) -> Option<&MalformedTreeError> {
        let GraphBuild { graph, diagnostic } = build_graph_or_center(tree);
        self.graph = graph;
        self.diagnostic = diagnostic;
        self.controller.reset(&mut self.graph);
        self.relayout();
        tracing::debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            malformed = self.diagnostic.is_some(),
            "loaded mind-map tree"
        );
        self.diagnostic.as_ref()
    }

    /// Parses `text` as a tree and loads it. Only unparseable JSON is an error; structural
    /// problems are reported through [`MindmapSession::diagnostic`].
    pub fn load_json(&mut self, text: &str) -> Result<Option<&MalformedTreeError>> {
        let tree = TreeSource::from_json_str(text)?;
        Ok(self.load(&tree))
    }

    pub fn toggle(&mut self, node_id: &str) -> Result<ToggleOutcome> {
        let outcome = self.controller.toggle(&mut self.graph, node_id)?;
        self.relayout();
        Ok(outcome)
    }

    pub fn handle(&mut self, command: &ToggleCommand) -> Result<ToggleOutcome> {
        let outcome = self.controller.apply(&mut self.graph, command)?;
        self.relayout();
        Ok(outcome)
    }

    pub fn set_collapsed(&mut self, node_id: &str, collapsed: bool) -> Result<ToggleOutcome> {
        let outcome = self
            .controller
            .set_collapsed(&mut self.graph, node_id, collapsed)?;
        if !outcome.changed.is_empty() {
            self.relayout();
        }
        Ok(outcome)
    }

    pub fn collapse_all(&mut self) {
        self.controller.collapse_all(&mut self.graph);
        self.relayout();
    }

    pub fn expand_all(&mut self) {
        self.controller.expand_all(&mut self.graph);
        self.relayout();
    }

    /// Runs a full layout pass over the current visibility.
    pub fn relayout(&mut self) -> &LayoutReport {
        self.last_report = layout(&mut self.graph, &self.config, self.measurer.as_ref());
        &self.last_report
    }

    pub fn snapshot(&self) -> MindmapLayout {
        MindmapLayout::from_graph(&self.graph, &self.config.truncate, self.measurer.as_ref())
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &MindmapConfig {
        &self.config
    }

    pub fn diagnostic(&self) -> Option<&MalformedTreeError> {
        self.diagnostic.as_ref()
    }

    pub fn last_report(&self) -> &LayoutReport {
        &self.last_report
    }
}
