//! Input contract: the category → topic → detail tree produced by the summarization pipeline.
//!
//! Two JSON shapes are accepted. The nested shape mirrors the tree directly:
//!
//! ```json
//! { "root": { "label": "Reading list", "children": [
//!     { "label": "Rust", "children": [
//!         { "label": "Serde", "url": "https://serde.rs", "summary": "Serialization framework" }
//!     ] }
//! ] } }
//! ```
//!
//! The flat shape lists records with explicit parent ids:
//!
//! ```json
//! { "nodes": [
//!     { "id": "root", "label": "Reading list" },
//!     { "id": "rust", "parent": "root", "label": "Rust" }
//! ] }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeSource {
    Nested(NestedTree),
    Flat(FlatTree),
}

impl TreeSource {
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedTree {
    pub root: SourceNode,
}

/// A child entry: either a bare string or a full node.
///
/// At detail depth a bare string is classified by shape (a link or free text); above that depth
/// it is simply the label of a branch or topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceEntry {
    Text(String),
    Node(SourceNode),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SourceEntry>,
    #[serde(flatten)]
    pub fields: DetailFields,
}

/// Structured content carried by a bookmarked item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Free text of unknown shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Attached file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl DetailFields {
    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.title.is_none()
            && self.summary.is_none()
            && self.text.is_none()
            && self.file.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatTree {
    pub nodes: Vec<FlatNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatNode {
    pub id: String,
    #[serde(default, alias = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub fields: DetailFields,
}
