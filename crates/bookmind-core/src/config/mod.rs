use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How collapsing a node propagates `hidden` to its descendants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CascadePolicy {
    /// A node is hidden whenever any strict ancestor is collapsed.
    #[default]
    Transitive,
    /// Only the direct children of the toggled node change; grandchildren keep their flag until
    /// their own parent is toggled.
    DirectChildren,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelMetricsConfig {
    pub min_width: f64,
    pub char_width: f64,
    pub padding: f64,
    /// Gap kept between a label's edge and the next ring.
    pub margin: f64,
    pub height: f64,
}

impl Default for LabelMetricsConfig {
    fn default() -> Self {
        Self {
            min_width: 60.0,
            char_width: 8.0,
            padding: 16.0,
            margin: 20.0,
            height: 32.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TruncateConfig {
    pub url_max_length: usize,
    pub title_max_length: usize,
    pub summary_max_length: usize,
}

impl Default for TruncateConfig {
    fn default() -> Self {
        Self {
            url_max_length: 40,
            title_max_length: 60,
            summary_max_length: 120,
        }
    }
}

/// Layout and visibility knobs. Every field has a default, so partial JSON is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MindmapConfig {
    pub branch_radius: f64,
    pub topic_distance: f64,
    pub topic_spacing: f64,
    pub detail_distance: f64,
    pub detail_spacing: f64,
    pub label: LabelMetricsConfig,
    pub truncate: TruncateConfig,
    pub cascade: CascadePolicy,
}

impl Default for MindmapConfig {
    fn default() -> Self {
        Self {
            branch_radius: 300.0,
            topic_distance: 150.0,
            topic_spacing: 40.0,
            detail_distance: 200.0,
            detail_spacing: 40.0,
            label: LabelMetricsConfig::default(),
            truncate: TruncateConfig::default(),
            cascade: CascadePolicy::default(),
        }
    }
}

impl MindmapConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Builds a config from (possibly partial) JSON, layered over the defaults.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::default().with_overrides(value)
    }

    /// Deep-merges `overrides` onto this config and validates the result.
    pub fn with_overrides(&self, overrides: &Value) -> Result<Self> {
        if !(overrides.is_object() || overrides.is_null()) {
            return Err(Error::Config {
                message: "config overrides must be a JSON object".to_string(),
            });
        }
        let mut base = serde_json::to_value(self)?;
        deep_merge_value(&mut base, overrides);
        let merged: MindmapConfig =
            serde_json::from_value(base).map_err(|e| Error::Config {
                message: e.to_string(),
            })?;
        merged.validate()?;
        Ok(merged)
    }

    /// Sets a single value addressed by a dotted path, e.g. `label.charWidth`.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) -> Result<()> {
        let mut patch = Value::Object(Map::new());
        set_dotted(&mut patch, dotted_path, value);
        *self = self.with_overrides(&patch)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let distances = [
            ("branchRadius", self.branch_radius),
            ("topicDistance", self.topic_distance),
            ("topicSpacing", self.topic_spacing),
            ("detailDistance", self.detail_distance),
            ("detailSpacing", self.detail_spacing),
            ("label.minWidth", self.label.min_width),
            ("label.charWidth", self.label.char_width),
            ("label.padding", self.label.padding),
            ("label.margin", self.label.margin),
            ("label.height", self.label.height),
        ];
        for (name, v) in distances {
            if !(v.is_finite() && v >= 0.0) {
                return Err(Error::Config {
                    message: format!("`{name}` must be a finite, non-negative number (got {v})"),
                });
            }
        }
        Ok(())
    }
}

fn set_dotted(root: &mut Value, dotted_path: &str, value: Value) {
    if !root.is_object() {
        *root = Value::Object(Map::new());
    }
    let Value::Object(root) = root else {
        return;
    };
    let mut cur: &mut Map<String, Value> = root;
    let mut segments = dotted_path.split('.').peekable();
    while let Some(seg) = segments.next() {
        if segments.peek().is_none() {
            cur.insert(seg.to_string(), value);
            return;
        }
        let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Some(next) = slot.as_object_mut() else {
            return;
        };
        cur = next;
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (_, Value::Null) => {}
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
