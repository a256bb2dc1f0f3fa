use bookmind_core::config::LabelMetricsConfig;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Estimates the on-screen box of a node label.
pub trait TextMeasurer {
    fn measure(&self, text: &str) -> TextMetrics;
}

/// Linear width heuristic: `max(min_width, columns * char_width + padding)`.
///
/// Columns are counted with `unicode-width`, so wide (e.g. CJK) glyphs count double. Multi-line
/// labels (`\n` or `<br>`) are sized by their widest line.
#[derive(Debug, Clone, PartialEq)]
pub struct DeterministicTextMeasurer {
    pub min_width: f64,
    pub char_width: f64,
    pub padding: f64,
    pub line_height: f64,
}

impl Default for DeterministicTextMeasurer {
    fn default() -> Self {
        Self::from_config(&LabelMetricsConfig::default())
    }
}

impl DeterministicTextMeasurer {
    pub fn from_config(cfg: &LabelMetricsConfig) -> Self {
        Self {
            min_width: cfg.min_width,
            char_width: cfg.char_width,
            padding: cfg.padding,
            line_height: cfg.height,
        }
    }

    pub fn normalized_text_lines(text: &str) -> Vec<String> {
        let t = text
            .replace("<br/>", "\n")
            .replace("<br />", "\n")
            .replace("<br>", "\n");
        t.split('\n').map(|s| s.to_string()).collect()
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str) -> TextMetrics {
        let lines = Self::normalized_text_lines(text);
        let columns = lines
            .iter()
            .map(|line| UnicodeWidthStr::width(line.as_str()))
            .max()
            .unwrap_or(0);

        let width = (columns as f64 * self.char_width + self.padding).max(self.min_width);
        let height = lines.len().max(1) as f64 * self.line_height;
        TextMetrics {
            width,
            height,
            line_count: lines.len().max(1),
        }
    }
}
