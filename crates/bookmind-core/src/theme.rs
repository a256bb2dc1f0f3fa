//! Fixed branch palette handed to renderers along with `branch_index`.

use crate::model::BRANCH_COLOR_COUNT;
use serde::{Deserialize, Serialize};

pub const CENTER_COLOR: &str = "#3b4252";

/// Base fill per branch slot (`branch_index` 1..=6).
pub const BRANCH_PALETTE: [&str; BRANCH_COLOR_COUNT] = [
    "#5e81ac", "#d08770", "#a3be8c", "#b48ead", "#ebcb8b", "#88c0d0",
];

/// Channels of a `#rrggbb` color, each in `0.0..=1.0`.
fn parse_hex(s: &str) -> Option<[f64; 3]> {
    let hex = s.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?].map(|c| f64::from(c) / 255.0))
}

fn to_hex(rgb: [f64; 3]) -> String {
    let [r, g, b] = rgb.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn lightness(rgb: [f64; 3]) -> f64 {
    let max = rgb.iter().copied().fold(0.0, f64::max);
    let min = rgb.iter().copied().fold(1.0, f64::min);
    (max + min) / 2.0
}

/// Lowers HSL lightness by `amount_pct` points, keeping hue and saturation.
///
/// With hue fixed, every channel sits at the same relative spot between the darkest and
/// brightest channel, so only that range needs recomputing for the new lightness.
fn darken_hex(hex: &str, amount_pct: f64) -> String {
    let Some(rgb) = parse_hex(hex) else {
        return hex.to_string();
    };
    let max = rgb.iter().copied().fold(0.0, f64::max);
    let min = rgb.iter().copied().fold(1.0, f64::min);
    let chroma = max - min;
    let span = |l: f64| 1.0 - (2.0 * l - 1.0).abs();

    let l = lightness(rgb);
    let saturation = if chroma > 0.0 { chroma / span(l) } else { 0.0 };
    let darker = (l - amount_pct / 100.0).clamp(0.0, 1.0);
    let new_chroma = span(darker) * saturation;
    to_hex(rgb.map(|c| {
        let at = if chroma > 0.0 { (c - min) / chroma } else { 0.0 };
        darker - new_chroma / 2.0 + new_chroma * at
    }))
}

fn label_color_for(hex: &str) -> &'static str {
    let Some([r, g, b]) = parse_hex(hex) else {
        return "#ffffff";
    };
    let luma = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    if luma > 0.6 { "#2e3440" } else { "#ffffff" }
}

/// Base fill for a branch slot; `0` is the center, larger values wrap modulo 6.
pub fn palette_color(branch_index: u8) -> &'static str {
    if branch_index == 0 {
        return CENTER_COLOR;
    }
    BRANCH_PALETTE[(usize::from(branch_index) - 1) % BRANCH_COLOR_COUNT]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchColors {
    pub fill: String,
    pub stroke: String,
    pub label: String,
}

/// Fill, a darker stroke and a readable label color for a branch slot.
pub fn branch_colors(branch_index: u8) -> BranchColors {
    let fill = palette_color(branch_index);
    BranchColors {
        fill: fill.to_string(),
        stroke: darken_hex(fill, 15.0),
        label: label_color_for(fill).to_string(),
    }
}
