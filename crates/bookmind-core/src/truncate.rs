//! Label shortening for detail nodes.
//!
//! Everything here is total: any input (including unparseable URLs and `max_len == 0`) produces
//! a string no longer than `max_len` characters, except that a URL's hostname is kept whole when
//! it fits.

use crate::config::TruncateConfig;
use crate::model::{Node, StructureType};
use url::{ParseError, Url};

pub const ELLIPSIS: &str = "...";
pub const QUERY_MARKER: &str = "?...";

fn take_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Character-based truncation with a trailing `...`.
pub fn truncate_label(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    if max_len <= ELLIPSIS.len() {
        return take_chars(text, max_len).to_string();
    }
    let head = take_chars(text, max_len - ELLIPSIS.len()).trim_end();
    format!("{head}{ELLIPSIS}")
}

fn parse_web_url(raw: &str) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let host_part = raw.split(['/', '?', '#']).next().unwrap_or_default();
            if host_part.contains('.') && !host_part.contains(char::is_whitespace) {
                Url::parse(&format!("https://{raw}")).ok()
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Shortens a URL for display as `host/path...?...`.
///
/// The scheme is dropped. The hostname is preserved verbatim whenever it fits in `max_len`;
/// otherwise the hostname itself is cut with an ellipsis. When the path has to be cut, `...`
/// marks the cut, and a non-empty query string that no longer fits is replaced by `?...`.
/// Input that does not parse as a URL falls back to [`truncate_label`].
pub fn truncate_url(raw: &str, max_len: usize) -> String {
    let raw = raw.trim();
    if raw.chars().count() <= max_len {
        return raw.to_string();
    }

    let Some(url) = parse_web_url(raw) else {
        return truncate_label(raw, max_len);
    };
    let Some(host) = url.host_str().filter(|h| !h.is_empty()) else {
        return truncate_label(raw, max_len);
    };

    let host_len = host.chars().count();
    if host_len > max_len {
        return truncate_label(host, max_len);
    }

    let path = url.path();
    let path = if path == "/" { "" } else { path };
    let path_len = path.chars().count();
    let query = url.query().unwrap_or_default();

    let full_len = host_len + path_len + if query.is_empty() { 0 } else { 1 + query.chars().count() };
    if full_len <= max_len {
        return match query {
            "" => format!("{host}{path}"),
            q => format!("{host}{path}?{q}"),
        };
    }

    let marker = if query.is_empty() { "" } else { QUERY_MARKER };
    let marker_len = marker.len();

    if host_len + path_len + marker_len <= max_len {
        return format!("{host}{path}{marker}");
    }
    if host_len + ELLIPSIS.len() + marker_len <= max_len {
        let budget = max_len - host_len - ELLIPSIS.len() - marker_len;
        let head = take_chars(path, budget);
        return format!("{host}{head}{ELLIPSIS}{marker}");
    }
    if host_len + ELLIPSIS.len() <= max_len {
        return format!("{host}{ELLIPSIS}");
    }
    host.to_string()
}

/// Text a renderer should paint for `node`, honoring the per-structure length limits.
pub fn display_label(node: &Node, config: &TruncateConfig) -> String {
    match node.structure_type {
        Some(StructureType::Url) => truncate_url(&node.label, config.url_max_length),
        Some(StructureType::Title) => truncate_label(&node.label, config.title_max_length),
        Some(StructureType::Summary) => truncate_label(&node.label, config.summary_max_length),
        Some(StructureType::Other) | None => node.label.clone(),
    }
}
