use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub const BLANK_URL: &str = "about:blank";

fn named_entity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)&(newline|tab|colon);").expect("valid regex"))
}

fn escaped_whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\\|%5c)((%(6e|72|74))|[nrt])").expect("valid regex"))
}

fn is_ctrl_character_like(ch: char) -> bool {
    matches!(ch,
        '\u{0000}'..='\u{001F}'
        | '\u{007F}'..='\u{009F}'
        | '\u{2000}'..='\u{200D}'
        | '\u{FEFF}'
    )
}

fn strip_ctrl_characters_like(input: &str) -> String {
    input
        .chars()
        .filter(|&ch| !is_ctrl_character_like(ch))
        .collect()
}

/// Decodes numeric character references (`&#106;`, `&#x6a;`); malformed ones are dropped.
fn decode_numeric_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("&#") {
        out.push_str(&rest[..start]);
        let body = &rest[start + 2..];
        let digits = body
            .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
            .unwrap_or(body.len());
        if digits == 0 {
            out.push_str("&#");
            rest = body;
            continue;
        }
        let code = &body[..digits];
        let value = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        if let Some(ch) = value.and_then(char::from_u32) {
            out.push(ch);
        }
        rest = body[digits..].strip_prefix(';').unwrap_or(&body[digits..]);
    }
    out.push_str(rest);
    out
}

/// Percent-decodes `input`; anything that is not a valid escape sequence or not UTF-8 afterwards
/// leaves the input unchanged.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        let pair = bytes
            .get(i + 1..i + 3)
            .filter(|h| h.iter().all(u8::is_ascii_hexdigit))
            .and_then(|h| std::str::from_utf8(h).ok())
            .and_then(|h| u8::from_str_radix(h, 16).ok());
        let Some(byte) = pair else {
            return input.to_string();
        };
        out.push(byte);
        i += 3;
    }
    String::from_utf8(out).unwrap_or_else(|_| input.to_string())
}

fn contains_numeric_entity(input: &str) -> bool {
    input.match_indices("&#").any(|(i, _)| {
        input[i + 2..]
            .chars()
            .next()
            .is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == '_')
    })
}

fn needs_another_pass(input: &str) -> bool {
    input.chars().any(is_ctrl_character_like)
        || contains_numeric_entity(input)
        || named_entity_regex().is_match(input)
        || escaped_whitespace_regex().is_match(input)
}

/// Peels off entity, percent and escape encodings until the text stops changing shape.
fn decode_link(url: &str) -> String {
    let mut decoded = percent_decode(url.trim());
    loop {
        decoded = decode_numeric_entities(&decoded);
        decoded = named_entity_regex()
            .replace_all(&decoded, |caps: &regex::Captures<'_>| {
                if caps[1].eq_ignore_ascii_case("colon") { ":" } else { "" }
            })
            .into_owned();
        decoded = strip_ctrl_characters_like(&decoded);
        decoded = escaped_whitespace_regex()
            .replace_all(&decoded, "")
            .into_owned();
        decoded = percent_decode(decoded.trim());
        if !needs_another_pass(&decoded) {
            return decoded;
        }
    }
}

fn url_scheme_like(input: &str) -> Option<&str> {
    let colon = input.find(':')?;
    let scheme = &input[..colon];
    let valid = !scheme.is_empty()
        && scheme
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'));
    valid.then_some(scheme)
}

fn is_invalid_protocol_like(scheme: &str) -> bool {
    let lower = scheme.to_ascii_lowercase();
    let trimmed = lower.trim_start_matches(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'));

    trimmed.starts_with("javascript")
        || trimmed.starts_with("data")
        || trimmed.starts_with("vbscript")
}

/// Whether free text should be treated as a link rather than prose.
pub fn looks_like_url(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        return false;
    }
    if let Some(rest) = text.strip_prefix("www.") {
        return !rest.is_empty();
    }
    match Url::parse(text) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" | "ftp" => parsed.host_str().is_some_and(|h| !h.is_empty()),
            "mailto" | "file" => true,
            _ => false,
        },
        Err(_) => false,
    }
}

/// Returns a link target that is safe to open from a click handler.
///
/// Entity, percent and backslash-escape encodings are decoded first, so obfuscated schemes such
/// as `&#106;avascript:` are caught. Script-capable schemes collapse to `about:blank`; scheme-less
/// `www.` links get `https://`; http(s) URLs are normalized through the `url` parser.
pub fn sanitize_url(url: &str) -> String {
    let cleaned = decode_link(url);
    if cleaned.is_empty() {
        return BLANK_URL.to_string();
    }

    if matches!(cleaned.as_bytes().first(), Some(b'.' | b'/' | b'#')) {
        return cleaned;
    }

    if cleaned.starts_with("www.") {
        return sanitize_url(&format!("https://{cleaned}"));
    }

    let Some(scheme) = url_scheme_like(&cleaned) else {
        return cleaned;
    };
    if is_invalid_protocol_like(scheme) {
        return BLANK_URL.to_string();
    }

    let scheme = scheme.to_ascii_lowercase();
    if scheme == "http" || scheme == "https" {
        let back_sanitized = cleaned.replace('\\', "/");
        let Ok(parsed) = Url::parse(&back_sanitized) else {
            return BLANK_URL.to_string();
        };
        return parsed.to_string();
    }

    cleaned
}
