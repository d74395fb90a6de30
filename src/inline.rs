//! Inline `**bold**` handling shared by the renderers.

const BOLD: &str = "**";
const STRONG_OPEN: &str = "<strong>";
const STRONG_CLOSE: &str = "</strong>";

/// Remove every `**` marker.
pub fn strip_bold(text: &str) -> String {
    text.replace(BOLD, "")
}

/// Convert `**` pairs to `<strong>` tags.
///
/// Markers alternate open/close. If the converted line ends up with more
/// opening than closing tags the conversion is discarded and the line is
/// returned with all markers stripped.
pub fn bold_to_html(text: &str) -> String {
    let mut converted = String::with_capacity(text.len() + STRONG_CLOSE.len() * 2);
    for (i, part) in text.split(BOLD).enumerate() {
        if i > 0 {
            converted.push_str(if i % 2 == 1 { STRONG_OPEN } else { STRONG_CLOSE });
        }
        converted.push_str(part);
    }

    if converted.matches(STRONG_OPEN).count() != converted.matches(STRONG_CLOSE).count() {
        return strip_bold(text);
    }
    converted
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
