//! Text helpers shared by the renderer and the site writer.

use std::borrow::Cow;

/// Decode file bytes to a string.
///
/// Tries UTF-8 first (a BOM is stripped by encoding_rs), then falls back to
/// Windows-1252, which maps every byte. Content files are never rejected for
/// their encoding, so a stray binary file in the content root still renders.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

// ============================================================================
// HTML Escaping
// ============================================================================

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
