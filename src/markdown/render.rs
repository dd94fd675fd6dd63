//! CommonMark rendering with a sanitizing event filter.

use std::path::Path;

use log::debug;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

use super::TrustedHtml;
use crate::error::{Error, Result};
use crate::util::decode_text;

/// URL schemes that can execute script when followed or loaded.
const UNSAFE_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Render markdown text to an HTML fragment.
///
/// # Examples
///
/// ```
/// use codex::markdown::render_markdown;
///
/// let html = render_markdown("# Title\n\nBody text.");
/// assert_eq!(html.as_str(), "<h1>Title</h1>\n<p>Body text.</p>\n");
/// ```
pub fn render_markdown(text: &str) -> TrustedHtml {
    let parser = Parser::new_ext(text, Options::empty()).map(sanitize_event);

    let mut out = String::with_capacity(text.len() + text.len() / 2);
    html::push_html(&mut out, parser);
    TrustedHtml::from_trusted(out)
}

/// Read a content file and render it.
///
/// Only an unreadable file is an error; undecodable bytes fall back to
/// Windows-1252 and malformed markdown renders best-effort.
pub fn render_file(path: impl AsRef<Path>) -> Result<TrustedHtml> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let html = render_markdown(&decode_text(&bytes));
    debug!(
        "rendered {} ({} bytes -> {} bytes)",
        path.display(),
        bytes.len(),
        html.as_str().len()
    );
    Ok(html)
}

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        // Text events are escaped by the HTML writer.
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_unsafe_url(&url) {
        CowStr::Borrowed("")
    } else {
        url
    }
}

/// Check a destination against [`UNSAFE_SCHEMES`].
///
/// Browsers ignore ASCII whitespace and control characters inside a scheme,
/// so those are dropped before comparing.
fn is_unsafe_url(url: &str) -> bool {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();

    UNSAFE_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
}
