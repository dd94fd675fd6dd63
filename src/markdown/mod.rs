//! Markdown to HTML rendering.
//!
//! Every content file passes through [`render_markdown`], which produces a
//! [`TrustedHtml`] fragment. The site writer injects these fragments into the
//! page verbatim, so the renderer is the trust boundary:
//!
//! - raw HTML in the source is emitted as escaped text, never as markup
//! - link and image destinations with script-capable schemes are blanked
//! - malformed markdown never fails; the output is best-effort HTML
//!
//! [`TrustedHtml`] has no public constructor. The only other producer is the
//! crate's own cover synthesis, which escapes everything it interpolates.

mod render;

use std::fmt;

use serde::Serialize;

pub use render::{render_file, render_markdown};

/// An HTML fragment that is safe to inject without further sanitization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Wrap markup produced inside this crate.
    pub(crate) fn from_trusted(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
