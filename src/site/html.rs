//! Static page synthesis.
//!
//! Emits the single `index.html` that hosts the book. Each page becomes a
//! `div.page` carrying its number; the page-flip widget picks these up on the
//! client. Page content is injected verbatim, which is only sound because it
//! is [`TrustedHtml`](crate::markdown::TrustedHtml).

use crate::book::{Book, RenderedPage};
use crate::error::Result;
use crate::util::escape_html;

use super::SiteConfig;

/// Styles for the page chrome and the rendered element vocabulary
/// (`h1`–`h3`, `p`, `ul`, `ol`, `a`, `img`).
const STYLESHEET: &str = r#"
html, body { margin: 0; padding: 0; }
#book { visibility: hidden; }
#book.ready { visibility: visible; }
.desk {
  width: 100%;
  height: 100vh;
  display: flex;
  align-items: center;
  justify-content: center;
}
.page {
  width: 100%;
  height: 100%;
  line-height: 1.5;
  font-size: 20px;
  padding: 40px;
  box-sizing: border-box;
  border-radius: 6px;
  overflow: auto;
  background: #fffef0;
  box-shadow: 2px 3px 20px black, 0 0 125px #8f5922 inset;
}
.page * { font-size: 16px; font-family: 'DellaRespira', serif; }
.page h1 { font-size: 30px; font-family: 'Legrand', serif; line-height: 1.15; margin-bottom: 10px; }
.page h2 { font-size: 24px; font-family: 'Legrand', serif; margin-bottom: 5px; }
.page h3 { font-size: 16px; margin-bottom: 5px; }
.page p, .page ul, .page ol { margin-bottom: 10px; }
.page a { text-decoration: none; color: #333; }
.page img { max-width: 100%; }
.page-content { margin: 0 auto; max-width: 800px; text-align: justify; }
.page-number { font-size: 1em; color: #666; }
.cover {
  margin: 0;
  height: 100%;
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  text-align: center;
}
.cover img { max-width: 100%; border-radius: 6px; }
.cover .cover-title { font-family: 'Legrand', serif; font-size: 60px; }
.cover .cover-subtitle { font-family: 'DellaRespira', serif; margin: 0; }
"#;

/// Synthesize the complete HTML document for a book.
///
/// The document loads the page-flip script and boots the `CodexView` wasm
/// module, which mounts the widget and reveals `#book` once the saved page is
/// showing.
pub fn synthesize_document(book: &Book, config: &SiteConfig) -> Result<String> {
    let mut doc = String::new();

    doc.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\"/>\n");
    doc.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\n",
    );
    doc.push_str(&format!(
        "  <title>{}</title>\n",
        escape_html(&config.cover.title)
    ));
    doc.push_str("  <style>");
    doc.push_str(STYLESHEET);
    doc.push_str("  </style>\n</head>\n<body>\n");

    doc.push_str(&format!(
        "<div class=\"desk\">\n<div id=\"book\" data-width=\"{}\" data-height=\"{}\" data-pages=\"{}\" data-storage-key=\"{}\">\n",
        config.page_width,
        config.page_height,
        book.total_pages(),
        escape_html(&config.storage_key)
    ));
    for page in book.pages() {
        write_page(&mut doc, page);
    }
    doc.push_str("</div>\n</div>\n");

    write_bootstrap(&mut doc, book, config)?;
    doc.push_str("</body>\n</html>\n");

    Ok(doc)
}

fn write_page(doc: &mut String, page: &RenderedPage) {
    let class = if page.number == 1 { "page page-cover" } else { "page" };
    doc.push_str(&format!(
        "<div class=\"{class}\" data-number=\"{}\">\n",
        page.number
    ));
    doc.push_str("<div class=\"page-content\">\n");
    doc.push_str(page.content.as_str());
    doc.push_str("</div>\n");
    doc.push_str(&format!("<p class=\"page-number\">{}</p>\n", page.number));
    doc.push_str("</div>\n");
}

/// Emit the widget script and the module that wires it to `CodexView`.
fn write_bootstrap(doc: &mut String, book: &Book, config: &SiteConfig) -> Result<()> {
    doc.push_str(&format!(
        "<script src=\"{}\"></script>\n",
        escape_html(&config.pageflip_script)
    ));
    doc.push_str("<script type=\"module\">\n");
    doc.push_str(&format!(
        "import init, {{ CodexView }} from {};\n",
        js_string(&config.wasm_module)?
    ));
    doc.push_str("await init();\n");
    doc.push_str("const el = document.getElementById(\"book\");\n");
    doc.push_str(&format!(
        "const flip = new St.PageFlip(el, {{ width: {}, height: {}, showCover: true }});\n",
        config.page_width, config.page_height
    ));
    doc.push_str("flip.loadFromHTML(el.querySelectorAll(\".page\"));\n");
    doc.push_str(&format!(
        "const view = new CodexView({}, flip, {});\n",
        book.total_pages(),
        js_string(&config.storage_key)?
    ));
    doc.push_str(BOOTSTRAP_TAIL);
    doc.push_str("</script>\n");
    Ok(())
}

const BOOTSTRAP_TAIL: &str = r#"view.mount();
flip.on("flip", (e) => view.onFlip(e.data));
document.addEventListener("keydown", (e) => {
  if (e.key === "ArrowRight") view.next();
  else if (e.key === "ArrowLeft") view.previous();
});
el.classList.add("ready");
"#;

/// Encode `value` as a JavaScript string literal that cannot close the
/// surrounding `<script>` element.
fn js_string(value: &str) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}
