use serde::{Deserialize, Serialize};

use crate::content::ContentFile;
use crate::markdown::TrustedHtml;
use crate::util::escape_html;

/// The fixed introductory page: an image with a caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cover {
    /// Image URL as referenced from the generated page.
    pub image: String,
    pub title: String,
    pub subtitles: Vec<String>,
}

impl Default for Cover {
    fn default() -> Self {
        Self {
            image: "/cover.jpg".to_string(),
            title: "The Codex".to_string(),
            subtitles: vec![
                "Your Guide to".to_string(),
                "the Nouveaution Manor".to_string(),
            ],
        }
    }
}

impl Cover {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitles: Vec::new(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitles.push(subtitle.into());
        self
    }

    /// Synthesize the cover markup. Every interpolated value is escaped.
    pub fn to_html(&self) -> TrustedHtml {
        let mut html = String::new();
        html.push_str("<figure class=\"cover\">\n");
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" />\n",
            escape_html(&self.image),
            escape_html(&self.title)
        ));
        html.push_str("<figcaption>\n");
        html.push_str(&format!(
            "<h1 class=\"cover-title\">{}</h1>\n",
            escape_html(&self.title)
        ));
        for subtitle in &self.subtitles {
            html.push_str(&format!(
                "<p class=\"cover-subtitle\">{}</p>\n",
                escape_html(subtitle)
            ));
        }
        html.push_str("</figcaption>\n</figure>\n");
        TrustedHtml::from_trusted(html)
    }
}

/// One page of the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    pub content: TrustedHtml,
    /// 1-based; page 1 is always the cover.
    pub number: usize,
}

/// The assembled, immutable page sequence.
#[derive(Debug, Clone, Default)]
pub struct Book {
    pages: Vec<RenderedPage>,
    sources: Vec<ContentFile>,
}

impl Book {
    pub fn pages(&self) -> &[RenderedPage] {
        &self.pages
    }

    /// Source files in page order. `sources()[i]` produced page `i + 2`.
    pub fn sources(&self) -> &[ContentFile] {
        &self.sources
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Look up a page by its 1-based number.
    pub fn page(&self, number: usize) -> Option<&RenderedPage> {
        number.checked_sub(1).and_then(|i| self.pages.get(i))
    }

    /// Source file behind a page, `None` for the cover.
    pub fn source_of(&self, number: usize) -> Option<&ContentFile> {
        number.checked_sub(2).and_then(|i| self.sources.get(i))
    }
}

/// Build the page sequence: the cover at number 1, then every rendered
/// fragment in input order at `2, 3, …`.
///
/// Fragments are neither reordered, deduplicated nor inspected.
pub fn assemble(cover: &Cover, rendered: Vec<(ContentFile, TrustedHtml)>) -> Book {
    let mut pages = Vec::with_capacity(rendered.len() + 1);
    let mut sources = Vec::with_capacity(rendered.len());

    pages.push(RenderedPage {
        content: cover.to_html(),
        number: 1,
    });

    for (i, (source, content)) in rendered.into_iter().enumerate() {
        pages.push(RenderedPage {
            content,
            number: i + 2,
        });
        sources.push(source);
    }

    Book { pages, sources }
}
