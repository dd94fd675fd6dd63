//! Static site build.
//!
//! The build runs in three phases:
//!
//! 1. discover content files ([`collect_content_files`])
//! 2. read and render every file in parallel on a rayon pool
//! 3. once all renders have finished, assemble the book and write the site
//!
//! Renders may complete in any order; results are collected in discovery
//! order, so page order depends only on the directory walk. Any failure
//! aborts the build before a single output file is written.
//!
//! # Example
//!
//! ```no_run
//! use codex::site::{SiteConfig, build_site};
//!
//! let config = SiteConfig::default().with_content_root("codex").with_output_dir("dist");
//! let report = build_site(&config)?;
//! println!("{} pages", report.total_pages);
//! # Ok::<(), codex::Error>(())
//! ```

mod config;
mod html;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::book::{Book, assemble};
use crate::content::{ContentFile, collect_content_files};
use crate::error::{Error, Result};
use crate::markdown::{TrustedHtml, render_file};

pub use config::SiteConfig;
pub use html::synthesize_document;

/// Summary of a finished build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub total_pages: usize,
    pub files_written: Vec<PathBuf>,
}

/// Load, render and assemble the book described by `config`.
pub fn load_book(config: &SiteConfig) -> Result<Book> {
    let start = Instant::now();
    let files = collect_content_files(&config.content_root)?;
    info!(
        "found {} content files under {}",
        files.len(),
        config.content_root.display()
    );

    let rendered = render_all(files, config.jobs)?;
    let book = assemble(&config.cover, rendered);
    info!(
        "assembled {} pages in {:.2?}",
        book.total_pages(),
        start.elapsed()
    );
    Ok(book)
}

/// Render every file, preserving input order. The collect is the barrier:
/// nothing is returned until every render has finished or one has failed.
fn render_all(
    files: Vec<ContentFile>,
    jobs: Option<usize>,
) -> Result<Vec<(ContentFile, TrustedHtml)>> {
    let render = move || {
        files
            .into_par_iter()
            .map(|file| -> Result<(ContentFile, TrustedHtml)> {
                let html = render_file(&file)?;
                Ok((file, html))
            })
            .collect::<Result<Vec<_>>>()
    };

    match jobs {
        Some(threads) => {
            debug!("rendering on a dedicated pool of {threads} threads");
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(render)
        }
        None => render(),
    }
}

#[derive(Serialize)]
struct Manifest<'a> {
    title: &'a str,
    storage_key: &'a str,
    page_width: u32,
    page_height: u32,
    pages: Vec<ManifestPage<'a>>,
}

#[derive(Serialize)]
struct ManifestPage<'a> {
    number: usize,
    content: &'a TrustedHtml,
    /// Source path relative to the content root; absent for the cover.
    source: Option<String>,
}

#[derive(Serialize)]
struct Greeting {
    name: &'static str,
}

/// Serialize the page manifest consumed by client-side hosts.
pub fn manifest_json(book: &Book, config: &SiteConfig) -> Result<String> {
    let pages = book
        .pages()
        .iter()
        .map(|page| ManifestPage {
            number: page.number,
            content: &page.content,
            source: book.source_of(page.number).map(|file| {
                file.path()
                    .strip_prefix(&config.content_root)
                    .unwrap_or(file.path())
                    .to_string_lossy()
                    .into_owned()
            }),
        })
        .collect();

    let manifest = Manifest {
        title: &config.cover.title,
        storage_key: &config.storage_key,
        page_width: config.page_width,
        page_height: config.page_height,
        pages,
    };
    Ok(serde_json::to_string_pretty(&manifest)?)
}

/// Write the site for an already assembled book into `out_dir`.
///
/// Produces `index.html`, `book.json`, `api/hello.json` and a copy of every
/// file under `config.assets_dir`. All content is generated and every asset
/// read before the first file is created.
pub fn write_site(book: &Book, config: &SiteConfig, out_dir: &Path) -> Result<BuildReport> {
    let mut outputs: Vec<(PathBuf, Vec<u8>)> = vec![
        (
            PathBuf::from("index.html"),
            synthesize_document(book, config)?.into_bytes(),
        ),
        (
            PathBuf::from("book.json"),
            manifest_json(book, config)?.into_bytes(),
        ),
        (
            Path::new("api").join("hello.json"),
            serde_json::to_vec(&Greeting { name: "John Doe" })?,
        ),
    ];
    if let Some(assets) = &config.assets_dir {
        for (relative, bytes) in read_assets(assets)? {
            if outputs.iter().any(|(path, _)| *path == relative) {
                warn!(
                    "asset {} collides with a generated file, skipping",
                    relative.display()
                );
                continue;
            }
            outputs.push((relative, bytes));
        }
    }

    let mut files_written = Vec::with_capacity(outputs.len());
    for (relative, contents) in outputs {
        let path = out_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        debug!("wrote {}", path.display());
        files_written.push(path);
    }

    Ok(BuildReport {
        total_pages: book.total_pages(),
        files_written,
    })
}

/// Read every file under `dir`, keyed by its path relative to `dir`.
fn read_assets(dir: &Path) -> Result<Vec<(PathBuf, Vec<u8>)>> {
    if !dir.is_dir() {
        info!("no assets directory at {}, skipping", dir.display());
        return Ok(Vec::new());
    }

    let mut assets = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        let bytes = fs::read(entry.path()).map_err(|source| Error::ReadFile {
            path: entry.path().to_path_buf(),
            source,
        })?;
        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        debug!("copying asset {}", relative.display());
        assets.push((relative.to_path_buf(), bytes));
    }
    Ok(assets)
}

/// Load the book and write the site to `config.output_dir`.
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let book = load_book(config)?;
    let report = write_site(&book, config, &config.output_dir)?;
    info!(
        "wrote {} files to {}",
        report.files_written.len(),
        config.output_dir.display()
    );
    Ok(report)
}
