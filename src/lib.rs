//! # codex
//!
//! Turns a directory of markdown files into a page-flip book website.
//!
//! ## Pipeline
//!
//! - [`content`]: walk the content root, top-level files before subdirectories
//! - [`markdown`]: render each file to a sanitized [`TrustedHtml`] fragment
//! - [`book`]: assemble the pages behind a fixed cover page
//! - [`site`]: run the pipeline in parallel and write the static site
//!
//! At runtime the [`view`] state machine tracks the displayed page, drives
//! the page-flip widget through [`FlipBook`], and persists the reading
//! position through a [`PositionStore`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use codex::site::{SiteConfig, build_site};
//!
//! let config = SiteConfig::default().with_content_root("./codex");
//! build_site(&config)?;
//! # Ok::<(), codex::Error>(())
//! ```
//!
//! ## Driving the view
//!
//! ```
//! use codex::{BookView, FlipBook, FlipEvent, MemoryStore};
//!
//! struct Widget;
//! impl FlipBook for Widget {
//!     fn flip_next(&mut self) {}
//!     fn flip_prev(&mut self) {}
//!     fn flip_to(&mut self, _index: usize) {}
//!     fn turn_to(&mut self, _index: usize) {}
//! }
//!
//! let mut view = BookView::new(3, Widget, MemoryStore::new());
//! assert!(view.render().is_none());
//!
//! view.mount();
//! view.next();
//! view.on_flip(FlipEvent::Settled(1));
//! assert_eq!(view.current_page_index(), Some(1));
//! ```

pub mod book;
pub mod content;
pub mod error;
pub mod markdown;
pub mod site;
pub mod store;
pub(crate) mod util;
pub mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use book::{Book, Cover, RenderedPage, assemble};
pub use content::{ContentFile, collect_content_files};
pub use error::{Error, Result};
pub use markdown::{TrustedHtml, render_file, render_markdown};
pub use store::{FileStore, MemoryStore, PositionStore};
pub use view::{BookState, BookView, FlipBook, FlipEvent, ViewState};
