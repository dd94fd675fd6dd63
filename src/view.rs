//! Page-flip book view.
//!
//! The view owns the reading state of one book and drives an external
//! animation primitive through the [`FlipBook`] capability. It never moves
//! its own index on request: a navigation call only asks the primitive to
//! flip, and the index changes when the primitive reports where it settled
//! via [`BookView::on_flip`]. Flips can be interrupted or clamped, so the
//! settled index is the only authoritative position.
//!
//! ```text
//!  Uninitialized ──mount()──▶ Ready(BookState)
//!                                 │  next / previous / jump_to_saved
//!                                 ▼
//!                             FlipBook ──settled──▶ on_flip ──▶ PositionStore
//! ```

use log::{debug, warn};

use crate::store::PositionStore;

/// Imperative handle on the page-flip animation primitive.
pub trait FlipBook {
    fn flip_next(&mut self);
    fn flip_prev(&mut self);
    fn flip_to(&mut self, index: usize);
    /// Show `index` immediately, without animating.
    fn turn_to(&mut self, index: usize);
}

/// What the primitive reports after a flip finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipEvent {
    /// The flip came to rest on this zero-based page index.
    Settled(usize),
    /// The primitive did not move.
    Stationary,
}

impl FlipEvent {
    /// Interpret a raw index from a host callback; negative values are the
    /// primitive's "no movement" sentinel.
    pub fn from_raw(raw: i64) -> Self {
        usize::try_from(raw).map_or(FlipEvent::Stationary, FlipEvent::Settled)
    }
}

/// Reading state of a mounted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookState {
    /// Zero-based index of the displayed page; always `< total_pages`.
    pub current_page_index: usize,
    /// Position restored from the store at mount, if it was usable.
    pub saved_index: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Not yet attached to an interactive host; renders nothing.
    Uninitialized,
    Ready(BookState),
}

pub struct BookView<F, S> {
    total_pages: usize,
    state: ViewState,
    flip: F,
    store: S,
}

impl<F: FlipBook, S: PositionStore> BookView<F, S> {
    /// Create an unmounted view over `total_pages` pages (at least the cover).
    pub fn new(total_pages: usize, flip: F, store: S) -> Self {
        Self {
            total_pages: total_pages.max(1),
            state: ViewState::Uninitialized,
            flip,
            store,
        }
    }

    /// Attach to the interactive host.
    ///
    /// Restores the saved position before the first render: the widget is
    /// turned there without animation, so the cover is never shown ahead of
    /// the jump. Only the first call has any effect.
    pub fn mount(&mut self) {
        if self.is_ready() {
            return;
        }

        let saved_index = self.store.load().filter(|&i| i < self.total_pages);
        let current_page_index = match saved_index {
            Some(i) if i != 0 => i,
            _ => 0,
        };
        debug!(
            "mounted book view: {} pages, starting at index {current_page_index}",
            self.total_pages
        );
        if current_page_index != 0 {
            self.flip.turn_to(current_page_index);
        }

        self.state = ViewState::Ready(BookState {
            current_page_index,
            saved_index,
        });
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ViewState::Ready(_))
    }

    /// The state to draw, or `None` while uninitialized.
    pub fn render(&self) -> Option<&BookState> {
        match &self.state {
            ViewState::Ready(state) => Some(state),
            ViewState::Uninitialized => None,
        }
    }

    pub fn current_page_index(&self) -> Option<usize> {
        self.render().map(|s| s.current_page_index)
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn next(&mut self) {
        let Some(state) = self.render() else {
            return;
        };
        if state.current_page_index + 1 < self.total_pages {
            self.flip.flip_next();
        }
    }

    pub fn previous(&mut self) {
        let Some(state) = self.render() else {
            return;
        };
        if state.current_page_index > 0 {
            self.flip.flip_prev();
        }
    }

    /// Animate to the position restored at mount, if there was one.
    pub fn jump_to_saved(&mut self) {
        let Some(state) = self.render() else {
            return;
        };
        if let Some(saved) = state.saved_index
            && saved != state.current_page_index
        {
            self.flip.flip_to(saved);
        }
    }

    /// Apply a settled flip reported by the primitive.
    ///
    /// Returns `true` if the displayed page changed. Stationary reports,
    /// out-of-range indices and repeats of the current page are ignored and
    /// not persisted.
    pub fn on_flip(&mut self, event: FlipEvent) -> bool {
        let total_pages = self.total_pages;
        let ViewState::Ready(state) = &mut self.state else {
            return false;
        };
        let FlipEvent::Settled(index) = event else {
            return false;
        };
        if index >= total_pages || index == state.current_page_index {
            return false;
        }

        debug!("settled on page index {index}");
        state.current_page_index = index;
        if let Err(e) = self.store.save(index) {
            warn!("failed to save reading position {index}: {e}");
        }
        true
    }

    pub fn flip(&self) -> &F {
        &self.flip
    }

    pub fn flip_mut(&mut self) -> &mut F {
        &mut self.flip
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (F, S) {
        (self.flip, self.store)
    }
}
