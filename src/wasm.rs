//! WASM bindings for the in-browser book view.
//!
//! The page markup comes from the static build; this module exposes the view
//! state machine so the host script can wire it to a page-flip widget. The
//! generated `index.html` does this:
//!
//! ```js
//! const flip = new PageFlip(el, { width, height, showCover: true });
//! flip.loadFromHTML(document.querySelectorAll(".page"));
//! const view = new CodexView(pages, flip, "codex.page");
//! view.mount(); // turns the widget to the saved page
//! flip.on("flip", (e) => view.onFlip(e.data));
//! ```
//!
//! `jumpToSaved` returns to the restored page after browsing away from it.

use wasm_bindgen::prelude::*;

use crate::store::LocalStorageStore;
use crate::view::{BookView, FlipBook, FlipEvent};

#[wasm_bindgen]
extern "C" {
    /// A page-flip widget instance.
    pub type PageFlip;

    #[wasm_bindgen(method, js_name = flipNext)]
    fn flip_next(this: &PageFlip);

    #[wasm_bindgen(method, js_name = flipPrev)]
    fn flip_prev(this: &PageFlip);

    #[wasm_bindgen(method, js_name = flip)]
    fn flip(this: &PageFlip, page: u32);

    #[wasm_bindgen(method, js_name = turnToPage)]
    fn turn_to_page(this: &PageFlip, page: u32);
}

struct JsFlipBook(PageFlip);

impl FlipBook for JsFlipBook {
    fn flip_next(&mut self) {
        self.0.flip_next();
    }

    fn flip_prev(&mut self) {
        self.0.flip_prev();
    }

    fn flip_to(&mut self, index: usize) {
        self.0.flip(u32::try_from(index).unwrap_or(u32::MAX));
    }

    fn turn_to(&mut self, index: usize) {
        self.0.turn_to_page(u32::try_from(index).unwrap_or(u32::MAX));
    }
}

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Book view backed by a page-flip widget and `window.localStorage`.
#[wasm_bindgen]
pub struct CodexView {
    inner: BookView<JsFlipBook, LocalStorageStore>,
}

#[wasm_bindgen]
impl CodexView {
    #[wasm_bindgen(constructor)]
    pub fn new(total_pages: u32, flip: PageFlip, storage_key: String) -> CodexView {
        CodexView {
            inner: BookView::new(
                total_pages as usize,
                JsFlipBook(flip),
                LocalStorageStore::new(storage_key),
            ),
        }
    }

    /// Call once the widget is attached to the document.
    pub fn mount(&mut self) {
        self.inner.mount();
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    pub fn next(&mut self) {
        self.inner.next();
    }

    pub fn previous(&mut self) {
        self.inner.previous();
    }

    #[wasm_bindgen(js_name = jumpToSaved)]
    pub fn jump_to_saved(&mut self) {
        self.inner.jump_to_saved();
    }

    /// Forward the widget's settled page index. Negative means no movement.
    #[wasm_bindgen(js_name = onFlip)]
    pub fn on_flip(&mut self, index: i32) -> bool {
        self.inner.on_flip(FlipEvent::from_raw(i64::from(index)))
    }

    /// Current page index, `undefined` before `mount`.
    #[wasm_bindgen(js_name = currentPage)]
    pub fn current_page(&self) -> Option<u32> {
        self.inner
            .current_page_index()
            .and_then(|i| u32::try_from(i).ok())
    }
}
