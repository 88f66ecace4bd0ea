//! Lazily initialised page slots.
//!
//! Each page is built on first use. Until then the slot reports
//! [`LoadState::Loading`] and callers show [`LOADING_FALLBACK`].

use crate::page::Page;
use std::sync::OnceLock;
use tracing::debug;

/// Shown while a page is still loading.
pub const LOADING_FALLBACK: &str = "Loading...";

/// State of one page slot.
#[derive(Debug, PartialEq, Eq)]
pub enum LoadState<'a, T> {
    Loading,
    Ready(&'a T),
}

impl<T> LoadState<'_, T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }
}

/// One slot per [`Page`], filled by a loader on first access.
pub struct LazyPages<T> {
    slots: [OnceLock<T>; Page::ALL.len()],
    loader: fn(Page) -> T,
}

impl<T> LazyPages<T> {
    pub fn new(loader: fn(Page) -> T) -> Self {
        Self {
            slots: std::array::from_fn(|_| OnceLock::new()),
            loader,
        }
    }

    /// Current state without triggering a load.
    pub fn state(&self, page: Page) -> LoadState<'_, T> {
        match self.slots[page.index()].get() {
            Some(value) => LoadState::Ready(value),
            None => LoadState::Loading,
        }
    }

    /// Load the page if needed. The loader runs at most once per page.
    pub fn load(&self, page: Page) -> &T {
        self.slots[page.index()].get_or_init(|| {
            debug!(%page, "loading page");
            (self.loader)(page)
        })
    }

    /// Pages loaded so far, in table order.
    pub fn loaded(&self) -> Vec<Page> {
        Page::ALL
            .into_iter()
            .filter(|page| self.slots[page.index()].get().is_some())
            .collect()
    }
}

impl<T> std::fmt::Debug for LazyPages<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyPages")
            .field("loaded", &self.loaded())
            .finish_non_exhaustive()
    }
}
