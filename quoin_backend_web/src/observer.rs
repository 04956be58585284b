// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver`-based reveal source.
//!
//! [`ProximityObserver`] watches tile elements and reports the index of
//! each one that crosses into the viewport plus a margin, so photos start
//! loading shortly before they scroll into view. Indices come from the
//! `data-tile` attribute the presenter writes on every tile element.
//!
//! Reveals are monotonic per generation, so each element is unobserved the
//! moment it fires; the observer never reports a tile twice.

use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;

use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Configuration for a [`ProximityObserver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObserverConfig {
    /// How far outside the viewport a tile may be (in CSS pixels) and
    /// still count as near.
    pub root_margin_px: u32,
}

impl Default for ObserverConfig {
    /// A 50px margin: photos begin loading one short scroll step early.
    fn default() -> Self {
        Self { root_margin_px: 50 }
    }
}

type RevealCallback = Closure<dyn FnMut(Vec<IntersectionObserverEntry>, IntersectionObserver)>;

/// Watches tile elements and reports each one that nears the viewport.
///
/// Create with [`ProximityObserver::new`], then [`observe`](Self::observe)
/// every tile element after a regeneration. The `on_reveal` callback
/// receives the tile's filtered-list index; feed it to
/// `GalleryStore::mark_revealed` and schedule an evaluate.
///
/// Dropping the observer disconnects it.
pub struct ProximityObserver {
    observer: IntersectionObserver,
    /// Keeps the JS callback alive as long as the observer.
    _callback: RevealCallback,
}

impl core::fmt::Debug for ProximityObserver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProximityObserver").finish_non_exhaustive()
    }
}

impl ProximityObserver {
    /// Creates an observer with the given margin.
    ///
    /// # Errors
    ///
    /// Returns the browser's error when `IntersectionObserver` construction
    /// fails (e.g. a malformed root margin, which this API rules out, or a
    /// host without the feature).
    pub fn new(
        config: &ObserverConfig,
        mut on_reveal: impl FnMut(u32) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(
            move |entries: Vec<IntersectionObserverEntry>, observer: IntersectionObserver| {
                for entry in entries {
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    // Reveals never un-reveal, so the element is done.
                    observer.unobserve(&target);
                    if let Some(tile) = tile_index(&target) {
                        on_reveal(tile);
                    }
                }
            },
        ) as Box<dyn FnMut(_, _)>);

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&format!("{}px", config.root_margin_px));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    /// Starts watching a tile element.
    pub fn observe(&self, el: &Element) {
        self.observer.observe(el);
    }

    /// Stops watching a tile element.
    pub fn unobserve(&self, el: &Element) {
        self.observer.unobserve(el);
    }

    /// Stops watching everything.
    ///
    /// Call on regeneration before observing the new generation's
    /// elements; pending entries for removed elements are dropped by the
    /// browser.
    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for ProximityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Reads the tile index off an element's `data-tile` attribute.
fn tile_index(el: &Element) -> Option<u32> {
    el.get_attribute("data-tile")?.parse().ok()
}
