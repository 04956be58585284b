// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for host integrations.
//!
//! Quoin splits host-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Width source** — Measures the gallery container and feeds
//!   [`GalleryStore::set_container_width`] on resize. This is
//!   backend-specific and not abstracted by a trait because measurement
//!   and resize subscription differ fundamentally across hosts.
//!
//! - **Proximity source** — Watches which tiles are near the viewport and
//!   feeds [`GalleryStore::mark_revealed`] (e.g. `IntersectionObserver`
//!   with a margin on the web). Marks are fire-and-forget; the store
//!   dedupes and surfaces them on the next evaluate.
//!
//! - **Presenter** — Implements the [`Presenter`] trait to apply gallery
//!   changes to a host-native tile tree (e.g. absolutely positioned DOM
//!   elements).
//!
//! - **Fullscreen driver** — Executes
//!   [`FullscreenRequest`](crate::lightbox::FullscreenRequest)s against the
//!   host and reports each
//!   [`FullscreenOutcome`](crate::lightbox::FullscreenOutcome) back to the
//!   [`Lightbox`](crate::lightbox::Lightbox).
//!
//! - **Key translation** — Maps host key events onto
//!   [`Key`](crate::lightbox::Key) values for
//!   [`Lightbox::handle_key`](crate::lightbox::Lightbox::handle_key).
//!
//! # Crate boundaries
//!
//! `quoin_core` owns the catalog, layout, reveal tracking, lightbox, and
//! this contract module. Backend crates depend on `quoin_core` and provide
//! host glue. Application code depends on both and wires them together in
//! an event loop.
//!
//! [`GalleryStore::set_container_width`]: crate::gallery::GalleryStore::set_container_width
//! [`GalleryStore::mark_revealed`]: crate::gallery::GalleryStore::mark_revealed

use crate::gallery::{GalleryChanges, GalleryStore};

/// Applies evaluated gallery changes to a host-native tile tree.
///
/// Both the DOM-based presenter and test doubles implement this trait,
/// enabling generic event loops and deterministic assertions.
///
/// # Event loop pseudocode
///
/// A typical burst handler wires the pieces together like this:
///
/// ```rust,ignore
/// fn on_burst(store: &mut GalleryStore, presenter: &mut impl Presenter) {
///     // Mutate: resize observations, filter clicks, proximity marks
///     store.set_container_width(measure());
///     store.mark_revealed(tile);
///
///     // Evaluate: rebuild the filtered list and layout as needed
///     let changes = store.evaluate();
///
///     // Present: apply incremental changes to the native tiles
///     presenter.apply(store, &changes);
/// }
/// ```
pub trait Presenter {
    /// Applies the given [`GalleryChanges`] to the backing tile tree,
    /// reading current geometry and photo data from `store` as needed.
    fn apply(&mut self, store: &GalleryStore, changes: &GalleryChanges);
}
