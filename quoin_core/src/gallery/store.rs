// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gallery storage: inputs, derived layout, and reveal bookkeeping.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use crate::dirty;
use crate::layout::{JustifiedLayout, LayoutParams, Row, Tile};
use crate::photo::{Category, Photo};

/// Owns the photo catalog and every piece of state derived from it.
///
/// Mutations only record dirtiness; nothing recomputes until
/// [`evaluate`](Self::evaluate). Tile indices handed out by this store (in
/// [`Tile::index`], reveal marks, and [`GalleryChanges::revealed`]) are
/// positions in the current filtered list and are only meaningful for the
/// generation that produced them.
///
/// [`GalleryChanges::revealed`]: super::GalleryChanges::revealed
#[derive(Debug)]
pub struct GalleryStore {
    // -- Inputs (set by callers) --
    pub(crate) photos: Vec<Photo>,
    pub(crate) filter: Option<Category>,
    pub(crate) container_width: f64,
    pub(crate) params: LayoutParams,

    // -- Derived (written by evaluate) --
    pub(crate) filtered: Vec<u32>,
    pub(crate) layout: JustifiedLayout,
    pub(crate) revealed: Vec<bool>,
    pub(crate) generation: u64,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
    pub(crate) catalog_dirty: bool,
    pub(crate) geometry_dirty: bool,
}

impl Default for GalleryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryStore {
    /// Creates an empty gallery store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            photos: Vec::new(),
            filter: None,
            container_width: 0.0,
            params: LayoutParams::default(),
            filtered: Vec::new(),
            layout: JustifiedLayout::default(),
            revealed: Vec::new(),
            generation: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            catalog_dirty: true,
            geometry_dirty: true,
        }
    }

    // -- Input API (records dirtiness, recompute happens in evaluate) --

    /// Replaces the photo catalog.
    ///
    /// Always regenerates: the next [`evaluate`](Self::evaluate) rebuilds the
    /// filtered list, bumps the generation, and resets all reveal state.
    pub fn set_photos(&mut self, photos: Vec<Photo>) {
        self.photos = photos;
        self.catalog_dirty = true;
    }

    /// Sets the category filter; `None` shows the whole catalog.
    ///
    /// Setting the filter it already has is a no-op, so reveal state is not
    /// reset spuriously.
    pub fn set_filter(&mut self, filter: Option<Category>) {
        if self.filter == filter {
            return;
        }
        self.filter = filter;
        self.catalog_dirty = true;
    }

    /// Sets the measured container width.
    ///
    /// An unchanged width is a no-op. A changed width re-lays-out the same
    /// filtered list; tile identities and reveal state survive.
    pub fn set_container_width(&mut self, width: f64) {
        if self.container_width == width {
            return;
        }
        self.container_width = width;
        self.geometry_dirty = true;
    }

    /// Sets the layout parameters. An unchanged value is a no-op.
    pub fn set_params(&mut self, params: LayoutParams) {
        if self.params == params {
            return;
        }
        self.params = params;
        self.geometry_dirty = true;
    }

    /// Records that a tile entered the host's proximity window.
    ///
    /// This is the entry point for intersection-observer callbacks: it is
    /// idempotent, cheap, and safe to call with indices from a superseded
    /// generation (out-of-range marks are dropped, and stale marks are
    /// discarded when the list regenerates). Reveals surface in the next
    /// [`evaluate`](Self::evaluate).
    pub fn mark_revealed(&mut self, tile: u32) {
        if (tile as usize) < self.filtered.len() {
            self.dirty.mark(tile, dirty::REVEAL);
        }
    }

    // -- Read API --

    /// Returns the full photo catalog.
    #[must_use]
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Returns the current category filter.
    #[must_use]
    pub fn filter(&self) -> Option<&Category> {
        self.filter.as_ref()
    }

    /// Returns the current container width.
    #[must_use]
    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    /// Returns the current layout parameters.
    #[must_use]
    pub fn params(&self) -> LayoutParams {
        self.params
    }

    /// Returns the number of photos in the current filtered list.
    ///
    /// This is the length lightbox navigation should wrap over.
    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Returns the current layout in full.
    #[must_use]
    pub fn layout(&self) -> &JustifiedLayout {
        &self.layout
    }

    /// Returns the tiles of the current layout, in reading order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.layout.tiles
    }

    /// Returns the rows of the current layout, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.layout.rows
    }

    /// Returns the height of the current layout.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.layout.total_height
    }

    /// Returns the generation of the current filtered list.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns whether `tile` has been revealed in this generation.
    ///
    /// Out-of-range indices read as not revealed.
    #[must_use]
    pub fn is_revealed(&self, tile: u32) -> bool {
        self.revealed.get(tile as usize).copied().unwrap_or(false)
    }

    /// Returns the photo behind a tile of the current generation.
    #[must_use]
    pub fn photo_for_tile(&self, tile: u32) -> Option<&Photo> {
        let catalog_index = *self.filtered.get(tile as usize)?;
        self.photos.get(catalog_index as usize)
    }

    /// Returns the distinct categories present in the catalog, ordered by
    /// menu rank (curated picks first, unknown labels last).
    #[must_use]
    pub fn menu_categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::new();
        for photo in &self.photos {
            if let Some(category) = &photo.category
                && !categories.contains(category)
            {
                categories.push(category.clone());
            }
        }
        categories.sort_by_key(Category::menu_rank);
        categories
    }
}
