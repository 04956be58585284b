// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gallery evaluation and change tracking.
//!
//! Evaluation runs in three passes:
//!
//! 1. **Regeneration** — If the catalog or filter changed, rebuild the
//!    filtered list, bump the generation, reset reveal state, and discard
//!    reveal marks queued against the superseded generation.
//! 2. **Layout** — If the filtered list, container width, or layout
//!    parameters changed, recompute the justified grid.
//! 3. **REVEAL** — Drain marked tile indices and surface the ones revealed
//!    for the first time in this generation.
//!
//! [`GalleryChanges`] uses raw tile indices (`u32`) into the current
//! filtered list so that presenters can index directly into
//! [`tiles`](GalleryStore::tiles) and friends without paying for handle
//! checks on every access. The indices are only meaningful for the
//! generation reported alongside them.

use alloc::vec::Vec;

use super::store::GalleryStore;
use crate::dirty;
use crate::layout::layout_aspects;

/// The set of changes produced by a single [`GalleryStore::evaluate`] call.
///
/// Presenters use these to apply incremental updates: rebuild the tile set
/// when `regenerated`, move tiles when `relaid_out`, and start loading the
/// photos behind newly `revealed` tiles.
#[derive(Clone, Debug, Default)]
pub struct GalleryChanges {
    /// Whether the filtered list was rebuilt.
    ///
    /// When set, every tile index from before this evaluate is stale and the
    /// presenter's tile set must be rebuilt from scratch.
    pub regenerated: bool,
    /// Whether tile geometry was recomputed.
    pub relaid_out: bool,
    /// The generation of the filtered list after this evaluate.
    pub generation: u64,
    /// Tiles revealed for the first time in this generation, ascending.
    pub revealed: Vec<u32>,
    /// Height of the laid-out grid, for sizing the scroll container.
    pub total_height: f64,
}

impl GalleryChanges {
    /// Clears all change state.
    pub fn clear(&mut self) {
        self.regenerated = false;
        self.relaid_out = false;
        self.generation = 0;
        self.revealed.clear();
        self.total_height = 0.0;
    }
}

impl GalleryStore {
    /// Evaluates pending mutations, recomputing the filtered list and the
    /// layout as needed, and returns the set of changes.
    pub fn evaluate(&mut self) -> GalleryChanges {
        let mut changes = GalleryChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut GalleryChanges) {
        changes.clear();

        // Regenerate the filtered list if the catalog or filter changed. A
        // new list invalidates every tile index of the previous generation,
        // so reveal state resets and marks still queued against the old list
        // are drained and discarded.
        if self.catalog_dirty {
            self.rebuild_filtered();
            self.revealed.clear();
            self.revealed.resize(self.filtered.len(), false);
            self.generation += 1;
            let _: Vec<u32> = self
                .dirty
                .drain(dirty::REVEAL)
                .deterministic()
                .run()
                .collect();
            changes.regenerated = true;
            self.catalog_dirty = false;
            self.geometry_dirty = true;
        }

        // Recompute the grid. Regeneration always lands here; width and
        // parameter changes land here without touching reveal state.
        if self.geometry_dirty {
            self.layout = layout_aspects(
                self.filtered
                    .iter()
                    .map(|&index| self.photos[index as usize].aspect_ratio()),
                self.container_width,
                &self.params,
            );
            changes.relaid_out = true;
            self.geometry_dirty = false;
        }

        // Drain REVEAL marks. Marks were range-checked against the current
        // filtered list when recorded, and regeneration above discarded any
        // stale ones, so indexing is direct. Already-revealed tiles are
        // skipped: reveals fire at most once per tile per generation.
        let marked: Vec<u32> = self
            .dirty
            .drain(dirty::REVEAL)
            .deterministic()
            .run()
            .collect();
        for idx in marked {
            if !self.revealed[idx as usize] {
                self.revealed[idx as usize] = true;
                changes.revealed.push(idx);
            }
        }
        changes.revealed.sort_unstable();

        changes.generation = self.generation;
        changes.total_height = self.layout.total_height;
    }

    /// Rebuilds the filtered list from the catalog and the current filter.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "photo catalogs are far smaller than `u32::MAX`"
    )]
    fn rebuild_filtered(&mut self) {
        self.filtered.clear();
        for (index, photo) in self.photos.iter().enumerate() {
            let keep = match &self.filter {
                None => true,
                Some(category) => photo.category.as_ref() == Some(category),
            };
            if keep {
                self.filtered.push(index as u32);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use super::*;
    use crate::photo::{Category, Photo, PhotoId};

    fn photo(id: &str, width: u32, height: u32, category: &str) -> Photo {
        Photo {
            id: PhotoId::new(id),
            src: String::from(id),
            width,
            height,
            category: Some(Category::from_label(category)),
            alt: String::new(),
        }
    }

    #[test]
    fn first_evaluate_regenerates_and_lays_out() {
        let mut store = GalleryStore::new();
        store.set_photos(vec![photo("a", 800, 600, "Nature")]);
        store.set_container_width(900.0);

        let changes = store.evaluate();
        assert!(changes.regenerated);
        assert!(changes.relaid_out);
        assert_eq!(changes.generation, 1);
        assert!(changes.revealed.is_empty());
    }

    #[test]
    fn quiescent_evaluate_reports_nothing() {
        let mut store = GalleryStore::new();
        store.set_photos(vec![photo("a", 800, 600, "Nature")]);
        store.set_container_width(900.0);
        let first = store.evaluate();

        let changes = store.evaluate();
        assert!(!changes.regenerated);
        assert!(!changes.relaid_out);
        assert!(changes.revealed.is_empty());
        assert_eq!(changes.generation, first.generation);
        assert_eq!(changes.total_height, first.total_height);
    }

    #[test]
    fn width_change_relays_out_without_regenerating() {
        let mut store = GalleryStore::new();
        store.set_photos(vec![
            photo("a", 800, 600, "Nature"),
            photo("b", 600, 800, "Nature"),
        ]);
        store.set_container_width(900.0);
        let _ = store.evaluate();

        store.set_container_width(640.0);
        let changes = store.evaluate();
        assert!(!changes.regenerated);
        assert!(changes.relaid_out);
        assert_eq!(changes.generation, 1);
    }

    #[test]
    fn params_change_relays_out_without_regenerating() {
        let mut store = GalleryStore::new();
        store.set_photos(vec![photo("a", 800, 600, "Nature")]);
        store.set_container_width(900.0);
        let _ = store.evaluate();

        store.set_params(crate::layout::LayoutParams {
            target_row_height: 250.0,
            margin: 8.0,
        });
        let changes = store.evaluate();
        assert!(!changes.regenerated);
        assert!(changes.relaid_out);
    }

    #[test]
    fn replacing_the_catalog_bumps_the_generation() {
        let mut store = GalleryStore::new();
        store.set_photos(vec![photo("a", 800, 600, "Nature")]);
        store.set_container_width(900.0);
        let _ = store.evaluate();
        assert_eq!(store.generation(), 1);

        store.set_photos(vec![photo("b", 600, 800, "Portraits")]);
        let changes = store.evaluate();
        assert!(changes.regenerated);
        assert_eq!(changes.generation, 2);
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn reveals_surface_once_in_ascending_order() {
        let mut store = GalleryStore::new();
        store.set_photos(vec![
            photo("a", 800, 600, "Nature"),
            photo("b", 600, 800, "Nature"),
            photo("c", 900, 600, "Nature"),
        ]);
        store.set_container_width(900.0);
        let _ = store.evaluate();

        store.mark_revealed(2);
        store.mark_revealed(0);
        store.mark_revealed(2);
        let changes = store.evaluate();
        assert_eq!(changes.revealed, vec![0, 2]);

        // Re-marking an already revealed tile surfaces nothing.
        store.mark_revealed(0);
        let changes = store.evaluate();
        assert!(changes.revealed.is_empty());
    }

    #[test]
    fn marks_queued_against_an_old_generation_are_discarded() {
        let mut store = GalleryStore::new();
        store.set_photos(vec![
            photo("a", 800, 600, "Nature"),
            photo("b", 600, 800, "Portraits"),
        ]);
        store.set_container_width(900.0);
        let _ = store.evaluate();

        store.mark_revealed(1);
        store.set_filter(Some(Category::Portraits));
        let changes = store.evaluate();
        assert!(changes.regenerated);
        assert!(
            changes.revealed.is_empty(),
            "marks from the superseded list must not leak"
        );
        assert!(!store.is_revealed(0));
    }

    #[test]
    fn marks_before_the_first_evaluate_are_dropped() {
        let mut store = GalleryStore::new();
        store.set_photos(vec![photo("a", 800, 600, "Nature")]);
        store.set_container_width(900.0);

        // The filtered list is empty until evaluate runs.
        store.mark_revealed(0);
        let changes = store.evaluate();
        assert!(changes.revealed.is_empty());
    }

    #[test]
    fn total_height_matches_the_store() {
        let mut store = GalleryStore::new();
        store.set_photos(vec![photo("a", 800, 600, "Nature")]);
        store.set_container_width(900.0);

        let changes = store.evaluate();
        // A lone 4:3 photo stretches to the full width: 900 / (4/3) = 675.
        assert_eq!(changes.total_height, 675.0);
        assert_eq!(store.total_height(), 675.0);
    }

    #[test]
    fn degenerate_photo_keeps_its_slot_but_gets_no_tile() {
        let mut store = GalleryStore::new();
        store.set_photos(vec![
            photo("a", 1600, 900, "Nature"),
            photo("bad", 0, 100, "Nature"),
            photo("c", 1200, 1200, "Nature"),
        ]);
        store.set_container_width(2000.0);
        let _ = store.evaluate();

        // The zero-width photo stays addressable (it counts toward the
        // filtered list the lightbox wraps over) but is not laid out.
        assert_eq!(store.filtered_len(), 3);
        assert_eq!(store.tiles().len(), 2);
        assert_eq!(store.tiles()[0].index, 0);
        assert_eq!(store.tiles()[1].index, 2);
        assert_eq!(store.photo_for_tile(1).unwrap().id.as_str(), "bad");
    }

    #[test]
    fn evaluate_into_reuses_buffer() {
        let mut store = GalleryStore::new();
        store.set_photos(vec![
            photo("a", 800, 600, "Nature"),
            photo("b", 600, 800, "Nature"),
        ]);
        store.set_container_width(900.0);

        let mut changes = GalleryChanges::default();
        store.evaluate_into(&mut changes);
        assert!(changes.regenerated);

        store.mark_revealed(0);
        store.evaluate_into(&mut changes);

        // Buffer should be cleared and refilled (not accumulating).
        assert!(!changes.regenerated, "regenerated should be cleared");
        assert_eq!(changes.revealed, vec![0]);
    }
}
