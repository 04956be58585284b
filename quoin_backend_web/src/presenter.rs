// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM tile management.
//!
//! Translates [`GalleryStore`] state into a set of absolutely positioned
//! `<div>` tiles by applying incremental updates from [`GalleryChanges`].
//!
//! [`GalleryStore`]: quoin_core::gallery::GalleryStore
//! [`GalleryChanges`]: quoin_core::gallery::GalleryChanges

use alloc::format;
use alloc::vec::Vec;

use quoin_core::backend::Presenter;
use quoin_core::gallery::{GalleryChanges, GalleryStore};
use wasm_bindgen::JsCast as _;
use web_sys::{HtmlElement, HtmlImageElement};

/// Maps a [`GalleryStore`] to live DOM elements, applying incremental
/// updates from [`GalleryChanges`].
///
/// The presenter owns a container `HtmlElement` to which one `<div>` per
/// laid-out tile is added. Tiles start as flat placeholders; when the store
/// reports a tile revealed, the presenter inserts the `<img>` so the photo
/// only loads once it is near the viewport. Call [`apply`](Self::apply)
/// after each evaluate to synchronize the DOM with the store.
///
/// Each tile element carries a `data-tile` attribute holding its index in
/// the filtered list, so intersection and click handlers can map elements
/// back to tiles.
pub struct TilePresenter {
    container: HtmlElement,
    /// Tile elements parallel to the store's tile list.
    tiles: Vec<HtmlElement>,
    /// `data-tile` values parallel to `tiles` (ascending).
    indices: Vec<u32>,
}

impl core::fmt::Debug for TilePresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TilePresenter")
            .field("container", &"HtmlElement")
            .field("tiles_len", &self.tiles.len())
            .finish()
    }
}

impl TilePresenter {
    /// Creates a new presenter that manages child elements of `container`.
    ///
    /// The container becomes the positioning context for the tiles
    /// (`position: relative`); its height is written on every relayout.
    #[must_use]
    pub fn new(container: HtmlElement) -> Self {
        let _ = container.style().set_property("position", "relative");
        Self {
            container,
            tiles: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Returns a reference to the container element.
    #[must_use]
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Returns the element for the given tile index, if one was laid out.
    ///
    /// Degenerate photos keep a slot in the filtered list but get no tile,
    /// so not every in-range index has an element.
    #[must_use]
    pub fn tile_element(&self, tile: u32) -> Option<&HtmlElement> {
        let slot = self.indices.binary_search(&tile).ok()?;
        self.tiles.get(slot)
    }

    /// Returns the tile elements in reading order.
    #[must_use]
    pub fn tile_elements(&self) -> &[HtmlElement] {
        &self.tiles
    }
}

impl Presenter for TilePresenter {
    /// Applies incremental changes from a [`GalleryChanges`] to the DOM.
    fn apply(&mut self, store: &GalleryStore, changes: &GalleryChanges) {
        // 1. Regeneration: rebuild the tile elements from scratch. The old
        //    elements belong to a superseded filtered list.
        if changes.regenerated {
            for el in self.tiles.drain(..) {
                el.remove();
            }
            self.indices.clear();

            let doc = self.container.owner_document().expect("no owner document");
            for tile in store.tiles() {
                let el: HtmlElement = doc
                    .create_element("div")
                    .expect("create_element failed")
                    .unchecked_into();
                let s = el.style();
                let _ = s.set_property("position", "absolute");
                let _ = s.set_property("overflow", "hidden");
                let _ = s.set_property("background-color", "#e5e5e5");
                let _ = el.set_attribute("data-tile", &format!("{}", tile.index));
                let _ = self.container.append_child(&el);
                self.tiles.push(el);
                self.indices.push(tile.index);
            }
        }

        // 2. Geometry: write tile rects and the container height. The tile
        //    list is unchanged unless `regenerated` ran above, so the
        //    elements stay parallel to `store.tiles()`.
        if changes.relaid_out {
            for (tile, el) in store.tiles().iter().zip(&self.tiles) {
                let s = el.style();
                let _ = s.set_property("left", &format!("{}px", tile.rect.x0));
                let _ = s.set_property("top", &format!("{}px", tile.rect.y0));
                let _ = s.set_property("width", &format!("{}px", tile.rect.width()));
                let _ = s.set_property("height", &format!("{}px", tile.rect.height()));
            }
            let _ = self
                .container
                .style()
                .set_property("height", &format!("{}px", changes.total_height));
        }

        // 3. Reveals: swap placeholders for real images. Reveals fire once
        //    per tile per generation, so no duplicate-image check is needed.
        if !changes.revealed.is_empty() {
            let doc = self.container.owner_document().expect("no owner document");
            for &tile in &changes.revealed {
                let Ok(slot) = self.indices.binary_search(&tile) else {
                    continue;
                };
                let Some(photo) = store.photo_for_tile(tile) else {
                    continue;
                };
                let img: HtmlImageElement = doc
                    .create_element("img")
                    .expect("create_element failed")
                    .unchecked_into();
                img.set_src(&photo.src);
                img.set_alt(&photo.alt);
                let s = img.style();
                let _ = s.set_property("display", "block");
                let _ = s.set_property("width", "100%");
                let _ = s.set_property("height", "100%");
                let _ = s.set_property("object-fit", "cover");
                let _ = self.tiles[slot].append_child(&img);
            }
        }
    }
}
