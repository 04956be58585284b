// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gallery data model: catalog, filter, derived tiles, and reveal state.
//!
//! The [`GalleryStore`] owns everything between the data layer and the
//! rendering host:
//!
//! - **Inputs** set by the caller: the photo catalog
//!   ([`set_photos`](GalleryStore::set_photos)), a category filter
//!   ([`set_filter`](GalleryStore::set_filter)), the measured container
//!   width ([`set_container_width`](GalleryStore::set_container_width)),
//!   and layout parameters ([`set_params`](GalleryStore::set_params)).
//! - **Derived state** produced by [`evaluate`](GalleryStore::evaluate):
//!   the filtered photo list, its justified layout, and the per-tile
//!   revealed flags.
//!
//! Tiles are identified by their position in the current filtered list.
//! That identity only holds within a *generation*: replacing the catalog or
//! changing the filter regenerates the list, bumps the generation counter,
//! and resets all reveal state, because the tile at position 3 may now be a
//! different photo. A width or parameter change merely re-lays-out the same
//! list, so reveals survive resizes.
//!
//! # Dirty tracking
//!
//! Setters mark plain store-wide flags (catalog vs. geometry); host
//! intersection callbacks mark individual tiles on the REVEAL channel (see
//! [`dirty`](crate::dirty)). [`evaluate`](GalleryStore::evaluate) drains
//! everything accumulated since the previous call into one
//! [`GalleryChanges`] report, so any burst of host events collapses into a
//! single recompute.

mod evaluate;
mod store;

pub use evaluate::GalleryChanges;
pub use store::GalleryStore;
