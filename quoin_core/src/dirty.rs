// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Quoin routes per-tile invalidation through [`understory_dirty`], keyed by
//! the tile's position in the current filtered list. The gallery has no
//! parent/child structure, so there are no dependency edges and nothing
//! propagates; the tracker's job here is deduplication and deterministic
//! drain order for marks arriving from host callbacks.
//!
//! Store-wide invalidation (catalog or filter replaced, container width or
//! parameters changed) is a whole-pass rebuild, not a per-key event, and is
//! tracked by plain flags on the store rather than a channel.
//!
//! # Consumption
//!
//! Callers never query dirty state directly. Each
//! [`GalleryStore::evaluate`](crate::gallery::GalleryStore::evaluate) call
//! drains the channel and surfaces the results as
//! [`GalleryChanges`](crate::gallery::GalleryChanges), which backends
//! [consume](crate::backend::Presenter::apply) to apply incremental updates.

use understory_dirty::Channel;

/// A tile entered the host's proximity window; its backing image resource
/// should load. Marks are idempotent and drain in ascending tile order.
pub const REVEAL: Channel = Channel::new(0);
