// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The justified layout engine.
//!
//! [`layout`] packs an ordered photo list into rows at a target height, then
//! rescales each row so its tiles exactly fill the container width. It is a
//! pure function of its inputs: a single left-to-right pass (O(n)), no
//! allocation beyond the output, and it never suspends. Hosts call it again
//! from scratch on every input change; tiles are ephemeral and carry no
//! identity across passes.
//!
//! Row packing is greedy: a photo closes the current row only when adding it
//! (plus one inter-tile margin) would *strictly* exceed the container width
//! and the row already holds at least one photo. An exact fit stays in the
//! row. The final row is rescaled like every other row, so the last row of a
//! gallery is stretched or shrunk to fill the width rather than left ragged.
//!
//! The rescale step trades "every row at exactly the target height" for
//! "every row exactly fills the container width", which is the visually
//! dominant constraint of a justified gallery. A row of two or more photos
//! always rescales to a height at or above the target; only a lone photo
//! whose scaled width already exceeds the container shrinks below it.

use alloc::vec::Vec;
use kurbo::Rect;

use crate::photo::Photo;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Layout tuning parameters.
///
/// `target_row_height` must be positive and `margin` non-negative; the
/// engine does not validate either (callers own that contract, and the
/// defaults plus the gallery presets are always valid).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// Row height the packer aims for, in container units. Rows rescale
    /// away from this to fill the width exactly.
    pub target_row_height: f64,
    /// Gap between adjacent tiles in a row and between rows.
    pub margin: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            target_row_height: 200.0,
            margin: 4.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Output geometry
// ---------------------------------------------------------------------------

/// One laid-out photo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    /// Position of the photo in the input list.
    ///
    /// Indices of skipped (degenerate) photos are absent, so consecutive
    /// tiles can have non-consecutive indices; reading tiles in order always
    /// yields strictly increasing indices.
    pub index: u32,
    /// Placement in container units. The origin is the container's top-left.
    pub rect: Rect,
}

/// A closed row: a half-open range of tiles plus its resolved geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Row {
    /// Index of the row's first tile in [`JustifiedLayout::tiles`].
    pub start: usize,
    /// One past the row's last tile.
    pub end: usize,
    /// Height shared by every tile in the row.
    pub height: f64,
    /// Top edge of the row.
    pub top: f64,
}

/// The result of one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JustifiedLayout {
    /// Tiles in input order (reading order: left-to-right, top-to-bottom).
    pub tiles: Vec<Tile>,
    /// Row ranges over `tiles`, top to bottom.
    pub rows: Vec<Row>,
    /// Height of the full layout, without a trailing margin.
    pub total_height: f64,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Lays out `photos` into justified rows filling `container_width`.
///
/// Photos with a degenerate dimension (either side zero) are skipped: they
/// produce no tile and the surrounding photos pack as if they were absent.
/// An empty input, or a `container_width` of zero or less, yields an empty
/// layout with `total_height` 0; neither is an error.
#[must_use]
pub fn layout(photos: &[Photo], container_width: f64, params: &LayoutParams) -> JustifiedLayout {
    layout_aspects(photos.iter().map(Photo::aspect_ratio), container_width, params)
}

/// Lower-level entry taking precomputed aspect ratios.
///
/// Each item is one input photo's `width / height`; `None` marks a
/// degenerate photo to skip. [`Tile::index`] is the item's position in the
/// iterator. [`GalleryStore`](crate::gallery::GalleryStore) uses this to lay
/// out its filtered view without materializing a photo list.
#[must_use]
pub fn layout_aspects(
    aspects: impl IntoIterator<Item = Option<f64>>,
    container_width: f64,
    params: &LayoutParams,
) -> JustifiedLayout {
    let mut entries: Vec<(u32, f64)> = Vec::new();
    for (position, aspect) in aspects.into_iter().enumerate() {
        let Some(aspect) = aspect else {
            continue;
        };
        if !aspect.is_finite() || aspect <= 0.0 {
            continue;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "photo lists are far smaller than u32::MAX"
        )]
        entries.push((position as u32, aspect));
    }
    if container_width <= 0.0 || entries.is_empty() {
        return JustifiedLayout::default();
    }

    // Pack: close a row only on strict overflow, never on an exact fit.
    let mut rows: Vec<Row> = Vec::new();
    let mut row_start = 0;
    let mut row_width = 0.0;
    for (position, &(_, aspect)) in entries.iter().enumerate() {
        let scaled_width = params.target_row_height * aspect;
        if position > row_start && row_width + scaled_width + params.margin > container_width {
            rows.push(Row {
                start: row_start,
                end: position,
                height: 0.0,
                top: 0.0,
            });
            row_start = position;
            row_width = scaled_width;
        } else if position > row_start {
            row_width += scaled_width + params.margin;
        } else {
            row_width = scaled_width;
        }
    }
    rows.push(Row {
        start: row_start,
        end: entries.len(),
        height: 0.0,
        top: 0.0,
    });

    // Rescale each row to fill the container width exactly, then emit tiles.
    let mut tiles = Vec::with_capacity(entries.len());
    let mut top = 0.0;
    for row in &mut rows {
        let count = row.end - row.start;
        let available_width = container_width - params.margin * (count - 1) as f64;
        let total_aspect: f64 = entries[row.start..row.end].iter().map(|&(_, a)| a).sum();
        let row_height = available_width / total_aspect;
        row.height = row_height;
        row.top = top;

        let mut left = 0.0;
        for &(index, aspect) in &entries[row.start..row.end] {
            let tile_width = row_height * aspect;
            tiles.push(Tile {
                index,
                rect: Rect::new(left, top, left + tile_width, top + row_height),
            });
            left += tile_width + params.margin;
        }
        top += row_height + params.margin;
    }

    JustifiedLayout {
        tiles,
        rows,
        total_height: top - params.margin,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
