// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared synthetic catalog for the quoin demos.

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::vec::Vec;

use quoin_core::layout::LayoutParams;
use quoin_core::photo::{Category, Photo, PhotoId};

/// Row height the demos aim for, matching the portfolio's gallery view.
pub const TARGET_ROW_HEIGHT: f64 = 250.0;

/// Gap between tiles and between rows, in CSS pixels.
pub const MARGIN: f64 = 8.0;

/// Layout parameters shared by the demos.
#[must_use]
pub fn demo_params() -> LayoutParams {
    LayoutParams {
        target_row_height: TARGET_ROW_HEIGHT,
        margin: MARGIN,
    }
}

/// Intrinsic pixel dimensions cycled across the catalog.
///
/// A mix of landscape, portrait, square, and panorama shapes keeps demo rows
/// ragged enough to exercise the packer at every container width.
const DIMENSIONS: [(u32, u32); 8] = [
    (1600, 900),
    (900, 1600),
    (1200, 1200),
    (2000, 1000),
    (800, 1200),
    (1500, 1000),
    (1000, 1000),
    (2400, 800),
];

/// Raw category labels cycled across the catalog.
///
/// Includes the legacy `"top-picks"` spelling so the demos exercise label
/// folding the same way real portfolio data does.
const LABELS: [&str; 5] = ["Nature", "Portraits", "Street", "Travel", "top-picks"];

/// Builds a deterministic catalog of `n` synthetic photos.
///
/// Photo `i` is identical from run to run: dimensions and category labels
/// cycle through short fixed tables, so every demo sees the same aspect
/// ratios in the same order.
#[must_use]
pub fn demo_photos(n: usize) -> Vec<Photo> {
    (0..n)
        .map(|i| {
            let (width, height) = DIMENSIONS[i % DIMENSIONS.len()];
            let label = LABELS[i % LABELS.len()];
            Photo {
                id: PhotoId::new(format!("demo/{label}/{i:03}")),
                src: format!("photos/{label}/{i:03}.jpg"),
                width,
                height,
                category: Some(Category::from_label(label)),
                alt: format!("Demo photo {i}"),
            }
        })
        .collect()
}
