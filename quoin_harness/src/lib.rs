// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout auditing and scripted host doubles for demo harnesses.
//!
//! [`LayoutAudit`] re-derives the geometric invariants a justified layout
//! must satisfy and grades how tightly each row fills the container.
//! [`ScriptedIntersections`] and [`RecordingPresenter`] replace the two host
//! seams of a live gallery, the intersection source and the presenter, so
//! headless demos and tests can drive the full evaluate loop without a
//! browser.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use quoin_core::backend::Presenter;
use quoin_core::gallery::{GalleryChanges, GalleryStore};
use quoin_core::layout::JustifiedLayout;

// ---------------------------------------------------------------------------
// Layout auditing
// ---------------------------------------------------------------------------

/// Grade for how tightly rows fill the container width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditGrade {
    /// Rows fill the width to within accumulated float rounding.
    Exact,
    /// Worst relative fill error below one part per million.
    Tight,
    /// Worst relative fill error below one part per thousand.
    Loose,
    /// A structural invariant failed, or rows visibly miss the width.
    Broken,
}

impl AuditGrade {
    /// Returns a short label for log and HUD rendering.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Tight => "tight",
            Self::Loose => "loose",
            Self::Broken => "BROKEN",
        }
    }
}

/// The first structural failure found by an audit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditViolation {
    /// Rows do not partition the tile list contiguously.
    RowCoverage,
    /// Tile indices are not strictly increasing in reading order.
    TileOrder,
    /// A tile's height differs from its row's height.
    RowHeight,
    /// Row tops do not stack by height plus margin, or a tile's vertical
    /// extent disagrees with its row.
    RowStacking,
    /// Tiles do not start at the left edge or are not margin-separated.
    TileSpacing,
    /// `total_height` disagrees with the stacked rows.
    TotalHeight,
}

/// Aggregated result of one [`LayoutAudit::check`].
#[derive(Clone, Copy, Debug)]
pub struct AuditReport {
    /// Overall grade.
    pub grade: AuditGrade,
    /// Worst relative row-fill error across all rows.
    pub worst_fill_error: f64,
    /// First structural failure found, if any.
    pub violation: Option<AuditViolation>,
    /// Rows audited.
    pub rows: usize,
    /// Tiles audited.
    pub tiles: usize,
}

/// Checks a [`JustifiedLayout`] against the geometry that produced it.
///
/// The audit re-derives what the engine promises rather than re-running it:
/// rows cover the tiles in order, every tile matches its row's height and
/// vertical extent, tiles pack left to right separated by the margin, rows
/// stack by height plus margin, and `total_height` carries no trailing
/// margin. Row fill is the one soft metric; its worst relative error across
/// rows drives the grade.
#[derive(Clone, Copy, Debug)]
pub struct LayoutAudit {
    /// Container width the layout was computed for.
    pub container_width: f64,
    /// Margin the layout was computed for.
    pub margin: f64,
}

impl LayoutAudit {
    /// Creates an audit for a layout computed at `container_width` and
    /// `margin`.
    #[must_use]
    pub const fn new(container_width: f64, margin: f64) -> Self {
        Self {
            container_width,
            margin,
        }
    }

    /// Audits one layout.
    #[must_use]
    pub fn check(&self, layout: &JustifiedLayout) -> AuditReport {
        let mut violation = None;
        let mut worst_fill_error = 0.0_f64;

        // Rows must cover the tile list contiguously, in order.
        let mut expected_start = 0;
        for row in &layout.rows {
            if row.start != expected_start || row.end <= row.start {
                record(&mut violation, AuditViolation::RowCoverage);
            }
            expected_start = row.end;
        }
        if expected_start != layout.tiles.len() {
            record(&mut violation, AuditViolation::RowCoverage);
        }

        for pair in layout.tiles.windows(2) {
            if pair[1].index <= pair[0].index {
                record(&mut violation, AuditViolation::TileOrder);
            }
        }

        let mut expected_top = 0.0;
        for row in &layout.rows {
            if !approx(row.top, expected_top) {
                record(&mut violation, AuditViolation::RowStacking);
            }
            let Some(tiles) = layout.tiles.get(row.start..row.end) else {
                record(&mut violation, AuditViolation::RowCoverage);
                continue;
            };

            let mut left = 0.0;
            let mut widths = 0.0;
            for tile in tiles {
                if !approx(tile.rect.height(), row.height) {
                    record(&mut violation, AuditViolation::RowHeight);
                }
                if !approx(tile.rect.y0, row.top)
                    || !approx(tile.rect.y1, row.top + row.height)
                {
                    record(&mut violation, AuditViolation::RowStacking);
                }
                if !approx(tile.rect.x0, left) {
                    record(&mut violation, AuditViolation::TileSpacing);
                }
                widths += tile.rect.width();
                left = tile.rect.x1 + self.margin;
            }

            let fill = widths + self.margin * (tiles.len().saturating_sub(1)) as f64;
            // A layout can only be non-empty for a positive width.
            let error = if self.container_width > 0.0 {
                (fill - self.container_width).abs() / self.container_width
            } else {
                1.0
            };
            worst_fill_error = worst_fill_error.max(error);
            expected_top = row.top + row.height + self.margin;
        }

        // The margin below the last row never counts toward the total.
        let expected_total = match layout.rows.last() {
            Some(last) => last.top + last.height,
            None => 0.0,
        };
        if !approx(layout.total_height, expected_total) {
            record(&mut violation, AuditViolation::TotalHeight);
        }

        AuditReport {
            grade: grade_for(worst_fill_error, violation.is_none()),
            worst_fill_error,
            violation,
            rows: layout.rows.len(),
            tiles: layout.tiles.len(),
        }
    }
}

fn record(slot: &mut Option<AuditViolation>, violation: AuditViolation) {
    if slot.is_none() {
        *slot = Some(violation);
    }
}

/// Relative comparison at the structural epsilon.
fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn grade_for(worst_fill_error: f64, structure_ok: bool) -> AuditGrade {
    if !structure_ok {
        return AuditGrade::Broken;
    }
    if worst_fill_error < 1e-12 {
        AuditGrade::Exact
    } else if worst_fill_error < 1e-6 {
        AuditGrade::Tight
    } else if worst_fill_error < 1e-3 {
        AuditGrade::Loose
    } else {
        AuditGrade::Broken
    }
}

// ---------------------------------------------------------------------------
// Host doubles
// ---------------------------------------------------------------------------

/// A scripted stand-in for the host's intersection source.
///
/// Headless demos and tests have no viewport, so reveal timing comes from a
/// script: a list of `(pass, tile)` entries. Before each evaluate, the
/// driver calls [`apply_to`](Self::apply_to) (or [`drain_due`](Self::drain_due))
/// with its pass number, and the due tiles are marked in schedule order.
/// Entries whose pass has already elapsed fire as well, so a script survives
/// a driver that skips pass numbers.
#[derive(Clone, Debug, Default)]
pub struct ScriptedIntersections {
    script: Vec<(u64, u32)>,
}

impl ScriptedIntersections {
    /// Creates an empty script.
    #[must_use]
    pub const fn new() -> Self {
        Self { script: Vec::new() }
    }

    /// Schedules `tile` to intersect just before evaluate pass `pass`.
    pub fn schedule(&mut self, pass: u64, tile: u32) {
        self.script.push((pass, tile));
    }

    /// Removes and returns the tiles due at `pass`, in schedule order.
    pub fn drain_due(&mut self, pass: u64) -> Vec<u32> {
        let mut due = Vec::new();
        self.script.retain(|&(at, tile)| {
            if at <= pass {
                due.push(tile);
                false
            } else {
                true
            }
        });
        due
    }

    /// Marks the tiles due at `pass` as revealed in `store`.
    pub fn apply_to(&mut self, pass: u64, store: &mut GalleryStore) {
        for tile in self.drain_due(pass) {
            store.mark_revealed(tile);
        }
    }

    /// Returns whether every scheduled entry has fired.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.script.is_empty()
    }
}

/// Compact record of one [`Presenter::apply`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct ApplyRecord {
    /// Generation the changes belong to.
    pub generation: u64,
    /// The filtered list was rebuilt this pass.
    pub regenerated: bool,
    /// Geometry was recomputed this pass.
    pub relaid_out: bool,
    /// Tiles newly revealed this pass, ascending.
    pub revealed: Vec<u32>,
    /// Tiles in the layout after the pass.
    pub tile_count: usize,
    /// Layout height after the pass.
    pub total_height: f64,
}

/// A [`Presenter`] that records every apply for later assertions.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    records: Vec<ApplyRecord>,
}

impl RecordingPresenter {
    /// Creates a presenter with no recorded applies.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Returns every recorded apply, oldest first.
    #[must_use]
    pub fn records(&self) -> &[ApplyRecord] {
        &self.records
    }

    /// Returns the most recent apply.
    #[must_use]
    pub fn last(&self) -> Option<&ApplyRecord> {
        self.records.last()
    }

    /// Forgets all recorded applies.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn apply(&mut self, store: &GalleryStore, changes: &GalleryChanges) {
        self.records.push(ApplyRecord {
            generation: changes.generation,
            regenerated: changes.regenerated,
            relaid_out: changes.relaid_out,
            revealed: changes.revealed.clone(),
            tile_count: store.tiles().len(),
            total_height: changes.total_height,
        });
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;

    use kurbo::Rect;
    use quoin_core::layout::{LayoutParams, Row, Tile, layout};
    use quoin_core::photo::{Photo, PhotoId};

    use super::*;

    fn photos(dims: &[(u32, u32)]) -> Vec<Photo> {
        dims.iter()
            .enumerate()
            .map(|(i, &(width, height))| Photo {
                id: PhotoId::new(format!("p{i}")),
                src: format!("photos/p{i}.jpg"),
                width,
                height,
                category: None,
                alt: String::new(),
            })
            .collect()
    }

    fn params() -> LayoutParams {
        LayoutParams {
            target_row_height: 250.0,
            margin: 8.0,
        }
    }

    /// One hand-built row whose lone tile spans `width`.
    fn single_row(width: f64) -> JustifiedLayout {
        JustifiedLayout {
            tiles: vec![Tile {
                index: 0,
                rect: Rect::new(0.0, 0.0, width, 200.0),
            }],
            rows: vec![Row {
                start: 0,
                end: 1,
                height: 200.0,
                top: 0.0,
            }],
            total_height: 200.0,
        }
    }

    #[test]
    fn engine_output_audits_clean_across_widths() {
        let input = photos(&[
            (1600, 900),
            (900, 1600),
            (1200, 1200),
            (2000, 1000),
            (800, 1200),
            (1500, 1000),
            (1000, 1000),
        ]);
        for width in [320.0, 700.0, 1024.0, 1920.0] {
            let result = layout(&input, width, &params());
            let report = LayoutAudit::new(width, 8.0).check(&result);
            assert_eq!(report.violation, None, "width {width}");
            assert!(
                matches!(report.grade, AuditGrade::Exact | AuditGrade::Tight),
                "width {width}: worst fill error {}",
                report.worst_fill_error
            );
        }
    }

    #[test]
    fn empty_layout_audits_exact() {
        let report = LayoutAudit::new(900.0, 8.0).check(&JustifiedLayout::default());
        assert_eq!(report.grade, AuditGrade::Exact);
        assert_eq!(report.rows, 0);
        assert_eq!(report.tiles, 0);
        assert_eq!(report.violation, None);
    }

    #[test]
    fn grades_track_fill_error_magnitude() {
        let audit = LayoutAudit::new(1000.0, 0.0);
        for (width, grade) in [
            (1000.0, AuditGrade::Exact),
            (1000.0 + 1e-4, AuditGrade::Tight),
            (1000.0 + 0.1, AuditGrade::Loose),
            (1000.0 + 10.0, AuditGrade::Broken),
        ] {
            let report = audit.check(&single_row(width));
            assert_eq!(report.grade, grade, "width {width}");
        }
    }

    #[test]
    fn tampered_tile_height_is_a_violation() {
        let input = photos(&[(1600, 900), (900, 1600), (1200, 1200)]);
        let mut result = layout(&input, 900.0, &params());
        let rect = result.tiles[1].rect;
        result.tiles[1].rect = Rect::new(rect.x0, rect.y0, rect.x1, rect.y1 + 5.0);

        let report = LayoutAudit::new(900.0, 8.0).check(&result);
        assert_eq!(report.grade, AuditGrade::Broken);
        assert_eq!(report.violation, Some(AuditViolation::RowHeight));
    }

    #[test]
    fn reordered_tile_indices_are_a_violation() {
        let input = photos(&[(1600, 900), (900, 1600), (1200, 1200)]);
        let mut result = layout(&input, 900.0, &params());
        result.tiles.swap(0, 1);
        // Restore the rects so only the index order is wrong.
        let (a, b) = (result.tiles[0].rect, result.tiles[1].rect);
        result.tiles[0].rect = b;
        result.tiles[1].rect = a;

        let report = LayoutAudit::new(900.0, 8.0).check(&result);
        assert_eq!(report.grade, AuditGrade::Broken);
        assert_eq!(report.violation, Some(AuditViolation::TileOrder));
    }

    #[test]
    fn wrong_total_height_is_a_violation() {
        let input = photos(&[(1600, 900), (900, 1600)]);
        let mut result = layout(&input, 700.0, &params());
        result.total_height += 3.0;

        let report = LayoutAudit::new(700.0, 8.0).check(&result);
        assert_eq!(report.violation, Some(AuditViolation::TotalHeight));
    }

    #[test]
    fn gapped_row_coverage_is_a_violation() {
        let input = photos(&[(1000, 500), (1000, 500)]);
        let mut result = layout(&input, 1007.0, &params());
        assert_eq!(result.rows.len(), 2);
        result.rows.remove(0);

        let report = LayoutAudit::new(1007.0, 8.0).check(&result);
        assert_eq!(report.violation, Some(AuditViolation::RowCoverage));
    }

    #[test]
    fn grade_labels_are_stable() {
        assert_eq!(AuditGrade::Exact.as_str(), "exact");
        assert_eq!(AuditGrade::Broken.as_str(), "BROKEN");
    }

    #[test]
    fn script_fires_in_schedule_order_per_pass() {
        let mut script = ScriptedIntersections::new();
        script.schedule(2, 5);
        script.schedule(1, 3);
        script.schedule(1, 4);

        assert_eq!(script.drain_due(1), vec![3, 4]);
        assert_eq!(script.drain_due(1), Vec::<u32>::new());
        assert_eq!(script.drain_due(2), vec![5]);
        assert!(script.is_exhausted());
    }

    #[test]
    fn elapsed_entries_fire_on_a_later_pass() {
        let mut script = ScriptedIntersections::new();
        script.schedule(1, 0);
        assert_eq!(script.drain_due(3), vec![0]);
    }

    #[test]
    fn scripted_reveals_drive_the_store() {
        let mut store = GalleryStore::new();
        store.set_photos(photos(&[(800, 600), (600, 800), (900, 600)]));
        store.set_container_width(900.0);
        let _ = store.evaluate();

        let mut script = ScriptedIntersections::new();
        script.schedule(1, 2);
        script.schedule(1, 0);
        script.schedule(2, 1);

        script.apply_to(1, &mut store);
        let changes = store.evaluate();
        assert_eq!(changes.revealed, vec![0, 2]);

        script.apply_to(2, &mut store);
        let changes = store.evaluate();
        assert_eq!(changes.revealed, vec![1]);
        assert!(script.is_exhausted());
    }

    #[test]
    fn recorder_captures_each_apply() {
        let mut store = GalleryStore::new();
        store.set_photos(photos(&[(800, 600), (600, 800)]));
        store.set_container_width(900.0);
        let mut presenter = RecordingPresenter::new();

        let changes = store.evaluate();
        presenter.apply(&store, &changes);
        store.mark_revealed(0);
        let changes = store.evaluate();
        presenter.apply(&store, &changes);

        let records = presenter.records();
        assert_eq!(records.len(), 2);
        assert!(records[0].regenerated);
        assert!(records[0].relaid_out);
        assert_eq!(records[0].tile_count, 2);
        assert!(!records[1].regenerated);
        assert_eq!(records[1].revealed, vec![0]);
        assert_eq!(records[1].generation, records[0].generation);
        assert_eq!(presenter.last().map(|record| record.generation), Some(1));

        presenter.clear();
        assert!(presenter.records().is_empty());
    }
}
