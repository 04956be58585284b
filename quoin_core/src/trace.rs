// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the gallery event loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! event-loop instrumentation calls after each evaluate pass. All method
//! bodies default to no-ops, so implementing only the events you care about
//! is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! [`PassSummaryBuilder`] is a convenience helper that rolls one evaluate
//! pass into a [`PassSummary`] at the end.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates per-tile [`RevealEvent`]s plus
//!   the corresponding `TraceSink` method; the base feature only carries a
//!   per-pass reveal count.

use crate::gallery::{GalleryChanges, GalleryStore};
use crate::lightbox::LightboxState;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Compact lightbox state for trace payloads.
///
/// Collapses [`LightboxState`] to its shape, dropping the photo index, so
/// transitions encode in a couple of bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightboxStateKind {
    /// No photo is enlarged.
    Closed,
    /// A photo is enlarged, windowed.
    Open,
    /// A photo is enlarged, fullscreen.
    OpenFullscreen,
}

impl From<LightboxState> for LightboxStateKind {
    fn from(state: LightboxState) -> Self {
        match state {
            LightboxState::Closed => Self::Closed,
            LightboxState::Open {
                fullscreen: false, ..
            } => Self::Open,
            LightboxState::Open {
                fullscreen: true, ..
            } => Self::OpenFullscreen,
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after an evaluate pass that recomputed the grid.
#[derive(Clone, Copy, Debug)]
pub struct LayoutPassEvent {
    /// Monotonic evaluate-pass counter, maintained by the event loop.
    pub pass_index: u64,
    /// Generation of the filtered list that was laid out.
    pub generation: u64,
    /// Container width the pass used.
    pub container_width: f64,
    /// Number of tiles produced.
    pub tile_count: u32,
    /// Number of rows produced.
    pub row_count: u32,
    /// Height of the resulting grid.
    pub total_height: f64,
}

impl LayoutPassEvent {
    /// Creates a `LayoutPassEvent` from the store's post-evaluate state.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "tile and row counts are bounded by the photo list length"
    )]
    #[must_use]
    pub fn new(pass_index: u64, store: &GalleryStore) -> Self {
        Self {
            pass_index,
            generation: store.generation(),
            container_width: store.container_width(),
            tile_count: store.tiles().len() as u32,
            row_count: store.rows().len() as u32,
            total_height: store.total_height(),
        }
    }
}

/// A single tile crossing into the proximity window (requires `trace-rich`).
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct RevealEvent {
    /// Evaluate-pass counter.
    pub pass_index: u64,
    /// The revealed tile's index in the filtered list.
    pub tile: u32,
    /// Generation the tile index belongs to.
    pub generation: u64,
}

/// Emitted when the lightbox changes shape (open, close, fullscreen).
#[derive(Clone, Copy, Debug)]
pub struct LightboxTransitionEvent {
    /// Evaluate-pass counter.
    pub pass_index: u64,
    /// State shape before the transition.
    pub from: LightboxStateKind,
    /// State shape after the transition.
    pub to: LightboxStateKind,
}

/// Emitted when the host denies a fullscreen request.
///
/// This is the "logged, not surfaced" channel for denial: the lightbox has
/// already rewound its flag by the time this fires.
#[derive(Clone, Copy, Debug)]
pub struct FullscreenDeniedEvent {
    /// Evaluate-pass counter.
    pub pass_index: u64,
    /// The flag value the lightbox reverted to.
    pub reverted_to: bool,
}

/// Per-pass rollup produced by [`PassSummaryBuilder`].
#[derive(Clone, Copy, Debug)]
pub struct PassSummary {
    /// Evaluate-pass counter.
    pub pass_index: u64,
    /// Generation after the pass.
    pub generation: u64,
    /// Whether the filtered list was rebuilt.
    pub regenerated: bool,
    /// Whether the grid was recomputed.
    pub relaid_out: bool,
    /// Number of tiles revealed in the pass.
    pub reveal_count: u32,
    /// Lightbox shape at the end of the pass.
    pub lightbox: LightboxStateKind,
    /// Grid height after the pass.
    pub total_height: f64,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the gallery event loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after an evaluate pass that recomputed the grid.
    fn on_layout_pass(&mut self, e: &LayoutPassEvent) {
        _ = e;
    }

    /// Called with the number of tiles revealed by a pass.
    fn on_reveals(&mut self, pass_index: u64, count: u32) {
        _ = (pass_index, count);
    }

    /// Called once per revealed tile (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }

    /// Called when the lightbox changes shape.
    fn on_lightbox_transition(&mut self, e: &LightboxTransitionEvent) {
        _ = e;
    }

    /// Called when the host denies a fullscreen request.
    fn on_fullscreen_denied(&mut self, e: &FullscreenDeniedEvent) {
        _ = e;
    }

    /// Called with a per-pass rollup.
    fn on_pass_summary(&mut self, s: &PassSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`LayoutPassEvent`].
    #[inline]
    pub fn layout_pass(&mut self, e: &LayoutPassEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layout_pass(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a per-pass reveal count.
    #[inline]
    pub fn reveals(&mut self, pass_index: u64, count: u32) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reveals(pass_index, count);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = (pass_index, count);
        }
    }

    /// Emits a per-tile [`RevealEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn reveal(&mut self, e: &RevealEvent) {
        if let Some(s) = &mut self.sink {
            s.on_reveal(e);
        }
    }

    /// Emits a [`LightboxTransitionEvent`].
    #[inline]
    pub fn lightbox_transition(&mut self, e: &LightboxTransitionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_lightbox_transition(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FullscreenDeniedEvent`].
    #[inline]
    pub fn fullscreen_denied(&mut self, e: &FullscreenDeniedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_fullscreen_denied(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassSummary`].
    #[inline]
    pub fn pass_summary(&mut self, s: &PassSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_pass_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }
}

// ---------------------------------------------------------------------------
// PassSummaryBuilder
// ---------------------------------------------------------------------------

/// Collects the pieces of one evaluate pass and produces a [`PassSummary`].
#[derive(Debug)]
pub struct PassSummaryBuilder {
    summary: PassSummary,
}

impl PassSummaryBuilder {
    /// Starts building a summary for the given pass.
    #[must_use]
    pub fn new(pass_index: u64) -> Self {
        Self {
            summary: PassSummary {
                pass_index,
                generation: 0,
                regenerated: false,
                relaid_out: false,
                reveal_count: 0,
                lightbox: LightboxStateKind::Closed,
                total_height: 0.0,
            },
        }
    }

    /// Records the changes an evaluate produced.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "reveal counts are bounded by the photo list length"
    )]
    pub fn record_changes(&mut self, changes: &GalleryChanges) {
        self.summary.generation = changes.generation;
        self.summary.regenerated = changes.regenerated;
        self.summary.relaid_out = changes.relaid_out;
        self.summary.reveal_count = changes.revealed.len() as u32;
        self.summary.total_height = changes.total_height;
    }

    /// Records the lightbox state at the end of the pass.
    pub fn record_lightbox(&mut self, state: LightboxState) {
        self.summary.lightbox = state.into();
    }

    /// Consumes the builder and produces the final [`PassSummary`].
    #[must_use]
    pub fn finish(self) -> PassSummary {
        self.summary
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use super::*;

    fn sample_pass() -> LayoutPassEvent {
        LayoutPassEvent {
            pass_index: 42,
            generation: 3,
            container_width: 960.0,
            tile_count: 12,
            row_count: 4,
            total_height: 873.5,
        }
    }

    #[test]
    fn lightbox_state_kind_collapses_the_index() {
        assert_eq!(
            LightboxStateKind::from(LightboxState::Closed),
            LightboxStateKind::Closed
        );
        assert_eq!(
            LightboxStateKind::from(LightboxState::Open {
                index: 7,
                fullscreen: false
            }),
            LightboxStateKind::Open
        );
        assert_eq!(
            LightboxStateKind::from(LightboxState::Open {
                index: 0,
                fullscreen: true
            }),
            LightboxStateKind::OpenFullscreen
        );
    }

    #[test]
    fn layout_pass_event_reads_the_store() {
        use crate::photo::{Photo, PhotoId};

        let mut store = GalleryStore::new();
        store.set_photos(vec![Photo {
            id: PhotoId::new("a"),
            src: String::from("a.jpg"),
            width: 800,
            height: 600,
            category: None,
            alt: String::new(),
        }]);
        store.set_container_width(900.0);
        let _ = store.evaluate();

        let evt = LayoutPassEvent::new(7, &store);
        assert_eq!(evt.pass_index, 7);
        assert_eq!(evt.generation, 1);
        assert_eq!(evt.container_width, 900.0);
        assert_eq!(evt.tile_count, 1);
        assert_eq!(evt.row_count, 1);
        assert_eq!(evt.total_height, store.total_height());
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_layout_pass(&sample_pass());
        sink.on_reveals(42, 3);
        sink.on_lightbox_transition(&LightboxTransitionEvent {
            pass_index: 42,
            from: LightboxStateKind::Closed,
            to: LightboxStateKind::Open,
        });
        sink.on_fullscreen_denied(&FullscreenDeniedEvent {
            pass_index: 42,
            reverted_to: false,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.layout_pass(&sample_pass());
        tracer.reveals(42, 3);
    }

    #[test]
    fn summary_builder_rolls_up_changes() {
        let changes = GalleryChanges {
            regenerated: true,
            relaid_out: true,
            generation: 2,
            revealed: vec![0, 1, 4],
            total_height: 512.0,
        };

        let mut builder = PassSummaryBuilder::new(9);
        builder.record_changes(&changes);
        builder.record_lightbox(LightboxState::Open {
            index: 1,
            fullscreen: true,
        });

        let summary = builder.finish();
        assert_eq!(summary.pass_index, 9);
        assert_eq!(summary.generation, 2);
        assert!(summary.regenerated);
        assert!(summary.relaid_out);
        assert_eq!(summary.reveal_count, 3);
        assert_eq!(summary.lightbox, LightboxStateKind::OpenFullscreen);
        assert_eq!(summary.total_height, 512.0);
    }

    #[test]
    fn summary_builder_defaults_are_quiet() {
        let summary = PassSummaryBuilder::new(0).finish();
        assert!(!summary.regenerated);
        assert!(!summary.relaid_out);
        assert_eq!(summary.reveal_count, 0);
        assert_eq!(summary.lightbox, LightboxStateKind::Closed);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            passes: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_layout_pass(&mut self, e: &LayoutPassEvent) {
                self.passes.push(e.pass_index);
            }
        }

        let mut sink = RecordingSink { passes: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.layout_pass(&sample_pass());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.passes, &[42]);
    }
}
