// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Justified photo-grid layout, lazy reveal tracking, and lightbox navigation.
//!
//! `quoin_core` is the algorithmic core of a photo-portfolio front end: a
//! pure row-packing layout engine, a gallery store that tracks which tiles
//! have scrolled near the viewport, and a modal lightbox state machine. It is
//! `no_std` compatible (with `alloc`) and keeps all host interaction behind
//! narrow seams (a presenter trait outward, plain method calls inward), so
//! the same core drives a DOM backend, tests, and headless demos unchanged.
//!
//! # Architecture
//!
//! The crate is organized around an evaluate loop that turns host events
//! into batched gallery updates:
//!
//! ```text
//!   Host events (resize, filter, intersection callbacks, clicks)
//!       │
//!       ▼
//!   GalleryStore setters ──► GalleryStore::evaluate() ──► GalleryChanges
//!                                    │                         │
//!                                    ▼                         ▼
//!                            layout::layout()          Presenter::apply()
//!
//!   Tile click ──► Lightbox::open() ◄── Key events while open
//!                      │
//!                      ▼
//!   FullscreenRequest ──► host capability ──► resolve_fullscreen()
//! ```
//!
//! **[`photo`]** — Input records: photo identity, intrinsic dimensions,
//! canonical category taxonomy with display names.
//!
//! **[`layout`]** — The justified layout engine: a single-pass greedy row
//! packer with per-row width-fit rescaling. Pure function of its inputs.
//!
//! **[`gallery`]** — The [`GalleryStore`](gallery::GalleryStore): catalog,
//! category filter, container width, derived tiles, and the monotonic
//! per-generation revealed set fed by host intersection callbacks.
//!
//! **[`dirty`]** — Reveal-channel dirty tracking via `understory_dirty`.
//! Store-wide rebuild flags are plain bools; per-tile reveal marks go
//! through a tracker channel and drain deterministically.
//!
//! **[`lightbox`]** — Modal viewer state machine: open/close/next/previous
//! with circular wrap, keyboard contract, and an optimistic fullscreen
//! toggle that reverts when the host denies the request.
//!
//! **[`backend`]** — The [`Presenter`](backend::Presenter) trait that host
//! backends implement to apply gallery changes to real tile surfaces.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! evaluate-loop instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-tile
//!   reveal events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod dirty;
pub mod gallery;
pub mod layout;
pub mod lightbox;
pub mod photo;
pub mod trace;
