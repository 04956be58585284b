// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for quoin.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`TilePresenter`]: DOM tile management (deferred image loading)
//! - [`ProximityObserver`]: `IntersectionObserver`-based reveal source
//! - [`FullscreenDriver`]: fullscreen execution and outcome reporting
//! - [`FrameScheduler`]: coalesced per-burst evaluate scheduling
//! - [`keys`]: `KeyboardEvent.key` translation for the lightbox
//! - [`viewport`]: container measurement and resize subscription

#![no_std]

extern crate alloc;

mod fullscreen;
pub mod keys;
mod observer;
mod presenter;
mod raf;
pub mod viewport;

pub use fullscreen::FullscreenDriver;
pub use observer::{ObserverConfig, ProximityObserver};
pub use presenter::TilePresenter;
pub use quoin_core::backend::Presenter;
pub use raf::FrameScheduler;
pub use viewport::ResizeWatcher;
