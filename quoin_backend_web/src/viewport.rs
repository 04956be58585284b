// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container measurement and resize subscription.
//!
//! The layout engine wants one number from the browser: the gallery
//! container's width. [`measure_width`] reads it and [`ResizeWatcher`]
//! reports when it may have changed. Feed the measurement to
//! `GalleryStore::set_container_width`; the store skips unchanged widths,
//! so over-reporting is harmless.

use alloc::boxed::Box;

use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, Window};

/// Returns the container's layout width in CSS pixels.
#[must_use]
pub fn measure_width(container: &HtmlElement) -> f64 {
    f64::from(container.offset_width())
}

type ResizeClosure = Closure<dyn FnMut()>;

/// Subscribes to window resizes.
///
/// The callback fires on every `resize` event; it should re-measure the
/// container and update the store. Dropping the watcher removes the
/// listener.
pub struct ResizeWatcher {
    window: Window,
    closure: ResizeClosure,
}

impl core::fmt::Debug for ResizeWatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResizeWatcher").finish_non_exhaustive()
    }
}

impl ResizeWatcher {
    /// Registers `on_resize` for the window's `resize` events.
    ///
    /// # Errors
    ///
    /// Returns the browser's error when the listener cannot be registered.
    pub fn new(window: Window, on_resize: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(on_resize) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        Ok(Self { window, closure })
    }
}

impl Drop for ResizeWatcher {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.closure.as_ref().unchecked_ref());
    }
}
