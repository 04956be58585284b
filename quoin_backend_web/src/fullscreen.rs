// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fullscreen execution and outcome reporting.
//!
//! [`FullscreenDriver`] executes the lightbox's
//! [`FullscreenRequest`]s against the document and turns the browser's
//! `fullscreenchange`/`fullscreenerror` events into
//! [`FullscreenOutcome`]s. The events are the source of truth: a request
//! the browser refuses (no user gesture, iframe policy) fires
//! `fullscreenerror`, which reaches the lightbox as
//! [`FullscreenOutcome::Denied`] and rewinds its optimistic flag.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use quoin_core::lightbox::{FullscreenOutcome, FullscreenRequest};
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Document;

type OutcomeCallback = Rc<RefCell<Box<dyn FnMut(FullscreenOutcome)>>>;
type ListenerClosure = Closure<dyn FnMut()>;

/// Executes fullscreen transitions and reports how they ended.
///
/// Create with [`FullscreenDriver::new`]; the `on_outcome` callback should
/// call `Lightbox::resolve_fullscreen` (and emit a trace event on
/// [`FullscreenResolution::Reverted`]). Dropping the driver removes its
/// document listeners.
///
/// [`FullscreenResolution::Reverted`]: quoin_core::lightbox::FullscreenResolution::Reverted
pub struct FullscreenDriver {
    document: Document,
    change: ListenerClosure,
    error: ListenerClosure,
}

impl core::fmt::Debug for FullscreenDriver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FullscreenDriver").finish_non_exhaustive()
    }
}

impl FullscreenDriver {
    /// Creates a driver listening on `document`.
    ///
    /// # Errors
    ///
    /// Returns the browser's error when a listener cannot be registered.
    pub fn new(
        document: Document,
        on_outcome: impl FnMut(FullscreenOutcome) + 'static,
    ) -> Result<Self, JsValue> {
        let callback: OutcomeCallback = Rc::new(RefCell::new(Box::new(on_outcome)));

        // `fullscreenchange` fires for both directions; the document's
        // current fullscreen element tells them apart.
        let doc = document.clone();
        let cb = Rc::clone(&callback);
        let change = Closure::wrap(Box::new(move || {
            let outcome = if doc.fullscreen_element().is_some() {
                FullscreenOutcome::Entered
            } else {
                FullscreenOutcome::Exited
            };
            cb.borrow_mut()(outcome);
        }) as Box<dyn FnMut()>);

        let cb = Rc::clone(&callback);
        let error = Closure::wrap(Box::new(move || {
            cb.borrow_mut()(FullscreenOutcome::Denied);
        }) as Box<dyn FnMut()>);

        document
            .add_event_listener_with_callback("fullscreenchange", change.as_ref().unchecked_ref())?;
        document
            .add_event_listener_with_callback("fullscreenerror", error.as_ref().unchecked_ref())?;

        Ok(Self {
            document,
            change,
            error,
        })
    }

    /// Executes a fullscreen transition.
    ///
    /// The result arrives asynchronously through the `on_outcome` callback;
    /// this method only kicks the browser.
    pub fn execute(&self, request: FullscreenRequest) {
        match request {
            FullscreenRequest::Enter => {
                if let Some(root) = self.document.document_element() {
                    // Refusal surfaces via `fullscreenerror`, so the
                    // request's own return value carries nothing extra.
                    let _ = root.request_fullscreen();
                }
            }
            FullscreenRequest::Exit => {
                self.document.exit_fullscreen();
            }
        }
    }

    /// Returns whether the document is currently fullscreen.
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }
}

impl Drop for FullscreenDriver {
    fn drop(&mut self) {
        let _ = self.document.remove_event_listener_with_callback(
            "fullscreenchange",
            self.change.as_ref().unchecked_ref(),
        );
        let _ = self.document.remove_event_listener_with_callback(
            "fullscreenerror",
            self.error.as_ref().unchecked_ref(),
        );
    }
}
