// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coalesced `requestAnimationFrame` scheduling.
//!
//! Input events arrive in bursts: a resize fires alongside an
//! intersection batch, a filter click lands with a pending reveal.
//! [`FrameScheduler`] collapses any number of [`schedule`] calls into a
//! single callback on the next animation frame, so the event loop runs one
//! evaluate-and-present per burst instead of one per event.
//!
//! [`schedule`]: FrameScheduler::schedule

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global bindings instead of `web_sys::Window` methods; scheduling
// happens per event burst and skips the Window fetch each time.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

type RafClosure = Closure<dyn FnMut(f64)>;

/// A one-shot `requestAnimationFrame` scheduler that coalesces requests.
///
/// Create with [`FrameScheduler::new`], then call
/// [`schedule`](Self::schedule) whenever store state changed. The callback
/// runs at most once per animation frame, regardless of how many times
/// `schedule` was called before it.
pub struct FrameScheduler {
    inner: Rc<SchedulerInner>,
}

struct SchedulerInner {
    /// The JS closure registered with `requestAnimationFrame`.
    ///
    /// Built once at construction; `schedule` re-registers the same
    /// closure for each frame.
    closure: RefCell<Option<RafClosure>>,

    /// The user-supplied callback that runs once per scheduled frame.
    callback: RefCell<Box<dyn FnMut()>>,

    /// Whether a frame is already requested.
    pending: Cell<bool>,

    /// The ID returned by the most recent `requestAnimationFrame` call,
    /// used by [`cancel_animation_frame`] when cancelling.
    raf_id: Cell<i32>,
}

impl FrameScheduler {
    /// Creates a scheduler with nothing pending.
    ///
    /// `callback` runs on the next animation frame after each
    /// [`schedule`](Self::schedule); it typically evaluates the store and
    /// applies the changes through a presenter.
    pub fn new(callback: impl FnMut() + 'static) -> Self {
        let inner = Rc::new(SchedulerInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            pending: Cell::new(false),
            raf_id: Cell::new(0),
        });

        let frame_inner = Rc::clone(&inner);
        let closure = Closure::wrap(Box::new(move |_timestamp_ms: f64| {
            // Clear before running so the callback may schedule again.
            frame_inner.pending.set(false);
            frame_inner.callback.borrow_mut()();
        }) as Box<dyn FnMut(f64)>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Requests one callback on the next animation frame.
    ///
    /// If a frame is already pending, this is a no-op: the burst that is
    /// accumulating will be handled by the callback already registered.
    pub fn schedule(&self) {
        if self.inner.pending.get() {
            return;
        }
        self.inner.pending.set(true);
        if let Some(ref closure) = *self.inner.closure.borrow() {
            let id = request_animation_frame(closure.as_ref().unchecked_ref());
            self.inner.raf_id.set(id);
        }
    }

    /// Cancels the pending callback, if any.
    pub fn cancel(&self) {
        if self.inner.pending.replace(false) {
            cancel_animation_frame(self.inner.raf_id.get());
        }
    }

    /// Returns `true` if a frame is currently pending.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.inner.pending.get()
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        self.cancel();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("pending", &self.inner.pending.get())
            .finish()
    }
}
