// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: a justified photo gallery driven by `quoin_backend_web`.
//!
//! Builds a category menu, a justified grid of synthetic photos, and a
//! lightbox overlay, wiring up the web backend's building blocks:
//! [`TilePresenter`] for the grid, [`ProximityObserver`] for lazy reveals,
//! [`FullscreenDriver`] for the lightbox's fullscreen toggle, and
//! [`FrameScheduler`] to coalesce each event burst into one evaluate pass.
//!
//! Build with: `wasm-pack build --target web demos/web_gallery`
//!
//! Then serve `demos/web_gallery/` and open `index.html` in a browser.

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, KeyboardEvent, MouseEvent};

use gallery_common::{demo_params, demo_photos};
use quoin_backend_web::{
    FrameScheduler, FullscreenDriver, ObserverConfig, Presenter as _, ProximityObserver,
    ResizeWatcher, TilePresenter, keys, viewport,
};
use quoin_core::gallery::GalleryStore;
use quoin_core::lightbox::{Lightbox, LightboxState};
use quoin_core::photo::Category;

const PHOTO_COUNT: usize = 48;

struct App {
    store: GalleryStore,
    lightbox: Lightbox,
    presenter: TilePresenter,
    overlay: Overlay,
}

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().expect("no global window");
    let document = window.document().expect("no document");
    let body = document.body().expect("no body");

    let menu = create_menu(&document)?;
    body.append_child(&menu)?;
    let container = create_container(&document)?;
    body.append_child(&container)?;
    let overlay = Overlay::new(&document)?;
    body.append_child(&overlay.backdrop)?;
    let backdrop = overlay.backdrop.clone();

    // Gallery inputs; nothing is computed until the first scheduled pass.
    let mut store = GalleryStore::new();
    store.set_photos(demo_photos(PHOTO_COUNT));
    store.set_params(demo_params());
    store.set_container_width(viewport::measure_width(&container));
    populate_menu(&menu, &store, &document)?;

    let presenter = TilePresenter::new(container.clone());
    let state = Rc::new(RefCell::new(App {
        store,
        lightbox: Lightbox::new(),
        presenter,
        overlay,
    }));

    // The observer is created after the scheduler but the scheduler's frame
    // callback needs it (to watch elements of a regenerated grid), so it
    // lives in a slot filled once both exist.
    let observer_slot: Rc<RefCell<Option<ProximityObserver>>> = Rc::new(RefCell::new(None));

    let state_cb = Rc::clone(&state);
    let observer_cb = Rc::clone(&observer_slot);
    let scheduler = Rc::new(FrameScheduler::new(move || {
        on_frame(&state_cb, &observer_cb);
    }));

    let state_cb = Rc::clone(&state);
    let scheduler_cb = Rc::clone(&scheduler);
    let observer = ProximityObserver::new(&ObserverConfig::default(), move |tile| {
        state_cb.borrow_mut().store.mark_revealed(tile);
        scheduler_cb.schedule();
    })?;
    *observer_slot.borrow_mut() = Some(observer);

    let state_cb = Rc::clone(&state);
    let scheduler_cb = Rc::clone(&scheduler);
    let fullscreen = Rc::new(FullscreenDriver::new(document.clone(), move |outcome| {
        let _ = state_cb.borrow_mut().lightbox.resolve_fullscreen(outcome);
        scheduler_cb.schedule();
    })?);

    // Clicking a tile opens the lightbox on it.
    let state_cb = Rc::clone(&state);
    let scheduler_cb = Rc::clone(&scheduler);
    let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Ok(Some(tile_el)) = target.closest("[data-tile]") else {
            return;
        };
        let Some(tile) = tile_el
            .get_attribute("data-tile")
            .and_then(|v| v.parse::<u32>().ok())
        else {
            return;
        };
        let mut app = state_cb.borrow_mut();
        let len = app.store.filtered_len();
        if app.lightbox.open(tile, len).is_ok() {
            scheduler_cb.schedule();
        }
    }) as Box<dyn FnMut(MouseEvent)>);
    container.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    // Clicking anywhere on the overlay closes the lightbox.
    let state_cb = Rc::clone(&state);
    let scheduler_cb = Rc::clone(&scheduler);
    let fullscreen_cb = Rc::clone(&fullscreen);
    let on_backdrop = Closure::wrap(Box::new(move |_event: MouseEvent| {
        let mut app = state_cb.borrow_mut();
        if let Some(request) = app.lightbox.close() {
            fullscreen_cb.execute(request);
        }
        scheduler_cb.schedule();
    }) as Box<dyn FnMut(MouseEvent)>);
    backdrop.add_event_listener_with_callback("click", on_backdrop.as_ref().unchecked_ref())?;
    on_backdrop.forget();

    // Escape / arrows / `f`, live only while the lightbox is open.
    let state_cb = Rc::clone(&state);
    let scheduler_cb = Rc::clone(&scheduler);
    let fullscreen_cb = Rc::clone(&fullscreen);
    let on_key = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        let Some(key) = keys::translate(&event.key()) else {
            return;
        };
        let mut app = state_cb.borrow_mut();
        let len = app.store.filtered_len();
        let outcome = app.lightbox.handle_key(key, len);
        if !outcome.handled {
            return;
        }
        event.prevent_default();
        if let Some(request) = outcome.fullscreen {
            fullscreen_cb.execute(request);
        }
        scheduler_cb.schedule();
    }) as Box<dyn FnMut(KeyboardEvent)>);
    document.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();

    // Category menu filters the grid.
    let state_cb = Rc::clone(&state);
    let scheduler_cb = Rc::clone(&scheduler);
    let on_menu = Closure::wrap(Box::new(move |event: MouseEvent| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Some(label) = target
            .closest("[data-filter]")
            .ok()
            .flatten()
            .and_then(|el| el.get_attribute("data-filter"))
        else {
            return;
        };
        let filter = (label != "*").then(|| Category::from_label(&label));
        state_cb.borrow_mut().store.set_filter(filter);
        scheduler_cb.schedule();
    }) as Box<dyn FnMut(MouseEvent)>);
    menu.add_event_listener_with_callback("click", on_menu.as_ref().unchecked_ref())?;
    on_menu.forget();

    let state_cb = Rc::clone(&state);
    let scheduler_cb = Rc::clone(&scheduler);
    let container_cb = container.clone();
    let resize = ResizeWatcher::new(window, move || {
        let width = viewport::measure_width(&container_cb);
        state_cb.borrow_mut().store.set_container_width(width);
        scheduler_cb.schedule();
    })?;

    // Keep the watcher alive; everything else stays alive through the Rc
    // clones captured by the listeners. There is no graceful shutdown on
    // the web.
    core::mem::forget(resize);

    // First pass: regenerate, lay out, create tiles, start observing.
    scheduler.schedule();

    Ok(())
}

/// One coalesced pass: evaluate, apply to the DOM, and refresh observation
/// and the overlay.
fn on_frame(state: &Rc<RefCell<App>>, observer: &Rc<RefCell<Option<ProximityObserver>>>) {
    let mut s = state.borrow_mut();

    // Destructure to satisfy the borrow checker: mutable store + presenter,
    // immutable lightbox + overlay.
    let App {
        ref mut store,
        ref mut presenter,
        ref lightbox,
        ref overlay,
    } = *s;
    let changes = store.evaluate();
    presenter.apply(store, &changes);

    if changes.regenerated
        && let Some(observer) = observer.borrow().as_ref()
    {
        // The regeneration replaced every tile element; watch the new set.
        observer.disconnect();
        for el in presenter.tile_elements() {
            observer.observe(el);
        }
    }

    overlay.sync(store, lightbox);
}

// ---------------------------------------------------------------------------
// DOM scaffolding
// ---------------------------------------------------------------------------

/// The lightbox DOM: a fixed backdrop with a centered image and caption.
struct Overlay {
    backdrop: HtmlElement,
    image: HtmlImageElement,
    caption: HtmlElement,
}

impl Overlay {
    fn new(doc: &Document) -> Result<Self, JsValue> {
        let backdrop: HtmlElement = doc.create_element("div")?.unchecked_into();
        let s = backdrop.style();
        s.set_property("position", "fixed")?;
        s.set_property("inset", "0")?;
        s.set_property("display", "none")?;
        s.set_property("flex-direction", "column")?;
        s.set_property("align-items", "center")?;
        s.set_property("justify-content", "center")?;
        s.set_property("gap", "12px")?;
        s.set_property("background", "rgba(0, 0, 0, 0.88)")?;
        s.set_property("cursor", "zoom-out")?;

        let image: HtmlImageElement = doc.create_element("img")?.unchecked_into();
        let s = image.style();
        s.set_property("max-width", "92vw")?;
        s.set_property("max-height", "86vh")?;
        s.set_property("object-fit", "contain")?;
        backdrop.append_child(&image)?;

        let caption: HtmlElement = doc.create_element("div")?.unchecked_into();
        let s = caption.style();
        s.set_property("color", "#ddd")?;
        s.set_property("font", "14px system-ui, sans-serif")?;
        backdrop.append_child(&caption)?;

        Ok(Self {
            backdrop,
            image,
            caption,
        })
    }

    /// Mirrors the lightbox state into the DOM.
    ///
    /// While open on an index the current filter no longer covers, the
    /// previous image stays up until the next navigation step wraps the
    /// index back into range.
    fn sync(&self, store: &GalleryStore, lightbox: &Lightbox) {
        match lightbox.state() {
            LightboxState::Open { index, .. } => {
                if let Some(photo) = store.photo_for_tile(index) {
                    self.image.set_src(&photo.src);
                    self.image.set_alt(&photo.alt);
                    self.caption.set_text_content(Some(&photo.alt));
                }
                let _ = self.backdrop.style().set_property("display", "flex");
            }
            LightboxState::Closed => {
                let _ = self.backdrop.style().set_property("display", "none");
            }
        }
    }
}

fn create_container(doc: &Document) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = doc.create_element("div")?.unchecked_into();
    let s = el.style();
    s.set_property("max-width", "1200px")?;
    s.set_property("margin", "0 auto")?;
    Ok(el)
}

fn create_menu(doc: &Document) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = doc.create_element("nav")?.unchecked_into();
    let s = el.style();
    s.set_property("display", "flex")?;
    s.set_property("gap", "8px")?;
    s.set_property("justify-content", "center")?;
    s.set_property("margin", "16px 0")?;
    Ok(el)
}

/// Fills the menu with an "All" button plus one button per catalog category,
/// in menu-rank order.
fn populate_menu(menu: &HtmlElement, store: &GalleryStore, doc: &Document) -> Result<(), JsValue> {
    let all: HtmlElement = doc.create_element("button")?.unchecked_into();
    all.set_text_content(Some("All"));
    all.set_attribute("data-filter", "*")?;
    menu.append_child(&all)?;

    for category in store.menu_categories() {
        let button: HtmlElement = doc.create_element("button")?.unchecked_into();
        button.set_text_content(Some(category.display_name()));
        button.set_attribute("data-filter", category.label())?;
        menu.append_child(&button)?;
    }
    Ok(())
}
