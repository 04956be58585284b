// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated gallery session that exercises the tracing and diagnostics
//! pipeline.
//!
//! Sweeps the container width from desktop to phone while a scripted visitor
//! scrolls tiles into view, flips the category filter, and walks the lightbox
//! through a denied fullscreen attempt, recording events to both a
//! [`PrettyPrintSink`](quoin_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](quoin_debug::recorder::RecorderSink), then exports a
//! Chrome trace JSON file. Every recomputed layout is checked with
//! [`LayoutAudit`](quoin_harness::LayoutAudit).

use std::fs::File;
use std::io::BufWriter;

use gallery_common::{MARGIN, demo_params, demo_photos};
use quoin_core::gallery::GalleryStore;
use quoin_core::lightbox::{
    FullscreenOutcome, FullscreenRequest, FullscreenResolution, Key, Lightbox,
};
use quoin_core::photo::Category;
use quoin_core::trace::{
    FullscreenDeniedEvent, LayoutPassEvent, LightboxStateKind, LightboxTransitionEvent,
    PassSummary, PassSummaryBuilder, RevealEvent, TraceSink, Tracer,
};
use quoin_debug::pretty::PrettyPrintSink;
use quoin_debug::recorder::RecorderSink;
use quoin_harness::{LayoutAudit, ScriptedIntersections};

const PHOTO_COUNT: usize = 24;
/// Container widths the session sweeps through, desktop to phone.
const WIDTH_SWEEP: [f64; 4] = [1280.0, 1024.0, 700.0, 375.0];

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- gallery -----------------------------------------------------------
    let mut store = GalleryStore::new();
    store.set_photos(demo_photos(PHOTO_COUNT));
    store.set_params(demo_params());
    // Initial evaluate, as a host would render once before any scrolling;
    // reveal marks only stick once the filtered list exists.
    let _ = store.evaluate();

    let mut lightbox = Lightbox::new();
    let mut pass_index: u64 = 0;

    // -- scripted scroll ---------------------------------------------------
    // The first rows are in view immediately; the rest trickle in as the
    // visitor scrolls, six tiles per pass.
    let mut script = ScriptedIntersections::new();
    for tile in 0..24 {
        script.schedule(1 + u64::from(tile) / 6, tile);
    }

    // -- resize sweep ------------------------------------------------------
    for &width in &WIDTH_SWEEP {
        pass_index += 1;
        store.set_container_width(width);
        let summary = run_pass(
            &mut pretty,
            &mut recorder,
            pass_index,
            &mut store,
            &mut script,
            &lightbox,
        );
        audit_layout(pass_index, &store);

        // Also exercise the Tracer wrapper (just to prove it compiles and
        // dispatches).
        if pass_index == 1 {
            let mut tracer = Tracer::new(&mut pretty);
            tracer.pass_summary(&summary);
        }
    }

    // -- category flips ----------------------------------------------------
    // Filtering regenerates the list: reveals reset, the generation bumps,
    // and the five Nature tiles come into view on the following pass.
    pass_index += 1;
    store.set_filter(Some(Category::Nature));
    run_pass(
        &mut pretty,
        &mut recorder,
        pass_index,
        &mut store,
        &mut script,
        &lightbox,
    );
    audit_layout(pass_index, &store);

    pass_index += 1;
    for tile in 0..5 {
        script.schedule(pass_index, tile);
    }
    run_pass(
        &mut pretty,
        &mut recorder,
        pass_index,
        &mut store,
        &mut script,
        &lightbox,
    );

    pass_index += 1;
    store.set_filter(None);
    run_pass(
        &mut pretty,
        &mut recorder,
        pass_index,
        &mut store,
        &mut script,
        &lightbox,
    );
    audit_layout(pass_index, &store);

    // -- lightbox session --------------------------------------------------
    // The visitor opens the fourth photo, steps around, tries fullscreen
    // (this host refuses), and leaves with Escape.
    let len = store.filtered_len();
    let from = LightboxStateKind::from(lightbox.state());
    lightbox
        .open(3, len)
        .expect("tile 3 exists in the unfiltered catalog");
    emit_transition(
        &mut pretty,
        &mut recorder,
        pass_index,
        from,
        lightbox.state().into(),
    );

    lightbox.next(len);
    lightbox.next(len);
    lightbox.previous(len);

    let from = LightboxStateKind::from(lightbox.state());
    if lightbox.toggle_fullscreen() == Some(FullscreenRequest::Enter) {
        // The optimistic flip shows fullscreen immediately; the host then
        // refuses the request and the flip rewinds.
        emit_transition(
            &mut pretty,
            &mut recorder,
            pass_index,
            from,
            lightbox.state().into(),
        );
        let resolution = lightbox.resolve_fullscreen(FullscreenOutcome::Denied);
        if resolution == FullscreenResolution::Reverted {
            let denied = FullscreenDeniedEvent {
                pass_index,
                reverted_to: lightbox.is_fullscreen(),
            };
            pretty.on_fullscreen_denied(&denied);
            recorder.on_fullscreen_denied(&denied);
            emit_transition(
                &mut pretty,
                &mut recorder,
                pass_index,
                LightboxStateKind::OpenFullscreen,
                lightbox.state().into(),
            );
        }
    }

    let from = LightboxStateKind::from(lightbox.state());
    let outcome = lightbox.handle_key(Key::Escape, store.filtered_len());
    if outcome.handled {
        emit_transition(
            &mut pretty,
            &mut recorder,
            pass_index,
            from,
            lightbox.state().into(),
        );
    }

    // -- quiet pass --------------------------------------------------------
    // Nothing is dirty; the summary records the session settling.
    pass_index += 1;
    run_pass(
        &mut pretty,
        &mut recorder,
        pass_index,
        &mut store,
        &mut script,
        &lightbox,
    );

    // -- export Chrome trace -----------------------------------------------
    let path = "layout_trace.json";
    let file = File::create(path).expect("failed to create layout_trace.json");
    let mut writer = BufWriter::new(file);
    quoin_debug::chrome::export(recorder.as_bytes(), &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({pass_index} passes)");
}

/// Applies due scripted reveals, evaluates, and emits the pass's events to
/// both sinks.
fn run_pass(
    pretty: &mut PrettyPrintSink,
    recorder: &mut RecorderSink,
    pass_index: u64,
    store: &mut GalleryStore,
    script: &mut ScriptedIntersections,
    lightbox: &Lightbox,
) -> PassSummary {
    script.apply_to(pass_index, store);
    let changes = store.evaluate();

    if changes.relaid_out {
        let e = LayoutPassEvent::new(pass_index, store);
        pretty.on_layout_pass(&e);
        recorder.on_layout_pass(&e);
    }

    if !changes.revealed.is_empty() {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "reveal counts are bounded by the demo catalog size"
        )]
        let count = changes.revealed.len() as u32;
        pretty.on_reveals(pass_index, count);
        recorder.on_reveals(pass_index, count);
        for &tile in &changes.revealed {
            let e = RevealEvent {
                pass_index,
                tile,
                generation: changes.generation,
            };
            pretty.on_reveal(&e);
            recorder.on_reveal(&e);
        }
    }

    let mut builder = PassSummaryBuilder::new(pass_index);
    builder.record_changes(&changes);
    builder.record_lightbox(lightbox.state());
    let summary = builder.finish();
    pretty.on_pass_summary(&summary);
    recorder.on_pass_summary(&summary);
    summary
}

/// Checks the store's current layout and prints the audit grade.
fn audit_layout(pass_index: u64, store: &GalleryStore) {
    let audit = LayoutAudit::new(store.container_width(), MARGIN);
    let report = audit.check(store.layout());
    println!(
        "[audit] pass={pass_index} grade={} fill_err={:.2e} rows={} tiles={}",
        report.grade.as_str(),
        report.worst_fill_error,
        report.rows,
        report.tiles
    );
}

fn emit_transition(
    pretty: &mut PrettyPrintSink,
    recorder: &mut RecorderSink,
    pass_index: u64,
    from: LightboxStateKind,
    to: LightboxStateKind,
) {
    let e = LightboxTransitionEvent {
        pass_index,
        from,
        to,
    };
    pretty.on_lightbox_transition(&e);
    recorder.on_lightbox_transition(&e);
}
