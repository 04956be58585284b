// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). The line
//! prefix names the event family, so the stream greps cleanly by `[layout]`,
//! `[reveal]`, `[lightbox]`, and `[summary]`.

use std::io::Write;

use quoin_core::trace::{
    FullscreenDeniedEvent, LayoutPassEvent, LightboxStateKind, LightboxTransitionEvent,
    PassSummary, RevealEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn kind_name(kind: LightboxStateKind) -> &'static str {
    match kind {
        LightboxStateKind::Closed => "closed",
        LightboxStateKind::Open => "open",
        LightboxStateKind::OpenFullscreen => "open+fs",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_layout_pass(&mut self, e: &LayoutPassEvent) {
        let _ = writeln!(
            self.writer,
            "[layout] pass={} gen={} width={:.0} tiles={} rows={} height={:.1}",
            e.pass_index,
            e.generation,
            e.container_width,
            e.tile_count,
            e.row_count,
            e.total_height,
        );
    }

    fn on_reveals(&mut self, pass_index: u64, count: u32) {
        let _ = writeln!(self.writer, "[reveal] pass={pass_index} count={count}");
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        let _ = writeln!(
            self.writer,
            "[reveal:tile] pass={} tile={} gen={}",
            e.pass_index, e.tile, e.generation,
        );
    }

    fn on_lightbox_transition(&mut self, e: &LightboxTransitionEvent) {
        let _ = writeln!(
            self.writer,
            "[lightbox] pass={} {} -> {}",
            e.pass_index,
            kind_name(e.from),
            kind_name(e.to),
        );
    }

    fn on_fullscreen_denied(&mut self, e: &FullscreenDeniedEvent) {
        let _ = writeln!(
            self.writer,
            "[lightbox] pass={} fullscreen DENIED reverted_to={}",
            e.pass_index, e.reverted_to,
        );
    }

    fn on_pass_summary(&mut self, s: &PassSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] pass={} gen={} regen={} relayout={} reveals={} lightbox={} height={:.1}",
            s.pass_index,
            s.generation,
            s.regenerated,
            s.relaid_out,
            s.reveal_count,
            kind_name(s.lightbox),
            s.total_height,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_print_layout_pass() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_layout_pass(&LayoutPassEvent {
            pass_index: 1,
            generation: 2,
            container_width: 960.0,
            tile_count: 12,
            row_count: 4,
            total_height: 873.5,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("[layout]"), "got: {output}");
        assert!(output.contains("pass=1"), "got: {output}");
        assert!(output.contains("tiles=12"), "got: {output}");
    }

    #[test]
    fn pretty_print_denial_names_the_reverted_flag() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_fullscreen_denied(&FullscreenDeniedEvent {
            pass_index: 9,
            reverted_to: false,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("DENIED"), "got: {output}");
        assert!(output.contains("reverted_to=false"), "got: {output}");
    }

    #[test]
    fn pretty_print_transition_uses_short_kind_names() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_lightbox_transition(&LightboxTransitionEvent {
            pass_index: 3,
            from: LightboxStateKind::Open,
            to: LightboxStateKind::OpenFullscreen,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("open -> open+fs"), "got: {output}");
    }
}
