// Copyright 2026 the Quoin Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Gallery events carry pass indices rather than wall-clock timestamps, so
//! the exporter lays passes out on a synthetic timeline, one millisecond per
//! pass. The x-axis of the resulting trace reads as "evaluate pass number".
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Width of one evaluate pass on the synthetic timeline, in microseconds.
const PASS_SLOT_US: u64 = 1_000;

fn pass_ts(pass_index: u64) -> u64 {
    pass_index.saturating_mul(PASS_SLOT_US)
}

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Layout passes render as duration slices, reveal counts as a counter
/// track, and lightbox activity as instants.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::LayoutPass(e) => {
                events.push(json!({
                    "ph": "X",
                    "name": "LayoutPass",
                    "cat": "Gallery",
                    "ts": pass_ts(e.pass_index),
                    "dur": PASS_SLOT_US,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "pass_index": e.pass_index,
                        "generation": e.generation,
                        "container_width": e.container_width,
                        "tile_count": e.tile_count,
                        "row_count": e.row_count,
                        "total_height": e.total_height,
                    }
                }));
            }
            RecordedEvent::Reveals { pass_index, count } => {
                events.push(json!({
                    "ph": "C",
                    "name": "reveals",
                    "cat": "Gallery",
                    "ts": pass_ts(pass_index),
                    "pid": 0,
                    "args": {
                        "count": count,
                    }
                }));
            }
            RecordedEvent::Reveal(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Reveal",
                    "cat": "Rich",
                    "ts": pass_ts(e.pass_index),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "tile": e.tile,
                        "generation": e.generation,
                    }
                }));
            }
            RecordedEvent::LightboxTransition(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "LightboxTransition",
                    "cat": "Lightbox",
                    "ts": pass_ts(e.pass_index),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "from": format!("{:?}", e.from),
                        "to": format!("{:?}", e.to),
                    }
                }));
            }
            RecordedEvent::FullscreenDenied(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "FullscreenDenied",
                    "cat": "Lightbox",
                    "ts": pass_ts(e.pass_index),
                    "pid": 0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "reverted_to": e.reverted_to,
                    }
                }));
            }
            RecordedEvent::PassSummary(s) => {
                events.push(json!({
                    "ph": "i",
                    "name": "PassSummary",
                    "cat": "Summary",
                    "ts": pass_ts(s.pass_index),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "generation": s.generation,
                        "regenerated": s.regenerated,
                        "relaid_out": s.relaid_out,
                        "reveal_count": s.reveal_count,
                        "lightbox": format!("{:?}", s.lightbox),
                        "total_height": s.total_height,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}
